use crate::models::{Bookmark, CategoryFilter};

/// Narrow a bookmark list down to what the search box and selector allow
///
/// A record passes when its title or url contains `search` (case-insensitive)
/// and the category filter accepts it. Input order is preserved.
pub fn filter<'a>(
    records: &'a [Bookmark],
    search: &str,
    category: &CategoryFilter,
) -> Vec<&'a Bookmark> {
    let needle = search.to_lowercase();
    records
        .iter()
        .filter(|bookmark| matches(bookmark, &needle, category))
        .collect()
}

/// Single-record predicate; `needle` must already be lowercased
pub fn matches(bookmark: &Bookmark, needle: &str, category: &CategoryFilter) -> bool {
    let text_match = bookmark.title.to_lowercase().contains(needle)
        || bookmark.url.to_lowercase().contains(needle);

    text_match && category.matches(&bookmark.category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::seed::seed_bookmarks;

    fn titles(records: Vec<&Bookmark>) -> Vec<&str> {
        records.into_iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn test_search_git_all() {
        let seed = seed_bookmarks();
        assert_eq!(titles(filter(&seed, "git", &CategoryFilter::All)), vec!["GitHub"]);
    }

    #[test]
    fn test_dev_category_keeps_order() {
        let seed = seed_bookmarks();
        let dev = CategoryFilter::Only(Category::Dev);
        assert_eq!(
            titles(filter(&seed, "", &dev)),
            vec!["GitHub", "Stack Overflow"]
        );
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let seed = seed_bookmarks();
        assert_eq!(titles(filter(&seed, "FIGMA", &CategoryFilter::All)), vec!["Figma"]);
    }

    #[test]
    fn test_search_matches_url() {
        let seed = seed_bookmarks();
        // "openai" only appears in ChatGPT's url
        assert_eq!(
            titles(filter(&seed, "openai", &CategoryFilter::All)),
            vec!["ChatGPT"]
        );
    }

    #[test]
    fn test_search_and_category_combine() {
        let seed = seed_bookmarks();
        let tools = CategoryFilter::Only(Category::Tools);
        assert_eq!(titles(filter(&seed, "ver", &tools)), vec!["Vercel"]);
        assert!(filter(&seed, "git", &tools).is_empty());
    }

    #[test]
    fn test_empty_search_all_returns_everything() {
        let seed = seed_bookmarks();
        assert_eq!(filter(&seed, "", &CategoryFilter::All).len(), seed.len());
    }
}
