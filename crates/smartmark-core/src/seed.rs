use crate::models::{Bookmark, Category};

/// The six bookmarks a fresh install starts with
///
/// Also what `load` falls back to when the slot is missing or unreadable.
pub fn seed_bookmarks() -> Vec<Bookmark> {
    [
        (1, "GitHub", "https://github.com", Category::Dev),
        (2, "ChatGPT", "https://chat.openai.com", Category::Ai),
        (3, "MDN Web Docs", "https://developer.mozilla.org", Category::Learning),
        (4, "Vercel", "https://vercel.com", Category::Tools),
        (5, "Stack Overflow", "https://stackoverflow.com", Category::Dev),
        (6, "Figma", "https://figma.com", Category::Tools),
    ]
    .into_iter()
    .map(|(id, title, url, category)| Bookmark {
        id,
        title: title.to_string(),
        url: url.to_string(),
        category,
    })
    .collect()
}
