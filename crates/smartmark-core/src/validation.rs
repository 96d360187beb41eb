use crate::models::{Bookmark, BookmarkDraft, Category};

pub const TITLE_REQUIRED: &str = "Title is required";
pub const URL_REQUIRED: &str = "URL is required";
pub const URL_SCHEME: &str = "URL must start with http:// or https://";
pub const CATEGORY_REQUIRED: &str = "Category is required";
pub const CATEGORY_UNKNOWN: &str = "Category must be AI, Dev, Learning or Tools";

/// Raw add/edit form input, exactly as typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkForm {
    pub title: String,
    pub url: String,
    pub category: Option<Category>,
}

impl BookmarkForm {
    /// Blank form, as shown when adding
    pub fn empty(default_category: Category) -> Self {
        Self {
            title: String::new(),
            url: String::new(),
            category: Some(default_category),
        }
    }

    /// Form pre-filled from an existing bookmark, as shown when editing
    pub fn from_bookmark(bookmark: &Bookmark) -> Self {
        Self {
            title: bookmark.title.clone(),
            url: bookmark.url.clone(),
            category: Some(bookmark.category.clone()),
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Title => Some(&mut self.title),
            FormField::Url => Some(&mut self.url),
            FormField::Category => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Url,
    Category,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Title, FormField::Url, FormField::Category];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Url => "URL",
            FormField::Category => "Category",
        }
    }

    pub fn next(&self) -> FormField {
        match self {
            FormField::Title => FormField::Url,
            FormField::Url => FormField::Category,
            FormField::Category => FormField::Title,
        }
    }

    pub fn previous(&self) -> FormField {
        match self {
            FormField::Title => FormField::Category,
            FormField::Url => FormField::Title,
            FormField::Category => FormField::Url,
        }
    }
}

/// Field-level validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub title: Option<String>,
    pub url: Option<String>,
    pub category: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.category.is_none()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Title => self.title.as_deref(),
            FormField::Url => self.url.as_deref(),
            FormField::Category => self.category.as_deref(),
        }
    }

    /// Forget the message for one field, e.g. once the user edits it
    pub fn clear(&mut self, field: FormField) {
        match field {
            FormField::Title => self.title = None,
            FormField::Url => self.url = None,
            FormField::Category => self.category = None,
        }
    }

    /// (field, message) pairs in form order
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        FormField::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|msg| (field, msg)))
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.iter().map(|(_, msg)| msg).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for FormErrors {}

/// Check a submitted form and turn it into a draft
///
/// Title and url must be non-blank; the url prefix is checked on the raw
/// value, so leading whitespace fails the scheme check. Accepted values are
/// stored trimmed. The category must be one of the fixed set.
pub fn validate(form: &BookmarkForm) -> Result<BookmarkDraft, FormErrors> {
    check(form, None)
}

/// Like [`validate`], but a record loaded with a category outside the fixed
/// set may keep it as long as the form leaves it untouched
pub fn validate_edit(
    form: &BookmarkForm,
    existing: &Bookmark,
) -> Result<BookmarkDraft, FormErrors> {
    check(form, Some(&existing.category))
}

fn check(
    form: &BookmarkForm,
    grandfathered: Option<&Category>,
) -> Result<BookmarkDraft, FormErrors> {
    let mut errors = FormErrors::default();

    if form.title.trim().is_empty() {
        errors.title = Some(TITLE_REQUIRED.to_string());
    }

    if form.url.trim().is_empty() {
        errors.url = Some(URL_REQUIRED.to_string());
    } else if !has_web_scheme(&form.url) {
        errors.url = Some(URL_SCHEME.to_string());
    }

    match &form.category {
        None => errors.category = Some(CATEGORY_REQUIRED.to_string()),
        Some(category) if !category.is_known() && grandfathered != Some(category) => {
            errors.category = Some(CATEGORY_UNKNOWN.to_string());
        }
        Some(_) => {}
    }

    match (&form.category, errors.is_empty()) {
        (Some(category), true) => Ok(BookmarkDraft {
            title: form.title.trim().to_string(),
            url: form.url.trim().to_string(),
            category: category.clone(),
        }),
        _ => Err(errors),
    }
}

fn has_web_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
