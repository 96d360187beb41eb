// TUI application state
use crate::toast::{ToastKind, ToastQueue};
use ratatui::widgets::ListState;
use smartmark_core::config::UiConfig;
use smartmark_core::{
    validate, validate_edit, Bookmark, BookmarkForm, BookmarkPatch, BookmarkStore, Category,
    CategoryFilter, FormErrors, FormField,
};
use smartmark_storage::KvStore;
use std::time::Duration;

pub const UNSAVED_MESSAGE: &str = "Could not save bookmarks, changes are kept for this session only";

/// The store as the TUI holds it, backend erased
pub type Store = BookmarkStore<Box<dyn KvStore>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,    // Navigating the list
    Searching, // Typing in search box
    Form,      // Add/edit modal is open
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(u64),
}

/// Modal add/edit form
#[derive(Debug, Clone)]
pub struct FormState {
    pub mode: FormMode,
    pub form: BookmarkForm,
    pub errors: FormErrors,
    pub focus: FormField,
}

impl FormState {
    fn new(mode: FormMode, form: BookmarkForm) -> Self {
        Self {
            mode,
            form,
            errors: FormErrors::default(),
            focus: FormField::Title,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add Bookmark",
            FormMode::Edit(_) => "Edit Bookmark",
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub store: Store,
    pub search_input: String,
    pub category: CategoryFilter,
    pub selected_index: usize,
    pub list_state: ListState,
    pub form: Option<FormState>,
    pub toasts: ToastQueue,
    pub error_message: Option<String>,
    pub default_category: Category,
}

impl App {
    pub fn new(store: Store, ui: &UiConfig) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            store,
            search_input: String::new(),
            category: CategoryFilter::All,
            selected_index: 0,
            list_state,
            form: None,
            toasts: ToastQueue::new(Duration::from_millis(ui.toast_millis)),
            error_message: None,
            default_category: ui.default_category.clone(),
        }
    }

    /// Bookmarks that pass the current search text and category selector
    pub fn visible(&self) -> Vec<&Bookmark> {
        self.store.search(&self.search_input, &self.category)
    }

    pub fn selected_bookmark(&self) -> Option<&Bookmark> {
        self.visible().get(self.selected_index).copied()
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Searching;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_input.push(c);
        self.reset_selection();
    }

    pub fn pop_search_char(&mut self) {
        self.search_input.pop();
        self.reset_selection();
    }

    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.reset_selection();
    }

    pub fn next_category(&mut self) {
        self.category = self.category.next();
        self.reset_selection();
    }

    pub fn previous_category(&mut self) {
        self.category = self.category.previous();
        self.reset_selection();
    }

    pub fn next_result(&mut self) {
        let count = self.visible().len();
        if count > 0 {
            self.selected_index = (self.selected_index + 1).min(count - 1);
            self.list_state.select(Some(self.selected_index));
        }
    }

    pub fn previous_result(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.list_state.select(Some(0));
    }

    /// Keep the cursor on a real row after the list shrinks
    fn clamp_selection(&mut self) {
        let count = self.visible().len();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
        self.list_state.select(Some(self.selected_index));
    }

    pub fn open_add_form(&mut self) {
        let form = BookmarkForm::empty(self.default_category.clone());
        self.form = Some(FormState::new(FormMode::Add, form));
        self.input_mode = InputMode::Form;
    }

    pub fn open_edit_form(&mut self) {
        let Some(bookmark) = self.selected_bookmark() else {
            return;
        };
        let state = FormState::new(FormMode::Edit(bookmark.id), BookmarkForm::from_bookmark(bookmark));
        self.form = Some(state);
        self.input_mode = InputMode::Form;
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn form_input_char(&mut self, c: char) {
        if let Some(state) = self.form.as_mut() {
            if let Some(text) = state.form.field_mut(state.focus) {
                text.push(c);
                state.errors.clear(state.focus);
            }
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(state) = self.form.as_mut() {
            if let Some(text) = state.form.field_mut(state.focus) {
                text.pop();
                state.errors.clear(state.focus);
            }
        }
    }

    pub fn form_next_field(&mut self) {
        if let Some(state) = self.form.as_mut() {
            state.focus = state.focus.next();
        }
    }

    pub fn form_previous_field(&mut self) {
        if let Some(state) = self.form.as_mut() {
            state.focus = state.focus.previous();
        }
    }

    /// Step the category picker; only does anything while it has focus
    pub fn form_cycle_category(&mut self, forward: bool) {
        let Some(state) = self.form.as_mut() else {
            return;
        };
        if state.focus != FormField::Category {
            return;
        }

        let next = match &state.form.category {
            Some(c) if forward => c.next(),
            Some(c) => c.previous(),
            None => Category::Ai,
        };
        state.form.category = Some(next);
        state.errors.clear(FormField::Category);
    }

    /// Validate and apply the open form. On failure the form stays open
    /// with its field messages filled in.
    pub fn submit_form(&mut self) {
        let Some(state) = self.form.as_mut() else {
            return;
        };

        let checked = match state.mode {
            FormMode::Edit(id) => match self.store.get(id) {
                Some(existing) => validate_edit(&state.form, existing),
                None => validate(&state.form),
            },
            FormMode::Add => validate(&state.form),
        };

        let draft = match checked {
            Ok(draft) => draft,
            Err(errors) => {
                state.errors = errors;
                return;
            }
        };

        match state.mode {
            FormMode::Add => {
                self.store.add(draft);
                self.toasts.push("Bookmark added successfully", ToastKind::Success);
            }
            FormMode::Edit(id) => {
                if self.store.update(id, BookmarkPatch::from(draft)) {
                    self.toasts.push("Bookmark updated", ToastKind::Update);
                } else {
                    self.error_message = Some(format!("Bookmark {} no longer exists", id));
                }
            }
        }

        self.close_form();
        self.report_unsaved();
        self.clamp_selection();
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_bookmark().map(|b| b.id) else {
            return;
        };

        if self.store.remove(id).is_some() {
            self.toasts.push("Bookmark deleted", ToastKind::Delete);
        }
        self.report_unsaved();
        self.clamp_selection();
    }

    /// Surface a failed write in the status bar; the change itself stays
    fn report_unsaved(&mut self) {
        if self.store.has_unsaved_changes() {
            self.error_message = Some(UNSAVED_MESSAGE.to_string());
        }
    }

    /// Drop the status message, unless the last write is still failing
    pub fn clear_error(&mut self) {
        self.error_message = None;
        self.report_unsaved();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartmark_core::validation::{TITLE_REQUIRED, URL_SCHEME};
    use smartmark_storage::{MemoryKvStore, StorageError};

    /// Reads nothing, refuses every write
    struct ReadOnlyKv;

    impl KvStore for ReadOnlyKv {
        fn get(&self, _key: &str) -> smartmark_storage::Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> smartmark_storage::Result<()> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }

        fn remove(&self, _key: &str) -> smartmark_storage::Result<()> {
            Ok(())
        }
    }

    fn test_app() -> App {
        let store: Store = BookmarkStore::open(Box::new(MemoryKvStore::new()) as Box<dyn KvStore>);
        App::new(store, &UiConfig::default())
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.form_input_char(c);
        }
    }

    #[test]
    fn test_starts_with_seed_visible() {
        let app = test_app();
        assert_eq!(app.visible().len(), 6);
        assert_eq!(app.selected_bookmark().unwrap().title, "GitHub");
    }

    #[test]
    fn test_search_and_category_narrow_list() {
        let mut app = test_app();
        for c in "git".chars() {
            app.push_search_char(c);
        }
        assert_eq!(app.visible().len(), 1);

        app.clear_search();
        app.next_category(); // AI
        app.next_category(); // Dev
        let titles: Vec<&str> = app.visible().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["GitHub", "Stack Overflow"]);
    }

    #[test]
    fn test_add_through_form() {
        let mut app = test_app();
        app.open_add_form();
        assert_eq!(app.input_mode, InputMode::Form);
        assert_eq!(
            app.form.as_ref().unwrap().form.category,
            Some(Category::Ai)
        );

        type_text(&mut app, "Docs.rs");
        app.form_next_field();
        type_text(&mut app, "https://docs.rs");
        app.submit_form();

        assert!(app.form.is_none());
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.store.len(), 7);
        assert_eq!(app.store.bookmarks().last().unwrap().title, "Docs.rs");
        assert_eq!(app.toasts.iter().next().unwrap().message, "Bookmark added successfully");
    }

    #[test]
    fn test_invalid_form_stays_open_with_errors() {
        let mut app = test_app();
        app.open_add_form();
        app.form_next_field();
        type_text(&mut app, "ftp://x.com");
        app.submit_form();

        let state = app.form.as_ref().unwrap();
        assert_eq!(state.errors.title.as_deref(), Some(TITLE_REQUIRED));
        assert_eq!(state.errors.url.as_deref(), Some(URL_SCHEME));
        assert_eq!(app.store.len(), 6);

        // Typing into a field clears only that field's message
        app.form_previous_field();
        app.form_input_char('X');
        let state = app.form.as_ref().unwrap();
        assert!(state.errors.title.is_none());
        assert!(state.errors.url.is_some());
    }

    #[test]
    fn test_edit_selected() {
        let mut app = test_app();
        app.next_result(); // ChatGPT
        app.open_edit_form();

        app.form_next_field();
        app.form_next_field();
        app.form_cycle_category(true); // AI -> Dev
        app.submit_form();

        assert_eq!(app.store.get(2).unwrap().category, Category::Dev);
        assert_eq!(app.store.get(2).unwrap().title, "ChatGPT");
        assert_eq!(app.toasts.iter().next().unwrap().kind, ToastKind::Update);
    }

    #[test]
    fn test_category_cycle_ignored_off_focus() {
        let mut app = test_app();
        app.open_add_form();
        app.form_cycle_category(true);
        assert_eq!(app.form.as_ref().unwrap().form.category, Some(Category::Ai));
    }

    #[test]
    fn test_delete_last_row_clamps_selection() {
        let mut app = test_app();
        for _ in 0..10 {
            app.next_result();
        }
        assert_eq!(app.selected_bookmark().unwrap().title, "Figma");

        app.delete_selected();

        assert_eq!(app.store.len(), 5);
        assert_eq!(app.selected_index, 4);
        assert_eq!(app.selected_bookmark().unwrap().title, "Stack Overflow");
        assert_eq!(app.toasts.iter().next().unwrap().kind, ToastKind::Delete);
    }

    #[test]
    fn test_delete_on_empty_view_is_noop() {
        let mut app = test_app();
        for c in "nothing matches this".chars() {
            app.push_search_char(c);
        }
        app.delete_selected();
        assert_eq!(app.store.len(), 6);
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn test_failed_write_shows_status_message() {
        let store: Store = BookmarkStore::open(Box::new(ReadOnlyKv) as Box<dyn KvStore>);
        let mut app = App::new(store, &UiConfig::default());

        app.delete_selected();

        assert_eq!(app.store.len(), 5);
        assert_eq!(app.error_message.as_deref(), Some(UNSAVED_MESSAGE));
        // Still failing, so the message survives the next key press
        app.clear_error();
        assert_eq!(app.error_message.as_deref(), Some(UNSAVED_MESSAGE));
    }

    #[test]
    fn test_edit_keeps_legacy_category() {
        let slot = r#"[{"id":5,"title":"Pasta","url":"https://recipes.example","category":"Recipes"}]"#;
        let kv = MemoryKvStore::with_slot(smartmark_core::persistence::DEFAULT_SLOT_KEY, slot);
        let store: Store = BookmarkStore::open(Box::new(kv) as Box<dyn KvStore>);
        let mut app = App::new(store, &UiConfig::default());

        app.open_edit_form();
        type_text(&mut app, " night");
        app.submit_form();

        assert!(app.form.is_none());
        let pasta = app.store.get(5).unwrap();
        assert_eq!(pasta.title, "Pasta night");
        assert_eq!(pasta.category, Category::Other("Recipes".to_string()));
    }
}
