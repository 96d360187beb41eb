// Terminal UI implementation using ratatui
// List, search box, category selector, modal form and toasts

pub mod app;
pub mod runner;
pub mod toast;
pub mod ui;

pub use app::{App, FormMode, FormState, InputMode, Store};
pub use runner::{handle_key, run_tui, Action};
pub use toast::{Toast, ToastKind, ToastQueue};
