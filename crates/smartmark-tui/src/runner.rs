// TUI event loop and terminal management
use crate::{App, InputMode};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// How often the loop wakes up without input, so toasts can expire
const TICK: Duration = Duration::from_millis(200);

/// Side effects a key press asks the runner to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenUrl(String),
}

pub fn run_tui(mut app: App, mouse_enabled: bool) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal even if the loop bailed out
    disable_raw_mode()?;
    if mouse_enabled {
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    } else {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        app.toasts.expire(Instant::now());
        terminal.draw(|f| crate::ui::render(f, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(Action::OpenUrl(url)) = handle_key(app, key) {
                        tracing::info!("Opening {}", url);
                        if let Err(e) = open::that(&url) {
                            app.error_message = Some(format!("Failed to open browser: {}", e));
                        }
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Apply one key press to the app state
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return None;
    }

    match app.input_mode {
        InputMode::Searching => match key.code {
            KeyCode::Char(c) => app.push_search_char(c),
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Enter | KeyCode::Esc => app.enter_normal_mode(),
            _ => {}
        },
        InputMode::Form => match key.code {
            KeyCode::Esc => app.close_form(),
            KeyCode::Enter => app.submit_form(),
            KeyCode::Tab | KeyCode::Down => app.form_next_field(),
            KeyCode::BackTab | KeyCode::Up => app.form_previous_field(),
            KeyCode::Right => app.form_cycle_category(true),
            KeyCode::Left => app.form_cycle_category(false),
            KeyCode::Char(' ') if on_category(app) => app.form_cycle_category(true),
            KeyCode::Char(c) => app.form_input_char(c),
            KeyCode::Backspace => app.form_backspace(),
            _ => {}
        },
        InputMode::Normal => {
            app.clear_error();
            match key.code {
                KeyCode::Char('q') => app.quit(),
                KeyCode::Char('/') => app.enter_search_mode(),
                KeyCode::Esc => app.clear_search(),
                KeyCode::Char('a') => app.open_add_form(),
                KeyCode::Char('e') => app.open_edit_form(),
                KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
                KeyCode::Char('c') | KeyCode::Tab => app.next_category(),
                KeyCode::Char('C') | KeyCode::BackTab => app.previous_category(),
                KeyCode::Char('j') | KeyCode::Down => app.next_result(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_result(),
                KeyCode::Enter => {
                    return app
                        .selected_bookmark()
                        .map(|b| Action::OpenUrl(b.url.clone()));
                }
                _ => {}
            }
        }
    }

    None
}

fn on_category(app: &App) -> bool {
    app.form
        .as_ref()
        .is_some_and(|state| state.focus == smartmark_core::FormField::Category)
}
