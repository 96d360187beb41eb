// UI rendering logic
use crate::app::FormState;
use crate::toast::ToastKind;
use crate::{App, InputMode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use smartmark_core::{Category, FormField};

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search + category selector
            Constraint::Min(5),    // Bookmark list
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_filter_row(frame, app, chunks[1]);
    render_bookmark_list(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    if let Some(state) = &app.form {
        render_form(frame, state, frame.area());
    }

    render_toasts(frame, app, frame.area());
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![Span::styled(
        "🔖 Smart Bookmark",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(logo, header_chunks[0]);

    let stats = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{} ", app.store.len()),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ),
        Span::raw("saved  "),
        Span::styled(
            " a: Add Bookmark ",
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Right);
    frame.render_widget(stats, header_chunks[1]);
}

fn render_filter_row(frame: &mut Frame, app: &App, area: Rect) {
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(40)])
        .split(area);

    let input_style = match app.input_mode {
        InputMode::Searching => Style::default().fg(Color::Yellow),
        InputMode::Normal | InputMode::Form => Style::default(),
    };

    let text = if app.search_input.is_empty() && app.input_mode != InputMode::Searching {
        Span::styled("Search bookmarks…", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.search_input.as_str())
    };

    let input = Paragraph::new(Line::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Search (/ to type, ESC to clear)")
            .border_style(input_style),
    );
    frame.render_widget(input, row[0]);

    if app.input_mode == InputMode::Searching {
        frame.set_cursor_position((
            row[0].x + app.search_input.chars().count() as u16 + 1,
            row[0].y + 1,
        ));
    }

    let spans: Vec<Span> = smartmark_core::CategoryFilter::options()
        .into_iter()
        .flat_map(|option| {
            let style = if option == app.category {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            [Span::styled(format!(" {} ", option), style), Span::raw(" ")]
        })
        .collect();

    let selector = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Category (c/C)"),
    );
    frame.render_widget(selector, row[1]);
}

fn category_color(category: &Category) -> Color {
    match category {
        Category::Ai => Color::Magenta,
        Category::Dev => Color::Green,
        Category::Learning => Color::Yellow,
        Category::Tools => Color::Blue,
        Category::Other(_) => Color::Gray,
    }
}

fn render_bookmark_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let visible = app.visible();

    if visible.is_empty() {
        let empty = vec![
            Line::from(""),
            Line::from("📚"),
            Line::from(""),
            Line::from(Span::styled(
                "No bookmarks yet. Start by adding one 🚀",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Your bookmark collection will appear here once you add some bookmarks.",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let paragraph = Paragraph::new(empty)
            .block(Block::default().borders(Borders::ALL).title(" Bookmarks "))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let title = format!(" Bookmarks ({}) ", visible.len());
    let items: Vec<ListItem> = visible
        .iter()
        .map(|bookmark| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        bookmark.title.clone(),
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        format!("[{}]", bookmark.category),
                        Style::default().fg(category_color(&bookmark.category)),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("  {}", bookmark.url),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::Rgb(68, 71, 90))
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(error) = &app.error_message {
        Span::styled(error.as_str(), Style::default().fg(Color::Red))
    } else {
        match app.input_mode {
            InputMode::Searching => Span::styled(
                "SEARCH | type to filter | ENTER/ESC: back to list",
                Style::default().fg(Color::Yellow),
            ),
            InputMode::Form => Span::styled(
                "FORM | TAB: next field | ←/→: category | ENTER: save | ESC: cancel",
                Style::default().fg(Color::Green),
            ),
            InputMode::Normal => Span::raw(
                "j/k: navigate | /: search | c: category | a: add | e: edit | d: delete | ENTER: open | q: quit",
            ),
        }
    };

    frame.render_widget(Paragraph::new(Line::from(status)), area);
}

fn render_form(frame: &mut Frame, state: &FormState, area: Rect) {
    let popup = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", state.title()))
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(inner);

    for (field, row) in FormField::ALL.into_iter().zip(rows.iter()) {
        render_form_field(frame, state, field, *row);
    }
}

fn render_form_field(frame: &mut Frame, state: &FormState, field: FormField, area: Rect) {
    let focused = state.focus == field;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let value = match field {
        FormField::Title => Line::from(state.form.title.as_str()),
        FormField::Url => Line::from(state.form.url.as_str()),
        FormField::Category => {
            let current = state.form.category.as_ref();
            let spans: Vec<Span> = Category::ALL
                .iter()
                .flat_map(|c| {
                    let style = if Some(c) == current {
                        Style::default()
                            .fg(Color::Black)
                            .bg(category_color(c))
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::Gray)
                    };
                    [Span::styled(format!(" {} ", c), style), Span::raw(" ")]
                })
                .collect();
            Line::from(spans)
        }
    };

    let input = Paragraph::new(value).block(
        Block::default()
            .borders(Borders::ALL)
            .title(field.label())
            .border_style(border_style),
    );
    frame.render_widget(input, parts[0]);

    if let Some(message) = state.errors.get(field) {
        let error = Paragraph::new(Span::styled(message, Style::default().fg(Color::Red)));
        frame.render_widget(error, parts[1]);
    }

    if focused && field != FormField::Category {
        let len = match field {
            FormField::Title => state.form.title.chars().count(),
            _ => state.form.url.chars().count(),
        };
        frame.set_cursor_position((parts[0].x + len as u16 + 1, parts[0].y + 1));
    }
}

fn render_toasts(frame: &mut Frame, app: &App, area: Rect) {
    let width = 34.min(area.width);
    let x = area.x + area.width.saturating_sub(width + 1);

    for (i, toast) in app.toasts.iter().enumerate() {
        let y = area.y + 1 + (i as u16) * 3;
        if y + 3 > area.y + area.height {
            break;
        }

        let bg = match toast.kind {
            ToastKind::Success => Color::Green,
            ToastKind::Delete => Color::Red,
            ToastKind::Update => Color::Blue,
        };
        let rect = Rect {
            x,
            y,
            width,
            height: 3,
        };

        frame.render_widget(Clear, rect);
        let widget = Paragraph::new(Span::styled(
            toast.message.as_str(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().bg(bg));
        frame.render_widget(widget, rect);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Store;
    use ratatui::{backend::TestBackend, Terminal};
    use smartmark_core::config::UiConfig;
    use smartmark_core::BookmarkStore;
    use smartmark_storage::{KvStore, MemoryKvStore};

    fn test_app() -> App {
        let store: Store =
            BookmarkStore::open(Box::new(MemoryKvStore::new()) as Box<dyn KvStore>);
        App::new(store, &UiConfig::default())
    }

    fn screen_text(app: &mut App) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_renders_seed_list() {
        let mut app = test_app();
        let text = screen_text(&mut app);
        assert!(text.contains("GitHub"));
        assert!(text.contains("https://developer.mozilla.org"));
        assert!(text.contains("Bookmarks (6)"));
    }

    #[test]
    fn test_renders_empty_state() {
        let mut app = test_app();
        for c in "zzz".chars() {
            app.push_search_char(c);
        }
        let text = screen_text(&mut app);
        assert!(text.contains("No bookmarks yet"));
    }

    #[test]
    fn test_renders_form_errors() {
        let mut app = test_app();
        app.open_add_form();
        app.submit_form();

        let text = screen_text(&mut app);
        assert!(text.contains("Add Bookmark"));
        assert!(text.contains("Title is required"));
        assert!(text.contains("URL is required"));
    }
}
