use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState};
use crate::router::Route;

use super::form;
use super::styles;
use super::tabs::{attendance, dashboard, employees, settings, welcome};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Navigation
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame, app),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::EnteringRoute => render_route_overlay(frame, app),
        AppState::EditingEmployee => form::render_employee_form(frame, app),
        AppState::ConfirmingDelete => render_delete_overlay(frame, app),
        _ => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Presence";
    let right = if app.is_logged_in() {
        format!("Welcome, {} | [?] Help", app.username())
    } else {
        "[?] Help".to_string()
    };

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title.len() as u16 + right.chars().count() as u16 + 4)
                as usize,
        )),
        Span::styled(right, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let mut spans = vec![Span::raw(" ")];

    if app.is_logged_in() {
        let current = app.route.section();
        for (i, route) in Route::MAIN.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", styles::muted_style()));
            }
            let label = format!("[{}] {}", i + 1, route.title());
            if current == Some(i) {
                spans.push(Span::styled(label, styles::tab_style(true, theme)));
            } else {
                spans.push(Span::styled(label, styles::muted_style()));
            }
        }
    }

    // Current location on the right
    let path = app.route.path();
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding = (area.width as usize).saturating_sub(used + path.len() + 2);
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(path, styles::muted_style()));

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.route {
        Route::Landing => welcome::render_landing(frame, app, area),
        Route::Login => welcome::render_login(frame, app, area),
        Route::Dashboard => dashboard::render(frame, app, area),
        Route::Employees => employees::render_list(frame, app, area),
        Route::EmployeeDetail(_) => employees::render_detail(frame, app, area),
        Route::Attendance => attendance::render_days(frame, app, area),
        Route::AttendanceDetail(date) => attendance::render_day(frame, app, date, area),
        Route::Settings => settings::render(frame, app, area),
        Route::NotFound(ref path) => welcome::render_not_found(frame, path, area),
        Route::Root => {}
    }
}

fn shortcuts(app: &App) -> &'static str {
    match app.route {
        Route::Landing => "[Enter] start | [q]uit",
        Route::Login => "[Tab] next field | [Esc] quit",
        Route::Employees => "[/] search | [a]dd | [e]dit | [d]elete | [q]uit",
        Route::EmployeeDetail(_) => "[e]dit | [d]elete | [Esc] back",
        Route::Settings => "[Tab] section | [e]dit | [t]heme | [C]lear cache",
        _ => "[:] go to | [L]ogout | [q]uit",
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let left = if let Some(toast) = app.toasts.back() {
        Span::styled(
            format!(" {} ", toast.notice.message),
            styles::notice_style(toast.notice.level),
        )
    } else if let Some(ref msg) = app.status_message {
        Span::styled(format!(" {} ", msg), styles::muted_style())
    } else if app.is_loading() {
        Span::styled(" Loading... ", styles::highlight_style())
    } else {
        Span::raw("")
    };

    let right_text = format!(" {} ", shortcuts(app));
    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left.content.chars().count())
        .saturating_sub(right_text.len());

    let status_line = Line::from(vec![
        left,
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style(theme));
    frame.render_widget(paragraph, area);
}

fn help_line(key: &str, desc: &str, app: &App) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc.to_string(), styles::help_desc_style(app.theme())),
    ])
}

fn render_help_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(52, 27, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  Presence", styles::title_style())),
        Line::from(Span::styled(
            format!("  attendance console, version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        help_line("1-4", "Dashboard/Employees/Attendance/Settings", app),
        help_line("↑/↓", "Navigate list", app),
        help_line("PgUp/PgDn", "Scroll a page", app),
        help_line("Enter", "Open selected row", app),
        help_line(":", "Go to a path, e.g. /attendance/2024-03-01", app),
        help_line("Esc", "Go back", app),
        Line::from(""),
        Line::from(Span::styled(" Employees", styles::highlight_style())),
        help_line("/", "Search by name, email, or id", app),
        help_line("a", "Add employee", app),
        help_line("e / d", "Edit / delete selected", app),
        Line::from(""),
        Line::from(Span::styled(" Session", styles::highlight_style())),
        help_line("t", "Toggle light/dark theme", app),
        help_line("C", "Clear cached responses (Settings)", app),
        help_line("L", "Log out", app),
        help_line("q", "Quit", app),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(help_text).block(block);

    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle with fixed dimensions
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_confirm(frame: &mut Frame, question: Line<'static>, action: &'static str) {
    let area = centered_rect_fixed(50, 7, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        question,
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(format!(" to {}, ", action), styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_quit_overlay(frame: &mut Frame) {
    render_confirm(
        frame,
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        "quit",
    );
}

fn render_delete_overlay(frame: &mut Frame, app: &App) {
    let name = app
        .pending_delete
        .as_ref()
        .map(|(_, name)| name.clone())
        .unwrap_or_default();
    render_confirm(
        frame,
        Line::from(vec![
            Span::styled("   Delete ", styles::highlight_style()),
            Span::styled(name, styles::error_style()),
            Span::styled("?", styles::highlight_style()),
        ]),
        "delete",
    );
}

fn render_route_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(56, 3, frame.area());
    frame.render_widget(Clear, area);

    let line = Line::from(vec![
        Span::styled(" Go to: ", styles::muted_style()),
        Span::styled(format!("{}▌", app.route_input), styles::search_style()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(line).block(block), area);
}
