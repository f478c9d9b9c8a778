//! Public pages: landing, login, and not found.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, LoginFocus};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

const LOGO: [&str; 3] = [
    "╔═╗╦═╗╔═╗╔═╗╔═╗╔╗╔╔═╗╔═╗",
    "╠═╝╠╦╝║╣ ╚═╗║╣ ║║║║  ║╣ ",
    "╩  ╩╚═╚═╝╚═╝╚═╝╝╚╝╚═╝╚═╝",
];

fn logo_lines() -> Vec<Line<'static>> {
    LOGO.iter()
        .map(|l| Line::from(Span::styled(*l, styles::title_style())))
        .collect()
}

pub fn render_landing(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let mut lines = logo_lines();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Attendance tracking for teams on the move",
        styles::highlight_style(),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Geofenced clock-in, daily reports, and employee records in one place.",
        styles::list_item_style(theme),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Press ", styles::muted_style()),
        Span::styled("Enter", styles::help_key_style()),
        Span::styled(
            if app.is_logged_in() { " to open the dashboard" } else { " to sign in" },
            styles::muted_style(),
        ),
    ]));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::NONE));
    frame.render_widget(paragraph, centered_rect_fixed(area.width, 11, area));
}

pub fn render_login(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let height = if app.login_error.is_some() { 13 } else { 11 };
    let area = centered_rect_fixed(46, height, area);

    let mut lines = logo_lines();
    lines.push(Line::from(""));

    let field_style = |focused: bool| {
        if focused {
            styles::selected_style(theme)
        } else {
            styles::list_item_style(theme)
        }
    };

    let username_focused = app.login_focus == LoginFocus::Username;
    let cursor = if username_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::styled("Username: [", styles::muted_style()),
        Span::styled(
            format!("{:<16}{}", app.login_username, cursor),
            field_style(username_focused),
        ),
        Span::styled("]", styles::muted_style()),
    ]));

    let password_focused = app.login_focus == LoginFocus::Password;
    let cursor = if password_focused { "▌" } else { "" };
    let masked = "*".repeat(app.login_password.chars().count().min(16));
    lines.push(Line::from(vec![
        Span::styled("Password: [", styles::muted_style()),
        Span::styled(format!("{:<16}{}", masked, cursor), field_style(password_focused)),
        Span::styled("]", styles::muted_style()),
    ]));

    lines.push(Line::from(""));
    let button_focused = app.login_focus == LoginFocus::Button;
    let label = if button_focused { " ▶ Login ◀ " } else { "   Login   " };
    lines.push(Line::from(vec![
        Span::raw("["),
        Span::styled(label, field_style(button_focused)),
        Span::raw("]"),
    ]));

    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(error.clone(), styles::error_style())));
    }

    let block = Block::default()
        .title(" Sign in ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

pub fn render_not_found(frame: &mut Frame, path: &str, area: Rect) {
    let lines = vec![
        Line::from(Span::styled("404", styles::error_style())),
        Line::from(""),
        Line::from(Span::styled(
            format!("No page at {}", path),
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", styles::muted_style()),
            Span::styled(":", styles::help_key_style()),
            Span::styled(" to go somewhere else or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to go back", styles::muted_style()),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, centered_rect_fixed(area.width, 5, area));
}
