use presence_core::models::AttendanceStatus;
use presence_core::store::Theme;
use presence_core::NoticeLevel;
use ratatui::style::{Color, Modifier, Style};

// Color palette shared by both themes
pub const PRIMARY: Color = Color::Rgb(64, 128, 192);
pub const SECONDARY: Color = Color::Rgb(96, 160, 96);
pub const ACCENT: Color = Color::Rgb(192, 160, 64);
pub const ERROR: Color = Color::Rgb(192, 64, 64);
pub const MUTED: Color = Color::Rgb(128, 128, 128);

/// Colors that change with the light/dark preference.
struct Palette {
    text: Color,
    highlight: Color,
    status_bg: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            text: Color::White,
            highlight: Color::Rgb(48, 48, 64),
            status_bg: Color::Rgb(32, 32, 40),
        },
        Theme::Light => Palette {
            text: Color::Rgb(32, 32, 40),
            highlight: Color::Rgb(208, 220, 240),
            status_bg: Color::Rgb(224, 224, 232),
        },
    }
}

// Styles
pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn selected_style(theme: Theme) -> Style {
    Style::default()
        .bg(palette(theme).highlight)
        .add_modifier(Modifier::BOLD)
}

pub fn list_item_style(theme: Theme) -> Style {
    Style::default().fg(palette(theme).text)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn highlight_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn success_style() -> Style {
    Style::default().fg(SECONDARY)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn tab_style(selected: bool, theme: Theme) -> Style {
    if selected {
        Style::default()
            .fg(PRIMARY)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(palette(theme).text)
    }
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn search_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn status_bar_style(theme: Theme) -> Style {
    let p = palette(theme);
    Style::default().bg(p.status_bg).fg(p.text)
}

pub fn help_key_style() -> Style {
    Style::default()
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn help_desc_style(theme: Theme) -> Style {
    Style::default().fg(palette(theme).text)
}

pub fn notice_style(level: NoticeLevel) -> Style {
    match level {
        NoticeLevel::Success => success_style().add_modifier(Modifier::BOLD),
        NoticeLevel::Error => error_style().add_modifier(Modifier::BOLD),
        NoticeLevel::Info => highlight_style(),
    }
}

pub fn status_style(status: AttendanceStatus) -> Style {
    match status {
        AttendanceStatus::Present => success_style(),
        AttendanceStatus::Late => highlight_style(),
        AttendanceStatus::Absent => error_style(),
        AttendanceStatus::Leave => Style::default().fg(PRIMARY),
        AttendanceStatus::Other => muted_style(),
    }
}
