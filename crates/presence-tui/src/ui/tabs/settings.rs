use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use presence_core::forms::{Field, GeofenceForm};
use presence_core::store::Theme;

use crate::app::{App, AppState, SettingsTab};
use crate::ui::form::field_lines;
use crate::ui::styles;

const SECTIONS: [SettingsTab; 2] = [SettingsTab::Location, SettingsTab::Appearance];

/// Render the Settings page - section tabs above the selected section
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(8)])
        .split(area);

    let mut spans = vec![Span::raw(" ")];
    for (i, section) in SECTIONS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        let style = if *section == app.settings_tab {
            styles::tab_style(true, theme)
        } else {
            styles::muted_style()
        };
        spans.push(Span::styled(section.title(), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    match app.settings_tab {
        SettingsTab::Location => render_location(frame, app, chunks[1]),
        SettingsTab::Appearance => render_appearance(frame, app, chunks[1]),
    }
}

/// Mask all but the last four characters.
fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = key.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

fn render_location(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let editing = app.state == AppState::EditingSettings;

    let fields: Vec<(Field, String)> = GeofenceForm::FIELDS
        .iter()
        .map(|f| {
            let value = app.geofence_form.display_value(*f);
            let shown = match f {
                Field::MapsApiKey if !editing => mask_key(value),
                _ => value.to_string(),
            };
            (*f, shown)
        })
        .collect();

    let focus = editing.then_some(app.geofence_focus);
    let mut lines = vec![Line::from(Span::styled(
        "Office geofence used to validate clock-ins",
        styles::highlight_style(),
    ))];
    lines.push(Line::from(""));
    lines.extend(field_lines(&fields, focus, &app.geofence_errors, theme));
    lines.push(Line::from(""));

    match app.store.state().office_geofence {
        Some(g) => lines.push(Line::from(Span::styled(
            format!(
                " Saved: {:.6}, {:.6} within {:.0} m",
                g.latitude, g.longitude, g.radius
            ),
            styles::muted_style(),
        ))),
        None => lines.push(Line::from(Span::styled(
            " No office location saved",
            styles::muted_style(),
        ))),
    }

    let status = if app.config_loaded {
        Span::styled(" Synced with server", styles::success_style())
    } else if app.is_loading() {
        Span::styled(" Loading server config...", styles::muted_style())
    } else {
        Span::styled(" Showing local values", styles::muted_style())
    };
    lines.push(Line::from(status));

    let hint = if editing {
        " Tab next field | Enter save | Esc cancel"
    } else {
        " [e] edit location"
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(hint, styles::muted_style())));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Location ")
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(editing)),
    );
    frame.render_widget(paragraph, area);
}

fn render_appearance(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let option = |t: Theme| {
        let selected = t == theme;
        let marker = if selected { "(•)" } else { "( )" };
        let style = if selected {
            styles::selected_style(theme)
        } else {
            styles::list_item_style(theme)
        };
        Span::styled(format!(" {} {} ", marker, t.as_str()), style)
    };

    let lines = vec![
        Line::from(Span::styled("Theme", styles::highlight_style())),
        Line::from(vec![option(Theme::Light), Span::raw("  "), option(Theme::Dark)]),
        Line::from(Span::styled(" [t] toggle", styles::muted_style())),
        Line::from(""),
        Line::from(Span::styled("Cached responses", styles::highlight_style())),
        Line::from(vec![
            Span::styled(" Entries: ", styles::muted_style()),
            Span::raw(app.api.cache().len().to_string()),
        ]),
        Line::from(Span::styled(" [C] clear cache", styles::muted_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled(" API: ", styles::muted_style()),
            Span::raw(app.api.base_url().to_string()),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Appearance ")
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(false)),
    );
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key(""), "");
        assert_eq!(mask_key("abc"), "***");
        assert_eq!(mask_key("AIzaSy1234"), "******1234");
    }
}
