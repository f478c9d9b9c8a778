//! Rendering shared by the editable forms.

use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use presence_core::forms::{Field, FormErrors};
use presence_core::store::Theme;

use crate::app::App;
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

/// Width of the label column.
const LABEL_WIDTH: usize = 18;

/// One line per field plus a line under each field that has an error.
pub fn field_lines(
    fields: &[(Field, String)],
    focus: Option<usize>,
    errors: &FormErrors,
    theme: Theme,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (i, (field, value)) in fields.iter().enumerate() {
        let focused = focus == Some(i);
        let style = if focused {
            styles::selected_style(theme)
        } else {
            styles::list_item_style(theme)
        };
        let cursor = if focused { "▌" } else { "" };

        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<width$}", format!("{}:", field.label()), width = LABEL_WIDTH),
                styles::muted_style(),
            ),
            Span::styled(format!("{}{}", value, cursor), style),
        ]));

        if let Some(message) = errors.get(*field) {
            lines.push(Line::from(Span::styled(
                format!(" {:<width$}{}", "", message, width = LABEL_WIDTH),
                styles::error_style(),
            )));
        }
    }

    lines
}

fn is_shift(field: Field) -> bool {
    matches!(field, Field::ShiftStart | Field::ShiftEnd)
}

/// Add/edit employee dialog.
pub fn render_employee_form(frame: &mut Frame, app: &App) {
    let Some(ref state) = app.employee_form else {
        return;
    };
    let theme = app.theme();

    let fields: Vec<(Field, String)> = presence_core::forms::EmployeeForm::FIELDS
        .iter()
        .map(|f| {
            let value = state.form.display_value(*f);
            if is_shift(*f) {
                (*f, format!("◀ {} ▶", value))
            } else {
                (*f, value)
            }
        })
        .collect();

    let mut lines = vec![Line::from("")];
    lines.extend(field_lines(&fields, Some(state.focus), &state.errors, theme));
    lines.push(Line::from(""));

    let hint = if is_shift(state.focused_field()) {
        " ←/→ change time | Space AM/PM | Enter save | Esc cancel"
    } else {
        " Tab next field | Enter save | Esc cancel"
    };
    lines.push(Line::from(Span::styled(hint, styles::muted_style())));
    if state.submitting {
        lines.push(Line::from(Span::styled(" Saving...", styles::highlight_style())));
    }

    let height = lines.len() as u16 + 2;
    let area = centered_rect_fixed(70, height, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", state.title()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
