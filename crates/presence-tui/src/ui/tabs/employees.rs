use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use presence_core::models::Employee;

use crate::app::{App, AppState};
use crate::ui::styles;
use crate::ui::tabs::attendance::record_rows;
use crate::utils::{format_date, format_optional, format_phone, truncate_string};

/// Render the Employees page - search bar above a table of the roster
pub fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let searching = app.state == AppState::Searching;
    let cursor = if searching { "▌" } else { "" };
    let search = Paragraph::new(Line::from(vec![
        Span::styled(" / ", styles::muted_style()),
        Span::styled(format!("{}{}", app.search_query, cursor), styles::search_style()),
    ]))
    .block(
        Block::default()
            .title(" Search ")
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(searching)),
    );
    frame.render_widget(search, chunks[0]);

    let employees = app.filtered_employees();

    let header = Row::new(vec!["ID", "Name", "Designation", "Email", "Phone"])
        .style(styles::title_style())
        .height(1);

    let rows: Vec<Row> = employees
        .iter()
        .map(|e| {
            Row::new(vec![
                Cell::from(truncate_string(&e.id, 12)),
                Cell::from(e.name.clone()),
                Cell::from(e.role().to_string()),
                Cell::from(e.email.clone()),
                Cell::from(format_phone(&e.phone_number)),
            ])
            .style(styles::list_item_style(theme))
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Percentage(25),
        Constraint::Fill(1),
        Constraint::Fill(2),
        Constraint::Length(16),
    ];

    let title = if app.search_query.is_empty() {
        format!(" Employees ({}) ", app.employees.len())
    } else {
        format!(" Employees ({} of {}) ", employees.len(), app.employees.len())
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(!searching)),
        )
        .row_highlight_style(styles::selected_style(theme));

    let mut state = TableState::default();
    if !employees.is_empty() {
        state.select(Some(app.employee_selection));
    }
    frame.render_stateful_widget(table, chunks[1], &mut state);

    if employees.is_empty() && !app.is_loading() {
        let hint = if app.search_query.is_empty() {
            "No employees yet. Press [a] to add one."
        } else {
            "No employees match the search."
        };
        let inner = Rect {
            x: chunks[1].x + 2,
            y: chunks[1].y + 2,
            width: chunks[1].width.saturating_sub(4),
            height: chunks[1].height.saturating_sub(2).min(1),
        };
        frame.render_widget(Paragraph::new(Span::styled(hint, styles::muted_style())), inner);
    }
}

fn info_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<14}", label), styles::muted_style()),
        Span::raw(value),
    ])
}

fn profile_lines(employee: &Employee) -> Vec<Line<'static>> {
    let placeholder = "-";
    let mut lines = vec![
        Line::from(Span::styled(employee.name.clone(), styles::title_style())),
        Line::from(Span::styled(employee.role().to_string(), styles::highlight_style())),
        Line::from(""),
        info_line("Employee ID:", employee.id.clone()),
        info_line("Email:", format_optional(&employee.email, placeholder)),
        info_line(
            "Phone:",
            format_optional(&format_phone(&employee.phone_number), placeholder),
        ),
        info_line("Address:", format_optional(&employee.address, placeholder)),
        info_line(
            "Birth date:",
            format_optional(&format_date(&employee.date_of_birth), placeholder),
        ),
    ];

    if let Some(age) = employee.age {
        lines.push(info_line("Age:", age.to_string()));
    }
    if !employee.blood_type.is_empty() {
        lines.push(info_line("Blood type:", employee.blood_type.clone()));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Work", styles::highlight_style())));
    lines.push(info_line(
        "Shift:",
        employee
            .shift_hours
            .as_ref()
            .map(|s| s.display())
            .unwrap_or_else(|| "Not set".to_string()),
    ));
    if !employee.department.is_empty() {
        lines.push(info_line("Department:", employee.department.clone()));
    }
    if !employee.hire_date.is_empty() {
        lines.push(info_line("Hired:", format_date(&employee.hire_date)));
    }
    if let Some(ref ctc) = employee.ctc {
        lines.push(info_line(
            "CTC:",
            format!("{:.0} {} / {}", ctc.amount, ctc.currency, ctc.frequency),
        ));
    }
    lines
}

/// Render one employee's profile beside their attendance history
pub fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let content = match app.employee {
        Some(ref employee) => profile_lines(employee),
        None if app.is_loading() => {
            vec![Line::from(Span::styled("Loading...", styles::muted_style()))]
        }
        None => vec![Line::from(Span::styled("Employee not found", styles::error_style()))],
    };

    let profile = Paragraph::new(content).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Profile - [e]dit [d]elete ")
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(false)),
    );
    frame.render_widget(profile, chunks[0]);

    let (header, rows, widths) = record_rows(
        &app.employee_attendance,
        app.store.state().office_geofence,
        theme,
        true,
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" Attendance ({}) ", app.employee_attendance.len()))
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style(theme));

    let mut state = TableState::default();
    if !app.employee_attendance.is_empty() {
        state.select(Some(app.detail_selection));
    }
    frame.render_stateful_widget(table, chunks[1], &mut state);
}
