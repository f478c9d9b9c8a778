use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

/// Render the Dashboard - headline numbers, recent days, and the roster
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(6)])
        .split(area);

    render_stats(frame, app, chunks[0]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_recent_days(frame, app, bottom[0]);
    render_employees(frame, app, bottom[1]);
}

fn stat_card(frame: &mut Frame, area: Rect, label: &str, value: String, style: Style) {
    let lines = vec![
        Line::from(Span::styled(value, style)),
        Line::from(Span::styled(label.to_string(), styles::muted_style())),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styles::border_style(false)),
        );
    frame.render_widget(paragraph, area);
}

fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 6); 6])
        .split(area);

    let Some(ref data) = app.dashboard else {
        let text = if app.is_loading() { "Loading..." } else { "No dashboard data" };
        frame.render_widget(
            Paragraph::new(Span::styled(text, styles::muted_style()))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(styles::border_style(false)),
                ),
            area,
        );
        return;
    };

    stat_card(
        frame,
        cards[0],
        "Employees",
        data.total_employees.to_string(),
        styles::title_style(),
    );
    stat_card(frame, cards[1], "Present", data.present_today.to_string(), styles::success_style());
    stat_card(frame, cards[2], "Late", data.late_today.to_string(), styles::highlight_style());
    stat_card(frame, cards[3], "Absent", data.absent_today.to_string(), styles::error_style());
    stat_card(frame, cards[4], "On Leave", data.on_leave_today.to_string(), styles::title_style());
    stat_card(
        frame,
        cards[5],
        "Attendance",
        format!("{:.0}%", data.attendance_rate()),
        styles::success_style(),
    );
}

fn render_recent_days(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let days = app
        .dashboard
        .as_ref()
        .map(|d| d.recent_attendance.as_slice())
        .unwrap_or_default();

    let header = Row::new(vec!["Date", "Day", "Present", "Late", "Absent", "Leave"])
        .style(styles::title_style())
        .height(1);

    let rows: Vec<Row> = days
        .iter()
        .map(|day| {
            Row::new(vec![
                Cell::from(day.date.clone()),
                Cell::from(day.day.clone()),
                Cell::from(format!("{:>4}", day.total_present)),
                Cell::from(format!("{:>4}", day.total_late)),
                Cell::from(format!("{:>4}", day.total_absent)),
                Cell::from(format!("{:>4}", day.total_leave)),
            ])
            .style(styles::list_item_style(theme))
        })
        .collect();

    let widths = [
        Constraint::Length(11),
        Constraint::Fill(1),
        Constraint::Length(8),
        Constraint::Length(5),
        Constraint::Length(7),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(" Recent Attendance - [Enter] open day ")
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style(theme));

    let mut state = TableState::default();
    if !days.is_empty() {
        state.select(Some(app.dashboard_selection));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_employees(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let items: Vec<ListItem> = app
        .employees
        .iter()
        .map(|e| {
            ListItem::new(Line::from(vec![
                Span::styled(e.name.clone(), styles::list_item_style(theme)),
                Span::styled(format!("  {}", e.role()), styles::muted_style()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(" Team ({}) ", app.employees.len()))
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(false)),
    );
    frame.render_widget(list, area);
}
