use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use presence_core::models::{AttendanceRecord, AttendanceStatus};
use presence_core::store::{OfficeGeofence, Theme};

use crate::app::App;
use crate::ui::styles;
use crate::utils::{format_date, format_hours, format_time};

/// Where a clock-in happened relative to the office geofence.
fn location_label(record: &AttendanceRecord, office: Option<OfficeGeofence>) -> String {
    let loc = &record.location;
    if loc.latitude == 0.0 && loc.longitude == 0.0 {
        return "-".to_string();
    }
    match office {
        Some(office) if office.contains(loc.latitude, loc.longitude) => "At office".to_string(),
        Some(office) => format!(
            "Outside ({:.0} m)",
            office.distance_to(loc.latitude, loc.longitude)
        ),
        None => format!("{:.4}, {:.4}", loc.latitude, loc.longitude),
    }
}

/// Header, rows, and widths for a table of attendance records.
///
/// With `by_date` the leading column is the date (one employee's history),
/// otherwise it is the employee (one day's report).
pub fn record_rows(
    records: &[AttendanceRecord],
    office: Option<OfficeGeofence>,
    theme: Theme,
    by_date: bool,
) -> (Row<'static>, Vec<Row<'static>>, Vec<Constraint>) {
    let header = if by_date {
        Row::new(vec!["Date", "Status", "Location", "Clock In", "Clock Out", "Hours"])
    } else {
        Row::new(vec!["Employee ID", "Name", "Status", "Location", "Clock In", "Clock Out"])
    }
    .style(styles::title_style())
    .height(1);

    let rows = records
        .iter()
        .map(|r| {
            let status = Cell::from(Span::styled(
                r.status.clone(),
                styles::status_style(r.status_kind()),
            ));
            let location = Cell::from(location_label(r, office));
            let clock_in = Cell::from(format_time(r.clock_in.as_deref()));
            let clock_out = Cell::from(format_time(r.clock_out.as_deref()));

            let cells = if by_date {
                vec![
                    Cell::from(format_date(&r.date)),
                    status,
                    location,
                    clock_in,
                    clock_out,
                    Cell::from(format_hours(r.hours)),
                ]
            } else {
                vec![
                    Cell::from(r.employee_id.clone()),
                    Cell::from(r.employee_name.clone()),
                    status,
                    location,
                    clock_in,
                    clock_out,
                ]
            };
            Row::new(cells).style(styles::list_item_style(theme))
        })
        .collect();

    let widths = if by_date {
        vec![
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Fill(1),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(8),
        ]
    } else {
        vec![
            Constraint::Length(12),
            Constraint::Fill(1),
            Constraint::Length(10),
            Constraint::Fill(1),
            Constraint::Length(10),
            Constraint::Length(10),
        ]
    };

    (header, rows, widths)
}

/// Render the Attendance page - one row per day, newest first
pub fn render_days(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let header = Row::new(vec!["Date", "Day", "Employees", "Present", "Late", "Absent", "Leave"])
        .style(styles::title_style())
        .height(1);

    let rows: Vec<Row> = app
        .attendance_days
        .iter()
        .map(|day| {
            Row::new(vec![
                Cell::from(format_date(&day.date)),
                Cell::from(day.day.clone()),
                Cell::from(format!("{:>5}", day.total_employees)),
                Cell::from(Span::styled(
                    format!("{:>5}", day.total_present),
                    styles::status_style(AttendanceStatus::Present),
                )),
                Cell::from(Span::styled(
                    format!("{:>4}", day.total_late),
                    styles::status_style(AttendanceStatus::Late),
                )),
                Cell::from(Span::styled(
                    format!("{:>5}", day.total_absent),
                    styles::status_style(AttendanceStatus::Absent),
                )),
                Cell::from(format!("{:>5}", day.total_leave)),
            ])
            .style(styles::list_item_style(theme))
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    " Attendance by Day ({}) - [Enter] open ",
                    app.attendance_days.len()
                ))
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style(theme));

    let mut state = TableState::default();
    if !app.attendance_days.is_empty() {
        state.select(Some(app.attendance_selection));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

/// Render the report for a single day
pub fn render_day(frame: &mut Frame, app: &App, date: NaiveDate, area: Rect) {
    let theme = app.theme();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let count = |status: AttendanceStatus| {
        app.day_records
            .iter()
            .filter(|r| r.status_kind() == status)
            .count()
    };

    let summary = Line::from(vec![
        Span::styled(format!(" {} ", date.format("%A, %B %d, %Y")), styles::title_style()),
        Span::styled("  Present ", styles::muted_style()),
        Span::styled(count(AttendanceStatus::Present).to_string(), styles::success_style()),
        Span::styled("  Late ", styles::muted_style()),
        Span::styled(count(AttendanceStatus::Late).to_string(), styles::highlight_style()),
        Span::styled("  Absent ", styles::muted_style()),
        Span::styled(count(AttendanceStatus::Absent).to_string(), styles::error_style()),
        Span::styled("  Leave ", styles::muted_style()),
        Span::raw(count(AttendanceStatus::Leave).to_string()),
    ]);
    frame.render_widget(
        Paragraph::new(summary).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styles::border_style(false)),
        ),
        chunks[0],
    );

    let office = app.store.state().office_geofence;
    let (header, rows, widths) = record_rows(&app.day_records, office, theme, false);
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" Records ({}) ", app.day_records.len()))
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style(theme));

    let mut state = TableState::default();
    if !app.day_records.is_empty() {
        state.select(Some(app.day_selection));
    }
    frame.render_stateful_widget(table, chunks[1], &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use presence_core::models::{ApiAttendanceRecord, LocationData};

    fn record_at(latitude: f64, longitude: f64) -> AttendanceRecord {
        let mut record = ApiAttendanceRecord::default().to_record();
        record.location = LocationData {
            latitude,
            longitude,
            ..Default::default()
        };
        record
    }

    #[test]
    fn test_location_label() {
        let office = OfficeGeofence {
            latitude: 12.9716,
            longitude: 77.5946,
            radius: 200.0,
        };

        assert_eq!(location_label(&record_at(0.0, 0.0), Some(office)), "-");
        assert_eq!(location_label(&record_at(12.9717, 77.5947), Some(office)), "At office");
        assert!(location_label(&record_at(12.99, 77.5946), Some(office)).starts_with("Outside ("));
        assert_eq!(location_label(&record_at(12.5, 77.25), None), "12.5000, 77.2500");
    }
}
