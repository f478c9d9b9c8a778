use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::employee::UNKNOWN_EMPLOYEE;
use super::wire::{loose_f64, loose_string};

/// Status assumed when the server omits one.
pub const DEFAULT_STATUS: &str = "VALID";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    #[serde(default)]
    pub distance_km: f64,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Default for LocationData {
    fn default() -> Self {
        Self {
            distance_km: 0.0,
            latitude: 0.0,
            longitude: 0.0,
            kind: "clock_in".to_string(),
        }
    }
}

// API response shape for /api/attendance endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiAttendanceRecord {
    #[serde(default, deserialize_with = "loose_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub employee_id: Option<String>,
    pub employee_name: Option<String>,
    pub status: Option<String>,
    pub clock_in: Option<String>,
    pub clock_out: Option<String>,
    #[serde(default, deserialize_with = "loose_f64")]
    pub hours_worked: Option<f64>,
    pub location: Option<LocationData>,
    pub clock_out_location: Option<LocationData>,
    pub created_date: Option<String>,
    pub last_modified_date: Option<String>,
    pub date: Option<String>,
}

/// Attendance record view model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub date: String,
    pub employee_id: String,
    pub employee_name: String,
    pub status: String,
    pub clock_in: Option<String>,
    pub clock_out: Option<String>,
    pub hours: f64,
    pub location: LocationData,
    pub clock_out_location: Option<LocationData>,
    pub created_date: Option<String>,
    pub last_modified_date: Option<String>,
}

/// One employee's attendance on a given day, as shown in daily reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAttendance {
    pub employee_id: String,
    pub employee_name: String,
    pub status: String,
    pub check_in: String,
    pub check_out: String,
    pub hours_worked: f64,
    pub notes: String,
}

/// Per-day attendance totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDate {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub total_present: u32,
    #[serde(default)]
    pub total_absent: u32,
    #[serde(default)]
    pub total_late: u32,
    #[serde(default)]
    pub total_leave: u32,
    #[serde(default)]
    pub total_employees: u32,
}

/// Empty strings on the wire count as absent.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn generated_id() -> String {
    format!(
        "attendance-{}-{}",
        Utc::now().timestamp_millis(),
        rand::random::<u32>()
    )
}

impl ApiAttendanceRecord {
    pub fn to_record(&self) -> AttendanceRecord {
        AttendanceRecord {
            id: present(&self.id).map(str::to_string).unwrap_or_else(generated_id),
            date: present(&self.date).unwrap_or_default().to_string(),
            employee_id: present(&self.employee_id).unwrap_or_default().to_string(),
            employee_name: present(&self.employee_name)
                .unwrap_or(UNKNOWN_EMPLOYEE)
                .to_string(),
            status: present(&self.status).unwrap_or(DEFAULT_STATUS).to_string(),
            clock_in: present(&self.clock_in).map(str::to_string),
            clock_out: present(&self.clock_out).map(str::to_string),
            hours: self.hours_worked.unwrap_or(0.0),
            location: self.location.clone().unwrap_or_default(),
            clock_out_location: self.clock_out_location.clone(),
            created_date: self.created_date.clone(),
            last_modified_date: self.last_modified_date.clone(),
        }
    }

    pub fn to_daily(&self) -> DailyAttendance {
        DailyAttendance {
            employee_id: present(&self.employee_id).unwrap_or_default().to_string(),
            employee_name: present(&self.employee_name)
                .unwrap_or(UNKNOWN_EMPLOYEE)
                .to_string(),
            status: present(&self.status).unwrap_or_default().to_string(),
            check_in: present(&self.clock_in).unwrap_or_default().to_string(),
            check_out: present(&self.clock_out).unwrap_or_default().to_string(),
            hours_worked: self.hours_worked.unwrap_or(0.0),
            notes: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
    Leave,
    Other,
}

impl AttendanceStatus {
    pub fn parse(status: &str) -> Self {
        match status.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "present" | "valid" | "on_time" => AttendanceStatus::Present,
            "late" => AttendanceStatus::Late,
            "absent" | "invalid" => AttendanceStatus::Absent,
            "leave" | "on_leave" => AttendanceStatus::Leave,
            _ => AttendanceStatus::Other,
        }
    }
}

impl AttendanceRecord {
    pub fn status_kind(&self) -> AttendanceStatus {
        AttendanceStatus::parse(&self.status)
    }
}

/// Group records by day, newest first.
pub fn summarize_by_date(records: &[AttendanceRecord]) -> Vec<AttendanceDate> {
    let mut days: BTreeMap<&str, (AttendanceDate, BTreeSet<&str>)> = BTreeMap::new();

    for record in records.iter().filter(|r| !r.date.is_empty()) {
        let date = day_of(&record.date);
        let (summary, employees) = days.entry(date).or_insert_with(|| {
            let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map(|d| d.format("%A").to_string())
                .unwrap_or_default();
            (
                AttendanceDate {
                    date: date.to_string(),
                    day,
                    ..Default::default()
                },
                BTreeSet::new(),
            )
        });

        match record.status_kind() {
            AttendanceStatus::Present => summary.total_present += 1,
            AttendanceStatus::Late => summary.total_late += 1,
            AttendanceStatus::Absent => summary.total_absent += 1,
            AttendanceStatus::Leave => summary.total_leave += 1,
            AttendanceStatus::Other => {}
        }
        if !record.employee_id.is_empty() {
            employees.insert(record.employee_id.as_str());
        }
    }

    days.into_values()
        .rev()
        .map(|(mut summary, employees)| {
            summary.total_employees = employees.len() as u32;
            summary
        })
        .collect()
}

/// Date part of either `YYYY-MM-DD` or a full timestamp.
fn day_of(date: &str) -> &str {
    date.get(..10).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> AttendanceRecord {
        serde_json::from_str::<ApiAttendanceRecord>(json).unwrap().to_record()
    }

    #[test]
    fn test_to_record_renames_and_defaults() {
        let r = record(r#"{"id": "a1", "employee_id": "E-1", "date": "2024-03-01", "clock_in": "", "hours_worked": 7.5}"#);
        assert_eq!(r.employee_id, "E-1");
        assert_eq!(r.employee_name, UNKNOWN_EMPLOYEE);
        assert_eq!(r.status, DEFAULT_STATUS);
        assert_eq!(r.clock_in, None);
        assert_eq!(r.hours, 7.5);
        assert_eq!(r.location, LocationData::default());
        assert_eq!(r.location.kind, "clock_in");
    }

    #[test]
    fn test_loose_scalars_are_coerced() {
        let r = record(r#"{"id": 17, "employee_id": 1001, "hours_worked": "8.25"}"#);
        assert_eq!(r.id, "17");
        assert_eq!(r.employee_id, "1001");
        assert_eq!(r.hours, 8.25);

        let r = record(r#"{"id": "a2", "hours_worked": "unknown"}"#);
        assert_eq!(r.hours, 0.0);
    }

    #[test]
    fn test_missing_id_is_generated() {
        let r = record(r#"{"employee_id": "E-1"}"#);
        assert!(r.id.starts_with("attendance-"));
        assert_eq!(r.hours, 0.0);
    }

    #[test]
    fn test_to_daily_defaults() {
        let wire: ApiAttendanceRecord =
            serde_json::from_str(r#"{"employee_id": "E-2", "clock_out": "18:00"}"#).unwrap();
        let daily = wire.to_daily();
        assert_eq!(daily.status, "");
        assert_eq!(daily.check_in, "");
        assert_eq!(daily.check_out, "18:00");
        assert_eq!(daily.employee_name, UNKNOWN_EMPLOYEE);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(AttendanceStatus::parse("VALID"), AttendanceStatus::Present);
        assert_eq!(AttendanceStatus::parse("On Leave"), AttendanceStatus::Leave);
        assert_eq!(AttendanceStatus::parse("late"), AttendanceStatus::Late);
        assert_eq!(AttendanceStatus::parse("??"), AttendanceStatus::Other);
    }

    #[test]
    fn test_summarize_by_date() {
        let records = vec![
            record(r#"{"id": "1", "employee_id": "E-1", "date": "2024-03-01", "status": "PRESENT"}"#),
            record(r#"{"id": "2", "employee_id": "E-2", "date": "2024-03-01", "status": "LATE"}"#),
            record(r#"{"id": "3", "employee_id": "E-1", "date": "2024-03-02T09:00:00Z", "status": "ABSENT"}"#),
            record(r#"{"id": "4", "employee_id": "E-3"}"#),
        ];

        let days = summarize_by_date(&records);
        assert_eq!(days.len(), 2);

        assert_eq!(days[0].date, "2024-03-02");
        assert_eq!(days[0].day, "Saturday");
        assert_eq!(days[0].total_absent, 1);

        assert_eq!(days[1].date, "2024-03-01");
        assert_eq!(days[1].total_present, 1);
        assert_eq!(days[1].total_late, 1);
        assert_eq!(days[1].total_employees, 2);
    }
}
