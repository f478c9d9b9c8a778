use serde::{Deserialize, Serialize};

use super::attendance::AttendanceDate;

/// Headline numbers for the dashboard page, served by `/api/dashboard`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    #[serde(default)]
    pub total_employees: u32,
    #[serde(default)]
    pub present_today: u32,
    #[serde(default)]
    pub absent_today: u32,
    #[serde(default)]
    pub late_today: u32,
    #[serde(default)]
    pub on_leave_today: u32,
    #[serde(default)]
    pub recent_attendance: Vec<AttendanceDate>,
}

impl DashboardData {
    /// Share of employees present today, 0-100.
    pub fn attendance_rate(&self) -> f64 {
        if self.total_employees == 0 {
            return 0.0;
        }
        f64::from(self.present_today + self.late_today) * 100.0 / f64::from(self.total_employees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_rate() {
        let data = DashboardData {
            total_employees: 8,
            present_today: 5,
            late_today: 1,
            ..Default::default()
        };
        assert_eq!(data.attendance_rate(), 75.0);
        assert_eq!(DashboardData::default().attendance_rate(), 0.0);
    }

    #[test]
    fn test_parse_recent_attendance() {
        let json = r#"{"total_employees": 3, "recent_attendance": [{"date": "2024-03-01", "day": "Friday", "totalPresent": 2}]}"#;
        let data: DashboardData = serde_json::from_str(json).unwrap();
        assert_eq!(data.recent_attendance[0].total_present, 2);
        assert_eq!(data.recent_attendance[0].total_absent, 0);
    }
}
