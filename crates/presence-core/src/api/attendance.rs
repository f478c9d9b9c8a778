use chrono::NaiveDate;

use crate::cache::DEFAULT_TTL;
use crate::models::{ApiAttendanceRecord, AttendanceRecord, DailyAttendance};

use super::client::ATTENDANCE_PATH;
use super::{ApiClient, ApiError};

impl ApiClient {
    pub fn attendance_all_url(&self) -> String {
        self.url(&format!("{}/all", ATTENDANCE_PATH))
    }

    pub fn attendance_date_url(&self, date: NaiveDate) -> String {
        self.url(&format!("{}/date?date={}", ATTENDANCE_PATH, date.format("%Y-%m-%d")))
    }

    pub fn employee_attendance_url(&self, employee_id: &str) -> String {
        self.url(&format!("{}/employee/{}", ATTENDANCE_PATH, employee_id))
    }

    async fn fetch_attendance(
        &self,
        action: &str,
        url: &str,
    ) -> Result<Vec<ApiAttendanceRecord>, ApiError> {
        let result = self.get_cached(url, DEFAULT_TTL).await;
        self.report(action, result)
    }

    pub async fn get_all_attendance_records(&self) -> Result<Vec<AttendanceRecord>, ApiError> {
        let records = self
            .fetch_attendance("Failed to fetch attendance records", &self.attendance_all_url())
            .await?;
        Ok(records.iter().map(ApiAttendanceRecord::to_record).collect())
    }

    pub async fn get_attendance_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let url = self.attendance_date_url(date);
        let records = self
            .fetch_attendance("Failed to fetch attendance for date", &url)
            .await?;
        Ok(records.iter().map(ApiAttendanceRecord::to_record).collect())
    }

    /// Same records as `get_attendance_by_date`, shaped for the daily report.
    pub async fn get_all_attendance_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<DailyAttendance>, ApiError> {
        let url = self.attendance_date_url(date);
        let records = self
            .fetch_attendance("Failed to fetch attendance for date", &url)
            .await?;
        Ok(records.iter().map(ApiAttendanceRecord::to_daily).collect())
    }

    pub async fn get_employee_attendance(
        &self,
        employee_id: &str,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let records = self
            .fetch_attendance(
                "Failed to fetch employee attendance",
                &self.employee_attendance_url(employee_id),
            )
            .await?;
        Ok(records.iter().map(ApiAttendanceRecord::to_record).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::client::fake::{FakeTransport, BASE};
    use super::super::Method;
    use super::*;
    use serde_json::json;

    #[tokio::test(start_paused = true)]
    async fn test_date_query_and_shared_cache_entry() {
        let fake = FakeTransport::new();
        fake.reply_data(
            Method::Get,
            "/api/attendance/date?date=2024-03-01",
            json!([{"id": "a1", "employee_id": "E-1", "clock_in": "09:05", "hours_worked": 8}]),
        );
        let client = ApiClient::with_transport(BASE, fake.clone());
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let records = client.get_attendance_by_date(date).await.unwrap();
        assert_eq!(records[0].status, "VALID");
        assert_eq!(records[0].clock_in.as_deref(), Some("09:05"));

        let daily = client.get_all_attendance_for_date(date).await.unwrap();
        assert_eq!(daily[0].check_in, "09:05");
        assert_eq!(daily[0].hours_worked, 8.0);

        assert_eq!(fake.calls(Method::Get, "/api/attendance/date?date=2024-03-01"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_refetched_after_ttl() {
        let fake = FakeTransport::new();
        fake.reply_data(Method::Get, "/api/attendance/all", json!([]));
        let client = ApiClient::with_transport(BASE, fake.clone());

        client.get_all_attendance_records().await.unwrap();
        tokio::time::sleep(DEFAULT_TTL + std::time::Duration::from_secs(1)).await;
        client.get_all_attendance_records().await.unwrap();

        assert_eq!(fake.calls(Method::Get, "/api/attendance/all"), 2);
    }
}
