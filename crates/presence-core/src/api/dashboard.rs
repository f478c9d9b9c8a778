use crate::cache::DEFAULT_TTL;
use crate::models::DashboardData;

use super::client::DASHBOARD_PATH;
use super::{ApiClient, ApiError};

impl ApiClient {
    pub fn dashboard_url(&self) -> String {
        self.url(DASHBOARD_PATH)
    }

    pub async fn get_dashboard_data(&self) -> Result<DashboardData, ApiError> {
        let result = self.get_cached(&self.dashboard_url(), DEFAULT_TTL).await;
        self.report("Failed to fetch dashboard data", result)
    }
}
