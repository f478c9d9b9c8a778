use chrono::Utc;
use tracing::info;

use crate::models::{ConfigData, ConfigPatch};

use super::client::{CONFIG_PATH, CONFIG_TTL};
use super::{ApiClient, ApiError, Method};

/// Recorded as `last_modified_by` on every config write.
const CONFIG_EDITOR: &str = "user";

impl ApiClient {
    pub fn config_url(&self) -> String {
        self.url(CONFIG_PATH)
    }

    pub async fn get_config_data(&self) -> Result<ConfigData, ApiError> {
        let result = self.get_cached(&self.config_url(), CONFIG_TTL).await;
        self.report("Failed to fetch config data", result)
    }

    /// Merge `patch` into the current config and write the whole document back.
    pub async fn update_config_data(&self, patch: &ConfigPatch) -> Result<ConfigData, ApiError> {
        let url = self.config_url();
        let result = async {
            let mut config: ConfigData = self.get_cached(&url, CONFIG_TTL).await?;
            patch.apply_to(&mut config);
            config.last_modified = Some(Utc::now().to_rfc3339());
            config.last_modified_by = Some(CONFIG_EDITOR.to_string());

            let echoed = self
                .send_json_optional::<ConfigData, _>(Method::Put, &url, &config)
                .await?;
            Ok::<_, ApiError>(echoed.unwrap_or(config))
        }
        .await;
        let updated = self.report("Failed to update config data", result)?;

        self.cache().invalidate(&url);
        info!("Remote config updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::super::client::fake::{FakeTransport, BASE};
    use super::*;
    use crate::models::OfficeCoordinates;
    use crate::notify::Notifier;
    use crate::store::{MemoryStorage, SessionStore};
    use serde_json::json;

    #[tokio::test(start_paused = true)]
    async fn test_update_merges_and_invalidates() {
        let fake = FakeTransport::new();
        fake.reply_data(
            Method::Get,
            "/api/config",
            json!({"googleMapsApiKey": "K", "allowed_radius_km": 0.5, "id": "cfg-1"}),
        );
        fake.reply(Method::Put, "/api/config", 200, json!({"success": true}));
        let client = ApiClient::with_transport(BASE, fake.clone());

        let patch = ConfigPatch {
            office_location: Some(OfficeCoordinates { latitude: 12.9, longitude: 77.6 }),
            allowed_radius_km: Some(0.25),
            ..Default::default()
        };
        let updated = client.update_config_data(&patch).await.unwrap();

        assert_eq!(updated.google_maps_api_key, "K");
        assert_eq!(updated.allowed_radius_km, Some(0.25));
        assert_eq!(updated.last_modified_by.as_deref(), Some("user"));

        let sent = fake.last_body(Method::Put, "/api/config").unwrap();
        assert_eq!(sent["googleMapsApiKey"], "K");
        assert_eq!(sent["id"], "cfg-1");
        assert_eq!(sent["office_location"]["latitude"], 12.9);
        assert!(sent["last_modified"].is_string());

        assert!(!client.cache().contains(&client.config_url()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_read_reports_update_once() {
        let fake = FakeTransport::new();
        fake.reply(Method::Get, "/api/config", 503, json!("down"));
        let (notifier, mut notices) = Notifier::channel();
        let client = ApiClient::with_transport(BASE, fake.clone()).with_notifier(notifier);

        assert!(client.update_config_data(&ConfigPatch::default()).await.is_err());
        assert!(notices
            .try_recv()
            .unwrap()
            .message
            .starts_with("Failed to update config data: "));
        assert!(notices.try_recv().is_err());
        assert_eq!(fake.calls(Method::Put, "/api/config"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remote_config_applied_to_store() {
        let fake = FakeTransport::new();
        fake.reply_data(
            Method::Get,
            "/api/config",
            json!({"googleMapsApiKey": "X", "office_location": {"latitude": 1, "longitude": 2}, "allowed_radius_km": 0.1}),
        );
        let client = ApiClient::with_transport(BASE, fake.clone());
        let mut store = SessionStore::rehydrate(MemoryStorage::default());

        let config = client.get_config_data().await.unwrap();
        store.apply_remote_config(&config);

        let geofence = store.state().office_geofence.unwrap();
        assert_eq!(geofence.latitude, 1.0);
        assert_eq!(geofence.longitude, 2.0);
        assert!((geofence.radius - 100.0).abs() < 1e-9);
        assert_eq!(store.state().maps_api_key, "X");
    }
}
