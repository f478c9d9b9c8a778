use serde::{Deserialize, Serialize};

/// Office coordinates as the server stores them (no radius).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OfficeCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSettings {
    #[serde(default)]
    pub late_buffer_minutes: u32,
    #[serde(default)]
    pub allow_manual_time: bool,
    #[serde(default)]
    pub max_time_adjustment: u32,
    #[serde(default)]
    pub require_approval: bool,
}

impl Default for AttendanceSettings {
    fn default() -> Self {
        Self {
            late_buffer_minutes: 15,
            allow_manual_time: false,
            max_time_adjustment: 0,
            require_approval: false,
        }
    }
}

/// Organisation-wide configuration served by `/api/config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigData {
    #[serde(rename = "googleMapsApiKey", default)]
    pub google_maps_api_key: String,
    #[serde(default)]
    pub office_location: Option<OfficeCoordinates>,
    /// Geofence radius in kilometers.
    #[serde(default)]
    pub allowed_radius_km: Option<f64>,
    #[serde(default)]
    pub attendance_settings: AttendanceSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce_geofence: Option<bool>,
}

/// Fields to change in the remote config; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigPatch {
    pub google_maps_api_key: Option<String>,
    pub office_location: Option<OfficeCoordinates>,
    pub allowed_radius_km: Option<f64>,
    pub attendance_settings: Option<AttendanceSettings>,
    pub enforce_geofence: Option<bool>,
}

impl ConfigPatch {
    pub fn apply_to(&self, config: &mut ConfigData) {
        if let Some(ref key) = self.google_maps_api_key {
            config.google_maps_api_key = key.clone();
        }
        if let Some(location) = self.office_location {
            config.office_location = Some(location);
        }
        if let Some(radius) = self.allowed_radius_km {
            config.allowed_radius_km = Some(radius);
        }
        if let Some(ref settings) = self.attendance_settings {
            config.attendance_settings = settings.clone();
        }
        if let Some(enforce) = self.enforce_geofence {
            config.enforce_geofence = Some(enforce);
        }
    }
}
