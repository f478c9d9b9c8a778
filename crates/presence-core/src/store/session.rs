use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::ConfigData;

use super::Storage;

// Storage keys
const AUTH_STATE_KEY: &str = "authState";
const THEME_KEY: &str = "theme";
const OFFICE_LOCATION_KEY: &str = "officeLocation";
const MAPS_API_KEY_KEY: &str = "googleMapsApiKey";

/// The single administrator account accepted by the console.
const ADMIN_USERNAME: &str = "unicrore_admin";
const ADMIN_PASSWORD: &str = "admin";

/// Name shown in the header once logged in.
pub const DISPLAY_USERNAME: &str = "Unicrore";

/// Remote config stores the radius in kilometers; the geofence uses meters.
const METERS_PER_KM: f64 = 1000.0;

/// Radius used when the remote config has none.
pub const DEFAULT_RADIUS_METERS: f64 = 100.0;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Office location with an allowed radius in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OfficeGeofence {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
}

impl OfficeGeofence {
    /// Great-circle distance in meters from the office to a point.
    pub fn distance_to(&self, latitude: f64, longitude: f64) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), latitude.to_radians());
        let dlat = lat2 - lat1;
        let dlon = (longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METERS * a.sqrt().atan2((1.0 - a).sqrt())
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.distance_to(latitude, longitude) <= self.radius
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthState {
    is_logged_in: bool,
    #[serde(default)]
    username: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub is_logged_in: bool,
    pub username: String,
    pub theme: Theme,
    pub office_geofence: Option<OfficeGeofence>,
    pub maps_api_key: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            is_logged_in: false,
            username: DISPLAY_USERNAME.to_string(),
            theme: Theme::default(),
            office_geofence: None,
            maps_api_key: String::new(),
        }
    }
}

/// Owns the session state and mirrors every change into storage.
///
/// Storage failures are logged and otherwise ignored: the in-memory state
/// is always updated.
pub struct SessionStore<S: Storage> {
    storage: S,
    state: SessionState,
}

impl<S: Storage> SessionStore<S> {
    /// Build the store from whatever `storage` holds.
    pub fn rehydrate(mut storage: S) -> Self {
        let mut state = SessionState::default();

        if let Some(raw) = read(&storage, AUTH_STATE_KEY) {
            match serde_json::from_str::<AuthState>(&raw) {
                Ok(auth) => {
                    state.is_logged_in = auth.is_logged_in;
                    if let Some(name) = auth.username.filter(|n| !n.is_empty()) {
                        state.username = name;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Error parsing stored auth state, clearing it");
                    if let Err(e) = storage.remove(AUTH_STATE_KEY) {
                        warn!(error = %e, "Failed to clear stored auth state");
                    }
                }
            }
        }

        if let Some(theme) = read(&storage, THEME_KEY).and_then(|t| Theme::parse(&t)) {
            state.theme = theme;
        }

        if let Some(raw) = read(&storage, OFFICE_LOCATION_KEY) {
            match serde_json::from_str::<OfficeGeofence>(&raw) {
                Ok(geofence) => state.office_geofence = Some(geofence),
                Err(e) => warn!(error = %e, "Error parsing stored office location"),
            }
        }

        if let Some(key) = read(&storage, MAPS_API_KEY_KEY) {
            state.maps_api_key = key;
        }

        Self { storage, state }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.is_logged_in
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        if username != ADMIN_USERNAME || password != ADMIN_PASSWORD {
            warn!(username, "Rejected login");
            return Err(AuthError::InvalidCredentials);
        }

        self.state.is_logged_in = true;
        self.state.username = DISPLAY_USERNAME.to_string();
        let auth = AuthState {
            is_logged_in: true,
            username: Some(self.state.username.clone()),
        };
        self.persist_json(AUTH_STATE_KEY, &auth);
        info!("Logged in");
        Ok(())
    }

    pub fn logout(&mut self) {
        self.state.is_logged_in = false;
        if let Err(e) = self.storage.remove(AUTH_STATE_KEY) {
            warn!(error = %e, "Failed to clear stored auth state");
        }
        info!("Logged out");
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.state.theme = self.state.theme.toggled();
        self.persist(THEME_KEY, self.state.theme.as_str());
        self.state.theme
    }

    pub fn update_office_geofence(&mut self, geofence: OfficeGeofence) {
        self.state.office_geofence = Some(geofence);
        self.persist_json(OFFICE_LOCATION_KEY, &geofence);
    }

    pub fn set_maps_api_key(&mut self, key: &str) {
        self.state.maps_api_key = key.to_string();
        self.persist(MAPS_API_KEY_KEY, key);
    }

    /// Copy the maps key and office geofence out of the remote config.
    pub fn apply_remote_config(&mut self, config: &ConfigData) {
        if !config.google_maps_api_key.is_empty() {
            self.set_maps_api_key(&config.google_maps_api_key);
        }

        if let Some(office) = config.office_location {
            let radius = config
                .allowed_radius_km
                .filter(|km| *km > 0.0)
                .map(|km| km * METERS_PER_KM)
                .unwrap_or(DEFAULT_RADIUS_METERS);
            self.update_office_geofence(OfficeGeofence {
                latitude: office.latitude,
                longitude: office.longitude,
                radius,
            });
        }
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            warn!(key, error = %e, "Failed to persist session value");
        }
    }

    fn persist_json<T: Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.persist(key, &json),
            Err(e) => warn!(key, error = %e, "Failed to encode session value"),
        }
    }
}

fn read<S: Storage>(storage: &S, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OfficeCoordinates;
    use crate::store::{FileStorage, MemoryStorage};
    use tempfile::TempDir;

    fn store() -> SessionStore<MemoryStorage> {
        SessionStore::rehydrate(MemoryStorage::default())
    }

    #[test]
    fn test_login_with_admin_pair() {
        let mut store = store();
        store.login("unicrore_admin", "admin").unwrap();
        assert!(store.is_logged_in());
        assert_eq!(store.state().username, "Unicrore");

        let reloaded = SessionStore::rehydrate(store.storage.clone());
        assert!(reloaded.is_logged_in());
    }

    #[test]
    fn test_wrong_credentials_change_nothing() {
        let mut store = store();
        let before = store.state().clone();

        assert_eq!(store.login("unicrore_admin", "nope"), Err(AuthError::InvalidCredentials));
        assert_eq!(store.login("admin", "admin"), Err(AuthError::InvalidCredentials));
        assert_eq!(store.state(), &before);
        assert_eq!(store.storage.get(AUTH_STATE_KEY).unwrap(), None);
    }

    #[test]
    fn test_logout_removes_auth_state() {
        let mut store = store();
        store.login("unicrore_admin", "admin").unwrap();
        store.logout();

        assert!(!store.is_logged_in());
        assert_eq!(store.storage.get(AUTH_STATE_KEY).unwrap(), None);
    }

    #[test]
    fn test_theme_toggle_persists() {
        let mut store = store();
        assert_eq!(store.toggle_theme(), Theme::Dark);
        assert_eq!(store.storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(SessionStore::rehydrate(store.storage.clone()).state().theme, Theme::Dark);
    }

    #[test]
    fn test_geofence_round_trip_through_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        let geofence = OfficeGeofence {
            latitude: 12.9,
            longitude: 77.6,
            radius: 500.0,
        };

        let mut store = SessionStore::rehydrate(FileStorage::open(&path).unwrap());
        store.update_office_geofence(geofence);

        let reloaded = SessionStore::rehydrate(FileStorage::open(&path).unwrap());
        assert_eq!(reloaded.state().office_geofence, Some(geofence));
    }

    #[test]
    fn test_remote_config_radius_conversion() {
        let mut store = store();
        let mut config = ConfigData {
            google_maps_api_key: "X".into(),
            office_location: Some(OfficeCoordinates { latitude: 1.0, longitude: 2.0 }),
            allowed_radius_km: Some(0.1),
            ..Default::default()
        };
        store.apply_remote_config(&config);
        let geofence = store.state().office_geofence.unwrap();
        assert!((geofence.radius - 100.0).abs() < 1e-9);
        assert_eq!(store.state().maps_api_key, "X");

        config.allowed_radius_km = Some(2.5);
        store.apply_remote_config(&config);
        assert!((store.state().office_geofence.unwrap().radius - 2500.0).abs() < 1e-9);

        config.allowed_radius_km = None;
        store.apply_remote_config(&config);
        assert_eq!(store.state().office_geofence.unwrap().radius, DEFAULT_RADIUS_METERS);
    }

    #[test]
    fn test_remote_config_without_location_keeps_geofence() {
        let mut store = store();
        store.set_maps_api_key("old");
        store.apply_remote_config(&ConfigData::default());
        assert_eq!(store.state().office_geofence, None);
        assert_eq!(store.state().maps_api_key, "old");
    }

    #[test]
    fn test_malformed_auth_state_is_cleared() {
        let mut storage = MemoryStorage::default();
        storage.set(AUTH_STATE_KEY, "{oops").unwrap();
        storage.set(THEME_KEY, "purple").unwrap();
        storage.set(OFFICE_LOCATION_KEY, "[]").unwrap();

        let store = SessionStore::rehydrate(storage);
        assert!(!store.is_logged_in());
        assert_eq!(store.state().theme, Theme::Light);
        assert_eq!(store.state().office_geofence, None);
        assert_eq!(store.storage.get(AUTH_STATE_KEY).unwrap(), None);
    }

    #[test]
    fn test_geofence_contains() {
        let office = OfficeGeofence {
            latitude: 12.9716,
            longitude: 77.5946,
            radius: 100.0,
        };
        assert!(office.contains(12.9716, 77.5946));
        // ~50 m north
        assert!(office.contains(12.97205, 77.5946));
        // ~1.1 km north
        assert!(!office.contains(12.9816, 77.5946));
    }
}
