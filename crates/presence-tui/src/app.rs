//! Application state management for the Presence console.
//!
//! This module contains the `App` struct that owns the session store, the
//! API client, the current route, and the data each page shows. Page loads
//! and writes run as tokio tasks and report back over an mpsc channel that
//! the main loop drains every tick.

use std::collections::VecDeque;
use std::future::Future;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use presence_core::api::ApiError;
use presence_core::forms::{EmployeeForm, Field, FormErrors, GeofenceForm};
use presence_core::models::{
    summarize_by_date, AttendanceDate, AttendanceRecord, ConfigData, ConfigPatch, DashboardData,
    Employee, EmployeeUpdate, OfficeCoordinates,
};
use presence_core::notify::{Notice, Notifier};
use presence_core::store::{FileStorage, MemoryStorage, SessionStore, Storage, Theme};
use presence_core::{ApiClient, Config};

use crate::router::Route;

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the page load message channel.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Maximum length for username input.
const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum length for password input.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for any other form field.
const MAX_FIELD_LENGTH: usize = 120;

/// Number of rows to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

/// How long a notification stays in the status bar.
const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Notifications shown at once; older ones are dropped first.
const MAX_TOASTS: usize = 3;

/// The remote config stores the geofence radius in kilometers.
const METERS_PER_KM: f64 = 1000.0;

pub type Store = SessionStore<Box<dyn Storage>>;

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    EnteringRoute,
    ShowingHelp,
    EditingEmployee,
    ConfirmingDelete,
    EditingSettings,
    ConfirmingQuit,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Username,
    Password,
    Button,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsTab {
    Location,
    Appearance,
}

impl SettingsTab {
    pub fn title(&self) -> &'static str {
        match self {
            SettingsTab::Location => "Location",
            SettingsTab::Appearance => "Appearance",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SettingsTab::Location => SettingsTab::Appearance,
            SettingsTab::Appearance => SettingsTab::Location,
        }
    }
}

/// Add/edit employee dialog.
#[derive(Debug, Clone)]
pub struct EmployeeFormState {
    pub form: EmployeeForm,
    /// Id of the employee being edited; `None` when adding.
    pub editing: Option<String>,
    pub focus: usize,
    pub errors: FormErrors,
    pub submitting: bool,
}

impl EmployeeFormState {
    pub fn focused_field(&self) -> Field {
        EmployeeForm::FIELDS[self.focus]
    }

    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Employee"
        } else {
            "Add New Employee"
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    shown_at: Instant,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent back from spawned API tasks.
///
/// Failures have already been shown to the user by the API layer, so they
/// only need to be logged here.
enum LoadResult {
    Dashboard(Result<DashboardData, ApiError>, Result<Vec<Employee>, ApiError>),
    Employees(Result<Vec<Employee>, ApiError>),
    EmployeeDetail(Result<Employee, ApiError>, Result<Vec<AttendanceRecord>, ApiError>),
    AttendanceRecords(Result<Vec<AttendanceRecord>, ApiError>),
    DayRecords(Result<Vec<AttendanceRecord>, ApiError>),
    RemoteConfig {
        for_settings: bool,
        result: Result<ConfigData, ApiError>,
    },
    EmployeeSaved {
        created: bool,
        result: Result<Employee, ApiError>,
    },
    EmployeeDeleted {
        id: String,
        result: Result<(), ApiError>,
    },
    ConfigSaved(Result<ConfigData, ApiError>),
}

/// A result tagged with the page visit that asked for it.
struct Loaded {
    visit: u64,
    result: LoadResult,
}

fn log_failure<T>(what: &str, result: &Result<T, ApiError>) {
    if let Err(e) = result {
        debug!(error = %e, "{} load failed", what);
    }
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub config: Config,
    pub api: ApiClient,
    pub store: Store,
    notifier: Notifier,
    notices: mpsc::UnboundedReceiver<Notice>,
    load_tx: mpsc::Sender<Loaded>,
    load_rx: mpsc::Receiver<Loaded>,
    pending: usize,
    /// Bumped on every navigation; results for older visits are dropped.
    visit: u64,

    // UI State
    pub state: AppState,
    pub route: Route,
    history: Vec<Route>,
    pub toasts: VecDeque<Toast>,
    pub status_message: Option<String>,
    pub route_input: String,

    // Login form state
    pub login_username: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,

    // Dashboard
    pub dashboard: Option<DashboardData>,
    pub dashboard_selection: usize,

    // Employees
    pub employees: Vec<Employee>,
    pub search_query: String,
    pub employee_selection: usize,
    pub employee_form: Option<EmployeeFormState>,
    /// (id, name) of the employee awaiting delete confirmation
    pub pending_delete: Option<(String, String)>,

    // Employee detail
    pub employee: Option<Employee>,
    pub employee_attendance: Vec<AttendanceRecord>,
    pub detail_selection: usize,

    // Attendance
    pub attendance_days: Vec<AttendanceDate>,
    pub attendance_selection: usize,
    pub day_records: Vec<AttendanceRecord>,
    pub day_selection: usize,

    // Settings
    pub settings_tab: SettingsTab,
    pub geofence_form: GeofenceForm,
    pub geofence_focus: usize,
    pub geofence_errors: FormErrors,
    pub config_loaded: bool,
}

impl App {
    /// Build the app on durable storage and a real HTTP client.
    pub fn new(config: Config) -> Result<Self> {
        debug!(base_url = %config.base_url(), "Config loaded");

        let opened = FileStorage::default_path(&config).and_then(FileStorage::open);
        let storage: Box<dyn Storage> = match opened {
            Ok(storage) => {
                debug!(path = %storage.path().display(), "Storage opened");
                Box::new(storage)
            }
            Err(e) => {
                warn!(error = %e, "Durable storage unavailable, session will not persist");
                Box::new(MemoryStorage::default())
            }
        };
        let store = SessionStore::rehydrate(storage);

        let (notifier, notices) = Notifier::channel();
        let api = ApiClient::new(config.base_url(), config.request_timeout())?
            .with_notifier(notifier.clone());

        Ok(Self::with_parts(config, api, store, notifier, notices))
    }

    pub fn with_parts(
        config: Config,
        api: ApiClient,
        store: Store,
        notifier: Notifier,
        notices: mpsc::UnboundedReceiver<Notice>,
    ) -> Self {
        let (load_tx, load_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Self {
            config,
            api,
            store,
            notifier,
            notices,
            load_tx,
            load_rx,
            pending: 0,
            visit: 0,

            state: AppState::Normal,
            route: Route::Root,
            history: Vec::new(),
            toasts: VecDeque::new(),
            status_message: None,
            route_input: String::new(),

            login_username: String::new(),
            login_password: String::new(),
            login_focus: LoginFocus::Username,
            login_error: None,

            dashboard: None,
            dashboard_selection: 0,

            employees: Vec::new(),
            search_query: String::new(),
            employee_selection: 0,
            employee_form: None,
            pending_delete: None,

            employee: None,
            employee_attendance: Vec::new(),
            detail_selection: 0,

            attendance_days: Vec::new(),
            attendance_selection: 0,
            day_records: Vec::new(),
            day_selection: 0,

            settings_tab: SettingsTab::Location,
            geofence_form: GeofenceForm::default(),
            geofence_focus: 0,
            geofence_errors: FormErrors::default(),
            config_loaded: false,
        }
    }

    /// Show the first page. The remote config is loaded up front when a
    /// session was restored.
    pub fn start(&mut self, route: Route) {
        info!(route = %route.path(), logged_in = self.is_logged_in(), "Starting");
        if self.is_logged_in() {
            self.load_app_config(false);
        }
        self.enter(route);
    }

    pub fn theme(&self) -> Theme {
        self.store.state().theme
    }

    pub fn username(&self) -> &str {
        &self.store.state().username
    }

    pub fn is_logged_in(&self) -> bool {
        self.store.is_logged_in()
    }

    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Go to `route`, remembering the current page for Esc.
    pub fn navigate(&mut self, route: Route) {
        let resolved = route.resolve(self.is_logged_in());
        if resolved == self.route {
            return;
        }
        self.history.push(self.route.clone());
        self.enter(resolved);
    }

    /// Return to the previous page, if any.
    pub fn go_back(&mut self) {
        if let Some(previous) = self.history.pop() {
            self.enter(previous);
        }
    }

    /// Navigate to the path typed at the route prompt.
    pub fn submit_route_input(&mut self) {
        let path = std::mem::take(&mut self.route_input);
        self.state = AppState::Normal;
        if !path.trim().is_empty() {
            self.navigate(Route::parse(&path));
        }
    }

    pub fn select_section(&mut self, index: usize) {
        if let Some(route) = Route::MAIN.get(index) {
            self.navigate(route.clone());
        }
    }

    fn enter(&mut self, route: Route) {
        let resolved = route.resolve(self.is_logged_in());
        debug!(route = %resolved.path(), "Entering route");
        self.route = resolved;
        self.visit += 1;
        self.reset_page_state();
        self.load_route_data();
    }

    fn reset_page_state(&mut self) {
        self.status_message = None;
        self.dashboard_selection = 0;
        self.employee_selection = 0;
        self.detail_selection = 0;
        self.attendance_selection = 0;
        self.day_selection = 0;
        self.employee = None;
        self.employee_attendance.clear();
        self.day_records.clear();
        self.config_loaded = false;
        self.geofence_errors = FormErrors::default();
    }

    /// Fetch whatever the current page shows.
    pub fn load_route_data(&mut self) {
        let api = self.api.clone();
        match self.route.clone() {
            Route::Dashboard => self.spawn_load(async move {
                let (dashboard, employees) =
                    futures::join!(api.get_dashboard_data(), api.get_all_employees());
                LoadResult::Dashboard(dashboard, employees)
            }),
            Route::Employees => {
                self.spawn_load(async move { LoadResult::Employees(api.get_all_employees().await) })
            }
            Route::EmployeeDetail(id) => self.spawn_load(async move {
                let (employee, attendance) = futures::join!(
                    api.get_employee_by_id(&id),
                    api.get_employee_attendance(&id)
                );
                LoadResult::EmployeeDetail(employee, attendance)
            }),
            Route::Attendance => self.spawn_load(async move {
                LoadResult::AttendanceRecords(api.get_all_attendance_records().await)
            }),
            Route::AttendanceDetail(date) => self.spawn_load(async move {
                LoadResult::DayRecords(api.get_attendance_by_date(date).await)
            }),
            Route::Settings => {
                self.geofence_form = GeofenceForm::from_state(
                    self.store.state().office_geofence,
                    &self.store.state().maps_api_key,
                );
                self.load_app_config(true);
            }
            Route::Landing | Route::Login | Route::Root | Route::NotFound(_) => {}
        }
    }

    /// Fetch the organisation config and copy it into the session store.
    fn load_app_config(&mut self, for_settings: bool) {
        let api = self.api.clone();
        self.spawn_load(async move {
            LoadResult::RemoteConfig {
                for_settings,
                result: api.get_config_data().await,
            }
        });
    }

    fn spawn_load<F>(&mut self, task: F)
    where
        F: Future<Output = LoadResult> + Send + 'static,
    {
        self.pending += 1;
        let tx = self.load_tx.clone();
        let visit = self.visit;
        tokio::spawn(async move {
            let result = task.await;
            if let Err(e) = tx.send(Loaded { visit, result }).await {
                warn!(error = %e, "Failed to send load result - channel closed");
            }
        });
    }

    // =========================================================================
    // Background task results
    // =========================================================================

    /// Drain finished loads and new notifications. Called every tick.
    pub fn check_background_tasks(&mut self) {
        let mut finished = Vec::new();
        while let Ok(loaded) = self.load_rx.try_recv() {
            finished.push(loaded);
        }
        for loaded in finished {
            self.process_loaded(loaded);
        }
        self.drain_notices();
    }

    fn drain_notices(&mut self) {
        while let Ok(notice) = self.notices.try_recv() {
            self.toasts.push_back(Toast {
                notice,
                shown_at: Instant::now(),
            });
        }
        while self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts
            .retain(|toast| toast.shown_at.elapsed() < TOAST_DURATION);
    }

    fn process_loaded(&mut self, loaded: Loaded) {
        self.pending = self.pending.saturating_sub(1);
        let current = loaded.visit == self.visit;

        match loaded.result {
            LoadResult::Dashboard(dashboard, employees) if current => {
                log_failure("Dashboard", &dashboard);
                if let Ok(data) = dashboard {
                    self.dashboard = Some(data);
                }
                if let Ok(list) = employees {
                    self.employees = list;
                }
            }
            LoadResult::Employees(result) if current => {
                log_failure("Employees", &result);
                if let Ok(list) = result {
                    self.employees = list;
                    self.clamp_employee_selection();
                }
            }
            LoadResult::EmployeeDetail(employee, attendance) if current => {
                log_failure("Employee", &employee);
                self.employee = employee.ok();
                if let Ok(records) = attendance {
                    self.employee_attendance = records;
                }
            }
            LoadResult::AttendanceRecords(result) if current => {
                log_failure("Attendance", &result);
                if let Ok(records) = result {
                    self.attendance_days = summarize_by_date(&records);
                }
            }
            LoadResult::DayRecords(result) if current => {
                log_failure("Daily attendance", &result);
                if let Ok(records) = result {
                    self.day_records = records;
                }
            }
            LoadResult::RemoteConfig {
                for_settings,
                result,
            } => {
                log_failure("Config", &result);
                if let Ok(config) = result {
                    self.store.apply_remote_config(&config);
                    if for_settings && current && self.route == Route::Settings {
                        self.geofence_form = GeofenceForm::from_state(
                            self.store.state().office_geofence,
                            &self.store.state().maps_api_key,
                        );
                        self.config_loaded = true;
                    }
                }
            }
            LoadResult::EmployeeSaved { created, result } => {
                self.on_employee_saved(created, result)
            }
            LoadResult::EmployeeDeleted { id, result } => self.on_employee_deleted(id, result),
            LoadResult::ConfigSaved(result) => {
                if result.is_ok() {
                    self.notifier.success("Settings saved successfully");
                }
            }
            _ => debug!("Dropping result for a page no longer shown"),
        }
    }

    fn on_employee_saved(&mut self, created: bool, result: Result<Employee, ApiError>) {
        match result {
            Ok(employee) => {
                info!(id = %employee.id, created, "Employee saved");
                self.notifier.success(if created {
                    "Employee added successfully!"
                } else {
                    "Employee updated successfully!"
                });
                self.employee_form = None;
                if self.state == AppState::EditingEmployee {
                    self.state = AppState::Normal;
                }
                self.load_route_data();
            }
            Err(_) => {
                // Keep the dialog open so the input is not lost
                if let Some(ref mut form) = self.employee_form {
                    form.submitting = false;
                }
            }
        }
    }

    fn on_employee_deleted(&mut self, id: String, result: Result<(), ApiError>) {
        if result.is_err() {
            return;
        }
        self.notifier.success("Employee deleted successfully");
        if self.route == Route::EmployeeDetail(id) {
            self.navigate(Route::Employees);
        } else {
            self.load_route_data();
        }
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Attempt login with the credentials from the login form
    pub fn attempt_login(&mut self) {
        if self.login_username.is_empty() || self.login_password.is_empty() {
            self.login_error = Some("Username and password required".to_string());
            return;
        }

        match self.store.login(&self.login_username, &self.login_password) {
            Ok(()) => {
                self.login_password.clear();
                self.login_error = None;
                self.login_focus = LoginFocus::Username;
                self.notifier.success("Login successful");
                self.load_app_config(false);
                self.history.clear();
                self.enter(Route::Dashboard);
            }
            Err(e) => {
                self.login_password.clear();
                self.login_focus = LoginFocus::Password;
                self.login_error = Some(e.to_string());
            }
        }
    }

    /// End the session and forget every cached response.
    pub fn logout(&mut self) {
        self.store.logout();
        let cleared = self.api.cache().invalidate_all();
        debug!(cleared, "Response cache cleared on logout");

        self.dashboard = None;
        self.employees.clear();
        self.attendance_days.clear();
        self.search_query.clear();
        self.history.clear();
        self.state = AppState::Normal;
        self.enter(Route::Login);
    }

    pub fn toggle_theme(&mut self) {
        let theme = self.store.toggle_theme();
        self.status_message = Some(format!("Theme: {}", theme.as_str()));
    }

    /// Drop every cached API response.
    pub fn clear_cache(&mut self) {
        let cleared = self.api.cache().invalidate_all();
        self.notifier
            .info(format!("Cleared {} cached responses", cleared));
    }

    /// Persist the current route so the next start can resume there.
    pub fn remember_route(&mut self) {
        self.config.last_route = Some(self.route.path());
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save config");
        }
    }

    // =========================================================================
    // Employees
    // =========================================================================

    pub fn filtered_employees(&self) -> Vec<&Employee> {
        let query = self.search_query.trim();
        self.employees
            .iter()
            .filter(|e| query.is_empty() || e.matches(query))
            .collect()
    }

    pub fn selected_employee(&self) -> Option<&Employee> {
        match self.route {
            Route::EmployeeDetail(_) => self.employee.as_ref(),
            _ => self.filtered_employees().get(self.employee_selection).copied(),
        }
    }

    fn clamp_employee_selection(&mut self) {
        let len = self.filtered_employees().len();
        self.employee_selection = self.employee_selection.min(len.saturating_sub(1));
    }

    pub fn open_new_employee_form(&mut self) {
        self.employee_form = Some(EmployeeFormState {
            form: EmployeeForm::default(),
            editing: None,
            focus: 0,
            errors: FormErrors::default(),
            submitting: false,
        });
        self.state = AppState::EditingEmployee;
    }

    pub fn open_edit_employee_form(&mut self) {
        let Some(employee) = self.selected_employee() else {
            return;
        };
        self.employee_form = Some(EmployeeFormState {
            form: EmployeeForm::from_employee(employee),
            editing: Some(employee.id.clone()),
            focus: 0,
            errors: FormErrors::default(),
            submitting: false,
        });
        self.state = AppState::EditingEmployee;
    }

    pub fn cancel_employee_form(&mut self) {
        self.employee_form = None;
        self.state = AppState::Normal;
    }

    /// Validate the dialog and send it. Field errors keep the dialog open.
    pub fn submit_employee_form(&mut self, today: NaiveDate) {
        let Some(ref mut state) = self.employee_form else {
            return;
        };
        if state.submitting {
            return;
        }

        let employee = match state.form.validate(today) {
            Ok(employee) => employee,
            Err(errors) => {
                let first_invalid = EmployeeForm::FIELDS
                    .iter()
                    .position(|f| errors.get(*f).is_some());
                if let Some(first) = first_invalid {
                    state.focus = first;
                }
                state.errors = errors;
                return;
            }
        };
        state.errors = FormErrors::default();
        state.submitting = true;

        let api = self.api.clone();
        match state.editing.clone() {
            Some(id) => {
                let update = EmployeeUpdate::from(employee);
                self.spawn_load(async move {
                    LoadResult::EmployeeSaved {
                        created: false,
                        result: api.update_employee(&id, &update).await,
                    }
                });
            }
            None => self.spawn_load(async move {
                LoadResult::EmployeeSaved {
                    created: true,
                    result: api.create_employee(&employee).await,
                }
            }),
        }
    }

    pub fn request_delete(&mut self) {
        if let Some(employee) = self.selected_employee() {
            self.pending_delete = Some((employee.id.clone(), employee.name.clone()));
            self.state = AppState::ConfirmingDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        self.state = AppState::Normal;
        let Some((id, _)) = self.pending_delete.take() else {
            return;
        };
        let api = self.api.clone();
        self.spawn_load(async move {
            let result = api.delete_employee(&id).await;
            LoadResult::EmployeeDeleted { id, result }
        });
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub fn focused_geofence_field(&self) -> Field {
        GeofenceForm::FIELDS[self.geofence_focus]
    }

    pub fn start_editing_settings(&mut self) {
        self.settings_tab = SettingsTab::Location;
        self.state = AppState::EditingSettings;
    }

    /// Throw away unsaved edits.
    pub fn cancel_settings(&mut self) {
        self.geofence_form = GeofenceForm::from_state(
            self.store.state().office_geofence,
            &self.store.state().maps_api_key,
        );
        self.geofence_errors = FormErrors::default();
        self.state = AppState::Normal;
    }

    /// Store the geofence locally and push it to the remote config.
    pub fn save_settings(&mut self) {
        let geofence = match self.geofence_form.parse() {
            Ok(geofence) => geofence,
            Err(errors) => {
                self.geofence_errors = errors;
                return;
            }
        };
        self.geofence_errors = FormErrors::default();
        self.store.update_office_geofence(geofence);

        let key = self.geofence_form.maps_api_key.trim().to_string();
        if !key.is_empty() {
            self.store.set_maps_api_key(&key);
        }

        let patch = ConfigPatch {
            google_maps_api_key: (!key.is_empty()).then_some(key),
            office_location: Some(OfficeCoordinates {
                latitude: geofence.latitude,
                longitude: geofence.longitude,
            }),
            allowed_radius_km: Some(geofence.radius / METERS_PER_KM),
            ..Default::default()
        };
        let api = self.api.clone();
        self.spawn_load(async move {
            LoadResult::ConfigSaved(api.update_config_data(&patch).await)
        });
        self.state = AppState::Normal;
    }

    // =========================================================================
    // Lists
    // =========================================================================

    fn list_len(&self) -> usize {
        match self.route {
            Route::Dashboard => self
                .dashboard
                .as_ref()
                .map(|d| d.recent_attendance.len())
                .unwrap_or(0),
            Route::Employees => self.filtered_employees().len(),
            Route::EmployeeDetail(_) => self.employee_attendance.len(),
            Route::Attendance => self.attendance_days.len(),
            Route::AttendanceDetail(_) => self.day_records.len(),
            _ => 0,
        }
    }

    fn selection_mut(&mut self) -> Option<&mut usize> {
        match self.route {
            Route::Dashboard => Some(&mut self.dashboard_selection),
            Route::Employees => Some(&mut self.employee_selection),
            Route::EmployeeDetail(_) => Some(&mut self.detail_selection),
            Route::Attendance => Some(&mut self.attendance_selection),
            Route::AttendanceDetail(_) => Some(&mut self.day_selection),
            _ => None,
        }
    }

    /// Move the current page's selection by `delta` rows, clamped to the list.
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.list_len();
        if let Some(selection) = self.selection_mut() {
            let max = len.saturating_sub(1) as isize;
            *selection = (*selection as isize + delta).clamp(0, max) as usize;
        }
    }

    pub fn select_first(&mut self) {
        if let Some(selection) = self.selection_mut() {
            *selection = 0;
        }
    }

    pub fn select_last(&mut self) {
        let last = self.list_len().saturating_sub(1);
        if let Some(selection) = self.selection_mut() {
            *selection = last;
        }
    }

    /// Drill into the selected row.
    pub fn open_selected(&mut self) {
        let target = match self.route {
            Route::Dashboard => self
                .dashboard
                .as_ref()
                .and_then(|d| d.recent_attendance.get(self.dashboard_selection))
                .and_then(|day| day_route(&day.date)),
            Route::Employees => self
                .selected_employee()
                .map(|e| Route::EmployeeDetail(e.id.clone())),
            Route::Attendance => self
                .attendance_days
                .get(self.attendance_selection)
                .and_then(|day| day_route(&day.date)),
            Route::Landing => Some(Route::Root),
            _ => None,
        };
        if let Some(route) = target {
            self.navigate(route);
        }
    }

    /// Today's date in local time, used for form validation.
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }
}

fn day_route(date: &str) -> Option<Route> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(Route::AttendanceDetail)
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a username character should be accepted
pub fn can_add_username_char(current_len: usize, c: char) -> bool {
    current_len < MAX_USERNAME_LENGTH && is_valid_input_char(c)
}

/// Check if a password character should be accepted
pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

/// Check if a character may be added to a form field
pub fn can_add_field_char(current_len: usize, c: char) -> bool {
    current_len < MAX_FIELD_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================
