//! Form models and validation for the employee and office-location forms.
//!
//! Forms hold raw text as typed by the user. `validate`/`parse` turn them
//! into API payloads or return every field error at once.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{Employee, NewEmployee};
use crate::store::OfficeGeofence;

/// Earliest accepted date of birth.
const MIN_BIRTH_DATE: (i32, u32, u32) = (1900, 1, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    DateOfBirth,
    Email,
    Address,
    PhoneNumber,
    Designation,
    ShiftStart,
    ShiftEnd,
    Latitude,
    Longitude,
    Radius,
    MapsApiKey,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::DateOfBirth => "Date of Birth",
            Field::Email => "Email",
            Field::Address => "Address",
            Field::PhoneNumber => "Phone Number",
            Field::Designation => "Designation",
            Field::ShiftStart => "Shift Start",
            Field::ShiftEnd => "Shift End",
            Field::Latitude => "Latitude",
            Field::Longitude => "Longitude",
            Field::Radius => "Radius (meters)",
            Field::MapsApiKey => "Google Maps API Key",
        }
    }
}

/// Per-field validation messages.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("{} field(s) need attention", .errors.len())]
pub struct FormErrors {
    errors: BTreeMap<Field, String>,
}

impl FormErrors {
    fn add(&mut self, field: Field, message: &str) {
        self.errors.entry(field).or_insert_with(|| message.to_string());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Meridiem {
    #[default]
    Am,
    Pm,
}

impl Meridiem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Meridiem::Am => Meridiem::Pm,
            Meridiem::Pm => Meridiem::Am,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "AM" => Some(Meridiem::Am),
            "PM" => Some(Meridiem::Pm),
            _ => None,
        }
    }
}

/// Selectable shift times: 01:00 through 12:30 in 30 minute steps.
pub fn time_options() -> Vec<String> {
    (1..=12)
        .flat_map(|hour| [0, 30].map(|minute| format!("{:02}:{:02}", hour, minute)))
        .collect()
}

/// Step through `time_options`, wrapping at either end.
pub fn cycle_time(current: &str, forward: bool) -> String {
    let options = time_options();
    let len = options.len();
    let next = match options.iter().position(|t| t == current) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None => 0,
    };
    options[next].clone()
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
}

fn check_min_len(errors: &mut FormErrors, field: Field, value: &str, min: usize, message: &str) {
    if value.chars().count() < min {
        errors.add(field, message);
    }
}

// ============================================================================
// Employee form
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeForm {
    pub name: String,
    pub date_of_birth: String,
    pub email: String,
    pub address: String,
    pub phone_number: String,
    pub designation: String,
    pub shift_start: String,
    pub shift_start_meridiem: Meridiem,
    pub shift_end: String,
    pub shift_end_meridiem: Meridiem,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            date_of_birth: String::new(),
            email: String::new(),
            address: String::new(),
            phone_number: String::new(),
            designation: String::new(),
            shift_start: "09:00".to_string(),
            shift_start_meridiem: Meridiem::Am,
            shift_end: "06:00".to_string(),
            shift_end_meridiem: Meridiem::Pm,
        }
    }
}

impl EmployeeForm {
    /// Fields in on-screen order.
    pub const FIELDS: [Field; 8] = [
        Field::Name,
        Field::DateOfBirth,
        Field::Email,
        Field::Address,
        Field::PhoneNumber,
        Field::Designation,
        Field::ShiftStart,
        Field::ShiftEnd,
    ];

    /// Prefill from an existing employee for editing.
    pub fn from_employee(employee: &Employee) -> Self {
        let mut form = Self {
            name: employee.name.clone(),
            date_of_birth: employee
                .date_of_birth
                .get(..10)
                .unwrap_or(&employee.date_of_birth)
                .to_string(),
            email: employee.email.clone(),
            address: employee.address.clone(),
            phone_number: employee.phone_number.clone(),
            designation: employee.designation.clone(),
            ..Default::default()
        };
        if let Some(ref shift) = employee.shift_hours {
            if let Some((time, meridiem)) = split_time(&shift.start) {
                form.shift_start = time;
                form.shift_start_meridiem = meridiem;
            }
            if let Some((time, meridiem)) = split_time(&shift.end) {
                form.shift_end = time;
                form.shift_end_meridiem = meridiem;
            }
        }
        form
    }

    /// Editable text for a free-text field; `None` for the shift selectors.
    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::DateOfBirth => Some(&mut self.date_of_birth),
            Field::Email => Some(&mut self.email),
            Field::Address => Some(&mut self.address),
            Field::PhoneNumber => Some(&mut self.phone_number),
            Field::Designation => Some(&mut self.designation),
            _ => None,
        }
    }

    pub fn display_value(&self, field: Field) -> String {
        match field {
            Field::Name => self.name.clone(),
            Field::DateOfBirth => self.date_of_birth.clone(),
            Field::Email => self.email.clone(),
            Field::Address => self.address.clone(),
            Field::PhoneNumber => self.phone_number.clone(),
            Field::Designation => self.designation.clone(),
            Field::ShiftStart => {
                format!("{} {}", self.shift_start, self.shift_start_meridiem.as_str())
            }
            Field::ShiftEnd => format!("{} {}", self.shift_end, self.shift_end_meridiem.as_str()),
            _ => String::new(),
        }
    }

    /// Move a shift selector to the next/previous time slot.
    pub fn cycle_shift(&mut self, field: Field, forward: bool) {
        match field {
            Field::ShiftStart => self.shift_start = cycle_time(&self.shift_start, forward),
            Field::ShiftEnd => self.shift_end = cycle_time(&self.shift_end, forward),
            _ => {}
        }
    }

    pub fn toggle_meridiem(&mut self, field: Field) {
        match field {
            Field::ShiftStart => self.shift_start_meridiem = self.shift_start_meridiem.toggled(),
            Field::ShiftEnd => self.shift_end_meridiem = self.shift_end_meridiem.toggled(),
            _ => {}
        }
    }

    /// `"09:00 AM - 06:00 PM"`
    pub fn shift_hours(&self) -> String {
        format!(
            "{} {} - {} {}",
            self.shift_start,
            self.shift_start_meridiem.as_str(),
            self.shift_end,
            self.shift_end_meridiem.as_str()
        )
    }

    pub fn validate(&self, today: NaiveDate) -> Result<NewEmployee, FormErrors> {
        let mut errors = FormErrors::default();
        let name = self.name.trim();
        let date_of_birth = self.date_of_birth.trim();
        let email = self.email.trim();
        let address = self.address.trim();
        let phone_number = self.phone_number.trim();
        let designation = self.designation.trim();

        check_min_len(&mut errors, Field::Name, name, 2, "Name must be at least 2 characters");
        validate_birth_date(&mut errors, date_of_birth, today);
        if !is_valid_email(email) {
            errors.add(Field::Email, "Please enter a valid email address");
        }
        check_min_len(
            &mut errors,
            Field::Address,
            address,
            5,
            "Address must be at least 5 characters",
        );
        check_min_len(
            &mut errors,
            Field::PhoneNumber,
            phone_number,
            10,
            "Phone number must be at least 10 characters",
        );
        check_min_len(
            &mut errors,
            Field::Designation,
            designation,
            2,
            "Designation must be at least 2 characters",
        );

        let options = time_options();
        if !options.contains(&self.shift_start) {
            errors.add(Field::ShiftStart, "Choose a start time");
        }
        if !options.contains(&self.shift_end) {
            errors.add(Field::ShiftEnd, "Choose an end time");
        }

        errors.into_result(|| NewEmployee {
            name: name.to_string(),
            date_of_birth: date_of_birth.to_string(),
            email: email.to_string(),
            address: address.to_string(),
            phone_number: phone_number.to_string(),
            designation: designation.to_string(),
            employee_shift_hours: self.shift_hours(),
        })
    }
}

fn validate_birth_date(errors: &mut FormErrors, value: &str, today: NaiveDate) {
    let well_formed = value.len() == 10
        && value
            .char_indices()
            .all(|(i, c)| if i == 4 || i == 7 { c == '-' } else { c.is_ascii_digit() });
    if !well_formed {
        errors.add(Field::DateOfBirth, "Date must be in YYYY-MM-DD format");
        return;
    }

    let (y, m, d) = MIN_BIRTH_DATE;
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) if NaiveDate::from_ymd_opt(y, m, d).is_some_and(|min| date < min) => {
            errors.add(Field::DateOfBirth, "Date must be on or after 1900-01-01")
        }
        Ok(date) if date > today => errors.add(Field::DateOfBirth, "Date cannot be in the future"),
        Ok(_) => {}
        Err(_) => errors.add(Field::DateOfBirth, "Date is not a real calendar date"),
    }
}

/// Split `"09:00 AM"` into the time slot and meridiem.
fn split_time(value: &str) -> Option<(String, Meridiem)> {
    let (time, meridiem) = value.trim().rsplit_once(' ')?;
    Some((time.trim().to_string(), Meridiem::parse(meridiem)?))
}

// ============================================================================
// Office location form
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeofenceForm {
    pub latitude: String,
    pub longitude: String,
    pub radius: String,
    pub maps_api_key: String,
}

impl GeofenceForm {
    pub const FIELDS: [Field; 4] = [
        Field::Latitude,
        Field::Longitude,
        Field::Radius,
        Field::MapsApiKey,
    ];

    pub fn from_state(geofence: Option<OfficeGeofence>, maps_api_key: &str) -> Self {
        let mut form = Self {
            maps_api_key: maps_api_key.to_string(),
            ..Default::default()
        };
        if let Some(g) = geofence {
            form.latitude = g.latitude.to_string();
            form.longitude = g.longitude.to_string();
            form.radius = g.radius.to_string();
        }
        form
    }

    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Latitude => Some(&mut self.latitude),
            Field::Longitude => Some(&mut self.longitude),
            Field::Radius => Some(&mut self.radius),
            Field::MapsApiKey => Some(&mut self.maps_api_key),
            _ => None,
        }
    }

    pub fn display_value(&self, field: Field) -> &str {
        match field {
            Field::Latitude => &self.latitude,
            Field::Longitude => &self.longitude,
            Field::Radius => &self.radius,
            Field::MapsApiKey => &self.maps_api_key,
            _ => "",
        }
    }

    pub fn parse(&self) -> Result<OfficeGeofence, FormErrors> {
        let mut errors = FormErrors::default();

        let latitude = parse_number(&mut errors, Field::Latitude, &self.latitude);
        if latitude.is_some_and(|v| !(-90.0..=90.0).contains(&v)) {
            errors.add(Field::Latitude, "Latitude must be between -90 and 90");
        }
        let longitude = parse_number(&mut errors, Field::Longitude, &self.longitude);
        if longitude.is_some_and(|v| !(-180.0..=180.0).contains(&v)) {
            errors.add(Field::Longitude, "Longitude must be between -180 and 180");
        }
        let radius = parse_number(&mut errors, Field::Radius, &self.radius);
        if radius.is_some_and(|v| v <= 0.0) {
            errors.add(Field::Radius, "Radius must be greater than 0");
        }

        errors.into_result(|| OfficeGeofence {
            latitude: latitude.unwrap_or_default(),
            longitude: longitude.unwrap_or_default(),
            radius: radius.unwrap_or_default(),
        })
    }
}

fn parse_number(errors: &mut FormErrors, field: Field, value: &str) -> Option<f64> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            errors.add(field, "Enter a number");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftHours;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn filled() -> EmployeeForm {
        EmployeeForm {
            name: " Ravi Kumar ".into(),
            date_of_birth: "1990-05-17".into(),
            email: "ravi@example.com".into(),
            address: "12 MG Road".into(),
            phone_number: "9876543210".into(),
            designation: "Engineer".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_time_options() {
        let options = time_options();
        assert_eq!(options.len(), 24);
        assert_eq!(options.first().map(String::as_str), Some("01:00"));
        assert_eq!(options.last().map(String::as_str), Some("12:30"));
        assert_eq!(cycle_time("12:30", true), "01:00");
        assert_eq!(cycle_time("01:00", false), "12:30");
    }

    #[test]
    fn test_valid_form_builds_payload() {
        let employee = filled().validate(today()).unwrap();
        assert_eq!(employee.name, "Ravi Kumar");
        assert_eq!(employee.employee_shift_hours, "09:00 AM - 06:00 PM");
    }

    #[test]
    fn test_every_invalid_field_reported() {
        let form = EmployeeForm {
            name: "R".into(),
            date_of_birth: "17/05/1990".into(),
            email: "ravi@example".into(),
            address: "MG".into(),
            phone_number: "12345".into(),
            designation: "E".into(),
            shift_start: "09:15".into(),
            ..Default::default()
        };
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(errors.len(), 7);
        assert_eq!(errors.get(Field::DateOfBirth), Some("Date must be in YYYY-MM-DD format"));
        assert_eq!(errors.get(Field::Email), Some("Please enter a valid email address"));
        assert_eq!(errors.get(Field::ShiftEnd), None);
    }

    #[test]
    fn test_birth_date_range() {
        let mut form = filled();
        form.date_of_birth = "1899-12-31".into();
        assert!(form.validate(today()).unwrap_err().get(Field::DateOfBirth).is_some());

        form.date_of_birth = "2024-06-02".into();
        assert!(form.validate(today()).is_err());

        form.date_of_birth = "2023-02-30".into();
        assert!(form.validate(today()).is_err());

        form.date_of_birth = "2024-06-01".into();
        assert!(form.validate(today()).is_ok());
    }

    #[test]
    fn test_email_rules() {
        assert!(is_valid_email("a.b@c.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a b@c.co"));
        assert!(!is_valid_email("a@@c.co"));
        assert!(!is_valid_email("a@c..co"));
    }

    #[test]
    fn test_from_employee_splits_shift() {
        let mut employee = crate::models::ApiEmployee::default().to_employee();
        employee.name = "Asha".into();
        employee.date_of_birth = "1992-01-02T00:00:00Z".into();
        employee.shift_hours = Some(ShiftHours {
            start: "10:30 AM".into(),
            end: "07:00 PM".into(),
            hours: 0.0,
            days: vec![],
        });

        let form = EmployeeForm::from_employee(&employee);
        assert_eq!(form.date_of_birth, "1992-01-02");
        assert_eq!(form.shift_start, "10:30");
        assert_eq!(form.shift_end_meridiem, Meridiem::Pm);
        assert_eq!(form.shift_hours(), "10:30 AM - 07:00 PM");
    }

    #[test]
    fn test_geofence_form() {
        let form = GeofenceForm {
            latitude: "12.9".into(),
            longitude: "77.6".into(),
            radius: "500".into(),
            maps_api_key: String::new(),
        };
        assert_eq!(
            form.parse().unwrap(),
            OfficeGeofence { latitude: 12.9, longitude: 77.6, radius: 500.0 }
        );

        let bad = GeofenceForm {
            latitude: "95".into(),
            longitude: "abc".into(),
            radius: "0".into(),
            maps_api_key: String::new(),
        };
        let errors = bad.parse().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Field::Longitude), Some("Enter a number"));
    }
}
