use serde::{Deserialize, Serialize};

use super::wire::{loose_f64, loose_string, loose_u32};

/// Display name used when the server sends no usable name.
pub const UNKNOWN_EMPLOYEE: &str = "Unknown Employee";

// API response shape for /api/employee endpoints. Every field is optional on
// the wire; `to_employee` substitutes defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiEmployee {
    #[serde(default, alias = "_id", deserialize_with = "loose_string")]
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub phone_number: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub hire_date: Option<String>,
    #[serde(default, deserialize_with = "loose_f64")]
    pub salary: Option<f64>,
    pub designation: Option<String>,
    pub employee_shift_hours: Option<ShiftHoursWire>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
    #[serde(default, deserialize_with = "loose_u32")]
    pub age: Option<u32>,
    pub blood_type: Option<String>,
    pub ctc: Option<Ctc>,
}

/// Shift hours arrive either as a structured object or as the
/// `"09:00 AM - 06:00 PM"` string the registration form submits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShiftHoursWire {
    Detailed {
        #[serde(default)]
        start: String,
        #[serde(default)]
        end: String,
        #[serde(default)]
        hours: f64,
        #[serde(default)]
        days: Vec<String>,
    },
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftHours {
    pub start: String,
    pub end: String,
    pub hours: f64,
    pub days: Vec<String>,
}

impl ShiftHours {
    pub fn display(&self) -> String {
        if self.start.is_empty() && self.end.is_empty() {
            return "Not set".to_string();
        }
        format!("{} - {}", self.start, self.end)
    }
}

impl From<&ShiftHoursWire> for ShiftHours {
    fn from(wire: &ShiftHoursWire) -> Self {
        match wire {
            ShiftHoursWire::Detailed { start, end, hours, days } => ShiftHours {
                start: start.clone(),
                end: end.clone(),
                hours: *hours,
                days: days.clone(),
            },
            ShiftHoursWire::Text(text) => {
                let (start, end) = text
                    .split_once(" - ")
                    .map(|(s, e)| (s.trim().to_string(), e.trim().to_string()))
                    .unwrap_or_else(|| (text.trim().to_string(), String::new()));
                ShiftHours {
                    start,
                    end,
                    hours: 0.0,
                    days: Vec::new(),
                }
            }
        }
    }
}

/// Cost to company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ctc {
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub frequency: String,
}

/// Employee view model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub job_title: String,
    pub department: String,
    pub location: String,
    pub hire_date: String,
    pub salary: f64,
    pub designation: String,
    pub shift_hours: Option<ShiftHours>,
    pub address: String,
    pub date_of_birth: String,
    pub age: Option<u32>,
    pub blood_type: String,
    pub ctc: Option<Ctc>,
}

fn text(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

impl ApiEmployee {
    /// Convert the wire record into the view model.
    pub fn to_employee(&self) -> Employee {
        let first_name = text(&self.first_name);
        let last_name = text(&self.last_name);

        let name = match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                let joined = format!("{} {}", first_name, last_name).trim().to_string();
                if joined.is_empty() {
                    UNKNOWN_EMPLOYEE.to_string()
                } else {
                    joined
                }
            }
        };

        Employee {
            id: text(&self.id),
            name,
            first_name,
            last_name,
            email: text(&self.email),
            phone_number: text(&self.phone_number),
            job_title: text(&self.job_title),
            department: text(&self.department),
            location: text(&self.location),
            hire_date: text(&self.hire_date),
            salary: self.salary.unwrap_or(0.0),
            designation: text(&self.designation),
            shift_hours: self.employee_shift_hours.as_ref().map(ShiftHours::from),
            address: text(&self.address),
            date_of_birth: text(&self.date_of_birth),
            age: self.age,
            blood_type: text(&self.blood_type),
            ctc: self.ctc.clone(),
        }
    }
}

impl Employee {
    /// Job title, falling back to designation.
    pub fn role(&self) -> &str {
        if !self.designation.is_empty() {
            &self.designation
        } else if !self.job_title.is_empty() {
            &self.job_title
        } else {
            "—"
        }
    }

    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [&self.name, &self.email, &self.id, &self.designation, &self.department]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

/// Payload for `POST /api/employee/create`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEmployee {
    pub name: String,
    pub date_of_birth: String,
    pub email: String,
    pub address: String,
    pub phone_number: String,
    pub designation: String,
    pub employee_shift_hours: String,
}

/// Partial update for `PUT /api/employee/update/{id}`; absent fields are left
/// unchanged by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_shift_hours: Option<String>,
}

impl From<NewEmployee> for EmployeeUpdate {
    fn from(e: NewEmployee) -> Self {
        Self {
            name: Some(e.name),
            date_of_birth: Some(e.date_of_birth),
            email: Some(e.email),
            address: Some(e.address),
            phone_number: Some(e.phone_number),
            designation: Some(e.designation),
            employee_shift_hours: Some(e.employee_shift_hours),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_employee_defaults() {
        let wire: ApiEmployee = serde_json::from_str(r#"{"id": "E-7"}"#).unwrap();
        let employee = wire.to_employee();
        assert_eq!(employee.id, "E-7");
        assert_eq!(employee.name, UNKNOWN_EMPLOYEE);
        assert_eq!(employee.salary, 0.0);
        assert!(employee.shift_hours.is_none());
        assert_eq!(employee.role(), "—");
    }

    #[test]
    fn test_numeric_id_and_phone_are_accepted() {
        let wire: ApiEmployee = serde_json::from_str(
            r#"{"id": 12, "name": "Asha Rao", "phone_number": 9876543210, "age": "34"}"#,
        )
        .unwrap();
        let employee = wire.to_employee();
        assert_eq!(employee.id, "12");
        assert_eq!(employee.phone_number, "9876543210");
        assert_eq!(employee.age, Some(34));
    }

    #[test]
    fn test_name_falls_back_to_first_and_last() {
        let wire: ApiEmployee =
            serde_json::from_str(r#"{"id": "1", "first_name": "Asha", "last_name": "Rao"}"#).unwrap();
        assert_eq!(wire.to_employee().name, "Asha Rao");
    }

    #[test]
    fn test_shift_hours_accepts_both_shapes() {
        let detailed: ApiEmployee = serde_json::from_str(
            r#"{"employee_shift_hours": {"start": "09:00", "end": "18:00", "hours": 9, "days": ["Mon"]}}"#,
        )
        .unwrap();
        let shift = detailed.to_employee().shift_hours.unwrap();
        assert_eq!(shift.hours, 9.0);
        assert_eq!(shift.days, vec!["Mon"]);

        let text: ApiEmployee =
            serde_json::from_str(r#"{"employee_shift_hours": "09:00 AM - 06:00 PM"}"#).unwrap();
        let shift = text.to_employee().shift_hours.unwrap();
        assert_eq!(shift.start, "09:00 AM");
        assert_eq!(shift.end, "06:00 PM");
        assert_eq!(shift.display(), "09:00 AM - 06:00 PM");
    }

    #[test]
    fn test_update_skips_absent_fields() {
        let update = EmployeeUpdate {
            email: Some("a@b.co".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"email":"a@b.co"}"#);
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let wire: ApiEmployee =
            serde_json::from_str(r#"{"id": "E-1", "name": "Priya Nair", "designation": "Engineer"}"#).unwrap();
        let employee = wire.to_employee();
        assert!(employee.matches("priya"));
        assert!(employee.matches("ENGINEER"));
        assert!(!employee.matches("sales"));
    }
}
