//! Client-side routes and the login guard.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Root,
    Dashboard,
    Employees,
    EmployeeDetail(String),
    Attendance,
    AttendanceDetail(NaiveDate),
    Settings,
    NotFound(String),
}

impl Route {
    /// Pages reachable with the number keys, in order.
    pub const MAIN: [Route; 4] = [
        Route::Dashboard,
        Route::Employees,
        Route::Attendance,
        Route::Settings,
    ];

    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Root,
            ["landing"] => Route::Landing,
            ["login"] => Route::Login,
            ["dashboard"] => Route::Dashboard,
            ["employees"] => Route::Employees,
            ["employees", id] => Route::EmployeeDetail((*id).to_string()),
            ["attendance"] => Route::Attendance,
            ["attendance", date] => match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
                Ok(date) => Route::AttendanceDetail(date),
                Err(_) => Route::NotFound(trimmed.to_string()),
            },
            ["settings"] => Route::Settings,
            _ => Route::NotFound(trimmed.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/landing".to_string(),
            Route::Login => "/login".to_string(),
            Route::Root => "/".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Employees => "/employees".to_string(),
            Route::EmployeeDetail(id) => format!("/employees/{}", id),
            Route::Attendance => "/attendance".to_string(),
            Route::AttendanceDetail(date) => format!("/attendance/{}", date.format("%Y-%m-%d")),
            Route::Settings => "/settings".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Landing => "Welcome",
            Route::Login => "Login",
            Route::Root => "",
            Route::Dashboard => "Dashboard",
            Route::Employees => "Employees",
            Route::EmployeeDetail(_) => "Employee",
            Route::Attendance => "Attendance",
            Route::AttendanceDetail(_) => "Daily Attendance",
            Route::Settings => "Settings",
            Route::NotFound(_) => "Not Found",
        }
    }

    /// Routes that require a logged-in session.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Landing | Route::Login | Route::NotFound(_))
    }

    /// Apply redirects: `/` by login state, `/login` when already logged in,
    /// and protected routes when logged out.
    pub fn resolve(self, logged_in: bool) -> Self {
        match self {
            Route::Root if logged_in => Route::Dashboard,
            Route::Root => Route::Login,
            Route::Login if logged_in => Route::Dashboard,
            route if route.is_protected() && !logged_in => Route::Login,
            route => route,
        }
    }

    /// Main navigation section this route belongs to, for highlighting.
    pub fn section(&self) -> Option<usize> {
        match self {
            Route::Dashboard => Some(0),
            Route::Employees | Route::EmployeeDetail(_) => Some(1),
            Route::Attendance | Route::AttendanceDetail(_) => Some(2),
            Route::Settings => Some(3),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_path() {
        assert_eq!(Route::parse("/"), Route::Root);
        assert_eq!(Route::parse("/employees/"), Route::Employees);
        assert_eq!(Route::parse("/employees/E-7"), Route::EmployeeDetail("E-7".into()));
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(Route::parse("/attendance/2024-03-01"), Route::AttendanceDetail(date));
        assert_eq!(Route::AttendanceDetail(date).path(), "/attendance/2024-03-01");
        assert_eq!(
            Route::parse("/attendance/yesterday"),
            Route::NotFound("/attendance/yesterday".into())
        );
        assert_eq!(Route::parse("/nope/x/y"), Route::NotFound("/nope/x/y".into()));
    }

    #[test]
    fn test_root_redirect() {
        assert_eq!(Route::Root.resolve(true), Route::Dashboard);
        assert_eq!(Route::Root.resolve(false), Route::Login);
    }

    #[test]
    fn test_login_redirects_when_logged_in() {
        assert_eq!(Route::Login.resolve(true), Route::Dashboard);
        assert_eq!(Route::Login.resolve(false), Route::Login);
    }

    #[test]
    fn test_protected_routes() {
        assert_eq!(Route::Settings.resolve(false), Route::Login);
        assert_eq!(Route::EmployeeDetail("1".into()).resolve(false), Route::Login);
        assert_eq!(Route::Settings.resolve(true), Route::Settings);
        assert_eq!(Route::Landing.resolve(false), Route::Landing);
        assert_eq!(
            Route::NotFound("/x".into()).resolve(false),
            Route::NotFound("/x".into())
        );
    }

    #[test]
    fn test_section() {
        assert_eq!(Route::EmployeeDetail("1".into()).section(), Some(1));
        assert_eq!(Route::Login.section(), None);
        for (i, route) in Route::MAIN.iter().enumerate() {
            assert_eq!(route.section(), Some(i));
        }
    }
}
