use tracing::{debug, info};

use crate::cache::DEFAULT_TTL;
use crate::models::{ApiEmployee, Employee, EmployeeUpdate, NewEmployee};

use super::client::EMPLOYEE_PATH;
use super::{ApiClient, ApiError, Method};

impl ApiClient {
    /// Cache key of the employee roster.
    pub fn employee_list_url(&self) -> String {
        self.url(&format!("{}/all", EMPLOYEE_PATH))
    }

    pub fn employee_url(&self, id: &str) -> String {
        self.url(&format!("{}/{}", EMPLOYEE_PATH, id))
    }

    pub async fn get_all_employees(&self) -> Result<Vec<Employee>, ApiError> {
        let result = self
            .get_cached::<Vec<ApiEmployee>>(&self.employee_list_url(), DEFAULT_TTL)
            .await;
        let employees = self.report("Failed to fetch employees", result)?;
        debug!(count = employees.len(), "Fetched employees");
        Ok(employees.iter().map(ApiEmployee::to_employee).collect())
    }

    pub async fn get_employee_by_id(&self, id: &str) -> Result<Employee, ApiError> {
        let result = self
            .get_cached::<ApiEmployee>(&self.employee_url(id), DEFAULT_TTL)
            .await;
        let employee = self.report("Failed to fetch employee details", result)?;
        Ok(employee.to_employee())
    }

    pub async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee, ApiError> {
        let url = self.url(&format!("{}/create", EMPLOYEE_PATH));
        let result = self
            .send_json::<ApiEmployee, _>(Method::Post, &url, employee)
            .await;
        let created = self.report("Failed to create employee", result)?;

        self.cache().invalidate(&self.employee_list_url());
        self.cache().invalidate(&self.dashboard_url());
        info!(name = %employee.name, "Employee created");
        Ok(created.to_employee())
    }

    pub async fn update_employee(
        &self,
        id: &str,
        update: &EmployeeUpdate,
    ) -> Result<Employee, ApiError> {
        let url = self.url(&format!("{}/update/{}", EMPLOYEE_PATH, id));
        let result = self
            .send_json::<ApiEmployee, _>(Method::Put, &url, update)
            .await;
        let updated = self.report("Failed to update employee", result)?;

        self.cache().invalidate(&self.employee_list_url());
        self.cache().invalidate(&self.employee_url(id));
        self.cache().invalidate(&self.dashboard_url());
        info!(id, "Employee updated");
        Ok(updated.to_employee())
    }

    pub async fn delete_employee(&self, id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("{}/delete/{}", EMPLOYEE_PATH, id));
        let result = self.send_no_content(Method::Delete, &url).await;
        self.report("Failed to delete employee", result)?;

        self.cache().invalidate(&self.employee_list_url());
        self.cache().invalidate(&self.employee_url(id));
        self.cache().invalidate(&self.employee_attendance_url(id));
        self.cache().invalidate(&self.dashboard_url());
        info!(id, "Employee deleted");
        Ok(())
    }
}
