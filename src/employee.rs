//! The employee resource: transfer model, field table, and routes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::compose::LinkComposer;
use crate::error::RegistrationError;
use crate::links::{LinkFactory, ResourceRoutes};
use crate::routes::RouteTable;
use crate::shaper::{DataShaper, FieldTable};

pub const EMPLOYEES_ROUTE: &str = "/api/companies/{companyId}/employees";
pub const EMPLOYEE_ROUTE: &str = "/api/companies/{companyId}/employees/{id}";

/// Employee as returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDto {
    pub id: Uuid,
    pub name: String,
    pub age: u32,
    pub position: String,
}

pub const EMPLOYEE_ROUTES: ResourceRoutes = ResourceRoutes {
    resource: "employee",
    parent_key: "companyId",
    item_key: "id",
    get_item: "GetEmployeeForCompany",
    delete_item: "DeleteEmployeeForCompany",
    update_item: "UpdateEmployeeForCompany",
    partially_update_item: "PartiallyUpdateEmployeeForCompany",
    list_items: "GetEmployeesForCompany",
};

pub fn employee_fields() -> Result<FieldTable<EmployeeDto>, RegistrationError> {
    FieldTable::builder("id")
        .field("id", |e: &EmployeeDto| e.id)
        .field("name", |e: &EmployeeDto| e.name.clone())
        .field("age", |e: &EmployeeDto| e.age)
        .field("position", |e: &EmployeeDto| e.position.clone())
        .build()
}

/// Route table with every route the employee links point at.
pub fn employee_route_table() -> RouteTable {
    RouteTable::new()
        .route(EMPLOYEE_ROUTES.list_items, EMPLOYEES_ROUTE)
        .route(EMPLOYEE_ROUTES.get_item, EMPLOYEE_ROUTE)
        .route(EMPLOYEE_ROUTES.delete_item, EMPLOYEE_ROUTE)
        .route(EMPLOYEE_ROUTES.update_item, EMPLOYEE_ROUTE)
        .route(EMPLOYEE_ROUTES.partially_update_item, EMPLOYEE_ROUTE)
}

/// Composer for employee collections nested under a company.
pub fn employee_composer() -> Result<LinkComposer<EmployeeDto, RouteTable>, RegistrationError> {
    let shaper = DataShaper::new(employee_fields()?);
    let links = LinkFactory::new(employee_route_table(), EMPLOYEE_ROUTES);
    Ok(LinkComposer::new(shaper, links))
}
