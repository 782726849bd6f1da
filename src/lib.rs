//! Resource Shaping
//!
//! Field projection and hypermedia link composition for resource APIs.
//!
//! This library turns a collection of typed objects into the response body of
//! a list endpoint: each object is projected onto the fields the client asked
//! for, and, when the negotiated media type asks for it, each projection and
//! the collection as a whole get navigation links.
//!
//! # Example
//!
//! ```
//! use resource_shape::{employee_composer, EmployeeDto, RequestContext};
//! use uuid::Uuid;
//!
//! let composer = employee_composer().unwrap();
//! let company_id = Uuid::new_v4();
//! let employees = vec![EmployeeDto {
//!     id: Uuid::new_v4(),
//!     name: "Ann".into(),
//!     age: 30,
//!     position: "Manager".into(),
//! }];
//!
//! // Plain JSON: shaped entities only
//! let ctx = RequestContext::new("http://localhost:5000", "application/json");
//! let response = composer
//!     .compose(&employees, Some("name"), &company_id, &ctx)
//!     .unwrap();
//! let entities = response.shaped_entities().unwrap();
//! assert_eq!(entities[0].keys().collect::<Vec<_>>(), ["name", "id"]);
//!
//! // Vendor hypermedia type: every entity carries links
//! let ctx = RequestContext::new(
//!     "http://localhost:5000",
//!     "application/vnd.codemaze.hateoas+json",
//! );
//! let response = composer
//!     .compose(&employees, Some("name"), &company_id, &ctx)
//!     .unwrap();
//! let wrapper = response.linked_entities().unwrap();
//! assert_eq!(wrapper.value()[0].links().unwrap().len(), 4);
//! assert_eq!(wrapper.links()[0].rel(), "self");
//! ```
//!
//! # Item Links
//!
//! | Relation | Method | Route |
//! |----------|--------|-------|
//! | `self` | GET | get item (carries `fields`) |
//! | `delete_<resource>` | DELETE | delete item |
//! | `update_<resource>` | PUT | update item |
//! | `partially_update_<resource>` | PATCH | partially update item |
//!
//! The collection gets a single `self` link to the list route.
//!
//! # Field Requests
//!
//! `fields` is a comma-separated list such as `"name,age"`. Unknown names are
//! ignored, and the identity field is always included so links can be built.

mod compose;
mod config;
mod context;
mod employee;
mod error;
mod fields;
mod links;
mod loader;
mod media;
mod routes;
mod shaper;
mod types;

pub use compose::LinkComposer;
pub use config::{init_logging, ShapeConfig};
pub use context::RequestContext;
pub use employee::{
    employee_composer, employee_fields, employee_route_table, EmployeeDto, EMPLOYEES_ROUTE,
    EMPLOYEE_ROUTE, EMPLOYEE_ROUTES,
};
pub use error::{LinkError, LoadError, MediaTypeError, RegistrationError};
pub use fields::resolve_fields;
pub use links::{LinkFactory, ResourceRoutes};
pub use loader::{load_items, load_items_str};
pub use media::{negotiate, should_link, HATEOAS_MARKER, SUPPORTED_MEDIA_TYPES};
pub use routes::{RouteTable, RouteValues, UrlBuilder};
pub use shaper::{DataShaper, FieldTable, FieldTableBuilder};
pub use types::{
    Entity, FieldValue, Link, LinkCollectionWrapper, LinkResponse, ShapeEntity, LINKS_FIELD,
};
