//! Employee routes - employee list and filter dropdown
//!
//! Structure:
//! - api.rs: JSON API
//! - page.rs: Filter dropdown rendering

pub mod api;
pub mod page;

pub use api::api_employees;
pub use page::render_employee_filter;
