//! Route modules for the API server
//!
//! - transactions: full page, transaction table, "view more", filter changes
//! - employees: employee list and the filter dropdown
//! - settings: effective configuration
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: HTML rendering

pub mod employees;
pub mod settings;
pub mod transactions;
