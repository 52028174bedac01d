//! Transaction routes - main page, table, pagination, filter changes
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page and panel rendering

pub mod api;
pub mod page;

pub use api::{
    api_view,
    api_filter,
    htmx_transactions_list,
    htmx_transactions_more,
    htmx_filter_change,
};

pub use page::{page_index, render_transactions_panel};
