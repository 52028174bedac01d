//! Transaction loaders and view coordination for rampview
//!
//! Three loaders (employees, paginated transactions, transactions by
//! employee) each own one cache slot. [`ViewCoordinator`] decides which
//! transaction loader is authoritative for the current filter and derives
//! the list the presentation layer shows.

pub mod backend;
pub mod cache;
pub mod client;
pub mod coordinator;
pub mod error;
pub mod loaders;
pub mod models;

use rampview_config::Config;
use std::sync::Arc;

pub use backend::{BackendRef, InMemoryBackend, TransactionBackend};
pub use cache::{Endpoint, RequestCache, RequestKey};
pub use client::{ClientRef, DataClient};
pub use coordinator::{ViewCoordinator, ViewSelection, ViewSnapshot};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use loaders::{EmployeeLoader, EmployeeTransactionLoader, FetchOutcome, PaginatedTransactionLoader};
pub use rust_decimal::Decimal;

pub use models::{Employee, MockData, PageCursor, PaginatedResponse, Transaction, EMPTY_EMPLOYEE_ID};

/// Build a coordinator over `backend`, honoring the cache settings
pub fn build_coordinator(config: &Config, backend: BackendRef) -> ViewCoordinator {
    let client = if config.cache.enabled {
        DataClient::new(backend)
    } else {
        log::info!("Request cache disabled");
        DataClient::uncached(backend)
    };
    ViewCoordinator::new(Arc::new(client))
}
