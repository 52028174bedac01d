//! Backend data source
//!
//! The loaders only talk to a [`TransactionBackend`]. [`InMemoryBackend`]
//! serves a fixed data set with page-by-page transactions and an optional
//! simulated latency.

use async_trait::async_trait;
use rampview_config::BackendConfig;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};
use crate::models::{Employee, MockData, PageCursor, PaginatedResponse, Transaction};

/// Backend reference type
pub type BackendRef = Arc<dyn TransactionBackend>;

/// Trait for transaction data sources
#[async_trait]
pub trait TransactionBackend: Send + Sync {
    /// List every employee
    async fn list_employees(&self) -> CoreResult<Vec<Employee>>;

    /// Fetch one page of transactions; `None` requests the first page
    async fn list_transactions(
        &self,
        page: Option<PageCursor>,
    ) -> CoreResult<PaginatedResponse<Vec<Transaction>>>;

    /// Fetch every transaction of one employee (unpaginated)
    async fn list_transactions_by_employee(&self, employee_id: &str) -> CoreResult<Vec<Transaction>>;
}

/// Sample data bundled with the binary
const SAMPLE_DATA: &str = include_str!("../data/mock_data.json");

/// Backend serving a data set held in memory
#[derive(Debug, Clone)]
pub struct InMemoryBackend {
    data: MockData,
    page_size: usize,
    latency: Duration,
}

impl InMemoryBackend {
    /// Create a backend over `data` with the given page size (at least 1)
    pub fn new(data: MockData, page_size: usize) -> Self {
        Self {
            data,
            page_size: page_size.max(1),
            latency: Duration::ZERO,
        }
    }

    /// Delay every request by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Backend over the bundled sample data
    pub fn sample(page_size: usize) -> CoreResult<Self> {
        Ok(Self::new(Self::parse(SAMPLE_DATA)?, page_size))
    }

    /// Build from configuration, reading `data_file` when set
    pub async fn from_config(config: &BackendConfig) -> CoreResult<Self> {
        let data = match &config.data_file {
            Some(path) => {
                log::info!("Loading backend data from {}", path.display());
                let content = tokio::fs::read_to_string(path).await?;
                Self::parse(&content)?
            }
            None => {
                log::info!("Using bundled sample data");
                Self::parse(SAMPLE_DATA)?
            }
        };

        log::debug!(
            "Backend ready: {} employees, {} transactions, page size {}",
            data.employees.len(),
            data.transactions.len(),
            config.page_size
        );

        Ok(Self::new(data, config.page_size).with_latency(Duration::from_millis(config.latency_ms)))
    }

    fn parse(content: &str) -> CoreResult<MockData> {
        serde_json::from_str(content).map_err(|e| CoreError::DataLoad { message: e.to_string() })
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl TransactionBackend for InMemoryBackend {
    async fn list_employees(&self) -> CoreResult<Vec<Employee>> {
        self.simulate_latency().await;
        Ok(self.data.employees.clone())
    }

    async fn list_transactions(
        &self,
        page: Option<PageCursor>,
    ) -> CoreResult<PaginatedResponse<Vec<Transaction>>> {
        self.simulate_latency().await;

        let index = page.map(PageCursor::index).unwrap_or(0);
        let total = self.data.transactions.len();
        let start = index * self.page_size;

        // Page zero of an empty data set is a valid, empty page
        if start >= total && index > 0 {
            return Err(CoreError::InvalidCursor { cursor: index });
        }

        let end = (start + self.page_size).min(total);
        let next_page = if end < total { Some(PageCursor(index + 1)) } else { None };

        Ok(PaginatedResponse {
            data: self.data.transactions[start.min(total)..end].to_vec(),
            next_page,
        })
    }

    async fn list_transactions_by_employee(&self, employee_id: &str) -> CoreResult<Vec<Transaction>> {
        self.simulate_latency().await;

        if employee_id.trim().is_empty() {
            return Err(CoreError::InvalidEmployeeId);
        }

        if !self.data.employees.iter().any(|e| e.id == employee_id) {
            return Err(CoreError::EmployeeNotFound { id: employee_id.to_string() });
        }

        Ok(self
            .data
            .transactions
            .iter()
            .filter(|t| t.belongs_to(employee_id))
            .cloned()
            .collect())
    }
}
