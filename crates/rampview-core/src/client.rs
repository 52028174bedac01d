//! Backend access shared by the loaders
//!
//! Wraps a [`TransactionBackend`] with the optional [`RequestCache`].
//! Employee lists and transaction pages are cached; per-employee results
//! always go to the backend.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

use crate::backend::BackendRef;
use crate::cache::{Endpoint, RequestCache, RequestKey};
use crate::error::CoreResult;
use crate::models::{Employee, PageCursor, PaginatedResponse, Transaction};

/// Shared client reference
pub type ClientRef = Arc<DataClient>;

pub struct DataClient {
    backend: BackendRef,
    cache: Option<RequestCache>,
}

impl DataClient {
    /// Client that memoizes cacheable responses
    pub fn new(backend: BackendRef) -> Self {
        Self {
            backend,
            cache: Some(RequestCache::new()),
        }
    }

    /// Client that always hits the backend
    pub fn uncached(backend: BackendRef) -> Self {
        Self { backend, cache: None }
    }

    pub fn cache(&self) -> Option<&RequestCache> {
        self.cache.as_ref()
    }

    pub async fn employees(&self) -> CoreResult<Vec<Employee>> {
        let key = RequestKey::new(Endpoint::Employees, &())?;
        self.fetch_with_cache(key, || self.backend.list_employees()).await
    }

    pub async fn transactions_page(
        &self,
        page: Option<PageCursor>,
    ) -> CoreResult<PaginatedResponse<Vec<Transaction>>> {
        let key = RequestKey::new(Endpoint::PaginatedTransactions, &page)?;
        self.fetch_with_cache(key, || self.backend.list_transactions(page)).await
    }

    pub async fn transactions_by_employee(&self, employee_id: &str) -> CoreResult<Vec<Transaction>> {
        self.backend.list_transactions_by_employee(employee_id).await
    }

    /// Drop cached responses of one endpoint
    pub fn clear_cache_by_endpoint(&self, endpoint: Endpoint) {
        if let Some(cache) = &self.cache {
            cache.clear_endpoint(endpoint);
        }
    }

    async fn fetch_with_cache<T, F, Fut>(&self, key: RequestKey, request: F) -> CoreResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = CoreResult<T>>,
    {
        let Some(cache) = &self.cache else {
            return request().await;
        };

        if let Some(hit) = cache.get(&key) {
            log::debug!(target: "rampview::cache", "Cache hit for {}", key);
            return Ok(hit);
        }

        let response = request().await?;
        cache.insert(key, &response)?;
        Ok(response)
    }
}
