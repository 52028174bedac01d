//! Request-level response cache
//!
//! Responses are stored as JSON values keyed by endpoint and serialized
//! request parameters.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::{CoreError, CoreResult};

/// Backend operations whose responses can be cached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Employees,
    PaginatedTransactions,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Employees => write!(f, "employees"),
            Endpoint::PaginatedTransactions => write!(f, "paginatedTransactions"),
        }
    }
}

/// Cache key: endpoint plus its parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    pub endpoint: Endpoint,
    pub params: String,
}

impl RequestKey {
    pub fn new<P: Serialize>(endpoint: Endpoint, params: &P) -> CoreResult<Self> {
        let params = serde_json::to_string(params)
            .map_err(|e| CoreError::InternalError { message: e.to_string() })?;
        Ok(Self { endpoint, params })
    }
}

impl std::fmt::Display for RequestKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.endpoint, self.params)
    }
}

/// In-memory response cache
#[derive(Debug, Default)]
pub struct RequestCache {
    entries: RwLock<HashMap<RequestKey, serde_json::Value>>,
}

impl RequestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached response, if any, decoded as `T`
    pub fn get<T: DeserializeOwned>(&self, key: &RequestKey) -> Option<T> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let value = entries.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                log::warn!(target: "rampview::cache", "Dropping undecodable entry {}: {}", key, e);
                None
            }
        }
    }

    /// Store a response
    pub fn insert<T: Serialize>(&self, key: RequestKey, value: &T) -> CoreResult<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| CoreError::InternalError { message: e.to_string() })?;
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value);
        Ok(())
    }

    /// Drop every entry of one endpoint
    pub fn clear_endpoint(&self, endpoint: Endpoint) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|key, _| key.endpoint != endpoint);
        log::debug!(target: "rampview::cache", "Cleared cache for {}", endpoint);
    }

    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
