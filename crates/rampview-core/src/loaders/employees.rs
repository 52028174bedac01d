//! Employee directory loader

use crate::client::ClientRef;
use crate::error::CoreResult;
use crate::models::Employee;

use super::{FetchOutcome, LoaderSlot};

/// Loads the complete employee list
pub struct EmployeeLoader {
    client: ClientRef,
    slot: LoaderSlot<Vec<Employee>>,
}

impl EmployeeLoader {
    pub fn new(client: ClientRef) -> Self {
        Self {
            client,
            slot: LoaderSlot::new(),
        }
    }

    /// Fetch every employee, replacing what was loaded before
    pub async fn fetch_all(&self) -> CoreResult<FetchOutcome> {
        let generation = self.slot.begin_latest();

        match self.client.employees().await {
            Ok(employees) => {
                log::debug!("Fetched {} employees", employees.len());
                Ok(self.slot.complete(generation, |data| *data = Some(employees)))
            }
            Err(e) => {
                self.slot.fail(generation);
                Err(e)
            }
        }
    }

    pub fn loading(&self) -> bool {
        self.slot.loading()
    }

    pub fn data(&self) -> Option<Vec<Employee>> {
        self.slot.data()
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.has_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryBackend;
    use crate::client::DataClient;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_fetch_all() {
        let client = Arc::new(DataClient::new(Arc::new(InMemoryBackend::sample(5).unwrap())));
        let loader = EmployeeLoader::new(client);
        assert!(loader.data().is_none());
        assert!(!loader.is_loaded());

        assert_eq!(loader.fetch_all().await.unwrap(), FetchOutcome::Updated);
        assert!(!loader.loading());
        assert_eq!(loader.data().unwrap().len(), 4);

        // Re-fetching overwrites rather than appending
        loader.fetch_all().await.unwrap();
        assert_eq!(loader.data().unwrap().len(), 4);
    }
}
