//! Employee-scoped transaction loader

use crate::client::ClientRef;
use crate::error::{CoreError, CoreResult};
use crate::models::{Transaction, EMPTY_EMPLOYEE_ID};

use super::{FetchOutcome, LoaderSlot};

/// Loads every transaction of a single employee. Each fetch replaces the
/// stored list.
pub struct EmployeeTransactionLoader {
    client: ClientRef,
    slot: LoaderSlot<Vec<Transaction>>,
}

impl EmployeeTransactionLoader {
    pub fn new(client: ClientRef) -> Self {
        Self {
            client,
            slot: LoaderSlot::new(),
        }
    }

    pub async fn fetch_by_id(&self, employee_id: &str) -> CoreResult<FetchOutcome> {
        if employee_id == EMPTY_EMPLOYEE_ID || employee_id.trim().is_empty() {
            return Err(CoreError::InvalidEmployeeId);
        }

        let generation = self.slot.begin_latest();

        match self.client.transactions_by_employee(employee_id).await {
            Ok(transactions) => {
                log::debug!("Fetched {} transactions for employee {}", transactions.len(), employee_id);
                let outcome = self.slot.complete(generation, |data| *data = Some(transactions));
                if outcome == FetchOutcome::Stale {
                    log::debug!("Discarded stale transactions for employee {}", employee_id);
                }
                Ok(outcome)
            }
            Err(e) => {
                self.slot.fail(generation);
                Err(e)
            }
        }
    }

    pub fn invalidate_data(&self) {
        self.slot.invalidate();
    }

    pub fn loading(&self) -> bool {
        self.slot.loading()
    }

    pub fn data(&self) -> Option<Vec<Transaction>> {
        self.slot.data()
    }

    pub fn has_data(&self) -> bool {
        self.slot.has_data()
    }
}
