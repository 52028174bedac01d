//! Paginated transaction loader
//!
//! Pages are appended onto the accumulated result in the order they are
//! fetched. The cursor lives inside the result: no result means the next
//! fetch requests the first page.

use crate::client::ClientRef;
use crate::error::CoreResult;
use crate::models::{PaginatedResponse, Transaction};

use super::{FetchOutcome, LoaderSlot};

pub type TransactionPage = PaginatedResponse<Vec<Transaction>>;

pub struct PaginatedTransactionLoader {
    client: ClientRef,
    slot: LoaderSlot<TransactionPage>,
}

impl PaginatedTransactionLoader {
    pub fn new(client: ClientRef) -> Self {
        Self {
            client,
            slot: LoaderSlot::new(),
        }
    }

    /// Fetch the page after the last one loaded and append it
    pub async fn fetch_all(&self) -> CoreResult<FetchOutcome> {
        let begun = self.slot.begin_with(|data| match data {
            None => Ok(None),
            Some(result) => result.next_page.map(Some).ok_or(FetchOutcome::Exhausted),
        });
        let (generation, cursor) = match begun {
            Ok(started) => started,
            Err(skipped) => {
                log::debug!("Paginated fetch skipped: {:?}", skipped);
                return Ok(skipped);
            }
        };

        match self.client.transactions_page(cursor).await {
            Ok(page) => {
                log::debug!(
                    "Fetched page {} with {} transactions (next: {:?})",
                    cursor.map(|c| c.index()).unwrap_or(0),
                    page.data.len(),
                    page.next_page
                );
                let outcome = self.slot.complete(generation, |data| {
                    *data = Some(match data.take() {
                        Some(mut accumulated) => {
                            accumulated.merge(page);
                            accumulated
                        }
                        None => page,
                    });
                });
                if outcome == FetchOutcome::Stale {
                    log::debug!("Discarded stale transaction page");
                }
                Ok(outcome)
            }
            Err(e) => {
                self.slot.fail(generation);
                Err(e)
            }
        }
    }

    /// Drop every loaded page; the next fetch starts from page one
    pub fn invalidate_data(&self) {
        self.slot.invalidate();
    }

    pub fn loading(&self) -> bool {
        self.slot.loading()
    }

    pub fn data(&self) -> Option<TransactionPage> {
        self.slot.data()
    }

    pub fn has_data(&self) -> bool {
        self.slot.has_data()
    }

    pub fn has_next_page(&self) -> bool {
        self.slot.inspect(|page| page.map_or(false, |p| p.has_next_page()))
    }
}
