//! Data loaders
//!
//! Each loader owns one cache slot and exposes `{loading, data}`. The slot
//! carries a request generation: invalidation bumps it, and a fetch whose
//! generation no longer matches when it resolves is discarded.

pub mod by_employee;
pub mod employees;
pub mod paginated;

pub use by_employee::EmployeeTransactionLoader;
pub use employees::EmployeeLoader;
pub use paginated::PaginatedTransactionLoader;

use serde::Serialize;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// What a completed fetch did to the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchOutcome {
    /// The response was stored
    Updated,
    /// The loader was invalidated or re-issued while the request was in flight
    Stale,
    /// No next page to fetch
    Exhausted,
    /// A fetch for the same generation is already running
    Busy,
}

#[derive(Debug)]
struct SlotState<T> {
    data: Option<T>,
    loading: bool,
    generation: u64,
}

/// A loader's cache slot
#[derive(Debug)]
pub(crate) struct LoaderSlot<T> {
    state: RwLock<SlotState<T>>,
}

impl<T: Clone> LoaderSlot<T> {
    pub(crate) fn new() -> Self {
        Self {
            state: RwLock::new(SlotState {
                data: None,
                loading: false,
                generation: 0,
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SlotState<T>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SlotState<T>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn data(&self) -> Option<T> {
        self.read().data.clone()
    }

    /// Borrow the data without cloning it
    pub(crate) fn inspect<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        f(self.read().data.as_ref())
    }

    pub(crate) fn has_data(&self) -> bool {
        self.read().data.is_some()
    }

    pub(crate) fn loading(&self) -> bool {
        self.read().loading
    }

    /// Start a request that supersedes any request still in flight
    pub(crate) fn begin_latest(&self) -> u64 {
        let mut state = self.write();
        state.generation += 1;
        state.loading = true;
        state.generation
    }

    /// Start a request against the current generation, deriving its input
    /// from the current data. `plan` returns `Err(outcome)` to skip the request.
    pub(crate) fn begin_with<I>(
        &self,
        plan: impl FnOnce(&Option<T>) -> Result<I, FetchOutcome>,
    ) -> Result<(u64, I), FetchOutcome> {
        let mut state = self.write();
        if state.loading {
            return Err(FetchOutcome::Busy);
        }
        let input = plan(&state.data)?;
        state.loading = true;
        Ok((state.generation, input))
    }

    /// Apply a response if `generation` is still current
    pub(crate) fn complete(&self, generation: u64, apply: impl FnOnce(&mut Option<T>)) -> FetchOutcome {
        let mut state = self.write();
        if state.generation != generation {
            return FetchOutcome::Stale;
        }
        apply(&mut state.data);
        state.loading = false;
        FetchOutcome::Updated
    }

    /// Record a failed request; data is left untouched
    pub(crate) fn fail(&self, generation: u64) {
        let mut state = self.write();
        if state.generation == generation {
            state.loading = false;
        }
    }

    /// Clear the data and orphan any request in flight
    pub(crate) fn invalidate(&self) {
        let mut state = self.write();
        state.data = None;
        state.loading = false;
        state.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_after_invalidate_is_stale() {
        let slot: LoaderSlot<Vec<u32>> = LoaderSlot::new();
        let generation = slot.begin_latest();
        assert!(slot.loading());

        slot.invalidate();
        assert!(!slot.loading());
        assert_eq!(slot.complete(generation, |d| *d = Some(vec![1])), FetchOutcome::Stale);
        assert!(slot.data().is_none());
    }

    #[test]
    fn test_latest_request_wins() {
        let slot: LoaderSlot<u32> = LoaderSlot::new();
        let first = slot.begin_latest();
        let second = slot.begin_latest();

        assert_eq!(slot.complete(second, |d| *d = Some(2)), FetchOutcome::Updated);
        assert_eq!(slot.complete(first, |d| *d = Some(1)), FetchOutcome::Stale);
        assert_eq!(slot.data(), Some(2));
    }

    #[test]
    fn test_failure_keeps_data() {
        let slot: LoaderSlot<u32> = LoaderSlot::new();
        let generation = slot.begin_latest();
        slot.complete(generation, |d| *d = Some(7));

        let generation = slot.begin_latest();
        slot.fail(generation);
        assert!(!slot.loading());
        assert_eq!(slot.inspect(|d| d.copied()), Some(7));
    }

    #[test]
    fn test_begin_with_rejects_concurrent_fetch() {
        let slot: LoaderSlot<u32> = LoaderSlot::new();
        assert!(slot.begin_with(|_| Ok(())).is_ok());
        assert_eq!(slot.begin_with(|_| Ok(())).unwrap_err(), FetchOutcome::Busy);
    }

    #[test]
    fn test_begin_with_skip_does_not_set_loading() {
        let slot: LoaderSlot<u32> = LoaderSlot::new();
        let skipped: Result<(u64, ()), _> = slot.begin_with(|_| Err(FetchOutcome::Exhausted));
        assert_eq!(skipped.unwrap_err(), FetchOutcome::Exhausted);
        assert!(!slot.loading());
    }
}
