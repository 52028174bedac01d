//! View coordination between the paginated and employee-scoped views
//!
//! The coordinator is the only writer of the view selection. Every
//! transition invalidates the inactive loader before fetching into the
//! active one, so at most one transaction cache holds data.

use serde::Serialize;

use crate::client::ClientRef;
use crate::error::{CoreError, CoreResult, ErrorDetails};
use crate::loaders::{EmployeeLoader, EmployeeTransactionLoader, FetchOutcome, PaginatedTransactionLoader};
use crate::models::{Employee, Transaction, EMPTY_EMPLOYEE_ID};

/// Which transactions the user asked to see
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "mode", content = "employee_id", rename_all = "snake_case")]
pub enum ViewSelection {
    /// No filter: paginated list of every transaction
    #[default]
    All,
    /// Every transaction of one employee
    ByEmployee(String),
}

impl ViewSelection {
    /// Id to preselect in the filter; the sentinel for `All`
    pub fn employee_id(&self) -> &str {
        match self {
            ViewSelection::All => EMPTY_EMPLOYEE_ID,
            ViewSelection::ByEmployee(id) => id,
        }
    }
}

/// Everything the presentation layer renders
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    pub selection: ViewSelection,
    pub employees: Option<Vec<Employee>>,
    pub employees_loading: bool,
    pub transactions: Option<Vec<Transaction>>,
    pub transactions_loading: bool,
    pub paginated_loading: bool,
    pub can_view_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
}

pub struct ViewCoordinator {
    employees: EmployeeLoader,
    paginated: PaginatedTransactionLoader,
    by_employee: EmployeeTransactionLoader,
    selection: ViewSelection,
    last_error: Option<ErrorDetails>,
}

impl ViewCoordinator {
    pub fn new(client: ClientRef) -> Self {
        Self::with_loaders(
            EmployeeLoader::new(client.clone()),
            PaginatedTransactionLoader::new(client.clone()),
            EmployeeTransactionLoader::new(client),
        )
    }

    pub fn with_loaders(
        employees: EmployeeLoader,
        paginated: PaginatedTransactionLoader,
        by_employee: EmployeeTransactionLoader,
    ) -> Self {
        Self {
            employees,
            paginated,
            by_employee,
            selection: ViewSelection::All,
            last_error: None,
        }
    }

    // ==================== Transitions ====================

    /// First mount: load everything unless employees are loaded or loading
    pub async fn bootstrap(&mut self) -> CoreResult<()> {
        if self.employees.is_loaded() || self.employees.loading() {
            return Ok(());
        }
        log::info!("Bootstrapping transaction view");
        self.load_all().await
    }

    /// Bootstrap and "view more": load employees if needed, drop any
    /// employee-scoped result, then advance the paginated loader.
    pub async fn load_all(&mut self) -> CoreResult<()> {
        self.selection = ViewSelection::All;
        self.by_employee.invalidate_data();

        if !self.employees.is_loaded() {
            let result = self.employees.fetch_all().await;
            self.record(result)?;
        }

        let result = self.paginated.fetch_all().await;
        self.record(result)
    }

    /// Filter callback. `None` and blank ids are ignored; the sentinel id
    /// selects "no filter".
    pub async fn on_filter_change(&mut self, employee_id: Option<&str>) -> CoreResult<()> {
        match employee_id {
            Some(EMPTY_EMPLOYEE_ID) => self.select_all().await,
            Some(id) if !id.trim().is_empty() => self.select_employee(id).await,
            _ => {
                log::debug!("Ignoring empty filter selection: {:?}", employee_id);
                Ok(())
            }
        }
    }

    /// Switch to the unfiltered view. Already unfiltered with data loaded is a no-op.
    pub async fn select_all(&mut self) -> CoreResult<()> {
        if self.selection == ViewSelection::All && self.paginated.has_data() {
            return Ok(());
        }

        log::info!("Showing all transactions");
        self.selection = ViewSelection::All;
        self.by_employee.invalidate_data();

        let result = self.paginated.fetch_all().await;
        self.record(result)
    }

    /// Switch to the transactions of one employee. A blank or sentinel id is
    /// rejected before any state changes.
    pub async fn select_employee(&mut self, employee_id: &str) -> CoreResult<()> {
        if employee_id.trim().is_empty() {
            return Err(CoreError::InvalidEmployeeId);
        }
        log::info!("Filtering transactions by employee {}", employee_id);
        self.selection = ViewSelection::ByEmployee(employee_id.to_string());
        self.paginated.invalidate_data();

        let result = self.by_employee.fetch_by_id(employee_id).await;
        self.record(result)
    }

    fn record(&mut self, result: CoreResult<FetchOutcome>) -> CoreResult<()> {
        match result {
            Ok(outcome) => {
                if outcome != FetchOutcome::Updated {
                    log::debug!("Fetch finished without update: {:?}", outcome);
                }
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                log::log!(target: "rampview::error", e.severity().log_level(), "[{}] {}", e.code(), e);
                self.last_error = Some(e.to_details());
                Err(e)
            }
        }
    }

    // ==================== Derived state ====================

    pub fn selection(&self) -> &ViewSelection {
        &self.selection
    }

    /// Paginated result if present, else the employee-scoped result
    pub fn current_transactions(&self) -> Option<Vec<Transaction>> {
        self.paginated
            .data()
            .map(|page| page.data)
            .or_else(|| self.by_employee.data())
    }

    /// "View more" is offered only for the paginated view with a next page
    pub fn can_view_more(&self) -> bool {
        self.paginated.has_data() && self.paginated.has_next_page()
    }

    /// Both transaction caches populated at once is a bug state
    pub fn is_consistent(&self) -> bool {
        !(self.paginated.has_data() && self.by_employee.has_data())
    }

    pub fn employees(&self) -> Option<Vec<Employee>> {
        self.employees.data()
    }

    pub fn last_error(&self) -> Option<&ErrorDetails> {
        self.last_error.as_ref()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        debug_assert!(self.is_consistent(), "both transaction caches are populated");
        ViewSnapshot {
            selection: self.selection.clone(),
            employees: self.employees.data(),
            employees_loading: self.employees.loading(),
            transactions: self.current_transactions(),
            transactions_loading: self.paginated.loading() || self.by_employee.loading(),
            paginated_loading: self.paginated.loading(),
            can_view_more: self.can_view_more(),
            error: self.last_error.clone(),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{InMemoryBackend, TransactionBackend};
    use crate::client::DataClient;
    use crate::error::ErrorCode;
    use crate::models::{MockData, PageCursor, PaginatedResponse};
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// 8 transactions, 2 of them by "emp-e"
    fn scenario_data() -> MockData {
        let e = Employee::new("emp-e", "Erin", "Evans");
        let f = Employee::new("emp-f", "Frank", "Fisher");
        let transactions = (1..=8)
            .map(|i| Transaction {
                id: format!("t{}", i),
                amount: Decimal::new(i * 100, 2),
                merchant: format!("Merchant {}", i),
                employee: if i == 3 || i == 7 { e.clone() } else { f.clone() },
                date: "2024-01-15".to_string(),
                approved: false,
            })
            .collect();
        MockData { employees: vec![e, f], transactions }
    }

    /// Wraps the in-memory backend with switches that fail every request,
    /// or only the employee directory
    struct FlakyBackend {
        inner: InMemoryBackend,
        failing: AtomicBool,
        failing_employees: AtomicBool,
    }

    impl FlakyBackend {
        fn check(&self) -> CoreResult<()> {
            if self.failing.load(Ordering::SeqCst) {
                Err(CoreError::Backend { message: "connection reset".to_string() })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl TransactionBackend for FlakyBackend {
        async fn list_employees(&self) -> CoreResult<Vec<Employee>> {
            self.check()?;
            if self.failing_employees.load(Ordering::SeqCst) {
                return Err(CoreError::Backend { message: "directory unavailable".to_string() });
            }
            self.inner.list_employees().await
        }

        async fn list_transactions(
            &self,
            page: Option<PageCursor>,
        ) -> CoreResult<PaginatedResponse<Vec<Transaction>>> {
            self.check()?;
            self.inner.list_transactions(page).await
        }

        async fn list_transactions_by_employee(&self, employee_id: &str) -> CoreResult<Vec<Transaction>> {
            self.check()?;
            self.inner.list_transactions_by_employee(employee_id).await
        }
    }

    fn flaky() -> Arc<FlakyBackend> {
        Arc::new(FlakyBackend {
            inner: InMemoryBackend::new(scenario_data(), 5),
            failing: AtomicBool::new(false),
            failing_employees: AtomicBool::new(false),
        })
    }

    fn coordinator_over(backend: Arc<FlakyBackend>) -> ViewCoordinator {
        ViewCoordinator::new(Arc::new(DataClient::uncached(backend)))
    }

    fn coordinator() -> ViewCoordinator {
        coordinator_over(flaky())
    }

    fn shown_ids(coordinator: &ViewCoordinator) -> Vec<String> {
        coordinator
            .current_transactions()
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.id)
            .collect()
    }

    #[tokio::test]
    async fn test_initial_state() {
        let coordinator = coordinator();
        assert_eq!(coordinator.selection(), &ViewSelection::All);
        assert!(coordinator.current_transactions().is_none());
        assert!(!coordinator.can_view_more());
        assert!(coordinator.employees().is_none());
    }

    #[tokio::test]
    async fn test_fresh_load_then_view_more() {
        let mut coordinator = coordinator();

        coordinator.bootstrap().await.unwrap();
        assert_eq!(coordinator.employees().unwrap().len(), 2);
        assert_eq!(shown_ids(&coordinator).len(), 5);
        assert!(coordinator.can_view_more());

        coordinator.load_all().await.unwrap();
        assert_eq!(shown_ids(&coordinator), vec!["t1", "t2", "t3", "t4", "t5", "t6", "t7", "t8"]);
        assert!(!coordinator.can_view_more());
        assert!(coordinator.is_consistent());
    }

    #[tokio::test]
    async fn test_bootstrap_runs_once() {
        let mut coordinator = coordinator();
        coordinator.bootstrap().await.unwrap();
        coordinator.bootstrap().await.unwrap();
        assert_eq!(shown_ids(&coordinator).len(), 5);
    }

    #[tokio::test]
    async fn test_select_employee() {
        let mut coordinator = coordinator();
        coordinator.bootstrap().await.unwrap();
        assert!(coordinator.can_view_more());

        coordinator.on_filter_change(Some("emp-e")).await.unwrap();
        assert_eq!(coordinator.selection(), &ViewSelection::ByEmployee("emp-e".to_string()));
        assert_eq!(shown_ids(&coordinator), vec!["t3", "t7"]);
        assert!(!coordinator.can_view_more());
        assert!(coordinator.is_consistent());
    }

    #[tokio::test]
    async fn test_select_employee_then_no_filter() {
        let mut coordinator = coordinator();
        coordinator.bootstrap().await.unwrap();
        coordinator.load_all().await.unwrap();

        coordinator.on_filter_change(Some("emp-e")).await.unwrap();
        coordinator.on_filter_change(Some(EMPTY_EMPLOYEE_ID)).await.unwrap();

        assert_eq!(coordinator.selection(), &ViewSelection::All);
        assert_eq!(shown_ids(&coordinator), vec!["t1", "t2", "t3", "t4", "t5"]);
        assert!(coordinator.can_view_more());
        assert!(coordinator.is_consistent());
    }

    #[tokio::test]
    async fn test_view_more_after_filter_drops_employee_view() {
        let mut coordinator = coordinator();
        coordinator.bootstrap().await.unwrap();
        coordinator.select_employee("emp-e").await.unwrap();

        coordinator.load_all().await.unwrap();
        assert_eq!(coordinator.selection(), &ViewSelection::All);
        assert_eq!(shown_ids(&coordinator), vec!["t1", "t2", "t3", "t4", "t5"]);
        assert!(coordinator.is_consistent());
    }

    #[tokio::test]
    async fn test_none_selection_is_noop() {
        let mut coordinator = coordinator();
        coordinator.bootstrap().await.unwrap();
        coordinator.on_filter_change(None).await.unwrap();
        assert_eq!(shown_ids(&coordinator).len(), 5);
        assert_eq!(coordinator.selection(), &ViewSelection::All);
    }

    #[tokio::test]
    async fn test_blank_employee_id_is_noop() {
        let mut coordinator = coordinator();
        coordinator.bootstrap().await.unwrap();

        coordinator.on_filter_change(Some("   ")).await.unwrap();
        assert_eq!(coordinator.selection(), &ViewSelection::All);
        assert_eq!(shown_ids(&coordinator).len(), 5);
        assert!(coordinator.can_view_more());
        assert!(coordinator.last_error().is_none());

        let err = coordinator.select_employee("").await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidEmployeeId));
        assert_eq!(shown_ids(&coordinator).len(), 5);
    }

    #[tokio::test]
    async fn test_employee_failure_does_not_advance_pages() {
        let backend = flaky();
        let mut coordinator = coordinator_over(backend.clone());

        backend.failing_employees.store(true, Ordering::SeqCst);
        assert!(coordinator.bootstrap().await.is_err());
        assert!(coordinator.current_transactions().is_none());
        assert!(!coordinator.employees.loading());

        coordinator.select_all().await.unwrap();
        assert_eq!(shown_ids(&coordinator).len(), 5);

        let err = coordinator.load_all().await.unwrap_err();
        assert!(matches!(err, CoreError::Backend { .. }));
        assert_eq!(shown_ids(&coordinator), vec!["t1", "t2", "t3", "t4", "t5"]);
        assert!(coordinator.can_view_more());
        assert!(!coordinator.snapshot().paginated_loading);
    }

    #[tokio::test]
    async fn test_no_filter_while_unfiltered_keeps_pages() {
        let mut coordinator = coordinator();
        coordinator.bootstrap().await.unwrap();
        coordinator.on_filter_change(Some(EMPTY_EMPLOYEE_ID)).await.unwrap();
        assert_eq!(shown_ids(&coordinator).len(), 5);
    }

    #[tokio::test]
    async fn test_failure_keeps_stale_list_and_records_error() {
        let backend = flaky();
        let mut coordinator = coordinator_over(backend.clone());
        coordinator.bootstrap().await.unwrap();

        backend.failing.store(true, Ordering::SeqCst);
        let err = coordinator.load_all().await.unwrap_err();
        assert!(matches!(err, CoreError::Backend { .. }));

        let snapshot = coordinator.snapshot();
        assert_eq!(snapshot.transactions.unwrap().len(), 5);
        assert!(!snapshot.transactions_loading);
        assert_eq!(snapshot.error.unwrap().code, ErrorCode::BackendError);

        backend.failing.store(false, Ordering::SeqCst);
        coordinator.load_all().await.unwrap();
        assert!(coordinator.last_error().is_none());
        assert_eq!(shown_ids(&coordinator).len(), 8);
    }

    #[tokio::test]
    async fn test_unknown_employee_reports_error() {
        let mut coordinator = coordinator();
        coordinator.bootstrap().await.unwrap();

        assert!(coordinator.on_filter_change(Some("emp-404")).await.is_err());
        assert_eq!(coordinator.last_error().unwrap().code, ErrorCode::EmployeeNotFound);
        assert!(coordinator.current_transactions().is_none());
        assert!(!coordinator.can_view_more());
    }

    #[tokio::test]
    async fn test_snapshot_serializes_selection() {
        let mut coordinator = coordinator();
        coordinator.bootstrap().await.unwrap();
        coordinator.select_employee("emp-e").await.unwrap();

        let json = serde_json::to_value(coordinator.snapshot()).unwrap();
        assert_eq!(json["selection"]["mode"], "by_employee");
        assert_eq!(json["selection"]["employee_id"], "emp-e");
        assert_eq!(json["can_view_more"], false);
        assert!(json.get("error").is_none());
    }
}
