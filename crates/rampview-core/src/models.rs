//! Core data models: employees, transactions and paginated responses

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Id of the "no filter" placeholder employee
pub const EMPTY_EMPLOYEE_ID: &str = "";

/// Employee information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Employee {
    pub fn new(id: impl Into<String>, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// The sentinel shown as "All Employees" in the filter. Never a backend entity.
    pub fn empty() -> Self {
        Self::new(EMPTY_EMPLOYEE_ID, "All", "Employees")
    }

    /// Check if this is the "no filter" sentinel
    pub fn is_empty_employee(&self) -> bool {
        self.id == EMPTY_EMPLOYEE_ID
    }

    /// "First Last"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Transaction information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: String,
    pub amount: Decimal,
    /// Merchant or description
    pub merchant: String,
    /// Employee who made the transaction
    pub employee: Employee,
    /// Transaction date (YYYY-MM-DD format)
    pub date: String,
    /// Approval state at fetch time
    #[serde(default)]
    pub approved: bool,
}

impl Transaction {
    /// Get the transaction date as NaiveDate
    pub fn date_naive(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Date formatted for display, e.g. "Mar 04, 2024". Falls back to the raw value.
    pub fn display_date(&self) -> String {
        self.date_naive()
            .map(|d| d.format("%b %d, %Y").to_string())
            .unwrap_or_else(|| self.date.clone())
    }

    pub fn belongs_to(&self, employee_id: &str) -> bool {
        self.employee.id == employee_id
    }
}

/// Where the next paginated fetch resumes (zero-based page index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageCursor(pub usize);

impl PageCursor {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for PageCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A page of results plus the cursor of the page after it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: T,
    /// `None` when there are no further pages
    pub next_page: Option<PageCursor>,
}

impl<T> PaginatedResponse<T> {
    pub fn has_next_page(&self) -> bool {
        self.next_page.is_some()
    }
}

impl PaginatedResponse<Vec<Transaction>> {
    /// Append a newer page onto this accumulated result
    pub fn merge(&mut self, page: PaginatedResponse<Vec<Transaction>>) {
        self.data.extend(page.data);
        self.next_page = page.next_page;
    }
}

/// Backing data set for the in-memory backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MockData {
    pub employees: Vec<Employee>,
    pub transactions: Vec<Transaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(id: &str, employee: &Employee) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount: Decimal::new(1250, 2),
            merchant: "Coffee Works".to_string(),
            employee: employee.clone(),
            date: "2024-03-04".to_string(),
            approved: false,
        }
    }

    #[test]
    fn test_empty_employee() {
        let empty = Employee::empty();
        assert!(empty.is_empty_employee());
        assert_eq!(empty.display_name(), "All Employees");
        assert!(!Employee::new("emp-1", "James", "Smith").is_empty_employee());
    }

    #[test]
    fn test_transaction_dates() {
        let employee = Employee::new("emp-1", "James", "Smith");
        let mut tx = txn("txn-1", &employee);
        assert_eq!(tx.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 4));
        assert_eq!(tx.display_date(), "Mar 04, 2024");

        tx.date = "someday".to_string();
        assert!(tx.date_naive().is_none());
        assert_eq!(tx.display_date(), "someday");
    }

    #[test]
    fn test_merge_appends_in_order() {
        let employee = Employee::new("emp-1", "James", "Smith");
        let mut acc = PaginatedResponse {
            data: vec![txn("a", &employee), txn("b", &employee)],
            next_page: Some(PageCursor(1)),
        };
        acc.merge(PaginatedResponse {
            data: vec![txn("c", &employee)],
            next_page: None,
        });

        let ids: Vec<_> = acc.data.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(!acc.has_next_page());
    }

    #[test]
    fn test_transaction_from_camel_case_json() {
        let tx: Transaction = serde_json::from_str(
            r#"{"id":"txn-1","amount":42.5,"merchant":"Hotel Alpha",
                "employee":{"id":"emp-2","firstName":"Mary","lastName":"Johnson"},
                "date":"2024-01-02"}"#,
        )
        .unwrap();
        assert_eq!(tx.amount, Decimal::new(425, 1));
        assert!(tx.belongs_to("emp-2"));
        assert!(!tx.approved);
    }
}
