//! Transactions page rendering
//!
//! Endpoints:
//! - page_index: filter dropdown, transaction table and "View more"
//!
//! Helper functions:
//! - render_transactions_panel: table plus "View more" and error banner, the HTMX swap target
//! - render_transactions_table: table body for a transaction list

use crate::routes::employees::render_employee_filter;
use crate::{base_html, AppState};
use rampview_config::CurrencyConfig;
use rampview_core::{ErrorDetails, Transaction, ViewSnapshot};
use rampview_utils::{escape_html, format_amount};

/// Main page. Bootstraps the coordinator on first render.
pub async fn page_index(state: axum::extract::State<AppState>) -> axum::response::Html<String> {
    let mut coordinator = state.coordinator.lock().await;
    if let Err(e) = coordinator.bootstrap().await {
        log::warn!("Initial load failed: {}", e);
    }
    let snapshot = coordinator.snapshot();
    drop(coordinator);

    let content = format!(
        r#"<main class='max-w-4xl mx-auto p-6'>
            <h1 class='text-2xl font-bold mb-4'>Transactions</h1>
            <hr class='mb-6'>
            {}
            {}
        </main>"#,
        render_employee_filter(&snapshot),
        render_transactions_panel(&snapshot, &state.config.currency)
    );

    axum::response::Html(base_html("Transactions", &content))
}

/// The swappable panel: error banner, table, and the "View more" button
pub fn render_transactions_panel(snapshot: &ViewSnapshot, currency: &CurrencyConfig) -> String {
    let banner = snapshot.error.as_ref().map(render_error_banner).unwrap_or_default();

    let view_more = if snapshot.can_view_more {
        format!(
            r#"<button class='mt-4 px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'
                hx-post='/transactions/more' hx-target='#transactions-panel' hx-swap='outerHTML'{}>View More</button>"#,
            if snapshot.paginated_loading { " disabled" } else { "" }
        )
    } else {
        String::new()
    };

    format!(
        "<div id='transactions-panel'>{}{}{}</div>",
        banner,
        render_transactions_table(snapshot.transactions.as_deref(), currency),
        view_more
    )
}

/// `None` means nothing loaded yet
pub fn render_transactions_table(transactions: Option<&[Transaction]>, currency: &CurrencyConfig) -> String {
    let Some(transactions) = transactions else {
        return r#"<div class='text-center py-12 text-gray-500'>Loading...</div>"#.to_string();
    };

    if transactions.is_empty() {
        return r#"<div class='text-center py-12 text-gray-500'><p>No transactions</p></div>"#.to_string();
    }

    let mut html = String::from(
        "<table class='w-full text-sm'><thead><tr class='text-left text-gray-500 border-b'>\
         <th class='py-2'>Merchant</th><th>Employee</th><th>Date</th><th class='text-right'>Amount</th><th class='text-center'>Approved</th>\
         </tr></thead><tbody>",
    );
    for tx in transactions {
        html.push_str(&render_transaction_row(tx, currency));
    }
    html.push_str("</tbody></table>");
    html
}

fn render_transaction_row(tx: &Transaction, currency: &CurrencyConfig) -> String {
    format!(
        r#"<tr class='border-b hover:bg-gray-50' id='tx-{}'><td class='py-2 font-medium'>{}</td><td>{}</td><td class='text-gray-500'>{}</td><td class='text-right'>{}</td><td class='text-center'><input type='checkbox' disabled{}></td></tr>"#,
        escape_html(&tx.id),
        escape_html(&tx.merchant),
        escape_html(&tx.employee.display_name()),
        escape_html(&tx.display_date()),
        format_amount(tx.amount, &currency.symbol, currency.decimal_places),
        if tx.approved { " checked" } else { "" }
    )
}

fn render_error_banner(error: &ErrorDetails) -> String {
    let hint = error
        .suggestions
        .first()
        .map(|s| format!("<div class='text-xs mt-1'>{}</div>", escape_html(s)))
        .unwrap_or_default();
    format!(
        "<div class='mb-4 p-3 rounded-lg border border-red-200 bg-red-50 text-red-700' role='alert'>{}{}</div>",
        escape_html(&error.message),
        hint
    )
}
