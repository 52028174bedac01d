//! Employee filter dropdown
//!
//! Purely reactive: options come from the snapshot, and a change posts the
//! selected id to `/filter`, which swaps the transactions panel.

use rampview_core::{Employee, ViewSnapshot};
use rampview_utils::escape_html;

const FILTER_LABEL: &str = "Filter by employee";
const LOADING_LABEL: &str = "Loading employees";

/// Render the "Filter by employee" select
pub fn render_employee_filter(snapshot: &ViewSnapshot) -> String {
    if snapshot.employees_loading {
        return format!(
            r#"<div class='mb-4'><label class='block text-sm font-medium text-gray-600 mb-1'>{}</label>
            <div class='text-sm text-gray-400'>{}...</div></div>"#,
            FILTER_LABEL, LOADING_LABEL
        );
    }

    // No options until the directory is loaded
    let items: Vec<Employee> = match &snapshot.employees {
        None => vec![],
        Some(employees) => std::iter::once(Employee::empty()).chain(employees.iter().cloned()).collect(),
    };

    let selected_id = snapshot.selection.employee_id();
    let mut options = String::new();
    for employee in &items {
        let selected = if employee.id == selected_id { " selected" } else { "" };
        options.push_str(&format!(
            "<option value='{}'{}>{}</option>",
            escape_html(&employee.id),
            selected,
            escape_html(&employee.display_name())
        ));
    }

    format!(
        r#"<div class='mb-4'>
            <label for='employee-filter' class='block text-sm font-medium text-gray-600 mb-1'>{}</label>
            <select id='employee-filter' name='employee_id' class='px-3 py-2 border rounded-lg bg-white min-w-[240px]'
                hx-post='/filter' hx-trigger='change' hx-target='#transactions-panel' hx-swap='outerHTML'{}>
                {}
            </select>
        </div>"#,
        FILTER_LABEL,
        if items.is_empty() { " disabled" } else { "" },
        options
    )
}
