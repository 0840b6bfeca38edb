//! Payables and receivables page rendering

use finboard_core::{PayableReceivable, SettlementStatus, SettlementSummary};
use finboard_utils::{escape_html, format_date};

use crate::AppState;

fn status_badge(status: Option<SettlementStatus>) -> &'static str {
    match status {
        Some(SettlementStatus::Pending) => "bg-yellow-100 text-yellow-700",
        Some(SettlementStatus::Paid) => "bg-green-100 text-green-700",
        Some(SettlementStatus::Overdue) => "bg-red-100 text-red-700",
        Some(SettlementStatus::Partial) => "bg-blue-100 text-blue-700",
        None => "bg-gray-100 text-gray-700",
    }
}

fn render_table(state: &AppState, title: &str, items: &[PayableReceivable], summary: &SettlementSummary) -> String {
    let mut rows = String::new();
    for item in items {
        rows.push_str(&format!(
            r#"<tr class='border-b hover:bg-gray-50'>
                <td class='py-2 font-medium'>{}</td>
                <td class='text-gray-500'>{}</td>
                <td>{}</td>
                <td><span class='px-2 py-0.5 rounded text-xs {}'>{}</span></td>
                <td class='text-right font-medium'>{}</td>
            </tr>"#,
            escape_html(&item.description),
            escape_html(&item.entity),
            format_date(&item.due_date),
            status_badge(item.settlement_status()),
            escape_html(&item.status),
            state.money(item.amount)
        ));
    }
    if items.is_empty() {
        rows.push_str("<tr><td colspan='5' class='py-8 text-center text-gray-500'>Nothing due in this period</td></tr>");
    }

    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6'>
            <div class='flex items-center justify-between mb-4'>
                <h3 class='text-lg font-semibold'>{}</h3>
                <div class='text-right text-sm'>
                    <p>Total: <span class='font-bold'>{}</span></p>
                    <p class='text-red-600'>Overdue: <span class='font-bold'>{}</span></p>
                </div>
            </div>
            <table class='w-full text-sm'>
                <thead><tr class='text-left text-gray-500 border-b'><th class='py-2'>Description</th><th>Entity</th><th>Due</th><th>Status</th><th class='text-right'>Amount</th></tr></thead>
                <tbody>{}</tbody>
            </table>
        </div>"#,
        title,
        state.money(summary.total_amount),
        state.money(summary.total_overdue),
        rows
    )
}

/// Payables and receivables page
pub async fn page_payables(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let dashboard = state.dashboard.read().await;
    let today = state.today();
    let payables = dashboard.visible_payables(today);
    let receivables = dashboard.visible_receivables(today);

    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Payables &amp; Receivables</h2><p class='text-sm text-gray-500'>{}</p></div>
        <div class='grid grid-cols-1 lg:grid-cols-2 gap-6'>{}{}</div>"#,
        dashboard.settlement_filter.date_range.label(),
        render_table(&state, "Payables", &payables.records, &dashboard.payables_summary()),
        render_table(&state, "Receivables", &receivables.records, &dashboard.receivables_summary())
    );

    axum::response::Html(crate::page_response(&headers, "Payables & Receivables", "/payables", &inner_content))
}
