//! Transactions page rendering
//!
//! Helper functions:
//! - render_transactions_panel: Filter form plus list
//! - render_transaction_list: Paginated list fragment

use finboard_core::{Dashboard, DateRange, QueryResult, Selection, SortDirection, Transaction};
use finboard_utils::{escape_html, format_date};

use crate::AppState;

/// Transactions page - filters, summary line and list
pub async fn page_transactions(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let dashboard = state.dashboard.read().await;
    let totals = dashboard.transaction_totals();

    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-4'>
            <h2 class='text-2xl font-bold'>Transactions</h2>
        </div>
        <div class='grid grid-cols-2 md:grid-cols-3 gap-3 mb-4'>
            <div class='bg-green-50 p-3 rounded-lg border border-green-100'><p class='text-xs text-green-600'>Income</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-red-50 p-3 rounded-lg border border-red-100'><p class='text-xs text-red-600'>Expenses</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-indigo-50 p-3 rounded-lg border border-indigo-100'><p class='text-xs text-indigo-600'>Net</p><p class='text-xl font-bold'>{}</p></div>
        </div>
        {}"#,
        state.money(totals.total_income),
        state.money(totals.total_expenses),
        state.money(totals.net),
        render_transactions_panel(&state, &dashboard)
    );

    axum::response::Html(crate::page_response(&headers, "Transactions", "/transactions", &inner_content))
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        "<option value='{}' {}>{}</option>",
        escape_html(value),
        if selected { "selected" } else { "" },
        escape_html(label)
    )
}

fn selection_options(all_label: &str, values: &[String], current: &Selection) -> String {
    let mut html = option(all_label, all_label, current.is_all());
    for value in values {
        html.push_str(&option(value, value, current.matches(value) && !current.is_all()));
    }
    html
}

/// Filter form and the current list, swapped as a whole by the reset button
pub fn render_transactions_panel(state: &AppState, dashboard: &Dashboard) -> String {
    let filter = &dashboard.transaction_filter;

    let range_options: String = DateRange::history_options()
        .iter()
        .map(|r| option(&r.key(), &r.label(), *r == filter.date_range))
        .collect();
    let sort_options = [
        option("desc", "Newest first", filter.sort_direction == SortDirection::Descending),
        option("asc", "Oldest first", filter.sort_direction == SortDirection::Ascending),
    ]
    .join("");

    let result = dashboard.visible_transactions(state.today());

    format!(
        r#"<div id='transactions-panel'>
        <form id='transaction-filters' class='flex flex-wrap gap-2 mb-4'
            hx-get='/transactions/list' hx-target='#transactions-content'
            hx-trigger='change, keyup changed delay:300ms from:input[name=q]'>
            <input type='text' name='q' value='{}' placeholder='Search transactions...' class='px-4 py-2 border rounded-lg w-64'>
            <select name='category' class='px-4 py-2 border rounded-lg'>{}</select>
            <select name='account' class='px-4 py-2 border rounded-lg'>{}</select>
            <select name='range' class='px-4 py-2 border rounded-lg'>{}</select>
            <select name='sort' class='px-4 py-2 border rounded-lg'>{}</select>
            <button type='button' hx-post='/transactions/reset' hx-target='#transactions-panel' hx-swap='outerHTML'
                class='px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200'>Reset</button>
        </form>
        <div id='transactions-content' class='bg-white rounded-xl shadow-sm p-6'>{}</div>
        </div>"#,
        escape_html(&filter.search_text),
        selection_options(dashboard.all_categories_label(), &dashboard.categories(), &filter.category),
        selection_options(dashboard.all_accounts_label(), &dashboard.accounts(), &filter.account),
        range_options,
        sort_options,
        render_transaction_list(state, &result, 0)
    )
}

/// One page of the visible transactions plus the "Showing N of M" line
pub fn render_transaction_list(state: &AppState, result: &QueryResult<Transaction>, offset: usize) -> String {
    if result.is_empty() {
        return format!(
            "<div class='text-center py-12 text-gray-500'><p>No transactions found</p><p class='text-sm'>{}</p></div>",
            result.showing_label("transactions")
        );
    }

    let limit = state.config.pagination.records_per_page.max(1);
    let offset = offset.min(result.count.saturating_sub(1));

    let mut html = String::from("<table class='w-full text-sm'><thead><tr class='text-left text-gray-500 border-b'><th class='py-2'>Date</th><th>Description</th><th>Category</th><th>Account</th><th>Status</th><th class='text-right'>Amount</th></tr></thead><tbody>");
    for tx in result.records.iter().skip(offset).take(limit) {
        let amount_color = if tx.is_income() { "text-green-600" } else { "text-red-600" };
        html.push_str(&format!(
            r#"<tr class='border-b hover:bg-gray-50'>
                <td class='py-2 text-gray-500'>{}</td>
                <td class='font-medium'>{}</td>
                <td>{}</td>
                <td class='text-gray-500'>{}</td>
                <td><span class='px-2 py-0.5 rounded text-xs bg-gray-100'>{}</span></td>
                <td class='text-right font-medium {}'>{}</td>
            </tr>"#,
            format_date(&tx.date),
            escape_html(&tx.description),
            escape_html(&tx.category),
            escape_html(&tx.account),
            tx.status,
            amount_color,
            finboard_utils::format_signed_currency(tx.signed_amount(), &state.config.currency)
        ));
    }
    html.push_str("</tbody></table>");

    let total_pages = result.count.div_ceil(limit);
    let current_page = offset / limit + 1;
    let mut pager = String::new();
    if current_page > 1 {
        pager.push_str(&format!(
            r#"<button hx-get='/transactions/list?offset={}' hx-target='#transactions-content' class='px-3 py-1 border rounded hover:bg-gray-100'>Previous</button>"#,
            offset.saturating_sub(limit)
        ));
    }
    if current_page < total_pages {
        pager.push_str(&format!(
            r#"<button hx-get='/transactions/list?offset={}' hx-target='#transactions-content' class='px-3 py-1 border rounded hover:bg-gray-100'>Next</button>"#,
            offset + limit
        ));
    }

    html.push_str(&format!(
        r#"<div class='mt-4 flex items-center justify-between'>
            <span class='text-sm text-gray-500'>{}</span>
            <div class='flex items-center gap-2'>{}</div>
        </div>"#,
        result.showing_label("transactions"),
        pager
    ));
    html
}
