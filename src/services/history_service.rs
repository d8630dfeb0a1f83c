use std::cmp::Ordering;

use tracing::{debug, error};

use crate::api::backend::BackendClient;
use crate::models::{Column, Direction, FilterState, SortDirection, SortState, Transaction};
use crate::utils::{format_amount, format_rate, Page, Table};

pub const EMPTY_HISTORY: &str = "No transactions found";

/// Filter and sort state of the history table
///
/// Rendered rows are always `sort(filter(snapshot))`, the snapshot itself is never touched.
#[derive(Debug, Clone, Default)]
pub struct HistoryView {
    pub filters: FilterState,
    pub sort: Option<SortState>,
    /// 1-based page of the rendered rows
    pub page: usize,
}

impl HistoryView {
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Default::default()
        }
    }

    pub fn set_search(&mut self, text: &str) {
        self.filters.search = text.to_string();
        self.page = 1;
    }

    pub fn set_date(&mut self, date: Option<String>) {
        self.filters.date = date;
        self.page = 1;
    }

    pub fn set_direction(&mut self, direction: Option<Direction>) {
        self.filters.direction = direction;
        self.page = 1;
    }

    /// Set the substring filter of `column`, an empty pattern removes it
    pub fn set_column_filter(&mut self, column: Column, pattern: &str) {
        if pattern.is_empty() {
            self.filters.columns.remove(&column);
        } else {
            self.filters.columns.insert(column, pattern.to_string());
        }
        self.page = 1;
    }

    /// Sort by `column`: same column flips direction, a new column starts ascending
    pub fn toggle_sort(&mut self, column: Column) {
        self.sort = match self.sort {
            Some(current) if current.column == column => Some(SortState {
                column,
                direction: current.direction.flipped(),
            }),
            _ => Some(SortState {
                column,
                direction: SortDirection::Asc,
            }),
        };
        self.page = 1;
    }

    /// Clear every filter and the sort key
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Whether `tx` passes every active predicate
    pub fn matches(&self, tx: &Transaction) -> bool {
        let filters = &self.filters;

        let search = filters.search.to_lowercase();
        if !search.is_empty() {
            let hit = [&tx.pair, &tx.bank1, &tx.bank2, &tx.transaction_number]
                .iter()
                .any(|field| field.to_lowercase().contains(&search));
            if !hit {
                return false;
            }
        }

        if let Some(date) = &filters.date {
            if &tx.date != date {
                return false;
            }
        }

        if let Some(direction) = filters.direction {
            if tx.direction != direction {
                return false;
            }
        }

        filters.columns.iter().all(|(column, pattern)| {
            let pattern = pattern.to_lowercase();
            pattern.is_empty() || column.text(tx).to_lowercase().contains(&pattern)
        })
    }

    /// Rows to display for `snapshot`, in display order
    pub fn apply<'a>(&self, snapshot: &'a [Transaction]) -> Vec<&'a Transaction> {
        let mut rows: Vec<&Transaction> = snapshot.iter().filter(|tx| self.matches(tx)).collect();

        if let Some(sort) = self.sort {
            // Stable, ties keep their filtered order
            rows.sort_by(|a, b| {
                let ordering = compare(a, b, sort.column);
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        rows
    }

    /// Header label with sort arrow and active-filter marker
    pub fn header_label(&self, column: Column) -> String {
        let mut label = column.header().to_string();
        if let Some(sort) = self.sort {
            if sort.column == column {
                label.push(' ');
                label.push_str(sort.direction.arrow());
            }
        }
        if self.filters.columns.contains_key(&column) {
            label.push('*');
        }
        label
    }

    /// One-line summary of the active filters and sort key
    pub fn describe(&self) -> String {
        if self.filters.is_empty() && self.sort.is_none() {
            return "No filters".to_string();
        }

        let filters = &self.filters;
        let mut parts = Vec::new();
        if !filters.search.is_empty() {
            parts.push(format!("search \"{}\"", filters.search));
        }
        if let Some(date) = &filters.date {
            parts.push(format!("date {}", date));
        }
        if let Some(direction) = filters.direction {
            parts.push(format!("direction {}", direction));
        }
        for (column, pattern) in &filters.columns {
            parts.push(format!("{} ~ \"{}\"", column.key(), pattern));
        }
        if let Some(sort) = self.sort {
            let dir = match sort.direction {
                SortDirection::Asc => "asc",
                SortDirection::Desc => "desc",
            };
            parts.push(format!("sorted by {} {}", sort.column.key(), dir));
        }

        parts.join(", ")
    }
}

/// Compare two transactions on `column`
///
/// Numeric columns compare as floats, everything else case-insensitively.
fn compare(a: &Transaction, b: &Transaction, column: Column) -> Ordering {
    if column.is_numeric() {
        let left = column.number(a).unwrap_or(f64::NAN);
        let right = column.number(b).unwrap_or(f64::NAN);
        left.partial_cmp(&right).unwrap_or(Ordering::Equal)
    } else {
        column
            .text(a)
            .to_lowercase()
            .cmp(&column.text(b).to_lowercase())
    }
}

/// Fetch the full transaction collection for client-side filtering
pub async fn load_snapshot(client: &BackendClient) -> Result<Vec<Transaction>, String> {
    match client.list_transactions().await {
        Ok(rows) => {
            debug!("Loaded {} transactions", rows.len());
            Ok(rows)
        }
        Err(e) => {
            error!("Failed to load transactions: {}", e);
            Err("Error loading history".to_string())
        }
    }
}

/// Cell text of `column` as shown in the table
pub fn display_cell(tx: &Transaction, column: Column) -> String {
    match column {
        Column::Rate => format_rate(tx.rate),
        Column::AmountBase => format_amount(tx.amount_base),
        Column::AmountCounter => format_amount(tx.amount_counter),
        other => other.text(tx),
    }
}

/// Render the current page of the history table
pub fn render_history(view: &HistoryView, snapshot: &[Transaction], page_size: usize) -> String {
    let rows = view.apply(snapshot);
    let page = Page::new(rows.len(), page_size, view.page);

    let headers: Vec<String> = Column::ALL.iter().map(|c| view.header_label(*c)).collect();
    let mut table = Table::new(&headers);
    table.set_placeholder(EMPTY_HISTORY);

    for tx in &rows[page.range()] {
        table.add_row(Column::ALL.iter().map(|c| display_cell(tx, *c)).collect());
    }

    let mut output = String::from("📋 Transaction History\n");
    output.push_str(&format!("{}\n\n", view.describe()));
    output.push_str(&table.render());
    output.push_str(&format!(
        "\n{} of {} loaded",
        page.footer("matching"),
        snapshot.len()
    ));
    if !page.is_first() {
        output.push_str(" | `prev` for the previous page");
    }
    if !page.is_last() {
        output.push_str(" | `next` for more");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(number: &str, date: &str, direction: Direction, pair: &str, bank1: &str, rate: f64) -> Transaction {
        Transaction {
            id: None,
            transaction_number: number.to_string(),
            date: date.to_string(),
            time: "10:00".to_string(),
            bank1: bank1.to_string(),
            bank2: "HSBC".to_string(),
            pair: pair.to_string(),
            rate,
            direction,
            amount_base: 1000.0,
            amount_counter: 1000.0 * rate,
            deal_type: None,
            local_code_role: None,
            currency1: None,
            currency2: None,
        }
    }

    fn snapshot() -> Vec<Transaction> {
        vec![
            tx("TRX-000001-1001", "2024-01-01", Direction::Buy, "EUR/USD", "Citi", 1.08),
            tx("TRX-000002-1002", "2024-01-02", Direction::Sell, "USD/JPY", "UBS", 148.2),
            tx("TRX-000003-1003", "2024-01-01", Direction::Sell, "eur/gbp", "citi", 0.86),
        ]
    }

    fn numbers(rows: &[&Transaction]) -> Vec<String> {
        rows.iter().map(|t| t.transaction_number.clone()).collect()
    }

    #[test]
    fn test_date_filter_keeps_original_order() {
        let data = snapshot();
        let mut view = HistoryView::new();
        view.set_date(Some("2024-01-01".to_string()));

        assert_eq!(
            numbers(&view.apply(&data)),
            vec!["TRX-000001-1001", "TRX-000003-1003"]
        );
    }

    #[test]
    fn test_search_is_case_insensitive_over_pair_banks_and_number() {
        let data = snapshot();
        let mut view = HistoryView::new();

        view.set_search("EUR");
        assert_eq!(view.apply(&data).len(), 2);

        view.set_search("CITI");
        assert_eq!(view.apply(&data).len(), 2);

        view.set_search("hsbc");
        assert_eq!(view.apply(&data).len(), 3);

        view.set_search("000002");
        assert_eq!(numbers(&view.apply(&data)), vec!["TRX-000002-1002"]);

        // Direction is not a search field
        view.set_search("sell");
        assert!(view.apply(&data).is_empty());
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let data = snapshot();
        let mut view = HistoryView::new();
        view.set_search("citi");
        view.set_direction(Some(Direction::Sell));

        let rows = view.apply(&data);
        assert_eq!(numbers(&rows), vec!["TRX-000003-1003"]);

        // Every row outside the output fails at least one predicate
        for row in &data {
            let shown = rows.iter().any(|r| r.transaction_number == row.transaction_number);
            assert_eq!(shown, view.matches(row));
        }
    }

    #[test]
    fn test_column_filter_matches_number_text() {
        let data = snapshot();
        let mut view = HistoryView::new();
        view.set_column_filter(Column::Rate, "148");
        assert_eq!(numbers(&view.apply(&data)), vec!["TRX-000002-1002"]);

        view.set_column_filter(Column::Rate, "");
        assert!(view.filters.columns.is_empty());
        assert_eq!(view.apply(&data).len(), 3);

        view.set_column_filter(Column::Direction, "SEL");
        assert_eq!(view.apply(&data).len(), 2);
    }

    #[test]
    fn test_toggle_sort_asc_then_desc_and_new_key_resets() {
        let mut view = HistoryView::new();
        view.toggle_sort(Column::Rate);
        assert_eq!(view.sort.map(|s| s.direction), Some(SortDirection::Asc));

        view.toggle_sort(Column::Rate);
        assert_eq!(view.sort.map(|s| s.direction), Some(SortDirection::Desc));

        view.toggle_sort(Column::Pair);
        assert_eq!(
            view.sort,
            Some(SortState {
                column: Column::Pair,
                direction: SortDirection::Asc
            })
        );
    }

    #[test]
    fn test_numeric_sort_compares_floats() {
        let mut data = snapshot();
        data.push(tx("TRX-000004-1004", "2024-01-03", Direction::Buy, "GBP/USD", "UBS", 9.5));
        let mut view = HistoryView::new();

        view.toggle_sort(Column::Rate);
        let rates: Vec<f64> = view.apply(&data).iter().map(|t| t.rate).collect();
        assert_eq!(rates, vec![0.86, 1.08, 9.5, 148.2]);

        view.toggle_sort(Column::Rate);
        let rates: Vec<f64> = view.apply(&data).iter().map(|t| t.rate).collect();
        assert_eq!(rates, vec![148.2, 9.5, 1.08, 0.86]);
    }

    #[test]
    fn test_string_sort_ignores_case_and_ties_stay_stable() {
        let data = snapshot();
        let mut view = HistoryView::new();

        view.toggle_sort(Column::Bank1);
        // "Citi" and "citi" tie, filtered order is kept
        assert_eq!(
            numbers(&view.apply(&data)),
            vec!["TRX-000001-1001", "TRX-000003-1003", "TRX-000002-1002"]
        );
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut view = HistoryView::new();
        view.set_search("x");
        view.set_date(Some("2024-01-01".to_string()));
        view.set_direction(Some(Direction::Buy));
        view.set_column_filter(Column::Pair, "eur");
        view.toggle_sort(Column::Date);
        view.page = 4;

        view.reset();
        assert!(view.filters.is_empty());
        assert!(view.sort.is_none());
        assert_eq!(view.page, 1);
    }

    #[test]
    fn test_header_labels_show_sort_and_filter() {
        let mut view = HistoryView::new();
        view.toggle_sort(Column::Rate);
        view.toggle_sort(Column::Rate);
        view.set_column_filter(Column::Bank1, "citi");

        assert_eq!(view.header_label(Column::Rate), "Rate ▼");
        assert_eq!(view.header_label(Column::Bank1), "Bank 1*");
        assert_eq!(view.header_label(Column::Date), "Date");
    }

    #[test]
    fn test_render_formats_cells_and_placeholder() {
        let data = snapshot();
        let mut view = HistoryView::new();

        let rendered = render_history(&view, &data, 20);
        assert!(rendered.contains("1.08000"));
        assert!(rendered.contains("148,200"));
        assert!(rendered.contains("Page 1/1 (3 matching) of 3 loaded"));

        view.set_search("nothing like this");
        let rendered = render_history(&view, &data, 20);
        assert!(rendered.contains(EMPTY_HISTORY));
    }

    #[test]
    fn test_render_pages() {
        let data = snapshot();
        let mut view = HistoryView::new();
        view.page = 2;

        let rendered = render_history(&view, &data, 2);
        assert!(rendered.contains("TRX-000003-1003"));
        assert!(!rendered.contains("TRX-000001-1001"));
        assert!(rendered.contains("Page 2/2"));
    }
}
