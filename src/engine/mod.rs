use std::path::Path;

use tracing::{debug, info, warn};

use crate::{
    common::error::LogbookError,
    csv::parser::CsvParser,
    engine::sort::{Direction, SortState},
    table::{
        columns::{self, column_type},
        row::Row,
    },
};

pub(crate) mod compare;
pub(crate) mod sort;

/// The materialized result of applying the live search query and the
/// committed sort order: borrowed row references for rendering plus the
/// sort state for indicator display. Never a mutation of the stored set.
#[derive(Debug)]
pub struct Snapshot<'a> {
    pub rows: Vec<&'a Row>,
    pub sort: SortState,
}

/// The owned route log: row set, sort state and live search query in one
/// place, so multiple independent instances can coexist and tests need no
/// shared state.
///
/// Parsing, filtering and sorting all run synchronously to completion;
/// fetching the export text from its mirrors is the host's job, and a full
/// reload replaces the row set wholesale.
#[derive(Debug, Default)]
pub struct Logbook {
    rows: Vec<Row>,
    sort: SortState,
    query: String,
}

impl Logbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a CSV export and replaces the route set wholesale.
    ///
    /// The first record is the spreadsheet header and is discarded; records
    /// with fewer than two fields are expected noise and dropped silently.
    /// Every successful load re-establishes the default order (route number,
    /// newest first). An export with no usable rows leaves no row set
    /// behind and is the one user-visible ingestion error.
    pub fn ingest(&mut self, text: &str) -> Result<usize, LogbookError> {
        let mut records = CsvParser::new().parse(text);
        if !records.is_empty() {
            records.remove(0);
        }

        let total = records.len();
        let rows: Vec<Row> = records
            .into_iter()
            .filter(|fields| fields.len() >= 2)
            .map(Row::new)
            .collect();

        if rows.is_empty() {
            return Err(LogbookError::EmptyExport);
        }
        if rows.len() < total {
            debug!(dropped = total - rows.len(), "dropped malformed rows");
        }

        info!(routes = rows.len(), "route export ingested");
        self.set_rows(rows);
        self.apply_sort(SortState::DEFAULT);

        Ok(self.rows.len())
    }

    /// Reads an export from disk and ingests it.
    pub fn ingest_path<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, LogbookError> {
        let text = std::fs::read_to_string(path)?;
        self.ingest(&text)
    }

    /// Replaces the held rows without touching the sort state or the query.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }

    /// All routes in the committed order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Stores the live search query used by [`Logbook::snapshot`].
    pub fn set_query<S: Into<String>>(&mut self, query: S) {
        self.query = query.into();
    }

    /// Pure substring filter: a route matches when any of the name, grade,
    /// face or zone columns contains the query case-insensitively. The empty
    /// query matches everything; the stored rows are never mutated.
    pub fn search(&self, query: &str) -> Vec<&Row> {
        if query.is_empty() {
            return self.rows.iter().collect();
        }

        let needle = query.to_lowercase();
        self.rows
            .iter()
            .filter(|row| {
                columns::SEARCH_COLUMNS
                    .iter()
                    .any(|&col| row.field(col).to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Sorts the stored set by `column` in the given direction.
    ///
    /// Reordering the stored set rather than a view makes the order persist
    /// across subsequent query changes. An unsortable or out-of-range column
    /// is a no-op that leaves both the order and the sort state unchanged.
    pub fn sort(&mut self, column: usize, direction: Direction) {
        if !column_type(column).is_sortable() {
            warn!(column, "ignoring sort request on unsortable column");
            return;
        }

        self.apply_sort(SortState { column, direction });
    }

    /// Header-click semantics: a repeat click on the active column flips the
    /// direction, a new column starts ascending. Unsortable columns are
    /// rejected the same way as in [`Logbook::sort`].
    pub fn toggle_sort(&mut self, column: usize) {
        if !column_type(column).is_sortable() {
            warn!(column, "ignoring sort request on unsortable column");
            return;
        }

        self.apply_sort(self.sort.request(column));
    }

    fn apply_sort(&mut self, sort: SortState) {
        let column_type = column_type(sort.column);

        // Stable, so equal keys keep their current relative order
        self.rows.sort_by(|a, b| {
            let ordering = compare::compare(column_type, a.field(sort.column), b.field(sort.column));
            match sort.direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            }
        });

        self.sort = sort;
        debug!(column = sort.column, direction = %sort.direction, "routes reordered");
    }

    /// The current view: live query applied on top of the committed order.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            rows: self.search(&self.query),
            sort: self.sort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
Nº,Nom,Grau,Metres,Agulla/Paret,Zona,Data,Enllaç
2,Riu,6a,15,Fissura,Zona1,01/05/2021,http://x
1,Pont,6a+,10,Placa,Zona2,-,-
3,Cova,5+,20,Fissura,Zona1,-,-";

    fn loaded() -> Logbook {
        let mut logbook = Logbook::new();
        logbook.ingest(EXPORT).unwrap();
        logbook
    }

    fn numbers(rows: &[&Row]) -> Vec<String> {
        rows.iter().map(|row| row.field(0).to_owned()).collect()
    }

    #[test]
    fn test_default_load_sorts_by_number_descending() {
        let logbook = loaded();

        assert_eq!(numbers(&logbook.snapshot().rows), ["3", "2", "1"]);
        assert_eq!(logbook.sort_state(), SortState::DEFAULT);
    }

    #[test]
    fn test_sort_by_grade_ascending() {
        let mut logbook = loaded();

        logbook.sort(columns::GRADE, Direction::Ascending);

        // 5+ < 6a < 6a+
        assert_eq!(numbers(&logbook.snapshot().rows), ["3", "2", "1"]);
        assert_eq!(logbook.sort_state().column, columns::GRADE);
    }

    #[test]
    fn test_search_then_sort_operates_on_stored_order() {
        let mut logbook = loaded();

        logbook.set_query("fissura");
        logbook.sort(columns::NUMBER, Direction::Ascending);

        assert_eq!(numbers(&logbook.snapshot().rows), ["2", "3"]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_the_fixed_columns() {
        let logbook = loaded();

        assert_eq!(numbers(&logbook.search("FISSURA")), ["3", "2"]);
        assert_eq!(numbers(&logbook.search("zona2")), ["1"]);
        // Route names are searched too
        assert_eq!(numbers(&logbook.search("pont")), ["1"]);
        // The number column is not part of the searched subset
        assert!(logbook.search("01/05").is_empty());
    }

    #[test]
    fn test_empty_query_returns_all_rows_in_committed_order() {
        let logbook = loaded();

        assert_eq!(numbers(&logbook.search("")), ["3", "2", "1"]);
    }

    #[test]
    fn test_search_does_not_mutate_rows() {
        let logbook = loaded();

        let before: Vec<Row> = logbook.rows().to_vec();
        let _ = logbook.search("fissura");

        assert_eq!(logbook.rows(), &before[..]);
    }

    #[test]
    fn test_toggle_sort_flips_and_resets() {
        let mut logbook = loaded();

        logbook.sort(columns::GRADE, Direction::Ascending);
        logbook.toggle_sort(columns::GRADE);
        assert_eq!(logbook.sort_state().direction, Direction::Descending);

        logbook.toggle_sort(columns::ZONE);
        assert_eq!(logbook.sort_state().column, columns::ZONE);
        assert_eq!(logbook.sort_state().direction, Direction::Ascending);
    }

    #[test]
    fn test_unsortable_column_request_is_a_no_op() {
        let mut logbook = loaded();
        logbook.sort(columns::GRADE, Direction::Ascending);
        let before = logbook.sort_state();
        let order_before = numbers(&logbook.snapshot().rows);

        logbook.sort(columns::LINK, Direction::Ascending);
        logbook.toggle_sort(columns::LINK);
        logbook.sort(99, Direction::Descending);

        assert_eq!(logbook.sort_state(), before);
        assert_eq!(numbers(&logbook.snapshot().rows), order_before);
    }

    #[test]
    fn test_ingest_drops_header_and_short_rows() {
        let mut logbook = Logbook::new();
        let count = logbook
            .ingest("Nº,Nom\n5,Llamp,6b\nnoise\n\n6,Tro,5")
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(numbers(&logbook.snapshot().rows), ["6", "5"]);
    }

    #[test]
    fn test_ingest_with_no_data_rows_is_an_error() {
        let mut logbook = Logbook::new();

        assert!(matches!(
            logbook.ingest("Nº,Nom,Grau"),
            Err(LogbookError::EmptyExport)
        ));
        assert!(matches!(logbook.ingest(""), Err(LogbookError::EmptyExport)));
        assert!(logbook.rows().is_empty());
    }

    #[test]
    fn test_reingest_replaces_rows_wholesale() {
        let mut logbook = loaded();
        logbook.set_query("fissura");

        logbook.ingest("Nº,Nom\n9,Nou,4\n8,Vell,5").unwrap();

        assert_eq!(logbook.rows().len(), 2);
        // Default order re-established, query untouched
        assert_eq!(logbook.sort_state(), SortState::DEFAULT);
        assert_eq!(logbook.query(), "fissura");
        assert!(logbook.snapshot().rows.is_empty());
    }

    #[test]
    fn test_set_rows_keeps_sort_state_and_query() {
        let mut logbook = loaded();
        logbook.sort(columns::GRADE, Direction::Ascending);
        logbook.set_query("riu");
        let sort = logbook.sort_state();

        logbook.set_rows(vec![Row::from(vec!["7", "Nova", "6c"])]);

        assert_eq!(logbook.sort_state(), sort);
        assert_eq!(logbook.query(), "riu");
        assert_eq!(logbook.rows().len(), 1);
    }

    #[test]
    fn test_sort_with_missing_fields_uses_sentinels() {
        let mut logbook = Logbook::new();
        logbook
            .ingest("h,h\n1,Curta,6a,12\n2,Sense\n3,Llarga,7a,30")
            .unwrap();

        logbook.sort(columns::LENGTH, Direction::Ascending);

        // Row 2 has no length at all and sorts as 0
        assert_eq!(numbers(&logbook.snapshot().rows), ["2", "1", "3"]);
    }

    #[test]
    fn test_undated_routes_sort_earliest_ascending() {
        let mut logbook = loaded();

        logbook.sort(columns::DATE, Direction::Ascending);

        let rows = logbook.snapshot().rows;
        assert_eq!(rows.last().map(|row| row.field(0)), Some("2"));
    }
}
