pub(crate) mod codec;
pub(crate) mod common;
pub(crate) mod csv;
pub(crate) mod engine;
pub(crate) mod table;

pub use common::error::LogbookError;
pub use csv::parser::CsvParser;
pub use engine::{
    Logbook, Snapshot,
    sort::{Direction, SortState},
};
pub use table::{
    columns::{self, COLUMN_COUNT, ColumnType, LABELS, SEARCH_COLUMNS, column_type},
    row::Row,
};
