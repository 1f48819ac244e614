use std::cmp::Ordering;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{
    codec::{date, grade},
    table::columns::ColumnType,
};

/// Compares two raw cell values under a column's semantic type.
///
/// Missing and unparseable values collapse to the type's sentinel, so bad
/// data groups at a deterministic position instead of erroring. Unsortable
/// columns compare equal, which leaves any ordering untouched.
pub(crate) fn compare(column_type: ColumnType, a: &str, b: &str) -> Ordering {
    let a = a.trim();
    let b = b.trim();

    match column_type {
        ColumnType::Numeric => numeric_value(a).total_cmp(&numeric_value(b)),
        ColumnType::Text => fold(a).cmp(&fold(b)),
        ColumnType::Grade => grade::sort_key(a).cmp(&grade::sort_key(b)),
        ColumnType::Date => date::sort_key(a).cmp(&date::sort_key(b)),
        ColumnType::Unsortable => Ordering::Equal,
    }
}

fn numeric_value(cell: &str) -> f64 {
    cell.parse().unwrap_or(0.0)
}

/// Case- and diacritic-insensitive folding for text comparison: NFD
/// decomposition, combining marks dropped, then lowercased. Matches how the
/// Catalan source data wants `Frares`/`frares` and `Marçal`/`Marcal`
/// adjacent.
fn fold(cell: &str) -> String {
    cell.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
