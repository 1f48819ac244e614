use strum::EnumString;

use crate::table::columns;

/// Sort direction for a column.
///
/// Parses case-insensitively from the `asc`/`desc` tokens the host's
/// direction-qualified dropdown emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    #[strum(serialize = "asc", serialize = "ascending")]
    Ascending,

    #[strum(serialize = "desc", serialize = "descending")]
    Descending,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Ascending => write!(f, "asc"),
            Direction::Descending => write!(f, "desc"),
        }
    }
}

/// The (column, direction) pair governing the row set's current order.
///
/// Only ever points at a sortable column; requests against unsortable
/// columns are rejected before they reach this machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub direction: Direction,
}

impl SortState {
    /// Startup policy: route number, newest (highest) first.
    pub const DEFAULT: SortState = SortState {
        column: columns::NUMBER,
        direction: Direction::Descending,
    };

    /// Next state for a header click on `column`: a repeat click on the
    /// active column flips the direction, any other column starts ascending.
    pub fn request(self, column: usize) -> SortState {
        let direction = if column == self.column {
            self.direction.flipped()
        } else {
            Direction::Ascending
        };

        SortState { column, direction }
    }
}

impl Default for SortState {
    fn default() -> Self {
        Self::DEFAULT
    }
}
