/// One route record: positional text fields straight from the export.
///
/// Fields are raw strings; nothing is coerced until comparison time.
/// Short rows are tolerated: reading past the end yields an empty field,
/// the same as an empty cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<String>,
}

impl Row {
    /// Creates a row from already-parsed fields.
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// The field at `index`, or `""` when the row is too short.
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    /// Number of fields actually present in the record.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

impl From<Vec<&str>> for Row {
    fn from(fields: Vec<&str>) -> Self {
        Self::new(fields.into_iter().map(str::to_owned).collect())
    }
}
