/// Quoting state while scanning a single line.
///
/// `QuotedQuote` means the scan just saw a `"` inside a quoted field and has
/// not yet decided whether it closes the field or escapes a literal quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    Unquoted,
    Quoted,
    QuotedQuote,
}

/// Character-by-character parser for spreadsheet CSV exports.
///
/// Handles quoted fields containing the delimiter and doubled-quote escapes.
/// The source is a spreadsheet export, not a validated format, so unbalanced
/// quotes never fail; the rest of the line is consumed in whatever quote
/// state the scan ended up in.
pub struct CsvParser {
    delimiter: char,
}

impl CsvParser {
    /// Parser for the usual comma-delimited export.
    pub fn new() -> Self {
        Self { delimiter: ',' }
    }

    /// Parser for exports using a different delimiter, e.g. `;`.
    pub fn with_delimiter(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Splits raw text into records of trimmed fields.
    ///
    /// Lines are separated by `\n` or `\r\n`. Whitespace-only lines produce
    /// no record at all. Line order is preserved, no header is stripped and
    /// no values are coerced; both are the caller's responsibility.
    pub fn parse(&self, text: &str) -> Vec<Vec<String>> {
        text.split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.trim().is_empty())
            .map(|line| self.parse_line(line))
            .collect()
    }

    fn parse_line(&self, line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut state = QuoteState::Unquoted;

        for ch in line.chars() {
            state = match state {
                QuoteState::Unquoted => {
                    if ch == '"' {
                        QuoteState::Quoted
                    } else if ch == self.delimiter {
                        fields.push(commit(&mut field));
                        QuoteState::Unquoted
                    } else {
                        field.push(ch);
                        QuoteState::Unquoted
                    }
                }
                QuoteState::Quoted => {
                    if ch == '"' {
                        QuoteState::QuotedQuote
                    } else {
                        // Delimiters are literal content inside quotes
                        field.push(ch);
                        QuoteState::Quoted
                    }
                }
                QuoteState::QuotedQuote => {
                    if ch == '"' {
                        field.push('"');
                        QuoteState::Quoted
                    } else if ch == self.delimiter {
                        fields.push(commit(&mut field));
                        QuoteState::Unquoted
                    } else {
                        field.push(ch);
                        QuoteState::Unquoted
                    }
                }
            };
        }

        fields.push(commit(&mut field));
        fields
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}

fn commit(field: &mut String) -> String {
    let committed = field.trim().to_owned();
    field.clear();
    committed
}
