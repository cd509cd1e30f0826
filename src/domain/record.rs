//! Tabular records and redaction results

use std::io::Cursor;

/// Literal value written in place of every redacted field
pub const REDACTION_TOKEN: &str = "***";

/// Ordered field names from the first line of the input
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    names: Vec<String>,
}

impl Header {
    /// Creates a header from field names in column order
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Field names in column order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when the input had no header line at all
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns true if the header names this field
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Column indexes carrying this field name
    pub fn positions<'a>(&'a self, name: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.names
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.as_str() == name)
            .map(|(i, _)| i)
    }
}

/// One data row, positionally aligned with a [`Header`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularRecord {
    values: Vec<String>,
}

impl TabularRecord {
    /// Creates a record from values in column order
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    /// Values in column order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Value of the first column named `name`
    pub fn get<'a>(&'a self, header: &Header, name: &str) -> Option<&'a str> {
        header
            .positions(name)
            .next()
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }

    /// Replaces every column named `name` with [`REDACTION_TOKEN`]
    ///
    /// Returns the number of cells overwritten. Unknown names are ignored.
    pub fn redact(&mut self, header: &Header, name: &str) -> usize {
        let mut masked = 0;
        for i in header.positions(name) {
            if let Some(value) = self.values.get_mut(i) {
                REDACTION_TOKEN.clone_into(value);
                masked += 1;
            }
        }
        masked
    }
}

/// Masked output of the field-masking engine
///
/// Holds the serialized CSV together with a few facts about it. The text can
/// be taken as a string, as bytes, or as a reader positioned at the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionResult {
    header: Header,
    row_count: usize,
    masked_cells: usize,
    content: String,
}

impl RedactionResult {
    pub(crate) fn new(header: Header, row_count: usize, masked_cells: usize, content: String) -> Self {
        Self {
            header,
            row_count,
            masked_cells,
            content,
        }
    }

    /// Header of the masked table, unchanged from the input
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Number of data rows written
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of cells replaced with the redaction token
    pub fn masked_cells(&self) -> usize {
        self.masked_cells
    }

    /// Serialized CSV text
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Consumes the result and returns the CSV text
    pub fn into_string(self) -> String {
        self.content
    }

    /// Consumes the result and returns the CSV bytes (UTF-8)
    pub fn into_bytes(self) -> Vec<u8> {
        self.content.into_bytes()
    }

    /// Borrowing reader over the CSV text, positioned at the start
    pub fn reader(&self) -> Cursor<&[u8]> {
        Cursor::new(self.content.as_bytes())
    }

    /// Owning reader over the CSV text, positioned at the start
    pub fn into_reader(self) -> Cursor<Vec<u8>> {
        Cursor::new(self.into_bytes())
    }
}
