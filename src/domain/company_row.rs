use std::fmt;

use super::candidate::SelectionResult;

pub const ROW_TYPE_COMPANY: &str = "COMPANY";
pub const DEBUG_MAX_CHARS: usize = 160;
pub const ERROR_MESSAGE_MAX_CHARS: usize = 140;

/// 1-indexed column positions in the enrichment tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub company: usize,
    pub address: usize,
    pub row_type: usize,
    pub website: usize,
    pub status: usize,
    pub debug: usize,
}

impl Default for ColumnMap {
    fn default() -> Self {
        ColumnMap {
            company: 1,   // A
            address: 3,   // C
            row_type: 10, // J
            website: 12,  // L
            status: 15,   // O
            debug: 16,    // P
        }
    }
}

impl ColumnMap {
    pub fn width(&self) -> usize {
        [
            self.company,
            self.address,
            self.row_type,
            self.website,
            self.status,
            self.debug,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    /// Whole-column range covering every mapped column, e.g. `A:P`.
    pub fn read_range(&self) -> String {
        format!("A:{}", column_letter(self.width()))
    }
}

/// Spreadsheet letter for a 1-indexed column (`1` → `A`, `27` → `AA`).
pub fn column_letter(column: usize) -> String {
    let mut column = column;
    let mut letters = Vec::new();

    while column > 0 {
        let remainder = (column - 1) % 26;
        letters.push((b'A' + remainder as u8) as char);
        column = (column - 1) / 26;
    }

    letters.iter().rev().collect()
}

pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRow {
    /// 1-based sheet row; the header is row 1.
    pub row_number: usize,
    pub company: String,
    pub address: String,
    pub row_type: String,
    pub existing_website: String,
}

impl CompanyRow {
    pub fn from_values(row_number: usize, values: &[String], columns: &ColumnMap) -> Self {
        let cell = |column: usize| {
            column
                .checked_sub(1)
                .and_then(|i| values.get(i))
                .map(|value| value.trim().to_string())
                .unwrap_or_default()
        };

        CompanyRow {
            row_number,
            company: cell(columns.company),
            address: cell(columns.address),
            row_type: cell(columns.row_type).to_uppercase(),
            existing_website: cell(columns.website),
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.row_type == ROW_TYPE_COMPANY
            && !self.company.is_empty()
            && self.existing_website.is_empty()
    }

    pub fn search_query(&self) -> String {
        format!("{} {}", self.company, self.address).trim().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStatus {
    Found,
    NotFound,
    Error,
}

impl LookupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupStatus::Found => "FOUND",
            LookupStatus::NotFound => "NOT_FOUND",
            LookupStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for LookupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowUpdate {
    pub row_number: usize,
    pub website: String,
    pub status: LookupStatus,
    pub debug: String,
}

impl RowUpdate {
    pub fn from_selection(row_number: usize, selection: SelectionResult) -> Self {
        let status = match selection.is_found() {
            true => LookupStatus::Found,
            false => LookupStatus::NotFound,
        };

        RowUpdate {
            row_number,
            website: selection.website,
            status,
            debug: selection.debug_note,
        }
    }

    pub fn from_error(row_number: usize, kind: &str, message: &str) -> Self {
        RowUpdate {
            row_number,
            website: String::new(),
            status: LookupStatus::Error,
            debug: format!(
                "{}: {}",
                kind,
                truncate_chars(message, ERROR_MESSAGE_MAX_CHARS)
            ),
        }
    }
}
