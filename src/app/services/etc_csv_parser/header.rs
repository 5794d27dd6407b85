//! Header row detection and column name mapping
//!
//! A first row counts as a header when any cell contains one of the known
//! column keywords. The resulting map lets the row mapper probe several
//! historical spellings for each logical column.

use crate::constants::HEADER_KEYWORDS;
use csv::StringRecord;
use std::collections::HashMap;

use super::encoding::strip_bom;

/// Column name to index mapping built from a header row
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    /// Header text (trimmed) to column index; a repeated name keeps its last column
    pub name_to_index: HashMap<String, usize>,
}

impl HeaderMap {
    /// Classify the first row and build a mapping if it is a header
    pub fn detect(first_row: &StringRecord) -> Option<Self> {
        if Self::is_header_row(first_row) {
            Some(Self::from_row(first_row))
        } else {
            None
        }
    }

    /// Check whether any cell contains a header keyword
    pub fn is_header_row(row: &StringRecord) -> bool {
        row.iter().any(|cell| {
            let cell = strip_bom(cell);
            HEADER_KEYWORDS.iter().any(|keyword| cell.contains(keyword))
        })
    }

    /// Build the mapping from every cell of a header row
    pub fn from_row(row: &StringRecord) -> Self {
        let name_to_index = row
            .iter()
            .enumerate()
            .map(|(index, cell)| (strip_bom(cell).trim().to_string(), index))
            .collect();

        Self { name_to_index }
    }

    /// Get the index for a given column name
    pub fn get_index(&self, column_name: &str) -> Option<usize> {
        self.name_to_index.get(column_name).copied()
    }

    /// Check if a column exists in the mapping
    pub fn has_column(&self, column_name: &str) -> bool {
        self.name_to_index.contains_key(column_name)
    }

    /// First candidate name present in the header, if any
    pub fn resolve<'c>(&self, candidates: &[&'c str]) -> Option<&'c str> {
        candidates.iter().copied().find(|name| self.has_column(name))
    }

    /// Read a cell by probing candidate header names in priority order
    ///
    /// A candidate counts only when its column exists in this row; otherwise
    /// probing moves on. Returns the empty string when nothing matches.
    pub fn lookup<'r>(&self, row: &'r StringRecord, candidates: &[&str]) -> &'r str {
        candidates
            .iter()
            .filter_map(|name| self.get_index(name))
            .find_map(|index| row.get(index))
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.name_to_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_to_index.is_empty()
    }
}
