//! In-memory tabular data
//!
//! A `Dataset` is an ordered set of named string columns of equal length.
//! Rows are addressed positionally and can be materialized as `Record`s
//! for inference.

use std::collections::{BTreeMap, HashSet};

use crate::errors::{AdvisorError, Result};

/// A named column of string cells
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<String>,
}

impl Column {
    pub fn new<S: Into<String>>(name: impl Into<String>, cells: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Ordered set of equally long columns
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Build a dataset, rejecting duplicate names and ragged columns
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(AdvisorError::config(format!(
                    "duplicate column {:?}",
                    column.name
                )));
            }
        }

        let row_count = columns.first().map(Column::len).unwrap_or(0);
        if let Some(column) = columns.iter().find(|c| c.len() != row_count) {
            return Err(AdvisorError::config(format!(
                "column {:?} has {} rows, expected {}",
                column.name,
                column.len(),
                row_count
            )));
        }

        Ok(Self { columns, row_count })
    }

    /// Build a dataset from a header and row-major cells
    pub fn from_rows<S: AsRef<str>>(header: &[S], rows: &[Vec<String>]) -> Result<Self> {
        let mut columns: Vec<Column> = header
            .iter()
            .map(|name| Column::new(name.as_ref(), Vec::<String>::with_capacity(rows.len())))
            .collect();

        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(AdvisorError::config(format!(
                    "row {} has {} cells, expected {}",
                    row_idx + 1,
                    row.len(),
                    columns.len()
                )));
            }
            for (column, cell) in columns.iter_mut().zip(row) {
                column.cells.push(cell.clone());
            }
        }

        Self::new(columns)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Look up a column that configuration requires to exist
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| AdvisorError::config(format!("column {name:?} is absent from the dataset")))
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Materialize row `index` as a record
    pub fn row(&self, index: usize) -> Option<Record> {
        if index >= self.row_count {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| (c.name.clone(), c.cells[index].clone()))
                .collect(),
        )
    }

    /// Iterate over all rows as records
    pub fn records(&self) -> impl Iterator<Item = Record> + '_ {
        (0..self.row_count).filter_map(move |i| self.row(i))
    }
}

/// A single row keyed by column name
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    cells: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Cell for a predictor column; absence is a per-record failure
    pub fn require(&self, column: &str) -> Result<&str> {
        self.get(column).ok_or_else(|| AdvisorError::MissingField {
            column: column.to_string(),
        })
    }
}

impl FromIterator<(String, String)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Replace spaces in a column header with underscores
pub fn normalize_column_name(name: &str) -> String {
    name.trim().replace(' ', "_")
}
