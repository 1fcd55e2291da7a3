//! Categorical codification
//!
//! A `Codebook` holds one `SymbolTable` per column. Symbols are assigned in
//! first-occurrence order while scanning a column top to bottom, so codes are
//! dense (`0..n`) and reproducible for a given row order.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::errors::{AdvisorError, Result};
use crate::serialization::fingerprint_hex;
use crate::table::Dataset;

/// Dense integer symbol assigned to a categorical value
pub type Code = usize;

/// Bijective label <-> code mapping for one column
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SymbolTable {
    /// Labels indexed by code
    labels: Vec<String>,
    codes: HashMap<String, Code>,
}

impl SymbolTable {
    /// Learn symbols from cells in order of first occurrence
    pub fn fit<'a>(cells: impl IntoIterator<Item = &'a str>) -> Self {
        let mut labels = Vec::new();
        let mut codes = HashMap::new();

        for cell in cells {
            if !codes.contains_key(cell) {
                codes.insert(cell.to_string(), labels.len());
                labels.push(cell.to_string());
            }
        }

        Self { labels, codes }
    }

    pub fn code(&self, label: &str) -> Option<Code> {
        self.codes.get(label).copied()
    }

    pub fn label(&self, code: Code) -> Option<&str> {
        self.labels.get(code).map(String::as_str)
    }

    /// Number of distinct symbols
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in code order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl From<Vec<String>> for SymbolTable {
    fn from(labels: Vec<String>) -> Self {
        Self::fit(labels.iter().map(String::as_str))
    }
}

impl From<SymbolTable> for Vec<String> {
    fn from(table: SymbolTable) -> Self {
        table.labels
    }
}

/// Per-column symbol tables
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Codebook {
    tables: BTreeMap<String, SymbolTable>,
}

impl Codebook {
    /// Fit a symbol table for each named column
    pub fn fit<S: AsRef<str>>(dataset: &Dataset, column_names: &[S]) -> Result<Self> {
        let mut tables = BTreeMap::new();

        for name in column_names {
            let column = dataset.require_column(name.as_ref())?;
            let table = SymbolTable::fit(column.cells.iter().map(String::as_str));
            tracing::debug!(column = %column.name, symbols = table.len(), "fitted symbol table");
            tables.insert(column.name.clone(), table);
        }

        Ok(Self { tables })
    }

    /// Fit every column of the dataset
    pub fn fit_all(dataset: &Dataset) -> Result<Self> {
        let names: Vec<&str> = dataset.column_names().collect();
        Self::fit(dataset, &names)
    }

    pub fn table(&self, column: &str) -> Option<&SymbolTable> {
        self.tables.get(column)
    }

    fn require_table(&self, column: &str) -> Result<&SymbolTable> {
        self.table(column)
            .ok_or_else(|| AdvisorError::config(format!("column {column:?} is not in the codebook")))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Number of symbols learned for a column
    pub fn symbol_count(&self, column: &str) -> Result<usize> {
        Ok(self.require_table(column)?.len())
    }

    /// Code for `value` in `column`
    pub fn encode(&self, column: &str, value: &str) -> Result<Code> {
        self.require_table(column)?
            .code(value)
            .ok_or_else(|| AdvisorError::UnknownCategory {
                column: column.to_string(),
                value: value.to_string(),
            })
    }

    /// Encode the named columns of a dataset, one row of codes per dataset row
    pub fn encode_dataset<S: AsRef<str>>(
        &self,
        dataset: &Dataset,
        column_names: &[S],
    ) -> Result<Vec<Vec<Code>>> {
        let columns = column_names
            .iter()
            .map(|name| dataset.require_column(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut rows = vec![Vec::with_capacity(columns.len()); dataset.row_count()];
        for column in columns {
            let table = self.require_table(&column.name)?;
            for (row, cell) in rows.iter_mut().zip(&column.cells) {
                let code = table.code(cell).ok_or_else(|| AdvisorError::UnknownCategory {
                    column: column.name.clone(),
                    value: cell.clone(),
                })?;
                row.push(code);
            }
        }

        Ok(rows)
    }

    /// Encode a single column into a code vector
    pub fn encode_column(&self, dataset: &Dataset, column: &str) -> Result<Vec<Code>> {
        Ok(self
            .encode_dataset(dataset, &[column])?
            .into_iter()
            .map(|row| row[0])
            .collect())
    }

    /// Label for `code` in `column`
    pub fn decode(&self, column: &str, code: Code) -> Result<&str> {
        self.require_table(column)?
            .label(code)
            .ok_or_else(|| AdvisorError::UnknownCode {
                column: column.to_string(),
                code,
            })
    }

    /// BLAKE3 digest of the canonical JSON form
    pub fn fingerprint(&self) -> Result<String> {
        fingerprint_hex(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn colors() -> Dataset {
        Dataset::new(vec![
            Column::new("color", ["red", "blue", "red"]),
            Column::new("shape", ["box", "box", "ball"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_first_occurrence_codes() -> Result<()> {
        let book = Codebook::fit(&colors(), &["color"])?;

        assert_eq!(book.encode("color", "red")?, 0);
        assert_eq!(book.encode("color", "blue")?, 1);
        assert_eq!(book.symbol_count("color")?, 2);
        assert_eq!(book.table("color").unwrap().labels(), ["red", "blue"]);

        Ok(())
    }

    #[test]
    fn test_decode_unknown_code() -> Result<()> {
        let book = Codebook::fit(&colors(), &["color"])?;

        assert_eq!(book.decode("color", 1)?, "blue");
        match book.decode("color", 2) {
            Err(AdvisorError::UnknownCode { column, code }) => {
                assert_eq!(column, "color");
                assert_eq!(code, 2);
            }
            other => panic!("expected UnknownCode, got {other:?}"),
        }

        Ok(())
    }

    #[test]
    fn test_encode_unknown_category() -> Result<()> {
        let book = Codebook::fit(&colors(), &["color"])?;
        assert!(matches!(
            book.encode("color", "green"),
            Err(AdvisorError::UnknownCategory { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_unfitted_column_is_configuration_error() -> Result<()> {
        let book = Codebook::fit(&colors(), &["color"])?;
        assert!(matches!(
            book.encode("shape", "box"),
            Err(AdvisorError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Codebook::fit(&colors(), &["weight"]),
            Err(AdvisorError::InvalidConfiguration(_))
        ));
        Ok(())
    }

    #[test]
    fn test_encode_dataset_preserves_rows() -> Result<()> {
        let data = colors();
        let book = Codebook::fit_all(&data)?;

        let encoded = book.encode_dataset(&data, &["shape", "color"])?;
        assert_eq!(encoded, vec![vec![0, 0], vec![0, 1], vec![1, 0]]);
        assert_eq!(book.encode_column(&data, "shape")?, vec![0, 0, 1]);

        Ok(())
    }

    #[test]
    fn test_same_first_occurrence_same_codes() -> Result<()> {
        let a = Dataset::new(vec![Column::new("c", ["x", "y", "x", "z"])])?;
        let b = Dataset::new(vec![Column::new("c", ["x", "x", "y", "z", "y"])])?;

        let book_a = Codebook::fit_all(&a)?;
        let book_b = Codebook::fit_all(&b)?;

        assert_eq!(book_a, book_b);
        assert_eq!(book_a.fingerprint()?, book_b.fingerprint()?);

        Ok(())
    }

    #[test]
    fn test_serde_keeps_code_order() -> Result<()> {
        let book = Codebook::fit_all(&colors())?;
        let json = serde_json::to_string(&book)?;
        assert!(json.contains("[\"red\",\"blue\"]"));

        let back: Codebook = serde_json::from_str(&json)?;
        assert_eq!(back, book);
        assert_eq!(back.encode("shape", "ball")?, 1);

        Ok(())
    }
}
