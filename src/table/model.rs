//! Table documents and the stateful sortable table.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use super::error::Result;
use super::sort::{activate, sort_order, Cells, SortDirection, SortOutcome, SortState};

/// A single body row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Row {
    /// Record identifier, used for selection and form submission.
    ///
    /// Rows loaded without an id get their 1-based position.
    #[serde(default)]
    pub id: String,
    /// Display text of each cell, in header order.
    #[serde(deserialize_with = "deserialize_cells")]
    pub cells: Vec<String>,
}

impl Row {
    /// Create a row from an id and cell values.
    pub fn new(id: impl Into<String>, cells: Vec<String>) -> Self {
        Self {
            id: id.into(),
            cells,
        }
    }
}

impl Cells for Row {
    fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

/// Accept strings, numbers, booleans and nulls as cell values.
fn deserialize_cells<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|value| match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        })
        .collect())
}

/// A table as delivered by a file or the admin server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableDocument {
    /// Title shown above the table.
    #[serde(default)]
    pub title: String,
    /// Header labels, one per column.
    pub headers: Vec<String>,
    /// Body rows.
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl TableDocument {
    /// Parse a table document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut document: TableDocument = serde_json::from_str(json)?;
        document.fill_missing_ids();
        Ok(document)
    }

    /// Load a table document from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading table document");
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Give every row without an id its 1-based position.
    pub fn fill_missing_ids(&mut self) {
        for (i, row) in self.rows.iter_mut().enumerate() {
            if row.id.trim().is_empty() {
                row.id = (i + 1).to_string();
            }
        }
    }
}

/// A table bound to its sort state.
///
/// Owns the headers, the rows in display order, and the [`SortState`].
/// All reordering goes through [`activate`](SortableTable::activate) or
/// [`replace_rows`](SortableTable::replace_rows); cell contents are never
/// changed.
#[derive(Debug, Clone)]
pub struct SortableTable {
    headers: Vec<String>,
    rows: Vec<Row>,
    state: SortState,
}

impl SortableTable {
    /// Bind a table and run the initial sort on `default_column`.
    ///
    /// The initial sort is descending. A table without headers is left
    /// unsorted.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`](super::TableError) if `default_column` does not exist or a row
    /// is missing that cell.
    pub fn bind(headers: Vec<String>, rows: Vec<Row>, default_column: usize) -> Result<Self> {
        let mut table = Self {
            headers,
            rows,
            state: SortState::new(),
        };

        if table.headers.is_empty() {
            debug!("Table has no headers, leaving unsorted");
            return Ok(table);
        }

        table.activate(default_column)?;
        Ok(table)
    }

    /// Wrap rows without sorting them.
    pub fn unsorted(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            headers,
            rows,
            state: SortState::new(),
        }
    }

    /// Bind a table from a [`TableDocument`].
    pub fn from_document(document: TableDocument, default_column: usize) -> Result<Self> {
        Self::bind(document.headers, document.rows, default_column)
    }

    /// Activate a column header, reordering the rows.
    ///
    /// On error the rows and state are left untouched.
    pub fn activate(&mut self, column: usize) -> Result<SortOutcome> {
        let refs: Vec<&Row> = self.rows.iter().collect();
        let outcome = activate(column, self.headers.len(), &refs, self.state)?;

        let rows = std::mem::take(&mut self.rows);
        self.rows = outcome.apply(rows);
        self.state = outcome.state;

        debug!(
            column,
            header = %self.headers[column],
            direction = outcome.state.direction().map(|d| d.label()).unwrap_or("none"),
            "Sorted table"
        );
        Ok(outcome)
    }

    /// Replace the row set, re-applying the current sort without toggling.
    ///
    /// If the new rows cannot be sorted on the active column, they are kept
    /// in the order given and the error is returned.
    pub fn replace_rows(&mut self, rows: Vec<Row>) -> Result<()> {
        self.rows = rows;

        let Some(column) = self.state.active_column else {
            return Ok(());
        };

        let refs: Vec<&Row> = self.rows.iter().collect();
        match sort_order(column, self.headers.len(), &refs, self.state.ascending) {
            Ok(order) => {
                let outcome = SortOutcome {
                    state: self.state,
                    order,
                    indicators: Vec::new(),
                };
                let rows = std::mem::take(&mut self.rows);
                self.rows = outcome.apply(rows);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Could not re-apply sort to new rows");
                Err(e)
            }
        }
    }

    /// Get the header labels.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get the rows in display order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get a row by display position.
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Get the current sort state.
    pub fn state(&self) -> SortState {
        self.state
    }

    /// Get the direction marker for a header, if it is the active column.
    pub fn indicator(&self, column: usize) -> Option<SortDirection> {
        self.state.indicator(column)
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
