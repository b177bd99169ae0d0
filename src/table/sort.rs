//! Column sorting with an explicit, value-typed sort state.
//!
//! [`activate`] is a pure function: it takes the previous [`SortState`] and
//! the current rows, and returns the next state together with the new row
//! order. Nothing is mutated; callers apply the returned [`SortOutcome`].

use std::cmp::Ordering;

use tracing::trace;

use super::compare::compare_cells;
use super::error::{Result, TableError};

/// Direction marker shown on the active header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest value first.
    Ascending,
    /// Largest value first.
    Descending,
}

impl SortDirection {
    /// Get the header marker for this direction.
    pub fn marker(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }

    /// Get a short label, used in logs and the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// The active column and direction of one table.
///
/// A fresh state has no active column; the first activation establishes one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    /// The column currently sorted on, if any.
    pub active_column: Option<usize>,
    /// Whether the active column is sorted ascending.
    pub ascending: bool,
}

impl SortState {
    /// Create a state with no active column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the state that activating `column` leads to.
    ///
    /// Re-activating the active column flips its direction. Any other
    /// column starts out descending.
    pub fn next_for(&self, column: usize) -> SortState {
        let ascending = if self.active_column == Some(column) {
            !self.ascending
        } else {
            false
        };
        SortState {
            active_column: Some(column),
            ascending,
        }
    }

    /// Get the direction of the active column, if one is active.
    pub fn direction(&self) -> Option<SortDirection> {
        self.active_column.map(|_| {
            if self.ascending {
                SortDirection::Ascending
            } else {
                SortDirection::Descending
            }
        })
    }

    /// Get the marker for `column`: only the active column carries one.
    pub fn indicator(&self, column: usize) -> Option<SortDirection> {
        if self.active_column == Some(column) {
            self.direction()
        } else {
            None
        }
    }
}

/// Read access to the cells of one row.
pub trait Cells {
    /// Get the display text at `column`, or `None` if the row is too short.
    fn cell(&self, column: usize) -> Option<&str>;

    /// Number of cells in this row.
    fn cell_count(&self) -> usize;
}

impl<S: AsRef<str>> Cells for Vec<S> {
    fn cell(&self, column: usize) -> Option<&str> {
        self.get(column).map(AsRef::as_ref)
    }

    fn cell_count(&self) -> usize {
        self.len()
    }
}

impl<S: AsRef<str>> Cells for [S] {
    fn cell(&self, column: usize) -> Option<&str> {
        self.get(column).map(AsRef::as_ref)
    }

    fn cell_count(&self) -> usize {
        self.len()
    }
}

/// The result of an activation: the next state and how to reorder rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOutcome {
    /// The state after the activation.
    pub state: SortState,
    /// Row positions in their new display order.
    ///
    /// `order[i]` is the index, in the input slice, of the row that is now
    /// displayed at position `i`.
    pub order: Vec<usize>,
    /// One entry per header; only the activated header is `Some`.
    pub indicators: Vec<Option<SortDirection>>,
}

impl SortOutcome {
    /// Apply the row order to an owned row vector.
    pub fn apply<T>(&self, rows: Vec<T>) -> Vec<T> {
        let mut slots: Vec<Option<T>> = rows.into_iter().map(Some).collect();
        self.order
            .iter()
            .filter_map(|&i| slots.get_mut(i).and_then(Option::take))
            .collect()
    }
}

/// Activate `column` on a table with `columns` headers.
///
/// Returns the next [`SortState`] (see [`SortState::next_for`]), the row
/// order produced by comparing cells at `column`, and the header markers.
///
/// # Errors
///
/// - [`TableError::ColumnOutOfRange`] if `column >= columns`
/// - [`TableError::CellOutOfRange`] if any row has no cell at `column`
pub fn activate<R: Cells + ?Sized>(
    column: usize,
    columns: usize,
    rows: &[&R],
    previous: SortState,
) -> Result<SortOutcome> {
    let state = previous.next_for(column);
    let order = sort_order(column, columns, rows, state.ascending)?;

    trace!(
        column,
        direction = state.direction().map(|d| d.label()).unwrap_or("none"),
        rows = rows.len(),
        "Column activated"
    );

    Ok(SortOutcome {
        state,
        order,
        indicators: (0..columns).map(|c| state.indicator(c)).collect(),
    })
}

/// Compute the display order of `rows` sorted on `column`.
///
/// Descending order is produced by swapping the operands handed to the
/// comparator, not by reversing its result.
pub fn sort_order<R: Cells + ?Sized>(
    column: usize,
    columns: usize,
    rows: &[&R],
    ascending: bool,
) -> Result<Vec<usize>> {
    if column >= columns {
        return Err(TableError::ColumnOutOfRange { column, columns });
    }

    let keys = rows
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            cells.cell(column).ok_or(TableError::CellOutOfRange {
                row,
                column,
                len: cells.cell_count(),
            })
        })
        .collect::<Result<Vec<&str>>>()?;

    let mut order: Vec<usize> = (0..keys.len()).collect();
    merge_sort_by(&mut order, &|a: &usize, b: &usize| {
        let (first, second) = if ascending { (a, b) } else { (b, a) };
        compare_cells(keys[*first], keys[*second])
    });

    Ok(order)
}

/// Merge sort that tolerates an intransitive comparator.
///
/// Mixed numeric/text columns do not form a total order (`"9" < "10"`
/// numerically, `"10" < "1a"` and `"1a" < "9"` as strings). The result is
/// always a permutation of the input regardless of comparator consistency.
fn merge_sort_by<T: Copy, F>(items: &mut [T], compare: &F)
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return;
    }

    let mid = items.len() / 2;
    merge_sort_by(&mut items[..mid], compare);
    merge_sort_by(&mut items[mid..], compare);

    let mut merged = Vec::with_capacity(items.len());
    let (mut left, mut right) = (0, mid);
    while left < mid && right < items.len() {
        if compare(&items[left], &items[right]) != Ordering::Greater {
            merged.push(items[left]);
            left += 1;
        } else {
            merged.push(items[right]);
            right += 1;
        }
    }
    merged.extend_from_slice(&items[left..mid]);
    merged.extend_from_slice(&items[right..]);
    items.copy_from_slice(&merged);
}
