//! Sortable admin tables.
//!
//! This module holds the rendering-independent table logic: the cell
//! comparator, the pure column activation function, the stateful
//! [`SortableTable`], and row selection. The ratatui adapter lives in
//! `ui::components::table`.

mod compare;
mod error;
mod model;
mod selection;
mod sort;

pub use compare::{compare_cells, locale_compare, parse_number};
pub use error::{Result, TableError};
pub use model::{Row, SortableTable, TableDocument};
pub use selection::Selection;
pub use sort::{activate, sort_order, Cells, SortDirection, SortOutcome, SortState};
