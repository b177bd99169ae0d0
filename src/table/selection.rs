//! Row checkboxes with a synchronized select-all box.

use std::collections::HashSet;

use super::model::Row;

/// Checkbox state for the rows of one table.
///
/// Rows are tracked by id, so the selection survives re-sorting. The
/// select-all box follows two rules: unchecking any row clears it, and
/// checking the last unchecked row sets it.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Ids of the checked rows.
    selected: HashSet<String>,
    /// Ids of every row in the table.
    known: HashSet<String>,
    /// State of the select-all box.
    all: bool,
}

impl Selection {
    /// Create an empty selection over the given rows.
    pub fn new<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Self {
        Self {
            selected: HashSet::new(),
            known: rows.into_iter().map(|r| r.id.clone()).collect(),
            all: false,
        }
    }

    /// Track a new row set, dropping checks on rows that disappeared.
    pub fn sync<'a>(&mut self, rows: impl IntoIterator<Item = &'a Row>) {
        self.known = rows.into_iter().map(|r| r.id.clone()).collect();
        let known = &self.known;
        self.selected.retain(|id| known.contains(id));
        self.all = !self.known.is_empty() && self.selected.len() == self.known.len();
    }

    /// Set the select-all box, checking or unchecking every row.
    pub fn set_all(&mut self, checked: bool) {
        self.all = checked;
        if checked {
            self.selected = self.known.clone();
        } else {
            self.selected.clear();
        }
    }

    /// Flip the select-all box.
    pub fn toggle_all(&mut self) {
        self.set_all(!self.all);
    }

    /// Check or uncheck one row. Unknown ids are ignored.
    pub fn set_row(&mut self, id: &str, checked: bool) {
        if !self.known.contains(id) {
            return;
        }

        if checked {
            self.selected.insert(id.to_string());
            if self.selected.len() == self.known.len() {
                self.all = true;
            }
        } else {
            self.selected.remove(id);
            self.all = false;
        }
    }

    /// Flip one row's checkbox.
    pub fn toggle_row(&mut self, id: &str) {
        let checked = self.is_selected(id);
        self.set_row(id, !checked);
    }

    /// Check if a row is checked.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Get the state of the select-all box.
    pub fn all_checked(&self) -> bool {
        self.all
    }

    /// Number of checked rows.
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// Check if no row is checked.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Uncheck everything.
    pub fn clear(&mut self) {
        self.set_all(false);
    }

    /// Get the checked ids in the order the rows are displayed.
    pub fn selected_ids<'a>(&self, rows: impl IntoIterator<Item = &'a Row>) -> Vec<String> {
        rows.into_iter()
            .filter(|r| self.selected.contains(&r.id))
            .map(|r| r.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(ids: &[&str]) -> Vec<Row> {
        ids.iter().map(|id| Row::new(*id, vec![id.to_string()])).collect()
    }

    #[test]
    fn test_new_selection_is_empty() {
        let data = rows(&["1", "2"]);
        let selection = Selection::new(&data);
        assert!(selection.is_empty());
        assert!(!selection.all_checked());
    }

    #[test]
    fn test_select_all_checks_every_row() {
        let data = rows(&["1", "2", "3"]);
        let mut selection = Selection::new(&data);
        selection.set_all(true);
        assert_eq!(selection.count(), 3);
        assert!(selection.all_checked());

        selection.set_all(false);
        assert!(selection.is_empty());
        assert!(!selection.all_checked());
    }

    #[test]
    fn test_unchecking_a_row_clears_select_all() {
        let data = rows(&["1", "2"]);
        let mut selection = Selection::new(&data);
        selection.set_all(true);
        selection.set_row("2", false);
        assert!(!selection.all_checked());
        assert_eq!(selection.count(), 1);
    }

    #[test]
    fn test_checking_last_row_sets_select_all() {
        let data = rows(&["1", "2"]);
        let mut selection = Selection::new(&data);
        selection.toggle_row("1");
        assert!(!selection.all_checked());
        selection.toggle_row("2");
        assert!(selection.all_checked());
    }

    #[test]
    fn test_unknown_row_is_ignored() {
        let data = rows(&["1"]);
        let mut selection = Selection::new(&data);
        selection.set_row("99", true);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_selected_ids_follow_display_order() {
        let mut data = rows(&["1", "2", "3"]);
        let mut selection = Selection::new(&data);
        selection.set_row("1", true);
        selection.set_row("3", true);

        data.reverse();
        assert_eq!(selection.selected_ids(&data), vec!["3", "1"]);
    }

    #[test]
    fn test_sync_drops_missing_rows() {
        let data = rows(&["1", "2", "3"]);
        let mut selection = Selection::new(&data);
        selection.set_row("1", true);
        selection.set_row("3", true);

        let fewer = rows(&["1", "2"]);
        selection.sync(&fewer);
        assert!(selection.is_selected("1"));
        assert!(!selection.is_selected("3"));
        assert!(!selection.all_checked());

        selection.set_row("2", true);
        assert!(selection.all_checked());
    }
}
