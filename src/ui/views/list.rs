//! Admin table view.
//!
//! Shows the sortable address table with row checkboxes and turns key
//! presses and header clicks into sorts or [`ListAction`]s for the app.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, warn};

use crate::cache::ScrollPosition;
use crate::events::KeyBindings;
use crate::table::{Row, Selection, SortableTable, TableDocument, TableError};
use crate::ui::components::{TableHit, TableWidget};
use crate::ui::theme::theme;

/// Title used when the document has none.
const DEFAULT_TITLE: &str = "Addresses";

/// Pages that can be opened from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The route builder page.
    BuildRoute,
    /// The saved routes page.
    ViewRoutes,
}

/// Actions the app handles on behalf of the table view.
#[derive(Debug)]
pub enum ListAction {
    /// The table was re-sorted.
    Sorted,
    /// A sort could not be applied; the table is unchanged.
    SortFailed(TableError),
    /// Open the save route form for the checked rows.
    OpenRouteForm,
    /// Mark the row with this id complete.
    MarkComplete(String),
    /// Open a page in the browser.
    Navigate(Destination),
    /// Fetch the table again.
    Reload,
    /// Show the help screen.
    OpenHelp,
    /// Leave the application.
    Quit,
}

/// The admin table view.
pub struct ListView {
    table: Option<SortableTable>,
    selection: Selection,
    widget: TableWidget,
    focused_header: usize,
    title: String,
    loading: bool,
    bindings: KeyBindings,
}

impl ListView {
    /// Create an empty view.
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            table: None,
            selection: Selection::default(),
            widget: TableWidget::new(),
            focused_header: 0,
            title: DEFAULT_TITLE.to_string(),
            loading: false,
            bindings,
        }
    }

    /// Show or hide the loading message.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Check if a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Show a freshly loaded document.
    ///
    /// When the headers are unchanged the current sort is re-applied to
    /// the new rows; otherwise the table is bound anew and sorted on
    /// `default_column`. If sorting fails the rows are still shown, in the
    /// order received, and the error is returned.
    pub fn load(
        &mut self,
        mut document: TableDocument,
        default_column: usize,
    ) -> Result<(), TableError> {
        self.loading = false;
        document.fill_missing_ids();
        self.title = if document.title.trim().is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            document.title.clone()
        };

        let result = match self.table.as_mut() {
            Some(table) if table.headers() == document.headers.as_slice() => {
                table.replace_rows(document.rows)
            }
            _ => {
                let headers = document.headers.clone();
                let rows = document.rows.clone();
                match SortableTable::from_document(document, default_column) {
                    Ok(table) => {
                        self.table = Some(table);
                        Ok(())
                    }
                    Err(e) => {
                        warn!(error = %e, default_column, "Initial sort failed");
                        self.table = Some(SortableTable::unsorted(headers, rows));
                        Err(e)
                    }
                }
            }
        };

        if let Some(table) = &self.table {
            self.selection.sync(table.rows());
            self.widget.clamp(table.len());
            self.focused_header = self
                .focused_header
                .min(table.column_count().saturating_sub(1));
            debug!(rows = table.len(), columns = table.column_count(), "Table loaded");
        }
        result
    }

    /// Get the table, once loaded.
    pub fn table(&self) -> Option<&SortableTable> {
        self.table.as_ref()
    }

    /// Get the row checkboxes.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Uncheck every row.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Ids of the checked rows, in display order.
    pub fn selected_ids(&self) -> Vec<String> {
        match &self.table {
            Some(table) => self.selection.selected_ids(table.rows()),
            None => Vec::new(),
        }
    }

    /// Get the highlighted row.
    pub fn highlighted_row(&self) -> Option<&Row> {
        let index = self.widget.selected()?;
        self.table.as_ref()?.row(index)
    }

    /// Get the header that `s` activates.
    pub fn focused_header(&self) -> usize {
        self.focused_header
    }

    /// Get the current scroll position.
    pub fn scroll_position(&self) -> ScrollPosition {
        self.widget.scroll_position()
    }

    /// Restore a saved scroll position.
    pub fn restore_scroll(&mut self, position: ScrollPosition) {
        let rows = self.table.as_ref().map_or(0, SortableTable::len);
        self.widget.restore(position, rows);
    }

    /// Activate a column header.
    pub fn sort_by(&mut self, column: usize) -> Option<ListAction> {
        let table = self.table.as_mut()?;
        match table.activate(column) {
            Ok(_) => {
                self.focused_header = column;
                Some(ListAction::Sorted)
            }
            Err(e) => {
                warn!(column, error = %e, "Sort failed");
                Some(ListAction::SortFailed(e))
            }
        }
    }

    fn row_count(&self) -> usize {
        self.table.as_ref().map_or(0, SortableTable::len)
    }

    fn column_count(&self) -> usize {
        self.table.as_ref().map_or(0, SortableTable::column_count)
    }

    fn toggle_row_at(&mut self, index: usize) {
        let Some(id) = self.table.as_ref().and_then(|t| t.row(index)).map(|r| r.id.clone())
        else {
            return;
        };
        self.selection.toggle_row(&id);
    }

    /// Handle a key press.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ListAction> {
        let rows = self.row_count();

        if self.bindings.is_down(&key) {
            self.widget.next(rows);
            return None;
        }
        if self.bindings.is_up(&key) {
            self.widget.previous();
            return None;
        }
        if self.bindings.is_top(&key) {
            self.widget.first(rows);
            return None;
        }
        if self.bindings.is_bottom(&key) {
            self.widget.last(rows);
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }

        match key.code {
            KeyCode::Char(c @ '1'..='9') => {
                let column = c as usize - '1' as usize;
                self.sort_by(column)
            }
            KeyCode::Char('<') => {
                self.focused_header = self.focused_header.saturating_sub(1);
                None
            }
            KeyCode::Char('>') => {
                let last = self.column_count().saturating_sub(1);
                self.focused_header = (self.focused_header + 1).min(last);
                None
            }
            KeyCode::Char('s') => self.sort_by(self.focused_header),
            KeyCode::Char(' ') => {
                if let Some(index) = self.widget.selected() {
                    self.toggle_row_at(index);
                }
                None
            }
            KeyCode::Char('a') => {
                self.selection.toggle_all();
                None
            }
            KeyCode::Char('r') if self.table.is_some() => Some(ListAction::OpenRouteForm),
            KeyCode::Char('c') => self
                .highlighted_row()
                .map(|row| ListAction::MarkComplete(row.id.clone())),
            KeyCode::Char('b') => Some(ListAction::Navigate(Destination::BuildRoute)),
            KeyCode::Char('v') => Some(ListAction::Navigate(Destination::ViewRoutes)),
            KeyCode::Char('R') => Some(ListAction::Reload),
            KeyCode::Char('?') => Some(ListAction::OpenHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(ListAction::Quit),
            _ => None,
        }
    }

    /// Handle a mouse press.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<ListAction> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }

        match self.widget.hit_test(mouse.column, mouse.row)? {
            TableHit::Header(column) => self.sort_by(column),
            TableHit::SelectAll => {
                self.selection.toggle_all();
                None
            }
            TableHit::Checkbox(index) => {
                self.toggle_row_at(index);
                None
            }
            TableHit::Row(index) => {
                self.widget.select(Some(index));
                None
            }
        }
    }

    /// Footer status: checked count and active sort.
    pub fn status_line(&self) -> String {
        let Some(table) = &self.table else {
            return String::new();
        };

        let mut status = format!("{} of {} checked", self.selection.count(), table.len());
        if let (Some(column), Some(direction)) =
            (table.state().active_column, table.state().direction())
        {
            if let Some(header) = table.headers().get(column) {
                status.push_str(&format!("  sorted by {} {}", header, direction.label()));
            }
        }
        status
    }

    /// Render the view.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();

        match &self.table {
            Some(table) => {
                let title = if self.loading {
                    format!("{} (refreshing)", self.title)
                } else {
                    self.title.clone()
                };
                self.widget.render(
                    frame,
                    area,
                    &title,
                    table,
                    &self.selection,
                    Some(self.focused_header),
                );
            }
            None => {
                let message = if self.loading {
                    "Loading table..."
                } else {
                    "No table loaded. Press R to reload."
                };
                let paragraph = Paragraph::new(message)
                    .style(Style::default().fg(t.dim))
                    .alignment(Alignment::Center)
                    .block(
                        Block::default()
                            .title(format!(" {} ", self.title))
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(t.dim)),
                    );
                frame.render_widget(paragraph, area);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::SortDirection;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn document() -> TableDocument {
        TableDocument {
            title: "Pickups".to_string(),
            headers: vec!["Name".to_string(), "Date".to_string()],
            rows: vec![
                Row::new("a", vec!["Alice".to_string(), "2024-01-02".to_string()]),
                Row::new("c", vec!["carol".to_string(), "2023-12-31".to_string()]),
                Row::new("b", vec!["Bob".to_string(), "2024-01-01".to_string()]),
            ],
        }
    }

    fn loaded() -> ListView {
        let mut view = ListView::new(KeyBindings::default());
        view.load(document(), 0).unwrap();
        view
    }

    fn names(view: &ListView) -> Vec<String> {
        view.table()
            .unwrap()
            .rows()
            .iter()
            .map(|r| r.cells[0].clone())
            .collect()
    }

    #[test]
    fn test_load_sorts_default_column_descending() {
        let view = loaded();
        assert_eq!(names(&view), vec!["carol", "Bob", "Alice"]);
        assert_eq!(
            view.table().unwrap().indicator(0),
            Some(SortDirection::Descending)
        );
    }

    #[test]
    fn test_digit_keys_sort() {
        let mut view = loaded();
        assert!(matches!(
            view.handle_input(key(KeyCode::Char('1'))),
            Some(ListAction::Sorted)
        ));
        assert_eq!(names(&view), vec!["Alice", "Bob", "carol"]);

        view.handle_input(key(KeyCode::Char('2')));
        assert_eq!(names(&view), vec!["Alice", "Bob", "carol"]);
        assert_eq!(view.table().unwrap().indicator(0), None);
        assert_eq!(
            view.table().unwrap().indicator(1),
            Some(SortDirection::Descending)
        );
    }

    #[test]
    fn test_missing_column_reports_failure() {
        let mut view = loaded();
        assert!(matches!(
            view.handle_input(key(KeyCode::Char('5'))),
            Some(ListAction::SortFailed(TableError::ColumnOutOfRange { column: 4, .. }))
        ));
        assert_eq!(names(&view), vec!["carol", "Bob", "Alice"]);
    }

    #[test]
    fn test_focused_header_sort() {
        let mut view = loaded();
        view.handle_input(key(KeyCode::Char('>')));
        view.handle_input(key(KeyCode::Char('>')));
        assert_eq!(view.focused_header(), 1);
        view.handle_input(key(KeyCode::Char('s')));
        assert_eq!(
            view.table().unwrap().indicator(1),
            Some(SortDirection::Descending)
        );
        view.handle_input(key(KeyCode::Char('<')));
        assert_eq!(view.focused_header(), 0);
    }

    #[test]
    fn test_reload_keeps_sort() {
        let mut view = loaded();
        view.handle_input(key(KeyCode::Char('1')));

        let mut next = document();
        next.rows.push(Row::new("d", vec!["Dave".to_string(), "2024-02-01".to_string()]));
        view.load(next, 0).unwrap();

        assert_eq!(names(&view), vec!["Alice", "Bob", "carol", "Dave"]);
        assert_eq!(
            view.table().unwrap().indicator(0),
            Some(SortDirection::Ascending)
        );
    }

    #[test]
    fn test_bad_default_column_still_shows_rows() {
        let mut view = ListView::new(KeyBindings::default());
        assert!(view.load(document(), 7).is_err());
        assert_eq!(names(&view), vec!["Alice", "carol", "Bob"]);
        assert_eq!(view.table().unwrap().state().active_column, None);
    }

    #[test]
    fn test_checkboxes_follow_rows_through_sorting() {
        let mut view = loaded();
        view.handle_input(key(KeyCode::Char(' ')));
        assert_eq!(view.selected_ids(), vec!["c"]);

        view.handle_input(key(KeyCode::Char('1')));
        assert_eq!(view.selected_ids(), vec!["c"]);
        assert!(!view.selection().all_checked());

        view.handle_input(key(KeyCode::Char('a')));
        assert!(view.selection().all_checked());
        assert_eq!(view.selected_ids(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_action_keys() {
        let mut view = loaded();
        assert!(matches!(
            view.handle_input(key(KeyCode::Char('c'))),
            Some(ListAction::MarkComplete(id)) if id == "c"
        ));
        assert!(matches!(
            view.handle_input(key(KeyCode::Char('r'))),
            Some(ListAction::OpenRouteForm)
        ));
        assert!(matches!(
            view.handle_input(key(KeyCode::Char('b'))),
            Some(ListAction::Navigate(Destination::BuildRoute))
        ));
        assert!(matches!(
            view.handle_input(key(KeyCode::Char('v'))),
            Some(ListAction::Navigate(Destination::ViewRoutes))
        ));
        assert!(matches!(
            view.handle_input(KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT)),
            Some(ListAction::Reload)
        ));
    }

    #[test]
    fn test_keys_without_table() {
        let mut view = ListView::new(KeyBindings::default());
        assert!(view.handle_input(key(KeyCode::Char('1'))).is_none());
        assert!(view.handle_input(key(KeyCode::Char('r'))).is_none());
        assert!(view.handle_input(key(KeyCode::Char('c'))).is_none());
        assert!(view.selected_ids().is_empty());
    }

    #[test]
    fn test_header_click_sorts() {
        let mut view = loaded();
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal.draw(|frame| view.render(frame, frame.area())).unwrap();

        // Border, then the header row; the first data header sits right of
        // the highlight symbol and checkbox column.
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 8,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };
        assert!(matches!(view.handle_mouse(click), Some(ListAction::Sorted)));
        assert_eq!(
            view.table().unwrap().indicator(0),
            Some(SortDirection::Ascending)
        );

        let right_click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            ..click
        };
        assert!(view.handle_mouse(right_click).is_none());
    }

    #[test]
    fn test_restore_scroll_clamps() {
        let mut view = loaded();
        view.restore_scroll(ScrollPosition::new(10, 10));
        assert_eq!(view.scroll_position().selected, 2);
    }

    #[test]
    fn test_status_line() {
        let mut view = loaded();
        view.handle_input(key(KeyCode::Char(' ')));
        assert_eq!(view.status_line(), "1 of 3 checked  sorted by Name desc");
    }
}
