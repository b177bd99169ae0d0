//! Sortable table widget.
//!
//! Applies a [`SortableTable`]'s row order and header markers to the
//! terminal. The widget owns only display state (highlighted row, scroll
//! offset, and the geometry of the last frame for mouse hit testing); the
//! ordering itself always comes from the table.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, HighlightSpacing, Row, Table, TableState},
    Frame,
};

use crate::cache::ScrollPosition;
use crate::table::{SortDirection, SortableTable, Selection};

/// Symbol drawn in front of the highlighted row.
const HIGHLIGHT_SYMBOL: &str = "▶ ";

/// Width of the checkbox column.
const CHECKBOX_WIDTH: u16 = 3;

/// What a mouse click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableHit {
    /// The select-all checkbox in the header row.
    SelectAll,
    /// A column header.
    Header(usize),
    /// The checkbox of a row (display position).
    Checkbox(usize),
    /// Any other cell of a row (display position).
    Row(usize),
}

/// Screen geometry of the last rendered frame.
#[derive(Debug, Clone, Default)]
struct TableLayout {
    header_y: u16,
    body: Rect,
    checkbox: (u16, u16),
    columns: Vec<(u16, u16)>,
    offset: usize,
    rows: usize,
}

/// Display state for a sortable table.
#[derive(Debug, Default)]
pub struct TableWidget {
    state: TableState,
    layout: Option<TableLayout>,
}

/// Header label with the sort marker appended for the active column.
pub fn header_label(name: &str, indicator: Option<SortDirection>) -> String {
    match indicator {
        Some(direction) => format!("{} {}", name, direction.marker()),
        None => name.to_string(),
    }
}

/// Checkbox glyph.
pub fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

impl TableWidget {
    /// Create a widget with the first row highlighted.
    pub fn new() -> Self {
        Self {
            state: TableState::default().with_selected(Some(0)),
            layout: None,
        }
    }

    /// Get the highlighted row position.
    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Highlight a row position.
    pub fn select(&mut self, index: Option<usize>) {
        self.state.select(index);
    }

    /// Get the current scroll position.
    pub fn scroll_position(&self) -> ScrollPosition {
        ScrollPosition::new(self.state.selected().unwrap_or(0), self.state.offset())
    }

    /// Restore a scroll position, clamped to `rows`.
    pub fn restore(&mut self, position: ScrollPosition, rows: usize) {
        let position = position.clamped(rows);
        *self.state.offset_mut() = position.offset;
        self.state
            .select(if rows == 0 { None } else { Some(position.selected) });
    }

    /// Keep the highlight inside a table of `rows` rows.
    pub fn clamp(&mut self, rows: usize) {
        let position = self.scroll_position();
        self.restore(position, rows);
    }

    /// Move the highlight down one row.
    pub fn next(&mut self, rows: usize) {
        if rows == 0 {
            return;
        }
        let next = self.state.selected().map_or(0, |i| (i + 1).min(rows - 1));
        self.state.select(Some(next));
    }

    /// Move the highlight up one row.
    pub fn previous(&mut self) {
        let previous = self.state.selected().map_or(0, |i| i.saturating_sub(1));
        self.state.select(Some(previous));
    }

    /// Highlight the first row.
    pub fn first(&mut self, rows: usize) {
        if rows > 0 {
            self.state.select(Some(0));
        }
    }

    /// Highlight the last row.
    pub fn last(&mut self, rows: usize) {
        if rows > 0 {
            self.state.select(Some(rows - 1));
        }
    }

    /// Map a screen position from the last frame to a table element.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<TableHit> {
        let layout = self.layout.as_ref()?;
        let within = |(start, width): (u16, u16)| x >= start && x < start + width;

        if y == layout.header_y {
            if within(layout.checkbox) {
                return Some(TableHit::SelectAll);
            }
            return layout
                .columns
                .iter()
                .position(|&span| within(span))
                .map(TableHit::Header);
        }

        let body = layout.body;
        if y < body.y || y >= body.bottom() || x < body.x || x >= body.right() {
            return None;
        }

        let index = layout.offset + usize::from(y - body.y);
        if index >= layout.rows {
            return None;
        }

        if within(layout.checkbox) {
            Some(TableHit::Checkbox(index))
        } else {
            Some(TableHit::Row(index))
        }
    }

    /// Render the table.
    ///
    /// `focused_header` is underlined so keyboard users can see which
    /// column `s` activates.
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        table: &SortableTable,
        selection: &Selection,
        focused_header: Option<usize>,
    ) {
        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);

        let widths: Vec<Constraint> = std::iter::once(Constraint::Length(CHECKBOX_WIDTH))
            .chain(table.headers().iter().map(|_| Constraint::Fill(1)))
            .collect();

        let header = Row::new(
            std::iter::once(Cell::from(checkbox(selection.all_checked()))).chain(
                table.headers().iter().enumerate().map(|(column, name)| {
                    let mut style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
                    if table.indicator(column).is_some() {
                        style = style.fg(Color::Yellow);
                    }
                    if focused_header == Some(column) {
                        style = style.add_modifier(Modifier::UNDERLINED);
                    }
                    Cell::from(Span::styled(
                        header_label(name, table.indicator(column)),
                        style,
                    ))
                }),
            ),
        )
        .bottom_margin(1);

        let rows = table.rows().iter().map(|row| {
            let checked = selection.is_selected(&row.id);
            let style = if checked {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            Row::new(
                std::iter::once(Cell::from(checkbox(checked)))
                    .chain(row.cells.iter().map(|c| Cell::from(c.as_str()))),
            )
            .style(style)
        });

        let widget = Table::new(rows, widths.clone())
            .header(header)
            .block(block)
            .column_spacing(1)
            .flex(Flex::Start)
            .highlight_spacing(HighlightSpacing::Always)
            .highlight_symbol(HIGHLIGHT_SYMBOL)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        frame.render_stateful_widget(widget, area, &mut self.state);

        let symbol_width = HIGHLIGHT_SYMBOL.chars().count() as u16;
        let columns_area = Rect::new(
            inner.x + symbol_width,
            inner.y,
            inner.width.saturating_sub(symbol_width),
            1,
        );
        let spans: Vec<(u16, u16)> = Layout::horizontal(widths)
            .flex(Flex::Start)
            .spacing(1)
            .split(columns_area)
            .iter()
            .map(|r| (r.x, r.width))
            .collect();

        let body_top = inner.y.saturating_add(2);
        self.layout = Some(TableLayout {
            header_y: inner.y,
            body: Rect::new(
                inner.x,
                body_top,
                inner.width,
                inner.bottom().saturating_sub(body_top),
            ),
            checkbox: spans.first().copied().unwrap_or_default(),
            columns: spans.into_iter().skip(1).collect(),
            offset: self.state.offset(),
            rows: table.len(),
        });
    }
}
