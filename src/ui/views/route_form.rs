//! Save route form.
//!
//! Collects a route name and trash day for the checked addresses. The form
//! can be saved right away; only an in-flight save blocks another one.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::components::TextInput;
use crate::ui::theme::theme;

/// Actions returned from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteFormAction {
    /// Save the route.
    Submit {
        route_name: String,
        trash_day: String,
    },
    /// Close the form without saving.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    RouteName,
    TrashDay,
}

/// The save route form.
#[derive(Debug)]
pub struct RouteFormView {
    route_name: TextInput,
    trash_day: TextInput,
    focus: Field,
    submitting: bool,
    address_count: usize,
}

impl RouteFormView {
    /// Create a form for `address_count` checked addresses.
    pub fn new(address_count: usize) -> Self {
        Self {
            route_name: TextInput::with_placeholder("e.g. North loop"),
            trash_day: TextInput::with_placeholder("e.g. Tuesday"),
            focus: Field::RouteName,
            submitting: false,
            address_count,
        }
    }

    /// Check if the save button is enabled.
    pub fn can_submit(&self) -> bool {
        !self.submitting
    }

    /// Mark a save as in flight (or finished).
    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    /// Check if a save is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Number of addresses the route will contain.
    pub fn address_count(&self) -> usize {
        self.address_count
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            Field::RouteName => &mut self.route_name,
            Field::TrashDay => &mut self.trash_day,
        }
    }

    fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Field::RouteName => Field::TrashDay,
            Field::TrashDay => Field::RouteName,
        };
    }

    /// Handle a key press.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<RouteFormAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => Some(RouteFormAction::Cancel),
            (KeyCode::Tab, _) | (KeyCode::BackTab, _) | (KeyCode::Up, _) | (KeyCode::Down, _) => {
                self.switch_focus();
                None
            }
            (KeyCode::Enter, _) if self.can_submit() => Some(RouteFormAction::Submit {
                route_name: self.route_name.value().trim().to_string(),
                trash_day: self.trash_day.value().trim().to_string(),
            }),
            (KeyCode::Enter, _) => None,
            (_, KeyModifiers::CONTROL) => None,
            _ => {
                self.focused_input().handle_input(key);
                None
            }
        }
    }

    /// Render the form as a centered popup.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let popup = centered(area, 50, 13);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Save Route ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let [summary, name, day, button] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new(format!("{} addresses selected", self.address_count))
                .style(Style::default().fg(t.dim)),
            summary,
        );
        self.route_name
            .render(frame, name, "Route name", self.focus == Field::RouteName);
        self.trash_day
            .render(frame, day, "Trash day", self.focus == Field::TrashDay);

        let (label, style) = if self.submitting {
            ("[ Saving... ]", Style::default().fg(t.dim))
        } else {
            (
                "[ Save ]",
                Style::default().fg(t.success).add_modifier(Modifier::BOLD),
            )
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(label, style))).alignment(Alignment::Center),
            button,
        );
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut RouteFormView, text: &str) {
        for c in text.chars() {
            form.handle_input(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_untouched_form_can_be_saved() {
        let mut form = RouteFormView::new(2);
        assert!(form.can_submit());
        assert_eq!(
            form.handle_input(key(KeyCode::Enter)),
            Some(RouteFormAction::Submit {
                route_name: String::new(),
                trash_day: String::new(),
            })
        );
    }

    #[test]
    fn test_submit_collects_both_fields() {
        let mut form = RouteFormView::new(1);
        type_text(&mut form, "North loop ");
        form.handle_input(key(KeyCode::Tab));
        type_text(&mut form, "Tuesday");

        assert_eq!(
            form.handle_input(key(KeyCode::Enter)),
            Some(RouteFormAction::Submit {
                route_name: "North loop".to_string(),
                trash_day: "Tuesday".to_string(),
            })
        );
    }

    #[test]
    fn test_no_double_submit() {
        let mut form = RouteFormView::new(1);
        type_text(&mut form, "A");
        form.set_submitting(true);
        assert_eq!(form.handle_input(key(KeyCode::Enter)), None);
        form.set_submitting(false);
        assert!(form.handle_input(key(KeyCode::Enter)).is_some());
    }

    #[test]
    fn test_escape_cancels() {
        let mut form = RouteFormView::new(0);
        assert_eq!(
            form.handle_input(key(KeyCode::Esc)),
            Some(RouteFormAction::Cancel)
        );
    }

    #[test]
    fn test_centered_fits_small_area() {
        let area = Rect::new(0, 0, 30, 8);
        let popup = centered(area, 50, 13);
        assert_eq!(popup, area);
    }
}
