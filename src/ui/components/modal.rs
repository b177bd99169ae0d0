//! Modal error dialog.
//!
//! The terminal counterpart of a browser alert: blocks input until the
//! operator dismisses it with Enter or Esc.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::error::AppError;

/// A dismissible error dialog.
#[derive(Debug, Default)]
pub struct ErrorDialog {
    title: String,
    message: String,
    hint: Option<String>,
    visible: bool,
}

impl ErrorDialog {
    /// Create a hidden dialog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an application error.
    pub fn show(&mut self, error: &AppError) {
        self.title = "Error".to_string();
        self.message = error.user_message();
        self.hint = error.suggested_action().map(str::to_string);
        self.visible = true;
    }

    /// Show a custom message.
    pub fn show_message(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.title = title.into();
        self.message = message.into();
        self.hint = None;
        self.visible = true;
    }

    /// Hide the dialog.
    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    /// Check if the dialog is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Get the displayed message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Render the dialog centered over `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let width = 60.min(area.width.saturating_sub(4));
        let height = 9.min(area.height);
        let dialog = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );

        let mut lines = vec![Line::raw(""), Line::raw(self.message.clone())];
        if let Some(hint) = &self.hint {
            lines.push(Line::raw(""));
            lines.push(Line::styled(hint.clone(), Style::default().fg(Color::Yellow)));
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Press Enter to dismiss",
            Style::default().fg(Color::DarkGray),
        ));

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));

        frame.render_widget(Clear, dialog);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            dialog,
        );
    }
}
