//! Toast notifications for user feedback.
//!
//! Transient messages (success, error, info, warning) stacked in the
//! bottom-right corner and dropped once they expire.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// The type of notification, which determines its appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    /// Informational message (blue).
    Info,
    /// Success message (green).
    Success,
    /// Warning message (yellow).
    Warning,
    /// Error message (red).
    Error,
}

impl NotificationType {
    /// Get the icon for this notification type.
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationType::Info => "ℹ",
            NotificationType::Success => "✓",
            NotificationType::Warning => "⚠",
            NotificationType::Error => "✗",
        }
    }

    /// Get the color for this notification type.
    pub fn color(&self) -> Color {
        match self {
            NotificationType::Info => Color::Blue,
            NotificationType::Success => Color::Green,
            NotificationType::Warning => Color::Yellow,
            NotificationType::Error => Color::Red,
        }
    }

    /// How long a notification of this type stays visible.
    fn default_duration(&self) -> Duration {
        match self {
            NotificationType::Info | NotificationType::Success => Duration::from_secs(3),
            NotificationType::Warning | NotificationType::Error => Duration::from_secs(5),
        }
    }
}

/// A single notification message.
#[derive(Debug, Clone)]
pub struct Notification {
    /// The notification message.
    pub message: String,
    /// The type of notification.
    pub notification_type: NotificationType,
    /// When the notification was created.
    created_at: Instant,
    /// How long the notification should be displayed.
    duration: Duration,
}

impl Notification {
    /// Create a notification with the default duration for its type.
    pub fn new(message: impl Into<String>, notification_type: NotificationType) -> Self {
        Self {
            message: message.into(),
            notification_type,
            created_at: Instant::now(),
            duration: notification_type.default_duration(),
        }
    }

    /// Create an error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Error)
    }

    /// Override the display duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Check if the notification has expired.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }
}

/// Manages the visible notifications.
#[derive(Debug)]
pub struct NotificationManager {
    notifications: VecDeque<Notification>,
    max_visible: usize,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationManager {
    /// Create a new notification manager showing at most three toasts.
    pub fn new() -> Self {
        Self {
            notifications: VecDeque::new(),
            max_visible: 3,
        }
    }

    /// Add a notification, dropping the oldest beyond the limit.
    pub fn push(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
        while self.notifications.len() > self.max_visible {
            self.notifications.pop_front();
        }
    }

    /// Add an info notification.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationType::Info));
    }

    /// Add a success notification.
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationType::Success));
    }

    /// Add a warning notification.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationType::Warning));
    }

    /// Add an error notification.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notification::error(message));
    }

    /// Remove expired notifications. Called on every tick.
    pub fn tick(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    /// Check if there are any notifications.
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Get the number of notifications.
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    /// Get an iterator over the notifications, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Render all notifications in the bottom-right corner of the given area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let width = 50.min(area.width.saturating_sub(4));
        // Borders plus the icon prefix
        let inner_width = width.saturating_sub(4).max(1) as usize;

        let heights: Vec<u16> = self
            .notifications
            .iter()
            .map(|n| {
                let text_len = n.message.chars().count() + 2;
                text_len.div_ceil(inner_width) as u16 + 2
            })
            .collect();

        let total_height = heights
            .iter()
            .sum::<u16>()
            .min(area.height.saturating_sub(2));

        let x = area.x + area.width.saturating_sub(width + 2);
        let y = area.y + area.height.saturating_sub(total_height + 1);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(heights.iter().map(|&h| Constraint::Length(h)))
            .split(Rect::new(x, y, width, total_height));

        for (notification, chunk) in self.notifications.iter().zip(chunks.iter()) {
            render_notification(notification, frame, *chunk);
        }
    }
}

fn render_notification(notification: &Notification, frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let kind = notification.notification_type;
    let style = Style::default().fg(kind.color());

    let text = Line::from(vec![
        Span::styled(format!("{} ", kind.icon()), style.add_modifier(Modifier::BOLD)),
        Span::styled(notification.message.as_str(), style),
    ]);

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).border_style(style))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_durations() {
        let info = Notification::new("Loaded", NotificationType::Info);
        assert_eq!(info.duration, Duration::from_secs(3));
        let error = Notification::error("Failed");
        assert_eq!(error.duration, Duration::from_secs(5));
    }

    #[test]
    fn test_notification_expiry() {
        let expired = Notification::error("gone").with_duration(Duration::ZERO);
        std::thread::sleep(Duration::from_millis(5));
        assert!(expired.is_expired());
        assert!(!Notification::error("still here").is_expired());
    }

    #[test]
    fn test_manager_limits_visible() {
        let mut manager = NotificationManager::new();
        for i in 0..5 {
            manager.info(format!("message {}", i));
        }
        assert_eq!(manager.len(), 3);
        assert_eq!(manager.iter().next().unwrap().message, "message 2");
    }

    #[test]
    fn test_manager_tick_removes_expired() {
        let mut manager = NotificationManager::new();
        manager.push(Notification::error("old").with_duration(Duration::ZERO));
        manager.success("fresh");
        std::thread::sleep(Duration::from_millis(5));
        manager.tick();
        assert_eq!(manager.len(), 1);
        assert_eq!(
            manager.iter().next().unwrap().notification_type,
            NotificationType::Success
        );
    }
}
