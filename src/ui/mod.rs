//! User interface components and views.
//!
//! Rendering only; state transitions live in [`crate::app`].

pub mod components;
pub mod theme;
mod views;

pub use components::{
    render_context_help, ErrorDialog, Notification, NotificationManager, NotificationType,
    TableWidget, TextInput,
};
pub use theme::{init_theme, theme, Theme};
pub use views::{
    Destination, HelpAction, HelpView, ListAction, ListView, RouteFormAction, RouteFormView,
};
