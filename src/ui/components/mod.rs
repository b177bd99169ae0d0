//! Reusable UI components.

mod help_bar;
mod input;
mod modal;
mod notification;
mod table;

pub use help_bar::render_context_help;
pub use input::TextInput;
pub use modal::ErrorDialog;
pub use notification::{Notification, NotificationManager, NotificationType};
pub use table::{checkbox, header_label, TableHit, TableWidget};
