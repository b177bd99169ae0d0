//! Full-screen views.

mod help;
mod list;
mod route_form;

pub use help::{HelpAction, HelpView};
pub use list::{Destination, ListAction, ListView};
pub use route_form::{RouteFormAction, RouteFormView};
