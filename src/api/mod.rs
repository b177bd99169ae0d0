//! Admin server client and collaborators.
//!
//! This module provides form submission, table fetching, and page
//! navigation against the admin web server.

mod client;
pub mod error;
mod navigate;
pub mod types;

pub use client::AdminClient;
pub use error::ApiError;
pub use navigate::{BrowserNavigator, Navigator};
pub use types::{route_form, FormPayload, SubmitResponse};

#[cfg(test)]
pub(crate) use navigate::testing;
