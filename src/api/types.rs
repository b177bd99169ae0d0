//! Admin server request and response types.

use serde::{Deserialize, Serialize};

/// Field name used for each selected address in a saved route.
pub const SELECTED_ADDRESSES_FIELD: &str = "selected_addresses";

/// Response body returned by form endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitResponse {
    /// Whether the server accepted the submission. Absent means no.
    #[serde(default)]
    pub success: bool,
    /// Optional explanation, usually present on failure.
    #[serde(default)]
    pub message: Option<String>,
}

impl SubmitResponse {
    /// A successful response without a message.
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }
}

/// An url-encoded form body.
///
/// Keeps insertion order and allows repeated keys, like an HTML form with
/// several checkboxes sharing one name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    fields: Vec<(String, String)>,
}

impl FormPayload {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Append one field per value, all under the same name.
    pub fn repeated<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.fields.push((name.to_string(), value.into()));
        }
        self
    }

    /// Get all values for a field name.
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Get the fields in insertion order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Check if the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Build the form body for saving a route.
pub fn route_form(name: &str, day: &str, address_ids: &[String]) -> FormPayload {
    FormPayload::new()
        .field("route_name", name)
        .field("trash_day", day)
        .repeated(SELECTED_ADDRESSES_FIELD, address_ids.iter().cloned())
}
