//! Admin server connection configuration.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Placeholder replaced by the row id in the mark-complete endpoint.
pub const ID_PLACEHOLDER: &str = "{id}";

/// The admin server the console talks to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// The server base URL (e.g., "https://admin.example.com").
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
        }
    }
}

impl ServerConfig {
    /// Validate the server configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` if the URL is empty or does
    /// not use an http(s) scheme.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "server URL cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "server URL '{}' must start with http:// or https://",
                self.base_url
            )));
        }

        Ok(())
    }

    /// Join an endpoint path onto the base URL.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}

/// Server paths used by the console.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Endpoints {
    /// The admin home page.
    pub admin: String,
    /// The route builder page; saved routes are posted here.
    pub build_route: String,
    /// The saved routes page.
    pub view_routes: String,
    /// Marks one stop complete; must contain `{id}`.
    pub mark_complete: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            admin: "/admin".to_string(),
            build_route: "/build-route".to_string(),
            view_routes: "/view-routes".to_string(),
            mark_complete: "/mark_complete/{id}".to_string(),
        }
    }
}

impl Endpoints {
    /// Validate every endpoint path.
    pub fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("admin", &self.admin),
            ("build_route", &self.build_route),
            ("view_routes", &self.view_routes),
            ("mark_complete", &self.mark_complete),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::ValidationError(format!(
                    "endpoint '{}' must start with '/', got '{}'",
                    name, path
                )));
            }
        }

        if !self.mark_complete.contains(ID_PLACEHOLDER) {
            return Err(ConfigError::ValidationError(format!(
                "endpoint 'mark_complete' must contain {}",
                ID_PLACEHOLDER
            )));
        }

        Ok(())
    }

    /// Build the mark-complete path for a row id.
    pub fn mark_complete_path(&self, id: &str) -> String {
        self.mark_complete
            .replace(ID_PLACEHOLDER, &urlencoding::encode(id))
    }
}
