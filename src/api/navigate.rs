//! Page navigation.
//!
//! Admin actions that lead to another server page hand the URL to a
//! [`Navigator`]. The default implementation opens it in the system browser.

use tracing::{debug, warn};

use super::error::{ApiError, Result};

/// Fire-and-forget request to show a URL.
pub trait Navigator {
    /// Navigate to `url`.
    fn navigate(&self, url: &str) -> Result<()>;
}

/// Opens URLs in the user's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &str) -> Result<()> {
        debug!(url, "Opening in browser");
        open::that_detached(url).map_err(|e| {
            warn!(url, error = %e, "Failed to open browser");
            ApiError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use super::*;

    /// Records navigations instead of performing them.
    #[derive(Debug, Default)]
    pub struct RecordingNavigator {
        pub visited: RefCell<Vec<String>>,
        pub fail: bool,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, url: &str) -> Result<()> {
            if self.fail {
                return Err(ApiError::Navigation {
                    url: url.to_string(),
                    reason: "no browser".to_string(),
                });
            }
            self.visited.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    impl<N: Navigator + ?Sized> Navigator for std::rc::Rc<N> {
        fn navigate(&self, url: &str) -> Result<()> {
            (**self).navigate(url)
        }
    }
}
