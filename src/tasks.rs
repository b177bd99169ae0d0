//! Background tasks for server and file operations.
//!
//! The main loop never awaits a request inline. It hands the work to a
//! [`TaskSpawner`], keeps drawing, and polls the channel with `try_recv()`
//! for the [`ApiMessage`] each task sends when it finishes.

use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{AdminClient, FormPayload, SubmitResponse};
use crate::config::TableSource;
use crate::table::TableDocument;

/// Results sent from background tasks to the main loop.
#[derive(Debug)]
pub enum ApiMessage {
    /// A table document was loaded (initial load or reload).
    TableLoaded(Result<TableDocument, String>),

    /// The save route form was submitted.
    RouteSaved(Result<SubmitResponse, String>),

    /// A row was marked complete.
    MarkedComplete {
        id: String,
        result: Result<SubmitResponse, String>,
    },
}

/// Spawns background tasks that report back through the channel.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>) -> Self {
        Self { tx }
    }

    /// Spawn a task to load the table from a file or the server.
    pub fn spawn_load_table(&self, client: &AdminClient, source: TableSource) {
        let tx = self.tx.clone();
        match source {
            TableSource::File(path) => {
                debug!(path = %path, "Loading table from file");
                tokio::spawn(async move {
                    let path = PathBuf::from(path);
                    let result =
                        match tokio::task::spawn_blocking(move || TableDocument::load(&path)).await
                        {
                            Ok(loaded) => loaded.map_err(|e| e.to_string()),
                            Err(e) => Err(e.to_string()),
                        };
                    let _ = tx.send(ApiMessage::TableLoaded(result));
                });
            }
            TableSource::Remote(path) => {
                debug!(path = %path, "Loading table from server");
                let client = client.clone();
                tokio::spawn(async move {
                    let result = client.fetch_table(&path).await.map_err(|e| e.to_string());
                    let _ = tx.send(ApiMessage::TableLoaded(result));
                });
            }
        }
    }

    /// Spawn a task to post the save route form.
    pub fn spawn_save_route(&self, client: &AdminClient, endpoint: String, form: FormPayload) {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let result = client
                .submit(&endpoint, &form)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(ApiMessage::RouteSaved(result));
        });
    }

    /// Spawn a task to mark one row complete.
    pub fn spawn_mark_complete(&self, client: &AdminClient, endpoint: String, id: String) {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let result = client
                .post(&endpoint, &FormPayload::new())
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(ApiMessage::MarkedComplete { id, result });
        });
    }
}

/// Create a new task channel and spawner.
///
/// Returns a tuple of (receiver, spawner). The receiver should be polled
/// in the main event loop, and the spawner should be used to spawn tasks.
pub fn create_task_channel() -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx))
}
