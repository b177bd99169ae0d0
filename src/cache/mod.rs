//! Persisted view state.
//!
//! Scroll positions are written to disk before a reload so the table comes
//! back where the operator left it. Features include:
//! - One JSON file holding positions for every table key
//! - Restored positions clamped to the current row count
//! - Corrupt or missing files treated as empty

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Name of the state file inside the data directory.
const STATE_FILE_NAME: &str = "view_state.json";

/// Where a table view was scrolled to.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrollPosition {
    /// Index of the highlighted row.
    pub selected: usize,
    /// Index of the first visible row.
    pub offset: usize,
}

impl ScrollPosition {
    /// Create a scroll position.
    pub fn new(selected: usize, offset: usize) -> Self {
        Self { selected, offset }
    }

    /// Clamp the position to a table with `rows` rows.
    pub fn clamped(self, rows: usize) -> Self {
        if rows == 0 {
            return Self::default();
        }
        let last = rows - 1;
        let selected = self.selected.min(last);
        Self {
            selected,
            offset: self.offset.min(selected),
        }
    }
}

/// Disk-backed store of scroll positions keyed by table.
#[derive(Debug, Clone)]
pub struct ViewStateStore {
    /// Directory holding the state file.
    base_dir: PathBuf,
}

impl ViewStateStore {
    /// Create a store rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Create a store in the platform data directory.
    ///
    /// Returns `None` if the data directory cannot be determined.
    pub fn in_data_dir() -> Option<Self> {
        dirs::data_local_dir().map(|dir| Self::new(dir.join("curbdesk")))
    }

    /// Get the path of the state file.
    pub fn path(&self) -> PathBuf {
        self.base_dir.join(STATE_FILE_NAME)
    }

    /// Get the stored position for a table, if any.
    pub fn load(&self, key: &str) -> Option<ScrollPosition> {
        let position = self.read_all().remove(key);
        trace!(key, ?position, "Loaded scroll position");
        position
    }

    /// Store the position for a table.
    pub fn save(&self, key: &str, position: ScrollPosition) -> io::Result<()> {
        let mut all = self.read_all();
        all.insert(key.to_string(), position);
        self.write_all(&all)?;
        debug!(key, selected = position.selected, offset = position.offset, "Saved scroll position");
        Ok(())
    }

    /// Read every stored position. Unreadable files count as empty.
    fn read_all(&self) -> BTreeMap<String, ScrollPosition> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!("Failed to read view state {:?}: {}", path, e);
                return BTreeMap::new();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!("Ignoring corrupt view state {:?}: {}", path, e);
            BTreeMap::new()
        })
    }

    fn write_all(&self, all: &BTreeMap<String, ScrollPosition>) -> io::Result<()> {
        fs::create_dir_all(&self.base_dir)?;
        let json = serde_json::to_string_pretty(all)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        write_atomic(&self.path(), json.as_bytes())
    }
}

/// Write through a temporary file so a crash never leaves half a file.
fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)
}
