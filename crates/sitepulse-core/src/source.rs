//! Metrics acquisition boundary.
//!
//! The engine itself never does I/O; snapshots arrive through a
//! [`MetricsSource`]. Fetching is the only fallible layer -- once a valid
//! snapshot is in hand, evaluation is total.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SourceError;
use crate::metrics::ProjectMetrics;

/// Key under which a single unnamed snapshot is filed.
pub const DEFAULT_PROJECT_KEY: &str = "default";

/// Provider of project metrics snapshots.
pub trait MetricsSource {
    /// Short identifier for logs and error messages.
    fn name(&self) -> &str;

    /// Fetch the snapshot for one project.
    ///
    /// # Errors
    /// Returns [`SourceError::NotFound`] for unknown project keys.
    fn fetch(&self, project: &str) -> Result<ProjectMetrics, SourceError>;

    /// Project keys this source can serve, sorted.
    fn projects(&self) -> Vec<String>;
}

/// Snapshot file layout: either one bare snapshot object or a map of
/// project key to snapshot.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Many(HashMap<String, ProjectMetrics>),
    Single(ProjectMetrics),
}

/// Reads snapshots from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    snapshots: HashMap<String, ProjectMetrics>,
}

impl JsonFileSource {
    /// Load and parse a snapshot file.
    ///
    /// A bare snapshot object is filed under [`DEFAULT_PROJECT_KEY`].
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or does not parse as
    /// either layout.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path).map_err(|e| SourceError::Unavailable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let parsed: SnapshotFile =
            serde_json::from_str(&content).map_err(|e| SourceError::Malformed(e.to_string()))?;

        let snapshots = match parsed {
            SnapshotFile::Many(map) => map,
            SnapshotFile::Single(metrics) => {
                let mut map = HashMap::new();
                map.insert(DEFAULT_PROJECT_KEY.to_string(), metrics);
                map
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            snapshots,
        })
    }

    /// Path this source was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetricsSource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    fn fetch(&self, project: &str) -> Result<ProjectMetrics, SourceError> {
        self.snapshots
            .get(project)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                project: project.to_string(),
            })
    }

    fn projects(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.snapshots.keys().cloned().collect();
        keys.sort();
        keys
    }
}

/// In-memory source for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    snapshots: HashMap<String, ProjectMetrics>,
}

impl StaticSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a snapshot.
    pub fn insert(&mut self, project: impl Into<String>, metrics: ProjectMetrics) {
        self.snapshots.insert(project.into(), metrics);
    }
}

impl MetricsSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self, project: &str) -> Result<ProjectMetrics, SourceError> {
        self.snapshots
            .get(project)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                project: project.to_string(),
            })
    }

    fn projects(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.snapshots.keys().cloned().collect();
        keys.sort();
        keys
    }
}
