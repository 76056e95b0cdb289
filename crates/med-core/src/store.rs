// ABOUTME: Local persistence for projects and their measurement sets.
// ABOUTME: Keeps every project in one zstd-compressed JSON file.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{Measurement, MeasurementSet, Project};

/// Scalar project metadata supplied when a project is created
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectInfo {
    pub name: String,
    pub client: String,
    pub address: String,
    pub color: Option<String>,
    pub line: Option<String>,
    pub glass: Option<String>,
}

/// All projects known to this installation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectStore {
    pub version: u32,
    pub projects: Vec<Project>,
}

impl ProjectStore {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            projects: Vec::new(),
        }
    }

    /// Get the default store path (~/.local/share/medidor/projects.bin)
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("medidor").join("projects.bin"))
    }

    /// Save the store to disk
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec(self)?;
        let mut encoder = zstd::Encoder::new(Vec::new(), 3)?;
        encoder.write_all(&json)?;
        let compressed = encoder.finish()?;

        std::fs::write(path, compressed)?;
        tracing::debug!("Saved {} projects to {}", self.projects.len(), path.display());
        Ok(())
    }

    /// Load the store from disk
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let compressed = std::fs::read(path)?;

        let mut decoder = zstd::Decoder::new(&compressed[..])?;
        let mut json = Vec::new();
        decoder.read_to_end(&mut json)?;

        let store: ProjectStore = serde_json::from_slice(&json)?;

        if store.version > Self::CURRENT_VERSION {
            return Err(StoreError::UnsupportedVersion(store.version));
        }

        tracing::debug!("Loaded {} projects from {}", store.projects.len(), path.display());
        Ok(store)
    }

    /// Load the store, starting empty when the file does not exist yet
    pub fn load_or_new(path: &Path) -> Result<Self, StoreError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn project_mut(&mut self, id: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    /// Create a project, newest first, returns its id
    pub fn add_project(&mut self, info: ProjectInfo) -> String {
        let id = new_id();
        self.projects.insert(
            0,
            Project {
                id: id.clone(),
                name: info.name,
                client: info.client,
                address: info.address,
                color: info.color,
                line: info.line,
                glass: info.glass,
                measurements: Vec::new(),
                created_at: now_millis(),
            },
        );
        tracing::info!("Created project {}", id);
        id
    }

    pub fn delete_project(&mut self, id: &str) -> Result<Project, StoreError> {
        let idx = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::UnknownProject(id.to_string()))?;
        tracing::info!("Deleted project {}", id);
        Ok(self.projects.remove(idx))
    }

    /// Commit a measurement set to a project.
    ///
    /// With `existing` the stored set keeps its id and creation time and has
    /// its contents replaced; otherwise a new measurement is appended.
    /// Returns the measurement id.
    pub fn save_measurement(
        &mut self,
        project_id: &str,
        set: MeasurementSet,
        existing: Option<&str>,
    ) -> Result<String, StoreError> {
        if !set.has_modules() {
            return Err(StoreError::EmptyMeasurement);
        }

        let project = self
            .project_mut(project_id)
            .ok_or_else(|| StoreError::UnknownProject(project_id.to_string()))?;

        match existing {
            Some(mid) => {
                let measurement = project
                    .measurements
                    .iter_mut()
                    .find(|m| m.id == mid)
                    .ok_or_else(|| StoreError::UnknownMeasurement(mid.to_string()))?;
                measurement.set = set;
                tracing::info!("Updated measurement {} in project {}", mid, project_id);
                Ok(mid.to_string())
            }
            None => {
                let id = new_id();
                project.measurements.push(Measurement {
                    id: id.clone(),
                    created_at: now_millis(),
                    set,
                });
                tracing::info!("Added measurement {} to project {}", id, project_id);
                Ok(id)
            }
        }
    }

    pub fn delete_measurement(
        &mut self,
        project_id: &str,
        measurement_id: &str,
    ) -> Result<Measurement, StoreError> {
        let project = self
            .project_mut(project_id)
            .ok_or_else(|| StoreError::UnknownProject(project_id.to_string()))?;
        let idx = project
            .measurements
            .iter()
            .position(|m| m.id == measurement_id)
            .ok_or_else(|| StoreError::UnknownMeasurement(measurement_id.to_string()))?;
        tracing::info!("Deleted measurement {} from project {}", measurement_id, project_id);
        Ok(project.measurements.remove(idx))
    }
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Short base-36 id from the clock plus a process-wide counter
fn new_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut value = nanos.wrapping_add(seq.wrapping_mul(7919));
    let mut digits = Vec::new();
    while value > 0 && digits.len() < 9 {
        let d = (value % 36) as u8;
        digits.push(if d < 10 { b'0' + d } else { b'a' + d - 10 });
        value /= 36;
    }
    if digits.is_empty() {
        digits.push(b'0');
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine data directory")]
    NoDataPath,

    #[error("Unsupported store version: {0}")]
    UnsupportedVersion(u32),

    #[error("Unknown project: {0}")]
    UnknownProject(String),

    #[error("Unknown measurement: {0}")]
    UnknownMeasurement(String),

    #[error("A measurement needs at least one opening")]
    EmptyMeasurement,
}
