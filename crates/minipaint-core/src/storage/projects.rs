//! Project persistence on top of a key-value store.
//!
//! Two keys are used: one holds a JSON object mapping project id to
//! project, the other a JSON array of recent-project metadata, newest first.

use super::{KeyValueStore, StorageError, StorageResult};
use crate::project::{Clock, Project, ProjectMetadata};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Maximum length of the recent-projects list.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Names of the two storage keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageKeys {
    pub projects: String,
    pub recent: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            projects: "mini-paint-projects".to_string(),
            recent: "mini-paint-recent".to_string(),
        }
    }
}

type ProjectMap = BTreeMap<String, Project>;

pub struct ProjectStore {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    keys: StorageKeys,
    recent_limit: usize,
}

impl ProjectStore {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            keys: StorageKeys::default(),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    pub fn with_keys(mut self, keys: StorageKeys) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Stamp `updated_at`, write the project and move it to the front of
    /// the recent list. Returns the stored copy.
    pub fn save(&self, project: &Project) -> StorageResult<Project> {
        let mut saved = project.clone();
        saved.updated_at = self.clock.now();

        let mut projects = self.projects()?;
        projects.insert(saved.id.clone(), saved.clone());
        self.write(&self.keys.projects, &projects)?;

        let mut recent = self.recent()?;
        recent.retain(|m| m.id != saved.id);
        recent.insert(0, saved.metadata());
        recent.truncate(self.recent_limit);
        self.write(&self.keys.recent, &recent)?;

        log::info!("saved project {} ({})", saved.name, saved.id);
        Ok(saved)
    }

    pub fn load(&self, id: &str) -> StorageResult<Option<Project>> {
        let mut projects = self.projects()?;
        let project = projects.remove(id);
        match &project {
            Some(p) => log::info!("loaded project {} ({})", p.name, p.id),
            None => log::warn!("project {} not found", id),
        }
        Ok(project)
    }

    /// Remove a project and its recent entry. Returns whether it existed.
    /// A key whose collection becomes empty is removed from the store.
    pub fn delete(&self, id: &str) -> StorageResult<bool> {
        let mut projects = self.projects()?;
        let existed = projects.remove(id).is_some();
        if projects.is_empty() {
            self.store.remove(&self.keys.projects)?;
        } else if existed {
            self.write(&self.keys.projects, &projects)?;
        }

        let mut recent = self.recent()?;
        let before = recent.len();
        recent.retain(|m| m.id != id);
        if recent.is_empty() {
            self.store.remove(&self.keys.recent)?;
        } else if recent.len() != before {
            self.write(&self.keys.recent, &recent)?;
        }

        log::info!("deleted project {}", id);
        Ok(existed)
    }

    /// Recently saved projects, newest first.
    pub fn recent(&self) -> StorageResult<Vec<ProjectMetadata>> {
        self.read(&self.keys.recent)
    }

    /// Every stored project, most recently updated first.
    pub fn list(&self) -> StorageResult<Vec<ProjectMetadata>> {
        let mut all: Vec<_> = self.projects()?.values().map(Project::metadata).collect();
        all.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(all)
    }

    fn projects(&self) -> StorageResult<ProjectMap> {
        self.read(&self.keys.projects)
    }

    /// Parse the JSON under `key`, or the default when the key is absent.
    fn read<T: DeserializeOwned + Default>(&self, key: &str) -> StorageResult<T> {
        let Some(json) = self.store.get(key)? else {
            return Ok(T::default());
        };
        serde_json::from_str(&json).map_err(|e| {
            log::error!("corrupted data under {}: {}", key, e);
            StorageError::Serialization(format!("Failed to parse {}: {}", key, e))
        })
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| StorageError::Serialization(format!("Failed to encode {}: {}", key, e)))?;
        self.store.set(key, &json)
    }
}
