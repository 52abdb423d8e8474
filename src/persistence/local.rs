use crate::domain::Task;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

use super::files::{atomic_write, read_file};

/// `tasks.json`: guest-mode source of truth, offline cache when signed in
#[derive(Debug, Clone)]
pub struct LocalTaskStore {
    path: PathBuf,
}

impl LocalTaskStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load tasks. Missing or corrupt files load as an empty list.
    pub fn load(&self) -> Result<Vec<Task>> {
        let content = read_file(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str::<Vec<Task>>(&content) {
            Ok(tasks) => Ok(tasks),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt tasks file, starting empty");
                Ok(Vec::new())
            }
        }
    }

    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks).context("Failed to serialize tasks")?;
        atomic_write(&self.path, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_is_empty() {
        let dir = tempdir().unwrap();
        let store = LocalTaskStore::new(dir.path().join("tasks.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = LocalTaskStore::new(dir.path().join("tasks.json"));

        let mut task = Task::new("Write report", Category::Work);
        task.priority = true;
        task.add_sub_task("Gather numbers");
        store.save(&[task.clone()]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, vec![task]);
    }

    #[test]
    fn test_corrupt_file_loads_empty_and_is_kept() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = LocalTaskStore::new(&path);
        assert!(store.load().unwrap().is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{not json");
    }

    #[test]
    fn test_reads_camel_case_without_optional_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(
            &path,
            r#"[{"id":"6f1c2b0e-8a57-4d5e-9a0b-2f1f7c3f4b11","text":"Old task","completed":false,"createdAt":"2024-01-05T10:00:00Z"}]"#,
        )
        .unwrap();

        let tasks = LocalTaskStore::new(&path).load().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].category, Category::Personal);
        assert!(tasks[0].sub_tasks.is_empty());
    }
}
