use super::TaskRemote;
use crate::domain::{random_affirmation, StorageMode, SubTask, Task};
use crate::persistence::LocalTaskStore;
use anyhow::Result;
use std::collections::HashMap;
use tracing::warn;
use uuid::Uuid;

/// Result of a repository mutation as far as the hosted backend is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Stored locally and, in cloud mode, remotely
    Synced,
    /// The remote call failed; the change only exists locally
    LocalOnly { error: String },
}

impl SyncOutcome {
    fn downgrade(&mut self, error: String) {
        if let SyncOutcome::Synced = self {
            *self = SyncOutcome::LocalOnly { error };
        }
    }

    pub fn is_local_only(&self) -> bool {
        matches!(self, SyncOutcome::LocalOnly { .. })
    }
}

/// Owns the task list. Guest mode uses only the local file; cloud mode
/// calls the remote first and falls back to local on failure.
pub struct TaskRepository {
    store: LocalTaskStore,
    remote: Option<Box<dyn TaskRemote>>,
    tasks: Vec<Task>,
}

impl TaskRepository {
    pub fn new(store: LocalTaskStore, remote: Option<Box<dyn TaskRemote>>) -> Self {
        Self {
            store,
            remote,
            tasks: Vec::new(),
        }
    }

    pub fn mode(&self) -> StorageMode {
        if self.remote.is_some() {
            StorageMode::Cloud
        } else {
            StorageMode::Guest
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.tasks)
    }

    /// Load tasks from the remote (cloud) or the local file (guest)
    pub fn load(&mut self) -> Result<SyncOutcome> {
        if let Some(remote) = &self.remote {
            match remote.fetch_tasks() {
                Ok(tasks) => {
                    self.tasks = tasks;
                    self.persist()?;
                    return Ok(SyncOutcome::Synced);
                }
                Err(e) => {
                    warn!(error = %e, "loading tasks from backend failed, using local file");
                    self.tasks = self.store.load()?;
                    return Ok(SyncOutcome::LocalOnly {
                        error: e.to_string(),
                    });
                }
            }
        }
        self.tasks = self.store.load()?;
        Ok(SyncOutcome::Synced)
    }

    /// Append a task. In cloud mode the id returned by the remote is adopted.
    pub fn add(&mut self, mut task: Task) -> Result<(Uuid, SyncOutcome)> {
        let mut outcome = SyncOutcome::Synced;
        if let Some(remote) = &self.remote {
            match remote.create_task(&task) {
                Ok(stored) => {
                    task.id = stored.id;
                    task.created_at = stored.created_at;
                    let subs = std::mem::take(&mut task.sub_tasks);
                    for sub in subs {
                        match remote.create_sub_task(task.id, &sub) {
                            Ok(created) => task.sub_tasks.push(SubTask { id: created.id, ..sub }),
                            Err(e) => {
                                warn!(error = %e, "creating sub-task failed");
                                outcome.downgrade(e.to_string());
                                task.sub_tasks.push(sub);
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "creating task failed, saved locally");
                    outcome.downgrade(e.to_string());
                }
            }
        }
        let id = task.id;
        self.tasks.push(task);
        self.persist()?;
        Ok((id, outcome))
    }

    /// Replace a task, pushing field changes and sub-task differences to the remote
    pub fn update(&mut self, mut task: Task) -> Result<SyncOutcome> {
        let Some(idx) = self.position(task.id) else {
            return Ok(SyncOutcome::Synced);
        };
        let mut outcome = SyncOutcome::Synced;

        if let Some(remote) = &self.remote {
            let previous = &self.tasks[idx];
            if let Err(e) = remote.update_task(&task) {
                warn!(task = %task.id, error = %e, "updating task failed, saved locally");
                outcome.downgrade(e.to_string());
            }

            let before: HashMap<Uuid, &SubTask> =
                previous.sub_tasks.iter().map(|s| (s.id, s)).collect();

            for sub in task.sub_tasks.iter_mut() {
                match before.get(&sub.id) {
                    None => match remote.create_sub_task(task.id, sub) {
                        Ok(created) => sub.id = created.id,
                        Err(e) => {
                            warn!(error = %e, "creating sub-task failed");
                            outcome.downgrade(e.to_string());
                        }
                    },
                    Some(old) if **old != *sub => {
                        if let Err(e) = remote.update_sub_task(sub) {
                            warn!(error = %e, "updating sub-task failed");
                            outcome.downgrade(e.to_string());
                        }
                    }
                    Some(_) => {}
                }
            }

            for old in &previous.sub_tasks {
                if !task.sub_tasks.iter().any(|s| s.id == old.id) {
                    if let Err(e) = remote.delete_sub_task(old.id) {
                        warn!(error = %e, "deleting sub-task failed");
                        outcome.downgrade(e.to_string());
                    }
                }
            }
        }

        self.tasks[idx] = task;
        self.persist()?;
        Ok(outcome)
    }

    /// Apply `f` to a copy of the task and store it through `update`
    pub fn modify<F>(&mut self, id: Uuid, f: F) -> Result<Option<SyncOutcome>>
    where
        F: FnOnce(&mut Task) -> bool,
    {
        let Some(mut task) = self.get(id).cloned() else {
            return Ok(None);
        };
        if !f(&mut task) {
            return Ok(None);
        }
        self.update(task).map(Some)
    }

    /// Remove a task, returning it so the caller can offer undo
    pub fn delete(&mut self, id: Uuid) -> Result<Option<(Task, SyncOutcome)>> {
        let Some(idx) = self.position(id) else {
            return Ok(None);
        };
        let mut outcome = SyncOutcome::Synced;
        if let Some(remote) = &self.remote {
            if let Err(e) = remote.delete_task(id) {
                warn!(task = %id, error = %e, "deleting task failed, removed locally");
                outcome.downgrade(e.to_string());
            }
        }
        let removed = self.tasks.remove(idx);
        self.persist()?;
        Ok(Some((removed, outcome)))
    }

    /// Put a deleted task back at its old position
    pub fn restore(&mut self, task: Task, index: usize) -> Result<SyncOutcome> {
        let (id, outcome) = self.add(task)?;
        if let Some(pos) = self.position(id) {
            let restored = self.tasks.remove(pos);
            let index = index.min(self.tasks.len());
            self.tasks.insert(index, restored);
            self.persist()?;
        }
        Ok(outcome)
    }

    /// Flip completion. Returns an affirmation when the task became complete.
    pub fn toggle_complete(&mut self, id: Uuid) -> Result<Option<(SyncOutcome, Option<&'static str>)>> {
        let Some(task) = self.get(id) else {
            return Ok(None);
        };
        let was_completed = task.completed;
        let outcome = self.modify(id, |t| {
            t.toggle_complete();
            true
        })?;
        let affirmation = if was_completed {
            None
        } else {
            Some(random_affirmation())
        };
        Ok(outcome.map(|o| (o, affirmation)))
    }
}
