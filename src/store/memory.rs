use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, TaskStore};
use crate::workflow::task::{Task, TaskId};

/// Map-backed store for tests and single-process deployments. The write
/// lock around the revision check is what makes `save` an atomic
/// compare-and-swap.
#[derive(Default, Clone, Debug)]
pub struct InMemoryTaskStore {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn replace_all(&self, tasks: Vec<Task>) {
        let mut map = self.tasks.write().await;
        map.clear();
        for task in tasks {
            map.insert(task.id, task);
        }
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, mut task: Task) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.write().await;
        if tasks.contains_key(&task.id) {
            return Err(StoreError::AlreadyExists(task.id));
        }
        task.revision = 1;
        tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn get(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn save(&self, mut task: Task, expected_revision: u64) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.write().await;
        let current = tasks
            .get(&task.id)
            .ok_or(StoreError::NotFound(task.id))?;
        if current.revision != expected_revision {
            return Err(StoreError::RevisionMismatch {
                task: task.id,
                expected: expected_revision,
                found: current.revision,
            });
        }
        task.revision = expected_revision + 1;
        tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn remove(&self, id: TaskId) -> Result<bool, StoreError> {
        Ok(self.tasks.write().await.remove(&id).is_some())
    }

    async fn all(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.read().await;
        let mut all: Vec<Task> = tasks.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }
}
