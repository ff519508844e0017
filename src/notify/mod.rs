// Notification fan-out. Messages are computed after a transition commits
// and delivered best-effort: a sink failure is logged, never bubbled into
// the already-committed transition.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::warn;

use crate::identity::{id_newtype, Directory, Role, UserId};
use crate::workflow::stage::Stage;
use crate::workflow::task::TaskId;

id_newtype!(
    /// Identity of one delivered notification.
    NotificationId
);

/// One message in a recipient's mailbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub recipient: UserId,
    pub message: String,
    pub task: TaskId,
    pub stage: Stage,
    pub read: bool,
    /// Free-form detail, e.g. the client's change-request comment.
    #[serde(default)]
    pub meta: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Who a fan-out addresses: explicit identities or everyone holding a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientSet {
    Users(Vec<UserId>),
    EveryoneWith(Role),
}

/// One planned fan-out, produced by a transition handler and resolved to
/// concrete recipients only after the save commits.
#[derive(Debug, Clone)]
pub struct FanOut {
    pub recipients: RecipientSet,
    pub message: String,
    pub stage: Stage,
    pub meta: Option<String>,
}

impl FanOut {
    pub fn users(recipients: Vec<UserId>, message: impl Into<String>, stage: Stage) -> Self {
        Self {
            recipients: RecipientSet::Users(recipients),
            message: message.into(),
            stage,
            meta: None,
        }
    }

    pub fn role(role: Role, message: impl Into<String>, stage: Stage) -> Self {
        Self {
            recipients: RecipientSet::EveryoneWith(role),
            message: message.into(),
            stage,
            meta: None,
        }
    }

    pub fn with_meta(mut self, meta: impl Into<String>) -> Self {
        self.meta = Some(meta.into());
        self
    }
}

/// Listing filter for a recipient's mailbox.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListQuery {
    pub unread_only: bool,
    pub limit: Option<usize>,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification not found: {0}")]
    NotFound(NotificationId),

    #[error("notification backend unavailable: {0}")]
    Backend(String),
}

/// Durable mailbox seam. Delivery must be accepted atomically per batch;
/// read tracking is a plain boolean per recipient-message pair.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, batch: Vec<Notification>) -> Result<(), NotifyError>;

    /// Newest first, filtered and capped by the query.
    async fn list(&self, recipient: UserId, query: ListQuery)
        -> Result<Vec<Notification>, NotifyError>;

    async fn mark_read(&self, recipient: UserId, id: NotificationId) -> Result<(), NotifyError>;

    /// Returns how many notifications were newly marked.
    async fn mark_read_many(
        &self,
        recipient: UserId,
        ids: &[NotificationId],
    ) -> Result<usize, NotifyError>;

    async fn mark_all_read(&self, recipient: UserId) -> Result<usize, NotifyError>;

    /// Cascade hook for administrative task removal.
    async fn purge_task(&self, task: TaskId) -> Result<usize, NotifyError>;
}

/// Resolves planned fan-outs against the directory and delivers them.
/// Failures are logged and swallowed: notifications sit outside the
/// transition's atomicity boundary.
pub async fn dispatch_fan_outs(
    sink: &dyn NotificationSink,
    directory: &dyn Directory,
    task: TaskId,
    fan_outs: Vec<FanOut>,
) {
    for fan_out in fan_outs {
        let recipients = match fan_out.recipients {
            RecipientSet::Users(users) => users,
            RecipientSet::EveryoneWith(role) => directory.users_with_role(role).await,
        };
        if recipients.is_empty() {
            continue;
        }

        let batch: Vec<Notification> = recipients
            .into_iter()
            .map(|recipient| Notification {
                id: NotificationId::new(),
                recipient,
                message: fan_out.message.clone(),
                task,
                stage: fan_out.stage,
                read: false,
                meta: fan_out.meta.clone(),
                created_at: Utc::now(),
            })
            .collect();

        if let Err(err) = sink.deliver(batch).await {
            warn!(task = %task, stage = %fan_out.stage, error = %err, "notification delivery failed");
        }
    }
}

/// In-memory mailbox used by tests and single-process deployments.
#[derive(Default)]
pub struct InMemoryNotificationSink {
    entries: Arc<RwLock<Vec<Notification>>>,
}

impl InMemoryNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationSink for InMemoryNotificationSink {
    async fn deliver(&self, batch: Vec<Notification>) -> Result<(), NotifyError> {
        self.entries.write().await.extend(batch);
        Ok(())
    }

    async fn list(
        &self,
        recipient: UserId,
        query: ListQuery,
    ) -> Result<Vec<Notification>, NotifyError> {
        let entries = self.entries.read().await;
        let mut matching: Vec<Notification> = entries
            .iter()
            .filter(|n| n.recipient == recipient && (!query.unread_only || !n.read))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = query.limit {
            matching.truncate(limit);
        }
        Ok(matching)
    }

    async fn mark_read(&self, recipient: UserId, id: NotificationId) -> Result<(), NotifyError> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .iter_mut()
            .find(|n| n.id == id && n.recipient == recipient)
            .ok_or(NotifyError::NotFound(id))?;
        entry.read = true;
        Ok(())
    }

    async fn mark_read_many(
        &self,
        recipient: UserId,
        ids: &[NotificationId],
    ) -> Result<usize, NotifyError> {
        let mut entries = self.entries.write().await;
        let mut updated = 0;
        for entry in entries.iter_mut() {
            if entry.recipient == recipient && !entry.read && ids.contains(&entry.id) {
                entry.read = true;
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn mark_all_read(&self, recipient: UserId) -> Result<usize, NotifyError> {
        let mut entries = self.entries.write().await;
        let mut updated = 0;
        for entry in entries.iter_mut() {
            if entry.recipient == recipient && !entry.read {
                entry.read = true;
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn purge_task(&self, task: TaskId) -> Result<usize, NotifyError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|n| n.task != task);
        Ok(before - entries.len())
    }
}
