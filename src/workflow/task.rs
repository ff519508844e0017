// The task document: the one record the whole pipeline revolves around.
// Field semantics mirror the delivery pipeline's data model; serde defaults
// keep documents written by older builds loadable.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::{id_newtype, ProductionRole, Role, TeamId, UserId};
use crate::workflow::stage::{Stage, Status};

id_newtype!(
    /// Identity of a task document.
    TaskId
);
id_newtype!(
    /// Identity of one attachment row on a task.
    AttachmentId
);

/// Progress of a single production slot, independent of the task's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubStatus {
    Pending,
    InProgress,
    Submitted,
    Approved,
    Revisions,
}

impl Default for SubStatus {
    fn default() -> Self {
        SubStatus::Pending
    }
}

impl SubStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubStatus::Pending => "pending",
            SubStatus::InProgress => "in_progress",
            SubStatus::Submitted => "submitted",
            SubStatus::Approved => "approved",
            SubStatus::Revisions => "revisions",
        }
    }
}

impl fmt::Display for SubStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One production slot: who works the stage, by when, and how far along.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSlot {
    #[serde(default)]
    pub user: Option<UserId>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sub_status: SubStatus,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub submission_attachment: Option<AttachmentId>,
}

impl StageSlot {
    /// Drops any recorded submission, keeping the assignee and deadline.
    pub fn clear_submission(&mut self) {
        self.submitted_at = None;
        self.submission_attachment = None;
    }

    /// Back to an untouched slot with the assignee and deadline retained.
    pub fn reset_to_pending(&mut self) {
        self.sub_status = SubStatus::Pending;
        self.clear_submission();
    }
}

/// The three fixed production slots. Constructed in full when the task is
/// created; serde defaults re-materialize any slot a historical document
/// lacks without touching populated ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageAssignments {
    #[serde(default)]
    pub designer: StageSlot,
    #[serde(default)]
    pub developer: StageSlot,
    #[serde(default)]
    pub tester: StageSlot,
}

impl StageAssignments {
    pub fn slot(&self, role: ProductionRole) -> &StageSlot {
        match role {
            ProductionRole::Designer => &self.designer,
            ProductionRole::Developer => &self.developer,
            ProductionRole::Tester => &self.tester,
        }
    }

    pub fn slot_mut(&mut self, role: ProductionRole) -> &mut StageSlot {
        match role {
            ProductionRole::Designer => &mut self.designer,
            ProductionRole::Developer => &mut self.developer,
            ProductionRole::Tester => &mut self.tester,
        }
    }

    /// Slots downstream of the given role in pipeline order.
    pub fn downstream_of(role: ProductionRole) -> &'static [ProductionRole] {
        match role {
            ProductionRole::Designer => &[ProductionRole::Developer, ProductionRole::Tester],
            ProductionRole::Developer => &[ProductionRole::Tester],
            ProductionRole::Tester => &[],
        }
    }
}

/// Which part of the pipeline an attachment belongs to; drives what the
/// client is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttachmentStage {
    ClientRequest,
    Design,
    Development,
    Testing,
    Manager,
    Hr,
    ClientFeedback,
}

impl AttachmentStage {
    /// Stages the requesting client may download from.
    pub fn visible_to_client(&self) -> bool {
        matches!(
            self,
            AttachmentStage::ClientRequest | AttachmentStage::Hr | AttachmentStage::ClientFeedback
        )
    }
}

/// Reference to a blob already stored by the external attachment store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    pub filename: String,
    pub original_name: String,
    pub size: u64,
    pub mime_type: String,
}

/// One attachment row. Append-only; rows are never edited or removed by the
/// workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    pub stage: AttachmentStage,
    pub filename: String,
    pub original_name: String,
    pub size: u64,
    pub mime_type: String,
    pub uploaded_by: UserId,
    pub uploaded_at: DateTime<Utc>,
}

impl Attachment {
    pub fn from_upload(stage: AttachmentStage, upload: FileUpload, uploaded_by: UserId) -> Self {
        Self {
            id: AttachmentId::new(),
            stage,
            filename: upload.filename,
            original_name: upload.original_name,
            size: upload.size,
            mime_type: upload.mime_type,
            uploaded_by,
            uploaded_at: Utc::now(),
        }
    }
}

/// A client's revision request, append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub comment: String,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

/// One audit-trail row. Records the stage/status *after* the mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub stage: Stage,
    pub status: Status,
    pub note: String,
    pub actor: UserId,
    pub created_at: DateTime<Utc>,
}

/// Whoever must act next, as an explicit role + identity pair rather than a
/// bare user reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub role: Role,
    pub user: UserId,
}

impl Owner {
    pub fn new(role: Role, user: UserId) -> Self {
        Self { role, user }
    }
}

/// The central task document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub status: Status,
    pub current_stage: Stage,
    /// Single next-responsible party; `None` while a pool (HR) or nobody
    /// holds the task. Written only by the transition handlers.
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default)]
    pub manager: Option<UserId>,
    #[serde(default)]
    pub assigned_team: Option<TeamId>,
    #[serde(default)]
    pub stage_assignments: StageAssignments,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub change_requests: Vec<ChangeRequest>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    pub created_by: UserId,
    pub created_by_role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Compare-and-swap token; the store bumps it on every successful save.
    #[serde(default)]
    pub revision: u64,
}

impl Task {
    /// A fresh client request, before its first transition is applied.
    pub fn new(
        title: String,
        description: String,
        deadline: DateTime<Utc>,
        created_by: UserId,
        created_by_role: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::new(),
            title,
            description,
            deadline,
            status: Status::ClientRequested,
            current_stage: Stage::ClientRequest,
            owner: None,
            manager: None,
            assigned_team: None,
            stage_assignments: StageAssignments::default(),
            attachments: Vec::new(),
            change_requests: Vec::new(),
            history: Vec::new(),
            created_by,
            created_by_role,
            created_at: now,
            updated_at: now,
            revision: 0,
        }
    }

    pub fn push_attachment(&mut self, attachment: Attachment) -> AttachmentId {
        let id = attachment.id;
        self.attachments.push(attachment);
        id
    }

    pub fn push_change_request(&mut self, comment: String, created_by: UserId) {
        self.change_requests.push(ChangeRequest {
            comment,
            created_by,
            created_at: Utc::now(),
        });
    }

    /// Every identity with a standing claim on this task. Team membership is
    /// resolved by the caller; this covers the identities stored inline.
    pub fn involves_user(&self, user: UserId) -> bool {
        self.created_by == user
            || self.manager == Some(user)
            || self.owner.map(|owner| owner.user) == Some(user)
            || self.stage_assignments.designer.user == Some(user)
            || self.stage_assignments.developer.user == Some(user)
            || self.stage_assignments.tester.user == Some(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn new_task_starts_with_all_slots_pending() {
        let task = Task::new(
            "Website Redesign".into(),
            "Refresh the marketing site".into(),
            Utc::now(),
            UserId::new(),
            Role::Client,
        );
        assert_eq!(task.status, Status::ClientRequested);
        assert_eq!(task.current_stage, Stage::ClientRequest);
        for role in [
            ProductionRole::Designer,
            ProductionRole::Developer,
            ProductionRole::Tester,
        ] {
            let slot = task.stage_assignments.slot(role);
            assert_eq!(slot.sub_status, SubStatus::Pending);
            assert!(slot.user.is_none());
        }
        assert!(task.history.is_empty());
        assert_eq!(task.revision, 0);
    }

    #[test]
    fn hydrating_a_document_without_slots_defaults_them() {
        // Document shaped like one written before the slots were typed.
        let raw = serde_json::json!({
            "id": Uuid::new_v4(),
            "title": "Legacy",
            "description": "old record",
            "deadline": Utc::now(),
            "status": "Client Requested",
            "current_stage": "client_request",
            "created_by": Uuid::new_v4(),
            "created_by_role": "client",
            "created_at": Utc::now(),
            "updated_at": Utc::now(),
        });
        let task: Task = serde_json::from_value(raw).unwrap();
        assert_eq!(task.stage_assignments, StageAssignments::default());
        assert_eq!(task.revision, 0);
        assert!(task.owner.is_none());
    }

    #[test]
    fn hydration_never_downgrades_a_populated_slot() {
        let mut task = Task::new(
            "T".into(),
            "d".into(),
            Utc::now(),
            UserId::new(),
            Role::Client,
        );
        task.stage_assignments.designer.sub_status = SubStatus::InProgress;
        task.stage_assignments.designer.user = Some(UserId::new());

        // Round-tripping is the hydration path; running it twice must not
        // reset anything that was already set.
        for _ in 0..2 {
            let raw = serde_json::to_value(&task).unwrap();
            task = serde_json::from_value(raw).unwrap();
        }
        assert_eq!(
            task.stage_assignments.designer.sub_status,
            SubStatus::InProgress
        );
        assert!(task.stage_assignments.designer.user.is_some());
        assert_eq!(task.stage_assignments.developer.sub_status, SubStatus::Pending);
    }

    #[test]
    fn downstream_order_matches_the_pipeline() {
        assert_eq!(
            StageAssignments::downstream_of(ProductionRole::Designer),
            &[ProductionRole::Developer, ProductionRole::Tester]
        );
        assert!(StageAssignments::downstream_of(ProductionRole::Tester).is_empty());
    }

    #[test]
    fn client_attachment_visibility() {
        assert!(AttachmentStage::ClientRequest.visible_to_client());
        assert!(AttachmentStage::Hr.visible_to_client());
        assert!(!AttachmentStage::Design.visible_to_client());
        assert!(!AttachmentStage::Manager.visible_to_client());
    }
}
