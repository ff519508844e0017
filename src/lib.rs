// Greenlight - project delivery workflow engine
// Routes a client's project request through HR, manager, and the three
// production roles, with role-gated transitions and notification fan-out.

pub mod config;
pub mod engine;
pub mod error;
pub mod identity;
pub mod notify;
pub mod store;
pub mod telemetry;
pub mod workflow;

// Re-export key types for easy access
pub use config::{EngineConfig, LimitsConfig, SnapshotConfig};
pub use engine::guards::parse_deadline;
pub use engine::{NewTaskRequest, WorkflowEngine};
pub use error::WorkflowError;
pub use identity::{
    Actor, Directory, InMemoryDirectory, ProductionRole, Role, Team, TeamId, UserId, UserProfile,
};
pub use notify::{
    FanOut, InMemoryNotificationSink, ListQuery, Notification, NotificationId, NotificationSink,
    NotifyError, RecipientSet,
};
pub use store::memory::InMemoryTaskStore;
pub use store::snapshot::{load_snapshot, write_snapshot};
pub use store::{StoreError, TaskStore};
pub use telemetry::{create_workflow_span, generate_correlation_id, init_telemetry};
pub use workflow::{
    is_valid_pair, Action, Attachment, AttachmentId, AttachmentStage, ChangeRequest, FileUpload,
    HistoryEntry, Owner, Stage, StageAssignments, StageSlot, Status, SubStatus, Task, TaskId,
    Transition, VALID_PAIRS,
};
