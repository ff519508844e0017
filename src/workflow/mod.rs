// Task state machine: the document, the stage/status vocabulary, the typed
// actions, and the single transition primitive.

pub mod actions;
pub mod stage;
pub mod state_machine;
pub mod task;

pub use actions::Action;
pub use stage::{is_valid_pair, Stage, Status, VALID_PAIRS};
pub use state_machine::{apply_transition, Transition};
pub use task::{
    Attachment, AttachmentId, AttachmentStage, ChangeRequest, FileUpload, HistoryEntry, Owner,
    StageAssignments, StageSlot, SubStatus, Task, TaskId,
};
