// Closed action vocabulary. Each variant carries its full payload, so an
// illegal action name cannot exist and a missing payload field is caught by
// the dispatcher's validation, not by string parsing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::{ProductionRole, Role, TeamId, UserId};
use crate::workflow::task::FileUpload;

/// Everything an actor can ask the engine to do to an existing task.
///
/// Deadlines arrive as optional parsed timestamps: the outer layer parses
/// the wire strings, the dispatcher enforces which ones are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Action {
    /// HR hands a fresh or reworked request to a manager.
    AssignManager {
        manager: UserId,
        team: Option<TeamId>,
        deadline: Option<DateTime<Utc>>,
    },
    /// The manager staffs the task from one of their teams and starts design.
    AssignTeam {
        team: TeamId,
        designer_deadline: Option<DateTime<Utc>>,
        developer_deadline: Option<DateTime<Utc>>,
        tester_deadline: Option<DateTime<Utc>>,
    },
    /// A stage worker submits their deliverable for manager review.
    SubmitDeliverable { file: FileUpload },
    /// Client or HR attaches a file without moving the pipeline.
    AttachSupportingFile { file: FileUpload },
    /// Manager approves the design and opens development.
    ForwardToDeveloper { deadline: Option<DateTime<Utc>> },
    /// Manager approves the build and opens testing.
    ForwardToTester { deadline: Option<DateTime<Utc>> },
    /// Manager signs off the final review and hands over to HR.
    SendToHr,
    /// HR releases the deliverables to the requesting client.
    SendToClient,
    /// HR routes the client's change request back to the manager.
    ForwardFeedback { note: Option<String> },
    /// Client accepts the delivered project.
    Approve,
    /// Client rejects the delivery with a mandatory comment.
    RequestChanges { comment: String },
    /// Manager reopens a production stage; downstream slots reset.
    Reopen {
        target: ProductionRole,
        note: Option<String>,
    },
}

impl Action {
    /// Stable name used in errors, history notes, and tracing fields.
    pub fn name(&self) -> &'static str {
        match self {
            Action::AssignManager { .. } => "assign-manager",
            Action::AssignTeam { .. } => "assign-team",
            Action::SubmitDeliverable { .. } => "submit-deliverable",
            Action::AttachSupportingFile { .. } => "attach-file",
            Action::ForwardToDeveloper { .. } => "forward-developer",
            Action::ForwardToTester { .. } => "forward-tester",
            Action::SendToHr => "send-hr",
            Action::SendToClient => "send-client",
            Action::ForwardFeedback { .. } => "forward-feedback",
            Action::Approve => "approve",
            Action::RequestChanges { .. } => "request-changes",
            Action::Reopen { .. } => "reopen",
        }
    }

    /// Roles allowed to attempt this action at all. Ownership against the
    /// specific task is checked separately by the dispatcher.
    pub fn permitted_roles(&self) -> &'static [Role] {
        match self {
            Action::AssignManager { .. } => &[Role::Hr],
            Action::AssignTeam { .. } => &[Role::Manager],
            Action::SubmitDeliverable { .. } => {
                &[Role::Designer, Role::Developer, Role::Tester]
            }
            Action::AttachSupportingFile { .. } => &[Role::Client, Role::Hr],
            Action::ForwardToDeveloper { .. }
            | Action::ForwardToTester { .. }
            | Action::SendToHr
            | Action::Reopen { .. } => &[Role::Manager],
            Action::SendToClient | Action::ForwardFeedback { .. } => &[Role::Hr],
            Action::Approve | Action::RequestChanges { .. } => &[Role::Client],
        }
    }
}
