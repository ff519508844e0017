// Pipeline positions. `Status` is the label users see; `Stage` is the finer
// internal token that drives authorization. They move together: only the
// pairs in `Status::valid_stage_pairs` are reachable.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::Role;

/// Externally visible lifecycle label, serialized exactly as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Client Requested")]
    ClientRequested,
    #[serde(rename = "Awaiting Manager Assignment")]
    AwaitingManagerAssignment,
    #[serde(rename = "Design In Progress")]
    DesignInProgress,
    #[serde(rename = "Design Completed - Pending Manager Review")]
    DesignSubmitted,
    #[serde(rename = "Development In Progress")]
    DevelopmentInProgress,
    #[serde(rename = "Development Completed - Pending Manager Review")]
    DevelopmentSubmitted,
    #[serde(rename = "Testing In Progress")]
    TestingInProgress,
    #[serde(rename = "Testing Completed - Pending Manager Final Review")]
    TestingSubmitted,
    #[serde(rename = "Awaiting HR Review")]
    AwaitingHrReview,
    #[serde(rename = "Awaiting Client Review")]
    AwaitingClientReview,
    #[serde(rename = "Changes Requested")]
    ChangesRequested,
    #[serde(rename = "Completed")]
    Completed,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::ClientRequested => "Client Requested",
            Status::AwaitingManagerAssignment => "Awaiting Manager Assignment",
            Status::DesignInProgress => "Design In Progress",
            Status::DesignSubmitted => "Design Completed - Pending Manager Review",
            Status::DevelopmentInProgress => "Development In Progress",
            Status::DevelopmentSubmitted => "Development Completed - Pending Manager Review",
            Status::TestingInProgress => "Testing In Progress",
            Status::TestingSubmitted => "Testing Completed - Pending Manager Final Review",
            Status::AwaitingHrReview => "Awaiting HR Review",
            Status::AwaitingClientReview => "Awaiting Client Review",
            Status::ChangesRequested => "Changes Requested",
            Status::Completed => "Completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Internal pipeline position. `HrReview` exists for wire compatibility with
/// historical task documents; no transition produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    ClientRequest,
    HrReview,
    ManagerPlanning,
    Design,
    ManagerDesignReview,
    Development,
    ManagerDevelopmentReview,
    Testing,
    ManagerFinalReview,
    HrDelivery,
    ClientReview,
    Completed,
    ChangesRequested,
}

impl Stage {
    pub fn token(&self) -> &'static str {
        match self {
            Stage::ClientRequest => "client_request",
            Stage::HrReview => "hr_review",
            Stage::ManagerPlanning => "manager_planning",
            Stage::Design => "design",
            Stage::ManagerDesignReview => "manager_design_review",
            Stage::Development => "development",
            Stage::ManagerDevelopmentReview => "manager_development_review",
            Stage::Testing => "testing",
            Stage::ManagerFinalReview => "manager_final_review",
            Stage::HrDelivery => "hr_delivery",
            Stage::ClientReview => "client_review",
            Stage::Completed => "completed",
            Stage::ChangesRequested => "changes_requested",
        }
    }

    /// The role expected to hold the task while it sits in this stage, or
    /// `None` for stages owned by a pool (HR) or by nobody (terminal states).
    pub fn owner_role(&self) -> Option<Role> {
        match self {
            Stage::ManagerPlanning
            | Stage::ManagerDesignReview
            | Stage::ManagerDevelopmentReview
            | Stage::ManagerFinalReview => Some(Role::Manager),
            Stage::Design => Some(Role::Designer),
            Stage::Development => Some(Role::Developer),
            Stage::Testing => Some(Role::Tester),
            Stage::ClientReview => Some(Role::Client),
            Stage::ClientRequest
            | Stage::HrReview
            | Stage::HrDelivery
            | Stage::Completed
            | Stage::ChangesRequested => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// The reachable (status, stage) pairs. `Changes Requested` is the one
/// status with two stages: the client's rejection parks the task in
/// `changes_requested`, and HR's forward moves it back under the manager
/// without changing the label.
pub const VALID_PAIRS: [(Status, Stage); 13] = [
    (Status::ClientRequested, Stage::ClientRequest),
    (Status::AwaitingManagerAssignment, Stage::ManagerPlanning),
    (Status::DesignInProgress, Stage::Design),
    (Status::DesignSubmitted, Stage::ManagerDesignReview),
    (Status::DevelopmentInProgress, Stage::Development),
    (Status::DevelopmentSubmitted, Stage::ManagerDevelopmentReview),
    (Status::TestingInProgress, Stage::Testing),
    (Status::TestingSubmitted, Stage::ManagerFinalReview),
    (Status::AwaitingHrReview, Stage::HrDelivery),
    (Status::AwaitingClientReview, Stage::ClientReview),
    (Status::ChangesRequested, Stage::ChangesRequested),
    (Status::ChangesRequested, Stage::ManagerPlanning),
    (Status::Completed, Stage::Completed),
];

pub fn is_valid_pair(status: Status, stage: Stage) -> bool {
    VALID_PAIRS.contains(&(status, stage))
}
