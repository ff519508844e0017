// Role-gated transition dispatcher: the only entry point through which any
// actor creates or advances a task. Each handler runs its guards, edits the
// stage slots, applies exactly one transition, and plans the fan-out that
// goes out once the save commits.

pub mod guards;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::EngineConfig;
use crate::error::WorkflowError;
use crate::identity::{Actor, Directory, ProductionRole, Role, Team, TeamId, UserId};
use crate::notify::{dispatch_fan_outs, FanOut, ListQuery, Notification, NotificationSink, NotifyError};
use crate::store::TaskStore;
use crate::workflow::actions::Action;
use crate::workflow::stage::{Stage, Status};
use crate::workflow::state_machine::{apply_transition, Transition};
use crate::workflow::task::{
    Attachment, AttachmentStage, FileUpload, Owner, StageAssignments, SubStatus, Task, TaskId,
};

/// A client's initial submission. Attachments reference blobs the external
/// store has already accepted.
#[derive(Debug, Clone)]
pub struct NewTaskRequest {
    pub title: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub attachments: Vec<FileUpload>,
}

pub struct WorkflowEngine {
    store: Arc<dyn TaskStore>,
    notifications: Arc<dyn NotificationSink>,
    directory: Arc<dyn Directory>,
    config: EngineConfig,
}

impl WorkflowEngine {
    pub fn new(
        store: Arc<dyn TaskStore>,
        notifications: Arc<dyn NotificationSink>,
        directory: Arc<dyn Directory>,
    ) -> Self {
        Self::with_config(store, notifications, directory, EngineConfig::default())
    }

    pub fn with_config(
        store: Arc<dyn TaskStore>,
        notifications: Arc<dyn NotificationSink>,
        directory: Arc<dyn Directory>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            notifications,
            directory,
            config,
        }
    }

    /// Client submits a new project request. The task enters the pipeline as
    /// `Client Requested` and every HR user is told about it.
    pub async fn create(
        &self,
        actor: &Actor,
        request: NewTaskRequest,
    ) -> Result<Task, WorkflowError> {
        if actor.role != Role::Client {
            return Err(WorkflowError::unauthorized(
                "task creation is restricted to clients",
            ));
        }
        if request.title.trim().is_empty() || request.description.trim().is_empty() {
            return Err(WorkflowError::validation(
                "title, description, and deadline are required",
            ));
        }
        let max = self.config.limits.max_request_attachments;
        if request.attachments.len() > max {
            return Err(WorkflowError::validation(format!(
                "a request may include at most {max} attachments"
            )));
        }

        let mut task = Task::new(
            request.title,
            request.description,
            request.deadline,
            actor.id,
            actor.role,
        );
        for upload in request.attachments {
            task.push_attachment(Attachment::from_upload(
                AttachmentStage::ClientRequest,
                upload,
                actor.id,
            ));
        }
        apply_transition(
            &mut task,
            "submit-request",
            Transition::to(
                Status::ClientRequested,
                Stage::ClientRequest,
                "Client submitted project request",
                actor.id,
            ),
        )?;

        let task = self.store.insert(task).await.map_err(WorkflowError::from)?;
        info!(task = %task.id, title = %task.title, "client request created");

        let submitter = match self.directory.user(actor.id).await {
            Some(profile) => profile.name,
            None => actor.id.to_string(),
        };
        dispatch_fan_outs(
            self.notifications.as_ref(),
            self.directory.as_ref(),
            task.id,
            vec![FanOut::role(
                Role::Hr,
                format!(
                    "New project request {} submitted by {submitter}",
                    task.title
                ),
                Stage::ClientRequest,
            )],
        )
        .await;

        Ok(task)
    }

    /// Applies one action to one task. Guards run before any mutation; the
    /// save is a compare-and-swap against the revision the task was read at,
    /// so concurrent advances on the same task cannot interleave.
    pub async fn advance(
        &self,
        task_id: TaskId,
        actor: &Actor,
        action: Action,
    ) -> Result<Task, WorkflowError> {
        let mut task = self
            .store
            .get(task_id)
            .await
            .map_err(WorkflowError::from)?
            .ok_or_else(|| WorkflowError::not_found("task", task_id))?;
        let expected_revision = task.revision;

        guards::require_role(actor, &action)?;
        let fan_outs = self.dispatch(&mut task, actor, &action).await?;

        let task = self
            .store
            .save(task, expected_revision)
            .await
            .map_err(WorkflowError::from)?;
        info!(
            task = %task.id,
            action = action.name(),
            actor = %actor.id,
            status = %task.status,
            stage = %task.current_stage,
            "task advanced"
        );

        dispatch_fan_outs(
            self.notifications.as_ref(),
            self.directory.as_ref(),
            task.id,
            fan_outs,
        )
        .await;

        Ok(task)
    }

    async fn dispatch(
        &self,
        task: &mut Task,
        actor: &Actor,
        action: &Action,
    ) -> Result<Vec<FanOut>, WorkflowError> {
        match action {
            Action::AssignManager {
                manager,
                team,
                deadline,
            } => {
                self.assign_manager(task, actor, *manager, *team, *deadline)
                    .await
            }
            Action::AssignTeam {
                team,
                designer_deadline,
                developer_deadline,
                tester_deadline,
            } => {
                self.assign_team(
                    task,
                    actor,
                    *team,
                    *designer_deadline,
                    *developer_deadline,
                    *tester_deadline,
                )
                .await
            }
            Action::SubmitDeliverable { file } => {
                self.submit_deliverable(task, actor, file.clone())
            }
            Action::AttachSupportingFile { file } => {
                self.attach_supporting_file(task, actor, file.clone())
            }
            Action::ForwardToDeveloper { deadline } => {
                self.forward_to(task, actor, ProductionRole::Developer, *deadline)
            }
            Action::ForwardToTester { deadline } => {
                self.forward_to(task, actor, ProductionRole::Tester, *deadline)
            }
            Action::SendToHr => self.send_to_hr(task, actor),
            Action::SendToClient => self.send_to_client(task, actor),
            Action::ForwardFeedback { note } => self.forward_feedback(task, actor, note.clone()),
            Action::Approve => self.approve(task, actor),
            Action::RequestChanges { comment } => self.request_changes(task, actor, comment),
            Action::Reopen { target, note } => self.reopen(task, actor, *target, note.clone()),
        }
    }

    async fn assign_manager(
        &self,
        task: &mut Task,
        actor: &Actor,
        manager: UserId,
        team: Option<TeamId>,
        deadline: Option<DateTime<Utc>>,
    ) -> Result<Vec<FanOut>, WorkflowError> {
        guards::require_status_in(
            task,
            "assign-manager",
            &[Status::ClientRequested, Status::ChangesRequested],
            "task is not awaiting HR assignment",
        )?;

        let profile = self
            .directory
            .user(manager)
            .await
            .filter(|p| p.role == Role::Manager)
            .ok_or_else(|| WorkflowError::not_found("manager", manager))?;

        if let Some(team_id) = team {
            let team_doc = self
                .directory
                .team(team_id)
                .await
                .ok_or_else(|| WorkflowError::not_found("team", team_id))?;
            if team_doc.manager != manager {
                return Err(WorkflowError::unauthorized(
                    "selected team is not managed by the specified manager",
                ));
            }
        }

        if let Some(deadline) = deadline {
            task.deadline = deadline;
        }
        // A reworked task goes back through planning with clean slots; the
        // assignees and their deadlines survive for the manager to reuse.
        task.stage_assignments.designer.reset_to_pending();
        task.stage_assignments.developer.reset_to_pending();
        task.stage_assignments.tester.reset_to_pending();
        task.manager = Some(manager);
        task.assigned_team = team;
        task.owner = Some(Owner::new(Role::Manager, manager));

        apply_transition(
            task,
            "assign-manager",
            Transition::to(
                Status::AwaitingManagerAssignment,
                Stage::ManagerPlanning,
                "HR forwarded project to manager for planning",
                actor.id,
            ),
        )?;

        Ok(vec![FanOut::users(
            vec![profile.id],
            format!("HR assigned project {} to you", task.title),
            Stage::ManagerPlanning,
        )])
    }

    async fn assign_team(
        &self,
        task: &mut Task,
        actor: &Actor,
        team: TeamId,
        designer_deadline: Option<DateTime<Utc>>,
        developer_deadline: Option<DateTime<Utc>>,
        tester_deadline: Option<DateTime<Utc>>,
    ) -> Result<Vec<FanOut>, WorkflowError> {
        if let Some(manager) = task.manager {
            if manager != actor.id {
                return Err(WorkflowError::unauthorized(
                    "only the assigned manager can progress this task",
                ));
            }
        }
        guards::require_stage(
            task,
            "assign-team",
            Stage::ManagerPlanning,
            "task is not awaiting team assignment",
        )?;

        let team_doc = self
            .directory
            .team(team)
            .await
            .ok_or_else(|| WorkflowError::not_found("team", team))?;
        if team_doc.manager != actor.id {
            return Err(WorkflowError::unauthorized(
                "you can only assign projects to your own teams",
            ));
        }

        let designer = self
            .required_member(&team_doc, ProductionRole::Designer)
            .await?;
        let developer = self
            .required_member(&team_doc, ProductionRole::Developer)
            .await?;
        let tester = self.required_member(&team_doc, ProductionRole::Tester).await?;
        let designer_deadline = guards::require_deadline(designer_deadline, "designer")?;

        let slots = &mut task.stage_assignments;
        slots.designer.user = Some(designer);
        slots.designer.deadline = Some(designer_deadline);
        slots.designer.sub_status = SubStatus::InProgress;
        slots.designer.clear_submission();
        slots.developer.user = Some(developer);
        slots.developer.deadline = developer_deadline;
        slots.developer.sub_status = SubStatus::Pending;
        slots.developer.clear_submission();
        slots.tester.user = Some(tester);
        slots.tester.deadline = tester_deadline;
        slots.tester.sub_status = SubStatus::Pending;
        slots.tester.clear_submission();

        task.manager = Some(task.manager.unwrap_or(actor.id));
        task.assigned_team = Some(team);
        task.owner = Some(Owner::new(Role::Designer, designer));

        apply_transition(
            task,
            "assign-team",
            Transition::to(
                Status::DesignInProgress,
                Stage::Design,
                format!("Manager assigned team {} to the project", team_doc.name),
                actor.id,
            ),
        )?;

        Ok(vec![
            FanOut::users(
                vec![designer],
                format!(
                    "Manager assigned project {} to your team for design work",
                    task.title
                ),
                Stage::Design,
            ),
            FanOut::users(
                vec![developer],
                format!(
                    "Project {} is queued for development after design approval",
                    task.title
                ),
                Stage::Development,
            ),
            FanOut::users(
                vec![tester],
                format!(
                    "Project {} will move to you after development approval",
                    task.title
                ),
                Stage::Testing,
            ),
        ])
    }

    async fn required_member(
        &self,
        team: &Team,
        role: ProductionRole,
    ) -> Result<UserId, WorkflowError> {
        self.directory
            .team_member_with_role(team, role)
            .await
            .ok_or_else(|| {
                WorkflowError::validation(format!("team {} does not have a {role}", team.name))
            })
    }

    fn submit_deliverable(
        &self,
        task: &mut Task,
        actor: &Actor,
        file: FileUpload,
    ) -> Result<Vec<FanOut>, WorkflowError> {
        // The role gate upstream restricts this to the three stage workers.
        let role = actor
            .role
            .production()
            .ok_or_else(|| WorkflowError::unauthorized("role holds no production slot"))?;
        guards::require_slot_owner(task, role, actor)?;

        let (work_stage, attachment_stage, status, review_stage, note) = match role {
            ProductionRole::Designer => (
                Stage::Design,
                AttachmentStage::Design,
                Status::DesignSubmitted,
                Stage::ManagerDesignReview,
                "Designer uploaded deliverable",
            ),
            ProductionRole::Developer => (
                Stage::Development,
                AttachmentStage::Development,
                Status::DevelopmentSubmitted,
                Stage::ManagerDevelopmentReview,
                "Developer uploaded deliverable",
            ),
            ProductionRole::Tester => (
                Stage::Testing,
                AttachmentStage::Testing,
                Status::TestingSubmitted,
                Stage::ManagerFinalReview,
                "Tester uploaded deliverable",
            ),
        };
        guards::require_stage(
            task,
            "submit-deliverable",
            work_stage,
            &format!("{role} stage is not active"),
        )?;

        let attachment_id =
            task.push_attachment(Attachment::from_upload(attachment_stage, file, actor.id));
        let slot = task.stage_assignments.slot_mut(role);
        slot.sub_status = SubStatus::Submitted;
        slot.submitted_at = Some(Utc::now());
        slot.submission_attachment = Some(attachment_id);
        task.owner = task.manager.map(|m| Owner::new(Role::Manager, m));

        apply_transition(
            task,
            "submit-deliverable",
            Transition::to(status, review_stage, note, actor.id),
        )?;

        Ok(match task.manager {
            Some(manager) => vec![FanOut::users(
                vec![manager],
                format!(
                    "{} uploaded deliverables for project {}",
                    capitalize(role.as_str()),
                    task.title
                ),
                review_stage,
            )],
            None => Vec::new(),
        })
    }

    fn attach_supporting_file(
        &self,
        task: &mut Task,
        actor: &Actor,
        file: FileUpload,
    ) -> Result<Vec<FanOut>, WorkflowError> {
        let (stage_tag, note) = match actor.role {
            Role::Client => {
                guards::require_creator(task, actor)?;
                (AttachmentStage::ClientFeedback, "Client attached supporting file")
            }
            Role::Hr => {
                guards::require_stage(
                    task,
                    "attach-file",
                    Stage::HrDelivery,
                    "HR can upload files only during the delivery stage",
                )?;
                (AttachmentStage::Hr, "HR attached delivery files")
            }
            _ => {
                return Err(WorkflowError::unauthorized(
                    "role is not permitted to attach supporting files",
                ))
            }
        };

        task.push_attachment(Attachment::from_upload(stage_tag, file, actor.id));
        // Status and stage stay put; the upload still lands in the audit trail.
        apply_transition(task, "attach-file", Transition::note_only(note, actor.id))?;
        Ok(Vec::new())
    }

    fn forward_to(
        &self,
        task: &mut Task,
        actor: &Actor,
        target: ProductionRole,
        deadline: Option<DateTime<Utc>>,
    ) -> Result<Vec<FanOut>, WorkflowError> {
        guards::require_manager(task, actor)?;

        let (action, review_stage, review_detail, approved, status, next_stage, note) =
            match target {
                ProductionRole::Developer => (
                    "forward-developer",
                    Stage::ManagerDesignReview,
                    "task is not waiting for design approval",
                    ProductionRole::Designer,
                    Status::DevelopmentInProgress,
                    Stage::Development,
                    "Manager forwarded the project to development",
                ),
                ProductionRole::Tester => (
                    "forward-tester",
                    Stage::ManagerDevelopmentReview,
                    "task is not waiting for development approval",
                    ProductionRole::Developer,
                    Status::TestingInProgress,
                    Stage::Testing,
                    "Manager forwarded the project to testing",
                ),
                ProductionRole::Designer => {
                    return Err(WorkflowError::validation(
                        "design is opened by team assignment, not forwarding",
                    ))
                }
            };

        guards::require_stage(task, action, review_stage, review_detail)?;
        let assignee = task.stage_assignments.slot(target).user.ok_or_else(|| {
            WorkflowError::validation(format!("assign a {target} before forwarding the project"))
        })?;
        let deadline = guards::require_deadline(deadline, target.as_str())?;

        task.stage_assignments.slot_mut(approved).sub_status = SubStatus::Approved;
        let slot = task.stage_assignments.slot_mut(target);
        slot.sub_status = SubStatus::InProgress;
        slot.deadline = Some(deadline);
        slot.clear_submission();
        task.owner = Some(Owner::new(target.role(), assignee));

        apply_transition(task, action, Transition::to(status, next_stage, note, actor.id))?;

        Ok(vec![FanOut::users(
            vec![assignee],
            format!(
                "Manager has forwarded project {} for {}",
                task.title,
                next_stage.token()
            ),
            next_stage,
        )])
    }

    fn send_to_hr(&self, task: &mut Task, actor: &Actor) -> Result<Vec<FanOut>, WorkflowError> {
        guards::require_manager(task, actor)?;
        guards::require_stage(
            task,
            "send-hr",
            Stage::ManagerFinalReview,
            "task is not awaiting manager final review",
        )?;

        task.stage_assignments.tester.sub_status = SubStatus::Approved;
        task.owner = None;

        apply_transition(
            task,
            "send-hr",
            Transition::to(
                Status::AwaitingHrReview,
                Stage::HrDelivery,
                "Manager sent the project to HR for delivery",
                actor.id,
            ),
        )?;

        Ok(vec![FanOut::role(
            Role::Hr,
            format!("Manager has submitted project {} for HR review", task.title),
            Stage::HrDelivery,
        )])
    }

    fn send_to_client(&self, task: &mut Task, actor: &Actor) -> Result<Vec<FanOut>, WorkflowError> {
        guards::require_stage(
            task,
            "send-client",
            Stage::HrDelivery,
            "task is not ready for client review",
        )?;

        // Only client-originated tasks hand review back to an individual.
        let reviewer = (task.created_by_role == Role::Client).then_some(task.created_by);
        task.owner = reviewer.map(|client| Owner::new(Role::Client, client));

        apply_transition(
            task,
            "send-client",
            Transition::to(
                Status::AwaitingClientReview,
                Stage::ClientReview,
                "HR sent deliverables to client",
                actor.id,
            ),
        )?;

        Ok(match reviewer {
            Some(client) => vec![FanOut::users(
                vec![client],
                format!("Project {} is ready for your review", task.title),
                Stage::ClientReview,
            )],
            None => Vec::new(),
        })
    }

    fn forward_feedback(
        &self,
        task: &mut Task,
        actor: &Actor,
        note: Option<String>,
    ) -> Result<Vec<FanOut>, WorkflowError> {
        guards::require_stage(
            task,
            "forward-feedback",
            Stage::ChangesRequested,
            "task has no outstanding client changes",
        )?;
        let manager = task
            .manager
            .ok_or_else(|| WorkflowError::validation("task has no manager assigned"))?;

        task.owner = Some(Owner::new(Role::Manager, manager));
        let note = note.unwrap_or_else(|| "HR forwarded client feedback to manager".to_string());

        // The label stays `Changes Requested`; only the internal stage moves
        // back under the manager.
        apply_transition(
            task,
            "forward-feedback",
            Transition::to(
                Status::ChangesRequested,
                Stage::ManagerPlanning,
                note.clone(),
                actor.id,
            ),
        )?;

        Ok(vec![FanOut::users(
            vec![manager],
            format!("HR forwarded client feedback for project {}", task.title),
            Stage::ManagerPlanning,
        )
        .with_meta(note)])
    }

    fn approve(&self, task: &mut Task, actor: &Actor) -> Result<Vec<FanOut>, WorkflowError> {
        guards::require_creator(task, actor)?;
        guards::require_stage(
            task,
            "approve",
            Stage::ClientReview,
            "task is not ready for client approval",
        )?;

        task.owner = None;
        apply_transition(
            task,
            "approve",
            Transition::to(
                Status::Completed,
                Stage::Completed,
                "Client accepted the project",
                actor.id,
            ),
        )?;

        let message = format!("Client approved project {}", task.title);
        let mut fan_outs = vec![FanOut::role(Role::Hr, message.clone(), Stage::Completed)];
        if let Some(manager) = task.manager {
            fan_outs.push(FanOut::users(vec![manager], message, Stage::Completed));
        }
        Ok(fan_outs)
    }

    fn request_changes(
        &self,
        task: &mut Task,
        actor: &Actor,
        comment: &str,
    ) -> Result<Vec<FanOut>, WorkflowError> {
        guards::require_creator(task, actor)?;
        guards::require_stage(
            task,
            "request-changes",
            Stage::ClientReview,
            "task is not ready for change requests",
        )?;
        let comment = guards::require_comment(comment)?;

        task.push_change_request(comment.clone(), actor.id);
        task.owner = None;
        apply_transition(
            task,
            "request-changes",
            Transition::to(
                Status::ChangesRequested,
                Stage::ChangesRequested,
                comment.clone(),
                actor.id,
            ),
        )?;

        let message = format!("Client requested revisions for project {}", task.title);
        let mut fan_outs = vec![FanOut::role(Role::Hr, message.clone(), Stage::ChangesRequested)
            .with_meta(comment.clone())];
        if let Some(manager) = task.manager {
            fan_outs.push(
                FanOut::users(vec![manager], message, Stage::ChangesRequested).with_meta(comment),
            );
        }
        Ok(fan_outs)
    }

    fn reopen(
        &self,
        task: &mut Task,
        actor: &Actor,
        target: ProductionRole,
        note: Option<String>,
    ) -> Result<Vec<FanOut>, WorkflowError> {
        guards::require_manager(task, actor)?;

        let assignee = task
            .stage_assignments
            .slot(target)
            .user
            .ok_or_else(|| WorkflowError::validation("no user assigned for the selected stage"))?;

        let (status, stage, label) = match target {
            ProductionRole::Designer => (Status::DesignInProgress, Stage::Design, "design"),
            ProductionRole::Developer => {
                (Status::DevelopmentInProgress, Stage::Development, "development")
            }
            ProductionRole::Tester => (Status::TestingInProgress, Stage::Testing, "testing"),
        };

        let slot = task.stage_assignments.slot_mut(target);
        slot.sub_status = SubStatus::InProgress;
        slot.clear_submission();
        // Downstream work is invalidated but keeps its assignees and
        // deadlines; those stages re-open through the normal forwards.
        for downstream in StageAssignments::downstream_of(target) {
            task.stage_assignments.slot_mut(*downstream).reset_to_pending();
        }
        task.owner = Some(Owner::new(target.role(), assignee));

        apply_transition(
            task,
            "reopen",
            Transition {
                status: Some(status),
                stage: Some(stage),
                note: note.unwrap_or_else(|| "Manager reopened the project stage".to_string()),
                actor: actor.id,
            },
        )?;

        Ok(vec![FanOut::users(
            vec![assignee],
            format!("Manager reopened project {} for {label} updates", task.title),
            stage,
        )])
    }

    /// Tasks visible to this actor: anything they created, manage, own,
    /// hold a stage slot on, or reach through their team. HR additionally
    /// sees the pool stages it is responsible for.
    pub async fn tasks_visible_to(&self, actor: &Actor) -> Result<Vec<Task>, WorkflowError> {
        let all = self.store.all().await.map_err(WorkflowError::from)?;
        let mut visible = Vec::new();
        for task in all {
            if self.can_see(&task, actor).await {
                visible.push(task);
            }
        }
        Ok(visible)
    }

    async fn can_see(&self, task: &Task, actor: &Actor) -> bool {
        if task.involves_user(actor.id) {
            return true;
        }
        if actor.role == Role::Hr {
            let hr_pool = matches!(
                task.status,
                Status::ClientRequested
                    | Status::AwaitingHrReview
                    | Status::AwaitingClientReview
                    | Status::ChangesRequested
                    | Status::Completed
            );
            if hr_pool {
                return true;
            }
        }
        if let Some(team_id) = task.assigned_team {
            if let Some(team) = self.directory.team(team_id).await {
                return team.members.contains(&actor.id) || team.manager == actor.id;
            }
        }
        false
    }

    pub async fn task(&self, id: TaskId) -> Result<Task, WorkflowError> {
        self.store
            .get(id)
            .await
            .map_err(WorkflowError::from)?
            .ok_or_else(|| WorkflowError::not_found("task", id))
    }

    /// Administrative cascade removal: the task and every notification that
    /// references it. Not reachable through any workflow action.
    pub async fn remove_task(&self, id: TaskId) -> Result<bool, WorkflowError> {
        let removed = self.store.remove(id).await.map_err(WorkflowError::from)?;
        if removed {
            if let Err(err) = self.notifications.purge_task(id).await {
                tracing::warn!(task = %id, error = %err, "notification purge failed");
            }
            info!(task = %id, "task removed with cascade");
        }
        Ok(removed)
    }

    /// Mailbox listing with the configured page cap applied.
    pub async fn notifications_for(
        &self,
        actor: &Actor,
        unread_only: bool,
        limit: Option<usize>,
    ) -> Result<Vec<Notification>, NotifyError> {
        let limits = &self.config.limits;
        let limit = limit
            .unwrap_or(limits.notification_page)
            .min(limits.notification_page_max);
        self.notifications
            .list(
                actor.id,
                ListQuery {
                    unread_only,
                    limit: Some(limit),
                },
            )
            .await
    }

    /// Direct access to the mailbox for read-tracking operations.
    pub fn notifications(&self) -> &Arc<dyn NotificationSink> {
        &self.notifications
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
