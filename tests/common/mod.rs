// Shared harness: a fully seeded engine with one person per role and a
// staffed team, plus helpers that drive a task to the later pipeline
// stages so individual tests start where they care.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use greenlight::{
    Action, Actor, EngineConfig, FileUpload, InMemoryDirectory, InMemoryNotificationSink,
    InMemoryTaskStore, NewTaskRequest, Role, Task, TeamId, WorkflowEngine,
};

pub struct Pipeline {
    pub engine: WorkflowEngine,
    pub store: InMemoryTaskStore,
    pub sink: Arc<InMemoryNotificationSink>,
    pub directory: Arc<InMemoryDirectory>,
    pub client: Actor,
    pub hr: Actor,
    pub second_hr: Actor,
    pub manager: Actor,
    pub designer: Actor,
    pub developer: Actor,
    pub tester: Actor,
    pub team: TeamId,
}

pub async fn pipeline() -> Pipeline {
    let store = InMemoryTaskStore::new();
    let sink = Arc::new(InMemoryNotificationSink::new());
    let directory = Arc::new(InMemoryDirectory::new());

    let client = Actor::new(directory.add_user("Avery Client", Role::Client).await, Role::Client);
    let hr = Actor::new(directory.add_user("Harper HR", Role::Hr).await, Role::Hr);
    let second_hr = Actor::new(directory.add_user("Hollis HR", Role::Hr).await, Role::Hr);
    let manager = Actor::new(
        directory.add_user("Morgan Manager", Role::Manager).await,
        Role::Manager,
    );
    let designer = Actor::new(
        directory.add_user("Dana Designer", Role::Designer).await,
        Role::Designer,
    );
    let developer = Actor::new(
        directory.add_user("Devi Developer", Role::Developer).await,
        Role::Developer,
    );
    let tester = Actor::new(
        directory.add_user("Toni Tester", Role::Tester).await,
        Role::Tester,
    );

    let team = directory
        .add_team(
            "Studio One",
            manager.id,
            vec![designer.id, developer.id, tester.id],
        )
        .await;

    let engine = WorkflowEngine::with_config(
        Arc::new(store.clone()),
        sink.clone(),
        directory.clone(),
        EngineConfig::default(),
    );

    Pipeline {
        engine,
        store,
        sink,
        directory,
        client,
        hr,
        second_hr,
        manager,
        designer,
        developer,
        tester,
        team,
    }
}

pub fn in_days(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}

pub fn upload(name: &str) -> FileUpload {
    FileUpload {
        filename: format!("blob-{name}"),
        original_name: name.to_string(),
        size: 2048,
        mime_type: "application/zip".to_string(),
    }
}

impl Pipeline {
    pub async fn submit(&self, title: &str) -> Task {
        self.engine
            .create(
                &self.client,
                NewTaskRequest {
                    title: title.to_string(),
                    description: "as discussed".to_string(),
                    deadline: in_days(14),
                    attachments: vec![upload("brief.pdf")],
                },
            )
            .await
            .expect("create task")
    }

    /// Submit → HR assigns the manager.
    pub async fn to_planning(&self, title: &str) -> Task {
        let task = self.submit(title).await;
        self.engine
            .advance(
                task.id,
                &self.hr,
                Action::AssignManager {
                    manager: self.manager.id,
                    team: None,
                    deadline: None,
                },
            )
            .await
            .expect("assign manager")
    }

    /// ... → manager staffs the team, design opens.
    pub async fn to_design(&self, title: &str) -> Task {
        let task = self.to_planning(title).await;
        self.engine
            .advance(
                task.id,
                &self.manager,
                Action::AssignTeam {
                    team: self.team,
                    designer_deadline: Some(in_days(3)),
                    developer_deadline: None,
                    tester_deadline: None,
                },
            )
            .await
            .expect("assign team")
    }

    /// ... → designer has submitted, manager holds design review.
    pub async fn to_design_review(&self, title: &str) -> Task {
        let task = self.to_design(title).await;
        self.engine
            .advance(
                task.id,
                &self.designer,
                Action::SubmitDeliverable {
                    file: upload("mockups.fig"),
                },
            )
            .await
            .expect("designer upload")
    }

    /// ... all three production stages done, manager has sent to HR.
    pub async fn to_hr_delivery(&self, title: &str) -> Task {
        let task = self.to_design_review(title).await;
        self.engine
            .advance(
                task.id,
                &self.manager,
                Action::ForwardToDeveloper {
                    deadline: Some(in_days(6)),
                },
            )
            .await
            .expect("forward developer");
        self.engine
            .advance(
                task.id,
                &self.developer,
                Action::SubmitDeliverable {
                    file: upload("build.zip"),
                },
            )
            .await
            .expect("developer upload");
        self.engine
            .advance(
                task.id,
                &self.manager,
                Action::ForwardToTester {
                    deadline: Some(in_days(8)),
                },
            )
            .await
            .expect("forward tester");
        self.engine
            .advance(
                task.id,
                &self.tester,
                Action::SubmitDeliverable {
                    file: upload("report.pdf"),
                },
            )
            .await
            .expect("tester upload");
        self.engine
            .advance(task.id, &self.manager, Action::SendToHr)
            .await
            .expect("send to hr")
    }

    /// ... → HR has released the deliverables to the client.
    pub async fn to_client_review(&self, title: &str) -> Task {
        let task = self.to_hr_delivery(title).await;
        self.engine
            .advance(task.id, &self.hr, Action::SendToClient)
            .await
            .expect("send to client")
    }
}
