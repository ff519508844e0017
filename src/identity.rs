// Actors, roles, and the directory seam the engine resolves them through.
// User and team CRUD lives outside the crate; the engine only ever asks
// "who is this", "who has this role", and "what does this team look like".

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Pipeline roles. Admin sits outside the workflow and never appears here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Hr,
    Manager,
    Designer,
    Developer,
    Tester,
}

impl Role {
    /// The production slot this role works, if it works one.
    pub fn production(&self) -> Option<ProductionRole> {
        match self {
            Role::Designer => Some(ProductionRole::Designer),
            Role::Developer => Some(ProductionRole::Developer),
            Role::Tester => Some(ProductionRole::Tester),
            Role::Client | Role::Hr | Role::Manager => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Hr => "hr",
            Role::Manager => "manager",
            Role::Designer => "designer",
            Role::Developer => "developer",
            Role::Tester => "tester",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three roles that hold a production stage slot on a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductionRole {
    Designer,
    Developer,
    Tester,
}

impl ProductionRole {
    pub fn role(&self) -> Role {
        match self {
            ProductionRole::Designer => Role::Designer,
            ProductionRole::Developer => Role::Developer,
            ProductionRole::Tester => Role::Tester,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.role().as_str()
    }
}

impl fmt::Display for ProductionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! id_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub ::uuid::Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(::uuid::Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

pub(crate) use id_newtype;

id_newtype!(
    /// Identity of a person in any role.
    UserId
);
id_newtype!(
    /// Identity of a manager-owned production team.
    TeamId
);

/// The authenticated identity a request acts as. Built by the outer layer
/// after authentication; the engine trusts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }
}

/// Directory view of a user: just enough for authorization and messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub role: Role,
}

/// A manager's production team. Member roles are resolved through the
/// directory, matching how the source system stores roles on users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub manager: UserId,
    pub members: Vec<UserId>,
}

/// Read-only lookup seam over the external user/team service.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn user(&self, id: UserId) -> Option<UserProfile>;
    async fn users_with_role(&self, role: Role) -> Vec<UserId>;
    async fn team(&self, id: TeamId) -> Option<Team>;

    /// First team member holding the given production role, if any.
    async fn team_member_with_role(&self, team: &Team, role: ProductionRole) -> Option<UserId> {
        for member in &team.members {
            if let Some(profile) = self.user(*member).await {
                if profile.role == role.role() {
                    return Some(profile.id);
                }
            }
        }
        None
    }
}

/// In-memory directory used by tests and single-process deployments.
#[derive(Default)]
pub struct InMemoryDirectory {
    users: Arc<RwLock<HashMap<UserId, UserProfile>>>,
    teams: Arc<RwLock<HashMap<TeamId, Team>>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, name: impl Into<String>, role: Role) -> UserId {
        let profile = UserProfile {
            id: UserId::new(),
            name: name.into(),
            role,
        };
        let id = profile.id;
        self.users.write().await.insert(id, profile);
        id
    }

    pub async fn add_team(&self, name: impl Into<String>, manager: UserId, members: Vec<UserId>) -> TeamId {
        let team = Team {
            id: TeamId::new(),
            name: name.into(),
            manager,
            members,
        };
        let id = team.id;
        self.teams.write().await.insert(id, team);
        id
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn user(&self, id: UserId) -> Option<UserProfile> {
        self.users.read().await.get(&id).cloned()
    }

    async fn users_with_role(&self, role: Role) -> Vec<UserId> {
        let users = self.users.read().await;
        let mut ids: Vec<UserId> = users
            .values()
            .filter(|profile| profile.role == role)
            .map(|profile| profile.id)
            .collect();
        ids.sort();
        ids
    }

    async fn team(&self, id: TeamId) -> Option<Team> {
        self.teams.read().await.get(&id).cloned()
    }
}
