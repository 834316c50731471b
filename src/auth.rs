//! Authentication collaborator: who is acting, and what they may submit.

use std::fmt;
use std::str::FromStr;

use exameets_config::SessionSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Manager,
    Student,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "student" | "user" => Ok(Role::Student),
            other => Err(format!("unknown role `{other}`")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Student => "student",
        };
        f.write_str(label)
    }
}

/// Kind of write a submit control performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordAction {
    Create,
    Edit,
}

impl RecordAction {
    /// Creation is admin-only; edits are open to managers too.
    pub fn allows(self, role: Role) -> bool {
        match self {
            RecordAction::Create => role == Role::Admin,
            RecordAction::Edit => matches!(role, Role::Admin | Role::Manager),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }
}

/// Read access to the current principal, as provided by the auth service.
pub trait AuthContext {
    /// `None` when nobody is signed in.
    fn principal(&self) -> Option<&Principal>;

    fn is_authenticated(&self) -> bool {
        self.principal().is_some()
    }

    fn may(&self, action: RecordAction) -> bool {
        self.principal()
            .map(|principal| action.allows(principal.role))
            .unwrap_or(false)
    }
}

/// Principal resolved once from the persisted session settings.
#[derive(Debug, Clone, Default)]
pub struct SessionAuth {
    principal: Option<Principal>,
    token: Option<String>,
}

impl SessionAuth {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
            token: None,
        }
    }

    /// A session counts as authenticated only when it has a recognised role.
    pub fn from_settings(settings: &SessionSettings) -> Self {
        let principal = settings
            .role
            .as_deref()
            .and_then(|raw| match raw.parse::<Role>() {
                Ok(role) => Some(role),
                Err(err) => {
                    tracing::warn!(%err, "ignoring session role");
                    None
                }
            })
            .map(|role| {
                Principal::new(
                    settings.user_id.clone().unwrap_or_else(|| "operator".into()),
                    role,
                )
            });
        Self {
            principal,
            token: settings.auth_token.clone(),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl AuthContext for SessionAuth {
    fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }
}
