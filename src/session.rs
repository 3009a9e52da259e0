// Auth session — explicit state plus a pure reducer over tagged actions.
//
// Commands dispatch actions and persist the resulting state; nothing reads
// auth from ambient globals.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::creators::lenient::{self, KeyAliases};
use crate::db::Database;

/// Key under which the signed-in session is stored.
pub const SESSION_KEY: &str = "auth_session";

const PROFILE_ALIASES: KeyAliases = &[("id", &["_id"]), ("brandName", &["company"])];

/// The signed-in brand user, as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase", default)]
pub struct UserProfile {
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub email: String,
    #[serde(
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub brand_name: Option<String>,
}

impl Serialize for UserProfile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        UserProfile::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for UserProfile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut value = serde_json::Value::deserialize(deserializer)?;
        lenient::fold_aliases(&mut value, PROFILE_ALIASES);
        UserProfile::deserialize(value).map_err(D::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    #[default]
    SignedOut,
    Authenticating,
    SignedIn,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    pub status: AuthStatus,
    pub user: Option<UserProfile>,
    pub token: Option<String>,
    pub error: Option<String>,
}

impl AuthState {
    pub fn is_signed_in(&self) -> bool {
        self.status == AuthStatus::SignedIn && self.token.is_some()
    }
}

/// Every transition the session can make.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    Start,
    Success { user: UserProfile, token: String },
    Failure(String),
    Logout,
    UpdateUser(UserProfile),
}

/// Apply `action` to `state`, returning the next state.
pub fn reduce(state: AuthState, action: AuthAction) -> AuthState {
    match action {
        AuthAction::Start => AuthState {
            status: AuthStatus::Authenticating,
            error: None,
            ..state
        },
        AuthAction::Success { user, token } => AuthState {
            status: AuthStatus::SignedIn,
            user: Some(user),
            token: Some(token),
            error: None,
        },
        AuthAction::Failure(message) => AuthState {
            status: AuthStatus::Failed,
            user: None,
            token: None,
            error: Some(message),
        },
        AuthAction::Logout => AuthState::default(),
        // Profile edits only apply to a signed-in session.
        AuthAction::UpdateUser(user) if state.status == AuthStatus::SignedIn => AuthState {
            user: Some(user),
            ..state
        },
        AuthAction::UpdateUser(_) => state,
    }
}

/// Load the persisted session. Anything unreadable is a signed-out session.
pub async fn load(db: &Arc<dyn Database>) -> AuthState {
    match db.get_value(SESSION_KEY).await {
        Ok(Some(json)) => serde_json::from_str::<AuthState>(&json).unwrap_or_else(|e| {
            warn!(error = %e, "Stored session is corrupt, treating as signed out");
            AuthState::default()
        }),
        Ok(None) => AuthState::default(),
        Err(e) => {
            warn!(error = %e, "Failed to read stored session");
            AuthState::default()
        }
    }
}

/// Persist a signed-in session, or remove the stored one otherwise.
pub async fn save(db: &Arc<dyn Database>, state: &AuthState) -> Result<()> {
    if state.is_signed_in() {
        let json = serde_json::to_string(state).context("Failed to serialize session")?;
        db.set_value(SESSION_KEY, &json)
            .await
            .context("Failed to save session")
    } else {
        db.delete_value(SESSION_KEY)
            .await
            .context("Failed to clear session")
    }
}
