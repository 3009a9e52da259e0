// Login endpoint.

use anyhow::{Context, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::client::BackendClient;
use crate::creators::lenient::{self, KeyAliases};
use crate::session::UserProfile;

const LOGIN_ALIASES: KeyAliases = &[("token", &["accessToken", "access_token"])];

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(remote = "Self")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: UserProfile,
}

impl<'de> Deserialize<'de> for LoginResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut value = serde_json::Value::deserialize(deserializer)?;
        lenient::fold_aliases(&mut value, LOGIN_ALIASES);
        LoginResponse::deserialize(value).map_err(D::Error::custom)
    }
}

/// Exchange credentials for a bearer token.
pub async fn login(client: &BackendClient, email: &str, password: &str) -> Result<LoginResponse> {
    client
        .post_json("/auth/login", &LoginRequest { email, password })
        .await
        .with_context(|| format!("Login failed for {email}"))
}
