
use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;

use crate::auth::error::AuthError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountKind {
    Spotify,
    Other(String),
}

impl AccountKind {
    pub fn from_type(kind: &str) -> Self {
        match kind {
            "spotify" => AccountKind::Spotify,
            other => AccountKind::Other(other.to_string()),
        }
    }

    pub fn is_spotify(&self) -> bool {
        matches!(self, AccountKind::Spotify)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedAccount {
    pub id: String,
    pub kind: AccountKind,
    pub name: String,
}

impl ConnectedAccount {
    pub fn spotify(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: AccountKind::Spotify,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSocket {
    pub account_id: Option<String>,
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDevice {
    pub id: String,
    pub name: Option<String>,
}

// Either half may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionAndDevice {
    pub socket: Option<ActiveSocket>,
    pub device: Option<ActiveDevice>,
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    fn active_session_and_device(&self) -> Option<SessionAndDevice>;
    fn accounts(&self) -> Vec<ConnectedAccount>;
    fn account(&self, id: &str) -> Option<ConnectedAccount>;
    async fn access_token(&self, account_id: &str) -> Result<String, AuthError>;
}

#[derive(Debug, Default)]
pub struct StaticSessionProvider {
    session: Option<SessionAndDevice>,
    accounts: Vec<ConnectedAccount>,
    tokens: HashMap<String, String>,
    token_requests: AtomicUsize,
}

impl StaticSessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(mut self, access_token: Option<&str>, device_id: Option<&str>) -> Self {
        self.session = Some(SessionAndDevice {
            socket: Some(ActiveSocket {
                account_id: None,
                access_token: access_token.map(str::to_string),
            }),
            device: device_id.map(|id| ActiveDevice {
                id: id.to_string(),
                name: None,
            }),
        });
        self
    }

    pub fn with_account(mut self, account: ConnectedAccount, token: Option<&str>) -> Self {
        if let Some(token) = token {
            self.tokens.insert(account.id.clone(), token.to_string());
        }
        self.accounts.push(account);
        self
    }

    pub fn token_requests(&self) -> usize {
        self.token_requests.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    fn active_session_and_device(&self) -> Option<SessionAndDevice> {
        self.session.clone()
    }

    fn accounts(&self) -> Vec<ConnectedAccount> {
        self.accounts.clone()
    }

    fn account(&self, id: &str) -> Option<ConnectedAccount> {
        self.accounts.iter().find(|a| a.id == id).cloned()
    }

    async fn access_token(&self, account_id: &str) -> Result<String, AuthError> {
        self.token_requests.fetch_add(1, Ordering::Relaxed);
        self.tokens
            .get(account_id)
            .cloned()
            .ok_or_else(|| AuthError::Provider(format!("token refresh failed for {account_id}")))
    }
}
