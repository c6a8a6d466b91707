use std::{fmt, sync::Arc};

use tracing::debug;

use crate::auth::{
    error::AuthError,
    provider::{ConnectedAccount, SessionProvider},
};

#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub access_token: String,
    pub device_id: Option<String>,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("device_id", &self.device_id)
            .finish()
    }
}

#[derive(Clone)]
pub struct CredentialResolver {
    provider: Arc<dyn SessionProvider>,
}

impl CredentialResolver {
    pub fn new(provider: Arc<dyn SessionProvider>) -> Self {
        Self { provider }
    }

    /// Token embedded in the active session wins; otherwise a fresh one is
    /// requested for the linked Spotify account.
    pub async fn resolve(&self) -> Result<Credential, AuthError> {
        let session = self.provider.active_session_and_device();
        let device_id = session
            .as_ref()
            .and_then(|s| s.device.as_ref())
            .map(|d| d.id.clone());

        let session_token = session
            .as_ref()
            .and_then(|s| s.socket.as_ref())
            .and_then(|s| s.access_token.clone())
            .filter(|t| !t.is_empty());

        if let Some(access_token) = session_token {
            return Ok(Credential {
                access_token,
                device_id,
            });
        }

        let account_id = self.linked_account_id().ok_or(AuthError::NotLinked)?;

        match self.provider.access_token(&account_id).await {
            Ok(access_token) if !access_token.is_empty() => Ok(Credential {
                access_token,
                device_id,
            }),
            Ok(_) => Err(AuthError::NoToken),
            Err(e) => {
                debug!("Token fetch for linked account failed: {e}");
                Err(AuthError::NoToken)
            }
        }
    }

    pub fn linked_account(&self) -> Result<ConnectedAccount, AuthError> {
        let id = self.linked_account_id().ok_or(AuthError::NotLinked)?;
        self.provider.account(&id).ok_or(AuthError::NotLinked)
    }

    fn linked_account_id(&self) -> Option<String> {
        self.provider
            .accounts()
            .into_iter()
            .find(|a| a.kind.is_spotify())
            .map(|a| a.id)
    }
}
