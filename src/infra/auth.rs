//! Identity providers: the authentication seam behind the login screen.
//!
//! The demo provider resolves a fixed identity after a short delay so
//! the sign-in flow exercises its loading state. The remote provider
//! talks to the hosted auth endpoint.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};

use crate::config::ApiConfig;
use crate::domain::session::Identity;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("authentication transport failure: {0}")]
    Transport(String),
    #[error("sign-in was rejected")]
    Rejected,
}

/// Asynchronous sign-in/sign-out. Implementations never store state;
/// the session container owns the resulting identity.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn login(&self) -> Result<Identity, AuthError>;
    async fn logout(&self) -> Result<(), AuthError>;
}

/// Fixed-identity provider for the mock backend.
pub struct DemoIdentityProvider {
    latency: Duration,
}

impl Default for DemoIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoIdentityProvider {
    pub fn new() -> Self {
        Self {
            latency: Duration::from_millis(600),
        }
    }

    /// Zero-latency variant for tests.
    pub fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
        }
    }
}

#[async_trait]
impl IdentityProvider for DemoIdentityProvider {
    async fn login(&self) -> Result<Identity, AuthError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let identity = Identity {
            id: "demo-user".to_string(),
            first_name: "Alex".to_string(),
            last_name: "Morgan".to_string(),
            email: "alex.morgan@example.com".to_string(),
        };
        info!("Demo sign-in as {}", identity.email);
        Ok(identity)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        info!("Demo sign-out");
        Ok(())
    }
}

/// Hosted auth endpoint client.
pub struct RemoteIdentityProvider {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    public_key: String,
}

impl RemoteIdentityProvider {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            project_id: config.project_id.clone(),
            public_key: config.public_key.clone(),
        }
    }

    fn session_url(&self) -> String {
        format!("{}/auth/session", self.base_url)
    }

    fn with_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("X-Project-Id", &self.project_id)
            .header("X-Public-Key", &self.public_key)
    }

    fn transport(err: reqwest::Error) -> AuthError {
        error!("Auth transport failure: {}", err);
        AuthError::Transport(err.to_string())
    }
}

#[async_trait]
impl IdentityProvider for RemoteIdentityProvider {
    async fn login(&self) -> Result<Identity, AuthError> {
        let response = self
            .with_headers(self.http.post(self.session_url()))
            .send()
            .await
            .map_err(Self::transport)?;
        if !response.status().is_success() {
            return Err(AuthError::Rejected);
        }
        let identity: Identity = response.json().await.map_err(Self::transport)?;
        info!("Signed in as {}", identity.email);
        Ok(identity)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.with_headers(self.http.delete(self.session_url()))
            .send()
            .await
            .map_err(Self::transport)?;
        info!("Signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_provider_resolves_the_fixed_identity() {
        let provider = DemoIdentityProvider::instant();
        let identity = provider.login().await.unwrap();
        assert_eq!(identity.first_name, "Alex");
        assert_eq!(identity.display_name(), "Alex");
        provider.logout().await.unwrap();
    }
}
