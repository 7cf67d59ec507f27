use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity claims returned by the external authority for a session id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
    pub session_token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("identity authority rejected the session (status {status})")]
    Rejected { status: u16 },
    #[error("{0}")]
    Upstream(String),
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Exchange an external session id for verified identity claims.
    async fn verify(&self, external_session_id: &str) -> Result<VerifiedIdentity, VerifyError>;
}

/// In-process verifier backed by a fixed table of session ids.
///
/// Unknown ids are rejected with a 401 status, like the real authority does.
#[derive(Debug, Default, Clone)]
pub struct MockIdentityVerifier {
    identities: HashMap<String, VerifiedIdentity>,
}

impl MockIdentityVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(mut self, external_session_id: &str, identity: VerifiedIdentity) -> Self {
        self.identities.insert(external_session_id.to_string(), identity);
        self
    }
}

#[async_trait]
impl IdentityVerifier for MockIdentityVerifier {
    async fn verify(&self, external_session_id: &str) -> Result<VerifiedIdentity, VerifyError> {
        tracing::info!("Verifying mock identity session {}", external_session_id);
        self.identities
            .get(external_session_id)
            .cloned()
            .ok_or(VerifyError::Rejected { status: 401 })
    }
}

/// A registered user. The id is the email address reported by the identity authority.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn from_identity(identity: &VerifiedIdentity, now: DateTime<Utc>) -> Self {
        Self {
            id: identity.email.clone(),
            email: identity.email.clone(),
            name: identity.name.clone(),
            picture: identity.picture.clone(),
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub session_token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Expiry is fixed at issuance; a session is usable strictly before `expires_at`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
