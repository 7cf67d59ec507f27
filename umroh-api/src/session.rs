//! Session lifecycle: exchange an external session id for a local bearer
//! session, resolve bearer tokens to users, and revoke sessions.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Map};
use tracing::{debug, info};
use umroh_core::repository::{find_one_as, insert_as};
use umroh_core::{
    Collection, CoreError, CoreResult, DocumentStore, Filter, IdentityVerifier, Session, StoreError,
    User, VerifiedIdentity,
};

#[derive(Debug, Clone)]
pub struct EstablishedSession {
    pub user: User,
    pub session_token: String,
}

#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn DocumentStore>,
    verifier: Arc<dyn IdentityVerifier>,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(store: Arc<dyn DocumentStore>, verifier: Arc<dyn IdentityVerifier>, ttl: Duration) -> Self {
        Self { store, verifier, ttl }
    }

    pub async fn establish_session(&self, external_session_id: &str) -> CoreResult<EstablishedSession> {
        let identity = self.verifier.verify(external_session_id).await?;
        let now = Utc::now();
        let user = self.upsert_user(&identity, now).await?;

        let session = Session {
            user_id: user.id.clone(),
            session_token: identity.session_token,
            expires_at: now + self.ttl,
            created_at: now,
        };

        match insert_as(&*self.store, Collection::Sessions, &session).await {
            Ok(()) => {}
            Err(StoreError::Duplicate { .. }) => self.refresh(&session).await?,
            Err(e) => return Err(e.into()),
        }

        info!("Session established for {}", user.id);
        Ok(EstablishedSession { user, session_token: session.session_token })
    }

    // The authority handed back a token we already hold.
    async fn refresh(&self, session: &Session) -> CoreResult<()> {
        let mut changes = Map::new();
        changes.insert("user_id".to_string(), json!(session.user_id));
        changes.insert("expires_at".to_string(), json!(session.expires_at));
        changes.insert("created_at".to_string(), json!(session.created_at));

        let filter = Filter::new().eq("session_token", session.session_token.as_str());
        self.store.update_one(Collection::Sessions, &filter, changes).await?;
        debug!("Refreshed existing session for {}", session.user_id);
        Ok(())
    }

    /// Existing users are returned untouched; profile changes at the authority are not synced.
    async fn upsert_user(&self, identity: &VerifiedIdentity, now: DateTime<Utc>) -> CoreResult<User> {
        let filter = Filter::new().eq("id", identity.email.as_str());
        if let Some(user) = find_one_as::<User>(&*self.store, Collection::Users, &filter).await? {
            return Ok(user);
        }

        let user = User::from_identity(identity, now);
        match insert_as(&*self.store, Collection::Users, &user).await {
            Ok(()) => {
                info!("Registered new user {}", user.id);
                Ok(user)
            }
            // Lost a registration race; the winner's record stands.
            Err(StoreError::Duplicate { .. }) => find_one_as(&*self.store, Collection::Users, &filter)
                .await?
                .ok_or_else(|| CoreError::NotFound("User not found".to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolves a bearer token to its user. Missing, unknown and expired
    /// tokens all resolve to `None`, as does a session whose user is gone.
    pub async fn resolve_current_user(&self, token: Option<&str>) -> CoreResult<Option<User>> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        let filter = Filter::new().eq("session_token", token);
        let session: Option<Session> = find_one_as(&*self.store, Collection::Sessions, &filter).await?;
        let Some(session) = session.filter(|s| s.is_active(Utc::now())) else {
            return Ok(None);
        };

        let filter = Filter::new().eq("id", session.user_id.as_str());
        Ok(find_one_as(&*self.store, Collection::Users, &filter).await?)
    }

    pub async fn revoke_session(&self, token: Option<&str>) -> CoreResult<()> {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let filter = Filter::new().eq("session_token", token);
            let deleted = self.store.delete_one(Collection::Sessions, &filter).await?;
            debug!("Revoked {} session(s)", deleted);
        }
        Ok(())
    }
}
