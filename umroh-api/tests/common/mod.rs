use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use umroh_api::{app, AppState, RouterConfig};
use async_trait::async_trait;
use umroh_core::{DocumentStore, IdentityVerifier, MockIdentityVerifier, VerifiedIdentity, VerifyError};
use umroh_store::MemoryStore;

pub fn identity(email: &str, token: &str) -> VerifiedIdentity {
    VerifiedIdentity {
        email: email.to_string(),
        name: "Jamaah Test".to_string(),
        picture: None,
        session_token: token.to_string(),
    }
}

/// Router over a fresh in-memory store. The stub authority knows `ext-alice`
/// and `ext-bob`.
pub fn test_app(session_ttl: chrono::Duration) -> (axum::Router, Arc<dyn DocumentStore>) {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let verifier = MockIdentityVerifier::new()
        .with_identity("ext-alice", identity("alice@example.com", "tok-alice"))
        .with_identity("ext-bob", identity("bob@example.com", "tok-bob"));

    let state = AppState::new(store.clone(), Arc::new(verifier), session_ttl);
    (app(state, &RouterConfig::default()), store)
}

/// Authority that cannot be reached at all.
pub struct UnreachableAuthority;

#[async_trait]
impl IdentityVerifier for UnreachableAuthority {
    async fn verify(&self, _external_session_id: &str) -> Result<VerifiedIdentity, VerifyError> {
        Err(VerifyError::Upstream("identity authority unreachable: connection refused".to_string()))
    }
}

pub fn app_with_verifier(verifier: Arc<dyn IdentityVerifier>) -> axum::Router {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let state = AppState::new(store, verifier, chrono::Duration::days(7));
    app(state, &RouterConfig::default())
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}
