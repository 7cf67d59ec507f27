use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{info, warn};
use umroh_core::{IdentityVerifier, VerifiedIdentity, VerifyError};

const SESSION_DATA_PATH: &str = "/auth/v1/env/oauth/session-data";
const SESSION_HEADER: &str = "X-Session-ID";

/// Calls the external identity authority over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpIdentityVerifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpIdentityVerifier {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), SESSION_DATA_PATH),
        })
    }
}

#[async_trait]
impl IdentityVerifier for HttpIdentityVerifier {
    async fn verify(&self, external_session_id: &str) -> Result<VerifiedIdentity, VerifyError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(SESSION_HEADER, external_session_id)
            .send()
            .await
            .map_err(|e| VerifyError::Upstream(format!("identity authority unreachable: {}", e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Identity authority rejected session exchange with status {}", status);
            return Err(VerifyError::Rejected { status: status.as_u16() });
        }

        let identity: VerifiedIdentity = response
            .json()
            .await
            .map_err(|e| VerifyError::Upstream(format!("malformed identity response: {}", e)))?;

        info!("Identity verified for {}", identity.email);
        Ok(identity)
    }
}
