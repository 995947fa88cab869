//! Identity verifier interface used by the gate.
use std::time::Duration;

use async_trait::async_trait;
use axum::http::{HeaderValue, StatusCode};
use thiserror::Error;

use crate::services::gate::Credential;

/// Result type for verification calls.
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Transport-level failures of the verification call.
///
/// A completed call with a non-200 status is NOT an error here; status
/// interpretation belongs to the gate.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("identity service transport error: {0}")]
    Transport(String),
    #[error("identity service did not answer within {0} ms")]
    Timeout(u64),
    #[error("identity service reply exceeds {0} bytes")]
    BodyTooLarge(usize),
}

impl VerifyError {
    pub fn timeout(after: Duration) -> Self {
        Self::Timeout(u64::try_from(after.as_millis()).unwrap_or(u64::MAX))
    }
}

/// One outgoing verification call. Built fresh per inbound request.
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    pub credential: Credential,
    pub request_id: Option<HeaderValue>,
}

#[derive(Debug, Clone)]
pub struct VerificationResponse {
    pub status: StatusCode,
    pub body: String,
}

impl VerificationResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Calls the identity service's token-verification route.
///
/// Implementations must be shareable across concurrent requests
/// (typically a pooled client inside).
#[async_trait]
pub trait IdentityVerifier: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Issue a single GET carrying the credential unmodified.
    //
    // Returns:
    // - `Ok(response)` for any completed exchange, whatever the status
    // - `Err(_)`       if the call could not complete
    async fn verify(&self, request: VerificationRequest) -> VerifyResult<VerificationResponse>;
}
