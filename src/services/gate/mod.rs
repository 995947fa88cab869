//! Edge authentication gate.
//!
//! Turns one inbound request into one [`GateDecision`]:
//! credential check → single verification call → status / body interpretation.
//! The gate holds no per-request state and caches nothing; every evaluation
//! issues a fresh call to the identity service.
pub mod factory;
pub mod identity;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;

use crate::error::GateError;
use crate::services::identity::{IdentityVerifier, VerificationRequest, VerifyError};

pub use factory::build_auth_gate;
pub use types::{
    Credential, GateDecision, Identity, InboundRequest, MissingIdentityPolicy, USER_ID_HEADER,
};

pub struct AuthGate {
    verifier: Arc<dyn IdentityVerifier>,
    policy: MissingIdentityPolicy,
    timeout: Duration,
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("verifier", &self.verifier.backend_name())
            .field("policy", &self.policy)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AuthGate {
    pub fn new(
        verifier: Arc<dyn IdentityVerifier>,
        policy: MissingIdentityPolicy,
        timeout: Duration,
    ) -> Self {
        Self {
            verifier,
            policy,
            timeout,
        }
    }

    /// Evaluate one request. Suspends only while the verification call is in
    /// flight; dropping the returned future abandons that call.
    pub async fn evaluate(&self, request: &InboundRequest<'_>) -> GateDecision {
        match self.check(request).await {
            Ok(identity) => {
                tracing::debug!(
                    method = %request.method,
                    uri = %request.uri,
                    user_id = identity.as_ref().map(Identity::user_id),
                    "request allowed"
                );
                GateDecision::Allow(identity)
            }
            Err(err) => {
                tracing::info!(
                    method = %request.method,
                    uri = %request.uri,
                    status = err.status().as_u16(),
                    reason = %err,
                    "request denied"
                );
                GateDecision::Deny(err)
            }
        }
    }

    async fn check(&self, request: &InboundRequest<'_>) -> Result<Option<Identity>, GateError> {
        let credential = request.credential().ok_or_else(|| {
            tracing::warn!("no credential");
            GateError::MissingCredential
        })?;

        let call = self.verifier.verify(VerificationRequest {
            credential,
            request_id: request.request_id(),
        });

        let response = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(response)) => response,
            Ok(Err(err @ VerifyError::BodyTooLarge(_))) => {
                tracing::warn!(error = %err, "identity service reply refused");
                return Err(GateError::MalformedUpstreamBody);
            }
            Ok(Err(err)) => {
                tracing::error!(
                    backend = self.verifier.backend_name(),
                    error = %err,
                    "identity service call failed"
                );
                return Err(GateError::UpstreamUnreachable);
            }
            Err(_) => {
                let err = VerifyError::timeout(self.timeout);
                tracing::error!(
                    backend = self.verifier.backend_name(),
                    error = %err,
                    "identity service call failed"
                );
                return Err(GateError::UpstreamUnreachable);
            }
        };

        if response.status != StatusCode::OK {
            tracing::warn!(
                status = response.status.as_u16(),
                "identity service rejected credential"
            );
            return Err(GateError::UpstreamRejected {
                status: response.status,
            });
        }

        tracing::debug!(body_len = response.body.len(), "identity service accepted credential");

        let found = identity::extract_identity(&response.body)?;

        match (found, self.policy) {
            (Some(identity), _) => Ok(Some(identity)),
            (None, MissingIdentityPolicy::Lenient) => {
                tracing::warn!("identity service reply carries no user id; allowing without X-User-Id");
                Ok(None)
            }
            (None, MissingIdentityPolicy::Strict) => {
                tracing::warn!("identity service reply carries no user id");
                Err(GateError::MissingIdentity)
            }
        }
    }
}
