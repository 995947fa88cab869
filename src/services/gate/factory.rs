/// Factory: build `AuthGate` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::gate::AuthGate;
use crate::services::identity::{HttpIdentityVerifier, VerifyError};

pub fn build_auth_gate(config: &Config) -> Result<Arc<AuthGate>, VerifyError> {
    let verifier = HttpIdentityVerifier::new(
        config.identity_verify_url.clone(),
        config.identity_timeout,
    )?;

    tracing::info!(
        verify_url = %verifier.verify_url(),
        timeout = ?config.identity_timeout,
        policy = ?config.missing_identity_policy,
        "auth gate configured"
    );

    Ok(Arc::new(AuthGate::new(
        Arc::new(verifier),
        config.missing_identity_policy,
        config.identity_timeout,
    )))
}
