use std::time::Duration;

use async_trait::async_trait;
use axum::http::{HeaderName, header};
use url::Url;

use crate::services::identity::client::{
    IdentityVerifier, VerificationRequest, VerificationResponse, VerifyError, VerifyResult,
};

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Verification replies are small JSON objects; anything larger is refused.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// reqwest-backed verifier calling `GET <verify_url>`.
///
/// Redirects are not followed: a 3xx is the identity service's answer and is
/// judged like any other non-200 status.
///
/// Cheap to clone: `reqwest::Client` is an `Arc` around a connection pool.
#[derive(Clone, Debug)]
pub struct HttpIdentityVerifier {
    client: reqwest::Client,
    verify_url: Url,
    timeout: Duration,
}

impl HttpIdentityVerifier {
    pub fn new(verify_url: Url, timeout: Duration) -> Result<Self, VerifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| VerifyError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            verify_url,
            timeout,
        })
    }

    pub fn verify_url(&self) -> &Url {
        &self.verify_url
    }
}

#[async_trait]
impl IdentityVerifier for HttpIdentityVerifier {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    async fn verify(&self, request: VerificationRequest) -> VerifyResult<VerificationResponse> {
        let mut builder = self
            .client
            .get(self.verify_url.clone())
            .header(header::AUTHORIZATION, request.credential.header_value().clone());

        if let Some(request_id) = request.request_id {
            builder = builder.header(REQUEST_ID_HEADER, request_id);
        }

        let mut response = builder.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status();

        if response
            .content_length()
            .is_some_and(|len| len > MAX_BODY_BYTES as u64)
        {
            return Err(VerifyError::BodyTooLarge(MAX_BODY_BYTES));
        }

        // A body that cannot be read is a broken exchange, not a bad token.
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| self.map_error(e))? {
            if body.len() + chunk.len() > MAX_BODY_BYTES {
                return Err(VerifyError::BodyTooLarge(MAX_BODY_BYTES));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(VerificationResponse {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}

impl HttpIdentityVerifier {
    fn map_error(&self, err: reqwest::Error) -> VerifyError {
        if err.is_timeout() {
            VerifyError::timeout(self.timeout)
        } else {
            VerifyError::Transport(err.to_string())
        }
    }
}
