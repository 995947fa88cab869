/*
 * Responsibility
 * - Gate error taxonomy (GateError)
 * - HTTP status / short message per kind
 * - IntoResponse implementation (HTTP status / JSON error body)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// Why a request was denied.
///
/// The `Display` text is the short message returned to the caller; details
/// (upstream errors, bodies) only go to the log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("no credential")]
    MissingCredential,
    #[error("internal error")]
    UpstreamUnreachable,
    #[error("invalid token")]
    UpstreamRejected { status: StatusCode },
    #[error("parse error")]
    MalformedUpstreamBody,
    #[error("identity unresolved")]
    MissingIdentity,
}

impl GateError {
    pub fn status(&self) -> StatusCode {
        match self {
            // Client-side: "you are not authorized"
            GateError::MissingCredential | GateError::UpstreamRejected { .. } => {
                StatusCode::UNAUTHORIZED
            }
            // Server-side: "the gate itself is broken"
            GateError::UpstreamUnreachable
            | GateError::MalformedUpstreamBody
            | GateError::MissingIdentity => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        if self.status() == StatusCode::UNAUTHORIZED {
            "UNAUTHORIZED"
        } else {
            "INTERNAL_SERVER_ERROR"
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}
