/*
 * Responsibility
 * - Per-request values the gate works on (InboundRequest, Credential, Identity)
 * - The gate's sole output (GateDecision)
 * - Nothing here is retained across requests
 */
use std::fmt;
use std::str::FromStr;

use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri, header};

use crate::error::GateError;

/// Header carrying the verified user id to downstream services.
pub const USER_ID_HEADER: HeaderName = HeaderName::from_static("x-user-id");

/// Borrowed view of the request being gated.
///
/// Built by the hosting layer from the request parts; the gate never mutates it.
#[derive(Debug, Clone, Copy)]
pub struct InboundRequest<'a> {
    pub method: &'a Method,
    pub uri: &'a Uri,
    pub headers: &'a HeaderMap,
}

impl<'a> InboundRequest<'a> {
    pub fn new(method: &'a Method, uri: &'a Uri, headers: &'a HeaderMap) -> Self {
        Self {
            method,
            uri,
            headers,
        }
    }

    pub fn from_parts(parts: &'a axum::http::request::Parts) -> Self {
        Self::new(&parts.method, &parts.uri, &parts.headers)
    }

    pub fn credential(&self) -> Option<Credential> {
        self.headers
            .get(header::AUTHORIZATION)
            .and_then(Credential::from_header)
    }

    pub fn request_id(&self) -> Option<HeaderValue> {
        self.headers.get("x-request-id").cloned()
    }
}

/// Opaque bearer credential, kept as the raw header bytes so it is forwarded
/// exactly as received.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(HeaderValue);

impl Credential {
    /// `None` for an empty header value.
    pub fn from_header(value: &HeaderValue) -> Option<Self> {
        if value.is_empty() {
            None
        } else {
            Some(Self(value.clone()))
        }
    }

    pub fn header_value(&self) -> &HeaderValue {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Verified user identity as reported by the identity service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user_id: String,
    header: HeaderValue,
}

impl Identity {
    /// Fails when the id cannot travel as an HTTP header value.
    pub fn new(user_id: impl Into<String>) -> Result<Self, GateError> {
        let user_id = user_id.into();
        let header =
            HeaderValue::from_str(&user_id).map_err(|_| GateError::MalformedUpstreamBody)?;
        Ok(Self { user_id, header })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn header_value(&self) -> &HeaderValue {
        &self.header
    }
}

/// What to do when the identity service accepts a credential but reports no
/// recognizable user id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingIdentityPolicy {
    /// Allow the request without an `X-User-Id` header.
    #[default]
    Lenient,
    /// Deny with a server-side error.
    Strict,
}

impl FromStr for MissingIdentityPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            _ => Err(()),
        }
    }
}

/// Terminal outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow(Option<Identity>),
    Deny(GateError),
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Allow(_) => StatusCode::OK,
            Self::Deny(err) => err.status(),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Allow(identity) => identity.as_ref(),
            Self::Deny(_) => None,
        }
    }
}
