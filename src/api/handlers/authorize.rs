/*
 * Responsibility
 * - Forward-auth endpoint: the proxy issues a subrequest here per inbound request
 * - 200 "Authorized" (+ X-User-Id) lets the proxy continue; 401/500 stops it
 */
use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::services::gate::{GateDecision, InboundRequest, USER_ID_HEADER};
use crate::state::AppState;

pub async fn authorize(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let request = InboundRequest::new(&method, &uri, &headers);
    render(state.gate.evaluate(&request).await)
}

/// Apply a decision to the forward-auth response.
pub fn render(decision: GateDecision) -> Response {
    match decision {
        GateDecision::Allow(identity) => {
            let mut response = (StatusCode::OK, "Authorized").into_response();
            if let Some(identity) = identity {
                response
                    .headers_mut()
                    .insert(USER_ID_HEADER, identity.header_value().clone());
            }
            response
        }
        GateDecision::Deny(err) => err.into_response(),
    }
}
