//! Edge authentication middleware: AuthGate → `X-User-Id` on the forwarded request.
//!
//! - Any client-supplied `X-User-Id` is removed before evaluation; only the
//!   gate may set it.
//! - Allow: the verified id goes into the `X-User-Id` header and the
//!   [`Identity`] into request extensions, then the inner service runs.
//! - Deny: the response is produced here and the inner service never runs.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::GateError;
use crate::services::gate::{GateDecision, Identity, InboundRequest, USER_ID_HEADER};
use crate::state::AppState;

/// Put the gate in front of every route of `router`.
///
/// ```ignore
/// let protected = Router::new().route("/orders", get(list_orders));
/// let protected = middleware::auth::gate::apply(protected, state.clone());
/// ```
pub fn apply<S>(router: Router<S>, state: AppState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(state, gate_middleware))
}

async fn gate_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, GateError> {
    let (mut parts, body) = req.into_parts();

    if parts.headers.remove(&USER_ID_HEADER).is_some() {
        tracing::warn!(uri = %parts.uri, "dropping client-supplied x-user-id");
    }

    let decision = state
        .gate
        .evaluate(&InboundRequest::from_parts(&parts))
        .await;

    match decision {
        GateDecision::Allow(identity) => {
            if let Some(identity) = identity {
                parts
                    .headers
                    .insert(USER_ID_HEADER, identity.header_value().clone());
                parts.extensions.insert::<Identity>(identity);
            }
            Ok(next.run(Request::from_parts(parts, body)).await)
        }
        GateDecision::Deny(err) => Err(err),
    }
}
