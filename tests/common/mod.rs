use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use edge_auth_gate::app::build_router;
use edge_auth_gate::services::gate::{AuthGate, MissingIdentityPolicy};
use edge_auth_gate::services::identity::HttpIdentityVerifier;
use edge_auth_gate::state::AppState;
use url::Url;

/// Local stand-in for the identity service's verify-token route.
#[allow(dead_code)]
pub struct IdentityService {
    pub addr: SocketAddr,
    pub calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl IdentityService {
    pub async fn spawn() -> Self {
        let calls = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route("/user/verify-token", get(verify_token))
            .route(
                "/user/elsewhere",
                get(|| async { r#"{"userId":"via-redirect"}"# }),
            )
            .with_state(calls.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { addr, calls }
    }

    pub fn verify_url(&self) -> Url {
        Url::parse(&format!("http://{}/user/verify-token", self.addr)).unwrap()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

async fn verify_token(State(calls): State<Arc<AtomicUsize>>, headers: HeaderMap) -> Response {
    calls.fetch_add(1, Ordering::SeqCst);

    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    match token {
        "Bearer good" => (StatusCode::OK, r#"{"userId":"abc123"}"#).into_response(),
        "Bearer alt" => (StatusCode::OK, r#"{"UserId":"u2","id":"ignored"}"#).into_response(),
        "Bearer numeric" => (StatusCode::OK, r#"{"ID":1001}"#).into_response(),
        "Bearer anon" => (StatusCode::OK, r#"{"name":"nobody"}"#).into_response(),
        "Bearer garbled" => (StatusCode::OK, "not-json").into_response(),
        "Bearer slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            (StatusCode::OK, r#"{"userId":"too-late"}"#).into_response()
        }
        "Bearer redirected" => Redirect::temporary("/user/elsewhere").into_response(),
        "Bearer login-page" => Redirect::to("/login").into_response(),
        "Bearer echo-request-id" => {
            let request_id = headers
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            (StatusCode::OK, format!(r#"{{"userId":"{request_id}"}}"#)).into_response()
        }
        _ => (StatusCode::UNAUTHORIZED, r#"{"userId":"should-not-matter"}"#).into_response(),
    }
}

#[allow(dead_code)]
pub fn gate_router(verify_url: Url, policy: MissingIdentityPolicy) -> Router {
    gate_router_with_timeouts(verify_url, policy, Duration::from_secs(2), Duration::from_secs(10))
}

#[allow(dead_code)]
pub fn gate_router_with_timeouts(
    verify_url: Url,
    policy: MissingIdentityPolicy,
    identity_timeout: Duration,
    request_timeout: Duration,
) -> Router {
    let verifier = HttpIdentityVerifier::new(verify_url, identity_timeout).unwrap();
    let gate = AuthGate::new(Arc::new(verifier), policy, identity_timeout);
    build_router(AppState::new(Arc::new(gate)), request_timeout)
}

#[allow(dead_code)]
pub fn auth_request(token: Option<&str>) -> Request<Body> {
    let mut builder = Request::get("/auth").header("x-original-uri", "/api/orders");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    builder.body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
