//! Edge authentication gate.
//!
//! Every inbound request is checked against an external identity service:
//! the `Authorization` credential is forwarded to a verify endpoint, and the
//! request is either denied (401 / 500) or allowed with the verified user id
//! in `X-User-Id`. Usable as a forward-auth service (`GET /auth`) or as an axum
//! middleware layer (`middleware::auth::gate::apply`).
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
