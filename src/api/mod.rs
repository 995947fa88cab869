/*
 * Responsibility
 * - HTTP surface of the gate service (routes() re-export, handlers, extractors)
 */
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
