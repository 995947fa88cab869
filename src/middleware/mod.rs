/*
 * Responsibility
 * - Public interface of the middleware layer
 * - auth::gate (edge authentication), http (cross-cutting transport concerns)
 */
pub mod auth;
pub mod http;
