/*!
 * Authenticated identity extractor
 *
 * Public API:
 * - AuthenticatedUser
 */
mod authenticated_user;

pub use authenticated_user::AuthenticatedUser;
