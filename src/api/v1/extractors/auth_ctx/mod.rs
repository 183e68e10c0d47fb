/*!
 * Authenticated identity extractor
 *
 * Responsibility:
 * - hand the identity resolved by the auth middleware (access / permission) to handlers
 * - handlers never see credentials, only the identity of the current request
 */

mod core;

pub use core::CurrentIdentity;
