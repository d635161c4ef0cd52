//! Request extractors for the caller's identity.

mod admin;
pub use admin::{AdminUser, MaybeUser};
