//! Domain definitions.

pub mod session;
pub mod sso;
pub mod user;

pub use self::{session::Session, user::User};
