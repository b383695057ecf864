//! [`Command`] definition.

pub mod auth;
pub mod clear_tokens;
pub mod login_with_email;
pub mod login_with_sso;
pub mod logout;
pub mod send_request;
pub mod signup_with_email;
pub mod store_tokens;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    clear_tokens::ClearTokens, login_with_email::LoginWithEmail,
    login_with_sso::LoginWithSso, logout::Logout, send_request::SendRequest,
    signup_with_email::SignupWithEmail, store_tokens::StoreTokens,
};
