//! [`Failure`] of authentication [`Command`]s.

use derive_more::{Display, Error};
use reqwest::StatusCode;

#[cfg(doc)]
use super::{Command, LoginWithEmail, SignupWithEmail};

/// User-facing reason of a failed [`LoginWithEmail`] or [`SignupWithEmail`]
/// [`Command`].
///
/// Displays as the sentence to show to the user. The underlying cause is
/// never exposed.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum Failure {
    /// Wrong email or password.
    #[display("Invalid email or password")]
    InvalidCredentials,

    /// Too many login attempts.
    #[display("Too many attempts. Please try again later.")]
    RateLimited,

    /// Account is locked.
    #[display("Account locked. Please reset your password.")]
    AccountLocked,

    /// Account with the same email exists already.
    #[display("An account with this email already exists")]
    Conflict,

    /// Server rejected the signup details.
    #[display("Please check your information and try again")]
    ValidationFailed,

    /// Any other failure.
    #[display("Something went wrong. Please try again.")]
    Unknown,
}

impl Failure {
    /// Maps the [`StatusCode`] of a failed login to a [`Failure`].
    #[must_use]
    pub fn of_login(status: Option<StatusCode>) -> Self {
        match status {
            Some(StatusCode::UNAUTHORIZED) => Self::InvalidCredentials,
            Some(StatusCode::TOO_MANY_REQUESTS) => Self::RateLimited,
            Some(StatusCode::FORBIDDEN) => Self::AccountLocked,
            Some(_) | None => Self::Unknown,
        }
    }

    /// Maps the [`StatusCode`] of a failed signup to a [`Failure`].
    #[must_use]
    pub fn of_signup(status: Option<StatusCode>) -> Self {
        match status {
            Some(StatusCode::CONFLICT) => Self::Conflict,
            Some(StatusCode::UNPROCESSABLE_ENTITY) => Self::ValidationFailed,
            Some(_) | None => Self::Unknown,
        }
    }
}
