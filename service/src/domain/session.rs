//! [`Session`] definitions.

use derive_more::{AsRef, Debug, Display, From, Into};
use serde::{Deserialize, Serialize};

/// State of the client-side session.
///
/// There is no `Expired` or `Refreshing` state: a stored [`AccessToken`] is
/// never validated client-side and the [`RefreshToken`] is never used to
/// mint a new one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Session {
    /// No [`AccessToken`] is stored.
    Anonymous,

    /// An [`AccessToken`] is stored (and is not validated in any way).
    Authenticated(AccessToken),
}

impl Session {
    /// Indicates whether this [`Session`] is [`Session::Authenticated`].
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

impl From<Option<AccessToken>> for Session {
    fn from(token: Option<AccessToken>) -> Self {
        token.map_or(Self::Anonymous, Self::Authenticated)
    }
}

/// Opaque access token authorizing API requests as a bearer credential.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, Into, PartialEq, Serialize,
)]
#[as_ref(str)]
#[debug("AccessToken(..)")]
#[from(&str, String)]
#[serde(transparent)]
pub struct AccessToken(String);

/// Opaque refresh token.
///
/// Stored alongside the [`AccessToken`], but never read back.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, Into, PartialEq, Serialize,
)]
#[as_ref(str)]
#[debug("RefreshToken(..)")]
#[from(&str, String)]
#[serde(transparent)]
pub struct RefreshToken(String);

/// Pair of tokens granted on a successful login or signup.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenPair {
    /// [`AccessToken`] of this [`TokenPair`].
    pub access: AccessToken,

    /// [`RefreshToken`] of this [`TokenPair`].
    pub refresh: RefreshToken,
}

/// Storage area a [`TokenPair`] is persisted in.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Persistence {
    /// Storage surviving restarts ("remember me").
    #[display("durable")]
    Durable,

    /// Storage cleared when the session ends.
    #[display("session-scoped")]
    Session,
}

impl Persistence {
    /// Picks the [`Persistence`] matching a "remember me" choice.
    #[must_use]
    pub const fn remembered(remember: bool) -> Self {
        if remember {
            Self::Durable
        } else {
            Self::Session
        }
    }
}
