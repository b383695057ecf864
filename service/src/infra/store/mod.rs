//! [`Store`]-related implementations.
//!
//! Two independent key-value areas hold the session: a durable one and a
//! session-scoped one (see [`Persistence`]). Each area is a backend
//! implementing the unscoped operations on a [`Key`], while [`Scoped`]
//! composes two backends into a single [`Store`] of scoped operations.
//! There is no atomicity across the two areas: the last write wins.

#[cfg(feature = "file")]
pub mod file;
pub mod memory;

use std::io;

use common::operations::{By, Delete, Insert, Select};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;

use crate::domain::session::Persistence;

#[cfg(feature = "file")]
pub use self::file::File;
pub use self::memory::Memory;

/// Key-value storage operation.
pub use common::Handler as Store;

/// Key of a stored session value.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
pub enum Key {
    /// Access token of the session.
    #[strum(serialize = "auth_token")]
    AuthToken,

    /// Refresh token of the session.
    #[strum(serialize = "auth_refresh_token")]
    RefreshToken,

    /// "Remember me" choice, as `"true"` or `"false"`.
    ///
    /// Only ever stored in the [`Persistence::Durable`] area.
    #[strum(serialize = "auth_remember_me")]
    RememberMe,
}

impl Key {
    /// Returns the name this [`Key`] is stored under.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Value stored under a [`Key`] in a storage area.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    /// Storage area of this [`Entry`].
    pub persistence: Persistence,

    /// [`Key`] of this [`Entry`].
    pub key: Key,

    /// Stored value.
    pub value: String,
}

impl Entry {
    /// Creates a new [`Entry`].
    #[must_use]
    pub fn new(
        persistence: Persistence,
        key: Key,
        value: impl Into<String>,
    ) -> Self {
        Self {
            persistence,
            key,
            value: value.into(),
        }
    }
}

/// [`Store`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// I/O error of a disk-backed storage area.
    #[display("I/O operation failed: {_0}")]
    Io(io::Error),

    /// Stored data is not valid JSON.
    #[display("Malformed stored data: {_0}")]
    Json(serde_json::Error),
}

/// Durable and session-scoped storage areas combined into one [`Store`].
#[derive(Clone, Debug, Default)]
pub struct Scoped<D, S> {
    /// Durable storage area.
    durable: D,

    /// Session-scoped storage area.
    session: S,
}

impl<D, S> Scoped<D, S> {
    /// Creates a new [`Scoped`] [`Store`] out of the provided areas.
    #[must_use]
    pub fn new(durable: D, session: S) -> Self {
        Self { durable, session }
    }

    /// Returns the durable storage area.
    #[must_use]
    pub fn durable(&self) -> &D {
        &self.durable
    }

    /// Returns the session-scoped storage area.
    #[must_use]
    pub fn session(&self) -> &S {
        &self.session
    }
}

impl<D, S> Store<Insert<Entry>> for Scoped<D, S>
where
    D: Store<Insert<(Key, String)>, Ok = (), Err = Traced<Error>>,
    S: Store<Insert<(Key, String)>, Ok = (), Err = Traced<Error>>,
{
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert(entry): Insert<Entry>,
    ) -> Result<Self::Ok, Self::Err> {
        let Entry {
            persistence,
            key,
            value,
        } = entry;

        match persistence {
            Persistence::Durable => {
                self.durable.execute(Insert((key, value))).await
            }
            Persistence::Session => {
                self.session.execute(Insert((key, value))).await
            }
        }
        .map_err(tracerr::wrap!())
    }
}

impl<D, S> Store<Select<By<Option<String>, (Persistence, Key)>>>
    for Scoped<D, S>
where
    D: Store<
        Select<By<Option<String>, Key>>,
        Ok = Option<String>,
        Err = Traced<Error>,
    >,
    S: Store<
        Select<By<Option<String>, Key>>,
        Ok = Option<String>,
        Err = Traced<Error>,
    >,
{
    type Ok = Option<String>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<String>, (Persistence, Key)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (persistence, key) = by.into_inner();

        match persistence {
            Persistence::Durable => {
                self.durable.execute(Select(By::new(key))).await
            }
            Persistence::Session => {
                self.session.execute(Select(By::new(key))).await
            }
        }
        .map_err(tracerr::wrap!())
    }
}

impl<D, S> Store<Delete<(Persistence, Key)>> for Scoped<D, S>
where
    D: Store<Delete<Key>, Ok = (), Err = Traced<Error>>,
    S: Store<Delete<Key>, Ok = (), Err = Traced<Error>>,
{
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Delete((persistence, key)): Delete<(Persistence, Key)>,
    ) -> Result<Self::Ok, Self::Err> {
        match persistence {
            Persistence::Durable => self.durable.execute(Delete(key)).await,
            Persistence::Session => self.session.execute(Delete(key)).await,
        }
        .map_err(tracerr::wrap!())
    }
}
