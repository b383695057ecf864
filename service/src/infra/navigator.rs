//! [`Navigator`]-related definitions.

use std::io;

use derive_more::{Display, Error as StdError, From};

#[cfg(doc)]
use common::operations::Perform;

/// Navigation of the current context (a browser tab, a terminal, etc).
///
/// Executes [`Perform`]`<`[`Redirect`]`>` operations.
pub use common::Handler as Navigator;

/// Full-page redirect to the provided URL.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display("{url}")]
pub struct Redirect {
    /// Absolute URL to navigate to.
    pub url: String,
}

/// [`Navigator`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// I/O error while handing the [`Redirect`] over.
    #[display("Failed to hand the redirect over: {_0}")]
    Io(io::Error),

    /// Navigation was refused by the environment.
    #[display("Navigation refused: {_0}")]
    #[from(ignore)]
    Refused(#[error(not(source))] String),
}
