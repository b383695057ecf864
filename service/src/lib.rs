//! Service contains the session logic of the LifeOps client.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;

use smart_default::SmartDefault;

#[cfg(doc)]
use infra::{Api, Navigator, Store};

pub use self::{command::Command, query::Query};

#[cfg(test)]
use uuid as _;
#[cfg(test)]
use wiremock as _;

/// [`Service`] configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Absolute base address of the LifeOps API.
    ///
    /// SSO redirects are built on top of it.
    #[default("http://localhost:8080/api".to_owned())]
    pub api_url: String,
}

/// Session service of the LifeOps client.
#[derive(Clone, Debug)]
pub struct Service<A, S, N> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Api`] of this [`Service`].
    api: A,

    /// [`Store`] of this [`Service`].
    store: S,

    /// [`Navigator`] of this [`Service`].
    navigator: N,
}

impl<A, S, N> Service<A, S, N> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, api: A, store: S, navigator: N) -> Self {
        Self {
            config,
            api,
            store,
            navigator,
        }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Api`] of this [`Service`].
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Returns [`Store`] of this [`Service`].
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns [`Navigator`] of this [`Service`].
    #[must_use]
    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}
