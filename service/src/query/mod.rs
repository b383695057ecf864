//! [`Query`] definition.

pub mod is_authenticated;
pub mod read_access_token;

/// [`Query`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Query;

pub use self::{
    is_authenticated::IsAuthenticated, read_access_token::ReadAccessToken,
};
