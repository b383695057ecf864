//! Infrastructure layer.

pub mod api;
#[cfg(test)]
pub(crate) mod mock;
pub mod navigator;
pub mod store;

#[cfg(feature = "file")]
pub use self::store::File;
pub use self::{
    api::{Api, Http},
    navigator::Navigator,
    store::{Memory, Scoped, Store},
};
