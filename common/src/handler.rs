//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler.
///
/// Every seam of the session client is expressed as a [`Handler`] of some
/// operation type: commands and queries of the service, as well as the
/// HTTP, storage and navigation infrastructure they are executed against.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
