//! [`Command`] for sending an authorized request to the [`Api`].

use common::operations::Perform;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::session::AccessToken,
    infra::{
        api::{self, Call, Endpoint},
        store, Api,
    },
    query::{Query, ReadAccessToken},
    Service,
};

use super::Command;

/// [`Command`] for sending a request to an [`Endpoint`], authorized with the
/// stored [`AccessToken`] (if any).
///
/// Failures are never swallowed.
#[derive(Clone, Debug)]
pub struct SendRequest<E> {
    /// [`Endpoint`] to send the request to.
    pub endpoint: E,
}

impl<E> SendRequest<E> {
    /// Creates a new [`SendRequest`] to the provided [`Endpoint`].
    #[must_use]
    pub fn new(endpoint: E) -> Self {
        Self { endpoint }
    }
}

impl<A, S, N, E> Command<SendRequest<E>> for Service<A, S, N>
where
    E: Endpoint,
    A: Api<
        Perform<Call<E>>,
        Ok = Option<E::Response>,
        Err = Traced<api::Error>,
    >,
    Self: Query<
        ReadAccessToken,
        Ok = Option<AccessToken>,
        Err = Traced<store::Error>,
    >,
{
    type Ok = Option<E::Response>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SendRequest<E>,
    ) -> Result<Self::Ok, Self::Err> {
        let token = self
            .execute(ReadAccessToken)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;

        self.api()
            .execute(Perform(Call {
                endpoint: cmd.endpoint,
                token,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`SendRequest`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Store`] error.
    ///
    /// [`Store`]: crate::infra::Store
    #[display("`Store` operation failed: {_0}")]
    Store(store::Error),

    /// [`Api`] error.
    #[display("{_0}")]
    Api(api::Error),
}

impl ExecutionError {
    /// Returns the [`api::Error`] of this [`ExecutionError`], if any.
    #[must_use]
    pub fn as_api(&self) -> Option<&api::Error> {
        match self {
            Self::Api(e) => Some(e),
            Self::Store(_) => None,
        }
    }
}
