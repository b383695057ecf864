//! [`Command`] for logging a [`User`] in through an SSO [`Provider`].

use common::operations::Perform;
use derive_more::{Display, Error};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::sso::Provider,
    infra::{
        navigator::{self, Redirect},
        Navigator,
    },
    Service,
};

use super::Command;

/// [`Command`] for logging a [`User`] in through an SSO [`Provider`].
///
/// Hands a full-page [`Redirect`] to the [`Navigator`] and never completes
/// the login by itself: the server finishes the flow. Stored tokens are
/// left untouched.
#[derive(Clone, Copy, Debug)]
pub struct LoginWithSso {
    /// SSO [`Provider`] to log in with.
    pub provider: Provider,
}

impl<A, S, N> Command<LoginWithSso> for Service<A, S, N>
where
    N: Navigator<Perform<Redirect>, Ok = (), Err = Traced<navigator::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: LoginWithSso) -> Result<Self::Ok, Self::Err> {
        let LoginWithSso { provider } = cmd;

        let url = format!(
            "{}/auth/sso/{provider}",
            self.config().api_url.trim_end_matches('/'),
        );
        log::debug!("redirecting to `{url}`");

        self.navigator()
            .execute(Perform(Redirect { url }))
            .await
            .map_err(|e| {
                log::warn!("SSO redirect failed: {e}");
                tracerr::new!(ExecutionError::ConnectionFailed(provider))
            })
    }
}

/// Error of [`LoginWithSso`] [`Command`] execution.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
pub enum ExecutionError {
    /// [`Redirect`] to the [`Provider`] could not be performed.
    #[display("Failed to connect with {}. Please try again.", _0.label())]
    ConnectionFailed(#[error(not(source))] Provider),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::sso::Provider,
        infra::mock,
        query::IsAuthenticated,
    };

    use super::{Command as _, ExecutionError, LoginWithSso};

    #[tokio::test]
    async fn redirects_to_provider() {
        let svc = mock::service();

        for provider in Provider::ALL {
            svc.execute(LoginWithSso {
                provider: *provider,
            })
            .await
            .unwrap();
        }

        assert_eq!(
            svc.navigator().urls(),
            [
                "http://localhost:8080/api/auth/sso/google",
                "http://localhost:8080/api/auth/sso/microsoft",
                "http://localhost:8080/api/auth/sso/github",
            ],
        );
        assert!(svc.api().calls().is_empty());
        assert!(!svc.execute(IsAuthenticated).await.unwrap());
    }

    #[tokio::test]
    async fn reports_failed_redirect() {
        let svc = mock::service();
        svc.navigator().refuse();

        let err = svc
            .execute(LoginWithSso {
                provider: Provider::Github,
            })
            .await
            .unwrap_err();

        assert_eq!(
            *err.as_ref(),
            ExecutionError::ConnectionFailed(Provider::Github),
        );
        assert_eq!(
            err.to_string(),
            "Failed to connect with GitHub. Please try again.",
        );
    }
}
