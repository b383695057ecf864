//! [`Command`] for logging a [`User`] in with email credentials.

use secrecy::SecretBox;
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::user,
    infra::{
        api::auth::{self, AuthResponse},
        store,
    },
    Service,
};

use super::{auth::Failure, send_request, Command, SendRequest, StoreTokens};

/// [`Command`] for logging a [`User`] in with email credentials.
///
/// On success the granted tokens are stored honoring the
/// [`LoginWithEmail::remember_me`] choice.
#[derive(Clone, Debug)]
pub struct LoginWithEmail {
    /// [`user::Email`] of the [`User`].
    pub email: user::Email,

    /// [`user::Password`] of the [`User`].
    pub password: SecretBox<user::Password>,

    /// Whether the session should survive restarts.
    pub remember_me: bool,
}

impl<A, S, N> Command<LoginWithEmail> for Service<A, S, N>
where
    Self: Command<
            SendRequest<auth::Login>,
            Ok = Option<AuthResponse>,
            Err = Traced<send_request::ExecutionError>,
        > + Command<StoreTokens, Ok = (), Err = Traced<store::Error>>,
{
    type Ok = AuthResponse;
    type Err = Traced<Failure>;

    async fn execute(
        &self,
        cmd: LoginWithEmail,
    ) -> Result<Self::Ok, Self::Err> {
        let LoginWithEmail {
            email,
            password,
            remember_me,
        } = cmd;

        let resp = self
            .execute(SendRequest::new(auth::Login { email, password }))
            .await
            .map_err(|e| {
                let status = e.as_ref().as_api().and_then(|e| e.status_code());
                let failure = Failure::of_login(status);
                if failure == Failure::Unknown {
                    log::warn!("login failed: {e}");
                }
                tracerr::new!(failure)
            })?
            .ok_or_else(|| {
                log::warn!("login failed: no content in response");
                tracerr::new!(Failure::Unknown)
            })?;

        self.execute(StoreTokens {
            tokens: resp.tokens(),
            remember: remember_me,
        })
        .await
        .map_err(|e| {
            log::warn!("login failed: {e}");
            tracerr::new!(Failure::Unknown)
        })?;

        log::info!("logged in as `{}`", resp.user.email);
        Ok(resp)
    }
}

#[cfg(test)]
mod spec {
    use reqwest::StatusCode;
    use secrecy::SecretBox;
    use serde_json::json;

    use crate::{
        command::auth::Failure,
        domain::{
            session::Persistence,
            user::{Email, Password},
        },
        infra::{api, mock, store::Key},
        query::IsAuthenticated,
    };

    use super::{Command as _, LoginWithEmail};

    fn login(remember_me: bool) -> LoginWithEmail {
        LoginWithEmail {
            email: Email::new("a@b.com").unwrap(),
            password: SecretBox::new(Box::new(Password::new("x").unwrap())),
            remember_me,
        }
    }

    #[tokio::test]
    async fn stores_tokens_durably_when_remembered() {
        let svc = mock::service();
        svc.api().respond(Ok(Some(mock::auth_response("T1", "R1"))));

        let resp = svc.execute(login(true)).await.unwrap();

        assert_eq!(resp.token.as_ref(), "T1");
        assert_eq!(resp.user.email.as_ref(), "a@b.com");
        assert_eq!(
            mock::stored_value(&svc, Persistence::Durable, Key::AuthToken)
                .await
                .as_deref(),
            Some("T1"),
        );
        assert!(svc.execute(IsAuthenticated).await.unwrap());

        let calls = svc.api().calls();
        assert_eq!(calls[0].path, "/auth/login");
        assert_eq!(
            calls[0].body,
            Some(json!({"email": "a@b.com", "password": "x"})),
        );
        assert_eq!(calls[0].token, None);
    }

    #[tokio::test]
    async fn stores_tokens_in_session_by_default() {
        let svc = mock::service();
        svc.api().respond(Ok(Some(mock::auth_response("T1", "R1"))));

        _ = svc.execute(login(false)).await.unwrap();

        assert_eq!(
            mock::stored_value(&svc, Persistence::Durable, Key::AuthToken)
                .await,
            None,
        );
        assert_eq!(
            mock::stored_value(&svc, Persistence::Session, Key::AuthToken)
                .await
                .as_deref(),
            Some("T1"),
        );
    }

    #[tokio::test]
    async fn translates_statuses() {
        for (status, expected) in [
            (StatusCode::UNAUTHORIZED, Failure::InvalidCredentials),
            (StatusCode::TOO_MANY_REQUESTS, Failure::RateLimited),
            (StatusCode::FORBIDDEN, Failure::AccountLocked),
            (StatusCode::INTERNAL_SERVER_ERROR, Failure::Unknown),
        ] {
            let svc = mock::service();
            svc.api().respond(Err(api::Error::status(
                status,
                Some(json!({"message": "server detail"})),
            )));

            let err = svc.execute(login(true)).await.unwrap_err();

            assert_eq!(*err.as_ref(), expected);
            assert!(!svc.execute(IsAuthenticated).await.unwrap());
        }
    }

    #[tokio::test]
    async fn collapses_other_failures() {
        let svc = mock::service();
        svc.api().respond(Err(mock::network_error()));
        let err = svc.execute(login(false)).await.unwrap_err();
        assert_eq!(err.to_string(), "Something went wrong. Please try again.");

        let svc = mock::service();
        svc.api().respond(Ok(None));
        let err = svc.execute(login(false)).await.unwrap_err();
        assert_eq!(*err.as_ref(), Failure::Unknown);
        assert!(!svc.execute(IsAuthenticated).await.unwrap());
    }
}
