//! [`Command`] for registering a new [`User`].

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

/// [`Command`] for registering a new [`User`] with email credentials.
///
/// The granted tokens are always stored in the session-scoped area: a
/// signup never remembers the session.
#[derive(Clone, Debug)]
pub struct SignupWithEmail {
    /// [`user::Name`] of the new [`User`].
    pub name: user::Name,

    /// [`user::Email`] of the new [`User`].
    pub email: user::Email,

    /// [`user::NewPassword`] of the new [`User`].
    pub password: SecretBox<user::NewPassword>,
}

impl<A, S, N> Command<SignupWithEmail> for Service<A, S, N>
where
    Self: Command<
            SendRequest<auth::Signup>,
            Ok = Option<AuthResponse>,
            Err = Traced<send_request::ExecutionError>,
        > + Command<StoreTokens, Ok = (), Err = Traced<store::Error>>,
{
    type Ok = AuthResponse;
    type Err = Traced<Failure>;

    async fn execute(
        &self,
        cmd: SignupWithEmail,
    ) -> Result<Self::Ok, Self::Err> {
        let SignupWithEmail {
            name,
            email,
            password,
        } = cmd;

        let resp = self
            .execute(SendRequest::new(auth::Signup {
                name,
                email,
                password,
            }))
            .await
            .map_err(|e| {
                let status = e.as_ref().as_api().and_then(|e| e.status_code());
                let failure = Failure::of_signup(status);
                if failure == Failure::Unknown {
                    log::warn!("signup failed: {e}");
                }
                tracerr::new!(failure)
            })?
            .ok_or_else(|| {
                log::warn!("signup failed: no content in response");
                tracerr::new!(Failure::Unknown)
            })?;

        self.execute(StoreTokens {
            tokens: resp.tokens(),
            remember: false,
        })
        .await
        .map_err(|e| {
            log::warn!("signup failed: {e}");
            tracerr::new!(Failure::Unknown)
        })?;

        log::info!("signed up as `{}`", resp.user.email);
        Ok(resp)
    }
}
