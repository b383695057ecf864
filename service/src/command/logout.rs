//! [`Command`] for ending the current session.

use tracerr::Traced;
use tracing as log;

use crate::{
    infra::{api::auth, store},
    Service,
};

use super::{send_request, ClearTokens, Command, SendRequest};

/// [`Command`] for ending the current session.
///
/// Notifies the server, but clears the stored tokens whatever it responds,
/// even if it's unreachable.
#[derive(Clone, Copy, Debug, Default)]
pub struct Logout;

impl<A, S, N> Command<Logout> for Service<A, S, N>
where
    Self: Command<
            SendRequest<auth::Logout>,
            Err = Traced<send_request::ExecutionError>,
        > + Command<ClearTokens, Ok = (), Err = Traced<store::Error>>,
{
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(&self, _: Logout) -> Result<Self::Ok, Self::Err> {
        if let Err(e) = self.execute(SendRequest::new(auth::Logout)).await {
            log::warn!("server-side logout failed: {e}");
        }

        self.execute(ClearTokens).await.map_err(tracerr::wrap!())?;

        log::info!("logged out");
        Ok(())
    }
}
