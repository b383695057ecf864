//! [`Command`] for clearing the stored tokens.

use common::operations::Delete;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::session::Persistence,
    infra::{
        store::{self, Key},
        Store,
    },
    Service,
};

use super::Command;

/// [`Command`] for clearing the stored tokens from both storage areas.
///
/// Idempotent: clearing an empty [`Store`] succeeds. Every stored value is
/// attempted even if some removal fails, and the first failure is returned.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClearTokens;

impl ClearTokens {
    /// Stored values removed by [`ClearTokens`].
    const ENTRIES: [(Persistence, Key); 5] = [
        (Persistence::Durable, Key::AuthToken),
        (Persistence::Durable, Key::RefreshToken),
        (Persistence::Durable, Key::RememberMe),
        (Persistence::Session, Key::AuthToken),
        (Persistence::Session, Key::RefreshToken),
    ];
}

impl<A, S, N> Command<ClearTokens> for Service<A, S, N>
where
    S: Store<Delete<(Persistence, Key)>, Ok = (), Err = Traced<store::Error>>,
{
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(&self, _: ClearTokens) -> Result<Self::Ok, Self::Err> {
        let mut failure = None;
        for entry in ClearTokens::ENTRIES {
            if let Err(e) = self.store().execute(Delete(entry)).await {
                log::warn!("failed to clear {} `{}`: {e}", entry.0, entry.1);
                failure = failure.or(Some(e));
            }
        }

        if let Some(e) = failure {
            return Err(tracerr::wrap!()(e));
        }
        log::debug!("tokens cleared");
        Ok(())
    }
}
