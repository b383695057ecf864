//! [`Command`] for storing a [`TokenPair`].

use common::operations::Insert;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::session::{Persistence, TokenPair},
    infra::{
        store::{self, Entry, Key},
        Store,
    },
    Service,
};

use super::Command;

/// [`Command`] for storing a [`TokenPair`].
///
/// The "remember me" choice itself always goes to the
/// [`Persistence::Durable`] area, while the [`TokenPair`] goes to the area
/// matching it. Any previously stored tokens are overwritten.
#[derive(Clone, Debug)]
pub struct StoreTokens {
    /// [`TokenPair`] to store.
    pub tokens: TokenPair,

    /// Whether the [`TokenPair`] should survive restarts.
    pub remember: bool,
}

impl<A, S, N> Command<StoreTokens> for Service<A, S, N>
where
    S: Store<Insert<Entry>, Ok = (), Err = Traced<store::Error>>,
{
    type Ok = ();
    type Err = Traced<store::Error>;

    async fn execute(&self, cmd: StoreTokens) -> Result<Self::Ok, Self::Err> {
        let StoreTokens {
            tokens: TokenPair { access, refresh },
            remember,
        } = cmd;
        let persistence = Persistence::remembered(remember);

        for entry in [
            Entry::new(Persistence::Durable, Key::RememberMe, remember.to_string()),
            Entry::new(persistence, Key::AuthToken, String::from(access)),
            Entry::new(persistence, Key::RefreshToken, String::from(refresh)),
        ] {
            self.store()
                .execute(Insert(entry))
                .await
                .map_err(tracerr::wrap!())?;
        }

        log::debug!("tokens stored in {persistence} storage");
        Ok(())
    }
}
