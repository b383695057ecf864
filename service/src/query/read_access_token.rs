//! [`Query`] for reading the stored [`AccessToken`].

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::session::{AccessToken, Persistence},
    infra::{
        store::{self, Key},
        Store,
    },
    Service,
};

use super::Query;

/// [`Query`] for reading the stored [`AccessToken`].
///
/// The [`Persistence::Durable`] area is checked before the
/// [`Persistence::Session`] one, whichever area the token was written to
/// last. An empty value counts as absent.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReadAccessToken;

impl<A, S, N> Query<ReadAccessToken> for Service<A, S, N>
where
    S: Store<
        Select<By<Option<String>, (Persistence, Key)>>,
        Ok = Option<String>,
        Err = Traced<store::Error>,
    >,
{
    type Ok = Option<AccessToken>;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        _: ReadAccessToken,
    ) -> Result<Self::Ok, Self::Err> {
        for persistence in [Persistence::Durable, Persistence::Session] {
            let token = self
                .store()
                .execute(Select(By::new((persistence, Key::AuthToken))))
                .await
                .map_err(tracerr::wrap!())?;
            if let Some(token) = token.filter(|t| !t.is_empty()) {
                return Ok(Some(token.into()));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        command::StoreTokens,
        domain::session::TokenPair,
        infra::mock,
    };

    use super::{Query as _, ReadAccessToken};

    async fn store(svc: &mock::Service, access: &str, remember: bool) {
        svc.execute(StoreTokens {
            tokens: TokenPair {
                access: access.into(),
                refresh: "R".into(),
            },
            remember,
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn none_when_nothing_stored() {
        let svc = mock::service();

        assert_eq!(svc.execute(ReadAccessToken).await.unwrap(), None);
    }

    #[tokio::test]
    async fn reads_from_either_area() {
        let durable = mock::service();
        store(&durable, "D", true).await;
        assert_eq!(
            durable.execute(ReadAccessToken).await.unwrap(),
            Some("D".into()),
        );

        let session = mock::service();
        store(&session, "S", false).await;
        assert_eq!(
            session.execute(ReadAccessToken).await.unwrap(),
            Some("S".into()),
        );
    }

    #[tokio::test]
    async fn durable_token_wins() {
        let svc = mock::service();
        store(&svc, "D", true).await;
        store(&svc, "S", false).await;

        assert_eq!(svc.execute(ReadAccessToken).await.unwrap(), Some("D".into()));
    }

    #[tokio::test]
    async fn empty_token_counts_as_absent() {
        let svc = mock::service();
        store(&svc, "", true).await;
        assert_eq!(svc.execute(ReadAccessToken).await.unwrap(), None);

        store(&svc, "S", false).await;
        assert_eq!(svc.execute(ReadAccessToken).await.unwrap(), Some("S".into()));
    }
}
