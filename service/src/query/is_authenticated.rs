//! [`Query`] for checking whether a [`Session`] is authenticated.

use tracerr::Traced;

use crate::{
    domain::{session::AccessToken, Session},
    infra::store,
    Service,
};

use super::{Query, ReadAccessToken};

/// [`Query`] for checking whether an [`AccessToken`] is stored.
///
/// The token itself is not validated in any way.
#[derive(Clone, Copy, Debug, Default)]
pub struct IsAuthenticated;

impl<A, S, N> Query<IsAuthenticated> for Service<A, S, N>
where
    Self: Query<
        ReadAccessToken,
        Ok = Option<AccessToken>,
        Err = Traced<store::Error>,
    >,
{
    type Ok = bool;
    type Err = Traced<store::Error>;

    async fn execute(
        &self,
        _: IsAuthenticated,
    ) -> Result<Self::Ok, Self::Err> {
        let token = self
            .execute(ReadAccessToken)
            .await
            .map_err(tracerr::wrap!())?;
        Ok(Session::from(token).is_authenticated())
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{ClearTokens, StoreTokens},
        domain::session::TokenPair,
        infra::mock,
    };

    use super::{IsAuthenticated, Query as _};

    #[tokio::test]
    async fn follows_stored_token() {
        let svc = mock::service();
        assert!(!svc.execute(IsAuthenticated).await.unwrap());

        svc.execute(StoreTokens {
            tokens: TokenPair {
                access: "T1".into(),
                refresh: "R1".into(),
            },
            remember: false,
        })
        .await
        .unwrap();
        assert!(svc.execute(IsAuthenticated).await.unwrap());

        svc.execute(ClearTokens).await.unwrap();
        assert!(!svc.execute(IsAuthenticated).await.unwrap());
    }
}
