//! In-memory fakes of the infrastructure for unit tests.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use common::operations::{By, Perform, Select};
use reqwest::Method;
use serde_json::json;
use tracerr::Traced;

use crate::{
    domain::session::Persistence,
    infra::{
        api::{self, Api, Call, Endpoint},
        navigator::{self, Navigator, Redirect},
        store::Key,
        Memory, Scoped,
    },
    Config,
};

/// [`crate::Service`] wired with fakes only.
pub(crate) type Service = crate::Service<Scripted, Scoped<Memory, Memory>, Recorder>;

/// Creates a new [`Service`] with empty storage areas.
pub(crate) fn service() -> Service {
    crate::Service::new(
        Config::default(),
        Scripted::default(),
        Scoped::default(),
        Recorder::default(),
    )
}

/// Returns every stored value of the provided [`Service`], durable area
/// first.
pub(crate) async fn stored(svc: &Service) -> Vec<(Persistence, Key, String)> {
    let mut stored = vec![];
    for persistence in [Persistence::Durable, Persistence::Session] {
        for key in [Key::AuthToken, Key::RefreshToken, Key::RememberMe] {
            if let Some(value) = stored_value(svc, persistence, key).await {
                stored.push((persistence, key, value));
            }
        }
    }
    stored
}

/// Returns the value stored under the provided [`Key`] of the provided area.
pub(crate) async fn stored_value(
    svc: &Service,
    persistence: Persistence,
    key: Key,
) -> Option<String> {
    svc.store()
        .execute(Select(By::new((persistence, key))))
        .await
        .unwrap()
}

/// Builds a successful auth response body with the provided tokens.
pub(crate) fn auth_response(token: &str, refresh: &str) -> serde_json::Value {
    json!({
        "user": {
            "id": "u-1",
            "email": "a@b.com",
            "name": "Ann",
            "role": "member",
        },
        "token": token,
        "refreshToken": refresh,
    })
}

/// Builds an [`api::Error::Transport`] as if the server were unreachable.
pub(crate) fn network_error() -> api::Error {
    api::Error::Transport(
        reqwest::Client::new()
            .get("::not a url")
            .build()
            .unwrap_err(),
    )
}

/// Request recorded by a [`Scripted`] [`Api`].
#[derive(Clone, Debug)]
pub(crate) struct Recorded {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) body: Option<serde_json::Value>,
    pub(crate) token: Option<String>,
}

/// [`Api`] replying with scripted responses in order.
#[derive(Clone, Debug, Default)]
pub(crate) struct Scripted {
    responses: Arc<Mutex<VecDeque<Result<Option<serde_json::Value>, api::Error>>>>,
    calls: Arc<Mutex<Vec<Recorded>>>,
}

impl Scripted {
    /// Queues the next response.
    pub(crate) fn respond(
        &self,
        resp: Result<Option<serde_json::Value>, api::Error>,
    ) {
        self.responses.lock().unwrap().push_back(resp);
    }

    /// Returns the requests performed so far.
    pub(crate) fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }
}

impl<E: Endpoint> Api<Perform<Call<E>>> for Scripted {
    type Ok = Option<E::Response>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Perform(Call { endpoint, token }): Perform<Call<E>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.calls.lock().unwrap().push(Recorded {
            method: endpoint.method(),
            path: endpoint.path().into_owned(),
            body: endpoint.body().map(|b| serde_json::to_value(b).unwrap()),
            token: token.map(String::from),
        });

        let resp = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted response left");
        match resp {
            Ok(None) => Ok(None),
            Ok(Some(body)) => serde_json::from_value(body)
                .map(Some)
                .map_err(|e| tracerr::new!(api::Error::Decode(e))),
            Err(e) => Err(tracerr::new!(e)),
        }
    }
}

/// [`Navigator`] recording the [`Redirect`]s it's asked to perform.
#[derive(Clone, Debug, Default)]
pub(crate) struct Recorder {
    urls: Arc<Mutex<Vec<String>>>,
    refused: Arc<AtomicBool>,
}

impl Recorder {
    /// Makes every further [`Redirect`] fail.
    pub(crate) fn refuse(&self) {
        self.refused.store(true, Ordering::SeqCst);
    }

    /// Returns the URLs redirected to so far.
    pub(crate) fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

impl Navigator<Perform<Redirect>> for Recorder {
    type Ok = ();
    type Err = Traced<navigator::Error>;

    async fn execute(
        &self,
        Perform(redirect): Perform<Redirect>,
    ) -> Result<Self::Ok, Self::Err> {
        if self.refused.load(Ordering::SeqCst) {
            return Err(tracerr::new!(navigator::Error::Refused(
                "popup blocked".to_owned(),
            )));
        }
        self.urls.lock().unwrap().push(redirect.url);
        Ok(())
    }
}
