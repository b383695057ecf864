//! [`Http`] implementation of the [`Api`].

use std::time::Duration;

use common::operations::Perform;
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    StatusCode,
};
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing::{self as log, Instrument as _};

use crate::infra::api::{Api, Call, Endpoint, Error, Params};

/// [`Http`] client configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Absolute base address every [`Endpoint::path()`] is appended to.
    #[default("http://localhost:8080/api".to_owned())]
    pub base_url: String,

    /// Overall timeout of a single request.
    ///
    /// [`None`] leaves it to the transport defaults.
    pub timeout: Option<Duration>,
}

/// [`Api`] client talking JSON over HTTP.
///
/// Performs no retries and no caching.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying [`reqwest`] client.
    client: reqwest::Client,

    /// Base address without a trailing slash.
    base_url: String,
}

impl Http {
    /// Creates a new [`Http`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the underlying TLS backend fails to initialize.
    pub fn new(conf: &Config) -> Result<Self, Traced<Error>> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = conf.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))?;

        Ok(Self {
            client,
            base_url: conf.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Builds the full URL of the provided `path` with the provided
    /// URL-encoded query `params`.
    fn url(&self, path: &str, params: Option<&Params>) -> String {
        let mut url = format!("{}{path}", self.base_url);
        if let Some(params) = params.filter(|p| !p.is_empty()) {
            let query = params
                .iter()
                .map(|(name, value)| {
                    format!(
                        "{}={}",
                        urlencoding::encode(name),
                        urlencoding::encode(value),
                    )
                })
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&query);
        }
        url
    }
}

impl<E: Endpoint> Api<Perform<Call<E>>> for Http {
    type Ok = Option<E::Response>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Perform(call): Perform<Call<E>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Call { endpoint, token } = call;

        let method = endpoint.method();
        let url = self.url(&endpoint.path(), endpoint.params());

        let mut headers = HeaderMap::new();
        drop(headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ));
        if let Some(token) = &token {
            let mut value = HeaderValue::try_from(format!("Bearer {token}"))
                .map_err(tracerr::from_and_wrap!(=> Error))?;
            value.set_sensitive(true);
            drop(headers.insert(header::AUTHORIZATION, value));
        }
        if let Some(overrides) = endpoint.headers() {
            headers.extend(overrides.clone());
        }

        let mut request =
            self.client.request(method.clone(), &url).headers(headers);
        if let Some(body) = endpoint.body() {
            let json = serde_json::to_vec(body)
                .map_err(|e| tracerr::new!(Error::Encode(e)))?;
            request = request.body(json);
        }

        let span = log::info_span!(
            "api request",
            http.method = %method,
            http.url = %url,
            http.status_code = log::field::Empty,
        );
        async move {
            let response = request
                .send()
                .await
                .map_err(tracerr::from_and_wrap!(=> Error))?;

            let status = response.status();
            _ = log::Span::current().record("http.status_code", status.as_u16());

            if !status.is_success() {
                let payload = response
                    .bytes()
                    .await
                    .ok()
                    .and_then(|body| serde_json::from_slice(&body).ok());
                let err = Error::status(status, payload);
                log::debug!("request failed: {err}");
                return Err(tracerr::new!(err));
            }

            if status == StatusCode::NO_CONTENT {
                return Ok(None);
            }

            let body = response
                .bytes()
                .await
                .map_err(tracerr::from_and_wrap!(=> Error))?;
            serde_json::from_slice(&body)
                .map(Some)
                .map_err(|e| tracerr::new!(Error::Decode(e)))
        }
        .instrument(span)
        .await
    }
}
