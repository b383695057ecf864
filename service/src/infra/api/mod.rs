//! [`Api`]-related definitions: the typed HTTP client of the LifeOps API.

pub mod auth;
pub mod http;

use std::{borrow::Cow, collections::BTreeMap};

use derive_more::{Display, Error as StdError, From};
use reqwest::header::HeaderMap;
use serde::{de::DeserializeOwned, Serialize};

#[cfg(doc)]
use common::operations::Perform;

use crate::domain::session::AccessToken;

pub use reqwest::{header, Method, StatusCode};

pub use self::http::{Config, Http};

/// Operation against the LifeOps API.
///
/// Executes [`Perform`]`<`[`Call`]`<E>>` operations for any [`Endpoint`] `E`,
/// resolving to [`None`] on a `204 No Content` response.
pub use common::Handler as Api;

/// Query parameters of a request.
pub type Params = BTreeMap<String, String>;

/// Endpoint of the LifeOps API.
///
/// Describes a request; the [`Api`] decides how to send it. The
/// [`Endpoint::Response`] type is asserted by the caller, not validated
/// beyond deserialization.
pub trait Endpoint {
    /// Type of the JSON body sent with the request.
    type Body: Serialize + ?Sized;

    /// Type of the JSON body of a successful response.
    type Response: DeserializeOwned;

    /// HTTP method of the request.
    fn method(&self) -> Method;

    /// Path of the request, relative to the API base address.
    fn path(&self) -> Cow<'_, str>;

    /// Body of the request, if any.
    fn body(&self) -> Option<&Self::Body> {
        None
    }

    /// Query parameters of the request, if any.
    fn params(&self) -> Option<&Params> {
        None
    }

    /// Headers overriding the default ones, if any.
    fn headers(&self) -> Option<&HeaderMap> {
        None
    }
}

/// Call of an [`Endpoint`], optionally authorized with a bearer token.
#[derive(Clone, Debug)]
pub struct Call<E> {
    /// [`Endpoint`] to call.
    pub endpoint: E,

    /// [`AccessToken`] to send as a bearer credential.
    pub token: Option<AccessToken>,
}

/// HTTP method of a dynamic [`Request`].
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    PartialEq,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Verb {
    /// `GET` method.
    #[display("GET")]
    Get,

    /// `POST` method.
    #[display("POST")]
    Post,

    /// `PUT` method.
    #[display("PUT")]
    Put,

    /// `PATCH` method.
    #[display("PATCH")]
    Patch,

    /// `DELETE` method.
    #[display("DELETE")]
    Delete,
}

impl From<Verb> for Method {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Get => Self::GET,
            Verb::Post => Self::POST,
            Verb::Put => Self::PUT,
            Verb::Patch => Self::PATCH,
            Verb::Delete => Self::DELETE,
        }
    }
}

/// Dynamic [`Endpoint`] for requests not covered by a typed one.
#[derive(Clone, Debug)]
pub struct Request {
    /// [`Verb`] of this [`Request`].
    pub verb: Verb,

    /// Path of this [`Request`], relative to the API base address.
    pub path: String,

    /// JSON body of this [`Request`].
    pub body: Option<serde_json::Value>,

    /// Query [`Params`] of this [`Request`].
    pub params: Option<Params>,

    /// Headers overriding the default ones.
    pub headers: HeaderMap,
}

impl Request {
    /// Creates a new [`Request`] without a body, parameters or headers.
    #[must_use]
    pub fn new(verb: Verb, path: impl Into<String>) -> Self {
        Self {
            verb,
            path: path.into(),
            body: None,
            params: None,
            headers: HeaderMap::new(),
        }
    }

    /// Creates a new `GET` [`Request`].
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Verb::Get, path)
    }

    /// Creates a new `POST` [`Request`].
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Verb::Post, path)
    }

    /// Creates a new `PUT` [`Request`].
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Verb::Put, path)
    }

    /// Creates a new `PATCH` [`Request`].
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Verb::Patch, path)
    }

    /// Creates a new `DELETE` [`Request`].
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Verb::Delete, path)
    }

    /// Sets the JSON body of this [`Request`].
    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a query parameter to this [`Request`].
    #[must_use]
    pub fn with_param(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        drop(
            self.params
                .get_or_insert_with(Params::new)
                .insert(name.into(), value.into()),
        );
        self
    }

    /// Overrides a header of this [`Request`].
    #[must_use]
    pub fn with_header(
        mut self,
        name: header::HeaderName,
        value: header::HeaderValue,
    ) -> Self {
        drop(self.headers.insert(name, value));
        self
    }
}

impl Endpoint for Request {
    type Body = serde_json::Value;
    type Response = serde_json::Value;

    fn method(&self) -> Method {
        self.verb.into()
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.path)
    }

    fn body(&self) -> Option<&Self::Body> {
        self.body.as_ref()
    }

    fn params(&self) -> Option<&Params> {
        self.params.as_ref()
    }

    fn headers(&self) -> Option<&HeaderMap> {
        (!self.headers.is_empty()).then_some(&self.headers)
    }
}

/// [`Api`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Server responded with a non-2xx status.
    #[display("{message}")]
    #[from(ignore)]
    Status {
        /// [`StatusCode`] of the response.
        status: StatusCode,

        /// Human-readable message.
        message: String,

        /// JSON body of the response, if it was JSON at all.
        payload: Option<serde_json::Value>,
    },

    /// Request could not be built, sent or its response read.
    #[display("Transport failed: {_0}")]
    Transport(reqwest::Error),

    /// Successful response body doesn't match the expected type.
    #[display("Failed to decode response: {_0}")]
    #[from(ignore)]
    Decode(serde_json::Error),

    /// Request body could not be serialized.
    #[display("Failed to encode request: {_0}")]
    #[from(ignore)]
    Encode(serde_json::Error),

    /// Header value contains forbidden characters.
    #[display("Invalid header value: {_0}")]
    Header(header::InvalidHeaderValue),
}

impl Error {
    /// Creates an [`Error::Status`] out of a failed response.
    ///
    /// The message is taken from the `message` field of the `payload`, if
    /// there is a non-empty string or a non-zero scalar, or is a generic one
    /// otherwise.
    #[must_use]
    pub fn status(
        status: StatusCode,
        payload: Option<serde_json::Value>,
    ) -> Self {
        use serde_json::Value as V;

        let message = payload
            .as_ref()
            .and_then(|p| p.get("message"))
            .and_then(|m| match m {
                V::String(s) if !s.is_empty() => Some(s.clone()),
                V::Number(n) if n.as_f64().is_some_and(|f| f.abs() > 0.0) => {
                    Some(n.to_string())
                }
                V::Bool(true) => Some("true".to_owned()),
                V::Null
                | V::Bool(false)
                | V::Number(_)
                | V::String(_)
                | V::Array(_)
                | V::Object(_) => None,
            })
            .unwrap_or_else(|| {
                format!("Request failed with status {}", status.as_u16())
            });
        Self::Status {
            status,
            message,
            payload,
        }
    }

    /// Returns the [`StatusCode`] of the response, if there was one.
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            Self::Decode(_) | Self::Encode(_) | Self::Header(_) => None,
        }
    }
}

#[cfg(test)]
mod spec {
    use reqwest::StatusCode;
    use serde_json::json;

    use super::{Endpoint as _, Error, Request, Verb};

    #[test]
    fn prefers_payload_message() {
        let err = Error::status(
            StatusCode::UNAUTHORIZED,
            Some(json!({"message": "Token expired", "code": 7})),
        );

        assert_eq!(err.to_string(), "Token expired");
        assert_eq!(err.status_code(), Some(StatusCode::UNAUTHORIZED));
        let Error::Status { payload, .. } = err else {
            unreachable!();
        };
        assert_eq!(payload, Some(json!({"message": "Token expired", "code": 7})));
    }

    #[test]
    fn falls_back_to_generic_message() {
        for payload in [
            None,
            Some(json!(null)),
            Some(json!({"error": "nope"})),
            Some(json!({"message": ""})),
            Some(json!({"message": 0})),
            Some(json!({"message": false})),
            Some(json!({"message": ["a"]})),
        ] {
            let err = Error::status(StatusCode::BAD_GATEWAY, payload);
            assert_eq!(err.to_string(), "Request failed with status 502");
        }
    }

    #[test]
    fn shows_scalar_payload_message() {
        let err = Error::status(
            StatusCode::BAD_REQUEST,
            Some(json!({"message": 42})),
        );
        assert_eq!(err.to_string(), "42");

        let err = Error::status(
            StatusCode::BAD_REQUEST,
            Some(json!({"message": true})),
        );
        assert_eq!(err.to_string(), "true");
    }

    #[test]
    fn parses_verbs_case_insensitively() {
        assert_eq!("patch".parse::<Verb>().unwrap(), Verb::Patch);
        assert_eq!("DELETE".parse::<Verb>().unwrap(), Verb::Delete);
        assert!("HEAD".parse::<Verb>().is_err());
    }

    #[test]
    fn builds_dynamic_request() {
        let req = Request::put("/agents/7")
            .with_body(json!({"status": "paused"}))
            .with_param("force", "true");

        assert_eq!(req.method(), reqwest::Method::PUT);
        assert_eq!(req.path(), "/agents/7");
        assert_eq!(req.body(), Some(&json!({"status": "paused"})));
        assert_eq!(
            req.params().and_then(|p| p.get("force")).map(String::as_str),
            Some("true"),
        );
        assert!(req.headers().is_none());
    }
}
