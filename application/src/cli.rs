//! Execution of the parsed [`Command`]s.

use std::str::FromStr as _;

use service::{
    command::{
        self, Command as _, LoginWithEmail, LoginWithSso, SendRequest,
        SignupWithEmail,
    },
    domain::user,
    infra::api::{header, Request, Verb},
    query::IsAuthenticated,
};
use tracing as log;

use crate::{args::Command, define_error, AsError, Error, Service};

/// Executes the provided [`Command`] against the provided [`Service`],
/// printing its outcome to the standard output.
///
/// # Errors
///
/// If the [`Command`] fails. Only the [`Error`] message is meant to be shown
/// to the user.
pub async fn run(svc: &Service, cmd: Command) -> Result<(), Error> {
    match cmd {
        Command::Login {
            email,
            password,
            remember_me,
        } => {
            let resp = svc
                .execute(LoginWithEmail {
                    email,
                    password,
                    remember_me,
                })
                .await
                .map_err(AsError::into_error)?;
            println!("Logged in as {} <{}>", resp.user.name, resp.user.email);
        }
        Command::Signup {
            name,
            email,
            password,
            accept_tos,
        } => {
            if !accept_tos {
                return Err(user::Invalid::TermsNotAccepted.into_error());
            }
            let resp = svc
                .execute(SignupWithEmail {
                    name,
                    email,
                    password,
                })
                .await
                .map_err(AsError::into_error)?;
            println!("Signed up as {} <{}>", resp.user.name, resp.user.email);
        }
        Command::Sso { provider } => {
            svc.execute(LoginWithSso { provider })
                .await
                .map_err(AsError::into_error)?;
        }
        Command::Logout => {
            svc.execute(command::Logout)
                .await
                .map_err(AsError::into_error)?;
            println!("Logged out");
        }
        Command::Status => {
            let authenticated = svc
                .execute(IsAuthenticated)
                .await
                .map_err(AsError::into_error)?;
            println!(
                "{}",
                if authenticated {
                    "Authenticated"
                } else {
                    "Anonymous"
                },
            );
        }
        Command::Request {
            method,
            path,
            body,
            params,
            headers,
        } => {
            let req = request(method, path, body, &params, &headers)?;
            log::debug!("sending {} {}", req.verb, req.path);

            let resp = svc
                .execute(SendRequest::new(req))
                .await
                .map_err(AsError::into_error)?;
            if let Some(resp) = resp {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&resp)
                        .map_err(|e| Error::internal(&e))?,
                );
            }
        }
    }
    Ok(())
}

/// Builds a dynamic [`Request`] out of the raw command line values.
fn request(
    method: Verb,
    path: String,
    body: Option<String>,
    params: &[String],
    headers: &[String],
) -> Result<Request, Error> {
    define_error! {
        enum RequestError {
            #[code = "INVALID_BODY"]
            #[exit = 2]
            #[message = "Request body must be valid JSON"]
            Body,

            #[code = "INVALID_QUERY"]
            #[exit = 2]
            #[message = "Query parameter must look like `name=value`"]
            Param,

            #[code = "INVALID_HEADER"]
            #[exit = 2]
            #[message = "Header must look like `name:value`"]
            Header,
        }
    }

    let mut req = Request::new(method, path);
    if let Some(body) = body {
        req = req.with_body(
            serde_json::from_str(&body).map_err(|_| RequestError::Body)?,
        );
    }
    for param in params {
        let (name, value) =
            param.split_once('=').ok_or(RequestError::Param)?;
        req = req.with_param(name, value);
    }
    for h in headers {
        let (name, value) = h.split_once(':').ok_or(RequestError::Header)?;
        req = req.with_header(
            header::HeaderName::from_str(name.trim())
                .map_err(|_| RequestError::Header)?,
            header::HeaderValue::from_str(value.trim())
                .map_err(|_| RequestError::Header)?,
        );
    }
    Ok(req)
}
