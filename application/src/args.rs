//! [`Args`] definitions.

use std::str::FromStr;

use clap::{Parser, Subcommand};
use itertools::Itertools as _;
use secrecy::{zeroize::Zeroize, SecretBox};
use service::{
    domain::{
        sso,
        user::{password, Email, Name, NewPassword, Password},
    },
    infra::api::Verb,
};

/// Command line client of the LifeOps API.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Base address of the LifeOps API, overriding the configured one.
    #[arg(long, env = "LIFEOPS_API_URL")]
    pub api_url: Option<String>,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command of the [`Args`].
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Logs in with an email and a password.
    Login {
        /// Email of the account.
        #[arg(long)]
        email: Email,

        /// Password of the account.
        #[arg(
            long,
            env = "LIFEOPS_PASSWORD",
            hide_env_values = true,
            value_parser = secret::<Password>,
        )]
        password: SecretBox<Password>,

        /// Keeps the session across restarts.
        #[arg(long)]
        remember_me: bool,
    },

    /// Creates a new account.
    Signup {
        /// Full name of the new account owner.
        #[arg(long)]
        name: Name,

        /// Email of the new account.
        #[arg(long)]
        email: Email,

        /// Password of the new account.
        #[arg(
            long,
            env = "LIFEOPS_PASSWORD",
            hide_env_values = true,
            value_parser = new_password,
        )]
        password: SecretBox<NewPassword>,

        /// Accepts the Terms of Service.
        #[arg(long)]
        accept_tos: bool,
    },

    /// Logs in through a single sign-on provider.
    Sso {
        /// Provider to log in with: `google`, `microsoft` or `github`.
        provider: sso::Provider,
    },

    /// Ends the current session.
    Logout,

    /// Shows whether a session is stored.
    Status,

    /// Sends an authorized request to the API and prints its response.
    Request {
        /// HTTP method of the request.
        method: Verb,

        /// Path of the request, relative to the API base address.
        path: String,

        /// JSON body of the request.
        #[arg(long)]
        body: Option<String>,

        /// Query parameter, as `name=value`.
        #[arg(long = "query", value_name = "NAME=VALUE")]
        params: Vec<String>,

        /// Header override, as `name:value`.
        #[arg(long = "header", value_name = "NAME:VALUE")]
        headers: Vec<String>,
    },
}

/// Parses a secret `T` and wraps it into a [`SecretBox`] right away.
fn secret<T>(s: &str) -> Result<SecretBox<T>, T::Err>
where
    T: FromStr + Zeroize,
{
    s.parse().map(|v| SecretBox::new(Box::new(v)))
}

/// Parses a [`NewPassword`], listing every strength [`password::Check`] of
/// a rejected one.
fn new_password(s: &str) -> Result<SecretBox<NewPassword>, String> {
    secret::<NewPassword>(s).map_err(|e| {
        let checks = password::checks(s);
        format!(
            "{e}\n{}\nStrength: {}/{}",
            checks.iter().format_with("\n", |c, f| {
                f(&format_args!(
                    "  [{}] {}",
                    if c.met { "x" } else { " " },
                    c.rule.label(),
                ))
            }),
            password::strength(s),
            checks.len(),
        )
    })
}
