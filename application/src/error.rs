//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{
    command::{auth, login_with_sso, send_request},
    domain::user,
    infra::{api, store},
};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[exit = $exit_code:literal]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            exit_code: $exit_code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// Command line [`Error`].
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Process exit code of this [`Error`].
    pub exit_code: u8,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an unexpected failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            exit_code: 70,
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Create a new [`Error`] of the user's input.
    #[must_use]
    pub fn input(msg: &impl ToString) -> Self {
        Self {
            code: "INVALID_INPUT",
            exit_code: 2,
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Returns the detailed representation of this [`Error`], including its
    /// backtrace.
    #[must_use]
    pub fn detailed(&self) -> String {
        let Self {
            code,
            exit_code: _,
            backtrace,
            message,
        } = self;

        format!(
            "[{code}]: {message}\n{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("{trace}"))),
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for auth::Failure {
    fn try_as_error(&self) -> Option<Error> {
        use auth::Failure as F;

        let code = match self {
            F::InvalidCredentials => "INVALID_CREDENTIALS",
            F::RateLimited => "RATE_LIMITED",
            F::AccountLocked => "ACCOUNT_LOCKED",
            F::Conflict => "ACCOUNT_EXISTS",
            F::ValidationFailed => "VALIDATION_FAILED",
            F::Unknown => "UNKNOWN",
        };
        Some(Error {
            code,
            exit_code: 1,
            message: self.to_string(),
            backtrace: None,
        })
    }
}

impl AsError for login_with_sso::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error {
            code: "SSO_FAILED",
            exit_code: 1,
            message: self.to_string(),
            backtrace: None,
        })
    }
}

impl AsError for send_request::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Api(e) => e.try_as_error(),
            Self::Store(e) => e.try_as_error(),
        }
    }
}

impl AsError for api::Error {
    fn try_as_error(&self) -> Option<Error> {
        let code = match self {
            Self::Status { .. } => "API_ERROR",
            Self::Transport(_) => "NETWORK_ERROR",
            Self::Decode(_) | Self::Encode(_) | Self::Header(_) => {
                return None;
            }
        };
        Some(Error {
            code,
            exit_code: 1,
            message: self.to_string(),
            backtrace: None,
        })
    }
}

impl AsError for user::Invalid {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::input(self))
    }
}

impl AsError for store::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

#[cfg(test)]
mod spec {
    use service::{
        command::{auth::Failure, send_request},
        domain::user::Invalid,
        infra::{api, store},
    };

    use super::AsError as _;

    #[test]
    fn shows_failure_sentence_only() {
        let err = tracerr::new!(Failure::RateLimited).into_error();

        assert_eq!(err.code, "RATE_LIMITED");
        assert_eq!(err.to_string(), "Too many attempts. Please try again later.");
        assert!(err.backtrace.is_some());
    }

    #[test]
    fn hides_internal_details() {
        let err = send_request::ExecutionError::Store(store::Error::Io(
            std::io::Error::other("disk on fire"),
        ))
        .into_error();

        assert_eq!(err.code, "INTERNAL_ERROR");
        assert_eq!(err.exit_code, 70);
    }

    #[test]
    fn maps_api_status_errors() {
        let err = send_request::ExecutionError::Api(api::Error::status(
            api::StatusCode::NOT_FOUND,
            None,
        ))
        .into_error();

        assert_eq!(err.code, "API_ERROR");
        assert_eq!(err.to_string(), "Request failed with status 404");
    }

    #[test]
    fn maps_invalid_input() {
        let err = Invalid::EmailFormat.into_error();

        assert_eq!(err.code, "INVALID_INPUT");
        assert_eq!(err.exit_code, 2);
        assert_eq!(err.to_string(), "Please enter a valid email address");
    }
}
