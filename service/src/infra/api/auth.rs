//! Authentication [`Endpoint`]s of the LifeOps API.

use std::borrow::Cow;

use reqwest::Method;
use secrecy::{zeroize::Zeroize, ExposeSecret as _, SecretBox};
use serde::{de::IgnoredAny, Deserialize, Serialize, Serializer};

use crate::domain::{
    session::{AccessToken, RefreshToken, TokenPair},
    user, User,
};

use super::Endpoint;

/// Logs a [`User`] in with the email credentials.
#[derive(Clone, Debug, Serialize)]
pub struct Login {
    /// [`user::Email`] of the [`User`].
    pub email: user::Email,

    /// [`user::Password`] of the [`User`].
    #[serde(serialize_with = "expose")]
    pub password: SecretBox<user::Password>,
}

impl Endpoint for Login {
    type Body = Self;
    type Response = AuthResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/auth/login")
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

/// Registers a new [`User`].
#[derive(Clone, Debug, Serialize)]
pub struct Signup {
    /// [`user::Name`] of the new [`User`].
    pub name: user::Name,

    /// [`user::Email`] of the new [`User`].
    pub email: user::Email,

    /// [`user::NewPassword`] of the new [`User`].
    #[serde(serialize_with = "expose")]
    pub password: SecretBox<user::NewPassword>,
}

impl Endpoint for Signup {
    type Body = Self;
    type Response = AuthResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/auth/signup")
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

/// Ends the server-side session.
///
/// Whatever the server responds with is ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct Logout;

impl Endpoint for Logout {
    type Body = ();
    type Response = IgnoredAny;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/auth/logout")
    }
}

/// Response to a successful [`Login`] or [`Signup`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Profile of the authenticated [`User`].
    pub user: User,

    /// Granted [`AccessToken`].
    pub token: AccessToken,

    /// Granted [`RefreshToken`].
    pub refresh_token: RefreshToken,
}

impl AuthResponse {
    /// Returns the [`TokenPair`] granted by this [`AuthResponse`].
    #[must_use]
    pub fn tokens(&self) -> TokenPair {
        TokenPair {
            access: self.token.clone(),
            refresh: self.refresh_token.clone(),
        }
    }
}

/// Serializes the provided `secret` as a plain string.
fn expose<S, T>(secret: &SecretBox<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: AsRef<str> + Zeroize,
{
    serializer.serialize_str(secret.expose_secret().as_ref())
}

#[cfg(test)]
mod spec {
    use secrecy::SecretBox;
    use serde_json::json;

    use crate::{
        domain::user::{Email, Name, NewPassword, Password, Role},
        infra::api::Endpoint as _,
    };

    use super::{AuthResponse, Login, Logout, Signup};

    #[test]
    fn serializes_login_credentials() {
        let login = Login {
            email: Email::new("a@b.com").unwrap(),
            password: SecretBox::new(Box::new(Password::new("x").unwrap())),
        };

        assert_eq!(login.path(), "/auth/login");
        assert_eq!(
            serde_json::to_value(login.body().unwrap()).unwrap(),
            json!({"email": "a@b.com", "password": "x"}),
        );
        assert!(!format!("{login:?}").contains("\"x\""));
    }

    #[test]
    fn serializes_signup_details() {
        let signup = Signup {
            name: Name::new("Ann Lee").unwrap(),
            email: Email::new("ann@b.com").unwrap(),
            password: SecretBox::new(Box::new(
                NewPassword::new("Secret123!").unwrap(),
            )),
        };

        assert_eq!(signup.path(), "/auth/signup");
        assert_eq!(
            serde_json::to_value(signup.body().unwrap()).unwrap(),
            json!({
                "name": "Ann Lee",
                "email": "ann@b.com",
                "password": "Secret123!",
            }),
        );
    }

    #[test]
    fn logout_has_no_body() {
        assert_eq!(Logout.method(), reqwest::Method::POST);
        assert_eq!(Logout.path(), "/auth/logout");
        assert!(Logout.body().is_none());
    }

    #[test]
    fn deserializes_auth_response() {
        let resp: AuthResponse = serde_json::from_value(json!({
            "user": {
                "id": "u-1",
                "email": "a@b.com",
                "name": "Ann",
                "avatar": "https://cdn/a.png",
                "role": "admin",
            },
            "token": "T1",
            "refreshToken": "R1",
        }))
        .unwrap();

        assert_eq!(resp.user.role, Role::Admin);
        assert_eq!(resp.user.avatar.as_deref(), Some("https://cdn/a.png"));
        let tokens = resp.tokens();
        assert_eq!(tokens.access.as_ref(), "T1");
        assert_eq!(tokens.refresh.as_ref(), "R1");
    }
}
