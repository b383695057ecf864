//! [`User`] definitions.

pub mod password;

use std::{str::FromStr, sync::LazyLock};

use common::define_kind;
use derive_more::{AsRef, Display, Error, From, Into};
use regex::Regex;
use secrecy::{zeroize::Zeroize, CloneableSecret};
use serde::{Deserialize, Serialize};

/// Profile of a LifeOps user, as returned by the API.
///
/// Profiles coming from the API are trusted as is: neither [`Name`] nor
/// [`Email`] rules are re-checked on deserialization.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// [`Email`] of this [`User`].
    pub email: Email,

    /// [`Name`] of this [`User`].
    pub name: Name,

    /// URL of this [`User`]'s avatar image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// [`Role`] of this [`User`] in the organization.
    pub role: Role,
}

/// ID of a [`User`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str)]
#[serde(transparent)]
pub struct Id(String);

define_kind! {
    #[doc = "Role of a [`User`] in an organization."]
    enum Role {
        #[doc = "Full access, including administration."]
        #[label = "Admin"]
        Admin,

        #[doc = "Regular member."]
        #[label = "Member"]
        Member,

        #[doc = "Read-only access."]
        #[label = "Viewer"]
        Viewer,
    }
}

/// Reason of an invalid [`User`] input.
///
/// Displays as the sentence a form shows next to the offending field.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum Invalid {
    /// [`Email`] is empty.
    #[display("Email is required")]
    EmailRequired,

    /// [`Email`] is malformed.
    #[display("Please enter a valid email address")]
    EmailFormat,

    /// [`Name`] is empty.
    #[display("Full name is required")]
    NameRequired,

    /// [`Name`] is too short.
    #[display("Name must be at least 2 characters")]
    NameTooShort,

    /// [`Name`] is too long.
    #[display("Name must be less than 100 characters")]
    NameTooLong,

    /// [`Password`] is empty.
    #[display("Password is required")]
    PasswordRequired,

    /// [`NewPassword`] is too short.
    #[display("Password must be at least 8 characters")]
    PasswordTooShort,

    /// [`NewPassword`] has no uppercase letter.
    #[display("Password must contain at least one uppercase letter")]
    PasswordNoUppercase,

    /// [`NewPassword`] has no digit.
    #[display("Password must contain at least one number")]
    PasswordNoNumber,

    /// [`NewPassword`] has no special character.
    #[display("Password must contain at least one special character")]
    PasswordNoSpecial,

    /// Terms of Service were not accepted on signup.
    #[display("You must accept the Terms of Service")]
    TermsNotAccepted,
}

/// Full name of a [`User`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(str)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Maximum number of characters in a [`Name`].
    const MAX_LEN: usize = 100;

    /// Minimum number of characters in a [`Name`].
    const MIN_LEN: usize = 2;

    /// Creates a new [`Name`] if the given `name` is valid.
    ///
    /// # Errors
    ///
    /// Returns the [`Invalid`] reason if the `name` is empty, shorter than 2
    /// or longer than 100 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, Invalid> {
        let name = name.into();
        match name.chars().count() {
            0 => Err(Invalid::NameRequired),
            n if n < Self::MIN_LEN => Err(Invalid::NameTooShort),
            n if n > Self::MAX_LEN => Err(Invalid::NameTooLong),
            _ => Ok(Self(name)),
        }
    }
}

impl FromStr for Name {
    type Err = Invalid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Email address of a [`User`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(str)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    ///
    /// # Errors
    ///
    /// Returns the [`Invalid`] reason if the `address` is empty or malformed.
    pub fn new(address: impl Into<String>) -> Result<Self, Invalid> {
        let address = address.into();
        if address.is_empty() {
            return Err(Invalid::EmailRequired);
        }
        Self::check(&address)
            .then_some(Self(address))
            .ok_or(Invalid::EmailFormat)
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format:
        /// - dot-separated local part without leading/trailing dots;
        /// - dot-separated domain with a top-level label of 2+ letters.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(
                r"^[A-Za-z0-9_'+\-]+(\.[A-Za-z0-9_'+\-]+)*@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
            )
            .expect("valid regex")
        });

        REGEX.is_match(address.as_ref())
    }
}

impl FromStr for Email {
    type Err = Invalid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Password of an existing [`User`], used to log in.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Password(String);

impl Password {
    /// Creates a new [`Password`] if the given `password` is not empty.
    ///
    /// # Errors
    ///
    /// Returns [`Invalid::PasswordRequired`] if the `password` is empty.
    pub fn new(password: impl Into<String>) -> Result<Self, Invalid> {
        let password = password.into();
        if password.is_empty() {
            return Err(Invalid::PasswordRequired);
        }
        Ok(Self(password))
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Password {
    type Err = Invalid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Password chosen by a new [`User`] on signup.
///
/// Unlike a login [`Password`], it must pass every [`password::checks()`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewPassword(String);

impl NewPassword {
    /// Creates a new [`NewPassword`] if the given `password` is strong enough.
    ///
    /// # Errors
    ///
    /// Returns the [`Invalid`] reason of the first failed
    /// [`password::checks()`].
    pub fn new(password: impl Into<String>) -> Result<Self, Invalid> {
        let password = password.into();
        match password::checks(&password)
            .into_iter()
            .find(|c| !c.met)
            .map(|c| c.rule)
        {
            Some(password::Rule::Length) => Err(Invalid::PasswordTooShort),
            Some(password::Rule::Uppercase) => Err(Invalid::PasswordNoUppercase),
            Some(password::Rule::Number) => Err(Invalid::PasswordNoNumber),
            Some(password::Rule::Special) => Err(Invalid::PasswordNoSpecial),
            None => Ok(Self(password)),
        }
    }
}

impl AsRef<str> for NewPassword {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for NewPassword {
    type Err = Invalid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl CloneableSecret for NewPassword {}
impl Zeroize for NewPassword {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}
