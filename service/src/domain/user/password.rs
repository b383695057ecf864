//! Password strength [`Check`]s.

/// Characters counted as "special" by the [`Rule::Special`].
const SPECIAL: &str = r#"!@#$%^&*()_+-=[]{};':"\|,.<>/?"#;

/// Minimum length required by the [`Rule::Length`].
const MIN_LEN: usize = 8;

/// Rule a strong password must satisfy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rule {
    /// At least 8 characters.
    Length,

    /// At least one uppercase ASCII letter.
    Uppercase,

    /// At least one ASCII digit.
    Number,

    /// At least one special character.
    Special,
}

impl Rule {
    /// Returns the label shown next to this [`Rule`] in a strength meter.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Length => "At least 8 characters",
            Self::Uppercase => "Contains uppercase",
            Self::Number => "Contains number",
            Self::Special => "Special character",
        }
    }

    /// Indicates whether the provided `password` satisfies this [`Rule`].
    #[must_use]
    pub fn is_met(self, password: &str) -> bool {
        match self {
            Self::Length => password.chars().count() >= MIN_LEN,
            Self::Uppercase => password.chars().any(|c| c.is_ascii_uppercase()),
            Self::Number => password.chars().any(|c| c.is_ascii_digit()),
            Self::Special => password.chars().any(|c| SPECIAL.contains(c)),
        }
    }
}

/// Outcome of checking a password against a single [`Rule`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Check {
    /// Checked [`Rule`].
    pub rule: Rule,

    /// Whether the [`Rule`] is met.
    pub met: bool,
}

/// Checks the provided `password` against every [`Rule`], in display order.
#[must_use]
pub fn checks(password: &str) -> [Check; 4] {
    [Rule::Length, Rule::Uppercase, Rule::Number, Rule::Special].map(|rule| {
        Check {
            rule,
            met: rule.is_met(password),
        }
    })
}

/// Returns the number of [`Rule`]s the provided `password` meets (`0..=4`).
#[must_use]
pub fn strength(password: &str) -> usize {
    checks(password).iter().filter(|c| c.met).count()
}

#[cfg(test)]
mod spec {
    use super::{checks, strength, Rule};

    #[test]
    fn strength_counts_met_rules() {
        assert_eq!(strength(""), 0);
        assert_eq!(strength("abcdefgh"), 1);
        assert_eq!(strength("Abcdefgh"), 2);
        assert_eq!(strength("Abcdefg1"), 3);
        assert_eq!(strength("Abcdef1?"), 4);
    }

    #[test]
    fn checks_keep_display_order() {
        let labels = checks("x").map(|c| c.rule.label());

        assert_eq!(
            labels,
            [
                "At least 8 characters",
                "Contains uppercase",
                "Contains number",
                "Special character",
            ],
        );
    }

    #[test]
    fn special_characters() {
        for c in r#"!@#$%^&*()_+-=[]{};':"\|,.<>/?"#.chars() {
            assert!(Rule::Special.is_met(&c.to_string()), "`{c}`");
        }
        assert!(!Rule::Special.is_met("~`"));
    }
}
