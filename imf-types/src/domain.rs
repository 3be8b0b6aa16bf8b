//! Host names (RFC 1123) as used in the domain part of an address.

use std::{borrow::Cow, str::from_utf8};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::indicators::is_ldh;

const MAX_LENGTH: usize = 253;
const MAX_LABEL_LENGTH: usize = 63;

/// A syntactically valid domain name.
///
/// The canonical form is lowercase and has no trailing root dot, e.g., `Example.COM.` is stored
/// as `example.com`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Domain<'a>(pub(crate) Cow<'a, str>);

impl<'a> Domain<'a> {
    pub fn verify(value: impl AsRef<[u8]>) -> Result<(), DomainError> {
        let value = value.as_ref();
        let value = value.strip_suffix(b".").unwrap_or(value);

        if value.is_empty() {
            return Err(DomainError::Empty);
        }

        if value.len() > MAX_LENGTH {
            return Err(DomainError::TooLong {
                length: value.len(),
            });
        }

        if let Some(position) = value.iter().position(|b| !is_ldh(*b) && *b != b'.') {
            return Err(DomainError::ByteNotAllowed {
                found: value[position],
                position,
            });
        }

        let mut position = 0;
        for label in value.split(|b| *b == b'.') {
            if label.is_empty() {
                return Err(DomainError::EmptyLabel { position });
            }

            if label.len() > MAX_LABEL_LENGTH {
                return Err(DomainError::LabelTooLong {
                    position,
                    length: label.len(),
                });
            }

            if label.starts_with(b"-") || label.ends_with(b"-") {
                return Err(DomainError::HyphenAtLabelBoundary { position });
            }

            position += label.len() + 1;
        }

        Ok(())
    }

    pub fn inner(&self) -> &str {
        self.0.as_ref()
    }

    pub fn into_inner(self) -> Cow<'a, str> {
        self.0
    }

    /// Constructs a domain without validation.
    ///
    /// # Warning: IMF conformance
    ///
    /// The caller must ensure that `inner` is valid according to [`Self::verify`] and already in
    /// canonical form.
    #[cfg(feature = "unvalidated")]
    #[cfg_attr(docsrs, doc(cfg(feature = "unvalidated")))]
    pub fn unvalidated<C>(inner: C) -> Self
    where
        C: Into<Cow<'a, str>>,
    {
        let inner = inner.into();

        #[cfg(debug_assertions)]
        Self::verify(inner.as_bytes()).unwrap();

        Self(inner)
    }

    fn canonicalize(value: Cow<'a, str>) -> Self {
        let needs_rewrite =
            value.ends_with('.') || value.bytes().any(|b| b.is_ascii_uppercase());

        if !needs_rewrite {
            return Self(value);
        }

        let trimmed = value.strip_suffix('.').unwrap_or(&value);

        Self(Cow::Owned(trimmed.to_ascii_lowercase()))
    }
}

impl<'a> TryFrom<&'a [u8]> for Domain<'a> {
    type Error = DomainError;

    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        Self::verify(value)?;

        // Safety: `unwrap` can't panic due to `verify`.
        Ok(Self::canonicalize(Cow::Borrowed(from_utf8(value).unwrap())))
    }
}

impl TryFrom<Vec<u8>> for Domain<'_> {
    type Error = DomainError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::verify(&value)?;

        // Safety: `unwrap` can't panic due to `verify`.
        Ok(Self::canonicalize(Cow::Owned(String::from_utf8(value).unwrap())))
    }
}

impl<'a> TryFrom<&'a str> for Domain<'a> {
    type Error = DomainError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Self::verify(value)?;

        Ok(Self::canonicalize(Cow::Borrowed(value)))
    }
}

impl TryFrom<String> for Domain<'_> {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::verify(&value)?;

        Ok(Self::canonicalize(Cow::Owned(value)))
    }
}

impl AsRef<str> for Domain<'_> {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

#[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
pub enum DomainError {
    #[error("Must not be empty")]
    Empty,
    #[error("Must not be longer than 253 bytes, got {length}")]
    TooLong { length: usize },
    #[error("Invalid byte b'\\x{found:02x}' at index {position}")]
    ByteNotAllowed { found: u8, position: usize },
    #[error("Empty label at index {position}")]
    EmptyLabel { position: usize },
    #[error("Label at index {position} must not be longer than 63 bytes, got {length}")]
    LabelTooLong { position: usize, length: usize },
    #[error("Label at index {position} must not start or end with a hyphen")]
    HyphenAtLabelBoundary { position: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_domain() {
        let tests = [
            ("example.com", "example.com"),
            ("Example.COM", "example.com"),
            ("example.com.", "example.com"),
            ("localhost", "localhost"),
            ("1.2.3.4", "1.2.3.4"),
            ("xn--bcher-kva.example", "xn--bcher-kva.example"),
            ("a-b.c-d", "a-b.c-d"),
        ];

        for (test, expected) in tests {
            let got = Domain::try_from(test).unwrap();
            assert_eq!(got.inner(), expected);
            assert_eq!(Domain::try_from(test.as_bytes()).unwrap(), got);
            assert_eq!(Domain::try_from(test.to_owned()).unwrap(), got);
        }

        assert!(matches!(
            Domain::try_from("example.com").unwrap().into_inner(),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_conversion_domain_failing() {
        let long_label = "a".repeat(64);
        let long_domain = ["a".repeat(63), "b".repeat(63), "c".repeat(63), "d".repeat(63)].join(".");

        let tests = [
            ("", DomainError::Empty),
            (".", DomainError::Empty),
            (
                "exa mple.com",
                DomainError::ByteNotAllowed {
                    found: b' ',
                    position: 3,
                },
            ),
            (
                "exämple.com",
                DomainError::ByteNotAllowed {
                    found: 0xc3,
                    position: 2,
                },
            ),
            (
                "example_.com",
                DomainError::ByteNotAllowed {
                    found: b'_',
                    position: 7,
                },
            ),
            ("example..com", DomainError::EmptyLabel { position: 8 }),
            (".example.com", DomainError::EmptyLabel { position: 0 }),
            ("-example.com", DomainError::HyphenAtLabelBoundary { position: 0 }),
            ("example.com-", DomainError::HyphenAtLabelBoundary { position: 8 }),
            (
                long_label.as_str(),
                DomainError::LabelTooLong {
                    position: 0,
                    length: 64,
                },
            ),
            (long_domain.as_str(), DomainError::TooLong { length: 255 }),
        ];

        for (test, expected) in tests {
            assert_eq!(Domain::try_from(test), Err(expected), "{test}");
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialization_domain() {
        let domain = serde_json::from_str::<Domain>(r#""Example.COM.""#)
            .expect("valid input should deserialize successfully");
        assert_eq!(domain.inner(), "example.com");

        serde_json::from_str::<Domain>(r#""example..com""#)
            .expect_err("invalid input should not deserialize successfully");
    }
}
