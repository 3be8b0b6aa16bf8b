//! Addresses (RFC 5322, section 3.4).
//!
//! ```abnf
//! mailbox      = name-addr / addr-spec
//! name-addr    = [display-name] angle-addr
//! angle-addr   = [CFWS] "<" addr-spec ">" [CFWS]
//! addr-spec    = local-part "@" domain
//! local-part   = dot-atom / quoted-string
//! ```

use std::{borrow::Cow, str::from_utf8};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{Domain, DomainError},
    utils::{
        indicators::{is_atext, is_ctl, is_utext},
        unescape_quoted,
    },
};

/// Maximum length of a local-part (RFC 5321, section 4.5.3.1.1).
pub const MAX_LOCAL_PART_LENGTH: usize = 64;

/// The part of an address before the `@`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocalPart<'a> {
    /// `dot-atom-text = 1*atext *("." 1*atext)`
    DotAtom(Cow<'a, str>),
    /// `DQUOTE *qcontent DQUOTE`, stored including the surrounding quotes.
    Quoted(Cow<'a, str>),
}

impl<'a> LocalPart<'a> {
    pub fn verify(value: impl AsRef<[u8]>) -> Result<(), LocalPartError> {
        let value = value.as_ref();

        if value.len() > MAX_LOCAL_PART_LENGTH {
            return Err(LocalPartError::TooLong {
                length: value.len(),
            });
        }

        if value.is_empty() {
            return Err(LocalPartError::Empty);
        }

        if Self::is_quoted(value) {
            Self::verify_quoted(value)
        } else {
            Self::verify_dot_atom(value)
        }
    }

    fn is_quoted(value: &[u8]) -> bool {
        value.len() >= 2 && value.starts_with(b"\"") && value.ends_with(b"\"")
    }

    fn verify_quoted(value: &[u8]) -> Result<(), LocalPartError> {
        let interior = &value[1..value.len() - 1];
        let mut bytes = interior.iter().enumerate();

        while let Some((index, byte)) = bytes.next() {
            let position = index + 1;

            match byte {
                b'\\' => match bytes.next() {
                    Some((_, b'"' | b'\\')) => {}
                    Some((index, found)) => {
                        return Err(LocalPartError::InvalidQuotedString {
                            found: *found,
                            position: index + 1,
                        });
                    }
                    // A trailing backslash escapes the closing quote.
                    None => {
                        return Err(LocalPartError::InvalidQuotedString {
                            found: b'"',
                            position: value.len() - 1,
                        });
                    }
                },
                b'"' | b'\r' | b'\n' => {
                    return Err(LocalPartError::InvalidQuotedString {
                        found: *byte,
                        position,
                    });
                }
                byte if !is_utext(*byte) => {
                    return Err(LocalPartError::InvalidQuotedString {
                        found: *byte,
                        position,
                    });
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn verify_dot_atom(value: &[u8]) -> Result<(), LocalPartError> {
        if value.starts_with(b".") || value.ends_with(b".") {
            return Err(LocalPartError::LeadingOrTrailingDot);
        }

        if let Some(position) = value.windows(2).position(|window| window == b"..") {
            return Err(LocalPartError::ConsecutiveDots { position });
        }

        if let Some(position) = value.iter().position(|b| !is_atext(*b) && *b != b'.') {
            return Err(LocalPartError::InvalidDotAtom {
                found: value[position],
                position,
            });
        }

        Ok(())
    }

    /// The local-part as written in an address, i.e., including quotes if quoted.
    pub fn inner(&self) -> &str {
        match self {
            Self::DotAtom(inner) | Self::Quoted(inner) => inner.as_ref(),
        }
    }

    pub fn into_inner(self) -> Cow<'a, str> {
        match self {
            Self::DotAtom(inner) | Self::Quoted(inner) => inner,
        }
    }

    pub fn is_dot_atom(&self) -> bool {
        matches!(self, Self::DotAtom(_))
    }

    /// The value with quotes removed and quoted-pairs resolved.
    pub fn unquoted(&self) -> Cow<'_, str> {
        match self {
            Self::DotAtom(inner) => Cow::Borrowed(inner.as_ref()),
            Self::Quoted(inner) => unescape_quoted(&inner[1..inner.len() - 1]),
        }
    }

    fn from_verified(value: Cow<'a, str>) -> Self {
        if Self::is_quoted(value.as_bytes()) {
            Self::Quoted(value)
        } else {
            Self::DotAtom(value)
        }
    }
}

impl<'a> TryFrom<&'a [u8]> for LocalPart<'a> {
    type Error = LocalPartError;

    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        Self::verify(value)?;

        // Safety: `unwrap` can't panic due to `verify`.
        Ok(Self::from_verified(Cow::Borrowed(from_utf8(value).unwrap())))
    }
}

impl TryFrom<Vec<u8>> for LocalPart<'_> {
    type Error = LocalPartError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::verify(&value)?;

        // Safety: `unwrap` can't panic due to `verify`.
        Ok(Self::from_verified(Cow::Owned(String::from_utf8(value).unwrap())))
    }
}

impl<'a> TryFrom<&'a str> for LocalPart<'a> {
    type Error = LocalPartError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Self::verify(value)?;

        Ok(Self::from_verified(Cow::Borrowed(value)))
    }
}

impl TryFrom<String> for LocalPart<'_> {
    type Error = LocalPartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::verify(&value)?;

        Ok(Self::from_verified(Cow::Owned(value)))
    }
}

impl AsRef<str> for LocalPart<'_> {
    fn as_ref(&self) -> &str {
        self.inner()
    }
}

impl From<LocalPart<'_>> for String {
    fn from(value: LocalPart<'_>) -> Self {
        value.into_inner().into_owned()
    }
}

#[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
pub enum LocalPartError {
    #[error("Must not be empty")]
    Empty,
    #[error("Must not be longer than 64 bytes, got {length}")]
    TooLong { length: usize },
    #[error("Dot-atom must not start or end with `.`")]
    LeadingOrTrailingDot,
    #[error("Dot-atom must not contain `..` (at index {position})")]
    ConsecutiveDots { position: usize },
    #[error("Invalid byte b'\\x{found:02x}' in dot-atom at index {position}")]
    InvalidDotAtom { found: u8, position: usize },
    #[error("Invalid byte b'\\x{found:02x}' in quoted-string at index {position}")]
    InvalidQuotedString { found: u8, position: usize },
}

/// A mailbox, i.e., an address with an optional display name.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "EmailAddressShadow<'a>"))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress<'a> {
    display_name: Option<Cow<'a, str>>,
    local_part: LocalPart<'a>,
    domain: Domain<'a>,
}

/// Use shadow type to support validated deserialization
/// until `serde` provides built-in support for this case.
#[cfg(feature = "serde")]
#[derive(Deserialize, Debug)]
struct EmailAddressShadow<'a> {
    display_name: Option<Cow<'a, str>>,
    local_part: LocalPart<'a>,
    domain: Domain<'a>,
}

#[cfg(feature = "serde")]
impl<'a> TryFrom<EmailAddressShadow<'a>> for EmailAddress<'a> {
    type Error = EmailAddressError;

    fn try_from(value: EmailAddressShadow<'a>) -> Result<Self, Self::Error> {
        Self::new(value.display_name, value.local_part, value.domain)
    }
}

impl<'a> EmailAddress<'a> {
    /// Create an address from already validated parts.
    ///
    /// The display name is trimmed. An empty display name is treated as absent.
    pub fn new<D>(
        display_name: Option<D>,
        local_part: LocalPart<'a>,
        domain: Domain<'a>,
    ) -> Result<Self, EmailAddressError>
    where
        D: Into<Cow<'a, str>>,
    {
        let display_name = match display_name {
            Some(display_name) => Self::display_name_from(display_name.into())?,
            None => None,
        };

        Ok(Self {
            display_name,
            local_part,
            domain,
        })
    }

    /// Display names end up in header fields and thus must not contain line breaks.
    pub fn verify_display_name(value: &str) -> Result<(), EmailAddressError> {
        if let Some(position) = value.bytes().position(|b| is_ctl(b) && b != b'\t') {
            return Err(EmailAddressError::InvalidDisplayName {
                found: value.as_bytes()[position],
                position,
            });
        }

        Ok(())
    }

    fn display_name_from(value: Cow<'a, str>) -> Result<Option<Cow<'a, str>>, EmailAddressError> {
        Self::verify_display_name(&value)?;

        let trimmed = match value {
            Cow::Borrowed(value) => Cow::Borrowed(value.trim()),
            Cow::Owned(value) if value.trim().len() == value.len() => Cow::Owned(value),
            Cow::Owned(value) => Cow::Owned(value.trim().to_owned()),
        };

        Ok((!trimmed.is_empty()).then_some(trimmed))
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn local_part(&self) -> &LocalPart<'a> {
        &self.local_part
    }

    pub fn domain(&self) -> &Domain<'a> {
        &self.domain
    }

    /// `addr-spec`, i.e., `local-part "@" domain`, without the display name.
    pub fn addr_spec(&self) -> String {
        format!("{}@{}", self.local_part.inner(), self.domain.inner())
    }

    /// Whether the display name must be written as a quoted-string.
    ///
    /// Everything but letters, digits, and whitespace is quoted. Non-ASCII is always quoted.
    pub fn display_name_needs_quotes(display_name: &str) -> bool {
        display_name
            .chars()
            .any(|c| !c.is_ascii() || !(c.is_ascii_alphanumeric() || c.is_ascii_whitespace()))
    }

    fn parse(value: &'a str) -> Result<Self, EmailAddressError> {
        let value = value.trim();

        match Self::find_angle_addr(value) {
            Some(open) => {
                let bracketed = value[open + 1..]
                    .strip_suffix('>')
                    .ok_or(EmailAddressError::UnclosedAngleBracket)?;
                let (local_part, domain) = Self::split_addr_spec(bracketed)?;

                let display_name = value[..open].trim();
                let display_name = match display_name.len() >= 2
                    && display_name.starts_with('"')
                    && display_name.ends_with('"')
                {
                    true => unescape_quoted(&display_name[1..display_name.len() - 1]),
                    false => Cow::Borrowed(display_name),
                };

                Self::new(Some(display_name), local_part, domain)
            }
            None => {
                let (local_part, domain) = Self::split_addr_spec(value)?;

                Self::new(None::<&str>, local_part, domain)
            }
        }
    }

    /// Index of the `<` that opens the angle-addr, i.e., the first one outside of a quoted-string.
    fn find_angle_addr(value: &str) -> Option<usize> {
        let mut quoted = false;
        let mut escaped = false;

        for (index, byte) in value.bytes().enumerate() {
            match byte {
                _ if escaped => escaped = false,
                b'\\' if quoted => escaped = true,
                b'"' => quoted = !quoted,
                b'<' if !quoted => return Some(index),
                _ => {}
            }
        }

        None
    }

    /// Split on the last `@`. A domain never contains `@`, a quoted local-part may.
    fn split_addr_spec(value: &'a str) -> Result<(LocalPart<'a>, Domain<'a>), EmailAddressError> {
        let at = value.rfind('@').ok_or(EmailAddressError::MissingAtSign)?;

        let local_part = LocalPart::try_from(&value[..at])?;
        let domain = Domain::try_from(&value[at + 1..])?;

        Ok((local_part, domain))
    }

    pub fn into_static(self) -> EmailAddress<'static> {
        EmailAddress {
            display_name: self.display_name.map(|name| Cow::Owned(name.into_owned())),
            local_part: match self.local_part {
                LocalPart::DotAtom(inner) => LocalPart::DotAtom(Cow::Owned(inner.into_owned())),
                LocalPart::Quoted(inner) => LocalPart::Quoted(Cow::Owned(inner.into_owned())),
            },
            domain: Domain(Cow::Owned(self.domain.0.into_owned())),
        }
    }
}

impl<'a> TryFrom<&'a str> for EmailAddress<'a> {
    type Error = EmailAddressError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl<'a> TryFrom<&'a [u8]> for EmailAddress<'a> {
    type Error = EmailAddressError;

    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        let value = from_utf8(value).map_err(|_| EmailAddressError::NotUtf8)?;

        Self::parse(value)
    }
}

impl TryFrom<String> for EmailAddress<'static> {
    type Error = EmailAddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        EmailAddress::parse(&value).map(EmailAddress::into_static)
    }
}

impl TryFrom<Vec<u8>> for EmailAddress<'static> {
    type Error = EmailAddressError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        let value = String::from_utf8(value).map_err(|_| EmailAddressError::NotUtf8)?;

        EmailAddress::try_from(value)
    }
}

#[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
pub enum EmailAddressError {
    #[error("Must be valid UTF-8")]
    NotUtf8,
    #[error("Missing `@` between local-part and domain")]
    MissingAtSign,
    #[error("Missing closing `>`")]
    UnclosedAngleBracket,
    #[error("Invalid byte b'\\x{found:02x}' in display name at index {position}")]
    InvalidDisplayName { found: u8, position: usize },
    #[error("Invalid local-part: {0}")]
    LocalPart(#[from] LocalPartError),
    #[error("Invalid domain: {0}")]
    Domain(#[from] DomainError),
}
