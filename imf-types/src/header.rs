//! Header fields (RFC 5322, section 2.2).
//!
//! ```abnf
//! field      = field-name ":" unstructured CRLF
//! field-name = 1*ftext
//! ftext      = %d33-57 / %d59-126
//! FWS        = ([*WSP CRLF] 1*WSP)
//! ```

use std::{
    borrow::Cow,
    fmt::{Display, Formatter},
    hash::{Hash, Hasher},
    str::from_utf8,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::indicators::{is_ctl, is_ftext, is_utext, is_wsp};

/// Why a byte was rejected.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InvalidCharacterReason {
    Colon,
    Control,
    NotPrintable,
}

impl Display for InvalidCharacterReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Colon => "colon",
            Self::Control => "control character",
            Self::NotPrintable => "not printable",
        })
    }
}

/// Field name, e.g., `Content-Type`.
///
/// The original casing is kept, but comparison and hashing are case-insensitive.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[derive(Debug, Clone)]
pub struct HeaderName<'a>(pub(crate) Cow<'a, str>);

impl<'a> HeaderName<'a> {
    pub fn verify(value: impl AsRef<[u8]>) -> Result<(), HeaderNameError> {
        let value = value.as_ref();

        if value.is_empty() {
            return Err(HeaderNameError::Empty);
        }

        if let Some(position) = value.iter().position(|b| !is_ftext(*b)) {
            let found = value[position];
            let reason = match found {
                b':' => InvalidCharacterReason::Colon,
                found if is_ctl(found) => InvalidCharacterReason::Control,
                _ => InvalidCharacterReason::NotPrintable,
            };

            return Err(HeaderNameError::InvalidCharacter {
                found,
                position,
                reason,
            });
        }

        Ok(())
    }

    pub fn inner(&self) -> &str {
        self.0.as_ref()
    }

    pub fn into_inner(self) -> Cow<'a, str> {
        self.0
    }

    /// Case-insensitive comparison with a plain string.
    pub fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }

    /// Constructs a header name without validation.
    ///
    /// # Warning: IMF conformance
    ///
    /// The caller must ensure that `inner` is valid according to [`Self::verify`].
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

    pub fn into_static(self) -> HeaderName<'static> {
        HeaderName(Cow::Owned(self.0.into_owned()))
    }
}

impl PartialEq for HeaderName<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for HeaderName<'_> {}

impl Hash for HeaderName<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
        state.write_u8(0xff);
    }
}

impl<'a> TryFrom<&'a [u8]> for HeaderName<'a> {
    type Error = HeaderNameError;

    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        Self::verify(value)?;

        // Safety: `unwrap` can't panic due to `verify`.
        Ok(Self(Cow::Borrowed(from_utf8(value).unwrap())))
    }
}

impl TryFrom<Vec<u8>> for HeaderName<'_> {
    type Error = HeaderNameError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::verify(&value)?;

        // Safety: `unwrap` can't panic due to `verify`.
        Ok(Self(Cow::Owned(String::from_utf8(value).unwrap())))
    }
}

impl<'a> TryFrom<&'a str> for HeaderName<'a> {
    type Error = HeaderNameError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Self::verify(value)?;

        Ok(Self(Cow::Borrowed(value)))
    }
}

impl TryFrom<String> for HeaderName<'_> {
    type Error = HeaderNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::verify(&value)?;

        Ok(Self(Cow::Owned(value)))
    }
}

impl AsRef<str> for HeaderName<'_> {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

#[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
pub enum HeaderNameError {
    #[error("Must not be empty")]
    Empty,
    #[error("Invalid byte b'\\x{found:02x}' at index {position} ({reason})")]
    InvalidCharacter {
        found: u8,
        position: usize,
        reason: InvalidCharacterReason,
    },
}

/// Unfolded field body.
///
/// Folding whitespace is removed on construction, i.e., `"text/html;\r\n charset=UTF-8"` is
/// stored as `"text/html; charset=UTF-8"`. Leading whitespace is stripped as well.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeaderValue<'a>(pub(crate) Cow<'a, str>);

impl<'a> HeaderValue<'a> {
    pub fn verify(value: impl AsRef<[u8]>) -> Result<(), HeaderValueError> {
        Self::unfold(value.as_ref()).map(|_| ())
    }

    /// Remove folding and leading whitespace in a single pass.
    ///
    /// Positions in errors refer to `value`, not to the unfolded result.
    fn unfold(value: &[u8]) -> Result<Cow<'_, [u8]>, HeaderValueError> {
        let mut unfolded: Option<Vec<u8>> = None;
        let mut index = 0;

        while index < value.len() {
            match value[index] {
                b'\r' => {
                    if value.get(index + 1) != Some(&b'\n') {
                        return Err(HeaderValueError::InvalidCharacter {
                            found: b'\r',
                            position: index,
                            reason: InvalidCharacterReason::Control,
                        });
                    }

                    match value.get(index + 2) {
                        Some(wsp) if is_wsp(*wsp) => {
                            unfolded.get_or_insert_with(|| value[..index].to_vec());
                            index += 2;
                            continue;
                        }
                        _ => return Err(HeaderValueError::InvalidFolding { position: index }),
                    }
                }
                byte if is_utext(byte) => {}
                found => {
                    let reason = if is_ctl(found) {
                        InvalidCharacterReason::Control
                    } else {
                        InvalidCharacterReason::NotPrintable
                    };

                    return Err(HeaderValueError::InvalidCharacter {
                        found,
                        position: index,
                        reason,
                    });
                }
            }

            if let Some(unfolded) = unfolded.as_mut() {
                unfolded.push(value[index]);
            }

            index += 1;
        }

        Ok(match unfolded {
            Some(unfolded) => {
                let start = unfolded.iter().take_while(|b| is_wsp(**b)).count();
                Cow::Owned(unfolded[start..].to_vec())
            }
            None => {
                let start = value.iter().take_while(|b| is_wsp(**b)).count();
                Cow::Borrowed(&value[start..])
            }
        })
    }

    pub fn inner(&self) -> &str {
        self.0.as_ref()
    }

    pub fn into_inner(self) -> Cow<'a, str> {
        self.0
    }

    /// Constructs a header value without validation.
    ///
    /// # Warning: IMF conformance
    ///
    /// The caller must ensure that `inner` is already unfolded and valid according to
    /// [`Self::verify`].
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

    pub fn into_static(self) -> HeaderValue<'static> {
        HeaderValue(Cow::Owned(self.0.into_owned()))
    }
}

impl<'a> TryFrom<&'a [u8]> for HeaderValue<'a> {
    type Error = HeaderValueError;

    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        // Safety: `unwrap` can't panic because `unfold` only lets ASCII through.
        Ok(Self(match Self::unfold(value)? {
            Cow::Borrowed(unfolded) => Cow::Borrowed(from_utf8(unfolded).unwrap()),
            Cow::Owned(unfolded) => Cow::Owned(String::from_utf8(unfolded).unwrap()),
        }))
    }
}

impl TryFrom<Vec<u8>> for HeaderValue<'_> {
    type Error = HeaderValueError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        HeaderValue::try_from(value.as_slice()).map(HeaderValue::into_static)
    }
}

impl<'a> TryFrom<&'a str> for HeaderValue<'a> {
    type Error = HeaderValueError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Self::try_from(value.as_bytes())
    }
}

impl TryFrom<String> for HeaderValue<'_> {
    type Error = HeaderValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HeaderValue::try_from(value.into_bytes())
    }
}

impl AsRef<str> for HeaderValue<'_> {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

#[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
pub enum HeaderValueError {
    #[error("Invalid byte b'\\x{found:02x}' at index {position} ({reason})")]
    InvalidCharacter {
        found: u8,
        position: usize,
        reason: InvalidCharacterReason,
    },
    #[error("Line break at index {position} is not followed by whitespace")]
    InvalidFolding { position: usize },
}

/// A complete header field, i.e., `Name: Value`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Header<'a> {
    pub name: HeaderName<'a>,
    pub value: HeaderValue<'a>,
}

impl<'a> Header<'a> {
    pub fn new(name: HeaderName<'a>, value: HeaderValue<'a>) -> Self {
        Self { name, value }
    }

    pub fn into_static(self) -> Header<'static> {
        Header {
            name: self.name.into_static(),
            value: self.value.into_static(),
        }
    }
}

impl<'a> TryFrom<&'a [u8]> for Header<'a> {
    type Error = HeaderError;

    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        let colon = value
            .iter()
            .position(|b| *b == b':')
            .ok_or(HeaderError::MissingColon)?;

        let name = HeaderName::try_from(&value[..colon])?;
        let value = HeaderValue::try_from(&value[colon + 1..])?;

        Ok(Self { name, value })
    }
}

impl TryFrom<Vec<u8>> for Header<'_> {
    type Error = HeaderError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Header::try_from(value.as_slice()).map(Header::into_static)
    }
}

impl<'a> TryFrom<&'a str> for Header<'a> {
    type Error = HeaderError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Self::try_from(value.as_bytes())
    }
}

impl TryFrom<String> for Header<'_> {
    type Error = HeaderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Header::try_from(value.into_bytes())
    }
}

#[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
pub enum HeaderError {
    #[error("Missing `:` between name and value")]
    MissingColon,
    #[error("Invalid name: {0}")]
    Name(#[from] HeaderNameError),
    #[error("Invalid value: {0}")]
    Value(#[from] HeaderValueError),
}
