//! # Decoding of header fields and field bodies.
//!
//! All decoders implement the [`Decoder`] trait and return the remaining input together with the
//! decoded value.
//!
//! [`HeaderCodec`](crate::HeaderCodec) and [`MessageIdCodec`](crate::MessageIdCodec) are
//! streaming decoders, i.e., they return [`DecodeError::Incomplete`] when more data is required to
//! make a decision. This is important for header fields, because a field only ends at a line break
//! that is *not* followed by whitespace. Thus, `Subject: Hello\r\n` is incomplete until the next
//! byte arrives.
//!
//! [`DateTimeCodec`](crate::DateTimeCodec), [`AddressListCodec`](crate::AddressListCodec), and
//! [`MessageIdListCodec`](crate::MessageIdListCodec) decode a complete (unfolded) field body,
//! e.g., the value of a [`Header`], and consume all of their input.
//!
//! # Example
//!
//! ```rust
//! use imf_codec::{
//!     decode::{DecodeError, Decoder},
//!     HeaderCodec,
//! };
//!
//! let codec = HeaderCodec::default();
//!
//! // The next line could still be a continuation of the field.
//! assert_eq!(
//!     codec.decode(b"Subject: Hello\r\n"),
//!     Err(DecodeError::Incomplete)
//! );
//!
//! let (remaining, header) = codec.decode(b"Subject: Hello\r\n World\r\nTo: ...").unwrap();
//! assert_eq!(header.value.inner(), "Hello World");
//! assert_eq!(remaining, b"To: ...");
//! ```

use imf_types::{
    address::{EmailAddress, EmailAddressError},
    core::Vec1,
    datetime::{DateTime, error::DateTimeError},
    header::{Header, HeaderError},
    message::{MessageId, MessageIdError},
};
use nom::error::{ErrorKind, FromExternalError, ParseError};
use thiserror::Error;

use crate::{
    address::address_list,
    codec::{
        AddressListCodec, DateTimeCodec, HeaderCodec, MessageIdCodec, MessageIdListCodec,
    },
    datetime::date_time,
    header::header_field,
    message_id::{msg_id, msg_id_list},
};

/// An extended version of [`nom::IResult`].
pub(crate) type IMFResult<I, O> = Result<(I, O), nom::Err<IMFParseError<I>>>;

/// An extended version of [`nom::error::Error`].
#[derive(Debug)]
pub(crate) struct IMFParseError<I> {
    #[allow(unused)]
    pub input: I,
    pub kind: IMFErrorKind,
}

/// An extended version of [`nom::error::ErrorKind`].
///
/// Framing is done by `nom`. Values are validated by imf-types, and their errors are kept.
#[derive(Debug)]
pub(crate) enum IMFErrorKind {
    BadHeader(HeaderError),
    BadAddress(EmailAddressError),
    BadMessageId(MessageIdError),
    BadDateTime(DateTimeError),
    Nom(ErrorKind),
}

impl<I> ParseError<I> for IMFParseError<I> {
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        Self {
            input,
            kind: IMFErrorKind::Nom(kind),
        }
    }

    fn append(input: I, kind: ErrorKind, _: Self) -> Self {
        Self {
            input,
            kind: IMFErrorKind::Nom(kind),
        }
    }
}

impl<I> FromExternalError<I, HeaderError> for IMFParseError<I> {
    fn from_external_error(input: I, _: ErrorKind, error: HeaderError) -> Self {
        Self {
            input,
            kind: IMFErrorKind::BadHeader(error),
        }
    }
}

impl<I> FromExternalError<I, EmailAddressError> for IMFParseError<I> {
    fn from_external_error(input: I, _: ErrorKind, error: EmailAddressError) -> Self {
        Self {
            input,
            kind: IMFErrorKind::BadAddress(error),
        }
    }
}

impl<I> FromExternalError<I, MessageIdError> for IMFParseError<I> {
    fn from_external_error(input: I, _: ErrorKind, error: MessageIdError) -> Self {
        Self {
            input,
            kind: IMFErrorKind::BadMessageId(error),
        }
    }
}

impl<I> FromExternalError<I, DateTimeError> for IMFParseError<I> {
    fn from_external_error(input: I, _: ErrorKind, error: DateTimeError) -> Self {
        Self {
            input,
            kind: IMFErrorKind::BadDateTime(error),
        }
    }
}

/// Decoder.
///
/// Implemented for types that know how to decode a specific IMF element. See [implementors](trait.Decoder.html#implementors).
pub trait Decoder {
    type Message<'a>: Sized;
    type Error: std::error::Error;

    fn decode<'a>(&self, input: &'a [u8])
    -> Result<(&'a [u8], Self::Message<'a>), Self::Error>;
}

/// Error during decoding.
///
/// `E` is the validation error of the decoded type, e.g., [`HeaderError`] for [`HeaderCodec`].
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub enum DecodeError<E> {
    /// More data is needed.
    #[error("Need more data")]
    Incomplete,

    /// The input is not framed correctly, e.g., a line break is missing.
    #[error("Failed to decode")]
    Failed,

    /// The input is framed correctly, but its content is invalid.
    #[error("Invalid content: {0}")]
    Invalid(E),
}

pub type HeaderDecodeError = DecodeError<HeaderError>;
pub type AddressListDecodeError = DecodeError<EmailAddressError>;
pub type MessageIdDecodeError = DecodeError<MessageIdError>;
pub type DateTimeDecodeError = DecodeError<DateTimeError>;

// -------------------------------------------------------------------------------------------------

macro_rules! impl_decoder_for_codec {
    ($codec:ty, $message:ty, $parser:ident, $variant:ident, $child:ty) => {
        impl Decoder for $codec {
            type Message<'a> = $message;
            type Error = DecodeError<$child>;

            fn decode<'a>(
                &self,
                input: &'a [u8],
            ) -> Result<(&'a [u8], Self::Message<'a>), Self::Error> {
                match $parser(input) {
                    Ok((rem, out)) => Ok((rem, out)),
                    Err(nom::Err::Incomplete(_)) => Err(DecodeError::Incomplete),
                    Err(nom::Err::Failure(error)) | Err(nom::Err::Error(error)) => {
                        match error.kind {
                            IMFErrorKind::$variant(child) => {
                                log::trace!(
                                    "{} rejected input: {child}",
                                    stringify!($codec)
                                );
                                Err(DecodeError::Invalid(child))
                            }
                            kind => {
                                log::trace!(
                                    "{} failed to frame input: {kind:?}",
                                    stringify!($codec)
                                );
                                Err(DecodeError::Failed)
                            }
                        }
                    }
                }
            }
        }
    };
}

impl_decoder_for_codec!(HeaderCodec, Header<'a>, header_field, BadHeader, HeaderError);
impl_decoder_for_codec!(
    AddressListCodec,
    Vec1<EmailAddress<'a>>,
    address_list,
    BadAddress,
    EmailAddressError
);
impl_decoder_for_codec!(MessageIdCodec, MessageId<'a>, msg_id, BadMessageId, MessageIdError);
impl_decoder_for_codec!(
    MessageIdListCodec,
    Vec1<MessageId<'a>>,
    msg_id_list,
    BadMessageId,
    MessageIdError
);
impl_decoder_for_codec!(DateTimeCodec, DateTime, date_time, BadDateTime, DateTimeError);
