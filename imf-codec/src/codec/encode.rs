//! # Encoding of header fields and messages.
//!
//! [`Encoder::encode`] returns an instance of [`Encoded`].
//! The idea is that the encoder not only "dumps" the final serialization of a message but can be
//! iterated over, e.g., to write the header block line by line before streaming the body.
//!
//! # Example
//!
//! ```rust
//! use imf_codec::{
//!     encode::{Encoder, Fragment},
//!     imf_types::{
//!         address::EmailAddress,
//!         core::Vec1,
//!         datetime::DateTime,
//!         header::HeaderValue,
//!         message::{Message, MessageId},
//!     },
//!     MessageCodec,
//! };
//!
//! let message = Message::new(
//!     EmailAddress::try_from("Alice <alice@example.com>").unwrap(),
//!     Vec1::from(EmailAddress::try_from("bob@example.com").unwrap()),
//!     HeaderValue::try_from("Lunch?").unwrap(),
//!     DateTime::from_timestamp(1_609_459_200),
//!     MessageId::try_from("<1234@example.com>").unwrap(),
//!     &b"How about noon?"[..],
//! );
//!
//! for fragment in MessageCodec::default().encode(&message) {
//!     match fragment {
//!         Fragment::Line { data } => {
//!             // A header line (or the blank line that ends the header block).
//!             print!("{}", String::from_utf8(data).unwrap());
//!         }
//!         Fragment::Body { data } => {
//!             // The body, verbatim.
//!             println!("<{} bytes>", data.len());
//!         }
//!     }
//! }
//! ```
//!
//! Output of example:
//!
//! ```text
//! From: Alice <alice@example.com>
//! To: bob@example.com
//! Subject: Lunch?
//! Date: Fri, 01 Jan 2021 00:00:00 +0000
//! Message-ID: <1234@example.com>
//! MIME-Version: 1.0
//!
//! <15 bytes>
//! ```

use std::{collections::VecDeque, fmt::Write as _, io::Write};

use imf_types::{
    address::EmailAddress,
    core::Vec1,
    datetime::{DateTime, MONTH_NAMES},
    header::{Header, HeaderName, HeaderValue},
    message::{Message, MessageId},
    utils::escape_quoted,
};
use utils::join_serializable;

use crate::{
    AddressCodec, AddressListCodec, DateTimeCodec, HeaderCodec, MessageCodec, MessageIdCodec,
    MessageIdListCodec,
};

/// Encoder.
///
/// Implemented for types that know how to encode a specific IMF element. See [implementors](trait.Encoder.html#implementors).
pub trait Encoder {
    type Message<'a>;

    /// Encode this message.
    ///
    /// This will return an [`Encoded`] message.
    fn encode(&self, message: &Self::Message<'_>) -> Encoded;
}

/// An encoded message.
///
/// The encoding is yielded through [`Fragment`]s: one [`Fragment::Line`] per header line and a
/// final [`Fragment::Body`] for messages. Use [`Encoded::dump`] when the whole byte buffer is
/// needed.
///
/// # Example
///
/// ```rust
/// use imf_codec::{
///     encode::{Encoder, Fragment},
///     imf_types::header::Header,
///     HeaderCodec,
/// };
///
/// let header = Header::try_from("X-Priority: 1").unwrap();
///
/// for fragment in HeaderCodec::default().encode(&header) {
///     match fragment {
///         Fragment::Line { data } => assert_eq!(data, b"X-Priority: 1\r\n"),
///         Fragment::Body { .. } => unreachable!(),
///     }
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Encoded {
    items: VecDeque<Fragment>,
}

impl Encoded {
    /// Dump the (remaining) encoded data without being guided by [`Fragment`]s.
    pub fn dump(self) -> Vec<u8> {
        let length = self.items.iter().map(|fragment| fragment.data().len()).sum();
        let mut out = Vec::with_capacity(length);

        for fragment in self.items {
            match fragment {
                Fragment::Line { mut data } => out.append(&mut data),
                Fragment::Body { mut data } => out.append(&mut data),
            }
        }

        out
    }
}

impl Iterator for Encoded {
    type Item = Fragment;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.pop_front()
    }
}

/// A piece of an encoded message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Fragment {
    /// A CRLF-terminated line.
    Line { data: Vec<u8> },

    /// A message body. Written verbatim.
    Body { data: Vec<u8> },
}

impl Fragment {
    pub fn data(&self) -> &[u8] {
        match self {
            Self::Line { data } | Self::Body { data } => data,
        }
    }
}

//--------------------------------------------------------------------------------------------------

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct EncodeContext {
    accumulator: Vec<u8>,
    items: VecDeque<Fragment>,
}

impl EncodeContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self) {
        self.items.push_back(Fragment::Line {
            data: std::mem::take(&mut self.accumulator),
        })
    }

    pub fn push_body(&mut self) {
        self.items.push_back(Fragment::Body {
            data: std::mem::take(&mut self.accumulator),
        })
    }

    pub fn into_items(self) -> VecDeque<Fragment> {
        let Self {
            accumulator,
            mut items,
        } = self;

        if !accumulator.is_empty() {
            items.push_back(Fragment::Line { data: accumulator });
        }

        items
    }

    #[cfg(test)]
    pub(crate) fn dump(self) -> Vec<u8> {
        let mut out = Vec::new();

        for item in self.into_items() {
            out.extend_from_slice(item.data());
        }

        out
    }
}

impl Write for EncodeContext {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.accumulator.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

macro_rules! impl_encoder_for_codec {
    ($codec:ty, $message:ty) => {
        impl Encoder for $codec {
            type Message<'a> = $message;

            fn encode(&self, message: &Self::Message<'_>) -> Encoded {
                let mut encode_context = EncodeContext::new();
                // Writing into an `EncodeContext` never fails.
                EncodeIntoContext::encode_ctx(message, &mut encode_context).unwrap();

                Encoded {
                    items: encode_context.into_items(),
                }
            }
        }
    };
}

impl_encoder_for_codec!(DateTimeCodec, DateTime);
impl_encoder_for_codec!(AddressCodec, EmailAddress<'a>);
impl_encoder_for_codec!(AddressListCodec, Vec1<EmailAddress<'a>>);
impl_encoder_for_codec!(HeaderCodec, Header<'a>);
impl_encoder_for_codec!(MessageIdCodec, MessageId<'a>);
impl_encoder_for_codec!(MessageIdListCodec, Vec1<MessageId<'a>>);
impl_encoder_for_codec!(MessageCodec, Message<'a>);

// -------------------------------------------------------------------------------------------------

pub(crate) trait EncodeIntoContext {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()>;
}

impl<T> EncodeIntoContext for Vec1<T>
where
    T: EncodeIntoContext + ListSeparator,
{
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        join_serializable(self.as_ref(), T::SEPARATOR, ctx)
    }
}

/// How elements are joined in a list.
pub(crate) trait ListSeparator {
    const SEPARATOR: &'static [u8];
}

// ----- DateTime ----------------------------------------------------------------------------------

/// ```abnf
/// date-time = day-of-week "," SP day SP month SP year SP hour ":" minute ":" second SP zone
/// ```
///
/// The day is always written with two digits, the seconds are always written.
/// The year is written with at least four digits. `Date:` fields with a local year before 1900
/// can't be parsed back.
impl EncodeIntoContext for DateTime {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        let components = self.components();

        let (sign, offset) = match self.offset() {
            offset if offset < 0 => ('-', -offset),
            offset => ('+', offset),
        };

        let mut out = String::with_capacity(31);
        // Writing into a `String` never fails.
        let _ = write!(
            out,
            "{}, {:02} {} {:04} {:02}:{:02}:{:02} {}{:02}{:02}",
            components.weekday(),
            components.day(),
            MONTH_NAMES[usize::from(components.month() - 1)],
            components.year(),
            components.hour(),
            components.minute(),
            components.second(),
            sign,
            offset / 3600,
            offset % 3600 / 60,
        );

        ctx.write_all(out.as_bytes())
    }
}

// ----- Address -----------------------------------------------------------------------------------

/// ```abnf
/// mailbox = name-addr / addr-spec
/// ```
///
/// The display name is written as a quoted-string when it contains anything but letters, digits
/// and whitespace.
impl EncodeIntoContext for EmailAddress<'_> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self.display_name() {
            Some(display_name) => {
                if EmailAddress::display_name_needs_quotes(display_name) {
                    write!(ctx, "\"{}\"", escape_quoted(display_name))?;
                } else {
                    ctx.write_all(display_name.as_bytes())?;
                }

                write!(ctx, " <{}>", self.addr_spec())
            }
            None => ctx.write_all(self.addr_spec().as_bytes()),
        }
    }
}

impl ListSeparator for EmailAddress<'_> {
    const SEPARATOR: &'static [u8] = b", ";
}

// ----- Header ------------------------------------------------------------------------------------

impl EncodeIntoContext for HeaderName<'_> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        ctx.write_all(self.inner().as_bytes())
    }
}

impl EncodeIntoContext for HeaderValue<'_> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        ctx.write_all(self.inner().as_bytes())
    }
}

/// `Name: Value\r\n`. Values are never folded.
impl EncodeIntoContext for Header<'_> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        self.name.encode_ctx(ctx)?;
        ctx.write_all(b": ")?;
        self.value.encode_ctx(ctx)?;
        ctx.write_all(b"\r\n")
    }
}

// ----- Message -----------------------------------------------------------------------------------

impl EncodeIntoContext for MessageId<'_> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        write!(ctx, "<{}>", self.inner())
    }
}

impl ListSeparator for MessageId<'_> {
    const SEPARATOR: &'static [u8] = b" ";
}

/// Header fields in a fixed order, a blank line, and the body.
///
/// `Bcc` is never written.
impl EncodeIntoContext for Message<'_> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        encode_field(ctx, "From", self.from())?;
        encode_field(ctx, "To", self.to())?;

        if !self.cc().is_empty() {
            ctx.write_all(b"Cc: ")?;
            join_serializable(self.cc(), EmailAddress::SEPARATOR, ctx)?;
            ctx.write_all(b"\r\n")?;
            ctx.push_line();
        }

        encode_field(ctx, "Subject", self.subject())?;
        encode_field(ctx, "Date", self.date())?;
        encode_field(ctx, "Message-ID", self.message_id())?;

        if let Some(reply_to) = self.reply_to() {
            encode_field(ctx, "Reply-To", reply_to)?;
        }

        encode_field(ctx, "MIME-Version", self.mime_version())?;

        for header in self.additional_headers() {
            header.encode_ctx(ctx)?;
            ctx.push_line();
        }

        ctx.write_all(b"\r\n")?;
        ctx.push_line();

        ctx.write_all(self.body())?;
        ctx.push_body();

        Ok(())
    }
}

fn encode_field<T>(ctx: &mut EncodeContext, name: &str, value: &T) -> std::io::Result<()>
where
    T: EncodeIntoContext,
{
    write!(ctx, "{name}: ")?;
    value.encode_ctx(ctx)?;
    ctx.write_all(b"\r\n")?;
    ctx.push_line();

    Ok(())
}

pub(crate) mod utils {
    use std::io::Write;

    use super::{EncodeContext, EncodeIntoContext};

    pub(crate) fn join_serializable<I: EncodeIntoContext>(
        elements: &[I],
        sep: &[u8],
        ctx: &mut EncodeContext,
    ) -> std::io::Result<()> {
        if let Some((last, head)) = elements.split_last() {
            for item in head {
                item.encode_ctx(ctx)?;
                ctx.write_all(sep)?;
            }

            last.encode_ctx(ctx)
        } else {
            Ok(())
        }
    }
}
