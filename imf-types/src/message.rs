//! Message identification and message assembly (RFC 5322, sections 3.6 and 3.6.4).

use std::{borrow::Cow, str::from_utf8};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "id_generator")]
use crate::domain::Domain;
use crate::{
    address::EmailAddress,
    core::Vec1,
    datetime::DateTime,
    header::{Header, HeaderName, HeaderValue},
    utils::indicators::is_vchar,
};

/// Field names the message assembler writes itself.
///
/// Additional headers must not use them, otherwise the field order (or the exclusion of `Bcc`)
/// could be subverted.
pub const RESERVED_HEADER_NAMES: [&str; 9] = [
    "From",
    "To",
    "Cc",
    "Bcc",
    "Subject",
    "Date",
    "Message-ID",
    "Reply-To",
    "MIME-Version",
];

/// The content of a `msg-id`, i.e., everything between `<` and `>`.
///
/// Brackets are stripped when present on construction and only added back on serialization.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId<'a>(pub(crate) Cow<'a, str>);

impl<'a> MessageId<'a> {
    /// Verify the content of a message id (without brackets).
    pub fn verify(value: impl AsRef<[u8]>) -> Result<(), MessageIdError> {
        let value = value.as_ref();

        if value.is_empty() {
            return Err(MessageIdError::Empty);
        }

        if let Some(position) = value
            .iter()
            .position(|b| !is_vchar(*b) || *b == b'<' || *b == b'>')
        {
            return Err(MessageIdError::ByteNotAllowed {
                found: value[position],
                position,
            });
        }

        match value.iter().filter(|b| **b == b'@').count() {
            0 => Err(MessageIdError::MissingAtSign),
            1 => Ok(()),
            _ => Err(MessageIdError::MultipleAtSigns),
        }
    }

    fn strip_brackets(value: &[u8]) -> &[u8] {
        match value {
            [b'<', inner @ .., b'>'] => inner,
            value => value,
        }
    }

    pub fn inner(&self) -> &str {
        self.0.as_ref()
    }

    pub fn into_inner(self) -> Cow<'a, str> {
        self.0
    }

    /// Constructs a message id without validation.
    ///
    /// # Warning: IMF conformance
    ///
    /// The caller must ensure that `inner` has no brackets and is valid according to
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

    /// Generate a new, random message id for `domain`.
    ///
    /// The left-hand side consists of 24 random alphanumeric characters.
    #[cfg(feature = "id_generator")]
    #[cfg_attr(docsrs, doc(cfg(feature = "id_generator")))]
    pub fn generate(domain: &Domain<'_>) -> MessageId<'static> {
        use rand::{Rng, distributions::Alphanumeric, thread_rng};

        let random: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(24)
            .map(char::from)
            .collect();

        MessageId(Cow::Owned(format!("{random}@{}", domain.inner())))
    }

    pub fn into_static(self) -> MessageId<'static> {
        MessageId(Cow::Owned(self.0.into_owned()))
    }
}

impl<'a> TryFrom<&'a [u8]> for MessageId<'a> {
    type Error = MessageIdError;

    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        let value = Self::strip_brackets(value);

        Self::verify(value)?;

        // Safety: `unwrap` can't panic due to `verify`.
        Ok(Self(Cow::Borrowed(from_utf8(value).unwrap())))
    }
}

impl TryFrom<Vec<u8>> for MessageId<'_> {
    type Error = MessageIdError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        MessageId::try_from(value.as_slice()).map(MessageId::into_static)
    }
}

impl<'a> TryFrom<&'a str> for MessageId<'a> {
    type Error = MessageIdError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Self::try_from(value.as_bytes())
    }
}

impl TryFrom<String> for MessageId<'_> {
    type Error = MessageIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        MessageId::try_from(value.into_bytes())
    }
}

impl AsRef<str> for MessageId<'_> {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

#[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
pub enum MessageIdError {
    #[error("Must not be empty")]
    Empty,
    #[error("Missing `@`")]
    MissingAtSign,
    #[error("Must contain exactly one `@`")]
    MultipleAtSigns,
    #[error("Invalid byte b'\\x{found:02x}' at index {position}")]
    ByteNotAllowed { found: u8, position: usize },
}

/// A complete message ready for serialization.
///
/// `bcc` is kept for the caller's own bookkeeping (e.g., the SMTP envelope) and is never
/// serialized.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MessageShadow<'a>"))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message<'a> {
    from: EmailAddress<'a>,
    to: Vec1<EmailAddress<'a>>,
    cc: Vec<EmailAddress<'a>>,
    bcc: Vec<EmailAddress<'a>>,
    reply_to: Option<EmailAddress<'a>>,
    subject: HeaderValue<'a>,
    date: DateTime,
    message_id: MessageId<'a>,
    mime_version: HeaderValue<'a>,
    additional_headers: Vec<Header<'a>>,
    body: Cow<'a, [u8]>,
}

/// Use shadow type to support validated deserialization
/// until `serde` provides built-in support for this case.
#[cfg(feature = "serde")]
#[derive(Deserialize, Debug)]
struct MessageShadow<'a> {
    from: EmailAddress<'a>,
    to: Vec1<EmailAddress<'a>>,
    cc: Vec<EmailAddress<'a>>,
    bcc: Vec<EmailAddress<'a>>,
    reply_to: Option<EmailAddress<'a>>,
    subject: HeaderValue<'a>,
    date: DateTime,
    message_id: MessageId<'a>,
    mime_version: HeaderValue<'a>,
    additional_headers: Vec<Header<'a>>,
    body: Cow<'a, [u8]>,
}

#[cfg(feature = "serde")]
impl<'a> TryFrom<MessageShadow<'a>> for Message<'a> {
    type Error = MessageError;

    fn try_from(value: MessageShadow<'a>) -> Result<Self, Self::Error> {
        let MessageShadow {
            from,
            to,
            cc,
            bcc,
            reply_to,
            subject,
            date,
            message_id,
            mime_version,
            additional_headers,
            body,
        } = value;

        let mut message = Message::new(from, to, subject, date, message_id, body)
            .with_cc(cc)
            .with_bcc(bcc)
            .with_mime_version(mime_version);
        message.reply_to = reply_to;

        additional_headers
            .into_iter()
            .try_fold(message, Message::with_header)
    }
}

impl<'a> Message<'a> {
    pub fn new<B>(
        from: EmailAddress<'a>,
        to: Vec1<EmailAddress<'a>>,
        subject: HeaderValue<'a>,
        date: DateTime,
        message_id: MessageId<'a>,
        body: B,
    ) -> Self
    where
        B: Into<Cow<'a, [u8]>>,
    {
        Self {
            from,
            to,
            cc: Vec::new(),
            bcc: Vec::new(),
            reply_to: None,
            subject,
            date,
            message_id,
            mime_version: HeaderValue(Cow::Borrowed("1.0")),
            additional_headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_cc(mut self, cc: Vec<EmailAddress<'a>>) -> Self {
        self.cc = cc;
        self
    }

    pub fn with_bcc(mut self, bcc: Vec<EmailAddress<'a>>) -> Self {
        self.bcc = bcc;
        self
    }

    pub fn with_reply_to(mut self, reply_to: EmailAddress<'a>) -> Self {
        self.reply_to = Some(reply_to);
        self
    }

    pub fn with_mime_version(mut self, mime_version: HeaderValue<'a>) -> Self {
        self.mime_version = mime_version;
        self
    }

    /// Append a header that is written after `MIME-Version`, in insertion order.
    pub fn with_header(mut self, header: Header<'a>) -> Result<Self, MessageError> {
        Self::verify_additional_header(&header.name)?;

        self.additional_headers.push(header);
        Ok(self)
    }

    fn verify_additional_header(name: &HeaderName<'_>) -> Result<(), MessageError> {
        match RESERVED_HEADER_NAMES
            .iter()
            .find(|reserved| name.is(reserved))
        {
            Some(reserved) => Err(MessageError::ReservedHeader {
                name: (*reserved).to_owned(),
            }),
            None => Ok(()),
        }
    }

    pub fn from(&self) -> &EmailAddress<'a> {
        &self.from
    }

    pub fn to(&self) -> &Vec1<EmailAddress<'a>> {
        &self.to
    }

    pub fn cc(&self) -> &[EmailAddress<'a>] {
        &self.cc
    }

    pub fn bcc(&self) -> &[EmailAddress<'a>] {
        &self.bcc
    }

    pub fn reply_to(&self) -> Option<&EmailAddress<'a>> {
        self.reply_to.as_ref()
    }

    pub fn subject(&self) -> &HeaderValue<'a> {
        &self.subject
    }

    pub fn date(&self) -> &DateTime {
        &self.date
    }

    pub fn message_id(&self) -> &MessageId<'a> {
        &self.message_id
    }

    pub fn mime_version(&self) -> &HeaderValue<'a> {
        &self.mime_version
    }

    pub fn additional_headers(&self) -> &[Header<'a>] {
        &self.additional_headers
    }

    pub fn body(&self) -> &[u8] {
        self.body.as_ref()
    }
}

#[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
pub enum MessageError {
    #[error("Header `{name}` is written by the message itself")]
    ReservedHeader { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> Message<'static> {
        Message::new(
            EmailAddress::try_from("Alice <alice@example.com>").unwrap(),
            Vec1::from(EmailAddress::try_from("bob@example.com").unwrap()),
            HeaderValue::try_from("Hello").unwrap(),
            DateTime::from_timestamp(1_609_459_200),
            MessageId::try_from("<1234@example.com>").unwrap(),
            &b"Hi Bob!"[..],
        )
    }

    #[test]
    fn test_conversion_message_id() {
        let tests = [
            ("1234@example.com", "1234@example.com"),
            ("<1234@example.com>", "1234@example.com"),
            ("a.b-c$d@[127.0.0.1]", "a.b-c$d@[127.0.0.1]"),
        ];

        for (test, expected) in tests {
            let got = MessageId::try_from(test).unwrap();
            assert_eq!(got.inner(), expected);
            assert_eq!(MessageId::try_from(test.as_bytes()).unwrap(), got);
            assert_eq!(MessageId::try_from(test.to_owned()).unwrap(), got);
            assert_eq!(MessageId::try_from(test.as_bytes().to_vec()).unwrap(), got);
        }
    }

    #[test]
    fn test_conversion_message_id_failing() {
        let tests = [
            ("", MessageIdError::Empty),
            ("<>", MessageIdError::Empty),
            ("1234", MessageIdError::MissingAtSign),
            ("a@b@c", MessageIdError::MultipleAtSigns),
            (
                "12 34@example.com",
                MessageIdError::ByteNotAllowed {
                    found: b' ',
                    position: 2,
                },
            ),
            (
                "<1234@example.com",
                MessageIdError::ByteNotAllowed {
                    found: b'<',
                    position: 0,
                },
            ),
            (
                "1234@example.com>",
                MessageIdError::ByteNotAllowed {
                    found: b'>',
                    position: 16,
                },
            ),
            (
                "<<1234@example.com>>",
                MessageIdError::ByteNotAllowed {
                    found: b'<',
                    position: 0,
                },
            ),
        ];

        for (test, expected) in tests {
            assert_eq!(MessageId::try_from(test), Err(expected), "{test:?}");
        }
    }

    #[cfg(feature = "id_generator")]
    #[test]
    fn test_generate_message_id() {
        let domain = Domain::try_from("Example.COM").unwrap();

        let a = MessageId::generate(&domain);
        let b = MessageId::generate(&domain);

        assert_ne!(a, b);
        assert!(MessageId::verify(a.inner()).is_ok());

        let (random, domain) = a.inner().split_once('@').unwrap();
        assert_eq!(random.len(), 24);
        assert!(random.bytes().all(|b| b.is_ascii_alphanumeric()));
        assert_eq!(domain, "example.com");
    }

    #[test]
    fn test_message_defaults() {
        let message = message();

        assert_eq!(message.mime_version().inner(), "1.0");
        assert!(message.cc().is_empty());
        assert!(message.bcc().is_empty());
        assert!(message.reply_to().is_none());
        assert!(message.additional_headers().is_empty());
        assert_eq!(message.body(), b"Hi Bob!");
        assert_eq!(message.to().len(), 1);
    }

    #[test]
    fn test_with_header() {
        let message = message()
            .with_header(Header::try_from("X-Priority: 1").unwrap())
            .unwrap()
            .with_header(Header::try_from("X-Mailer: imf").unwrap())
            .unwrap();

        let names: Vec<_> = message
            .additional_headers()
            .iter()
            .map(|header| header.name.inner())
            .collect();
        assert_eq!(names, ["X-Priority", "X-Mailer"]);
    }

    #[test]
    fn test_with_header_reserved() {
        let tests = [
            ("Bcc: eve@example.com", "Bcc"),
            ("bcc: eve@example.com", "Bcc"),
            ("SUBJECT: Spoofed", "Subject"),
            ("Message-Id: <x@y>", "Message-ID"),
            ("mime-version: 2.0", "MIME-Version"),
        ];

        for (test, expected) in tests {
            let got = message().with_header(Header::try_from(test).unwrap());
            assert_eq!(
                got,
                Err(MessageError::ReservedHeader {
                    name: expected.to_owned()
                })
            );
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialization_message() {
        let message = message()
            .with_header(Header::try_from("X-Priority: 1").unwrap())
            .unwrap();
        let valid_input = serde_json::to_value(&message).unwrap();

        let got = serde_json::from_value::<Message>(valid_input.clone())
            .expect("valid input should deserialize successfully");
        assert_eq!(got, message);

        let tamper: [(&str, serde_json::Value); 5] = [
            (
                "/from/display_name",
                serde_json::json!("x\r\nBcc: eve@example.org\r\nX"),
            ),
            (
                "/additional_headers",
                serde_json::json!([{ "name": "bcc", "value": "spy@example.org" }]),
            ),
            ("/to", serde_json::json!([])),
            ("/message_id", serde_json::json!("<a@b>\r\nBcc: c@d")),
            ("/date/offset", serde_json::json!(86_400)),
        ];

        for (pointer, value) in tamper {
            let mut invalid_input = valid_input.clone();
            *invalid_input.pointer_mut(pointer).unwrap() = value;

            serde_json::from_value::<Message>(invalid_input)
                .expect_err("invalid input should not deserialize successfully");
        }
    }
}
