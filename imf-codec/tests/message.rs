use imf_codec::{
    AddressListCodec, DateTimeCodec, HeaderCodec, MessageCodec, MessageIdCodec,
    decode::{DecodeError, Decoder},
    encode::{Encoder, Fragment},
    imf_types::{
        address::{EmailAddress, EmailAddressError, LocalPartError},
        core::Vec1,
        datetime::{DateTime, Weekday, error::DateTimeError},
        header::{Header, HeaderValue},
        message::{Message, MessageId},
    },
};

const HEADER_BLOCK: &[u8] = b"From: \"Smith, Alice\" <alice@example.com>\r\n\
To: bob@example.com,\r\n Carol <carol@Example.ORG>\r\n\
Subject: Quarterly\r\n report\r\n\
Date: Fri, 01 Jan 2021 00:00:00 +0000\r\n\
Message-ID: <1234@example.com>\r\n\
X-Priority: 1\r\n\
\r\n";

/// Decode a header block field by field until the empty line.
fn decode_header_block(mut input: &[u8]) -> Vec<Header<'_>> {
    let mut headers = Vec::new();

    while !input.starts_with(b"\r\n") {
        let (remaining, header) = HeaderCodec::default().decode(input).unwrap();
        headers.push(header);
        input = remaining;
    }

    headers
}

fn field<'a>(headers: &'a [Header<'a>], name: &str) -> &'a str {
    headers
        .iter()
        .find(|header| header.name.is(name))
        .map(|header| header.value.inner())
        .unwrap()
}

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
fn test_decode_header_block_and_reassemble() {
    let headers = decode_header_block(HEADER_BLOCK);
    assert_eq!(headers.len(), 6);

    let (_, from) = AddressListCodec::default()
        .decode(field(&headers, "from").as_bytes())
        .unwrap();
    let (_, to) = AddressListCodec::default()
        .decode(field(&headers, "TO").as_bytes())
        .unwrap();
    let (_, date) = DateTimeCodec::default()
        .decode(field(&headers, "Date").as_bytes())
        .unwrap();
    let (_, message_id) = MessageIdCodec::default()
        .decode(field(&headers, "Message-Id").as_bytes())
        .unwrap();

    assert_eq!(field(&headers, "Subject"), "Quarterly report");
    assert_eq!(from.first().display_name(), Some("Smith, Alice"));
    assert_eq!(to.len(), 2);
    assert_eq!(date.weekday(), Weekday::Friday);

    let mut message = Message::new(
        from.into_inner().remove(0),
        to,
        HeaderValue::try_from(field(&headers, "Subject")).unwrap(),
        date,
        message_id,
        &b"See attachment.\r\n"[..],
    );
    for header in headers.iter().filter(|header| header.name.is("X-Priority")) {
        message = message.with_header(header.clone()).unwrap();
    }

    let got = MessageCodec::default().encode(&message).dump();

    let expected = b"From: \"Smith, Alice\" <alice@example.com>\r\n\
To: bob@example.com, Carol <carol@example.org>\r\n\
Subject: Quarterly report\r\n\
Date: Fri, 01 Jan 2021 00:00:00 +0000\r\n\
Message-ID: <1234@example.com>\r\n\
MIME-Version: 1.0\r\n\
X-Priority: 1\r\n\
\r\n\
See attachment.\r\n";

    assert_eq!(String::from_utf8_lossy(&got), String::from_utf8_lossy(expected));
}

#[test]
fn test_bcc_is_never_written() {
    let message = message().with_bcc(vec![
        EmailAddress::try_from("Secret <secret@example.com>").unwrap(),
    ]);
    assert_eq!(message.bcc().len(), 1);

    let got = MessageCodec::default().encode(&message).dump();
    let got = String::from_utf8(got).unwrap();

    assert!(!got.contains("Bcc:"));
    assert!(!got.contains("secret@example.com"));
}

#[test]
fn test_header_order() {
    let message = message()
        .with_cc(vec![EmailAddress::try_from("carol@example.com").unwrap()])
        .with_reply_to(EmailAddress::try_from("alice+replies@example.com").unwrap())
        .with_header(Header::try_from("X-Priority: 1").unwrap())
        .unwrap();

    let names: Vec<_> = MessageCodec::default()
        .encode(&message)
        .filter_map(|fragment| match fragment {
            Fragment::Line { data } => {
                let line = String::from_utf8(data).unwrap();
                line.split_once(':').map(|(name, _)| name.to_owned())
            }
            Fragment::Body { .. } => None,
        })
        .collect();

    assert_eq!(
        names,
        [
            "From",
            "To",
            "Cc",
            "Subject",
            "Date",
            "Message-ID",
            "Reply-To",
            "MIME-Version",
            "X-Priority",
        ]
    );

    let got = MessageCodec::default().encode(&message).dump();
    assert!(got.ends_with(b"X-Priority: 1\r\n\r\nHi Bob!"));
}

#[test]
fn test_date_time_properties() {
    let (_, got) = DateTimeCodec::default()
        .decode(b"Fri, 01 Jan 2021 00:00:00 +0000")
        .unwrap();
    assert_eq!(got.timestamp(), 1_609_459_200);

    assert_eq!(
        DateTimeCodec::default().decode(b"Mon, 01 Jan 2021 12:00:00 +0000"),
        Err(DecodeError::Invalid(DateTimeError::WeekdayMismatch {
            expected: Weekday::Monday,
            got: Weekday::Friday,
        }))
    );

    // Format and parse again for a spread of instants and offsets.
    for timestamp in (-2_208_902_400..253_402_300_799).step_by(86_400 * 365 + 3_599) {
        for offset in [-43_200, -18_000, 0, 3_600, 20_700, 50_400] {
            let date = DateTime::new(timestamp, offset).unwrap();
            let bytes = DateTimeCodec::default().encode(&date).dump();

            let (_, got) = DateTimeCodec::default().decode(&bytes).unwrap();
            assert_eq!(got.timestamp(), timestamp);
            assert_eq!(got.offset(), offset);
        }
    }
}

#[test]
fn test_address_properties() {
    let tests = [
        (
            b"user..name@example.com".as_ref(),
            EmailAddressError::LocalPart(LocalPartError::ConsecutiveDots { position: 4 }),
        ),
        (
            b".user@example.com",
            EmailAddressError::LocalPart(LocalPartError::LeadingOrTrailingDot),
        ),
    ];

    for (test, expected) in tests {
        assert_eq!(
            AddressListCodec::default().decode(test),
            Err(DecodeError::Invalid(expected))
        );
    }

    let too_long = format!("{}@example.com", "a".repeat(65));
    assert_eq!(
        AddressListCodec::default().decode(too_long.as_bytes()),
        Err(DecodeError::Invalid(EmailAddressError::LocalPart(
            LocalPartError::TooLong { length: 65 }
        )))
    );

    let (_, got) = AddressListCodec::default()
        .decode(b"user!tag|x@example.com")
        .unwrap();
    assert_eq!(
        AddressListCodec::default().encode(&got).dump(),
        b"user!tag|x@example.com"
    );
}

#[test]
fn test_unfolding() {
    let (remaining, got) = HeaderCodec::default()
        .decode(b"Content-Type: text/html;\r\n charset=UTF-8\r\n\r\n")
        .unwrap();

    assert_eq!(remaining, b"\r\n");
    assert_eq!(got.value.inner(), "text/html; charset=UTF-8");
    assert_eq!(
        HeaderCodec::default().encode(&got).dump(),
        b"Content-Type: text/html; charset=UTF-8\r\n"
    );
}
