#[cfg(feature = "quirk_crlf_relaxed")]
use std::borrow::Cow;

#[cfg(not(feature = "quirk_crlf_relaxed"))]
use abnf_core::streaming::crlf;
#[cfg(feature = "quirk_crlf_relaxed")]
use abnf_core::streaming::crlf_relaxed as crlf;
use imf_types::{
    header::Header,
    utils::indicators::{is_ftext, is_wsp},
};
use nom::{
    branch::alt,
    bytes::streaming::{tag, take_while1},
    combinator::recognize,
    multi::many0,
    sequence::{terminated, tuple},
};

use crate::decode::{IMFErrorKind, IMFParseError, IMFResult};

/// ```abnf
/// field = field-name ":" unstructured CRLF
/// ```
///
/// The field is framed here and validated (and unfolded) by [`Header`].
pub(crate) fn header_field(input: &[u8]) -> IMFResult<&[u8], Header> {
    let mut parser = terminated(
        recognize(tuple((field_name, tag(b":"), field_body))),
        crlf,
    );

    let (remaining, raw) = parser(input)?;

    #[cfg(feature = "quirk_crlf_relaxed")]
    let header = match rectify_line_endings(raw) {
        Cow::Borrowed(raw) => Header::try_from(raw),
        Cow::Owned(raw) => Header::try_from(raw),
    };
    #[cfg(not(feature = "quirk_crlf_relaxed"))]
    let header = Header::try_from(raw);

    match header {
        Ok(header) => Ok((remaining, header)),
        Err(error) => Err(nom::Err::Failure(IMFParseError {
            input,
            kind: IMFErrorKind::BadHeader(error),
        })),
    }
}

/// ```abnf
/// field-name = 1*ftext
/// ```
fn field_name(input: &[u8]) -> IMFResult<&[u8], &[u8]> {
    take_while1(is_ftext)(input)
}

/// Everything between `:` and the terminating CRLF, including folds.
///
/// Bytes other than CR and LF are accepted here. [`Header`] decides whether they are valid.
fn field_body(input: &[u8]) -> IMFResult<&[u8], &[u8]> {
    recognize(many0(alt((
        take_while1(|byte: u8| byte != b'\r' && byte != b'\n'),
        fws,
    ))))(input)
}

/// Folding whitespace.
///
/// ```abnf
/// FWS = ([*WSP CRLF] 1*WSP)
/// ```
///
/// Leading `*WSP` is already consumed by [`field_body`].
fn fws(input: &[u8]) -> IMFResult<&[u8], &[u8]> {
    recognize(tuple((crlf, take_while1(is_wsp))))(input)
}

/// Replace bare `\n` with `\r\n`.
#[cfg(feature = "quirk_crlf_relaxed")]
fn rectify_line_endings(raw: &[u8]) -> Cow<'_, [u8]> {
    let is_bare_lf = |index: usize| raw[index] == b'\n' && (index == 0 || raw[index - 1] != b'\r');

    if !(0..raw.len()).any(is_bare_lf) {
        return Cow::Borrowed(raw);
    }

    log::warn!("Rectified bare LF in header field");

    let mut rectified = Vec::with_capacity(raw.len() + 2);
    for (index, byte) in raw.iter().enumerate() {
        if is_bare_lf(index) {
            rectified.push(b'\r');
        }
        rectified.push(*byte);
    }

    Cow::Owned(rectified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::known_answer_test_parse;

    #[test]
    fn test_header_field() {
        let tests = [
            (
                b"Subject: Hello\r\n\r\n".as_ref(),
                b"\r\n".as_ref(),
                Header::try_from("Subject: Hello").unwrap(),
            ),
            (
                b"Subject: a\r\n b\r\n\tc\r\nX".as_ref(),
                b"X".as_ref(),
                Header::try_from("Subject: a b\tc").unwrap(),
            ),
            (
                b"X-Priority:1\r\n.".as_ref(),
                b".".as_ref(),
                Header::try_from("X-Priority: 1").unwrap(),
            ),
        ];

        for test in tests {
            known_answer_test_parse(test, header_field);
        }
    }

    #[test]
    fn test_fws() {
        assert!(matches!(fws(b"\r\n x"), Ok((b"x", b"\r\n "))));
        assert!(matches!(fws(b"\r\nx"), Err(nom::Err::Error(_))));
        assert!(matches!(fws(b"\r\n"), Err(nom::Err::Incomplete(_))));
    }

    #[cfg(feature = "quirk_crlf_relaxed")]
    #[test]
    fn test_rectify_line_endings() {
        assert!(matches!(
            rectify_line_endings(b"a\r\n b"),
            Cow::Borrowed(b"a\r\n b")
        ));
        assert_eq!(
            rectify_line_endings(b"a\n b\r\n c\n d").as_ref(),
            b"a\r\n b\r\n c\r\n d"
        );
    }
}
