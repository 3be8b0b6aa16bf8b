use imf_types::{core::Vec1, message::MessageId, utils::indicators::is_wsp};
use nom::{
    bytes::streaming::{take_till1, take_while},
    character::streaming::char,
    error::{ErrorKind, ParseError},
    sequence::{delimited, preceded},
};

use crate::decode::{IMFErrorKind, IMFParseError, IMFResult};

fn is_fws(byte: u8) -> bool {
    is_wsp(byte) || byte == b'\r' || byte == b'\n'
}

/// ```abnf
/// msg-id = [CFWS] "<" id-left "@" id-right ">" [CFWS]
/// ```
///
/// Comments are not supported. The content between the brackets is validated by [`MessageId`].
pub(crate) fn msg_id(input: &[u8]) -> IMFResult<&[u8], MessageId> {
    let mut parser = preceded(
        take_while(is_fws),
        delimited(char('<'), take_till1(|byte| byte == b'>'), char('>')),
    );

    let (remaining, content) = parser(input)?;

    match MessageId::try_from(content) {
        Ok(message_id) => Ok((remaining, message_id)),
        Err(error) => Err(nom::Err::Failure(IMFParseError {
            input,
            kind: IMFErrorKind::BadMessageId(error),
        })),
    }
}

/// ```abnf
/// references = 1*msg-id
/// ```
///
/// Consumes all input. Trailing whitespace is skipped.
pub(crate) fn msg_id_list(input: &[u8]) -> IMFResult<&[u8], Vec1<MessageId>> {
    let mut message_ids = Vec::new();
    let mut remaining = input;

    while !remaining.iter().all(|byte| is_fws(*byte)) {
        let (rest, message_id) = msg_id(remaining)?;

        message_ids.push(message_id);
        remaining = rest;
    }

    match Vec1::try_from(message_ids) {
        Ok(message_ids) => Ok((&remaining[remaining.len()..], message_ids)),
        Err(_) => Err(nom::Err::Error(IMFParseError::from_error_kind(
            input,
            ErrorKind::Many1,
        ))),
    }
}
