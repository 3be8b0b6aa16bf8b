use imf_types::{address::EmailAddress, core::Vec1};
use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take, take_till},
    character::complete::char,
    combinator::{all_consuming, recognize},
    multi::{many0, many1, separated_list1},
    sequence::{pair, tuple},
};

use crate::decode::{IMFErrorKind, IMFParseError, IMFResult};

/// ```abnf
/// address-list = mailbox *("," mailbox)
/// ```
///
/// Groups are not supported. Items are split on commas outside of quoted-strings and angle
/// brackets and then validated by [`EmailAddress`].
pub(crate) fn address_list(input: &[u8]) -> IMFResult<&[u8], Vec1<EmailAddress>> {
    let (remaining, items) = all_consuming(separated_list1(tag(b","), mailbox))(input)?;

    let mut addresses = Vec::with_capacity(items.len());
    for item in items {
        match EmailAddress::try_from(item) {
            Ok(address) => addresses.push(address),
            Err(error) => {
                return Err(nom::Err::Failure(IMFParseError {
                    input: item,
                    kind: IMFErrorKind::BadAddress(error),
                }));
            }
        }
    }

    // Safety: `unwrap` can't panic because `separated_list1` yields at least one item.
    Ok((remaining, Vec1::try_from(addresses).unwrap()))
}

/// A single (unvalidated) mailbox, e.g., `"Doe, John" <john@example.com>`.
fn mailbox(input: &[u8]) -> IMFResult<&[u8], &[u8]> {
    recognize(many1(alt((quoted_string, angle_addr, is_not(",\"<")))))(input)
}

/// ```abnf
/// quoted-string = DQUOTE *(qtext / quoted-pair) DQUOTE
/// ```
fn quoted_string(input: &[u8]) -> IMFResult<&[u8], &[u8]> {
    recognize(tuple((
        char('"'),
        many0(alt((is_not("\\\""), recognize(pair(char('\\'), take(1usize)))))),
        char('"'),
    )))(input)
}

/// ```abnf
/// angle-addr = "<" addr-spec ">"
/// ```
fn angle_addr(input: &[u8]) -> IMFResult<&[u8], &[u8]> {
    recognize(tuple((char('<'), take_till(|byte| byte == b'>'), char('>'))))(input)
}
