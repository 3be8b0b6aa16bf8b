use std::fmt::Debug;

use imf_types::{
    address::EmailAddress,
    core::Vec1,
    datetime::DateTime,
    header::Header,
    message::MessageId,
    utils::escape_byte_string,
};

use crate::{
    AddressListCodec, DateTimeCodec, HeaderCodec, MessageIdCodec, MessageIdListCodec,
    decode::{Decoder, IMFResult},
    encode::{EncodeContext, EncodeIntoContext, Encoder},
};

pub(crate) fn known_answer_test_encode(
    (test_object, expected_bytes): (impl EncodeIntoContext, impl AsRef<[u8]>),
) {
    let expected_bytes = expected_bytes.as_ref();
    let mut ctx = EncodeContext::new();
    test_object.encode_ctx(&mut ctx).unwrap();
    let got_bytes = ctx.dump();
    let got_bytes = got_bytes.as_slice();

    if expected_bytes != got_bytes {
        println!("# Debug (`escape_byte_string`, encapsulated by `<<<` and `>>>`)");
        println!(
            "Left:  <<<{}>>>\nRight: <<<{}>>>",
            escape_byte_string(expected_bytes),
            escape_byte_string(got_bytes),
        );
        println!("# Debug");
        panic!("Left:  {:02x?}\nRight: {:02x?}", expected_bytes, got_bytes);
    }
}

pub(crate) fn known_answer_test_parse<'a, O, P>(
    (test, expected_remainder, expected_object): (&'a [u8], &[u8], O),
    parser: P,
) where
    O: Debug + Eq + 'a,
    P: Fn(&'a [u8]) -> IMFResult<&'a [u8], O>,
{
    let (got_remainder, got_object) = parser(test).unwrap();
    assert_eq!(expected_remainder, got_remainder);
    assert_eq!(expected_object, got_object);
}

// Decode, compare, encode, and decode again.
//
// `$terminator` is appended before decoding the encoded output. Header fields are streaming and
// only complete when the next line does not start with whitespace.
macro_rules! impl_kat_inverse {
    ($fn_name:ident, $codec:ident, $item:ty, $terminator:expr) => {
        pub(crate) fn $fn_name(tests: &[(&[u8], &[u8], $item)]) {
            for (no, (test_input, expected_remainder, expected_object)) in tests.iter().enumerate()
            {
                println!("# {no}");

                let (got_remainder, got_object) = $codec::default().decode(test_input).unwrap();
                assert_eq!(*expected_object, got_object);
                assert_eq!(*expected_remainder, got_remainder);

                let mut got_output = $codec::default().encode(&got_object).dump();
                println!("{}", escape_byte_string(&got_output));
                got_output.extend_from_slice($terminator);

                let (got_remainder, got_object_again) =
                    $codec::default().decode(&got_output).unwrap();
                assert_eq!(got_object, got_object_again);
                assert_eq!(got_remainder, $terminator);
            }
        }
    };
}

impl_kat_inverse! {kat_inverse_header, HeaderCodec, Header, b"\r\n"}
impl_kat_inverse! {kat_inverse_address_list, AddressListCodec, Vec1<EmailAddress>, b""}
impl_kat_inverse! {kat_inverse_message_id, MessageIdCodec, MessageId, b""}
impl_kat_inverse! {kat_inverse_message_id_list, MessageIdListCodec, Vec1<MessageId>, b""}
impl_kat_inverse! {kat_inverse_date_time, DateTimeCodec, DateTime, b""}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic]
    fn test_known_answer_test_encode() {
        known_answer_test_encode((MessageId::try_from("a@b").unwrap(), b"a@b"));
    }
}
