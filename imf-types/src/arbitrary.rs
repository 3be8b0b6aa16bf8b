use arbitrary::{Arbitrary, Unstructured};

use crate::{
    address::{EmailAddress, LocalPart},
    core::Vec1,
    datetime::DateTime,
    domain::Domain,
    header::{Header, HeaderName, HeaderValue},
    message::{Message, MessageId},
};

macro_rules! implement_tryfrom {
    ($target:ty, $from:ty) => {
        impl<'a> Arbitrary<'a> for $target {
            fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
                match <$target>::try_from(<$from>::arbitrary(u)?) {
                    Ok(passed) => Ok(passed),
                    Err(_) => Err(arbitrary::Error::IncorrectFormat),
                }
            }
        }
    };
}

implement_tryfrom! { Domain<'a>, &str }
implement_tryfrom! { LocalPart<'a>, &str }
implement_tryfrom! { EmailAddress<'a>, &str }
implement_tryfrom! { HeaderName<'a>, &str }
implement_tryfrom! { HeaderValue<'a>, &str }
implement_tryfrom! { MessageId<'a>, &str }

impl<'a, T> Arbitrary<'a> for Vec1<T>
where
    T: Arbitrary<'a>,
{
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        match Vec1::try_from(Vec::<T>::arbitrary(u)?) {
            Ok(passed) => Ok(passed),
            Err(_) => Err(arbitrary::Error::IncorrectFormat),
        }
    }
}

impl<'a> Arbitrary<'a> for Header<'a> {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Header::new(
            HeaderName::arbitrary(u)?,
            HeaderValue::arbitrary(u)?,
        ))
    }
}

impl<'a> Arbitrary<'a> for DateTime {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        // 1900-01-02T00:00:00Z ..= 9999-12-31T23:59:59Z, i.e., years >= 1900 at every offset.
        let timestamp = u.int_in_range(-2_208_902_400..=253_402_300_799)?;
        let offset = u.int_in_range(-1439..=1439)? * 60;

        DateTime::new(timestamp, offset).map_err(|_| arbitrary::Error::IncorrectFormat)
    }
}

impl<'a> Arbitrary<'a> for Message<'a> {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let mut message = Message::new(
            EmailAddress::arbitrary(u)?,
            Vec1::arbitrary(u)?,
            HeaderValue::arbitrary(u)?,
            DateTime::arbitrary(u)?,
            MessageId::arbitrary(u)?,
            <&[u8]>::arbitrary(u)?,
        )
        .with_cc(Vec::arbitrary(u)?)
        .with_bcc(Vec::arbitrary(u)?);

        if let Some(reply_to) = Option::<EmailAddress>::arbitrary(u)? {
            message = message.with_reply_to(reply_to);
        }

        for header in Vec::<Header>::arbitrary(u)? {
            message = message
                .with_header(header)
                .map_err(|_| arbitrary::Error::IncorrectFormat)?;
        }

        Ok(message)
    }
}
