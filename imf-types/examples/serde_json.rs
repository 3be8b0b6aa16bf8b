use imf_types::{
    address::EmailAddress,
    core::Vec1,
    datetime::DateTime,
    header::{Header, HeaderValue},
    message::{Message, MessageId},
};
use serde_json;

fn main() {
    let address = EmailAddress::try_from("\"Doe, Jane\" <jane@example.com>").unwrap();
    println!(
        "{:?}\n{}",
        address,
        serde_json::to_string_pretty(&address).unwrap()
    );

    let message = Message::new(
        address,
        Vec1::from(EmailAddress::try_from("john@example.com").unwrap()),
        HeaderValue::try_from("Hello").unwrap(),
        DateTime::try_from("Fri, 01 Jan 2021 00:00:00 +0000").unwrap(),
        MessageId::try_from("<1@example.com>").unwrap(),
        &b"..."[..],
    )
    .with_header(Header::try_from("X-Priority: 1").unwrap())
    .unwrap();

    println!("{:?}\n{}", message, serde_json::to_string_pretty(&message).unwrap());
}
