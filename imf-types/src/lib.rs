//! # Misuse-resistant Internet Message Format types
//!
//! imf-types provides the building blocks of an email message as described in [RFC 5322], i.e.,
//! [`EmailAddress`](address::EmailAddress), [`DateTime`](datetime::DateTime),
//! [`Header`](header::Header), [`MessageId`](message::MessageId), and finally the
//! [`Message`](message::Message) that ties them together.
//! What all types have in common is, that the API does not allow the creation of invalid ones.
//!
//! For example, the local-part of an address can't contain `..` unless it is a quoted-string.
//! Thus, imf-types encapsulates it in a [`LocalPart`](address::LocalPart) that can only be
//! constructed through validation.
//!
//! ## Construction
//!
//! imf-types relies a lot on the standard conversion traits, i.e., [`From`], [`TryFrom`],
//! [`Into`], and [`TryInto`].
//! Every type accepts bytes (`&[u8]`, `Vec<u8>`) as well as strings (`&str`, `String`), and every
//! type exposes its rules through a `verify` function.
//!
//! Note: When you are *sure* that the thing you want to create is valid, you can unlock various
//! `unvalidated(...)` functions through the `unvalidated` feature.
//! This allows us to bypass certain checks in release builds.
//!
//! ### Example
//!
//! ```
//! use imf_types::{
//!     address::EmailAddress,
//!     core::Vec1,
//!     datetime::DateTime,
//!     header::{Header, HeaderValue},
//!     message::{Message, MessageId},
//! };
//!
//! let message = Message::new(
//!     EmailAddress::try_from("Alice <alice@example.com>").unwrap(),
//!     Vec1::from(EmailAddress::try_from("bob@example.com").unwrap()),
//!     HeaderValue::try_from("Lunch?").unwrap(),
//!     DateTime::try_from("Fri, 01 Jan 2021 12:00:00 +0100").unwrap(),
//!     MessageId::try_from("<1234@example.com>").unwrap(),
//!     &b"How about noon?"[..],
//! )
//! .with_header(Header::try_from("X-Priority: 1").unwrap())
//! .unwrap();
//!
//! assert_eq!(message.from().display_name(), Some("Alice"));
//! ```
//!
//! Serialization lives in imf-codec.
//!
//! # Features
//!
//! | Feature      | Description                                                    | Enabled by default |
//! |--------------|----------------------------------------------------------------|--------------------|
//! | arbitrary    | Derive `Arbitrary` implementations.                            | No                 |
//! | id_generator | Generate random message ids (`MessageId::generate`).           | No                 |
//! | serde        | Derive `serde`s `Serialize` and `Deserialize` implementations. | No                 |
//! | unvalidated  | Unlock `unvalidated` constructors.                             | No                 |
//!
//! When using `arbitrary`, all types defined in imf-types implement the [Arbitrary] trait to ease
//! testing. This is used, for example, to generate instances during fuzz-testing.
//! When the `serde` feature is used, all types implement [Serde](https://serde.rs/)'s `Serialize`
//! and `Deserialize` traits. (Try running `cargo run --example serde_json --features serde`.)
//! Deserialization goes through the same validation as `TryFrom`, e.g., a deserialized `Message`
//! can't carry an additional `Bcc` header.
//!
//! [Arbitrary]: https://docs.rs/arbitrary/latest/arbitrary/trait.Arbitrary.html
//! [RFC 5322]: https://datatracker.ietf.org/doc/html/rfc5322

#![forbid(unsafe_code)]
#![deny(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod address;
#[cfg(feature = "arbitrary")]
mod arbitrary;
pub mod calendar;
pub mod core;
pub mod datetime;
pub mod domain;
pub mod header;
pub mod message;
pub mod utils;
