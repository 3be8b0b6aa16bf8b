//! # Internet Message Format codec
//!
//! imf-codec provides byte-exact serialization and parsing of [RFC 5322] elements.
//! It is based on [imf-types] and extends it with encoding and (streaming) decoding using [nom].
//!
//! The codecs are
//! [`HeaderCodec`] (header fields),
//! [`AddressCodec`] and [`AddressListCodec`] (mailboxes, e.g., in `From:` and `To:`),
//! [`MessageIdCodec`] and [`MessageIdListCodec`] (e.g., in `Message-ID:` and `References:`),
//! [`DateTimeCodec`] (the `Date:` field), and
//! [`MessageCodec`] (a complete message).
//!
//! ## Decoding
//!
//! Decoding is provided through the [`Decoder`](`crate::decode::Decoder`) trait.
//! Every decoder takes an input (`&[u8]`) and produces a remainder and a decoded value.
//! Validation is delegated to imf-types, so a decoded value is exactly as valid as one that was
//! constructed by hand.
//!
//! Please consult the [`decode`](`crate::decode`) module documentation to learn which decoders
//! are streaming.
//!
//! ### Example
//!
//! ```rust
//! use imf_codec::{decode::Decoder, AddressListCodec};
//!
//! let (remaining, addresses) = AddressListCodec::default()
//!     .decode(b"\"Doe, John\" <john@example.com>, jane@example.com")
//!     .unwrap();
//!
//! assert!(remaining.is_empty());
//! assert_eq!(addresses.len(), 2);
//! assert_eq!(addresses.first().display_name(), Some("Doe, John"));
//! ```
//!
//! ## Encoding
//!
//! Encoding is provided through the [`Encoder`](`crate::encode::Encoder`) trait.
//!
//! ### Example
//!
//! ```rust
//! use imf_codec::{encode::Encoder, imf_types::datetime::DateTime, DateTimeCodec};
//!
//! let date = DateTime::new(1_609_459_200, 3600).unwrap();
//!
//! let bytes = DateTimeCodec::default().encode(&date).dump();
//!
//! assert_eq!(bytes, &b"Fri, 01 Jan 2021 01:00:00 +0100"[..]);
//! ```
//!
//! ## Features
//!
//! imf-codec forwards features to imf-types. See [imf-types features] for a comprehensive list.
//!
//! In addition, imf-codec defines the following features:
//!
//! | Feature            | Description                            | Enabled by default |
//! |--------------------|----------------------------------------|--------------------|
//! | quirk_crlf_relaxed | Accept a bare `\n` where `\r\n` is due. | No                 |
//!
//! ## Quirks
//!
//! Features starting with `quirk_` are used to cope with existing interoperability issues.
//! Input that needed rectification is reported through the [log] crate (`warn` level).
//! imf-codec never violates RFC 5322 itself, i.e., encoders always emit `\r\n`.
//!
//! [imf-types]: https://docs.rs/imf-types/latest/imf_types
//! [imf-types features]: https://docs.rs/imf-types/latest/imf_types/#features
//! [log]: https://docs.rs/log
//! [RFC 5322]: https://datatracker.ietf.org/doc/html/rfc5322

#![forbid(unsafe_code)]
#![deny(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Test examples from repository root README.
#[doc = include_str!("../../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctestsRoot;

mod address;
mod codec;
mod datetime;
mod header;
mod message_id;
#[cfg(test)]
mod testing;

pub use codec::*;
// Re-export.
pub use imf_types;
