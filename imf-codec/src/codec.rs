pub mod decode;
pub mod encode;

/// Codec for date-times, i.e., the body of a `Date:` field.
#[derive(Debug, Default)]
// We use `#[non_exhaustive]` to prevent users from using struct literal syntax.
//
// This allows to add configuration options later.
#[non_exhaustive]
pub struct DateTimeCodec;

/// Codec for a single mailbox.
///
/// Only implements [`Encoder`](encode::Encoder). Use [`AddressListCodec`] for decoding.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct AddressCodec;

/// Codec for address lists, i.e., the body of a `To:` or `Cc:` field.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct AddressListCodec;

/// Codec for header fields.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct HeaderCodec;

/// Codec for message ids.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct MessageIdCodec;

/// Codec for message id lists, i.e., the body of a `References:` or `In-Reply-To:` field.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct MessageIdListCodec;

/// Codec for messages.
///
/// Only implements [`Encoder`](encode::Encoder). Message parsing is not supported.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct MessageCodec;

macro_rules! impl_codec_new {
    ($codec:ty) => {
        impl $codec {
            /// Create codec with default configuration.
            pub fn new() -> Self {
                Self::default()
            }
        }
    };
}

impl_codec_new!(DateTimeCodec);
impl_codec_new!(AddressCodec);
impl_codec_new!(AddressListCodec);
impl_codec_new!(HeaderCodec);
impl_codec_new!(MessageIdCodec);
impl_codec_new!(MessageIdListCodec);
impl_codec_new!(MessageCodec);
