#![no_main]

use imf_codec::{
    AddressListCodec,
    imf_types::{address::EmailAddress, core::Vec1},
};
use imf_codec_fuzz::impl_to_bytes_and_back;

impl_to_bytes_and_back!(AddressListCodec, Vec1<EmailAddress>, b"");
