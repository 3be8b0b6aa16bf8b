#![no_main]

use imf_codec::AddressListCodec;
use imf_codec_fuzz::impl_decode_target;

impl_decode_target!(AddressListCodec, b"");
