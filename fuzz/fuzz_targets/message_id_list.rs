#![no_main]

use imf_codec::MessageIdListCodec;
use imf_codec_fuzz::impl_decode_target;

impl_decode_target!(MessageIdListCodec, b"");
