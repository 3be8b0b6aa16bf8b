#![no_main]

use imf_codec::DateTimeCodec;
use imf_codec_fuzz::impl_decode_target;

impl_decode_target!(DateTimeCodec, b"");
