#![no_main]

use imf_codec::HeaderCodec;
use imf_codec_fuzz::impl_decode_target;

impl_decode_target!(HeaderCodec, b"\r\n");
