#![no_main]

use imf_codec::{HeaderCodec, imf_types::header::Header};
use imf_codec_fuzz::impl_to_bytes_and_back;

impl_to_bytes_and_back!(HeaderCodec, Header, b"\r\n");
