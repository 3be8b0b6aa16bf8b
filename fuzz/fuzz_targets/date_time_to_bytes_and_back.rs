#![no_main]

use imf_codec::{DateTimeCodec, imf_types::datetime::DateTime};
use imf_codec_fuzz::impl_to_bytes_and_back;

impl_to_bytes_and_back!(DateTimeCodec, DateTime, b"");
