#![no_main]

#[cfg(feature = "debug")]
use imf_codec::imf_types::utils::escape_byte_string;
use imf_codec::{
    HeaderCodec, MessageCodec,
    decode::{DecodeError, Decoder},
    encode::{Encoder, Fragment},
    imf_types::message::Message,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: Message| {
    #[cfg(feature = "debug")]
    println!("[!] Input: {input:?}");

    let fragments: Vec<_> = MessageCodec::default().encode(&input).collect();

    let (body, lines) = fragments.split_last().unwrap();
    assert_eq!(body, &Fragment::Body { data: input.body().to_vec() });

    let (blank, fields) = lines.split_last().unwrap();
    assert_eq!(blank, &Fragment::Line { data: b"\r\n".to_vec() });

    for field in fields {
        let Fragment::Line { data } = field else {
            panic!("expected a line, got {field:?}");
        };

        #[cfg(feature = "debug")]
        println!("[!] Field: {}", escape_byte_string(data));

        // Every field must decode on its own (terminated by the blank line).
        let mut buffer = data.clone();
        buffer.extend_from_slice(b"\r\n");

        match HeaderCodec::default().decode(&buffer) {
            Ok((rem, header)) => {
                assert_eq!(rem, b"\r\n");
                assert!(!header.name.is("Bcc"));
            }
            // Display names may be UTF-8, header values may not.
            Err(DecodeError::Invalid(_)) if !data.is_ascii() => {}
            Err(error) => panic!("{error:?}"),
        }
    }

    #[cfg(feature = "debug")]
    println!("{}", str::repeat("-", 120));
});
