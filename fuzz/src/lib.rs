/// Decode arbitrary input. Whatever decodes must encode and decode to the same value.
///
/// `$terminator` is appended to the encoding before decoding it again, e.g., the `\r\n` that
/// completes a streamed header field.
#[macro_export]
macro_rules! impl_decode_target {
    ($codec:ty, $terminator:expr) => {
        use libfuzzer_sys::fuzz_target;

        fuzz_target!(|input: &[u8]| {
            #[cfg(feature = "debug")]
            use imf_codec::imf_types::utils::escape_byte_string;
            use imf_codec::{decode::Decoder, encode::Encoder};

            #[cfg(feature = "debug")]
            println!("[!] Input: {}", escape_byte_string(input));

            if let Ok((_rem, parsed1)) = <$codec>::default().decode(input) {
                #[cfg(feature = "debug")]
                {
                    let input = &input[..input.len() - _rem.len()];
                    println!("[!] Consumed: {}", escape_byte_string(input));
                    println!("[!] Parsed1: {parsed1:?}");
                }

                let mut output = <$codec>::default().encode(&parsed1).dump();
                #[cfg(feature = "debug")]
                println!("[!] Serialized: {}", escape_byte_string(&output));
                output.extend_from_slice($terminator);

                let (rem, parsed2) = <$codec>::default().decode(&output).unwrap();
                #[cfg(feature = "debug")]
                println!("[!] Parsed2: {parsed2:?}");
                assert_eq!(rem, $terminator);

                assert_eq!(parsed1, parsed2);
            } else {
                #[cfg(feature = "debug")]
                println!("[!] <invalid>");
            }

            #[cfg(feature = "debug")]
            println!("\n\n\n");
        });
    };
}

/// Encode an arbitrary value. The encoding must decode to the same value.
#[macro_export]
macro_rules! impl_to_bytes_and_back {
    ($codec:ty, $object:ty, $terminator:expr) => {
        use libfuzzer_sys::fuzz_target;

        fuzz_target!(|input: $object| {
            #[cfg(feature = "debug")]
            use imf_codec::imf_types::utils::escape_byte_string;
            use imf_codec::{decode::Decoder, encode::Encoder};

            #[cfg(feature = "debug")]
            println!("[!] Input: {:?}", input);

            let mut buffer = <$codec>::default().encode(&input).dump();

            #[cfg(feature = "debug")]
            println!("[!] Serialized: {}", escape_byte_string(&buffer));
            buffer.extend_from_slice($terminator);

            let (rem, parsed) = <$codec>::default().decode(&buffer).unwrap();
            assert_eq!(rem, $terminator);

            #[cfg(feature = "debug")]
            println!("[!] Parsed: {parsed:?}");

            assert_eq!(input, parsed);

            #[cfg(feature = "debug")]
            println!("{}", str::repeat("-", 120));
        });
    };
}
