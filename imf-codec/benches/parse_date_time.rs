use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use imf_codec::{DateTimeCodec, HeaderCodec, decode::Decoder};

fn criterion_benchmark(c: &mut Criterion) {
    let input = b"Fri, 01 Jan 2021 01:00:00 +0100 (CET)";

    c.bench_function("parse_date_time", |b| {
        b.iter(|| {
            let _ = DateTimeCodec::default().decode(black_box(input)).unwrap();
        })
    });

    // The same value as it arrives on the wire, i.e., as a folded header field.
    let input = b"Date: Fri, 01 Jan 2021\r\n 01:00:00 +0100 (CET)\r\n\r\n";

    c.bench_function("parse_date_header", |b| {
        b.iter(|| {
            let (_, header) = HeaderCodec::default().decode(black_box(input)).unwrap();
            let _ = DateTimeCodec::default()
                .decode(header.value.inner().as_bytes())
                .unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);

criterion_main!(benches);
