//! Performance benchmarks for response decoding
//!
//! Measures reframing and parsing throughput for bodies of different
//! artifact counts, delivered in network-sized chunks.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use meshcast::adapters::mock::{artifact_record, log_record};
use meshcast::stream::{parse_record, ChunkDecoder};

/// Chunk size typical of a streamed HTTP body.
const CHUNK_SIZE: usize = 8 * 1024;

/// Generate a response body with `artifacts` artifacts of `payload_len` bytes
fn generate_body(artifacts: usize, payload_len: usize) -> Vec<u8> {
    let payload = vec![b's'; payload_len];
    let mut body = String::new();
    for i in 0..artifacts {
        body.push_str(&log_record(&format!("[part] building {}", i)));
        body.push('\n');
        body.push_str(&artifact_record(&format!("part{}.stl", i), &payload));
        body.push('\n');
    }
    body.into_bytes()
}

/// Benchmark reframing only
fn bench_decoder_reframe(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoder_reframe");

    for artifacts in [1, 10, 50].iter() {
        let body = generate_body(*artifacts, 64 * 1024);
        group.throughput(Throughput::Bytes(body.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(artifacts), &body, |b, body| {
            b.iter(|| {
                let mut decoder = ChunkDecoder::new();
                let mut records = 0;
                for chunk in body.chunks(CHUNK_SIZE) {
                    records += decoder.feed(black_box(chunk)).count();
                }
                black_box(records)
            });
        });
    }

    group.finish();
}

/// Benchmark reframing plus parsing and payload decoding
fn bench_decode_and_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_and_parse");

    for artifacts in [1, 10, 50].iter() {
        let body = generate_body(*artifacts, 64 * 1024);
        group.throughput(Throughput::Bytes(body.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(artifacts), &body, |b, body| {
            b.iter(|| {
                let mut decoder = ChunkDecoder::new();
                let mut bytes = 0;
                for chunk in body.chunks(CHUNK_SIZE) {
                    for record in decoder.feed(chunk).flatten() {
                        if let Ok(meshcast::stream::ProtocolMessage::Artifact(msg)) =
                            parse_record(&record)
                        {
                            bytes += msg.decode_payload().map(|p| p.len()).unwrap_or(0);
                        }
                    }
                }
                black_box(bytes)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decoder_reframe, bench_decode_and_parse);
criterion_main!(benches);
