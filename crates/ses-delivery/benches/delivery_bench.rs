//! Criterion benchmarks for ses-delivery.
//!
//! - send (8 processes)
//! - in-order deliver (8 processes)
//! - reverse-order deliver of 100 messages, released by one drain
//! - matrix encode/decode (32 processes)

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use ses_clock::VectorClock;
use ses_delivery::{NoopHandler, SesEngine};

fn engine(n: usize, id: usize) -> SesEngine {
    SesEngine::new(n, id, Arc::new(NoopHandler)).unwrap()
}

fn bench_send(c: &mut Criterion) {
    let sender = engine(8, 0);
    let payload = [0u8; 64];

    c.bench_function("send_8_processes", |bench| {
        bench.iter(|| sender.send(black_box(3), &payload).unwrap());
    });
}

fn bench_deliver_in_order(c: &mut Criterion) {
    let sender = engine(8, 1);
    let receiver = engine(8, 0);
    let payload = [0u8; 64];

    c.bench_function("deliver_in_order_8_processes", |bench| {
        bench.iter_batched(
            || sender.send(0, &payload).unwrap(),
            |bytes| receiver.deliver(&bytes).unwrap(),
            BatchSize::SmallInput,
        );
    });
}

fn bench_drain_reverse_100(c: &mut Criterion) {
    let sender = engine(4, 1);
    let mut messages: Vec<Vec<u8>> = (0..100_u32)
        .map(|i| sender.send(0, &i.to_be_bytes()).unwrap())
        .collect();
    messages.reverse();

    c.bench_function("drain_reverse_order_100", |bench| {
        bench.iter_batched(
            || engine(4, 0),
            |receiver| {
                for bytes in &messages {
                    receiver.deliver(bytes).unwrap();
                }
                receiver
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_matrix_codec(c: &mut Criterion) {
    let mut matrix = VectorClock::new(32, 5).unwrap();
    for dest in 0..32 {
        matrix.increment();
        matrix.self_merge(5, dest).unwrap();
    }
    let bytes = matrix.encode(&[0u8; 256]);

    c.bench_function("matrix_encode_32_processes", |bench| {
        bench.iter(|| matrix.encode(black_box(&[0u8; 256])));
    });
    c.bench_function("matrix_decode_32_processes", |bench| {
        bench.iter(|| matrix.decode(black_box(&bytes)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_send,
    bench_deliver_in_order,
    bench_drain_reverse_100,
    bench_matrix_codec,
);
criterion_main!(benches);
