//! Performance benchmarks for column aggregation and the DFT

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::io::Cursor;
use wavedraw::analysis::statistics::aggregate_columns;
use wavedraw::{compute_dft, compute_dft_parallel, Metrics, OffsetWindow, DATA_START};

fn bench_aggregate_columns(c: &mut Criterion) {
    // 30 seconds of mono 16-bit sine at 44.1kHz, behind a blank 44-byte header
    let mut bytes = vec![0u8; DATA_START as usize];
    bytes.extend((0..44100 * 30).flat_map(|i| {
        let s = (i as f32 * 440.0 * 2.0 * std::f32::consts::PI / 44100.0).sin() * 16000.0;
        (s as i16).to_le_bytes()
    }));

    let width = 1200u64;
    let block_size = (bytes.len() as u64 - DATA_START) / 2 / width;
    let window = OffsetWindow {
        start_pos: DATA_START,
        end_pos: bytes.len() as u64,
        block_size,
        chunk_size: block_size * 2,
    };
    let metrics = Metrics::all();

    c.bench_function("aggregate_30s_1200_columns", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(black_box(&bytes));
            let _ = aggregate_columns(&mut cursor, 2, &window, width as usize, &metrics, None);
        });
    });
}

fn bench_dft(c: &mut Criterion) {
    let signal: Vec<f64> = (0..1024).map(|i| (i as f64 * 0.05).sin()).collect();

    c.bench_function("dft_1024", |b| {
        b.iter(|| compute_dft(black_box(&signal)));
    });
    c.bench_function("dft_parallel_1024", |b| {
        b.iter(|| compute_dft_parallel(black_box(&signal)));
    });
}

criterion_group!(benches, bench_aggregate_columns, bench_dft);
criterion_main!(benches);
