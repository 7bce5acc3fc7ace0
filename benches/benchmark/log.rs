use crate::common::configure_criterion;
use criterion::{criterion_group, Criterion};
use errno_rail::log::{LogSink, Timestamp};
use errno_rail::{log_trace, Severity};
use std::hint::black_box;

pub fn bench_timestamp(c: &mut Criterion) {
    c.bench_function("log/timestamp_now", |b| b.iter(|| black_box(Timestamp::now())));
}

pub fn bench_closed_channel(c: &mut Criterion) {
    c.bench_function("log/closed_channel_write", |b| {
        b.iter(|| log_trace!("request {} done", black_box(42)))
    });
}

pub fn bench_file_write(c: &mut Criterion) {
    let Ok(dir) = tempfile::tempdir() else {
        return;
    };
    let mut sink = LogSink::new();
    sink.open(dir.path().join("bench.log"), true);

    c.bench_function("log/file_write", |b| {
        b.iter(|| sink.write(Severity::TRACE, format_args!("request {} done", black_box(42))))
    });

    sink.close();
}

criterion_group! {
    name = log_benches;
    config = configure_criterion();
    targets = bench_timestamp, bench_closed_channel, bench_file_write
}
