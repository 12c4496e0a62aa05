//! Benchmarks for pipeline execution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gluify::gluify;

fn pipeline_benchmark(c: &mut Criterion) {
    c.bench_function("sync_run_three_transforms", |b| {
        let pipeline = gluify(|| 1_i64).pipe(|x| x * 2).pipe(|x| x + 10).pipe(|x| x - 3);
        b.iter(|| black_box(pipeline.run().unwrap()));
    });

    c.bench_function("sync_run_recovered_failure", |b| {
        let pipeline = gluify(|| 1_i64)
            .pipe_try(|_| Err::<i64, _>(anyhow::anyhow!("boom")))
            .or(7);
        b.iter(|| black_box(pipeline.run().unwrap()));
    });

    c.bench_function("build_ten_steps", |b| {
        b.iter(|| {
            let mut pipeline = gluify(|| 0_i64);
            for _ in 0..10 {
                pipeline = pipeline.pipe(|x| x + 1);
            }
            black_box(pipeline.step_count())
        });
    });
}

criterion_group!(benches, pipeline_benchmark);
criterion_main!(benches);
