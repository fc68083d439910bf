// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for localization.
//!
//! Measures the performance of:
//! - Building the embedded message catalog
//! - Rendering a message with named placeholders
//! - Rendering through the fallback locale

use abx_tester::i18n::{Args, Catalog, I18n};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn bench_catalog_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("localization");

    group.bench_function("catalog_build", |b| {
        b.iter(|| {
            let catalog = Catalog::build().unwrap();
            black_box(&catalog);
        });
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("localization");

    let english = I18n::with_locale("en".into()).unwrap();
    let unsupported = I18n::with_locale("fr".into()).unwrap();

    group.bench_function("render_score", |b| {
        b.iter(|| {
            let args = Args::new().with("score", 7).with("maxTrial", 10);
            black_box(english.tr_with(black_box("score"), &args));
        });
    });

    group.bench_function("render_via_fallback", |b| {
        b.iter(|| {
            black_box(unsupported.tr(black_box("backHome")));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_catalog_build, bench_render);
criterion_main!(benches);
