use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use payqr::{
    EncodeParams, PaymentFormInput, RenderOptions, UriConfig, build_uri, rasterize, sanitize_name,
};
use std::hint::black_box;

fn sample_input(note_len: usize) -> PaymentFormInput {
    PaymentFormInput::new("  Corner.Cafe@Bank ", "Café Crème & Co. (Main St.)")
        .with_amount("1249.995")
        .with_note("Table 12, espresso x2 ".repeat(note_len / 22 + 1))
}

/// Full build for notes of increasing length (truncated at 100 chars)
fn bench_build_uri(c: &mut Criterion) {
    let cfg = UriConfig::default();
    let mut group = c.benchmark_group("build_uri");

    for note_len in [0, 50, 100, 1000] {
        let input = sample_input(note_len);
        group.throughput(Throughput::Bytes(note_len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(note_len), &input, |b, input| {
            b.iter(|| build_uri(black_box(input), black_box(&cfg)).expect("uri should build"));
        });
    }

    group.finish();
}

fn bench_sanitize(c: &mut Criterion) {
    let raw = "  Zoë's Büro — Café & Bäckerei!!  ".repeat(4);
    c.bench_function("sanitize_name", |b| {
        b.iter(|| sanitize_name(black_box(&raw), 50));
    });
}

/// Rasterization at the sizes a preview and a print download use
fn bench_rasterize(c: &mut Criterion) {
    let uri = build_uri(&sample_input(50), &UriConfig::default()).expect("uri should build");
    let mut group = c.benchmark_group("rasterize");
    group.sample_size(20);

    for size in [256u32, 1024] {
        let params = EncodeParams::from_options(&RenderOptions::default().with_size(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &params, |b, params| {
            b.iter(|| rasterize(black_box(uri.as_str()), black_box(params)).expect("rasterize"));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build_uri, bench_sanitize, bench_rasterize);
criterion_main!(benches);
