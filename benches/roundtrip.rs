use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use initext::{from_str, to_string, Document};

fn sample_config(sections: usize, properties: usize) -> String {
    let mut doc = Document::new();
    for s in 0..sections {
        let section = doc.section(&format!("section{s}"));
        section.set_comments([format!(" settings block {s}")]);
        for p in 0..properties {
            let property = section.property(&format!("key{p}"));
            property.set_string(&format!("value-{s}-{p}"));
            if p % 4 == 0 {
                property.set_comment(" tuned by hand");
            }
        }
    }
    to_string(&doc)
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [4, 16, 64].iter() {
        let text = sample_config(*size, 8);

        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");

    for size in [4, 16, 64].iter() {
        let doc = from_str(&sample_config(*size, 8)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| to_string(black_box(doc)))
        });
    }
    group.finish();
}

fn benchmark_crlf_input(c: &mut Criterion) {
    let lf = sample_config(16, 8);
    let crlf = lf.replace('\n', "\r\n");

    let mut group = c.benchmark_group("line_endings");

    group.bench_function("lf", |b| b.iter(|| from_str(black_box(&lf))));
    group.bench_function("crlf", |b| b.iter(|| from_str(black_box(&crlf))));

    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let text = sample_config(16, 8);

    c.bench_function("roundtrip", |b| {
        b.iter(|| {
            let doc = from_str(black_box(&text)).unwrap();
            to_string(black_box(&doc))
        })
    });
}

fn benchmark_lookup(c: &mut Criterion) {
    let mut doc = from_str(&sample_config(64, 8)).unwrap();

    c.bench_function("lookup_or_create_existing", |b| {
        b.iter(|| {
            doc.section(black_box("section32"))
                .property(black_box("key4"))
                .get_i32(0)
        })
    });
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_serialize,
    benchmark_crlf_input,
    benchmark_roundtrip,
    benchmark_lookup
);
criterion_main!(benches);
