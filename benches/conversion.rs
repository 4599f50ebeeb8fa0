// Criterion benchmarks for check digits, conversion, validation and
// candidate scanning.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use boleto_extractor::{
    barcode_to_linha_digitavel, find_candidates, linha_digitavel_to_barcode, modulo10, modulo11,
    validate, BoletoExtractor,
};

const BARCODE: &str = "19797116900000386000000004572849356277103564";
const LINHA: &str = "19790000050457284935662771035649711690000038600";

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_check_digits(c: &mut Criterion) {
    let mut group = c.benchmark_group("check_digits");
    group.bench_function("modulo10 (10 digits)", |b| {
        b.iter(|| modulo10(black_box("0457284935")))
    });
    group.bench_function("modulo11 (43 digits)", |b| {
        b.iter(|| modulo11(black_box("1979116900000386000000004572849356277103564")))
    });
    group.finish();
}

fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");
    group.bench_function("barcode_to_linha", |b| {
        b.iter(|| barcode_to_linha_digitavel(black_box(BARCODE)))
    });
    group.bench_function("linha_to_barcode", |b| {
        b.iter(|| linha_digitavel_to_barcode(black_box(LINHA)))
    });
    group.bench_function("validate (47 digits)", |b| b.iter(|| validate(black_box(LINHA))));
    group.finish();
}

/// A page of statement-like text with one typed line near the end
fn bench_scanning(c: &mut Criterion) {
    let mut text = String::new();
    for i in 0..200 {
        text.push_str(&format!(
            "Item {} - NF 12345-{} valor R$ {},00 em 01/02/2024\n",
            i,
            i,
            i * 7
        ));
    }
    text.push_str("Linha digitável: 19790.00005 04572.849356 62771.035649 7 11690000038600\n");

    let mut group = c.benchmark_group("scanning");
    group.bench_function("find_candidates (page)", |b| {
        b.iter(|| black_box(find_candidates(black_box(&text)).count()))
    });

    let extractor = BoletoExtractor::new();
    group.bench_function("extract_from_text (page)", |b| {
        b.iter(|| black_box(extractor.extract_from_text(black_box(&text))))
    });
    group.finish();
}

criterion_group!(benches, bench_check_digits, bench_conversion, bench_scanning);
criterion_main!(benches);
