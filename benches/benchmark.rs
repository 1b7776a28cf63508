//! Benchmarks for cc_form performance testing.
//!
//! Run with: cargo bench

use cc_form::brand::BrandTable;
use cc_form::expiry::{FixedClock, YearMonth};
use cc_form::stream::{typing, DispatchExt};
use cc_form::validate::{validate, ValidationContext};
use cc_form::{detect, format, luhn, CardBrand, CardForm, FieldKind, FormConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

// Test card numbers
const VISA_16: &str = "4111111111111111";
const VISA_16_FORMATTED: &str = "4111 1111 1111 1111";
const MASTERCARD: &str = "5500000000000004";
const AMEX: &str = "378282246310005";
const DISCOVER_19: &str = "6011000000000000004";

const VISA_DIGITS: [u8; 16] = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];

fn clock() -> FixedClock {
    FixedClock(YearMonth::new(2025, 1).unwrap())
}

/// Benchmark as-you-type formatting
fn bench_formatting(c: &mut Criterion) {
    let table = BrandTable::default();
    let mut group = c.benchmark_group("formatting");

    group.bench_function("number_visa", |b| {
        b.iter(|| format::format_number(black_box(VISA_16), CardBrand::Visa, &table))
    });

    group.bench_function("number_amex", |b| {
        b.iter(|| format::format_number(black_box(AMEX), CardBrand::Amex, &table))
    });

    group.bench_function("expiry", |b| {
        b.iter(|| format::format_expiry(black_box("1229")))
    });

    group.finish();
}

/// Benchmark brand detection against the default table
fn bench_detection(c: &mut Criterion) {
    let table = BrandTable::default();
    let mut group = c.benchmark_group("detection");

    for (name, number) in [
        ("visa", VISA_16),
        ("mastercard", MASTERCARD),
        ("amex", AMEX),
        ("discover", DISCOVER_19),
        ("unknown", "9999999999999999"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), number, |b, number| {
            b.iter(|| detect::detect_brand_str(&table, black_box(number)))
        });
    }

    group.finish();
}

/// Benchmark Luhn algorithm
fn bench_luhn(c: &mut Criterion) {
    let mut group = c.benchmark_group("luhn");

    group.bench_function("validate_16", |b| {
        b.iter(|| luhn::validate(black_box(&VISA_DIGITS)))
    });

    group.bench_function("check_digit_15", |b| {
        b.iter(|| luhn::generate_check_digit(black_box(&VISA_DIGITS[..15])))
    });

    group.finish();
}

/// Benchmark per-field validation
fn bench_field_validation(c: &mut Criterion) {
    let config = FormConfig::default();
    let ctx = ValidationContext::new(&config, YearMonth::new(2025, 1).unwrap());
    let mut group = c.benchmark_group("field_validation");

    group.bench_function("number", |b| {
        b.iter(|| validate(FieldKind::Number, black_box(VISA_16_FORMATTED), CardBrand::Visa, &ctx))
    });

    group.bench_function("expiry", |b| {
        b.iter(|| validate(FieldKind::Expiry, black_box("12/29"), CardBrand::Visa, &ctx))
    });

    group.bench_function("cvc", |b| {
        b.iter(|| validate(FieldKind::Cvc, black_box("123"), CardBrand::Visa, &ctx))
    });

    group.finish();
}

/// Benchmark the full change pipeline while typing
fn bench_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("typing");

    for number in [VISA_16, AMEX, DISCOVER_19] {
        group.throughput(Throughput::Elements(number.len() as u64));
        group.bench_with_input(BenchmarkId::new("number", number.len()), number, |b, number| {
            b.iter(|| {
                let mut form = CardForm::new(FormConfig::default()).with_clock(clock());
                typing(FieldKind::Number, black_box(number)).replay(&mut form)
            })
        });
    }

    group.bench_function("single_change", |b| {
        let mut form = CardForm::new(FormConfig::default()).with_clock(clock());
        b.iter(|| form.on_field_change(FieldKind::Number, black_box(VISA_16)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_formatting,
    bench_detection,
    bench_luhn,
    bench_field_validation,
    bench_typing,
);

criterion_main!(benches);
