//! Benchmarks for picker_values parsing, formatting and arithmetic.

use criterion::{Criterion, criterion_group, criterion_main};
use picker_values::calendar::CalendarSystem;
use picker_values::prelude::*;
use std::hint::black_box;

fn benchmark_parse(c: &mut Criterion) {
    let config = EngineConfig::builder().time_zone("America/New_York").build();

    c.bench_function("parse_iso_date", |b| {
        b.iter(|| black_box(parse(black_box("2024-03-20"), ValueKind::Date, &config)));
    });

    c.bench_function("parse_zoned", |b| {
        b.iter(|| {
            black_box(parse(
                black_box("2024-03-20T13:05:00-04:00[America/New_York]"),
                ValueKind::DateTime,
                &config,
            ))
        });
    });

    c.bench_function("parse_free_form", |b| {
        b.iter(|| black_box(parse(black_box("March 20, 2024 1:05 pm"), ValueKind::DateTime, &config)));
    });

    c.bench_function("parse_rejected", |b| {
        b.iter(|| black_box(parse(black_box("not a date at all"), ValueKind::Date, &config)));
    });
}

fn benchmark_format(c: &mut Criterion) {
    let value = DateValue::DateTime(CalendarDateTime::new(
        CalendarDate::gregorian(2024, 3, 20).unwrap(),
        Time::hms(13, 5, 0).unwrap(),
    ));
    let english = FormatOptions::new(ValueKind::DateTime);
    let hebrew = FormatOptions::new(ValueKind::DateTime).calendar(CalendarSystem::Hebrew);

    c.bench_function("format_gregorian", |b| {
        b.iter(|| black_box(format_value(black_box(&value), &english)));
    });

    c.bench_function("format_hebrew", |b| {
        b.iter(|| black_box(format_value(black_box(&value), &hebrew)));
    });
}

fn benchmark_calendars(c: &mut Criterion) {
    let date = CalendarDate::gregorian(2024, 3, 20).unwrap();

    for calendar in [CalendarSystem::Hebrew, CalendarSystem::Persian, CalendarSystem::Japanese] {
        c.bench_function(&format!("to_calendar_{}", calendar.identifier()), |b| {
            b.iter(|| black_box(black_box(date).to_calendar(calendar)));
        });
    }

    c.bench_function("add_months", |b| {
        let months = DateDuration::months(13);
        b.iter(|| black_box(black_box(date).add(&months)));
    });
}

fn benchmark_color_parse(c: &mut Criterion) {
    c.bench_function("color_parse_cached", |b| {
        b.iter(|| black_box(Color::parse(black_box("rgb(102 51 153 / 50%)"))));
    });

    c.bench_function("color_output_formats", |b| {
        let color = Color::from_rgba(102, 51, 153, 128);
        b.iter(|| {
            let color = black_box(color);
            black_box((color.hex_compact(), color.css_rgb_compact(), color.css_hsl_compact()))
        });
    });
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_format,
    benchmark_calendars,
    benchmark_color_parse
);
criterion_main!(benches);
