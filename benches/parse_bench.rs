use chrono::Local;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use testdox_report::parser::parse;
use testdox_report::reporting::{ReportContext, render_markdown};

/// Group headers only allow letters, so the index is spelled with `a`..=`j`.
fn letters(n: usize) -> String {
    n.to_string()
        .bytes()
        .map(|d| char::from(b'a' + (d - b'0')))
        .collect()
}

/// Builds a large testdox log: many controllers with a mix of results.
fn synthetic_log(groups: usize, tests_per_group: usize) -> String {
    let mut log = String::from("PHPUnit 10.5.36 by Sebastian Bergmann and contributors.\n\n");
    for g in 0..groups {
        log.push_str(&format!("Module{} Controller (App\\Test\\TestCase\\Controller)\n", letters(g)));
        for t in 0..tests_per_group {
            let marker = if t % 3 == 0 { '✘' } else { '✔' };
            log.push_str(&format!(" {} Action number {}\n", marker, t));
            if t % 10 == 0 {
                log.push_str(&format!("Schema warning for Fixture{}: column has no length\n", g));
            }
        }
        log.push('\n');
    }
    let total = groups * tests_per_group;
    log.push_str(&format!(
        "Tests: {}, Assertions: {}, Errors: 0, Failures: {}.\n",
        total,
        total * 3,
        total / 3
    ));
    log
}

fn bench_parse(c: &mut Criterion) {
    let log = synthetic_log(200, 50);

    c.bench_function("parse_testdox_log", |b| {
        b.iter(|| parse(black_box(&log)));
    });
}

fn bench_render(c: &mut Criterion) {
    let summary = parse(&synthetic_log(200, 50));
    let ctx = ReportContext::new("Bench Report", Local::now());

    c.bench_function("render_markdown_report", |b| {
        b.iter(|| render_markdown(black_box(&summary), &ctx));
    });
}

criterion_group!(benches, bench_parse, bench_render);
criterion_main!(benches);
