//! Performance benchmarks for kc-inspections.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - Synthetic results pages of increasing size
//! - A cached real results page, if one is present at `results.html`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kc_inspections::source::Document;
use kc_inspections::{dom, extract_records, record, Options};

fn results_page(listings: usize) -> String {
    let mut html = String::from("<html><body><div id=\"container\">");
    for i in 0..listings {
        html.push_str(&format!(
            r#"<div id="PR{i:07}~"><table><tbody>
                <tr><td>Business Name:</td><td>CAFE {i}</td></tr>
                <tr><td>Address:</td><td>{i} NE 45TH ST</td></tr>
                <tr><td></td><td>Seattle, WA 98105</td></tr>
                <tr><td>Phone:</td><td>(206) 555-0100</td></tr>
                <tr><td colspan="2"><table><tbody>
                    <tr><td>Inspection Information</td><td>Date</td><td>Score</td><td>Result</td></tr>
                    <tr><td>Routine Inspection/Field Review</td><td>01/14/2014</td><td>10</td><td>Unsatisfactory</td></tr>
                    <tr><td>Return Inspection</td><td>01/28/2014</td><td>0</td><td>Satisfactory</td></tr>
                    <tr><td>Consultation/Education - Field</td><td>03/02/2014</td><td></td><td>Complete</td></tr>
                </tbody></table></td></tr>
            </tbody></table></div>"#
        ));
    }
    html.push_str("</div></body></html>");
    html
}

fn bench_extract_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_records");
    let options = Options::default();

    for listings in [1usize, 50, 500] {
        let html = results_page(listings);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(listings), &html, |b, html| {
            b.iter(|| extract_records(black_box(html), black_box(&options)));
        });
    }

    group.finish();
}

/// Per-record work once the tree exists; parse cost excluded.
fn bench_assemble_first_five(c: &mut Criterion) {
    let html = results_page(500);
    let document = dom::parse(&html);

    c.bench_function("assemble_first_five", |b| {
        b.iter(|| record::assemble(black_box(&document)).take(5).count());
    });
}

/// Benchmark with a cached results page saved by `inspections --save`
fn bench_cached_page(c: &mut Criterion) {
    let Ok(document) = Document::load("results.html") else {
        return;
    };
    let html = document.decode();
    let options = Options::default();

    let mut group = c.benchmark_group("cached");
    group.throughput(Throughput::Bytes(html.len() as u64));
    group.bench_function("results.html", |b| {
        b.iter(|| extract_records(black_box(&html), black_box(&options)));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_extract_records,
    bench_assemble_first_five,
    bench_cached_page
);
criterion_main!(benches);
