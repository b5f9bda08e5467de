//! Benchmarks for robots.txt parsing and access decisions.
//!
//! Run with: cargo bench
//!
//! This benchmark suite measures:
//! - Parse throughput for growing robots.txt files
//! - Decision latency against wildcard-heavy rule sets
//! - Cached service decisions

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use robots_exclusion::{
    matcher, RobotExclusionConfig, RobotExclusionService, Robots, RobotsUrlResolver,
};
use std::sync::Arc;
use url::Url;

/// Generate a robots.txt with the given number of groups.
fn generate_robots(group_count: usize, rules_per_group: usize) -> String {
    let mut text = String::new();

    for g in 0..group_count {
        text.push_str(&format!("# group {}\nUser-agent: bot{}\n", g, g));
        for r in 0..rules_per_group {
            match r % 3 {
                0 => text.push_str(&format!("Disallow: /private{}/\n", r)),
                1 => text.push_str(&format!("Allow: /*/public{}/*.html$\n", r)),
                _ => text.push_str(&format!("Crawl-delay: {}\n", r)),
            }
        }
        text.push('\n');
    }

    text.push_str("User-agent: *\nDisallow: /admin/\nDisallow: /*.embed$\n");
    text
}

/// Benchmark parse throughput.
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10, 100, 1_000].iter() {
        let text = generate_robots(*size, 10);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::new("groups", size), &text, |b, text| {
            b.iter(|| black_box(Robots::parse(text.as_bytes()).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark access decisions.
fn bench_is_allowed(c: &mut Criterion) {
    let robots = Robots::parse(generate_robots(200, 12).as_bytes()).unwrap();
    let paths = [
        "/private3/page",
        "/a/b/public4/index.html",
        "/admin/settings",
        "/video/clip.embed",
        "/nothing/here",
    ];

    let mut group = c.benchmark_group("is_allowed");
    group.throughput(Throughput::Elements(paths.len() as u64));

    group.bench_function("specific_agent", |b| {
        b.iter(|| {
            for path in &paths {
                black_box(matcher::is_path_allowed(&robots, "bot150", path));
            }
        })
    });

    group.bench_function("wildcard_agent", |b| {
        b.iter(|| {
            for path in &paths {
                black_box(matcher::is_path_allowed(&robots, "unknownbot", path));
            }
        })
    });

    group.finish();
}

/// Benchmark cached service decisions.
fn bench_service(c: &mut Criterion) {
    let text = generate_robots(50, 9);
    let service = RobotExclusionService::new(
        RobotExclusionConfig::default(),
        Arc::new(RobotsUrlResolver),
        Arc::new(move |_: &Url| Robots::parse(text.as_bytes())),
    );
    service.start().unwrap();

    let urls: Vec<Url> = (0..10)
        .map(|i| Url::parse(&format!("http://host{}.example/private0/{}", i, i)).unwrap())
        .collect();

    let mut group = c.benchmark_group("service");
    group.throughput(Throughput::Elements(urls.len() as u64));

    group.bench_function("cached", |b| {
        b.iter(|| {
            for url in &urls {
                black_box(service.is_allowed("bot7", url));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_is_allowed, bench_service);

criterion_main!(benches);
