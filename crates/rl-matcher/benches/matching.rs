//! Matching throughput on large synthetic catalogs.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rl_core::{Catalog, CatalogEntry, CatalogKind, ContentHash, FileEntry, MatchStrategy};
use rl_matcher::{correspond_by_hash, match_catalogs};
use std::hint::black_box;

/// Builds a catalog of `files` files spread over 100 directories.
///
/// `prefix` changes every uri so the two sides of a benchmark look moved;
/// one in ten digests is salted so they also look edited.
fn make_catalog(files: usize, prefix: &str, salt: &str) -> Catalog {
    let entries = (0..files)
        .map(|i| {
            let name = format!("module_{i}.ts");
            let hash = if i % 10 == 0 {
                format!("{salt}{i:064x}")
            } else {
                format!("{i:064x}")
            };
            CatalogEntry {
                uri: format!("{prefix}/dir_{}/{name}", i % 100).into(),
                kind: CatalogKind::File(FileEntry::from_name(&name, ContentHash::new(hash), None)),
                name,
            }
        })
        .collect();
    Catalog::new(entries).unwrap()
}

fn bench_match_catalogs(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_catalogs");

    for files in [1_000, 10_000, 50_000] {
        let before = make_catalog(files, "src", "a");
        let after = make_catalog(files, "lib", "b");

        for strategy in [MatchStrategy::Hash, MatchStrategy::Filename, MatchStrategy::Both] {
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), files),
                &(&before, &after),
                |b, (before, after)| {
                    b.iter(|| match_catalogs(black_box(before), black_box(after), strategy));
                },
            );
        }
    }

    group.finish();
}

fn bench_correspond(c: &mut Criterion) {
    let before = make_catalog(10_000, "src", "a");
    let after = make_catalog(10_000, "lib", "b");

    c.bench_function("correspond_by_hash/10000", |b| {
        b.iter(|| correspond_by_hash(black_box(&before), black_box(&after)));
    });
}

criterion_group!(benches, bench_match_catalogs, bench_correspond);
criterion_main!(benches);
