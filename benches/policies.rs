//! Per-policy throughput benchmarks.
//!
//! Every policy is driven through the same workloads so the numbers compare
//! directly: pure hits, pure eviction churn, and a skewed mix where hot keys
//! dominate.

use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use cachelite::builder::{new_cache, CachePolicy, PolicyCache};
use cachelite::policy::lfu::LfuCache;
use cachelite::traits::{CoreCache, LfuCacheTrait};

const CAPACITY: usize = 1024;
const OPS: u64 = 10_000;

fn warm(policy: CachePolicy) -> PolicyCache<u64, u64> {
    let mut cache = new_cache(policy, CAPACITY as i64);
    for i in 0..CAPACITY as u64 {
        cache.put(i, i);
    }
    cache
}

/// Keys drawn so that roughly 80% of accesses hit 20% of a keyspace twice
/// the capacity.
fn skewed_keys(seed: u64, n: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let hot = (CAPACITY as u64 * 2) / 5;
    (0..n)
        .map(|_| {
            if rng.gen_bool(0.8) {
                rng.gen_range(0..hot)
            } else {
                rng.gen_range(hot..CAPACITY as u64 * 2)
            }
        })
        .collect()
}

// =============================================================================
// Hits
// =============================================================================

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hit");
    group.throughput(Throughput::Elements(OPS));

    for policy in CachePolicy::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(policy), &policy, |b, &policy| {
            let mut cache = warm(policy);
            b.iter(|| {
                for i in 0..OPS {
                    black_box(cache.get(&(i % CAPACITY as u64)));
                }
            })
        });
    }
    group.finish();
}

// =============================================================================
// Eviction churn
// =============================================================================

fn bench_insert_evict(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_evict");
    group.throughput(Throughput::Elements(OPS));

    for policy in CachePolicy::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(policy), &policy, |b, &policy| {
            b.iter_batched(
                || warm(policy),
                |mut cache| {
                    for i in 0..OPS {
                        cache.put(black_box(i + CAPACITY as u64), i);
                    }
                    cache
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

// =============================================================================
// Skewed workload
// =============================================================================

fn bench_skewed_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("skewed_mix");
    group.throughput(Throughput::Elements(OPS));
    let keys = skewed_keys(42, OPS);

    for policy in CachePolicy::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(policy), &policy, |b, &policy| {
            b.iter_batched(
                || new_cache::<u64, u64>(policy, CAPACITY as i64),
                |mut cache| {
                    for &key in &keys {
                        if cache.get(&key).is_none() {
                            cache.put(key, key);
                        }
                    }
                    cache.hit_rate()
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

// =============================================================================
// LFU promotion distance
// =============================================================================

fn bench_lfu_promotion(c: &mut Criterion) {
    c.bench_function("lfu_pop_lfu", |b| {
        b.iter_batched(
            || {
                let mut cache = LfuCache::new(CAPACITY);
                for i in 0..CAPACITY as u64 {
                    cache.put(i, i);
                }
                for i in 0..CAPACITY as u64 {
                    for _ in 0..(i % 8) {
                        cache.get(&i);
                    }
                }
                cache
            },
            |mut cache| {
                while let Some(entry) = cache.pop_lfu() {
                    black_box(entry);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(hits, bench_get_hit);
criterion_group!(churn, bench_insert_evict, bench_lfu_promotion);
criterion_group!(workloads, bench_skewed_mix);
criterion_main!(hits, churn, workloads);
