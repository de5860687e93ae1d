//! Sharing one cache between threads.
//!
//! Run with: cargo run --example thread_safe

use std::sync::Arc;
use std::thread;

use cachelite::builder::{new_thread_safe_cache, CachePolicy};

fn main() {
    let cache = Arc::new(new_thread_safe_cache::<u64, String>(CachePolicy::Lru, 100));

    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..1_000u64 {
                    let key = (t * 37 + i) % 150;
                    if cache.get(&key).is_none() {
                        cache.put(key, format!("value-{}", key));
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            eprintln!("worker panicked");
        }
    }

    println!("len {} / capacity {}", cache.len(), cache.capacity());
    println!("hit rate {:.2}", cache.hit_rate());
    println!("consistent: {}", cache.check_invariants().is_ok());
}
