//! Selecting a policy at runtime.
//!
//! Run with: cargo run --example basic_builder

use cachelite::builder::{new_cache, CacheBuilder, CacheConfig, CachePolicy};
use cachelite::traits::CoreCache;

fn main() {
    println!("=== Same workload, three policies ===\n");

    // A, B, read A, then C into a cache of two
    for policy in CachePolicy::ALL {
        let mut cache = CacheBuilder::new(2).policy(policy).build::<&str, u32>();
        cache.put("A", 1);
        cache.put("B", 2);
        cache.get(&"A");
        cache.put("C", 3);
        println!(
            "{:>4}: A={} B={} C={}",
            policy,
            cache.contains(&"A"),
            cache.contains(&"B"),
            cache.contains(&"C")
        );
    }
    println!();

    // Lenient tags and signed capacities, e.g. from a request header
    let cache = new_cache::<&str, u32>(CachePolicy::from_tag("ARC"), -1);
    println!("tag ARC -> {} with capacity {}", cache.policy(), cache.capacity());

    // Strict parsing for configuration files
    match "mru".parse::<CachePolicy>() {
        Ok(policy) => println!("parsed {}", policy),
        Err(err) => println!("config error: {}", err),
    }

    let config = CacheConfig {
        capacity: 128,
        policy: CachePolicy::Fifo,
        ..CacheConfig::default()
    };
    match CacheBuilder::from_config(&config) {
        Ok(builder) => {
            let cache = builder.build::<u64, Vec<u8>>();
            println!("from config: {} x {}", cache.policy(), cache.capacity());
        },
        Err(err) => println!("invalid config: {}", err),
    }
}

// Expected output:
// === Same workload, three policies ===
//
//  lru: A=true B=false C=true
//  lfu: A=true B=false C=true
// fifo: A=false B=true C=true
//
// tag ARC -> lru with capacity 0
// config error: unknown cache policy `mru`
// from config: fifo x 128
