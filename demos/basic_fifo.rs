use cachelite::policy::fifo::FifoCache;
use cachelite::traits::{CoreCache, FifoCacheTrait};

fn main() {
    let mut cache: FifoCache<u32, &str> = FifoCache::new(3);

    cache.put(1, "one");
    cache.put(2, "two");
    cache.put(3, "three");

    // Reads do not change eviction order
    cache.get(&1);
    cache.get(&1);

    cache.put(4, "four");
    println!("contains 1? {}", cache.contains(&1));

    // Deleting leaves a stale queue slot, skipped on the next eviction
    cache.delete(&2);
    println!("len {} queue_len {}", cache.len(), cache.queue_len());

    println!("oldest: {:?}", cache.peek_oldest());
}

// Expected output:
// contains 1? false
// len 2 queue_len 3
// oldest: Some((3, "three"))
