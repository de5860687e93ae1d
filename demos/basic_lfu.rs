use cachelite::policy::lfu::LfuCache;
use cachelite::traits::{CoreCache, LfuCacheTrait};

fn main() {
    let mut cache: LfuCache<&str, u32> = LfuCache::new(3);

    cache.put("a", 1);
    cache.put("b", 2);
    cache.put("c", 3);

    for _ in 0..3 {
        cache.get(&"a");
    }
    cache.get(&"b");

    for (key, freq) in cache.keys_by_frequency() {
        println!("{} -> freq {}", key, freq);
    }

    cache.put("d", 4);
    println!("contains c? {}", cache.contains(&"c"));
    println!("freq of d: {:?}", cache.frequency(&"d"));
}

// Expected output:
// a -> freq 4
// b -> freq 2
// c -> freq 1
// contains c? false
// freq of d: Some(1)
//
// Explanation: c was never read, so it has the lowest frequency and is
// evicted to make room for d.
