use cachelite::policy::lru::LruCache;
use cachelite::traits::{CoreCache, LruCacheTrait};

fn main() {
    let mut cache: LruCache<String, u32> = LruCache::new(2);

    cache.put("alpha".to_string(), 1);
    cache.put("beta".to_string(), 2);

    if let Some(value) = cache.get(&"alpha".to_string()) {
        println!("hit alpha: {}", value);
    }

    cache.put("gamma".to_string(), 3);

    println!("contains beta? {}", cache.contains(&"beta".to_string()));
    println!("next victim: {:?}", cache.peek_lru().map(|(k, _)| k));
    println!("hit rate: {:.2}", cache.hit_rate());
}

// Expected output:
// hit alpha: 1
// contains beta? false
// next victim: Some("alpha")
// hit rate: 1.00
//
// Explanation: capacity=2; after get(alpha), beta is least recently used.
// Inserting gamma evicts beta, leaving alpha at the back.
