use memokit::cache::BoundedLruCache;
use memokit::traits::CoreCache;

fn main() {
    let mut cache: BoundedLruCache<u32, String> = BoundedLruCache::new(2);

    cache.insert(1, "alpha".to_string());
    cache.insert(2, "beta".to_string());

    if let Some(value) = cache.get(&1) {
        println!("hit 1: {}", value.as_str());
    }

    cache.insert(3, "gamma".to_string());

    println!("contains 2? {}", cache.contains(&2));
    println!("info: {:?}", cache.info());
}

// Expected output:
// hit 1: alpha
// contains 2? false
// info: CacheInfo { capacity: 2, len: 2 }
//
// Explanation: capacity=2; after get(&1), key 1 is MRU and key 2 is LRU.
// Inserting key 3 evicts key 2, so contains(2) is false.
