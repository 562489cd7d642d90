use std::collections::BTreeMap;

use memokit::cache::SharedLruCache;

fn main() {
    let cache: SharedLruCache<String, BTreeMap<String, u32>> = SharedLruCache::new(4);

    let writer = cache.clone();
    let handle = std::thread::spawn(move || {
        writer.insert(
            "job-1".to_string(),
            BTreeMap::from([("rows".to_string(), 10)]),
        );
        writer.merge_insert(
            "job-1".to_string(),
            BTreeMap::from([("cols".to_string(), 4)]),
        );
    });
    handle.join().unwrap();

    if let Some(result) = cache.get(&"job-1".to_string()) {
        println!("job-1: {:?}", result);
    }
    println!("entries: {}", cache.len());
}

// Expected output:
// job-1: {"cols": 4, "rows": 10}
// entries: 1
