pub use crate::builder::CacheBuilder;
#[cfg(feature = "concurrency")]
pub use crate::cache::SharedLruCache;
pub use crate::cache::{BoundedLruCache, CacheInfo, DEFAULT_CAPACITY};
pub use crate::ds::RecencyList;
pub use crate::error::{ConfigError, InvariantError};
pub use crate::traits::{CoreCache, LruCache};
pub use crate::value::{EmptyValue, ShallowMerge};
