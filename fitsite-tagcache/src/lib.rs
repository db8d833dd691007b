pub mod engine;
pub mod fingerprint;

pub use engine::{CacheKey, FetchTicket, TagCache, TagCacheError, TaggedEntry};
pub use fingerprint::CacheKeyGenerator;
