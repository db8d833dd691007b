use crate::CacheKey;

use ahash::AHasher;
use serde::Serialize;
use std::hash::Hasher;

const DOMAIN_QUERY: u8 = 1;

#[derive(Debug, Default, Clone, Copy)]
pub struct CacheKeyGenerator;

impl CacheKeyGenerator {
    /// Stable key for any serializable query description.
    /// Object field order does not affect the key.
    pub fn generate(query: &impl Serialize) -> Option<CacheKey> {
        let mut normalized = serde_json::to_value(query).ok()?;
        if normalized.is_null() {
            return None;
        }
        normalized.sort_all_objects();
        let bytes = serde_json::to_vec(&normalized).ok()?;

        let mut hasher = AHasher::default();
        hasher.write_u8(DOMAIN_QUERY);
        hasher.write(&bytes);
        Some(hasher.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_order_produces_same_key() {
        let lhs = json!({ "table": "membership_plans", "order": "sort_order", "ascending": true });
        let rhs = json!({ "ascending": true, "order": "sort_order", "table": "membership_plans" });

        assert_eq!(
            CacheKeyGenerator::generate(&lhs),
            CacheKeyGenerator::generate(&rhs)
        );
    }

    #[test]
    fn sort_direction_changes_key() {
        let asc = json!({ "table": "access_passes", "order": "sort_order", "ascending": true });
        let desc = json!({ "table": "access_passes", "order": "sort_order", "ascending": false });

        assert_ne!(
            CacheKeyGenerator::generate(&asc),
            CacheKeyGenerator::generate(&desc)
        );
    }

    #[test]
    fn null_has_no_key() {
        assert_eq!(CacheKeyGenerator::generate(&serde_json::Value::Null), None);
    }
}
