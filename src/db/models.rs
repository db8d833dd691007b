use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::table::Table;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct PersonalizationFeature {
    pub id: String,
    /// Stable slug (`strength`, `cardio`, ...).
    pub feature_id: String,
    pub title: String,
    pub description: String,
    pub image_key: Option<String>,
    pub icon_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct MembershipPlan {
    pub id: String,
    pub plan_id: String,
    pub title: String,
    pub price: String,
    pub original_price: Option<String>,
    pub duration: Option<String>,
    pub href: Option<String>,
    pub tag: Option<String>,
    pub sort_order: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct MembershipFeature {
    pub id: String,
    pub feature_text: String,
    pub sort_order: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct AccessPass {
    pub id: String,
    pub pass_id: String,
    pub title: String,
    pub price: String,
    pub duration: Option<String>,
    pub href: Option<String>,
    pub featured: Option<bool>,
    pub sort_order: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct PassFeature {
    pub id: String,
    /// References `access_passes.pass_id`.
    pub pass_id: String,
    pub feature_text: String,
    pub sort_order: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct SocialPost {
    pub id: String,
    pub platform: String,
    pub caption: String,
    /// Object key in the media bucket.
    pub media_key: String,
    pub likes: i64,
    pub comments: i64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PassWithFeatures {
    #[serde(flatten)]
    pub pass: AccessPass,
    pub features: Vec<PassFeature>,
}

impl PassWithFeatures {
    /// Attaches to every pass the features sharing its `pass_id`, keeping the
    /// incoming order of both lists.
    pub fn join(passes: Vec<AccessPass>, features: &[PassFeature]) -> Vec<Self> {
        passes
            .into_iter()
            .map(|pass| {
                let features = features
                    .iter()
                    .filter(|f| f.pass_id == pass.pass_id)
                    .cloned()
                    .collect();
                Self { pass, features }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MembershipSection {
    pub plans: Vec<MembershipPlan>,
    pub features: Vec<MembershipFeature>,
}

/// Rows of one table, as returned by a generic select.
/// Serializes as a plain JSON array of row objects.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum TableRows {
    PersonalizationFeatures(Vec<PersonalizationFeature>),
    MembershipPlans(Vec<MembershipPlan>),
    MembershipFeatures(Vec<MembershipFeature>),
    AccessPasses(Vec<AccessPass>),
    PassFeatures(Vec<PassFeature>),
    SocialPosts(Vec<SocialPost>),
}

impl TableRows {
    pub fn table(&self) -> Table {
        match self {
            TableRows::PersonalizationFeatures(_) => Table::PersonalizationFeatures,
            TableRows::MembershipPlans(_) => Table::MembershipPlans,
            TableRows::MembershipFeatures(_) => Table::MembershipFeatures,
            TableRows::AccessPasses(_) => Table::AccessPasses,
            TableRows::PassFeatures(_) => Table::PassFeatures,
            TableRows::SocialPosts(_) => Table::SocialPosts,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TableRows::PersonalizationFeatures(rows) => rows.len(),
            TableRows::MembershipPlans(rows) => rows.len(),
            TableRows::MembershipFeatures(rows) => rows.len(),
            TableRows::AccessPasses(rows) => rows.len(),
            TableRows::PassFeatures(rows) => rows.len(),
            TableRows::SocialPosts(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A row type with a backing table, so typed reads can go through the
/// generic select path (and its cache).
pub trait ContentRow: Clone + Send + Sync + 'static {
    const TABLE: Table;

    fn rows(rows: &TableRows) -> Option<&[Self]>;
}

macro_rules! content_row {
    ($row:ty, $variant:ident) => {
        impl ContentRow for $row {
            const TABLE: Table = Table::$variant;

            fn rows(rows: &TableRows) -> Option<&[Self]> {
                match rows {
                    TableRows::$variant(rows) => Some(rows.as_slice()),
                    _ => None,
                }
            }
        }
    };
}

content_row!(PersonalizationFeature, PersonalizationFeatures);
content_row!(MembershipPlan, MembershipPlans);
content_row!(MembershipFeature, MembershipFeatures);
content_row!(AccessPass, AccessPasses);
content_row!(PassFeature, PassFeatures);
content_row!(SocialPost, SocialPosts);

#[cfg(test)]
mod tests {
    use super::*;

    fn pass(pass_id: &str) -> AccessPass {
        AccessPass {
            id: format!("id-{pass_id}"),
            pass_id: pass_id.to_string(),
            title: pass_id.to_string(),
            price: "₹199".to_string(),
            duration: None,
            href: None,
            featured: None,
            sort_order: None,
        }
    }

    fn feature(pass_id: &str, text: &str, sort_order: i64) -> PassFeature {
        PassFeature {
            id: format!("{pass_id}-{sort_order}"),
            pass_id: pass_id.to_string(),
            feature_text: text.to_string(),
            sort_order: Some(sort_order),
        }
    }

    #[test]
    fn join_groups_features_by_pass_id() {
        let features = vec![
            feature("daily", "Locker Usage", 1),
            feature("weekly", "Priority Support", 1),
            feature("daily", "Cardio Zone Entry", 2),
        ];
        let joined = PassWithFeatures::join(vec![pass("daily"), pass("weekly"), pass("fortnight")], &features);

        assert_eq!(joined.len(), 3);
        let daily: Vec<_> = joined[0].features.iter().map(|f| f.feature_text.as_str()).collect();
        assert_eq!(daily, ["Locker Usage", "Cardio Zone Entry"]);
        assert_eq!(joined[1].features.len(), 1);
        assert!(joined[2].features.is_empty());
    }

    #[test]
    fn pass_with_features_serializes_flat() {
        let joined = PassWithFeatures::join(vec![pass("daily")], &[feature("daily", "Locker Usage", 1)]);
        let value = serde_json::to_value(&joined[0]).unwrap();
        assert_eq!(value["pass_id"], "daily");
        assert_eq!(value["features"][0]["feature_text"], "Locker Usage");
    }

    #[test]
    fn table_rows_serialize_as_plain_array() {
        let rows = TableRows::AccessPasses(vec![pass("daily")]);
        let value = serde_json::to_value(&rows).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["pass_id"], "daily");
        assert_eq!(AccessPass::rows(&rows).map(<[_]>::len), Some(1));
        assert!(SocialPost::rows(&rows).is_none());
    }
}
