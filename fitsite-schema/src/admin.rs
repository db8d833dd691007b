//! Admin save payloads.

use serde::{Deserialize, Serialize};

/// Partial update of a personalization feature; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PersonalizationUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_key: Option<String>,
}

/// A full membership plan as edited in the admin panel. Plans are upserted by `id`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MembershipPlanInput {
    pub id: String,
    pub plan_id: String,
    pub title: String,
    pub price: String,
    #[serde(default)]
    pub original_price: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

/// A membership feature line. A missing id, or a client placeholder id
/// starting with `new-`, means the feature has not been stored yet.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MembershipFeatureInput {
    #[serde(default)]
    pub id: Option<String>,
    pub feature_text: String,
}

impl MembershipFeatureInput {
    pub const PLACEHOLDER_PREFIX: &'static str = "new-";

    pub fn stored_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty() && !id.starts_with(Self::PLACEHOLDER_PREFIX))
    }
}

/// Whole membership section. Both lists are required: omitted features are
/// deleted, so a body without them is rejected rather than read as empty.
/// Features are stored in the submitted order.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MembershipSave {
    pub plans: Vec<MembershipPlanInput>,
    pub features: Vec<MembershipFeatureInput>,
}

/// Pass details plus its complete feature list, which replaces the stored one.
/// The list is required; an empty array clears the features.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AccessPassSave {
    pub title: Option<String>,
    pub price: Option<String>,
    pub duration: Option<String>,
    pub href: Option<String>,
    pub featured: Option<bool>,
    pub sort_order: Option<i64>,
    pub features: Vec<String>,
}
