//! Response shapes of the public pages and the admin overview.

use serde::Serialize;
use url::Url;

use crate::db::{
    MembershipSection, PassWithFeatures, PersonalizationFeature, SocialPost,
};
use crate::storage::object_url;

#[derive(Debug, Clone, Serialize)]
pub struct PersonalizationCard {
    #[serde(flatten)]
    pub feature: PersonalizationFeature,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl PersonalizationCard {
    pub fn new(feature: PersonalizationFeature, media_base: Option<&Url>) -> Self {
        let image_url = object_url(media_base, feature.image_key.as_deref());
        Self { feature, image_url }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialCard {
    #[serde(flatten)]
    pub post: SocialPost,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

impl SocialCard {
    pub fn new(post: SocialPost, media_base: Option<&Url>) -> Self {
        let media_url = object_url(media_base, Some(post.media_key.as_str()));
        Self { post, media_url }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub personalization: Vec<PersonalizationCard>,
    pub membership: MembershipSection,
    pub passes: Vec<PassWithFeatures>,
}

/// The admin overview has the home page's shape but is read past the cache.
pub type AdminContent = HomePage;
