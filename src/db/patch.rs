//! Partial row updates shared by the admin save paths.

use async_trait::async_trait;
use fitsite_schema::{AccessPassSave, PersonalizationUpdate};
use sqlx::SqliteConnection;

use crate::error::SiteError;

/// Applies a patch to the database on an open connection or transaction.
/// Returns the number of rows changed.
#[async_trait]
pub trait DbPatchable {
    async fn apply_patch(&self, conn: &mut SqliteConnection) -> Result<u64, SiteError>;
}

#[derive(Debug, Clone, Default)]
pub struct AccessPassPatch {
    /// `None` => do not change; `Some(v)` => update
    pub title: Option<String>,
    pub price: Option<String>,
    pub duration: Option<String>,
    pub href: Option<String>,
    pub featured: Option<bool>,
    pub sort_order: Option<i64>,
}

impl From<&AccessPassSave> for AccessPassPatch {
    fn from(save: &AccessPassSave) -> Self {
        Self {
            title: save.title.clone(),
            price: save.price.clone(),
            duration: save.duration.clone(),
            href: save.href.clone(),
            featured: save.featured,
            sort_order: save.sort_order,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ContentPatch {
    Personalization {
        id: String,
        patch: PersonalizationUpdate,
    },
    AccessPass {
        id: String,
        patch: AccessPassPatch,
    },
}
