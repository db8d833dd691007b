//! ContentPatch -> DbPatchable implementation.
//!
//! This sits in the `db` module because it contains SQL/table knowledge.

use async_trait::async_trait;
use fitsite_schema::PersonalizationUpdate;
use sqlx::SqliteConnection;
use tracing::debug;

use super::patch::{AccessPassPatch, ContentPatch, DbPatchable};
use crate::error::SiteError;

#[async_trait]
impl DbPatchable for ContentPatch {
    async fn apply_patch(&self, conn: &mut SqliteConnection) -> Result<u64, SiteError> {
        match self {
            ContentPatch::Personalization { id, patch } => {
                let PersonalizationUpdate {
                    title,
                    description,
                    image_key,
                } = patch;

                let res = sqlx::query(
                    r#"
                    UPDATE personalization_features
                    SET
                        title = COALESCE(?, title),
                        description = COALESCE(?, description),
                        image_key = COALESCE(?, image_key)
                    WHERE id = ?
                    "#,
                )
                .bind(title)
                .bind(description)
                .bind(image_key)
                .bind(id)
                .execute(&mut *conn)
                .await?;

                let affected = res.rows_affected();
                debug!(
                    table = "personalization_features",
                    id = %id,
                    affected,
                    title_set = title.is_some(),
                    description_set = description.is_some(),
                    image_key_set = image_key.is_some(),
                    "db patch applied"
                );

                if affected == 0 {
                    return Err(SiteError::NotFound(format!(
                        "personalization feature {id}"
                    )));
                }
                Ok(affected)
            }

            ContentPatch::AccessPass { id, patch } => {
                let AccessPassPatch {
                    title,
                    price,
                    duration,
                    href,
                    featured,
                    sort_order,
                } = patch;

                let res = sqlx::query(
                    r#"
                    UPDATE access_passes
                    SET
                        title = COALESCE(?, title),
                        price = COALESCE(?, price),
                        duration = COALESCE(?, duration),
                        href = COALESCE(?, href),
                        featured = COALESCE(?, featured),
                        sort_order = COALESCE(?, sort_order)
                    WHERE id = ?
                    "#,
                )
                .bind(title)
                .bind(price)
                .bind(duration)
                .bind(href)
                .bind(featured)
                .bind(sort_order)
                .bind(id)
                .execute(&mut *conn)
                .await?;

                let affected = res.rows_affected();
                debug!(
                    table = "access_passes",
                    id = %id,
                    affected,
                    title_set = title.is_some(),
                    price_set = price.is_some(),
                    featured_set = featured.is_some(),
                    sort_order_set = sort_order.is_some(),
                    "db patch applied"
                );

                if affected == 0 {
                    return Err(SiteError::NotFound(format!("access pass {id}")));
                }
                Ok(affected)
            }
        }
    }
}
