use std::sync::Arc;

use fitsite_schema::{AccessPassSave, MembershipSave, PersonalizationUpdate};
use fitsite_tagcache::{CacheKeyGenerator, TagCache};
use tracing::{debug, info};
use url::Url;

use crate::config::CacheConfig;
use crate::db::{
    AccessPass, ContentRow, DbActorHandle, MembershipFeature, MembershipPlan, MembershipSection,
    PassFeature, PassWithFeatures, PersonalizationFeature, SelectQuery, SocialPost, Table,
    TableRows,
};
use crate::error::SiteError;
use crate::service::pages::{AdminContent, HomePage, PersonalizationCard, SocialCard};

/// Site content reads and writes. Reads go through a tagged cache that is
/// emptied per tag by admin saves and by the revalidation endpoint.
#[derive(Clone)]
pub struct ContentService {
    db: DbActorHandle,
    cache: Arc<TagCache<Arc<TableRows>>>,
    media_base: Option<Url>,
}

impl ContentService {
    pub fn new(db: DbActorHandle, cache_cfg: &CacheConfig, media_base: Option<Url>) -> Self {
        Self {
            db,
            cache: Arc::new(TagCache::new(cache_cfg.ttl_secs, cache_cfg.max_capacity)),
            media_base,
        }
    }

    /// Uncached read, as served by the generic data endpoint.
    pub async fn select(&self, query: SelectQuery) -> Result<TableRows, SiteError> {
        self.db.select(query).await
    }

    /// Cached read. Entries are tagged with `tags`, or with the table name when none are given.
    pub async fn fetch(
        &self,
        query: SelectQuery,
        tags: Option<&[&str]>,
    ) -> Result<Arc<TableRows>, SiteError> {
        let Some(key) = CacheKeyGenerator::generate(&query) else {
            return Ok(Arc::new(self.db.select(query).await?));
        };

        if let Some(rows) = self.cache.get(&key) {
            debug!(table = %query.table, "content cache hit");
            return Ok(rows);
        }

        let ticket = self.cache.ticket();
        let rows = Arc::new(self.db.select(query).await?);
        let tags: Vec<&str> = match tags {
            Some(tags) if !tags.is_empty() => tags.to_vec(),
            _ => vec![query.table.as_str()],
        };
        let stored = self.cache.insert(ticket, key, tags, rows.clone());
        debug!(table = %query.table, rows = rows.len(), stored, "content cache miss");
        Ok(rows)
    }

    /// Cached read of a row type, optionally sorted by `order`.
    pub async fn fetch_rows<T: ContentRow>(
        &self,
        order: Option<(&str, bool)>,
    ) -> Result<Vec<T>, SiteError> {
        let query = match order {
            Some((column, ascending)) => SelectQuery::ordered(T::TABLE, column, ascending)?,
            None => SelectQuery::all(T::TABLE),
        };
        let rows = self.fetch(query, None).await?;
        typed_rows::<T>(&rows)
    }

    pub async fn home(&self) -> Result<HomePage, SiteError> {
        let (personalization, plans, features, passes, pass_features) = tokio::try_join!(
            self.fetch_rows::<PersonalizationFeature>(Some(("created_at", true))),
            self.fetch_rows::<MembershipPlan>(Some(("sort_order", true))),
            self.fetch_rows::<MembershipFeature>(Some(("sort_order", true))),
            self.fetch_rows::<AccessPass>(Some(("sort_order", true))),
            self.fetch_rows::<PassFeature>(Some(("sort_order", true))),
        )?;

        Ok(HomePage {
            personalization: self.cards(personalization),
            membership: MembershipSection { plans, features },
            passes: PassWithFeatures::join(passes, &pass_features),
        })
    }

    pub async fn social(&self) -> Result<Vec<SocialCard>, SiteError> {
        let posts = self
            .fetch_rows::<SocialPost>(Some(("timestamp", false)))
            .await?;
        Ok(posts
            .into_iter()
            .map(|post| SocialCard::new(post, self.media_base.as_ref()))
            .collect())
    }

    /// Everything the admin panel edits, read straight from the store.
    pub async fn admin_content(&self) -> Result<AdminContent, SiteError> {
        let (personalization, plans, features, passes) = tokio::try_join!(
            self.select_rows::<PersonalizationFeature>("created_at"),
            self.select_rows::<MembershipPlan>("sort_order"),
            self.select_rows::<MembershipFeature>("sort_order"),
            self.db.list_passes_with_features(),
        )?;

        Ok(AdminContent {
            personalization: self.cards(personalization),
            membership: MembershipSection { plans, features },
            passes,
        })
    }

    pub async fn update_personalization(
        &self,
        id: String,
        update: PersonalizationUpdate,
    ) -> Result<PersonalizationCard, SiteError> {
        let row = self.db.update_personalization(id, update).await?;
        self.invalidate_tables(&[Table::PersonalizationFeatures])?;
        Ok(PersonalizationCard::new(row, self.media_base.as_ref()))
    }

    pub async fn save_membership(
        &self,
        save: MembershipSave,
    ) -> Result<MembershipSection, SiteError> {
        let section = self.db.save_membership(save).await?;
        self.invalidate_tables(&[Table::MembershipPlans, Table::MembershipFeatures])?;
        Ok(section)
    }

    pub async fn save_access_pass(
        &self,
        id: String,
        save: AccessPassSave,
    ) -> Result<PassWithFeatures, SiteError> {
        let pass = self.db.save_access_pass(id, save).await?;
        self.invalidate_tables(&[Table::AccessPasses, Table::PassFeatures])?;
        Ok(pass)
    }

    /// Drops every cached read tagged `tag`. Returns how many entries were dropped.
    pub fn invalidate(&self, tag: &str) -> Result<usize, SiteError> {
        let evicted = self.cache.invalidate_tag(tag)?;
        info!(tag = %tag.trim(), evicted, "cache tag invalidated");
        Ok(evicted)
    }

    fn invalidate_tables(&self, tables: &[Table]) -> Result<(), SiteError> {
        for table in tables {
            self.invalidate(table.as_str())?;
        }
        Ok(())
    }

    async fn select_rows<T: ContentRow>(&self, column: &str) -> Result<Vec<T>, SiteError> {
        let rows = self
            .db
            .select(SelectQuery::ordered(T::TABLE, column, true)?)
            .await?;
        typed_rows::<T>(&rows)
    }

    fn cards(&self, features: Vec<PersonalizationFeature>) -> Vec<PersonalizationCard> {
        features
            .into_iter()
            .map(|feature| PersonalizationCard::new(feature, self.media_base.as_ref()))
            .collect()
    }
}

fn typed_rows<T: ContentRow>(rows: &TableRows) -> Result<Vec<T>, SiteError> {
    T::rows(rows)
        .map(<[T]>::to_vec)
        .ok_or(SiteError::UnexpectedRows {
            expected: T::TABLE,
            got: rows.table(),
        })
}
