use crate::db::models::{
    AccessPass, MembershipFeature, MembershipPlan, MembershipSection, PassFeature,
    PassWithFeatures, PersonalizationFeature, TableRows,
};
use crate::db::patch::{AccessPassPatch, ContentPatch, DbPatchable};
use crate::db::schema::SQLITE_INIT;
use crate::db::seed::seed_if_empty;
use crate::db::table::{SelectQuery, Table};
use crate::error::SiteError;
use fitsite_schema::{AccessPassSave, MembershipSave, PersonalizationUpdate};
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug)]
pub enum DbActorMessage {
    /// Read all rows of a whitelisted table, optionally sorted.
    Select(SelectQuery, RpcReplyPort<Result<TableRows, SiteError>>),

    /// Partially update one personalization feature and return the stored row.
    UpdatePersonalization(
        String,
        PersonalizationUpdate,
        RpcReplyPort<Result<PersonalizationFeature, SiteError>>,
    ),

    /// Replace the membership section (plans upserted, features synced) in one transaction.
    SaveMembership(MembershipSave, RpcReplyPort<Result<MembershipSection, SiteError>>),

    /// Update one pass and replace its feature list in one transaction.
    SaveAccessPass(
        String,
        AccessPassSave,
        RpcReplyPort<Result<PassWithFeatures, SiteError>>,
    ),

    /// All passes with their features, both in sort order.
    ListPassesWithFeatures(RpcReplyPort<Result<Vec<PassWithFeatures>, SiteError>>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn select(&self, query: SelectQuery) -> Result<TableRows, SiteError> {
        ractor::call!(self.actor, DbActorMessage::Select, query)
            .map_err(|e| SiteError::RactorError(format!("DbActor Select RPC failed: {e}")))?
    }

    pub async fn update_personalization(
        &self,
        id: String,
        update: PersonalizationUpdate,
    ) -> Result<PersonalizationFeature, SiteError> {
        ractor::call!(self.actor, DbActorMessage::UpdatePersonalization, id, update).map_err(
            |e| SiteError::RactorError(format!("DbActor UpdatePersonalization RPC failed: {e}")),
        )?
    }

    pub async fn save_membership(
        &self,
        save: MembershipSave,
    ) -> Result<MembershipSection, SiteError> {
        ractor::call!(self.actor, DbActorMessage::SaveMembership, save).map_err(|e| {
            SiteError::RactorError(format!("DbActor SaveMembership RPC failed: {e}"))
        })?
    }

    pub async fn save_access_pass(
        &self,
        id: String,
        save: AccessPassSave,
    ) -> Result<PassWithFeatures, SiteError> {
        ractor::call!(self.actor, DbActorMessage::SaveAccessPass, id, save).map_err(|e| {
            SiteError::RactorError(format!("DbActor SaveAccessPass RPC failed: {e}"))
        })?
    }

    pub async fn list_passes_with_features(&self) -> Result<Vec<PassWithFeatures>, SiteError> {
        ractor::call!(self.actor, DbActorMessage::ListPassesWithFeatures).map_err(|e| {
            SiteError::RactorError(format!("DbActor ListPassesWithFeatures RPC failed: {e}"))
        })?
    }
}

struct DbActorState {
    pool: SqlitePool,
}

pub struct DbActorArgs {
    pub database_url: String,
    pub seed_content: bool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = DbActorArgs;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(args.database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        if args.seed_content {
            seed_if_empty(&pool)
                .await
                .map_err(|e| ActorProcessingErr::from(format!("db seed failed: {e}")))?;
        }

        info!(seed_content = args.seed_content, "DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::Select(query, reply) => {
                let res = self.select(&state.pool, query).await;
                let _ = reply.send(res);
            }
            DbActorMessage::UpdatePersonalization(id, update, reply) => {
                let res = self.update_personalization(&state.pool, id, update).await;
                let _ = reply.send(res);
            }
            DbActorMessage::SaveMembership(save, reply) => {
                let res = self.save_membership(&state.pool, save).await;
                let _ = reply.send(res);
            }
            DbActorMessage::SaveAccessPass(id, save, reply) => {
                let res = self.save_access_pass(&state.pool, id, save).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ListPassesWithFeatures(reply) => {
                let res = self.list_passes_with_features(&state.pool).await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn select(&self, pool: &SqlitePool, query: SelectQuery) -> Result<TableRows, SiteError> {
        let mut conn = pool.acquire().await?;
        select_rows(&mut conn, &query).await
    }

    async fn update_personalization(
        &self,
        pool: &SqlitePool,
        id: String,
        update: PersonalizationUpdate,
    ) -> Result<PersonalizationFeature, SiteError> {
        let mut tx = pool.begin().await?;

        ContentPatch::Personalization {
            id: id.clone(),
            patch: update,
        }
        .apply_patch(&mut tx)
        .await?;

        let row = sqlx::query_as::<_, PersonalizationFeature>(
            r#"
        SELECT id, feature_id, title, description, image_key, icon_name, created_at
        FROM personalization_features
        WHERE id = ?
        "#,
        )
        .bind(&id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    async fn save_membership(
        &self,
        pool: &SqlitePool,
        save: MembershipSave,
    ) -> Result<MembershipSection, SiteError> {
        let MembershipSave { plans, features } = save;
        let mut tx = pool.begin().await?;

        for plan in &plans {
            sqlx::query(
                r#"
            INSERT INTO membership_plans (
                id, plan_id, title, price, original_price, duration, href, tag, sort_order
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                plan_id = excluded.plan_id,
                title = excluded.title,
                price = excluded.price,
                original_price = excluded.original_price,
                duration = excluded.duration,
                href = excluded.href,
                tag = excluded.tag,
                sort_order = excluded.sort_order
            "#,
            )
            .bind(&plan.id)
            .bind(&plan.plan_id)
            .bind(&plan.title)
            .bind(&plan.price)
            .bind(&plan.original_price)
            .bind(&plan.duration)
            .bind(&plan.href)
            .bind(&plan.tag)
            .bind(plan.sort_order)
            .execute(&mut *tx)
            .await?;
        }

        // Features missing from the submitted list were deleted in the editor.
        let keep: Vec<&str> = features.iter().filter_map(|f| f.stored_id()).collect();
        let mut delete = QueryBuilder::<Sqlite>::new("DELETE FROM membership_features");
        if !keep.is_empty() {
            delete.push(" WHERE id NOT IN (");
            let mut ids = delete.separated(", ");
            for id in &keep {
                ids.push_bind(*id);
            }
            ids.push_unseparated(")");
        }
        let deleted = delete.build().execute(&mut *tx).await?.rows_affected();

        for (position, feature) in (1_i64..).zip(&features) {
            let id = feature
                .stored_id()
                .map_or_else(|| Uuid::new_v4().to_string(), str::to_string);
            sqlx::query(
                r#"
            INSERT INTO membership_features (id, feature_text, sort_order)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                feature_text = excluded.feature_text,
                sort_order = excluded.sort_order
            "#,
            )
            .bind(id)
            .bind(feature.feature_text.trim())
            .bind(position)
            .execute(&mut *tx)
            .await?;
        }

        let plans = fetch_typed::<MembershipPlan>(&mut tx, Table::MembershipPlans).await?;
        let features =
            fetch_typed::<MembershipFeature>(&mut tx, Table::MembershipFeatures).await?;
        tx.commit().await?;

        debug!(
            plans = plans.len(),
            features = features.len(),
            deleted,
            "membership section saved"
        );
        Ok(MembershipSection { plans, features })
    }

    async fn save_access_pass(
        &self,
        pool: &SqlitePool,
        id: String,
        save: AccessPassSave,
    ) -> Result<PassWithFeatures, SiteError> {
        let mut tx = pool.begin().await?;

        ContentPatch::AccessPass {
            id: id.clone(),
            patch: AccessPassPatch::from(&save),
        }
        .apply_patch(&mut tx)
        .await?;

        let pass = sqlx::query_as::<_, AccessPass>(
            r#"
        SELECT id, pass_id, title, price, duration, href, featured, sort_order
        FROM access_passes
        WHERE id = ?
        "#,
        )
        .bind(&id)
        .fetch_one(&mut *tx)
        .await?;

        // Clean slate: the submitted list is the complete feature set.
        sqlx::query("DELETE FROM pass_features WHERE pass_id = ?")
            .bind(&pass.pass_id)
            .execute(&mut *tx)
            .await?;

        let texts = save
            .features
            .iter()
            .map(|text| text.trim())
            .filter(|text| !text.is_empty());
        for (position, text) in (1_i64..).zip(texts) {
            sqlx::query(
                "INSERT INTO pass_features (id, pass_id, feature_text, sort_order) VALUES (?, ?, ?, ?)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&pass.pass_id)
            .bind(text)
            .bind(position)
            .execute(&mut *tx)
            .await?;
        }

        let features = sqlx::query_as::<_, PassFeature>(
            r#"
        SELECT id, pass_id, feature_text, sort_order
        FROM pass_features
        WHERE pass_id = ?
        ORDER BY sort_order ASC NULLS LAST, rowid ASC
        "#,
        )
        .bind(&pass.pass_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(PassWithFeatures { pass, features })
    }

    async fn list_passes_with_features(
        &self,
        pool: &SqlitePool,
    ) -> Result<Vec<PassWithFeatures>, SiteError> {
        let mut conn = pool.acquire().await?;
        let passes = fetch_typed::<AccessPass>(&mut conn, Table::AccessPasses).await?;
        let features = fetch_typed::<PassFeature>(&mut conn, Table::PassFeatures).await?;
        Ok(PassWithFeatures::join(passes, &features))
    }
}

async fn select_rows(
    conn: &mut SqliteConnection,
    query: &SelectQuery,
) -> Result<TableRows, SiteError> {
    let sql = query.to_sql();
    let rows = match query.table {
        Table::PersonalizationFeatures => {
            TableRows::PersonalizationFeatures(fetch_sql(conn, &sql).await?)
        }
        Table::MembershipPlans => TableRows::MembershipPlans(fetch_sql(conn, &sql).await?),
        Table::MembershipFeatures => TableRows::MembershipFeatures(fetch_sql(conn, &sql).await?),
        Table::AccessPasses => TableRows::AccessPasses(fetch_sql(conn, &sql).await?),
        Table::PassFeatures => TableRows::PassFeatures(fetch_sql(conn, &sql).await?),
        Table::SocialPosts => TableRows::SocialPosts(fetch_sql(conn, &sql).await?),
    };
    debug!(table = %query.table, rows = rows.len(), "select served");
    Ok(rows)
}

/// Rows of `table` in `sort_order`, decoded as `T`.
async fn fetch_typed<T>(conn: &mut SqliteConnection, table: Table) -> Result<Vec<T>, SiteError>
where
    T: for<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> + Send + Unpin,
{
    let query = SelectQuery::ordered(table, "sort_order", true)?;
    fetch_sql(conn, &query.to_sql()).await
}

async fn fetch_sql<T>(conn: &mut SqliteConnection, sql: &str) -> Result<Vec<T>, SiteError>
where
    T: for<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> + Send + Unpin,
{
    Ok(sqlx::query_as::<Sqlite, T>(sql).fetch_all(&mut *conn).await?)
}

/// Spawn the database actor and return a cloneable handle.
pub async fn spawn(database_url: &str, seed_content: bool) -> DbActorHandle {
    let (actor, _jh) = ractor::Actor::spawn(
        None,
        DbActor,
        DbActorArgs {
            database_url: database_url.to_string(),
            seed_content,
        },
    )
    .await
    .expect("failed to spawn DbActor");

    DbActorHandle { actor }
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), SiteError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
