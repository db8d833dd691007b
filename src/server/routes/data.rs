use crate::db::{SelectQuery, TableRows};
use crate::error::SiteError;
use crate::server::router::SiteState;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
pub struct DataParams {
    pub table: Option<String>,
    pub order: Option<String>,
    pub ascending: Option<String>,
}

impl DataParams {
    /// Anything but the literal `false` sorts ascending.
    pub fn ascending(&self) -> bool {
        self.ascending.as_deref() != Some("false")
    }

    pub fn to_query(&self) -> Result<SelectQuery, SiteError> {
        let table = self
            .table
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| SiteError::InvalidRequest("table is required".to_string()))?;
        SelectQuery::parse(table, self.order.as_deref(), self.ascending())
    }
}

/// GET /api/data?table=..&order=..&ascending=..
pub async fn data_handler(
    State(state): State<SiteState>,
    params: Result<Query<DataParams>, QueryRejection>,
) -> Result<Json<TableRows>, SiteError> {
    let Query(params) = params?;
    let query = params.to_query()?;
    debug!(table = %query.table, order = ?query.order, "data read");
    Ok(Json(state.content.select(query).await?))
}

pub fn router() -> Router<SiteState> {
    Router::new().route("/api/data", get(data_handler))
}
