use crate::db::{MembershipSection, PassWithFeatures};
use crate::error::SiteError;
use crate::server::router::SiteState;
use crate::service::{AdminContent, PersonalizationCard};
use crate::utils::logging::with_pretty_json_debug;
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{get, put},
};
use fitsite_schema::{AccessPassSave, MembershipSave, PersonalizationUpdate};
use tracing::{debug, info};

/// GET /api/admin/content
pub async fn admin_content_handler(
    State(state): State<SiteState>,
) -> Result<Json<AdminContent>, SiteError> {
    Ok(Json(state.content.admin_content().await?))
}

/// PUT /api/admin/personalization/{id}
pub async fn update_personalization_handler(
    State(state): State<SiteState>,
    Path(id): Path<String>,
    payload: Result<Json<PersonalizationUpdate>, JsonRejection>,
) -> Result<Json<PersonalizationCard>, SiteError> {
    let Json(update) = payload?;
    with_pretty_json_debug(&update, |pretty| {
        debug!(id = %id, body = %pretty, "[Admin] personalization update");
    });

    let card = state.content.update_personalization(id, update).await?;
    info!(id = %card.feature.id, feature_id = %card.feature.feature_id, "personalization feature saved");
    Ok(Json(card))
}

/// PUT /api/admin/membership
pub async fn save_membership_handler(
    State(state): State<SiteState>,
    payload: Result<Json<MembershipSave>, JsonRejection>,
) -> Result<Json<MembershipSection>, SiteError> {
    let Json(save) = payload?;
    if save.features.iter().any(|f| f.feature_text.trim().is_empty()) {
        return Err(SiteError::InvalidRequest(
            "feature_text must not be empty".to_string(),
        ));
    }
    with_pretty_json_debug(&save, |pretty| {
        debug!(body = %pretty, "[Admin] membership save");
    });

    let section = state.content.save_membership(save).await?;
    info!(
        plans = section.plans.len(),
        features = section.features.len(),
        "membership section saved"
    );
    Ok(Json(section))
}

/// PUT /api/admin/passes/{id}
pub async fn save_access_pass_handler(
    State(state): State<SiteState>,
    Path(id): Path<String>,
    payload: Result<Json<AccessPassSave>, JsonRejection>,
) -> Result<Json<PassWithFeatures>, SiteError> {
    let Json(save) = payload?;
    with_pretty_json_debug(&save, |pretty| {
        debug!(id = %id, body = %pretty, "[Admin] access pass save");
    });

    let pass = state.content.save_access_pass(id, save).await?;
    info!(
        pass_id = %pass.pass.pass_id,
        features = pass.features.len(),
        "access pass saved"
    );
    Ok(Json(pass))
}

pub fn router() -> Router<SiteState> {
    Router::new()
        .route("/api/admin/content", get(admin_content_handler))
        .route(
            "/api/admin/personalization/{id}",
            put(update_personalization_handler),
        )
        .route("/api/admin/membership", put(save_membership_handler))
        .route("/api/admin/passes/{id}", put(save_access_pass_handler))
}
