use crate::error::SiteError;
use crate::server::router::SiteState;
use crate::service::{ABOUT_PAGE, HomePage, SocialCard};
use axum::{Json, Router, extract::State, routing::get};
use fitsite_schema::AboutPage;

pub async fn home_handler(State(state): State<SiteState>) -> Result<Json<HomePage>, SiteError> {
    Ok(Json(state.content.home().await?))
}

pub async fn social_handler(
    State(state): State<SiteState>,
) -> Result<Json<Vec<SocialCard>>, SiteError> {
    Ok(Json(state.content.social().await?))
}

pub async fn about_handler() -> Json<AboutPage> {
    Json(ABOUT_PAGE.clone())
}

pub fn router() -> Router<SiteState> {
    Router::new()
        .route("/api/home", get(home_handler))
        .route("/api/social", get(social_handler))
        .route("/api/about", get(about_handler))
}
