use axum::{Router, response::IntoResponse, routing::get};
use portfolio_contact::ContactHandler;

use crate::template::{NotFoundTemplate, Template};

pub mod contact;
mod health;
mod index;
mod privacy;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub contact: ContactHandler,
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    template.render_status(axum::http::StatusCode::NOT_FOUND, NotFoundTemplate)
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/", get(index::page))
        .route("/privacy", get(privacy::page))
        .route("/contact", get(contact::page).post(contact::action))
        .fallback(fallback)
        .nest_service("/static", crate::assets::AssetsService::new())
        .with_state(app_state)
}
