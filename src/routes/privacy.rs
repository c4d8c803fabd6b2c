use axum::response::IntoResponse;

use crate::template::{Template, filters};

#[derive(askama::Template)]
#[template(path = "privacy.html")]
pub struct PrivacyTemplate;

pub async fn page(template: Template) -> impl IntoResponse {
    template.render(PrivacyTemplate)
}
