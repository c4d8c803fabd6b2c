use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use std::{collections::HashMap, convert::Infallible};

pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong, please retry later";

pub(crate) mod filters {
    /// `active` when the page being rendered lives under `path`, for nav links
    #[askama::filter_fn]
    pub fn active(path: &str, values: &dyn askama::Values) -> askama::Result<String> {
        let Ok(current_path) = askama::get_value::<String>(values, "current_path") else {
            return Ok(String::new());
        };

        let is_active = match path {
            "/" => current_path == "/",
            _ => current_path.starts_with(path),
        };

        Ok(if is_active { "active" } else { "" }.to_owned())
    }
}

pub struct Template {
    current_path: String,
}

impl Template {
    fn render_with_values<T: askama::Template>(
        &self,
        template: T,
    ) -> Result<String, askama::Error> {
        let mut values: HashMap<&str, Box<dyn std::any::Any>> = HashMap::new();
        values.insert("current_path", Box::new(self.current_path.to_owned()));

        template.render_with_values(&values)
    }

    pub fn render<T: askama::Template>(&self, template: T) -> Response {
        self.render_status(StatusCode::OK, template)
    }

    pub fn render_status<T: askama::Template>(&self, status: StatusCode, template: T) -> Response {
        match self.render_with_values(template) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => {
                tracing::error!(error = %err, path = %self.current_path, "failed to render template");

                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE).into_response()
            }
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Template {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Template {
            current_path: parts.uri.path().to_owned(),
        })
    }
}

#[derive(askama::Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate;

#[derive(askama::Template)]
#[template(path = "500.html")]
pub struct ServerTemplate;

#[macro_export]
macro_rules! try_page_response {
    ($result:expr, $template:expr) => {
        match $result.await {
            Ok(r) => r,
            Err(err) => {
                tracing::error!("{err}");

                return $template
                    .render_status(
                        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                        $crate::template::ServerTemplate,
                    )
                    .into_response();
            }
        }
    };
}
