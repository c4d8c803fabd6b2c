pub mod assets;
pub mod config;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod server;
pub mod template;

use std::sync::Arc;

use portfolio_contact::{ContactHandler, MailTransport, SmtpRelay};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub use config::Config;
pub use routes::AppState;

impl AppState {
    /// State relaying contact mail through the configured SMTP server
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, Arc::new(SmtpRelay::new()))
    }

    pub fn with_transport(config: Config, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            config,
            contact: ContactHandler::new(transport),
        }
    }
}

/// Create the app router with every middleware layer the server uses
pub fn create_app(state: AppState) -> axum::Router {
    routes::router(state)
        .layer(axum::middleware::from_fn(
            middleware::cache_control_middleware,
        ))
        .layer(axum::middleware::map_response(
            middleware::minify_html_middleware,
        ))
        .layer(CompressionLayer::new().br(true).gzip(true))
        .layer(TraceLayer::new_for_http())
}
