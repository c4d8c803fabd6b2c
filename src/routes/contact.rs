use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::IntoResponse,
};
use portfolio_contact::{ContactSubmission, DeliveryOutcome};
use validator::ValidationErrors;

use crate::{
    routes::AppState,
    template::{Template, filters},
};

pub const DELIVERY_FAILED_MESSAGE: &str =
    "There was an error processing your request. Please try again later.";

/// One message per invalid form field, a missing value wins over a malformed one
#[derive(Default, Debug, PartialEq)]
pub struct FieldErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let first = |field: &str| {
            field_errors.get(field).map(|errors| {
                errors
                    .iter()
                    .find(|e| e.code == "required")
                    .or_else(|| errors.first())
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string())
            })
        };

        Self {
            name: first("name"),
            email: first("email"),
            subject: first("subject"),
            message: first("message"),
        }
    }
}

#[derive(askama::Template, Default)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub form: ContactSubmission,
    pub errors: FieldErrors,
    pub error_message: Option<String>,
}

#[derive(askama::Template)]
#[template(path = "email-confirmation.html")]
pub struct EmailConfirmationTemplate {
    pub submission: ContactSubmission,
}

pub async fn page(template: Template) -> impl IntoResponse {
    template.render(ContactTemplate::default())
}

pub async fn action(
    template: Template,
    State(app_state): State<AppState>,
    Form(input): Form<ContactSubmission>,
) -> impl IntoResponse {
    let handler = app_state.contact.clone();
    let credentials = app_state.config.mail.clone();
    let submission = input.clone();

    let outcome = crate::try_page_response!(
        tokio::task::spawn_blocking(move || handler.handle(&submission, &credentials)),
        template
    );

    match outcome {
        DeliveryOutcome::Success => template
            .render(EmailConfirmationTemplate { submission: input })
            .into_response(),
        DeliveryOutcome::Invalid(errors) => template
            .render_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                ContactTemplate {
                    form: input,
                    errors: FieldErrors::from(&errors),
                    error_message: None,
                },
            )
            .into_response(),
        DeliveryOutcome::Failed(err) => {
            // Cause is already logged by the handler
            let error_message = if app_state.config.contact.show_error_detail {
                format!("{DELIVERY_FAILED_MESSAGE} Error: {err}")
            } else {
                DELIVERY_FAILED_MESSAGE.to_owned()
            };

            template
                .render_status(
                    StatusCode::BAD_GATEWAY,
                    ContactTemplate {
                        form: input,
                        errors: FieldErrors::default(),
                        error_message: Some(error_message),
                    },
                )
                .into_response()
        }
    }
}
