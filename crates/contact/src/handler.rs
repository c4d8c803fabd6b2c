use std::sync::Arc;

use tracing::{error, info, warn};
use validator::{Validate, ValidationErrors};

use crate::{
    ContactSubmission, DeliveryError, EmailMessage, MailCredentials, MailTransport,
    ScopedConnection,
};

/// Result of handling one contact submission
#[derive(Debug)]
pub enum DeliveryOutcome {
    Success,
    /// The submission was rejected before anything was sent
    Invalid(ValidationErrors),
    /// The submission was valid but the relay did not take it
    Failed(DeliveryError),
}

impl DeliveryOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Validates contact submissions and relays them to the site owner
#[derive(Clone)]
pub struct ContactHandler {
    transport: Arc<dyn MailTransport>,
}

impl ContactHandler {
    pub fn new(transport: Arc<dyn MailTransport>) -> Self {
        Self { transport }
    }

    /// Validate `submission` and make one delivery attempt.
    ///
    /// Blocks on network I/O, async callers should run it on a blocking
    /// thread. Failures are logged here with their full cause.
    pub fn handle(
        &self,
        submission: &ContactSubmission,
        credentials: &MailCredentials,
    ) -> DeliveryOutcome {
        if let Err(errors) = submission.validate() {
            warn!(
                fields = ?errors.field_errors().keys().collect::<Vec<_>>(),
                "contact submission rejected"
            );

            return DeliveryOutcome::Invalid(errors);
        }

        match self.deliver(submission, credentials) {
            Ok(()) => {
                info!(
                    reply_to = %submission.email,
                    smtp_host = %credentials.host,
                    "contact message delivered"
                );

                DeliveryOutcome::Success
            }
            Err(e) => {
                error!(
                    error = %e,
                    reply_to = %submission.email,
                    smtp_host = %credentials.host,
                    "contact message delivery failed"
                );

                DeliveryOutcome::Failed(e)
            }
        }
    }

    fn deliver(
        &self,
        submission: &ContactSubmission,
        credentials: &MailCredentials,
    ) -> Result<(), DeliveryError> {
        let email = EmailMessage::compose(submission, credentials)?;

        let mut connection = ScopedConnection::open(self.transport.as_ref(), credentials)
            .map_err(|source| DeliveryError::Connect {
                host: credentials.host.to_owned(),
                source,
            })?;

        // Local relays (MailDev) run without accounts
        if credentials.username.is_empty() && credentials.password.is_empty() {
            tracing::debug!("no relay account configured, skipping authentication");
        } else {
            connection
                .authenticate(&credentials.username, &credentials.password)
                .map_err(DeliveryError::Authenticate)?;
        }

        connection.send(&email).map_err(DeliveryError::Send)?;

        Ok(())
    }
}
