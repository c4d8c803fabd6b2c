use std::time::Duration;

use lettre::transport::smtp::{
    authentication::{Credentials, DEFAULT_MECHANISMS},
    client::{SmtpConnection, TlsParameters},
    extension::ClientId,
};

use crate::{BoxError, EmailMessage, MailConnection, MailCredentials, MailTransport, TlsMode};

/// Production transport talking SMTP to the configured relay
#[derive(Default, Clone, Debug)]
pub struct SmtpRelay;

impl SmtpRelay {
    pub fn new() -> Self {
        Self
    }
}

impl MailTransport for SmtpRelay {
    fn connect(&self, credentials: &MailCredentials) -> Result<Box<dyn MailConnection>, BoxError> {
        let hello_name = match &credentials.hello_name {
            Some(name) => ClientId::Domain(name.to_owned()),
            None => ClientId::default(),
        };
        let server = (credentials.host.as_str(), credentials.port);
        let timeout = Some(Duration::from_secs(credentials.timeout_secs));

        tracing::debug!(
            smtp_host = %credentials.host,
            smtp_port = credentials.port,
            tls = ?credentials.tls,
            "connecting to mail relay"
        );

        let connection = match credentials.tls {
            TlsMode::Wrapper => {
                let tls = TlsParameters::new(credentials.host.to_owned())?;
                SmtpConnection::connect(server, timeout, &hello_name, Some(&tls), None)?
            }
            TlsMode::None => SmtpConnection::connect(server, timeout, &hello_name, None, None)?,
            TlsMode::Opportunistic | TlsMode::Required => {
                let mut connection =
                    SmtpConnection::connect(server, timeout, &hello_name, None, None)?;

                if connection.can_starttls() {
                    let upgraded = TlsParameters::new(credentials.host.to_owned())
                        .and_then(|tls| connection.starttls(&tls, &hello_name));

                    if let Err(e) = upgraded {
                        connection.abort();
                        return Err(e.into());
                    }
                } else if credentials.tls == TlsMode::Required {
                    connection.abort();
                    return Err(format!("{} does not offer STARTTLS", credentials.host).into());
                } else {
                    tracing::warn!(
                        smtp_host = %credentials.host,
                        "mail relay does not offer STARTTLS, continuing in plaintext"
                    );
                }

                connection
            }
        };

        Ok(Box::new(SmtpSession { connection }))
    }
}

struct SmtpSession {
    connection: SmtpConnection,
}

impl MailConnection for SmtpSession {
    fn authenticate(&mut self, username: &str, password: &str) -> Result<(), BoxError> {
        let credentials = Credentials::new(username.to_owned(), password.to_owned());
        self.connection.auth(DEFAULT_MECHANISMS, &credentials)?;

        Ok(())
    }

    fn send(&mut self, email: &EmailMessage) -> Result<(), BoxError> {
        let message = email.message();
        let response = self
            .connection
            .send(message.envelope(), &message.formatted())?;

        tracing::debug!(code = %response.code(), "mail relay accepted message");

        Ok(())
    }

    fn close(&mut self) {
        if let Err(e) = self.connection.quit() {
            tracing::debug!(error = %e, "QUIT failed, dropping connection");
            self.connection.abort();
        }
    }
}
