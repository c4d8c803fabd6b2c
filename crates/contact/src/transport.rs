use std::ops::{Deref, DerefMut};

use crate::{BoxError, EmailMessage, MailCredentials};

/// Opens connections to a mail relay
pub trait MailTransport: Send + Sync {
    fn connect(&self, credentials: &MailCredentials) -> Result<Box<dyn MailConnection>, BoxError>;
}

/// One open session with a mail relay
pub trait MailConnection: Send {
    fn authenticate(&mut self, username: &str, password: &str) -> Result<(), BoxError>;

    fn send(&mut self, email: &EmailMessage) -> Result<(), BoxError>;

    /// Release the session. Must not fail.
    fn close(&mut self);
}

/// Connection that is closed when it goes out of scope
pub struct ScopedConnection {
    inner: Box<dyn MailConnection>,
}

impl ScopedConnection {
    pub fn open(
        transport: &dyn MailTransport,
        credentials: &MailCredentials,
    ) -> Result<Self, BoxError> {
        let inner = transport.connect(credentials)?;

        Ok(Self { inner })
    }
}

impl Deref for ScopedConnection {
    type Target = dyn MailConnection;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl DerefMut for ScopedConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.inner.as_mut()
    }
}

impl Drop for ScopedConnection {
    fn drop(&mut self) {
        tracing::debug!("closing mail relay connection");
        self.inner.close();
    }
}
