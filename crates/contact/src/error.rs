pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a valid submission did not reach the site owner
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("failed to compose message: {0}")]
    Compose(String),

    #[error("failed to connect to {host}: {source}")]
    Connect {
        host: String,
        #[source]
        source: BoxError,
    },

    #[error("authentication failed: {0}")]
    Authenticate(#[source] BoxError),

    #[error("failed to send message: {0}")]
    Send(#[source] BoxError),
}

impl From<lettre::address::AddressError> for DeliveryError {
    fn from(value: lettre::address::AddressError) -> Self {
        Self::Compose(value.to_string())
    }
}

impl From<lettre::error::Error> for DeliveryError {
    fn from(value: lettre::error::Error) -> Self {
        Self::Compose(value.to_string())
    }
}

impl From<askama::Error> for DeliveryError {
    fn from(value: askama::Error) -> Self {
        Self::Compose(value.to_string())
    }
}
