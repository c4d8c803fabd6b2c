use std::fmt;

use serde::Deserialize;

/// How the SMTP session is secured
#[derive(Deserialize, Default, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// Upgrade with STARTTLS when the server offers it
    #[default]
    Opportunistic,
    /// Refuse to continue unless STARTTLS succeeds
    Required,
    /// Implicit TLS from the first byte (usually port 465)
    Wrapper,
    /// Plaintext, for local relays such as MailDev
    None,
}

/// Account used to relay contact form mail
#[derive(Deserialize, Clone, PartialEq)]
pub struct MailCredentials {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Address the relay account is allowed to send from
    pub sender: String,
    /// Site owner's inbox
    pub recipient: String,
    #[serde(default)]
    pub tls: TlsMode,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Name announced in EHLO, the local hostname when unset
    #[serde(default)]
    pub hello_name: Option<String>,
}

fn default_port() -> u16 {
    587
}

fn default_timeout_secs() -> u64 {
    60
}

impl fmt::Debug for MailCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailCredentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"********")
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .field("tls", &self.tls)
            .field("timeout_secs", &self.timeout_secs)
            .field("hello_name", &self.hello_name)
            .finish()
    }
}
