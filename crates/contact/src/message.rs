use askama::Template;
use lettre::{
    Address, Message,
    message::{
        Mailbox,
        header::{ContentType, Header, HeaderName, HeaderValue},
    },
};

use crate::{BoxError, ContactSubmission, DeliveryError, MailCredentials};

/// RFC 2156 `Priority` header
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MessagePriority {
    NonUrgent,
    #[default]
    Normal,
    Urgent,
}

impl MessagePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NonUrgent => "non-urgent",
            Self::Normal => "normal",
            Self::Urgent => "urgent",
        }
    }
}

impl Header for MessagePriority {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("Priority")
    }

    fn parse(s: &str) -> Result<Self, BoxError> {
        match s.trim() {
            "non-urgent" => Ok(Self::NonUrgent),
            "normal" => Ok(Self::Normal),
            "urgent" => Ok(Self::Urgent),
            other => Err(format!("unknown priority `{other}`").into()),
        }
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), self.as_str().to_owned())
    }
}

mod filters {
    use std::fmt::Display;

    /// Neutralise tags while leaving quotes and ampersands as typed
    #[askama::filter_fn]
    pub fn plain(value: impl Display, _: &dyn askama::Values) -> askama::Result<String> {
        Ok(value
            .to_string()
            .replace('<', "&lt;")
            .replace('>', "&gt;"))
    }
}

/// Header-safe display name, control characters folded into single spaces
fn display_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Template)]
#[template(path = "emails/contact.html")]
struct ContactEmailTemplate<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

/// Mail sent to the site owner for one contact submission
#[derive(Clone, Debug)]
pub struct EmailMessage {
    from: Mailbox,
    to: Mailbox,
    reply_to: Mailbox,
    subject: String,
    body_html: String,
    priority: MessagePriority,
    message: Message,
}

impl EmailMessage {
    /// Build the notification for `submission`.
    ///
    /// The relay account is the envelope sender, replies go straight to the
    /// visitor. Everything, including the MIME encoding, is done here so that
    /// nothing can fail between opening the connection and transmitting.
    pub fn compose(
        submission: &ContactSubmission,
        credentials: &MailCredentials,
    ) -> Result<Self, DeliveryError> {
        let from = Mailbox::new(
            Some("Sender".to_owned()),
            credentials.sender.parse::<Address>()?,
        );
        let to = Mailbox::new(
            Some("Recipient".to_owned()),
            credentials.recipient.parse::<Address>()?,
        );
        let reply_to = Mailbox::new(
            Some(display_name(&submission.name)),
            submission.email.trim().parse::<Address>()?,
        );

        let body_html = ContactEmailTemplate {
            name: &submission.name,
            email: &submission.email,
            subject: &submission.subject,
            message: &submission.message,
        }
        .render()?;

        let priority = MessagePriority::Urgent;

        let message = Message::builder()
            .from(from.clone())
            .to(to.clone())
            .reply_to(reply_to.clone())
            .subject(submission.subject.clone())
            .header(priority)
            .header(ContentType::TEXT_HTML)
            .body(body_html.clone())?;

        Ok(Self {
            from,
            to,
            reply_to,
            subject: submission.subject.clone(),
            body_html,
            priority,
            message,
        })
    }

    pub fn from(&self) -> &Mailbox {
        &self.from
    }

    pub fn to(&self) -> &Mailbox {
        &self.to
    }

    pub fn reply_to(&self) -> &Mailbox {
        &self.reply_to
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body_html(&self) -> &str {
        &self.body_html
    }

    pub fn priority(&self) -> MessagePriority {
        self.priority
    }

    /// The MIME message handed to the relay
    pub fn message(&self) -> &Message {
        &self.message
    }
}
