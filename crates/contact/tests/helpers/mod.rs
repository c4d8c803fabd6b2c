use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use portfolio_contact::{
    BoxError, ContactHandler, ContactSubmission, EmailMessage, MailConnection, MailCredentials,
    MailTransport, TlsMode,
};

/// Which step of the SMTP exchange the stub refuses
#[allow(dead_code)]
#[derive(Clone, Copy, Default, PartialEq)]
pub enum FailAt {
    #[default]
    Nowhere,
    Connect,
    Authenticate,
    Send,
}

#[derive(Default)]
pub struct Calls {
    pub connects: AtomicUsize,
    pub authentications: AtomicUsize,
    pub closes: AtomicUsize,
    pub sent: Mutex<Vec<EmailMessage>>,
}

#[allow(dead_code)]
impl Calls {
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn authentications(&self) -> usize {
        self.authentications.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[derive(Clone, Default)]
pub struct StubTransport {
    pub fail_at: FailAt,
    pub calls: Arc<Calls>,
}

impl MailTransport for StubTransport {
    fn connect(&self, _credentials: &MailCredentials) -> Result<Box<dyn MailConnection>, BoxError> {
        self.calls.connects.fetch_add(1, Ordering::SeqCst);

        if self.fail_at == FailAt::Connect {
            return Err("connection refused".into());
        }

        Ok(Box::new(StubConnection {
            fail_at: self.fail_at,
            calls: self.calls.clone(),
        }))
    }
}

struct StubConnection {
    fail_at: FailAt,
    calls: Arc<Calls>,
}

impl MailConnection for StubConnection {
    fn authenticate(&mut self, _username: &str, _password: &str) -> Result<(), BoxError> {
        self.calls.authentications.fetch_add(1, Ordering::SeqCst);

        if self.fail_at == FailAt::Authenticate {
            return Err("535 5.7.8 authentication credentials invalid".into());
        }

        Ok(())
    }

    fn send(&mut self, email: &EmailMessage) -> Result<(), BoxError> {
        if self.fail_at == FailAt::Send {
            return Err("451 4.3.0 mailbox temporarily unavailable".into());
        }

        self.calls.sent.lock().unwrap().push(email.clone());

        Ok(())
    }

    fn close(&mut self) {
        self.calls.closes.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn setup_handler(fail_at: FailAt) -> (ContactHandler, Arc<Calls>) {
    let transport = StubTransport {
        fail_at,
        ..Default::default()
    };
    let calls = transport.calls.clone();

    (ContactHandler::new(Arc::new(transport)), calls)
}

pub fn credentials() -> MailCredentials {
    MailCredentials {
        host: "smtp.example.com".to_owned(),
        port: 587,
        username: "relay@example.com".to_owned(),
        password: "secret".to_owned(),
        sender: "relay@example.com".to_owned(),
        recipient: "owner@example.com".to_owned(),
        tls: TlsMode::Opportunistic,
        timeout_secs: 60,
        hello_name: None,
    }
}

pub fn submission() -> ContactSubmission {
    ContactSubmission {
        name: "Jane".to_owned(),
        email: "jane@example.com".to_owned(),
        subject: "Hi".to_owned(),
        message: "Hello there".to_owned(),
    }
}
