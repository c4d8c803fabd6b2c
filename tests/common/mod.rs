#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use portfolio::{AppState, Config};
use portfolio_contact::{BoxError, EmailMessage, MailConnection, MailCredentials, MailTransport};
use tower::ServiceExt;

/// Relay double recording what the app hands to it
#[derive(Clone, Default)]
pub struct RecordingTransport {
    pub fail_send: bool,
    pub connects: Arc<AtomicUsize>,
    pub closes: Arc<AtomicUsize>,
    pub sent: Arc<Mutex<Vec<EmailMessage>>>,
}

impl RecordingTransport {
    pub fn failing() -> Self {
        Self {
            fail_send: true,
            ..Default::default()
        }
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl MailTransport for RecordingTransport {
    fn connect(&self, _credentials: &MailCredentials) -> Result<Box<dyn MailConnection>, BoxError> {
        self.connects.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(self.clone()))
    }
}

impl MailConnection for RecordingTransport {
    fn authenticate(&mut self, _username: &str, _password: &str) -> Result<(), BoxError> {
        Ok(())
    }

    fn send(&mut self, email: &EmailMessage) -> Result<(), BoxError> {
        if self.fail_send {
            return Err("554 5.7.1 relay access denied".into());
        }

        self.sent.lock().unwrap().push(email.clone());

        Ok(())
    }

    fn close(&mut self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct TestApp {
    pub router: Router,
    pub transport: RecordingTransport,
}

pub fn test_config() -> Config {
    let mut config = Config::load(None).expect("Failed to load config");
    config.mail.username = "relay@example.com".to_owned();
    config.mail.password = "secret".to_owned();
    config.mail.sender = "relay@example.com".to_owned();
    config.mail.recipient = "owner@example.com".to_owned();
    config
}

pub fn create_test_app(transport: RecordingTransport) -> TestApp {
    create_test_app_with_config(test_config(), transport)
}

pub fn create_test_app_with_config(config: Config, transport: RecordingTransport) -> TestApp {
    let state = AppState::with_transport(config, Arc::new(transport.clone()));

    TestApp {
        router: portfolio::create_app(state),
        transport,
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
        let body = serde_urlencoded::to_string(fields).unwrap();

        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

pub async fn body_string(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}
