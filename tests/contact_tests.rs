use std::sync::{Arc, Mutex};

use axum_test::TestServer;
use serde_json::json;

use deals_api::config::Config;
use deals_api::db;
use deals_api::mail::{MailError, Mailer, OutgoingEmail};
use deals_api::routes::{create_router, AppState};

/// Stub mailer that records sent email and optionally fails every send
struct StubMailer {
    fail: bool,
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl StubMailer {
    fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            sent: Mutex::new(Vec::new()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait::async_trait]
impl Mailer for StubMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        if self.fail {
            let err = "not an address"
                .parse::<lettre::message::Mailbox>()
                .unwrap_err();
            return Err(MailError::Address(err));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

fn test_config() -> Config {
    Config {
        db_host: "localhost".to_string(),
        db_user: "root".to_string(),
        db_password: "secret".to_string(),
        db_name: "deals".to_string(),
        email_user: "D247Online@outlook.com".to_string(),
        email_password: "app-password".to_string(),
        smtp_host: "smtp.gmail.com".to_string(),
        smtp_port: 587,
        host: "127.0.0.1".to_string(),
        port: 3000,
    }
}

fn create_test_server(mailer: Arc<StubMailer>) -> TestServer {
    let config = test_config();
    // Lazy pool: no connection is made unless something acquires from it
    let pool = db::create_pool(&config);
    let state = AppState {
        pool,
        mailer,
        config,
    };
    TestServer::new(create_router(state)).unwrap()
}

fn valid_body() -> serde_json::Value {
    json!({
        "name": "Jordan Park",
        "email": "jordan@example.com",
        "subject": "Shipping question",
        "message": "Where is my order?"
    })
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(StubMailer::succeeding());
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_missing_fields_are_rejected() {
    let server = create_test_server(StubMailer::succeeding());

    for field in ["name", "email", "subject", "message"] {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove(field);

        let response = server.post("/api/contact").json(&body).await;
        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
        let json: serde_json::Value = response.json();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "All fields are required");
    }
}

#[tokio::test]
async fn test_empty_fields_are_rejected() {
    let server = create_test_server(StubMailer::succeeding());

    let mut body = valid_body();
    body["message"] = json!("");

    let response = server.post("/api/contact").json(&body).await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let json: serde_json::Value = response.json();
    assert_eq!(json["message"], "All fields are required");
}

#[tokio::test]
async fn test_invalid_email_is_rejected() {
    let server = create_test_server(StubMailer::succeeding());

    for email in ["no-at-sign", "a@b", "@b.com"] {
        let mut body = valid_body();
        body["email"] = json!(email);

        let response = server.post("/api/contact").json(&body).await;
        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
        let json: serde_json::Value = response.json();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid email address", "{email}");
    }
}

#[tokio::test]
async fn test_successful_submission_sends_email() {
    let mailer = StubMailer::succeeding();
    let server = create_test_server(mailer.clone());

    let response = server.post("/api/contact").json(&valid_body()).await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json["success"], true);
    assert!(json["message"].as_str().unwrap().contains("24-48 hours"));

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let email = &sent[0];
    assert_eq!(email.to, "D247Online@outlook.com");
    assert_eq!(email.reply_to, "jordan@example.com");
    assert_eq!(email.subject, "Contact Form: Shipping question");
    for body in [&email.html, &email.text] {
        assert!(body.contains("Jordan Park"));
        assert!(body.contains("jordan@example.com"));
        assert!(body.contains("Shipping question"));
        assert!(body.contains("Where is my order?"));
    }
}

#[tokio::test]
async fn test_form_encoded_submission_is_accepted() {
    let mailer = StubMailer::succeeding();
    let server = create_test_server(mailer.clone());

    let response = server
        .post("/api/contact")
        .form(&[
            ("name", "Jordan Park"),
            ("email", "jordan@example.com"),
            ("subject", "Shipping question"),
            ("message", "Where is my order?"),
        ])
        .await;

    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json["success"], true);

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].reply_to, "jordan@example.com");
}

#[tokio::test]
async fn test_form_encoded_body_uses_json_error_contract() {
    let server = create_test_server(StubMailer::succeeding());

    // Invalid email still produces the structured 400, not an extractor rejection
    let response = server
        .post("/api/contact")
        .form(&[
            ("name", "Jordan Park"),
            ("email", "not-an-email"),
            ("subject", "Shipping question"),
            ("message", "Where is my order?"),
        ])
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let json: serde_json::Value = response.json();
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Invalid email address");

    // Omitted fields take the required-fields path
    let response = server
        .post("/api/contact")
        .form(&[("name", "Jordan Park"), ("email", "jordan@example.com")])
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let json: serde_json::Value = response.json();
    assert_eq!(json["message"], "All fields are required");
}

#[tokio::test]
async fn test_send_failure_returns_fallback_message() {
    let server = create_test_server(StubMailer::failing());

    let response = server.post("/api/contact").json(&valid_body()).await;
    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = response.json();
    assert_eq!(json["success"], false);
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("Failed to send message"));
    assert!(message.contains("D247Online@outlook.com"));
}

#[tokio::test]
async fn test_validation_failure_sends_nothing() {
    let mailer = StubMailer::succeeding();
    let server = create_test_server(mailer.clone());

    let mut body = valid_body();
    body["email"] = json!("not-an-email");
    server.post("/api/contact").json(&body).await;

    assert!(mailer.sent.lock().unwrap().is_empty());
}
