//! End-to-end tests for the welcome pipeline
//!
//! These tests run the full password -> render -> plain text -> send flow
//! against the in-memory mailer, without any SMTP server.

use std::sync::Arc;

use welcome_mail_service::config::Settings;
use welcome_mail_service::mailer::{create_mailer, MemoryMailer};
use welcome_mail_service::password::{CharacterSets, PasswordRequirement, SYMBOLS};
use welcome_mail_service::plaintext::to_plain_text;
use welcome_mail_service::template::{render, ReservedValues, UserRecord};
use welcome_mail_service::welcome::{
    NewAccount, SkipReason, WelcomeConfig, WelcomeError, WelcomeMailer, WelcomeOutcome,
};

fn settings() -> Settings {
    let mut settings = Settings::default();
    settings.mail.from_email = "team@cms.test".to_string();
    settings.mail.from_name = "CMS Team".to_string();
    settings.mail.admin_url = "https://cms.test/admin/".to_string();
    settings.mail.bcc_email = "admin@cms.test, audit@cms.test".to_string();
    settings.mail.additional_param = "-f bounce@cms.test".to_string();
    settings.mail.transport = "memory".to_string();
    settings
}

fn create_test_environment(settings: &Settings) -> (WelcomeMailer, Arc<MemoryMailer>) {
    let outbox = Arc::new(MemoryMailer::new());
    let welcome = WelcomeMailer::new(WelcomeConfig::from_settings(settings), outbox.clone());
    (welcome, outbox)
}

// =============================================================================
// Full pipeline
// =============================================================================

#[tokio::test]
async fn test_default_body_end_to_end() {
    let mut settings = settings();
    settings.mail.generate_password = true;
    settings.password.requirements = vec![
        PasswordRequirement::Letter,
        PasswordRequirement::Digit,
        PasswordRequirement::Other,
    ];
    let (welcome, outbox) = create_test_environment(&settings);

    let account = NewAccount::new("alice", "alice@cms.test")
        .with_field("first_name", "Alice")
        .with_field("last_name", "Liddell");

    let outcome = welcome.process(&account).await.unwrap();
    let password = match outcome {
        WelcomeOutcome::Sent {
            generated_password: Some(password),
            ..
        } => password,
        other => panic!("unexpected outcome {:?}", other),
    };
    assert_eq!(password.len(), 12);
    assert!(password.chars().any(|c| SYMBOLS.contains(c)));

    let sent = outbox.sent();
    assert_eq!(sent.len(), 1);
    let message = &sent[0];

    assert_eq!(message.bcc.len(), 2);
    assert_eq!(message.envelope_sender.as_deref(), Some("bounce@cms.test"));
    assert!(message.html_body.contains("Welcome Alice Liddell"));
    assert!(message.html_body.contains(&password));

    assert!(message.text_body.contains("Welcome Alice Liddell"));
    assert!(message
        .text_body
        .contains("https://cms.test/admin/ (https://cms.test/admin/)"));
    assert!(message.text_body.contains("team@cms.test"));
    assert!(!message.text_body.contains('<'));
    assert!(!message.text_body.contains("\n\n"));
}

#[tokio::test]
async fn test_account_json_through_pipeline() {
    let (welcome, outbox) = create_test_environment(&settings());

    let json = r#"{
        "name": "bob",
        "email": "bob@cms.test",
        "password": "Pw4-bob-ok",
        "message": "<p>Hello {first_name} ({name})</p>\n<p>Your password: {pass}</p>\n<p>{nickname}</p>",
        "fields": {"first_name": "Bob", "nickname": ""}
    }"#;
    let account = NewAccount::from_reader(json.as_bytes()).unwrap();

    let outcome = welcome.process(&account).await.unwrap();
    assert!(outcome.is_sent());

    let message = &outbox.sent()[0];
    assert_eq!(
        message.html_body,
        "<p>Hello Bob (bob)</p>\n<p>Your password: Pw4-bob-ok</p>\n<p>\u{a0}</p>"
    );
    assert_eq!(
        message.text_body,
        "Hello Bob (bob)\nYour password: Pw4-bob-ok\n\u{a0}"
    );
}

#[tokio::test]
async fn test_gating_and_failures() {
    let mut settings = settings();
    settings.mail.automatic_email_send = false;
    let (welcome, outbox) = create_test_environment(&settings);

    let account = NewAccount::new("carol", "carol@cms.test").with_password("pw");
    assert_eq!(
        welcome.process(&account).await.unwrap(),
        WelcomeOutcome::Skipped {
            reason: SkipReason::NotRequested
        }
    );

    let account = NewAccount::new("carol", "").with_send_email(true).with_password("pw");
    assert!(matches!(
        welcome.process(&account).await,
        Err(WelcomeError::MissingCredentials { .. })
    ));

    assert_eq!(outbox.count(), 0);
}

#[tokio::test]
async fn test_factory_memory_transport() {
    let settings = settings();
    let mailer = create_mailer(&settings.mail.transport, &settings.smtp).unwrap();
    assert_eq!(mailer.backend_name(), "memory");

    let welcome = WelcomeMailer::new(WelcomeConfig::from_settings(&settings), mailer);
    let outcome = welcome
        .send_test(&NewAccount::new("admin", "admin@cms.test"))
        .await
        .unwrap();
    assert!(outcome.is_sent());
}

// =============================================================================
// Leaf components together
// =============================================================================

#[test]
fn test_render_then_downgrade() {
    let reserved = ReservedValues::new("Xk7#mPq2", "https://cms.test/admin/", "team@cms.test");
    let record: UserRecord = [("first_name", "Alice"), ("pass", "wrong")]
        .into_iter()
        .collect();

    let html = render(
        "<html><head><title>{first_name}</title></head><body>\n\
         <!-- greeting -->\n<p>Hi {first_name},</p>\n\
         <p><a href=\"{adminUrl}\" target=\"_blank\">Log in</a> with {pass}</p>\n\
         </body></html>",
        &reserved,
        &record,
    );

    assert_eq!(
        to_plain_text(&html),
        "\nHi Alice,\nLog in (https://cms.test/admin/) with Xk7#mPq2\n"
    );
}

#[test]
fn test_password_sets_from_settings() {
    let settings = settings();
    let config = WelcomeConfig::from_settings(&settings);

    assert_eq!(config.password_policy.spec().sets, CharacterSets::alphanumeric());
    assert_eq!(config.password_policy.spec().length, 12);
}
