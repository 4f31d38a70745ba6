//! Controller flow: initial load, submit outcomes, and mounted views.

use pretty_assertions::assert_eq;
use roster_config::{
    FormConfig, FormFieldConfig, RequiredFieldRule, RosterConfig, ValidationConfig,
};
use roster_core::{FormElement, RecordApp, RemoteError, SubmitOutcome};
use roster_protocol::{Record, RecordId};
use roster_test_utils::{FailingRemote, StubRemote};
use serde_json::json;
use std::sync::Arc;

fn record(value: serde_json::Value) -> Record {
    serde_json::from_value(value).expect("record")
}

fn form(name: &str, email: &str) -> Vec<FormElement> {
    vec![
        FormElement::named("name", name),
        FormElement::named("email", email),
        FormElement::unnamed("Submit"),
    ]
}

fn labels(app: &RecordApp) -> Vec<String> {
    app.list()
        .items()
        .iter()
        .map(|item| item.label.clone())
        .collect()
}

#[tokio::test]
async fn init_renders_loaded_records_and_blank_form() {
    let remote = Arc::new(StubRemote::new().with_fetch(Ok(vec![
        record(json!({ "id": 1, "name": "Leanne" })),
        record(json!({ "id": 2, "name": "Ervin" })),
    ])));
    let mut app = RecordApp::from_config(&RosterConfig::default(), remote);

    let report = app.init().await;

    assert_eq!(report.loaded, 2);
    assert!(report.failure.is_none());
    assert_eq!(labels(&app), vec!["Leanne", "Ervin"]);
    assert!(!app.form().has_errors());
    assert_eq!(app.form().field("name").expect("name").value, "");
}

#[tokio::test]
async fn init_failure_renders_empty_list() {
    let mut app = RecordApp::from_config(&RosterConfig::default(), Arc::new(FailingRemote));

    let report = app.init().await;

    assert_eq!(report.loaded, 0);
    assert_eq!(
        report.failure.expect("failure").source,
        FailingRemote::error()
    );
    assert!(app.list().is_empty());
    assert!(app.page().contains("<ul>\n</ul>"));
}

#[tokio::test]
async fn created_record_heads_list_and_form_resets() {
    let remote = Arc::new(
        StubRemote::new()
            .with_fetch(Ok(vec![record(json!({ "id": 1, "name": "Leanne" }))]))
            .with_persist(Ok(record(
                json!({ "id": 7, "name": "A", "email": "a@b.com" }),
            ))),
    );
    let mut app = RecordApp::from_config(&RosterConfig::default(), remote);
    app.init().await;

    let outcome = app.submit(&form("A", "a@b.com")).await;

    let SubmitOutcome::Created(created) = outcome else {
        panic!("expected created outcome");
    };
    assert_eq!(created.id, Some(RecordId::Number(7)));
    assert_eq!(labels(&app), vec!["A", "Leanne"]);
    assert_eq!(app.list().items()[0].id, Some(RecordId::Number(7)));
    assert_eq!(app.records().len(), 2);
    assert_eq!(app.form().field("name").expect("name").value, "");
    assert_eq!(app.form().field("email").expect("email").value, "");
}

#[tokio::test]
async fn invalid_submit_redisplays_data_with_messages() {
    let remote = Arc::new(StubRemote::new());
    let mut app = RecordApp::from_config(&RosterConfig::default(), remote.clone());
    app.init().await;

    let outcome = app.submit(&form("Jo", "")).await;

    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("expected invalid outcome");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("email"), Some("email is required"));

    let name = app.form().field("name").expect("name");
    assert_eq!(name.value, "Jo");
    assert_eq!(name.error, None);
    let email = app.form().field("email").expect("email");
    assert_eq!(email.error.as_deref(), Some("email is required"));

    assert!(app.list().is_empty());
    assert_eq!(remote.persist_calls(), 0);
}

#[tokio::test]
async fn persist_failure_keeps_list_and_submitted_values() {
    let remote = Arc::new(
        StubRemote::new()
            .with_fetch(Ok(vec![record(json!({ "id": 1, "name": "Leanne" }))]))
            .with_persist(Err(RemoteError::Timeout("deadline elapsed".to_string()))),
    );
    let mut app = RecordApp::from_config(&RosterConfig::default(), remote);
    app.init().await;
    let page_list_before = app.list().clone();

    let outcome = app.submit(&form("A", "a@b.com")).await;

    assert!(matches!(outcome, SubmitOutcome::PersistFailed(_)));
    assert_eq!(app.list(), &page_list_before);
    assert_eq!(app.form().field("name").expect("name").value, "A");
    assert_eq!(app.form().field("email").expect("email").value, "a@b.com");
    assert!(!app.form().has_errors());
}

#[tokio::test]
async fn configured_rules_and_labels_drive_the_form() {
    let config = RosterConfig::builder()
        .form(FormConfig {
            fields: vec![
                FormFieldConfig::new("name", "Full name"),
                FormFieldConfig::new("email", "Contact"),
            ],
            submit_label: "Save".to_string(),
            ..FormConfig::default()
        })
        .validation(ValidationConfig {
            required: vec![RequiredFieldRule::new("name", "Please enter a name")],
        })
        .build();
    let mut app = RecordApp::from_config(&config, Arc::new(StubRemote::new()));
    app.init().await;

    let outcome = app.submit(&form("", "")).await;

    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("expected invalid outcome");
    };
    assert_eq!(errors.get("name"), Some("Please enter a name"));
    assert_eq!(errors.get("email"), None);

    let html = app.page();
    assert!(html.contains("<label>Full name</label>"));
    assert!(html.contains("<input type=\"submit\" value=\"Save\">"));
    assert!(html.contains("Please enter a name"));
}

#[tokio::test]
async fn reset_clears_list() {
    let remote = Arc::new(StubRemote::new().with_fetch(Ok(vec![record(json!({ "name": "A" }))])));
    let mut app = RecordApp::from_config(&RosterConfig::default(), remote);
    app.init().await;

    app.reset();

    assert!(app.records().is_empty());
    assert!(app.list().is_empty());
}

#[tokio::test]
async fn configured_extra_fields_are_persisted() {
    let config = RosterConfig::builder()
        .form(FormConfig {
            fields: vec![
                FormFieldConfig::new("name", "Name:"),
                FormFieldConfig::new("email", "Email:"),
                FormFieldConfig::new("phone", "Phone:"),
            ],
            ..FormConfig::default()
        })
        .validation(ValidationConfig {
            required: vec![RequiredFieldRule::new("phone", "phone is required")],
        })
        .build();
    config.validate().expect("valid config");
    let remote = Arc::new(StubRemote::new());
    let mut app = RecordApp::from_config(&config, remote.clone());
    app.init().await;

    let mut elements = form("A", "a@b.com");
    elements.push(FormElement::named("phone", "555"));
    let outcome = app.submit(&elements).await;

    let SubmitOutcome::Created(created) = outcome else {
        panic!("expected created outcome");
    };
    assert_eq!(created.field("phone"), Some("555"));
    assert_eq!(
        serde_json::to_value(remote.persisted()).expect("json"),
        json!([{ "name": "A", "email": "a@b.com", "phone": "555" }])
    );
}
