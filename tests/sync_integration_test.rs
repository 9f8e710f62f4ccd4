//! End-to-end sync runs against mock HTTP servers for both the appointment
//! source and the Calendar API.

use calbridge::adapters::google::{GoogleCalendarClient, StaticTokenProvider};
use calbridge::adapters::source::HttpAppointmentSource;
use calbridge::config::{secret_string, CalendarConfig, ExistingEventPolicy, SourceConfig};
use calbridge::core::sync::SyncOrchestrator;
use calbridge::domain::BridgeError;
use mockito::{Matcher, Server};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

const CHECKUP: &str = r#"[{
    "id": "apt_1",
    "title": "Checkup",
    "start_time": "2026-02-20T10:00:00+00:00",
    "end_time": "2026-02-20T10:30:00+00:00"
}]"#;

fn source_config(base_url: &str) -> SourceConfig {
    SourceConfig {
        base_url: base_url.to_string(),
        username: "bridge".to_string(),
        password: Some(secret_string("s3cret".to_string())),
        timeout_seconds: 5,
    }
}

fn calendar_config(base_url: &str, credentials_file: &str) -> CalendarConfig {
    CalendarConfig {
        calendar_id: "primary".to_string(),
        credentials_file: credentials_file.to_string(),
        api_base_url: base_url.to_string(),
        timeout_seconds: 5,
        existing_event_policy: ExistingEventPolicy::Update,
    }
}

fn orchestrator(server_url: &str, policy: ExistingEventPolicy) -> SyncOrchestrator {
    let source = HttpAppointmentSource::new(&source_config(server_url)).unwrap();
    let calendar = GoogleCalendarClient::with_token_provider(
        &calendar_config(server_url, ""),
        Arc::new(StaticTokenProvider::new("test-token")),
    )
    .unwrap();

    SyncOrchestrator::new(Arc::new(source), Arc::new(calendar), policy, false)
}

fn lookup_query(id: &str) -> Matcher {
    Matcher::UrlEncoded(
        "privateExtendedProperty".into(),
        format!("source_appointment_id={id}"),
    )
}

#[tokio::test]
async fn test_checkup_created_then_updated() {
    let mut server = Server::new_async().await;

    let _source = server
        .mock("GET", "/appointments")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CHECKUP)
        .create_async()
        .await;

    let empty_lookup = server
        .mock("GET", "/calendars/primary/events")
        .match_query(lookup_query("apt_1"))
        .with_status(200)
        .with_body(r#"{"items":[]}"#)
        .create_async()
        .await;

    let insert = server
        .mock("POST", "/calendars/primary/events")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "summary": "Checkup",
            "description": "",
            "start": {"dateTime": "2026-02-20T10:00:00+00:00"},
            "end": {"dateTime": "2026-02-20T10:30:00+00:00"},
            "extendedProperties": {"private": {"source_appointment_id": "apt_1"}}
        })))
        .with_status(200)
        .with_body(r#"{"id":"evt_1"}"#)
        .expect(1)
        .create_async()
        .await;

    let sync = orchestrator(&server.url(), ExistingEventPolicy::Update);

    let first = sync.run_sync(None).await.unwrap();
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::json!({
            "fetched": 1, "created": 1, "updated": 0,
            "skipped": 0, "failed": 0, "errors": []
        })
    );

    // The event now exists on the calendar
    empty_lookup.remove_async().await;
    let _found_lookup = server
        .mock("GET", "/calendars/primary/events")
        .match_query(lookup_query("apt_1"))
        .with_status(200)
        .with_body(
            r#"{"items":[{"id":"evt_1","summary":"Checkup","description":"",
                "start":{"dateTime":"2026-02-20T10:00:00Z"},
                "end":{"dateTime":"2026-02-20T10:30:00Z"},
                "extendedProperties":{"private":{"source_appointment_id":"apt_1"}}}]}"#,
        )
        .create_async()
        .await;

    let update = server
        .mock("PUT", "/calendars/primary/events/evt_1")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "extendedProperties": {"private": {"source_appointment_id": "apt_1"}}
        })))
        .with_status(200)
        .with_body(r#"{"id":"evt_1"}"#)
        .expect(1)
        .create_async()
        .await;

    let second = sync.run_sync(None).await.unwrap();
    assert_eq!(second.fetched, 1);
    assert_eq!(second.created, 0);
    assert_eq!(second.updated, 1);

    insert.assert_async().await;
    update.assert_async().await;
}

#[tokio::test]
async fn test_update_if_changed_skips_unchanged_event() {
    let mut server = Server::new_async().await;

    let _source = server
        .mock("GET", "/appointments")
        .with_status(200)
        .with_body(CHECKUP)
        .create_async()
        .await;

    let _lookup = server
        .mock("GET", "/calendars/primary/events")
        .match_query(lookup_query("apt_1"))
        .with_status(200)
        .with_body(
            r#"{"items":[{"id":"evt_1","summary":"Checkup",
                "start":{"dateTime":"2026-02-20T11:00:00+01:00"},
                "end":{"dateTime":"2026-02-20T11:30:00+01:00"}}]}"#,
        )
        .create_async()
        .await;

    let update = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let sync = orchestrator(&server.url(), ExistingEventPolicy::UpdateIfChanged);
    let result = sync.run_sync(None).await.unwrap();

    assert_eq!(result.skipped, 1);
    assert_eq!(result.updated, 0);
    update.assert_async().await;
}

#[tokio::test]
async fn test_source_failure_aborts_without_calendar_calls() {
    let mut server = Server::new_async().await;

    let _source = server
        .mock("GET", "/appointments")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let calendar = server
        .mock("GET", "/calendars/primary/events")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let sync = orchestrator(&server.url(), ExistingEventPolicy::Update);
    let err = sync.run_sync(None).await.unwrap_err();

    assert!(matches!(err, BridgeError::SourceUnavailable(_)));
    calendar.assert_async().await;
}

#[tokio::test]
async fn test_partial_failures_do_not_stop_the_batch() {
    let mut server = Server::new_async().await;

    let _source = server
        .mock("GET", "/appointments")
        .with_status(200)
        .with_body(
            r#"[
                {"id":"apt_bad","title":"Backwards","start_time":"2026-02-20T11:00:00Z","end_time":"2026-02-20T10:00:00Z"},
                {"id":"apt_down","start_time":"2026-02-20T12:00:00Z","end_time":"2026-02-20T12:30:00Z"},
                {"id":"apt_ok","start_time":"2026-02-20T13:00:00Z","end_time":"2026-02-20T13:30:00Z"}
            ]"#,
        )
        .create_async()
        .await;

    let _down = server
        .mock("GET", "/calendars/primary/events")
        .match_query(lookup_query("apt_down"))
        .with_status(503)
        .with_body("backend error")
        .create_async()
        .await;

    let _ok = server
        .mock("GET", "/calendars/primary/events")
        .match_query(lookup_query("apt_ok"))
        .with_status(200)
        .with_body(r#"{"items":[]}"#)
        .create_async()
        .await;

    let insert = server
        .mock("POST", "/calendars/primary/events")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "summary": "Appointment",
            "extendedProperties": {"private": {"source_appointment_id": "apt_ok"}}
        })))
        .with_status(200)
        .with_body(r#"{"id":"evt_ok"}"#)
        .expect(1)
        .create_async()
        .await;

    let sync = orchestrator(&server.url(), ExistingEventPolicy::Update);
    let result = sync.run_sync(None).await.unwrap();

    assert_eq!(result.fetched, 3);
    assert_eq!(result.created, 1);
    assert_eq!(result.failed, 2);
    assert_eq!(
        result.created + result.updated + result.skipped + result.failed,
        result.fetched
    );
    assert!(result.errors[0].starts_with("apt_bad: Invalid appointment"));
    assert!(result.errors[1].starts_with("apt_down: Calendar unavailable"));

    insert.assert_async().await;
}

#[tokio::test]
async fn test_service_account_token_is_used() {
    let mut server = Server::new_async().await;

    let key_pem = include_str!("fixtures/test_rsa_key.pem");
    let credentials = serde_json::json!({
        "type": "service_account",
        "client_email": "calbridge@calbridge-test.iam.gserviceaccount.com",
        "private_key": key_pem,
        "token_uri": format!("{}/token", server.url()),
    });
    let mut key_file = NamedTempFile::new().unwrap();
    key_file
        .write_all(credentials.to_string().as_bytes())
        .unwrap();

    let token = server
        .mock("POST", "/token")
        .with_status(200)
        .with_body(r#"{"access_token":"ya29.integration","expires_in":3600}"#)
        .expect(1)
        .create_async()
        .await;

    let _source = server
        .mock("GET", "/appointments")
        .with_status(200)
        .with_body(CHECKUP)
        .create_async()
        .await;

    let lookup = server
        .mock("GET", "/calendars/primary/events")
        .match_query(Matcher::Any)
        .match_header("authorization", "Bearer ya29.integration")
        .with_status(200)
        .with_body(r#"{"items":[]}"#)
        .create_async()
        .await;

    let _insert = server
        .mock("POST", "/calendars/primary/events")
        .match_header("authorization", "Bearer ya29.integration")
        .with_status(200)
        .with_body(r#"{"id":"evt_1"}"#)
        .create_async()
        .await;

    let source = HttpAppointmentSource::new(&source_config(&server.url())).unwrap();
    let calendar = GoogleCalendarClient::from_config(&calendar_config(
        &server.url(),
        &key_file.path().to_string_lossy(),
    ))
    .unwrap();
    let sync = SyncOrchestrator::new(
        Arc::new(source),
        Arc::new(calendar),
        ExistingEventPolicy::Update,
        false,
    );

    let result = sync.run_sync(None).await.unwrap();
    assert_eq!(result.created, 1);

    // One token serves both the lookup and the insert
    token.assert_async().await;
    lookup.assert_async().await;
}
