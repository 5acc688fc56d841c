//! HTTP-level tests for the Settings 2.0 client against a mockito server

use dynatrace_client::models::alerting::Profile;
use dynatrace_client::models::notifications::{Notification, NotificationType, SlackNotification};
use dynatrace_client::{Credentials, DynatraceError, HttpSettingsService, SettingsClient, SettingsService};
use mockito::Matcher;

fn service<V>(server: &mockito::ServerGuard) -> HttpSettingsService<V> {
    let creds = Credentials::new(server.url(), "dt0c01.test");
    HttpSettingsService::new(SettingsClient::new(&creds).unwrap())
}

fn slack() -> Notification {
    Notification {
        enabled: true,
        display_name: "ops".to_string(),
        notification_type: NotificationType::Slack,
        alerting_profile: "profile-1".to_string(),
        email: None,
        slack: Some(SlackNotification {
            url: "https://hooks.slack.com/x".to_string(),
            channel: "#ops".to_string(),
            message: "{ProblemTitle}".to_string(),
        }),
        legacy_id: None,
    }
}

#[tokio::test]
async fn test_get_decodes_value_and_sends_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v2/settings/objects/obj-1")
        .match_header("authorization", "Api-Token dt0c01.test")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"objectId":"obj-1","schemaId":"builtin:alerting.profile",
                "value":{"name":"default","severityRules":[],"eventFilters":[],"legacyId":"42"}}"#,
        )
        .create_async()
        .await;

    let profile = service::<Profile>(&server).get("obj-1").await.unwrap();
    assert_eq!(profile.name, "default");
    assert_eq!(profile.legacy_id.as_deref(), Some("42"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_missing_object_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v2/settings/objects/missing")
        .with_status(404)
        .with_body(r#"{"error":{"code":404,"message":"Settings not found"}}"#)
        .create_async()
        .await;

    let err = service::<Profile>(&server).get("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("Settings not found"));
}

#[tokio::test]
async fn test_create_posts_schema_scope_and_value() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v2/settings/objects")
        .match_body(Matcher::PartialJson(serde_json::json!([{
            "schemaId": "builtin:problem.notifications",
            "scope": "environment",
            "value": {"type": "SLACK", "displayName": "ops", "alertingProfile": "profile-1"}
        }])))
        .with_status(200)
        .with_body(r#"[{"code":200,"objectId":"new-id"}]"#)
        .create_async()
        .await;

    let stub = service::<Notification>(&server).create(&slack()).await.unwrap();
    assert_eq!(stub.id, "new-id");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_item_error_carries_item_code() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/v2/settings/objects")
        .with_status(400)
        .with_body(
            r#"[{"code":400,"error":{"code":400,"message":"Validation failed",
                "constraintViolations":[{"path":"slackNotification/url","message":"must be a URL"}]}}]"#,
        )
        .create_async()
        .await;

    let err = service::<Notification>(&server).create(&slack()).await.unwrap_err();
    assert_eq!(err.code(), Some(400));
    assert!(err.to_string().contains("slackNotification/url: must be a URL"));
}

#[tokio::test]
async fn test_create_rejected_with_empty_item_list_keeps_status_code() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/v2/settings/objects")
        .with_status(403)
        .with_body("[]")
        .create_async()
        .await;

    let err = service::<Notification>(&server).create(&slack()).await.unwrap_err();
    assert_eq!(err.code(), Some(403));
}

#[tokio::test]
async fn test_create_accepted_without_items_is_invalid_response() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/v2/settings/objects")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let err = service::<Notification>(&server).create(&slack()).await.unwrap_err();
    assert!(matches!(err, DynatraceError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_create_error_envelope_is_decoded() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/v2/settings/objects")
        .with_status(401)
        .with_body(r#"{"error":{"code":401,"message":"Missing authorization parameter."}}"#)
        .create_async()
        .await;

    let err = service::<Notification>(&server).create(&slack()).await.unwrap_err();
    assert_eq!(err.code(), Some(401));
    assert!(err.to_string().contains("Missing authorization parameter."));
}

#[tokio::test]
async fn test_update_puts_value_envelope() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/v2/settings/objects/obj-1")
        .match_body(Matcher::PartialJson(serde_json::json!({"value": {"displayName": "ops"}})))
        .with_status(200)
        .with_body(r#"{"code":200,"objectId":"obj-1"}"#)
        .create_async()
        .await;

    service::<Notification>(&server).update("obj-1", &slack()).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_reports_server_errors() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("DELETE", "/api/v2/settings/objects/obj-1")
        .with_status(500)
        .create_async()
        .await;

    let err = service::<Notification>(&server).delete("obj-1").await.unwrap_err();
    assert_eq!(err.code(), Some(500));
    assert!(!err.is_not_found());
}
