//! Unit tests for persisting reconcile results

#[cfg(test)]
mod tests {
    use crate::error::ControllerError;
    use crate::kinds::ManagedKind;
    use crate::reconciler::Reconciler;
    use crate::test_utils::*;
    use crate::watcher::{apply, cleanup};
    use crds::*;
    use dynatrace_client::models::alerting;
    use dynatrace_client::{MockSettingsService, Operation};
    use kube_runtime::controller::Action;
    use serde_json::Value;
    use std::sync::Arc;
    use std::time::Duration;

    const POLL: Duration = Duration::from_secs(60);

    fn reconciler(mock: &MockSettingsService<alerting::Profile>, credentials: StaticCredentials) -> Reconciler<Profile> {
        Reconciler::new(
            Arc::new(credentials),
            Arc::new(MockConnector::new(mock.clone())),
            Arc::new(StaticProfiles::default()),
        )
    }

    fn has_condition(status: &Value, type_: &str, reason: &str) -> bool {
        status["status"]["conditions"]
            .as_array()
            .is_some_and(|conditions| conditions.iter().any(|c| c["type"] == type_ && c["reason"] == reason))
    }

    #[tokio::test]
    async fn test_new_external_name_is_written_before_status() {
        let mock: MockSettingsService<alerting::Profile> = MockSettingsService::new();
        let writer = RecordingWriter::default();
        let profile = create_test_profile("prod-alerts", None);

        let action = apply(&reconciler(&mock, StaticCredentials::ok()), &writer, POLL, Arc::new(profile))
            .await
            .unwrap();

        assert_eq!(action, Action::requeue(POLL));
        assert_eq!(writer.targets(), vec![PatchTarget::Object, PatchTarget::Status]);

        let patches = writer.patches();
        let id = patches[0].1["metadata"]["annotations"][EXTERNAL_NAME_ANNOTATION]
            .as_str()
            .unwrap()
            .to_string();
        assert!(mock.stored(&id).is_some());
        assert_eq!(patches[1].1["status"]["atProvider"]["id"], id.as_str());
        assert!(has_condition(&patches[1].1, "Synced", "ReconcileSuccess"));
    }

    #[tokio::test]
    async fn test_unchanged_external_name_is_not_rewritten() {
        let mock: MockSettingsService<alerting::Profile> = MockSettingsService::new();
        let writer = RecordingWriter::default();
        let profile = create_test_profile("prod-alerts", Some("id-1"));
        mock.insert("id-1", profile.to_dto());

        apply(&reconciler(&mock, StaticCredentials::ok()), &writer, POLL, Arc::new(profile))
            .await
            .unwrap();

        assert_eq!(writer.targets(), vec![PatchTarget::Status]);
        assert_eq!(mock.writes(), 0);
    }

    #[tokio::test]
    async fn test_external_name_write_is_retried() {
        let mock: MockSettingsService<alerting::Profile> = MockSettingsService::new();
        let writer = RecordingWriter::failing_object_patches(2);
        let profile = create_test_profile("prod-alerts", None);

        apply(&reconciler(&mock, StaticCredentials::ok()), &writer, POLL, Arc::new(profile))
            .await
            .unwrap();

        assert_eq!(
            writer.targets(),
            vec![PatchTarget::Object, PatchTarget::Object, PatchTarget::Object, PatchTarget::Status]
        );
        assert_eq!(mock.calls(Operation::Create), 1);
    }

    #[tokio::test]
    async fn test_external_name_write_gives_up_after_three_attempts() {
        let mock: MockSettingsService<alerting::Profile> = MockSettingsService::new();
        let writer = RecordingWriter::failing_object_patches(10);
        let profile = create_test_profile("prod-alerts", None);

        let err = apply(&reconciler(&mock, StaticCredentials::ok()), &writer, POLL, Arc::new(profile))
            .await
            .unwrap_err();

        assert!(matches!(err, ControllerError::Watch(_)));
        assert_eq!(writer.targets(), vec![PatchTarget::Object; 3]);
    }

    #[tokio::test]
    async fn test_failed_apply_records_error_status() {
        let mock: MockSettingsService<alerting::Profile> = MockSettingsService::new();
        let writer = RecordingWriter::default();
        let profile = create_test_profile("prod-alerts", None);

        let err = apply(&reconciler(&mock, StaticCredentials::missing()), &writer, POLL, Arc::new(profile))
            .await
            .unwrap_err();

        assert!(matches!(err, ControllerError::Credentials(_)));
        assert_eq!(writer.targets(), vec![PatchTarget::Status]);
        let status = writer.last_status().unwrap();
        assert!(has_condition(&status, "Synced", "ReconcileError"));
    }

    #[tokio::test]
    async fn test_cleanup_records_status_and_waits_for_change() {
        let mock: MockSettingsService<alerting::Profile> = MockSettingsService::new();
        let writer = RecordingWriter::default();
        let profile = create_test_profile("prod-alerts", Some("id-1"));
        mock.insert("id-1", profile.to_dto());

        let action = cleanup(&reconciler(&mock, StaticCredentials::ok()), &writer, Arc::new(profile))
            .await
            .unwrap();

        assert_eq!(action, Action::await_change());
        assert!(mock.is_empty());
        assert_eq!(writer.targets(), vec![PatchTarget::Status]);
        assert!(has_condition(&writer.last_status().unwrap(), "Ready", "Deleting"));
    }

    #[tokio::test]
    async fn test_failed_cleanup_still_records_status() {
        let mock: MockSettingsService<alerting::Profile> = MockSettingsService::new();
        mock.fail_with(Operation::Delete, 500);
        let writer = RecordingWriter::default();
        let profile = create_test_profile("prod-alerts", Some("id-1"));
        mock.insert("id-1", profile.to_dto());

        let err = cleanup(&reconciler(&mock, StaticCredentials::ok()), &writer, Arc::new(profile))
            .await
            .unwrap_err();

        assert_eq!(err.remote_code(), Some(500));
        assert!(has_condition(&writer.last_status().unwrap(), "Synced", "ReconcileError"));
    }
}
