//! Slack -> `builtin:problem.notifications` (type `SLACK`)

use super::ManagedKind;
use crds::{AlertingProfileReference, Slack, SlackParameters};
use dynatrace_client::models::notifications::{Notification, NotificationType, SlackNotification};

impl ManagedKind for Slack {
    type Dto = Notification;
    const KIND: &'static str = "Slack";

    fn to_dto(&self) -> Notification {
        slack_to_dto(&self.spec.for_provider)
    }

    fn alerting_profile_ref(&self) -> Option<&AlertingProfileReference> {
        Some(&self.spec.for_provider.alerting)
    }

    fn set_alerting_profile(&mut self, id: String) {
        self.spec.for_provider.alerting.alerting_profile = Some(id);
    }
}

pub fn slack_to_dto(p: &SlackParameters) -> Notification {
    Notification {
        enabled: p.enabled.or(p.enable).unwrap_or(true),
        display_name: p.name.clone(),
        notification_type: NotificationType::Slack,
        alerting_profile: p.alerting.alerting_profile.clone().unwrap_or_default(),
        email: None,
        slack: Some(SlackNotification {
            url: p.url.clone(),
            channel: p.channel.clone(),
            message: p.message.clone(),
        }),
        legacy_id: None,
    }
}
