//! Email -> `builtin:problem.notifications` (type `EMAIL`)

use super::ManagedKind;
use crds::{AlertingProfileReference, Email, EmailParameters};
use dynatrace_client::models::notifications::{EmailNotification, Notification, NotificationType};

impl ManagedKind for Email {
    type Dto = Notification;
    const KIND: &'static str = "Email";

    fn to_dto(&self) -> Notification {
        email_to_dto(&self.spec.for_provider)
    }

    fn alerting_profile_ref(&self) -> Option<&AlertingProfileReference> {
        Some(&self.spec.for_provider.alerting)
    }

    fn set_alerting_profile(&mut self, id: String) {
        self.spec.for_provider.alerting.alerting_profile = Some(id);
    }
}

pub fn email_to_dto(p: &EmailParameters) -> Notification {
    Notification {
        enabled: p.enabled,
        display_name: p.display_name.clone(),
        notification_type: NotificationType::Email,
        alerting_profile: p.alerting.alerting_profile.clone().unwrap_or_default(),
        email: Some(EmailNotification {
            subject: p.subject.clone(),
            recipients: p.to.clone(),
            cc_recipients: p.cc.clone(),
            bcc_recipients: p.bcc.clone(),
            notify_closed_problems: p.send_email_when_problem_is_closed,
            body: p.body.clone(),
        }),
        slack: None,
        legacy_id: None,
    }
}
