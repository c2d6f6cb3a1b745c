// ABOUTME: Applicant notifications sent after a review decision
// ABOUTME: The default notifier only writes a structured log line

use async_trait::async_trait;
use sleep_core::TeamApplication;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
#[error("Notification to {recipient} failed: {reason}")]
pub struct NotifyError {
    pub recipient: String,
    pub reason: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Tell the applicant about the new status of their application
    async fn application_reviewed(&self, application: &TeamApplication) -> Result<(), NotifyError>;
}

/// Logs the notification instead of delivering it
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn application_reviewed(&self, application: &TeamApplication) -> Result<(), NotifyError> {
        info!(
            recipient = %application.email,
            application_id = application.id,
            status = %application.status,
            "Sending review notification"
        );
        Ok(())
    }
}
