use crate::error::AppError;
use async_trait::async_trait;
use common::model::team::TeamRole;
use common::model::testimonial::Testimonial;
use common::requests::Delivery;
use log::{info, warn};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

const EXCERPT_CHARS: usize = 140;
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// What the client sees about the testimonial they are asked to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub client_name: String,
    pub business_name: String,
    pub excerpt: String,
}

impl RecordSummary {
    pub fn of(testimonial: &Testimonial, business_name: &str) -> Self {
        let mut excerpt: String = testimonial.text.chars().take(EXCERPT_CHARS).collect();
        if testimonial.text.chars().count() > EXCERPT_CHARS {
            excerpt.push('…');
        }
        Self {
            client_name: testimonial.client_name.clone(),
            business_name: business_name.to_string(),
            excerpt,
        }
    }
}

/// Transactional email sender.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_verification_request(
        &self,
        to: &str,
        summary: &RecordSummary,
        confirmation_link: &str,
    ) -> Result<(), AppError>;

    async fn send_team_invite(
        &self,
        to: &str,
        role: TeamRole,
        accept_link: &str,
    ) -> Result<(), AppError>;
}

/// Writes outgoing messages to the log instead of delivering them.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_verification_request(
        &self,
        to: &str,
        summary: &RecordSummary,
        confirmation_link: &str,
    ) -> Result<(), AppError> {
        info!(
            "verification request to {} for {} about {}: {}",
            to, summary.client_name, summary.business_name, confirmation_link
        );
        Ok(())
    }

    async fn send_team_invite(
        &self,
        to: &str,
        role: TeamRole,
        accept_link: &str,
    ) -> Result<(), AppError> {
        info!("team invite to {} as {}: {}", to, role.as_str(), accept_link);
        Ok(())
    }
}

/// Awaits one send, bounded by [`SEND_TIMEOUT`], and reports how it went.
/// Failures are logged under `what` and never propagate.
pub async fn deliver<F>(what: &str, send: F) -> Delivery
where
    F: Future<Output = Result<(), AppError>>,
{
    match timeout(SEND_TIMEOUT, send).await {
        Ok(Ok(())) => Delivery::Sent,
        Ok(Err(e)) => {
            warn!("{} not sent: {}", what, e);
            Delivery::Failed(e.to_string())
        }
        Err(_) => {
            warn!("{} not sent: notifier timed out", what);
            Delivery::Failed("notifier timed out".to_string())
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// Records every message; fails all sends when `fail` is set.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub fail: bool,
        pub sent: Mutex<Vec<(String, String)>>,
    }

    impl RecordingNotifier {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        pub fn links(&self) -> Vec<String> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .map(|(_, link)| link.clone())
                .collect()
        }

        fn push(&self, to: &str, link: &str) -> Result<(), AppError> {
            if self.fail {
                return Err(AppError::Dependency("smtp relay refused".to_string()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), link.to_string()));
            Ok(())
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send_verification_request(
            &self,
            to: &str,
            _summary: &RecordSummary,
            confirmation_link: &str,
        ) -> Result<(), AppError> {
            self.push(to, confirmation_link)
        }

        async fn send_team_invite(
            &self,
            to: &str,
            _role: TeamRole,
            accept_link: &str,
        ) -> Result<(), AppError> {
            self.push(to, accept_link)
        }
    }
}
