//! Verification State Machine.
//!
//! These functions decide what a transition should do given a record's current
//! state; they never mutate anything. The backend applies the decision with a
//! conditional update that matches the observed `from` status, so a record that
//! changed (or vanished) in between is never overwritten.
//!
//! ```text
//!  create(email)            --> pending_verification --confirm(token)--> verified
//!  create(manual|linkedin)
//!     by owner              --> verified
//!     by reviewer           --> pending --------------owner verify------> verified
//!  pending_verification     ---------------------------owner verify------> verified
//!  rejected                 (reserved, no transition in or out)
//! ```

use crate::model::testimonial::{Origin, Testimonial, TestimonialStatus, VerificationMethod};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// What a verification request should do to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Move the record from `from` to `verified`.
    Verify { from: TestimonialStatus },
    /// The record is already verified; nothing to write.
    AlreadyVerified,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("a rejected testimonial cannot be verified")]
    Rejected,
    #[error("testimonial is {0}, not awaiting email confirmation")]
    NotAwaitingConfirmation(TestimonialStatus),
    #[error("testimonial is already verified")]
    AlreadyVerified,
    #[error("confirmation link has expired")]
    LinkExpired,
}

/// Status a freshly created record starts in.
pub fn initial_status(method: VerificationMethod, origin: Origin) -> TestimonialStatus {
    match (method, origin) {
        (VerificationMethod::Email, _) => TestimonialStatus::PendingVerification,
        (_, Origin::Owner) => TestimonialStatus::Verified,
        (_, Origin::Reviewer) => TestimonialStatus::Pending,
    }
}

/// Only the email channel carries a confirmation token.
pub fn issues_token(method: VerificationMethod) -> bool {
    method == VerificationMethod::Email
}

/// The client clicked the confirmation link for `record` at `now`.
///
/// A verified record answers [`Step::AlreadyVerified`] even when the link has
/// since expired, so a second click is always harmless.
pub fn plan_confirmation(
    record: &Testimonial,
    now: DateTime<Utc>,
) -> Result<Step, TransitionError> {
    match record.status {
        TestimonialStatus::Verified => Ok(Step::AlreadyVerified),
        TestimonialStatus::Rejected => Err(TransitionError::Rejected),
        TestimonialStatus::Pending => Err(TransitionError::NotAwaitingConfirmation(
            TestimonialStatus::Pending,
        )),
        TestimonialStatus::PendingVerification => {
            if record.token_expires_at.is_some_and(|exp| exp <= now) {
                return Err(TransitionError::LinkExpired);
            }
            Ok(Step::Verify {
                from: TestimonialStatus::PendingVerification,
            })
        }
    }
}

/// The owner's "Verify & Publish" override.
pub fn plan_force_verify(status: TestimonialStatus) -> Result<Step, TransitionError> {
    match status {
        TestimonialStatus::Verified => Ok(Step::AlreadyVerified),
        TestimonialStatus::Rejected => Err(TransitionError::Rejected),
        from @ (TestimonialStatus::Pending | TestimonialStatus::PendingVerification) => {
            Ok(Step::Verify { from })
        }
    }
}

/// Re-issuing a confirmation link is only meaningful while one is awaited.
pub fn plan_resend(status: TestimonialStatus) -> Result<(), TransitionError> {
    match status {
        TestimonialStatus::PendingVerification => Ok(()),
        TestimonialStatus::Verified => Err(TransitionError::AlreadyVerified),
        TestimonialStatus::Rejected => Err(TransitionError::Rejected),
        other => Err(TransitionError::NotAwaitingConfirmation(other)),
    }
}
