//! The owner's "Verify & Publish" override, and the conditional write shared
//! with the public confirmation link.

use crate::error::AppError;
use crate::services::identity::Owner;
use crate::services::view::TestimonialView;
use crate::state::AppState;
use crate::store::{StatusExtras, Store};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use chrono::{DateTime, SubsecRound, Utc};
use common::lifecycle::{self, Step};
use common::model::testimonial::{Testimonial, TestimonialStatus};
use common::requests::VerifyOutcome;
use log::info;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verified {
    pub outcome: VerifyOutcome,
    pub testimonial: TestimonialView,
}

pub async fn process(
    owner: Owner,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> impl Responder {
    match force_verify(&state.store, owner.id(), &id, Utc::now()) {
        Ok((outcome, testimonial)) => HttpResponse::Ok().json(Verified {
            outcome,
            testimonial: TestimonialView::owner(testimonial),
        }),
        Err(e) => e.error_response(),
    }
}

/// Moves one of the owner's pending records to `verified`, skipping the
/// client confirmation. Already verified records are left untouched.
pub fn force_verify(
    store: &Store,
    owner_id: &str,
    id: &str,
    now: DateTime<Utc>,
) -> Result<(VerifyOutcome, Testimonial), AppError> {
    let record = store
        .get_testimonial(owner_id, id)?
        .ok_or_else(|| AppError::NotFound(format!("testimonial {id} not found")))?;

    match lifecycle::plan_force_verify(record.status)? {
        Step::AlreadyVerified => Ok((VerifyOutcome::AlreadyVerified, record)),
        Step::Verify { from } => apply_verification(store, record, from, now),
    }
}

/// Writes `from -> verified` for `record`, conditional on `from` still holding.
///
/// When the write misses, the record is read again: if someone else verified
/// it meanwhile the outcome is `AlreadyVerified`, if it was deleted the
/// result is `NotFound`, anything else is a conflict.
pub(crate) fn apply_verification(
    store: &Store,
    record: Testimonial,
    from: TestimonialStatus,
    now: DateTime<Utc>,
) -> Result<(VerifyOutcome, Testimonial), AppError> {
    let now = now.trunc_subsecs(6);
    let extras = StatusExtras {
        verified_at: Some(now),
    };
    if store.update_status(
        &record.owner_id,
        &record.id,
        from,
        TestimonialStatus::Verified,
        &extras,
    )? {
        info!("testimonial {} verified (was {})", record.id, from);
        let mut record = record;
        record.status = TestimonialStatus::Verified;
        record.verified_at = Some(now);
        return Ok((VerifyOutcome::Verified, record));
    }

    match store.get_testimonial(&record.owner_id, &record.id)? {
        Some(current) if current.status == TestimonialStatus::Verified => {
            Ok((VerifyOutcome::AlreadyVerified, current))
        }
        Some(current) => Err(AppError::Conflict(format!(
            "testimonial {} is now {}",
            current.id, current.status
        ))),
        None => Err(AppError::NotFound(format!(
            "testimonial {} not found",
            record.id
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testimonials::create::create_testimonial;
    use crate::state::test_support::harness;
    use common::model::testimonial::{Origin, TestimonialDraft, VerificationMethod};

    fn draft(method: VerificationMethod) -> TestimonialDraft {
        TestimonialDraft {
            client_name: "Edsger".to_string(),
            client_email: Some("ewd@utexas.edu".to_string()),
            text: "Structured and correct.".to_string(),
            verification_method: method,
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn force_verify_publishes_pending_records() {
        let h = harness();
        let (t, _) = create_testimonial(
            &h.state,
            "o1",
            Origin::Reviewer,
            draft(VerificationMethod::Manual),
        )
        .await
        .unwrap();

        let (outcome, verified) = force_verify(&h.state.store, "o1", &t.id, Utc::now()).unwrap();
        assert_eq!(outcome, VerifyOutcome::Verified);
        assert_eq!(verified.status, TestimonialStatus::Verified);
        assert!(verified.verified_at.is_some());
    }

    #[actix_web::test]
    async fn force_verify_bypasses_email_confirmation() {
        let h = harness();
        let (t, _) =
            create_testimonial(&h.state, "o1", Origin::Owner, draft(VerificationMethod::Email))
                .await
                .unwrap();
        let (outcome, _) = force_verify(&h.state.store, "o1", &t.id, Utc::now()).unwrap();
        assert_eq!(outcome, VerifyOutcome::Verified);
    }

    #[actix_web::test]
    async fn force_verify_is_idempotent() {
        let h = harness();
        let (t, _) =
            create_testimonial(&h.state, "o1", Origin::Owner, draft(VerificationMethod::Manual))
                .await
                .unwrap();
        let before = h.state.store.get_testimonial("o1", &t.id).unwrap().unwrap();

        let (outcome, after) = force_verify(&h.state.store, "o1", &t.id, Utc::now()).unwrap();
        assert_eq!(outcome, VerifyOutcome::AlreadyVerified);
        assert_eq!(after.verified_at, before.verified_at);
        assert_eq!(
            h.state.store.get_testimonial("o1", &t.id).unwrap().unwrap(),
            before
        );
    }

    #[actix_web::test]
    async fn force_verify_respects_ownership_and_rejection() {
        let h = harness();
        let (t, _) = create_testimonial(
            &h.state,
            "o1",
            Origin::Reviewer,
            draft(VerificationMethod::Manual),
        )
        .await
        .unwrap();

        let err = force_verify(&h.state.store, "intruder", &t.id, Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let mut rejected = t.clone();
        rejected.id = "rejected-1".to_string();
        rejected.status = TestimonialStatus::Rejected;
        h.state.store.insert_testimonial(&rejected).unwrap();
        let err = force_verify(&h.state.store, "o1", "rejected-1", Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[actix_web::test]
    async fn lost_race_reports_current_state() {
        let h = harness();
        let (t, _) = create_testimonial(
            &h.state,
            "o1",
            Origin::Reviewer,
            draft(VerificationMethod::Manual),
        )
        .await
        .unwrap();

        // Someone else verifies first; the stale read still says `pending`.
        force_verify(&h.state.store, "o1", &t.id, Utc::now()).unwrap();
        let (outcome, _) =
            apply_verification(&h.state.store, t.clone(), TestimonialStatus::Pending, Utc::now())
                .unwrap();
        assert_eq!(outcome, VerifyOutcome::AlreadyVerified);

        // Deleted in between: no resurrection.
        h.state.store.delete_testimonial("o1", &t.id).unwrap();
        let err = apply_verification(&h.state.store, t, TestimonialStatus::Pending, Utc::now())
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
