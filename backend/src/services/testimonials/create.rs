//! Creation of Testimonial Records, shared by the dashboard "Add Proof" action
//! and the public collection form.
//!
//! The order of steps matters:
//!
//! 1.  The draft is validated. Nothing else happens for an invalid draft.
//! 2.  Non-empty text is scored by the analyzer; any analyzer failure turns
//!     into the local estimate.
//! 3.  The record is inserted in its initial status, with a confirmation token
//!     when the channel is email.
//! 4.  For the email channel the confirmation request is sent. A failed send
//!     is reported in the response and the record stays.

use crate::collaborators::analyzer::analyze_or_estimate;
use crate::collaborators::notifier::{deliver, RecordSummary};
use crate::error::AppError;
use crate::services::identity::Owner;
use crate::services::view::TestimonialView;
use crate::state::{new_token, AppState};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use chrono::{SubsecRound, Utc};
use common::lifecycle;
use common::model::testimonial::{Origin, Testimonial, TestimonialDraft, TestimonialStatus};
use common::requests::Delivery;
use log::info;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Created {
    pub testimonial: TestimonialView,
    pub notification: Delivery,
}

pub async fn process(
    owner: Owner,
    state: web::Data<AppState>,
    payload: web::Json<TestimonialDraft>,
) -> impl Responder {
    match create_testimonial(&state, owner.id(), Origin::Owner, payload.into_inner()).await {
        Ok((testimonial, notification)) => HttpResponse::Created().json(Created {
            testimonial: TestimonialView::owner(testimonial),
            notification,
        }),
        Err(e) => e.error_response(),
    }
}

pub async fn create_testimonial(
    state: &AppState,
    owner_id: &str,
    origin: Origin,
    draft: TestimonialDraft,
) -> Result<(Testimonial, Delivery), AppError> {
    let draft = draft.validate()?;

    let analysis = if draft.text.is_empty() {
        None
    } else {
        Some(analyze_or_estimate(state.analyzer.as_ref(), &draft.text).await)
    };

    // Stored timestamps keep microseconds.
    let now = Utc::now().trunc_subsecs(6);
    let status = lifecycle::initial_status(draft.verification_method, origin);
    let (verification_token, token_expires_at) =
        if lifecycle::issues_token(draft.verification_method) {
            (Some(new_token()), Some(now + state.token_ttl))
        } else {
            (None, None)
        };

    let testimonial = Testimonial {
        id: Uuid::new_v4().to_string(),
        owner_id: owner_id.to_string(),
        client_name: draft.client_name,
        client_company: draft.client_company,
        client_email: draft.client_email,
        text: draft.text,
        video_ref: draft.video_ref,
        avatar_ref: draft.avatar_ref,
        verification_method: draft.verification_method,
        status,
        score: analysis.as_ref().map(|a| a.score),
        sentiment: analysis.as_ref().map(|a| a.sentiment),
        keywords: analysis
            .as_ref()
            .map(|a| a.keywords.clone())
            .unwrap_or_default(),
        analysis_reasoning: analysis.as_ref().map(|a| a.reasoning.clone()),
        score_estimated: analysis.as_ref().is_some_and(|a| a.estimated),
        card_style: draft.card_style,
        origin,
        created_at: now,
        verified_at: (status == TestimonialStatus::Verified).then_some(now),
        verification_token,
        token_expires_at,
    };

    state.store.insert_testimonial(&testimonial)?;
    info!(
        "testimonial {} created for {} as {} ({})",
        testimonial.id,
        owner_id,
        testimonial.status,
        testimonial.verification_method.as_str()
    );

    let notification = match &testimonial.verification_token {
        Some(token) => request_confirmation(state, &testimonial, token).await,
        None => Delivery::NotRequired,
    };

    Ok((testimonial, notification))
}

/// Emails the client a link to confirm `testimonial`.
pub(crate) async fn request_confirmation(
    state: &AppState,
    testimonial: &Testimonial,
    token: &str,
) -> Delivery {
    let Some(email) = testimonial.client_email.as_deref() else {
        return Delivery::Failed("no client email on record".to_string());
    };
    let summary = RecordSummary::of(testimonial, &state.business_name(&testimonial.owner_id));
    let link = state.confirmation_link(token);

    deliver(
        &format!("confirmation request for testimonial {}", testimonial.id),
        state.notifier.send_verification_request(email, &summary, &link),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::analyzer::test_support::FixedAnalyzer;
    use crate::collaborators::notifier::test_support::RecordingNotifier;
    use crate::state::test_support::{harness, harness_with};
    use common::model::testimonial::VerificationMethod;
    use std::sync::atomic::Ordering;

    fn draft(method: VerificationMethod) -> TestimonialDraft {
        TestimonialDraft {
            client_name: "Barbara Liskov".to_string(),
            client_company: "CLU Labs".to_string(),
            client_email: Some("barbara@clu.dev".to_string()),
            text: "They delivered a clean abstraction on the first try.".to_string(),
            verification_method: method,
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn owner_manual_proof_is_verified_immediately() {
        let h = harness();
        let (t, delivery) =
            create_testimonial(&h.state, "o1", Origin::Owner, draft(VerificationMethod::Manual))
                .await
                .unwrap();
        assert_eq!(t.status, TestimonialStatus::Verified);
        assert!(t.verified_at.is_some());
        assert!(t.verification_token.is_none());
        assert_eq!(t.score, Some(90));
        assert!(!t.score_estimated);
        assert_eq!(delivery, Delivery::NotRequired);

        let stored = h.state.store.get_testimonial("o1", &t.id).unwrap().unwrap();
        assert_eq!(stored, t);
    }

    #[actix_web::test]
    async fn reviewer_linkedin_proof_waits_for_the_owner() {
        let h = harness();
        let (t, _) = create_testimonial(
            &h.state,
            "o1",
            Origin::Reviewer,
            draft(VerificationMethod::Linkedin),
        )
        .await
        .unwrap();
        assert_eq!(t.status, TestimonialStatus::Pending);
        assert!(t.verified_at.is_none());
    }

    #[actix_web::test]
    async fn email_proof_gets_a_unique_token_and_a_confirmation_request() {
        let h = harness();
        let (a, delivery) =
            create_testimonial(&h.state, "o1", Origin::Owner, draft(VerificationMethod::Email))
                .await
                .unwrap();
        let (b, _) =
            create_testimonial(&h.state, "o1", Origin::Owner, draft(VerificationMethod::Email))
                .await
                .unwrap();

        assert_eq!(a.status, TestimonialStatus::PendingVerification);
        let token = a.verification_token.clone().unwrap();
        assert_ne!(Some(token.clone()), b.verification_token);
        assert!(a.token_expires_at.unwrap() > a.created_at);
        assert_eq!(delivery, Delivery::Sent);
        assert_eq!(
            h.notifier.links()[0],
            format!("https://trustgrid.test/api/public/confirm/{token}")
        );
        assert_eq!(
            h.state.store.get_by_token(&token).unwrap().unwrap().id,
            a.id
        );
    }

    #[actix_web::test]
    async fn empty_text_without_video_touches_nothing() {
        let h = harness();
        let mut d = draft(VerificationMethod::Email);
        d.text = String::new();

        let err = create_testimonial(&h.state, "o1", Origin::Owner, d)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(h.analyzer.calls.load(Ordering::SeqCst), 0);
        assert!(h.notifier.links().is_empty());
        assert!(h.state.store.list_by_owner("o1").unwrap().is_empty());
    }

    #[actix_web::test]
    async fn video_only_proof_is_not_scored() {
        let h = harness();
        let mut d = draft(VerificationMethod::Manual);
        d.text = String::new();
        d.video_ref = Some("videos/barbara.mp4".to_string());

        let (t, _) = create_testimonial(&h.state, "o1", Origin::Owner, d)
            .await
            .unwrap();
        assert_eq!(t.score, None);
        assert_eq!(t.sentiment, None);
        assert_eq!(h.analyzer.calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn analyzer_outage_falls_back_to_estimate() {
        let h = harness_with(FixedAnalyzer::failing(), RecordingNotifier::default());
        let (t, _) =
            create_testimonial(&h.state, "o1", Origin::Owner, draft(VerificationMethod::Manual))
                .await
                .unwrap();
        assert!(t.score_estimated);
        assert!(t.score.is_some());
        assert!(t.analysis_reasoning.unwrap().starts_with("Estimated locally"));
    }

    #[actix_web::test]
    async fn notifier_outage_keeps_the_record() {
        let h = harness_with(FixedAnalyzer::scoring(80), RecordingNotifier::failing());
        let (t, delivery) =
            create_testimonial(&h.state, "o1", Origin::Owner, draft(VerificationMethod::Email))
                .await
                .unwrap();
        assert!(matches!(delivery, Delivery::Failed(_)));
        assert!(h.state.store.get_testimonial("o1", &t.id).unwrap().is_some());
    }
}
