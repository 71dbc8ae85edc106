//! Reviewer submissions through an owner's public collection form.
//!
//! The form decides the verification channel; whatever the reviewer sent for
//! it is ignored. Manual and LinkedIn submissions start as `pending` and wait
//! for the owner's "Verify & Publish".

use super::resolve_handle;
use crate::error::AppError;
use crate::services::testimonials::create::create_testimonial;
use crate::services::view::TestimonialView;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::testimonial::{Origin, Testimonial, TestimonialDraft};
use common::requests::Delivery;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Submitted {
    testimonial: TestimonialView,
    notification: Delivery,
}

pub async fn process(
    state: web::Data<AppState>,
    handle: web::Path<String>,
    payload: web::Json<TestimonialDraft>,
) -> impl Responder {
    match submit_review(&state, &handle, payload.into_inner()).await {
        Ok((testimonial, notification)) => HttpResponse::Created().json(Submitted {
            testimonial: TestimonialView::public(testimonial),
            notification,
        }),
        Err(e) => e.error_response(),
    }
}

pub async fn submit_review(
    state: &AppState,
    handle: &str,
    mut draft: TestimonialDraft,
) -> Result<(Testimonial, Delivery), AppError> {
    let profile = resolve_handle(&state.store, handle)?;
    let form = state
        .store
        .get_form_config(&profile.owner_id)?
        .unwrap_or_default();

    let has_video = draft
        .video_ref
        .as_deref()
        .is_some_and(|v| !v.trim().is_empty());
    if has_video && !form.allow_video {
        return Err(AppError::Validation(
            "this form does not accept video testimonials".to_string(),
        ));
    }
    if !form.collect_email {
        draft.client_email = None;
    }
    draft.verification_method = form.verification_method;

    create_testimonial(state, &profile.owner_id, Origin::Reviewer, draft).await
}
