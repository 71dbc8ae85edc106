//! The confirmation link emailed to a client.
//!
//! A token resolves to exactly one record. The first valid click moves it from
//! `pending_verification` to `verified`; any later click, including one that
//! lost a race with a concurrent click, answers "already verified". Unknown and
//! expired tokens are reported as an invalid link.

use crate::error::AppError;
use crate::services::testimonials::verify::apply_verification;
use crate::services::view::TestimonialView;
use crate::state::AppState;
use crate::store::Store;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use chrono::{DateTime, Utc};
use common::lifecycle::{self, Step};
use common::model::testimonial::Testimonial;
use common::requests::VerifyOutcome;
use serde::Serialize;

const MAX_TOKEN_LEN: usize = 128;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Confirmed {
    outcome: VerifyOutcome,
    testimonial: TestimonialView,
}

pub async fn process(state: web::Data<AppState>, token: web::Path<String>) -> impl Responder {
    match confirm_token(&state.store, &token, Utc::now()) {
        Ok((outcome, testimonial)) => HttpResponse::Ok().json(Confirmed {
            outcome,
            testimonial: TestimonialView::public(testimonial),
        }),
        Err(e) => e.error_response(),
    }
}

pub fn confirm_token(
    store: &Store,
    token: &str,
    now: DateTime<Utc>,
) -> Result<(VerifyOutcome, Testimonial), AppError> {
    let token = token.trim();
    if token.is_empty() || token.len() > MAX_TOKEN_LEN {
        return Err(AppError::invalid_link());
    }
    let record = store.get_by_token(token)?.ok_or_else(AppError::invalid_link)?;

    match lifecycle::plan_confirmation(&record, now)? {
        Step::AlreadyVerified => Ok((VerifyOutcome::AlreadyVerified, record)),
        Step::Verify { from } => apply_verification(store, record, from, now),
    }
}
