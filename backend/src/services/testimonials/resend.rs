use crate::error::AppError;
use crate::services::identity::Owner;
use crate::services::testimonials::create::request_confirmation;
use crate::state::{new_token, AppState};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use chrono::{SubsecRound, Utc};
use common::lifecycle;
use common::requests::Delivery;
use log::info;
use serde::Serialize;

#[derive(Serialize)]
struct Resent {
    notification: Delivery,
}

pub async fn process(
    owner: Owner,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> impl Responder {
    match resend_confirmation(&state, owner.id(), &id).await {
        Ok(notification) => HttpResponse::Ok().json(Resent { notification }),
        Err(e) => e.error_response(),
    }
}

/// Replaces the confirmation token of a record awaiting its client and emails
/// the new link. The previous link stops resolving.
pub async fn resend_confirmation(
    state: &AppState,
    owner_id: &str,
    id: &str,
) -> Result<Delivery, AppError> {
    let not_found = || AppError::NotFound(format!("testimonial {id} not found"));
    let record = state.store.get_testimonial(owner_id, id)?.ok_or_else(not_found)?;
    lifecycle::plan_resend(record.status)?;

    let token = new_token();
    let expires_at = Utc::now().trunc_subsecs(6) + state.token_ttl;
    if !state.store.replace_token(owner_id, id, &token, &expires_at)? {
        // Verified or deleted since the read above.
        let current = state.store.get_testimonial(owner_id, id)?.ok_or_else(not_found)?;
        lifecycle::plan_resend(current.status)?;
        return Err(AppError::Conflict(format!("testimonial {id} changed, try again")));
    }
    info!("confirmation link reissued for testimonial {}", id);

    let mut record = record;
    record.verification_token = Some(token.clone());
    record.token_expires_at = Some(expires_at);
    Ok(request_confirmation(state, &record, &token).await)
}
