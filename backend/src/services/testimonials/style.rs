use crate::error::AppError;
use crate::services::identity::Owner;
use crate::services::view::TestimonialView;
use crate::state::AppState;
use crate::store::Store;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::testimonial::{CardStyle, Testimonial};
use common::requests::CardStyleRequest;

pub async fn process(
    owner: Owner,
    state: web::Data<AppState>,
    id: web::Path<String>,
    payload: web::Json<CardStyleRequest>,
) -> impl Responder {
    match set_card_style(&state.store, owner.id(), &id, payload.card_style) {
        Ok(record) => HttpResponse::Ok().json(TestimonialView::owner(record)),
        Err(e) => e.error_response(),
    }
}

/// Cosmetic only; allowed in any status.
pub fn set_card_style(
    store: &Store,
    owner_id: &str,
    id: &str,
    style: CardStyle,
) -> Result<Testimonial, AppError> {
    let not_found = || AppError::NotFound(format!("testimonial {id} not found"));
    if !store.update_card_style(owner_id, id, style)? {
        return Err(not_found());
    }
    store.get_testimonial(owner_id, id)?.ok_or_else(not_found)
}
