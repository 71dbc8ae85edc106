use crate::error::AppError;
use crate::services::identity::Owner;
use crate::services::view::TestimonialView;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder, ResponseError};

/// `GET /api/testimonials`: the owner's records in every status, newest first.
pub async fn process(owner: Owner, state: web::Data<AppState>) -> impl Responder {
    match state.store.list_by_owner(owner.id()) {
        Ok(records) => HttpResponse::Ok().json(
            records
                .into_iter()
                .map(TestimonialView::owner)
                .collect::<Vec<_>>(),
        ),
        Err(e) => AppError::from(e).error_response(),
    }
}

/// `GET /api/testimonials/{id}`
pub async fn process_one(
    owner: Owner,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> impl Responder {
    match state.store.get_testimonial(owner.id(), &id) {
        Ok(Some(record)) => HttpResponse::Ok().json(TestimonialView::owner(record)),
        Ok(None) => AppError::NotFound(format!("testimonial {} not found", id)).error_response(),
        Err(e) => AppError::from(e).error_response(),
    }
}
