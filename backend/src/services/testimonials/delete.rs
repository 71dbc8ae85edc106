use crate::error::AppError;
use crate::services::identity::Owner;
use crate::state::AppState;
use crate::store::Store;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use log::info;

pub async fn process(
    owner: Owner,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> impl Responder {
    match delete_testimonial(&state.store, owner.id(), &id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => e.error_response(),
    }
}

/// Removes a record in any status. Terminal: nothing can bring it back.
pub fn delete_testimonial(store: &Store, owner_id: &str, id: &str) -> Result<(), AppError> {
    if !store.delete_testimonial(owner_id, id)? {
        return Err(AppError::NotFound(format!("testimonial {id} not found")));
    }
    info!("testimonial {} deleted by {}", id, owner_id);
    Ok(())
}
