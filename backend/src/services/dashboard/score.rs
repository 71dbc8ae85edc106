use crate::error::AppError;
use crate::services::identity::Owner;
use crate::state::AppState;
use crate::store::Store;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::score::{self, TrustScore};

pub async fn process(owner: Owner, state: web::Data<AppState>) -> impl Responder {
    match trust_score(&state.store, owner.id()) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => e.error_response(),
    }
}

pub fn trust_score(store: &Store, owner_id: &str) -> Result<TrustScore, AppError> {
    let verified = store.list_verified_by_owner(owner_id)?;
    Ok(score::compute(&verified))
}
