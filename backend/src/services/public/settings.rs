use super::resolve_handle;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder, ResponseError};

/// `GET /api/public/{handle}/widget`
pub async fn widget(state: web::Data<AppState>, handle: web::Path<String>) -> impl Responder {
    let result = resolve_handle(&state.store, &handle).and_then(|profile| {
        Ok(state
            .store
            .get_widget_config(&profile.owner_id)?
            .unwrap_or_default())
    });
    match result {
        Ok(config) => HttpResponse::Ok().json(config),
        Err(e) => e.error_response(),
    }
}

/// `GET /api/public/{handle}/form`
pub async fn form(state: web::Data<AppState>, handle: web::Path<String>) -> impl Responder {
    let result = resolve_handle(&state.store, &handle).and_then(|profile| {
        Ok(state
            .store
            .get_form_config(&profile.owner_id)?
            .unwrap_or_default())
    });
    match result {
        Ok(config) => HttpResponse::Ok().json(config),
        Err(e) => e.error_response(),
    }
}
