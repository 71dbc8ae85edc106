use crate::error::AppError;
use crate::services::identity::Owner;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::widget::WidgetConfig;

pub async fn get(owner: Owner, state: web::Data<AppState>) -> impl Responder {
    match state.store.get_widget_config(owner.id()) {
        Ok(config) => HttpResponse::Ok().json(config.unwrap_or_default()),
        Err(e) => AppError::from(e).error_response(),
    }
}

pub async fn save(
    owner: Owner,
    state: web::Data<AppState>,
    payload: web::Json<WidgetConfig>,
) -> impl Responder {
    let config = payload.into_inner();
    let result = config
        .validate()
        .map_err(AppError::from)
        .and_then(|()| Ok(state.store.put_widget_config(owner.id(), &config)?));
    match result {
        Ok(()) => HttpResponse::Ok().json(config),
        Err(e) => e.error_response(),
    }
}
