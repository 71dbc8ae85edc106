use super::resolve_handle;
use crate::error::AppError;
use crate::services::view::TestimonialView;
use crate::state::AppState;
use crate::store::Store;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use chrono::Utc;
use log::warn;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicWall {
    pub display_name: String,
    pub testimonials: Vec<TestimonialView>,
}

pub async fn process(state: web::Data<AppState>, handle: web::Path<String>) -> impl Responder {
    match public_wall(&state.store, &handle) {
        Ok(wall) => HttpResponse::Ok().json(wall),
        Err(e) => e.error_response(),
    }
}

/// Verified records of the owner behind `handle`, newest first.
///
/// The owner's widget settings decide the minimum score and how many records
/// are shown. Each call counts as one view; failing to count it does not fail
/// the read.
pub fn public_wall(store: &Store, handle: &str) -> Result<PublicWall, AppError> {
    let profile = resolve_handle(store, handle)?;
    let widget = store
        .get_widget_config(&profile.owner_id)?
        .unwrap_or_default();

    let testimonials = store
        .list_verified_by_owner(&profile.owner_id)?
        .into_iter()
        .filter(|t| widget.admits(t.score))
        .take(widget.max_items as usize)
        .map(TestimonialView::public)
        .collect();

    if let Err(e) = store.record_view(&profile.owner_id, &Utc::now()) {
        warn!("view of {} not recorded: {}", profile.handle, e);
    }

    Ok(PublicWall {
        display_name: profile.display_name,
        testimonials,
    })
}
