use super::score::trust_score;
use crate::error::AppError;
use crate::services::identity::Owner;
use crate::state::AppState;
use crate::store::Store;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::testimonial::TestimonialStatus;
use common::score::TrustScore;
use serde::Serialize;

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub pending: u64,
    pub pending_verification: u64,
    pub verified: u64,
    pub rejected: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: u64,
    pub by_status: StatusCounts,
    pub views: u64,
    pub trust: TrustScore,
}

pub async fn process(owner: Owner, state: web::Data<AppState>) -> impl Responder {
    match stats(&state.store, owner.id()) {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => e.error_response(),
    }
}

pub fn stats(store: &Store, owner_id: &str) -> Result<Stats, AppError> {
    let mut by_status = StatusCounts::default();
    for (status, count) in store.count_by_status(owner_id)? {
        let slot = match status {
            TestimonialStatus::Pending => &mut by_status.pending,
            TestimonialStatus::PendingVerification => &mut by_status.pending_verification,
            TestimonialStatus::Verified => &mut by_status.verified,
            TestimonialStatus::Rejected => &mut by_status.rejected,
        };
        *slot = count;
    }

    Ok(Stats {
        total: by_status.pending
            + by_status.pending_verification
            + by_status.verified
            + by_status.rejected,
        by_status,
        views: store.count_views(owner_id)?,
        trust: trust_score(store, owner_id)?,
    })
}
