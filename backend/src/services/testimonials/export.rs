//! CSV export of an owner's testimonials.
//!
//! One row per record, newest first, in every status. The confirmation token
//! is never exported.

use crate::error::AppError;
use crate::services::identity::Owner;
use crate::state::AppState;
use crate::store::Store;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::testimonial::Testimonial;

const HEADER: [&str; 13] = [
    "id",
    "client_name",
    "client_company",
    "client_email",
    "text",
    "verification_method",
    "status",
    "score",
    "score_estimated",
    "sentiment",
    "has_video",
    "created_at",
    "verified_at",
];

pub async fn process(owner: Owner, state: web::Data<AppState>) -> impl Responder {
    match export_csv(&state.store, owner.id()) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(
                    "testimonials.csv".to_string(),
                )],
            })
            .body(body),
        Err(e) => e.error_response(),
    }
}

pub fn export_csv(store: &Store, owner_id: &str) -> Result<Vec<u8>, AppError> {
    let records = store.list_by_owner(owner_id)?;
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER).map_err(export_error)?;
    for record in &records {
        writer.write_record(row(record)).map_err(export_error)?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::Dependency(format!("csv export failed: {e}")))
}

fn row(t: &Testimonial) -> [String; 13] {
    [
        t.id.clone(),
        t.client_name.clone(),
        t.client_company.clone(),
        t.client_email.clone().unwrap_or_default(),
        t.text.clone(),
        t.verification_method.as_str().to_string(),
        t.status.as_str().to_string(),
        t.score.map(|s| s.to_string()).unwrap_or_default(),
        t.score_estimated.to_string(),
        t.sentiment.map(|s| s.as_str().to_string()).unwrap_or_default(),
        t.has_video().to_string(),
        t.created_at.to_rfc3339(),
        t.verified_at.map(|v| v.to_rfc3339()).unwrap_or_default(),
    ]
}

fn export_error(e: csv::Error) -> AppError {
    AppError::Dependency(format!("csv export failed: {e}"))
}
