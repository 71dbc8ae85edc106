//! # Testimonial Service Module
//!
//! Owner-facing endpoints for managing Testimonial Records. Every route
//! requires the acting owner (see `services::identity`) and only ever touches
//! that owner's records.
//!
//! ## Registered Routes
//!
//! *   **`POST /`** (`create::process`): "Add Proof". Validates the draft,
//!     scores it, persists it and, for the email channel, sends the
//!     confirmation request. Manual and LinkedIn proof is verified at once.
//! *   **`GET /`** (`list::process`): all records of the owner, newest first.
//! *   **`GET /export`** (`export::process`): the same records as CSV.
//! *   **`GET /{id}`** (`list::process_one`): one record.
//! *   **`POST /{id}/verify`** (`verify::process`): "Verify & Publish"
//!     override for pending records.
//! *   **`POST /{id}/resend`** (`resend::process`): issues a fresh
//!     confirmation link for a record still awaiting the client.
//! *   **`PUT /{id}/style`** (`style::process`): changes the card style.
//! *   **`DELETE /{id}`** (`delete::process`): removes the record.

pub(crate) mod create;
mod delete;
mod export;
mod list;
mod resend;
mod style;
pub(crate) mod verify;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/testimonials";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(create::process))
        .route("", get().to(list::process))
        .route("/export", get().to(export::process))
        .route("/{id}", get().to(list::process_one))
        .route("/{id}", delete().to(delete::process))
        .route("/{id}/verify", post().to(verify::process))
        .route("/{id}/resend", post().to(resend::process))
        .route("/{id}/style", put().to(style::process))
}
