//! # Settings Service Module
//!
//! Per-owner configuration: the public profile (handle and display name), the
//! embeddable widget and the collection form. Reads fall back to defaults
//! until the owner saves something.
//!
//! ## Registered Routes
//!
//! *   **`GET /profile`**, **`PUT /profile`** (`profile::get`, `profile::save`)
//! *   **`GET /widget`**, **`PUT /widget`** (`widget::get`, `widget::save`)
//! *   **`GET /form`**, **`PUT /form`** (`form::get`, `form::save`)

mod form;
pub(crate) mod profile;
mod widget;

use actix_web::web::{get, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/profile", get().to(profile::get))
        .route("/profile", put().to(profile::save))
        .route("/widget", get().to(widget::get))
        .route("/widget", put().to(widget::save))
        .route("/form", get().to(form::get))
        .route("/form", put().to(form::save))
}
