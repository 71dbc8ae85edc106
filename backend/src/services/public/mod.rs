//! # Public Service Module
//!
//! Endpoints reachable without an owner identity: the public testimonial
//! wall, the collection form and the email confirmation link. Owners are
//! addressed by their public handle.
//!
//! ## Registered Routes
//!
//! *   **`GET /confirm/{token}`**, **`POST /confirm/{token}`**
//!     (`confirm::process`): the client confirms an email-channel testimonial.
//!     The emailed link points at the `GET` form.
//! *   **`GET /{handle}/testimonials`** (`wall::process`): verified records,
//!     newest first, trimmed by the owner's widget settings.
//! *   **`POST /{handle}/testimonials`** (`submit::process`): a reviewer
//!     submits through the collection form.
//! *   **`GET /{handle}/widget`** and **`GET /{handle}/form`**
//!     (`settings::widget`, `settings::form`): display and form settings.

mod confirm;
mod settings;
mod submit;
mod wall;

use crate::error::AppError;
use crate::services::settings::profile::validate_handle;
use crate::store::Store;
use actix_web::web::{get, post, scope};
use actix_web::Scope;
use common::model::profile::Profile;

const API_PATH: &str = "/api/public";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/confirm/{token}", get().to(confirm::process))
        .route("/confirm/{token}", post().to(confirm::process))
        .route("/{handle}/testimonials", get().to(wall::process))
        .route("/{handle}/testimonials", post().to(submit::process))
        .route("/{handle}/widget", get().to(settings::widget))
        .route("/{handle}/form", get().to(settings::form))
}

/// The profile behind a public handle.
fn resolve_handle(store: &Store, handle: &str) -> Result<Profile, AppError> {
    let handle = validate_handle(handle)?;
    store
        .find_profile_by_handle(&handle)?
        .ok_or_else(|| AppError::NotFound(format!("no page named '{handle}'")))
}
