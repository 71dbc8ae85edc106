//! # Dashboard Service Module
//!
//! Read-only summaries for the owner's dashboard. Nothing is cached: each
//! request recomputes from the store.
//!
//! ## Registered Routes
//!
//! *   **`GET /score`** (`score::process`): the trust score and hints.
//! *   **`GET /stats`** (`stats::process`): record counts per status, public
//!     wall views and the trust score.

mod score;
mod stats;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/dashboard";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/score", get().to(score::process))
        .route("/stats", get().to(stats::process))
}
