//! # Team Service Module
//!
//! Invitations for collaborators on an owner's account. Accepting an invite
//! belongs to the identity provider; this module only records and sends them.
//!
//! ## Registered Routes
//!
//! *   **`POST /invite`** (`invite::process`): records an invite and emails the
//!     accept link.
//! *   **`GET /invites`** (`invite::list`): the owner's invites, newest first.

mod invite;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/team";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/invite", post().to(invite::process))
        .route("/invites", get().to(invite::list))
}
