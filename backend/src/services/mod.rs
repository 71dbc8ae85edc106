pub mod dashboard;
pub mod identity;
pub mod public;
pub mod settings;
pub mod team;
pub mod testimonials;
pub mod view;

use actix_web::web::ServiceConfig;

/// Mounts every API scope. The settings scope sits on the bare `/api` prefix,
/// so it is registered after the more specific ones.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(testimonials::configure_routes())
        .service(public::configure_routes())
        .service(dashboard::configure_routes())
        .service(team::configure_routes())
        .service(settings::configure_routes());
}
