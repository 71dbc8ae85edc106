//! Shared TrustGrid model.
//!
//! Everything in this crate is pure: the testimonial shapes exchanged with the
//! backend, the trust score aggregation and the verification rules. Persistence
//! and the external collaborators live in the `trustgrid` backend crate.

pub mod lifecycle;
pub mod model;
pub mod requests;
pub mod score;
