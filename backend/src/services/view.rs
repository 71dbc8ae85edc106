//! Outward shape of a testimonial.
//!
//! Adds the avatar fallback and, on public surfaces, strips what only the
//! owner should see.

use common::model::testimonial::Testimonial;
use serde::Serialize;

const GRAVATAR_BASE: &str = "https://www.gravatar.com/avatar/";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialView {
    #[serde(flatten)]
    pub testimonial: Testimonial,
    pub avatar_url: Option<String>,
}

impl TestimonialView {
    pub fn owner(testimonial: Testimonial) -> Self {
        let avatar_url = avatar_url(&testimonial);
        Self {
            testimonial,
            avatar_url,
        }
    }

    /// Hides the reviewer's email address and the analyzer internals.
    pub fn public(mut testimonial: Testimonial) -> Self {
        let avatar_url = avatar_url(&testimonial);
        testimonial.client_email = None;
        testimonial.keywords.clear();
        testimonial.analysis_reasoning = None;
        Self {
            testimonial,
            avatar_url,
        }
    }
}

/// The uploaded avatar, or a Gravatar derived from the client's email.
pub fn avatar_url(testimonial: &Testimonial) -> Option<String> {
    if let Some(avatar) = &testimonial.avatar_ref {
        return Some(avatar.clone());
    }
    testimonial.client_email.as_deref().map(|email| {
        let normalized = email.trim().to_lowercase();
        format!("{}{:x}?d=identicon", GRAVATAR_BASE, md5::compute(normalized.as_bytes()))
    })
}
