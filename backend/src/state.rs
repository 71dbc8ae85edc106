//! Shared application state.
//!
//! `AppState` is built once in `main.rs` and handed to every handler as
//! `web::Data<AppState>`. It carries the store handle and the external
//! collaborators; it holds no record data of its own, so nothing here needs a
//! lock and every request sees the store as the only source of truth.

use crate::collaborators::analyzer::Analyzer;
use crate::collaborators::notifier::Notifier;
use crate::store::Store;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Duration;
use log::warn;
use rand::RngCore;
use std::sync::Arc;

const TOKEN_BYTES: usize = 32;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub analyzer: Arc<dyn Analyzer>,
    pub notifier: Arc<dyn Notifier>,
    /// Base of emailed links, without a trailing slash.
    pub public_url: String,
    /// Lifetime of an email confirmation link.
    pub token_ttl: Duration,
}

impl AppState {
    /// Opens `GET /api/public/confirm/{token}` on this service.
    pub fn confirmation_link(&self, token: &str) -> String {
        format!("{}/api/public/confirm/{}", self.public_url, token)
    }

    pub fn invite_link(&self, token: &str) -> String {
        format!("{}/invite?token={}", self.public_url, token)
    }

    /// Display name used in outgoing email, falling back to the owner id.
    pub fn business_name(&self, owner_id: &str) -> String {
        match self.store.get_profile(owner_id) {
            Ok(Some(profile)) if !profile.display_name.is_empty() => profile.display_name,
            Ok(_) => owner_id.to_string(),
            Err(e) => {
                warn!("could not load profile of {}: {}", owner_id, e);
                owner_id.to_string()
            }
        }
    }
}

/// A fresh 256-bit secret, URL-safe base64 without padding.
pub fn new_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
