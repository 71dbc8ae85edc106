//! Request and response payloads exchanged over the HTTP API.

use crate::model::team::TeamRole;
use crate::model::testimonial::CardStyle;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStyleRequest {
    pub card_style: CardStyle,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub handle: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InviteRequest {
    pub email: String,
    pub role: TeamRole,
}

/// Whether the notification that accompanies an operation went out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "detail")]
pub enum Delivery {
    NotRequired,
    Sent,
    Failed(String),
}

/// Result of any request that may verify a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyOutcome {
    Verified,
    AlreadyVerified,
}
