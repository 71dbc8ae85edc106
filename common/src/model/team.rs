use crate::model::UnknownVariant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    Admin,
    Editor,
    Viewer,
}

impl TeamRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamRole::Admin => "admin",
            TeamRole::Editor => "editor",
            TeamRole::Viewer => "viewer",
        }
    }
}

impl FromStr for TeamRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(TeamRole::Admin),
            "editor" => Ok(TeamRole::Editor),
            "viewer" => Ok(TeamRole::Viewer),
            other => Err(UnknownVariant::new("team role", other)),
        }
    }
}

/// A pending invitation for someone to join an owner's team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInvite {
    pub id: String,
    pub owner_id: String,
    pub email: String,
    pub role: TeamRole,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub token: String,
}
