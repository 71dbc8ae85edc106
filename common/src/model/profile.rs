use serde::{Deserialize, Serialize};

/// An owner's public identity. `handle` addresses the public wall and form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub owner_id: String,
    pub handle: String,
    pub display_name: String,
}
