use serde::{Deserialize, Serialize};

/// Client-credentials reply of `id.twitch.tv/oauth2/token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<u64>,
    pub token_type: Option<String>,
}

/// A Helix user, also the `twitch_stats.csv` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitchUser {
    pub id: String,
    pub login: String,
    pub display_name: String,
    #[serde(default)]
    pub broadcaster_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
}
