use std::path::Path;

use serde::Deserialize;

use crate::error::CollectError;
use crate::model::bilibili::VideoContext;

pub const SPEEDRUN_API_BASE: &str = "https://www.speedrun.com/api/v1";
pub const BILIBILI_VIEW_URL: &str = "https://api.bilibili.com/x/web-interface/view";
pub const TWITCH_TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
pub const TWITCH_USERS_URL: &str = "https://api.twitch.tv/helix/users";
pub const YOUTUBE_VIDEOS_URL: &str = "https://www.googleapis.com/youtube/v3/videos";

pub const AUTH_FILE: &str = "auth.json";
pub const TOKEN_FILE: &str = "token.json";

pub const OUTPUT_DIR: &str = "1-coleta";
pub const SPEEDRUN_OUTPUT: &str = "speedrun_stats.csv";
pub const BILIBILI_OUTPUT: &str = "bilibili_stats.csv";
pub const TWITCH_OUTPUT: &str = "twitch_stats.csv";
pub const YOUTUBE_OUTPUT: &str = "youtube_stats.csv";

/// Names identifying the sub-category whose record history is collected.
#[derive(Debug, Clone, Copy)]
pub struct SubcategoryTarget {
    pub game: &'static str,
    pub category: &'static str,
    pub variable: &'static str,
    pub value: &'static str,
}

pub const SPEEDRUN_TARGET: SubcategoryTarget = SubcategoryTarget {
    game: "Elden Ring",
    category: "Any%",
    variable: "Any% - Subcategories",
    value: "Glitchless",
};

// Without a browser User-Agent Bilibili answers 412
pub const BILIBILI_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";

/// Record videos and the uploads around them, in collection order.
pub const BILIBILI_VIDEOS: &[(&str, VideoContext)] = &[
    ("BV1ooXWYiEr2", VideoContext::Recorde),
    ("BV1ZNBBYBEEn", VideoContext::Recorde),
    ("BV1V9DxY8EEM", VideoContext::AntesRecorde),  // before BV1ZNBBYBEEn
    ("BV1Sr1tYmE6i", VideoContext::AntesRecorde),  // before BV1ZNBBYBEEn
    ("BV1bw9wYZEkG", VideoContext::AntesRecorde),  // before BV1ooXWYiEr2
    ("BV1YAP4ehEie", VideoContext::AntesRecorde),  // before BV1ooXWYiEr2
    ("BV1NTi1YYE8D", VideoContext::DepoisRecorde), // after BV1ZNBBYBEEn
    ("BV1cLqkYWEdH", VideoContext::DepoisRecorde), // after BV1ZNBBYBEEn
    ("BV17ufPY8ERN", VideoContext::DepoisRecorde), // after BV1ooXWYiEr2
    ("BV18z5bzJEsH", VideoContext::DepoisRecorde), // after BV1ooXWYiEr2
];

pub const BILIBILI_DELAY_MS: u64 = 1_000;
pub const YOUTUBE_DELAY_MS: u64 = 500;

pub const TWITCH_LOGIN: &str = "hama7";

/// API credentials read from `auth.json`. Each collector checks only the keys it needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    #[serde(rename = "YOUTUBE_API_KEY")]
    pub youtube_api_key: Option<String>,
}

impl Credentials {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CollectError> {
        let path = path.as_ref();
        let body = std::fs::read_to_string(path)?;
        serde_json::from_str(&body).map_err(|e| CollectError::json(path.display().to_string(), e))
    }

    pub fn from_json(body: &str) -> Result<Self, CollectError> {
        serde_json::from_str(body).map_err(|e| CollectError::json("credentials", e))
    }

    pub fn client_id(&self) -> Result<&str, CollectError> {
        self.client_id.as_deref().ok_or(CollectError::MissingCredential("client_id"))
    }

    pub fn client_secret(&self) -> Result<&str, CollectError> {
        self.client_secret.as_deref().ok_or(CollectError::MissingCredential("client_secret"))
    }

    pub fn youtube_api_key(&self) -> Result<&str, CollectError> {
        self.youtube_api_key.as_deref().ok_or(CollectError::MissingCredential("YOUTUBE_API_KEY"))
    }
}

/// `1-coleta/<file_name>`.
pub fn output_path(file_name: &str) -> std::path::PathBuf {
    Path::new(OUTPUT_DIR).join(file_name)
}
