use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One page of `GET /runs`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunsPage {
    pub data: Vec<Run>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub links: Vec<PageLink>,
}

impl Pagination {
    /// The uri of the `rel = "next"` link, if the API sent one.
    pub fn next_uri(&self) -> Option<&str> {
        self.links.iter().find(|l| l.rel == "next").map(|l| l.uri.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PageLink {
    pub rel: String,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    #[serde(default)]
    pub id: String,
    pub weblink: String,
    pub date: Option<String>,
    pub times: RunTimes,
    #[serde(default)]
    pub players: EmbeddedPlayers,
    #[serde(default)]
    pub videos: Option<RunVideos>,
    // variable id -> value id
    #[serde(default)]
    pub values: HashMap<String, String>,
}

impl Run {
    /// Display name of the first player: guest name, then user name, then id.
    pub fn first_player_name(&self) -> Option<&str> {
        let player = self.players.data.first()?;
        player
            .name
            .as_deref()
            .or_else(|| player.names.as_ref().map(|n| n.international.as_str()))
            .or(player.id.as_deref())
    }

    pub fn first_video_link(&self) -> Option<&str> {
        self.videos.as_ref()?.links.first().map(|l| l.uri.as_str())
    }

    pub fn matches_value(&self, variable_id: &str, value_id: &str) -> bool {
        self.values.get(variable_id).is_some_and(|v| v == value_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunTimes {
    pub primary_t: f64,
}

/// Players as embedded by `embed=players`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbeddedPlayers {
    #[serde(default)]
    pub data: Vec<Player>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: Option<String>,
    // Guests carry a plain name, users carry `names`
    pub name: Option<String>,
    pub names: Option<PlayerNames>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerNames {
    pub international: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunVideos {
    #[serde(default)]
    pub links: Vec<VideoLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoLink {
    pub uri: String,
}
