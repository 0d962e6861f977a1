use serde::{Deserialize, Serialize};

/// Reply of `youtube/v3/videos?part=statistics`.
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VideoItem {
    pub statistics: VideoStatistics,
}

// Counts come back as decimal strings
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoStatistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

/// One `youtube_stats.csv` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoutubeStats {
    pub video_url: String,
    pub views: Option<u64>,
    pub likes: Option<u64>,
    pub comments: Option<u64>,
}

/// The single column read back from `speedrun_stats.csv`.
#[derive(Debug, Deserialize)]
pub struct SpeedrunVideoRow {
    #[serde(default)]
    pub video_link: Option<String>,
}
