use serde::{Deserialize, Serialize};

/// Position of a video relative to the record event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoContext {
    Recorde,
    AntesRecorde,
    DepoisRecorde,
}

/// Reply of `x/web-interface/view`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ViewResponse {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<ViewData>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewData {
    pub bvid: Option<String>,
    pub title: Option<String>,
    pub pubdate: Option<i64>,
    pub owner: Option<Owner>,
    pub stat: Option<Stat>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Owner {
    pub mid: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stat {
    pub view: Option<i64>,
    pub like: Option<i64>,
    pub danmaku: Option<i64>,
    pub coin: Option<i64>,
    pub share: Option<i64>,
    pub favorite: Option<i64>,
    pub reply: Option<i64>,
}

/// One `bilibili_stats.csv` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BilibiliStats {
    pub bvid: String,
    pub context_video: VideoContext,
    pub title: Option<String>,
    pub name_streamer: Option<String>,
    pub link_channel: Option<String>,
    pub data_publicacao: Option<String>,
    pub views: Option<i64>,
    pub likes: Option<i64>,
    pub danmaku: Option<i64>,
    pub coins: Option<i64>,
    pub shares: Option<i64>,
    pub favorites: Option<i64>,
    pub comments: Option<i64>,
    pub erro: Option<String>,
}
