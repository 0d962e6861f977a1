use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use tracing::{error, info, instrument};

use crate::config::{YOUTUBE_DELAY_MS, YOUTUBE_VIDEOS_URL};
use crate::error::CollectError;
use crate::export;
use crate::http;
use crate::model::youtube::{SpeedrunVideoRow, VideoListResponse, YoutubeStats};

pub fn is_youtube_link(url: &str) -> bool {
    url.contains("youtube.com") || url.contains("youtu.be")
}

/// Video id following `v=` or `be/`, whichever comes first in the url.
pub fn extract_video_id(url: &str) -> Option<&str> {
    let is_id_char = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-';
    for (idx, _) in url.char_indices() {
        let head = &url[..idx];
        if !(head.ends_with("v=") || head.ends_with("be/")) {
            continue;
        }
        let tail = &url[idx..];
        let len = tail.find(|c: char| !is_id_char(c)).unwrap_or(tail.len());
        if len > 0 {
            return Some(&tail[..len]);
        }
    }
    None
}

/// Distinct YouTube links of the speedrun CSV's `video_link` column, in first-seen order.
pub fn youtube_links_from_csv<R: std::io::Read>(reader: R) -> Result<Vec<String>, CollectError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut seen: HashSet<String> = HashSet::new();
    let mut links = Vec::new();
    for row in rdr.deserialize::<SpeedrunVideoRow>() {
        let link = row?.video_link.unwrap_or_default();
        // Several records can share one video; fetch each once
        if is_youtube_link(&link) && seen.insert(link.clone()) {
            links.push(link);
        }
    }
    Ok(links)
}

/// `(views, likes, comments)` of the first item; missing counts read as 0.
pub fn counts_from_response(response: &VideoListResponse) -> Option<(u64, u64, u64)> {
    let stats = &response.items.first()?.statistics;
    let count = |v: &Option<String>| v.as_deref().and_then(|s| s.parse::<u64>().ok()).unwrap_or(0);
    Some((count(&stats.view_count), count(&stats.like_count), count(&stats.comment_count)))
}

#[instrument(level = "info", skip(api_key))]
pub fn fetch_stats(video_url: &str, api_key: &str) -> Result<YoutubeStats, CollectError> {
    let mut row = YoutubeStats { video_url: video_url.to_string(), views: None, likes: None, comments: None };
    // Links without a recognisable id still get a row, with empty counts
    let Some(video_id) = extract_video_id(video_url) else {
        return Ok(row);
    };
    let response: VideoListResponse = http::get_json(
        YOUTUBE_VIDEOS_URL,
        &[("part", "statistics"), ("id", video_id), ("key", api_key)],
        &[],
    )?;
    if let Some((views, likes, comments)) = counts_from_response(&response) {
        info!(video_id, views, likes, comments, "YouTube statistics");
        row.views = Some(views);
        row.likes = Some(likes);
        row.comments = Some(comments);
    }
    Ok(row)
}

/// Enrich every YouTube link of the speedrun CSV with view/like/comment counts.
pub fn collect(speedrun_csv: &Path, api_key: &str, out_path: &Path) -> Result<String, CollectError> {
    let file = std::fs::File::open(speedrun_csv)?;
    let links = youtube_links_from_csv(file)?;
    info!(links = links.len(), "YouTube links found in speedrun CSV");

    let mut rows: Vec<YoutubeStats> = Vec::with_capacity(links.len());
    for link in &links {
        match fetch_stats(link, api_key) {
            Ok(row) => rows.push(row),
            Err(e) => {
                error!(error = %e, video_url = %link, "Failed to fetch YouTube statistics");
                rows.push(YoutubeStats { video_url: link.clone(), views: None, likes: None, comments: None });
            }
        }
        // Paced after failures too
        std::thread::sleep(Duration::from_millis(YOUTUBE_DELAY_MS));
    }

    if rows.is_empty() {
        return Ok("YouTube: no YouTube links in speedrun CSV (skipped)".to_string());
    }
    export::write_rows(out_path, &rows)?;
    Ok(format!("YouTube: {} videos written to {}", rows.len(), out_path.display()))
}
