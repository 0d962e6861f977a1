use std::path::Path;
use std::time::Duration;

use chrono::DateTime;
use chrono_tz::Asia::Shanghai;
use tracing::{error, info, instrument, warn};

use crate::config::{BILIBILI_DELAY_MS, BILIBILI_USER_AGENT, BILIBILI_VIEW_URL};
use crate::error::CollectError;
use crate::export;
use crate::http;
use crate::model::bilibili::{BilibiliStats, VideoContext, ViewResponse};

/// API code for a video that is invisible or private.
pub const CODE_INVISIBLE: i64 = 62002;

/// Fetch one video's statistics. `Ok(None)` means the API answered but had nothing usable.
#[instrument(level = "info")]
pub fn fetch_stats(bvid: &str, context: VideoContext) -> Result<Option<BilibiliStats>, CollectError> {
    let response: ViewResponse = http::get_json(
        BILIBILI_VIEW_URL,
        &[("bvid", bvid)],
        &[("User-Agent", BILIBILI_USER_AGENT)],
    )?;
    Ok(stats_from_response(bvid, context, response))
}

/// Flatten a view reply into a CSV row.
pub fn stats_from_response(bvid: &str, context: VideoContext, response: ViewResponse) -> Option<BilibiliStats> {
    if response.code == CODE_INVISIBLE {
        warn!(bvid, "Video invisible or private (62002)");
        return Some(BilibiliStats {
            bvid: bvid.to_string(),
            context_video: context,
            title: None,
            name_streamer: None,
            link_channel: None,
            data_publicacao: None,
            views: None,
            likes: None,
            danmaku: None,
            coins: None,
            shares: None,
            favorites: None,
            comments: None,
            erro: Some("invisivel_62002".to_string()),
        });
    }
    if response.code != 0 {
        error!(bvid, code = response.code, message = response.message.as_deref().unwrap_or(""), "Bilibili API error");
        return None;
    }

    let Some(data) = response.data else {
        warn!(bvid, "Reply has no data");
        return None;
    };
    let Some(stat) = data.stat else {
        warn!(bvid, "Reply has no stat block");
        return None;
    };
    let owner = data.owner.unwrap_or_default();

    Some(BilibiliStats {
        bvid: data.bvid.unwrap_or_else(|| bvid.to_string()),
        context_video: context,
        title: data.title,
        name_streamer: owner.name,
        link_channel: owner.mid.map(|mid| format!("https://space.bilibili.com/{}", mid)),
        data_publicacao: data.pubdate.and_then(format_pubdate),
        views: stat.view,
        likes: stat.like,
        danmaku: stat.danmaku,
        coins: stat.coin,
        shares: stat.share,
        favorites: stat.favorite,
        comments: stat.reply,
        erro: None,
    })
}

/// Unix seconds to `%Y-%m-%d` in China time.
pub fn format_pubdate(unix_secs: i64) -> Option<String> {
    DateTime::from_timestamp(unix_secs, 0).map(|dt| dt.with_timezone(&Shanghai).format("%Y-%m-%d").to_string())
}

/// Fetch every configured video, pausing between calls, and write the rows that came back.
pub fn collect(videos: &[(&str, VideoContext)], out_path: &Path) -> Result<String, CollectError> {
    let mut rows: Vec<BilibiliStats> = Vec::new();
    for (bvid, context) in videos {
        match fetch_stats(bvid, *context) {
            Ok(Some(row)) => rows.push(row),
            Ok(None) => {}
            Err(e) => error!(error = %e, bvid, "Skipping video"),
        }
        // Pause after every call, failed ones included, or the API starts answering 412
        std::thread::sleep(Duration::from_millis(BILIBILI_DELAY_MS));
    }

    if rows.is_empty() {
        info!("No Bilibili statistics collected");
        return Ok("Bilibili: no statistics collected (skipped)".to_string());
    }
    export::write_rows(out_path, &rows)?;
    Ok(format!("Bilibili: {} videos written to {}", rows.len(), out_path.display()))
}
