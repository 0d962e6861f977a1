use std::fmt::Write;

use tracing::info;

use crate::model::record::RecordEntry;
use crate::model::run::Run;

const MICROS_PER_SECOND: i64 = 1_000_000;
const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SECOND;

/// Drop runs without a date and order the rest chronologically.
/// The sort is stable, so runs sharing a date keep their API order.
pub fn sort_runs_by_date(runs: Vec<Run>) -> Vec<Run> {
    let mut dated: Vec<Run> = runs
        .into_iter()
        .filter(|r| r.date.as_deref().is_some_and(|d| !d.is_empty()))
        .collect();
    // ISO dates order correctly as strings
    dated.sort_by(|a, b| a.date.cmp(&b.date));
    dated
}

/// Runs whose `values` map `variable_id` to `value_id`. Runs without the variable are skipped.
pub fn filter_by_subcategory<'a>(runs: &'a [Run], variable_id: &str, value_id: &str) -> Vec<&'a Run> {
    runs.iter().filter(|r| r.matches_value(variable_id, value_id)).collect()
}

/// Walk date-sorted runs of one sub-category and keep every run that beat the best time so far.
/// Equal times are not a new record.
pub fn record_progression(sorted_runs: &[Run], variable_id: &str, value_id: &str) -> Vec<RecordEntry> {
    let filtered = filter_by_subcategory(sorted_runs, variable_id, value_id);
    info!(total = sorted_runs.len(), filtered = filtered.len(), "Filtered runs by sub-category");

    if filtered.is_empty() {
        info!("No runs left after sub-category filter");
        return Vec::new();
    }

    let mut history = Vec::new();
    let mut best_time = f64::INFINITY;
    for run in filtered {
        let time = run.times.primary_t;
        if time < best_time {
            best_time = time;
            history.push(record_entry(run));
        }
    }

    info!(records = history.len(), "Record progression complete");
    history
}

fn record_entry(run: &Run) -> RecordEntry {
    let time = run.times.primary_t;
    RecordEntry {
        date: run.date.clone().unwrap_or_else(|| "N/A".to_string()),
        player: run.first_player_name().unwrap_or("N/A").to_string(),
        time_seconds: time,
        time_formatted: format_time(Some(time)),
        run_link: run.weblink.clone(),
        video_link: run.first_video_link().unwrap_or("N/A").to_string(),
    }
}

/// Render seconds as `H:MM:SS`, with `.mmm` when there is a fractional part.
/// The fraction is rounded to microseconds first and then cut to milliseconds.
/// A day or more is prefixed `N day(s), `; `None` renders as `N/A`.
pub fn format_time(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds else {
        return "N/A".to_string();
    };

    let total_micros = (seconds * MICROS_PER_SECOND as f64).round() as i64;
    let days = total_micros.div_euclid(MICROS_PER_DAY);
    let rest = total_micros.rem_euclid(MICROS_PER_DAY);
    let micros = rest % MICROS_PER_SECOND;
    let secs = rest / MICROS_PER_SECOND;

    let mut out = String::new();
    if days != 0 {
        let unit = if days.abs() == 1 { "day" } else { "days" };
        let _ = write!(out, "{} {}, ", days, unit);
    }
    let _ = write!(out, "{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60);
    if micros != 0 {
        let _ = write!(out, ".{:03}", micros / 1000);
    }
    out
}
