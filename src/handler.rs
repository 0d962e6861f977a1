use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::{self, Credentials};
use crate::error::CollectError;
use crate::speedrun::SpeedrunApi;
use crate::{bilibili, speedrun, twitch, youtube};

/// A collector the binary can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Workflow {
    Speedrun,
    Bilibili,
    Twitch,
    Youtube,
}

/// Parse positional collector names. No names means the speedrun collector only.
pub fn parse_workflows<I>(args: I) -> Result<Vec<Workflow>, String>
where
    I: IntoIterator<Item = String>,
{
    let mut workflows = Vec::new();
    for arg in args {
        let wf: Workflow = serde_json::from_value(serde_json::Value::String(arg.to_ascii_lowercase()))
            .map_err(|_| format!("Unknown collector: {}", arg))?;
        workflows.push(wf);
    }
    // Bare invocation keeps the speedrun-only behaviour
    if workflows.is_empty() {
        workflows.push(Workflow::Speedrun);
    }
    Ok(workflows)
}

fn run_workflow(wf: Workflow) -> Result<String, CollectError> {
    match wf {
        Workflow::Speedrun => speedrun::collect(
            &SpeedrunApi::default(),
            &config::SPEEDRUN_TARGET,
            &config::output_path(config::SPEEDRUN_OUTPUT),
        ),
        Workflow::Bilibili => bilibili::collect(config::BILIBILI_VIDEOS, &config::output_path(config::BILIBILI_OUTPUT)),
        Workflow::Twitch => twitch::collect(
            Path::new(config::AUTH_FILE),
            Path::new(config::TOKEN_FILE),
            config::TWITCH_LOGIN,
            &config::output_path(config::TWITCH_OUTPUT),
        ),
        Workflow::Youtube => {
            // Reads the speedrun CSV, so run `speedrun` first when both are requested
            let credentials = Credentials::load(config::AUTH_FILE)?;
            youtube::collect(
                &config::output_path(config::SPEEDRUN_OUTPUT),
                credentials.youtube_api_key()?,
                &config::output_path(config::YOUTUBE_OUTPUT),
            )
        }
    }
}

/// Run the collectors one after another, each on the blocking pool.
/// A failing collector is logged and the rest still run. Returns the joined summaries.
#[instrument]
pub async fn run(workflows: Vec<Workflow>) -> String {
    let mut summaries: Vec<String> = Vec::new();

    for wf in workflows {
        // Awaited before the next spawn so collectors never overlap
        let handle = tokio::task::spawn_blocking(move || match run_workflow(wf) {
            Ok(summary) => {
                info!(workflow = ?wf, summary = %summary, "Collector finished");
                summary
            }
            Err(e) => {
                error!(workflow = ?wf, error = %e, "Collector failed");
                format!("{:?} failed: {}", wf, e)
            }
        });
        match handle.await {
            Ok(summary) => summaries.push(summary),
            // Only a panic inside the collector lands here
            Err(e) => summaries.push(format!("Workflow task join error: {}", e)),
        }
    }

    if summaries.is_empty() {
        "No workflows executed".to_string()
    } else {
        summaries.join("; ")
    }
}
