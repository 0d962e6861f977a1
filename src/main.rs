use record_stats_collector::handler;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .try_init();

    let workflows = match handler::parse_workflows(std::env::args().skip(1)) {
        Ok(wfs) => wfs,
        Err(e) => {
            error!(error = %e, "Expected collectors: speedrun, bilibili, twitch, youtube");
            return;
        }
    };

    let summary = handler::run(workflows).await;
    info!(summary = %summary, "Done");
}
