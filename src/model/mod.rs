pub mod bilibili;
pub mod game;
pub mod record;
pub mod run;
pub mod twitch;
pub mod youtube;

use serde::{Deserialize, Serialize};

/// The `{ "data": ... }` wrapper used by the speedrun.com and Twitch APIs.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}
