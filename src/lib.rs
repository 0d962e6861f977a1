pub mod bilibili;
pub mod config;
pub mod error;
pub mod export;
pub mod handler;
pub mod http;
pub mod model;
pub mod progression;
pub mod speedrun;
pub mod twitch;
pub mod youtube;

pub use error::CollectError;
