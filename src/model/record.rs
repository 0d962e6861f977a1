use serde::{Deserialize, Serialize};

/// A run that held the best known time of its sub-category when it was set.
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub date: String,
    pub player: String,
    pub time_seconds: f64,
    pub time_formatted: String,
    pub run_link: String,
    pub video_link: String,
}

/// Resolved ids scoping the run queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameIdentifiers {
    pub game_id: String,
    pub category_id: String,
    pub variable_id: String,
    pub value_id: String,
    pub value_label: String,
}
