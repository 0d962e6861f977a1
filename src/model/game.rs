use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    #[serde(default)]
    pub names: Option<GameNames>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameNames {
    pub international: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    pub id: String,
    pub name: String,
    pub values: VariableValues,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableValues {
    // Keyed by value id; BTreeMap keeps lookups deterministic
    pub values: BTreeMap<String, VariableValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableValue {
    pub label: String,
}
