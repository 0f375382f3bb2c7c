use serde::{Deserialize, Serialize};
use serde_json::Value;

/// On-disk layout of `menu.json`. Metadata is recomputed on every save so it
/// can never drift from the list itself.
#[derive(Serialize, Deserialize)]
pub struct PersistedMenu {
    pub menu: Vec<String>,
    pub last_updated: String,
    pub total_dishes: usize,
}

#[derive(Deserialize)]
pub struct DishPayload {
    pub name: String,
}

#[derive(Deserialize)]
pub struct RandomPayload {
    // kept loose: clients send numbers, numeric strings, or nothing
    #[serde(default)]
    pub count: Option<Value>,
}

#[derive(Serialize)]
pub struct MenuResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MenuResponse {
    pub fn listing(menu: Vec<String>) -> Self {
        Self {
            success: true,
            count: Some(menu.len()),
            data: Some(menu),
            message: None,
        }
    }

    pub fn changed(message: &str, menu: Vec<String>) -> Self {
        Self {
            success: true,
            data: Some(menu),
            count: None,
            message: Some(message.to_string()),
        }
    }

    pub fn selection(selected: Vec<String>) -> Self {
        Self {
            success: true,
            count: Some(selected.len()),
            message: Some(format!("selected {} dishes", selected.len())),
            data: Some(selected),
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            data: None,
            count: None,
            message: Some(message),
        }
    }
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub data: Stats,
}

#[derive(Serialize)]
pub struct Stats {
    pub total_dishes: usize,
    pub last_updated: Option<String>,
    pub backup_count: usize,
}
