use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};

use crate::{
    error::MenuError,
    models::{DishPayload, MenuResponse, RandomPayload, Stats, StatsResponse},
    selector::RandomSelector,
    state::AppState,
    utils::coerce_count,
};

pub async fn menu_handler(State(state): State<Arc<AppState>>) -> Json<MenuResponse> {
    Json(MenuResponse::listing(state.store.load()))
}

pub async fn add_dish_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DishPayload>,
) -> Result<Json<MenuResponse>, MenuError> {
    let _guard = state.write_lock.lock().await;
    let menu = state.store.add(&payload.name)?;

    Ok(Json(MenuResponse::changed("dish added", menu)))
}

pub async fn delete_dish_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<MenuResponse>, MenuError> {
    let _guard = state.write_lock.lock().await;
    let menu = state.store.remove(&name)?;

    Ok(Json(MenuResponse::changed("dish removed", menu)))
}

pub async fn update_dish_handler(
    State(state): State<Arc<AppState>>,
    Path(old_name): Path<String>,
    Json(payload): Json<DishPayload>,
) -> Result<Json<MenuResponse>, MenuError> {
    let _guard = state.write_lock.lock().await;
    let menu = state.store.rename(&old_name, &payload.name)?;

    Ok(Json(MenuResponse::changed("dish updated", menu)))
}

pub async fn random_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RandomPayload>,
) -> Result<Json<MenuResponse>, MenuError> {
    let count = coerce_count(payload.count.as_ref());
    let menu = state.store.load();

    let mut selector = RandomSelector::new();
    let selected = selector.select(&menu, count)?;

    Ok(Json(MenuResponse::selection(selected)))
}

pub async fn backup_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.store.raw_bytes() {
        Ok(bytes) => (
            [
                (CONTENT_TYPE, "application/json"),
                (
                    CONTENT_DISPOSITION,
                    "attachment; filename=\"menu_data.json\"",
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => Json(MenuResponse::failure(format!("download failed: {e}"))).into_response(),
    }
}

pub async fn stats_handler(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let menu = state.store.load();

    Json(StatsResponse {
        success: true,
        data: Stats {
            total_dishes: menu.len(),
            last_updated: state.store.last_updated(),
            backup_count: state.store.backups().count(),
        },
    })
}

#[cfg(test)]
mod tests {
    use std::{path::Path, sync::Arc};

    use axum::{Json, extract::State, http::header::CONTENT_DISPOSITION};
    use serde_json::json;
    use tempfile::tempdir;
    use tokio::sync::Mutex;

    use super::{
        add_dish_handler, backup_handler, delete_dish_handler, menu_handler, random_handler,
        stats_handler, update_dish_handler,
    };
    use crate::{
        config::Config,
        models::{DishPayload, RandomPayload},
        state::AppState,
        store::{DEFAULT_MENU, MenuStore},
    };

    fn test_state(dir: &Path) -> Arc<AppState> {
        Arc::new(AppState {
            config: Config {
                port: 0,
                data_dir: dir.to_path_buf(),
            },
            store: MenuStore::new(dir),
            write_lock: Mutex::new(()),
        })
    }

    fn dish(name: &str) -> Json<DishPayload> {
        Json(DishPayload {
            name: name.to_string(),
        })
    }

    #[tokio::test]
    async fn test_menu_seeds_and_lists() {
        let dir = tempdir().unwrap();
        let state = test_state(dir.path());

        let Json(response) = menu_handler(State(state)).await;

        assert!(response.success);
        assert_eq!(response.count, Some(10));
        assert_eq!(response.data.unwrap(), DEFAULT_MENU);
    }

    #[tokio::test]
    async fn test_add_then_duplicate() {
        let dir = tempdir().unwrap();
        let state = test_state(dir.path());

        let Json(response) = add_dish_handler(State(state.clone()), dish("北京烤鸭"))
            .await
            .unwrap();
        assert!(response.success);
        assert!(response.data.unwrap().contains(&"北京烤鸭".to_string()));

        let duplicate = add_dish_handler(State(state), dish("北京烤鸭")).await;
        assert!(duplicate.is_err());
    }

    #[tokio::test]
    async fn test_delete_and_update() {
        let dir = tempdir().unwrap();
        let state = test_state(dir.path());
        state.store.save(&["A".to_string(), "B".to_string()]);

        let Json(response) = delete_dish_handler(State(state.clone()), axum::extract::Path("A".to_string()))
            .await
            .unwrap();
        assert_eq!(response.data.unwrap(), ["B"]);

        let Json(response) = update_dish_handler(
            State(state),
            axum::extract::Path("B".to_string()),
            dish("C"),
        )
        .await
        .unwrap();
        assert_eq!(response.data.unwrap(), ["C"]);
    }

    #[tokio::test]
    async fn test_random_caps_to_inventory() {
        let dir = tempdir().unwrap();
        let state = test_state(dir.path());
        state
            .store
            .save(&["A".to_string(), "B".to_string(), "C".to_string()]);

        let Json(response) = random_handler(
            State(state),
            Json(RandomPayload {
                count: Some(json!(99)),
            }),
        )
        .await
        .unwrap();

        assert!(response.success);
        assert_eq!(response.count, Some(3));
        assert_eq!(response.data.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_random_on_empty_menu_fails() {
        let dir = tempdir().unwrap();
        let state = test_state(dir.path());
        state.store.save(&[]);

        let result = random_handler(State(state), Json(RandomPayload { count: None })).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_backup_download_headers() {
        let dir = tempdir().unwrap();
        let state = test_state(dir.path());
        state.store.save(&["A".to_string()]);

        let response = backup_handler(State(state)).await;

        assert_eq!(
            response.headers().get(CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"menu_data.json\""
        );
    }

    #[tokio::test]
    async fn test_backup_download_missing_file() {
        let dir = tempdir().unwrap();
        let state = test_state(dir.path());

        let response = backup_handler(State(state)).await;

        assert!(response.headers().get(CONTENT_DISPOSITION).is_none());
    }

    #[tokio::test]
    async fn test_stats_counts_backups() {
        let dir = tempdir().unwrap();
        let state = test_state(dir.path());
        state.store.save(&["A".to_string()]);
        state.store.add("B").unwrap();

        let Json(response) = stats_handler(State(state)).await;

        assert!(response.success);
        assert_eq!(response.data.total_dishes, 2);
        assert_eq!(response.data.backup_count, 1);
        assert!(response.data.last_updated.is_some());
    }
}
