use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{config::Config, store::MenuStore};

pub struct AppState {
    pub config: Config,
    pub store: MenuStore,
    /// Serializes mutating requests within this process. The file itself is
    /// not locked; a second process can still race.
    pub write_lock: Mutex<()>,
}

impl AppState {
    pub fn new() -> Arc<Self> {
        let config = Config::load();
        let store = MenuStore::new(&config.data_dir);

        Arc::new(Self {
            config,
            store,
            write_lock: Mutex::new(()),
        })
    }
}
