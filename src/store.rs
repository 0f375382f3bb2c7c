//! # Persistence
//!
//! File-backed storage for the menu.
//!
//! ## Requirements
//!
//! - One small JSON file, fully read and fully rewritten per operation
//! - Insertion order preserved, names unique (case-sensitive)
//! - Reads fail soft: a missing or corrupt file yields an empty menu
//! - Every overwrite snapshots the prior file first
//!
//! ## Layout
//!
//! ```json
//! {
//!   "menu": ["宫保鸡丁", "麻婆豆腐"],
//!   "last_updated": "2025-01-01T12:00:00.000000",
//!   "total_dishes": 2
//! }
//! ```
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::Local;
use tracing::error;

use crate::{
    backup::BackupManager,
    error::MenuError::{self, DuplicateName, EmptyName, NotFound, PersistenceFailure},
    models::PersistedMenu,
};

/// Seeded on first load when no persisted state exists.
pub const DEFAULT_MENU: [&str; 10] = [
    "宫保鸡丁",
    "麻婆豆腐",
    "水煮鱼",
    "回锅肉",
    "鱼香肉丝",
    "糖醋里脊",
    "清炒时蔬",
    "酸辣汤",
    "红烧肉",
    "京酱肉丝",
];

pub struct MenuStore {
    data_file: PathBuf,
    backup: BackupManager,
}

impl MenuStore {
    pub fn new(data_dir: &Path) -> Self {
        let data_file = data_dir.join("menu.json");
        let backup = BackupManager::new(data_file.clone(), data_dir.join("backups"));

        Self { data_file, backup }
    }

    pub fn backups(&self) -> &BackupManager {
        &self.backup
    }

    /// Current menu. Seeds the defaults when no file exists yet; a broken
    /// file is reported and read as empty rather than failing the request.
    pub fn load(&self) -> Vec<String> {
        if !self.data_file.exists() {
            let menu: Vec<String> = DEFAULT_MENU.iter().map(|s| s.to_string()).collect();
            self.save(&menu);

            return menu;
        }

        match self.read_persisted() {
            Ok(persisted) => persisted.menu,
            Err(e) => {
                error!("Failed to load menu: {e}");
                Vec::new()
            }
        }
    }

    /// Snapshots the prior file, then rewrites it with fresh metadata.
    /// Failures are logged and reported as `false`, never raised.
    pub fn save(&self, menu: &[String]) -> bool {
        self.backup.backup();

        let persisted = PersistedMenu {
            menu: menu.to_vec(),
            last_updated: now_iso(),
            total_dishes: menu.len(),
        };

        if let Err(e) = self.write_persisted(&persisted) {
            error!("Failed to save menu: {e}");
            return false;
        }

        true
    }

    pub fn add(&self, name: &str) -> Result<Vec<String>, MenuError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EmptyName);
        }

        let mut menu = self.load();
        if menu.iter().any(|dish| dish == name) {
            return Err(DuplicateName(name.to_string()));
        }

        menu.push(name.to_string());

        self.persist(menu)
    }

    pub fn remove(&self, name: &str) -> Result<Vec<String>, MenuError> {
        let mut menu = self.load();
        let index = menu
            .iter()
            .position(|dish| dish == name)
            .ok_or_else(|| NotFound(name.to_string()))?;

        menu.remove(index);

        self.persist(menu)
    }

    /// Replaces `old_name` in place, keeping its position. Renaming a dish
    /// to its own name is a no-op success.
    pub fn rename(&self, old_name: &str, new_name: &str) -> Result<Vec<String>, MenuError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(EmptyName);
        }

        let mut menu = self.load();
        let index = menu
            .iter()
            .position(|dish| dish == old_name)
            .ok_or_else(|| NotFound(old_name.to_string()))?;

        if new_name != old_name && menu.iter().any(|dish| dish == new_name) {
            return Err(DuplicateName(new_name.to_string()));
        }

        menu[index] = new_name.to_string();

        self.persist(menu)
    }

    /// Metadata straight from the persisted file; `None` when unreadable.
    pub fn last_updated(&self) -> Option<String> {
        self.read_persisted().ok().map(|p| p.last_updated)
    }

    /// Exact bytes of the persisted file, for download.
    pub fn raw_bytes(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.data_file)
    }

    fn persist(&self, menu: Vec<String>) -> Result<Vec<String>, MenuError> {
        if !self.save(&menu) {
            return Err(PersistenceFailure);
        }

        Ok(menu)
    }

    fn read_persisted(&self) -> Result<PersistedMenu, Box<dyn std::error::Error>> {
        let raw = fs::read_to_string(&self.data_file)?;

        Ok(serde_json::from_str(&raw)?)
    }

    fn write_persisted(&self, persisted: &PersistedMenu) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = self.data_file.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.data_file, serde_json::to_string_pretty(persisted)?)?;

        Ok(())
    }
}

fn now_iso() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
