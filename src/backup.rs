use std::{fs, io, path::PathBuf};

use chrono::Local;
use tracing::warn;

/// Copies the menu file aside before every overwrite.
///
/// Snapshots are append-only history for manual recovery. Nothing prunes
/// them, so the backup directory grows without bound.
pub struct BackupManager {
    data_file: PathBuf,
    backup_dir: PathBuf,
}

impl BackupManager {
    pub fn new(data_file: PathBuf, backup_dir: PathBuf) -> Self {
        Self {
            data_file,
            backup_dir,
        }
    }

    /// Best effort: a failed backup is logged and never blocks the save.
    pub fn backup(&self) {
        if !self.data_file.exists() {
            return;
        }

        if let Err(e) = self.try_backup() {
            warn!("Failed to back up menu: {e}");
        }
    }

    fn try_backup(&self) -> io::Result<()> {
        fs::create_dir_all(&self.backup_dir)?;

        // Second-granularity names: two backups within the same second share
        // a file name and the later copy wins.
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let target = self
            .backup_dir
            .join(format!("menu_backup_{timestamp}.json"));

        fs::copy(&self.data_file, target)?;

        Ok(())
    }

    /// Number of retained snapshots. A missing directory counts as zero.
    pub fn count(&self) -> usize {
        let Ok(entries) = fs::read_dir(&self.backup_dir) else {
            return 0;
        };

        entries
            .flatten()
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "json"))
            .count()
    }
}
