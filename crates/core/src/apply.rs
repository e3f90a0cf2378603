use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RenameMode {
    DryRun,
    Execute,
}

impl RenameMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            RenameMode::DryRun
        } else {
            RenameMode::Execute
        }
    }

    pub fn is_dry_run(&self) -> bool {
        matches!(self, RenameMode::DryRun)
    }
}

/// Moves `source` to `target`. Returns whether the file was actually moved;
/// a dry run or any filesystem failure yields `false`.
pub fn execute_rename(source: &Path, target: &Path, mode: RenameMode) -> bool {
    if mode.is_dry_run() {
        return false;
    }

    if target.symlink_metadata().is_ok() {
        warn!(
            "refusing to overwrite existing file: {} -> {}",
            source.display(),
            target.display()
        );
        return false;
    }

    match fs::rename(source, target) {
        Ok(()) => true,
        Err(err) => {
            warn!(
                "rename failed: {} -> {}: {err}",
                source.display(),
                target.display()
            );
            false
        }
    }
}
