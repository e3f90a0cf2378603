use crate::moment::CaptureMoment;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Upper bound on one-second advances for a single file. Burst shots stay
/// far below this.
pub const MAX_ATTEMPTS: u32 = 10_000;

#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameError {
    #[error("no free name within {attempts} seconds after {start}")]
    Exhausted { start: CaptureMoment, attempts: u32 },
    #[error("capture moment {0} cannot be advanced any further")]
    OutOfRange(CaptureMoment),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub file_name: String,
    pub moment: CaptureMoment,
}

pub fn canonical_name(moment: CaptureMoment, extension: Option<&str>) -> String {
    match extension {
        Some(ext) => format!("{}.{}", moment.canonical_stem(), ext),
        None => moment.canonical_stem(),
    }
}

#[derive(Debug, Default)]
pub struct NameResolver {
    reserved: HashSet<PathBuf>,
}

impl NameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_free_name(
        &mut self,
        directory: &Path,
        extension: Option<&str>,
        desired: CaptureMoment,
    ) -> Result<ResolvedName, NameError> {
        let mut candidate = desired;

        for _ in 0..MAX_ATTEMPTS {
            let file_name = canonical_name(candidate, extension);
            let path = directory.join(&file_name);
            if self.is_available(&path) {
                self.reserved.insert(path);
                return Ok(ResolvedName {
                    file_name,
                    moment: candidate,
                });
            }
            candidate = candidate
                .next_second()
                .ok_or(NameError::OutOfRange(candidate))?;
        }

        Err(NameError::Exhausted {
            start: desired,
            attempts: MAX_ATTEMPTS,
        })
    }

    pub fn release(&mut self, path: &Path) {
        self.reserved.remove(path);
    }

    fn is_available(&self, candidate: &Path) -> bool {
        if self.reserved.contains(candidate) {
            return false;
        }
        // symlink_metadata so dangling links still count as taken
        candidate.symlink_metadata().is_err()
    }
}
