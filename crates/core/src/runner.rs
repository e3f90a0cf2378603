use crate::apply::RenameMode;
use crate::classify::FileCategory;
use crate::listing::{list_directory, ListingError};
use crate::metadata::CaptureTimeSource;
use crate::moment::CaptureMoment;
use crate::sequencer::{Outcome, Sequencer, SkipReason};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub directory: PathBuf,
    pub dry_run: bool,
    pub earliest_valid: Option<CaptureMoment>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            dry_run: true,
            earliest_valid: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct RunStats {
    pub scanned_files: usize,
    pub photos: usize,
    pub videos: usize,
    pub renamed: usize,
    pub simulated: usize,
    pub move_failures: usize,
    pub unsupported: usize,
    pub invalid_moment: usize,
    pub orphan_videos: usize,
    pub unresolved_names: usize,
}

impl RunStats {
    pub fn record(&mut self, outcome: &Outcome, mode: RenameMode) {
        self.scanned_files += 1;

        let category = match outcome {
            Outcome::Renamed(decision) => decision.category,
            Outcome::Skipped(skip) => skip.category,
        };
        match category {
            FileCategory::Image => self.photos += 1,
            FileCategory::CompanionVideo => self.videos += 1,
            FileCategory::Unsupported => {}
        }

        match outcome {
            Outcome::Renamed(decision) if decision.moved => self.renamed += 1,
            Outcome::Renamed(_) if mode.is_dry_run() => self.simulated += 1,
            Outcome::Renamed(_) => self.move_failures += 1,
            Outcome::Skipped(skip) => match skip.reason {
                SkipReason::Unsupported => self.unsupported += 1,
                SkipReason::MissingMoment | SkipReason::BeforeEarliest { .. } => {
                    self.invalid_moment += 1
                }
                SkipReason::OrphanVideo => self.orphan_videos += 1,
                SkipReason::NoFreeName { .. } => self.unresolved_names += 1,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub directory: PathBuf,
    pub mode: RenameMode,
    pub earliest_valid: Option<CaptureMoment>,
    pub outcomes: Vec<Outcome>,
    pub stats: RunStats,
}

/// Lists `options.directory` and processes every entry in name order.
/// Only listing failures are fatal; per-file problems end up in the report.
pub fn run_directory(
    options: &RunOptions,
    source: &dyn CaptureTimeSource,
) -> Result<RunReport, ListingError> {
    let entries = list_directory(&options.directory)?;
    let mode = RenameMode::from_dry_run(options.dry_run);

    info!(
        "renaming {} files in {} (dry_run={})",
        entries.len(),
        options.directory.display(),
        options.dry_run
    );

    let mut stats = RunStats::default();
    let mut outcomes = Vec::with_capacity(entries.len());
    for outcome in Sequencer::new(entries, source, mode, options.earliest_valid) {
        stats.record(&outcome, mode);
        outcomes.push(outcome);
    }

    Ok(RunReport {
        directory: options.directory.clone(),
        mode,
        earliest_valid: options.earliest_valid,
        outcomes,
        stats,
    })
}
