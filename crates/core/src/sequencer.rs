use crate::apply::{execute_rename, RenameMode};
use crate::classify::{FileCategory, FileEntry};
use crate::metadata::CaptureTimeSource;
use crate::moment::CaptureMoment;
use crate::naming::{NameError, NameResolver};
use log::{error, info, warn};
use serde::Serialize;
use std::vec;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RenameDecision {
    pub source: FileEntry,
    pub category: FileCategory,
    pub capture_moment: CaptureMoment,
    pub target_moment: CaptureMoment,
    pub target_name: String,
    pub moved: bool,
}

#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("not supported file name")]
    Unsupported,
    #[error("could not read capture moment")]
    MissingMoment,
    #[error("capture moment {moment} is before {earliest}")]
    BeforeEarliest {
        moment: CaptureMoment,
        earliest: CaptureMoment,
    },
    #[error("no preceding photo to take the capture moment from")]
    OrphanVideo,
    #[error("{error}")]
    NoFreeName { error: NameError },
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Skip {
    pub source: FileEntry,
    pub category: FileCategory,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Renamed(RenameDecision),
    Skipped(Skip),
}

impl Outcome {
    pub fn source(&self) -> &FileEntry {
        match self {
            Outcome::Renamed(decision) => &decision.source,
            Outcome::Skipped(skip) => &skip.source,
        }
    }

    pub fn decision(&self) -> Option<&RenameDecision> {
        match self {
            Outcome::Renamed(decision) => Some(decision),
            Outcome::Skipped(_) => None,
        }
    }
}

/// Videos inherit the capture moment of the last photo that passed validation.
pub struct Sequencer<'a, S: ?Sized> {
    entries: vec::IntoIter<FileEntry>,
    source: &'a S,
    mode: RenameMode,
    earliest_valid: Option<CaptureMoment>,
    resolver: NameResolver,
    last_image: Option<CaptureMoment>,
}

impl<'a, S> Sequencer<'a, S>
where
    S: CaptureTimeSource + ?Sized,
{
    pub fn new(
        entries: Vec<FileEntry>,
        source: &'a S,
        mode: RenameMode,
        earliest_valid: Option<CaptureMoment>,
    ) -> Self {
        Self {
            entries: entries.into_iter(),
            source,
            mode,
            earliest_valid,
            resolver: NameResolver::new(),
            last_image: None,
        }
    }

    pub fn last_image_moment(&self) -> Option<CaptureMoment> {
        self.last_image
    }

    fn process(&mut self, entry: FileEntry) -> Outcome {
        let category = entry.category();
        match category {
            FileCategory::Unsupported => skip(entry, category, SkipReason::Unsupported),
            FileCategory::Image => match self.validated_moment(&entry) {
                Ok(moment) => {
                    self.last_image = Some(moment);
                    self.rename(entry, category, moment)
                }
                Err(reason) => skip(entry, category, reason),
            },
            FileCategory::CompanionVideo => match self.last_image {
                Some(moment) => self.rename(entry, category, moment),
                None => skip(entry, category, SkipReason::OrphanVideo),
            },
        }
    }

    fn validated_moment(&self, entry: &FileEntry) -> Result<CaptureMoment, SkipReason> {
        let moment = self
            .source
            .capture_moment(&entry.path())
            .ok_or(SkipReason::MissingMoment)?;

        match self.earliest_valid {
            Some(earliest) if moment < earliest => {
                Err(SkipReason::BeforeEarliest { moment, earliest })
            }
            _ => Ok(moment),
        }
    }

    fn rename(
        &mut self,
        entry: FileEntry,
        category: FileCategory,
        moment: CaptureMoment,
    ) -> Outcome {
        let resolved = self
            .resolver
            .first_free_name(&entry.directory, entry.extension(), moment);
        let resolved = match resolved {
            Ok(resolved) => resolved,
            Err(error) => return skip(entry, category, SkipReason::NoFreeName { error }),
        };

        let target = entry.directory.join(&resolved.file_name);
        let moved = execute_rename(&entry.path(), &target, self.mode);
        if !moved && !self.mode.is_dry_run() {
            self.resolver.release(&target);
        }

        Outcome::Renamed(RenameDecision {
            source: entry,
            category,
            capture_moment: moment,
            target_moment: resolved.moment,
            target_name: resolved.file_name,
            moved,
        })
    }
}

impl<S> Iterator for Sequencer<'_, S>
where
    S: CaptureTimeSource + ?Sized,
{
    type Item = Outcome;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.next()?;
        let outcome = self.process(entry);
        log_outcome(&outcome);
        Some(outcome)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

fn skip(source: FileEntry, category: FileCategory, reason: SkipReason) -> Outcome {
    Outcome::Skipped(Skip {
        source,
        category,
        reason,
    })
}

fn log_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Renamed(d) => info!(
            "{} | moved={}; {} -> {} -> {}",
            d.category.label(),
            d.moved,
            d.source.name,
            d.capture_moment,
            d.target_name
        ),
        Outcome::Skipped(s) => match &s.reason {
            SkipReason::Unsupported | SkipReason::OrphanVideo => {
                warn!("{} | {}: {}", s.category.label(), s.reason, s.source.name)
            }
            SkipReason::MissingMoment
            | SkipReason::BeforeEarliest { .. }
            | SkipReason::NoFreeName { .. } => {
                error!("{} | {}: {}", s.category.label(), s.reason, s.source.name)
            }
        },
    }
}
