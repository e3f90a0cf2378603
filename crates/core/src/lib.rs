mod apply;
mod classify;
mod config;
mod exif_reader;
mod listing;
mod metadata;
mod moment;
mod naming;
mod runner;
mod sequencer;

pub use apply::{execute_rename, RenameMode};
pub use classify::{classify, Classification, FileCategory, FileEntry, NameParts};
pub use config::{app_paths, load_config, load_config_from, AppConfig, AppPaths};
pub use listing::{list_directory, ListingError};
pub use metadata::{CaptureTimeSource, ExifCaptureReader};
pub use moment::{CaptureMoment, CANONICAL_FORMAT};
pub use naming::{canonical_name, NameError, NameResolver, ResolvedName, MAX_ATTEMPTS};
pub use runner::{run_directory, RunOptions, RunReport, RunStats};
pub use sequencer::{Outcome, RenameDecision, Sequencer, Skip, SkipReason};
