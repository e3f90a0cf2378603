use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::LazyLock;

// Default iPhone camera naming: IMG_<sequence>.JPEG for stills and
// IMG_<sequence>.MOV for the live photo clip.
static IMAGE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^img_[0-9]+\.jpeg$").unwrap());
static VIDEO_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^img_[0-9]+\.mov$").unwrap());

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    Image,
    CompanionVideo,
    Unsupported,
}

impl FileCategory {
    pub fn label(&self) -> &'static str {
        match self {
            FileCategory::Image => "photo",
            FileCategory::CompanionVideo => "video",
            FileCategory::Unsupported => "unsupported",
        }
    }
}

/// Stem and lowercased extension, split at the last `.`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NameParts {
    pub stem: String,
    pub extension: String,
}

/// One non-directory entry of a listing. Built once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileEntry {
    pub directory: PathBuf,
    pub name: String,
    pub parts: Option<NameParts>,
}

impl FileEntry {
    pub fn new(directory: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        let name = name.into();
        let parts = split_name(&name);
        Self {
            directory: directory.into(),
            name,
            parts,
        }
    }

    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.name)
    }

    pub fn stem(&self) -> Option<&str> {
        self.parts.as_ref().map(|p| p.stem.as_str())
    }

    pub fn extension(&self) -> Option<&str> {
        self.parts.as_ref().map(|p| p.extension.as_str())
    }

    pub fn category(&self) -> FileCategory {
        classify(&self.name).category
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: FileCategory,
    pub parts: Option<NameParts>,
}

pub fn classify(file_name: &str) -> Classification {
    let parts = split_name(file_name);
    let category = match parts {
        None => FileCategory::Unsupported,
        Some(_) if IMAGE_NAME_RE.is_match(file_name) => FileCategory::Image,
        Some(_) if VIDEO_NAME_RE.is_match(file_name) => FileCategory::CompanionVideo,
        Some(_) => FileCategory::Unsupported,
    };
    Classification { category, parts }
}

fn split_name(file_name: &str) -> Option<NameParts> {
    let (stem, extension) = file_name.rsplit_once('.')?;
    Some(NameParts {
        stem: stem.to_string(),
        extension: extension.to_lowercase(),
    })
}
