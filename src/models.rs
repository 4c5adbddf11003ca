//! Data models for weeks, the document template, and generation outcomes.
//!
//! This module defines the core data structures used throughout the application:
//! - [`WeekEntry`] / [`WeekMap`]: where each ISO week of a year belongs
//! - [`ShopLogTemplate`]: the fixed content and styling of a shop log
//! - [`FolderReport`], [`DocumentOutcome`], [`GenerationReport`]: what a run did
//!
//! The outcome types serialize to JSON so a run can be inspected with
//! `shop_log --json`.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Placement of one ISO week within its year.
///
/// `month` and the first element of `day_range` come from the week's Monday,
/// the second element of `day_range` from its Friday. For a week that crosses
/// a month boundary the end day is therefore smaller than the start day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekEntry {
    /// Month of the week's Monday (1-12).
    pub month: u32,
    /// Day-of-month of the Monday and of the Friday.
    pub day_range: (u32, u32),
}

/// ISO week number to [`WeekEntry`], ordered by week.
pub type WeekMap = BTreeMap<u32, WeekEntry>;

/// Fixed content and styling of a generated shop log.
///
/// Sizes are in points, the indent in twentieths of a point (twips) and the
/// line spacing in 240ths of a line, which is how WordprocessingML stores them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopLogTemplate {
    pub font: &'static str,
    pub title_prefix: &'static str,
    pub title_size_pt: u32,
    pub heading_size_pt: u32,
    /// Appended to each day's date label; filled in by hand later.
    pub heading_suffix: &'static str,
    pub bullets_per_day: usize,
    pub bullet_indent_twips: u32,
    pub line_spacing: u32,
}

impl Default for ShopLogTemplate {
    fn default() -> Self {
        Self {
            font: "Arial",
            title_prefix: "Shop Log for",
            title_size_pt: 14,
            heading_size_pt: 12,
            heading_suffix: " (PERSON):",
            bullets_per_day: 3,
            bullet_indent_twips: 720,
            line_spacing: 360,
        }
    }
}

/// A directory that could not be created.
#[derive(Debug, Clone, Serialize)]
pub struct FolderFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Result of provisioning the year and month folders.
#[derive(Debug, Default, Clone, Serialize)]
pub struct FolderReport {
    pub created: Vec<PathBuf>,
    pub existing: Vec<PathBuf>,
    pub failed: Vec<FolderFailure>,
}

/// What happened to one weekly document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "path", rename_all = "lowercase")]
pub enum DocumentOutcome {
    /// The document was written.
    Generated(PathBuf),
    /// A file was already present at the path; it was left untouched.
    Skipped(PathBuf),
}

impl DocumentOutcome {
    pub fn path(&self) -> &PathBuf {
        match self {
            DocumentOutcome::Generated(path) | DocumentOutcome::Skipped(path) => path,
        }
    }
}

/// A weekly document that could not be written.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentFailure {
    pub week: u32,
    pub error: String,
}

/// Everything a single run did, in processing order.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub year: i32,
    pub folders: FolderReport,
    pub documents: Vec<DocumentOutcome>,
    pub failed: Vec<DocumentFailure>,
}

impl GenerationReport {
    pub fn new(year: i32, folders: FolderReport) -> Self {
        Self {
            year,
            folders,
            documents: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn generated(&self) -> impl Iterator<Item = &PathBuf> {
        self.documents.iter().filter_map(|outcome| match outcome {
            DocumentOutcome::Generated(path) => Some(path),
            DocumentOutcome::Skipped(_) => None,
        })
    }

    pub fn skipped(&self) -> impl Iterator<Item = &PathBuf> {
        self.documents.iter().filter_map(|outcome| match outcome {
            DocumentOutcome::Skipped(path) => Some(path),
            DocumentOutcome::Generated(_) => None,
        })
    }
}
