//! Error type shared by the calendar, output, and pipeline modules.
//!
//! Most failures in this tool are non-fatal and end up as entries in a
//! [`GenerationReport`](crate::models::GenerationReport). [`GenerateError`]
//! is what the individual operations return before the pipeline decides
//! whether to record and continue.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// The year cannot be represented on the calendar.
    #[error("year {0} is outside the supported calendar range")]
    InvalidYear(i32),

    /// The ISO week does not exist in the given year.
    #[error("ISO week {week} does not exist in {year}")]
    InvalidWeek { year: i32, week: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("docx packaging failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("docx XML serialization failed: {0}")]
    Xml(String),
}
