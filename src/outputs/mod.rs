//! Filesystem output: folders and weekly `.docx` documents.
//!
//! # Submodules
//!
//! - [`folders`]: Creates the year and month folder tree
//! - [`weekly`]: Lays out and writes one shop log per ISO week
//! - [`docx`]: Packages paragraphs into a WordprocessingML archive
//!
//! # Output Structure
//!
//! ```text
//! output/
//! └── 2020/
//!     ├── 1 - Jan/
//!     │   ├── Dec 30 to Jan 03.docx
//!     │   ├── Jan 06 to Jan 10.docx
//!     │   └── ...
//!     ...
//!     └── 12 - Dec/
//!         └── Dec 28 to Jan 01.docx
//! ```

pub mod docx;
pub mod folders;
pub mod weekly;
