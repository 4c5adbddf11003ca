//! Weekly shop log documents.
//!
//! Each ISO week gets one `.docx` named after its Monday and Friday, e.g.
//! `Dec 30 to Jan 03.docx`. The document is a title line followed by one
//! block per workday:
//!
//! ```text
//! Shop Log for Dec 30 2019 to Jan 03 2020
//! Dec 30 (PERSON):
//!   •
//!   •
//!   •
//!
//! Dec 31 (PERSON):
//! ...
//! ```
//!
//! Existing files are never overwritten.

use crate::calendar::week_dates;
use crate::error::GenerateError;
use crate::models::{DocumentOutcome, ShopLogTemplate};
use crate::outputs::docx::{Document, Paragraph, RunStyle};
use crate::utils::{format_date, short_label};
use chrono::NaiveDate;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{error, info, instrument, warn};

/// File name for the week starting on `monday` and ending on `friday`.
pub fn document_file_name(monday: NaiveDate, friday: NaiveDate) -> String {
    format!("{} to {}.docx", short_label(monday), short_label(friday))
}

/// Lay out the shop log for one workweek.
pub fn build_shop_log(days: &[NaiveDate; 5], template: &ShopLogTemplate) -> Document {
    let font = Some(template.font.to_string());
    let mut doc = Document::new();

    let [monday, .., friday] = *days;
    doc.push(
        Paragraph::styled(
            format!(
                "{} {} to {}",
                template.title_prefix,
                format_date(monday),
                format_date(friday)
            ),
            RunStyle {
                bold: true,
                italic: true,
                underline: true,
                font: font.clone(),
                size_pt: Some(template.title_size_pt),
            },
        )
        .with_line_spacing(template.line_spacing),
    );

    let heading_style = RunStyle {
        underline: true,
        font: font.clone(),
        size_pt: Some(template.heading_size_pt),
        ..RunStyle::default()
    };
    let bullet_style = RunStyle {
        font,
        ..RunStyle::default()
    };

    for day in days {
        doc.push(Paragraph::styled(
            format!("{}{}", short_label(*day), template.heading_suffix),
            heading_style.clone(),
        ));
        for _ in 0..template.bullets_per_day {
            doc.push(
                Paragraph::bullet(template.bullet_indent_twips, bullet_style.clone())
                    .with_line_spacing(template.line_spacing),
            );
        }
        doc.push(Paragraph::blank());
    }

    doc
}

/// Write the shop log for ISO week `week` of `year` into `folder`.
///
/// Returns [`DocumentOutcome::Skipped`] without touching the disk if a file
/// already exists at the target path.
#[instrument(level = "info", skip(folder, template), fields(folder = %folder.display()))]
pub async fn emit_week_document(
    year: i32,
    week: u32,
    folder: &Path,
    template: &ShopLogTemplate,
) -> Result<DocumentOutcome, GenerateError> {
    let days = week_dates(year, week)?;
    let file_name = document_file_name(days[0], days[4]);
    let path = folder.join(&file_name);

    if fs::try_exists(&path).await? {
        warn!(path = %path.display(), "Already created; skipping");
        return Ok(DocumentOutcome::Skipped(path));
    }

    let bytes = build_shop_log(&days, template).to_docx_bytes()?;

    let file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .await;
    let file = match file {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            warn!(path = %path.display(), "Created concurrently; skipping");
            return Ok(DocumentOutcome::Skipped(path));
        }
        Err(e) => return Err(e.into()),
    };
    write_fresh(file, &path, &bytes).await?;

    info!(file = %file_name, bytes = bytes.len(), "Generated");
    Ok(DocumentOutcome::Generated(path))
}

/// Write `bytes` into a file just created at `path`.
///
/// A failed write removes the file again so that a later run regenerates it
/// instead of skipping a truncated document.
async fn write_fresh<W>(mut file: W, path: &Path, bytes: &[u8]) -> Result<(), GenerateError>
where
    W: AsyncWrite + Unpin,
{
    let written = async {
        file.write_all(bytes).await?;
        file.flush().await
    }
    .await;

    if let Err(e) = written {
        drop(file);
        if let Err(cleanup) = fs::remove_file(path).await {
            error!(path = %path.display(), error = %cleanup, "Failed to remove partial document");
        } else {
            warn!(path = %path.display(), error = %e, "Removed partial document after failed write");
        }
        return Err(e.into());
    }
    Ok(())
}
