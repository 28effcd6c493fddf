//! ZIP packaging and the end-to-end deck export pipeline.

use crate::capture::{self, Capture};
use crate::error::Result;
use crate::post::PostData;
use crate::style::VisualStyle;
use crate::theme;
use std::io::{Cursor, Write};
use std::time::{SystemTime, UNIX_EPOCH};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Archive entry name for a capture. Naming is position-based: the cover is
/// always `page_1.png`, page i is `page_{i + 1}.png`.
pub fn entry_name(sequence_index: usize) -> String {
    format!("page_{}.png", sequence_index + 1)
}

/// Archive file name for a deck: the base name plus a millisecond timestamp
/// suffix, so repeated exports never collide.
pub fn archive_file_name(base: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("{base}-{millis}.zip")
}

/// Packs captures into one ZIP archive.
///
/// Entries are written in deck order regardless of the order captures
/// arrive in.
pub fn pack(mut captures: Vec<Capture>) -> Result<Vec<u8>> {
    capture::restore_deck_order(&mut captures);

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for c in &captures {
        writer.start_file(entry_name(c.sequence_index), options)?;
        writer.write_all(&c.png)?;
    }

    let cursor = writer.finish()?;
    log::info!("packed {} captures into archive", captures.len());
    Ok(cursor.into_inner())
}

/// A finished export: suggested file name plus the archive bytes.
#[derive(Debug, Clone)]
pub struct ExportBundle {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Renders, captures, and packages a whole deck.
///
/// For a document with `k` pages the archive holds exactly `k + 1` entries:
/// `page_1.png` (cover) through `page_{k + 1}.png`. Any capture failure
/// aborts the export; no partial archive is produced.
pub async fn export_deck(
    data: &PostData,
    style: &VisualStyle,
    base_name: &str,
) -> Result<ExportBundle> {
    let deck = theme::render_deck(data, style);
    log::info!(
        "exporting deck: {} cards, theme {}",
        deck.len(),
        style.theme.name()
    );

    let captures = capture::capture_all(deck).await?;
    let bytes = pack(captures)?;

    Ok(ExportBundle {
        file_name: archive_file_name(base_name),
        bytes,
    })
}
