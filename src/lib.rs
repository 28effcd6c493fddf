//! cardpress: themed social-card rendering and export
//!
//! This crate turns a structured text document into a deck of fixed-size
//! visual cards (one cover plus one card per page), rasterizes them to PNG
//! concurrently, and packages the result as a single ZIP archive with
//! stable, position-based entry names.
//!
//! # Example
//!
//! ```
//! use cardpress::{PostData, Theme, preset, render_deck};
//!
//! let mut data = PostData::default();
//! data.title = "Restart Your Year".to_string();
//! data.edit_page(0, "Small habits compound.");
//!
//! let style = preset(Theme::Minimal);
//! let deck = render_deck(&data, &style);
//!
//! // Cover plus one content card, in document order
//! assert_eq!(deck.len(), 2);
//! assert_eq!(deck[0].element_id(), "card-0");
//! ```
//!
//! # Exporting a deck
//!
//! Capture runs on blocking worker threads in parallel; the archive is
//! always ordered by deck position, never by completion order:
//!
//! ```no_run
//! use cardpress::{PostData, Theme, export_deck, preset};
//!
//! # async fn demo() -> cardpress::Result<()> {
//! let data = PostData::default();
//! let style = preset(Theme::Shockwave);
//!
//! let bundle = export_deck(&data, &style, "my-post").await?;
//! std::fs::write(&bundle.file_name, &bundle.bytes)?;
//! # Ok(())
//! # }
//! ```

mod archive;
mod assist;
mod capture;
mod card;
mod catalog;
mod error;
mod media;
mod post;
mod style;
mod svg;
mod theme;

pub use archive::{ExportBundle, archive_file_name, entry_name, export_deck, pack};
pub use assist::{ContentAssistant, ContentPatch, StylePatch};
pub use capture::{CAPTURE_SCALE, Capture, capture, capture_all};
pub use card::{
    Anchor, CARD_HEIGHT, CARD_WIDTH, CardRole, CardVisual, EXPORT_MARKER_CLASS, Paint, Primitive,
    Stroke, TextBlock, VisualLayer,
};
pub use catalog::{StyleOverrides, default_style, preset, resolve, switch_preset};
pub use error::{Error, Result};
pub use media::ImageRef;
pub use post::PostData;
pub use style::{
    Alignment, ApplyMode, Color, DEFAULT_MASK_OPACITY, Decoration, FontStack, ListStyle, Theme,
    VisualStyle,
};
pub use theme::{render, render_deck};
