//! Card surface model.
//!
//! A [`CardVisual`] is the materialized visual unit the layout renderer
//! produces: a fixed-size, ordered stack of layers. It is derived and
//! immutable — any document or style change triggers a full re-render, never
//! patching. Layers hold [`Primitive`] draw ops only; nothing here encodes
//! animation state, so captures are deterministic by construction.

use crate::media::ImageRef;
use crate::style::{Color, FontStack};

/// Logical card width in pixels. One constant size for the whole system.
pub const CARD_WIDTH: u32 = 375;
/// Logical card height in pixels.
pub const CARD_HEIGHT: u32 = 500;

/// Marker class identifying an exportable card surface.
pub const EXPORT_MARKER_CLASS: &str = "export-card";

/// Whether a card is the cover or a content page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardRole {
    Cover,
    Content,
}

/// One rendered card: role, stable position, and its visual layer stack.
#[derive(Debug, Clone, PartialEq)]
pub struct CardVisual {
    pub role: CardRole,
    /// 0 = cover, 1..=N = pages in document order.
    pub sequence_index: usize,
    /// Bottom-to-top layer stack.
    pub layers: Vec<VisualLayer>,
}

impl CardVisual {
    /// Stable per-card identifier: `card-0` for the cover, `card-{i}` for
    /// page i.
    pub fn element_id(&self) -> String {
        format!("card-{}", self.sequence_index)
    }

    /// 1-based display page number; the cover is unnumbered.
    pub fn page_number(&self) -> Option<usize> {
        match self.role {
            CardRole::Cover => None,
            CardRole::Content => Some(self.sequence_index),
        }
    }

    /// The custom background-image layer, if one is composited on this card.
    pub fn background_image(&self) -> Option<(&ImageRef, f32)> {
        self.layers.iter().find_map(|layer| match layer {
            VisualLayer::BackgroundImage {
                image,
                mask_opacity,
            } => Some((image, *mask_opacity)),
            _ => None,
        })
    }

    /// Iterates every primitive across all layers, bottom-to-top.
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.layers.iter().flat_map(|layer| match layer {
            VisualLayer::Decoration(p) | VisualLayer::Content(p) | VisualLayer::Chrome(p) => {
                p.as_slice()
            }
            _ => &[],
        })
    }
}

/// One entry of a card's layer stack.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualLayer {
    /// Solid card background color.
    Backdrop(Color),
    /// User-supplied full-bleed background image with a uniform dark mask.
    BackgroundImage { image: ImageRef, mask_opacity: f32 },
    /// Theme background recipe (gradient blobs, grids, bars, ...).
    Decoration(Vec<Primitive>),
    /// Cover or page content.
    Content(Vec<Primitive>),
    /// Header date / footer author row shared across themes.
    Chrome(Vec<Primitive>),
}

// ============================================================================
// Draw primitives
// ============================================================================

/// Fill paint for rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Two-stop linear gradient; vertical runs top-to-bottom, otherwise
    /// left-to-right.
    LinearGradient {
        from: Color,
        to: Color,
        vertical: bool,
    },
}

/// Outline stroke for rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

/// A deterministic draw operation. Coordinates are logical card pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Paint>,
        stroke: Option<Stroke>,
        radius: f32,
        opacity: f32,
    },
    /// A circle; `blur > 0` renders it as a soft gradient blob.
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        color: Color,
        opacity: f32,
        blur: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
        width: f32,
        opacity: f32,
    },
    /// Regular grid of dots covering the whole card.
    DotGrid {
        spacing: f32,
        dot_radius: f32,
        color: Color,
        opacity: f32,
    },
    /// Regular grid of horizontal and vertical hairlines.
    LineGrid {
        spacing: f32,
        color: Color,
        opacity: f32,
    },
    /// Horizontal ruled lines only (notepad look).
    RuledLines {
        spacing: f32,
        color: Color,
        opacity: f32,
    },
    /// An embedded raster image (e.g. avatar); circular when `rounded`.
    Image {
        image: ImageRef,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        rounded: bool,
    },
    Text(TextBlock),
}

/// Horizontal text anchoring relative to `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// A positioned multi-line text run with an explicit font chain.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// Visual lines, one per authored line break (plus wrapping).
    pub lines: Vec<String>,
    pub font: FontStack,
    pub size: f32,
    pub color: Color,
    pub x: f32,
    /// Baseline of the first line.
    pub y: f32,
    pub anchor: Anchor,
    /// Line-height multiplier applied between lines.
    pub line_height: f32,
    pub bold: bool,
    pub italic: bool,
    pub letter_spacing: f32,
    pub opacity: f32,
    /// Whether inner whitespace is rendered exactly as authored.
    pub preserve_whitespace: bool,
}

impl TextBlock {
    /// Body/title text: explicit line breaks and whitespace are preserved
    /// exactly as authored.
    pub fn body(text: &str, font: FontStack, size: f32, color: Color) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
            font,
            size,
            color,
            x: 0.0,
            y: 0.0,
            anchor: Anchor::Start,
            line_height: 1.0,
            bold: false,
            italic: false,
            letter_spacing: 0.0,
            opacity: 1.0,
            preserve_whitespace: true,
        }
    }

    /// Short decorative label (badge, tagline, tag): whitespace is collapsed
    /// to a single line.
    pub fn label(text: &str, font: FontStack, size: f32, color: Color) -> Self {
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        Self {
            lines: vec![normalized],
            preserve_whitespace: false,
            ..Self::body("", font, size, color)
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn line_height(mut self, multiplier: f32) -> Self {
        self.line_height = multiplier;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn letter_spacing(mut self, spacing: f32) -> Self {
        self.letter_spacing = spacing;
        self
    }

    /// Total vertical extent of the block from the first baseline.
    pub fn block_height(&self) -> f32 {
        if self.lines.is_empty() {
            0.0
        } else {
            (self.lines.len() as f32 - 1.0) * self.size * self.line_height
        }
    }
}
