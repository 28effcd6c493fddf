//! Layout renderer: maps a document + style into a concrete card visual.
//!
//! Dispatch is data-driven: each [`Theme`](crate::style::Theme) maps to a
//! [`Strategy`] record of three functions (background recipe, cover layout,
//! content layout) looked up in a registry, so the catalog extends by adding
//! a record rather than growing a conditional.
//!
//! Rendering is pure: strategies read `PostData`/`VisualStyle` and produce
//! primitives; they never mutate their inputs.

mod classic;
mod mono;
mod vivid;

use crate::card::{
    Anchor, CARD_HEIGHT, CARD_WIDTH, CardRole, CardVisual, Primitive, TextBlock, VisualLayer,
};
use crate::post::PostData;
use crate::style::{Alignment, Color, Decoration, ListStyle, Theme, VisualStyle};

pub(crate) const W: f32 = CARD_WIDTH as f32;
pub(crate) const H: f32 = CARD_HEIGHT as f32;

/// One theme's presentation strategy.
pub(crate) struct Strategy {
    /// Background-layer recipe, independent of the user background image.
    pub background: fn(&VisualStyle) -> Vec<Primitive>,
    /// Cover layout: consumes title / tags / author / date.
    pub cover: fn(&PostData, &VisualStyle) -> Vec<Primitive>,
    /// Content layout for 1-based page number `n`: consumes `pages[n - 1]`.
    pub content: fn(&PostData, &VisualStyle, usize) -> Vec<Primitive>,
}

/// Registry lookup. Total over the closed theme enumeration; unknown theme
/// *names* already resolved to the fallback variant at parse time.
pub(crate) fn strategy(theme: Theme) -> &'static Strategy {
    match theme {
        Theme::Minimal => &classic::MINIMAL,
        Theme::Bold => &classic::BOLD,
        Theme::Memo => &classic::MEMO,
        Theme::Journal => &classic::JOURNAL,
        Theme::Educational => &classic::EDUCATIONAL,
        Theme::Shockwave => &vivid::SHOCKWAVE,
        Theme::Diffused => &vivid::DIFFUSED,
        Theme::Sticker => &vivid::STICKER,
        Theme::Cinematic => &mono::CINEMATIC,
        Theme::Tech => &mono::TECH,
        Theme::Geek => &mono::GEEK,
        Theme::Simplicity => &mono::SIMPLICITY,
    }
}

// ============================================================================
// Rendering entry points
// ============================================================================

/// Renders one card. `sequence_index` 0 is the cover; page i renders
/// `pages[i - 1]`.
pub fn render(
    data: &PostData,
    style: &VisualStyle,
    role: CardRole,
    sequence_index: usize,
) -> CardVisual {
    let s = strategy(style.theme);

    let mut layers = vec![VisualLayer::Backdrop(style.background_color)];

    // Custom background image sits under the theme decoration, gated by the
    // apply mode, with a uniform dark mask on top of it.
    if let Some(image) = &style.background_image
        && style.background_apply_mode.applies_to(role)
    {
        layers.push(VisualLayer::BackgroundImage {
            image: image.clone(),
            mask_opacity: style.effective_mask_opacity(),
        });
    }

    layers.push(VisualLayer::Decoration((s.background)(style)));

    let content = match role {
        CardRole::Cover => (s.cover)(data, style),
        CardRole::Content => (s.content)(data, style, sequence_index),
    };
    layers.push(VisualLayer::Content(content));

    // Cinematic hides the header/footer chrome entirely.
    if style.theme != Theme::Cinematic {
        layers.push(VisualLayer::Chrome(chrome(data, style)));
    }

    CardVisual {
        role,
        sequence_index,
        layers,
    }
}

/// Renders the whole deck: cover first, then pages in document order.
///
/// For `pages.len() = k` this yields exactly `k + 1` cards with sequence
/// indices `0..=k`.
pub fn render_deck(data: &PostData, style: &VisualStyle) -> Vec<CardVisual> {
    let mut cards = Vec::with_capacity(data.pages.len() + 1);
    cards.push(render(data, style, CardRole::Cover, 0));
    for i in 1..=data.pages.len() {
        cards.push(render(data, style, CardRole::Content, i));
    }
    cards
}

// ============================================================================
// Shared chrome (header date / footer author)
// ============================================================================

fn chrome(data: &PostData, style: &VisualStyle) -> Vec<Primitive> {
    let mut prims = Vec::new();

    // Header date, right aligned. Empty date means hidden.
    if !data.date.is_empty() {
        prims.push(Primitive::Text(
            TextBlock::label(&data.date, style.body_font(), 10.0, style.text_color)
                .at(W - 16.0, 26.0)
                .anchored(Anchor::End)
                .opacity(0.5),
        ));
    }

    // Footer divider and author row.
    prims.push(Primitive::Line {
        x1: 0.0,
        y1: H - 48.0,
        x2: W,
        y2: H - 48.0,
        color: style.text_color,
        width: 1.0,
        opacity: 0.05,
    });

    match &data.avatar_image {
        Some(image) => prims.push(Primitive::Image {
            image: image.clone(),
            x: 16.0,
            y: H - 38.0,
            width: 28.0,
            height: 28.0,
            rounded: true,
        }),
        None => prims.push(Primitive::Circle {
            cx: 30.0,
            cy: H - 24.0,
            radius: 14.0,
            color: Color::rgb(0xe5, 0xe5, 0xe5),
            opacity: 1.0,
            blur: 0.0,
        }),
    }

    if !data.author_name.is_empty() {
        prims.push(Primitive::Text(
            TextBlock::label(&data.author_name, style.body_font(), 11.0, style.text_color)
                .at(52.0, H - 20.0)
                .opacity(0.8),
        ));
    }

    prims
}

// ============================================================================
// Layout helpers
// ============================================================================

/// Estimated advance of one character in em units. CJK glyphs are full
/// width; everything ASCII is treated as roughly half width.
fn char_width(ch: char) -> f32 {
    if ch.is_ascii() { 0.55 } else { 1.0 }
}

/// Deterministic line breaking by character-width estimate.
///
/// Explicit `\n` always breaks first; no character is dropped or collapsed,
/// so authored whitespace survives wrapping exactly.
pub(crate) fn wrap_text(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let budget = (max_width / size).max(1.0);
    let mut lines = Vec::new();
    for raw in text.split('\n') {
        let mut cur = String::new();
        let mut cur_w = 0.0;
        for ch in raw.chars() {
            let w = char_width(ch);
            if cur_w + w > budget && !cur.is_empty() {
                lines.push(std::mem::take(&mut cur));
                cur_w = 0.0;
            }
            cur.push(ch);
            cur_w += w;
        }
        lines.push(cur);
    }
    lines
}

/// Builds a wrapped title block in the theme's title font.
pub(crate) fn title_block(data: &PostData, style: &VisualStyle, max_width: f32) -> TextBlock {
    let mut block = TextBlock::body(
        &data.title,
        style.title_font(),
        style.title_font_size,
        style.primary_color,
    )
    .line_height(1.1);
    block.lines = wrap_text(&data.title, style.title_font_size, max_width);
    block
}

/// Builds the wrapped body block for 1-based page `n`.
pub(crate) fn page_block(
    data: &PostData,
    style: &VisualStyle,
    n: usize,
    max_width: f32,
) -> TextBlock {
    let text = data.pages.get(n - 1).map(String::as_str).unwrap_or("");
    let mut block = TextBlock::body(
        text,
        style.body_font(),
        style.body_font_size,
        style.text_color,
    )
    .line_height(style.line_height);
    block.lines = wrap_text(text, style.body_font_size, max_width);
    block
}

/// First-line baseline that vertically centers a block around `center_y`.
pub(crate) fn centered_baseline(block: &TextBlock, center_y: f32) -> f32 {
    center_y - block.block_height() / 2.0 + block.size * 0.35
}

/// Page-marker text for themes that draw a generic marker, derived from the
/// style's list flavor.
pub(crate) fn page_marker(style: &VisualStyle, n: usize) -> String {
    match style.list_style {
        ListStyle::Dot => "\u{2022}".to_string(),
        ListStyle::Number => format!("{n:02}"),
        ListStyle::Emoji => "\u{2728}".to_string(),
    }
}

/// Zero-padded display number used by several themes (`01`, `02`, ... `10`).
pub(crate) fn padded(n: usize) -> String {
    format!("{n:02}")
}

/// Horizontal anchor for the style's content alignment.
pub(crate) fn align_x(style: &VisualStyle) -> (f32, Anchor) {
    match style.layout {
        Alignment::Left => (32.0, Anchor::Start),
        Alignment::Center => (W / 2.0, Anchor::Middle),
    }
}

/// Default background for plain themes: a faint line grid when the style
/// asks for one, otherwise nothing.
pub(crate) fn grid_if_enabled(style: &VisualStyle) -> Vec<Primitive> {
    if style.decoration == Decoration::Grid {
        vec![Primitive::LineGrid {
            spacing: 20.0,
            color: style.text_color,
            opacity: 0.05,
        }]
    } else {
        Vec::new()
    }
}

/// Joined `#tag` row for themes that render tags as one inline label. At
/// most three tags are shown.
pub(crate) fn hash_tags(
    data: &PostData,
    style: &VisualStyle,
    size: f32,
    color: Color,
) -> Option<TextBlock> {
    if data.tags.is_empty() {
        return None;
    }
    let joined = data
        .tags
        .iter()
        .take(3)
        .map(|t| format!("#{t}"))
        .collect::<Vec<_>>()
        .join(" ");
    Some(TextBlock::label(&joined, style.body_font(), size, color))
}

pub(crate) const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
pub(crate) const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
