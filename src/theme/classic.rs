//! Classic editorial themes: minimal, bold, memo, journal, educational.

use super::{
    H, Strategy, W, align_x, centered_baseline, grid_if_enabled, hash_tags, padded, page_block,
    page_marker, title_block,
};
use crate::card::{Anchor, Paint, Primitive, Stroke, TextBlock};
use crate::post::PostData;
use crate::style::VisualStyle;

const PAD: f32 = 32.0;
const TEXT_W: f32 = W - 2.0 * PAD;

pub(super) static MINIMAL: Strategy = Strategy {
    background: grid_if_enabled,
    cover: minimal_cover,
    content: minimal_content,
};

pub(super) static BOLD: Strategy = Strategy {
    background: grid_if_enabled,
    cover: bold_cover,
    content: bold_content,
};

pub(super) static MEMO: Strategy = Strategy {
    background: memo_background,
    cover: memo_cover,
    content: memo_content,
};

pub(super) static JOURNAL: Strategy = Strategy {
    background: journal_background,
    cover: journal_cover,
    content: journal_content,
};

pub(super) static EDUCATIONAL: Strategy = Strategy {
    background: grid_if_enabled,
    cover: educational_cover,
    content: educational_content,
};

// ============================================================================
// Minimal
// ============================================================================

fn minimal_cover(data: &PostData, style: &VisualStyle) -> Vec<Primitive> {
    let (x, anchor) = align_x(style);
    let mut prims = Vec::new();

    // Short accent rule above the title.
    let rule_x = match anchor {
        Anchor::Middle => W / 2.0 - 24.0,
        _ => PAD,
    };
    prims.push(Primitive::Rect {
        x: rule_x,
        y: 140.0,
        width: 48.0,
        height: 4.0,
        fill: Some(Paint::Solid(style.accent_color)),
        stroke: None,
        radius: 2.0,
        opacity: 1.0,
    });

    let title = title_block(data, style, TEXT_W);
    let y = centered_baseline(&title, 250.0).max(180.0);
    prims.push(Primitive::Text(title.at(x, y).anchored(anchor).bold()));

    if let Some(tags) = hash_tags(data, style, 12.0, style.primary_color) {
        prims.push(Primitive::Text(
            tags.at(x, H - 72.0).anchored(anchor).opacity(0.7),
        ));
    }
    prims
}

fn minimal_content(data: &PostData, style: &VisualStyle, n: usize) -> Vec<Primitive> {
    let mut prims = vec![Primitive::Text(
        TextBlock::label(
            &page_marker(style, n),
            style.body_font(),
            14.0,
            style.primary_color,
        )
        .at(PAD, 84.0)
        .bold(),
    )];
    prims.push(Primitive::Text(
        page_block(data, style, n, TEXT_W).at(PAD, 130.0),
    ));
    prims
}

// ============================================================================
// Bold
// ============================================================================

fn bold_cover(data: &PostData, style: &VisualStyle) -> Vec<Primitive> {
    let title = title_block(data, style, TEXT_W - 32.0);
    let band_height = title.block_height() + title.size * 1.6 + 48.0;
    let band_y = 250.0 - band_height / 2.0;

    let mut prims = vec![Primitive::Rect {
        x: 0.0,
        y: band_y,
        width: W,
        height: band_height,
        fill: Some(Paint::Solid(style.primary_color)),
        stroke: None,
        radius: 0.0,
        opacity: 1.0,
    }];

    // Title knocked out of the band in the card background color.
    let mut title = title;
    title.color = style.background_color;
    let y = centered_baseline(&title, 250.0);
    prims.push(Primitive::Text(title.at(PAD, y).bold()));

    if let Some(tags) = hash_tags(data, style, 12.0, style.text_color) {
        prims.push(Primitive::Text(tags.at(PAD, H - 72.0).bold().opacity(0.8)));
    }
    prims
}

fn bold_content(data: &PostData, style: &VisualStyle, n: usize) -> Vec<Primitive> {
    // Oversized ghost page number bleeding off the top-right corner.
    let mut prims = vec![Primitive::Text(
        TextBlock::label(&padded(n), style.title_font(), 120.0, style.primary_color)
            .at(W - 16.0, 120.0)
            .anchored(Anchor::End)
            .bold()
            .opacity(0.08),
    )];
    prims.push(Primitive::Rect {
        x: PAD,
        y: 88.0,
        width: 32.0,
        height: 8.0,
        fill: Some(Paint::Solid(style.accent_color)),
        stroke: None,
        radius: 0.0,
        opacity: 1.0,
    });
    prims.push(Primitive::Text(
        page_block(data, style, n, TEXT_W).at(PAD, 140.0).bold(),
    ));
    prims
}

// ============================================================================
// Memo (sticky-note look on ruled paper)
// ============================================================================

fn memo_background(style: &VisualStyle) -> Vec<Primitive> {
    vec![Primitive::RuledLines {
        spacing: 32.0,
        color: style.accent_color,
        opacity: 0.25,
    }]
}

fn memo_cover(data: &PostData, style: &VisualStyle) -> Vec<Primitive> {
    // Washi-tape strip pinning the card.
    let mut prims = vec![Primitive::Rect {
        x: W / 2.0 - 44.0,
        y: 52.0,
        width: 88.0,
        height: 22.0,
        fill: Some(Paint::Solid(style.accent_color)),
        stroke: None,
        radius: 2.0,
        opacity: 0.6,
    }];

    let title = title_block(data, style, TEXT_W);
    let y = centered_baseline(&title, 240.0).max(150.0);
    prims.push(Primitive::Text(
        title.at(W / 2.0, y).anchored(Anchor::Middle),
    ));

    if let Some(tags) = hash_tags(data, style, 13.0, style.primary_color) {
        prims.push(Primitive::Text(
            tags.at(W / 2.0, H - 76.0).anchored(Anchor::Middle),
        ));
    }
    prims
}

fn memo_content(data: &PostData, style: &VisualStyle, n: usize) -> Vec<Primitive> {
    let mut prims = vec![Primitive::Text(
        TextBlock::label(
            &page_marker(style, n),
            style.title_font(),
            18.0,
            style.primary_color,
        )
        .at(PAD, 92.0),
    )];
    // Body sits on the ruled lines.
    prims.push(Primitive::Text(
        page_block(data, style, n, TEXT_W).at(PAD, 128.0),
    ));
    prims
}

// ============================================================================
// Journal
// ============================================================================

fn journal_background(style: &VisualStyle) -> Vec<Primitive> {
    vec![Primitive::DotGrid {
        spacing: 20.0,
        dot_radius: 1.0,
        color: style.primary_color,
        opacity: 0.1,
    }]
}

fn journal_cover(data: &PostData, style: &VisualStyle) -> Vec<Primitive> {
    let mut prims = vec![Primitive::Rect {
        x: 24.0,
        y: 96.0,
        width: W - 48.0,
        height: 300.0,
        fill: None,
        stroke: Some(Stroke {
            color: style.accent_color,
            width: 1.0,
        }),
        radius: 8.0,
        opacity: 1.0,
    }];

    let title = title_block(data, style, TEXT_W - 32.0);
    let y = centered_baseline(&title, 246.0).max(150.0);
    prims.push(Primitive::Text(
        title.at(W / 2.0, y).anchored(Anchor::Middle),
    ));

    if let Some(tags) = hash_tags(data, style, 12.0, style.text_color) {
        prims.push(Primitive::Text(
            tags.at(W / 2.0, H - 76.0).anchored(Anchor::Middle).opacity(0.6),
        ));
    }
    prims
}

fn journal_content(data: &PostData, style: &VisualStyle, n: usize) -> Vec<Primitive> {
    let mut prims = vec![Primitive::Text(
        TextBlock::label(
            &page_marker(style, n),
            style.body_font(),
            13.0,
            style.accent_color,
        )
        .at(PAD, 84.0)
        .italic(),
    )];
    prims.push(Primitive::Line {
        x1: PAD,
        y1: 98.0,
        x2: PAD + 40.0,
        y2: 98.0,
        color: style.accent_color,
        width: 1.0,
        opacity: 0.8,
    });
    prims.push(Primitive::Text(
        page_block(data, style, n, TEXT_W).at(PAD, 136.0),
    ));
    prims
}

// ============================================================================
// Educational
// ============================================================================

fn educational_cover(data: &PostData, style: &VisualStyle) -> Vec<Primitive> {
    // Chapter badge above the title.
    let mut prims = vec![Primitive::Rect {
        x: PAD,
        y: 120.0,
        width: 76.0,
        height: 24.0,
        fill: Some(Paint::Solid(style.accent_color)),
        stroke: None,
        radius: 12.0,
        opacity: 1.0,
    }];
    prims.push(Primitive::Text(
        TextBlock::label("LESSON", style.body_font(), 11.0, style.background_color)
            .at(PAD + 38.0, 136.0)
            .anchored(Anchor::Middle)
            .bold()
            .letter_spacing(1.5),
    ));

    let title = title_block(data, style, TEXT_W);
    let y = centered_baseline(&title, 252.0).max(190.0);
    prims.push(Primitive::Text(title.at(PAD, y).bold()));

    // Double underline rule below the title zone.
    for (dy, width) in [(0.0, 1.5), (5.0, 0.75)] {
        prims.push(Primitive::Line {
            x1: PAD,
            y1: 356.0 + dy,
            x2: W - PAD,
            y2: 356.0 + dy,
            color: style.primary_color,
            width,
            opacity: 0.9,
        });
    }

    if let Some(tags) = hash_tags(data, style, 12.0, style.primary_color) {
        prims.push(Primitive::Text(tags.at(PAD, H - 72.0).opacity(0.8)));
    }
    prims
}

fn educational_content(data: &PostData, style: &VisualStyle, n: usize) -> Vec<Primitive> {
    let progress = format!("{} / {}", padded(n), padded(data.pages.len()));
    let mut prims = vec![Primitive::Text(
        TextBlock::label(&progress, style.body_font(), 12.0, style.primary_color)
            .at(PAD, 84.0)
            .bold()
            .letter_spacing(1.0),
    )];
    prims.push(Primitive::Line {
        x1: PAD,
        y1: 100.0,
        x2: W - PAD,
        y2: 100.0,
        color: style.primary_color,
        width: 1.0,
        opacity: 0.2,
    });
    prims.push(Primitive::Text(
        page_block(data, style, n, TEXT_W).at(PAD, 138.0),
    ));
    prims
}
