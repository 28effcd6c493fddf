//! Monochrome / terminal themes: cinematic, tech, geek, simplicity.

use super::{
    H, Strategy, W, centered_baseline, grid_if_enabled, hash_tags, padded, page_block, title_block,
};
use crate::card::{Anchor, Paint, Primitive, Stroke, TextBlock};
use crate::post::PostData;
use crate::style::VisualStyle;

const PAD: f32 = 32.0;
const TEXT_W: f32 = W - 2.0 * PAD;

pub(super) static CINEMATIC: Strategy = Strategy {
    background: cinematic_background,
    cover: cinematic_cover,
    content: cinematic_content,
};

pub(super) static TECH: Strategy = Strategy {
    background: tech_background,
    cover: tech_cover,
    content: tech_content,
};

pub(super) static GEEK: Strategy = Strategy {
    background: grid_if_enabled,
    cover: geek_cover,
    content: geek_content,
};

pub(super) static SIMPLICITY: Strategy = Strategy {
    background: simplicity_background,
    cover: simplicity_cover,
    content: simplicity_content,
};

// ============================================================================
// Cinematic (letterboxed, no chrome)
// ============================================================================

const BAR: f32 = 56.0;

fn cinematic_background(_style: &VisualStyle) -> Vec<Primitive> {
    let bar = |y: f32| Primitive::Rect {
        x: 0.0,
        y,
        width: W,
        height: BAR,
        fill: Some(Paint::Solid(super::BLACK)),
        stroke: None,
        radius: 0.0,
        opacity: 1.0,
    };
    vec![bar(0.0), bar(H - BAR)]
}

fn cinematic_cover(data: &PostData, style: &VisualStyle) -> Vec<Primitive> {
    let mut title = title_block(data, style, TEXT_W);
    title.letter_spacing = 2.0;
    let y = centered_baseline(&title, H / 2.0).max(BAR + 60.0);

    let mut prims = vec![Primitive::Line {
        x1: W / 2.0 - 30.0,
        y1: y - title.size - 18.0,
        x2: W / 2.0 + 30.0,
        y2: y - title.size - 18.0,
        color: style.accent_color,
        width: 1.0,
        opacity: 0.9,
    }];
    prims.push(Primitive::Text(
        title.at(W / 2.0, y).anchored(Anchor::Middle),
    ));

    if let Some(tags) = hash_tags(data, style, 11.0, style.text_color) {
        let mut tags = tags;
        tags.letter_spacing = 1.5;
        prims.push(Primitive::Text(
            tags.at(W / 2.0, H - BAR - 28.0)
                .anchored(Anchor::Middle)
                .opacity(0.6),
        ));
    }
    prims
}

fn cinematic_content(data: &PostData, style: &VisualStyle, n: usize) -> Vec<Primitive> {
    let scene = format!("SCENE {}", padded(n));
    let mut prims = vec![Primitive::Text(
        TextBlock::label(&scene, style.body_font(), 11.0, style.accent_color)
            .at(W / 2.0, BAR + 36.0)
            .anchored(Anchor::Middle)
            .letter_spacing(2.0),
    )];
    let body = page_block(data, style, n, TEXT_W);
    let y = centered_baseline(&body, H / 2.0).max(BAR + 70.0);
    prims.push(Primitive::Text(body.at(W / 2.0, y).anchored(Anchor::Middle)));
    prims
}

// ============================================================================
// Tech (terminal session)
// ============================================================================

fn tech_background(style: &VisualStyle) -> Vec<Primitive> {
    vec![Primitive::LineGrid {
        spacing: 40.0,
        color: style.primary_color,
        opacity: 0.08,
    }]
}

fn tech_cover(data: &PostData, style: &VisualStyle) -> Vec<Primitive> {
    let mut prims = vec![Primitive::Text(
        TextBlock::label("$ cat title.txt", style.body_font(), 12.0, style.primary_color)
            .at(PAD, 120.0)
            .opacity(0.7),
    )];

    let title = title_block(data, style, TEXT_W);
    let y = centered_baseline(&title, 246.0).max(170.0);
    let block_bottom = y + title.block_height();
    prims.push(Primitive::Text(title.at(PAD, y).bold()));

    // Block cursor after the last title line.
    prims.push(Primitive::Rect {
        x: PAD,
        y: block_bottom + 16.0,
        width: 12.0,
        height: 20.0,
        fill: Some(Paint::Solid(style.primary_color)),
        stroke: None,
        radius: 0.0,
        opacity: 0.9,
    });

    if !data.tags.is_empty() {
        let joined = data
            .tags
            .iter()
            .take(3)
            .map(|t| format!("[{t}]"))
            .collect::<Vec<_>>()
            .join(" ");
        prims.push(Primitive::Text(
            TextBlock::label(&joined, style.body_font(), 12.0, style.accent_color)
                .at(PAD, H - 72.0),
        ));
    }
    prims
}

fn tech_content(data: &PostData, style: &VisualStyle, n: usize) -> Vec<Primitive> {
    let prompt = format!("user@card:~/page-{}", padded(n));
    let mut prims = vec![Primitive::Text(
        TextBlock::label(&prompt, style.body_font(), 12.0, style.accent_color).at(PAD, 84.0),
    )];
    prims.push(Primitive::Line {
        x1: PAD,
        y1: 98.0,
        x2: W - PAD,
        y2: 98.0,
        color: style.primary_color,
        width: 1.0,
        opacity: 0.3,
    });
    prims.push(Primitive::Text(
        page_block(data, style, n, TEXT_W).at(PAD, 132.0),
    ));
    prims
}

// ============================================================================
// Geek (source listing with a line-number gutter)
// ============================================================================

fn geek_cover(data: &PostData, style: &VisualStyle) -> Vec<Primitive> {
    let mut prims = vec![Primitive::Text(
        TextBlock::label("<h1>", style.body_font(), 14.0, style.accent_color).at(PAD, 150.0),
    )];

    let title = title_block(data, style, TEXT_W - 24.0);
    let y = centered_baseline(&title, 246.0).max(190.0);
    let block_bottom = y + title.block_height();
    prims.push(Primitive::Text(title.at(PAD + 20.0, y).bold()));

    prims.push(Primitive::Text(
        TextBlock::label("</h1>", style.body_font(), 14.0, style.accent_color)
            .at(PAD, block_bottom + 34.0),
    ));

    if !data.tags.is_empty() {
        let joined = data
            .tags
            .iter()
            .take(3)
            .map(|t| format!("@{t}"))
            .collect::<Vec<_>>()
            .join(" ");
        prims.push(Primitive::Text(
            TextBlock::label(&joined, style.body_font(), 12.0, style.primary_color)
                .at(PAD, H - 72.0)
                .opacity(0.7),
        ));
    }
    prims
}

fn geek_content(data: &PostData, style: &VisualStyle, n: usize) -> Vec<Primitive> {
    let gutter_w = 26.0;
    let body = page_block(data, style, n, TEXT_W - gutter_w);

    let mut prims = Vec::new();
    // Line-number gutter mirrors the wrapped body line for line.
    for i in 0..body.lines.len() {
        let line_y = 120.0 + i as f32 * style.body_font_size * style.line_height;
        prims.push(Primitive::Text(
            TextBlock::label(&padded(i + 1), style.body_font(), 11.0, style.text_color)
                .at(PAD + 16.0, line_y)
                .anchored(Anchor::End)
                .opacity(0.3),
        ));
    }
    prims.push(Primitive::Text(body.at(PAD + gutter_w, 120.0)));
    prims
}

// ============================================================================
// Simplicity (hairline frame, serif column)
// ============================================================================

fn simplicity_background(style: &VisualStyle) -> Vec<Primitive> {
    vec![
        Primitive::Rect {
            x: 12.0,
            y: 12.0,
            width: W - 24.0,
            height: H - 24.0,
            fill: None,
            stroke: Some(Stroke {
                color: style.text_color,
                width: 1.0,
            }),
            radius: 0.0,
            opacity: 0.35,
        },
        Primitive::Line {
            x1: W / 2.0 - 16.0,
            y1: 40.0,
            x2: W / 2.0 + 16.0,
            y2: 40.0,
            color: style.accent_color,
            width: 2.0,
            opacity: 1.0,
        },
    ]
}

fn simplicity_cover(data: &PostData, style: &VisualStyle) -> Vec<Primitive> {
    let title = title_block(data, style, TEXT_W - 40.0);
    let y = centered_baseline(&title, 240.0).max(150.0);

    let mut prims = vec![Primitive::Text(
        title.at(W / 2.0, y).anchored(Anchor::Middle),
    )];

    if !data.tags.is_empty() {
        let joined = data.tags.iter().take(3).cloned().collect::<Vec<_>>().join(" \u{00b7} ");
        prims.push(Primitive::Text(
            TextBlock::label(&joined, style.body_font(), 12.0, style.text_color)
                .at(W / 2.0, H - 80.0)
                .anchored(Anchor::Middle)
                .opacity(0.6),
        ));
    }
    prims
}

fn simplicity_content(data: &PostData, style: &VisualStyle, n: usize) -> Vec<Primitive> {
    let mut prims = vec![Primitive::Text(
        TextBlock::label(&padded(n), style.body_font(), 12.0, style.accent_color)
            .at(W / 2.0, 88.0)
            .anchored(Anchor::Middle)
            .letter_spacing(1.0),
    )];
    // Narrow centered column.
    let body = page_block(data, style, n, 260.0);
    let y = centered_baseline(&body, H / 2.0).max(120.0);
    prims.push(Primitive::Text(body.at(W / 2.0, y).anchored(Anchor::Middle)));
    prims
}
