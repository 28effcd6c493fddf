//! High-energy themes: shockwave, diffused, sticker.

use super::{
    H, Strategy, W, centered_baseline, hash_tags, page_block, page_marker, padded, title_block,
};
use crate::card::{Anchor, Paint, Primitive, Stroke, TextBlock};
use crate::post::PostData;
use crate::style::VisualStyle;

const PAD: f32 = 32.0;
const TEXT_W: f32 = W - 2.0 * PAD;

pub(super) static SHOCKWAVE: Strategy = Strategy {
    background: shockwave_background,
    cover: shockwave_cover,
    content: shockwave_content,
};

pub(super) static DIFFUSED: Strategy = Strategy {
    background: diffused_background,
    cover: diffused_cover,
    content: diffused_content,
};

pub(super) static STICKER: Strategy = Strategy {
    background: sticker_background,
    cover: sticker_cover,
    content: sticker_content,
};

// ============================================================================
// Shockwave (full-bleed gradient with glowing blobs)
// ============================================================================

fn shockwave_background(style: &VisualStyle) -> Vec<Primitive> {
    vec![
        Primitive::Rect {
            x: 0.0,
            y: 0.0,
            width: W,
            height: H,
            fill: Some(Paint::LinearGradient {
                from: style.primary_color,
                to: style.accent_color,
                vertical: true,
            }),
            stroke: None,
            radius: 0.0,
            opacity: 1.0,
        },
        Primitive::Circle {
            cx: 60.0,
            cy: 90.0,
            radius: 80.0,
            color: super::WHITE,
            opacity: 0.18,
            blur: 40.0,
        },
        Primitive::Circle {
            cx: W - 50.0,
            cy: H - 120.0,
            radius: 100.0,
            color: super::WHITE,
            opacity: 0.14,
            blur: 50.0,
        },
    ]
}

fn shockwave_cover(data: &PostData, style: &VisualStyle) -> Vec<Primitive> {
    let mut title = title_block(data, style, TEXT_W);
    title.color = style.text_color;
    let y = centered_baseline(&title, 240.0).max(150.0);

    let mut prims = vec![Primitive::Text(
        title.at(W / 2.0, y).anchored(Anchor::Middle).bold(),
    )];

    // Frosted tag pill under the title.
    if let Some(tags) = hash_tags(data, style, 13.0, style.text_color) {
        prims.push(Primitive::Rect {
            x: W / 2.0 - 100.0,
            y: H - 96.0,
            width: 200.0,
            height: 30.0,
            fill: Some(Paint::Solid(super::WHITE)),
            stroke: None,
            radius: 15.0,
            opacity: 0.2,
        });
        prims.push(Primitive::Text(
            tags.at(W / 2.0, H - 76.0).anchored(Anchor::Middle).bold(),
        ));
    }
    prims
}

fn shockwave_content(data: &PostData, style: &VisualStyle, n: usize) -> Vec<Primitive> {
    let mut prims = vec![Primitive::Text(
        TextBlock::label(&padded(n), style.title_font(), 60.0, style.text_color)
            .at(PAD, 110.0)
            .bold()
            .opacity(0.25),
    )];
    let mut body = page_block(data, style, n, TEXT_W);
    body.color = style.text_color;
    prims.push(Primitive::Text(body.at(PAD, 160.0).bold()));
    prims
}

// ============================================================================
// Diffused (soft blobs behind a frosted glass panel)
// ============================================================================

fn diffused_background(style: &VisualStyle) -> Vec<Primitive> {
    vec![
        Primitive::Circle {
            cx: 70.0,
            cy: 120.0,
            radius: 110.0,
            color: style.primary_color,
            opacity: 0.45,
            blur: 60.0,
        },
        Primitive::Circle {
            cx: W - 60.0,
            cy: H - 140.0,
            radius: 130.0,
            color: style.accent_color,
            opacity: 0.4,
            blur: 70.0,
        },
        // Frosted panel the content sits on.
        Primitive::Rect {
            x: 20.0,
            y: 56.0,
            width: W - 40.0,
            height: H - 140.0,
            fill: Some(Paint::Solid(super::WHITE)),
            stroke: Some(Stroke {
                color: super::WHITE,
                width: 1.0,
            }),
            radius: 24.0,
            opacity: 0.55,
        },
    ]
}

fn diffused_cover(data: &PostData, style: &VisualStyle) -> Vec<Primitive> {
    let title = title_block(data, style, TEXT_W - 40.0);
    let y = centered_baseline(&title, 236.0).max(150.0);

    let mut prims = vec![Primitive::Text(
        title.at(W / 2.0, y).anchored(Anchor::Middle).bold(),
    )];
    if let Some(tags) = hash_tags(data, style, 12.0, style.primary_color) {
        prims.push(Primitive::Text(
            tags.at(W / 2.0, H - 110.0).anchored(Anchor::Middle).opacity(0.8),
        ));
    }
    prims
}

fn diffused_content(data: &PostData, style: &VisualStyle, n: usize) -> Vec<Primitive> {
    let mut prims = vec![Primitive::Text(
        TextBlock::label(
            &page_marker(style, n),
            style.body_font(),
            14.0,
            style.primary_color,
        )
        .at(44.0, 100.0)
        .bold(),
    )];
    prims.push(Primitive::Text(
        page_block(data, style, n, TEXT_W - 48.0).at(44.0, 144.0),
    ));
    prims
}

// ============================================================================
// Sticker (dot paper, offset-shadow title, outlined pills)
// ============================================================================

fn sticker_background(style: &VisualStyle) -> Vec<Primitive> {
    vec![Primitive::DotGrid {
        spacing: 16.0,
        dot_radius: 2.0,
        color: style.primary_color,
        opacity: 0.1,
    }]
}

fn sticker_cover(data: &PostData, style: &VisualStyle) -> Vec<Primitive> {
    let title = title_block(data, style, TEXT_W);
    let y = centered_baseline(&title, 240.0).max(150.0);

    // Hard offset shadow behind the title gives the die-cut sticker look.
    let mut shadow = title.clone();
    shadow.color = style.accent_color;
    let mut prims = vec![
        Primitive::Text(
            shadow
                .at(W / 2.0 + 3.0, y + 3.0)
                .anchored(Anchor::Middle)
                .bold(),
        ),
        Primitive::Text(title.at(W / 2.0, y).anchored(Anchor::Middle).bold()),
    ];

    if let Some(tags) = hash_tags(data, style, 13.0, style.primary_color) {
        prims.push(Primitive::Rect {
            x: W / 2.0 - 90.0,
            y: H - 96.0,
            width: 180.0,
            height: 30.0,
            fill: None,
            stroke: Some(Stroke {
                color: style.primary_color,
                width: 2.0,
            }),
            radius: 15.0,
            opacity: 1.0,
        });
        prims.push(Primitive::Text(
            tags.at(W / 2.0, H - 76.0).anchored(Anchor::Middle).bold(),
        ));
    }
    prims
}

fn sticker_content(data: &PostData, style: &VisualStyle, n: usize) -> Vec<Primitive> {
    let mut prims = vec![
        Primitive::Circle {
            cx: PAD + 14.0,
            cy: 88.0,
            radius: 16.0,
            color: style.accent_color,
            opacity: 0.9,
            blur: 0.0,
        },
        Primitive::Text(
            TextBlock::label(
                &page_marker(style, n),
                style.body_font(),
                13.0,
                super::WHITE,
            )
            .at(PAD + 14.0, 93.0)
            .anchored(Anchor::Middle)
            .bold(),
        ),
    ];
    prims.push(Primitive::Text(
        page_block(data, style, n, TEXT_W).at(PAD, 136.0),
    ));
    prims
}
