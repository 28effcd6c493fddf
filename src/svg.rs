//! SVG serialization and rasterization for card visuals.
//!
//! A [`CardVisual`] is serialized into a self-contained SVG document (all
//! raster images embedded as data URLs), then rasterized with resvg. The
//! document is a pure function of the card, so identical inputs always
//! produce identical markup and identical pixels.

use crate::card::{
    Anchor, CARD_HEIGHT, CARD_WIDTH, CardVisual, EXPORT_MARKER_CLASS, Paint, Primitive, TextBlock,
    VisualLayer,
};
use crate::style::Color;
use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};
use std::sync::OnceLock;

// ============================================================================
// Document serialization
// ============================================================================

/// Serializes a card into a standalone SVG document at logical card size.
pub(crate) fn document(card: &CardVisual) -> String {
    let mut doc = SvgDoc::new();
    for layer in &card.layers {
        match layer {
            VisualLayer::Backdrop(color) => doc.backdrop(*color),
            VisualLayer::BackgroundImage {
                image,
                mask_opacity,
            } => doc.background_image(&image.to_data_url(), *mask_opacity),
            VisualLayer::Decoration(prims)
            | VisualLayer::Content(prims)
            | VisualLayer::Chrome(prims) => {
                for p in prims {
                    doc.primitive(p);
                }
            }
        }
    }
    doc.finish(&card.element_id())
}

/// Incremental SVG document builder. Referenced resources (gradients, blur
/// filters, clip paths) accumulate in `defs` with generated ids.
struct SvgDoc {
    defs: String,
    body: String,
    next_id: usize,
}

impl SvgDoc {
    fn new() -> Self {
        Self {
            defs: String::new(),
            body: String::new(),
            next_id: 0,
        }
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}{}", self.next_id);
        self.next_id += 1;
        id
    }

    fn finish(self, element_id: &str) -> String {
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"{element_id}\" \
             class=\"{EXPORT_MARKER_CLASS}\" width=\"{CARD_WIDTH}\" height=\"{CARD_HEIGHT}\" \
             viewBox=\"0 0 {CARD_WIDTH} {CARD_HEIGHT}\">"
        );
        if !self.defs.is_empty() {
            out.push_str("<defs>");
            out.push_str(&self.defs);
            out.push_str("</defs>");
        }
        out.push_str(&self.body);
        out.push_str("</svg>");
        out
    }

    fn backdrop(&mut self, color: Color) {
        self.body.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            color.to_hex()
        ));
    }

    fn background_image(&mut self, data_url: &str, mask_opacity: f32) {
        self.body.push_str(&format!(
            "<image href=\"{}\" x=\"0\" y=\"0\" width=\"{CARD_WIDTH}\" height=\"{CARD_HEIGHT}\" \
             preserveAspectRatio=\"xMidYMid slice\"/>",
            escape(data_url)
        ));
        self.body.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"#000000\" opacity=\"{}\"/>",
            fmt(mask_opacity)
        ));
    }

    fn primitive(&mut self, p: &Primitive) {
        match *p {
            Primitive::Rect {
                x,
                y,
                width,
                height,
                ref fill,
                ref stroke,
                radius,
                opacity,
            } => {
                let fill_attr = match fill {
                    None => "none".to_string(),
                    Some(Paint::Solid(c)) => c.to_hex(),
                    Some(Paint::LinearGradient { from, to, vertical }) => {
                        let id = self.fresh_id("grad");
                        let (x2, y2) = if *vertical { (0, 1) } else { (1, 0) };
                        self.defs.push_str(&format!(
                            "<linearGradient id=\"{id}\" x1=\"0\" y1=\"0\" x2=\"{x2}\" y2=\"{y2}\">\
                             <stop offset=\"0\" stop-color=\"{}\"/>\
                             <stop offset=\"1\" stop-color=\"{}\"/>\
                             </linearGradient>",
                            from.to_hex(),
                            to.to_hex()
                        ));
                        format!("url(#{id})")
                    }
                };
                let stroke_attr = match stroke {
                    Some(s) => format!(
                        " stroke=\"{}\" stroke-width=\"{}\"",
                        s.color.to_hex(),
                        fmt(s.width)
                    ),
                    None => String::new(),
                };
                self.body.push_str(&format!(
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" \
                     fill=\"{fill_attr}\"{stroke_attr} opacity=\"{}\"/>",
                    fmt(x),
                    fmt(y),
                    fmt(width),
                    fmt(height),
                    fmt(radius),
                    fmt(opacity)
                ));
            }

            Primitive::Circle {
                cx,
                cy,
                radius,
                color,
                opacity,
                blur,
            } => {
                let filter_attr = if blur > 0.0 {
                    let id = self.fresh_id("blur");
                    self.defs.push_str(&format!(
                        "<filter id=\"{id}\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\">\
                         <feGaussianBlur stdDeviation=\"{}\"/></filter>",
                        fmt(blur)
                    ));
                    format!(" filter=\"url(#{id})\"")
                } else {
                    String::new()
                };
                self.body.push_str(&format!(
                    "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" opacity=\"{}\"{filter_attr}/>",
                    fmt(cx),
                    fmt(cy),
                    fmt(radius),
                    color.to_hex(),
                    fmt(opacity)
                ));
            }

            Primitive::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                width,
                opacity,
            } => {
                self.body.push_str(&format!(
                    "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" \
                     stroke-width=\"{}\" stroke-opacity=\"{}\"/>",
                    fmt(x1),
                    fmt(y1),
                    fmt(x2),
                    fmt(y2),
                    color.to_hex(),
                    fmt(width),
                    fmt(opacity)
                ));
            }

            Primitive::DotGrid {
                spacing,
                dot_radius,
                color,
                opacity,
            } => {
                self.body.push_str(&format!(
                    "<g fill=\"{}\" opacity=\"{}\">",
                    color.to_hex(),
                    fmt(opacity)
                ));
                let mut y = spacing;
                while y < CARD_HEIGHT as f32 {
                    let mut x = spacing;
                    while x < CARD_WIDTH as f32 {
                        self.body.push_str(&format!(
                            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"/>",
                            fmt(x),
                            fmt(y),
                            fmt(dot_radius)
                        ));
                        x += spacing;
                    }
                    y += spacing;
                }
                self.body.push_str("</g>");
            }

            Primitive::LineGrid {
                spacing,
                color,
                opacity,
            } => {
                self.body.push_str(&format!(
                    "<g stroke=\"{}\" stroke-width=\"1\" stroke-opacity=\"{}\">",
                    color.to_hex(),
                    fmt(opacity)
                ));
                let mut x = spacing;
                while x < CARD_WIDTH as f32 {
                    self.body.push_str(&format!(
                        "<line x1=\"{0}\" y1=\"0\" x2=\"{0}\" y2=\"{CARD_HEIGHT}\"/>",
                        fmt(x)
                    ));
                    x += spacing;
                }
                let mut y = spacing;
                while y < CARD_HEIGHT as f32 {
                    self.body.push_str(&format!(
                        "<line x1=\"0\" y1=\"{0}\" x2=\"{CARD_WIDTH}\" y2=\"{0}\"/>",
                        fmt(y)
                    ));
                    y += spacing;
                }
                self.body.push_str("</g>");
            }

            Primitive::RuledLines {
                spacing,
                color,
                opacity,
            } => {
                self.body.push_str(&format!(
                    "<g stroke=\"{}\" stroke-width=\"1\" stroke-opacity=\"{}\">",
                    color.to_hex(),
                    fmt(opacity)
                ));
                let mut y = spacing;
                while y < CARD_HEIGHT as f32 {
                    self.body.push_str(&format!(
                        "<line x1=\"0\" y1=\"{0}\" x2=\"{CARD_WIDTH}\" y2=\"{0}\"/>",
                        fmt(y)
                    ));
                    y += spacing;
                }
                self.body.push_str("</g>");
            }

            Primitive::Image {
                ref image,
                x,
                y,
                width,
                height,
                rounded,
            } => {
                let clip_attr = if rounded {
                    let id = self.fresh_id("clip");
                    self.defs.push_str(&format!(
                        "<clipPath id=\"{id}\"><circle cx=\"{}\" cy=\"{}\" r=\"{}\"/></clipPath>",
                        fmt(x + width / 2.0),
                        fmt(y + height / 2.0),
                        fmt(width.min(height) / 2.0)
                    ));
                    format!(" clip-path=\"url(#{id})\"")
                } else {
                    String::new()
                };
                self.body.push_str(&format!(
                    "<image href=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" \
                     preserveAspectRatio=\"xMidYMid slice\"{clip_attr}/>",
                    escape(&image.to_data_url()),
                    fmt(x),
                    fmt(y),
                    fmt(width),
                    fmt(height)
                ));
            }

            Primitive::Text(ref block) => self.text(block),
        }
    }

    fn text(&mut self, block: &TextBlock) {
        let anchor = match block.anchor {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        };
        let mut attrs = format!(
            "font-family=\"{}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"{anchor}\" \
             opacity=\"{}\"",
            escape(&block.font.css()),
            fmt(block.size),
            block.color.to_hex(),
            fmt(block.opacity)
        );
        if block.bold {
            attrs.push_str(" font-weight=\"bold\"");
        }
        if block.italic {
            attrs.push_str(" font-style=\"italic\"");
        }
        if block.letter_spacing != 0.0 {
            attrs.push_str(&format!(" letter-spacing=\"{}\"", fmt(block.letter_spacing)));
        }
        if block.preserve_whitespace {
            attrs.push_str(" xml:space=\"preserve\"");
        }

        self.body.push_str(&format!("<text {attrs}>"));
        // Absolute y per line keeps empty authored lines advancing.
        let advance = block.size * block.line_height;
        for (i, line) in block.lines.iter().enumerate() {
            self.body.push_str(&format!(
                "<tspan x=\"{}\" y=\"{}\">{}</tspan>",
                fmt(block.x),
                fmt(block.y + i as f32 * advance),
                escape(line)
            ));
        }
        self.body.push_str("</text>");
    }
}

/// Formats a coordinate without trailing noise (`12` not `12.0`, `0.5` as is).
fn fmt(v: f32) -> String {
    if v == v.trunc() {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// Escapes text for use in SVG content and attribute values.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

// ============================================================================
// Rasterization
// ============================================================================

/// Shared parse options with a loaded font database, built once per process.
///
/// Text elements rasterize through the fontdb, so system fonts must be
/// loaded before parsing. The generic families every font chain ends in are
/// pinned to faces that actually exist on the host, so text still renders
/// when a theme's named font is not installed.
fn parse_options() -> &'static Options<'static> {
    static OPTIONS: OnceLock<Options<'static>> = OnceLock::new();
    OPTIONS.get_or_init(|| {
        let mut opts = Options::default();
        let db = opts.fontdb_mut();
        db.load_system_fonts();

        let installed: Vec<String> = db
            .faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
            .collect();
        let pick = |candidates: &[&str]| {
            candidates
                .iter()
                .find(|c| installed.iter().any(|have| have == *c))
                .map(|c| c.to_string())
        };

        let sans = pick(&["DejaVu Sans", "Liberation Sans", "Noto Sans", "Arial"]);
        if let Some(family) = &sans {
            db.set_sans_serif_family(family.clone());
        }
        if let Some(family) = pick(&["Comic Neue", "Comic Sans MS"]).or(sans) {
            db.set_cursive_family(family);
        }
        if let Some(family) = pick(&[
            "DejaVu Serif",
            "Liberation Serif",
            "Noto Serif",
            "Times New Roman",
        ]) {
            db.set_serif_family(family);
        }
        if let Some(family) = pick(&[
            "DejaVu Sans Mono",
            "Liberation Mono",
            "Noto Sans Mono",
            "Courier New",
        ]) {
            db.set_monospace_family(family);
        }

        log::debug!("font database loaded: {} faces", db.len());
        opts
    })
}

/// Rasterizes an SVG document at a uniform scale factor.
///
/// Returns `None` if the document cannot be parsed or the target pixmap
/// cannot be allocated.
pub(crate) fn rasterize(svg_data: &str, scale: f32) -> Option<RgbaImage> {
    let tree = Tree::from_str(svg_data, parse_options()).ok()?;

    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)?;
    let transform = Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    Some(pixmap_to_rgba_image(&pixmap))
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let height = pixmap.height();
    let mut img = RgbaImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            if let Some(pixel) = pixmap.pixel(x, y) {
                // tiny_skia stores premultiplied alpha
                let (r, g, b, a) =
                    unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
                img.put_pixel(x, y, Rgba([r, g, b, a]));
            }
        }
    }

    img
}

fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardRole, Stroke};
    use crate::style::FontStack;

    fn color(hex: &str) -> Color {
        Color::from_hex(hex).unwrap()
    }

    fn card_with(layers: Vec<VisualLayer>) -> CardVisual {
        CardVisual {
            role: CardRole::Cover,
            sequence_index: 0,
            layers,
        }
    }

    #[test]
    fn document_is_parseable_svg() {
        let card = card_with(vec![
            VisualLayer::Backdrop(color("#fffbeb")),
            VisualLayer::Decoration(vec![
                Primitive::DotGrid {
                    spacing: 20.0,
                    dot_radius: 1.0,
                    color: color("#d97706"),
                    opacity: 0.1,
                },
                Primitive::Circle {
                    cx: 60.0,
                    cy: 90.0,
                    radius: 80.0,
                    color: color("#ffffff"),
                    opacity: 0.2,
                    blur: 40.0,
                },
                Primitive::Rect {
                    x: 24.0,
                    y: 96.0,
                    width: 327.0,
                    height: 300.0,
                    fill: Some(Paint::LinearGradient {
                        from: color("#7c3aed"),
                        to: color("#db2777"),
                        vertical: true,
                    }),
                    stroke: Some(Stroke {
                        color: color("#92400e"),
                        width: 1.0,
                    }),
                    radius: 8.0,
                    opacity: 1.0,
                },
            ]),
            VisualLayer::Content(vec![Primitive::Text(
                TextBlock::body(
                    "Hello <World> & \"Friends\"",
                    FontStack::new("serif"),
                    32.0,
                    color("#1c1917"),
                )
                .at(32.0, 200.0),
            )]),
        ]);

        let doc = document(&card);
        assert!(doc.starts_with("<svg"));
        assert!(doc.contains("class=\"export-card\""));
        assert!(doc.contains("id=\"card-0\""));
        assert!(doc.contains("&lt;World&gt; &amp; &quot;Friends&quot;"));
        assert!(doc.contains("<linearGradient"));
        assert!(doc.contains("feGaussianBlur"));

        assert!(Tree::from_str(&doc, &Options::default()).is_ok());
    }

    #[test]
    fn identical_cards_serialize_identically() {
        let make = || {
            card_with(vec![
                VisualLayer::Backdrop(color("#ffffff")),
                VisualLayer::Decoration(vec![Primitive::LineGrid {
                    spacing: 40.0,
                    color: color("#4ade80"),
                    opacity: 0.2,
                }]),
            ])
        };
        assert_eq!(document(&make()), document(&make()));
    }

    #[test]
    fn preserved_whitespace_marks_text_element() {
        let card = card_with(vec![VisualLayer::Content(vec![Primitive::Text(
            TextBlock::body("a  b\n\nc", FontStack::new("sans"), 16.0, color("#000000")),
        )])]);
        let doc = document(&card);
        assert!(doc.contains("xml:space=\"preserve\""));
        // Blank authored line still emits a tspan at its own y.
        assert_eq!(doc.matches("<tspan").count(), 3);
    }

    fn tiny_image() -> crate::media::ImageRef {
        let img = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        crate::media::ImageRef::from_bytes(out.into_inner())
    }

    #[test]
    fn mask_layer_follows_background_image() {
        let image = tiny_image();
        let card = card_with(vec![
            VisualLayer::Backdrop(color("#ffffff")),
            VisualLayer::BackgroundImage {
                image,
                mask_opacity: 0.35,
            },
        ]);
        let doc = document(&card);
        let image_at = doc.find("data:image/png;base64").unwrap();
        let mask_at = doc.find("fill=\"#000000\" opacity=\"0.35\"").unwrap();
        assert!(mask_at > image_at);
    }

    #[test]
    fn rasterize_scales_dimensions() {
        let card = card_with(vec![VisualLayer::Backdrop(color("#ff0000"))]);
        let img = rasterize(&document(&card), 2.0).unwrap();
        assert_eq!(img.dimensions(), (CARD_WIDTH * 2, CARD_HEIGHT * 2));
        assert_eq!(img.get_pixel(10, 10).0, [255, 0, 0, 255]);
    }

    #[test]
    fn rasterize_rejects_invalid_markup() {
        assert!(rasterize("not an svg document", 2.0).is_none());
    }

    #[test]
    fn text_reaches_the_raster() {
        let backdrop = VisualLayer::Backdrop(color("#ffffff"));
        let with_text = card_with(vec![
            backdrop.clone(),
            VisualLayer::Content(vec![Primitive::Text(
                TextBlock::body(
                    "HELLO WORLD HELLO WORLD",
                    FontStack::new("sans"),
                    40.0,
                    color("#000000"),
                )
                .at(32.0, 200.0),
            )]),
        ]);
        let blank = card_with(vec![backdrop]);

        let a = rasterize(&document(&with_text), 2.0).unwrap();
        let b = rasterize(&document(&blank), 2.0).unwrap();
        assert_ne!(a.as_raw(), b.as_raw(), "text is not being drawn");
    }

    #[test]
    fn coordinate_formatting_drops_integral_fraction() {
        assert_eq!(fmt(12.0), "12");
        assert_eq!(fmt(0.5), "0.5");
        assert_eq!(fmt(-3.0), "-3");
    }
}
