//! Style preset catalog and resolver.
//!
//! The catalog is an immutable, process-wide table: one complete
//! [`VisualStyle`] per theme. [`resolve`] merges a preset with partial
//! overrides; [`switch_preset`] swaps presets while preserving the
//! background trio, which belongs to the user rather than the preset.

use crate::media::ImageRef;
use crate::style::{
    Alignment, ApplyMode, Color, Decoration, ListStyle, Theme, VisualStyle,
};
use serde::{Deserialize, Serialize};

/// Returns the bundled default style for a theme.
pub fn preset(theme: Theme) -> VisualStyle {
    match theme {
        Theme::Minimal => style(
            theme,
            Color::rgb(0x00, 0x00, 0x00),
            Color::rgb(0xff, 0xff, 0xff),
            Color::rgb(0x33, 0x33, 0x33),
            Color::rgb(0xe5, 0xe5, 0xe5),
            "Noto Sans SC",
            Some("Noto Sans SC"),
            Some("Noto Sans SC"),
            Alignment::Center,
            Decoration::None,
            ListStyle::Dot,
            64.0,
            24.0,
            1.6,
        ),
        Theme::Bold => style(
            theme,
            Color::rgb(0xff, 0x00, 0x00),
            Color::rgb(0xfb, 0xbf, 0x24),
            Color::rgb(0x00, 0x00, 0x00),
            Color::rgb(0x00, 0x00, 0x00),
            "ZCOOL QingKe HuangYou",
            Some("ZCOOL QingKe HuangYou"),
            Some("Noto Sans SC"),
            Alignment::Left,
            Decoration::Shadow,
            ListStyle::Number,
            80.0,
            28.0,
            1.4,
        ),
        Theme::Memo => style(
            theme,
            Color::rgb(0x4b, 0x55, 0x63),
            Color::rgb(0xfe, 0xf3, 0xc7),
            Color::rgb(0x37, 0x41, 0x51),
            Color::rgb(0xd9, 0x77, 0x06),
            "mono",
            Some("mono"),
            Some("mono"),
            Alignment::Left,
            Decoration::None,
            ListStyle::Dot,
            56.0,
            22.0,
            1.8,
        ),
        Theme::Journal => style(
            theme,
            Color::rgb(0xbe, 0x18, 0x5d),
            Color::rgb(0xff, 0xf1, 0xf2),
            Color::rgb(0x88, 0x13, 0x37),
            Color::rgb(0xfb, 0xcf, 0xe8),
            "Ma Shan Zheng",
            Some("Ma Shan Zheng"),
            Some("Long Cang"),
            Alignment::Center,
            Decoration::Grid,
            ListStyle::Emoji,
            64.0,
            24.0,
            1.8,
        ),
        Theme::Educational => style(
            theme,
            Color::rgb(0x1e, 0x40, 0xaf),
            Color::rgb(0xef, 0xf6, 0xff),
            Color::rgb(0x1e, 0x3a, 0x8a),
            Color::rgb(0x3b, 0x82, 0xf6),
            "Noto Sans SC",
            Some("Noto Sans SC"),
            Some("Noto Sans SC"),
            Alignment::Left,
            Decoration::Glass,
            ListStyle::Number,
            56.0,
            24.0,
            1.6,
        ),
        Theme::Shockwave => style(
            theme,
            Color::rgb(0xfa, 0xcc, 0x15),
            Color::rgb(0x4c, 0x1d, 0x95),
            Color::rgb(0xff, 0xff, 0xff),
            Color::rgb(0xdb, 0x27, 0x77),
            "ZCOOL QingKe HuangYou",
            Some("ZCOOL QingKe HuangYou"),
            Some("Noto Sans SC"),
            Alignment::Center,
            Decoration::None,
            ListStyle::Number,
            72.0,
            26.0,
            1.4,
        ),
        Theme::Diffused => style(
            theme,
            Color::rgb(0x5b, 0x21, 0xb6),
            Color::rgb(0xf3, 0xe8, 0xff),
            Color::rgb(0x4c, 0x1d, 0x95),
            Color::rgb(0xc0, 0x84, 0xfc),
            "Noto Sans SC",
            Some("Noto Sans SC"),
            Some("Noto Sans SC"),
            Alignment::Left,
            Decoration::Glass,
            ListStyle::Dot,
            64.0,
            24.0,
            1.8,
        ),
        Theme::Sticker => style(
            theme,
            Color::rgb(0x00, 0x00, 0x00),
            Color::rgb(0xdb, 0xea, 0xfe),
            Color::rgb(0x00, 0x00, 0x00),
            Color::rgb(0xff, 0xff, 0xff),
            "ZCOOL KuaiLe",
            Some("ZCOOL KuaiLe"),
            Some("ZCOOL KuaiLe"),
            Alignment::Left,
            Decoration::Shadow,
            ListStyle::Emoji,
            60.0,
            26.0,
            1.5,
        ),
        Theme::Cinematic => style(
            theme,
            Color::rgb(0xff, 0xff, 0xff),
            Color::rgb(0x0f, 0x0f, 0x0f),
            Color::rgb(0xd4, 0xd4, 0xd4),
            Color::rgb(0x40, 0x40, 0x40),
            "Noto Serif SC",
            Some("Noto Serif SC"),
            Some("Noto Serif SC"),
            Alignment::Center,
            Decoration::None,
            ListStyle::Dot,
            56.0,
            24.0,
            2.0,
        ),
        Theme::Tech => style(
            theme,
            Color::rgb(0x06, 0xb6, 0xd4),
            Color::rgb(0x0f, 0x17, 0x2a),
            Color::rgb(0xe2, 0xe8, 0xf0),
            Color::rgb(0x3b, 0x82, 0xf6),
            "mono",
            Some("mono"),
            Some("mono"),
            Alignment::Left,
            Decoration::Grid,
            ListStyle::Number,
            56.0,
            20.0,
            1.6,
        ),
        Theme::Geek => style(
            theme,
            Color::rgb(0x22, 0xc5, 0x5e),
            Color::rgb(0x00, 0x00, 0x00),
            Color::rgb(0x4a, 0xde, 0x80),
            Color::rgb(0x14, 0x53, 0x2d),
            "mono",
            Some("mono"),
            Some("mono"),
            Alignment::Left,
            Decoration::None,
            ListStyle::Dot,
            48.0,
            20.0,
            1.5,
        ),
        Theme::Simplicity => style(
            theme,
            Color::rgb(0x27, 0x27, 0x2a),
            Color::rgb(0xfa, 0xfa, 0xfa),
            Color::rgb(0x52, 0x52, 0x5b),
            Color::rgb(0xe4, 0xe4, 0xe7),
            "Noto Sans SC",
            Some("Noto Sans SC"),
            Some("Noto Sans SC"),
            Alignment::Left,
            Decoration::None,
            ListStyle::Dot,
            60.0,
            22.0,
            2.0,
        ),
    }
}

/// The style a fresh session starts from.
pub fn default_style() -> VisualStyle {
    preset(Theme::Minimal)
}

#[allow(clippy::too_many_arguments)]
fn style(
    theme: Theme,
    primary_color: Color,
    background_color: Color,
    text_color: Color,
    accent_color: Color,
    font_family: &str,
    title_font_family: Option<&str>,
    body_font_family: Option<&str>,
    layout: Alignment,
    decoration: Decoration,
    list_style: ListStyle,
    title_font_size: f32,
    body_font_size: f32,
    line_height: f32,
) -> VisualStyle {
    VisualStyle {
        theme,
        primary_color,
        background_color,
        text_color,
        accent_color,
        font_family: font_family.to_string(),
        title_font_family: title_font_family.map(str::to_string),
        body_font_family: body_font_family.map(str::to_string),
        layout,
        decoration,
        list_style,
        title_font_size,
        body_font_size,
        line_height,
        background_image: None,
        background_apply_mode: ApplyMode::default(),
        background_mask_opacity: None,
    }
}

// ============================================================================
// Preset switching & override resolution
// ============================================================================

/// Switches to a new preset while preserving the user's background trio.
///
/// Every other field takes the new preset's value.
pub fn switch_preset(current: &VisualStyle, theme: Theme) -> VisualStyle {
    let mut next = preset(theme);
    next.background_image = current.background_image.clone();
    next.background_apply_mode = current.background_apply_mode;
    next.background_mask_opacity = current.background_mask_opacity;
    next
}

/// Partial style overrides. `None` leaves the preset's field untouched;
/// `Some` replaces the field entirely (no deep merge).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleOverrides {
    pub theme: Option<Theme>,
    pub primary_color: Option<Color>,
    pub background_color: Option<Color>,
    pub text_color: Option<Color>,
    pub accent_color: Option<Color>,
    pub font_family: Option<String>,
    pub title_font_family: Option<String>,
    pub body_font_family: Option<String>,
    pub layout: Option<Alignment>,
    pub decoration: Option<Decoration>,
    pub list_style: Option<ListStyle>,
    pub title_font_size: Option<f32>,
    pub body_font_size: Option<f32>,
    pub line_height: Option<f32>,
    pub background_image: Option<Option<ImageRef>>,
    pub background_apply_mode: Option<ApplyMode>,
    pub background_mask_opacity: Option<Option<f32>>,
}

/// Resolves a preset plus overrides into one effective style.
///
/// Total over any well-formed input; there are no error conditions. The
/// double-`Option` background fields distinguish "leave alone" (`None`)
/// from an explicit clear (`Some(None)`).
pub fn resolve(preset: &VisualStyle, overrides: &StyleOverrides) -> VisualStyle {
    let mut out = preset.clone();
    if let Some(v) = overrides.theme {
        out.theme = v;
    }
    if let Some(v) = overrides.primary_color {
        out.primary_color = v;
    }
    if let Some(v) = overrides.background_color {
        out.background_color = v;
    }
    if let Some(v) = overrides.text_color {
        out.text_color = v;
    }
    if let Some(v) = overrides.accent_color {
        out.accent_color = v;
    }
    if let Some(v) = &overrides.font_family {
        out.font_family = v.clone();
    }
    if let Some(v) = &overrides.title_font_family {
        out.title_font_family = Some(v.clone());
    }
    if let Some(v) = &overrides.body_font_family {
        out.body_font_family = Some(v.clone());
    }
    if let Some(v) = overrides.layout {
        out.layout = v;
    }
    if let Some(v) = overrides.decoration {
        out.decoration = v;
    }
    if let Some(v) = overrides.list_style {
        out.list_style = v;
    }
    if let Some(v) = overrides.title_font_size {
        out.title_font_size = v;
    }
    if let Some(v) = overrides.body_font_size {
        out.body_font_size = v;
    }
    if let Some(v) = overrides.line_height {
        out.line_height = v;
    }
    if let Some(v) = &overrides.background_image {
        out.background_image = v.clone();
    }
    if let Some(v) = overrides.background_apply_mode {
        out.background_apply_mode = v;
    }
    if let Some(v) = overrides.background_mask_opacity {
        out.background_mask_opacity = v;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_image() -> ImageRef {
        ImageRef::with_mime(vec![1, 2, 3], "image/png")
    }

    #[test]
    fn every_theme_has_a_preset() {
        for theme in Theme::ALL {
            let style = preset(theme);
            assert_eq!(style.theme, theme);
            assert!(style.title_font_size > 0.0);
            assert!(style.line_height >= 1.0);
        }
    }

    #[test]
    fn switch_preserves_background_trio() {
        let mut current = preset(Theme::Minimal);
        current.background_image = Some(fake_image());
        current.background_apply_mode = ApplyMode::Cover;
        current.background_mask_opacity = Some(0.55);

        let next = switch_preset(&current, Theme::Tech);
        assert_eq!(next.theme, Theme::Tech);
        assert_eq!(next.primary_color, preset(Theme::Tech).primary_color);
        assert_eq!(next.font_family, "mono");

        assert_eq!(next.background_image, Some(fake_image()));
        assert_eq!(next.background_apply_mode, ApplyMode::Cover);
        assert_eq!(next.background_mask_opacity, Some(0.55));
    }

    #[test]
    fn trio_survives_even_without_an_image() {
        // The apply mode and opacity must persist in storage while no image
        // is set, so they are still there after the user re-uploads one.
        let mut current = preset(Theme::Journal);
        current.background_apply_mode = ApplyMode::Content;
        current.background_mask_opacity = Some(0.4);

        let next = switch_preset(&current, Theme::Bold);
        assert_eq!(next.background_image, None);
        assert_eq!(next.background_apply_mode, ApplyMode::Content);
        assert_eq!(next.background_mask_opacity, Some(0.4));
    }

    #[test]
    fn resolve_replaces_whole_fields() {
        let base = preset(Theme::Minimal);
        let overrides = StyleOverrides {
            primary_color: Color::from_hex("#123456"),
            title_font_size: Some(96.0),
            ..Default::default()
        };

        let resolved = resolve(&base, &overrides);
        assert_eq!(resolved.primary_color, Color::rgb(0x12, 0x34, 0x56));
        assert_eq!(resolved.title_font_size, 96.0);
        // Untouched fields keep the preset's values
        assert_eq!(resolved.background_color, base.background_color);
        assert_eq!(resolved.body_font_size, base.body_font_size);
    }

    #[test]
    fn resolve_can_explicitly_clear_background() {
        let mut base = preset(Theme::Minimal);
        base.background_image = Some(fake_image());

        let keep = resolve(&base, &StyleOverrides::default());
        assert!(keep.background_image.is_some());

        let cleared = resolve(
            &base,
            &StyleOverrides {
                background_image: Some(None),
                ..Default::default()
            },
        );
        assert!(cleared.background_image.is_none());
    }
}
