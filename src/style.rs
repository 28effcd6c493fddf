//! Visual style model: themes, colors, fonts, and per-card background rules.
//!
//! A [`VisualStyle`] is the long-lived style record the editing surface
//! mutates. It serializes to camelCase JSON so state round-trips with the
//! frontend unchanged.

use crate::card::CardRole;
use crate::media::ImageRef;
use palette::Srgb;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Effective mask opacity when none is stored.
pub const DEFAULT_MASK_OPACITY: f32 = 0.2;

// ============================================================================
// Color
// ============================================================================

/// An sRGB color value, parsed from and serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(Srgb<u8>);

impl Color {
    /// Creates a color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Srgb::new(r, g, b))
    }

    /// Parses a hex color (`#rgb`, `#rrggbb`, with or without `#`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        hex.parse::<Srgb<u8>>().ok().map(Self)
    }

    /// Renders the color as `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0.red, self.0.green, self.0.blue)
    }

    pub fn channels(&self) -> (u8, u8, u8) {
        (self.0.red, self.0.green, self.0.blue)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Color::from_hex(&hex)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color: {hex}")))
    }
}

// ============================================================================
// FontStack
// ============================================================================

/// An explicit, ordered font-fallback chain attached to every text style.
///
/// The chain is always `[specific-font, generic-family]` so an unavailable
/// font degrades to the generic family instead of failing. When the primary
/// token already names a generic family (`mono`, `sans`, `serif`, `cursive`)
/// the chain collapses to just that family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontStack {
    pub primary: String,
    pub fallback: &'static str,
}

impl FontStack {
    pub fn new(primary: impl Into<String>) -> Self {
        let primary = primary.into();
        let fallback = match primary.as_str() {
            "mono" => "monospace",
            "serif" => "serif",
            "sans" => "sans-serif",
            "cursive" => "cursive",
            _ => "sans-serif",
        };
        Self { primary, fallback }
    }

    /// Returns the ordered family list.
    pub fn families(&self) -> Vec<&str> {
        if self.is_generic_token() {
            vec![self.fallback]
        } else {
            vec![self.primary.as_str(), self.fallback]
        }
    }

    /// Renders the chain as a comma-separated `font-family` value.
    pub fn css(&self) -> String {
        self.families().join(", ")
    }

    fn is_generic_token(&self) -> bool {
        matches!(self.primary.as_str(), "mono" | "serif" | "sans" | "cursive")
    }
}

// ============================================================================
// Theme & style enums
// ============================================================================

/// The closed catalog of presentation strategies.
///
/// Deserialization is total: an unknown or corrupted name resolves to the
/// fallback variant ([`Theme::FALLBACK`]) instead of erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Theme {
    Minimal,
    Bold,
    Memo,
    Journal,
    Educational,
    Shockwave,
    Diffused,
    Sticker,
    Cinematic,
    Tech,
    Geek,
    Simplicity,
}

impl Theme {
    /// Every variant, in catalog order.
    pub const ALL: [Theme; 12] = [
        Theme::Minimal,
        Theme::Bold,
        Theme::Memo,
        Theme::Journal,
        Theme::Educational,
        Theme::Shockwave,
        Theme::Diffused,
        Theme::Sticker,
        Theme::Cinematic,
        Theme::Tech,
        Theme::Geek,
        Theme::Simplicity,
    ];

    /// The designated fallback variant for unrecognized theme values.
    pub const FALLBACK: Theme = Theme::Journal;

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Minimal => "minimal",
            Theme::Bold => "bold",
            Theme::Memo => "memo",
            Theme::Journal => "journal",
            Theme::Educational => "educational",
            Theme::Shockwave => "shockwave",
            Theme::Diffused => "diffused",
            Theme::Sticker => "sticker",
            Theme::Cinematic => "cinematic",
            Theme::Tech => "tech",
            Theme::Geek => "geek",
            Theme::Simplicity => "simplicity",
        }
    }

    /// Resolves a theme by name, falling back for unknown values.
    pub fn from_name(name: &str) -> Theme {
        Theme::ALL
            .into_iter()
            .find(|t| t.name() == name)
            .unwrap_or(Theme::FALLBACK)
    }
}

impl From<String> for Theme {
    fn from(name: String) -> Self {
        Theme::from_name(&name)
    }
}

/// Content alignment for themes that honor it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
}

/// Extra decoration flavor, consulted only by themes that use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decoration {
    None,
    Shadow,
    Glass,
    Grid,
}

/// Page-marker flavor for themes that draw a generic marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Dot,
    Number,
    Emoji,
}

/// Which cards a custom background image is composited onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplyMode {
    #[default]
    All,
    Cover,
    Content,
}

impl ApplyMode {
    /// Whether the background image is visible on a card with this role.
    pub fn applies_to(&self, role: CardRole) -> bool {
        match self {
            ApplyMode::All => true,
            ApplyMode::Cover => role == CardRole::Cover,
            ApplyMode::Content => role == CardRole::Content,
        }
    }
}

// ============================================================================
// VisualStyle
// ============================================================================

/// The complete visual configuration for a card deck.
///
/// The background trio (`background_image`, `background_apply_mode`,
/// `background_mask_opacity`) is stored even while no image is set so the
/// values survive preset switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualStyle {
    pub theme: Theme,
    pub primary_color: Color,
    pub background_color: Color,
    pub text_color: Color,
    pub accent_color: Color,

    /// Generic fallback font token.
    pub font_family: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_font_family: Option<String>,

    pub layout: Alignment,
    pub decoration: Decoration,
    pub list_style: ListStyle,

    /// Title size in logical pixels.
    pub title_font_size: f32,
    /// Body size in logical pixels.
    pub body_font_size: f32,
    /// Line-height multiplier.
    pub line_height: f32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<ImageRef>,
    #[serde(default)]
    pub background_apply_mode: ApplyMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_mask_opacity: Option<f32>,
}

impl VisualStyle {
    /// Font chain for title surfaces: title override, else the generic family.
    pub fn title_font(&self) -> FontStack {
        FontStack::new(
            self.title_font_family
                .as_deref()
                .unwrap_or(&self.font_family),
        )
    }

    /// Font chain for body surfaces: body override, else the generic family.
    pub fn body_font(&self) -> FontStack {
        FontStack::new(self.body_font_family.as_deref().unwrap_or(&self.font_family))
    }

    /// Mask opacity with the 0.2 default applied, clamped to the legal range.
    pub fn effective_mask_opacity(&self) -> f32 {
        self.background_mask_opacity
            .unwrap_or(DEFAULT_MASK_OPACITY)
            .clamp(0.0, 0.9)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn color_hex_roundtrip() {
        let c = Color::from_hex("#fbbf24").unwrap();
        assert_eq!(c.to_hex(), "#fbbf24");
        assert_eq!(c.channels(), (0xfb, 0xbf, 0x24));
        assert!(Color::from_hex("not-a-color").is_none());
    }

    #[test]
    fn font_stack_pairs_specific_with_generic() {
        let stack = FontStack::new("Noto Serif SC");
        assert_eq!(stack.families(), vec!["Noto Serif SC", "sans-serif"]);
        assert_eq!(stack.css(), "Noto Serif SC, sans-serif");
    }

    #[test]
    fn font_stack_collapses_generic_tokens() {
        assert_eq!(FontStack::new("mono").families(), vec!["monospace"]);
        assert_eq!(FontStack::new("serif").families(), vec!["serif"]);
    }

    #[test]
    fn effective_font_prefers_surface_override() {
        let mut style = catalog::preset(Theme::Minimal);
        style.font_family = "sans".to_string();
        style.title_font_family = Some("Ma Shan Zheng".to_string());
        style.body_font_family = None;

        assert_eq!(style.title_font().primary, "Ma Shan Zheng");
        assert_eq!(style.body_font().families(), vec!["sans-serif"]);
    }

    #[test]
    fn unknown_theme_falls_back() {
        assert_eq!(Theme::from_name("holographic"), Theme::FALLBACK);
        assert_eq!(Theme::from_name("tech"), Theme::Tech);

        let theme: Theme = serde_json::from_str("\"corrupted-value\"").unwrap();
        assert_eq!(theme, Theme::FALLBACK);
    }

    #[test]
    fn mask_opacity_defaults_and_clamps() {
        let mut style = catalog::preset(Theme::Minimal);
        assert_eq!(style.effective_mask_opacity(), DEFAULT_MASK_OPACITY);

        style.background_mask_opacity = Some(2.0);
        assert_eq!(style.effective_mask_opacity(), 0.9);
    }

    #[test]
    fn apply_mode_gates_roles() {
        assert!(ApplyMode::All.applies_to(CardRole::Cover));
        assert!(ApplyMode::All.applies_to(CardRole::Content));
        assert!(ApplyMode::Cover.applies_to(CardRole::Cover));
        assert!(!ApplyMode::Cover.applies_to(CardRole::Content));
        assert!(!ApplyMode::Content.applies_to(CardRole::Cover));
        assert!(ApplyMode::Content.applies_to(CardRole::Content));
    }

    #[test]
    fn style_serde_camel_case() {
        let style = catalog::preset(Theme::Bold);
        let json = serde_json::to_string(&style).unwrap();
        assert!(json.contains("\"primaryColor\""));
        assert!(json.contains("\"titleFontSize\""));
        assert!(json.contains("\"backgroundApplyMode\":\"all\""));

        let restored: VisualStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, style);
    }
}
