//! Binary image references attached to documents and styles.
//!
//! An [`ImageRef`] is an opaque image payload (PNG/JPEG bytes) used for
//! custom card backgrounds and author avatars. It round-trips through the
//! `data:` URL form the editing frontend hands over.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An opaque binary image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    bytes: Vec<u8>,
    mime: String,
}

impl ImageRef {
    /// Creates a reference from raw encoded image bytes.
    ///
    /// The mime type is sniffed from magic numbers; unknown payloads are
    /// treated as PNG and will fail [`decode_check`](Self::decode_check).
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let mime = sniff_mime(&bytes).to_string();
        Self { bytes, mime }
    }

    /// Creates a reference with an explicit mime type.
    pub fn with_mime(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
        }
    }

    /// Parses a `data:<mime>;base64,<payload>` URL.
    ///
    /// Returns `None` if the URL is malformed or the payload is not valid
    /// base64.
    pub fn from_data_url(url: &str) -> Option<Self> {
        let rest = url.strip_prefix("data:")?;
        let (header, payload) = rest.split_once(',')?;
        let mime = header.strip_suffix(";base64")?;
        let bytes = STANDARD.decode(payload).ok()?;
        Some(Self {
            bytes,
            mime: if mime.is_empty() {
                "image/png".to_string()
            } else {
                mime.to_string()
            },
        })
    }

    /// Renders this reference back to a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }

    /// Returns the raw encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the mime type (e.g. `image/png`).
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Verifies that the payload decodes as an image.
    ///
    /// The capture engine calls this before a card referencing the image is
    /// rasterized, so a broken resource fails loudly instead of producing a
    /// blank layer.
    pub fn decode_check(&self) -> bool {
        image::load_from_memory(&self.bytes).is_ok()
    }
}

impl Serialize for ImageRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_data_url())
    }
}

impl<'de> Deserialize<'de> for ImageRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let url = String::deserialize(deserializer)?;
        ImageRef::from_data_url(&url)
            .ok_or_else(|| serde::de::Error::custom("expected a base64 data URL"))
    }
}

/// Sniffs a mime type from well-known magic numbers.
fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else if bytes.len() > 11 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "image/png"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;

    pub(crate) fn tiny_png() -> Vec<u8> {
        let img = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn sniffs_png_mime() {
        let img = ImageRef::from_bytes(tiny_png());
        assert_eq!(img.mime(), "image/png");
        assert!(img.decode_check());
    }

    #[test]
    fn data_url_roundtrip() {
        let img = ImageRef::from_bytes(tiny_png());
        let url = img.to_data_url();
        assert!(url.starts_with("data:image/png;base64,"));

        let restored = ImageRef::from_data_url(&url).unwrap();
        assert_eq!(restored, img);
    }

    #[test]
    fn rejects_malformed_data_url() {
        assert!(ImageRef::from_data_url("data:image/png;base64").is_none());
        assert!(ImageRef::from_data_url("http://example.com/a.png").is_none());
        assert!(ImageRef::from_data_url("data:image/png;base64,!!!").is_none());
    }

    #[test]
    fn decode_check_fails_for_garbage() {
        let img = ImageRef::from_bytes(vec![1, 2, 3, 4]);
        assert!(!img.decode_check());
    }

    #[test]
    fn serde_as_data_url() {
        let img = ImageRef::from_bytes(tiny_png());
        let json = serde_json::to_string(&img).unwrap();
        assert!(json.contains("data:image/png;base64,"));

        let restored: ImageRef = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, img);
    }
}
