//! Pluggable content assistance: partial patches over document and style.
//!
//! An assistant backend (LLM, heuristic, fixture) produces *patches*, never
//! whole replacement state: only the fields a patch names change, everything
//! else is preserved. Style patches deliberately cannot touch the background
//! image settings.

use crate::error::Result;
use crate::media::ImageRef;
use crate::post::PostData;
use crate::style::{Alignment, Color, ListStyle, VisualStyle};
use serde::{Deserialize, Serialize};

/// A partial document update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentPatch {
    pub title: Option<String>,
    pub pages: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

/// A partial style update extracted from a reference image or prompt.
///
/// Covers palette and layout flavor only; background-image fields are not
/// representable here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StylePatch {
    pub primary_color: Option<Color>,
    pub background_color: Option<Color>,
    pub text_color: Option<Color>,
    pub accent_color: Option<Color>,
    pub layout: Option<Alignment>,
    pub list_style: Option<ListStyle>,
}

/// A text/style generation backend.
///
/// Implementations perform network or model calls; failures surface as
/// [`Error::Assistant`](crate::Error::Assistant) and leave the caller's
/// document and style untouched.
pub trait ContentAssistant {
    /// Drafts a complete post (title, pages, tags) from a topic prompt.
    fn generate_from_topic(
        &self,
        topic: &str,
    ) -> impl Future<Output = Result<ContentPatch>> + Send;

    /// Reflows free-form text into paginated card content.
    fn format_free_text(&self, text: &str) -> impl Future<Output = Result<ContentPatch>> + Send;

    /// Extracts a color/layout scheme from a reference image.
    fn extract_style_from_image(
        &self,
        image: &ImageRef,
    ) -> impl Future<Output = Result<StylePatch>> + Send;
}

impl PostData {
    /// Applies a content patch, replacing only the fields it names.
    ///
    /// An empty `pages` replacement is ignored so the document keeps at
    /// least one page.
    pub fn apply_patch(&mut self, patch: ContentPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(pages) = patch.pages
            && !pages.is_empty()
        {
            self.pages = pages;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
    }
}

impl VisualStyle {
    /// Applies a style patch, replacing only the fields it names.
    pub fn apply_style_patch(&mut self, patch: StylePatch) {
        if let Some(c) = patch.primary_color {
            self.primary_color = c;
        }
        if let Some(c) = patch.background_color {
            self.background_color = c;
        }
        if let Some(c) = patch.text_color {
            self.text_color = c;
        }
        if let Some(c) = patch.accent_color {
            self.accent_color = c;
        }
        if let Some(layout) = patch.layout {
            self.layout = layout;
        }
        if let Some(list_style) = patch.list_style {
            self.list_style = list_style;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::error::Error;
    use crate::style::Theme;

    struct FixtureAssistant;

    impl ContentAssistant for FixtureAssistant {
        async fn generate_from_topic(&self, topic: &str) -> Result<ContentPatch> {
            Ok(ContentPatch {
                title: Some(format!("All about {topic}")),
                pages: Some(vec!["page one".to_string(), "page two".to_string()]),
                tags: Some(vec![topic.to_string()]),
            })
        }

        async fn format_free_text(&self, text: &str) -> Result<ContentPatch> {
            Ok(ContentPatch {
                pages: Some(text.split("\n\n").map(str::to_string).collect()),
                ..ContentPatch::default()
            })
        }

        async fn extract_style_from_image(&self, _image: &ImageRef) -> Result<StylePatch> {
            Err(Error::Assistant("no vision model configured".to_string()))
        }
    }

    #[tokio::test]
    async fn generated_patch_replaces_named_fields_only() {
        let mut data = PostData {
            author_name: "Keeper".to_string(),
            date: "2025/06/01".to_string(),
            ..PostData::default()
        };

        let patch = FixtureAssistant.generate_from_topic("tea").await.unwrap();
        data.apply_patch(patch);

        assert_eq!(data.title, "All about tea");
        assert_eq!(data.pages.len(), 2);
        // Untouched by the patch
        assert_eq!(data.author_name, "Keeper");
        assert_eq!(data.date, "2025/06/01");
    }

    #[tokio::test]
    async fn failed_call_leaves_state_unchanged() {
        let mut style = catalog::preset(Theme::Minimal);
        let before = style.clone();

        let image = ImageRef::from_bytes(vec![1, 2, 3]);
        let result = FixtureAssistant.extract_style_from_image(&image).await;
        assert!(result.is_err());

        if let Ok(patch) = result {
            style.apply_style_patch(patch);
        }
        assert_eq!(style, before);
    }

    #[test]
    fn empty_pages_patch_is_ignored() {
        let mut data = PostData::default();
        data.apply_patch(ContentPatch {
            pages: Some(Vec::new()),
            ..ContentPatch::default()
        });
        assert_eq!(data.pages.len(), 1);
    }

    #[test]
    fn style_patch_cannot_reach_background_trio() {
        let mut style = catalog::preset(Theme::Bold);
        style.background_mask_opacity = Some(0.5);

        let json = r##"{"primaryColor":"#123456","layout":"center"}"##;
        let patch: StylePatch = serde_json::from_str(json).unwrap();
        style.apply_style_patch(patch);

        assert_eq!(style.primary_color.to_hex(), "#123456");
        assert_eq!(style.layout, Alignment::Center);
        assert_eq!(style.background_mask_opacity, Some(0.5));
    }

    #[test]
    fn patch_serde_ignores_missing_fields() {
        let patch: ContentPatch = serde_json::from_str(r#"{"title":"New"}"#).unwrap();
        assert_eq!(patch.title.as_deref(), Some("New"));
        assert!(patch.pages.is_none());
        assert!(patch.tags.is_none());
    }
}
