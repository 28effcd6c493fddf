//! Document model for a carousel post.
//!
//! [`PostData`] is the long-lived, externally edited document: a title,
//! an ordered set of text pages, tags, and author metadata. Rendering never
//! mutates it; the mutation helpers here back the editing surface.

use crate::media::ImageRef;
use serde::{Deserialize, Serialize};

/// The structured document a card deck is rendered from.
///
/// Invariant: `pages` is never empty. [`remove_page`](Self::remove_page)
/// refuses to drop the last page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    /// Cover title. Explicit line breaks are preserved verbatim at render.
    pub title: String,

    /// Content pages in document order, length >= 1.
    pub pages: Vec<String>,

    /// Hashtag labels in author order.
    pub tags: Vec<String>,

    /// Author display name, shown in the card footer.
    pub author_name: String,

    /// Display date for the card header. Empty means hidden.
    pub date: String,

    /// Optional author avatar shown next to the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_image: Option<ImageRef>,
}

impl Default for PostData {
    fn default() -> Self {
        Self {
            title: "Untitled Post".to_string(),
            pages: vec![String::new()],
            tags: Vec::new(),
            author_name: String::new(),
            date: String::new(),
            avatar_image: None,
        }
    }
}

impl PostData {
    /// Appends an empty page at the end of the document.
    pub fn add_page(&mut self) {
        self.pages.push(String::new());
    }

    /// Replaces the text of page `index`. Out-of-range indices are ignored.
    pub fn edit_page(&mut self, index: usize, text: impl Into<String>) {
        if let Some(page) = self.pages.get_mut(index) {
            *page = text.into();
        }
    }

    /// Removes page `index`, keeping at least one page.
    ///
    /// Returns `true` if a page was removed.
    pub fn remove_page(&mut self, index: usize) -> bool {
        if self.pages.len() > 1 && index < self.pages.len() {
            self.pages.remove(index);
            true
        } else {
            false
        }
    }

    /// Replaces tags from a comma-separated string, trimming whitespace and
    /// dropping empty entries.
    pub fn set_tags_from_csv(&mut self, csv: &str) {
        self.tags = csv
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
    }
}
