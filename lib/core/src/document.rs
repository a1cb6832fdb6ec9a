use serde::{Deserialize, Serialize};

/// Separator used when joining title/excerpt/keywords into one string
pub const COMBINED_TEXT_SEPARATOR: &str = ". ";

/// A raw document record as produced by the upstream crawler.
///
/// All fields are optional at this stage; normalization decides what
/// survives. Columns beyond these are ignored by the table reader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDocument {
    pub url: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub keywords: Option<String>,
}

impl RawDocument {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        excerpt: impl Into<String>,
        keywords: impl Into<String>,
    ) -> Self {
        Self {
            url: Some(url.into()),
            title: Some(title.into()),
            excerpt: Some(excerpt.into()),
            keywords: Some(keywords.into()),
        }
    }
}

/// A normalized document with a guaranteed non-empty URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Primary key; unique within a corpus
    pub url: String,
    pub title: String,
    pub excerpt: String,
    /// Keyword list rendered as a delimited string by the crawler
    pub keywords: String,
    /// Derived text that gets embedded
    pub combined_text: String,
}

impl Document {
    /// Build a document from a raw record. Returns `None` when the URL
    /// is missing or empty after trimming.
    pub fn from_raw(raw: &RawDocument) -> Option<Self> {
        let url = raw.url.as_deref().map(str::trim).unwrap_or_default();
        if url.is_empty() {
            return None;
        }

        let title = raw.title.clone().unwrap_or_default();
        let excerpt = raw.excerpt.clone().unwrap_or_default();
        let keywords = raw.keywords.clone().unwrap_or_default();
        let combined_text = combine_text(&title, &excerpt, &keywords);

        Some(Self {
            url: url.to_string(),
            title,
            excerpt,
            keywords,
            combined_text,
        })
    }
}

/// Combine title, excerpt and keywords into a single embeddable string.
///
/// Each field is trimmed, empty fields are dropped, and the survivors
/// are joined with [`COMBINED_TEXT_SEPARATOR`]. A document whose fields
/// are all empty yields an empty string, which is still a valid input
/// for the embedder.
pub fn combine_text(title: &str, excerpt: &str, keywords: &str) -> String {
    [title, excerpt, keywords]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(COMBINED_TEXT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_text_joins_with_separator() {
        let text = combine_text("Cats", "All about cats", "cats, pets");
        assert_eq!(text, "Cats. All about cats. cats, pets");
    }

    #[test]
    fn test_combine_text_drops_empty_fields() {
        assert_eq!(combine_text("Cats", "", "  "), "Cats");
        assert_eq!(combine_text("", "excerpt only", ""), "excerpt only");
    }

    #[test]
    fn test_combine_text_all_empty_is_valid() {
        assert_eq!(combine_text("", "", ""), "");
    }

    #[test]
    fn test_combine_text_trims_fields() {
        assert_eq!(combine_text("  Cats  ", " dogs ", ""), "Cats. dogs");
    }

    #[test]
    fn test_from_raw_rejects_missing_url() {
        let raw = RawDocument {
            url: None,
            title: Some("title".to_string()),
            ..Default::default()
        };
        assert!(Document::from_raw(&raw).is_none());

        let raw = RawDocument {
            url: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(Document::from_raw(&raw).is_none());
    }

    #[test]
    fn test_from_raw_builds_combined_text() {
        let raw = RawDocument::new("https://a.example/1", "Cats", "About cats", "cats");
        let doc = Document::from_raw(&raw).unwrap();
        assert_eq!(doc.url, "https://a.example/1");
        assert_eq!(doc.combined_text, "Cats. About cats. cats");
    }
}
