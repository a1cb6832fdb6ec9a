//! CSV table boundary
//!
//! The input table comes from the external crawler, the output table
//! feeds the external visualizer. Both are plain CSV with headers;
//! nothing in here carries invariants of its own beyond the schema
//! check on the `url` column.

use anyhow::{Context, Result};
use linkrec_core::{Error, RawDocument};
use linkrec_similarity::Recommendation;
use std::path::Path;

const OUTPUT_HEADER: [&str; 4] = ["source_url", "target_url", "similarity_score", "anchor_text"];

/// Read raw document records from the crawler's metadata table.
///
/// Requires a `url` column in the header ([`Error::Schema`] otherwise).
/// `title`, `excerpt` and `keywords` columns are optional; absent
/// columns and empty cells both read as empty fields. Any additional
/// columns are ignored.
pub fn read_documents(path: &Path) -> Result<Vec<RawDocument>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open input table {}", path.display()))?;

    let headers = reader.headers().context("failed to read table header")?;
    let find = |name: &str| headers.iter().position(|h| h == name);

    let url_idx = find("url").ok_or_else(|| {
        Error::Schema(format!(
            "input table {} has no 'url' column",
            path.display()
        ))
    })?;
    let title_idx = find("title");
    let excerpt_idx = find("excerpt");
    let keywords_idx = find("keywords");

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("failed to read table row")?;
        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(str::to_string)
                .unwrap_or_default()
        };

        rows.push(RawDocument {
            url: record.get(url_idx).map(str::to_string),
            title: Some(field(title_idx)),
            excerpt: Some(field(excerpt_idx)),
            keywords: Some(field(keywords_idx)),
        });
    }

    Ok(rows)
}

/// Write the recommendation table for the visualizer.
///
/// Always writes the header row, so an empty recommendation set still
/// produces a valid header-only table.
pub fn write_recommendations(path: &Path, recommendations: &[Recommendation]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create output table {}", path.display()))?;

    if recommendations.is_empty() {
        writer.write_record(OUTPUT_HEADER)?;
    } else {
        for rec in recommendations {
            writer.serialize(rec)?;
        }
    }
    writer.flush().context("failed to flush output table")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_input(dir: &Path, contents: &str) -> std::path::PathBuf {
        let path = dir.join("articles.csv");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_read_documents_basic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(
            dir.path(),
            "url,title,excerpt,keywords\nhttps://a,Cats,About cats,\"cats, pets\"\n",
        );

        let rows = read_documents(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].url.as_deref(), Some("https://a"));
        assert_eq!(rows[0].keywords.as_deref(), Some("cats, pets"));
    }

    #[test]
    fn test_read_documents_ignores_extra_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(
            dir.path(),
            "fetched_at,url,title,status\n2024-01-01,https://a,Cats,200\n",
        );

        let rows = read_documents(&path).unwrap();
        assert_eq!(rows[0].title.as_deref(), Some("Cats"));
        // Missing excerpt/keywords columns read as empty fields
        assert_eq!(rows[0].excerpt.as_deref(), Some(""));
    }

    #[test]
    fn test_missing_url_column_is_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(dir.path(), "title,excerpt\nCats,About cats\n");

        let err = read_documents(&path).unwrap_err();
        assert!(err.downcast_ref::<Error>().is_some());
        assert!(err.to_string().contains("url"));
    }

    #[test]
    fn test_empty_recommendations_write_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recs.csv");

        write_recommendations(&path, &[]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents.trim(),
            "source_url,target_url,similarity_score,anchor_text"
        );
    }

    #[test]
    fn test_recommendations_roundtrip_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recs.csv");

        let recs = vec![Recommendation {
            source_url: "https://a".to_string(),
            target_url: "https://b".to_string(),
            similarity_score: 0.75,
            anchor_text: "Article B".to_string(),
        }];
        write_recommendations(&path, &recs).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "source_url,target_url,similarity_score,anchor_text"
        );
        assert_eq!(lines.next().unwrap(), "https://a,https://b,0.75,Article B");
    }
}
