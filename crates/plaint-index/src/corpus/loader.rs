//! Complaint export loading and narrative cleaning.

use std::path::Path;

use serde::Deserialize;

use super::error::CorpusError;
use super::types::Document;

#[derive(Debug, Deserialize)]
struct ComplaintRow {
    #[serde(rename = "Complaint ID")]
    complaint_id: String,
    #[serde(rename = "Product")]
    product: String,
    #[serde(rename = "Issue")]
    issue: String,
    #[serde(rename = "Consumer complaint narrative")]
    narrative: Option<String>,
}

/// Read a CFPB-style complaint export into documents.
///
/// Rows without a narrative are skipped; narratives are cleaned with
/// [`clean_narrative`] before they enter the pipeline.
///
/// # Errors
///
/// Returns [`CorpusError::EmptyInput`] if no row survives filtering, or a
/// CSV/IO error if the file cannot be read.
pub fn load_csv(path: &Path) -> Result<Vec<Document>, CorpusError> {
    let mut reader = csv::Reader::from_path(path).map_err(CorpusError::Csv)?;
    let mut documents = Vec::new();
    let mut skipped = 0usize;

    for row in reader.deserialize::<ComplaintRow>() {
        let row = row?;
        let Some(raw) = row.narrative else {
            skipped += 1;
            continue;
        };
        let narrative = clean_narrative(&raw);
        if narrative.is_empty() {
            skipped += 1;
            continue;
        }
        documents.push(Document {
            complaint_id: row.complaint_id,
            product: row.product,
            issue: row.issue,
            narrative,
        });
    }

    tracing::info!(loaded = documents.len(), skipped, "complaint export read");

    if documents.is_empty() {
        return Err(CorpusError::EmptyInput);
    }
    Ok(documents)
}

/// Lowercase, strip characters outside letters/digits/basic punctuation,
/// and collapse runs of whitespace to single spaces.
#[must_use]
pub fn clean_narrative(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            pending_space = !cleaned.is_empty();
        } else if c.is_alphanumeric() || matches!(c, '.' | ',' | '?' | '!' | '\'') {
            if pending_space {
                cleaned.push(' ');
                pending_space = false;
            }
            cleaned.push(c);
        }
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str = "Complaint ID,Product,Issue,Consumer complaint narrative\n";

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn clean_lowercases_and_collapses_whitespace() {
        assert_eq!(
            clean_narrative("I was  CHARGED\ttwice!"),
            "i was charged twice!"
        );
    }

    #[test]
    fn clean_strips_special_characters() {
        assert_eq!(clean_narrative("refund of $500 (still) pending"), "refund of 500 still pending");
    }

    #[test]
    fn clean_trims_edges() {
        assert_eq!(clean_narrative("  hello world  "), "hello world");
    }

    #[test]
    fn load_skips_rows_without_narrative() {
        let file = write_csv(&format!(
            "{HEADER}1,Credit card,Billing,\"The charge was wrong.\"\n2,Mortgage,Escrow,\n"
        ));
        let docs = load_csv(file.path()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].complaint_id, "1");
        assert_eq!(docs[0].narrative, "the charge was wrong.");
    }

    #[test]
    fn load_with_no_usable_rows_is_empty_input() {
        let file = write_csv(&format!("{HEADER}1,Credit card,Billing,\n"));
        let result = load_csv(file.path());
        assert!(matches!(result, Err(CorpusError::EmptyInput)));
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let result = load_csv(Path::new("/nonexistent/complaints.csv"));
        assert!(result.is_err());
    }
}
