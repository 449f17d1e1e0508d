//! Narrative splitting: greedy chunks with exact character overlap.

use super::error::CorpusError;
use super::types::{Chunk, Document};

#[derive(Debug, Clone)]
pub struct SplitterConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 50,
        }
    }
}

pub struct NarrativeSplitter {
    config: SplitterConfig,
}

impl NarrativeSplitter {
    /// # Errors
    ///
    /// Returns [`CorpusError::InvalidOverlap`] unless
    /// `chunk_overlap < chunk_size` and `chunk_size > 0`.
    pub fn new(config: SplitterConfig) -> Result<Self, CorpusError> {
        if config.chunk_size == 0 || config.chunk_overlap >= config.chunk_size {
            return Err(CorpusError::InvalidOverlap {
                size: config.chunk_size,
                overlap: config.chunk_overlap,
            });
        }
        Ok(Self { config })
    }

    /// Split every document, preserving input order, chunk indices ascending
    /// within each document.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::EmptyInput`] if `documents` is empty.
    pub fn split_documents(&self, documents: &[Document]) -> Result<Vec<Chunk>, CorpusError> {
        if documents.is_empty() {
            return Err(CorpusError::EmptyInput);
        }
        Ok(documents.iter().flat_map(|doc| self.split(doc)).collect())
    }

    /// Split one document's narrative into overlapping chunks. An empty
    /// narrative yields no chunks.
    #[must_use]
    pub fn split(&self, document: &Document) -> Vec<Chunk> {
        split_text(
            &document.narrative,
            self.config.chunk_size,
            self.config.chunk_overlap,
        )
        .into_iter()
        .enumerate()
        .map(|(i, text)| Chunk {
            complaint_id: document.complaint_id.clone(),
            product: document.product.clone(),
            issue: document.issue.clone(),
            chunk_index: i,
            text,
        })
        .collect()
    }
}

/// Greedily fill chunks up to `size` characters, breaking on the largest
/// boundary available within the window (paragraph, then sentence, then
/// word), falling back to a hard character cut. Adjacent chunks share
/// exactly `overlap` characters.
fn split_text(text: &str, size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let hard_end = (start + size).min(chars.len());
        let end = if hard_end == chars.len() {
            hard_end
        } else {
            break_point(&chars, start + overlap + 1, hard_end)
        };

        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        // Next chunk re-reads exactly `overlap` trailing characters.
        start = end - overlap.min(end - start);
    }

    chunks
}

/// Best position to end a chunk within `[min_end, hard_end]`, scanning each
/// boundary class from the right. `min_end` keeps every non-final chunk
/// longer than the overlap so the window always advances.
fn break_point(chars: &[char], min_end: usize, hard_end: usize) -> usize {
    for boundary in [is_paragraph_break, is_sentence_break, is_word_break] {
        let mut i = hard_end;
        while i >= min_end {
            if boundary(chars, i) {
                return i;
            }
            i -= 1;
        }
    }
    hard_end
}

/// Chunk ending at `i` closes right after a blank line.
fn is_paragraph_break(chars: &[char], i: usize) -> bool {
    i >= 2 && chars[i - 1] == '\n' && chars[i - 2] == '\n'
}

/// Chunk ending at `i` closes after sentence punctuation plus a space.
fn is_sentence_break(chars: &[char], i: usize) -> bool {
    i >= 2
        && chars[i - 1].is_whitespace()
        && matches!(chars[i - 2], '.' | '?' | '!')
}

fn is_word_break(chars: &[char], i: usize) -> bool {
    i >= 1 && chars[i - 1].is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_doc(narrative: &str) -> Document {
        Document {
            complaint_id: "C-1".to_owned(),
            product: "Credit card".to_owned(),
            issue: "Billing dispute".to_owned(),
            narrative: narrative.to_owned(),
        }
    }

    fn splitter(size: usize, overlap: usize) -> NarrativeSplitter {
        NarrativeSplitter::new(SplitterConfig {
            chunk_size: size,
            chunk_overlap: overlap,
        })
        .unwrap()
    }

    #[test]
    fn empty_collection_is_an_error() {
        let result = splitter(500, 50).split_documents(&[]);
        assert!(matches!(result, Err(CorpusError::EmptyInput)));
    }

    #[test]
    fn overlap_must_be_smaller_than_size() {
        let result = NarrativeSplitter::new(SplitterConfig {
            chunk_size: 50,
            chunk_overlap: 50,
        });
        assert!(matches!(result, Err(CorpusError::InvalidOverlap { .. })));
    }

    #[test]
    fn empty_narrative_yields_no_chunks() {
        let chunks = splitter(500, 50).split(&make_doc(""));
        assert!(chunks.is_empty());
    }

    #[test]
    fn short_narrative_is_a_single_chunk() {
        let chunks = splitter(500, 50).split(&make_doc("the charge was never refunded"));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chunk_index, 0);
        assert_eq!(chunks[0].text, "the charge was never refunded");
    }

    #[test]
    fn twelve_hundred_chars_make_three_chunks() {
        let narrative: String = std::iter::repeat_n('a', 1200).collect();
        let chunks = splitter(500, 50).split(&make_doc(&narrative));
        assert_eq!(chunks.len(), 3);
        let indices: Vec<usize> = chunks.iter().map(|c| c.chunk_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(chunks[0].text.len(), 500);
        assert_eq!(chunks[1].text.len(), 500);
        assert_eq!(chunks[2].text.len(), 300);
    }

    #[test]
    fn adjacent_chunks_share_exact_overlap() {
        let narrative: String = std::iter::repeat_n('x', 1200).collect();
        let chunks = splitter(500, 50).split(&make_doc(&narrative));
        for pair in chunks.windows(2) {
            let suffix: String = pair[0].text.chars().rev().take(50).collect();
            let prefix: String = pair[1].text.chars().take(50).collect();
            let suffix: String = suffix.chars().rev().collect();
            assert_eq!(suffix, prefix);
        }
    }

    #[test]
    fn prefers_sentence_boundary_over_hard_cut() {
        let narrative = format!("{}. {}", "a".repeat(30), "b".repeat(60));
        let chunks = splitter(40, 5).split(&make_doc(&narrative));
        // First chunk should end right after the sentence break, not at 40.
        assert!(chunks[0].text.ends_with(". "));
        assert_eq!(chunks[0].text.chars().count(), 32);
    }

    #[test]
    fn prefers_paragraph_boundary_over_sentence() {
        let narrative = format!("{}.\n\n{}. {}", "a".repeat(20), "b".repeat(10), "c".repeat(60));
        let chunks = splitter(40, 5).split(&make_doc(&narrative));
        assert!(chunks[0].text.ends_with("\n\n"));
    }

    #[test]
    fn metadata_propagates_to_every_chunk() {
        let narrative: String = std::iter::repeat_n('m', 1200).collect();
        let chunks = splitter(500, 50).split(&make_doc(&narrative));
        for chunk in &chunks {
            assert_eq!(chunk.complaint_id, "C-1");
            assert_eq!(chunk.product, "Credit card");
            assert_eq!(chunk.issue, "Billing dispute");
        }
    }

    #[test]
    fn output_mirrors_document_order() {
        let mut doc_a = make_doc(&"a".repeat(600));
        doc_a.complaint_id = "A".into();
        let mut doc_b = make_doc(&"b".repeat(600));
        doc_b.complaint_id = "B".into();

        let chunks = splitter(500, 50)
            .split_documents(&[doc_a, doc_b])
            .unwrap();
        let ids: Vec<&str> = chunks.iter().map(|c| c.complaint_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "A", "B", "B"]);
        assert_eq!(chunks[0].chunk_index, 0);
        assert_eq!(chunks[2].chunk_index, 0);
    }

    mod proptest_splitter {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn split_never_panics(
                narrative in "\\PC{0,2000}",
                chunk_size in 1usize..800,
                chunk_overlap in 0usize..200,
            ) {
                prop_assume!(chunk_overlap < chunk_size);
                let s = splitter(chunk_size, chunk_overlap);
                let _ = s.split(&make_doc(&narrative));
            }

            #[test]
            fn chunks_never_exceed_size(
                narrative in "[a-z .!?\n]{1,1500}",
                chunk_size in 10usize..300,
                chunk_overlap in 0usize..9,
            ) {
                let s = splitter(chunk_size, chunk_overlap);
                for chunk in s.split(&make_doc(&narrative)) {
                    prop_assert!(chunk.text.chars().count() <= chunk_size);
                }
            }

            #[test]
            fn chunk_indices_sequential(
                narrative in "[a-z .]{1,1000}",
                chunk_size in 5usize..100,
            ) {
                let s = splitter(chunk_size, 0);
                let chunks = s.split(&make_doc(&narrative));
                for (i, chunk) in chunks.iter().enumerate() {
                    prop_assert_eq!(chunk.chunk_index, i);
                }
            }

            #[test]
            fn dropping_overlap_reconstructs_narrative(
                narrative in "[a-z .!?\n]{1,1500}",
                chunk_size in 10usize..300,
                chunk_overlap in 0usize..9,
            ) {
                let s = splitter(chunk_size, chunk_overlap);
                let chunks = s.split(&make_doc(&narrative));
                let mut rebuilt = String::new();
                for (i, chunk) in chunks.iter().enumerate() {
                    if i == 0 {
                        rebuilt.push_str(&chunk.text);
                    } else {
                        rebuilt.extend(chunk.text.chars().skip(chunk_overlap));
                    }
                }
                prop_assert_eq!(rebuilt, narrative);
            }
        }
    }
}
