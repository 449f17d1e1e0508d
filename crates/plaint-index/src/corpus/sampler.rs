//! Stratified down-sampling of the complaint corpus.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::error::CorpusError;
use super::types::Document;

/// Draws a reduced corpus with approximately equal representation per
/// product label. Reproducible: identical input and seed yield the same
/// output set.
#[derive(Debug, Clone)]
pub struct StratifiedSampler {
    target_size: usize,
    seed: u64,
}

impl StratifiedSampler {
    #[must_use]
    pub fn new(target_size: usize, seed: u64) -> Self {
        Self { target_size, seed }
    }

    /// Retain `min(target_size / label_count, n_label)` documents per product
    /// label, drawn uniformly without replacement.
    ///
    /// A label smaller than its quota keeps all of its documents; the
    /// shortfall is not redistributed to other labels, so the total can come
    /// out below `target_size`.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::EmptyInput`] if `documents` is empty.
    pub fn sample(&self, documents: &[Document]) -> Result<Vec<Document>, CorpusError> {
        if documents.is_empty() {
            return Err(CorpusError::EmptyInput);
        }

        // Group document indices by product, preserving first-appearance
        // label order so the draw sequence (and therefore the output) is
        // deterministic.
        let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();
        for (i, doc) in documents.iter().enumerate() {
            match groups.iter_mut().find(|(label, _)| *label == doc.product) {
                Some((_, indices)) => indices.push(i),
                None => groups.push((&doc.product, vec![i])),
            }
        }

        let per_label = self.target_size / groups.len();
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut sampled = Vec::new();

        for (_, indices) in &groups {
            let n = per_label.min(indices.len());
            let mut drawn: Vec<usize> = indices.choose_multiple(&mut rng, n).copied().collect();
            // choose_multiple returns a random order; restore source order
            // within the label.
            drawn.sort_unstable();
            sampled.extend(drawn.into_iter().map(|i| documents[i].clone()));
        }

        tracing::debug!(
            labels = groups.len(),
            per_label,
            retained = sampled.len(),
            "stratified sample drawn"
        );

        Ok(sampled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, product: &str) -> Document {
        Document {
            complaint_id: id.to_owned(),
            product: product.to_owned(),
            issue: "issue".to_owned(),
            narrative: "narrative".to_owned(),
        }
    }

    fn ids(docs: &[Document]) -> Vec<String> {
        docs.iter().map(|d| d.complaint_id.clone()).collect()
    }

    #[test]
    fn empty_input_is_an_error() {
        let result = StratifiedSampler::new(10, 42).sample(&[]);
        assert!(matches!(result, Err(CorpusError::EmptyInput)));
    }

    #[test]
    fn one_per_label_when_target_is_two() {
        let docs = vec![doc("1", "A"), doc("2", "A"), doc("3", "B")];
        let sampled = StratifiedSampler::new(2, 42).sample(&docs).unwrap();
        assert_eq!(sampled.len(), 2);
        let from_a = sampled.iter().filter(|d| d.product == "A").count();
        let from_b = sampled.iter().filter(|d| d.product == "B").count();
        assert_eq!(from_a, 1);
        assert_eq!(from_b, 1);
    }

    #[test]
    fn output_size_is_sum_of_per_label_minima() {
        // per_label = 10 / 2 = 5; A has 8, B has 3.
        let mut docs = Vec::new();
        for i in 0..8 {
            docs.push(doc(&format!("a{i}"), "A"));
        }
        for i in 0..3 {
            docs.push(doc(&format!("b{i}"), "B"));
        }
        let sampled = StratifiedSampler::new(10, 7).sample(&docs).unwrap();
        assert_eq!(sampled.len(), 5 + 3);
    }

    #[test]
    fn small_label_keeps_everything_without_redistribution() {
        let mut docs = Vec::new();
        for i in 0..100 {
            docs.push(doc(&format!("a{i}"), "A"));
        }
        docs.push(doc("lonely", "B"));
        // per_label = 50; B contributes its single document, A exactly 50.
        let sampled = StratifiedSampler::new(100, 42).sample(&docs).unwrap();
        assert_eq!(sampled.len(), 51);
        assert!(sampled.iter().any(|d| d.complaint_id == "lonely"));
    }

    #[test]
    fn same_seed_same_sample() {
        let docs: Vec<Document> = (0..50)
            .map(|i| doc(&format!("d{i}"), if i % 2 == 0 { "A" } else { "B" }))
            .collect();
        let first = StratifiedSampler::new(20, 42).sample(&docs).unwrap();
        let second = StratifiedSampler::new(20, 42).sample(&docs).unwrap();
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn different_seed_may_differ() {
        let docs: Vec<Document> = (0..50)
            .map(|i| doc(&format!("d{i}"), if i % 2 == 0 { "A" } else { "B" }))
            .collect();
        let first = StratifiedSampler::new(10, 1).sample(&docs).unwrap();
        let second = StratifiedSampler::new(10, 2).sample(&docs).unwrap();
        // Both are valid draws of the same size; the sets are allowed to
        // differ and with 25 candidates per label they nearly always do.
        assert_eq!(first.len(), second.len());
    }

    #[test]
    fn target_below_label_count_retains_nothing() {
        let docs = vec![doc("1", "A"), doc("2", "B"), doc("3", "C")];
        let sampled = StratifiedSampler::new(2, 42).sample(&docs).unwrap();
        // per_label = 2 / 3 = 0.
        assert!(sampled.is_empty());
    }
}
