use std::collections::HashMap;

use serde::Serialize;
use tl_core::types::round_to;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RougeScore {
    pub recall: f64,
    pub precision: f64,
    pub f1: f64,
}

impl RougeScore {
    fn from_overlap(overlap: usize, hypothesis_len: usize, reference_len: usize) -> Self {
        let precision = if hypothesis_len == 0 {
            0.0
        } else {
            overlap as f64 / hypothesis_len as f64
        };
        let recall = if reference_len == 0 {
            0.0
        } else {
            overlap as f64 / reference_len as f64
        };
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        Self { recall, precision, f1 }
    }

    pub fn rounded(&self) -> Self {
        Self {
            recall: round_to(self.recall, 4),
            precision: round_to(self.precision, 4),
            f1: round_to(self.f1, 4),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RougeScores {
    pub rouge_1: RougeScore,
    pub rouge_2: RougeScore,
    pub rouge_l: RougeScore,
}

/// Lowercased alphanumeric tokens; punctuation splits words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn ngram_counts(tokens: &[String], n: usize) -> HashMap<&[String], usize> {
    let mut counts = HashMap::new();
    if n == 0 || tokens.len() < n {
        return counts;
    }
    for window in tokens.windows(n) {
        *counts.entry(window).or_insert(0) += 1;
    }
    counts
}

/// Clipped n-gram overlap between hypothesis and reference.
pub fn rouge_n(hypothesis: &[String], reference: &[String], n: usize) -> RougeScore {
    let hyp = ngram_counts(hypothesis, n);
    let reference_counts = ngram_counts(reference, n);
    let overlap: usize = hyp
        .iter()
        .map(|(gram, &count)| count.min(reference_counts.get(gram).copied().unwrap_or(0)))
        .sum();
    RougeScore::from_overlap(
        overlap,
        hyp.values().sum(),
        reference_counts.values().sum(),
    )
}

fn lcs_len(a: &[String], b: &[String]) -> usize {
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];
    for x in a {
        for (j, y) in b.iter().enumerate() {
            current[j + 1] = if x == y {
                previous[j] + 1
            } else {
                current[j].max(previous[j + 1])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Longest-common-subsequence score over the whole token sequence.
pub fn rouge_l(hypothesis: &[String], reference: &[String]) -> RougeScore {
    RougeScore::from_overlap(
        lcs_len(hypothesis, reference),
        hypothesis.len(),
        reference.len(),
    )
}

pub fn score(hypothesis: &str, reference: &str) -> RougeScores {
    let hyp = tokenize(hypothesis);
    let reference = tokenize(reference);
    RougeScores {
        rouge_1: rouge_n(&hyp, &reference, 1).rounded(),
        rouge_2: rouge_n(&hyp, &reference, 2).rounded(),
        rouge_l: rouge_l(&hyp, &reference).rounded(),
    }
}
