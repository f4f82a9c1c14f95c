//! Offline quality check: summarize fixed articles and compare each summary
//! with a hand-written reference using ROUGE.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tl_core::{SummarizationRequest, SummarizationResult};

use crate::summarizer::TextSummarizer;

pub mod examples;
pub mod rouge;

pub use examples::{builtin_examples, EvaluationExample};
pub use rouge::{RougeScore, RougeScores};

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationRecord {
    pub example: String,
    pub result: SummarizationResult,
    /// Absent when summarization failed.
    pub scores: Option<RougeScores>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub model: String,
    pub generated_at: DateTime<Utc>,
    pub records: Vec<EvaluationRecord>,
}

impl EvaluationReport {
    /// Mean ROUGE-L F1 over the examples that produced a summary.
    pub fn mean_rouge_l(&self) -> Option<f64> {
        let scores: Vec<f64> = self
            .records
            .iter()
            .filter_map(|r| r.scores.map(|s| s.rouge_l.f1))
            .collect();
        if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        }
    }
}

/// Summarizes every example with default generation settings.
pub async fn evaluate(
    summarizer: &TextSummarizer,
    examples: &[EvaluationExample],
) -> EvaluationReport {
    let mut records = Vec::with_capacity(examples.len());
    for example in examples {
        let result = summarizer
            .summarize(&SummarizationRequest::new(example.text.as_str()))
            .await;
        let scores = result
            .summary()
            .map(|summary| rouge::score(summary, &example.reference));
        match &scores {
            Some(s) => tracing::info!(
                "📏 {}: ROUGE-1 {:.4} ROUGE-2 {:.4} ROUGE-L {:.4}",
                example.name,
                s.rouge_1.f1,
                s.rouge_2.f1,
                s.rouge_l.f1
            ),
            None => tracing::warn!(
                "{}: {}",
                example.name,
                result.error().unwrap_or("no summary")
            ),
        }
        records.push(EvaluationRecord {
            example: example.name.clone(),
            result,
            scores,
        });
    }

    EvaluationReport {
        model: summarizer.model_identifier().to_string(),
        generated_at: Utc::now(),
        records,
    }
}
