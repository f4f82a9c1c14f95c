use std::fmt::Write;

use tl_core::SummaryMetadata;
use tl_inference::evaluation::EvaluationReport;
use tl_inference::presets::ModelPreset;

pub fn summary(summary: &str, metadata: &SummaryMetadata) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📋 Summary\n\n{}\n", summary);
    let _ = writeln!(out, "📊 Analysis Metrics");
    let _ = writeln!(out, "  {:<22}{}", "Original Word Count", metadata.original_word_count);
    let _ = writeln!(out, "  {:<22}{}", "Summary Word Count", metadata.summary_word_count);
    let _ = writeln!(out, "  {:<22}{:.1}", "Reduction (%)", metadata.reduction_percent);
    let _ = writeln!(out, "  {:<22}{:.2}", "Processing Time (s)", metadata.processing_time);
    let _ = writeln!(out, "  {:<22}{} on {}", "Model", metadata.model_used, metadata.device);
    out
}

pub fn presets(presets: &[ModelPreset], default_key: &str) -> String {
    let mut out = String::new();
    for preset in presets {
        let marker = if preset.key == default_key { "*" } else { " " };
        let _ = writeln!(out, "{} {:<12}{:<28}{}", marker, preset.key, preset.label, preset.model_id);
    }
    out
}

pub fn evaluation(label: &str, report: &EvaluationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nModel: {} ({})\n", label, report.model);
    for record in &report.records {
        match (record.result.summary(), &record.scores) {
            (Some(summary), Some(scores)) => {
                let _ = writeln!(out, "[{}] Generated Summary:\n{}\n", record.example, summary);
                let _ = writeln!(
                    out,
                    "ROUGE-1 r {:.4} p {:.4} f {:.4}",
                    scores.rouge_1.recall, scores.rouge_1.precision, scores.rouge_1.f1
                );
                let _ = writeln!(
                    out,
                    "ROUGE-2 r {:.4} p {:.4} f {:.4}",
                    scores.rouge_2.recall, scores.rouge_2.precision, scores.rouge_2.f1
                );
                let _ = writeln!(
                    out,
                    "ROUGE-L r {:.4} p {:.4} f {:.4}\n",
                    scores.rouge_l.recall, scores.rouge_l.precision, scores.rouge_l.f1
                );
            }
            _ => {
                let _ = writeln!(
                    out,
                    "[{}] ❌ {}\n",
                    record.example,
                    record.result.error().unwrap_or("no summary")
                );
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tl_core::ComputeDevice;
    use tl_inference::presets::PRESETS;

    #[test]
    fn test_summary_lists_four_metrics() {
        let metadata = SummaryMetadata {
            original_word_count: 60,
            summary_word_count: 3,
            reduction_percent: 95.0,
            processing_time: 0.5,
            model_used: "t5-small".to_string(),
            device: ComputeDevice::Cuda,
        };
        let out = summary("test test test", &metadata);
        assert!(out.contains("test test test"));
        assert!(out.contains("Original Word Count   60"));
        assert!(out.contains("Summary Word Count    3"));
        assert!(out.contains("Reduction (%)         95.0"));
        assert!(out.contains("Processing Time (s)   0.50"));
        assert!(out.contains("t5-small on cuda"));
    }

    #[test]
    fn test_presets_mark_default() {
        let out = presets(&PRESETS, "distilbart");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("* distilbart"));
        assert!(lines[1].starts_with("  t5-small"));
    }
}
