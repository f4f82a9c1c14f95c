use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::ValidationError;

pub const DEFAULT_MAX_LENGTH: usize = 150;
pub const DEFAULT_MIN_LENGTH: usize = 30;
pub const NEUTRAL_TEMPERATURE: f32 = 1.0;

pub const MAX_LENGTH_RANGE: RangeInclusive<usize> = 50..=300;
pub const MIN_LENGTH_RANGE: RangeInclusive<usize> = 10..=100;
pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.1..=2.0;

/// Processing unit an inference capability is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComputeDevice {
    /// Apple GPU through Metal Performance Shaders.
    #[serde(rename = "mps")]
    Metal,
    #[serde(rename = "cuda")]
    Cuda,
    #[serde(rename = "cpu")]
    Cpu,
}

impl ComputeDevice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metal => "mps",
            Self::Cuda => "cuda",
            Self::Cpu => "cpu",
        }
    }

    pub fn is_accelerator(&self) -> bool {
        !matches!(self, Self::Cpu)
    }
}

impl fmt::Display for ComputeDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComputeDevice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mps" | "metal" => Ok(Self::Metal),
            "cuda" | "gpu" => Ok(Self::Cuda),
            "cpu" => Ok(Self::Cpu),
            other => Err(format!("Unknown compute device: {}", other)),
        }
    }
}

/// Numeric precision the model weights are loaded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// fp16
    Half,
    /// fp32
    Full,
}

impl Precision {
    /// Accelerators run in half precision, the CPU fallback in full precision.
    pub fn for_device(device: ComputeDevice) -> Self {
        if device.is_accelerator() {
            Self::Half
        } else {
            Self::Full
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Half => "float16",
            Self::Full => "float32",
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

fn default_min_length() -> usize {
    DEFAULT_MIN_LENGTH
}

fn default_temperature() -> f32 {
    NEUTRAL_TEMPERATURE
}

/// A single summarization call as issued by a presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizationRequest {
    #[serde(alias = "text")]
    pub raw_text: String,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default)]
    pub sample: bool,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl SummarizationRequest {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            max_length: DEFAULT_MAX_LENGTH,
            min_length: DEFAULT_MIN_LENGTH,
            sample: false,
            temperature: NEUTRAL_TEMPERATURE,
        }
    }

    pub fn with_lengths(mut self, min_length: usize, max_length: usize) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    /// Enables sampling at the given temperature.
    pub fn with_sampling(mut self, temperature: f32) -> Self {
        self.sample = true;
        self.temperature = temperature;
        self
    }

    /// Temperature only applies when sampling; greedy decoding always sees 1.0.
    pub fn effective_temperature(&self) -> f32 {
        if self.sample {
            self.temperature
        } else {
            NEUTRAL_TEMPERATURE
        }
    }

    /// Checks the generation settings. Temperature is only bounded when
    /// sampling, since greedy decoding ignores it.
    pub fn check_params(&self) -> Result<(), ValidationError> {
        if self.min_length > self.max_length {
            return Err(ValidationError::InvalidLengths {
                min_length: self.min_length,
                max_length: self.max_length,
            });
        }
        if !MAX_LENGTH_RANGE.contains(&self.max_length) {
            return Err(ValidationError::OutOfRange {
                parameter: "max_length",
                range: "50 and 300",
            });
        }
        if !MIN_LENGTH_RANGE.contains(&self.min_length) {
            return Err(ValidationError::OutOfRange {
                parameter: "min_length",
                range: "10 and 100",
            });
        }
        if self.sample && !TEMPERATURE_RANGE.contains(&self.temperature) {
            return Err(ValidationError::OutOfRange {
                parameter: "temperature",
                range: "0.1 and 2.0",
            });
        }
        Ok(())
    }
}

/// Word and character counts of a piece of normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub word_count: usize,
    pub char_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetadata {
    pub original_word_count: usize,
    pub summary_word_count: usize,
    pub reduction_percent: f64,
    /// Wall-clock seconds spent in the inference call.
    pub processing_time: f64,
    pub model_used: String,
    pub device: ComputeDevice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SummarizationResult {
    Success {
        summary: String,
        metadata: SummaryMetadata,
    },
    Failure {
        error: String,
    },
}

impl SummarizationResult {
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure { error: error.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn summary(&self) -> Option<&str> {
        match self {
            Self::Success { summary, .. } => Some(summary),
            Self::Failure { .. } => None,
        }
    }

    pub fn metadata(&self) -> Option<&SummaryMetadata> {
        match self {
            Self::Success { metadata, .. } => Some(metadata),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }
}

/// Rounds to `decimals` places, ties to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Percentage decrease in word count; negative when the summary is longer.
pub fn reduction_percent(original_words: usize, summary_words: usize) -> f64 {
    if original_words == 0 {
        return 0.0;
    }
    round_to(
        (1.0 - summary_words as f64 / original_words as f64) * 100.0,
        1,
    )
}
