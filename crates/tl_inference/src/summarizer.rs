use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tl_core::types::{reduction_percent, round_to};
use tl_core::{
    normalize, validate, word_count, ComputeDevice, Error, InferenceModel, InferenceRequest,
    ModelLoader, Precision, Result, SummarizationRequest, SummarizationResult, SummaryMetadata,
    Validation,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::device::{select_device, DeviceProbe};
use crate::presets::FALLBACK_MODEL;

/// Wraps one loaded inference capability with input cleaning, validation
/// and result metrics.
pub struct TextSummarizer {
    model_identifier: String,
    requested_model: String,
    device: ComputeDevice,
    precision: Precision,
    model: Arc<dyn InferenceModel>,
    // Adapters are not assumed reentrant.
    in_flight: Mutex<()>,
}

impl fmt::Debug for TextSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextSummarizer")
            .field("model_identifier", &self.model_identifier)
            .field("requested_model", &self.requested_model)
            .field("device", &self.device)
            .field("precision", &self.precision)
            .field("model", &self.model.name())
            .finish()
    }
}

impl TextSummarizer {
    /// Selects a device once, then acquires `model_id` through `loader`.
    ///
    /// A failed acquisition is retried a single time with [`FALLBACK_MODEL`]
    /// on the same device and precision. The summarizer then reports the
    /// fallback as its model identifier; [`requested_model`](Self::requested_model)
    /// keeps what the caller asked for.
    pub async fn load(
        model_id: &str,
        loader: &dyn ModelLoader,
        probe: &dyn DeviceProbe,
    ) -> Result<Self> {
        let device = select_device(probe);
        let precision = Precision::for_device(device);
        debug!("Selected device {} ({})", device, precision);

        let (loaded_id, model) = match loader.load(model_id, device, precision).await {
            Ok(model) => (model_id.to_string(), model),
            Err(primary) => {
                warn!("⚠️ Error loading model {}: {}", model_id, primary);
                if model_id == FALLBACK_MODEL {
                    return Err(Error::ModelLoad(format!(
                        "failed to load {}: {}",
                        model_id, primary
                    )));
                }
                match loader.load(FALLBACK_MODEL, device, precision).await {
                    Ok(model) => {
                        warn!("Falling back to {}", FALLBACK_MODEL);
                        (FALLBACK_MODEL.to_string(), model)
                    }
                    Err(fallback) => {
                        return Err(Error::ModelLoad(format!(
                            "failed to load {} ({}) and fallback {} ({})",
                            model_id, primary, FALLBACK_MODEL, fallback
                        )));
                    }
                }
            }
        };

        info!("🧠 Loaded {} on {} via {}", loaded_id, device, model.name());
        Ok(Self {
            model_identifier: loaded_id,
            requested_model: model_id.to_string(),
            device,
            precision,
            model,
            in_flight: Mutex::new(()),
        })
    }

    /// Binds an already-acquired capability without going through a loader.
    pub fn from_model(
        model_identifier: impl Into<String>,
        model: Arc<dyn InferenceModel>,
        device: ComputeDevice,
    ) -> Self {
        let model_identifier = model_identifier.into();
        Self {
            requested_model: model_identifier.clone(),
            model_identifier,
            device,
            precision: Precision::for_device(device),
            model,
            in_flight: Mutex::new(()),
        }
    }

    /// The model actually serving requests.
    pub fn model_identifier(&self) -> &str {
        &self.model_identifier
    }

    pub fn requested_model(&self) -> &str {
        &self.requested_model
    }

    pub fn used_fallback(&self) -> bool {
        self.model_identifier != self.requested_model
    }

    pub fn device(&self) -> ComputeDevice {
        self.device
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn clean_text(&self, text: &str) -> String {
        normalize(text)
    }

    pub fn validate_input(&self, text: &str) -> Validation {
        validate(text)
    }

    /// Runs one request end to end. Every failure, whether a rejected input
    /// or an engine error, comes back as [`SummarizationResult::Failure`].
    pub async fn summarize(&self, request: &SummarizationRequest) -> SummarizationResult {
        let cleaned = self.clean_text(&request.raw_text);
        let stats = match self.validate_input(&cleaned).into_result() {
            Ok(stats) => stats,
            Err(reason) => {
                debug!("Rejected input: {}", reason);
                return SummarizationResult::failure(reason.to_string());
            }
        };

        if let Err(reason) = request.check_params() {
            debug!("Rejected generation settings: {}", reason);
            return SummarizationResult::failure(reason.to_string());
        }

        let inference = InferenceRequest {
            text: cleaned,
            max_length: request.max_length,
            min_length: request.min_length,
            do_sample: request.sample,
            temperature: request.effective_temperature(),
            truncation: true,
        };

        let _guard = self.in_flight.lock().await;
        let start = Instant::now();
        let summary = match self.model.infer(&inference).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Summarization with {} failed: {}", self.model_identifier, e);
                return SummarizationResult::failure(format!("Summarization failed: {}", e));
            }
        };
        let elapsed = start.elapsed().as_secs_f64();

        let summary_word_count = word_count(&summary);
        debug!(
            "Summarized {} words into {} in {:.2}s",
            stats.word_count, summary_word_count, elapsed
        );

        SummarizationResult::Success {
            metadata: SummaryMetadata {
                original_word_count: stats.word_count,
                summary_word_count,
                reduction_percent: reduction_percent(stats.word_count, summary_word_count),
                processing_time: round_to(elapsed, 2),
                model_used: self.model_identifier.clone(),
                device: self.device,
            },
            summary,
        }
    }
}
