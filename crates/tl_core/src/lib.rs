pub mod error;
pub mod models;
pub mod text;
pub mod types;
pub mod validation;

pub use error::{Error, Result, ValidationError};
pub use models::{InferenceModel, InferenceRequest, ModelLoader};
pub use text::{normalize, word_count, EMPTY_INPUT_SENTINEL};
pub use types::{
    ComputeDevice, Precision, SummarizationRequest, SummarizationResult, SummaryMetadata,
    TextStats,
};
pub use validation::{validate, Validation};
