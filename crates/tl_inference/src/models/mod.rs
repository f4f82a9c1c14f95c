use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tl_core::Result;

use crate::Config;

pub mod dummy;
pub mod huggingface;
pub mod ollama;

pub use dummy::{DummyLoader, DummyModel};
pub use huggingface::{HuggingFaceLoader, HuggingFaceModel};
pub use ollama::{OllamaLoader, OllamaModel};
pub use tl_core::{InferenceModel, InferenceRequest, ModelLoader};

/// Which adapter binds model identifiers to an inference capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Offline extractive stand-in.
    Dummy,
    #[default]
    HuggingFace,
    Ollama,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dummy => "dummy",
            Self::HuggingFace => "huggingface",
            Self::Ollama => "ollama",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dummy" => Ok(Self::Dummy),
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            "ollama" => Ok(Self::Ollama),
            other => Err(format!(
                "Unknown backend: {}. Available backends: huggingface (default), ollama, dummy",
                other
            )),
        }
    }
}

pub fn create_loader(config: &Config) -> Result<Arc<dyn ModelLoader>> {
    let loader: Arc<dyn ModelLoader> = match config.backend {
        BackendKind::Dummy => Arc::new(DummyLoader),
        BackendKind::HuggingFace => Arc::new(HuggingFaceLoader::new(&config.inference_config)?),
        BackendKind::Ollama => Arc::new(OllamaLoader::new(&config.inference_config)?),
    };
    tracing::debug!("Created {} model loader", config.backend);
    Ok(loader)
}
