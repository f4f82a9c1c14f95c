use std::sync::Arc;

use tl_core::{ComputeDevice, ModelLoader};
use tl_inference::device::probe_for;
use tl_inference::TextSummarizer;
use tokio::sync::RwLock;

/// Server-side session: the loader used for (re)loads and whichever
/// summarizer is currently loaded.
pub struct AppState {
    loader: Arc<dyn ModelLoader>,
    device: Option<ComputeDevice>,
    summarizer: RwLock<Option<Arc<TextSummarizer>>>,
}

impl AppState {
    pub fn new(loader: Arc<dyn ModelLoader>, device: Option<ComputeDevice>) -> Self {
        Self {
            loader,
            device,
            summarizer: RwLock::new(None),
        }
    }

    pub fn with_summarizer(self, summarizer: TextSummarizer) -> Self {
        Self {
            summarizer: RwLock::new(Some(Arc::new(summarizer))),
            ..self
        }
    }

    pub async fn current(&self) -> Option<Arc<TextSummarizer>> {
        self.summarizer.read().await.clone()
    }

    /// Loads `model_id` and replaces the current summarizer only on success.
    pub async fn load(&self, model_id: &str) -> tl_core::Result<Arc<TextSummarizer>> {
        let probe = probe_for(self.device);
        let summarizer =
            Arc::new(TextSummarizer::load(model_id, self.loader.as_ref(), probe.as_ref()).await?);
        *self.summarizer.write().await = Some(summarizer.clone());
        Ok(summarizer)
    }
}
