use crate::config::Config;
use crate::types::record::Dataset;
use std::sync::{Arc, RwLock};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    dataset: Arc<RwLock<Arc<Dataset>>>,
}

impl AppState {
    /// State with an empty dataset; callers normally use `with_dataset`.
    pub fn new(config: Config) -> Self {
        let source = config.dataset_path.display().to_string();
        Self::with_dataset(config, Dataset::empty(source))
    }

    pub fn with_dataset(config: Config, dataset: Dataset) -> Self {
        Self {
            config,
            dataset: Arc::new(RwLock::new(Arc::new(dataset))),
        }
    }

    /// Read-only snapshot; handlers compute against it without holding the lock.
    pub fn dataset(&self) -> Arc<Dataset> {
        let guard = self.dataset.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    pub fn replace_dataset(&self, dataset: Dataset) {
        let records = dataset.records.len();
        let skipped = dataset.skipped.len();
        let source = dataset.source.clone();
        let mut guard = self.dataset.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(dataset);
        tracing::info!(
            "Dataset replaced from {} ({} records, {} skipped)",
            source,
            records,
            skipped
        );
    }
}
