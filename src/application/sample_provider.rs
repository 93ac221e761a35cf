// Provider trait for the sample set fixture
use crate::domain::subject::SampleSet;
use async_trait::async_trait;

#[async_trait]
pub trait SampleProvider: Send + Sync {
    /// Short description for logs ("built-in", a file path, ...)
    fn describe(&self) -> String;

    /// Load and validate the full cyclic sample set
    async fn load_sample_set(&self) -> anyhow::Result<SampleSet>;
}
