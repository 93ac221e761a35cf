// TOML sample set loader
use crate::application::sample_provider::SampleProvider;
use crate::domain::subject::{SampleSet, Snapshot};
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct SampleFile {
    #[serde(default)]
    snapshots: Vec<Snapshot>,
}

#[derive(Debug, Clone)]
pub struct TomlSampleFile {
    path: PathBuf,
}

impl TomlSampleFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

pub fn parse_sample_set(text: &str) -> anyhow::Result<SampleSet> {
    let file: SampleFile = toml::from_str(text).context("Failed to parse sample file")?;
    Ok(SampleSet::new(file.snapshots)?)
}

#[async_trait]
impl SampleProvider for TomlSampleFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load_sample_set(&self) -> anyhow::Result<SampleSet> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read sample file {}", self.path.display()))?;
        let set = parse_sample_set(&text)
            .with_context(|| format!("Invalid sample file {}", self.path.display()))?;

        tracing::debug!("Loaded {} snapshots from {}", set.len(), self.path.display());
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subject::SampleSetError;

    const TWO_SNAPSHOTS: &str = r#"
        [[snapshots]]
        [[snapshots.subjects]]
        id = 7
        ammo = 120
        water = 2
        weapon = 13
        vitals = { heart_rate = 70, spo2 = 97, temperature = 98.1, respiration = 13 }

        [[snapshots]]
        [[snapshots.subjects]]
        id = 7
        ammo = 60
        water = 1
        weapon = 1
        vitals = { heart_rate = 130, spo2 = 88, temperature = 100.2, respiration = 19 }
    "#;

    #[test]
    fn test_parse_sample_file() {
        let set = parse_sample_set(TWO_SNAPSHOTS).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).subjects[0].to_string(), "[7, 60, 1, [130, 88, 100.2, 19], 1]");
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let err = parse_sample_set("").unwrap_err();
        assert_eq!(err.downcast_ref::<SampleSetError>(), Some(&SampleSetError::Empty));
    }

    #[tokio::test]
    async fn test_missing_file_reports_path() {
        let provider = TomlSampleFile::new("config/no-such-samples.toml");
        let err = provider.load_sample_set().await.unwrap_err();
        assert!(format!("{:#}", err).contains("no-such-samples.toml"));
    }
}
