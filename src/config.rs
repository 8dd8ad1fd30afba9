use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_CLOCK_SIGNAL, OUTPUT_EXTENSION};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranspileConfig {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub echo_input: bool,
    pub echo_output: bool,
    pub force_overwrite: bool,
    pub clock_signal: String,
    pub plus_as_or: bool,
}

impl Default for TranspileConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::new(),
            output_path: None,
            echo_input: false,
            echo_output: false,
            force_overwrite: false,
            clock_signal: DEFAULT_CLOCK_SIGNAL.to_string(),
            plus_as_or: false,
        }
    }
}

impl TranspileConfig {
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            ..Self::default()
        }
    }

    /// Load a JSON config file; missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        serde_json::from_str(&text).context(format!("Invalid config file: {:?}", path))
    }

    /// Explicit output path, or the input path with a `.v` extension.
    pub fn resolved_output_path(&self) -> PathBuf {
        match &self.output_path {
            Some(path) => path.clone(),
            None => self.input_path.with_extension(OUTPUT_EXTENSION),
        }
    }
}
