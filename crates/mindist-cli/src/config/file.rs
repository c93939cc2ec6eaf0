use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSearchConfig {
    pub iterations: Option<usize>,
    pub num_candidates: Option<usize>,
    pub temperature: Option<f64>,
    pub max_step_angle: Option<f64>,
    pub isomer_tolerance: Option<f64>,
    pub candidate_tolerance: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOverlapConfig {
    pub length_scale: Option<f64>,
    pub relax_schedule: Option<Vec<f64>>,
    pub relax_iterations: Option<usize>,
    pub relax_tolerance: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileAssignmentConfig {
    pub method: Option<String>,
    pub max_exact_size: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub groups: Option<String>,
    pub seed: Option<u64>,
    pub search: Option<FileSearchConfig>,
    pub overlap: Option<FileOverlapConfig>,
    pub assignment: Option<FileAssignmentConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
