use crate::utils::parser::GroupSpec;
use mindist::engine::config::AlignmentConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub reference_path: PathBuf,
    pub moving_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub groups: GroupSpec,
    pub seed: u64,
    pub core_config: AlignmentConfig,
}
