use std::path::Path;
use std::fs::File;
use std::io::BufReader;
use serde_yaml::Value;

use crate::config::{ConfigError,PipelineParameters,parse_value};

/// Loads and derives the pipeline parameters from a YAML file, logging a summary of the calibration.
pub fn load_parameters(file_path: &Path) -> Result<PipelineParameters, ConfigError> {
    let file = File::open(file_path).map_err(|source| ConfigError::Io{path: file_path.to_path_buf(), source})?;
    let root: Value = serde_yaml::from_reader(BufReader::new(file)).map_err(ConfigError::Yaml)?;
    let parameters = parse_value(&root)?;
    parameters.log_summary();
    Ok(parameters)
}

pub fn parse_parameters(contents: &str) -> Result<PipelineParameters, ConfigError> {
    let root: Value = serde_yaml::from_str(contents).map_err(ConfigError::Yaml)?;
    parse_value(&root)
}
