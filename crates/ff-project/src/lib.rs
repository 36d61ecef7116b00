//! Simulation requests, validation and organism presets.

pub mod presets;
pub mod request;
pub mod validate;

pub use presets::{MicrobeSummary, Preset, PresetCatalog, SubstrateSummary};
pub use request::{ResolvedRequest, SimulationRequest, TimeGrid};
pub use validate::ValidationError;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

pub type ProjectResult<T> = Result<T, ProjectError>;

pub fn parse_request_json(input: &str) -> ProjectResult<SimulationRequest> {
    Ok(serde_json::from_str(input)?)
}

pub fn parse_request_yaml(input: &str) -> ProjectResult<SimulationRequest> {
    Ok(serde_yaml::from_str(input)?)
}
