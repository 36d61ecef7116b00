//! Preset catalog lookups.

use ff_project::{MicrobeSummary, Preset, PresetCatalog, SubstrateSummary};

use crate::error::AppResult;

pub fn list_microbes() -> AppResult<Vec<MicrobeSummary>> {
    Ok(PresetCatalog::builtin()?.list_microbes())
}

pub fn list_substrates(microbe_id: &str) -> AppResult<Vec<SubstrateSummary>> {
    Ok(PresetCatalog::builtin()?.list_substrates(microbe_id))
}

/// Preset for a microbe/substrate pair, `None` if the pair is unknown.
pub fn get_preset(microbe_id: &str, substrate_id: &str) -> AppResult<Option<Preset>> {
    Ok(PresetCatalog::builtin()?
        .get(microbe_id, substrate_id)
        .cloned())
}
