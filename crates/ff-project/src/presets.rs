//! Built-in organism and substrate presets.
//!
//! The catalog ships as embedded YAML, keyed by microbe then substrate, and
//! fills unset request fields through [`PresetCatalog::merge_request`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ProjectResult;
use crate::request::SimulationRequest;

const BUILTIN_YAML: &str = include_str!("presets.yaml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetInitials {
    #[serde(rename = "X0")]
    pub x0: f64,
    #[serde(rename = "S0")]
    pub s0: f64,
    #[serde(rename = "P0")]
    pub p0: f64,
    #[serde(rename = "DO0")]
    pub do0: f64,
    #[serde(rename = "T0")]
    pub t0: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetKinetics {
    pub mu_max: f64,
    #[serde(rename = "Ks")]
    pub ks: f64,
    #[serde(rename = "Yxs")]
    pub yxs: f64,
    #[serde(rename = "Ypx")]
    pub ypx: f64,
    pub kd: f64,
    #[serde(rename = "Kio")]
    pub kio: f64,
    #[serde(rename = "Kp")]
    pub kp: f64,
    pub maintenance: f64,
    #[serde(rename = "O2_maintenance")]
    pub o2_maintenance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetThermal {
    #[serde(rename = "delta_H")]
    pub delta_h: f64,
    #[serde(rename = "Cp")]
    pub cp: f64,
    #[serde(rename = "U")]
    pub u: f64,
    #[serde(rename = "A")]
    pub a: f64,
    pub rho: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetMassTransfer {
    #[serde(rename = "Kla")]
    pub kla: f64,
    #[serde(rename = "C_star")]
    pub c_star: f64,
}

/// One organism grown on one substrate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub label: String,
    pub default_initials: PresetInitials,
    pub kinetics: PresetKinetics,
    pub thermal: PresetThermal,
    pub mass_transfer: PresetMassTransfer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicrobeEntry {
    pub id: String,
    pub substrates: Vec<Preset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MicrobeSummary {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubstrateSummary {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetCatalog {
    pub microbes: Vec<MicrobeEntry>,
}

impl PresetCatalog {
    /// Catalog bundled with the crate.
    pub fn builtin() -> ProjectResult<Self> {
        Self::from_yaml(BUILTIN_YAML)
    }

    pub fn from_yaml(input: &str) -> ProjectResult<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Microbes in catalog order. The label is the organism part of the
    /// first preset label (text before " on ").
    pub fn list_microbes(&self) -> Vec<MicrobeSummary> {
        self.microbes
            .iter()
            .map(|m| {
                let label = m
                    .substrates
                    .first()
                    .map(|p| organism_label(&p.label))
                    .unwrap_or(m.id.as_str());
                MicrobeSummary {
                    id: m.id.clone(),
                    label: label.to_string(),
                }
            })
            .collect()
    }

    /// Substrates for `microbe_id`; empty for an unknown microbe.
    pub fn list_substrates(&self, microbe_id: &str) -> Vec<SubstrateSummary> {
        self.microbe(microbe_id)
            .map(|m| {
                m.substrates
                    .iter()
                    .map(|p| SubstrateSummary {
                        id: p.id.clone(),
                        label: p.label.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn get(&self, microbe_id: &str, substrate_id: &str) -> Option<&Preset> {
        self.microbe(microbe_id)?
            .substrates
            .iter()
            .find(|p| p.id == substrate_id)
    }

    fn microbe(&self, microbe_id: &str) -> Option<&MicrobeEntry> {
        self.microbes.iter().find(|m| m.id == microbe_id)
    }

    /// Fill unset request fields from the selected preset.
    ///
    /// Fields the caller set always win and the selectors are kept. Without
    /// both selectors, or for an unknown pair, the request comes back unchanged.
    pub fn merge_request(&self, request: &SimulationRequest) -> SimulationRequest {
        let (Some(microbe_id), Some(substrate_id)) =
            (request.microbe_id.as_deref(), request.substrate_id.as_deref())
        else {
            return request.clone();
        };
        let Some(preset) = self.get(microbe_id, substrate_id) else {
            debug!(microbe_id, substrate_id, "no preset for selectors");
            return request.clone();
        };
        debug!(microbe_id, substrate_id, label = %preset.label, "merging preset");

        let init = &preset.default_initials;
        let kin = &preset.kinetics;
        let th = &preset.thermal;
        let mt = &preset.mass_transfer;

        SimulationRequest {
            x0: request.x0.or(Some(init.x0)),
            s0: request.s0.or(Some(init.s0)),
            p0: request.p0.or(Some(init.p0)),
            do0: request.do0.or(Some(init.do0)),
            t0: request.t0.or(Some(init.t0)),
            mu_max: request.mu_max.or(Some(kin.mu_max)),
            ks: request.ks.or(Some(kin.ks)),
            yxs: request.yxs.or(Some(kin.yxs)),
            ypx: request.ypx.or(Some(kin.ypx)),
            kd: request.kd.or(Some(kin.kd)),
            kio: request.kio.or(Some(kin.kio)),
            kp: request.kp.or(Some(kin.kp)),
            maintenance: request.maintenance.or(Some(kin.maintenance)),
            o2_maintenance: request.o2_maintenance.or(Some(kin.o2_maintenance)),
            delta_h: request.delta_h.or(Some(th.delta_h)),
            cp: request.cp.or(Some(th.cp)),
            u: request.u.or(Some(th.u)),
            a: request.a.or(Some(th.a)),
            rho: request.rho.or(Some(th.rho)),
            kla: request.kla.or(Some(mt.kla)),
            c_star: request.c_star.or(Some(mt.c_star)),
            ..request.clone()
        }
    }
}

fn organism_label(label: &str) -> &str {
    label.split(" on ").next().unwrap_or(label).trim()
}
