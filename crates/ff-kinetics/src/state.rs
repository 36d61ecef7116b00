//! Reactor state layout and variable metadata.

use serde::{Deserialize, Serialize};

/// Biomass index (g/L).
pub const X: usize = 0;
/// Substrate index (g/L).
pub const S: usize = 1;
/// Product index (g/L).
pub const P: usize = 2;
/// Dissolved oxygen index (g/L).
pub const DO: usize = 3;
/// Temperature index (°C).
pub const T: usize = 4;
/// Volume index (L); present in the 6-state model only.
pub const V: usize = 5;

/// Dimension of the batch model.
pub const SIMPLE_DIM: usize = 5;
/// Dimension of the fed-batch model.
pub const EXTENDED_DIM: usize = 6;

/// State names in index order.
pub const STATE_NAMES: [&str; EXTENDED_DIM] = ["X", "S", "P", "DO", "T", "V"];

/// Initial or instantaneous reactor state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactorState {
    pub biomass: f64,
    pub substrate: f64,
    pub product: f64,
    pub dissolved_oxygen: f64,
    pub temperature: f64,
    pub volume: f64,
}

impl ReactorState {
    /// State vector of length `dim` (5 or 6) in index order.
    pub fn to_vec(&self, dim: usize) -> Vec<f64> {
        let full = [
            self.biomass,
            self.substrate,
            self.product,
            self.dissolved_oxygen,
            self.temperature,
            self.volume,
        ];
        full[..dim.min(EXTENDED_DIM)].to_vec()
    }
}

/// Display metadata for one state variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateVariable {
    pub name: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
}

const VARIABLES: [StateVariable; EXTENDED_DIM] = [
    StateVariable {
        name: "X",
        label: "Biomass",
        unit: "g/L",
    },
    StateVariable {
        name: "S",
        label: "Substrate",
        unit: "g/L",
    },
    StateVariable {
        name: "P",
        label: "Product",
        unit: "g/L",
    },
    StateVariable {
        name: "DO",
        label: "Dissolved Oxygen",
        unit: "g/L",
    },
    StateVariable {
        name: "T",
        label: "Temperature",
        unit: "°C",
    },
    StateVariable {
        name: "V",
        label: "Volume",
        unit: "L",
    },
];

/// Metadata for the first `dim` state variables.
pub fn state_variables(dim: usize) -> &'static [StateVariable] {
    &VARIABLES[..dim.min(EXTENDED_DIM)]
}
