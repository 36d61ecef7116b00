//! Fermentation kinetics for fermflow.
//!
//! Provides:
//! - Kinetic parameters and operating conditions
//! - Feed-rate policy (constant, ramp, exponential, DO-controlled)
//! - Reactor state layout `[X, S, P, DO, T, V]`
//! - Configurable derivative covering the 5-state and 6-state models
//! - `FermentationModel` binding to the generic RK4 integrator

pub mod feed;
pub mod kinetics;
pub mod model;
pub mod params;
pub mod state;
pub mod terms;

pub use feed::feed_rate;
pub use kinetics::{KineticRates, derivative, rates};
pub use model::{FermentationModel, integrate_fermentation};
pub use params::{FeedMode, KineticParams, OperatingConditions};
pub use state::{ReactorState, StateVariable, state_variables};
pub use terms::{MassTransferCorrection, ModelTerms};
