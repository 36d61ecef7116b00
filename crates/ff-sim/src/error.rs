//! Error types for integration.

use thiserror::Error;

/// Errors encountered before or while setting up an integration.
///
/// The derivative evaluation itself never fails, so these are the only
/// two failure outcomes of an integration call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Scratch allocation failed for {len} values")]
    ScratchAlloc { len: usize },
}

pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    /// Status code for invalid call-time arguments.
    pub const INVALID_ARG: i32 = -1;
    /// Status code for scratch-buffer exhaustion.
    pub const SCRATCH_ALLOC: i32 = -2;

    /// Numeric status code for this error.
    pub fn status_code(&self) -> i32 {
        match self {
            SimError::InvalidArg { .. } => Self::INVALID_ARG,
            SimError::ScratchAlloc { .. } => Self::SCRATCH_ALLOC,
        }
    }
}

/// Collapse an integration outcome into `0`, `-1` or `-2`.
pub fn status_code(result: &SimResult<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => e.status_code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_are_stable() {
        assert_eq!(status_code(&Ok(())), 0);
        assert_eq!(
            status_code(&Err(SimError::InvalidArg { what: "x" })),
            -1
        );
        assert_eq!(status_code(&Err(SimError::ScratchAlloc { len: 6 })), -2);
    }

    #[test]
    fn messages_mention_cause() {
        let msg = SimError::ScratchAlloc { len: 6 }.to_string();
        assert!(msg.contains("6 values"));
    }
}
