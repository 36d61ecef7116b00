//! Error types for the ff-app service layer.

/// Application error wrapping the errors of the backend crates.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Request validation failed: {0}")]
    Validation(String),

    #[error("Time grid error: {0}")]
    Grid(String),

    #[error("Simulation error: {message} (status {status})")]
    Simulation { message: String, status: i32 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for ff-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<ff_project::ProjectError> for AppError {
    fn from(err: ff_project::ProjectError) -> Self {
        match err {
            ff_project::ProjectError::Validation(v) => AppError::Validation(v.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<ff_project::ValidationError> for AppError {
    fn from(err: ff_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<ff_core::CoreError> for AppError {
    fn from(err: ff_core::CoreError) -> Self {
        AppError::Grid(err.to_string())
    }
}

impl From<ff_sim::SimError> for AppError {
    fn from(err: ff_sim::SimError) -> Self {
        AppError::Simulation {
            status: err.status_code(),
            message: err.to_string(),
        }
    }
}

impl AppError {
    /// Numeric outcome for simulation failures, `None` for other errors.
    pub fn status_code(&self) -> Option<i32> {
        match self {
            AppError::Simulation { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_error_keeps_status() {
        let err: AppError = ff_sim::SimError::ScratchAlloc { len: 6 }.into();
        assert_eq!(err.status_code(), Some(-2));

        let err: AppError = ff_sim::SimError::InvalidArg { what: "n_points" }.into();
        assert_eq!(err.status_code(), Some(-1));
    }

    #[test]
    fn validation_is_unwrapped_from_project_error() {
        let inner = ff_project::ValidationError::InvalidTimeGrid {
            reason: "t_end".into(),
        };
        let err: AppError = ff_project::ProjectError::Validation(inner).into();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.status_code(), None);
    }
}
