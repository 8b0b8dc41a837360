// Chart error taxonomy
use super::chart::{ChartType, ParameterShape};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("unknown chart type '{0}'")]
    UnknownChartType(String),

    #[error("{chart_type} chart expects {expected} but got {found}")]
    TypeMismatch {
        chart_type: ChartType,
        expected: ParameterShape,
        found: ParameterShape,
    },

    #[error("invalid {chart_type} parameters: {source}")]
    InvalidParameters {
        chart_type: ChartType,
        #[source]
        source: serde_json::Error,
    },

    #[error("{chart_type} chart requires at least one model")]
    NoModels { chart_type: ChartType },

    #[error("chart {id} not found in project '{project}'")]
    NotFound { project: String, id: i64 },

    #[error("failed to serialize chart parameters: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ChartError {
    /// Stable machine-readable code, used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ChartError::MalformedBody(_) => "malformed_body",
            ChartError::UnknownChartType(_) => "unknown_chart_type",
            ChartError::TypeMismatch { .. } => "type_mismatch",
            ChartError::InvalidParameters { .. } => "invalid_parameters",
            ChartError::NoModels { .. } => "no_models",
            ChartError::NotFound { .. } => "not_found",
            ChartError::Serialization(_) => "serialization_failed",
            ChartError::Storage(_) => "storage_failed",
        }
    }

    /// True for errors caused by the caller's input rather than the service.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ChartError::MalformedBody(_)
                | ChartError::UnknownChartType(_)
                | ChartError::TypeMismatch { .. }
                | ChartError::InvalidParameters { .. }
                | ChartError::NoModels { .. }
        )
    }
}
