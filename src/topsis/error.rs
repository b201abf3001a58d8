//! Error taxonomy for the TOPSIS engine.
//!
//! Every variant is reportable to an end user as-is: messages name the
//! offending column, token or counts.

use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TopsisError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopsisError {
    /// Malformed table shape (too few columns, ragged rows, no data rows).
    #[error("{0}")]
    Structural(String),

    #[error("Column '{column}' contains non-numeric values (row {row}: '{value}').")]
    ColumnType {
        column: String,
        /// 1-based data row (header excluded).
        row: usize,
        value: String,
    },

    #[error("Weights must be numeric values separated by commas. Found: '{token}'")]
    WeightFormat { token: String },

    #[error("Number of weights ({weights}) must match number of criteria ({criteria}).")]
    WeightCountMismatch { weights: usize, criteria: usize },

    #[error("Impacts must be either '+' or '-'. Found: '{token}'")]
    ImpactSymbol { token: String },

    #[error("Number of impacts ({impacts}) must match number of criteria ({criteria}).")]
    ImpactCountMismatch { impacts: usize, criteria: usize },

    #[error("Column '{column}' has only zero values; it cannot be normalized.")]
    ZeroNormColumn { column: String },

    #[error("Alternative '{alternative}' coincides with both ideal points; its closeness score is undefined.")]
    DegenerateAlternative { alternative: String },

    #[error("Distances for alternative '{alternative}' exceed the floating-point range; reduce the weights or values.")]
    DistanceOverflow { alternative: String },
}

/// Coarse classification, stable across message wording changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Structural,
    ColumnType,
    WeightFormat,
    WeightCountMismatch,
    ImpactSymbol,
    ImpactCountMismatch,
    Data,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Structural => "structural",
            ErrorKind::ColumnType => "column_type",
            ErrorKind::WeightFormat => "weight_format",
            ErrorKind::WeightCountMismatch => "weight_count_mismatch",
            ErrorKind::ImpactSymbol => "impact_symbol",
            ErrorKind::ImpactCountMismatch => "impact_count_mismatch",
            ErrorKind::Data => "data",
        }
    }
}

impl TopsisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TopsisError::Structural(_) => ErrorKind::Structural,
            TopsisError::ColumnType { .. } => ErrorKind::ColumnType,
            TopsisError::WeightFormat { .. } => ErrorKind::WeightFormat,
            TopsisError::WeightCountMismatch { .. } => ErrorKind::WeightCountMismatch,
            TopsisError::ImpactSymbol { .. } => ErrorKind::ImpactSymbol,
            TopsisError::ImpactCountMismatch { .. } => ErrorKind::ImpactCountMismatch,
            TopsisError::ZeroNormColumn { .. }
            | TopsisError::DegenerateAlternative { .. }
            | TopsisError::DistanceOverflow { .. } => ErrorKind::Data,
        }
    }

    /// True for failures raised during numeric work rather than validation.
    pub fn is_data_error(&self) -> bool {
        self.kind() == ErrorKind::Data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_counts_and_tokens() {
        let e = TopsisError::WeightCountMismatch {
            weights: 2,
            criteria: 3,
        };
        assert_eq!(
            e.to_string(),
            "Number of weights (2) must match number of criteria (3)."
        );

        let e = TopsisError::ImpactSymbol { token: "*".into() };
        assert!(e.to_string().contains("'*'"));
        assert_eq!(e.kind(), ErrorKind::ImpactSymbol);
    }

    #[test]
    fn data_errors_share_one_kind() {
        let a = TopsisError::ZeroNormColumn { column: "C1".into() };
        let b = TopsisError::DegenerateAlternative {
            alternative: "A1".into(),
        };
        assert!(a.is_data_error() && b.is_data_error());
        assert_eq!(serde_json::to_string(&a.kind()).unwrap(), "\"data\"");
    }
}
