//! Error types.
//!
//! Two layers:
//!
//! - [`GrowthError`]: typed failures of a single growth-rate estimation. The
//!   estimator never prints; callers decide how to surface these.
//! - [`AppError`]: what the binary reports. It carries the process exit code
//!   (2 = input/config, 3 = data, 4 = internal/runtime).

use thiserror::Error;

/// Fixed message for a growth source without `Year`/`Total`.
pub const MISSING_COLUMNS_MESSAGE: &str = "Required columns 'Year' and 'Total' not found in dataset.";

/// Failure of one estimation call. Every variant is terminal for that call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrowthError {
    #[error("Unable to read growth data: {cause}")]
    Read { cause: String },

    #[error("Required columns 'Year' and 'Total' not found in dataset. (missing: {})", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("Not enough data to estimate growth rates: {reason}")]
    InsufficientData { reason: String },

    #[error("Invalid Total {value} for year {year}: growth rates need strictly positive values.")]
    InvalidValue { year: i32, value: f64 },

    #[error("Year {year} appears more than once.")]
    DuplicateYear { year: i32 },

    #[error("Year {year} has no observed value on one side to interpolate from.")]
    UnboundedGap { year: i32 },

    #[error("Invalid year window {from}..={to}: bounds must be four-digit years with from <= to.")]
    InvalidWindow { from: i32, to: i32 },

    #[error("Log-linear regression failed over {label}.")]
    Regression { label: String },
}

impl GrowthError {
    pub fn read(cause: impl std::fmt::Display) -> Self {
        GrowthError::Read {
            cause: cause.to_string(),
        }
    }

    pub fn insufficient(reason: impl Into<String>) -> Self {
        GrowthError::InsufficientData {
            reason: reason.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            GrowthError::Read { .. } | GrowthError::MissingColumns { .. } | GrowthError::InvalidWindow { .. } => 2,
            GrowthError::InsufficientData { .. }
            | GrowthError::InvalidValue { .. }
            | GrowthError::DuplicateYear { .. }
            | GrowthError::UnboundedGap { .. } => 3,
            GrowthError::Regression { .. } => 4,
        }
    }

    /// Message suitable for a non-fatal warning line.
    ///
    /// Missing columns collapse to the fixed message; everything else keeps its cause.
    pub fn warning(&self) -> String {
        match self {
            GrowthError::MissingColumns { .. } => MISSING_COLUMNS_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<GrowthError> for AppError {
    fn from(err: GrowthError) -> Self {
        AppError::new(err.exit_code(), err.warning())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_warning_is_fixed() {
        let err = GrowthError::MissingColumns {
            missing: vec!["Total".to_string()],
        };
        assert_eq!(err.warning(), MISSING_COLUMNS_MESSAGE);
        assert!(err.to_string().contains("missing: Total"));
    }

    #[test]
    fn growth_errors_map_to_exit_codes() {
        let app: AppError = GrowthError::read("bad quoting").into();
        assert_eq!(app.exit_code(), 2);
        assert_eq!(app.message(), "Unable to read growth data: bad quoting");

        let app: AppError = GrowthError::insufficient("1 row").into();
        assert_eq!(app.exit_code(), 3);

        let app: AppError = GrowthError::Regression {
            label: "1961-1970".to_string(),
        }
        .into();
        assert_eq!(app.exit_code(), 4);
    }
}
