use thiserror::Error;

use super::types::SchemeId;

pub type CalcResult<T> = Result<T, CalcError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("unknown scheme '{0}'")]
    UnknownScheme(String),

    #[error("{scheme}: missing required input '{field}'")]
    MissingInput { scheme: SchemeId, field: &'static str },

    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} must be > 0, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{scheme}: amount {amount} is below the minimum of {min}")]
    BelowMinimum { scheme: SchemeId, amount: f64, min: f64 },

    #[error("{scheme}: amount {amount} exceeds the maximum of {max}")]
    AboveMaximum { scheme: SchemeId, amount: f64, max: f64 },

    #[error("{scheme}: years must be a whole number, got {years}")]
    WholeYears { scheme: SchemeId, years: f64 },

    #[error("{scheme}: years must cover a whole number of months, got {years}")]
    WholeMonths { scheme: SchemeId, years: f64 },

    #[error("{scheme}: tenure of {years} years is shorter than the minimum of {min}")]
    TenureTooShort { scheme: SchemeId, years: f64, min: f64 },

    #[error("{scheme}: tenure of {years} years exceeds the maximum of {max}")]
    TenureTooLong { scheme: SchemeId, years: f64, max: f64 },

    #[error("{scheme}: result is too large to represent")]
    Overflow { scheme: SchemeId },

    #[error("compounding frequency must be between 1 and 365, got {0}")]
    InvalidFrequency(u32),
}
