use thiserror::Error;

/// Input outside the mathematically valid domain of a projection formula.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Retirement age must be greater than current age (got {years} years to retirement)")]
    NonPositiveHorizon { years: i64 },

    #[error("Annuity return must be greater than 0 (got {0})")]
    NonPositiveAnnuityRate(f64),

    #[error("{0} is not a finite number")]
    NonFinite(&'static str),
}

pub type Result<T> = std::result::Result<T, DomainError>;
