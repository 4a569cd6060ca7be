use thiserror::Error;

/// Failures of the symbolic engine. Every operation of the engine is pure, so an error
/// always means the requested result has no closed form or is undefined.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolicError {
    #[error("division by zero: {0}")]
    DivisionByZero(String),

    #[error("undefined value: {0}")]
    Undefined(String),

    #[error("no closed-form antiderivative of {integrand} with respect to {var}")]
    NoClosedForm { integrand: String, var: String },

    #[error("cannot parse expression: {0}")]
    Parse(String),
}

pub type SymbolicResult<T> = Result<T, SymbolicError>;
