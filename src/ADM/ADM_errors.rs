use crate::symbolic::symbolic_errors::SymbolicError;
use strum_macros::Display;
use thiserror::Error;

/// Symbolic operation of a recurrence step, reported with a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum AdmOperation {
    Substitution,
    Differentiation,
    Integration,
    Simplification,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdmError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Symbolic computation failed at step {step} ({operation}): {source}")]
    SymbolicComputation {
        step: usize,
        operation: AdmOperation,
        source: SymbolicError,
    },
}

pub type AdmResult<T> = Result<T, AdmError>;

/// attaches the step index and the operation to an engine failure
pub(crate) trait StepContext<T> {
    fn at_step(self, step: usize, operation: AdmOperation) -> AdmResult<T>;
}

impl<T> StepContext<T> for Result<T, SymbolicError> {
    fn at_step(self, step: usize, operation: AdmOperation) -> AdmResult<T> {
        self.map_err(|source| AdmError::SymbolicComputation {
            step,
            operation,
            source,
        })
    }
}
