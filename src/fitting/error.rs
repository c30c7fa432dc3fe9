use thiserror::Error;

/// Why the solver stopped without a converged answer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NonConvergence {
    #[error("iteration budget of {iterations} exhausted before tolerances were met")]
    IterationBudgetExhausted { iterations: usize },

    #[error("{points} data points cannot determine {parameters} parameters")]
    UnderDetermined { points: usize, parameters: usize },

    #[error("Jacobian is singular at iteration {iteration} (parameter {parameter} is not identifiable)")]
    SingularJacobian { iteration: usize, parameter: usize },

    #[error("model produced non-finite values at iteration {iteration}")]
    NonFiniteModel { iteration: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("Fit did not converge: {0}")]
    DidNotConverge(#[from] NonConvergence),

    #[error("x has {x} values but y has {y}")]
    LengthMismatch { x: usize, y: usize },

    #[error("Non-finite {column} value at row {row}")]
    NonFiniteData { column: &'static str, row: usize },

    #[error("Invalid fit configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, FitError>;
