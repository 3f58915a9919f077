//! Error types for model validation and solver backends.

/// Errors raised before or around a solve.
///
/// A solver that runs and reports infeasibility is not an error; that is a
/// [`SolveStatus`](crate::SolveStatus). These cover models no backend can
/// accept and backends that cannot run at all.
#[derive(Debug, thiserror::Error)]
pub enum MipError {
    /// The model references a variable that does not exist.
    #[error("constraint `{constraint}` references unknown variable {var}")]
    UnknownVariable {
        /// Name of the offending constraint (or `"objective"`).
        constraint: String,
        /// Raw index of the missing variable.
        var: u32,
    },

    /// A variable has an empty or non-finite domain.
    #[error("variable `{name}` has invalid bounds [{lower}, {upper}]")]
    InvalidBounds {
        /// Variable name.
        name: String,
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },

    /// The requested backend is not compiled in.
    #[error("solver backend `{0}` is not available in this build")]
    Unavailable(String),

    /// The worker thread hosting a solve could not be started.
    #[error("could not start solver thread: {0}")]
    Spawn(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_variable_display() {
        let err = MipError::UnknownVariable {
            constraint: "sat_a_b".to_string(),
            var: 9,
        };
        assert_eq!(
            err.to_string(),
            "constraint `sat_a_b` references unknown variable 9"
        );
    }

    #[test]
    fn unavailable_display() {
        let err = MipError::Unavailable("highs".to_string());
        assert!(err.to_string().contains("highs"));
    }
}
