//! Errors raised while constructing quadrature rules.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QuadError>;

/// The ways rule construction can fail.
///
/// A failed construction never yields a partial [`Rule`](crate::rule::Rule).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuadError {
    /// An argument is out of range or has the wrong shape.
    #[error("invalid argument `{parameter}`: {message}")]
    InvalidArgument { parameter: String, message: String },

    /// A Newton iteration for polynomial roots did not reach its tolerance.
    #[error("{rule}: no convergence after {iterations} iterations (tolerance {tolerance:.1e})")]
    ConvergenceFailure {
        rule: &'static str,
        iterations: usize,
        tolerance: f64,
    },
}

impl QuadError {
    pub(crate) fn invalid(parameter: &str, message: impl Into<String>) -> Self {
        QuadError::InvalidArgument {
            parameter: parameter.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QuadError::invalid("n", "need at least 1 node, got 0");
        assert_eq!(
            err.to_string(),
            "invalid argument `n`: need at least 1 node, got 0"
        );

        let err = QuadError::ConvergenceFailure {
            rule: "gauss_legendre",
            iterations: 100,
            tolerance: 1e-14,
        };
        assert!(err.to_string().contains("no convergence after 100"));
        assert!(err.to_string().starts_with("gauss_legendre"));
    }
}
