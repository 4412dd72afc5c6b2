//! Settings for the Newton iterations behind the Gaussian rules.

/// Stopping criteria for Newton root refinement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonConfig {
    /// Iteration stops once every root moves by less than this.
    pub tolerance: f64,
    /// Iterations allowed before giving up with
    /// [`QuadError::ConvergenceFailure`](crate::error::QuadError::ConvergenceFailure).
    pub max_iterations: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        NewtonConfig {
            tolerance: 1e-14,
            max_iterations: 100,
        }
    }
}
