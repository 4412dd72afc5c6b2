//! Gauss-Legendre rules, computed by Newton iteration on Legendre polynomial
//! roots.
//!
//! An `n`-point rule integrates polynomials of degree `2n - 1` exactly.

use std::f64::consts::PI;

use crate::broadcast::DimArg;
use crate::config::NewtonConfig;
use crate::error::{QuadError, Result};
use crate::lift::lift;
use crate::newton_cotes::check_interval;
use crate::rule::Rule;

/// Gauss-Legendre rule with `n` nodes per dimension on the box `[a, b]`.
///
/// ```
/// use quadrule::gauss_legendre;
///
/// let rule = gauss_legendre(3, 0.0, 1.0).unwrap();
/// let integral: f64 = rule.iter().map(|(x, w)| w * x[0].powi(5)).sum();
/// assert!((integral - 1.0 / 6.0).abs() < 1e-14);
/// ```
pub fn gauss_legendre(
    n: impl Into<DimArg<usize>>,
    a: impl Into<DimArg<f64>>,
    b: impl Into<DimArg<f64>>,
) -> Result<Rule> {
    gauss_legendre_with(n, a, b, &NewtonConfig::default())
}

/// Like [`gauss_legendre`], with explicit Newton settings.
pub fn gauss_legendre_with(
    n: impl Into<DimArg<usize>>,
    a: impl Into<DimArg<f64>>,
    b: impl Into<DimArg<f64>>,
    config: &NewtonConfig,
) -> Result<Rule> {
    lift(
        |n, args| gauss_legendre_1d(n, args[0], args[1], config),
        &n.into(),
        &[a.into(), b.into()],
    )
}

/// Gauss-Legendre nodes with weights normalized to a probability measure:
/// the rule for the expectation under a uniform distribution on `[a, b]`.
pub fn uniform(
    n: impl Into<DimArg<usize>>,
    a: impl Into<DimArg<f64>>,
    b: impl Into<DimArg<f64>>,
) -> Result<Rule> {
    let config = NewtonConfig::default();
    lift(
        |n, args| {
            let (a, b) = (args[0], args[1]);
            let mut rule = gauss_legendre_1d(n, a, b, &config)?;
            rule.scale_weights(1.0 / (b - a));
            Ok(rule)
        },
        &n.into(),
        &[a.into(), b.into()],
    )
}

/// One-dimensional Gauss-Legendre rule on `[a, b]`.
pub fn gauss_legendre_1d(n: usize, a: f64, b: f64, config: &NewtonConfig) -> Result<Rule> {
    check_interval(n, a, b)?;

    // Roots come in pairs ±z; refine the positive half only.
    let m = (n + 1) / 2;
    let guesses = (0..m)
        .map(|i| (PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos())
        .collect();
    let (z, pp) = legendre_roots(n, guesses, config)?;

    let xm = (a + b) / 2.0;
    let xl = (b - a) / 2.0;
    let mut nodes = vec![0.0; n];
    let mut weights = vec![0.0; n];
    for i in 0..m {
        nodes[i] = xm - xl * z[i];
        nodes[n - 1 - i] = xm + xl * z[i];
        weights[i] = 2.0 * xl / ((1.0 - z[i] * z[i]) * pp[i] * pp[i]);
        weights[n - 1 - i] = weights[i];
    }

    Ok(Rule::one_dim(nodes, weights))
}

/// Refines `z` towards roots of the degree-`n` Legendre polynomial.
///
/// All roots are stepped together until every one of them moves by less
/// than the tolerance. Returns the roots and the derivative `P_n'` at the
/// previous iterate.
pub(crate) fn legendre_roots(
    n: usize,
    mut z: Vec<f64>,
    config: &NewtonConfig,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut pp = vec![0.0; z.len()];

    for iteration in 1..=config.max_iterations {
        let mut converged = true;
        for (zi, ppi) in z.iter_mut().zip(pp.iter_mut()) {
            let (p1, p2) = legendre_pair(n, *zi);
            *ppi = n as f64 * (*zi * p1 - p2) / (*zi * *zi - 1.0);
            let z1 = *zi;
            *zi = z1 - p1 / *ppi;
            // Written so that NaN counts as not converged.
            if !((*zi - z1).abs() < config.tolerance) {
                converged = false;
            }
        }
        if converged {
            tracing::debug!(n, iterations = iteration, "Legendre roots converged");
            return Ok((z, pp));
        }
    }

    Err(QuadError::ConvergenceFailure {
        rule: "gauss_legendre",
        iterations: config.max_iterations,
        tolerance: config.tolerance,
    })
}

/// Returns `(P_n(x), P_{n-1}(x))` by the three-term recurrence.
fn legendre_pair(n: usize, x: f64) -> (f64, f64) {
    let mut p1 = 1.0;
    let mut p2 = 0.0;
    for k in 1..=n {
        let p3 = p2;
        p2 = p1;
        let k = k as f64;
        p1 = ((2.0 * k - 1.0) * x * p2 - (k - 1.0) * p3) / k;
    }
    (p1, p2)
}
