//! Composite Newton-Cotes rules on equally spaced nodes.

use crate::broadcast::DimArg;
use crate::error::{QuadError, Result};
use crate::lift::lift;
use crate::rule::Rule;

/// Composite trapezoid rule with `n` nodes per dimension on the box `[a, b]`.
///
/// Exact for polynomials of degree 1 in each coordinate.
///
/// ```
/// use quadrule::trapezoid;
///
/// let rule = trapezoid(5, 0.0, 2.0).unwrap();
/// assert_eq!(rule.nodes(), &[0.0, 0.5, 1.0, 1.5, 2.0]);
/// assert_eq!(rule.weights(), &[0.25, 0.5, 0.5, 0.5, 0.25]);
/// ```
pub fn trapezoid(
    n: impl Into<DimArg<usize>>,
    a: impl Into<DimArg<f64>>,
    b: impl Into<DimArg<f64>>,
) -> Result<Rule> {
    lift(
        |n, args| trapezoid_1d(n, args[0], args[1]),
        &n.into(),
        &[a.into(), b.into()],
    )
}

/// Composite Simpson rule with `n` nodes per dimension on the box `[a, b]`.
///
/// An even node count is raised to the next odd one, with a warning logged.
/// Exact for polynomials of degree 3 in each coordinate.
pub fn simpson(
    n: impl Into<DimArg<usize>>,
    a: impl Into<DimArg<f64>>,
    b: impl Into<DimArg<f64>>,
) -> Result<Rule> {
    lift(
        |n, args| simpson_1d(n, args[0], args[1]),
        &n.into(),
        &[a.into(), b.into()],
    )
}

/// One-dimensional trapezoid rule on `[a, b]`.
pub fn trapezoid_1d(n: usize, a: f64, b: f64) -> Result<Rule> {
    check_interval(n, a, b)?;
    if n == 1 {
        return Ok(degenerate(a, b));
    }

    let h = (b - a) / (n - 1) as f64;
    let mut weights = vec![h; n];
    weights[0] = h / 2.0;
    weights[n - 1] = h / 2.0;

    Ok(Rule::one_dim(linspace(a, b, n), weights))
}

/// One-dimensional Simpson rule on `[a, b]`.
pub fn simpson_1d(n: usize, a: f64, b: f64) -> Result<Rule> {
    check_interval(n, a, b)?;
    let n = if n % 2 == 0 {
        tracing::warn!(
            requested = n,
            used = n + 1,
            "Simpson's rule needs an odd number of nodes, using one more"
        );
        n + 1
    } else {
        n
    };
    if n == 1 {
        return Ok(degenerate(a, b));
    }

    let h = (b - a) / (n - 1) as f64;
    let weights = (0..n)
        .map(|i| {
            let c = if i == 0 || i == n - 1 {
                1.0
            } else if i % 2 == 1 {
                4.0
            } else {
                2.0
            };
            c * h / 3.0
        })
        .collect();

    Ok(Rule::one_dim(linspace(a, b, n), weights))
}

/// Validates a node count and interval shared by all bounded 1D rules.
pub(crate) fn check_interval(n: usize, a: f64, b: f64) -> Result<()> {
    if n == 0 {
        return Err(QuadError::invalid("n", "need at least 1 node, got 0"));
    }
    if !a.is_finite() || !b.is_finite() {
        return Err(QuadError::invalid(
            "a, b",
            format!("bounds must be finite, got [{a}, {b}]"),
        ));
    }
    Ok(())
}

/// A single node at `a` carrying the whole interval length.
fn degenerate(a: f64, b: f64) -> Rule {
    Rule::one_dim(vec![a], vec![b - a])
}

/// `n >= 2` equally spaced points from `a` to `b` inclusive.
fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    let h = (b - a) / (n - 1) as f64;
    let mut x: Vec<f64> = (0..n).map(|i| a + i as f64 * h).collect();
    x[n - 1] = b;
    x
}
