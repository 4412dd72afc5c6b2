//! Rules on Chebyshev nodes with weights that integrate the Chebyshev
//! interpolant exactly.

use std::f64::consts::PI;

use crate::broadcast::DimArg;
use crate::error::Result;
use crate::lift::lift;
use crate::newton_cotes::check_interval;
use crate::rule::Rule;

/// Chebyshev rule with `n` nodes per dimension on the box `[a, b]`.
pub fn chebyshev(
    n: impl Into<DimArg<usize>>,
    a: impl Into<DimArg<f64>>,
    b: impl Into<DimArg<f64>>,
) -> Result<Rule> {
    lift(
        |n, args| chebyshev_1d(n, args[0], args[1]),
        &n.into(),
        &[a.into(), b.into()],
    )
}

/// One-dimensional Chebyshev rule on `[a, b]`, nodes in increasing order.
pub fn chebyshev_1d(n: usize, a: f64, b: f64) -> Result<Rule> {
    check_interval(n, a, b)?;

    let nf = n as f64;
    let mid = (a + b) / 2.0;
    let half = (b - a) / 2.0;
    let nodes = (0..n)
        .map(|i| mid - half * (PI / nf * (i as f64 + 0.5)).cos())
        .collect();

    // Integrals of the even Chebyshev polynomials over [-1, 1], halved.
    let moments: Vec<f64> = (0..(n + 1) / 2)
        .map(|k| {
            if k == 0 {
                1.0
            } else {
                let k = k as f64;
                -2.0 / ((2.0 * k - 1.0) * (2.0 * k + 1.0))
            }
        })
        .collect();

    let weights = (0..n)
        .map(|i| {
            let t = i as f64 + 0.5;
            let s: f64 = moments
                .iter()
                .enumerate()
                .map(|(k, m)| (PI / nf * t * 2.0 * k as f64).cos() * m)
                .sum();
            (b - a) / nf * s
        })
        .collect();

    Ok(Rule::one_dim(nodes, weights))
}
