//! Expectation rules for normal and lognormal distributions, built from
//! Gauss-Hermite nodes.

use std::f64::consts::{PI, SQRT_2};

use crate::broadcast::{normalize, DimArg};
use crate::config::NewtonConfig;
use crate::error::{QuadError, Result};
use crate::lift::lift;
use crate::rule::Rule;

/// Rule for expectations under `N(mean, covariance)` with `n` nodes per
/// dimension.
///
/// `covariance` is a row-major `d x d` matrix; `None` means the identity.
/// Weights sum to one, and the first two moments are reproduced exactly.
///
/// ```
/// use quadrule::normal;
///
/// let rule = normal(5, [1.0, -1.0], Some(&[2.0, 0.5, 0.5, 1.0][..])).unwrap();
/// let mean0: f64 = rule.iter().map(|(x, w)| w * x[0]).sum();
/// assert!((mean0 - 1.0).abs() < 1e-12);
/// ```
pub fn normal(
    n: impl Into<DimArg<usize>>,
    mean: impl Into<DimArg<f64>>,
    covariance: Option<&[f64]>,
) -> Result<Rule> {
    normal_with(n, mean, covariance, &NewtonConfig::default())
}

/// Like [`normal`], with explicit Newton settings.
pub fn normal_with(
    n: impl Into<DimArg<usize>>,
    mean: impl Into<DimArg<f64>>,
    covariance: Option<&[f64]>,
    config: &NewtonConfig,
) -> Result<Rule> {
    let norm = normalize(&n.into(), &[mean.into()])?;
    let dim = norm.dim;
    let mean = &norm.extras[0];

    let factor = match covariance {
        Some(cov) => Some(cholesky(cov, dim)?),
        None => None,
    };

    let mut rule = lift(
        |n, _| standard_normal_1d(n, config),
        &DimArg::Vector(norm.n.clone()),
        &[],
    )?;

    let mut z = vec![0.0; dim];
    rule.map_nodes_mut(|x| {
        z.copy_from_slice(x);
        for j in 0..dim {
            x[j] = mean[j]
                + match &factor {
                    Some(l) => (0..=j).map(|k| l[j * dim + k] * z[k]).sum::<f64>(),
                    None => z[j],
                };
        }
    });

    Ok(rule)
}

/// Rule for expectations of a lognormal variable whose logarithm is
/// `N(mean, covariance)`.
pub fn lognormal(
    n: impl Into<DimArg<usize>>,
    mean: impl Into<DimArg<f64>>,
    covariance: Option<&[f64]>,
) -> Result<Rule> {
    let mut rule = normal(n, mean, covariance)?;
    rule.map_nodes_mut(|x| x.iter_mut().for_each(|xi| *xi = xi.exp()));
    Ok(rule)
}

/// One-dimensional rule for the standard normal distribution.
///
/// Fails with [`QuadError::ConvergenceFailure`] when a root cannot be
/// separated from the ones already found, or when the Hermite recurrence
/// overflows (roughly `n` above 700).
pub fn standard_normal_1d(n: usize, config: &NewtonConfig) -> Result<Rule> {
    if n == 0 {
        return Err(QuadError::invalid("n", "need at least 1 node, got 0"));
    }

    let nf = n as f64;
    let m = (n + 1) / 2;
    // Positive roots of the Hermite polynomial, largest first.
    let mut roots: Vec<f64> = Vec::with_capacity(m);
    let mut nodes = vec![0.0; n];
    let mut weights = vec![0.0; n];

    let mut z: f64 = 0.0;
    for i in 0..m {
        z = match i {
            0 => (2.0 * nf + 1.0).sqrt() - 1.85575 * (2.0 * nf + 1.0).powf(-1.0 / 6.0),
            1 => z - 1.14 * nf.powf(0.426) / z,
            2 => 1.86 * z - 0.86 * roots[0],
            3 => 1.91 * z - 0.91 * roots[1],
            _ => 2.0 * z - roots[i - 2],
        };
        if let Some(&previous) = roots.last() {
            if !(z < previous) {
                let gap = if i >= 2 { roots[i - 2] - previous } else { previous / nf };
                z = previous - gap;
            }
        }

        let (root, pp) = hermite_root(n, z, &roots, config)?;
        let separated = roots.last().map_or(true, |&previous| root < previous);
        if !separated || root < -config.tolerance || !pp.is_finite() || pp == 0.0 {
            return Err(non_convergence(config));
        }
        z = root;
        roots.push(z);

        nodes[i] = -z * SQRT_2;
        nodes[n - 1 - i] = z * SQRT_2;
        weights[i] = 2.0 / (pp * pp) / PI.sqrt();
        weights[n - 1 - i] = weights[i];
    }

    Ok(Rule::one_dim(nodes, weights))
}

/// Newton iteration on the orthonormal Hermite polynomial of degree `n`
/// from the guess `z`, with the pairs `±r` of the already known roots
/// divided out. Returns the root and the polynomial's derivative there.
fn hermite_root(n: usize, mut z: f64, known: &[f64], config: &NewtonConfig) -> Result<(f64, f64)> {
    let pim4 = PI.powf(-0.25);

    for iteration in 1..=config.max_iterations {
        let mut p1 = pim4;
        let mut p2 = 0.0;
        for j in 1..=n {
            let p3 = p2;
            p2 = p1;
            let j = j as f64;
            p1 = z * (2.0 / j).sqrt() * p2 - ((j - 1.0) / j).sqrt() * p3;
        }
        let pp = (2.0 * n as f64).sqrt() * p2;

        let step = p1 / pp;
        let poles: f64 = known.iter().map(|r| 1.0 / (z - r) + 1.0 / (z + r)).sum();
        let z1 = z;
        z = z1 - step / (1.0 - step * poles);
        // Written so that NaN counts as not converged.
        if (z - z1).abs() < config.tolerance {
            tracing::debug!(n, iterations = iteration, "Hermite root converged");
            return Ok((z, pp));
        }
    }

    Err(non_convergence(config))
}

fn non_convergence(config: &NewtonConfig) -> QuadError {
    QuadError::ConvergenceFailure {
        rule: "normal",
        iterations: config.max_iterations,
        tolerance: config.tolerance,
    }
}

/// Lower Cholesky factor of a symmetric positive definite row-major matrix.
fn cholesky(cov: &[f64], dim: usize) -> Result<Vec<f64>> {
    if cov.len() != dim * dim {
        return Err(QuadError::invalid(
            "covariance",
            format!("expected {} entries for dimension {dim}, got {}", dim * dim, cov.len()),
        ));
    }
    for i in 0..dim {
        for j in 0..i {
            let (x, y) = (cov[i * dim + j], cov[j * dim + i]);
            if (x - y).abs() > 1e-12 * x.abs().max(y.abs()).max(1.0) {
                return Err(QuadError::invalid("covariance", "matrix is not symmetric"));
            }
        }
    }

    let mut l = vec![0.0; dim * dim];
    for i in 0..dim {
        for j in 0..=i {
            let s = cov[i * dim + j] - (0..j).map(|k| l[i * dim + k] * l[j * dim + k]).sum::<f64>();
            if i == j {
                if !(s > 0.0) {
                    return Err(QuadError::invalid(
                        "covariance",
                        "matrix is not positive definite",
                    ));
                }
                l[i * dim + i] = s.sqrt();
            } else {
                l[i * dim + j] = s / l[j * dim + j];
            }
        }
    }
    Ok(l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn moment(rule: &Rule, f: impl Fn(&[f64]) -> f64) -> f64 {
        rule.iter().map(|(x, w)| w * f(x)).sum()
    }

    #[test]
    fn test_standard_normal_moments() {
        let rule = standard_normal_1d(6, &NewtonConfig::default()).unwrap();
        assert_relative_eq!(rule.volume(), 1.0, epsilon = 1e-13);
        assert_relative_eq!(moment(&rule, |x| x[0]), 0.0, epsilon = 1e-13);
        assert_relative_eq!(moment(&rule, |x| x[0].powi(2)), 1.0, epsilon = 1e-12);
        assert_relative_eq!(moment(&rule, |x| x[0].powi(4)), 3.0, epsilon = 1e-11);
        assert_relative_eq!(moment(&rule, |x| x[0].powi(6)), 15.0, epsilon = 1e-10);
    }

    #[test]
    fn test_single_node() {
        let rule = standard_normal_1d(1, &NewtonConfig::default()).unwrap();
        assert_relative_eq!(rule.nodes()[0], 0.0, epsilon = 1e-14);
        assert_relative_eq!(rule.weights()[0], 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_correlated_covariance_reproduced() {
        let cov = [2.0, 0.6, 0.6, 1.0];
        let rule = normal([3, 4], [1.0, -2.0], Some(&cov)).unwrap();
        assert_eq!(rule.len(), 12);
        let m0 = moment(&rule, |x| x[0]);
        let m1 = moment(&rule, |x| x[1]);
        assert_relative_eq!(m0, 1.0, epsilon = 1e-12);
        assert_relative_eq!(m1, -2.0, epsilon = 1e-12);
        assert_relative_eq!(moment(&rule, |x| (x[0] - m0).powi(2)), 2.0, epsilon = 1e-11);
        assert_relative_eq!(moment(&rule, |x| (x[1] - m1).powi(2)), 1.0, epsilon = 1e-11);
        assert_relative_eq!(
            moment(&rule, |x| (x[0] - m0) * (x[1] - m1)),
            0.6,
            epsilon = 1e-11
        );
    }

    #[test]
    fn test_lognormal_mean() {
        let (mu, sigma2) = (0.1, 0.04);
        let rule = lognormal(10, mu, Some(&[sigma2][..])).unwrap();
        assert_relative_eq!(
            moment(&rule, |x| x[0]),
            (mu + sigma2 / 2.0).exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_large_rule_has_distinct_nodes() {
        match standard_normal_1d(200, &NewtonConfig::default()) {
            Ok(rule) => {
                assert_eq!(rule.len(), 200);
                assert_relative_eq!(rule.volume(), 1.0, epsilon = 1e-10);
                assert!(rule.nodes().windows(2).all(|p| p[0] < p[1]));
                assert_relative_eq!(moment(&rule, |x| x[0].powi(2)), 1.0, epsilon = 1e-9);
            }
            Err(err) => assert!(matches!(err, QuadError::ConvergenceFailure { rule: "normal", .. })),
        }
    }

    #[test]
    fn test_nan_guess_reports_failure() {
        let err = hermite_root(4, f64::NAN, &[], &NewtonConfig::default()).unwrap_err();
        assert_eq!(
            err,
            QuadError::ConvergenceFailure {
                rule: "normal",
                iterations: 100,
                tolerance: 1e-14,
            }
        );
    }

    #[test]
    fn test_iteration_cap_is_honored() {
        let config = NewtonConfig {
            tolerance: 1e-14,
            max_iterations: 1,
        };
        assert!(matches!(
            normal_with(8, 0.0, None, &config),
            Err(QuadError::ConvergenceFailure { iterations: 1, .. })
        ));
    }

    #[test]
    fn test_bad_covariance() {
        assert!(normal(3, [0.0, 0.0], Some(&[1.0, 0.0, 0.0][..])).is_err());
        assert!(normal(3, [0.0, 0.0], Some(&[1.0, 2.0, 2.0, 1.0][..])).is_err());
        assert!(normal(3, [0.0, 0.0], Some(&[1.0, 0.5, 0.4, 1.0][..])).is_err());
    }
}
