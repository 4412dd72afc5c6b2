//! Lifting one-dimensional rules to tensor-product rules in `d` dimensions.

use rayon::prelude::*;

use crate::broadcast::{normalize, DimArg};
use crate::error::Result;
use crate::grid::{gridmake, tensor_weights};
use crate::rule::Rule;

/// Builds a `d`-dimensional tensor-product rule from a one-dimensional rule.
///
/// `rule_1d` receives the node count of a dimension and that dimension's
/// entries of `extras`, in order, and must return a one-dimensional rule.
/// The arguments are normalized as described in [`normalize`]. When every
/// argument holds a single value the one-dimensional rule is returned as is.
///
/// # Examples
///
/// ```
/// use quadrule::broadcast::DimArg;
/// use quadrule::lift::lift;
/// use quadrule::newton_cotes::trapezoid_1d;
///
/// let rule = lift(
///     |n, args| trapezoid_1d(n, args[0], args[1]),
///     &DimArg::from([3, 4]),
///     &[DimArg::from(0.0), DimArg::from([1.0, 2.0])],
/// )
/// .unwrap();
/// assert_eq!(rule.len(), 12);
/// assert_eq!(rule.dim(), 2);
/// assert!((rule.volume() - 2.0).abs() < 1e-12);
/// ```
pub fn lift<F>(rule_1d: F, n: &DimArg<usize>, extras: &[DimArg<f64>]) -> Result<Rule>
where
    F: Fn(usize, &[f64]) -> Result<Rule> + Sync,
{
    let norm = normalize(n, extras)?;
    if norm.dim == 1 {
        return rule_1d(norm.n[0], &norm.args_for(0));
    }

    let per_dim: Vec<Rule> = (0..norm.dim)
        .into_par_iter()
        .map(|i| rule_1d(norm.n[i], &norm.args_for(i)))
        .collect::<Result<_>>()?;

    let rule = combine(&per_dim);
    tracing::trace!(dim = rule.dim(), nodes = rule.len(), "lifted tensor-product rule");
    Ok(rule)
}

/// Combines one-dimensional rules, given in dimension order, into their
/// tensor product.
pub fn combine(per_dim: &[Rule]) -> Rule {
    let node_sets: Vec<&[f64]> = per_dim.iter().map(Rule::nodes).collect();
    let weight_sets: Vec<&[f64]> = per_dim.iter().map(Rule::weights).collect();
    Rule::new(
        per_dim.len(),
        gridmake(&node_sets),
        tensor_weights(&weight_sets),
    )
}
