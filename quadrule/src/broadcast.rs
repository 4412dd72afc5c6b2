//! Scalar-or-vector arguments and their normalization to one value per
//! dimension.
//!
//! Every rule constructor accepts its per-dimension parameters as
//! [`DimArg`]s. Before any numerical kernel runs, [`normalize`] resolves the
//! dimension count and repeats scalar arguments so that each argument holds
//! exactly one entry per dimension.

use crate::error::{QuadError, Result};

/// A per-dimension argument: either one value for every dimension, or one
/// value per dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum DimArg<T> {
    Scalar(T),
    Vector(Vec<T>),
}

impl<T: Copy> DimArg<T> {
    /// Returns the number of values supplied.
    pub fn len(&self) -> usize {
        match self {
            DimArg::Scalar(_) => 1,
            DimArg::Vector(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the argument was given as a vector, even of length one.
    pub fn is_vector(&self) -> bool {
        matches!(self, DimArg::Vector(_))
    }

    /// Repeats or checks the argument so that it holds exactly `d` values.
    pub fn broadcast(&self, d: usize, parameter: &str) -> Result<Vec<T>> {
        match self {
            DimArg::Scalar(x) => Ok(vec![*x; d]),
            DimArg::Vector(v) if v.len() == d => Ok(v.clone()),
            DimArg::Vector(v) if v.len() == 1 => Ok(vec![v[0]; d]),
            DimArg::Vector(v) => Err(QuadError::invalid(
                parameter,
                format!("expected 1 or {d} values, got {}", v.len()),
            )),
        }
    }
}

impl<T> From<T> for DimArg<T> {
    fn from(x: T) -> Self {
        DimArg::Scalar(x)
    }
}

impl<T> From<Vec<T>> for DimArg<T> {
    fn from(v: Vec<T>) -> Self {
        DimArg::Vector(v)
    }
}

impl<T: Clone> From<&[T]> for DimArg<T> {
    fn from(v: &[T]) -> Self {
        DimArg::Vector(v.to_vec())
    }
}

impl<T: Clone> From<&Vec<T>> for DimArg<T> {
    fn from(v: &Vec<T>) -> Self {
        DimArg::Vector(v.clone())
    }
}

impl<T, const N: usize> From<[T; N]> for DimArg<T> {
    fn from(v: [T; N]) -> Self {
        DimArg::Vector(v.into())
    }
}

/// Node counts and extra arguments resolved to `dim` entries each.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub dim: usize,
    pub n: Vec<usize>,
    /// `extras[j][i]` is the `j`-th extra argument for dimension `i`.
    pub extras: Vec<Vec<f64>>,
}

impl Normalized {
    /// Collects the extra arguments of dimension `i` in argument order.
    pub fn args_for(&self, i: usize) -> Vec<f64> {
        self.extras.iter().map(|arg| arg[i]).collect()
    }
}

/// Resolves the dimension count and broadcasts every argument to it.
///
/// The dimension count is the length of `n` when `n` is a vector, and the
/// longest of all arguments otherwise. Vector arguments must have either one
/// entry or exactly that many.
pub fn normalize(n: &DimArg<usize>, extras: &[DimArg<f64>]) -> Result<Normalized> {
    if n.is_empty() {
        return Err(QuadError::invalid("n", "no dimensions given"));
    }
    if let Some(pos) = extras.iter().position(|arg| arg.is_empty()) {
        return Err(QuadError::invalid(
            &extra_name(pos),
            "no dimensions given",
        ));
    }

    let dim = if n.is_vector() {
        n.len()
    } else {
        extras.iter().map(DimArg::len).max().unwrap_or(1).max(1)
    };

    let n = n.broadcast(dim, "n")?;
    let extras = extras
        .iter()
        .enumerate()
        .map(|(j, arg)| arg.broadcast(dim, &extra_name(j)))
        .collect::<Result<Vec<_>>>()?;

    Ok(Normalized { dim, n, extras })
}

/// Positional names for extra arguments; the first two are the box bounds.
fn extra_name(position: usize) -> String {
    match position {
        0 => "a".to_string(),
        1 => "b".to_string(),
        j => format!("arg{j}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_arguments_give_one_dimension() {
        let norm = normalize(&DimArg::from(5), &[0.0.into(), 1.0.into()]).unwrap();
        assert_eq!(norm.dim, 1);
        assert_eq!(norm.n, vec![5]);
        assert_eq!(norm.extras, vec![vec![0.0], vec![1.0]]);
    }

    #[test]
    fn test_vector_n_sets_dimension() {
        let norm = normalize(&DimArg::from([3, 4, 5]), &[0.0.into(), 2.0.into()]).unwrap();
        assert_eq!(norm.dim, 3);
        assert_eq!(norm.extras[0], vec![0.0; 3]);
        assert_eq!(norm.extras[1], vec![2.0; 3]);
        assert_eq!(norm.args_for(2), vec![0.0, 2.0]);
    }

    #[test]
    fn test_scalar_n_takes_longest_extra() {
        let norm = normalize(
            &DimArg::from(4),
            &[DimArg::from(vec![-1.0, 0.0]), 1.0.into()],
        )
        .unwrap();
        assert_eq!(norm.dim, 2);
        assert_eq!(norm.n, vec![4, 4]);
        assert_eq!(norm.args_for(0), vec![-1.0, 1.0]);
        assert_eq!(norm.args_for(1), vec![0.0, 1.0]);
    }

    #[test]
    fn test_length_one_vector_broadcasts() {
        let norm = normalize(&DimArg::from([2, 3]), &[DimArg::from(vec![0.5])]).unwrap();
        assert_eq!(norm.extras[0], vec![0.5, 0.5]);
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let err = normalize(
            &DimArg::from([2, 3, 4]),
            &[DimArg::from(vec![0.0, 0.0]), 1.0.into()],
        )
        .unwrap_err();
        assert_eq!(
            err,
            QuadError::invalid("a", "expected 1 or 3 values, got 2")
        );
    }

    #[test]
    fn test_empty_vector_rejected() {
        assert!(normalize(&DimArg::Vector(vec![]), &[]).is_err());
        assert!(normalize(&DimArg::from(3), &[0.0.into(), DimArg::Vector(vec![])]).is_err());
    }
}
