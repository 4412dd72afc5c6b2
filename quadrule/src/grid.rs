//! Tensor-product assembly of per-dimension node sets and weight vectors.
//!
//! Both halves must produce the same ordering: the first dimension varies
//! fastest, the last slowest. [`gridmake`] gets there by folding dimensions
//! in order, while [`tensor_weights`] reverses the weight vectors before the
//! Kronecker product, whose last factor varies fastest.

/// Builds the Cartesian product of `sets` as a row-major table with
/// `sets.len()` columns.
///
/// Row `r` holds `sets[j][(r / stride_j) % sets[j].len()]` in column `j`,
/// where `stride_j` is the product of the lengths of the earlier sets.
///
/// ```
/// use quadrule::grid::gridmake;
///
/// let grid = gridmake(&[&[1.0, 2.0], &[10.0, 20.0, 30.0]]);
/// assert_eq!(
///     grid,
///     vec![1.0, 10.0, 2.0, 10.0, 1.0, 20.0, 2.0, 20.0, 1.0, 30.0, 2.0, 30.0]
/// );
/// ```
///
/// No sets give an empty table.
pub fn gridmake(sets: &[&[f64]]) -> Vec<f64> {
    let dim = sets.len();
    if dim == 0 {
        return Vec::new();
    }
    if dim == 1 {
        return sets[0].to_vec();
    }

    let total: usize = sets.iter().map(|s| s.len()).product();
    let mut grid = vec![0.0; total * dim];

    // The running grid occupies the first `rows` rows and the first `j`
    // columns. Folding in set `j` tiles it once per value of the set and
    // writes that value into column `j` of the tile.
    let mut rows = 1;
    for (j, set) in sets.iter().enumerate() {
        if j > 0 {
            for block in 1..set.len() {
                for r in 0..rows {
                    let src = r * dim;
                    let dst = (block * rows + r) * dim;
                    grid.copy_within(src..src + j, dst);
                }
            }
        }
        for (block, &x) in set.iter().enumerate() {
            for r in 0..rows {
                grid[(block * rows + r) * dim + j] = x;
            }
        }
        rows *= set.len();
    }

    grid
}

/// Kronecker product of `factors`, taken left to right. The last factor
/// varies fastest in the result. No factors give the empty product `[1.0]`.
pub fn ckron(factors: &[&[f64]]) -> Vec<f64> {
    let mut acc = vec![1.0];
    for factor in factors {
        let mut next = Vec::with_capacity(acc.len() * factor.len());
        for &a in &acc {
            next.extend(factor.iter().map(|&b| a * b));
        }
        acc = next;
    }
    acc
}

/// Combines per-dimension weight vectors into weights aligned with
/// [`gridmake`] applied to the matching node sets. No vectors give no
/// weights, matching the empty grid.
pub fn tensor_weights(weights: &[&[f64]]) -> Vec<f64> {
    match weights.len() {
        0 => return Vec::new(),
        1 => return weights[0].to_vec(),
        _ => {}
    }
    // Reverse before combining: `ckron` varies its last factor fastest,
    // `gridmake` varies its first set fastest.
    let reversed: Vec<&[f64]> = weights.iter().rev().copied().collect();
    ckron(&reversed)
}
