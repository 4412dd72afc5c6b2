//! Equidistributed and pseudo-random node sets for Monte Carlo style
//! integration over a box.
//!
//! Unlike the tensor-product rules, all coordinates of a node derive from the
//! same sequence index, so the node set is generated in one pass over the
//! full box. Every node carries the weight `volume / n`.

use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use rayon::prelude::*;
use wide::f64x4;

use crate::broadcast::{normalize, DimArg};
use crate::error::{QuadError, Result};
use crate::primes::sqrt_prime_multipliers;
use crate::rule::Rule;

/// The sequence used to place the nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquidistributedKind {
    /// `frac(i * 2^(j / (d + 1)))`.
    Neiderreiter,
    /// `frac(i * c_j)`, with `c_j` the square root of the `j`-th prime.
    Weyl,
    /// `frac(i (i + 1) / 2 * c_j)`, with the Weyl multipliers.
    Haber,
    /// Independent uniform draws.
    Random,
}

impl FromStr for EquidistributedKind {
    type Err = QuadError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "n" | "neiderreiter" | "niederreiter" => Ok(EquidistributedKind::Neiderreiter),
            "w" | "weyl" => Ok(EquidistributedKind::Weyl),
            "h" | "haber" => Ok(EquidistributedKind::Haber),
            "r" | "random" => Ok(EquidistributedKind::Random),
            _ => Err(QuadError::invalid(
                "kind",
                format!("unknown equidistributed sequence `{s}`, expected one of N, W, H, R"),
            )),
        }
    }
}

impl fmt::Display for EquidistributedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EquidistributedKind::Neiderreiter => "Neiderreiter",
            EquidistributedKind::Weyl => "Weyl",
            EquidistributedKind::Haber => "Haber",
            EquidistributedKind::Random => "Random",
        };
        f.write_str(name)
    }
}

/// Generator for equidistributed rules with `n` nodes.
pub struct Equidistributed {
    /// The number of nodes.
    n: usize,
    kind: EquidistributedKind,
    /// Multipliers for the Weyl and Haber sequences. Defaults to square
    /// roots of primes.
    constants: Option<Vec<f64>>,
    /// Source of the pseudo-random draws.
    rng: Pcg64,
}

impl Equidistributed {
    pub fn new(n: usize, kind: EquidistributedKind) -> Self {
        Equidistributed {
            n,
            kind,
            constants: None,
            rng: Pcg64::from_entropy(),
        }
    }

    /// Replaces the Weyl/Haber multipliers. The table needs at least one
    /// entry per dimension of the box passed to [`Self::rule`].
    pub fn with_constants(mut self, constants: Vec<f64>) -> Self {
        self.constants = Some(constants);
        self
    }

    /// Sets the seed for the random number generator.
    ///
    /// # Arguments
    ///
    /// * `seed`: The seed to use.
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = Pcg64::seed_from_u64(seed);
    }

    pub fn kind(&self) -> EquidistributedKind {
        self.kind
    }

    /// Builds the rule on the box `[a, b]`, whose dimension is the length of
    /// the longer bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadrule::equidistributed::{Equidistributed, EquidistributedKind};
    ///
    /// let mut gen = Equidistributed::new(1000, EquidistributedKind::Weyl);
    /// let rule = gen.rule([0.0, 0.0], [1.0, 2.0]).unwrap();
    /// assert_eq!(rule.dim(), 2);
    /// assert!((rule.volume() - 2.0).abs() < 1e-12);
    /// ```
    pub fn rule(&mut self, a: impl Into<DimArg<f64>>, b: impl Into<DimArg<f64>>) -> Result<Rule> {
        if self.n == 0 {
            return Err(QuadError::invalid("n", "need at least 1 node, got 0"));
        }
        let norm = normalize(&DimArg::Scalar(self.n), &[a.into(), b.into()])?;
        let dim = norm.dim;
        let (lower, upper) = (&norm.extras[0], &norm.extras[1]);
        if lower.iter().chain(upper).any(|x| !x.is_finite()) {
            return Err(QuadError::invalid("a, b", "bounds must be finite"));
        }
        let width: Vec<f64> = lower.iter().zip(upper).map(|(a, b)| b - a).collect();

        let mut nodes = vec![0.0; self.n * dim];
        match self.kind {
            EquidistributedKind::Random => {
                for x in nodes.chunks_exact_mut(dim) {
                    for (xj, (a, w)) in x.iter_mut().zip(lower.iter().zip(&width)) {
                        let u: f64 = self.rng.gen();
                        *xj = a + u * w;
                    }
                }
            }
            kind => {
                let multipliers = self.multipliers(dim)?;
                fill_sequence(&mut nodes, dim, kind, &multipliers, lower, &width);
            }
        }

        let volume: f64 = width.iter().product();
        let weights = vec![volume / self.n as f64; self.n];
        tracing::trace!(kind = %self.kind, dim, nodes = self.n, "equidistributed rule");
        Ok(Rule::new(dim, nodes, weights))
    }

    fn multipliers(&self, dim: usize) -> Result<Vec<f64>> {
        match (self.kind, &self.constants) {
            (EquidistributedKind::Neiderreiter, _) => Ok((1..=dim)
                .map(|j| 2f64.powf(j as f64 / (dim + 1) as f64))
                .collect()),
            (_, Some(constants)) if constants.len() < dim => Err(QuadError::invalid(
                "constants",
                format!("need {dim} multipliers, got {}", constants.len()),
            )),
            (_, Some(constants)) => Ok(constants[..dim].to_vec()),
            (_, None) => Ok(sqrt_prime_multipliers(dim)),
        }
    }
}

/// Builds an equidistributed rule with `n` nodes on the box `[a, b]`.
///
/// The pseudo-random kind draws from an entropy-seeded generator; use
/// [`Equidistributed::set_seed`] for reproducible output.
pub fn equidistributed(
    n: usize,
    a: impl Into<DimArg<f64>>,
    b: impl Into<DimArg<f64>>,
    kind: EquidistributedKind,
) -> Result<Rule> {
    Equidistributed::new(n, kind).rule(a, b)
}

/// The scalar the multipliers are applied to for sequence index `i`.
fn sequence_index(kind: EquidistributedKind, i: usize) -> f64 {
    let i = i as u64;
    match kind {
        EquidistributedKind::Haber => (i * (i + 1) / 2) as f64,
        _ => i as f64,
    }
}

/// Writes the deterministic sequence into `nodes`, mapped into the box.
///
/// Rows are processed four at a time: one SIMD packet holds the same
/// coordinate of four consecutive sequence indices.
fn fill_sequence(
    nodes: &mut [f64],
    dim: usize,
    kind: EquidistributedKind,
    multipliers: &[f64],
    lower: &[f64],
    width: &[f64],
) {
    nodes
        .par_chunks_mut(4 * dim)
        .enumerate()
        .for_each(|(packet, rows)| {
            let first = 4 * packet + 1;
            let n_rows = rows.len() / dim;
            let s = f64x4::from([
                sequence_index(kind, first),
                sequence_index(kind, first + 1),
                sequence_index(kind, first + 2),
                sequence_index(kind, first + 3),
            ]);
            for j in 0..dim {
                let raw = s * f64x4::splat(multipliers[j]);
                let frac = raw - raw.floor();
                let x = f64x4::splat(lower[j]) + frac * f64x4::splat(width[j]);
                let x = x.to_array();
                for r in 0..n_rows {
                    rows[r * dim + j] = x[r];
                }
            }
        });
}
