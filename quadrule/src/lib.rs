//! `quadrule` builds multidimensional quadrature rules: sets of nodes and
//! weights whose weighted sum of integrand values approximates an integral.
//!
//! The one-dimensional families (trapezoid, Simpson, Gauss-Legendre,
//! Chebyshev, normal) are lifted to boxes in any dimension by a tensor
//! product in which the first dimension varies fastest. Equidistributed
//! sequences fill the box directly.
//!
//! Every rule constructor takes its per-dimension arguments either as a
//! scalar, applied to all dimensions, or as one value per dimension.
//!
//! ```
//! use quadrule::gauss_legendre;
//!
//! // 3 x 4 nodes on [0, 1] x [0, 2].
//! let rule = gauss_legendre([3, 4], 0.0, [1.0, 2.0]).unwrap();
//! let integral: f64 = rule.iter().map(|(x, w)| w * x[0] * x[1]).sum();
//! assert!((integral - 1.0).abs() < 1e-13);
//! ```

pub mod broadcast;
pub mod chebyshev;
pub mod config;
pub mod equidistributed;
pub mod error;
pub mod grid;
pub mod legendre;
pub mod lift;
pub mod newton_cotes;
pub mod normal;
pub mod primes;
pub mod rule;

pub use broadcast::DimArg;
pub use chebyshev::chebyshev;
pub use config::NewtonConfig;
pub use equidistributed::{equidistributed, Equidistributed, EquidistributedKind};
pub use error::{QuadError, Result};
pub use legendre::{gauss_legendre, gauss_legendre_with, uniform};
pub use newton_cotes::{simpson, trapezoid};
pub use normal::{lognormal, normal, normal_with};
pub use rule::Rule;
