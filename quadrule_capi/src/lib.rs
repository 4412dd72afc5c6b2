//! The C-language interface for `quadrule`

use std::os::raw::c_int;
use std::slice;

use quadrule::{Equidistributed, EquidistributedKind, Rule};

/// A C-compatible struct for integration boundaries.
#[repr(C)]
pub struct CBoundary {
    pub min: f64,
    pub max: f64,
}

/// Tensor-product families, as passed in the `kind` argument of
/// `quadrule_tensor_new`.
pub const QUADRULE_TRAPEZOID: c_int = 0;
pub const QUADRULE_SIMPSON: c_int = 1;
pub const QUADRULE_GAUSS_LEGENDRE: c_int = 2;
pub const QUADRULE_CHEBYSHEV: c_int = 3;
pub const QUADRULE_UNIFORM: c_int = 4;

/// Equidistributed sequences, as passed in the `kind` argument of
/// `quadrule_equidistributed_new`.
pub const QUADRULE_NEIDERREITER: c_int = 0;
pub const QUADRULE_WEYL: c_int = 1;
pub const QUADRULE_HABER: c_int = 2;
pub const QUADRULE_RANDOM: c_int = 3;

/// The opaque pointer to a quadrature rule.
pub type RuleC = std::ffi::c_void;

/// Splits C boundaries into lower and upper bound vectors.
unsafe fn bounds(dim: usize, boundaries: *const CBoundary) -> (Vec<f64>, Vec<f64>) {
    let boundaries = slice::from_raw_parts(boundaries, dim);
    boundaries.iter().map(|b| (b.min, b.max)).unzip()
}

fn into_raw(rule: quadrule::Result<Rule>) -> *mut RuleC {
    match rule {
        Ok(rule) => Box::into_raw(Box::new(rule)) as *mut RuleC,
        Err(_) => std::ptr::null_mut(),
    }
}

/// Creates a tensor-product rule with `n[i]` nodes in dimension `i`.
///
/// Returns a null pointer if `kind` is unknown or the arguments are invalid.
///
/// # Safety
///
/// `n` and `boundaries` must be valid pointers to arrays of size `dim`.
#[no_mangle]
pub unsafe extern "C" fn quadrule_tensor_new(
    kind: c_int,
    dim: usize,
    n: *const usize,
    boundaries: *const CBoundary,
) -> *mut RuleC {
    if dim == 0 || n.is_null() || boundaries.is_null() {
        return std::ptr::null_mut();
    }
    let n = slice::from_raw_parts(n, dim).to_vec();
    let (a, b) = bounds(dim, boundaries);

    let rule = match kind {
        QUADRULE_TRAPEZOID => quadrule::trapezoid(n, a, b),
        QUADRULE_SIMPSON => quadrule::simpson(n, a, b),
        QUADRULE_GAUSS_LEGENDRE => quadrule::gauss_legendre(n, a, b),
        QUADRULE_CHEBYSHEV => quadrule::chebyshev(n, a, b),
        QUADRULE_UNIFORM => quadrule::uniform(n, a, b),
        _ => return std::ptr::null_mut(),
    };
    into_raw(rule)
}

/// Creates an equidistributed rule with `n` nodes. For the random sequence,
/// a nonzero `seed` makes the output reproducible.
///
/// # Safety
///
/// `boundaries` must be a valid pointer to an array of `CBoundary`
/// of size `dim`.
#[no_mangle]
pub unsafe extern "C" fn quadrule_equidistributed_new(
    kind: c_int,
    n: usize,
    dim: usize,
    boundaries: *const CBoundary,
    seed: u64,
) -> *mut RuleC {
    if dim == 0 || boundaries.is_null() {
        return std::ptr::null_mut();
    }
    let kind = match kind {
        QUADRULE_NEIDERREITER => EquidistributedKind::Neiderreiter,
        QUADRULE_WEYL => EquidistributedKind::Weyl,
        QUADRULE_HABER => EquidistributedKind::Haber,
        QUADRULE_RANDOM => EquidistributedKind::Random,
        _ => return std::ptr::null_mut(),
    };
    let (a, b) = bounds(dim, boundaries);

    let mut gen = Equidistributed::new(n, kind);
    if seed != 0 {
        gen.set_seed(seed);
    }
    into_raw(gen.rule(a, b))
}

/// Returns the number of nodes of the rule.
///
/// # Safety
/// `rule_ptr` must be a valid pointer returned by one of the constructors.
#[no_mangle]
pub unsafe extern "C" fn quadrule_rule_len(rule_ptr: *const RuleC) -> usize {
    (*(rule_ptr as *const Rule)).len()
}

/// Returns the number of coordinates per node.
///
/// # Safety
/// `rule_ptr` must be a valid pointer returned by one of the constructors.
#[no_mangle]
pub unsafe extern "C" fn quadrule_rule_dim(rule_ptr: *const RuleC) -> usize {
    (*(rule_ptr as *const Rule)).dim()
}

/// Returns the row-major node table, of size `len * dim`. The pointer is
/// valid until the rule is freed.
///
/// # Safety
/// `rule_ptr` must be a valid pointer returned by one of the constructors.
#[no_mangle]
pub unsafe extern "C" fn quadrule_rule_nodes(rule_ptr: *const RuleC) -> *const f64 {
    (*(rule_ptr as *const Rule)).nodes().as_ptr()
}

/// Returns the weights, of size `len`. The pointer is valid until the rule
/// is freed.
///
/// # Safety
/// `rule_ptr` must be a valid pointer returned by one of the constructors.
#[no_mangle]
pub unsafe extern "C" fn quadrule_rule_weights(rule_ptr: *const RuleC) -> *const f64 {
    (*(rule_ptr as *const Rule)).weights().as_ptr()
}

/// Frees the memory of the rule.
///
/// # Safety
///
/// `rule_ptr` must be a valid pointer returned by one of the constructors
/// and must not be used afterward.
#[no_mangle]
pub unsafe extern "C" fn quadrule_rule_free(rule_ptr: *mut RuleC) {
    if !rule_ptr.is_null() {
        drop(Box::from_raw(rule_ptr as *mut Rule));
    }
}
