use approx::assert_relative_eq;

use quadrule::{
    equidistributed, gauss_legendre, simpson, trapezoid, Equidistributed, EquidistributedKind,
    QuadError, Rule,
};

fn integrate(rule: &Rule, f: impl Fn(&[f64]) -> f64) -> f64 {
    rule.iter().map(|(x, w)| w * f(x)).sum()
}

// Integral of x^k over [a, b].
fn monomial_integral(k: i32, a: f64, b: f64) -> f64 {
    (b.powi(k + 1) - a.powi(k + 1)) / (k + 1) as f64
}

#[test]
fn test_newton_cotes_integrate_constants() {
    for n in 1..15 {
        for (a, b) in [(0.0, 1.0), (-3.0, 2.5), (10.0, 10.5)] {
            assert_relative_eq!(trapezoid(n, a, b).unwrap().volume(), b - a, epsilon = 1e-12);
            assert_relative_eq!(simpson(n, a, b).unwrap().volume(), b - a, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_trapezoid_exact_to_degree_one() {
    let (a, b) = (-1.3, 2.9);
    let rule = trapezoid(9, a, b).unwrap();
    for k in 0..=1 {
        assert_relative_eq!(
            integrate(&rule, |x| x[0].powi(k)),
            monomial_integral(k, a, b),
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_simpson_exact_to_degree_three() {
    let (a, b) = (-0.7, 1.9);
    let rule = simpson(7, a, b).unwrap();
    for k in 0..=3 {
        assert_relative_eq!(
            integrate(&rule, |x| x[0].powi(k)),
            monomial_integral(k, a, b),
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_gauss_legendre_exact_to_degree_2n_minus_1() {
    let (a, b) = (-0.5, 1.5);
    for n in 2..=6 {
        let rule = gauss_legendre(n, a, b).unwrap();
        assert_eq!(rule.len(), n);
        for k in 0..=(2 * n as i32 - 1) {
            assert_relative_eq!(
                integrate(&rule, |x| x[0].powi(k)),
                monomial_integral(k, a, b),
                epsilon = 1e-12,
                max_relative = 1e-12
            );
        }
    }
}

#[test]
fn test_gauss_legendre_symmetric_about_midpoint() {
    let (a, b) = (2.0, 7.0);
    for n in 1..=12 {
        let rule = gauss_legendre(n, a, b).unwrap();
        let x = rule.nodes();
        let w = rule.weights();
        for i in 0..n {
            assert_relative_eq!(x[i] + x[n - 1 - i], a + b, epsilon = 1e-13);
            assert_relative_eq!(w[i], w[n - 1 - i], epsilon = 1e-15);
        }
    }
}

#[test]
fn test_tensor_product_alignment() {
    let (a, b) = ([0.0, -1.0], [2.0, 3.0]);
    let rule = trapezoid([3, 4], a, b).unwrap();
    let x1 = trapezoid(3, a[0], b[0]).unwrap();
    let x2 = trapezoid(4, a[1], b[1]).unwrap();

    assert_eq!(rule.len(), 12);
    assert_eq!(rule.dim(), 2);
    assert_relative_eq!(rule.volume(), 2.0 * 4.0, epsilon = 1e-12);

    // Dimension 1 cycles fastest.
    let mut k = 0;
    for j in 0..4 {
        for i in 0..3 {
            assert_eq!(rule.node(k), &[x1.nodes()[i], x2.nodes()[j]]);
            assert_eq!(rule.weights()[k], x1.weights()[i] * x2.weights()[j]);
            k += 1;
        }
    }
}

#[test]
fn test_mixed_rule_exact_on_separable_polynomial() {
    let rule = gauss_legendre([2, 3, 4], [0.0, -1.0, 1.0], [1.0, 1.0, 2.0]).unwrap();
    assert_eq!(rule.len(), 24);
    let approx = integrate(&rule, |x| x[0].powi(3) * x[1].powi(5) * x[2].powi(7) + x[1].powi(4));
    let exact = monomial_integral(3, 0.0, 1.0)
        * monomial_integral(5, -1.0, 1.0)
        * monomial_integral(7, 1.0, 2.0)
        + 1.0 * monomial_integral(4, -1.0, 1.0) * 1.0;
    assert_relative_eq!(approx, exact, epsilon = 1e-12);
}

#[test]
fn test_simpson_coerces_even_count() {
    let rule = simpson(10, 0.0, 1.0).unwrap();
    assert_eq!(rule.len(), 11);
    assert_relative_eq!(rule.volume(), 1.0, epsilon = 1e-14);

    let lifted = simpson([4, 5], 0.0, 1.0).unwrap();
    assert_eq!(lifted.len(), 25);
}

#[test]
fn test_random_rule_weights_and_support() {
    let rule = equidistributed(100, 0.0, 1.0, EquidistributedKind::Random).unwrap();
    assert_eq!(rule.len(), 100);
    assert_eq!(rule.dim(), 1);
    for (x, w) in rule.iter() {
        assert_eq!(w, 0.01);
        assert!((0.0..1.0).contains(&x[0]));
    }
}

#[test]
fn test_weyl_converges_on_smooth_integrand() {
    let mut gen = Equidistributed::new(20_000, EquidistributedKind::Weyl);
    let rule = gen.rule([-1.0, -1.0], [1.0, 1.0]).unwrap();
    let value = integrate(&rule, |x| (-(x[0].powi(2)) - x[1].powi(2)).exp());
    assert!((value - 2.230985).abs() < 1e-2, "value = {value}");
}

#[test]
fn test_invalid_inputs_are_reported() {
    assert!(matches!(
        gauss_legendre(0, 0.0, 1.0),
        Err(QuadError::InvalidArgument { .. })
    ));
    assert!(matches!(
        trapezoid([3, 0], 0.0, 1.0),
        Err(QuadError::InvalidArgument { .. })
    ));
    assert!(matches!(
        simpson([3, 3], [0.0, 0.0, 0.0], 1.0),
        Err(QuadError::InvalidArgument { .. })
    ));
}
