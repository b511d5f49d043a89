use crate::global::TrigConfig;
use crate::symbolic::symbolic_engine::{Domain, Expr, Function};
use crate::symbolic::trigonometric::trig_functions::cos_eval;
use crate::symbolic::trigonometric::*;
use approx::assert_relative_eq;
use std::f64::consts::PI;
//___________________________________TESTS____________________________________

fn pi() -> Expr {
    Expr::pi()
}

fn int(n: i64) -> Expr {
    Expr::integer(n)
}

/// `p*pi/q`
fn angle(p: i64, q: i64) -> Expr {
    Expr::rational(p, q) * pi()
}

fn is_unevaluated(e: &Expr, f: Function) -> bool {
    matches!(e, Expr::Func(g, _) if *g == f)
}

fn vanishes(e: Expr) -> bool {
    e.expand() == Expr::zero()
}

#[test]
fn test_integer_multiples_of_pi() {
    for k in -6..=6 {
        let arg = int(k) * pi();
        assert_eq!(sin(arg.clone()), Expr::zero(), "sin({}*pi)", k);
        assert_eq!(tan(arg.clone()), Expr::zero(), "tan({}*pi)", k);
        let expected = if k % 2 == 0 { Expr::one() } else { Expr::neg_one() };
        assert_eq!(cos(arg), expected, "cos({}*pi)", k);
    }
}

#[test]
fn test_large_float_multiples_of_pi() {
    for c in [1e20, -1e20, 9223372036854775808.0, 1e300] {
        assert_eq!(cos(Expr::float(c) * pi()), Expr::one(), "cos({}*pi)", c);
        assert_eq!(sin(Expr::float(c) * pi()), Expr::zero(), "sin({}*pi)", c);
    }
}

#[test]
fn test_half_integer_multiples_of_pi() {
    for k in -7..=7 {
        let arg = angle(k, 2);
        if k % 2 == 0 {
            assert_eq!(sin(arg), Expr::zero(), "sin({}*pi/2)", k);
        } else {
            assert_eq!(cos(arg), Expr::zero(), "cos({}*pi/2)", k);
        }
    }
}

#[test]
fn test_integer_multiple_of_symbolic_pi() {
    let n = Expr::symbol_with("n", Domain::Integer);
    assert_eq!(sin(n.clone() * pi()), Expr::zero());
    assert_eq!(tan(n * pi()), Expr::zero());
    let m = Expr::symbol_with("m", Domain::Even);
    assert_eq!(cos(m * pi()), Expr::one());
}

#[test]
fn test_pythagorean_identity_at_tabulated_angles() {
    for q in [3, 4, 5, 6, 8, 10, 12] {
        let theta = angle(1, q);
        let s = sin(theta.clone());
        let c = cos(theta);
        assert!(!s.has_func(Function::sin) && !s.has_func(Function::cos), "sin(pi/{}) = {}", q, s);
        assert!(!c.has_func(Function::cos), "cos(pi/{}) = {}", q, c);
        let sum = s.pow(int(2)) + c.pow(int(2));
        assert_eq!(sum.expand(), Expr::one(), "sin^2 + cos^2 at pi/{}", q);
    }
}

#[test]
fn test_angle_addition_consistency() {
    let (a, b) = (Expr::symbol("a"), Expr::symbol("b"));
    let lhs = sin(a.clone() + b.clone()).expand_trig();
    let rhs = sin(a.clone()) * cos(b.clone()) + cos(a.clone()) * sin(b.clone());
    assert!(vanishes(lhs - rhs));
    let lhs = cos(a.clone() + b.clone()).expand_trig();
    let rhs = cos(a.clone()) * cos(b.clone()) - sin(a) * sin(b);
    assert!(vanishes(lhs - rhs));
}

#[test]
fn test_parity() {
    let x = Expr::symbol("x");
    let neg = -x.clone();
    assert_eq!(sin(neg.clone()), -sin(x.clone()));
    assert_eq!(cos(neg.clone()), cos(x.clone()));
    assert_eq!(tan(neg.clone()), -tan(x.clone()));
    assert_eq!(cot(neg.clone()), -cot(x.clone()));
    assert_eq!(sec(neg.clone()), sec(x.clone()));
    assert_eq!(csc(neg), -csc(x.clone()));
    let y = Expr::symbol("y");
    assert_eq!(sin(y.clone() - x.clone()), -sin(x.clone() - y.clone()));
    assert_eq!(cos(y.clone() - x.clone()), cos(x - y));
}

#[test]
fn test_inverse_cancellation() {
    let x = Expr::symbol("x");
    assert_eq!(sin(asin(x.clone())), x.clone());
    assert_eq!(cos(acos(x.clone())), x.clone());
    assert_eq!(tan(atan(x.clone())), x.clone());
    assert_eq!(cot(acot(x.clone())), x.clone());
    assert_eq!(sec(asec(x.clone())), x.clone());
    assert_eq!(csc(acsc(x.clone())), x);
}

#[test]
fn test_concrete_values() {
    let expected = int(6).sqrt() / int(4) - int(2).sqrt() / int(4);
    assert_eq!(sin(angle(1, 12)).expand(), expected.expand());

    let expected = (int(5).sqrt() + int(1)) / int(4);
    assert_eq!(cos(angle(1, 5)).expand(), expected.expand());

    let expected = (int(2).sqrt() / int(4) + Expr::half()).sqrt();
    assert_eq!(cos(angle(1, 8)), expected);

    assert_eq!(tan(angle(1, 8)).expand(), int(2).sqrt() - int(1));
    assert_eq!(cos(angle(2, 3)), -Expr::half());
}

#[test]
fn test_atan2_quadrants() {
    let one = Expr::one();
    assert_eq!(atan2(one.clone(), -one.clone()), angle(3, 4));
    assert_eq!(atan2(-one.clone(), -one.clone()), angle(-3, 4));
    assert_eq!(atan2(one.clone(), one.clone()), angle(1, 4));
    assert_eq!(atan2(-one.clone(), one), angle(-1, 4));
}

#[test]
fn test_periodicity_and_shifts() {
    let x = Expr::symbol("x");
    assert_eq!(sin(x.clone() + int(2) * pi()), sin(x.clone()));
    assert_eq!(cos(x.clone() - int(4) * pi()), cos(x.clone()));
    assert_eq!(sin(x.clone() + pi()), -sin(x.clone()));
    assert_eq!(cos(x.clone() + pi() / int(2)), -sin(x.clone()));
    assert_eq!(tan(x.clone() + pi()), tan(x.clone()));
    assert_eq!(tan(x.clone() + pi() / int(2)), -cot(x));
}

#[test]
fn test_unlisted_denominator_stays_unevaluated() {
    let seventh = angle(1, 7);
    assert!(is_unevaluated(&cos(seventh.clone()), Function::cos));
    assert!(is_unevaluated(&sin(seventh.clone()), Function::sin));
    assert!(is_unevaluated(&tan(seventh.clone()), Function::tan));
    assert!(cos_eval(&seventh, &TrigConfig::default()).is_none());
    // beyond the cutoff even a constructible angle is kept
    assert!(is_unevaluated(&cos(angle(1, 17)), Function::cos));
}

#[test]
fn test_numeric_agreement_of_closed_forms() {
    for q in 1..=12i64 {
        for p in 1..2 * q {
            let theta = PI * p as f64 / q as f64;
            let arg = angle(p, q);
            let c = cos(arg.clone());
            if !c.has_func(Function::cos) {
                let v = c.evalf().unwrap_or(f64::NAN);
                assert_relative_eq!(v, theta.cos(), epsilon = 1e-12);
            }
            let s = sin(arg);
            if !s.has_func(Function::sin) && !s.has_func(Function::cos) {
                let v = s.evalf().unwrap_or(f64::NAN);
                assert_relative_eq!(v, theta.sin(), epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn test_seventeenth_with_raised_cutoff() {
    let wide = TrigConfig {
        radical_denominator_cutoff: 17,
        ..TrigConfig::default()
    };
    for p in 1..=3 {
        let v = cos_eval(&angle(p, 17), &wide).unwrap_or(Expr::NaN);
        let expected = (PI * p as f64 / 17.0).cos();
        assert_relative_eq!(v.evalf().unwrap_or(f64::NAN), expected, epsilon = 1e-10);
    }
}

#[test]
fn test_reciprocal_consistency() {
    for q in [3, 4, 6] {
        let theta = angle(1, q);
        let c = cos(theta.clone());
        let s = sin(theta.clone());
        assert_eq!(sec(theta.clone()).expand(), (Expr::one() / c.clone()).expand(), "sec(pi/{})", q);
        assert_eq!(csc(theta.clone()).expand(), (Expr::one() / s.clone()).expand(), "csc(pi/{})", q);
        assert_eq!(cot(theta).expand(), (c / s).expand(), "cot(pi/{})", q);
    }
}

#[test]
fn test_inverse_of_exact_values() {
    for q in [3, 4, 6, 10, 12] {
        let theta = angle(1, q);
        assert_eq!(asin(sin(theta.clone())), theta, "asin(sin(pi/{}))", q);
    }
    for q in [3, 4, 6] {
        let theta = angle(1, q);
        assert_eq!(acos(cos(theta.clone())), theta, "acos(cos(pi/{}))", q);
    }
    for q in [3, 6, 8, 12] {
        let theta = angle(1, q);
        assert_eq!(atan(tan(theta.clone())), theta, "atan(tan(pi/{}))", q);
    }
    assert_eq!(acot(cot(angle(1, 6))), angle(1, 6));
    assert_eq!(acot(cot(angle(1, 3))), angle(1, 3));
}

#[test]
fn test_inverse_numeric_agreement() {
    for (x, f) in [
        (Expr::rational(1, 3), Function::asin),
        (Expr::rational(-2, 7), Function::acos),
        (Expr::integer(5), Function::atan),
        (Expr::integer(3), Function::acot),
        (Expr::integer(4), Function::asec),
        (Expr::integer(-3), Function::acsc),
    ] {
        let xv = x.evalf().unwrap_or(f64::NAN);
        let expected = match f {
            Function::asin => xv.asin(),
            Function::acos => xv.acos(),
            Function::atan => xv.atan(),
            Function::acot => (1.0 / xv).atan(),
            Function::asec => (1.0 / xv).acos(),
            _ => (1.0 / xv).asin(),
        };
        let v = Expr::func(f, vec![x]).evalf().unwrap_or(f64::NAN);
        assert_relative_eq!(v, expected, epsilon = 1e-12);
    }
}
