//! # Exact Values
//!
//! ## Purpose
//! Closed forms of the circular functions at rational multiples of `pi`, and the
//! special values of the inverse functions.
//!
//! ## Tables
//! - `COS_RADICALS`: `cos(pi/q)` for the Fermat primes `q = 3, 5, 17`
//! - `PAIRWISE_ANGLES`: denominators `q` with `1/q = 1/a - 1/b` for tabulated `a`, `b`
//! - `ASIN_VALUES`, `ACOS_VALUES`, `ATAN_VALUES`, `ACOT_VALUES`: algebraic constants and
//!   the angle they are the sine (cosine, ...) of. Keys are stored expanded; lookups
//!   expand the argument before comparing
//!
//! ## Algorithm (`cos_as_radical`)
//! For `cos(p*pi/q)`:
//! 1. **Table**: `q` a Fermat prime gives `T_p(cos(pi/q))`
//! 2. **Halving**: even `q` recurses on `cos(2*p*pi/q)` and applies the half-angle formula
//! 3. **Fermat product**: `q` a product of distinct Fermat primes splits `p/q` into partial
//!    fractions `sum(c_i)`, expands `cos(z_0 + z_1 + ...)` by the addition formula over
//!    placeholder symbols and substitutes `z_i = c_i*pi`
//! 4. **Otherwise**: the same split over the full prime-power factorisation, without a
//!   closed radical form for the pieces

use crate::symbolic::symbolic_engine::{Domain, Expr, Function};
use crate::symbolic::symbolic_traits::RewriteTarget;
use crate::symbolic::trigonometric::angle::{fermat_coords, pi_coeff};
use crate::symbolic::trigonometric::cos;
use crate::symbolic::utils::{NumberedSymbols, chebyshevt, ipartfrac};
use log::{debug, trace, warn};
use num::{BigInt, BigRational, Integer, One, Signed, ToPrimitive};
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

/// Fermat primes with a tabulated `cos(pi/q)`.
pub const FERMAT_PRIMES: [u64; 3] = [3, 5, 17];

fn int(n: i64) -> Expr {
    Expr::integer(n)
}

fn sqrt(n: i64) -> Expr {
    Expr::integer(n).sqrt()
}

/// `pi*num/den`
fn angle(num: i64, den: i64) -> Expr {
    Expr::rational(num, den) * Expr::pi()
}

pub static COS_RADICALS: LazyLock<BTreeMap<u64, Expr>> = LazyLock::new(|| {
    let s17 = sqrt(17);
    let inner = sqrt(2)
        * (int(-8) * (int(17) + s17.clone()).sqrt()
            - (int(1) - s17.clone()) * (int(17) - s17.clone()).sqrt());
    let nested = (inner + int(6) * s17.clone() + int(34)).sqrt();
    let seventeen = ((int(15) + s17.clone()) / int(32)
        + sqrt(2) * ((int(17) - s17).sqrt() + nested) / int(32))
    .sqrt();
    BTreeMap::from([
        (3, Expr::half()),
        (5, (sqrt(5) + int(1)) / int(4)),
        (17, seventeen),
    ])
});

/// `q -> (a, b)` with `p*pi/q = p*pi/a - p*pi/b`.
pub static PAIRWISE_ANGLES: LazyLock<HashMap<u64, (u64, u64)>> = LazyLock::new(|| {
    HashMap::from([
        (12, (3, 4)),
        (20, (4, 5)),
        (30, (5, 6)),
        (15, (6, 10)),
        (24, (6, 8)),
        (40, (8, 10)),
        (60, (20, 30)),
        (120, (40, 60)),
    ])
});

fn expanded_table(entries: Vec<(Expr, Expr)>) -> Vec<(Expr, Expr)> {
    entries.into_iter().map(|(k, v)| (k.expand(), v)).collect()
}

/// Positive sines; negative arguments are matched by oddness.
pub static ASIN_VALUES: LazyLock<Vec<(Expr, Expr)>> = LazyLock::new(|| {
    expanded_table(vec![
        (sqrt(3) / int(2), angle(1, 3)),
        (sqrt(2) / int(2), angle(1, 4)),
        (((int(5) - sqrt(5)) / int(8)).sqrt(), angle(1, 5)),
        (Expr::half(), angle(1, 6)),
        ((int(2) - sqrt(2)).sqrt() / int(2), angle(1, 8)),
        ((sqrt(5) - int(1)) / int(4), angle(1, 10)),
        ((sqrt(3) - int(1)) / sqrt(8), angle(1, 12)),
        ((sqrt(5) + int(1)) / int(4), angle(3, 10)),
    ])
});

/// Both signs listed; `acos` is not odd.
pub static ACOS_VALUES: LazyLock<Vec<(Expr, Expr)>> = LazyLock::new(|| {
    expanded_table(vec![
        (Expr::half(), angle(1, 3)),
        (-Expr::half(), angle(2, 3)),
        (sqrt(2) / int(2), angle(1, 4)),
        (-sqrt(2) / int(2), angle(3, 4)),
        (sqrt(3) / int(2), angle(1, 6)),
        (-sqrt(3) / int(2), angle(5, 6)),
    ])
});

pub static ATAN_VALUES: LazyLock<Vec<(Expr, Expr)>> = LazyLock::new(|| {
    expanded_table(vec![
        (sqrt(3) / int(3), angle(1, 6)),
        (sqrt(3), angle(1, 3)),
        (int(1) + sqrt(2), angle(3, 8)),
        (sqrt(2) - int(1), angle(1, 8)),
        ((int(5) + int(2) * sqrt(5)).sqrt(), angle(2, 5)),
        (int(2) - sqrt(3), angle(1, 12)),
    ])
});

pub static ACOT_VALUES: LazyLock<Vec<(Expr, Expr)>> = LazyLock::new(|| {
    expanded_table(vec![
        (sqrt(3) / int(3), angle(1, 3)),
        (sqrt(3), angle(1, 6)),
        (int(1) + sqrt(2), angle(1, 8)),
        (sqrt(2) - int(1), angle(3, 8)),
        ((int(5) + int(2) * sqrt(5)).sqrt(), angle(1, 10)),
        (int(2) + sqrt(3), angle(1, 12)),
        (int(2) - sqrt(3), angle(5, 12)),
    ])
});

/// Value stored for `x` in `table`.
pub fn lookup(table: &[(Expr, Expr)], x: &Expr) -> Option<Expr> {
    if !x.is_number() {
        return None;
    }
    let key = x.expand();
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| v.clone())
}

/// Lookup in a table of an odd function: `-x` maps to the negated value.
pub fn lookup_odd(table: &[(Expr, Expr)], x: &Expr) -> Option<Expr> {
    lookup(table, x).or_else(|| lookup(table, &-x.clone()).map(|v| -v))
}

/// `(-1)**floor(|2c + 1|/2)`, the sign of `cos(c*pi)` for the half-angle formula.
pub fn half_angle_sign(c: &BigRational) -> Expr {
    let two = BigRational::from_integer(BigInt::from(2));
    let x = (c * &two + BigRational::one()) / two;
    let whole = x.numer().abs() / x.denom();
    if whole.is_odd() { Expr::neg_one() } else { Expr::one() }
}

/// `cos(sum(c_i*pi))` expanded by the addition formula.
fn expand_partial_angles(parts: &[BigRational]) -> Expr {
    let zs: Vec<Expr> = NumberedSymbols::new("z", Domain::Complex)
        .take(parts.len())
        .collect();
    let sum = Expr::add_all(zs.clone());
    let expanded = Expr::func_unevaluated(Function::cos, vec![sum]).expand_trig();
    let rules: BTreeMap<Expr, Expr> = zs
        .into_iter()
        .zip(parts)
        .map(|(z, c)| (z, Expr::from_rational(c.clone()) * Expr::pi()))
        .collect();
    expanded.xreplace(&rules)
}

/// `cos(arg)` in radicals for `arg` a rational multiple of `pi`.
pub fn cos_as_radical(arg: &Expr) -> Option<Expr> {
    let pc = pi_coeff(arg, 1)?;
    let c = pc.as_rational()?.clone();
    if c.is_integer() {
        return Some(cos(pc * Expr::pi()));
    }
    let q = c.denom().clone();
    if let Some(base) = q.to_u64().and_then(|q| COS_RADICALS.get(&q)) {
        let p = c.numer().to_i64()?;
        return Some(chebyshevt(p, base).expand());
    }
    if q.is_even() {
        let twice = Expr::from_rational(c.clone() * BigRational::from_integer(BigInt::from(2))) * Expr::pi();
        let nval = cos(twice).rewrite(RewriteTarget::sqrt);
        trace!("cos({}) halved from {}", arg, nval);
        return Some(half_angle_sign(&c) * ((Expr::one() + nval) / Expr::integer(2)).sqrt());
    }
    match fermat_coords(&q) {
        Ok(Some(coords)) => {
            let parts = ipartfrac(&c, Some(&coords));
            debug!("cos({}): Fermat split of {} into {:?}", arg, c, parts);
            Some(expand_partial_angles(&parts).rewrite(RewriteTarget::sqrt))
        }
        Ok(None) => {
            let parts = ipartfrac(&c, None);
            debug!("cos({}): no Fermat split of {}, prime-power split {:?}", arg, c, parts);
            Some(expand_partial_angles(&parts))
        }
        Err(e) => {
            warn!("cos({}): {}", arg, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cos_radicals_numerically() {
        for (q, value) in COS_RADICALS.iter() {
            let v = value.evalf().unwrap_or(f64::NAN);
            assert_relative_eq!(v, (std::f64::consts::PI / *q as f64).cos(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_pairwise_angles_are_differences() {
        for (q, (a, b)) in PAIRWISE_ANGLES.iter() {
            let lhs = BigRational::new(BigInt::one(), BigInt::from(*q));
            let rhs = BigRational::new(BigInt::one(), BigInt::from(*a))
                - BigRational::new(BigInt::one(), BigInt::from(*b));
            assert_eq!(lhs, rhs);
        }
    }

    #[test]
    fn test_inverse_tables_numerically() {
        for (k, v) in ASIN_VALUES.iter() {
            assert_relative_eq!(k.evalf().unwrap_or(f64::NAN).asin(), v.evalf().unwrap_or(0.0), epsilon = 1e-12);
        }
        for (k, v) in ACOS_VALUES.iter() {
            assert_relative_eq!(k.evalf().unwrap_or(f64::NAN).acos(), v.evalf().unwrap_or(0.0), epsilon = 1e-12);
        }
        for (k, v) in ATAN_VALUES.iter() {
            assert_relative_eq!(k.evalf().unwrap_or(f64::NAN).atan(), v.evalf().unwrap_or(0.0), epsilon = 1e-12);
        }
        for (k, v) in ACOT_VALUES.iter() {
            let expected = (1.0 / k.evalf().unwrap_or(f64::NAN)).atan();
            assert_relative_eq!(expected, v.evalf().unwrap_or(0.0), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_lookup_odd() {
        let x = Expr::integer(3).sqrt() / Expr::integer(2);
        assert_eq!(lookup_odd(&ASIN_VALUES, &x), Some(Expr::pi() / Expr::integer(3)));
        assert_eq!(lookup_odd(&ASIN_VALUES, &-x), Some(-Expr::pi() / Expr::integer(3)));
        assert_eq!(lookup_odd(&ASIN_VALUES, &Expr::symbol("x")), None);
    }

    #[test]
    fn test_half_angle_sign() {
        assert_eq!(half_angle_sign(&BigRational::new(1.into(), 4.into())), Expr::one());
        assert_eq!(half_angle_sign(&BigRational::new(3.into(), 4.into())), Expr::neg_one());
        assert_eq!(half_angle_sign(&BigRational::new(5.into(), 4.into())), Expr::neg_one());
        assert_eq!(half_angle_sign(&BigRational::new(7.into(), 4.into())), Expr::one());
    }

    #[test]
    fn test_cos_as_radical_fermat_product() {
        // 15 = 3*5
        let v = cos_as_radical(&(Expr::pi() / Expr::integer(15))).unwrap_or(Expr::NaN);
        assert!(!v.has_func(Function::cos));
        assert_relative_eq!(
            v.evalf().unwrap_or(f64::NAN),
            (std::f64::consts::PI / 15.0).cos(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_cos_as_radical_seventeen() {
        let v = cos_as_radical(&(Expr::integer(2) * Expr::pi() / Expr::integer(17))).unwrap_or(Expr::NaN);
        assert!(!v.has_func(Function::cos));
        assert_relative_eq!(
            v.evalf().unwrap_or(f64::NAN),
            (2.0 * std::f64::consts::PI / 17.0).cos(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_cos_as_radical_unlisted_denominator() {
        let v = cos_as_radical(&(Expr::pi() / Expr::integer(7))).unwrap_or(Expr::NaN);
        assert!(v.has_func(Function::cos));
    }

    /// Denominators of the `pi` coefficients of every `sin`/`cos` argument in `e`.
    fn trig_denominators(e: &Expr, out: &mut Vec<BigInt>) {
        match e {
            Expr::Func(f, args) => {
                if matches!(f, Function::sin | Function::cos) {
                    let c = args.first().and_then(|a| pi_coeff(a, 1));
                    match c.as_ref().and_then(|c| c.as_rational()) {
                        Some(r) => out.push(r.denom().clone()),
                        None => out.push(BigInt::from(0)),
                    }
                }
                args.iter().for_each(|a| trig_denominators(a, out));
            }
            Expr::Pow(b, x) => {
                trig_denominators(b, out);
                trig_denominators(x, out);
            }
            Expr::Add(args) | Expr::Mul(args) => args.iter().for_each(|a| trig_denominators(a, out)),
            _ => {}
        }
    }

    #[test]
    fn test_halving_to_radicals() {
        let a = angle(1, 16);
        let e = Expr::func_unevaluated(Function::cos, vec![a.clone()]).rewrite(RewriteTarget::sqrt);
        assert!(!e.has_func(Function::cos), "{}", e);
        assert!(!e.has_func(Function::sin), "{}", e);
        assert_relative_eq!(e.evalf().unwrap_or(f64::NAN), (std::f64::consts::PI / 16.0).cos(), epsilon = 1e-12);
        let e = cos_as_radical(&angle(3, 16)).unwrap_or(Expr::NaN);
        assert!(!e.has_func(Function::cos), "{}", e);
        assert_relative_eq!(e.evalf().unwrap_or(f64::NAN), (3.0 * std::f64::consts::PI / 16.0).cos(), epsilon = 1e-12);
    }

    #[test]
    fn test_prime_power_split() {
        let a = angle(1, 21);
        let e = Expr::func_unevaluated(Function::cos, vec![a]).rewrite(RewriteTarget::sqrt);
        assert!(e.free_symbols().is_empty(), "{}", e);
        let mut dens = Vec::new();
        trig_denominators(&e, &mut dens);
        assert!(!dens.is_empty(), "{}", e);
        for d in dens {
            assert!(d == BigInt::from(1) || d == BigInt::from(3) || d == BigInt::from(7), "{} in {}", d, e);
        }
        assert_relative_eq!(e.evalf().unwrap_or(f64::NAN), (std::f64::consts::PI / 21.0).cos(), epsilon = 1e-12);
    }

    #[test]
    fn test_single_prime_power_stays_unevaluated() {
        let e = Expr::func_unevaluated(Function::cos, vec![angle(1, 9)]);
        let rewritten = e.rewrite(RewriteTarget::sqrt);
        assert_eq!(rewritten, e);
        assert!(matches!(rewritten, Expr::Func(Function::cos, _)));
    }
}
