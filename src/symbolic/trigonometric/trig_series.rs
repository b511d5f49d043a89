//! Taylor terms about zero for the circular functions and their inverses.
//!
//! `taylor_term(f, n, x, previous)` is the `x**n` term of the expansion of `f(x)`, `None`
//! for a function without a series formula here. `previous` may hold the terms of orders
//! `0..n` (zeros included); when it does, the functions with a two-step recurrence (`sin`,
//! `cos`, `asin`, `acos`) use it instead of the closed formula. Terms from the closed
//! formula are memoised per `(f, n, x)` unless `memoize_series` is off; recurrence results
//! depend on the caller's `previous` and are never stored.

use crate::global::config;
use crate::symbolic::symbolic_engine::{Expr, Function};
use crate::symbolic::utils::{bernoulli, euler, factorial, rising_factorial};
use log::trace;
use num::{BigInt, BigRational, One};
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

type SeriesKey = (Function, i64, Expr);

static SERIES_CACHE: LazyLock<Mutex<HashMap<SeriesKey, Expr>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

pub fn taylor_term(f: Function, n: i64, x: &Expr, previous: &[Expr]) -> Option<Expr> {
    let memoize = config().memoize_series;
    let key = (f, n, x.clone());
    if memoize {
        if let Ok(cache) = SERIES_CACHE.lock() {
            if let Some(term) = cache.get(&key) {
                trace!("series cache hit for {} order {}", f, n);
                return Some(term.clone());
            }
        }
    }
    let recurrent = has_recurrence(f) && two_back(n, previous).is_some();
    let term = compute_term(f, n, x, previous)?;
    if memoize && !recurrent {
        if let Ok(mut cache) = SERIES_CACHE.lock() {
            cache.insert(key, term.clone());
        }
    }
    Some(term)
}

/// First `count` terms `f(x)` about zero, orders `0..count`.
pub fn taylor_terms(f: Function, x: &Expr, count: usize) -> Option<Vec<Expr>> {
    let mut terms: Vec<Expr> = Vec::with_capacity(count);
    for n in 0..count as i64 {
        let t = taylor_term(f, n, x, &terms)?;
        terms.push(t);
    }
    Some(terms)
}

pub fn is_cached(f: Function, n: i64, x: &Expr) -> bool {
    SERIES_CACHE
        .lock()
        .map(|cache| cache.contains_key(&(f, n, x.clone())))
        .unwrap_or(false)
}

pub fn clear_series_cache() {
    if let Ok(mut cache) = SERIES_CACHE.lock() {
        cache.clear();
    }
}

fn rat(n: BigInt) -> BigRational {
    BigRational::from_integer(n)
}

fn alternating(k: i64) -> BigRational {
    if k.rem_euclid(2) == 0 { BigRational::one() } else { -BigRational::one() }
}

fn monomial(c: BigRational, x: &Expr, n: i64) -> Expr {
    Expr::from_rational(c) * x.clone().pow(Expr::integer(n))
}

fn has_recurrence(f: Function) -> bool {
    matches!(f, Function::sin | Function::cos | Function::asin | Function::acos)
}

/// Term of order `n - 2` when `previous` lists every order below `n`.
fn two_back(n: i64, previous: &[Expr]) -> Option<&Expr> {
    if n > 2 && previous.len() == n as usize {
        previous.get(previous.len() - 2)
    } else {
        None
    }
}

fn compute_term(f: Function, n: i64, x: &Expr, previous: &[Expr]) -> Option<Expr> {
    let term = match f {
        Function::sin => {
            if n < 0 || n % 2 == 0 {
                return Some(Expr::zero());
            }
            if let Some(p) = two_back(n, previous) {
                let x2 = x.clone().pow(Expr::integer(2));
                return Some(-p.clone() * x2 / Expr::integer(n * (n - 1)));
            }
            monomial(alternating((n - 1) / 2) / rat(factorial(n as u64)), x, n)
        }
        Function::cos => {
            if n < 0 || n % 2 == 1 {
                return Some(Expr::zero());
            }
            if let Some(p) = two_back(n, previous) {
                let x2 = x.clone().pow(Expr::integer(2));
                return Some(-p.clone() * x2 / Expr::integer(n * (n - 1)));
            }
            monomial(alternating(n / 2) / rat(factorial(n as u64)), x, n)
        }
        Function::tan => {
            if n < 0 || n % 2 == 0 {
                return Some(Expr::zero());
            }
            let a = (n - 1) / 2;
            let b = rat(BigInt::one() << (n + 1) as usize);
            let c = alternating(a) * b.clone() * (b - BigRational::one()) * bernoulli(n as u64 + 1)
                / rat(factorial(n as u64 + 1));
            monomial(c, x, n)
        }
        Function::sec => {
            if n < 0 || n % 2 == 1 {
                return Some(Expr::zero());
            }
            let k = n / 2;
            let c = alternating(k) * rat(euler(2 * k as u64)) / rat(factorial(2 * k as u64));
            monomial(c, x, 2 * k)
        }
        Function::csc => {
            if n == 0 {
                return Some(Expr::one() / x.clone());
            }
            if n < 0 || n % 2 == 0 {
                return Some(Expr::zero());
            }
            let k = n / 2 + 1;
            let two_pow = rat(BigInt::one() << (2 * k - 1) as usize);
            let c = alternating(k - 1)
                * rat(BigInt::from(2))
                * (two_pow - BigRational::one())
                * bernoulli(2 * k as u64)
                / rat(factorial(2 * k as u64));
            monomial(c, x, 2 * k - 1)
        }
        Function::asin | Function::acos => {
            if f == Function::acos && n == 0 {
                return Some(Expr::pi() / Expr::integer(2));
            }
            if n < 0 || n % 2 == 0 {
                return Some(Expr::zero());
            }
            if let Some(p) = two_back(n, previous) {
                let c = BigRational::new(BigInt::from((n - 2) * (n - 2)), BigInt::from(n * (n - 1)));
                return Some(p.clone() * Expr::from_rational(c) * x.clone().pow(Expr::integer(2)));
            }
            let k = ((n - 1) / 2) as u64;
            let half = BigRational::new(BigInt::one(), BigInt::from(2));
            let mut c = rising_factorial(&half, k) / rat(factorial(k)) / rat(BigInt::from(n));
            if f == Function::acos {
                c = -c;
            }
            monomial(c, x, n)
        }
        Function::atan => {
            if n < 0 || n % 2 == 0 {
                return Some(Expr::zero());
            }
            monomial(alternating((n - 1) / 2) / rat(BigInt::from(n)), x, n)
        }
        Function::acot => {
            if n == 0 {
                return Some(Expr::pi() / Expr::integer(2));
            }
            if n < 0 || n % 2 == 0 {
                return Some(Expr::zero());
            }
            monomial(alternating((n + 1) / 2) / rat(BigInt::from(n)), x, n)
        }
        _ => {
            trace!("no Taylor formula for {}", f);
            return None;
        }
    };
    Some(term)
}

/// Sum of the terms of orders `0..count`.
pub fn taylor_polynomial(f: Function, x: &Expr, count: usize) -> Option<Expr> {
    let terms: Vec<Expr> = taylor_terms(f, x, count)?
        .into_iter()
        .filter(|t| !t.is_zero_literal())
        .collect();
    Some(Expr::add_all(terms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    fn term(c: Expr, n: i64) -> Expr {
        c * x().pow(Expr::integer(n))
    }

    #[test]
    fn test_sine_and_cosine_terms() {
        let x = x();
        assert_eq!(taylor_term(Function::sin, 1, &x, &[]).unwrap(), x.clone());
        assert_eq!(taylor_term(Function::sin, 3, &x, &[]).unwrap(), term(Expr::rational(-1, 6), 3));
        assert_eq!(taylor_term(Function::sin, 4, &x, &[]).unwrap(), Expr::zero());
        assert_eq!(taylor_term(Function::cos, 0, &x, &[]).unwrap(), Expr::one());
        assert_eq!(taylor_term(Function::cos, 4, &x, &[]).unwrap(), term(Expr::rational(1, 24), 4));
        assert_eq!(taylor_term(Function::cos, -2, &x, &[]).unwrap(), Expr::zero());
    }

    #[test]
    fn test_recurrence_agrees_with_formula() {
        let y = Expr::symbol("y_recurrence");
        for f in [Function::sin, Function::cos, Function::asin, Function::acos] {
            let listed = taylor_terms(f, &y, 9).unwrap();
            for (n, t) in listed.iter().enumerate() {
                assert_eq!(Some(t.clone()), compute_term(f, n as i64, &y, &[]), "{} order {}", f, n);
            }
        }
    }

    #[test]
    fn test_tangent_family() {
        let x = x();
        assert_eq!(taylor_term(Function::tan, 1, &x, &[]).unwrap(), x.clone());
        assert_eq!(taylor_term(Function::tan, 3, &x, &[]).unwrap(), term(Expr::rational(1, 3), 3));
        assert_eq!(taylor_term(Function::tan, 5, &x, &[]).unwrap(), term(Expr::rational(2, 15), 5));
        assert_eq!(taylor_term(Function::sec, 2, &x, &[]).unwrap(), term(Expr::rational(1, 2), 2));
        assert_eq!(taylor_term(Function::sec, 4, &x, &[]).unwrap(), term(Expr::rational(5, 24), 4));
        assert_eq!(taylor_term(Function::csc, 0, &x, &[]).unwrap(), Expr::one() / x.clone());
        assert_eq!(taylor_term(Function::csc, 1, &x, &[]).unwrap(), term(Expr::rational(1, 6), 1));
        assert_eq!(taylor_term(Function::csc, 3, &x, &[]).unwrap(), term(Expr::rational(7, 360), 3));
    }

    #[test]
    fn test_inverse_terms() {
        let x = x();
        assert_eq!(taylor_term(Function::asin, 3, &x, &[]).unwrap(), term(Expr::rational(1, 6), 3));
        assert_eq!(taylor_term(Function::asin, 5, &x, &[]).unwrap(), term(Expr::rational(3, 40), 5));
        assert_eq!(taylor_term(Function::acos, 0, &x, &[]).unwrap(), Expr::pi() / Expr::integer(2));
        assert_eq!(taylor_term(Function::acos, 1, &x, &[]).unwrap(), -x.clone());
        assert_eq!(taylor_term(Function::atan, 3, &x, &[]).unwrap(), term(Expr::rational(-1, 3), 3));
        assert_eq!(taylor_term(Function::acot, 1, &x, &[]).unwrap(), -x.clone());
        assert_eq!(taylor_term(Function::acot, 3, &x, &[]).unwrap(), term(Expr::rational(1, 3), 3));
    }

    #[test]
    fn test_polynomial_approximates_function() {
        let t = Expr::symbol("t_poly");
        let poly = taylor_polynomial(Function::sin, &t, 12).unwrap();
        let at = poly.subs(&t, &Expr::rational(1, 2)).evalf().unwrap_or(f64::NAN);
        assert_relative_eq!(at, 0.5f64.sin(), epsilon = 1e-9);
        let poly = taylor_polynomial(Function::atan, &t, 30).unwrap();
        let at = poly.subs(&t, &Expr::rational(1, 4)).evalf().unwrap_or(f64::NAN);
        assert_relative_eq!(at, 0.25f64.atan(), epsilon = 1e-12);
    }

    #[test]
    fn test_memoisation() {
        let z = Expr::symbol("z_memo");
        let first = taylor_term(Function::tan, 7, &z, &[]).unwrap();
        assert!(is_cached(Function::tan, 7, &z));
        assert_eq!(taylor_term(Function::tan, 7, &z, &[]).unwrap(), first);
    }

    #[test]
    fn test_function_without_formula() {
        let w = Expr::symbol("w_none");
        for f in [Function::cot, Function::asec, Function::acsc, Function::exp] {
            assert_eq!(taylor_term(f, 3, &w, &[]), None, "{}", f);
            assert!(!is_cached(f, 3, &w));
            assert_eq!(taylor_terms(f, &w, 4), None);
            assert_eq!(taylor_polynomial(f, &w, 4), None);
        }
    }

    #[test]
    fn test_recurrence_result_is_not_stored() {
        let v = Expr::symbol("v_recurrence");
        // a wrong order-1 term drives the recurrence to a wrong order-3 term
        let wrong = vec![Expr::zero(), Expr::integer(5) * v.clone(), Expr::zero()];
        let skewed = taylor_term(Function::sin, 3, &v, &wrong).unwrap();
        assert_eq!(skewed, term_in(Expr::rational(-5, 6), &v, 3));
        assert!(!is_cached(Function::sin, 3, &v));
        assert_eq!(
            taylor_term(Function::sin, 3, &v, &[]).unwrap(),
            term_in(Expr::rational(-1, 6), &v, 3)
        );
    }

    fn term_in(c: Expr, v: &Expr, n: i64) -> Expr {
        c * v.clone().pow(Expr::integer(n))
    }
}
