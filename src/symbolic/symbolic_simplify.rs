//! # Canonical Construction Module
//!
//! Every arithmetic node of the engine is produced by one of three constructors in this
//! module: `Expr::add_all`, `Expr::mul_all` and `Expr::pow`. Each returns the canonical form
//! of its result, so that two expressions denoting the same value through the same
//! operations compare structurally equal.
//!
//! ## Canonical Form
//!
//! 1. **Flattening**: nested sums and products are spliced into their parent
//! 2. **Constant Folding**: exact rationals are folded with `BigRational` arithmetic, never
//!    through floating point
//! 3. **Like Term Collection**: `3*x + 2*x` becomes `5*x`, `x*x` becomes `x**2`
//! 4. **Radical Normalisation**: `sqrt(8)` becomes `2*sqrt(2)`, `1/sqrt(2)` becomes
//!    `sqrt(2)/2`, `sqrt(2)*sqrt(3)` becomes `sqrt(6)`
//! 5. **Ordering**: operands are sorted with the derived `Ord`, numbers first
//!
//! ## Other Key Methods
//!
//! - `expand`: distributes products over sums and multiplies out integer powers of sums
//! - `subs` / `xreplace`: structural replacement followed by re-canonicalisation
//! - `has`: structural containment test

use crate::symbolic::symbolic_engine::{Expr, Function};
use crate::symbolic::utils::factorint;
use num::{BigInt, BigRational, Integer, One, Signed, ToPrimitive, Zero};
use std::collections::BTreeMap;

/// Integer powers of exact numbers above this magnitude stay unevaluated.
const MAX_INTEGER_POWER: usize = 10_000;
/// Positive integer powers of sums above this stay unexpanded.
const MAX_EXPAND_POWER: usize = 64;

impl Expr {
    //___________________________________ADDITION____________________________________

    /// Canonical sum of the given terms.
    ///
    /// ## Algorithm
    ///
    /// 1. **Flatten**: terms that are sums are spliced in
    /// 2. **Split**: each term is split into rational coefficient and remainder
    /// 3. **Collect**: coefficients of equal remainders are added in a `BTreeMap`
    /// 4. **Infinities**: `oo - oo` and `zoo + oo` are `nan`; an infinity absorbs numbers
    /// 5. **Rebuild**: zero coefficients are dropped, the rest sorted
    pub fn add_all(args: Vec<Expr>) -> Expr {
        let mut flat = Vec::with_capacity(args.len());
        for a in args {
            match a {
                Expr::Add(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }

        let mut constant = BigRational::zero();
        let mut float: Option<f64> = None;
        let mut terms: BTreeMap<Expr, BigRational> = BTreeMap::new();
        let (mut pos_inf, mut neg_inf, mut cplx_inf) = (false, false, false);
        for term in flat {
            match term {
                Expr::Number(r) => constant += r,
                Expr::Float(x) => *float.get_or_insert(0.0) += x.0,
                Expr::NaN => return Expr::NaN,
                Expr::Infinity => pos_inf = true,
                Expr::NegativeInfinity => neg_inf = true,
                Expr::ComplexInfinity => cplx_inf = true,
                other => {
                    let (c, rest) = other.as_coeff_Mul();
                    *terms.entry(rest).or_insert_with(BigRational::zero) += c;
                }
            }
        }
        if (pos_inf && neg_inf) || (cplx_inf && (pos_inf || neg_inf)) {
            return Expr::NaN;
        }

        let mut out: Vec<Expr> = Vec::with_capacity(terms.len() + 1);
        for (rest, c) in terms {
            if c.is_zero() {
                continue;
            }
            if c.is_one() {
                out.push(rest);
            } else {
                out.push(Expr::mul_all(vec![Expr::Number(c), rest]));
            }
        }

        let infinity = if cplx_inf {
            Some(Expr::ComplexInfinity)
        } else if pos_inf {
            Some(Expr::Infinity)
        } else if neg_inf {
            Some(Expr::NegativeInfinity)
        } else {
            None
        };
        match infinity {
            Some(inf) => {
                if out.iter().all(|t| t.is_number()) {
                    return inf;
                }
                out.push(inf);
            }
            None => {
                if let Some(f) = float {
                    out.push(Expr::float(f + constant.to_f64().unwrap_or(f64::NAN)));
                } else if !constant.is_zero() {
                    out.push(Expr::Number(constant));
                }
            }
        }

        match out.len() {
            0 => Expr::zero(),
            1 => out.pop().unwrap_or_else(Expr::zero),
            _ => {
                out.sort();
                Expr::Add(out)
            }
        }
    }

    //___________________________________MULTIPLICATION____________________________________

    /// Canonical product of the given factors.
    ///
    /// ## Algorithm
    ///
    /// 1. **Flatten**: factors that are products are spliced in
    /// 2. **Fold**: rationals multiply into one coefficient; a zero factor yields zero
    /// 3. **Collect**: equal bases add their exponents (`x*x**2 = x**3`, `I*I = -1`)
    /// 4. **Radicals**: positive rational bases under the same fractional exponent merge
    /// 5. **Repeat**: when a collected power folds into something new the pass reruns
    /// 6. **Distribute**: a rational coefficient times a single sum is distributed
    pub fn mul_all(args: Vec<Expr>) -> Expr {
        let mut flat = Vec::with_capacity(args.len());
        for a in args {
            match a {
                Expr::Mul(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }

        let mut coeff = BigRational::one();
        let mut float: Option<f64> = None;
        let mut zero = false;
        let (mut infinite, mut cplx_inf) = (false, false);
        let mut powers: BTreeMap<Expr, Vec<Expr>> = BTreeMap::new();
        for factor in flat {
            match factor {
                Expr::Number(r) => {
                    if r.is_zero() {
                        zero = true;
                    } else {
                        coeff *= r;
                    }
                }
                Expr::Float(x) => {
                    if x.0 == 0.0 {
                        zero = true;
                    }
                    *float.get_or_insert(1.0) *= x.0;
                }
                Expr::NaN => return Expr::NaN,
                Expr::Infinity => infinite = true,
                Expr::NegativeInfinity => {
                    infinite = true;
                    coeff = -coeff;
                }
                Expr::ComplexInfinity => cplx_inf = true,
                Expr::Pow(b, e) => powers.entry(*b).or_default().push(*e),
                other => powers.entry(other).or_default().push(Expr::one()),
            }
        }
        if zero {
            if infinite || cplx_inf {
                return Expr::NaN;
            }
            return if float.is_some() { Expr::float(0.0) } else { Expr::zero() };
        }

        let mut changed = false;
        let mut out: Vec<Expr> = Vec::with_capacity(powers.len());
        for (base, exps) in powers {
            let p = if exps.len() == 1 && exps[0].is_one_literal() {
                base
            } else if exps.len() == 1 {
                Expr::Pow(base.boxed(), exps[0].clone().boxed())
            } else {
                let exp = Expr::add_all(exps);
                let p = Expr::pow(base.clone(), exp);
                let stable = match &p {
                    Expr::Pow(b, _) => **b == base,
                    Expr::Number(_) | Expr::Float(_) | Expr::Mul(_) => false,
                    other => *other == base,
                };
                if !stable {
                    changed = true;
                }
                p
            };
            out.push(p);
        }

        // numeric radicals sharing an exponent merge into one radicand
        let mut radicals: BTreeMap<BigRational, Vec<BigRational>> = BTreeMap::new();
        let mut rest = Vec::with_capacity(out.len());
        for f in out {
            match numeric_radical(&f) {
                Some((b, e)) => radicals.entry(e).or_default().push(b),
                None => rest.push(f),
            }
        }
        for (e, bases) in radicals {
            if bases.len() > 1 {
                changed = true;
                let product = bases.into_iter().fold(BigRational::one(), |acc, b| acc * b);
                rest.push(Expr::pow(Expr::Number(product), Expr::Number(e)));
            } else {
                for b in bases {
                    rest.push(Expr::Pow(Expr::Number(b).boxed(), Expr::Number(e.clone()).boxed()));
                }
            }
        }
        let mut out = rest;

        if changed {
            let mut again = out;
            again.push(Expr::Number(coeff));
            if let Some(f) = float {
                again.push(Expr::float(f));
            }
            if infinite {
                again.push(Expr::Infinity);
            }
            if cplx_inf {
                again.push(Expr::ComplexInfinity);
            }
            return Expr::mul_all(again);
        }

        if cplx_inf {
            if out.is_empty() {
                return Expr::ComplexInfinity;
            }
            out.push(Expr::ComplexInfinity);
            coeff = BigRational::one();
        }
        if infinite {
            let inf = if coeff.is_negative() { Expr::NegativeInfinity } else { Expr::Infinity };
            if out.is_empty() && float.is_none() {
                return inf;
            }
            out.push(inf);
            coeff = BigRational::one();
        }
        if let Some(f) = float {
            let value = f * coeff.to_f64().unwrap_or(f64::NAN);
            if out.is_empty() {
                return Expr::float(value);
            }
            out.sort();
            out.insert(0, Expr::float(value));
            return Expr::Mul(out);
        }

        if out.len() == 1 && !coeff.is_one() {
            if let Expr::Add(terms) = &out[0] {
                let distributed = terms
                    .iter()
                    .map(|t| Expr::mul_all(vec![Expr::Number(coeff.clone()), t.clone()]))
                    .collect();
                return Expr::add_all(distributed);
            }
        }

        out.sort();
        if !coeff.is_one() {
            out.insert(0, Expr::Number(coeff));
        }
        match out.len() {
            0 => Expr::one(),
            1 => out.pop().unwrap_or_else(Expr::one),
            _ => Expr::Mul(out),
        }
    }

    //___________________________________POWER____________________________________

    /// Canonical power `self ** exp`.
    ///
    /// Exact numeric powers are evaluated: integer powers exactly, rational powers by
    /// extracting perfect powers from the radicand and rationalising negative exponents.
    /// `(-a)**(p/2)` becomes `I**p * a**(p/2)`, `I**n` cycles, `(-1)**n` resolves by the
    /// parity of `n`, `(b**e)**n` and `(a*b)**n` distribute for integer `n`.
    pub fn pow(self, exp: Expr) -> Expr {
        let base = self;
        if exp.is_zero_literal() {
            return Expr::one();
        }
        if exp.is_one_literal() {
            return base;
        }
        if matches!(base, Expr::NaN) || matches!(exp, Expr::NaN) {
            return Expr::NaN;
        }
        match (&base, &exp) {
            (Expr::Number(a), Expr::Number(r)) => return numeric_pow(a, r),
            (Expr::Float(a), Expr::Number(r)) => {
                if a.0 >= 0.0 || r.is_integer() {
                    return Expr::float(a.0.powf(r.to_f64().unwrap_or(f64::NAN)));
                }
            }
            (Expr::Float(a), Expr::Float(r)) if a.0 >= 0.0 => {
                return Expr::float(a.0.powf(r.0));
            }
            (Expr::Number(a), Expr::Float(r)) if a.is_positive() => {
                return Expr::float(a.to_f64().unwrap_or(f64::NAN).powf(r.0));
            }
            _ => {}
        }
        if base.is_one_literal() {
            return match exp {
                Expr::Infinity | Expr::NegativeInfinity | Expr::ComplexInfinity => Expr::NaN,
                _ => Expr::one(),
            };
        }

        match &base {
            Expr::ImaginaryUnit => {
                if let Some(n) = exp.as_integer() {
                    let n = n.mod_floor(&BigInt::from(4)).to_u8().unwrap_or(0);
                    return match n {
                        0 => Expr::one(),
                        1 => Expr::ImaginaryUnit,
                        2 => Expr::neg_one(),
                        _ => Expr::Mul(vec![Expr::neg_one(), Expr::ImaginaryUnit]),
                    };
                }
            }
            Expr::ComplexInfinity | Expr::Infinity => {
                if let Expr::Number(r) = &exp {
                    return if r.is_positive() { base.clone() } else { Expr::zero() };
                }
            }
            Expr::Number(a) if a.is_zero() => {
                if let Expr::Number(r) = &exp {
                    return if r.is_positive() { Expr::zero() } else { Expr::ComplexInfinity };
                }
            }
            Expr::Number(a) if *a == -BigRational::one() => {
                if exp.is_even().is_true() {
                    return Expr::one();
                }
                if exp.is_odd().is_true() {
                    return Expr::neg_one();
                }
            }
            Expr::Pow(b, e) => {
                if exp.as_integer().is_some() {
                    let new_exp = Expr::mul_all(vec![(**e).clone(), exp]);
                    return Expr::pow((**b).clone(), new_exp);
                }
            }
            Expr::Mul(factors) => {
                if exp.as_integer().is_some() {
                    let powered = factors
                        .iter()
                        .map(|f| Expr::pow(f.clone(), exp.clone()))
                        .collect();
                    return Expr::mul_all(powered);
                }
                if let Expr::Number(r) = &exp {
                    // (c*x)**r = c**r * x**r for the exact coefficient c
                    let (c, rest) = base.as_coeff_Mul();
                    if c.is_positive() && !c.is_one() {
                        return Expr::mul_all(vec![numeric_pow(&c, r), Expr::pow(rest, exp.clone())]);
                    }
                    if c.is_negative() && c != -BigRational::one() {
                        return Expr::mul_all(vec![
                            numeric_pow(&-c, r),
                            Expr::pow(-rest, exp.clone()),
                        ]);
                    }
                }
            }
            _ => {}
        }
        Expr::Pow(base.boxed(), exp.boxed())
    }

    //___________________________________DECOMPOSITION____________________________________

    /// Splits off the exact rational coefficient of a product.
    ///
    /// `3*x*y` gives `(3, x*y)`, `x` gives `(1, x)`, `5` gives `(5, 1)`.
    #[allow(non_snake_case)]
    pub fn as_coeff_Mul(&self) -> (BigRational, Expr) {
        match self {
            Expr::Number(r) => (r.clone(), Expr::one()),
            Expr::Mul(args) => match args.first() {
                Some(Expr::Number(c)) => {
                    let rest = if args.len() == 2 {
                        args[1].clone()
                    } else {
                        Expr::Mul(args[1..].to_vec())
                    };
                    (c.clone(), rest)
                }
                _ => (BigRational::one(), self.clone()),
            },
            _ => (BigRational::one(), self.clone()),
        }
    }

    /// First term and the sum of the remaining terms.
    pub fn as_two_terms(&self) -> (Expr, Expr) {
        match self {
            Expr::Add(args) if args.len() >= 2 => {
                let rest = Expr::add_all(args[1..].to_vec());
                (args[0].clone(), rest)
            }
            _ => (self.clone(), Expr::zero()),
        }
    }

    //___________________________________EXPANSION____________________________________

    /// Distributes products over sums and multiplies out positive integer powers of sums,
    /// recursively through every argument including function arguments.
    pub fn expand(&self) -> Expr {
        match self {
            Expr::Add(args) => Expr::add_all(args.iter().map(|a| a.expand()).collect()),
            Expr::Mul(args) => distribute(args.iter().map(|a| a.expand()).collect()),
            Expr::Pow(b, e) => {
                let base = b.expand();
                let exp = e.expand();
                if let (Expr::Add(_), Some(n)) = (&base, exp.as_integer()) {
                    let m = n.abs().to_usize().unwrap_or(usize::MAX);
                    if m >= 2 && m <= MAX_EXPAND_POWER {
                        let mut acc = base.clone();
                        for _ in 1..m {
                            acc = distribute(vec![acc, base.clone()]);
                        }
                        return if n.is_negative() {
                            Expr::pow(acc, Expr::neg_one())
                        } else {
                            acc
                        };
                    }
                }
                let p = Expr::pow(base, exp);
                if p.is_mul() { p.expand() } else { p }
            }
            Expr::Func(f, args) => Expr::apply(*f, args.iter().map(|a| a.expand()).collect(), true),
            _ => self.clone(),
        }
    }

    //___________________________________SUBSTITUTION____________________________________

    /// Rebuilds a node of the same kind from new arguments, canonicalising the result.
    pub fn rebuild(&self, args: Vec<Expr>) -> Expr {
        match self {
            Expr::Add(_) => Expr::add_all(args),
            Expr::Mul(_) => Expr::mul_all(args),
            Expr::Pow(_, _) => match <[Expr; 2]>::try_from(args) {
                Ok([b, e]) => Expr::pow(b, e),
                Err(_) => self.clone(),
            },
            Expr::Func(f, _) => Expr::apply(*f, args, true),
            _ => self.clone(),
        }
    }

    /// Applies `f` to every argument and rebuilds; atoms are returned unchanged.
    pub fn map_args<F: FnMut(&Expr) -> Expr>(&self, f: F) -> Expr {
        match self {
            Expr::Add(_) | Expr::Mul(_) | Expr::Pow(_, _) | Expr::Func(_, _) => {
                let args = self.args().iter().map(f).collect();
                self.rebuild(args)
            }
            _ => self.clone(),
        }
    }

    /// Replaces every occurrence of `old` by `new`, then re-canonicalises.
    pub fn subs(&self, old: &Expr, new: &Expr) -> Expr {
        if self == old {
            return new.clone();
        }
        self.map_args(|a| a.subs(old, new))
    }

    /// Simultaneous structural replacement.
    pub fn xreplace(&self, rules: &BTreeMap<Expr, Expr>) -> Expr {
        if let Some(v) = rules.get(self) {
            return v.clone();
        }
        self.map_args(|a| a.xreplace(rules))
    }

    pub fn has(&self, pattern: &Expr) -> bool {
        if self == pattern {
            return true;
        }
        match self {
            Expr::Pow(b, e) => b.has(pattern) || e.has(pattern),
            Expr::Add(args) | Expr::Mul(args) | Expr::Func(_, args) => {
                args.iter().any(|a| a.has(pattern))
            }
            _ => false,
        }
    }

    /// Whether any node below is an application of `f`.
    pub fn has_func(&self, f: Function) -> bool {
        match self {
            Expr::Func(g, args) => *g == f || args.iter().any(|a| a.has_func(f)),
            Expr::Pow(b, e) => b.has_func(f) || e.has_func(f),
            Expr::Add(args) | Expr::Mul(args) => args.iter().any(|a| a.has_func(f)),
            _ => false,
        }
    }
}

fn distribute(factors: Vec<Expr>) -> Expr {
    let mut terms: Vec<Expr> = vec![Expr::one()];
    for f in factors {
        let f_terms = f.make_add_args();
        let mut next = Vec::with_capacity(terms.len() * f_terms.len());
        for t in &terms {
            for u in &f_terms {
                next.push(Expr::mul_all(vec![t.clone(), u.clone()]));
            }
        }
        terms = next;
    }
    Expr::add_all(terms)
}

/// `b**e` with positive rational `b` and non-integer rational `e`.
fn numeric_radical(e: &Expr) -> Option<(BigRational, BigRational)> {
    match e {
        Expr::Pow(b, x) => match (b.as_ref(), x.as_ref()) {
            (Expr::Number(b), Expr::Number(x)) if b.is_positive() && !x.is_integer() => {
                Some((b.clone(), x.clone()))
            }
            _ => None,
        },
        _ => None,
    }
}

pub(crate) fn rational_powi(a: &BigRational, n: &BigInt) -> Option<BigRational> {
    let e = n.abs().to_usize()?;
    if e > MAX_INTEGER_POWER {
        return None;
    }
    let base = if n.is_negative() {
        if a.is_zero() {
            return None;
        }
        a.recip()
    } else {
        a.clone()
    };
    Some(num::pow(base, e))
}

fn numeric_pow(a: &BigRational, r: &BigRational) -> Expr {
    let literal = || Expr::Pow(Expr::Number(a.clone()).boxed(), Expr::Number(r.clone()).boxed());
    if a.is_zero() {
        return if r.is_negative() { Expr::ComplexInfinity } else { Expr::zero() };
    }
    if r.is_integer() {
        return match rational_powi(a, r.numer()) {
            Some(v) => Expr::Number(v),
            None => literal(),
        };
    }
    if a.is_one() {
        return Expr::one();
    }
    if a.is_negative() {
        if *a == -BigRational::one() {
            return neg_one_pow(r);
        }
        return Expr::mul_all(vec![neg_one_pow(r), numeric_pow(&-a, r)]);
    }
    if !a.denom().is_one() {
        return Expr::mul_all(vec![
            integer_pow(a.numer(), r),
            integer_pow(a.denom(), &-r),
        ]);
    }
    integer_pow(a.numer(), r)
}

/// `(-1)**(p/q)` for non-integer exponent.
fn neg_one_pow(r: &BigRational) -> Expr {
    let q = r.denom().clone();
    let p = r.numer().mod_floor(&(BigInt::from(2) * &q));
    if q == BigInt::from(2) {
        return Expr::pow(Expr::ImaginaryUnit, Expr::big_integer(p));
    }
    Expr::Pow(
        Expr::neg_one().boxed(),
        Expr::Number(BigRational::new(p, q)).boxed(),
    )
}

/// `n**r` for a positive integer `n` and non-integer rational `r`.
fn integer_pow(n: &BigInt, r: &BigRational) -> Expr {
    let literal = || {
        Expr::Pow(
            Expr::big_integer(n.clone()).boxed(),
            Expr::Number(r.clone()).boxed(),
        )
    };
    if n.is_one() {
        return Expr::one();
    }
    let k = r.floor();
    let frac = r - &k;
    let int_part = match rational_powi(&BigRational::from_integer(n.clone()), k.numer()) {
        Some(v) => v,
        None => return literal(),
    };
    match radical(n, &frac) {
        Some((outside, rad)) => Expr::mul_all(vec![
            Expr::Number(int_part * BigRational::from_integer(outside)),
            rad,
        ]),
        None => literal(),
    }
}

/// Perfect-power extraction: `n**(s/q) = outside * base**(h/q')` with the integer
/// `outside` maximal and `h/q'` in lowest terms.
fn radical(n: &BigInt, frac: &BigRational) -> Option<(BigInt, Expr)> {
    let s = frac.numer().to_u64()?;
    let q = frac.denom().to_u64()?;
    let mut outside = BigInt::one();
    let mut rems: Vec<(BigInt, u64)> = Vec::new();
    for (p, e) in factorint(n) {
        let t = (e as u64).checked_mul(s)?;
        let whole = usize::try_from(t / q).ok()?;
        outside *= num::pow(p.clone(), whole);
        let rem = t % q;
        if rem > 0 {
            rems.push((p, rem));
        }
    }
    if rems.is_empty() {
        return Some((outside, Expr::one()));
    }
    let g = rems.iter().fold(q, |g, (_, r)| num::integer::gcd(g, *r));
    let q2 = q / g;
    let h = rems.iter().fold(0u64, |h, (_, r)| num::integer::gcd(h, r / g));
    let mut base = BigInt::one();
    for (p, r) in &rems {
        base *= num::pow(p.clone(), usize::try_from(r / g / h).ok()?);
    }
    Some((
        outside,
        Expr::Pow(
            Expr::big_integer(base).boxed(),
            Expr::Number(BigRational::new(BigInt::from(h), BigInt::from(q2))).boxed(),
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqrt_int(n: i64) -> Expr {
        Expr::integer(n).sqrt()
    }

    #[test]
    fn test_like_terms_collect() {
        let x = Expr::symbol("x");
        assert_eq!(x.clone() + x.clone(), Expr::integer(2) * x.clone());
        assert_eq!(x.clone() - x.clone(), Expr::zero());
        assert_eq!(x.clone() * x.clone(), x.clone().pow(Expr::integer(2)));
        assert_eq!(x.clone() / x.clone(), Expr::one());
    }

    #[test]
    fn test_rational_folding() {
        assert_eq!(Expr::half() + Expr::half(), Expr::one());
        assert_eq!(Expr::rational(1, 3) * Expr::integer(3), Expr::one());
        assert_eq!(Expr::integer(7) / Expr::integer(14), Expr::half());
    }

    #[test]
    fn test_radicals_normalise() {
        assert_eq!(sqrt_int(8), Expr::integer(2) * sqrt_int(2));
        assert_eq!(sqrt_int(4), Expr::integer(2));
        assert_eq!(Expr::one() / sqrt_int(2), sqrt_int(2) / Expr::integer(2));
        assert_eq!(sqrt_int(2) * sqrt_int(3), sqrt_int(6));
        assert_eq!(sqrt_int(2) * sqrt_int(2), Expr::integer(2));
        assert_eq!(sqrt_int(6) * sqrt_int(2), Expr::integer(2) * sqrt_int(3));
        assert_eq!(Expr::integer(4).pow(Expr::rational(1, 4)), sqrt_int(2));
        assert_eq!(Expr::integer(8).pow(Expr::rational(2, 3)), Expr::integer(4));
    }

    #[test]
    fn test_negative_radicand() {
        assert_eq!(sqrt_int(-1), Expr::I());
        assert_eq!(sqrt_int(-4), Expr::integer(2) * Expr::I());
        assert_eq!(Expr::I() * Expr::I(), Expr::neg_one());
    }

    #[test]
    fn test_distribution_of_coefficient() {
        let x = Expr::symbol("x");
        let e = Expr::integer(2) * (x.clone() + Expr::one());
        assert_eq!(e, Expr::integer(2) * x.clone() + Expr::integer(2));
        let neg = -(x.clone() - Expr::pi() / Expr::integer(2));
        assert_eq!(neg, Expr::pi() / Expr::integer(2) - x);
    }

    #[test]
    fn test_expand() {
        let x = Expr::symbol("x");
        let e = (x.clone() + Expr::one()).pow(Expr::integer(2));
        let expected = x.clone().pow(Expr::integer(2)) + Expr::integer(2) * x.clone() + Expr::one();
        assert_eq!(e.expand(), expected);
        let e = (sqrt_int(2) + Expr::one()) * (sqrt_int(2) - Expr::one());
        assert_eq!(e.expand(), Expr::one());
    }

    #[test]
    fn test_infinities() {
        assert_eq!(Expr::oo() + Expr::integer(3), Expr::oo());
        assert_eq!(Expr::oo() - Expr::oo(), Expr::NaN);
        assert_eq!(Expr::integer(-2) * Expr::oo(), Expr::NegativeInfinity);
        assert_eq!(Expr::one() / Expr::zero(), Expr::zoo());
    }

    #[test]
    fn test_subs_recanonicalises() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let e = x.clone() + y.clone();
        assert_eq!(e.subs(&y, &x), Expr::integer(2) * x.clone());
        assert!(e.has(&y));
        assert!(!e.subs(&y, &Expr::zero()).has(&y));
    }

    #[test]
    fn test_display() {
        let x = Expr::symbol("x");
        assert_eq!(format!("{}", Expr::pi() / Expr::integer(2)), "pi/2");
        assert_eq!(format!("{}", Expr::integer(3) * Expr::pi() / Expr::integer(4)), "3*pi/4");
        assert_eq!(format!("{}", sqrt_int(6) / Expr::integer(4)), "sqrt(6)/4");
        assert_eq!(format!("{}", -x.clone() + Expr::one()), "1 - x");
    }
}
