//! # Reciprocal functions
//!
//! `sec`, `csc` and `cot` defined through `cos`, `sin` and `tan`. Evaluation normalises the
//! sign and the multiple of `pi` itself and asks the primary evaluator for the rest;
//! rewrites, expansion and most predicates are forwarded to the primary and inverted.

use crate::global::{TrigConfig, config};
use crate::symbolic::elementary::{coth, cosh, csch, exp, sech, single, sinh};
use crate::symbolic::fuzzy_logic::Fuzzy;
use crate::symbolic::symbolic_engine::{Domain, Expr, Function};
use crate::symbolic::symbolic_traits::{RewriteTarget, SymbolicError, SymbolicFunction, definition};
use crate::symbolic::trigonometric::angle::pi_coeff;
use crate::symbolic::trigonometric::trig_functions::{cos_eval, sin_eval, tan_eval};
use crate::symbolic::trigonometric::trig_series;
use crate::symbolic::utils::{NumberedSymbols, binomial, symmetric_poly};
use log::trace;
use num::{BigRational, One, ToPrimitive};
use std::collections::BTreeMap;

/// The function `f` is the reciprocal of.
fn primary_of(f: Function) -> Function {
    match f {
        Function::sec => Function::cos,
        Function::csc => Function::sin,
        _ => Function::tan,
    }
}

fn primary_eval(f: Function, arg: &Expr, cfg: &TrigConfig) -> Option<Expr> {
    match primary_of(f) {
        Function::cos => cos_eval(arg, cfg),
        Function::sin => sin_eval(arg, cfg),
        _ => tan_eval(arg, cfg),
    }
}

/// `1/primary(arg)` as an expression.
fn inverted_primary(f: Function, args: &[Expr]) -> Expr {
    Expr::one() / Expr::func(primary_of(f), args.to_vec())
}

pub fn reciprocal_eval(f: Function, arg: &Expr, cfg: &TrigConfig) -> Option<Expr> {
    if arg.could_extract_minus_sign() {
        let flipped = Expr::func(f, vec![-arg.clone()]);
        // sec is even, csc and cot are odd
        return Some(if f == Function::sec { flipped } else { -flipped });
    }

    if let Some(t) = arg.as_coefficient(&Expr::I()) {
        return Some(match f {
            Function::sec => sech(t),
            Function::csc => -Expr::I() * csch(t),
            _ => -Expr::I() * coth(t),
        });
    }

    if let Some(pc) = pi_coeff(arg, 1) {
        let narg = pc.clone() * Expr::pi();
        if narg != *arg {
            return Some(Expr::func(f, vec![narg]));
        }
        if let Some(c) = pc.as_rational() {
            if *c > BigRational::one() {
                let s = if f == Function::cot { Expr::one() } else { Expr::neg_one() };
                let shifted = Expr::from_rational(c - BigRational::one()) * Expr::pi();
                return Some(s * Expr::func(f, vec![shifted]));
            }
        }
    }

    if let Expr::Func(_, inner) = arg {
        if arg.inverse() == Some(f) {
            return inner.first().cloned();
        }
    }

    let t = primary_eval(f, arg, cfg)?;
    trace!("{}({}) through {} = {}", f, arg, primary_of(f), t);
    let r = Expr::one() / t;
    if f == Function::cot {
        return Some(swap_tan_cot(r));
    }
    Some(r)
}

/// `c/cot(y)` becomes `c*tan(y)` and `c/tan(y)` becomes `c*cot(y)`.
fn swap_tan_cot(r: Expr) -> Expr {
    let (c, rest) = r.as_coeff_Mul();
    if let Expr::Pow(b, e) = &rest {
        if e.as_rational() == Some(&-BigRational::one()) {
            let swapped = match b.as_ref() {
                Expr::Func(Function::cot, a) => Some((Function::tan, a)),
                Expr::Func(Function::tan, a) => Some((Function::cot, a)),
                _ => None,
            };
            if let Some((g, a)) = swapped {
                return Expr::from_rational(c) * Expr::func_unevaluated(g, a.clone());
            }
        }
    }
    r
}

/// Rewrite of the primary, inverted; `None` when the primary had nothing to say.
fn forward_rewrite(f: Function, args: &[Expr], target: RewriteTarget) -> Option<Expr> {
    let primary = primary_of(f);
    let t = definition(primary).rewrite(args, target)?;
    if t == Expr::func(primary, args.to_vec()) {
        return None;
    }
    Some(Expr::one() / t)
}

fn sq(x: &Expr) -> Expr {
    x.clone().pow(Expr::integer(2))
}

//___________________________________SECANT____________________________________

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sec;

impl SymbolicFunction for Sec {
    fn tag(&self) -> Function {
        Function::sec
    }

    fn eval(&self, args: &[Expr]) -> Option<Expr> {
        reciprocal_eval(Function::sec, args.first()?, &config())
    }

    fn fdiff(&self, args: &[Expr], argindex: usize) -> Result<Expr, SymbolicError> {
        if argindex != 1 {
            return Err(SymbolicError::ArgumentIndex { function: Function::sec, index: argindex });
        }
        let x = single(args, Function::sec)?.clone();
        Ok(Expr::func(Function::tan, vec![x.clone()]) * Expr::func(Function::sec, vec![x]))
    }

    fn rewrite(&self, args: &[Expr], target: RewriteTarget) -> Option<Expr> {
        let a = args.first()?.clone();
        match target {
            RewriteTarget::cot => {
                let c = sq(&Expr::func(Function::cot, vec![a / Expr::integer(2)]));
                Some((c.clone() + Expr::one()) / (c - Expr::one()))
            }
            RewriteTarget::cos => Some(Expr::one() / Expr::func(Function::cos, vec![a])),
            RewriteTarget::sincos => {
                let s = Expr::func(Function::sin, vec![a.clone()]);
                Some(s.clone() / (Expr::func(Function::cos, vec![a]) * s))
            }
            _ => forward_rewrite(Function::sec, args, target),
        }
    }

    fn expand_trig(&self, args: &[Expr]) -> Option<Expr> {
        definition(Function::cos).expand_trig(args).map(|t| Expr::one() / t)
    }

    fn taylor_term(&self, n: i64, x: &Expr, previous: &[Expr]) -> Option<Expr> {
        trig_series::taylor_term(Function::sec, n, x, previous)
    }

    fn is_real(&self, args: &[Expr]) -> Fuzzy {
        inverted_primary(Function::sec, args).is_real()
    }

    fn is_finite(&self, args: &[Expr]) -> Fuzzy {
        inverted_primary(Function::sec, args).is_finite()
    }

    fn is_rational(&self, args: &[Expr]) -> Fuzzy {
        inverted_primary(Function::sec, args).is_rational()
    }

    fn is_algebraic(&self, args: &[Expr]) -> Fuzzy {
        inverted_primary(Function::sec, args).is_algebraic()
    }

    fn conjugate(&self, args: &[Expr]) -> Option<Expr> {
        Some(Expr::func(Function::sec, vec![args.first()?.conjugate()]))
    }

    fn as_real_imag(&self, args: &[Expr]) -> Option<(Expr, Expr)> {
        Some(inverted_primary(Function::sec, args).as_real_imag())
    }

    fn as_leading_term(&self, args: &[Expr], x: &Expr) -> Option<Expr> {
        Some(inverted_primary(Function::sec, args).as_leading_term(x))
    }

    fn inverse(&self) -> Option<Function> {
        Some(Function::asec)
    }
}

//___________________________________COSECANT____________________________________

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Csc;

impl SymbolicFunction for Csc {
    fn tag(&self) -> Function {
        Function::csc
    }

    fn eval(&self, args: &[Expr]) -> Option<Expr> {
        reciprocal_eval(Function::csc, args.first()?, &config())
    }

    fn fdiff(&self, args: &[Expr], argindex: usize) -> Result<Expr, SymbolicError> {
        if argindex != 1 {
            return Err(SymbolicError::ArgumentIndex { function: Function::csc, index: argindex });
        }
        let x = single(args, Function::csc)?.clone();
        Ok(-Expr::func(Function::cot, vec![x.clone()]) * Expr::func(Function::csc, vec![x]))
    }

    fn rewrite(&self, args: &[Expr], target: RewriteTarget) -> Option<Expr> {
        let a = args.first()?.clone();
        match target {
            RewriteTarget::sin => Some(Expr::one() / Expr::func(Function::sin, vec![a])),
            RewriteTarget::sincos => {
                let c = Expr::func(Function::cos, vec![a.clone()]);
                Some(c.clone() / (Expr::func(Function::sin, vec![a]) * c))
            }
            RewriteTarget::cot => {
                let c = Expr::func(Function::cot, vec![a / Expr::integer(2)]);
                Some((Expr::one() + sq(&c)) / (Expr::integer(2) * c))
            }
            _ => forward_rewrite(Function::csc, args, target),
        }
    }

    fn expand_trig(&self, args: &[Expr]) -> Option<Expr> {
        definition(Function::sin).expand_trig(args).map(|t| Expr::one() / t)
    }

    fn taylor_term(&self, n: i64, x: &Expr, previous: &[Expr]) -> Option<Expr> {
        trig_series::taylor_term(Function::csc, n, x, previous)
    }

    fn is_real(&self, args: &[Expr]) -> Fuzzy {
        inverted_primary(Function::csc, args).is_real()
    }

    fn is_finite(&self, args: &[Expr]) -> Fuzzy {
        inverted_primary(Function::csc, args).is_finite()
    }

    fn is_rational(&self, args: &[Expr]) -> Fuzzy {
        inverted_primary(Function::csc, args).is_rational()
    }

    fn is_algebraic(&self, args: &[Expr]) -> Fuzzy {
        inverted_primary(Function::csc, args).is_algebraic()
    }

    fn conjugate(&self, args: &[Expr]) -> Option<Expr> {
        Some(Expr::func(Function::csc, vec![args.first()?.conjugate()]))
    }

    fn as_real_imag(&self, args: &[Expr]) -> Option<(Expr, Expr)> {
        Some(inverted_primary(Function::csc, args).as_real_imag())
    }

    fn as_leading_term(&self, args: &[Expr], x: &Expr) -> Option<Expr> {
        Some(inverted_primary(Function::csc, args).as_leading_term(x))
    }

    fn inverse(&self) -> Option<Function> {
        Some(Function::acsc)
    }
}

//___________________________________COTANGENT____________________________________

/// `cot(x_1 + ... + x_n)` through elementary symmetric polynomials in `cot(x_i)`.
fn cot_of_sum(terms: &[Expr]) -> Expr {
    let n = terms.len();
    let cx: Vec<Expr> = terms
        .iter()
        .map(|t| Expr::func_unevaluated(Function::cot, vec![t.clone()]).expand_trig())
        .collect();
    let ys: Vec<Expr> = NumberedSymbols::new("Y", Domain::Complex).take(n).collect();
    let mut p = [Expr::zero(), Expr::zero()];
    for i in (0..=n).rev() {
        let k = n - i;
        let sign = if (k % 4) / 2 == 1 { Expr::neg_one() } else { Expr::one() };
        p[k % 2] = p[k % 2].clone() + symmetric_poly(i, &ys) * sign;
    }
    let rules: BTreeMap<Expr, Expr> = ys.into_iter().zip(cx).collect();
    let [num, den] = p;
    (num / den).xreplace(&rules)
}

/// `cot(n*x)` as `re/im` of `(z + I)**n`, `z = cot(x)`.
fn cot_of_multiple(n: u64, z: &Expr) -> Expr {
    let mut re = Vec::new();
    let mut im = Vec::new();
    for k in 0..=n {
        let sign = if (k / 2) % 2 == 1 { Expr::neg_one() } else { Expr::one() };
        let term = sign * Expr::big_integer(binomial(n, k)) * z.clone().pow(Expr::integer((n - k) as i64));
        if k % 2 == 0 { re.push(term) } else { im.push(term) }
    }
    Expr::add_all(re) / Expr::add_all(im)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cot;

impl SymbolicFunction for Cot {
    fn tag(&self) -> Function {
        Function::cot
    }

    fn eval(&self, args: &[Expr]) -> Option<Expr> {
        reciprocal_eval(Function::cot, args.first()?, &config())
    }

    fn fdiff(&self, args: &[Expr], argindex: usize) -> Result<Expr, SymbolicError> {
        if argindex != 1 {
            return Err(SymbolicError::ArgumentIndex { function: Function::cot, index: argindex });
        }
        let c = Expr::func(Function::cot, vec![single(args, Function::cot)?.clone()]);
        Ok(Expr::neg_one() - sq(&c))
    }

    fn rewrite(&self, args: &[Expr], target: RewriteTarget) -> Option<Expr> {
        let a = args.first()?.clone();
        match target {
            RewriteTarget::tan => Some(Expr::one() / Expr::func(Function::tan, vec![a])),
            RewriteTarget::sincos => Some(
                Expr::func(Function::cos, vec![a.clone()]) / Expr::func(Function::sin, vec![a]),
            ),
            RewriteTarget::exp => {
                let i = Expr::I();
                let pos = exp(a.clone() * i.clone());
                let neg = exp(-a * i.clone());
                Some(i * (pos.clone() + neg.clone()) / (pos - neg))
            }
            RewriteTarget::sin => {
                let two = Expr::integer(2);
                let s = Expr::func(Function::sin, vec![a.clone()]);
                Some(Expr::func(Function::sin, vec![two.clone() * a]) / (two * sq(&s)))
            }
            _ => forward_rewrite(Function::cot, args, target),
        }
    }

    fn expand_trig(&self, args: &[Expr]) -> Option<Expr> {
        let a = args.first()?;
        if let Expr::Add(terms) = a {
            return Some(cot_of_sum(terms));
        }
        let (coeff, terms) = a.as_coeff_Mul();
        if coeff.is_integer() && coeff > BigRational::one() {
            let n = coeff.numer().to_u64()?;
            return Some(cot_of_multiple(n, &Expr::func(Function::cot, vec![terms])));
        }
        None
    }

    fn is_real(&self, args: &[Expr]) -> Fuzzy {
        inverted_primary(Function::cot, args).is_real()
    }

    fn is_finite(&self, args: &[Expr]) -> Fuzzy {
        inverted_primary(Function::cot, args).is_finite()
    }

    fn is_rational(&self, args: &[Expr]) -> Fuzzy {
        inverted_primary(Function::cot, args).is_rational()
    }

    fn is_algebraic(&self, args: &[Expr]) -> Fuzzy {
        inverted_primary(Function::cot, args).is_algebraic()
    }

    fn conjugate(&self, args: &[Expr]) -> Option<Expr> {
        Some(Expr::func(Function::cot, vec![args.first()?.conjugate()]))
    }

    fn as_real_imag(&self, args: &[Expr]) -> Option<(Expr, Expr)> {
        let (re, im) = args.first()?.as_real_imag();
        if im.is_zero_literal() {
            return Some((Expr::func(Function::cot, vec![re]), Expr::zero()));
        }
        let two = Expr::integer(2);
        let denom = Expr::func(Function::cos, vec![two.clone() * re.clone()]) - cosh(two.clone() * im.clone());
        Some((
            -Expr::func(Function::sin, vec![two.clone() * re]) / denom.clone(),
            -sinh(two * im) / denom,
        ))
    }

    fn as_leading_term(&self, args: &[Expr], x: &Expr) -> Option<Expr> {
        let arg = args.first()?.as_leading_term(x);
        if arg.vanishes_at_zero(x) {
            return Some(Expr::one() / arg);
        }
        Some(Expr::func(Function::cot, vec![arg]))
    }

    fn inverse(&self) -> Option<Function> {
        Some(Function::acot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::trigonometric::{cos, cot, csc, sec, sin, tan};

    fn pi() -> Expr {
        Expr::pi()
    }

    #[test]
    fn test_special_values() {
        assert_eq!(sec(Expr::zero()), Expr::one());
        assert_eq!(csc(pi() / Expr::integer(2)), Expr::one());
        assert_eq!(csc(Expr::zero()), Expr::zoo());
        assert_eq!(cot(pi() / Expr::integer(2)), Expr::zero());
        assert_eq!(cot(pi() / Expr::integer(4)), Expr::one());
        assert_eq!(sec(pi() / Expr::integer(3)), Expr::integer(2));
        assert_eq!(sec(Expr::integer(4) * pi() / Expr::integer(3)), Expr::integer(-2));
        assert_eq!(csc(pi() / Expr::integer(6)), Expr::integer(2));
    }

    #[test]
    fn test_parity() {
        let x = Expr::symbol("x");
        assert_eq!(sec(-x.clone()), sec(x.clone()));
        assert_eq!(csc(-x.clone()), -csc(x.clone()));
        assert_eq!(cot(-x.clone()), -cot(x.clone()));
    }

    #[test]
    fn test_imaginary_arguments() {
        let x = Expr::symbol("x");
        let ix = Expr::I() * x.clone();
        assert_eq!(sec(ix.clone()), sech(x.clone()));
        assert_eq!(csc(ix.clone()), -Expr::I() * csch(x.clone()));
        assert_eq!(cot(ix), -Expr::I() * coth(x));
    }

    #[test]
    fn test_shifted_cotangent() {
        let x = Expr::symbol("x");
        assert_eq!(cot(x.clone() + pi() / Expr::integer(2)), -tan(x.clone()));
        assert_eq!(cot(x.clone() + pi()), cot(x.clone()));
        let seventh = Expr::integer(8) * pi() / Expr::integer(7);
        assert_eq!(cot(seventh), cot(pi() / Expr::integer(7)));
    }

    #[test]
    fn test_inverse_composition() {
        let x = Expr::symbol("x");
        assert_eq!(cot(Expr::func(Function::acot, vec![x.clone()])), x.clone());
        assert_eq!(sec(Expr::func_unevaluated(Function::asec, vec![x.clone()])), x);
    }

    #[test]
    fn test_derivatives() {
        let x = Expr::symbol("x");
        assert_eq!(Sec.fdiff(&[x.clone()], 1).ok(), Some(tan(x.clone()) * sec(x.clone())));
        assert_eq!(Csc.fdiff(&[x.clone()], 1).ok(), Some(-cot(x.clone()) * csc(x.clone())));
        assert_eq!(
            Cot.fdiff(&[x.clone()], 1).ok(),
            Some(Expr::neg_one() - cot(x.clone()).pow(Expr::integer(2)))
        );
        assert!(Csc.fdiff(&[x], 2).is_err());
    }

    #[test]
    fn test_rewrites() {
        let x = Expr::symbol("x");
        assert_eq!(sec(x.clone()).rewrite(RewriteTarget::cos), Expr::one() / cos(x.clone()));
        assert_eq!(csc(x.clone()).rewrite(RewriteTarget::sin), Expr::one() / sin(x.clone()));
        assert_eq!(cot(x.clone()).rewrite(RewriteTarget::sincos), cos(x.clone()) / sin(x.clone()));
        let i = Expr::I();
        let expected = Expr::one()
            / ((exp(i.clone() * x.clone()) + exp(-i * x.clone())) / Expr::integer(2));
        assert_eq!(sec(x.clone()).rewrite(RewriteTarget::exp), expected);
        // sqrt has nothing to offer for a plain symbol
        assert_eq!(sec(x.clone()).rewrite(RewriteTarget::sqrt), sec(x));
    }

    #[test]
    fn test_cot_expand_trig() {
        let (x, y) = (Expr::symbol("x"), Expr::symbol("y"));
        let (cx, cy) = (cot(x.clone()), cot(y.clone()));
        assert_eq!(
            cot(x.clone() + y).expand_trig(),
            (cx.clone() * cy.clone() - Expr::one()) / (cx.clone() + cy)
        );
        assert_eq!(
            cot(Expr::integer(2) * x).expand_trig(),
            (cx.clone().pow(Expr::integer(2)) - Expr::one()) / (Expr::integer(2) * cx)
        );
    }

    #[test]
    fn test_leading_terms() {
        let x = Expr::symbol("x");
        assert_eq!(cot(x.clone()).as_leading_term(&x), Expr::one() / x.clone());
        assert_eq!(sec(x.clone()).as_leading_term(&x), Expr::one());
        assert_eq!(csc(x.clone()).as_leading_term(&x), Expr::one() / x);
    }
}
