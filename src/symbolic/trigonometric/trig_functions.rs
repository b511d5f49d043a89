//! # Sine, Cosine and Tangent
//!
//! ## Purpose
//! Definitions of the three primary circular functions: automatic evaluation, derivatives,
//! rewrites into sibling forms and trigonometric expansion.
//!
//! ## Evaluation order
//! 1. **Special arguments**: `0`, infinities
//! 2. **Sign extraction**: `sin(-x) = -sin(x)`, `cos(-x) = cos(x)`
//! 3. **Imaginary arguments**: `sin(I*x) = I*sinh(x)` and the like
//! 4. **Multiples of `pi`**: integer and half-integer multiples, then exact values through
//!    the cosine of a reduced angle
//! 5. **Sums**: multiples of `pi/2` are peeled off with the addition formula
//! 6. **Inverse functions**: `sin(acos(x)) = sqrt(1 - x**2)` and the like
//!
//! Every evaluator takes the `TrigConfig` it runs under; construction through `Expr::func`
//! uses the process-wide one.

use crate::global::{TrigConfig, config};
use crate::symbolic::elementary::{cosh, exp, single, sinh, tanh};
use crate::symbolic::fuzzy_logic::Fuzzy;
use crate::symbolic::symbolic_engine::{Domain, Expr, Function};
use crate::symbolic::symbolic_traits::{RewriteTarget, SymbolicError, SymbolicFunction};
use crate::symbolic::trigonometric::angle::{InverseArg, peeloff_pi, pi_coeff};
use crate::symbolic::trigonometric::exact_values::{
    COS_RADICALS, PAIRWISE_ANGLES, cos_as_radical, half_angle_sign,
};
use crate::symbolic::trigonometric::{cot, csc, sec, trig_series};
use crate::symbolic::utils::{NumberedSymbols, binomial, chebyshevt, chebyshevu, rat_mod, symmetric_poly};
use log::{debug, trace};
use num::{BigInt, BigRational, Integer, One, ToPrimitive};
use std::collections::BTreeMap;

fn rat(p: i64, q: i64) -> BigRational {
    BigRational::new(BigInt::from(p), BigInt::from(q))
}

fn sq(x: &Expr) -> Expr {
    x.clone().pow(Expr::integer(2))
}

fn half_pi() -> Expr {
    Expr::pi() / Expr::integer(2)
}

/// `c*pi`
fn times_pi(c: BigRational) -> Expr {
    Expr::from_rational(c) * Expr::pi()
}

pub(crate) fn sin_with(x: Expr, cfg: &TrigConfig) -> Expr {
    sin_eval(&x, cfg).unwrap_or_else(|| Expr::func_unevaluated(Function::sin, vec![x]))
}

pub(crate) fn cos_with(x: Expr, cfg: &TrigConfig) -> Expr {
    cos_eval(&x, cfg).unwrap_or_else(|| Expr::func_unevaluated(Function::cos, vec![x]))
}

pub(crate) fn tan_with(x: Expr, cfg: &TrigConfig) -> Expr {
    tan_eval(&x, cfg).unwrap_or_else(|| Expr::func_unevaluated(Function::tan, vec![x]))
}

/// `(f(x), x)` for a one-argument node of `f`.
fn argument_of(e: &Expr, f: Function) -> Option<&Expr> {
    match e {
        Expr::Func(g, args) if *g == f => args.first(),
        _ => None,
    }
}

//___________________________________SINE____________________________________

pub fn sin_eval(arg: &Expr, cfg: &TrigConfig) -> Option<Expr> {
    if arg.is_zero_literal() {
        return Some(Expr::zero());
    }
    match arg {
        Expr::Infinity | Expr::NegativeInfinity => return None,
        Expr::ComplexInfinity => return Some(Expr::NaN),
        _ => {}
    }
    if arg.could_extract_minus_sign() {
        return Some(-sin_with(-arg.clone(), cfg));
    }
    if let Some(t) = arg.as_coefficient(&Expr::I()) {
        return Some(Expr::I() * sinh(t));
    }

    if let Some(pc) = pi_coeff(arg, 1) {
        if pc.is_integer().is_true() {
            return Some(Expr::zero());
        }
        if (Expr::integer(2) * pc.clone()).is_integer().is_true() {
            match pc.is_even() {
                Fuzzy::True => return Some(Expr::zero()),
                Fuzzy::False => return Some(Expr::neg_one().pow(pc - Expr::half())),
                Fuzzy::Unknown => {}
            }
        }
        let Some(c) = pc.as_rational().cloned() else {
            let narg = pc * Expr::pi();
            return if narg != *arg { Some(sin_with(narg, cfg)) } else { None };
        };
        let x = rat_mod(&c, &rat(2, 1));
        if x > BigRational::one() {
            return Some(-sin_with(times_pi(rat_mod(&x, &BigRational::one())), cfg));
        }
        if &x * rat(2, 1) > BigRational::one() {
            return Some(sin_with(times_pi(BigRational::one() - x), cfg));
        }
        // sin(c*pi) = cos((c + 3/2)*pi)
        let narg = times_pi(rat_mod(&(&c + rat(3, 2)), &rat(2, 1)));
        let result = cos_with(narg, cfg);
        if !result.has_func(Function::cos) {
            return Some(result);
        }
        let narg = times_pi(c);
        return if narg != *arg { Some(Expr::func_unevaluated(Function::sin, vec![narg])) } else { None };
    }

    if arg.is_add() {
        let (x, m) = peeloff_pi(arg);
        if !m.is_zero_literal() {
            return Some(
                sin_with(m.clone(), cfg) * cos_with(x.clone(), cfg) + cos_with(m, cfg) * sin_with(x, cfg),
            );
        }
    }

    match InverseArg::classify(arg) {
        InverseArg::Asin(x) => Some(x),
        InverseArg::Atan(x) => Some(x.clone() / (Expr::one() + sq(&x)).sqrt()),
        InverseArg::Atan2(y, x) => Some(y.clone() / (sq(&x) + sq(&y)).sqrt()),
        InverseArg::Acos(x) => Some((Expr::one() - sq(&x)).sqrt()),
        InverseArg::Acot(x) => {
            Some(Expr::one() / ((Expr::one() + Expr::one() / sq(&x)).sqrt() * x))
        }
        InverseArg::Other => None,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sin;

impl SymbolicFunction for Sin {
    fn tag(&self) -> Function {
        Function::sin
    }

    fn eval(&self, args: &[Expr]) -> Option<Expr> {
        sin_eval(args.first()?, &config())
    }

    fn fdiff(&self, args: &[Expr], argindex: usize) -> Result<Expr, SymbolicError> {
        if argindex != 1 {
            return Err(SymbolicError::ArgumentIndex { function: Function::sin, index: argindex });
        }
        Ok(Expr::func(Function::cos, vec![single(args, Function::sin)?.clone()]))
    }

    fn rewrite(&self, args: &[Expr], target: RewriteTarget) -> Option<Expr> {
        let a = args.first()?.clone();
        let two = Expr::integer(2);
        match target {
            RewriteTarget::exp => {
                let ia = Expr::I() * a;
                Some((exp(ia.clone()) - exp(-ia)) / (two * Expr::I()))
            }
            RewriteTarget::Pow => {
                let x = argument_of(&a, Function::log)?.clone();
                let i = Expr::I();
                Some(i.clone() * x.clone().pow(-i.clone()) / two.clone() - i.clone() * x.pow(i) / two)
            }
            RewriteTarget::cos => {
                Some(-Expr::func_unevaluated(Function::cos, vec![a + half_pi()]))
            }
            RewriteTarget::tan => {
                let t = Expr::func(Function::tan, vec![a / two.clone()]);
                Some(two * t.clone() / (Expr::one() + sq(&t)))
            }
            RewriteTarget::sincos => {
                let s = Expr::func(Function::sin, vec![a.clone()]);
                let c = Expr::func(Function::cos, vec![a]);
                Some(s * c.clone() / c)
            }
            RewriteTarget::cot => {
                let c = cot(a / two.clone());
                Some(two * c.clone() / (Expr::one() + sq(&c)))
            }
            RewriteTarget::pow | RewriteTarget::sqrt => cos_as_radical(&(a + half_pi())).map(|v| -v),
            RewriteTarget::csc => Some(Expr::one() / csc(a)),
            _ => None,
        }
    }

    fn expand_trig(&self, args: &[Expr]) -> Option<Expr> {
        let a = args.first()?;
        if a.is_add() {
            let (x, y) = a.as_two_terms();
            let sx = Expr::func_unevaluated(Function::sin, vec![x.clone()]).expand_trig();
            let sy = Expr::func_unevaluated(Function::sin, vec![y.clone()]).expand_trig();
            let cx = Expr::func_unevaluated(Function::cos, vec![x]).expand_trig();
            let cy = Expr::func_unevaluated(Function::cos, vec![y]).expand_trig();
            return Some(sx * cy + sy * cx);
        }
        let (coeff, terms) = a.as_coeff_Mul();
        if coeff.is_integer() {
            let n = coeff.numer().to_i64()?;
            let s = Expr::func(Function::sin, vec![terms.clone()]);
            if n.is_odd() {
                let sign = Expr::neg_one().pow(Expr::integer((n - 1) / 2));
                return Some(sign * chebyshevt(n, &s));
            }
            let sign = Expr::neg_one().pow(Expr::integer(n / 2 - 1));
            let c = Expr::func(Function::cos, vec![terms]);
            return Some((sign * c * chebyshevu(n - 1, &s)).expand());
        }
        if pi_coeff(a, 1).map(|pc| pc.as_rational().is_some()).unwrap_or(false) {
            return self.rewrite(args, RewriteTarget::sqrt);
        }
        None
    }

    fn taylor_term(&self, n: i64, x: &Expr, previous: &[Expr]) -> Option<Expr> {
        trig_series::taylor_term(Function::sin, n, x, previous)
    }

    fn is_real(&self, args: &[Expr]) -> Fuzzy {
        real_if_real_argument(args)
    }

    fn is_finite(&self, args: &[Expr]) -> Fuzzy {
        real_if_real_argument(args)
    }

    fn is_rational(&self, args: &[Expr]) -> Fuzzy {
        primary_is_rational(Function::sin, args)
    }

    fn is_algebraic(&self, args: &[Expr]) -> Fuzzy {
        primary_is_algebraic(Function::sin, args, false)
    }

    fn conjugate(&self, args: &[Expr]) -> Option<Expr> {
        Some(Expr::func(Function::sin, vec![args.first()?.conjugate()]))
    }

    fn as_real_imag(&self, args: &[Expr]) -> Option<(Expr, Expr)> {
        let (re, im) = args.first()?.as_real_imag();
        Some((
            Expr::func(Function::sin, vec![re.clone()]) * cosh(im.clone()),
            Expr::func(Function::cos, vec![re]) * sinh(im),
        ))
    }

    fn as_leading_term(&self, args: &[Expr], x: &Expr) -> Option<Expr> {
        let arg = args.first()?.as_leading_term(x);
        if arg.vanishes_at_zero(x) {
            return Some(arg);
        }
        Some(Expr::func(Function::sin, vec![arg]))
    }

    fn inverse(&self) -> Option<Function> {
        Some(Function::asin)
    }
}

//___________________________________COSINE____________________________________

pub fn cos_eval(arg: &Expr, cfg: &TrigConfig) -> Option<Expr> {
    if arg.is_zero_literal() {
        return Some(Expr::one());
    }
    match arg {
        // left unevaluated rather than nan
        Expr::Infinity | Expr::NegativeInfinity => return None,
        Expr::ComplexInfinity => return Some(Expr::NaN),
        _ => {}
    }
    if arg.could_extract_minus_sign() {
        return Some(cos_with(-arg.clone(), cfg));
    }
    if let Some(t) = arg.as_coefficient(&Expr::I()) {
        return Some(cosh(t));
    }

    if let Some(pc) = pi_coeff(arg, 1) {
        if pc.is_integer().is_true() {
            return Some(Expr::neg_one().pow(pc));
        }
        if (Expr::integer(2) * pc.clone()).is_integer().is_true() {
            match pc.is_even() {
                Fuzzy::True => return Some(Expr::neg_one().pow(pc / Expr::integer(2))),
                Fuzzy::False => return Some(Expr::zero()),
                Fuzzy::Unknown => {}
            }
        }
        return match pc.as_rational() {
            Some(c) => cos_rational(c, arg, cfg),
            None => {
                let narg = pc * Expr::pi();
                if narg != *arg { Some(cos_with(narg, cfg)) } else { None }
            }
        };
    }

    if arg.is_add() {
        let (x, m) = peeloff_pi(arg);
        if !m.is_zero_literal() {
            trace!("cos({}): peeled {}", arg, m);
            return Some(
                cos_with(m.clone(), cfg) * cos_with(x.clone(), cfg) - sin_with(m, cfg) * sin_with(x, cfg),
            );
        }
    }

    match InverseArg::classify(arg) {
        InverseArg::Acos(x) => Some(x),
        InverseArg::Atan(x) => Some(Expr::one() / (Expr::one() + sq(&x)).sqrt()),
        InverseArg::Atan2(y, x) => Some(x.clone() / (sq(&x) + sq(&y)).sqrt()),
        InverseArg::Asin(x) => Some((Expr::one() - sq(&x)).sqrt()),
        InverseArg::Acot(x) => Some(Expr::one() / (Expr::one() + Expr::one() / sq(&x)).sqrt()),
        InverseArg::Other => None,
    }
}

/// Reduces `cos(c*pi)` into `[0, pi/2]` and looks for a closed form.
fn cos_rational(c: &BigRational, arg: &Expr, cfg: &TrigConfig) -> Option<Expr> {
    let q = c.denom().clone();
    let p = c.numer().mod_floor(&(BigInt::from(2) * &q));
    if p > q {
        return Some(-cos_with(times_pi(c - BigRational::one()), cfg));
    }
    if BigInt::from(2) * &p > q {
        return Some(-cos_with(times_pi(BigRational::one() - c), cfg));
    }
    let decline = || {
        let narg = times_pi(c.clone());
        if narg != *arg { Some(Expr::func_unevaluated(Function::cos, vec![narg])) } else { None }
    };
    let Some(q64) = q.to_u64() else {
        return decline();
    };

    if cfg.pairwise_table {
        if let Some((qa, qb)) = PAIRWISE_ANGLES.get(&q64) {
            let pe = Expr::big_integer(p.clone());
            let a = pe.clone() * Expr::pi() / Expr::integer(*qa as i64);
            let b = pe * Expr::pi() / Expr::integer(*qb as i64);
            let parts = [
                cos_with(a.clone(), cfg),
                cos_with(b.clone(), cfg),
                cos_with(half_pi() - a, cfg),
                cos_with(half_pi() - b, cfg),
            ];
            if parts.iter().all(|v| !v.has_func(Function::cos)) {
                let [ca, cb, sa, sb] = parts;
                return Some(ca * cb + sa * sb);
            }
            debug!("cos({}): pairwise split over {} and {} left cosines", arg, qa, qb);
        }
    }

    if q64 > cfg.radical_denominator_cutoff {
        debug!(
            "cos({}): denominator {} above cutoff {}",
            arg, q64, cfg.radical_denominator_cutoff
        );
        return decline();
    }
    if let Some(base) = COS_RADICALS.get(&q64) {
        let n = p.to_i64()?;
        return Some(chebyshevt(n, base).expand());
    }
    if q.is_even() {
        let nval = cos_with(times_pi(c * rat(2, 1)), cfg);
        if nval.has_func(Function::cos) {
            debug!("cos({}): half angle of unevaluated {}", arg, nval);
            return decline();
        }
        return Some(half_angle_sign(c) * ((Expr::one() + nval) / Expr::integer(2)).sqrt());
    }
    debug!("cos({}): no closed form listed for denominator {}", arg, q64);
    decline()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cos;

impl SymbolicFunction for Cos {
    fn tag(&self) -> Function {
        Function::cos
    }

    fn eval(&self, args: &[Expr]) -> Option<Expr> {
        cos_eval(args.first()?, &config())
    }

    fn fdiff(&self, args: &[Expr], argindex: usize) -> Result<Expr, SymbolicError> {
        if argindex != 1 {
            return Err(SymbolicError::ArgumentIndex { function: Function::cos, index: argindex });
        }
        Ok(-Expr::func(Function::sin, vec![single(args, Function::cos)?.clone()]))
    }

    fn rewrite(&self, args: &[Expr], target: RewriteTarget) -> Option<Expr> {
        let a = args.first()?.clone();
        let two = Expr::integer(2);
        match target {
            RewriteTarget::exp => {
                let ia = Expr::I() * a;
                Some((exp(ia.clone()) + exp(-ia)) / two)
            }
            RewriteTarget::Pow => {
                let x = argument_of(&a, Function::log)?.clone();
                let i = Expr::I();
                Some(x.clone().pow(i.clone()) / two.clone() + x.pow(-i) / two)
            }
            RewriteTarget::sin => Some(Expr::func_unevaluated(Function::sin, vec![a + half_pi()])),
            RewriteTarget::tan => {
                let t = sq(&Expr::func(Function::tan, vec![a / two]));
                Some((Expr::one() - t.clone()) / (Expr::one() + t))
            }
            RewriteTarget::sincos => {
                let s = Expr::func(Function::sin, vec![a.clone()]);
                let c = Expr::func(Function::cos, vec![a]);
                Some(s.clone() * c / s)
            }
            RewriteTarget::cot => {
                let c = sq(&cot(a / two));
                Some((c.clone() - Expr::one()) / (c + Expr::one()))
            }
            RewriteTarget::pow | RewriteTarget::sqrt => cos_as_radical(&a),
            RewriteTarget::sec => Some(Expr::one() / sec(a)),
            _ => None,
        }
    }

    fn expand_trig(&self, args: &[Expr]) -> Option<Expr> {
        let a = args.first()?;
        if a.is_add() {
            let (x, y) = a.as_two_terms();
            let sx = Expr::func_unevaluated(Function::sin, vec![x.clone()]).expand_trig();
            let sy = Expr::func_unevaluated(Function::sin, vec![y.clone()]).expand_trig();
            let cx = Expr::func_unevaluated(Function::cos, vec![x]).expand_trig();
            let cy = Expr::func_unevaluated(Function::cos, vec![y]).expand_trig();
            return Some(cx * cy - sx * sy);
        }
        let (coeff, terms) = a.as_coeff_Mul();
        if coeff.is_integer() {
            let n = coeff.numer().to_i64()?;
            return Some(chebyshevt(n, &Expr::func(Function::cos, vec![terms])));
        }
        if pi_coeff(a, 1).map(|pc| pc.as_rational().is_some()).unwrap_or(false) {
            return cos_as_radical(a);
        }
        None
    }

    fn taylor_term(&self, n: i64, x: &Expr, previous: &[Expr]) -> Option<Expr> {
        trig_series::taylor_term(Function::cos, n, x, previous)
    }

    fn is_real(&self, args: &[Expr]) -> Fuzzy {
        real_if_real_argument(args)
    }

    fn is_finite(&self, args: &[Expr]) -> Fuzzy {
        real_if_real_argument(args)
    }

    fn is_rational(&self, args: &[Expr]) -> Fuzzy {
        primary_is_rational(Function::cos, args)
    }

    fn is_algebraic(&self, args: &[Expr]) -> Fuzzy {
        primary_is_algebraic(Function::cos, args, false)
    }

    fn conjugate(&self, args: &[Expr]) -> Option<Expr> {
        Some(Expr::func(Function::cos, vec![args.first()?.conjugate()]))
    }

    fn as_real_imag(&self, args: &[Expr]) -> Option<(Expr, Expr)> {
        let (re, im) = args.first()?.as_real_imag();
        Some((
            Expr::func(Function::cos, vec![re.clone()]) * cosh(im.clone()),
            -Expr::func(Function::sin, vec![re]) * sinh(im),
        ))
    }

    fn as_leading_term(&self, args: &[Expr], x: &Expr) -> Option<Expr> {
        let arg = args.first()?.as_leading_term(x);
        if arg.vanishes_at_zero(x) {
            return Some(Expr::one());
        }
        Some(Expr::func(Function::cos, vec![arg]))
    }

    fn inverse(&self) -> Option<Function> {
        Some(Function::acos)
    }
}

//___________________________________TANGENT____________________________________

pub fn tan_eval(arg: &Expr, cfg: &TrigConfig) -> Option<Expr> {
    if arg.is_zero_literal() {
        return Some(Expr::zero());
    }
    match arg {
        Expr::Infinity | Expr::NegativeInfinity => return None,
        Expr::ComplexInfinity => return Some(Expr::NaN),
        _ => {}
    }
    if arg.could_extract_minus_sign() {
        return Some(-tan_with(-arg.clone(), cfg));
    }
    if let Some(t) = arg.as_coefficient(&Expr::I()) {
        return Some(Expr::I() * tanh(t));
    }

    if let Some(pc) = pi_coeff(arg, 2) {
        if pc.is_integer().is_true() {
            return Some(Expr::zero());
        }
        let Some(c) = pc.as_rational().cloned() else {
            let narg = pc * Expr::pi();
            return if narg != *arg { Some(tan_with(narg, cfg)) } else { None };
        };
        let q = c.denom().clone();

        // tan(t) = (1 - cos(2t))/sin(2t)
        if q.is_even() {
            let narg = times_pi(&c * rat(2, 1));
            let cc = cos_with(narg.clone(), cfg);
            let s = cos_with(narg - half_pi(), cfg);
            if !cc.has_func(Function::cos) && !s.has_func(Function::cos) {
                if s.is_zero_literal() {
                    return Some(Expr::zoo());
                }
                return Some((Expr::one() - cc) / s);
            }
        }

        if cfg.pairwise_table {
            if let Some((qa, qb)) = q.to_u64().and_then(|q| PAIRWISE_ANGLES.get(&q)) {
                let p = Expr::big_integer(c.numer().mod_floor(&q));
                let ta = tan_with(p.clone() * Expr::pi() / Expr::integer(*qa as i64), cfg);
                let tb = tan_with(p * Expr::pi() / Expr::integer(*qb as i64), cfg);
                if !ta.has_func(Function::tan) && !tb.has_func(Function::tan) {
                    return Some((ta.clone() - tb.clone()) / (Expr::one() + ta * tb));
                }
            }
        }

        // reduce into (-pi/2, pi/2] and take sin/cos
        let reduced = rat_mod(&(&c + rat(1, 2)), &BigRational::one()) - rat(1, 2);
        let narg = times_pi(reduced);
        let cc = cos_with(narg.clone(), cfg);
        let s = cos_with(narg.clone() - half_pi(), cfg);
        if !cc.has_func(Function::cos) && !s.has_func(Function::cos) {
            if cc.is_zero_literal() {
                return Some(Expr::zoo());
            }
            return Some(s / cc);
        }
        if narg != *arg {
            return Some(Expr::func_unevaluated(Function::tan, vec![narg]));
        }
        debug!("tan({}): no closed form", arg);
        return None;
    }

    if arg.is_add() {
        let (x, m) = peeloff_pi(arg);
        if !m.is_zero_literal() {
            let tanm = tan_with(m, cfg);
            if matches!(tanm, Expr::ComplexInfinity) {
                return Some(-cot(x));
            }
            let tanx = tan_with(x, cfg);
            return Some((tanm.clone() + tanx.clone()) / (Expr::one() - tanm * tanx));
        }
    }

    match InverseArg::classify(arg) {
        InverseArg::Atan(x) => Some(x),
        InverseArg::Atan2(y, x) => Some(y / x),
        InverseArg::Asin(x) => Some(x.clone() / (Expr::one() - sq(&x)).sqrt()),
        InverseArg::Acos(x) => Some((Expr::one() - sq(&x)).sqrt() / x),
        InverseArg::Acot(x) => Some(Expr::one() / x),
        InverseArg::Other => None,
    }
}

/// `tan(x_1 + ... + x_n)` as a ratio of elementary symmetric polynomials in `tan(x_i)`.
fn tan_of_sum(terms: &[Expr]) -> Expr {
    let n = terms.len();
    let tx: Vec<Expr> = terms
        .iter()
        .map(|t| Expr::func_unevaluated(Function::tan, vec![t.clone()]).expand_trig())
        .collect();
    let ys: Vec<Expr> = NumberedSymbols::new("Y", Domain::Complex).take(n).collect();
    let mut p = [Expr::zero(), Expr::zero()];
    for i in 0..=n {
        let sign = if (i % 4) / 2 == 1 { Expr::neg_one() } else { Expr::one() };
        p[1 - i % 2] = p[1 - i % 2].clone() + symmetric_poly(i, &ys) * sign;
    }
    let rules: BTreeMap<Expr, Expr> = ys.into_iter().zip(tx).collect();
    let [num, den] = p;
    (num / den).xreplace(&rules)
}

/// `tan(n*x)` from the imaginary and real parts of `(1 + I*z)**n`, `z = tan(x)`.
fn tan_of_multiple(n: u64, z: &Expr) -> Expr {
    let mut re = Vec::new();
    let mut im = Vec::new();
    for k in 0..=n {
        let sign = if (k / 2) % 2 == 1 { Expr::neg_one() } else { Expr::one() };
        let term = sign * Expr::big_integer(binomial(n, k)) * z.clone().pow(Expr::integer(k as i64));
        if k % 2 == 0 { re.push(term) } else { im.push(term) }
    }
    Expr::add_all(im) / Expr::add_all(re)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tan;

impl SymbolicFunction for Tan {
    fn tag(&self) -> Function {
        Function::tan
    }

    fn eval(&self, args: &[Expr]) -> Option<Expr> {
        tan_eval(args.first()?, &config())
    }

    fn fdiff(&self, args: &[Expr], argindex: usize) -> Result<Expr, SymbolicError> {
        if argindex != 1 {
            return Err(SymbolicError::ArgumentIndex { function: Function::tan, index: argindex });
        }
        let t = Expr::func(Function::tan, vec![single(args, Function::tan)?.clone()]);
        Ok(Expr::one() + sq(&t))
    }

    fn rewrite(&self, args: &[Expr], target: RewriteTarget) -> Option<Expr> {
        let a = args.first()?.clone();
        let i = Expr::I();
        match target {
            RewriteTarget::Pow => {
                let x = argument_of(&a, Function::log)?.clone();
                let xm = x.clone().pow(-i.clone());
                let xp = x.pow(i.clone());
                Some(i * (xm.clone() - xp.clone()) / (xm + xp))
            }
            RewriteTarget::exp => {
                let neg = exp(-i.clone() * a.clone());
                let pos = exp(i.clone() * a);
                Some(i * (neg.clone() - pos.clone()) / (neg + pos))
            }
            RewriteTarget::sin => {
                let s = Expr::func(Function::sin, vec![a.clone()]);
                Some(Expr::integer(2) * sq(&s) / Expr::func(Function::sin, vec![Expr::integer(2) * a]))
            }
            RewriteTarget::cos => {
                let shifted = Expr::func_unevaluated(Function::cos, vec![a.clone() + half_pi()]);
                Some(-shifted / Expr::func(Function::cos, vec![a]))
            }
            RewriteTarget::sincos => Some(
                Expr::func(Function::sin, vec![a.clone()]) / Expr::func(Function::cos, vec![a]),
            ),
            RewriteTarget::cot => Some(Expr::one() / cot(a)),
            RewriteTarget::pow | RewriteTarget::sqrt => {
                let num = cos_as_radical(&(a.clone() + half_pi()))?;
                let den = cos_as_radical(&a)?;
                let y = -num / den;
                if y.has_func(Function::cos) { None } else { Some(y) }
            }
            _ => None,
        }
    }

    fn expand_trig(&self, args: &[Expr]) -> Option<Expr> {
        let a = args.first()?;
        if let Expr::Add(terms) = a {
            return Some(tan_of_sum(terms));
        }
        let (coeff, terms) = a.as_coeff_Mul();
        if coeff.is_integer() && coeff > BigRational::one() {
            let n = coeff.numer().to_u64()?;
            return Some(tan_of_multiple(n, &Expr::func(Function::tan, vec![terms])));
        }
        None
    }

    fn taylor_term(&self, n: i64, x: &Expr, previous: &[Expr]) -> Option<Expr> {
        trig_series::taylor_term(Function::tan, n, x, previous)
    }

    fn is_real(&self, args: &[Expr]) -> Fuzzy {
        let Some(a) = args.first() else {
            return Fuzzy::Unknown;
        };
        if !a.is_real().is_true() {
            return Fuzzy::Unknown;
        }
        // real away from the poles at odd multiples of pi/2
        let half_turns = Expr::integer(2) * a.clone() / Expr::pi();
        match half_turns.is_integer() {
            Fuzzy::False => Fuzzy::True,
            _ => Fuzzy::Unknown,
        }
    }

    fn is_finite(&self, args: &[Expr]) -> Fuzzy {
        match args.first() {
            Some(a) if a.is_imaginary().is_true() => Fuzzy::True,
            _ => Fuzzy::Unknown,
        }
    }

    fn is_rational(&self, args: &[Expr]) -> Fuzzy {
        primary_is_rational(Function::tan, args)
    }

    fn is_algebraic(&self, args: &[Expr]) -> Fuzzy {
        primary_is_algebraic(Function::tan, args, true)
    }

    fn conjugate(&self, args: &[Expr]) -> Option<Expr> {
        Some(Expr::func(Function::tan, vec![args.first()?.conjugate()]))
    }

    fn as_real_imag(&self, args: &[Expr]) -> Option<(Expr, Expr)> {
        let (re, im) = args.first()?.as_real_imag();
        if im.is_zero_literal() {
            return Some((Expr::func(Function::tan, vec![re]), Expr::zero()));
        }
        let two = Expr::integer(2);
        let denom = Expr::func(Function::cos, vec![two.clone() * re.clone()]) + cosh(two.clone() * im.clone());
        Some((
            Expr::func(Function::sin, vec![two.clone() * re]) / denom.clone(),
            sinh(two * im) / denom,
        ))
    }

    fn as_leading_term(&self, args: &[Expr], x: &Expr) -> Option<Expr> {
        let arg = args.first()?.as_leading_term(x);
        if arg.vanishes_at_zero(x) {
            return Some(arg);
        }
        Some(Expr::func(Function::tan, vec![arg]))
    }

    fn inverse(&self) -> Option<Function> {
        Some(Function::atan)
    }
}

//___________________________________SHARED PREDICATES____________________________________

pub(crate) fn real_if_real_argument(args: &[Expr]) -> Fuzzy {
    match args.first() {
        Some(a) if a.is_real().is_true() => Fuzzy::True,
        _ => Fuzzy::Unknown,
    }
}

/// Rationality of `f(arg)`: an evaluated value answers for itself; an unevaluated node at
/// a nonzero rational argument is irrational.
pub(crate) fn primary_is_rational(f: Function, args: &[Expr]) -> Fuzzy {
    let s = Expr::func(f, args.to_vec());
    match &s {
        Expr::Func(g, inner) if *g == f => {
            let a = &inner[0];
            if a.is_zero().is_true() {
                return Fuzzy::True;
            }
            if a.is_rational().is_true() && a.is_zero().is_false() {
                return Fuzzy::False;
            }
            Fuzzy::Unknown
        }
        _ => s.is_rational(),
    }
}

/// Algebraicity of `f(arg)`: transcendental at nonzero algebraic arguments, algebraic at
/// rational multiples of `pi` (for `tan` only away from the poles).
pub(crate) fn primary_is_algebraic(f: Function, args: &[Expr], poles: bool) -> Fuzzy {
    let s = Expr::func(f, args.to_vec());
    match &s {
        Expr::Func(g, inner) if *g == f => {
            let a = &inner[0];
            if a.is_zero().is_false() && a.is_algebraic().is_true() {
                return Fuzzy::False;
            }
            if let Some(c) = pi_coeff(a, 1).as_ref().and_then(|pc| pc.as_rational()) {
                if poles && (c * rat(2, 1)).is_integer() {
                    return Fuzzy::Unknown;
                }
                return Fuzzy::True;
            }
            Fuzzy::Unknown
        }
        _ => s.is_algebraic(),
    }
}
