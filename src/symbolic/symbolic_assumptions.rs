//! # Assumptions Module
//!
//! Three-valued structural predicates on expressions and the small decomposition queries the
//! trigonometric evaluators are written against.
//!
//! ## Predicates
//! `is_integer`, `is_even`, `is_odd`, `is_real`, `is_imaginary`, `is_positive`,
//! `is_negative`, `is_zero`, `is_rational`, `is_algebraic`, `is_finite` all return
//! [`Fuzzy`]. Symbols answer from their [`Domain`]; function nodes answer through their
//! registered definition; exact numeric expressions with no answer from structure fall
//! back to a floating point sign oracle (`evalf`).
//!
//! ## Decomposition
//! - `could_extract_minus_sign`: canonical sign normal form for odd/even functions
//! - `as_coefficient`: `c` such that `self == c*unit`
//! - `coeff`: cofactor of a factor inside a product
//! - `conjugate`, `as_real_imag`: complex structure
//! - `as_leading_term`: leading term of an expansion around `x = 0`

use crate::symbolic::fuzzy_logic::{Fuzzy, fuzzy_and};
use crate::symbolic::symbolic_engine::{Domain, Expr, Function};
use crate::symbolic::symbolic_traits::{SymbolicFunction, definition};
use num::{BigInt, BigRational, Integer, One, Signed, ToPrimitive, Zero};
use std::f64::consts::PI;

/// Below this magnitude the float oracle refuses to decide a sign.
const SIGN_TOLERANCE: f64 = 1e-12;

impl Expr {
    //___________________________________NUMBER CLASSES____________________________________

    pub fn is_integer(&self) -> Fuzzy {
        match self {
            Expr::Number(r) => Fuzzy::from_bool(r.is_integer()),
            Expr::Float(x) => {
                if x.0.fract() == 0.0 { Fuzzy::Unknown } else { Fuzzy::False }
            }
            Expr::Symbol(s) => match s.domain {
                Domain::Integer | Domain::Even | Domain::Odd => Fuzzy::True,
                _ => Fuzzy::Unknown,
            },
            Expr::Pi
            | Expr::ImaginaryUnit
            | Expr::Infinity
            | Expr::NegativeInfinity
            | Expr::ComplexInfinity => Fuzzy::False,
            Expr::NaN => Fuzzy::Unknown,
            Expr::Add(args) => {
                let classes: Vec<Fuzzy> = args.iter().map(|a| a.is_integer()).collect();
                if classes.iter().all(|c| c.is_true()) {
                    return Fuzzy::True;
                }
                let non_integer: Vec<&Expr> = args
                    .iter()
                    .zip(classes.iter())
                    .filter(|(_, c)| !c.is_true())
                    .map(|(a, _)| a)
                    .collect();
                if non_integer.len() == 1 && non_integer[0].is_integer().is_false() {
                    if let Expr::Number(_) = non_integer[0] {
                        return Fuzzy::False;
                    }
                    if non_integer[0].is_rational().is_false() {
                        return Fuzzy::False;
                    }
                }
                Fuzzy::Unknown
            }
            Expr::Mul(args) => {
                if args.iter().all(|a| a.is_integer().is_true()) {
                    return Fuzzy::True;
                }
                if self.is_rational().is_false() {
                    return Fuzzy::False;
                }
                let (c, rest) = self.as_coeff_Mul();
                if !c.is_integer() && rest.is_integer().is_true() {
                    let q = c.denom();
                    if q.is_even() && rest.is_odd().is_true() {
                        return Fuzzy::False;
                    }
                    if *q == BigInt::from(2) && rest.is_even().is_true() {
                        return Fuzzy::True;
                    }
                }
                Fuzzy::Unknown
            }
            Expr::Pow(b, e) => {
                if b.is_integer().is_true() {
                    if let Expr::Number(r) = e.as_ref() {
                        if r.is_integer() && !r.is_negative() {
                            return Fuzzy::True;
                        }
                    }
                    if e.is_integer().is_true() && e.is_negative().is_false() {
                        return Fuzzy::True;
                    }
                }
                if self.is_rational().is_false() {
                    return Fuzzy::False;
                }
                Fuzzy::Unknown
            }
            Expr::Func(_, _) => {
                if self.is_rational().is_false() { Fuzzy::False } else { Fuzzy::Unknown }
            }
        }
    }

    pub fn is_even(&self) -> Fuzzy {
        match self {
            Expr::Number(r) => Fuzzy::from_bool(r.is_integer() && r.numer().is_even()),
            Expr::Symbol(s) => match s.domain {
                Domain::Even => Fuzzy::True,
                Domain::Odd => Fuzzy::False,
                _ => Fuzzy::Unknown,
            },
            Expr::Mul(args) => {
                if !self.is_integer().is_true() {
                    return self.is_integer().and(Fuzzy::Unknown);
                }
                if !args.iter().all(|a| a.is_integer().is_true()) {
                    return Fuzzy::Unknown;
                }
                if args.iter().any(|a| a.is_even().is_true()) {
                    return Fuzzy::True;
                }
                if args.iter().all(|a| a.is_odd().is_true()) {
                    return Fuzzy::False;
                }
                Fuzzy::Unknown
            }
            Expr::Add(args) => {
                if !args.iter().all(|a| a.is_integer().is_true()) {
                    return self.is_integer().and(Fuzzy::Unknown);
                }
                let mut odd_terms = 0usize;
                for a in args {
                    match a.is_odd().known() {
                        Some(true) => odd_terms += 1,
                        Some(false) => {}
                        None => return Fuzzy::Unknown,
                    }
                }
                Fuzzy::from_bool(odd_terms % 2 == 0)
            }
            _ => self.is_integer().and(Fuzzy::Unknown),
        }
    }

    pub fn is_odd(&self) -> Fuzzy {
        match self.is_integer() {
            Fuzzy::True => self.is_even().not(),
            Fuzzy::False => Fuzzy::False,
            Fuzzy::Unknown => Fuzzy::Unknown,
        }
    }

    pub fn is_rational(&self) -> Fuzzy {
        match self {
            Expr::Number(_) => Fuzzy::True,
            Expr::Float(_) | Expr::NaN => Fuzzy::Unknown,
            Expr::Symbol(s) => match s.domain {
                Domain::Integer | Domain::Even | Domain::Odd => Fuzzy::True,
                _ => Fuzzy::Unknown,
            },
            Expr::Pi
            | Expr::ImaginaryUnit
            | Expr::Infinity
            | Expr::NegativeInfinity
            | Expr::ComplexInfinity => Fuzzy::False,
            Expr::Add(args) => one_odd_member(args, |a| a.is_rational(), false),
            Expr::Mul(args) => one_odd_member(args, |a| a.is_rational(), true),
            Expr::Pow(b, e) => match (b.as_ref(), e.as_ref()) {
                // canonical numeric radicals have had every perfect power extracted
                (Expr::Number(_), Expr::Number(r)) => Fuzzy::from_bool(r.is_integer()),
                _ => {
                    if b.is_rational().is_true() && e.is_integer().is_true() {
                        Fuzzy::True
                    } else {
                        Fuzzy::Unknown
                    }
                }
            },
            Expr::Func(f, args) => definition(*f).is_rational(args),
        }
    }

    pub fn is_algebraic(&self) -> Fuzzy {
        match self {
            Expr::Number(_) | Expr::ImaginaryUnit => Fuzzy::True,
            Expr::Pi => Fuzzy::False,
            Expr::Float(_) | Expr::NaN => Fuzzy::Unknown,
            Expr::Infinity | Expr::NegativeInfinity | Expr::ComplexInfinity => Fuzzy::False,
            Expr::Symbol(_) => {
                if self.is_rational().is_true() { Fuzzy::True } else { Fuzzy::Unknown }
            }
            Expr::Add(args) => one_odd_member(args, |a| a.is_algebraic(), false),
            Expr::Mul(args) => one_odd_member(args, |a| a.is_algebraic(), true),
            Expr::Pow(b, e) => {
                if b.is_algebraic().is_true() && e.is_rational().is_true() {
                    Fuzzy::True
                } else {
                    Fuzzy::Unknown
                }
            }
            Expr::Func(f, args) => definition(*f).is_algebraic(args),
        }
    }

    /// Extended-real: infinities of either sign count as real.
    pub fn is_real(&self) -> Fuzzy {
        match self {
            Expr::Number(_) | Expr::Float(_) | Expr::Pi | Expr::Infinity | Expr::NegativeInfinity => {
                Fuzzy::True
            }
            Expr::ImaginaryUnit | Expr::ComplexInfinity => Fuzzy::False,
            Expr::NaN => Fuzzy::Unknown,
            Expr::Symbol(s) => match s.domain {
                Domain::Complex => Fuzzy::Unknown,
                _ => Fuzzy::True,
            },
            Expr::Add(args) => one_odd_member(args, |a| a.is_real(), false),
            Expr::Mul(args) => {
                let classes: Vec<Fuzzy> = args.iter().map(|a| a.is_real()).collect();
                if classes.iter().all(|c| c.is_true()) {
                    return Fuzzy::True;
                }
                let imaginary = args.iter().filter(|a| a.is_imaginary().is_true()).count();
                let real = classes.iter().filter(|c| c.is_true()).count();
                if imaginary == 1 && real + 1 == args.len() {
                    return Fuzzy::False;
                }
                if imaginary == 2 && real + 2 == args.len() {
                    return Fuzzy::True;
                }
                Fuzzy::Unknown
            }
            Expr::Pow(b, e) => {
                if b.is_real().is_true() && e.is_integer().is_true() {
                    return Fuzzy::True;
                }
                if b.is_positive().is_true() && e.is_real().is_true() {
                    return Fuzzy::True;
                }
                if b.is_imaginary().is_true() && e.is_integer().is_true() {
                    return e.is_even();
                }
                Fuzzy::Unknown
            }
            Expr::Func(f, args) => definition(*f).is_real(args),
        }
    }

    /// Purely imaginary and nonzero: `I*t` with real nonzero `t`.
    pub fn is_imaginary(&self) -> Fuzzy {
        match self {
            Expr::ImaginaryUnit => Fuzzy::True,
            Expr::Number(_) | Expr::Float(_) | Expr::Pi | Expr::Infinity | Expr::NegativeInfinity => {
                Fuzzy::False
            }
            Expr::Mul(_) => match self.as_coefficient(&Expr::ImaginaryUnit) {
                Some(t) => t.is_real().and(t.is_zero().not()),
                None => {
                    if self.is_real().is_true() { Fuzzy::False } else { Fuzzy::Unknown }
                }
            },
            Expr::Symbol(s) if s.domain != Domain::Complex => Fuzzy::False,
            _ => Fuzzy::Unknown,
        }
    }

    pub fn is_finite(&self) -> Fuzzy {
        match self {
            Expr::Number(_) | Expr::Float(_) | Expr::Pi | Expr::ImaginaryUnit => Fuzzy::True,
            Expr::Infinity | Expr::NegativeInfinity | Expr::ComplexInfinity | Expr::NaN => {
                Fuzzy::False
            }
            Expr::Symbol(_) => Fuzzy::Unknown,
            Expr::Add(args) | Expr::Mul(args) => fuzzy_and(args.iter().map(|a| a.is_finite())),
            Expr::Pow(b, e) => {
                if b.is_finite().is_true() && e.is_finite().is_true() && b.is_zero().is_false() {
                    Fuzzy::True
                } else {
                    Fuzzy::Unknown
                }
            }
            Expr::Func(f, args) => definition(*f).is_finite(args),
        }
    }

    //___________________________________SIGNS____________________________________

    pub fn is_zero(&self) -> Fuzzy {
        match self {
            Expr::Number(r) => Fuzzy::from_bool(r.is_zero()),
            Expr::Float(x) => Fuzzy::from_bool(x.0 == 0.0),
            Expr::Pi
            | Expr::ImaginaryUnit
            | Expr::Infinity
            | Expr::NegativeInfinity
            | Expr::ComplexInfinity => Fuzzy::False,
            Expr::Symbol(s) => match s.domain {
                Domain::Positive | Domain::Odd => Fuzzy::False,
                _ => Fuzzy::Unknown,
            },
            Expr::Mul(args) => {
                let classes: Vec<Fuzzy> = args.iter().map(|a| a.is_zero()).collect();
                if classes.iter().any(|c| c.is_true()) {
                    Fuzzy::True
                } else if classes.iter().all(|c| c.is_false()) {
                    Fuzzy::False
                } else {
                    Fuzzy::Unknown
                }
            }
            Expr::Pow(b, e) => {
                if b.is_zero().is_false() && e.is_finite().is_true() {
                    Fuzzy::False
                } else {
                    Fuzzy::Unknown
                }
            }
            _ => match self.numeric_sign() {
                Some(s) => Fuzzy::from_bool(s == 0),
                None => {
                    if self.is_imaginary().is_true() { Fuzzy::False } else { Fuzzy::Unknown }
                }
            },
        }
    }

    pub fn is_positive(&self) -> Fuzzy {
        match self {
            Expr::Number(r) => Fuzzy::from_bool(r.is_positive()),
            Expr::Float(x) => Fuzzy::from_bool(x.0 > 0.0),
            Expr::Pi | Expr::Infinity => Fuzzy::True,
            Expr::NegativeInfinity => Fuzzy::False,
            Expr::ImaginaryUnit | Expr::ComplexInfinity => Fuzzy::False,
            Expr::NaN => Fuzzy::Unknown,
            Expr::Symbol(s) => match s.domain {
                Domain::Positive => Fuzzy::True,
                _ => Fuzzy::Unknown,
            },
            Expr::Func(f, args) => {
                let answer = definition(*f).is_positive(args);
                if answer.is_unknown() {
                    self.sign_from_oracle(|s| s > 0)
                } else {
                    answer
                }
            }
            Expr::Mul(args) => {
                let mut negatives = 0usize;
                for a in args {
                    if a.is_positive().is_true() {
                        continue;
                    }
                    if a.is_negative().is_true() {
                        negatives += 1;
                        continue;
                    }
                    return self.sign_from_oracle(|s| s > 0);
                }
                Fuzzy::from_bool(negatives % 2 == 0)
            }
            Expr::Add(args) => {
                if args.iter().all(|a| a.is_positive().is_true()) {
                    return Fuzzy::True;
                }
                if args.iter().all(|a| a.is_negative().is_true()) {
                    return Fuzzy::False;
                }
                self.sign_from_oracle(|s| s > 0)
            }
            Expr::Pow(b, e) => {
                if b.is_positive().is_true() && e.is_real().is_true() {
                    return Fuzzy::True;
                }
                self.sign_from_oracle(|s| s > 0)
            }
        }
    }

    pub fn is_negative(&self) -> Fuzzy {
        match self {
            Expr::Number(r) => Fuzzy::from_bool(r.is_negative()),
            Expr::Float(x) => Fuzzy::from_bool(x.0 < 0.0),
            Expr::NegativeInfinity => Fuzzy::True,
            Expr::Pi | Expr::Infinity => Fuzzy::False,
            Expr::ImaginaryUnit | Expr::ComplexInfinity => Fuzzy::False,
            Expr::NaN => Fuzzy::Unknown,
            Expr::Symbol(s) => match s.domain {
                Domain::Positive => Fuzzy::False,
                _ => Fuzzy::Unknown,
            },
            Expr::Mul(args) => {
                let mut negatives = 0usize;
                for a in args {
                    if a.is_positive().is_true() {
                        continue;
                    }
                    if a.is_negative().is_true() {
                        negatives += 1;
                        continue;
                    }
                    return self.sign_from_oracle(|s| s < 0);
                }
                Fuzzy::from_bool(negatives % 2 == 1)
            }
            Expr::Add(args) => {
                if args.iter().all(|a| a.is_negative().is_true()) {
                    return Fuzzy::True;
                }
                if args.iter().all(|a| a.is_positive().is_true()) {
                    return Fuzzy::False;
                }
                self.sign_from_oracle(|s| s < 0)
            }
            _ => {
                if self.is_real().is_true() && self.is_positive().is_true() {
                    return Fuzzy::False;
                }
                self.sign_from_oracle(|s| s < 0)
            }
        }
    }

    pub fn is_nonnegative(&self) -> Fuzzy {
        if self.is_real().is_false() {
            return Fuzzy::False;
        }
        self.is_negative().not().and(self.is_real())
    }

    pub fn is_nonpositive(&self) -> Fuzzy {
        if self.is_real().is_false() {
            return Fuzzy::False;
        }
        self.is_positive().not().and(self.is_real())
    }

    fn sign_from_oracle<F: Fn(i8) -> bool>(&self, test: F) -> Fuzzy {
        match self.numeric_sign() {
            Some(s) => Fuzzy::from_bool(test(s)),
            None => Fuzzy::Unknown,
        }
    }

    /// Sign of a real numeric expression, `None` when it cannot be decided.
    pub fn numeric_sign(&self) -> Option<i8> {
        if !self.is_number() {
            return None;
        }
        let v = self.evalf()?;
        if v.abs() < SIGN_TOLERANCE {
            if self.is_zero_literal() {
                return Some(0);
            }
            return None;
        }
        Some(if v > 0.0 { 1 } else { -1 })
    }

    /// Floating point value of a real expression without free symbols.
    ///
    /// Used as a sign oracle; any complex intermediate yields `None`.
    pub fn evalf(&self) -> Option<f64> {
        let v = match self {
            Expr::Number(r) => r.to_f64()?,
            Expr::Float(x) => x.0,
            Expr::Pi => PI,
            Expr::Infinity => f64::INFINITY,
            Expr::NegativeInfinity => f64::NEG_INFINITY,
            Expr::Add(args) => {
                let mut s = 0.0;
                for a in args {
                    s += a.evalf()?;
                }
                s
            }
            Expr::Mul(args) => {
                let mut p = 1.0;
                for a in args {
                    p *= a.evalf()?;
                }
                p
            }
            Expr::Pow(b, e) => {
                let b = b.evalf()?;
                let e = e.evalf()?;
                if b < 0.0 && e.fract() != 0.0 {
                    return None;
                }
                b.powf(e)
            }
            Expr::Func(f, args) => {
                let vals: Option<Vec<f64>> = args.iter().map(|a| a.evalf()).collect();
                eval_function_f64(*f, &vals?)?
            }
            _ => return None,
        };
        if v.is_nan() { None } else { Some(v) }
    }

    //___________________________________STRUCTURE____________________________________

    /// Whether the leading sign can be pulled out so that `-self` is the preferred form.
    ///
    /// Numbers and products look at their coefficient; sums count their extractable terms
    /// and break ties with the structural order, so that exactly one of `e` and `-e`
    /// answers `true` whenever `e != -e`.
    pub fn could_extract_minus_sign(&self) -> bool {
        match self {
            Expr::Number(r) => r.is_negative(),
            Expr::Float(x) => x.0 < 0.0,
            Expr::NegativeInfinity => true,
            Expr::Mul(args) => match args.first() {
                Some(Expr::Number(r)) => r.is_negative(),
                Some(Expr::Float(x)) => x.0 < 0.0,
                _ => false,
            },
            Expr::Add(args) => {
                let negative = args.iter().filter(|a| a.could_extract_minus_sign()).count();
                let positive = args.len() - negative;
                if negative != positive {
                    return negative > positive;
                }
                let negated = -self.clone();
                if negated == *self {
                    return false;
                }
                *self < negated
            }
            _ => false,
        }
    }

    /// `c` such that `self == c*unit`, with `c` free of `unit`.
    pub fn as_coefficient(&self, unit: &Expr) -> Option<Expr> {
        if self == unit {
            return Some(Expr::one());
        }
        match self {
            Expr::Mul(args) => {
                let pos = args.iter().position(|a| a == unit)?;
                let mut rest = args.clone();
                rest.remove(pos);
                let c = Expr::mul_all(rest);
                if c.has(unit) { None } else { Some(c) }
            }
            Expr::Add(args) => {
                let parts: Option<Vec<Expr>> = args.iter().map(|a| a.as_coefficient(unit)).collect();
                let c = Expr::add_all(parts?);
                if c.is_zero_literal() { None } else { Some(c) }
            }
            _ => None,
        }
    }

    /// Cofactor of `factor` in a product (`3*x*pi` gives `3*x` for `pi`).
    pub fn coeff(&self, factor: &Expr) -> Option<Expr> {
        if self == factor {
            return Some(Expr::one());
        }
        match self {
            Expr::Mul(args) => {
                let pos = args.iter().position(|a| a == factor)?;
                let mut rest = args.clone();
                rest.remove(pos);
                Some(Expr::mul_all(rest))
            }
            _ => None,
        }
    }

    pub fn conjugate(&self) -> Expr {
        match self {
            Expr::ImaginaryUnit => -Expr::ImaginaryUnit,
            Expr::Number(_)
            | Expr::Float(_)
            | Expr::Pi
            | Expr::Infinity
            | Expr::NegativeInfinity
            | Expr::ComplexInfinity
            | Expr::NaN => self.clone(),
            Expr::Symbol(_) => {
                if self.is_real().is_true() {
                    self.clone()
                } else {
                    Expr::func(Function::conjugate, vec![self.clone()])
                }
            }
            Expr::Add(args) => Expr::add_all(args.iter().map(|a| a.conjugate()).collect()),
            Expr::Mul(args) => Expr::mul_all(args.iter().map(|a| a.conjugate()).collect()),
            Expr::Pow(b, e) => {
                if e.is_real().is_true() && (e.is_integer().is_true() || b.is_positive().is_true()) {
                    Expr::pow(b.conjugate(), (**e).clone())
                } else {
                    Expr::func(Function::conjugate, vec![self.clone()])
                }
            }
            Expr::Func(f, args) => match definition(*f).conjugate(args) {
                Some(c) => c,
                None => Expr::func(Function::conjugate, vec![self.clone()]),
            },
        }
    }

    /// Real and imaginary parts `(re, im)` with `self == re + I*im`.
    pub fn as_real_imag(&self) -> (Expr, Expr) {
        if self.is_real().is_true() {
            return (self.clone(), Expr::zero());
        }
        match self {
            Expr::ImaginaryUnit => (Expr::zero(), Expr::one()),
            Expr::Add(args) => {
                let (re, im): (Vec<Expr>, Vec<Expr>) = args.iter().map(|a| a.as_real_imag()).unzip();
                (Expr::add_all(re), Expr::add_all(im))
            }
            Expr::Mul(args) => {
                let mut re = Expr::one();
                let mut im = Expr::zero();
                for a in args {
                    let (ar, ai) = a.as_real_imag();
                    let next_re = re.clone() * ar.clone() - im.clone() * ai.clone();
                    let next_im = re * ai + im * ar;
                    re = next_re;
                    im = next_im;
                }
                (re, im)
            }
            Expr::Pow(b, e) => {
                if let Some(n) = e.as_integer() {
                    let (br, bi) = b.as_real_imag();
                    if n == -BigInt::one() {
                        let d = br.clone().pow(Expr::integer(2)) + bi.clone().pow(Expr::integer(2));
                        return (br / d.clone(), -bi / d);
                    }
                    if n.is_positive() && n <= BigInt::from(16) && b.is_add() {
                        let expanded = self.expand();
                        if !expanded.is_pow() {
                            return expanded.as_real_imag();
                        }
                    }
                }
                (
                    Expr::func(Function::re, vec![self.clone()]),
                    Expr::func(Function::im, vec![self.clone()]),
                )
            }
            Expr::Func(f, args) => match definition(*f).as_real_imag(args) {
                Some(parts) => parts,
                None => (
                    Expr::func(Function::re, vec![self.clone()]),
                    Expr::func(Function::im, vec![self.clone()]),
                ),
            },
            _ => (
                Expr::func(Function::re, vec![self.clone()]),
                Expr::func(Function::im, vec![self.clone()]),
            ),
        }
    }

    pub fn is_pow(&self) -> bool {
        matches!(self, Expr::Pow(_, _))
    }

    //___________________________________LEADING TERM____________________________________

    /// Leading term of the expansion around `x = 0`.
    pub fn as_leading_term(&self, x: &Expr) -> Expr {
        if !self.has(x) {
            return self.clone();
        }
        match self {
            Expr::Add(args) => {
                let leads: Vec<Expr> = args.iter().map(|a| a.as_leading_term(x)).collect();
                let orders: Option<Vec<BigRational>> = leads.iter().map(|l| l.order_in(x)).collect();
                match orders {
                    Some(orders) => {
                        let min = orders.iter().min().cloned().unwrap_or_else(BigRational::zero);
                        let kept = leads
                            .into_iter()
                            .zip(orders.iter())
                            .filter(|(_, o)| **o == min)
                            .map(|(l, _)| l)
                            .collect();
                        Expr::add_all(kept)
                    }
                    None => self.clone(),
                }
            }
            Expr::Mul(args) => Expr::mul_all(args.iter().map(|a| a.as_leading_term(x)).collect()),
            Expr::Pow(b, e) if !e.has(x) => Expr::pow(b.as_leading_term(x), (**e).clone()),
            Expr::Func(f, args) => definition(*f)
                .as_leading_term(args, x)
                .unwrap_or_else(|| self.clone()),
            _ => self.clone(),
        }
    }

    /// Power of `x` in a monomial leading term; `None` when the term is not a monomial.
    pub fn order_in(&self, x: &Expr) -> Option<BigRational> {
        if !self.has(x) {
            return Some(BigRational::zero());
        }
        if self == x {
            return Some(BigRational::one());
        }
        match self {
            Expr::Pow(b, e) if **b == *x => e.as_rational().cloned(),
            Expr::Mul(args) => {
                let mut total = BigRational::zero();
                for a in args {
                    total += a.order_in(x)?;
                }
                Some(total)
            }
            _ => None,
        }
    }

    /// Whether the expression depends on `x` and vanishes as `x -> 0`.
    pub fn vanishes_at_zero(&self, x: &Expr) -> bool {
        self.has(x) && self.order_in(x).map(|o| o.is_positive()).unwrap_or(false)
    }

    /// Whether the expression stays bounded as `x -> 0`.
    pub fn bounded_at_zero(&self, x: &Expr) -> bool {
        self.order_in(x).map(|o| !o.is_negative()).unwrap_or(false)
    }
}

/// Shared rule for sums and products: all members in the class gives `True`; exactly one
/// member provably outside it, the rest inside (and nonzero for products) gives `False`.
fn one_odd_member<F: Fn(&Expr) -> Fuzzy>(args: &[Expr], class: F, product: bool) -> Fuzzy {
    let classes: Vec<Fuzzy> = args.iter().map(&class).collect();
    if classes.iter().all(|c| c.is_true()) {
        return Fuzzy::True;
    }
    let outside = classes.iter().filter(|c| c.is_false()).count();
    let inside = classes.iter().filter(|c| c.is_true()).count();
    if outside == 1 && inside + 1 == args.len() {
        if product {
            let nonzero = args
                .iter()
                .zip(classes.iter())
                .filter(|(_, c)| c.is_true())
                .all(|(a, _)| a.is_zero().is_false());
            if nonzero {
                return Fuzzy::False;
            }
            return Fuzzy::Unknown;
        }
        return Fuzzy::False;
    }
    Fuzzy::Unknown
}

fn eval_function_f64(f: Function, v: &[f64]) -> Option<f64> {
    let x = *v.first()?;
    let out = match f {
        Function::sin => x.sin(),
        Function::cos => x.cos(),
        Function::tan => x.tan(),
        Function::cot => 1.0 / x.tan(),
        Function::sec => 1.0 / x.cos(),
        Function::csc => 1.0 / x.sin(),
        Function::asin if x.abs() <= 1.0 => x.asin(),
        Function::acos if x.abs() <= 1.0 => x.acos(),
        Function::atan => x.atan(),
        Function::acot => {
            if x == 0.0 { PI / 2.0 } else { (1.0 / x).atan() }
        }
        Function::asec if x.abs() >= 1.0 => (1.0 / x).acos(),
        Function::acsc if x.abs() >= 1.0 => (1.0 / x).asin(),
        Function::atan2 => x.atan2(*v.get(1)?),
        Function::sinh => x.sinh(),
        Function::cosh => x.cosh(),
        Function::tanh => x.tanh(),
        Function::coth => 1.0 / x.tanh(),
        Function::sech => 1.0 / x.cosh(),
        Function::csch => 1.0 / x.sinh(),
        Function::asinh => x.asinh(),
        Function::atanh if x.abs() < 1.0 => x.atanh(),
        Function::acoth if x.abs() > 1.0 => (1.0 / x).atanh(),
        Function::exp => x.exp(),
        Function::log if x > 0.0 => x.ln(),
        Function::re | Function::conjugate => x,
        Function::im => 0.0,
        Function::Heaviside => {
            if x > 0.0 {
                1.0
            } else if x < 0.0 {
                0.0
            } else {
                0.5
            }
        }
        _ => return None,
    };
    Some(out)
}
