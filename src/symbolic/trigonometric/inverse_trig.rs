//! # Inverse Trigonometric Functions
//!
//! ## Purpose
//! `asin`, `acos`, `atan`, `acot`, `asec`, `acsc` and the two-argument `atan2(y, x)`.
//!
//! ## Evaluation
//! - **Special arguments**: `0`, `1`, `-1` and the infinities
//! - **Tables**: algebraic arguments that are the sine (cosine, ...) of a rational multiple
//!   of `pi`, see `exact_values`
//! - **Sign extraction** for the odd functions and the imaginary-argument mirror to the
//!   inverse hyperbolic functions
//! - **atan2**: quadrant selection by the signs of both coordinates
//!
//! ## Key Methods
//! Each definition offers `rewrite` into `log` and into every sibling inverse function,
//! `fdiff`, and Taylor terms about zero where the function is analytic there.

use crate::symbolic::elementary::{acoth, asinh, atanh, heaviside, im, log, re, single};
use crate::symbolic::fuzzy_logic::{Fuzzy, fuzzy_and};
use crate::symbolic::symbolic_engine::{Expr, Function};
use crate::symbolic::symbolic_traits::{RewriteTarget, SymbolicError, SymbolicFunction};
use crate::symbolic::trigonometric::exact_values::{
    ACOS_VALUES, ACOT_VALUES, ASIN_VALUES, ATAN_VALUES, lookup, lookup_odd,
};
use crate::symbolic::trigonometric::{acos, acot, acsc, asec, asin, atan, trig_series};

fn sq(x: &Expr) -> Expr {
    x.clone().pow(Expr::integer(2))
}

fn half_pi() -> Expr {
    Expr::pi() / Expr::integer(2)
}

/// `sqrt(1 - x**2)`
fn cosine_of_asin(x: &Expr) -> Expr {
    (Expr::one() - sq(x)).sqrt()
}

/// `sqrt(x**2)/x`, the sign of a real `x`.
fn sign_factor(x: &Expr) -> Expr {
    sq(x).sqrt() / x.clone()
}

/// `x*sqrt(1/x**2)`, the sign of a real `x`.
fn sign_factor_inverted(x: &Expr) -> Expr {
    x.clone() * (Expr::one() / sq(x)).sqrt()
}

fn first(args: &[Expr]) -> Option<Expr> {
    args.first().cloned()
}

/// Leading term shared by the functions that vanish with their argument.
fn vanishing_leading_term(f: Function, args: &[Expr], x: &Expr) -> Option<Expr> {
    let arg = args.first()?.as_leading_term(x);
    if arg.vanishes_at_zero(x) {
        return Some(arg);
    }
    Some(Expr::func(f, vec![arg]))
}

/// `-1 <= x <= 1` for real `x`.
fn in_unit_interval(x: &Expr) -> Fuzzy {
    fuzzy_and([
        x.is_real(),
        (x.clone() - Expr::one()).is_nonpositive(),
        (x.clone() + Expr::one()).is_nonnegative(),
    ])
}

fn is_infinite_literal(x: &Expr) -> bool {
    matches!(x, Expr::Infinity | Expr::NegativeInfinity | Expr::ComplexInfinity)
}

fn bad_index(f: Function, argindex: usize) -> SymbolicError {
    SymbolicError::ArgumentIndex { function: f, index: argindex }
}

//___________________________________ARCSINE____________________________________

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Asin;

impl SymbolicFunction for Asin {
    fn tag(&self) -> Function {
        Function::asin
    }

    fn eval(&self, args: &[Expr]) -> Option<Expr> {
        let x = args.first()?;
        match x {
            Expr::Infinity => return Some(Expr::NegativeInfinity * Expr::I()),
            Expr::NegativeInfinity => return Some(Expr::Infinity * Expr::I()),
            _ => {}
        }
        if x.is_zero_literal() {
            return Some(Expr::zero());
        }
        if x.is_one_literal() {
            return Some(half_pi());
        }
        if *x == Expr::neg_one() {
            return Some(-half_pi());
        }
        if let Some(v) = lookup_odd(&ASIN_VALUES, x) {
            return Some(v);
        }
        if x.could_extract_minus_sign() {
            return Some(-asin(-x.clone()));
        }
        let t = x.as_coefficient(&Expr::I())?;
        Some(Expr::I() * asinh(t))
    }

    fn fdiff(&self, args: &[Expr], argindex: usize) -> Result<Expr, SymbolicError> {
        if argindex != 1 {
            return Err(bad_index(Function::asin, argindex));
        }
        Ok(Expr::one() / cosine_of_asin(single(args, Function::asin)?))
    }

    fn rewrite(&self, args: &[Expr], target: RewriteTarget) -> Option<Expr> {
        let x = first(args)?;
        let two = Expr::integer(2);
        match target {
            RewriteTarget::acos => Some(half_pi() - acos(x)),
            RewriteTarget::atan => Some(two * atan(x.clone() / (Expr::one() + cosine_of_asin(&x)))),
            RewriteTarget::log => {
                let i = Expr::I();
                Some(-i.clone() * log(i * x.clone() + cosine_of_asin(&x)))
            }
            RewriteTarget::acot => Some(two * acot((Expr::one() + cosine_of_asin(&x)) / x)),
            RewriteTarget::asec => Some(half_pi() - asec(Expr::one() / x)),
            RewriteTarget::acsc => Some(acsc(Expr::one() / x)),
            _ => None,
        }
    }

    fn taylor_term(&self, n: i64, x: &Expr, previous: &[Expr]) -> Option<Expr> {
        trig_series::taylor_term(Function::asin, n, x, previous)
    }

    fn is_real(&self, args: &[Expr]) -> Fuzzy {
        args.first().map(in_unit_interval).unwrap_or(Fuzzy::Unknown)
    }

    fn is_rational(&self, args: &[Expr]) -> Fuzzy {
        odd_inverse_is_rational(Function::asin, args)
    }

    fn is_positive(&self, args: &[Expr]) -> Fuzzy {
        let Some(x) = args.first() else {
            return Fuzzy::Unknown;
        };
        if x.is_positive().is_true() {
            return (x.clone() - Expr::one()).is_negative();
        }
        if x.is_negative().is_true() {
            return Fuzzy::False;
        }
        Fuzzy::Unknown
    }

    fn as_leading_term(&self, args: &[Expr], x: &Expr) -> Option<Expr> {
        vanishing_leading_term(Function::asin, args, x)
    }

    fn inverse(&self) -> Option<Function> {
        Some(Function::sin)
    }
}

//___________________________________ARCCOSINE____________________________________

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Acos;

impl SymbolicFunction for Acos {
    fn tag(&self) -> Function {
        Function::acos
    }

    fn eval(&self, args: &[Expr]) -> Option<Expr> {
        let x = args.first()?;
        match x {
            Expr::Infinity => return Some(Expr::Infinity * Expr::I()),
            Expr::NegativeInfinity => return Some(Expr::NegativeInfinity * Expr::I()),
            Expr::ComplexInfinity => return Some(Expr::zoo()),
            _ => {}
        }
        if x.is_zero_literal() {
            return Some(half_pi());
        }
        if x.is_one_literal() {
            return Some(Expr::zero());
        }
        if *x == Expr::neg_one() {
            return Some(Expr::pi());
        }
        lookup(&ACOS_VALUES, x)
    }

    fn fdiff(&self, args: &[Expr], argindex: usize) -> Result<Expr, SymbolicError> {
        if argindex != 1 {
            return Err(bad_index(Function::acos, argindex));
        }
        Ok(Expr::neg_one() / cosine_of_asin(single(args, Function::acos)?))
    }

    fn rewrite(&self, args: &[Expr], target: RewriteTarget) -> Option<Expr> {
        let x = first(args)?;
        match target {
            RewriteTarget::log => {
                let i = Expr::I();
                Some(half_pi() + i.clone() * log(i * x.clone() + cosine_of_asin(&x)))
            }
            RewriteTarget::asin => Some(half_pi() - asin(x)),
            RewriteTarget::atan => Some(
                atan(cosine_of_asin(&x) / x.clone())
                    + half_pi() * (Expr::one() - sign_factor_inverted(&x)),
            ),
            RewriteTarget::acot => Some(
                half_pi() - Expr::integer(2) * acot((Expr::one() + cosine_of_asin(&x)) / x),
            ),
            RewriteTarget::asec => Some(asec(Expr::one() / x)),
            RewriteTarget::acsc => Some(half_pi() - acsc(Expr::one() / x)),
            _ => None,
        }
    }

    fn taylor_term(&self, n: i64, x: &Expr, previous: &[Expr]) -> Option<Expr> {
        trig_series::taylor_term(Function::acos, n, x, previous)
    }

    fn is_real(&self, args: &[Expr]) -> Fuzzy {
        args.first().map(in_unit_interval).unwrap_or(Fuzzy::Unknown)
    }

    fn is_rational(&self, args: &[Expr]) -> Fuzzy {
        let s = Expr::func(Function::acos, args.to_vec());
        match &s {
            Expr::Func(Function::acos, inner) => {
                let shifted = inner[0].clone() - Expr::one();
                if shifted.is_zero().is_true() {
                    return Fuzzy::True;
                }
                if inner[0].is_rational().is_true() && shifted.is_zero().is_false() {
                    return Fuzzy::False;
                }
                Fuzzy::Unknown
            }
            _ => s.is_rational(),
        }
    }

    fn is_positive(&self, args: &[Expr]) -> Fuzzy {
        let Some(x) = args.first() else {
            return Fuzzy::Unknown;
        };
        fuzzy_and([
            x.is_real(),
            (x.clone() - Expr::one()).is_negative(),
            (x.clone() + Expr::one()).is_positive(),
        ])
    }

    fn conjugate(&self, args: &[Expr]) -> Option<Expr> {
        let z = args.first()?;
        if z.is_real().is_false() || in_unit_interval(z).is_true() {
            return Some(acos(z.conjugate()));
        }
        None
    }

    fn as_leading_term(&self, args: &[Expr], x: &Expr) -> Option<Expr> {
        let arg = args.first()?.as_leading_term(x);
        if arg.vanishes_at_zero(x) {
            return Some(half_pi());
        }
        Some(acos(arg))
    }

    fn inverse(&self) -> Option<Function> {
        Some(Function::cos)
    }
}

//___________________________________ARCTANGENT____________________________________

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Atan;

impl SymbolicFunction for Atan {
    fn tag(&self) -> Function {
        Function::atan
    }

    fn eval(&self, args: &[Expr]) -> Option<Expr> {
        let x = args.first()?;
        match x {
            Expr::Infinity => return Some(half_pi()),
            Expr::NegativeInfinity => return Some(-half_pi()),
            _ => {}
        }
        if x.is_zero_literal() {
            return Some(Expr::zero());
        }
        if x.is_one_literal() {
            return Some(Expr::pi() / Expr::integer(4));
        }
        if *x == Expr::neg_one() {
            return Some(-Expr::pi() / Expr::integer(4));
        }
        if let Some(v) = lookup_odd(&ATAN_VALUES, x) {
            return Some(v);
        }
        if x.could_extract_minus_sign() {
            return Some(-atan(-x.clone()));
        }
        let t = x.as_coefficient(&Expr::I())?;
        Some(Expr::I() * atanh(t))
    }

    fn fdiff(&self, args: &[Expr], argindex: usize) -> Result<Expr, SymbolicError> {
        if argindex != 1 {
            return Err(bad_index(Function::atan, argindex));
        }
        Ok(Expr::one() / (Expr::one() + sq(single(args, Function::atan)?)))
    }

    fn rewrite(&self, args: &[Expr], target: RewriteTarget) -> Option<Expr> {
        let x = first(args)?;
        let hyp = (Expr::one() + sq(&x)).sqrt();
        match target {
            RewriteTarget::log => {
                let i = Expr::I();
                let ix = i.clone() * x;
                Some(i / Expr::integer(2) * log((Expr::one() - ix.clone()) / (Expr::one() + ix)))
            }
            RewriteTarget::asin => {
                Some(sign_factor(&x) * (half_pi() - asin(Expr::one() / hyp)))
            }
            RewriteTarget::acos => Some(sign_factor(&x) * acos(Expr::one() / hyp)),
            RewriteTarget::acot => Some(acot(Expr::one() / x)),
            RewriteTarget::asec => Some(sign_factor(&x) * asec(hyp)),
            RewriteTarget::acsc => Some(sign_factor(&x) * (half_pi() - acsc(hyp))),
            _ => None,
        }
    }

    fn taylor_term(&self, n: i64, x: &Expr, previous: &[Expr]) -> Option<Expr> {
        trig_series::taylor_term(Function::atan, n, x, previous)
    }

    fn is_real(&self, args: &[Expr]) -> Fuzzy {
        args.first().map(|x| x.is_real()).unwrap_or(Fuzzy::Unknown)
    }

    fn is_rational(&self, args: &[Expr]) -> Fuzzy {
        odd_inverse_is_rational(Function::atan, args)
    }

    fn is_positive(&self, args: &[Expr]) -> Fuzzy {
        args.first().map(|x| x.is_positive()).unwrap_or(Fuzzy::Unknown)
    }

    fn as_leading_term(&self, args: &[Expr], x: &Expr) -> Option<Expr> {
        vanishing_leading_term(Function::atan, args, x)
    }

    fn inverse(&self) -> Option<Function> {
        Some(Function::tan)
    }
}

//___________________________________ARCCOTANGENT____________________________________

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Acot;

impl SymbolicFunction for Acot {
    fn tag(&self) -> Function {
        Function::acot
    }

    fn eval(&self, args: &[Expr]) -> Option<Expr> {
        let x = args.first()?;
        if matches!(x, Expr::Infinity | Expr::NegativeInfinity) {
            return Some(Expr::zero());
        }
        if x.is_zero_literal() {
            return Some(half_pi());
        }
        if x.is_one_literal() {
            return Some(Expr::pi() / Expr::integer(4));
        }
        if *x == Expr::neg_one() {
            return Some(-Expr::pi() / Expr::integer(4));
        }
        if let Some(v) = lookup_odd(&ACOT_VALUES, x) {
            return Some(v);
        }
        if x.could_extract_minus_sign() {
            return Some(-acot(-x.clone()));
        }
        let t = x.as_coefficient(&Expr::I())?;
        Some(-Expr::I() * acoth(t))
    }

    fn fdiff(&self, args: &[Expr], argindex: usize) -> Result<Expr, SymbolicError> {
        if argindex != 1 {
            return Err(bad_index(Function::acot, argindex));
        }
        Ok(Expr::neg_one() / (Expr::one() + sq(single(args, Function::acot)?)))
    }

    fn rewrite(&self, args: &[Expr], target: RewriteTarget) -> Option<Expr> {
        let x = first(args)?;
        let neg_sq = -sq(&x);
        let via_sine = neg_sq.clone().sqrt() / (neg_sq - Expr::one()).sqrt();
        let via_secant = ((Expr::one() + sq(&x)) / sq(&x)).sqrt();
        match target {
            RewriteTarget::log => {
                let i = Expr::I();
                Some(i.clone() / Expr::integer(2) * log((x.clone() - i.clone()) / (x + i)))
            }
            RewriteTarget::asin => Some(sign_factor_inverted(&x) * (half_pi() - asin(via_sine))),
            RewriteTarget::acos => Some(sign_factor_inverted(&x) * acos(via_sine)),
            RewriteTarget::atan => Some(atan(Expr::one() / x)),
            RewriteTarget::asec => Some(sign_factor_inverted(&x) * asec(via_secant)),
            RewriteTarget::acsc => {
                Some(sign_factor_inverted(&x) * (half_pi() - acsc(via_secant)))
            }
            _ => None,
        }
    }

    fn taylor_term(&self, n: i64, x: &Expr, previous: &[Expr]) -> Option<Expr> {
        trig_series::taylor_term(Function::acot, n, x, previous)
    }

    fn is_real(&self, args: &[Expr]) -> Fuzzy {
        args.first().map(|x| x.is_real()).unwrap_or(Fuzzy::Unknown)
    }

    fn is_rational(&self, args: &[Expr]) -> Fuzzy {
        let s = Expr::func(Function::acot, args.to_vec());
        match &s {
            Expr::Func(Function::acot, inner) => {
                if inner[0].is_rational().is_true() { Fuzzy::False } else { Fuzzy::Unknown }
            }
            _ => s.is_rational(),
        }
    }

    fn is_positive(&self, args: &[Expr]) -> Fuzzy {
        args.first().map(|x| x.is_nonnegative()).unwrap_or(Fuzzy::Unknown)
    }

    fn as_leading_term(&self, args: &[Expr], x: &Expr) -> Option<Expr> {
        let arg = args.first()?.as_leading_term(x);
        if arg.vanishes_at_zero(x) {
            return Some(half_pi());
        }
        Some(acot(arg))
    }

    fn inverse(&self) -> Option<Function> {
        Some(Function::cot)
    }
}

//___________________________________ARCSECANT AND ARCCOSECANT____________________________________

/// `log(arg)` where the argument stays bounded, as for both `asec` and `acsc`.
fn reciprocal_inverse_leading_term(f: Function, args: &[Expr], x: &Expr) -> Option<Expr> {
    let arg = args.first()?.as_leading_term(x);
    if arg.bounded_at_zero(x) {
        return Some(log(arg));
    }
    Some(Expr::func(f, vec![arg]))
}

/// `sqrt(1 - 1/x**2)`
fn reciprocal_root(x: &Expr) -> Expr {
    (Expr::one() - Expr::one() / sq(x)).sqrt()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Asec;

impl SymbolicFunction for Asec {
    fn tag(&self) -> Function {
        Function::asec
    }

    fn eval(&self, args: &[Expr]) -> Option<Expr> {
        let x = args.first()?;
        if x.is_zero().is_true() {
            return Some(Expr::zoo());
        }
        if x.is_one_literal() {
            return Some(Expr::zero());
        }
        if *x == Expr::neg_one() {
            return Some(Expr::pi());
        }
        if is_infinite_literal(x) {
            return Some(half_pi());
        }
        None
    }

    fn fdiff(&self, args: &[Expr], argindex: usize) -> Result<Expr, SymbolicError> {
        if argindex != 1 {
            return Err(bad_index(Function::asec, argindex));
        }
        let x = single(args, Function::asec)?;
        Ok(Expr::one() / (sq(x) * reciprocal_root(x)))
    }

    fn rewrite(&self, args: &[Expr], target: RewriteTarget) -> Option<Expr> {
        let x = first(args)?;
        let root = (sq(&x) - Expr::one()).sqrt();
        let two = Expr::integer(2);
        match target {
            RewriteTarget::log => {
                let i = Expr::I();
                Some(half_pi() + i.clone() * log(i / x.clone() + reciprocal_root(&x)))
            }
            RewriteTarget::asin => Some(half_pi() - asin(Expr::one() / x)),
            RewriteTarget::acos => Some(acos(Expr::one() / x)),
            RewriteTarget::atan => {
                Some(sign_factor(&x) * (-half_pi() + two * atan(x.clone() + root)))
            }
            RewriteTarget::acot => {
                Some(sign_factor(&x) * (-half_pi() + two * acot(x.clone() - root)))
            }
            RewriteTarget::acsc => Some(half_pi() - acsc(x)),
            _ => None,
        }
    }

    fn as_leading_term(&self, args: &[Expr], x: &Expr) -> Option<Expr> {
        reciprocal_inverse_leading_term(Function::asec, args, x)
    }

    fn inverse(&self) -> Option<Function> {
        Some(Function::sec)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Acsc;

impl SymbolicFunction for Acsc {
    fn tag(&self) -> Function {
        Function::acsc
    }

    fn eval(&self, args: &[Expr]) -> Option<Expr> {
        let x = args.first()?;
        if x.is_one_literal() {
            return Some(half_pi());
        }
        if *x == Expr::neg_one() {
            return Some(-half_pi());
        }
        if is_infinite_literal(x) {
            return Some(Expr::zero());
        }
        None
    }

    fn fdiff(&self, args: &[Expr], argindex: usize) -> Result<Expr, SymbolicError> {
        if argindex != 1 {
            return Err(bad_index(Function::acsc, argindex));
        }
        let x = single(args, Function::acsc)?;
        Ok(Expr::neg_one() / (sq(x) * reciprocal_root(x)))
    }

    fn rewrite(&self, args: &[Expr], target: RewriteTarget) -> Option<Expr> {
        let x = first(args)?;
        let root = (sq(&x) - Expr::one()).sqrt();
        match target {
            RewriteTarget::log => {
                let i = Expr::I();
                Some(-i.clone() * log(i / x.clone() + reciprocal_root(&x)))
            }
            RewriteTarget::asin => Some(asin(Expr::one() / x)),
            RewriteTarget::acos => Some(half_pi() - acos(Expr::one() / x)),
            RewriteTarget::atan => Some(sign_factor(&x) * (half_pi() - atan(root))),
            RewriteTarget::acot => Some(sign_factor(&x) * (half_pi() - acot(Expr::one() / root))),
            RewriteTarget::asec => Some(half_pi() - asec(x)),
            _ => None,
        }
    }

    fn as_leading_term(&self, args: &[Expr], x: &Expr) -> Option<Expr> {
        reciprocal_inverse_leading_term(Function::acsc, args, x)
    }

    fn inverse(&self) -> Option<Function> {
        Some(Function::csc)
    }
}

//___________________________________ATAN2____________________________________

/// `atan2(y, x)`: the argument of the point `(x, y)`, in `(-pi, pi]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Atan2;

/// `-I*log((x + I*y)/sqrt(x**2 + y**2))`
fn atan2_as_log(y: &Expr, x: &Expr) -> Expr {
    let i = Expr::I();
    -i.clone() * log((x.clone() + i * y.clone()) / (sq(x) + sq(y)).sqrt())
}

impl SymbolicFunction for Atan2 {
    fn tag(&self) -> Function {
        Function::atan2
    }

    fn eval(&self, args: &[Expr]) -> Option<Expr> {
        let [y, x] = args else {
            return None;
        };
        let pi = Expr::pi();
        match x {
            Expr::NegativeInfinity => {
                if y.is_zero().is_true() {
                    return Some(pi);
                }
                return Some(Expr::integer(2) * pi.clone() * heaviside(re(y.clone())) - pi);
            }
            Expr::Infinity => return Some(Expr::zero()),
            _ => {}
        }
        let (mut y, mut x) = (y.clone(), x.clone());
        if x.is_imaginary().is_true() && y.is_imaginary().is_true() && x.is_number() && y.is_number() {
            x = im(x);
            y = im(y);
        }
        if x.is_real().is_true() && y.is_real().is_true() {
            if x.is_positive().is_true() {
                return Some(atan(y / x));
            }
            if x.is_negative().is_true() {
                if y.is_negative().is_true() {
                    return Some(atan(y / x) - pi);
                }
                if y.is_nonnegative().is_true() {
                    return Some(atan(y / x) + pi);
                }
            }
            if x.is_zero().is_true() {
                if y.is_positive().is_true() {
                    return Some(half_pi());
                }
                if y.is_negative().is_true() {
                    return Some(-half_pi());
                }
                if y.is_zero().is_true() {
                    return Some(Expr::NaN);
                }
            }
        }
        if y.is_zero().is_true() && x.is_real().is_true() && x.is_zero().is_false() {
            return Some(pi * (Expr::one() - heaviside(x)));
        }
        if x.is_number() && y.is_number() {
            return Some(atan2_as_log(&y, &x));
        }
        None
    }

    fn fdiff(&self, args: &[Expr], argindex: usize) -> Result<Expr, SymbolicError> {
        let [y, x] = args else {
            return Err(SymbolicError::InvalidArgument("atan2 expects two arguments".to_string()));
        };
        let r2 = sq(x) + sq(y);
        match argindex {
            1 => Ok(x.clone() / r2),
            2 => Ok(-y.clone() / r2),
            _ => Err(bad_index(Function::atan2, argindex)),
        }
    }

    fn rewrite(&self, args: &[Expr], target: RewriteTarget) -> Option<Expr> {
        let [y, x] = args else {
            return None;
        };
        match target {
            RewriteTarget::log => Some(atan2_as_log(y, x)),
            RewriteTarget::atan => {
                let r = (sq(x) + sq(y)).sqrt();
                Some(Expr::integer(2) * atan(y.clone() / (r + x.clone())))
            }
            _ => None,
        }
    }

    fn is_real(&self, args: &[Expr]) -> Fuzzy {
        let [y, x] = args else {
            return Fuzzy::Unknown;
        };
        if x.is_real().is_true() && y.is_real().is_true() && x.is_zero().is_false() && y.is_zero().is_false() {
            return Fuzzy::True;
        }
        Fuzzy::Unknown
    }

    fn conjugate(&self, args: &[Expr]) -> Option<Expr> {
        let [y, x] = args else {
            return None;
        };
        Some(Expr::func(Function::atan2, vec![y.conjugate(), x.conjugate()]))
    }
}

/// Rationality shared by `asin` and `atan`: zero at zero, irrational at other rationals.
fn odd_inverse_is_rational(f: Function, args: &[Expr]) -> Fuzzy {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::symbolic_engine::Domain;
    use crate::symbolic::trigonometric::atan2;

    fn pi() -> Expr {
        Expr::pi()
    }

    fn sqrt(n: i64) -> Expr {
        Expr::integer(n).sqrt()
    }

    #[test]
    fn test_asin_values() {
        assert_eq!(asin(Expr::zero()), Expr::zero());
        assert_eq!(asin(Expr::one()), pi() / Expr::integer(2));
        assert_eq!(asin(Expr::neg_one()), -pi() / Expr::integer(2));
        assert_eq!(asin(Expr::half()), pi() / Expr::integer(6));
        assert_eq!(asin(-Expr::half()), -pi() / Expr::integer(6));
        assert_eq!(asin(sqrt(2) / Expr::integer(2)), pi() / Expr::integer(4));
        assert_eq!(asin(Expr::oo()), Expr::NegativeInfinity * Expr::I());
    }

    #[test]
    fn test_acos_values() {
        assert_eq!(acos(Expr::zero()), pi() / Expr::integer(2));
        assert_eq!(acos(Expr::one()), Expr::zero());
        assert_eq!(acos(Expr::neg_one()), pi());
        assert_eq!(acos(-Expr::half()), Expr::integer(2) * pi() / Expr::integer(3));
        assert_eq!(acos(-sqrt(3) / Expr::integer(2)), Expr::integer(5) * pi() / Expr::integer(6));
        assert_eq!(acos(Expr::zoo()), Expr::zoo());
    }

    #[test]
    fn test_atan_and_acot_values() {
        assert_eq!(atan(Expr::oo()), pi() / Expr::integer(2));
        assert_eq!(atan(sqrt(3)), pi() / Expr::integer(3));
        assert_eq!(atan(-sqrt(3)), -pi() / Expr::integer(3));
        assert_eq!(atan(Expr::integer(2) - sqrt(3)), pi() / Expr::integer(12));
        assert_eq!(acot(Expr::zero()), pi() / Expr::integer(2));
        assert_eq!(acot(Expr::NegativeInfinity), Expr::zero());
        assert_eq!(acot(sqrt(3)), pi() / Expr::integer(6));
        assert_eq!(acot(-Expr::one()), -pi() / Expr::integer(4));
    }

    #[test]
    fn test_asec_acsc_values() {
        assert_eq!(asec(Expr::zero()), Expr::zoo());
        assert_eq!(asec(Expr::one()), Expr::zero());
        assert_eq!(asec(Expr::neg_one()), pi());
        assert_eq!(asec(Expr::oo()), pi() / Expr::integer(2));
        assert_eq!(acsc(Expr::one()), pi() / Expr::integer(2));
        assert_eq!(acsc(Expr::zoo()), Expr::zero());
    }

    #[test]
    fn test_oddness_and_imaginary_mirror() {
        let x = Expr::symbol("x");
        assert_eq!(asin(-x.clone()), -asin(x.clone()));
        assert_eq!(atan(-x.clone()), -atan(x.clone()));
        assert_eq!(acot(-x.clone()), -acot(x.clone()));
        assert_eq!(asin(Expr::I() * x.clone()), Expr::I() * asinh(x.clone()));
        assert_eq!(atan(Expr::I() * x.clone()), Expr::I() * atanh(x.clone()));
        assert_eq!(acot(Expr::I() * x.clone()), -Expr::I() * acoth(x));
    }

    #[test]
    fn test_atan2_quadrants() {
        let one = Expr::one();
        let m1 = Expr::neg_one();
        let z = Expr::zero();
        assert_eq!(atan2(z.clone(), one.clone()), Expr::zero());
        assert_eq!(atan2(one.clone(), one.clone()), pi() / Expr::integer(4));
        assert_eq!(atan2(one.clone(), z.clone()), pi() / Expr::integer(2));
        assert_eq!(atan2(one.clone(), m1.clone()), Expr::integer(3) * pi() / Expr::integer(4));
        assert_eq!(atan2(z.clone(), m1.clone()), pi());
        assert_eq!(atan2(m1.clone(), m1.clone()), Expr::integer(-3) * pi() / Expr::integer(4));
        assert_eq!(atan2(m1.clone(), z.clone()), -pi() / Expr::integer(2));
        assert_eq!(atan2(m1, one), -pi() / Expr::integer(4));
        assert_eq!(atan2(z.clone(), z), Expr::NaN);
    }

    #[test]
    fn test_atan2_infinities_and_symbols() {
        let x = Expr::symbol_with("x", Domain::Positive);
        let y = Expr::symbol_with("y", Domain::Real);
        assert_eq!(atan2(y.clone(), Expr::oo()), Expr::zero());
        assert_eq!(atan2(Expr::zero(), Expr::NegativeInfinity), pi());
        assert_eq!(atan2(y.clone(), x.clone()), atan(y.clone() / x.clone()));
        let free = atan2(y.clone(), Expr::symbol("w"));
        assert!(matches!(free, Expr::Func(Function::atan2, _)));
        assert_eq!(
            Atan2.fdiff(&[y.clone(), x.clone()], 1).ok(),
            Some(x.clone() / (x.clone().pow(Expr::integer(2)) + y.clone().pow(Expr::integer(2))))
        );
        assert!(Atan2.fdiff(&[y, x], 3).is_err());
    }

    #[test]
    fn test_rewrites_between_inverses() {
        let x = Expr::symbol("x");
        assert_eq!(asin(x.clone()).rewrite(RewriteTarget::acos), pi() / Expr::integer(2) - acos(x.clone()));
        assert_eq!(acos(x.clone()).rewrite(RewriteTarget::asin), pi() / Expr::integer(2) - asin(x.clone()));
        assert_eq!(atan(x.clone()).rewrite(RewriteTarget::acot), acot(Expr::one() / x.clone()));
        assert_eq!(asec(x.clone()).rewrite(RewriteTarget::acos), acos(Expr::one() / x.clone()));
        assert_eq!(acsc(x.clone()).rewrite(RewriteTarget::asin), asin(Expr::one() / x));
    }

    #[test]
    fn test_predicates() {
        let r = Expr::symbol_with("r", Domain::Real);
        assert_eq!(atan(r.clone()).is_real(), Fuzzy::True);
        assert_eq!(asin(Expr::rational(1, 3)).is_real(), Fuzzy::True);
        assert_eq!(asin(Expr::integer(2)).is_real(), Fuzzy::False);
        assert_eq!(atan(Expr::integer(2)).is_rational(), Fuzzy::False);
        assert_eq!(acot(Expr::integer(2)).is_rational(), Fuzzy::False);
        assert_eq!(acos(Expr::rational(1, 3)).is_positive(), Fuzzy::True);
    }

    #[test]
    fn test_derivatives() {
        let x = Expr::symbol("x");
        let one_minus = (Expr::one() - x.clone().pow(Expr::integer(2))).sqrt();
        assert_eq!(Asin.fdiff(&[x.clone()], 1).ok(), Some(Expr::one() / one_minus.clone()));
        assert_eq!(Acos.fdiff(&[x.clone()], 1).ok(), Some(Expr::neg_one() / one_minus));
        assert_eq!(
            Atan.fdiff(&[x.clone()], 1).ok(),
            Some(Expr::one() / (Expr::one() + x.clone().pow(Expr::integer(2))))
        );
        assert!(Asec.fdiff(&[x], 2).is_err());
    }
}
