//! Elementary functions the trigonometric family hands results to.
//!
//! Hyperbolic functions receive purely imaginary trigonometric arguments, `exp` and `log`
//! are rewrite targets, `re`, `im` and `Heaviside` appear in `atan2`. Each definition
//! carries only the evaluation rules needed to keep those results canonical: zero and
//! infinity values, sign extraction, the imaginary-argument mirror back to the
//! trigonometric family and cancellation against its own inverse.

use crate::symbolic::fuzzy_logic::Fuzzy;
use crate::symbolic::symbolic_engine::{Expr, Function};
use crate::symbolic::symbolic_traits::{RewriteTarget, SymbolicError, SymbolicFunction};
use crate::symbolic::trigonometric::{acot, asin, atan, cos, cot, csc, sec, sin, tan};

pub fn sinh(x: Expr) -> Expr {
    Expr::func(Function::sinh, vec![x])
}

pub fn cosh(x: Expr) -> Expr {
    Expr::func(Function::cosh, vec![x])
}

pub fn tanh(x: Expr) -> Expr {
    Expr::func(Function::tanh, vec![x])
}

pub fn coth(x: Expr) -> Expr {
    Expr::func(Function::coth, vec![x])
}

pub fn sech(x: Expr) -> Expr {
    Expr::func(Function::sech, vec![x])
}

pub fn csch(x: Expr) -> Expr {
    Expr::func(Function::csch, vec![x])
}

pub fn asinh(x: Expr) -> Expr {
    Expr::func(Function::asinh, vec![x])
}

pub fn atanh(x: Expr) -> Expr {
    Expr::func(Function::atanh, vec![x])
}

pub fn acoth(x: Expr) -> Expr {
    Expr::func(Function::acoth, vec![x])
}

pub fn exp(x: Expr) -> Expr {
    Expr::func(Function::exp, vec![x])
}

pub fn log(x: Expr) -> Expr {
    Expr::func(Function::log, vec![x])
}

pub fn re(x: Expr) -> Expr {
    Expr::func(Function::re, vec![x])
}

pub fn im(x: Expr) -> Expr {
    Expr::func(Function::im, vec![x])
}

pub fn heaviside(x: Expr) -> Expr {
    Expr::func(Function::Heaviside, vec![x])
}

/// Single argument of a one-argument node, as a derivative-time error when missing.
pub(crate) fn single(args: &[Expr], f: Function) -> Result<&Expr, SymbolicError> {
    args.first()
        .ok_or_else(|| SymbolicError::InvalidArgument(format!("{} expects one argument", f)))
}

fn sq(x: &Expr) -> Expr {
    x.clone().pow(Expr::integer(2))
}

//___________________________________HYPERBOLIC____________________________________

/// Shared evaluation of the six hyperbolic functions.
fn hyperbolic_eval(f: Function, x: &Expr) -> Option<Expr> {
    let odd = !matches!(f, Function::cosh | Function::sech);
    if x.is_zero_literal() {
        return Some(match f {
            Function::sinh | Function::tanh => Expr::zero(),
            Function::cosh | Function::sech => Expr::one(),
            _ => Expr::zoo(),
        });
    }
    match x {
        Expr::Infinity | Expr::NegativeInfinity => {
            let sign = if matches!(x, Expr::Infinity) { 1 } else { -1 };
            return match f {
                Function::sinh => Some(x.clone()),
                Function::cosh => Some(Expr::oo()),
                Function::tanh | Function::coth => Some(Expr::integer(sign)),
                _ => Some(Expr::zero()),
            };
        }
        _ => {}
    }
    if x.could_extract_minus_sign() {
        let inner = Expr::func(f, vec![-x.clone()]);
        return Some(if odd { -inner } else { inner });
    }
    if let Some(t) = x.as_coefficient(&Expr::I()) {
        return Some(match f {
            Function::sinh => Expr::I() * sin(t),
            Function::cosh => cos(t),
            Function::tanh => Expr::I() * tan(t),
            Function::coth => -Expr::I() * cot(t),
            Function::sech => sec(t),
            _ => -Expr::I() * csc(t),
        });
    }
    if let Expr::Func(g, inner) = x {
        let cancels = matches!(
            (f, g),
            (Function::sinh, Function::asinh)
                | (Function::tanh, Function::atanh)
                | (Function::coth, Function::acoth)
        );
        if cancels {
            return inner.first().cloned();
        }
    }
    None
}

fn hyperbolic_rewrite_exp(f: Function, x: &Expr) -> Expr {
    let ep = exp(x.clone());
    let em = exp(-x.clone());
    match f {
        Function::sinh => (ep - em) / Expr::integer(2),
        Function::cosh => (ep + em) / Expr::integer(2),
        Function::tanh => (ep.clone() - em.clone()) / (ep + em),
        Function::coth => (ep.clone() + em.clone()) / (ep - em),
        Function::sech => Expr::integer(2) / (ep + em),
        _ => Expr::integer(2) / (ep - em),
    }
}

macro_rules! hyperbolic_definition {
    ($name:ident, $tag:ident, |$x:ident| $deriv:expr) => {
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name;

        impl SymbolicFunction for $name {
            fn tag(&self) -> Function {
                Function::$tag
            }

            fn eval(&self, args: &[Expr]) -> Option<Expr> {
                hyperbolic_eval(Function::$tag, args.first()?)
            }

            fn fdiff(&self, args: &[Expr], argindex: usize) -> Result<Expr, SymbolicError> {
                if argindex != 1 {
                    return Err(SymbolicError::ArgumentIndex { function: Function::$tag, index: argindex });
                }
                let $x = single(args, Function::$tag)?.clone();
                Ok($deriv)
            }

            fn rewrite(&self, args: &[Expr], target: RewriteTarget) -> Option<Expr> {
                match target {
                    RewriteTarget::exp => Some(hyperbolic_rewrite_exp(Function::$tag, args.first()?)),
                    _ => None,
                }
            }

            fn is_real(&self, args: &[Expr]) -> Fuzzy {
                match args.first() {
                    Some(x) if x.is_real().is_true() => Fuzzy::True,
                    _ => Fuzzy::Unknown,
                }
            }

            fn conjugate(&self, args: &[Expr]) -> Option<Expr> {
                Some(Expr::func(Function::$tag, vec![args.first()?.conjugate()]))
            }
        }
    };
}

hyperbolic_definition!(Sinh, sinh, |x| cosh(x));
hyperbolic_definition!(Cosh, cosh, |x| sinh(x));
hyperbolic_definition!(Tanh, tanh, |x| Expr::one() - sq(&tanh(x)));
hyperbolic_definition!(Coth, coth, |x| Expr::neg_one() / sq(&sinh(x)));
hyperbolic_definition!(Sech, sech, |x| -tanh(x.clone()) * sech(x));
hyperbolic_definition!(Csch, csch, |x| -coth(x.clone()) * csch(x));

//___________________________________INVERSE HYPERBOLIC____________________________________

fn inverse_hyperbolic_eval(f: Function, x: &Expr) -> Option<Expr> {
    if x.is_zero_literal() {
        return Some(match f {
            Function::acoth => Expr::I() * Expr::pi() / Expr::integer(2),
            _ => Expr::zero(),
        });
    }
    match (f, x) {
        (Function::asinh, Expr::Infinity | Expr::NegativeInfinity) => return Some(x.clone()),
        (Function::acoth, Expr::Infinity | Expr::NegativeInfinity) => return Some(Expr::zero()),
        _ => {}
    }
    if x.could_extract_minus_sign() {
        return Some(-Expr::func(f, vec![-x.clone()]));
    }
    if let Some(t) = x.as_coefficient(&Expr::I()) {
        return Some(match f {
            Function::asinh => Expr::I() * asin(t),
            Function::atanh => Expr::I() * atan(t),
            _ => -Expr::I() * acot(t),
        });
    }
    None
}

macro_rules! inverse_hyperbolic_definition {
    ($name:ident, $tag:ident, |$x:ident| $deriv:expr) => {
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name;

        impl SymbolicFunction for $name {
            fn tag(&self) -> Function {
                Function::$tag
            }

            fn eval(&self, args: &[Expr]) -> Option<Expr> {
                inverse_hyperbolic_eval(Function::$tag, args.first()?)
            }

            fn fdiff(&self, args: &[Expr], argindex: usize) -> Result<Expr, SymbolicError> {
                if argindex != 1 {
                    return Err(SymbolicError::ArgumentIndex { function: Function::$tag, index: argindex });
                }
                let $x = single(args, Function::$tag)?.clone();
                Ok($deriv)
            }
        }
    };
}

inverse_hyperbolic_definition!(Asinh, asinh, |x| Expr::one() / (sq(&x) + Expr::one()).sqrt());
inverse_hyperbolic_definition!(Atanh, atanh, |x| Expr::one() / (Expr::one() - sq(&x)));
inverse_hyperbolic_definition!(Acoth, acoth, |x| Expr::one() / (Expr::one() - sq(&x)));

//___________________________________EXP AND LOG____________________________________

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Exp;

impl SymbolicFunction for Exp {
    fn tag(&self) -> Function {
        Function::exp
    }

    fn eval(&self, args: &[Expr]) -> Option<Expr> {
        let x = args.first()?;
        match x {
            _ if x.is_zero_literal() => return Some(Expr::one()),
            Expr::Infinity => return Some(Expr::oo()),
            Expr::NegativeInfinity => return Some(Expr::zero()),
            Expr::Func(Function::log, inner) => return inner.first().cloned(),
            _ => {}
        }
        // exp(I*pi*c) for half-integer multiples c
        let c = x.as_coefficient(&Expr::I())?.as_coefficient(&Expr::pi())?;
        let twice = Expr::integer(2) * c;
        twice.as_integer()?;
        Some(Expr::I().pow(twice))
    }

    fn fdiff(&self, args: &[Expr], argindex: usize) -> Result<Expr, SymbolicError> {
        if argindex != 1 {
            return Err(SymbolicError::ArgumentIndex { function: Function::exp, index: argindex });
        }
        Ok(exp(single(args, Function::exp)?.clone()))
    }

    fn is_real(&self, args: &[Expr]) -> Fuzzy {
        match args.first() {
            Some(x) if x.is_real().is_true() => Fuzzy::True,
            _ => Fuzzy::Unknown,
        }
    }

    fn is_positive(&self, args: &[Expr]) -> Fuzzy {
        self.is_real(args)
    }

    fn conjugate(&self, args: &[Expr]) -> Option<Expr> {
        Some(exp(args.first()?.conjugate()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Log;

impl SymbolicFunction for Log {
    fn tag(&self) -> Function {
        Function::log
    }

    fn eval(&self, args: &[Expr]) -> Option<Expr> {
        let x = args.first()?;
        if x.is_one_literal() {
            return Some(Expr::zero());
        }
        if x.is_zero_literal() {
            return Some(Expr::zoo());
        }
        match x {
            Expr::Infinity | Expr::NegativeInfinity | Expr::ComplexInfinity => Some(Expr::oo()),
            Expr::ImaginaryUnit => Some(Expr::I() * Expr::pi() / Expr::integer(2)),
            _ if *x == Expr::neg_one() => Some(Expr::I() * Expr::pi()),
            Expr::Func(Function::exp, inner) => {
                let y = inner.first()?;
                if y.is_real().is_true() { Some(y.clone()) } else { None }
            }
            _ => None,
        }
    }

    fn fdiff(&self, args: &[Expr], argindex: usize) -> Result<Expr, SymbolicError> {
        if argindex != 1 {
            return Err(SymbolicError::ArgumentIndex { function: Function::log, index: argindex });
        }
        Ok(Expr::one() / single(args, Function::log)?.clone())
    }

    fn is_real(&self, args: &[Expr]) -> Fuzzy {
        match args.first() {
            Some(x) if x.is_positive().is_true() => Fuzzy::True,
            _ => Fuzzy::Unknown,
        }
    }
}

//___________________________________PARTS AND STEPS____________________________________

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Re;

impl SymbolicFunction for Re {
    fn tag(&self) -> Function {
        Function::re
    }

    fn eval(&self, args: &[Expr]) -> Option<Expr> {
        let x = args.first()?;
        if x.is_real().is_true() {
            return Some(x.clone());
        }
        if x.is_imaginary().is_true() {
            return Some(Expr::zero());
        }
        match x {
            Expr::Add(_) | Expr::Mul(_) => Some(x.as_real_imag().0),
            _ => None,
        }
    }

    fn is_real(&self, _args: &[Expr]) -> Fuzzy {
        Fuzzy::True
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Im;

impl SymbolicFunction for Im {
    fn tag(&self) -> Function {
        Function::im
    }

    fn eval(&self, args: &[Expr]) -> Option<Expr> {
        let x = args.first()?;
        if x.is_real().is_true() {
            return Some(Expr::zero());
        }
        if let Some(t) = x.as_coefficient(&Expr::I()) {
            if t.is_real().is_true() {
                return Some(t);
            }
        }
        match x {
            Expr::Add(_) | Expr::Mul(_) => Some(x.as_real_imag().1),
            _ => None,
        }
    }

    fn is_real(&self, _args: &[Expr]) -> Fuzzy {
        Fuzzy::True
    }
}

/// Unit step, `1/2` at the origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Heaviside;

impl SymbolicFunction for Heaviside {
    fn tag(&self) -> Function {
        Function::Heaviside
    }

    fn eval(&self, args: &[Expr]) -> Option<Expr> {
        let x = args.first()?;
        if x.is_zero_literal() {
            return Some(Expr::half());
        }
        if x.is_positive().is_true() {
            return Some(Expr::one());
        }
        if x.is_negative().is_true() {
            return Some(Expr::zero());
        }
        None
    }

    fn is_real(&self, args: &[Expr]) -> Fuzzy {
        match args.first() {
            Some(x) => x.is_real(),
            None => Fuzzy::Unknown,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Conjugate;

impl SymbolicFunction for Conjugate {
    fn tag(&self) -> Function {
        Function::conjugate
    }

    fn eval(&self, args: &[Expr]) -> Option<Expr> {
        let x = args.first()?;
        if x.is_real().is_true() {
            return Some(x.clone());
        }
        match x {
            Expr::Symbol(_) | Expr::Pow(_, _) => None,
            Expr::Func(Function::conjugate, inner) => inner.first().cloned(),
            Expr::Func(f, inner) => crate::symbolic::symbolic_traits::definition(*f).conjugate(inner),
            _ => Some(x.conjugate()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::symbolic_engine::Domain;

    #[test]
    fn test_hyperbolic_mirror() {
        let x = Expr::symbol("x");
        assert_eq!(sinh(Expr::I() * x.clone()), Expr::I() * sin(x.clone()));
        assert_eq!(cosh(Expr::I() * x.clone()), cos(x.clone()));
        assert_eq!(sinh(-x.clone()), -sinh(x.clone()));
        assert_eq!(cosh(-x.clone()), cosh(x.clone()));
        assert_eq!(tanh(Expr::zero()), Expr::zero());
        assert_eq!(sinh(asinh(x.clone())), x);
    }

    #[test]
    fn test_exp_log() {
        let y = Expr::symbol_with("y", Domain::Real);
        assert_eq!(exp(Expr::zero()), Expr::one());
        assert_eq!(log(exp(y.clone())), y);
        assert_eq!(exp(Expr::I() * Expr::pi()), Expr::neg_one());
        assert_eq!(exp(Expr::I() * Expr::pi() / Expr::integer(2)), Expr::I());
        assert_eq!(log(Expr::neg_one()), Expr::I() * Expr::pi());
    }

    #[test]
    fn test_parts_and_step() {
        let x = Expr::symbol_with("x", Domain::Real);
        let y = Expr::symbol_with("y", Domain::Real);
        let z = x.clone() + Expr::I() * y.clone();
        assert_eq!(re(z.clone()), x.clone());
        assert_eq!(im(z), y);
        assert_eq!(heaviside(Expr::integer(3)), Expr::one());
        assert_eq!(heaviside(Expr::integer(-3)), Expr::zero());
        assert_eq!(heaviside(Expr::zero()), Expr::half());
    }

    #[test]
    fn test_derivatives() {
        let x = Expr::symbol("x");
        assert_eq!(Sinh.fdiff(&[x.clone()], 1).ok(), Some(cosh(x.clone())));
        assert!(Sinh.fdiff(&[x], 2).is_err());
    }
}
