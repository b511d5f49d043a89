// SYMBOLIC TRAITS //////////////////////////////////////////////////////////////////
// This module contains the error type and the function-behaviour trait of the engine.
// Every function tag of symbolic_engine.rs resolves to one zero-sized definition that
// implements SymbolicFunction; the definitions live in elementary.rs and trigonometric/*.
// Dispatch over the closed set of definitions is static (enum_dispatch), which lets sin,
// cos and tan call each other's evaluators without late-bound lookups.

#![allow(non_camel_case_types)]

use crate::symbolic::elementary::{
    Acoth, Asinh, Atanh, Conjugate, Cosh, Coth, Csch, Exp, Heaviside, Im, Log, Re, Sech, Sinh, Tanh,
};
use crate::symbolic::fuzzy_logic::Fuzzy;
use crate::symbolic::symbolic_engine::{Expr, Function};
use crate::symbolic::trigonometric::inverse_trig::{Acos, Acot, Acsc, Asec, Asin, Atan, Atan2};
use crate::symbolic::trigonometric::reciprocal::{Cot, Csc, Sec};
use crate::symbolic::trigonometric::trig_functions::{Cos, Sin, Tan};
use enum_dispatch::enum_dispatch;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

///////////////////////////////// ERRORS /////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum SymbolicError {
    #[error("{function} has no argument with index {index}")]
    ArgumentIndex { function: Function, index: usize },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

///////////////////////////////// REWRITE TARGETS ////////////////////////////////////

/// Forms an expression can be rewritten into.
///
/// `Pow` rewrites functions of a `log` argument as powers; `sqrt` and `pow` both ask for
/// closed radical forms; `sincos` expresses a function through both `sin` and `cos`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum RewriteTarget {
    exp,
    Pow,
    pow,
    sqrt,
    sin,
    cos,
    tan,
    cot,
    sec,
    csc,
    sincos,
    log,
    asin,
    acos,
    atan,
    acot,
    asec,
    acsc,
}

impl RewriteTarget {
    /// Function tag of a target that names a function.
    pub fn as_function(&self) -> Option<Function> {
        Function::from_str(&self.to_string()).ok()
    }
}

///////////////////////////////// FUNCTION BEHAVIOUR /////////////////////////////////

/// Behaviour of one function tag.
///
/// Every method gets the argument list of the node; `None` and `Fuzzy::Unknown` mean the
/// definition has nothing to say, which is never an error.
#[enum_dispatch(FunctionDef)]
pub trait SymbolicFunction {
    fn tag(&self) -> Function;

    /// Automatic evaluation at construction; `None` keeps the node unevaluated.
    fn eval(&self, _args: &[Expr]) -> Option<Expr> {
        None
    }

    /// Partial derivative with respect to the argument at `argindex` (1-based).
    fn fdiff(&self, _args: &[Expr], argindex: usize) -> Result<Expr, SymbolicError> {
        Err(SymbolicError::ArgumentIndex {
            function: self.tag(),
            index: argindex,
        })
    }

    fn rewrite(&self, _args: &[Expr], _target: RewriteTarget) -> Option<Expr> {
        None
    }

    fn expand_trig(&self, _args: &[Expr]) -> Option<Expr> {
        None
    }

    /// `n`-th term of the power series around 0 in `x`; `previous` holds earlier terms.
    fn taylor_term(&self, _n: i64, _x: &Expr, _previous: &[Expr]) -> Option<Expr> {
        None
    }

    fn is_real(&self, _args: &[Expr]) -> Fuzzy {
        Fuzzy::Unknown
    }

    fn is_rational(&self, _args: &[Expr]) -> Fuzzy {
        Fuzzy::Unknown
    }

    fn is_algebraic(&self, _args: &[Expr]) -> Fuzzy {
        Fuzzy::Unknown
    }

    fn is_finite(&self, _args: &[Expr]) -> Fuzzy {
        Fuzzy::Unknown
    }

    fn is_positive(&self, _args: &[Expr]) -> Fuzzy {
        Fuzzy::Unknown
    }

    fn conjugate(&self, _args: &[Expr]) -> Option<Expr> {
        None
    }

    fn as_real_imag(&self, _args: &[Expr]) -> Option<(Expr, Expr)> {
        None
    }

    fn as_leading_term(&self, _args: &[Expr], _x: &Expr) -> Option<Expr> {
        None
    }

    /// Tag of the inverse function, where one exists.
    fn inverse(&self) -> Option<Function> {
        None
    }
}

#[enum_dispatch]
pub enum FunctionDef {
    Sin(Sin),
    Cos(Cos),
    Tan(Tan),
    Cot(Cot),
    Sec(Sec),
    Csc(Csc),
    Asin(Asin),
    Acos(Acos),
    Atan(Atan),
    Acot(Acot),
    Asec(Asec),
    Acsc(Acsc),
    Atan2(Atan2),
    Sinh(Sinh),
    Cosh(Cosh),
    Tanh(Tanh),
    Coth(Coth),
    Sech(Sech),
    Csch(Csch),
    Asinh(Asinh),
    Atanh(Atanh),
    Acoth(Acoth),
    Exp(Exp),
    Log(Log),
    Re(Re),
    Im(Im),
    Heaviside(Heaviside),
    Conjugate(Conjugate),
}

/// Registry: the definition behind a function tag.
pub fn definition(f: Function) -> FunctionDef {
    match f {
        Function::sin => Sin.into(),
        Function::cos => Cos.into(),
        Function::tan => Tan.into(),
        Function::cot => Cot.into(),
        Function::sec => Sec.into(),
        Function::csc => Csc.into(),
        Function::asin => Asin.into(),
        Function::acos => Acos.into(),
        Function::atan => Atan.into(),
        Function::acot => Acot.into(),
        Function::asec => Asec.into(),
        Function::acsc => Acsc.into(),
        Function::atan2 => Atan2.into(),
        Function::sinh => Sinh.into(),
        Function::cosh => Cosh.into(),
        Function::tanh => Tanh.into(),
        Function::coth => Coth.into(),
        Function::sech => Sech.into(),
        Function::csch => Csch.into(),
        Function::asinh => Asinh.into(),
        Function::atanh => Atanh.into(),
        Function::acoth => Acoth.into(),
        Function::exp => Exp.into(),
        Function::log => Log.into(),
        Function::re => Re.into(),
        Function::im => Im.into(),
        Function::Heaviside => Heaviside.into(),
        Function::conjugate => Conjugate.into(),
    }
}

///////////////// CONSTRUCTION AND TRAVERSALS ON Expr /////////////////////////

impl Expr {
    /// Function node construction; runs the definition's `eval` once when `evaluate`.
    pub fn apply(f: Function, args: Vec<Expr>, evaluate: bool) -> Expr {
        if args.iter().any(|a| matches!(a, Expr::NaN)) {
            return Expr::NaN;
        }
        if evaluate {
            if let Some(v) = definition(f).eval(&args) {
                return v;
            }
        }
        Expr::Func(f, args)
    }

    /// Bottom-up rewrite of every function node into the target form.
    ///
    /// Nodes whose definition has no rewrite for the target are rebuilt from their
    /// rewritten arguments.
    pub fn rewrite(&self, target: RewriteTarget) -> Expr {
        match self {
            Expr::Func(f, args) => {
                let new_args: Vec<Expr> = args.iter().map(|a| a.rewrite(target)).collect();
                match definition(*f).rewrite(&new_args, target) {
                    Some(v) => v,
                    None => Expr::apply(*f, new_args, true),
                }
            }
            Expr::Add(_) | Expr::Mul(_) | Expr::Pow(_, _) => self.map_args(|a| a.rewrite(target)),
            _ => self.clone(),
        }
    }

    /// `rewrite` with the target given by name (`"sqrt"`, `"exp"`, `"tan"`, ...).
    pub fn rewrite_as(&self, target: &str) -> Result<Expr, SymbolicError> {
        let target = RewriteTarget::from_str(target)
            .map_err(|_| SymbolicError::InvalidArgument(format!("unknown rewrite target {}", target)))?;
        Ok(self.rewrite(target))
    }

    /// Trigonometric expansion: addition formulas and multiple angles, applied bottom-up.
    pub fn expand_trig(&self) -> Expr {
        match self {
            Expr::Func(f, args) => {
                let new_args: Vec<Expr> = args.iter().map(|a| a.expand_trig()).collect();
                match definition(*f).expand_trig(&new_args) {
                    Some(v) => v,
                    None => Expr::apply(*f, new_args, true),
                }
            }
            Expr::Add(_) | Expr::Mul(_) | Expr::Pow(_, _) => self.map_args(|a| a.expand_trig()),
            _ => self.clone(),
        }
    }

    /// Tag of the inverse function of a function node.
    pub fn inverse(&self) -> Option<Function> {
        self.func_tag().and_then(|f| definition(f).inverse())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_registry_covers_every_tag() {
        for f in Function::iter() {
            assert_eq!(definition(f).tag(), f);
        }
    }

    #[test]
    fn test_rewrite_target_names() {
        assert_eq!(RewriteTarget::from_str("sqrt").ok(), Some(RewriteTarget::sqrt));
        assert_eq!(RewriteTarget::from_str("Pow").ok(), Some(RewriteTarget::Pow));
        assert_eq!(RewriteTarget::cos.as_function(), Some(Function::cos));
        assert_eq!(RewriteTarget::sincos.as_function(), None);
        let x = Expr::symbol("x");
        assert!(matches!(x.rewrite_as("nonsense"), Err(SymbolicError::InvalidArgument(_))));
    }

    #[test]
    fn test_unevaluated_construction() {
        let node = Expr::func_unevaluated(Function::sin, vec![Expr::zero()]);
        assert_eq!(node, Expr::Func(Function::sin, vec![Expr::zero()]));
        assert_eq!(Expr::func(Function::sin, vec![Expr::zero()]), Expr::zero());
        assert_eq!(Expr::func(Function::cos, vec![Expr::NaN]), Expr::NaN);
    }

    #[test]
    fn test_fdiff_bad_index() {
        let x = Expr::symbol("x");
        let err = definition(Function::sin).fdiff(&[x], 2);
        assert!(matches!(
            err,
            Err(SymbolicError::ArgumentIndex { function: Function::sin, index: 2 })
        ));
    }
}
