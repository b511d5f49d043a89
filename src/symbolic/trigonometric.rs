//! # Trigonometric Functions Module
//!
//! ## Purpose
//! Symbolic evaluation of the six circular functions and their inverses. Constructing
//! `sin(x)` through `Expr::func` runs the function's evaluator once, which reduces the
//! argument modulo the period, extracts signs, returns closed radical forms at angles whose
//! cosine is constructible and otherwise leaves the node unevaluated.
//!
//! ## Layout
//! - `angle`: decomposition of arguments into rational multiples of `pi`
//! - `exact_values`: radical tables and the Fermat-prime decomposition of `cos(p*pi/q)`
//! - `trig_functions`: `sin`, `cos`, `tan`
//! - `reciprocal`: `sec`, `csc`, `cot` as reciprocals of the above
//! - `inverse_trig`: `asin`, `acos`, `atan`, `acot`, `asec`, `acsc`, `atan2`
//! - `trig_series`: memoised Taylor coefficients
//!
//! ## Example
//! ```rust, ignore
//! use RustedTrig::symbolic::symbolic_engine::Expr;
//! use RustedTrig::symbolic::trigonometric::{cos, sin};
//! let x = Expr::symbol("x");
//! assert_eq!(sin(x.clone() + Expr::pi() * Expr::integer(2)), sin(x.clone()));
//! println!("{}", cos(Expr::pi() / Expr::integer(5))); // 1/4 + sqrt(5)/4
//! ```

use crate::symbolic::symbolic_engine::{Expr, Function};

pub mod angle;
pub mod exact_values;
pub mod inverse_trig;
pub mod reciprocal;
pub mod trig_functions;
pub mod trig_series;

#[cfg(test)]
mod trig_tests;

pub fn sin(x: Expr) -> Expr {
    Expr::func(Function::sin, vec![x])
}

pub fn cos(x: Expr) -> Expr {
    Expr::func(Function::cos, vec![x])
}

pub fn tan(x: Expr) -> Expr {
    Expr::func(Function::tan, vec![x])
}

pub fn cot(x: Expr) -> Expr {
    Expr::func(Function::cot, vec![x])
}

pub fn sec(x: Expr) -> Expr {
    Expr::func(Function::sec, vec![x])
}

pub fn csc(x: Expr) -> Expr {
    Expr::func(Function::csc, vec![x])
}

pub fn asin(x: Expr) -> Expr {
    Expr::func(Function::asin, vec![x])
}

pub fn acos(x: Expr) -> Expr {
    Expr::func(Function::acos, vec![x])
}

pub fn atan(x: Expr) -> Expr {
    Expr::func(Function::atan, vec![x])
}

pub fn acot(x: Expr) -> Expr {
    Expr::func(Function::acot, vec![x])
}

pub fn asec(x: Expr) -> Expr {
    Expr::func(Function::asec, vec![x])
}

pub fn acsc(x: Expr) -> Expr {
    Expr::func(Function::acsc, vec![x])
}

/// Two-argument arctangent of the point `(x, y)`; note the argument order.
pub fn atan2(y: Expr, x: Expr) -> Expr {
    Expr::func(Function::atan2, vec![y, x])
}
