#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// three-valued answers of the assumption queries
pub mod fuzzy_logic;
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedTrig::symbolic::symbolic_engine::Expr;
/// let parsed_expression = Expr::parse_expression("tan(pi/12) + sin(x + 2*pi)").unwrap();
/// println!(" parsed_expression {}", parsed_expression);
///  ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) defines the expression tree with exact rational numbers, pi, I, infinities and symbols with domains
/// 2) routes arithmetic operators through the canonical constructors
/// 3) prints expressions in a form `parse_expression` reads back
///# Example#
/// ```
/// use RustedTrig::symbolic::symbolic_engine::Expr;
/// let x = Expr::symbol("x");
/// let e = (x.clone() + x.clone()) * Expr::integer(3).sqrt() * Expr::integer(2).sqrt();
/// assert_eq!(e, Expr::integer(2) * Expr::integer(6).sqrt() * x);
/// ```
/// Example2#
/// ```
/// use RustedTrig::symbolic::symbolic_engine::Expr;
/// use RustedTrig::symbolic::trigonometric::sin;
///   let f = Expr::parse_expression("sin(x)^2").unwrap();
///   // differentiate with respect to x
///   let df_dx = f.diff("x").unwrap();
///   println!("df_dx = {}", df_dx);
///   // Taylor polynomial about zero
///   let t = sin(Expr::symbol("x")).taylor_series1D("x", &Expr::zero(), 5).unwrap();
///   println!("sin(x) ~ {}", t);
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
pub mod symbolic_engine_derivatives;
/// canonical sums, products and powers; expand, subs, xreplace
pub mod symbolic_simplify;
/// is_integer, is_real, ... and the coefficient queries
pub mod symbolic_assumptions;
/// error type, the SymbolicFunction trait and the registry of function definitions
pub mod symbolic_traits;
/// exp, log, hyperbolic functions, re, im, Heaviside
pub mod elementary;
///________________________________________________________________________________________________________________________________________________
///
/// circular functions and their inverses
/// Example#
/// ```
/// use RustedTrig::symbolic::symbolic_engine::Expr;
/// use RustedTrig::symbolic::trigonometric::{atan2, cos, sin};
/// let pi = Expr::pi();
/// assert_eq!(cos(pi.clone() * Expr::rational(2, 3)), Expr::rational(-1, 2));
/// assert_eq!(atan2(Expr::one(), Expr::neg_one()), Expr::rational(3, 4) * pi.clone());
/// let x = Expr::symbol("x");
/// assert_eq!(sin(x.clone() + Expr::integer(2) * pi), sin(x));
/// ```
pub mod trigonometric;
///______________________________________________________________________________________________________________________________________________
/// the collection of number-theoretic helpers: igcdex, factorint, Chebyshev and symmetric polynomials, Bernoulli and Euler numbers
/// _____________________________________________________________________________________________________________________________________________
pub mod utils;
