//! # Symbolic Engine Derivatives Module
//!
//! Analytical differentiation of expressions.
//!
//! ## Purpose
//! Sums and products follow the linearity and product rules, powers the general power
//! rule, and every function node the chain rule through the `fdiff` of its definition.
//! Functions without a derivative (e.g. `re`) report `SymbolicError::ArgumentIndex`
//! only when their argument actually depends on the variable.
//!
//! ## Key Methods
//! - `diff(var)` - partial derivative by a symbol name
//! - `diff_multi(vars)` - the gradient
//! - `n_th_derivative1D(var, n)` - repeated differentiation
//! - `taylor_series1D(var, x0, order)` - Taylor polynomial from derivatives at `x0`
//! - `compare_num1D(var, x0, h)` - analytical derivative against a central difference
//!
//! ## Example
//! ```rust, ignore
//! let x = Expr::symbol("x");
//! let d = sin(x.clone().pow(Expr::integer(2))).diff("x")?; // 2*x*cos(x**2)
//! ```

use crate::symbolic::elementary::log as ln;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_traits::{SymbolicError, SymbolicFunction, definition};
use crate::symbolic::utils::factorial;
use log::trace;

impl Expr {
    /// Partial derivative with respect to the (non-dummy) symbol named `var`.
    pub fn diff(&self, var: &str) -> Result<Expr, SymbolicError> {
        match self {
            Expr::Symbol(s) => {
                if s.name == var && !s.is_dummy() {
                    Ok(Expr::one())
                } else {
                    Ok(Expr::zero())
                }
            }
            Expr::Add(args) => {
                let terms = args.iter().map(|a| a.diff(var)).collect::<Result<Vec<_>, _>>()?;
                Ok(Expr::add_all(terms))
            }
            Expr::Mul(args) => {
                let mut terms = Vec::with_capacity(args.len());
                for (i, factor) in args.iter().enumerate() {
                    let d = factor.diff(var)?;
                    if d.is_zero_literal() {
                        continue;
                    }
                    let mut factors: Vec<Expr> = args
                        .iter()
                        .enumerate()
                        .filter(|(j, _)| *j != i)
                        .map(|(_, f)| f.clone())
                        .collect();
                    factors.push(d);
                    terms.push(Expr::mul_all(factors));
                }
                Ok(Expr::add_all(terms))
            }
            Expr::Pow(base, exp) => {
                let db = base.diff(var)?;
                let de = exp.diff(var)?;
                if de.is_zero_literal() {
                    if db.is_zero_literal() {
                        return Ok(Expr::zero());
                    }
                    // e * b**(e - 1) * b'
                    let lowered = Expr::pow((**base).clone(), (**exp).clone() - Expr::one());
                    return Ok(Expr::mul_all(vec![(**exp).clone(), lowered, db]));
                }
                // b**e * (e' * log(b) + e * b' / b)
                let inner = de * ln((**base).clone()) + (**exp).clone() * db / (**base).clone();
                Ok(self.clone() * inner)
            }
            Expr::Func(f, args) => {
                let def = definition(*f);
                let mut terms = Vec::with_capacity(args.len());
                for (i, a) in args.iter().enumerate() {
                    let da = a.diff(var)?;
                    if da.is_zero_literal() {
                        continue;
                    }
                    let outer = def.fdiff(args, i + 1)?;
                    terms.push(outer * da);
                }
                Ok(Expr::add_all(terms))
            }
            _ => Ok(Expr::zero()),
        }
    }

    /// Partial derivatives by each of `vars`, in order.
    pub fn diff_multi(&self, vars: &[&str]) -> Result<Vec<Expr>, SymbolicError> {
        vars.iter().map(|v| self.diff(v)).collect()
    }

    #[allow(non_snake_case)]
    pub fn n_th_derivative1D(&self, var: &str, n: usize) -> Result<Expr, SymbolicError> {
        let mut d = self.clone();
        for _ in 0..n {
            d = d.diff(var)?;
            if d.is_zero_literal() {
                break;
            }
        }
        Ok(d)
    }

    /// `sum(f^(k)(x0) / k! * (var - x0)**k, k = 0..=order)`
    #[allow(non_snake_case)]
    pub fn taylor_series1D(&self, var: &str, x0: &Expr, order: usize) -> Result<Expr, SymbolicError> {
        let x = Expr::symbol_of(self, var);
        let shift = x.clone() - x0.clone();
        let mut d = self.clone();
        let mut terms = Vec::with_capacity(order + 1);
        for k in 0..=order {
            if k > 0 {
                d = d.diff(var)?;
            }
            let at = d.subs(&x, x0);
            trace!("taylor_series1D: order {} coefficient {}", k, at);
            if at.is_zero_literal() {
                continue;
            }
            let k_fact = Expr::big_integer(factorial(k as u64));
            terms.push(at / k_fact * shift.clone().pow(Expr::integer(k as i64)));
        }
        Ok(Expr::add_all(terms))
    }

    /// Analytical derivative at `x0` next to the central difference with step `h`.
    ///
    /// `None` when either side cannot be evaluated to a real number.
    #[allow(non_snake_case)]
    pub fn compare_num1D(&self, var: &str, x0: f64, h: f64) -> Result<Option<(f64, f64)>, SymbolicError> {
        let x = Expr::symbol_of(self, var);
        let at = |e: &Expr, v: f64| e.subs(&x, &Expr::float(v)).evalf();
        let analytic = at(&self.diff(var)?, x0);
        let numeric = match (at(self, x0 + h), at(self, x0 - h)) {
            (Some(fp), Some(fm)) => Some((fp - fm) / (2.0 * h)),
            _ => None,
        };
        Ok(analytic.zip(numeric))
    }

    /// The symbol named `var` as it occurs in `e`, keeping its domain; a complex
    /// symbol of that name if it does not occur.
    fn symbol_of(e: &Expr, var: &str) -> Expr {
        e.free_symbols()
            .into_iter()
            .find(|s| s.name == var && !s.is_dummy())
            .map(Expr::Symbol)
            .unwrap_or_else(|| Expr::symbol(var))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::elementary::re;
    use crate::symbolic::symbolic_engine::Function;
    use crate::symbolic::trigonometric::trig_series::taylor_polynomial;
    use crate::symbolic::trigonometric::{asin, atan, cos, sec, sin, tan};
    use approx::assert_relative_eq;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn test_polynomial_rules() {
        let x = x();
        let y = Expr::symbol("y");
        assert_eq!(x.clone().pow(Expr::integer(3)).diff("x").unwrap(), Expr::integer(3) * x.clone().pow(Expr::integer(2)));
        assert_eq!((x.clone() * y.clone()).diff("y").unwrap(), x.clone());
        assert_eq!((x.clone() + y.clone()).diff("z").unwrap(), Expr::zero());
        assert_eq!(Expr::pi().diff("x").unwrap(), Expr::zero());
    }

    #[test]
    fn test_chain_rule_through_trig() {
        let x = x();
        let x2 = x.clone().pow(Expr::integer(2));
        assert_eq!(sin(x.clone()).diff("x").unwrap(), cos(x.clone()));
        assert_eq!(
            sin(x2.clone()).diff("x").unwrap(),
            Expr::integer(2) * x.clone() * cos(x2)
        );
        assert_eq!(
            atan(x.clone()).diff("x").unwrap(),
            Expr::one() / (Expr::one() + x.clone().pow(Expr::integer(2)))
        );
        assert_eq!(
            asin(x.clone()).diff("x").unwrap(),
            Expr::one() / (Expr::one() - x.clone().pow(Expr::integer(2))).sqrt()
        );
        assert_eq!(sec(x.clone()).diff("x").unwrap(), tan(x.clone()) * sec(x));
    }

    #[test]
    fn test_gradient() {
        let (x, y) = crate::symbols!(x, y);
        let f = sin(x.clone() * y.clone());
        let grad = f.diff_multi(&["x", "y"]).unwrap();
        assert_eq!(grad[0], y.clone() * cos(x.clone() * y.clone()));
        assert_eq!(grad[1], x.clone() * cos(x * y));
    }

    #[test]
    fn test_repeated_derivative_cycles() {
        let x = x();
        assert_eq!(sin(x.clone()).n_th_derivative1D("x", 4).unwrap(), sin(x.clone()));
        assert_eq!(cos(x.clone()).n_th_derivative1D("x", 2).unwrap(), -cos(x.clone()));
        assert_eq!(x.clone().pow(Expr::integer(2)).n_th_derivative1D("x", 5).unwrap(), Expr::zero());
    }

    #[test]
    fn test_taylor_agrees_with_series_terms() {
        let x = Expr::symbol("x_taylor");
        let from_derivatives = cos(x.clone()).taylor_series1D("x_taylor", &Expr::zero(), 6).unwrap();
        assert_eq!(from_derivatives, taylor_polynomial(Function::cos, &x, 7).unwrap());
        let from_derivatives = sin(x.clone()).taylor_series1D("x_taylor", &Expr::zero(), 7).unwrap();
        assert_eq!(from_derivatives, taylor_polynomial(Function::sin, &x, 8).unwrap());
    }

    #[test]
    fn test_numeric_comparison() {
        let x = x();
        for f in [tan(x.clone()), sec(x.clone()), atan(x.clone()) * sin(x.clone())] {
            let (analytic, numeric) = f.compare_num1D("x", 0.3, 1e-6).unwrap().unwrap();
            assert_relative_eq!(analytic, numeric, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_function_without_derivative() {
        let x = x();
        assert!(matches!(
            re(x.clone()).diff("x"),
            Err(SymbolicError::ArgumentIndex { function: Function::re, index: 1 })
        ));
        assert_eq!(re(x).diff("y").unwrap(), Expr::zero());
    }
}
