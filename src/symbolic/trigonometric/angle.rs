//! Argument analysis shared by the circular functions.
//!
//! - `pi_coeff`: the coefficient `c` of an argument `c*pi`, reduced modulo the period
//! - `peeloff_pi`: splits `x + k*pi/2` off a sum so addition formulas can fold it
//! - `fermat_coords`: the Fermat-prime factorisation of a denominator
//! - `InverseArg`: recognises an argument that is itself an inverse function

use crate::symbolic::symbolic_engine::{Expr, Function};
use crate::symbolic::symbolic_traits::SymbolicError;
use crate::symbolic::trigonometric::exact_values::FERMAT_PRIMES;
use crate::symbolic::utils::rat_mod;
use log::trace;
use num::{BigInt, BigRational, FromPrimitive, Integer, One, Signed, Zero};

/// Splits `arg` into `(arg - m, m)` where `m` is the largest multiple of `pi/2` in the
/// first `k*pi` term of the sum; `m` is zero when there is nothing to peel.
///
/// `x + 5*pi/4` gives `(x + pi/4, pi)`, `x + pi/3` gives `(x + pi/3, 0)`.
pub fn peeloff_pi(arg: &Expr) -> (Expr, Expr) {
    let mut k: Option<BigRational> = None;
    for term in arg.make_add_args() {
        if term == Expr::Pi {
            k = Some(BigRational::one());
            break;
        }
        if term.is_mul() {
            let (c, rest) = term.as_coeff_Mul();
            if rest == Expr::Pi {
                k = Some(c);
                break;
            }
        }
    }
    let Some(k) = k else {
        return (arg.clone(), Expr::zero());
    };
    let quarter_turns = rat_mod(&k, &BigRational::new(BigInt::one(), BigInt::from(2)));
    let m = Expr::from_rational(k - quarter_turns) * Expr::pi();
    trace!("peeloff_pi({}) -> multiple {}", arg, m);
    (arg.clone() - m.clone(), m)
}

/// Coefficient of `pi` in `arg`, reduced modulo `2*cycles`.
///
/// ## Returns
/// - `None` when `arg` is not of the form `c*pi`
/// - exact rational `c mod 2*cycles` for numeric `c`; a float coefficient is recovered as
///   a dyadic rational when it is one and left as is otherwise
/// - for `c*x` with `x` a known integer: `x` when `c = 1`, `0` or `2` when `c` is a whole
///   multiple of the period (`2` when the parity of `x` is unknown), else `(c mod 2*cycles)*x`
/// - the raw coefficient when it is not an integer multiple of anything
///
/// ## Examples
/// `-11*pi/7` gives `3/7`, `5*pi` gives `1`, `4*pi` gives `0`, `3*x*pi` gives `3*x`.
pub fn pi_coeff(arg: &Expr, cycles: u32) -> Option<Expr> {
    if *arg == Expr::Pi {
        return Some(Expr::one());
    }
    if arg.is_zero_literal() {
        return Some(Expr::zero());
    }
    if !arg.is_mul() {
        return None;
    }
    let cx = arg.coeff(&Expr::Pi)?;
    let (c, x) = match split_float(&cx) {
        Some((f, rest)) => match dyadic_rational(f) {
            Some(c) => (c, rest),
            None => return Some(cx),
        },
        None => cx.as_coeff_Mul(),
    };
    if x.is_integer().is_true() {
        let period = BigRational::from_integer(BigInt::from(2 * cycles));
        let c2 = rat_mod(&c, &period);
        if c2.is_one() {
            return Some(x);
        }
        if c2.is_zero() {
            return Some(if x.is_even().known().is_some() {
                Expr::zero()
            } else {
                Expr::integer(2)
            });
        }
        return Some(Expr::from_rational(c2) * x);
    }
    Some(Expr::from_rational(c) * x)
}

/// Float coefficient of a numeric product and the remaining factors.
fn split_float(e: &Expr) -> Option<(f64, Expr)> {
    match e {
        Expr::Float(f) => Some((f.0, Expr::one())),
        Expr::Mul(args) => match args.first() {
            Some(Expr::Float(f)) => Some((f.0, Expr::mul_all(args[1..].to_vec()))),
            _ => None,
        },
        _ => None,
    }
}

/// `c` as `i/2**p` when the fractional part is a single power of two away from exact.
fn dyadic_rational(c: f64) -> Option<BigRational> {
    if !c.is_finite() {
        return None;
    }
    let frac = c.abs() % 1.0;
    if frac == 0.0 {
        return BigInt::from_f64(c.trunc()).map(BigRational::from_integer);
    }
    let p = -(frac.log2().round());
    if !(0.0..=52.0).contains(&p) {
        return None;
    }
    let p = p as u32;
    let scaled = c * 2f64.powi(p as i32);
    if scaled.fract() != 0.0 {
        return None;
    }
    let numer = BigInt::from_f64(scaled)?;
    Some(BigRational::new(numer, BigInt::one() << p as usize))
}

/// Distinct Fermat primes whose product is `n`.
///
/// `Ok(None)` when `n` is 1, even, has a repeated Fermat factor or a factor outside the
/// known Fermat primes. A non-positive `n` is an error.
pub fn fermat_coords(n: &BigInt) -> Result<Option<Vec<BigInt>>, SymbolicError> {
    if !n.is_positive() {
        return Err(SymbolicError::InvalidArgument(format!(
            "fermat_coords needs a positive integer, got {}",
            n
        )));
    }
    if n.is_one() || n.is_even() {
        return Ok(None);
    }
    let mut rest = n.clone();
    let mut coords = Vec::new();
    for p in FERMAT_PRIMES.iter().map(|p| BigInt::from(*p)) {
        if rest.is_multiple_of(&p) {
            rest /= &p;
            if rest.is_multiple_of(&p) {
                return Ok(None);
            }
            coords.push(p);
        }
    }
    if !rest.is_one() {
        return Ok(None);
    }
    Ok(Some(coords))
}

//___________________________________INVERSE ARGUMENTS____________________________________

/// Shape of an argument that is an inverse trigonometric function.
#[derive(Clone, Debug, PartialEq)]
pub enum InverseArg {
    Asin(Expr),
    Acos(Expr),
    Atan(Expr),
    Acot(Expr),
    /// `atan2(y, x)` holding `(y, x)`
    Atan2(Expr, Expr),
    Other,
}

impl InverseArg {
    pub fn classify(arg: &Expr) -> InverseArg {
        match arg {
            Expr::Func(f, args) => match (f, args.as_slice()) {
                (Function::asin, [x]) => InverseArg::Asin(x.clone()),
                (Function::acos, [x]) => InverseArg::Acos(x.clone()),
                (Function::atan, [x]) => InverseArg::Atan(x.clone()),
                (Function::acot, [x]) => InverseArg::Acot(x.clone()),
                (Function::atan2, [y, x]) => InverseArg::Atan2(y.clone(), x.clone()),
                _ => InverseArg::Other,
            },
            _ => InverseArg::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::symbolic_engine::Domain;

    fn pi() -> Expr {
        Expr::pi()
    }

    #[test]
    fn test_pi_coeff_rational() {
        assert_eq!(pi_coeff(&(Expr::rational(-11, 7) * pi()), 1), Some(Expr::rational(3, 7)));
        assert_eq!(pi_coeff(&(Expr::integer(5) * pi()), 1), Some(Expr::one()));
        assert_eq!(pi_coeff(&(Expr::integer(4) * pi()), 1), Some(Expr::zero()));
        assert_eq!(pi_coeff(&(Expr::rational(5, 2) * pi()), 1), Some(Expr::half()));
        assert_eq!(pi_coeff(&(Expr::rational(5, 2) * pi()), 2), Some(Expr::rational(5, 2)));
        assert_eq!(pi_coeff(&pi(), 1), Some(Expr::one()));
        assert_eq!(pi_coeff(&Expr::zero(), 1), Some(Expr::zero()));
    }

    #[test]
    fn test_pi_coeff_symbolic() {
        let x = Expr::symbol("x");
        let n = Expr::symbol_with("n", Domain::Integer);
        assert_eq!(pi_coeff(&(x.clone() * pi()), 1), Some(x.clone()));
        assert_eq!(pi_coeff(&(Expr::integer(3) * n.clone() * pi()), 1), Some(n.clone()));
        assert_eq!(pi_coeff(&(Expr::integer(4) * n.clone() * pi()), 1), Some(Expr::integer(2)));
        assert_eq!(pi_coeff(&x, 1), None);
        assert_eq!(pi_coeff(&(x.clone() + pi()), 1), None);
        assert_eq!(pi_coeff(&(Expr::integer(2) * x.clone()), 1), None);
    }

    #[test]
    fn test_pi_coeff_float() {
        assert_eq!(pi_coeff(&(Expr::float(0.25) * pi()), 1), Some(Expr::rational(1, 4)));
        assert_eq!(pi_coeff(&(Expr::float(3.0) * pi()), 1), Some(Expr::one()));
        assert_eq!(pi_coeff(&(Expr::float(0.1) * pi()), 1), Some(Expr::float(0.1)));
    }

    #[test]
    fn test_pi_coeff_huge_float() {
        // every f64 at or above 2**53 is an even integer
        for c in [9223372036854775808.0, 1e20, -1e20, 1e300] {
            assert_eq!(pi_coeff(&(Expr::float(c) * pi()), 1), Some(Expr::zero()), "{}", c);
        }
        assert_eq!(
            pi_coeff(&(Expr::float(1000000000000000.5) * pi()), 1),
            Some(Expr::half())
        );
    }

    #[test]
    fn test_peeloff_pi() {
        let x = Expr::symbol("x");
        let (rest, m) = peeloff_pi(&(x.clone() + Expr::rational(5, 4) * pi()));
        assert_eq!(m, pi());
        assert_eq!(rest, x.clone() + pi() / Expr::integer(4));
        let (rest, m) = peeloff_pi(&(x.clone() + pi() / Expr::integer(3)));
        assert_eq!(m, Expr::zero());
        assert_eq!(rest, x.clone() + pi() / Expr::integer(3));
        let (rest, m) = peeloff_pi(&(x.clone() + pi()));
        assert_eq!((rest, m), (x.clone(), pi()));
        let (rest, m) = peeloff_pi(&x);
        assert_eq!((rest, m), (x, Expr::zero()));
    }

    #[test]
    fn test_fermat_coords() {
        let bi = BigInt::from;
        assert_eq!(fermat_coords(&bi(15)).ok(), Some(Some(vec![bi(3), bi(5)])));
        assert_eq!(fermat_coords(&bi(51)).ok(), Some(Some(vec![bi(3), bi(17)])));
        assert_eq!(fermat_coords(&bi(17)).ok(), Some(Some(vec![bi(17)])));
        assert_eq!(fermat_coords(&bi(9)).ok(), Some(None));
        assert_eq!(fermat_coords(&bi(7)).ok(), Some(None));
        assert_eq!(fermat_coords(&bi(10)).ok(), Some(None));
        assert_eq!(fermat_coords(&bi(1)).ok(), Some(None));
        assert!(fermat_coords(&bi(0)).is_err());
        assert!(fermat_coords(&bi(-3)).is_err());
    }

    #[test]
    fn test_classify_inverse() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let a = Expr::func_unevaluated(Function::atan2, vec![y.clone(), x.clone()]);
        assert_eq!(InverseArg::classify(&a), InverseArg::Atan2(y, x.clone()));
        let a = Expr::func_unevaluated(Function::acos, vec![x.clone()]);
        assert_eq!(InverseArg::classify(&a), InverseArg::Acos(x.clone()));
        assert_eq!(InverseArg::classify(&x), InverseArg::Other);
    }
}
