//! String to `Expr` conversion.
//!
//! Grammar, lowest precedence first:
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := unary (('*' | '/') unary)*
//! unary   := '-' unary | power
//! power   := atom (('**' | '^') unary)?        right associative
//! atom    := number | name '(' sum (',' sum)* ')' | name | '(' sum ')'
//! ```
//! Integers are exact, decimals (`0.25`) become floats. `pi`, `I`, `oo`, `zoo` and `nan`
//! are constants, `sqrt` is the square root, any other name followed by parentheses must
//! be a known function with the right number of arguments, and every remaining name is a
//! complex symbol. The output of `Display` parses back to the same expression.
//!
//! # Example
//! ```rust, ignore
//! use RustedTrig::symbolic::symbolic_engine::Expr;
//! let e = Expr::parse_expression("sin(pi/6) + cos(x + 2*pi)")?;
//! println!("{}", e); // 1/2 + cos(x)
//! ```

use crate::symbolic::symbolic_engine::{Expr, Function};
use crate::symbolic::symbolic_traits::SymbolicError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit1, multispace0},
    combinator::{all_consuming, map_res, opt, recognize},
    error::{Error as NomError, ErrorKind},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded},
};
use num::BigInt;
use std::str::FromStr;

impl Expr {
    pub fn parse_expression(input: &str) -> Result<Expr, SymbolicError> {
        let (_, e) = all_consuming(ws(sum))
            .parse(input)
            .map_err(|e| SymbolicError::Parse(format!("{} in {:?}", e, input)))?;
        Ok(e)
    }
}

/// `inner` surrounded by optional whitespace
fn ws<'a, O, P>(inner: P) -> impl Parser<&'a str, Output = O, Error = NomError<&'a str>>
where
    P: Parser<&'a str, Output = O, Error = NomError<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

fn sum(input: &str) -> IResult<&str, Expr> {
    let (input, first) = product(input)?;
    let (input, rest) = many0(pair(ws(alt((char('+'), char('-')))), product)).parse(input)?;
    let e = rest.into_iter().fold(first, |acc, (op, t)| match op {
        '+' => acc + t,
        _ => acc - t,
    });
    Ok((input, e))
}

fn product(input: &str) -> IResult<&str, Expr> {
    let (input, first) = unary(input)?;
    let (input, rest) = many0(pair(ws(alt((char('*'), char('/')))), unary)).parse(input)?;
    let e = rest.into_iter().fold(first, |acc, (op, f)| match op {
        '*' => acc * f,
        _ => acc / f,
    });
    Ok((input, e))
}

fn unary(input: &str) -> IResult<&str, Expr> {
    alt((preceded(ws(char('-')), unary).map(|e| -e), power)).parse(input)
}

fn power(input: &str) -> IResult<&str, Expr> {
    let (input, base) = atom(input)?;
    let (input, exp) = opt(preceded(ws(alt((tag("**"), tag("^")))), unary)).parse(input)?;
    match exp {
        Some(exp) => Ok((input, base.pow(exp))),
        None => Ok((input, base)),
    }
}

fn atom(input: &str) -> IResult<&str, Expr> {
    ws(alt((number, call, name, delimited(ws(char('(')), sum, ws(char(')')))))).parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(alt((alpha1, tag("_"))), many0(alt((alphanumeric1, tag("_")))))).parse(input)
}

fn number(input: &str) -> IResult<&str, Expr> {
    map_res(
        recognize(pair(digit1, opt(pair(char('.'), digit1)))),
        |s: &str| -> Result<Expr, String> {
            if s.contains('.') {
                s.parse::<f64>().map(Expr::float).map_err(|e| e.to_string())
            } else {
                BigInt::from_str(s).map(Expr::big_integer).map_err(|e| e.to_string())
            }
        },
    )
    .parse(input)
}

fn name(input: &str) -> IResult<&str, Expr> {
    let (rest, id) = identifier(input)?;
    let e = match id {
        "pi" => Expr::pi(),
        "I" => Expr::I(),
        "oo" => Expr::oo(),
        "zoo" => Expr::zoo(),
        "nan" => Expr::NaN,
        _ => Expr::symbol(id),
    };
    Ok((rest, e))
}

fn call(input: &str) -> IResult<&str, Expr> {
    let (rest, id) = identifier(input)?;
    let (rest, args) =
        delimited(ws(char('(')), separated_list1(ws(char(',')), sum), ws(char(')'))).parse(rest)?;
    match build_call(id, args) {
        Some(e) => Ok((rest, e)),
        // a known shape with a bad name or arity must not fall back to a plain symbol
        None => Err(nom::Err::Failure(NomError::new(input, ErrorKind::Verify))),
    }
}

fn build_call(id: &str, mut args: Vec<Expr>) -> Option<Expr> {
    if id == "sqrt" {
        return if args.len() == 1 { args.pop().map(Expr::sqrt) } else { None };
    }
    let f = Function::from_str(id).ok()?;
    if args.len() != f.nargs() {
        return None;
    }
    Some(Expr::func(f, args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::trigonometric::{atan2, cos, sin, tan};

    fn parse(s: &str) -> Expr {
        Expr::parse_expression(s).unwrap()
    }

    #[test]
    fn test_arithmetic_precedence() {
        let x = Expr::symbol("x");
        assert_eq!(parse("1 + 2*3"), Expr::integer(7));
        assert_eq!(parse("2^3^2"), Expr::integer(512));
        assert_eq!(parse("2**-1"), Expr::half());
        assert_eq!(parse("-x^2"), -x.clone().pow(Expr::integer(2)));
        assert_eq!(parse("(1 + x)/2"), (Expr::one() + x.clone()) / Expr::integer(2));
        assert_eq!(parse("12/4/3"), Expr::one());
        assert_eq!(parse("x - x"), Expr::zero());
        assert_eq!(parse("0.5"), Expr::float(0.5));
    }

    #[test]
    fn test_constants_and_functions() {
        let x = Expr::symbol("x");
        assert_eq!(parse("sin(pi/6)"), Expr::half());
        assert_eq!(parse("cos(x + 2*pi)"), cos(x.clone()));
        assert_eq!(parse("atan2(1, -1)"), Expr::rational(3, 4) * Expr::pi());
        assert_eq!(parse("sqrt(8)"), Expr::integer(2) * Expr::integer(2).sqrt());
        assert_eq!(parse("tan(x)"), tan(x.clone()));
        assert_eq!(parse("atan2(y, x)"), atan2(Expr::symbol("y"), x));
        assert_eq!(parse("sin(zoo)"), Expr::NaN);
    }

    #[test]
    fn test_display_parses_back() {
        let x = Expr::symbol("x");
        for e in [
            sin(Expr::pi() / Expr::integer(12)),
            cos(Expr::pi() / Expr::integer(5)),
            cos(Expr::pi() / Expr::integer(8)),
            sin(x.clone()).pow(Expr::integer(2)) / Expr::integer(3) - x.clone(),
            Expr::one() / (x.clone() * Expr::symbol("y")),
        ] {
            assert_eq!(parse(&format!("{}", e)), e, "{}", e);
        }
    }

    #[test]
    fn test_errors() {
        for bad in ["", "1 +", "sin(", "sin()", "foo(x)", "atan2(1)", "sqrt(1, 2)", "2 $ 3", "(x"] {
            assert!(
                matches!(Expr::parse_expression(bad), Err(SymbolicError::Parse(_))),
                "{:?} should not parse",
                bad
            );
        }
    }
}
