//! # Symbolic Engine Module
//!
//! Core expression type of the trigonometric engine. Expressions are immutable values
//! representing elements of the algebraic closure of the rationals extended by symbols,
//! `pi`, the imaginary unit and function applications.
//!
//! ## Main Structures
//!
//! ### `Expr` Enum
//! - **Numbers**: `Number(BigRational)` exact, `Float(Real)` approximate
//! - **Atoms**: `Symbol`, `Pi`, `ImaginaryUnit`, infinities and `NaN`
//! - **Operations**: n-ary `Add`, n-ary `Mul`, binary `Pow`
//! - **Functions**: `Func(Function, args)` with a closed tag enum
//!
//! ### Construction
//! Nodes are never built by hand outside this crate: `Expr::add_all`, `Expr::mul_all`,
//! `Expr::pow` and `Expr::apply` canonicalise their result exactly once (see
//! `symbolic_simplify`). The arithmetic operators route through those constructors, so
//! `x + x` is `2*x` and `sqrt(2)*sqrt(3)` is `sqrt(6)`.
//!
//! ## Interesting Code Features
//!
//! 1. **Structural equality**: derived `Eq`/`Ord`/`Hash` over canonical forms is the
//!    only notion of equality the evaluators rely on
//! 2. **Assumption-carrying symbols**: `Symbol` knows whether it is real, positive,
//!    integer, even or odd
//! 3. **Dummy symbols**: generated placeholders carry a unique id and never collide with
//!    user symbols

#![allow(non_camel_case_types)]

use num::{BigInt, BigRational, One, Signed, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use strum_macros::{Display, EnumIter, EnumString};

/// Approximate number with total ordering and bitwise hashing.
#[derive(Clone, Copy, Debug)]
pub struct Real(pub f64);

impl Real {
    pub fn new(value: f64) -> Real {
        // one zero only, so that 0.0 and -0.0 hash alike
        if value == 0.0 { Real(0.0) } else { Real(value) }
    }
}

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Real {}

impl Hash for Real {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Real {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Assumptions attached to a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    Complex,
    Real,
    Positive,
    Integer,
    Even,
    Odd,
}

static DUMMY_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    pub name: String,
    pub domain: Domain,
    /// 0 for user symbols, a process-unique id for dummies
    pub dummy: u64,
}

impl Symbol {
    pub fn new(name: &str, domain: Domain) -> Symbol {
        Symbol {
            name: name.to_string(),
            domain,
            dummy: 0,
        }
    }

    /// A placeholder symbol distinct from every other symbol ever created.
    pub fn dummy(name: &str, domain: Domain) -> Symbol {
        Symbol {
            name: name.to_string(),
            domain,
            dummy: DUMMY_COUNTER.fetch_add(1, AtomicOrdering::Relaxed),
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.dummy != 0
    }
}

/// Tags of every function node the engine knows about.
///
/// The trigonometric family is the subject of this crate; the remaining tags are the
/// collaborators it produces (hyperbolics for imaginary arguments, `exp`/`log` for
/// rewrites, `re`/`im`/`Heaviside` for `atan2`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter)]
pub enum Function {
    sin,
    cos,
    tan,
    cot,
    sec,
    csc,
    asin,
    acos,
    atan,
    acot,
    asec,
    acsc,
    atan2,
    sinh,
    cosh,
    tanh,
    coth,
    sech,
    csch,
    asinh,
    atanh,
    acoth,
    exp,
    log,
    re,
    im,
    Heaviside,
    conjugate,
}

impl Function {
    /// Number of arguments the function takes.
    pub fn nargs(&self) -> usize {
        match self {
            Function::atan2 => 2,
            _ => 1,
        }
    }
}

/// Core symbolic expression.
///
/// The variant order is significant: derived `Ord` sorts numbers first, which puts the
/// numeric coefficient at the head of every canonical product.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Expr {
    /// exact rational number
    Number(BigRational),
    /// approximate number
    Float(Real),
    Symbol(Symbol),
    Pi,
    ImaginaryUnit,
    Infinity,
    NegativeInfinity,
    ComplexInfinity,
    NaN,
    /// base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// flattened, sorted product with at most one leading number
    Mul(Vec<Expr>),
    /// flattened, sorted sum with at most one number
    Add(Vec<Expr>),
    /// function application
    Func(Function, Vec<Expr>),
}

impl Expr {
    // BASIC FEATURES

    pub fn integer(n: i64) -> Expr {
        Expr::Number(BigRational::from_integer(BigInt::from(n)))
    }

    pub fn big_integer(n: BigInt) -> Expr {
        Expr::Number(BigRational::from_integer(n))
    }

    /// Exact rational `p/q`, reduced.
    pub fn rational(p: i64, q: i64) -> Expr {
        Expr::Number(BigRational::new(BigInt::from(p), BigInt::from(q)))
    }

    pub fn from_rational(r: BigRational) -> Expr {
        Expr::Number(r)
    }

    pub fn float(value: f64) -> Expr {
        if value.is_nan() {
            return Expr::NaN;
        }
        if value.is_infinite() {
            return if value > 0.0 { Expr::Infinity } else { Expr::NegativeInfinity };
        }
        Expr::Float(Real::new(value))
    }

    pub fn zero() -> Expr {
        Expr::Number(BigRational::zero())
    }

    pub fn one() -> Expr {
        Expr::Number(BigRational::one())
    }

    pub fn neg_one() -> Expr {
        Expr::integer(-1)
    }

    pub fn half() -> Expr {
        Expr::rational(1, 2)
    }

    pub fn pi() -> Expr {
        Expr::Pi
    }

    #[allow(non_snake_case)]
    pub fn I() -> Expr {
        Expr::ImaginaryUnit
    }

    pub fn oo() -> Expr {
        Expr::Infinity
    }

    pub fn zoo() -> Expr {
        Expr::ComplexInfinity
    }

    /// Complex symbol without assumptions.
    pub fn symbol(name: &str) -> Expr {
        Expr::Symbol(Symbol::new(name, Domain::Complex))
    }

    pub fn symbol_with(name: &str, domain: Domain) -> Expr {
        Expr::Symbol(Symbol::new(name, domain))
    }

    pub fn dummy(name: &str, domain: Domain) -> Expr {
        Expr::Symbol(Symbol::dummy(name, domain))
    }

    /// Creates multiple complex symbols from a comma-separated string.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let vars = Expr::Symbols("x, y, z");
    /// assert_eq!(vars.len(), 3);
    /// ```
    #[allow(non_snake_case)]
    pub fn Symbols(symbols: &str) -> Vec<Expr> {
        symbols
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(Expr::symbol)
            .collect()
    }

    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Principal square root, canonicalised.
    pub fn sqrt(self) -> Expr {
        Expr::pow(self, Expr::half())
    }

    /// Function application with automatic evaluation.
    pub fn func(f: Function, args: Vec<Expr>) -> Expr {
        Expr::apply(f, args, true)
    }

    /// Literal function node; no evaluation is attempted.
    pub fn func_unevaluated(f: Function, args: Vec<Expr>) -> Expr {
        Expr::apply(f, args, false)
    }

    //___________________________________INSPECTION____________________________________

    pub fn as_rational(&self) -> Option<&BigRational> {
        match self {
            Expr::Number(r) => Some(r),
            _ => None,
        }
    }

    /// Exact integer value, if this is an integral `Number`.
    pub fn as_integer(&self) -> Option<BigInt> {
        match self {
            Expr::Number(r) if r.is_integer() => Some(r.numer().clone()),
            _ => None,
        }
    }

    pub fn is_zero_literal(&self) -> bool {
        match self {
            Expr::Number(r) => r.is_zero(),
            Expr::Float(x) => x.0 == 0.0,
            _ => false,
        }
    }

    pub fn is_one_literal(&self) -> bool {
        match self {
            Expr::Number(r) => r.is_one(),
            _ => false,
        }
    }

    pub fn is_add(&self) -> bool {
        matches!(self, Expr::Add(_))
    }

    pub fn is_mul(&self) -> bool {
        matches!(self, Expr::Mul(_))
    }

    /// The function tag, when the node is a function application.
    pub fn func_tag(&self) -> Option<Function> {
        match self {
            Expr::Func(f, _) => Some(*f),
            _ => None,
        }
    }

    /// Whether this node is `f(...)` for the given tag.
    pub fn is_func(&self, f: Function) -> bool {
        self.func_tag() == Some(f)
    }

    /// Arguments of an operation or function node; atoms have none.
    pub fn args(&self) -> Vec<Expr> {
        match self {
            Expr::Add(args) | Expr::Mul(args) | Expr::Func(_, args) => args.clone(),
            Expr::Pow(b, e) => vec![(**b).clone(), (**e).clone()],
            _ => Vec::new(),
        }
    }

    /// Terms of a sum; any other expression is a single term.
    pub fn make_add_args(&self) -> Vec<Expr> {
        match self {
            Expr::Add(args) => args.clone(),
            _ => vec![self.clone()],
        }
    }

    /// Factors of a product; any other expression is a single factor.
    pub fn make_mul_args(&self) -> Vec<Expr> {
        match self {
            Expr::Mul(args) => args.clone(),
            _ => vec![self.clone()],
        }
    }

    /// Names of the non-dummy symbols.
    pub fn free_symbols(&self) -> Vec<Symbol> {
        let mut out: Vec<Symbol> = Vec::new();
        self.collect_symbols(&mut out);
        out.sort();
        out.dedup();
        out
    }

    fn collect_symbols(&self, out: &mut Vec<Symbol>) {
        match self {
            Expr::Symbol(s) => out.push(s.clone()),
            Expr::Pow(b, e) => {
                b.collect_symbols(out);
                e.collect_symbols(out);
            }
            Expr::Add(args) | Expr::Mul(args) | Expr::Func(_, args) => {
                for a in args {
                    a.collect_symbols(out);
                }
            }
            _ => {}
        }
    }

    /// No free symbols: the expression denotes a single complex number.
    pub fn is_number(&self) -> bool {
        match self {
            Expr::Symbol(_) => false,
            Expr::Pow(b, e) => b.is_number() && e.is_number(),
            Expr::Add(args) | Expr::Mul(args) | Expr::Func(_, args) => {
                args.iter().all(|a| a.is_number())
            }
            _ => true,
        }
    }
}

//___________________________________OPERATORS____________________________________

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::add_all(vec![self, rhs])
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::add_all(vec![self, -rhs])
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::mul_all(vec![self, rhs])
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::mul_all(vec![self, Expr::pow(rhs, Expr::neg_one())])
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::mul_all(vec![Expr::neg_one(), self])
    }
}

impl std::ops::AddAssign for Expr {
    fn add_assign(&mut self, rhs: Self) {
        *self = Expr::add_all(vec![self.clone(), rhs]);
    }
}

impl std::ops::SubAssign for Expr {
    fn sub_assign(&mut self, rhs: Self) {
        *self = Expr::add_all(vec![self.clone(), -rhs]);
    }
}

impl std::ops::MulAssign for Expr {
    fn mul_assign(&mut self, rhs: Self) {
        *self = Expr::mul_all(vec![self.clone(), rhs]);
    }
}

impl std::ops::DivAssign for Expr {
    fn div_assign(&mut self, rhs: Self) {
        *self = self.clone() / rhs;
    }
}

macro_rules! int_operators {
    ($($trait_:ident, $method:ident);*) => {
        $(
            impl std::ops::$trait_<i64> for Expr {
                type Output = Expr;
                fn $method(self, rhs: i64) -> Expr {
                    std::ops::$trait_::$method(self, Expr::integer(rhs))
                }
            }
            impl std::ops::$trait_<Expr> for i64 {
                type Output = Expr;
                fn $method(self, rhs: Expr) -> Expr {
                    std::ops::$trait_::$method(Expr::integer(self), rhs)
                }
            }
        )*
    };
}

int_operators!(Add, add; Sub, sub; Mul, mul; Div, div);

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Expr::integer(n)
    }
}

impl From<BigRational> for Expr {
    fn from(r: BigRational) -> Self {
        Expr::Number(r)
    }
}

impl From<Symbol> for Expr {
    fn from(s: Symbol) -> Self {
        Expr::Symbol(s)
    }
}

//___________________________________DISPLAY____________________________________

fn fmt_rational(r: &BigRational) -> String {
    if r.is_integer() {
        format!("{}", r.numer())
    } else {
        format!("{}/{}", r.numer(), r.denom())
    }
}

/// Leading sign of a term as it would be printed.
pub(crate) fn is_negative_term(e: &Expr) -> bool {
    match e {
        Expr::Number(r) => r.is_negative(),
        Expr::Float(x) => x.0 < 0.0,
        Expr::NegativeInfinity => true,
        Expr::Mul(args) => args.first().map(is_negative_term).unwrap_or(false),
        _ => false,
    }
}

fn is_atomic_print(e: &Expr) -> bool {
    match e {
        Expr::Number(r) => r.is_integer() && !r.is_negative(),
        Expr::Float(x) => x.0 >= 0.0,
        Expr::Symbol(_)
        | Expr::Pi
        | Expr::ImaginaryUnit
        | Expr::Infinity
        | Expr::ComplexInfinity
        | Expr::NaN
        | Expr::Func(_, _) => true,
        Expr::Pow(_, e) => e.as_rational().map(|r| *r == BigRational::new(1.into(), 2.into())).unwrap_or(false),
        _ => false,
    }
}

fn paren(e: &Expr) -> String {
    if is_atomic_print(e) { format!("{}", e) } else { format!("({})", e) }
}

fn fmt_factor(e: &Expr) -> String {
    match e {
        Expr::Add(_) => format!("({})", e),
        _ => format!("{}", e),
    }
}

fn fmt_pow(base: &Expr, exp: &Expr) -> String {
    if let Some(r) = exp.as_rational() {
        if *r == BigRational::new(1.into(), 2.into()) {
            return format!("sqrt({})", base);
        }
        if r.is_negative() {
            let positive = -r.clone();
            let printed = if positive.is_one() {
                paren(base)
            } else {
                fmt_pow(base, &Expr::Number(positive))
            };
            return format!("1/{}", printed);
        }
    }
    format!("{}**{}", paren(base), paren(exp))
}

fn fmt_mul(args: &[Expr]) -> String {
    let mut coeff = BigRational::one();
    let mut numer: Vec<String> = Vec::new();
    let mut denom: Vec<String> = Vec::new();
    for a in args {
        match a {
            Expr::Number(r) => coeff *= r.clone(),
            Expr::Pow(b, e) if e.as_rational().map(|r| r.is_negative()).unwrap_or(false) => {
                let r = e.as_rational().cloned().unwrap_or_else(BigRational::one);
                if -r.clone() == BigRational::one() {
                    denom.push(fmt_factor(b));
                } else {
                    denom.push(fmt_pow(b, &Expr::Number(-r)));
                }
            }
            _ => numer.push(fmt_factor(a)),
        }
    }
    let sign = if coeff.is_negative() { "-" } else { "" };
    let coeff = coeff.abs();
    let n = coeff.numer().clone();
    let d = coeff.denom().clone();
    if !n.is_one() || numer.is_empty() {
        numer.insert(0, format!("{}", n));
    }
    if !d.is_one() {
        denom.insert(0, format!("{}", d));
    }
    let numer = numer.join("*");
    match denom.len() {
        0 => format!("{}{}", sign, numer),
        1 => format!("{}{}/{}", sign, numer, denom[0]),
        _ => format!("{}{}/({})", sign, numer, denom.join("*")),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Number(r) => write!(f, "{}", fmt_rational(r)),
            Expr::Float(x) => write!(f, "{:?}", x.0),
            Expr::Symbol(s) => write!(f, "{}", s.name),
            Expr::Pi => write!(f, "pi"),
            Expr::ImaginaryUnit => write!(f, "I"),
            Expr::Infinity => write!(f, "oo"),
            Expr::NegativeInfinity => write!(f, "-oo"),
            Expr::ComplexInfinity => write!(f, "zoo"),
            Expr::NaN => write!(f, "nan"),
            Expr::Pow(base, exp) => write!(f, "{}", fmt_pow(base, exp)),
            Expr::Mul(args) => write!(f, "{}", fmt_mul(args)),
            Expr::Add(args) => {
                for (i, term) in args.iter().enumerate() {
                    if i == 0 {
                        write!(f, "{}", term)?;
                    } else if is_negative_term(term) {
                        write!(f, " - {}", -term.clone())?;
                    } else {
                        write!(f, " + {}", term)?;
                    }
                }
                Ok(())
            }
            Expr::Func(fun, args) => {
                let printed: Vec<String> = args.iter().map(|a| format!("{}", a)).collect();
                write!(f, "{}({})", fun, printed.join(", "))
            }
        }
    }
}

//___________________________________MACROS____________________________________

/// Macro to create complex symbols from a comma-separated list
/// Usage: symbols!(x, y, z) -> creates symbols x, y, z
#[macro_export]
macro_rules! symbols {
    ($($var:ident),+ $(,)?) => {
        ($(
            $crate::symbolic::symbolic_engine::Expr::symbol(stringify!($var))
        ),+)
    };
}
