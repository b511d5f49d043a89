// the collection of number-theoretic and combinatorial helpers used by the trigonometric evaluators:
// extended gcd, factorization, partial fractions of rationals, Chebyshev polynomials,
// elementary symmetric polynomials, Bernoulli and Euler numbers, numbered dummy symbols
use crate::symbolic::symbolic_engine::{Domain, Expr};
use itertools::Itertools;
use num::{BigInt, BigRational, Integer, One, Signed, Zero};

/// Trial division stops here; whatever cofactor remains is reported as a single factor.
const TRIAL_DIVISION_LIMIT: u64 = 1_000_000;

/// Extended Euclid: returns `(x, y, g)` with `x*a + y*b = g = gcd(a, b)`.
pub fn igcdex(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    if a.is_zero() && b.is_zero() {
        return (BigInt::zero(), BigInt::one(), BigInt::zero());
    }
    if a.is_zero() {
        return (BigInt::zero(), b / b.abs(), b.abs());
    }
    if b.is_zero() {
        return (a / a.abs(), BigInt::zero(), a.abs());
    }
    let x_sign = if a.is_negative() { -BigInt::one() } else { BigInt::one() };
    let y_sign = if b.is_negative() { -BigInt::one() } else { BigInt::one() };
    let (mut a, mut b) = (a.abs(), b.abs());
    let (mut x, mut y, mut r, mut s) = (BigInt::one(), BigInt::zero(), BigInt::zero(), BigInt::one());
    while !b.is_zero() {
        let (q, c) = a.div_mod_floor(&b);
        let next_r = &x - &q * &r;
        let next_s = &y - &q * &s;
        a = b;
        b = c;
        x = r;
        y = s;
        r = next_r;
        s = next_s;
    }
    (x * x_sign, y * y_sign, a)
}

/// gcd of a sequence together with one linear combination reaching it.
///
/// Returns `(ys, g)` with `sum(xs[i]*ys[i]) == g`.
pub fn migcdex(xs: &[BigInt]) -> (Vec<BigInt>, BigInt) {
    match xs.len() {
        0 => (Vec::new(), BigInt::zero()),
        1 => (vec![BigInt::one()], xs[0].clone()),
        2 => {
            let (u, v, h) = igcdex(&xs[0], &xs[1]);
            (vec![u, v], h)
        }
        _ => {
            let (ys, g) = migcdex(&xs[1..]);
            let (u, v, h) = igcdex(&xs[0], &g);
            let mut out = Vec::with_capacity(xs.len());
            out.push(u);
            out.extend(ys.into_iter().map(|y| &v * y));
            (out, h)
        }
    }
}

/// Prime factorization of `|n|` as ascending `(prime, exponent)` pairs.
pub fn factorint(n: &BigInt) -> Vec<(BigInt, u32)> {
    let mut n = n.abs();
    let mut out = Vec::new();
    if n <= BigInt::one() {
        return out;
    }
    let mut p = 2u64;
    while p <= TRIAL_DIVISION_LIMIT {
        let bp = BigInt::from(p);
        if &bp * &bp > n {
            break;
        }
        let mut e = 0u32;
        while (&n % &bp).is_zero() {
            n /= &bp;
            e += 1;
        }
        if e > 0 {
            out.push((bp, e));
        }
        p += if p == 2 { 1 } else { 2 };
    }
    if n > BigInt::one() {
        out.push((n, 1));
    }
    out
}

/// Splits `r = p/q` into rationals whose denominators are the given factors of `q`
/// (or the prime powers of `q`), summing back exactly to `r`.
///
/// ## Algorithm
///
/// With cofactors `a_i = q / f_i`, `migcdex` finds `y_i` with `sum(y_i*a_i) = 1`, so that
/// `r = sum(p*y_i*a_i / q) = sum(p*y_i / f_i)`.
pub fn ipartfrac(r: &BigRational, factors: Option<&[BigInt]>) -> Vec<BigRational> {
    let q = r.denom().clone();
    if q.is_one() {
        return vec![r.clone()];
    }
    let cofactors: Vec<BigInt> = match factors {
        Some(fs) => fs.iter().map(|f| &q / f).collect(),
        None => factorint(&q)
            .into_iter()
            .map(|(p, e)| &q / num::pow(p, e as usize))
            .collect(),
    };
    if cofactors.len() == 1 {
        return vec![r.clone()];
    }
    let (ys, _) = migcdex(&cofactors);
    let parts: Vec<BigRational> = ys
        .iter()
        .zip(cofactors.iter())
        .map(|(y, a)| BigRational::new(r.numer() * y * a, q.clone()))
        .collect();
    debug_assert_eq!(
        parts.iter().fold(BigRational::zero(), |acc, x| acc + x),
        *r
    );
    parts
}

/// Python-style modulus for rationals: the result has the sign of `m`.
pub fn rat_mod(r: &BigRational, m: &BigRational) -> BigRational {
    r - m * (r / m).floor()
}

pub fn factorial(n: u64) -> BigInt {
    (1..=n).fold(BigInt::one(), |acc, k| acc * BigInt::from(k))
}

/// Pochhammer symbol `x (x+1) ... (x+k-1)`.
pub fn rising_factorial(x: &BigRational, k: u64) -> BigRational {
    (0..k).fold(BigRational::one(), |acc, i| {
        acc * (x + BigRational::from_integer(BigInt::from(i)))
    })
}

pub fn binomial(n: u64, k: u64) -> BigInt {
    if k > n {
        return BigInt::zero();
    }
    let k = k.min(n - k);
    (0..k).fold(BigInt::one(), |acc, i| acc * BigInt::from(n - i) / BigInt::from(i + 1))
}

/// Bernoulli number `B_n` with `B_1 = -1/2`.
pub fn bernoulli(n: u64) -> BigRational {
    let mut b: Vec<BigRational> = Vec::with_capacity(n as usize + 1);
    for m in 0..=n {
        if m == 0 {
            b.push(BigRational::one());
            continue;
        }
        let s = (0..m).fold(BigRational::zero(), |acc, k| {
            acc + BigRational::from_integer(binomial(m + 1, k)) * &b[k as usize]
        });
        b.push(-s / BigRational::from_integer(BigInt::from(m + 1)));
    }
    b.pop().unwrap_or_else(BigRational::one)
}

/// Euler number `E_n` (secant numbers with alternating sign, zero for odd `n`).
pub fn euler(n: u64) -> BigInt {
    if n % 2 == 1 {
        return BigInt::zero();
    }
    let mut e: Vec<BigInt> = vec![BigInt::one()];
    for m in (2..=n).step_by(2) {
        let s = (0..m / 2).fold(BigInt::zero(), |acc, k| {
            acc + binomial(m, 2 * k) * &e[k as usize]
        });
        e.push(-s);
    }
    e.pop().unwrap_or_else(BigInt::one)
}

/// Integer coefficients of `T_n`, lowest degree first.
pub fn chebyshevt_coeffs(n: i64) -> Vec<BigInt> {
    let n = n.unsigned_abs() as usize;
    let mut prev = vec![BigInt::one()];
    if n == 0 {
        return prev;
    }
    let mut cur = vec![BigInt::zero(), BigInt::one()];
    for _ in 1..n {
        let next = chebyshev_step(&cur, &prev);
        prev = cur;
        cur = next;
    }
    cur
}

/// Integer coefficients of `U_n`, lowest degree first; `U_{-1} = 0`, `U_{-n} = -U_{n-2}`.
pub fn chebyshevu_coeffs(n: i64) -> Vec<BigInt> {
    if n == -1 {
        return vec![BigInt::zero()];
    }
    if n < -1 {
        return chebyshevu_coeffs(-n - 2).into_iter().map(|c| -c).collect();
    }
    let n = n as usize;
    let mut prev = vec![BigInt::one()];
    if n == 0 {
        return prev;
    }
    let mut cur = vec![BigInt::zero(), BigInt::from(2)];
    for _ in 1..n {
        let next = chebyshev_step(&cur, &prev);
        prev = cur;
        cur = next;
    }
    cur
}

// P_{k+1} = 2x P_k - P_{k-1}
fn chebyshev_step(cur: &[BigInt], prev: &[BigInt]) -> Vec<BigInt> {
    let mut next = vec![BigInt::zero(); cur.len() + 1];
    for (i, c) in cur.iter().enumerate() {
        next[i + 1] += c * BigInt::from(2);
    }
    for (i, c) in prev.iter().enumerate() {
        next[i] -= c;
    }
    next
}

fn eval_poly(coeffs: &[BigInt], x: &Expr) -> Expr {
    let terms = coeffs
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_zero())
        .map(|(k, c)| {
            Expr::mul_all(vec![
                Expr::big_integer(c.clone()),
                Expr::pow(x.clone(), Expr::integer(k as i64)),
            ])
        })
        .collect();
    Expr::add_all(terms)
}

/// `T_n(x)` as an explicit polynomial in `x`.
pub fn chebyshevt(n: i64, x: &Expr) -> Expr {
    eval_poly(&chebyshevt_coeffs(n), x)
}

/// `U_n(x)` as an explicit polynomial in `x`.
pub fn chebyshevu(n: i64, x: &Expr) -> Expr {
    eval_poly(&chebyshevu_coeffs(n), x)
}

/// Elementary symmetric polynomial `e_k(ys)`.
pub fn symmetric_poly(k: usize, ys: &[Expr]) -> Expr {
    if k == 0 {
        return Expr::one();
    }
    let terms = ys
        .iter()
        .combinations(k)
        .map(|combo| Expr::mul_all(combo.into_iter().cloned().collect()))
        .collect();
    Expr::add_all(terms)
}

/// Endless supply of fresh dummy symbols `prefix0, prefix1, ...`.
pub struct NumberedSymbols {
    prefix: String,
    domain: Domain,
    counter: usize,
}

impl NumberedSymbols {
    pub fn new(prefix: &str, domain: Domain) -> Self {
        NumberedSymbols {
            prefix: prefix.to_string(),
            domain,
            counter: 0,
        }
    }
}

impl Iterator for NumberedSymbols {
    type Item = Expr;

    fn next(&mut self) -> Option<Expr> {
        let name = format!("{}{}", self.prefix, self.counter);
        self.counter += 1;
        Some(Expr::dummy(&name, self.domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bi(n: i64) -> BigInt {
        BigInt::from(n)
    }

    fn rat(p: i64, q: i64) -> BigRational {
        BigRational::new(bi(p), bi(q))
    }

    #[test]
    fn test_igcdex() {
        let (x, y, g) = igcdex(&bi(2), &bi(3));
        assert_eq!((x.clone(), y.clone(), g.clone()), (bi(-1), bi(1), bi(1)));
        let (x, y, g) = igcdex(&bi(10), &bi(12));
        assert_eq!(g, bi(2));
        assert_eq!(x * bi(10) + y * bi(12), bi(2));
    }

    #[test]
    fn test_migcdex_combination() {
        let xs = vec![bi(15), bi(10), bi(6)];
        let (ys, g) = migcdex(&xs);
        assert_eq!(g, bi(1));
        let total = xs.iter().zip(ys.iter()).fold(bi(0), |acc, (a, b)| acc + a * b);
        assert_eq!(total, g);
    }

    #[test]
    fn test_factorint() {
        assert_eq!(factorint(&bi(360)), vec![(bi(2), 3), (bi(3), 2), (bi(5), 1)]);
        assert_eq!(factorint(&bi(17)), vec![(bi(17), 1)]);
        assert!(factorint(&bi(1)).is_empty());
    }

    #[test]
    fn test_ipartfrac_sums_back() {
        let r = rat(1, 15);
        let parts = ipartfrac(&r, Some(&[bi(3), bi(5)]));
        assert_eq!(parts.len(), 2);
        let total = parts.iter().fold(BigRational::zero(), |acc, x| acc + x);
        assert_eq!(total, r);
        assert!(parts.iter().all(|p| *p.denom() == bi(3) || *p.denom() == bi(5)));

        let r = rat(4, 63);
        let parts = ipartfrac(&r, None);
        let total = parts.iter().fold(BigRational::zero(), |acc, x| acc + x);
        assert_eq!(total, r);
    }

    #[test]
    fn test_rat_mod() {
        assert_eq!(rat_mod(&rat(-11, 7), &rat(2, 1)), rat(3, 7));
        assert_eq!(rat_mod(&rat(5, 2), &rat(1, 2)), rat(0, 1));
        assert_eq!(rat_mod(&rat(2, 3), &rat(1, 2)), rat(1, 6));
    }

    #[test]
    fn test_number_sequences() {
        assert_eq!(bernoulli(1), rat(-1, 2));
        assert_eq!(bernoulli(2), rat(1, 6));
        assert_eq!(bernoulli(4), rat(-1, 30));
        assert_eq!(bernoulli(3), rat(0, 1));
        assert_eq!(euler(2), bi(-1));
        assert_eq!(euler(4), bi(5));
        assert_eq!(euler(6), bi(-61));
        assert_eq!(factorial(5), bi(120));
        assert_eq!(binomial(5, 2), bi(10));
        assert_eq!(rising_factorial(&rat(1, 2), 2), rat(3, 4));
    }

    #[test]
    fn test_chebyshev() {
        assert_eq!(chebyshevt_coeffs(3), vec![bi(0), bi(-3), bi(0), bi(4)]);
        assert_eq!(chebyshevu_coeffs(2), vec![bi(-1), bi(0), bi(4)]);
        assert_eq!(chebyshevu_coeffs(-1), vec![bi(0)]);
        assert_eq!(chebyshevu_coeffs(-3), vec![bi(0), bi(-2)]);
        let x = Expr::symbol("x");
        let t2 = chebyshevt(2, &x);
        assert_eq!(t2, Expr::integer(2) * x.clone().pow(Expr::integer(2)) - Expr::one());
        assert_eq!(chebyshevt(2, &Expr::half()), Expr::rational(-1, 2));
    }

    #[test]
    fn test_symmetric_poly() {
        let ys = Expr::Symbols("a, b, c");
        let e2 = symmetric_poly(2, &ys);
        let (a, b, c) = (ys[0].clone(), ys[1].clone(), ys[2].clone());
        assert_eq!(e2, a.clone() * b.clone() + a.clone() * c.clone() + b.clone() * c.clone());
        assert_eq!(symmetric_poly(0, &ys), Expr::one());
        assert_eq!(symmetric_poly(3, &ys), a * b * c);
    }

    #[test]
    fn test_numbered_symbols_are_distinct() {
        let mut symbols = NumberedSymbols::new("z", Domain::Complex);
        let z0 = symbols.next();
        let z1 = symbols.next();
        assert_ne!(z0, z1);
        assert_ne!(z0, Some(Expr::symbol("z0")));
    }
}
