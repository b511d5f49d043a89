#![allow(non_snake_case)]
use RustedTrig::Utils::logger::init_logger;
use RustedTrig::global::{TrigConfig, config, load_config};
use RustedTrig::symbolic::symbolic_engine::{Domain, Expr, Function};
use RustedTrig::symbolic::symbolic_traits::RewriteTarget;
use RustedTrig::symbolic::trigonometric::trig_series::taylor_terms;
use RustedTrig::symbolic::trigonometric::*;
use log::{error, info};
use std::env;

fn main() {
    // optional path to a TOML file with the evaluation settings
    let settings = match env::args().nth(1) {
        Some(path) => load_config(&path).unwrap_or_else(|e| {
            eprintln!("could not load {}: {}, using defaults", path, e);
            TrigConfig::default()
        }),
        None => config(),
    };
    if let Err(e) = init_logger(settings.level_filter(), None) {
        eprintln!("logger: {}", e);
    }
    let pi = Expr::pi();
    let x = Expr::symbol("x");
    let example = 0;
    match example {
        0 => {
            // EXACT VALUES
            for q in [3, 4, 5, 6, 7, 8, 10, 12, 15, 17] {
                let angle = pi.clone() / Expr::integer(q);
                println!("cos(pi/{}) = {}", q, cos(angle.clone()));
                println!("sin(pi/{}) = {}", q, sin(angle.clone()));
                println!("tan(pi/{}) = {}", q, tan(angle));
            }
        }
        1 => {
            // PERIODICITY, PARITY AND SHIFTS
            println!("sin(x + 2*pi) = {}", sin(x.clone() + Expr::integer(2) * pi.clone()));
            println!("cos(x + pi/2) = {}", cos(x.clone() + pi.clone() / Expr::integer(2)));
            println!("tan(x + pi/2) = {}", tan(x.clone() + pi.clone() / Expr::integer(2)));
            println!("sin(-x) = {}", sin(-x.clone()));
            println!("cos(I*x) = {}", cos(Expr::I() * x.clone()));
        }
        2 => {
            // INVERSE FUNCTIONS
            let half = Expr::half();
            println!("asin(1/2) = {}", asin(half.clone()));
            println!("acos(-1/2) = {}", acos(-half));
            println!("atan(2 - sqrt(3)) = {}", atan(Expr::integer(2) - Expr::integer(3).sqrt()));
            println!("atan2(1, -1) = {}", atan2(Expr::one(), Expr::neg_one()));
            println!("atan2(-1, -1) = {}", atan2(Expr::neg_one(), Expr::neg_one()));
            println!("sin(acos(x)) = {}", sin(acos(x.clone())));
        }
        3 => {
            // EXPANSION AND REWRITES
            let y = Expr::symbol("y");
            println!("sin(x + y) = {}", sin(x.clone() + y.clone()).expand_trig());
            println!("tan(3*x) = {}", tan(Expr::integer(3) * x.clone()).expand_trig());
            println!("cot(x) as sin = {}", cot(x.clone()).rewrite(RewriteTarget::sin));
            println!("atan(x) as log = {}", atan(x.clone()).rewrite(RewriteTarget::log));
            println!("tan(pi/8) as sqrt = {}", tan(pi.clone() / Expr::integer(8)).expand());
            let r = Expr::symbol_with("r", Domain::Real);
            let (re, im) = sin(r.clone() + Expr::I() * r).as_real_imag();
            println!("re = {}, im = {}", re, im);
        }
        4 => {
            // DERIVATIVES AND SERIES
            match Expr::parse_expression("tan(x^2) * asin(x)") {
                Ok(f) => match f.diff("x") {
                    Ok(df) => info!("d/dx {} = {}", f, df),
                    Err(e) => error!("{}", e),
                },
                Err(e) => error!("{}", e),
            }
            for f in [Function::sin, Function::tan, Function::asin, Function::csc, Function::cot] {
                match taylor_terms(f, &x, 8) {
                    Some(terms) => {
                        let terms: Vec<String> = terms
                            .iter()
                            .filter(|t| !t.is_zero_literal())
                            .map(|t| format!("{}", t))
                            .collect();
                        println!("{}(x) ~ {}", f, terms.join(" + "));
                    }
                    None => println!("{}(x): no series formula", f),
                }
            }
        }
        _ => {
            println!("no such example");
        }
    }
}
