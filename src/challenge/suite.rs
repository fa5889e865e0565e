//! The fixed self-test suite, and the `check_derivative` action which runs a single such case

use std::io::Write;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::common::veprintln;
use crate::settings::Settings;

use super::polynomial::{
    differentiate, finite_derivative, poly_equality, Coefficient, Polynomial,
};
use super::{Action, Testcase};

/// A polynomial together with the derivative it is expected to have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub desc: String,
    pub f: Polynomial,
    pub f_prime: Polynomial,
}

impl TestCase {
    pub fn new(desc: &str, f: Vec<Coefficient>, f_prime: Vec<Coefficient>) -> Self {
        Self {
            desc: desc.to_string(),
            f: f.into(),
            f_prime: f_prime.into(),
        }
    }
}

/// The cases checked when the program runs without arguments.
pub fn builtin_cases() -> Vec<TestCase> {
    vec![
        TestCase::new(
            "Basic polynomial",
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![2.0, 6.0, 12.0, 20.0],
        ),
        TestCase::new(
            "Explicit 0 polynomial",
            vec![0.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0],
        ),
        TestCase::new("Implicit 0 derivative", vec![1.0], vec![]),
        TestCase::new(
            "N-degree with < N terms",
            vec![1.0, 0.0, 0.0, 3.0, 4.0, 0.0, 6.0],
            vec![0.0, 0.0, 9.0, 16.0, 0.0, 36.0],
        ),
    ]
}

/// Does `t.f` differentiate to `t.f_prime`?
pub fn test(t: &TestCase) -> bool {
    poly_equality(&differentiate(&t.f), &t.f_prime)
}

/// Run `cases` through [report] for the self-test.
///
/// Returns the number of passed cases, or [None] if `out` could not be written to. A failed write
/// is only logged, the self-test has no failure outcome.
pub fn run_self_test<W: Write>(cases: &[TestCase], out: &mut W) -> Option<usize> {
    match report(cases, out) {
        Ok(passed) => Some(passed),
        Err(e) => {
            eprintln!("! could not write the test report: {e}");
            None
        }
    }
}

/// Write `Test case: <desc>` followed by `PASS` or `FAIL` for every case.
///
/// Returns how many cases passed.
pub fn report<W: Write>(cases: &[TestCase], out: &mut W) -> std::io::Result<usize> {
    let mut passed = 0;
    for t in cases {
        let ok = test(t);
        writeln!(out, "Test case: {}", t.desc)?;
        writeln!(out, "{}", if ok { "PASS" } else { "FAIL" })?;
        if ok {
            passed += 1;
        }
    }
    out.flush()?;
    Ok(passed)
}

pub fn run_testcase(testcase: &Testcase, settings: Settings) -> Result<serde_json::Value> {
    Ok(match testcase.action {
        Action::CheckDerivative => {
            let t: TestCase = serde_json::from_value(testcase.arguments.clone()).inspect_err(
                |e| eprintln!("! could not read the arguments as a derivative check: {e}"),
            )?;
            let derivative = finite_derivative(&t.f)?;
            let pass = poly_equality(&derivative, &t.f_prime);
            if settings.verbose {
                veprintln("case", format_args!("{}", t.desc));
                veprintln("f'", format_args!("{derivative}"));
                veprintln("expected", format_args!("{}", t.f_prime));
            }
            json!({ "pass": pass, "derivative": derivative })
        }
        _ => unreachable!(),
    })
}
