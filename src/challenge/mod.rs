//! Runs challenge definitions: many independent testcases, each naming an [Action] and its
//! arguments, answered in parallel.

use std::collections::HashMap;
use std::sync::mpsc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::json;
use threadpool::ThreadPool;
use uuid::Uuid;

use crate::common::veprintln;
use crate::settings::Settings;

pub mod polynomial;
pub mod suite;

/// All testcases of a challenge definition, identified by their [Uuid].
pub type ManyTestcases = HashMap<Uuid, Testcase>;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Formal derivative of `f`
    #[default]
    Differentiate,
    /// Compare `a` and `b`
    PolyEquals,
    /// Is `f` the zero function?
    IsZero,
    /// Algebraic representation of `f`
    Display,
    /// Degree of the highest non-zero term of `f`
    Degree,
    /// Differentiate `f` and compare with `f_prime`
    CheckDerivative,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Testcase {
    pub action: Action,
    pub arguments: serde_json::Value,
}

impl Default for Testcase {
    fn default() -> Self {
        Testcase {
            action: Action::default(),
            arguments: json!({"f": [1, 2, 3, 4, 5]}),
        }
    }
}

/// Solve a single [Testcase], dispatching to the module that implements its [Action].
pub fn run_testcase(testcase: &Testcase, settings: Settings) -> Result<serde_json::Value> {
    Ok(match testcase.action {
        Action::Differentiate
        | Action::PolyEquals
        | Action::IsZero
        | Action::Display
        | Action::Degree => polynomial::run_testcase(testcase, settings)?,
        Action::CheckDerivative => suite::run_testcase(testcase, settings)?,
    })
}

/// Solve every testcase in `raw_json["testcases"]`.
///
/// The testcases are distributed over a thread pool. Testcases that fail are reported on stderr
/// and left out of the responses, the others are still answered.
pub fn run_challenges(raw_json: &serde_json::Value, settings: Settings) -> Result<serde_json::Value> {
    let testcases: ManyTestcases = serde_json::from_value(raw_json["testcases"].clone())
        .inspect_err(|e| eprintln!("! could not parse the testcases: {e}"))?;
    let workers = settings.worker_count();
    if settings.verbose {
        veprintln("testcases", format_args!("{}", testcases.len()));
        veprintln("workers", format_args!("{workers}"));
    }

    let pool = ThreadPool::new(workers);
    let (tx, rx) = mpsc::channel();
    for (uuid, testcase) in testcases {
        let tx = tx.clone();
        pool.execute(move || {
            let result = run_testcase(&testcase, settings);
            if tx.send((uuid, testcase.action, result)).is_err() {
                eprintln!("! could not hand the result of {uuid} back to the main thread");
            }
        });
    }
    // the loop below ends once every worker has dropped its sender
    drop(tx);

    let mut responses = serde_json::Map::new();
    for (uuid, action, result) in rx {
        match result {
            Ok(answer) => {
                if settings.verbose {
                    veprintln("solved", format_args!("{uuid} ({action:?})"));
                }
                responses.insert(uuid.to_string(), answer);
            }
            Err(e) => eprintln!("! failed to solve testcase {uuid} ({action:?}): {e}"),
        }
    }

    Ok(json!({ "responses": responses }))
}

#[cfg(test)]
mod test {
    use super::*;

    const U1: &str = "b856d760-023d-4b00-bad2-15d2b6da22fe";
    const U2: &str = "254eaee7-05fd-4e0d-8292-9b658a852245";
    const U3: &str = "affbf4fc-dc95-4c01-8e9c-4b3ae2ba3d3a";

    fn settings() -> Settings {
        Settings {
            verbose: true,
            threads: Some(2),
        }
    }

    #[test]
    fn test_action_names() {
        let a: Action = serde_json::from_value(json!("check_derivative")).expect("bad action");
        assert_eq!(a, Action::CheckDerivative);
        assert_eq!(
            serde_json::to_value(Action::PolyEquals).expect("could not serialize"),
            json!("poly_equals")
        );
    }

    #[test]
    fn test_run_challenges_mixed() {
        let definition = json!({
            "testcases": {
                U1: {"action": "differentiate", "arguments": {"f": [1, 2, 3, 4, 5]}},
                U2: {"action": "poly_equals", "arguments": {"a": [1, 0], "b": [1]}},
                U3: {"action": "check_derivative", "arguments": {"f": [1], "f_prime": []}},
            }
        });
        let res = run_challenges(&definition, settings()).expect("could not run challenges");
        assert_eq!(
            res,
            json!({
                "responses": {
                    U1: {"derivative": [2.0, 6.0, 12.0, 20.0]},
                    U2: {"equal": false},
                    U3: {"pass": true, "derivative": []},
                }
            })
        );
    }

    #[test]
    fn test_run_challenges_skips_broken_testcase() {
        let definition = json!({
            "testcases": {
                U1: {"action": "is_zero", "arguments": {"f": [0, 0]}},
                U2: {"action": "differentiate", "arguments": {"f": "not a polynomial"}},
                U3: {"action": "differentiate", "arguments": {"f": [0, 0, 1e308]}},
            }
        });
        let res = run_challenges(&definition, settings()).expect("could not run challenges");
        assert_eq!(res, json!({"responses": {U1: {"zero": true}}}));
    }

    #[test]
    fn test_run_challenges_empty() {
        let res = run_challenges(&json!({"testcases": {}}), Settings::default())
            .expect("could not run challenges");
        assert_eq!(res, json!({"responses": {}}));
    }

    #[test]
    fn test_run_challenges_bad_definition() {
        assert!(run_challenges(&json!({"cases": {}}), Settings::default()).is_err());
        let unknown_action = json!({
            "testcases": {U1: {"action": "integrate", "arguments": {"f": [1]}}}
        });
        assert!(run_challenges(&unknown_action, Settings::default()).is_err());
    }

    #[test]
    fn test_default_testcase_roundtrip() {
        let t = Testcase::default();
        let v = serde_json::to_value(&t).expect("could not serialize");
        assert_eq!(v["action"], json!("differentiate"));
        let back: Testcase = serde_json::from_value(v).expect("could not deserialize");
        assert_eq!(back, t);
    }
}
