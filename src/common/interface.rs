//! Helps parse a few common datatypes from the JSON challenge definitions

use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;

use crate::challenge::polynomial::Polynomial;

/// Deserialize whatever is stored under `key` in the testcase arguments.
pub fn get_any<T: DeserializeOwned>(args: &serde_json::Value, key: &str) -> Result<T> {
    let v: T = serde_json::from_value(args[key].clone())
        .inspect_err(|e| eprintln!("! something went wrong when serializing {key}: {e}"))?;
    Ok(v)
}

/// Get the [Polynomial] stored under `key`.
///
/// Polynomials are plain JSON lists of numbers, where the n-th entry is the coefficient of the
/// degree n term.
pub fn get_poly(args: &serde_json::Value, key: &str) -> Result<Polynomial> {
    if !args[key].is_array() {
        return Err(anyhow!("{key} is not a list"));
    }
    get_any(args, key)
}
