//! Single-variable polynomials over the reals and their formal derivative

use std::fmt::{self, Display};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::common::interface::get_poly;
use crate::common::veprintln;
use crate::settings::Settings;

use super::{Action, Testcase};

/// A type alias for the coefficients.
///
/// Coefficients are plain JSON numbers, so they are stored as [f64].
pub type Coefficient = f64;

/// A polynomial in one variable.
///
/// The coefficient of the n-th degree term is the n-th element. The empty polynomial is the zero
/// polynomial, and so is any polynomial made only of zeros.
///
/// Equality is [poly_equality]: same length and exactly the same coefficients, or both the zero
/// function. Note that this means `[1, 0] != [1]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polynomial {
    coefficients: Vec<Coefficient>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<Coefficient>) -> Self {
        Self { coefficients }
    }

    /// The empty polynomial
    pub fn zero() -> Self {
        Self::default()
    }

    #[inline]
    pub fn coefficients(&self) -> &[Coefficient] {
        &self.coefficients
    }

    /// Number of stored coefficients, trailing zeros included.
    #[inline]
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Degree of the highest non-zero term, [None] for the zero function.
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.iter().rposition(|c| *c != 0.0)
    }

    /// Formal derivative, see [differentiate].
    pub fn derivative(&self) -> Self {
        differentiate(self)
    }

    /// See [is_zero_function].
    pub fn is_zero(&self) -> bool {
        is_zero_function(self)
    }

    /// False if any coefficient is infinite or NaN, those have no JSON representation.
    pub fn is_finite(&self) -> bool {
        self.coefficients.iter().all(|c| c.is_finite())
    }
}

/// Differentiate `f`, failing if a coefficient of the result overflows [Coefficient].
pub(crate) fn finite_derivative(f: &Polynomial) -> Result<Polynomial> {
    let d = differentiate(f);
    if !d.is_finite() {
        return Err(anyhow!("derivative of {f} overflows: {d}"));
    }
    Ok(d)
}

/// Compute the formal derivative of `poly`.
///
/// Every coefficient is multiplied with its degree, then the constant term is dropped. The result
/// is always exactly one coefficient shorter than the input, or empty if the input had at most one
/// coefficient.
pub fn differentiate(poly: &Polynomial) -> Polynomial {
    poly.coefficients
        .iter()
        .enumerate()
        .map(|(degree, coefficient)| coefficient * degree as Coefficient)
        .skip(1) // shift degrees down
        .collect()
}

/// True if the polynomial has no terms or all coefficients are exactly 0.
pub fn is_zero_function(poly: &Polynomial) -> bool {
    poly.coefficients.iter().all(|c| *c == 0.0)
}

/// Compare two polynomials.
///
/// Polynomials of the same length are equal if every coefficient matches exactly, there is no
/// tolerance for floating point error. Polynomials of different length are only equal if both are
/// the zero function, so trailing zeros of non-zero polynomials are significant.
pub fn poly_equality(a: &Polynomial, b: &Polynomial) -> bool {
    if a.len() != b.len() {
        return is_zero_function(a) && is_zero_function(b);
    }
    a.coefficients
        .iter()
        .zip(b.coefficients.iter())
        .all(|(ca, cb)| ca == cb)
}

impl PartialEq for Polynomial {
    fn eq(&self, other: &Self) -> bool {
        poly_equality(self, other)
    }
}

/// Human representation, highest degree first, e.g. `6x^6 + 4x^4 + 3x^3 + 1`.
impl Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut terms = self
            .coefficients
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, c)| **c != 0.0)
            .peekable();
        if terms.peek().is_none() {
            return write!(f, "0");
        }
        for (i, (degree, coefficient)) in terms.enumerate() {
            let negative = coefficient.is_sign_negative();
            match (i, negative) {
                (0, true) => write!(f, "-")?,
                (0, false) => (),
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }
            let magnitude = coefficient.abs();
            match (degree, magnitude == 1.0) {
                (0, _) => write!(f, "{magnitude}")?,
                (1, true) => write!(f, "x")?,
                (1, false) => write!(f, "{magnitude}x")?,
                (_, true) => write!(f, "x^{degree}")?,
                (_, false) => write!(f, "{magnitude}x^{degree}")?,
            }
        }
        Ok(())
    }
}

/** From *********************************************************************/

impl FromIterator<Coefficient> for Polynomial {
    fn from_iter<I: IntoIterator<Item = Coefficient>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Coefficient>> for Polynomial {
    fn from(value: Vec<Coefficient>) -> Self {
        Self::new(value)
    }
}

impl<const N: usize> From<[Coefficient; N]> for Polynomial {
    fn from(value: [Coefficient; N]) -> Self {
        Self::new(value.to_vec())
    }
}

/** Interface *****************************************************************/

pub fn run_testcase(testcase: &Testcase, settings: Settings) -> Result<serde_json::Value> {
    Ok(match testcase.action {
        Action::Differentiate => {
            let f: Polynomial = get_poly(&testcase.arguments, "f")?;
            let d = finite_derivative(&f)?;
            if settings.verbose {
                veprintln("f", format_args!("{f}"));
                veprintln("f'", format_args!("{d}"));
            }
            json!({ "derivative": d })
        }
        Action::PolyEquals => {
            let a: Polynomial = get_poly(&testcase.arguments, "a")?;
            let b: Polynomial = get_poly(&testcase.arguments, "b")?;
            json!({ "equal": poly_equality(&a, &b) })
        }
        Action::IsZero => {
            let f: Polynomial = get_poly(&testcase.arguments, "f")?;
            json!({ "zero": f.is_zero() })
        }
        Action::Display => {
            let f: Polynomial = get_poly(&testcase.arguments, "f")?;
            json!({ "algebra": f.to_string() })
        }
        Action::Degree => {
            let f: Polynomial = get_poly(&testcase.arguments, "f")?;
            json!({ "degree": f.degree() })
        }
        _ => unreachable!(),
    })
}
