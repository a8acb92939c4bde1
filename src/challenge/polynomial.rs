//! Add, subtract and multiply polynomials with real coefficients

use std::collections::hash_map::DefaultHasher;
use std::fmt::{Display, Write};
use std::hash::{Hash, Hasher};
use std::ops::Index;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::interface::{get_any, get_maybe, get_maybe_polynomial, get_polynomial};
use crate::error::{Error, Result};
use crate::settings::Settings;

use super::{Action, Testcase};

/// The smallest positive subnormal [f64], what .NET calls `double.Epsilon`.
pub const DOUBLE_EPSILON: f64 = 5e-324;

/// A dense polynomial with [f64] coefficients.
///
/// The coefficient at index `i` belongs to `x^i`. There is always at least one coefficient, and a
/// polynomial never changes after construction: all arithmetic produces a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Take ownership of `coefficients` and make a polynomial out of them.
    ///
    /// Fails with [Error::EmptyCoefficients] if there are none.
    pub fn new(coefficients: Vec<f64>) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(Error::EmptyCoefficients);
        }
        Ok(Self { coefficients })
    }

    /// Number of coefficients.
    ///
    /// Note that this is not the mathematical degree: `[5]` has a degree of 1 here.
    #[inline]
    pub fn degree(&self) -> usize {
        self.coefficients.len()
    }

    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn into_coefficients(self) -> Vec<f64> {
        self.coefficients
    }

    /// Get the coefficient of `x^index`.
    ///
    /// Fails with [Error::IndexOutOfRange] for negative indices and indices from [Self::degree]
    /// on.
    pub fn coefficient(&self, index: i64) -> Result<f64> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.coefficients.get(i))
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                degree: self.degree(),
            })
    }

    /// Evaluate the polynomial at `x` with Horner's method.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * x + c)
    }

    /// Coefficient-wise sum. Missing coefficients of the shorter polynomial count as 0.
    pub fn add(&self, rhs: &Self) -> Self {
        self.zip_longest(rhs, |a, b| a + b)
    }

    /// Coefficient-wise difference. Missing coefficients of the shorter polynomial count as 0.
    pub fn subtract(&self, rhs: &Self) -> Self {
        self.zip_longest(rhs, |a, b| a - b)
    }

    /// Product of two polynomials, with `self.degree() + rhs.degree() - 1` coefficients.
    pub fn multiply(&self, rhs: &Self) -> Self {
        let mut coefficients = vec![0.0; self.degree() + rhs.degree() - 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in rhs.coefficients.iter().enumerate() {
                coefficients[i + j] += a * b;
            }
        }
        Self { coefficients }
    }

    fn zip_longest(&self, rhs: &Self, op: impl Fn(f64, f64) -> f64) -> Self {
        let len = self.degree().max(rhs.degree());
        let coefficients = (0..len)
            .map(|i| {
                let a = self.coefficients.get(i).copied().unwrap_or(0.0);
                let b = rhs.coefficients.get(i).copied().unwrap_or(0.0);
                op(a, b)
            })
            .collect();
        Self { coefficients }
    }

    /// Same length and every pair of coefficients closer than `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.degree() == other.degree()
            && self
                .coefficients
                .iter()
                .zip(other.coefficients.iter())
                .all(|(a, b)| (a - b).abs() < tolerance)
    }

    /// One-sided equality check, kept for compatibility with existing results.
    ///
    /// Two polynomials of the same length are unequal only if some `self[i] - other[i]` is at
    /// least [DOUBLE_EPSILON]. This is one-sided: `[1, 2, 3]` is "equal" to `[3, 2, 3]`, but not
    /// the other way around. Use `==` or [Self::approx_eq] for a real comparison.
    pub fn legacy_equals(&self, other: &Self) -> bool {
        self.degree() == other.degree()
            && !self
                .coefficients
                .iter()
                .zip(other.coefficients.iter())
                .any(|(a, b)| a - b >= DOUBLE_EPSILON)
    }

    fn hash_value(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

/// Compatibility `==` where either side may be absent.
///
/// Absent operands are never equal to anything, not even to another absent operand.
pub fn operator_eq(a: Option<&Polynomial>, b: Option<&Polynomial>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => std::ptr::eq(a, b) || a.legacy_equals(b),
        _ => false,
    }
}

/// Compatibility `!=` where either side may be absent.
///
/// Like [operator_eq], this is false as soon as one side is absent, so it is not the complement
/// of [operator_eq] in that case.
pub fn operator_ne(a: Option<&Polynomial>, b: Option<&Polynomial>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => !a.legacy_equals(b),
        _ => false,
    }
}

impl PartialEq for Polynomial {
    fn eq(&self, other: &Self) -> bool {
        self.coefficients == other.coefficients
    }
}

/// Hashes the rendered form, see [Display].
impl Hash for Polynomial {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state)
    }
}

/// Renders as `c0 + c1*x^1 + c2*x^2 ...`
///
/// The constant term is always written, other terms only if their coefficient is not zero.
/// Negative coefficients bring their own sign instead of a `+`.
impl Display for Polynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = String::new();
        for (i, c) in self.coefficients.iter().copied().enumerate() {
            if i == 0 {
                // -0.0 == 0.0, both must render (and hash) the same
                let c = if c == 0.0 { 0.0 } else { c };
                write!(buf, "{c}")?;
            } else if c > 0.0 {
                write!(buf, " + {c}*x^{i}")?;
            } else if c == 0.0 {
                continue;
            } else {
                write!(buf, " {c}*x^{i}")?;
            }
        }
        f.pad(buf.trim())
    }
}

/// # Panics
///
/// Panics if `index` is not below [Polynomial::degree]. Use [Polynomial::coefficient] for a
/// checked variant.
impl Index<usize> for Polynomial {
    type Output = f64;
    fn index(&self, index: usize) -> &Self::Output {
        &self.coefficients[index]
    }
}

/** Calculation stuff ********************************************************/

impl std::ops::Add for Polynomial {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Polynomial::add(&self, &rhs)
    }
}

impl std::ops::Add for &Polynomial {
    type Output = Polynomial;
    fn add(self, rhs: Self) -> Self::Output {
        Polynomial::add(self, rhs)
    }
}

impl std::ops::Sub for Polynomial {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        self.subtract(&rhs)
    }
}

impl std::ops::Sub for &Polynomial {
    type Output = Polynomial;
    fn sub(self, rhs: Self) -> Self::Output {
        self.subtract(rhs)
    }
}

impl std::ops::Mul for Polynomial {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul for &Polynomial {
    type Output = Polynomial;
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(rhs)
    }
}

/** From *********************************************************************/

impl TryFrom<Vec<f64>> for Polynomial {
    type Error = Error;
    fn try_from(value: Vec<f64>) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&[f64]> for Polynomial {
    type Error = Error;
    fn try_from(value: &[f64]) -> Result<Self> {
        Self::new(value.to_vec())
    }
}

impl<const N: usize> TryFrom<[f64; N]> for Polynomial {
    type Error = Error;
    fn try_from(value: [f64; N]) -> Result<Self> {
        Self::new(value.to_vec())
    }
}

impl From<Polynomial> for Vec<f64> {
    fn from(value: Polynomial) -> Self {
        value.coefficients
    }
}

/** Interface *****************************************************************/

pub fn run_testcase(
    testcase: &Testcase,
    _settings: Settings,
) -> anyhow::Result<serde_json::Value> {
    let args = &testcase.arguments;
    Ok(match testcase.action {
        Action::PolyDisplay => {
            let p = get_polynomial(args, "coefficients")?;
            serde_json::json!({ "display": p.to_string(), "degree": p.degree() })
        }
        Action::PolyHash => {
            let p = get_polynomial(args, "coefficients")?;
            serde_json::json!({ "hash": p.hash_value() })
        }
        Action::PolyCoefficient => {
            let p = get_polynomial(args, "coefficients")?;
            let index: i64 = get_any(args, "index")?;
            serde_json::json!({ "coefficient": p.coefficient(index)? })
        }
        Action::PolyAdd | Action::PolySub | Action::PolyMul => {
            let a = get_polynomial(args, "a")?;
            let b = get_polynomial(args, "b")?;
            let res = match testcase.action {
                Action::PolyAdd => &a + &b,
                Action::PolySub => &a - &b,
                _ => &a * &b,
            };
            debug!("{a} ({:?}) {b} = {res}", testcase.action);
            serde_json::json!({ "coefficients": res })
        }
        Action::PolyEquals => {
            let a = get_polynomial(args, "a")?;
            let b = get_polynomial(args, "b")?;
            let tolerance: Option<f64> = get_maybe(args, "tolerance")?;
            serde_json::json!({
                "equal": a == b,
                "legacy_equal": a.legacy_equals(&b),
                "approx_equal": tolerance.map(|t| a.approx_eq(&b, t)),
            })
        }
        Action::PolyCompare => {
            let a = get_maybe_polynomial(args, "a")?;
            let b = get_maybe_polynomial(args, "b")?;
            serde_json::json!({
                "eq": operator_eq(a.as_ref(), b.as_ref()),
                "ne": operator_ne(a.as_ref(), b.as_ref()),
            })
        }
        Action::PolyEvaluate => {
            let p = get_polynomial(args, "coefficients")?;
            let x: f64 = get_any(args, "x")?;
            serde_json::json!({ "value": p.evaluate(x) })
        }
        _ => unreachable!(),
    })
}
