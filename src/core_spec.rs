//! Worker-count specification: absolute counts and `n`-relative formulas.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How many parallel workers an operation should use.
///
/// Absolute form: a positive number (`1`, `8`, also `8.8`, truncated).
/// Relative form: a formula against the number of logical CPUs `n`, with
/// simple subtraction and division only (`n`, `n-1`, `n/2`). Relative
/// results below 1 are raised to 1.
///
/// The serde representation is untagged, so `workers = 8` and
/// `workers = "n/2"` both work inside an application config file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoreSpec {
    /// Fixed worker count.
    Count(i64),
    /// Spec to be parsed at resolve time: `"n"`, `"n-1"`, `"n/2"`, or a
    /// numeric string.
    Expr(String),
}

impl Default for CoreSpec {
    fn default() -> Self {
        CoreSpec::Expr("n".to_string())
    }
}

impl fmt::Display for CoreSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreSpec::Count(c) => write!(f, "{}", c),
            CoreSpec::Expr(s) => f.write_str(s),
        }
    }
}

impl From<usize> for CoreSpec {
    fn from(v: usize) -> Self {
        CoreSpec::Count(v as i64)
    }
}

impl From<i32> for CoreSpec {
    fn from(v: i32) -> Self {
        CoreSpec::Count(v as i64)
    }
}

impl From<i64> for CoreSpec {
    fn from(v: i64) -> Self {
        CoreSpec::Count(v)
    }
}

impl From<f64> for CoreSpec {
    fn from(v: f64) -> Self {
        // Truncate toward zero; non-positive results fail at resolve time.
        CoreSpec::Count(v as i64)
    }
}

impl From<&str> for CoreSpec {
    fn from(v: &str) -> Self {
        CoreSpec::Expr(v.to_string())
    }
}

impl From<String> for CoreSpec {
    fn from(v: String) -> Self {
        CoreSpec::Expr(v)
    }
}

impl FromStr for CoreSpec {
    type Err = std::convert::Infallible;

    /// Never fails; validation happens in [`CoreSpec::resolve`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CoreSpec::Expr(s.to_string()))
    }
}

/// Number of logical CPUs, used as the baseline `n` for relative specs.
fn logical_cpus() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

impl CoreSpec {
    /// Resolve against the machine's logical CPU count.
    pub fn resolve(&self) -> Result<usize, Error> {
        self.resolve_with(logical_cpus)
    }

    /// Resolve against an explicit baseline provider.
    ///
    /// The provider is `FnOnce`: it is consulted at most once per call, and
    /// only for specs that actually reference `n`. A bare `"n"` returns the
    /// baseline verbatim (unclamped); the formula branches clamp their
    /// result up to 1.
    pub fn resolve_with<F>(&self, baseline: F) -> Result<usize, Error>
    where
        F: FnOnce() -> usize,
    {
        let expr = match self {
            CoreSpec::Count(c) => return absolute(*c, &c.to_string()),
            CoreSpec::Expr(s) => s.as_str(),
        };

        if expr.is_empty() {
            return Err(Error::InvalidCoreSpec { spec: expr.to_string() });
        }

        if expr.starts_with('n') {
            if expr == "n" {
                return Ok(baseline());
            }

            let operator = expr.as_bytes()[1];
            if expr.len() < 3 || !matches!(operator, b'-' | b'/') {
                return Err(Error::InvalidRelativeCoreSpec { spec: expr.to_string() });
            }

            // Operand must be a decimal integer literal; `n-n` and `n-` are
            // rejected here.
            let operand: i64 = expr[2..]
                .parse()
                .map_err(|_| Error::InvalidRelativeCoreSpec { spec: expr.to_string() })?;

            let n = baseline() as i64;
            let resolved = match operator {
                b'-' => n.saturating_sub(operand),
                b'/' => {
                    if operand == 0 {
                        return Err(Error::InvalidRelativeCoreSpec { spec: expr.to_string() });
                    }
                    n / operand
                }
                _ => unreachable!(),
            };
            return Ok(resolved.max(1) as usize);
        }

        // Absolute numeric string, truncated toward zero (`"8.8"` -> 8).
        let value: f64 = expr
            .parse()
            .map_err(|_| Error::InvalidCoreSpec { spec: expr.to_string() })?;
        if !value.is_finite() {
            return Err(Error::InvalidCoreSpec { spec: expr.to_string() });
        }
        absolute(value as i64, expr)
    }
}

fn absolute(count: i64, spec: &str) -> Result<usize, Error> {
    if count <= 0 {
        return Err(Error::InvalidCoreSpec { spec: spec.to_string() });
    }
    Ok(count as usize)
}
