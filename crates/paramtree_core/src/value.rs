//! Typed parameter values.
//!
//! A leaf in the parameter tree holds exactly one [`ParamValue`]. Numeric
//! values may carry an inclusive range, string values an enumeration of
//! accepted strings. For list values the restriction applies to every
//! element.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A value with optional inclusive lower and upper limits.
///
/// `V` is the stored value, `L` the limit type. For scalars both are the
/// same, for lists `V` is `Vec<L>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranged<V, L = V> {
    /// Current value
    pub value: V,
    /// Inclusive lower limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_limit: Option<L>,
    /// Inclusive upper limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_limit: Option<L>,
}

impl<V, L> Ranged<V, L> {
    /// Create an unrestricted value
    #[must_use]
    pub fn new(value: V) -> Self {
        Self {
            value,
            min_limit: None,
            max_limit: None,
        }
    }

    /// Set the lower limit
    #[must_use]
    pub fn with_min(mut self, min: L) -> Self {
        self.min_limit = Some(min);
        self
    }

    /// Set the upper limit
    #[must_use]
    pub fn with_max(mut self, max: L) -> Self {
        self.max_limit = Some(max);
        self
    }

    /// Whether either limit is set
    #[must_use]
    pub fn is_restricted(&self) -> bool {
        self.min_limit.is_some() || self.max_limit.is_some()
    }
}

/// A string value with an optional set of accepted strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice<V> {
    /// Current value
    pub value: V,
    /// Accepted strings; `None` or empty means unrestricted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_values: Option<Vec<String>>,
}

impl<V> Choice<V> {
    /// Create an unrestricted value
    #[must_use]
    pub fn new(value: V) -> Self {
        Self {
            value,
            valid_values: None,
        }
    }

    /// Restrict the value to the given strings
    #[must_use]
    pub fn with_valid_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// The accepted strings, empty when unrestricted
    #[must_use]
    pub fn valid(&self) -> &[String] {
        self.valid_values.as_deref().unwrap_or(&[])
    }
}

/// The closed set of leaf value kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamValue {
    /// Plain boolean flag
    Bool(bool),
    /// 64-bit integer
    Int(Ranged<i64>),
    /// Double precision float
    Double(Ranged<f64>),
    /// String
    Str(Choice<String>),
    /// List of integers
    IntList(Ranged<Vec<i64>, i64>),
    /// List of doubles
    DoubleList(Ranged<Vec<f64>, f64>),
    /// List of strings
    StringList(Choice<Vec<String>>),
}

impl ParamValue {
    /// Boolean value
    #[must_use]
    pub fn bool(value: bool) -> Self {
        Self::Bool(value)
    }

    /// Unrestricted integer
    #[must_use]
    pub fn int(value: i64) -> Self {
        Self::Int(Ranged::new(value))
    }

    /// Integer restricted to `[min, max]`
    #[must_use]
    pub fn int_in(value: i64, min: i64, max: i64) -> Self {
        Self::Int(Ranged::new(value).with_min(min).with_max(max))
    }

    /// Unrestricted double
    #[must_use]
    pub fn double(value: f64) -> Self {
        Self::Double(Ranged::new(value))
    }

    /// Unrestricted string
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Str(Choice::new(value.into()))
    }

    /// String restricted to `valid`
    #[must_use]
    pub fn choice<I, S>(value: impl Into<String>, valid: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Str(Choice::new(value.into()).with_valid_values(valid))
    }

    /// Unrestricted integer list
    #[must_use]
    pub fn int_list(values: Vec<i64>) -> Self {
        Self::IntList(Ranged::new(values))
    }

    /// Unrestricted double list
    #[must_use]
    pub fn double_list(values: Vec<f64>) -> Self {
        Self::DoubleList(Ranged::new(values))
    }

    /// Unrestricted string list
    #[must_use]
    pub fn string_list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::StringList(Choice::new(values.into_iter().map(Into::into).collect()))
    }

    /// Short kind name, used in diagnostics
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Double(_) => "double",
            Self::Str(_) => "string",
            Self::IntList(_) => "int list",
            Self::DoubleList(_) => "double list",
            Self::StringList(_) => "string list",
        }
    }

    /// Whether this is one of the list kinds
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            Self::IntList(_) | Self::DoubleList(_) | Self::StringList(_)
        )
    }

    /// Check the value against its own restriction.
    ///
    /// Nothing in this workspace rejects a document on the basis of this
    /// check; the exporters only log its failures.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming `field` when the limits are
    /// inverted, an element lies outside them, or a string is not one of a
    /// non-empty set of valid values.
    pub fn validate(&self, field: &str) -> CoreResult<()> {
        match self {
            Self::Bool(_) => Ok(()),
            Self::Int(r) => check_range(field, std::slice::from_ref(&r.value), r),
            Self::Double(r) => check_range(field, std::slice::from_ref(&r.value), r),
            Self::Str(c) => check_choice(field, std::slice::from_ref(&c.value), c.valid()),
            Self::IntList(r) => check_range(field, &r.value, r),
            Self::DoubleList(r) => check_range(field, &r.value, r),
            Self::StringList(c) => check_choice(field, &c.value, c.valid()),
        }
    }
}

fn check_range<V, T>(field: &str, values: &[T], range: &Ranged<V, T>) -> CoreResult<()>
where
    T: PartialOrd + Display,
{
    let invalid = |reason: String| CoreError::Validation {
        field: field.to_string(),
        reason,
    };

    if let (Some(min), Some(max)) = (&range.min_limit, &range.max_limit) {
        if min > max {
            return Err(invalid(format!("min {} greater than max {}", min, max)));
        }
    }
    for v in values {
        if let Some(min) = &range.min_limit {
            if v < min {
                return Err(invalid(format!("{} below min {}", v, min)));
            }
        }
        if let Some(max) = &range.max_limit {
            if v > max {
                return Err(invalid(format!("{} above max {}", v, max)));
            }
        }
    }
    Ok(())
}

fn check_choice(field: &str, values: &[String], valid: &[String]) -> CoreResult<()> {
    if valid.is_empty() {
        return Ok(());
    }
    match values.iter().find(|v| !valid.contains(v)) {
        Some(v) => Err(CoreError::Validation {
            field: field.to_string(),
            reason: format!("'{}' not in [{}]", v, valid.join(",")),
        }),
        None => Ok(()),
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::double(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::string(value)
    }
}

impl From<Ranged<i64>> for ParamValue {
    fn from(value: Ranged<i64>) -> Self {
        Self::Int(value)
    }
}

impl From<Ranged<f64>> for ParamValue {
    fn from(value: Ranged<f64>) -> Self {
        Self::Double(value)
    }
}

impl From<Choice<String>> for ParamValue {
    fn from(value: Choice<String>) -> Self {
        Self::Str(value)
    }
}

impl From<Ranged<Vec<i64>, i64>> for ParamValue {
    fn from(value: Ranged<Vec<i64>, i64>) -> Self {
        Self::IntList(value)
    }
}

impl From<Ranged<Vec<f64>, f64>> for ParamValue {
    fn from(value: Ranged<Vec<f64>, f64>) -> Self {
        Self::DoubleList(value)
    }
}

impl From<Choice<Vec<String>>> for ParamValue {
    fn from(value: Choice<Vec<String>>) -> Self {
        Self::StringList(value)
    }
}
