//! Flow feature vectors: fixed-schema summaries handed to the output writer.

mod pipeline;
pub mod schema;

pub use pipeline::{FeatureExtractor, RunSummary};
pub use schema::{Attribute, AttributeKind, ATTRIBUTES, FEATURE_DIM};

use serde::Serialize;
use std::fmt;

/// One cell of a feature vector.
///
/// Rates are single precision and fractions double precision. Both render
/// with a decimal point (`2.0`, `0.5`, `NaN`), switching to `5.0E-4` /
/// `1.0E7` notation below 10^-3 and from 10^7 up, so rows stay comparable
/// with datasets produced by earlier tooling.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Text(String),
    Integer(i64),
    Rate(f32),
    Ratio(f64),
}

impl FeatureValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Text(_) => None,
            Self::Integer(v) => Some(*v as f64),
            Self::Rate(v) => Some(f64::from(*v)),
            Self::Ratio(v) => Some(*v),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(v) => write!(f, "{}", v),
            Self::Rate(v) => write_decimal(f, *v, f64::from(*v)),
            Self::Ratio(v) => write_decimal(f, *v, *v),
        }
    }
}

/// `value` is printed at its own precision; `wide` is the same number as f64.
fn write_decimal<T>(f: &mut fmt::Formatter<'_>, value: T, wide: f64) -> fmt::Result
where
    T: fmt::Debug + fmt::LowerExp,
{
    if wide.is_nan() {
        return f.write_str("NaN");
    }
    if wide.is_infinite() {
        return f.write_str(if wide > 0.0 { "Infinity" } else { "-Infinity" });
    }
    let magnitude = wide.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return write!(f, "{:?}", value);
    }
    // Shortest digits from `{:e}` ("5e-4", "1.25e7"), then "5.0E-4", "1.25E7".
    let sci = format!("{:e}", value);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    if mantissa.contains('.') {
        write!(f, "{}E{}", mantissa, exponent)
    } else {
        write!(f, "{}.0E{}", mantissa, exponent)
    }
}

/// Fixed-size feature vector for one flow, laid out as [`ATTRIBUTES`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector {
    pub values: Vec<FeatureValue>,
}

impl FeatureVector {
    pub fn as_slice(&self) -> &[FeatureValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of the named column, e.g. `get("pkgsizeup-avg")`.
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        schema::position(name).and_then(|i| self.values.get(i))
    }

    pub fn to_row(&self, separator: &str) -> String {
        self.values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Column name -> value; NaN fractions serialize as `null`.
    pub fn to_json_object(&self) -> serde_json::Map<String, serde_json::Value> {
        ATTRIBUTES
            .iter()
            .zip(&self.values)
            .map(|(attr, value)| {
                let json = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
                (attr.name.to_string(), json)
            })
            .collect()
    }
}
