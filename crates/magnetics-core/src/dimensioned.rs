use serde::{Deserialize, Serialize};

/// A value with an optional statistical spread, as the Mas schema
/// represents manufacturing tolerances: a shape dimension is rarely a
/// single number, it is a nominal plus minimum/maximum bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionedValue {
    pub nominal: Option<f64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

impl DimensionedValue {
    pub fn fixed(value: f64) -> Self {
        DimensionedValue {
            nominal: Some(value),
            minimum: None,
            maximum: None,
        }
    }

    pub fn ranged(minimum: f64, maximum: f64) -> Self {
        DimensionedValue {
            nominal: Some((minimum + maximum) / 2.0),
            minimum: Some(minimum),
            maximum: Some(maximum),
        }
    }

    /// Resolve to a single working value: nominal if present, else the
    /// midpoint of minimum/maximum, else `NaN` (caller should treat a
    /// `DimensionedValue` with no populated field as invalid input).
    pub fn resolve(&self) -> f64 {
        if let Some(n) = self.nominal {
            return n;
        }
        match (self.minimum, self.maximum) {
            (Some(lo), Some(hi)) => (lo + hi) / 2.0,
            (Some(lo), None) => lo,
            (None, Some(hi)) => hi,
            (None, None) => f64::NAN,
        }
    }

    pub fn is_populated(&self) -> bool {
        self.nominal.is_some() || self.minimum.is_some() || self.maximum.is_some()
    }
}
