//! Limited-use pool (charges, slots, per-rest abilities).

use serde::{Deserialize, Serialize};

/// A value/max pair for anything with limited uses.
///
/// Values are kept as floats because upstream derivation can produce
/// fractional remainders (e.g. half-charges from formulas); display
/// code rounds at the last moment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Uses {
    value: f64,
    max: f64,
}

impl Uses {
    /// Create a new uses pool.
    pub fn new(value: f64, max: f64) -> Self {
        Self { value, max }
    }

    /// Remaining uses.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Maximum uses.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Copy with the remaining value rounded to the nearest whole use.
    pub fn rounded(&self) -> Self {
        Self {
            value: self.value.round(),
            max: self.max,
        }
    }

    /// Whether the pool is large enough to need the condensed numeral style.
    pub fn needs_small_numerals(&self) -> bool {
        self.max > 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_keeps_max() {
        let uses = Uses::new(2.4, 5.0);
        let rounded = uses.rounded();
        assert_eq!(rounded.value(), 2.0);
        assert_eq!(rounded.max(), 5.0);
    }

    #[test]
    fn small_numerals_above_one_hundred() {
        assert!(!Uses::new(50.0, 100.0).needs_small_numerals());
        assert!(Uses::new(50.0, 101.0).needs_small_numerals());
    }
}
