//! Signed modifier display values.
//!
//! Modifiers arrive from collaborators either as plain numbers or as
//! pre-formatted strings with interior whitespace ("+ 3"). Both forms
//! normalize to an absolute value plus a sign glyph for rendering.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sign glyph for a displayed modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl Sign {
    /// The glyph used in rendered output.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
        }
    }

    /// Sign of a raw value. Zero displays as positive.
    pub fn of(value: i32) -> Self {
        if value < 0 {
            Self::Minus
        } else {
            Self::Plus
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// A modifier split into absolute value and sign for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedModifier {
    abs: u32,
    sign: Sign,
}

impl SignedModifier {
    /// Build from a raw signed value.
    pub fn from_value(value: i32) -> Self {
        Self {
            abs: value.unsigned_abs(),
            sign: Sign::of(value),
        }
    }

    /// Absolute value.
    pub fn abs(&self) -> u32 {
        self.abs
    }

    /// Sign glyph.
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// The raw signed value.
    pub fn value(&self) -> i32 {
        match self.sign {
            Sign::Plus => self.abs as i32,
            Sign::Minus => -(self.abs as i32),
        }
    }
}

impl fmt::Display for SignedModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sign, self.abs)
    }
}

/// A modifier as supplied by a collaborator: either already numeric or
/// a pre-formatted string that still needs parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawModifier {
    Number(i32),
    Text(String),
}

impl RawModifier {
    /// Normalize to a displayable modifier.
    ///
    /// Strings are parsed after stripping all whitespace; unparseable
    /// text yields `None` and the caller omits the modifier affordance.
    pub fn display(&self) -> Option<SignedModifier> {
        match self {
            Self::Number(n) => Some(SignedModifier::from_value(*n)),
            Self::Text(s) => {
                let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
                compact.parse::<i32>().ok().map(SignedModifier::from_value)
            }
        }
    }
}

impl From<i32> for RawModifier {
    fn from(value: i32) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawModifier {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_value_splits_sign_and_abs() {
        let modifier = SignedModifier::from_value(-4);
        assert_eq!(modifier.abs(), 4);
        assert_eq!(modifier.sign(), Sign::Minus);
        assert_eq!(modifier.value(), -4);
    }

    #[test]
    fn zero_displays_positive() {
        let modifier = SignedModifier::from_value(0);
        assert_eq!(modifier.sign(), Sign::Plus);
        assert_eq!(modifier.to_string(), "+0");
    }

    #[test]
    fn parses_preformatted_strings() {
        let modifier = RawModifier::from("+ 3").display().expect("parseable");
        assert_eq!(modifier.abs(), 3);
        assert_eq!(modifier.sign(), Sign::Plus);

        let modifier = RawModifier::from("-2").display().expect("parseable");
        assert_eq!(modifier.value(), -2);
    }

    #[test]
    fn unparseable_string_yields_none() {
        assert_eq!(RawModifier::from("1d8 + 2").display(), None);
    }
}
