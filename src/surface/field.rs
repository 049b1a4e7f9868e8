//! Closed library of animated height fields.
//!
//! Every field is a pure function of planar position and time. The set is
//! fixed, so fields are an enum with one evaluation arm per variant rather
//! than trait objects.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Selectable height field `(x, y, t) -> height`
///
/// Serializes by name. Deserializes from either a name or a numeric selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FieldSelector")]
pub enum ScalarField {
    /// Travelling wave along x
    #[default]
    Sine,
    /// Sum of travelling waves along x and y
    Sine2D,
    /// Two-octave travelling wave along x
    MultiSine,
    /// Diagonal wave plus two axis-aligned octaves
    MultiSine2D,
    /// Damped radial wave
    Ripple,
}

impl ScalarField {
    /// Every field, in selector order
    pub const ALL: [ScalarField; 5] = [
        ScalarField::Sine,
        ScalarField::Sine2D,
        ScalarField::MultiSine,
        ScalarField::MultiSine2D,
        ScalarField::Ripple,
    ];

    /// Look a field up by its numeric selector
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL.get(index).copied().ok_or_else(|| {
            Error::config(format!(
                "unknown scalar field selector {} (expected 0..{})",
                index,
                Self::ALL.len()
            ))
        })
    }

    /// Numeric selector of this field
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ScalarField::Sine => "Sine",
            ScalarField::Sine2D => "Sine2D",
            ScalarField::MultiSine => "MultiSine",
            ScalarField::MultiSine2D => "MultiSine2D",
            ScalarField::Ripple => "Ripple",
        }
    }

    /// Evaluate the field at planar position `(x, y)` and time `t`
    #[inline]
    pub fn evaluate(self, x: f32, y: f32, t: f32) -> f32 {
        match self {
            ScalarField::Sine => sine(x, t),
            ScalarField::Sine2D => sine_2d(x, y, t),
            ScalarField::MultiSine => multi_sine(x, t),
            ScalarField::MultiSine2D => multi_sine_2d(x, y, t),
            ScalarField::Ripple => ripple(x, y, t),
        }
    }
}

impl fmt::Display for ScalarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalarField {
    type Err = Error;

    /// Accepts either a field name (case-insensitive) or a numeric selector
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Self::from_index(index);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::config(format!("unknown scalar field '{}'", s)))
    }
}

/// Field selector as written in a config file
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldSelector {
    Index(usize),
    Name(String),
}

impl TryFrom<FieldSelector> for ScalarField {
    type Error = Error;

    fn try_from(selector: FieldSelector) -> Result<Self> {
        match selector {
            FieldSelector::Index(index) => Self::from_index(index),
            FieldSelector::Name(name) => name.parse(),
        }
    }
}

fn sine(x: f32, t: f32) -> f32 {
    0.2 * (PI * (x + t)).sin()
}

fn sine_2d(x: f32, y: f32, t: f32) -> f32 {
    let z = (PI * (x + t)).sin() + (PI * (y + t)).sin();
    z * 0.2
}

fn multi_sine(x: f32, t: f32) -> f32 {
    let z = (PI * (x + t)).sin() + (2.0 * PI * (x + 2.0 * t)).sin() * 0.5;
    z * (2.0 / 6.0)
}

fn multi_sine_2d(x: f32, y: f32, t: f32) -> f32 {
    let mut z = (PI * (x + y + 0.5 * t)).sin();
    z += (PI * (x + t)).sin();
    z += (2.0 * PI * (y + 2.0 * t)).sin() * 0.5;
    z * (1.0 / 10.5)
}

fn ripple(x: f32, y: f32, t: f32) -> f32 {
    let d = (x * x + y * y).sqrt();
    let z = (PI * (4.0 * d - t)).sin() / (1.0 + 10.0 * d);
    z * 0.1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_selector_round_trip() {
        for (i, field) in ScalarField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
            assert_eq!(ScalarField::from_index(i).unwrap(), *field);
        }
    }

    #[test]
    fn test_unknown_selector_is_config_error() {
        assert!(matches!(ScalarField::from_index(5), Err(Error::Config(_))));
        assert!(matches!("Cosine".parse::<ScalarField>(), Err(Error::Config(_))));
        assert!(matches!("9".parse::<ScalarField>(), Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_by_name_and_index() {
        assert_eq!("ripple".parse::<ScalarField>().unwrap(), ScalarField::Ripple);
        assert_eq!("MultiSine2D".parse::<ScalarField>().unwrap(), ScalarField::MultiSine2D);
        assert_eq!("1".parse::<ScalarField>().unwrap(), ScalarField::Sine2D);
    }

    #[test]
    fn test_sine_values() {
        assert!(approx_eq(ScalarField::Sine.evaluate(0.5, 7.0, 0.0), 0.2));
        assert!(approx_eq(ScalarField::Sine.evaluate(0.0, 7.0, 0.0), 0.0));
        // y is ignored
        assert_eq!(
            ScalarField::Sine.evaluate(0.3, 1.0, 0.4),
            ScalarField::Sine.evaluate(0.3, -9.0, 0.4)
        );
    }

    #[test]
    fn test_sine_2d_peak() {
        assert!(approx_eq(ScalarField::Sine2D.evaluate(0.5, 0.5, 0.0), 0.4));
        assert!(approx_eq(ScalarField::Sine2D.evaluate(0.5, -0.5, 0.0), 0.0));
    }

    #[test]
    fn test_multi_sine_2d_value() {
        // x = 0.5, y = 0, t = 0: sin(pi/2) + sin(pi/2) + 0.5 * sin(0) = 2
        assert!(approx_eq(ScalarField::MultiSine2D.evaluate(0.5, 0.0, 0.0), 2.0 / 10.5));
    }

    #[test]
    fn test_ripple_at_origin_is_time_dependent() {
        // d = 0: 0.1 * sin(pi * (0 - t)) / 1 = -0.1 * sin(pi * t)
        for t in [0.0_f32, 0.25, 0.5, 1.3, 7.9] {
            let expected = -0.1 * (PI * t).sin();
            assert!(approx_eq(ScalarField::Ripple.evaluate(0.0, 0.0, t), expected), "t = {}", t);
        }
        assert!(approx_eq(ScalarField::Ripple.evaluate(0.0, 0.0, 0.5), -0.1));
    }

    #[test]
    fn test_ripple_is_damped_and_radial() {
        let near = ScalarField::Ripple.evaluate(0.125, 0.0, 0.0);
        let far = ScalarField::Ripple.evaluate(2.125, 0.0, 0.0);
        assert!(far.abs() < near.abs());
        assert!(approx_eq(
            ScalarField::Ripple.evaluate(0.3, 0.4, 1.0),
            ScalarField::Ripple.evaluate(0.0, 0.5, 1.0)
        ));
    }

    // Earlier MultiSine code returned its raw `y` argument and discarded the
    // composed wave. MultiSine now returns the composed wave; this test pins
    // that so a change back has to be deliberate.
    #[test]
    fn test_multi_sine_uses_composed_wave_not_raw_y() {
        let (x, y, t) = (0.5, 3.0, 0.0);
        let value = ScalarField::MultiSine.evaluate(x, y, t);
        // sin(pi/2) + 0.5 * sin(pi) = 1, scaled by 1/3
        assert!(approx_eq(value, 1.0 / 3.0));
        assert!(!approx_eq(value, y), "MultiSine must not echo its y input");
    }

    #[test]
    fn test_multi_sine_ignores_y() {
        assert_eq!(
            ScalarField::MultiSine.evaluate(0.2, -4.0, 0.7),
            ScalarField::MultiSine.evaluate(0.2, 4.0, 0.7)
        );
    }

    #[test]
    fn test_fields_are_deterministic() {
        for field in ScalarField::ALL {
            let a = field.evaluate(0.37, -1.2, 3.3);
            let b = field.evaluate(0.37, -1.2, 3.3);
            assert_eq!(a.to_bits(), b.to_bits(), "{} not deterministic", field);
        }
    }

    #[test]
    fn test_serde_by_name() {
        let json = serde_json::to_string(&ScalarField::MultiSine2D).unwrap();
        assert_eq!(json, "\"MultiSine2D\"");
        let back: ScalarField = serde_json::from_str("\"Ripple\"").unwrap();
        assert_eq!(back, ScalarField::Ripple);
        assert!(serde_json::from_str::<ScalarField>("\"Noise\"").is_err());
    }

    #[test]
    fn test_deserialize_by_index() {
        let field: ScalarField = serde_json::from_str("4").unwrap();
        assert_eq!(field, ScalarField::Ripple);
        let field: ScalarField = serde_json::from_str("\"2\"").unwrap();
        assert_eq!(field, ScalarField::MultiSine);
        assert!(serde_json::from_str::<ScalarField>("9").is_err());
        assert!(serde_json::from_str::<ScalarField>("-1").is_err());
    }
}
