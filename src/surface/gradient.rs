//! Stop-based gradients over the unit interval.
//!
//! [`Gradient`] maps a normalized value in `[0, 1]` to anything implementing
//! [`Lerp`]. Vertex colors use `Gradient<Rgba>`; the stop count and positions
//! are arbitrary.

use serde::{Deserialize, Serialize};

use crate::core::types::Rgba;
use crate::core::{Error, Result};

// ---------------------------------------------------------------------------
// Lerp trait
// ---------------------------------------------------------------------------

/// Trait for types that can be linearly interpolated.
pub trait Lerp: Clone {
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for [f32; 4] {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        [
            self[0] + (other[0] - self[0]) * t,
            self[1] + (other[1] - self[1]) * t,
            self[2] + (other[2] - self[2]) * t,
            self[3] + (other[3] - self[3]) * t,
        ]
    }
}

/// Fraction of `value` between `a` and `b`, clamped to `[0, 1]`.
///
/// A zero-width range has no meaningful fraction and yields `0.0`.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Gradient
// ---------------------------------------------------------------------------

/// How values between stops are produced
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradientMode {
    /// Linear interpolation between the surrounding stops
    #[default]
    Blend,
    /// Hard steps: the value of the first stop at or after the sample point
    Fixed,
}

/// Ordered `(position, value)` stops over `[0, 1]`.
///
/// Sampling clamps the input to `[0, 1]`; positions before the first stop
/// return the first value and positions after the last return the last.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient<T: Lerp> {
    mode: GradientMode,
    stops: Vec<(f32, T)>,
}

impl<T: Lerp> Gradient<T> {
    /// Create a blended gradient from unsorted stops. Stops are sorted by position.
    pub fn new(stops: Vec<(f32, T)>) -> Self {
        Self::with_mode(GradientMode::Blend, stops)
    }

    pub fn with_mode(mode: GradientMode, mut stops: Vec<(f32, T)>) -> Self {
        stops.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        Self { mode, stops }
    }

    /// Gradient that always returns the same value
    pub fn constant(value: T) -> Self {
        Self {
            mode: GradientMode::Blend,
            stops: vec![(0.0, value)],
        }
    }

    pub fn mode(&self) -> GradientMode {
        self.mode
    }

    pub fn stops(&self) -> &[(f32, T)] {
        &self.stops
    }

    /// Reject gradients that cannot be sampled: no stops, or positions outside `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        if self.stops.is_empty() {
            return Err(Error::config("gradient needs at least one stop"));
        }
        if let Some((pos, _)) = self.stops.iter().find(|(p, _)| !(0.0..=1.0).contains(p)) {
            return Err(Error::config(format!(
                "gradient stop position {} outside [0, 1]",
                pos
            )));
        }
        Ok(())
    }

    /// Sample at `t`, clamped to `[0, 1]`. NaN samples as 0.
    ///
    /// # Panics
    ///
    /// Panics if the gradient has no stops; [`Gradient::validate`] rules that out.
    pub fn evaluate(&self, t: f32) -> T {
        assert!(!self.stops.is_empty(), "Gradient must have at least one stop");

        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        // First stop strictly after t
        let upper = self.stops.partition_point(|(pos, _)| *pos <= t);

        if upper == 0 {
            return self.stops[0].1.clone();
        }
        if upper == self.stops.len() {
            return self.stops[upper - 1].1.clone();
        }

        let (p_a, ref v_a) = self.stops[upper - 1];
        let (p_b, ref v_b) = self.stops[upper];
        match self.mode {
            GradientMode::Fixed => {
                if t == p_a { v_a.clone() } else { v_b.clone() }
            }
            GradientMode::Blend => {
                let span = p_b - p_a;
                if span < 1e-6 {
                    return v_a.clone();
                }
                v_a.lerp(v_b, (t - p_a) / span)
            }
        }
    }
}

impl Gradient<Rgba> {
    /// Deep water → grass → snow, the default surface palette
    pub fn terrain() -> Self {
        Self::new(vec![
            (0.0, [0.05, 0.15, 0.45, 1.0]),
            (0.5, [0.20, 0.60, 0.25, 1.0]),
            (1.0, [0.95, 0.95, 0.95, 1.0]),
        ])
    }
}

// ---------------------------------------------------------------------------
// Serde support
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct GradientRepr<T> {
    #[serde(default)]
    mode: GradientMode,
    stops: Vec<(f32, T)>,
}

impl<T: Lerp + Serialize> Serialize for Gradient<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        GradientRepr {
            mode: self.mode,
            stops: self.stops.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de, T: Lerp + Deserialize<'de>> Deserialize<'de> for Gradient<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let repr = GradientRepr::<T>::deserialize(deserializer)?;
        Ok(Self::with_mode(repr.mode, repr.stops))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
