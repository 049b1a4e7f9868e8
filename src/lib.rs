//! Wavesurf - animated, height-colored grid surfaces
//!
//! A regular grid is deformed every frame by one of a fixed set of analytic
//! height fields, recolored by height through a gradient, and pushed to a
//! mesh sink and a collision sink. The [`align`] module separately orients
//! objects to whatever ground lies beneath them.

pub mod core;
pub mod math;
pub mod surface;
pub mod physics;
pub mod align;
