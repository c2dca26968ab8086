//! Deterministic particle field for the decorative background.
//!
//! Every attribute comes from [`seeded_random`] with its own linear reseed of
//! the particle index, so the same index always yields the same particle.
//! Server and client renderings therefore agree without layout shift.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Particle count used by the hero background.
pub const DEFAULT_PARTICLE_COUNT: usize = 50;

/// Pseudo-random value in `[0, 1)` derived from `seed`.
///
/// `fract(sin(seed) * 10000)`. Stable, not cryptographic.
pub fn seeded_random(seed: f64) -> f64 {
    let x = seed.sin() * 10_000.0;
    x - x.floor()
}

/// One background particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Index within the field.
    pub id: usize,
    /// Horizontal position, percent of the container width.
    pub x: f64,
    /// Vertical position, percent of the container height.
    pub y: f64,
    /// Diameter in pixels, 1 to 5.
    pub size: f64,
    /// Horizontal drift factor, -0.25 to 0.25.
    pub speed_x: f64,
    /// Vertical drift factor, -0.25 to 0.25.
    pub speed_y: f64,
    /// Opacity, 0.1 to 0.6.
    pub opacity: f64,
    /// Length of one drift loop in seconds, 10 to 20.
    pub duration: f64,
}

impl Particle {
    /// Generates the particle at index `id`.
    pub fn generate(id: usize) -> Self {
        let i = id as f64;
        let r = |stride: f64, offset: f64| seeded_random(i * stride + offset);
        Self {
            id,
            x: r(2.0, 1.0) * 100.0,
            y: r(3.0, 2.0) * 100.0,
            size: r(4.0, 3.0) * 4.0 + 1.0,
            speed_x: (r(5.0, 4.0) - 0.5) * 0.5,
            speed_y: (r(6.0, 5.0) - 0.5) * 0.5,
            opacity: r(7.0, 6.0) * 0.5 + 0.1,
            duration: r(8.0, 7.0) * 10.0 + 10.0,
        }
    }
}

/// Generates `count` particles with ids `0..count`.
#[instrument]
pub fn particle_field(count: usize) -> Vec<Particle> {
    (0..count).map(Particle::generate).collect()
}
