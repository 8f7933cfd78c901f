//! Random number generation for ray tracing.
//!
//! Rendering draws from an explicit ChaCha20 generator handed down from the
//! caller, so a fixed seed reproduces an image exactly. Includes the sampling
//! functions for spheres, hemispheres and the lens disk.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::vec3::{Vec3, Vec3Ext};

/// Generator used for all sampling during a render.
pub type RenderRng = ChaCha20Rng;

/// Create a generator with a fixed seed for reproducible output.
pub fn seeded(seed: u64) -> RenderRng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Create a generator seeded from the thread-local entropy source.
pub fn from_entropy() -> RenderRng {
    ChaCha20Rng::from_rng(&mut rand::rng())
}

/// Generate a random f64 in [0.0, 1.0)
pub fn random_f64<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.random()
}

/// Generate a random f64 in [min, max)
pub fn random_f64_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + (max - min) * random_f64(rng)
}

/// Generate a vector with components in [0.0, 1.0).
pub fn random_vec3<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(random_f64(rng), random_f64(rng), random_f64(rng))
}

/// Generate a vector with components in [min, max).
pub fn random_vec3_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> Vec3 {
    Vec3::new(
        random_f64_range(rng, min, max),
        random_f64_range(rng, min, max),
        random_f64_range(rng, min, max),
    )
}

/// Generate a point strictly inside the unit sphere using rejection sampling.
pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = random_vec3_range(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Generate random unit vector uniformly distributed on unit sphere.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    random_in_unit_sphere(rng).unit_vector()
}

/// Generate random unit vector on the hemisphere around `normal`.
pub fn random_on_hemisphere<R: Rng + ?Sized>(rng: &mut R, normal: Vec3) -> Vec3 {
    let on_unit_sphere = random_unit_vector(rng);
    if on_unit_sphere.dot(normal) > 0.0 {
        on_unit_sphere
    } else {
        -on_unit_sphere
    }
}

/// Generate random point inside unit disk using rejection sampling.
pub fn random_in_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = Vec3::new(
            random_f64_range(rng, -1.0, 1.0),
            random_f64_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
