//! raysphere ray tracer
//!
//! Renders scenes of spheres with diffuse, metal and glass materials by
//! stochastic sampling of camera rays. Single-threaded, deterministic for a
//! given seed, with plain-text PPM output.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod vec3;
pub mod ray;
pub mod sphere;
pub mod hittable;
pub mod interval;
pub mod camera;
pub mod random;
pub mod material;
pub mod output;
pub mod scenes;
