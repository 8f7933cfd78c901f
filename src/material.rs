//! Material system for ray tracing.
//!
//! Implements three material types: Lambertian (diffuse), Metal (specular),
//! and Dielectric (transparent).

use rand::Rng;

use crate::hittable::HitRecord;
use crate::random;
use crate::ray::Ray;
use crate::vec3::{Color, Vec3, Vec3Ext};

/// Surface materials.
///
/// Materials are immutable once built and shared between primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lambertian diffuse material for matte surfaces.
    Lambertian {
        /// Surface color/reflectance.
        albedo: Color,
    },

    /// Metallic material with specular reflection.
    Metal {
        /// Metal color.
        albedo: Color,
        /// Surface roughness (0.0 = mirror, 1.0 = rough).
        fuzz: f64,
    },

    /// Dielectric (transparent) material with refraction.
    Dielectric {
        /// Index of refraction (1.0 = air, 1.5 = glass, etc.).
        refraction_index: f64,
    },
}

/// Outcome of a scatter event that was not absorbed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scatter {
    /// Color multiplier for light arriving along `scattered`.
    pub attenuation: Color,
    /// Continuation ray leaving the hit point.
    pub scattered: Ray,
}

impl Material {
    /// Diffuse material with the given albedo.
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Metal with the given albedo; `fuzz` is clamped into [0, 1].
    pub fn metal(albedo: Color, fuzz: f64) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Glass-like material with the given index of refraction.
    pub fn dielectric(refraction_index: f64) -> Self {
        Material::Dielectric { refraction_index }
    }

    /// Compute ray scattering for this material.
    ///
    /// Returns `None` when the ray is absorbed.
    pub fn scatter<R: Rng + ?Sized>(&self, r_in: &Ray, rec: &HitRecord, rng: &mut R) -> Option<Scatter> {
        match *self {
            Material::Lambertian { albedo } => Some(scatter_lambertian(albedo, rec, rng)),
            Material::Metal { albedo, fuzz } => scatter_metal(albedo, fuzz, r_in, rec, rng),
            Material::Dielectric { refraction_index } => {
                Some(scatter_dielectric(refraction_index, r_in, rec, rng))
            }
        }
    }
}

/// Lambertian diffuse scattering with cosine-weighted distribution.
fn scatter_lambertian<R: Rng + ?Sized>(albedo: Color, rec: &HitRecord, rng: &mut R) -> Scatter {
    let mut scatter_direction = rec.normal + random::random_unit_vector(rng);

    // Catch degenerate scatter direction
    if scatter_direction.near_zero() {
        scatter_direction = rec.normal;
    }

    Scatter {
        attenuation: albedo,
        scattered: Ray::new(rec.p, scatter_direction),
    }
}

/// Metallic reflection with optional surface roughness.
fn scatter_metal<R: Rng + ?Sized>(
    albedo: Color,
    fuzz: f64,
    r_in: &Ray,
    rec: &HitRecord,
    rng: &mut R,
) -> Option<Scatter> {
    let reflected = reflect(r_in.direction, rec.normal) + fuzz * random::random_unit_vector(rng);
    let scattered = Ray::new(rec.p, reflected);

    // Fuzzed rays that would enter the surface are absorbed
    if scattered.direction.dot(rec.normal) > 0.0 {
        Some(Scatter {
            attenuation: albedo,
            scattered,
        })
    } else {
        None
    }
}

/// Dielectric scattering with reflection and refraction using Schlick's approximation.
fn scatter_dielectric<R: Rng + ?Sized>(
    refraction_index: f64,
    r_in: &Ray,
    rec: &HitRecord,
    rng: &mut R,
) -> Scatter {
    let ri = if rec.front_face {
        1.0 / refraction_index
    } else {
        refraction_index
    };

    let unit_direction = r_in.direction.unit_vector();
    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    let cannot_refract = ri * sin_theta > 1.0;

    let direction = if cannot_refract || reflectance(cos_theta, ri) > random::random_f64(rng) {
        reflect(unit_direction, rec.normal)
    } else {
        refract(unit_direction, rec.normal, ri)
    };

    Scatter {
        attenuation: Color::ONE,
        scattered: Ray::new(rec.p, direction),
    }
}

/// Reflect a vector off a surface with unit normal `n`.
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through an interface using Snell's law.
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Compute Fresnel reflectance using Schlick's approximation.
pub fn reflectance(cosine: f64, refraction_ratio: f64) -> f64 {
    let r0 = (1.0 - refraction_ratio) / (1.0 + refraction_ratio);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded;
    use crate::vec3::Point3;
    use rand::RngCore;

    /// Replays a fixed list of raw u64 draws, cycling when exhausted.
    struct ScriptedRng {
        draws: Vec<u64>,
        next: usize,
    }

    impl ScriptedRng {
        fn new(draws: Vec<u64>) -> Self {
            Self { draws, next: 0 }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            let value = self.draws[self.next % self.draws.len()];
            self.next += 1;
            value
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for chunk in dst.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }

    // Raw draws that the f64 sampler maps to exactly 0.5 and 0.25
    const HALF: u64 = 1 << 63;
    const QUARTER: u64 = 1 << 62;

    #[test]
    fn test_scripted_rng_yields_expected_floats() {
        let mut rng = ScriptedRng::new(vec![HALF, QUARTER]);
        assert_eq!(random::random_f64(&mut rng), 0.5);
        assert_eq!(random::random_f64(&mut rng), 0.25);
    }

    #[test]
    fn test_lambertian_cancelled_direction_falls_back_to_normal() {
        // In-sphere draw (0, 0, -0.5) normalizes to exactly -normal
        let mut rng = ScriptedRng::new(vec![HALF, HALF, QUARTER]);
        let material = Material::lambertian(Color::new(0.2, 0.4, 0.6));
        let r = Ray::new(Point3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, -1.0));
        let rec = front_hit(&r, &material);
        assert_eq!(rec.normal, Vec3::new(0.0, 0.0, 1.0));

        let scatter = material.scatter(&r, &rec, &mut rng).expect("lambertian always scatters");
        assert_eq!(scatter.scattered.direction, rec.normal);
        assert_eq!(scatter.scattered.origin, rec.p);
        assert_eq!(scatter.attenuation, Color::new(0.2, 0.4, 0.6));
    }

    fn front_hit<'a>(r: &Ray, material: &'a Material) -> HitRecord<'a> {
        HitRecord::new(r, 1.0, Vec3::new(0.0, 0.0, 1.0), material)
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        assert_eq!(Material::metal(Color::ONE, 3.0), Material::Metal { albedo: Color::ONE, fuzz: 1.0 });
        assert_eq!(Material::metal(Color::ONE, -1.0), Material::Metal { albedo: Color::ONE, fuzz: 0.0 });
    }

    #[test]
    fn test_lambertian_never_absorbs() {
        let mut rng = seeded(11);
        let material = Material::lambertian(Color::new(0.8, 0.3, 0.1));
        let r = Ray::new(Point3::new(0.0, 0.0, 2.0), Vec3::new(0.3, -0.2, -1.0));
        let rec = front_hit(&r, &material);
        for _ in 0..1000 {
            let scatter = material.scatter(&r, &rec, &mut rng).expect("lambertian always scatters");
            assert_eq!(scatter.attenuation, Color::new(0.8, 0.3, 0.1));
            assert_eq!(scatter.scattered.origin, rec.p);
            assert!(!scatter.scattered.direction.near_zero());
            assert!(scatter.scattered.direction.dot(rec.normal) >= 0.0);
        }
    }

    #[test]
    fn test_mirror_metal_reflects_exactly() {
        let mut rng = seeded(12);
        let material = Material::metal(Color::new(0.7, 0.6, 0.5), 0.0);
        let r = Ray::new(Point3::new(-1.0, 0.0, 2.0), Vec3::new(1.0, 0.0, -1.0));
        let rec = front_hit(&r, &material);
        let scatter = material.scatter(&r, &rec, &mut rng).expect("mirror reflection leaves the surface");
        assert!(scatter.scattered.direction.abs_diff_eq(Vec3::new(1.0, 0.0, 1.0), 1e-12));
        assert_eq!(scatter.attenuation, Color::new(0.7, 0.6, 0.5));
    }

    #[test]
    fn test_metal_absorbs_iff_scattered_enters_surface() {
        let material = Material::metal(Color::ONE, 1.0);
        // Grazing incidence so that fuzz regularly pushes rays below the surface
        let r = Ray::new(Point3::new(-10.0, 0.0, 0.1), Vec3::new(1.0, 0.0, -0.01));
        let rec = front_hit(&r, &material);

        let mut absorbed = 0;
        let mut scattered = 0;
        for seed in 0..500 {
            // Replay the same draws to recover the fuzzed direction
            let mut rng = seeded(seed);
            let mut replay = seeded(seed);
            let expected = reflect(r.direction, rec.normal) + random::random_unit_vector(&mut replay);
            match material.scatter(&r, &rec, &mut rng) {
                Some(scatter) => {
                    scattered += 1;
                    assert!(expected.dot(rec.normal) > 0.0);
                    assert!(scatter.scattered.direction.abs_diff_eq(expected, 1e-12));
                }
                None => {
                    absorbed += 1;
                    assert!(expected.dot(rec.normal) <= 0.0);
                }
            }
        }
        assert!(absorbed > 0);
        assert!(scattered > 0);
    }

    #[test]
    fn test_dielectric_never_absorbs() {
        let mut rng = seeded(13);
        let material = Material::dielectric(1.5);
        let directions = [
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.9, 0.0, -0.1),
            Vec3::new(-0.5, 0.5, -0.2),
        ];
        for direction in directions {
            let r = Ray::new(Point3::new(0.0, 0.0, 2.0), direction);
            for outward in [Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0)] {
                let rec = HitRecord::new(&r, 1.0, outward, &material);
                for _ in 0..200 {
                    let scatter = material.scatter(&r, &rec, &mut rng).expect("glass never absorbs");
                    assert_eq!(scatter.attenuation, Color::ONE);
                }
            }
        }
    }

    #[test]
    fn test_schlick_at_normal_incidence() {
        let r0 = reflectance(1.0, 1.0 / 1.5);
        assert!((r0 - 0.04).abs() < 1e-12);
        // Same value from the dense side of the interface
        assert!((reflectance(1.0, 1.5) - 0.04).abs() < 1e-12);
        // Grazing incidence always reflects
        assert!((reflectance(0.0, 1.0 / 1.5) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_glass_mostly_refracts_at_normal_incidence() {
        let mut rng = seeded(14);
        let material = Material::dielectric(1.5);
        let r = Ray::new(Point3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, -1.0));
        let rec = front_hit(&r, &material);

        let trials = 2000;
        let mut refracted = 0;
        for _ in 0..trials {
            let scatter = material.scatter(&r, &rec, &mut rng).expect("glass never absorbs");
            if scatter.scattered.direction.z < 0.0 {
                // Straight through at normal incidence
                assert!(scatter.scattered.direction.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-12));
                refracted += 1;
            } else {
                assert!(scatter.scattered.direction.abs_diff_eq(Vec3::new(0.0, 0.0, 1.0), 1e-12));
            }
        }
        let reflected_share = (trials - refracted) as f64 / trials as f64;
        assert!(reflected_share < 0.1, "reflected share {reflected_share}");
        assert!(refracted < trials);
    }

    #[test]
    fn test_total_internal_reflection() {
        let mut rng = seeded(15);
        let material = Material::dielectric(1.5);
        // Leaving the glass at a steep angle: ratio 1.5 * sin > 1
        let r = Ray::new(Point3::ZERO, Vec3::new(1.0, 0.0, 0.5));
        let rec = HitRecord::new(&r, 1.0, Vec3::new(0.0, 0.0, 1.0), &material);
        assert!(!rec.front_face);
        for _ in 0..100 {
            let scatter = material.scatter(&r, &rec, &mut rng).expect("glass never absorbs");
            let expected = reflect(r.direction.unit_vector(), rec.normal);
            assert!(scatter.scattered.direction.abs_diff_eq(expected, 1e-12));
        }
    }

    #[test]
    fn test_refract_obeys_snell() {
        let incoming = Vec3::new(1.0, 0.0, -1.0).unit_vector();
        let normal = Vec3::new(0.0, 0.0, 1.0);
        let ratio = 1.0 / 1.5;
        let out = refract(incoming, normal, ratio);
        let sin_in = incoming.x.abs();
        let sin_out = out.unit_vector().x.abs();
        assert!((sin_in * ratio - sin_out).abs() < 1e-12);
        assert!(out.z < 0.0);
    }
}
