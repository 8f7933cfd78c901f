//! Built-in scenes and their matching camera setups.

use std::sync::Arc;

use rand::Rng;

use crate::camera::Camera;
use crate::hittable::HittableList;
use crate::material::Material;
use crate::random;
use crate::sphere::Sphere;
use crate::vec3::{Color, Point3, Vec3};

/// Selects one of the built-in scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneKind {
    /// Ground plane covered in small random spheres with three large feature spheres.
    #[default]
    Cover,
    /// Row of three spheres (glass shell, diffuse, metal) over a ground sphere.
    Materials,
}

impl SceneKind {
    /// Build the world and a camera framed for it.
    pub fn build<R: Rng + ?Sized>(self, rng: &mut R) -> (HittableList, Camera) {
        match self {
            SceneKind::Cover => (cover(rng), cover_camera()),
            SceneKind::Materials => (materials(), materials_camera()),
        }
    }
}

fn add_sphere(world: &mut HittableList, center: Point3, radius: f64, material: &Arc<Material>) {
    world.add(Arc::new(Sphere::new(center, radius, Arc::clone(material))));
}

/// Create the cover scene with random spheres.
pub fn cover<R: Rng + ?Sized>(rng: &mut R) -> HittableList {
    let mut world = HittableList::new();

    let ground_material = Arc::new(Material::lambertian(Color::new(0.5, 0.5, 0.5)));
    add_sphere(&mut world, Point3::new(0.0, -1000.0, 0.0), 1000.0, &ground_material);

    // 22x22 grid of small spheres
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random::random_f64(rng);
            let center = Point3::new(
                f64::from(a) + 0.9 * random::random_f64(rng),
                0.2,
                f64::from(b) + 0.9 * random::random_f64(rng),
            );

            // Keep clear of the large metal sphere
            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let sphere_material = if choose_mat < 0.8 {
                let albedo = random::random_vec3(rng) * random::random_vec3(rng);
                Material::lambertian(albedo)
            } else if choose_mat < 0.95 {
                let albedo = random::random_vec3_range(rng, 0.5, 1.0);
                let fuzz = random::random_f64_range(rng, 0.0, 0.5);
                Material::metal(albedo, fuzz)
            } else {
                Material::dielectric(1.5)
            };
            add_sphere(&mut world, center, 0.2, &Arc::new(sphere_material));
        }
    }

    let glass = Arc::new(Material::dielectric(1.5));
    add_sphere(&mut world, Point3::new(0.0, 1.0, 0.0), 1.0, &glass);

    let diffuse = Arc::new(Material::lambertian(Color::new(0.4, 0.2, 0.1)));
    add_sphere(&mut world, Point3::new(-4.0, 1.0, 0.0), 1.0, &diffuse);

    let metal = Arc::new(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0));
    add_sphere(&mut world, Point3::new(4.0, 1.0, 0.0), 1.0, &metal);

    world
}

/// Camera for the cover scene: narrow field of view with a shallow depth of field.
pub fn cover_camera() -> Camera {
    let mut camera = Camera::new();
    camera.aspect_ratio = 16.0 / 9.0;
    camera.image_width = 400;
    camera.samples_per_pixel = 20;
    camera.max_depth = 20;
    camera.vfov = 20.0;
    camera.lookfrom = Point3::new(13.0, 2.0, 3.0);
    camera.lookat = Point3::new(0.0, 0.0, 0.0);
    camera.vup = Vec3::new(0.0, 1.0, 0.0);
    camera.defocus_angle = 0.6;
    camera.focus_dist = 10.0;
    camera
}

/// Three spheres showing each material, including a hollow glass shell.
pub fn materials() -> HittableList {
    let mut world = HittableList::new();

    let ground = Arc::new(Material::lambertian(Color::new(0.8, 0.8, 0.0)));
    let center = Arc::new(Material::lambertian(Color::new(0.1, 0.2, 0.5)));
    let glass = Arc::new(Material::dielectric(1.5));
    let gold = Arc::new(Material::metal(Color::new(0.8, 0.6, 0.2), 0.0));

    add_sphere(&mut world, Point3::new(0.0, -100.5, -1.0), 100.0, &ground);
    add_sphere(&mut world, Point3::new(0.0, 0.0, -1.0), 0.5, &center);
    add_sphere(&mut world, Point3::new(-1.0, 0.0, -1.0), 0.5, &glass);
    // Negative radius flips the normals inward, turning the glass ball into a shell
    add_sphere(&mut world, Point3::new(-1.0, 0.0, -1.0), -0.4, &glass);
    add_sphere(&mut world, Point3::new(1.0, 0.0, -1.0), 0.5, &gold);

    world
}

/// Camera looking down -z at the materials scene, no defocus blur.
pub fn materials_camera() -> Camera {
    let mut camera = Camera::new();
    camera.aspect_ratio = 16.0 / 9.0;
    camera.image_width = 400;
    camera.samples_per_pixel = 10;
    camera.max_depth = 10;
    camera.vfov = 90.0;
    camera.lookfrom = Point3::ZERO;
    camera.lookat = Point3::new(0.0, 0.0, -1.0);
    camera.vup = Vec3::new(0.0, 1.0, 0.0);
    camera.defocus_angle = 0.0;
    camera.focus_dist = 1.0;
    camera
}
