//! Ray-object intersection system.
//!
//! Defines the Hittable trait for geometric primitives, HitRecord for
//! storing intersection data, and HittableList, the scene container.

use std::sync::Arc;

use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;
use crate::vec3::{Point3, Vec3};

/// Ray-object intersection information.
///
/// Contains intersection point, surface normal, distance, and the material
/// of the struck object needed for shading calculations.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point where the ray intersects the object
    pub p: Point3,
    /// Unit surface normal, always oriented against the incoming ray
    pub normal: Vec3,
    /// Ray parameter of the intersection point
    pub t: f64,
    /// True if ray hits the front face, false if hits the back face
    pub front_face: bool,
    /// Material of the object at the hit point
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record from an outward normal, orienting it against the ray.
    ///
    /// `outward_normal` is assumed to have unit length.
    pub fn new(r: &Ray, t: f64, outward_normal: Vec3, material: &'a Material) -> Self {
        let mut rec = Self {
            p: r.at(t),
            normal: outward_normal,
            t,
            front_face: true,
            material,
        };
        rec.set_face_normal(r, outward_normal);
        rec
    }

    /// Set surface normal and determine front/back face.
    ///
    /// Ensures normal always points against the incident ray.
    pub fn set_face_normal(&mut self, r: &Ray, outward_normal: Vec3) {
        self.front_face = r.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be intersected by rays.
pub trait Hittable {
    /// Test for ray intersection with parameter strictly inside `ray_t`.
    ///
    /// Returns the closest qualifying hit, or `None` on a miss.
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// Collection of objects forming a scene.
///
/// Uses a linear scan for intersection testing; members are shared so the
/// same primitive can appear in more than one list.
#[derive(Default, Clone)]
pub struct HittableList {
    /// Shared hittable objects, in insertion order
    pub objects: Vec<Arc<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Create a new list with a single hittable object
    pub fn with_object(object: Arc<dyn Hittable>) -> Self {
        let mut list = Self::new();
        list.add(object);
        list
    }

    /// Clear all objects from the list
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Number of objects in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when the scene has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut window = ray_t;
        let mut closest = None;

        for object in &self.objects {
            if let Some(rec) = object.hit(r, window) {
                // Only hits nearer than the current best can qualify from here on
                window.max = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}
