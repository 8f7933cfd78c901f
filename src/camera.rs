//! Camera for ray generation and scene rendering

use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use rand::Rng;

use crate::hittable::Hittable;
use crate::interval::Interval;
use crate::random;
use crate::ray::Ray;
use crate::vec3::{Color, Point3, Vec3, Vec3Ext};

/// Linear RGB framebuffer produced by [`Camera::render`].
///
/// Channels stay f64 so quantization sees the same value the shading computed.
pub type LinearImage = ImageBuffer<Rgb<f64>, Vec<f64>>;

/// Largest image width or height the camera will derive or render.
pub const MAX_IMAGE_DIMENSION: u32 = 1 << 16;

/// Lower bound of accepted hit distances, keeps rays from re-hitting their own surface.
pub const SHADOW_ACNE_EPSILON: f64 = 0.001;

/// How a ray that hits geometry is turned into a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shading {
    /// Recursive light transport through the hit object's material.
    #[default]
    Materials,
    /// Map the surface normal of the first hit into RGB, no bounces.
    Normals,
}

/// Camera for ray generation and scene rendering.
///
/// Thin-lens model with depth of field and anti-aliasing via multi-sampling.
/// Public fields are the configuration; everything else is derived by
/// [`Camera::initialize`].
#[derive(Debug, Clone)]
pub struct Camera {
    /// Ratio of image width over height
    pub aspect_ratio: f64,
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Number of random samples for each pixel (for anti-aliasing)
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Point camera is looking from (camera position)
    pub lookfrom: Point3,
    /// Point camera is looking at (look target)
    pub lookat: Point3,
    /// Camera-relative "up" direction vector
    pub vup: Vec3,
    /// Variation angle of rays through each pixel, in degrees
    pub defocus_angle: f64,
    /// Distance from camera lookfrom point to plane of perfect focus
    pub focus_dist: f64,
    /// Shading model applied on hits
    pub shading: Shading,

    /// Rendered image height in pixel count
    image_height: u32,
    /// Camera position in world space (same as lookfrom)
    center: Point3,
    /// World position of the top-left pixel (pixel 0,0)
    pixel00_loc: Point3,
    /// Offset vector from pixel to pixel horizontally (right direction)
    pixel_delta_u: Vec3,
    /// Offset vector from pixel to pixel vertically (down direction)
    pixel_delta_v: Vec3,
    /// Color scale factor for a sum of pixel samples
    pixel_samples_scale: f64,
    /// Camera frame basis vector pointing right (u)
    u: Vec3,
    /// Camera frame basis vector pointing up (v)
    v: Vec3,
    /// Camera frame basis vector pointing opposite view direction (w)
    w: Vec3,
    /// Defocus disk horizontal radius vector
    defocus_disk_u: Vec3,
    /// Defocus disk vertical radius vector
    defocus_disk_v: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Creates a new camera with default settings.
    ///
    /// Default: 16:9, 400 pixels wide, 10 samples per pixel, depth 10,
    /// 90° FOV looking down -z, no defocus blur.
    pub fn new() -> Self {
        let mut camera = Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            lookfrom: Point3::ZERO,
            lookat: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            defocus_angle: 0.0,
            focus_dist: 1.0,
            shading: Shading::Materials,
            image_height: 1,
            center: Point3::ZERO,
            pixel00_loc: Point3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            pixel_samples_scale: 1.0,
            u: Vec3::ZERO,
            v: Vec3::ZERO,
            w: Vec3::ZERO,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
        };
        camera.initialize();
        camera
    }

    /// Rendered image height, derived from width and aspect ratio.
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Image height implied by a width and aspect ratio, before any limit is applied.
    ///
    /// Never less than 1.
    pub fn height_for(image_width: u32, aspect_ratio: f64) -> f64 {
        (f64::from(image_width) / aspect_ratio).floor().max(1.0)
    }

    /// Camera center used for primary rays without defocus.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Renders the scene.
    ///
    /// Walks pixels row by row from the top, averaging `samples_per_pixel`
    /// jittered rays each. Returns an image buffer with linear f64 RGB values.
    pub fn render<R: Rng + ?Sized>(&mut self, world: &dyn Hittable, rng: &mut R) -> LinearImage {
        self.initialize();

        let mut image = LinearImage::new(self.image_width, self.image_height);

        info!(
            "Rendering {}x{} image, {} samples per pixel, max depth {}",
            self.image_width, self.image_height, self.samples_per_pixel, self.max_depth
        );
        let generation_start = std::time::Instant::now();
        let pb = ProgressBar::new(u64::from(self.image_height));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} scanlines ETA: {eta}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        for j in 0..self.image_height {
            for i in 0..self.image_width {
                let mut pixel_color = Color::ZERO;
                for _sample in 0..self.samples_per_pixel {
                    let r = self.get_ray(j, i, rng);
                    pixel_color += self.ray_color(&r, world, self.max_depth, rng);
                }

                pixel_color *= self.pixel_samples_scale;
                image.put_pixel(i, j, Rgb(pixel_color.to_array()));
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        info!("Image generated in {:.2?}", generation_start.elapsed());

        image
    }

    /// Initialize camera parameters based on current settings.
    ///
    /// Recomputes the camera frame and viewport from the public fields. Safe
    /// to call any number of times; `render` always calls it first.
    pub fn initialize(&mut self) {
        let height = Self::height_for(self.image_width, self.aspect_ratio);
        self.image_height = if height > f64::from(MAX_IMAGE_DIMENSION) {
            warn!(
                "Derived image height {} exceeds {}, clamping",
                height, MAX_IMAGE_DIMENSION
            );
            MAX_IMAGE_DIMENSION
        } else {
            height as u32
        };

        if self.samples_per_pixel == 0 {
            warn!("samples_per_pixel is 0, rendering with 1 sample per pixel");
            self.samples_per_pixel = 1;
        }
        self.pixel_samples_scale = 1.0 / f64::from(self.samples_per_pixel);

        self.center = self.lookfrom;

        // Determine viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width =
            viewport_height * (f64::from(self.image_width) / f64::from(self.image_height));

        // u,v,w unit basis vectors for the camera coordinate frame
        self.w = (self.lookfrom - self.lookat).unit_vector();
        self.u = self.vup.cross(self.w).unit_vector();
        self.v = self.w.cross(self.u);

        // Vectors across the horizontal and down the vertical viewport edges
        let viewport_u = viewport_width * self.u;
        let viewport_v = viewport_height * -self.v;

        self.pixel_delta_u = viewport_u / f64::from(self.image_width);
        self.pixel_delta_v = viewport_v / f64::from(self.image_height);

        let viewport_upper_left =
            self.center - (self.focus_dist * self.w) - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        let defocus_radius = self.focus_dist * (self.defocus_angle.to_radians() / 2.0).tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        debug!(
            "Camera initialized: {}x{}, viewport {:.3}x{:.3}, defocus radius {:.4}",
            self.image_width, self.image_height, viewport_width, viewport_height, defocus_radius
        );
    }

    /// Generate a jittered ray through pixel (`row`, `col`).
    ///
    /// The ray originates on the defocus disk when `defocus_angle > 0`,
    /// otherwise at the camera center.
    pub fn get_ray<R: Rng + ?Sized>(&self, row: u32, col: u32, rng: &mut R) -> Ray {
        let offset = sample_square(rng);
        let pixel_sample = self.pixel00_loc
            + ((f64::from(col) + offset.x) * self.pixel_delta_u)
            + ((f64::from(row) + offset.y) * self.pixel_delta_v);

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };
        let ray_direction = pixel_sample - ray_origin;

        Ray::new(ray_origin, ray_direction)
    }

    /// Sample random point on the defocus disk for depth-of-field blur.
    fn defocus_disk_sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point3 {
        let p = random::random_in_unit_disk(rng);
        self.center + (p.x * self.defocus_disk_u) + (p.y * self.defocus_disk_v)
    }

    /// Trace a ray and compute its color contribution.
    ///
    /// Follows at most `depth` bounces, multiplying material attenuations
    /// along the way. Absorption or running out of depth yields black; a
    /// miss picks up the sky gradient.
    pub fn ray_color<R: Rng + ?Sized>(&self, r: &Ray, world: &dyn Hittable, depth: u32, rng: &mut R) -> Color {
        let mut throughput = Color::ONE;
        let mut ray = *r;

        for _bounce in 0..depth {
            let Some(rec) = world.hit(&ray, Interval::new(SHADOW_ACNE_EPSILON, f64::INFINITY)) else {
                return throughput * background(&ray);
            };

            if self.shading == Shading::Normals {
                return throughput * 0.5 * (rec.normal + Color::ONE);
            }

            match rec.material.scatter(&ray, &rec, rng) {
                Some(scatter) => {
                    throughput *= scatter.attenuation;
                    ray = scatter.scattered;
                }
                None => return Color::ZERO,
            }
        }

        // Ray bounce limit exceeded, no more light is gathered
        Color::ZERO
    }
}

/// Generate random offset within [-0.5, 0.5] square for pixel sampling.
fn sample_square<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(random::random_f64(rng) - 0.5, random::random_f64(rng) - 0.5, 0.0)
}

/// Sky gradient seen by rays that escape the scene.
///
/// White straight down, sky blue straight up, blended on the unit direction's y.
pub fn background(r: &Ray) -> Color {
    let unit_direction = r.direction.unit_vector();
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * Color::new(1.0, 1.0, 1.0) + a * Color::new(0.5, 0.7, 1.0)
}
