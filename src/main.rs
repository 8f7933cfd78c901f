use clap::Parser;
use log::{error, info};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;
use raysphere::camera::{Camera, Shading, MAX_IMAGE_DIMENSION};
use raysphere::output::save_image_as_ppm;
use raysphere::random;
use raysphere::scenes::SceneKind;

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    // Log application startup with version information
    info!("raysphere - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    let mut rng = match args.seed {
        Some(seed) => {
            info!("Using random seed {}", seed);
            random::seeded(seed)
        }
        None => random::from_entropy(),
    };

    let scene: SceneKind = args.scene.into();
    let (world, mut camera) = scene.build(&mut rng);
    info!("Scene {:?} with {} objects", scene, world.len());

    if let Some(width) = args.width {
        camera.image_width = width;
    }
    if let Some(aspect_ratio) = args.aspect_ratio {
        if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
            error!("Aspect ratio must be a positive number, got {}", aspect_ratio);
            std::process::exit(1);
        }
        camera.aspect_ratio = aspect_ratio;
    }
    let height = Camera::height_for(camera.image_width, camera.aspect_ratio);
    if height > f64::from(MAX_IMAGE_DIMENSION) {
        error!(
            "Width {} with aspect ratio {} gives an image height of {}, the limit is {}",
            camera.image_width, camera.aspect_ratio, height, MAX_IMAGE_DIMENSION
        );
        std::process::exit(1);
    }
    if let Some(samples) = args.samples_per_pixel {
        camera.samples_per_pixel = samples;
    }
    if let Some(max_depth) = args.max_depth {
        camera.max_depth = max_depth;
    }
    if args.normals {
        camera.shading = Shading::Normals;
    }

    let image = camera.render(&world, &mut rng);

    if let Err(e) = save_image_as_ppm(&image, &args.output) {
        error!("Failed to write image to {}: {}", args.output, e);
        std::process::exit(1);
    }
}
