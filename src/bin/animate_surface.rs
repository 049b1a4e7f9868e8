//! Headless surface animator: runs the frame driver for a fixed number of ticks.
//!
//! Usage: cargo run --release --bin animate_surface -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>       JSON surface config (flags below override it)
//!   --resolution <R>      Quads per side (default: 100)
//!   --size <METERS>       Plane side length (default: 10)
//!   --scale <S>           Field coordinate divisor (default: 1)
//!   --height <H>          Height multiplier (default: 1)
//!   --function <NAME|N>   Sine, Sine2D, MultiSine, MultiSine2D, Ripple (default: Sine)
//!   --frames <N>          Ticks to run (default: 120)
//!   --dt <SECONDS>        Fixed time step; omit to follow the wall clock
//!   --jobs <N>            Worker threads for deformation (default: all cores)
//!   --snapshot <PATH>     Write the last frame's vertex colors as an image
//!   --summary <PATH>      Write run statistics as JSON

use std::path::PathBuf;
use std::time::Instant;

use serde_json::json;

use wavesurf::align::SurfaceAligner;
use wavesurf::core::logging;
use wavesurf::core::time::{FrameTimer, SimulationClock};
use wavesurf::core::types::{Quat, Vec3};
use wavesurf::physics::{CollisionWorld, LayerMask, MeshCollider};
use wavesurf::surface::{self, FrameDriver, PackedMeshSink, ScalarField, SurfaceConfig};

/// Layer the animated surface's collider lives on
const GROUND_LAYER: u8 = 6;

fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().collect();

    let mut config = match parse_str_arg(&args, "--config") {
        Some(path) => SurfaceConfig::load_json(&PathBuf::from(path))
            .expect("Failed to load surface config"),
        None => SurfaceConfig::default(),
    };
    if let Some(resolution) = parse_u32_arg(&args, "--resolution") {
        config.resolution = resolution;
    }
    if let Some(size) = parse_f32_arg(&args, "--size") {
        config.size = size;
    }
    if let Some(scale) = parse_f32_arg(&args, "--scale") {
        config.scale = scale;
    }
    if let Some(height) = parse_f32_arg(&args, "--height") {
        config.height_multiplier = height;
    }
    if let Some(name) = parse_str_arg(&args, "--function") {
        config.function = name.parse::<ScalarField>().expect("Invalid --function");
    }
    let frames = parse_u64_arg(&args, "--frames").unwrap_or(120);
    let fixed_dt = parse_f32_arg(&args, "--dt");
    let snapshot = parse_str_arg(&args, "--snapshot").map(PathBuf::from);
    let summary = parse_str_arg(&args, "--summary").map(PathBuf::from);

    if let Some(jobs) = parse_usize_arg(&args, "--jobs") {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .expect("Failed to configure thread pool");
    }

    println!("=== Wavesurf Surface Animator ===");
    println!("Grid:     {} x {} quads, {}m", config.resolution, config.resolution, config.size);
    println!("Field:    {} (scale {}, height x{})", config.function, config.scale, config.height_multiplier);
    match fixed_dt {
        Some(dt) => println!("Frames:   {} at fixed dt {}s", frames, dt),
        None => println!("Frames:   {} on the wall clock", frames),
    }
    println!();

    let mut driver = FrameDriver::new(config.clone()).expect("Invalid surface configuration");

    let ground = LayerMask::layer(GROUND_LAYER);
    let mut world = CollisionWorld::new();
    let surface_id = world.insert(MeshCollider::new(ground));
    let mut sink = PackedMeshSink::new();

    // Probe hovering above the plane, off the grid lines
    let probe = Vec3::new(config.size * 0.137, config.size, config.size * 0.211);
    let aligner = SurfaceAligner::new(ground);
    let mut probe_rotation = Quat::IDENTITY;
    let mut aligned_frames = 0u64;

    let mut clock = SimulationClock::new();
    let mut timer = FrameTimer::new();
    let mut min_height = f32::INFINITY;
    let mut max_height = f32::NEG_INFINITY;
    let mut total_build_ms = 0.0f64;
    let start = Instant::now();

    for frame in 0..frames {
        timer.tick();
        if frame > 0 {
            clock.advance(fixed_dt.unwrap_or_else(|| timer.delta_secs()));
        }
        let t = clock.seconds();

        let collider = world.get_mut(surface_id).expect("surface collider registered");
        let stats = driver.tick(t, &mut sink, collider);
        min_height = min_height.min(stats.min_height);
        max_height = max_height.max(stats.max_height);
        total_build_ms += stats.build_ms as f64;

        if aligner.align_in_place(probe, Quat::IDENTITY, &mut probe_rotation, &world) {
            aligned_frames += 1;
        }

        let done = frame + 1;
        if done % 30 == 0 || done == frames {
            let tilt = (probe_rotation * Vec3::Y).angle_between(Vec3::Y).to_degrees();
            log::info!(
                "[{}/{}] t={:.2}s heights [{:.3}, {:.3}] build {:.2}ms probe tilt {:.1}°",
                done, frames, t, stats.min_height, stats.max_height, stats.build_ms, tilt
            );
        }
    }

    let elapsed = start.elapsed();
    let fps = timer.fps_stats();

    println!();
    println!("Ran {} frames in {:.2}s ({:.1} frames/sec)",
        frames, elapsed.as_secs_f64(), frames as f64 / elapsed.as_secs_f64().max(1e-9));
    println!("Mesh:     {} vertices, {} triangles, {:.1} KB vertex data",
        sink.vertices().len(), sink.indices().len() / 3,
        sink.vertex_bytes().len() as f64 / 1024.0);
    println!("Heights:  [{:.3}, {:.3}]", min_height, max_height);
    println!("Probe:    aligned on {} of {} frames", aligned_frames, frames);

    if let Some(path) = &snapshot {
        surface::save_color_snapshot(driver.mesh(), driver.grid_params(), path)
            .expect("Failed to write snapshot");
        println!("Snapshot: {}", path.display());
    }

    if let Some(path) = &summary {
        let report = json!({
            "config": config,
            "frames": frames,
            "final_time": clock.seconds(),
            "elapsed_secs": elapsed.as_secs_f64(),
            "avg_build_ms": if frames > 0 { total_build_ms / frames as f64 } else { 0.0 },
            "height_range": [min_height, max_height],
            "vertices": sink.vertices().len(),
            "triangles": sink.indices().len() / 3,
            "aligned_frames": aligned_frames,
            "fps": fps,
        });
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create summary directory");
        }
        std::fs::write(path, serde_json::to_string_pretty(&report).expect("summary serializes"))
            .expect("Failed to write summary");
        println!("Summary:  {}", path.display());
    }
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u64_arg(args: &[String], flag: &str) -> Option<u64> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
