use canny3d::config::load_config;
use canny3d::diagnostics::StageArtifacts;
use canny3d::image::io::{load_slice_stack, save_volume_u8, write_json_file};
use canny3d::{Volume, VolumeCannyDetector};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let files = config.input.resolve()?;
    let volume = load_slice_stack(&files)?;
    let (depth, height, width) = volume.dims();
    println!(
        "Loaded {} slices of {}x{} from {} files",
        depth,
        width,
        height,
        files.len()
    );

    let detector = VolumeCannyDetector::new(config.params);
    let report = detector
        .detect_with_diagnostics(&volume)
        .map_err(|e| format!("Detection failed: {e}"))?;

    let out = &config.output;
    let written = save_volume_u8(&report.edges, &out.dir, &out.prefix)?;
    println!(
        "Saved {} edge slices to {} ({} edge voxels)",
        written.len(),
        out.dir.display(),
        report.summary.edge_voxels
    );

    if out.write_intermediates {
        if let Some(artifacts) = &report.artifacts {
            save_intermediates(artifacts, &out.dir)?;
            println!("Saved intermediate stages under {}", out.dir.display());
        }
    }

    if let Some(summary_path) = &out.summary_json {
        write_json_file(summary_path, &report.summary)?;
        println!("Saved summary to {}", summary_path.display());
    }

    Ok(())
}

fn save_intermediates(artifacts: &StageArtifacts, dir: &Path) -> Result<(), String> {
    save_volume_u8(&saturate(&artifacts.blurred), &dir.join("blurred"), "blurred")?;
    save_volume_u8(&saturate(&artifacts.gradient), &dir.join("gradient"), "gradient")?;
    save_volume_u8(&artifacts.directions, &dir.join("directions"), "directions")?;
    save_volume_u8(&artifacts.suppressed, &dir.join("suppressed"), "suppressed")?;
    save_volume_u8(&artifacts.thresholded, &dir.join("thresholded"), "thresholded")?;
    Ok(())
}

fn saturate(volume: &Volume<i32>) -> Volume<u8> {
    volume.map(|v| v.clamp(0, 255) as u8)
}

fn usage() -> String {
    "Usage: volume_edges <config.json>".to_string()
}
