use canny3d::prelude::*;

fn main() {
    // Demo: a bright cube in a dark 9-slice volume, run with default blur
    let (depth, h, w) = (9usize, 32usize, 32usize);
    let mut volume = Volume::filled(depth, h, w, 0u8);
    for slice in 2..7 {
        for row in 10..22 {
            for col in 10..22 {
                volume.set(VoxelCoordinate::new(slice, row, col), 200);
            }
        }
    }

    let detector = VolumeCannyDetector::new(CannyParams::default());
    match detector.detect_with_diagnostics(&volume) {
        Ok(report) => {
            println!(
                "edges={} per_slice={:?} total_ms={:.3}",
                report.summary.edge_voxels,
                report.summary.edges_per_slice,
                report.summary.timings.total_ms
            );
        }
        Err(err) => eprintln!("detection failed: {err}"),
    }
}
