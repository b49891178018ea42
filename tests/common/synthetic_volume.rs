use canny3d::{Volume, VoxelCoordinate};

/// Every voxel set to `value`.
pub fn uniform_u8(depth: usize, size: usize, value: u8) -> Volume<u8> {
    Volume::filled(depth, size, size, value)
}

/// Dark volume with one bright voxel at `(slice, row, col)`.
pub fn single_bright_voxel(depth: usize, size: usize, at: VoxelCoordinate, value: u8) -> Volume<u8> {
    assert!(at.slice < depth && at.row < size && at.col < size, "voxel outside volume");
    let mut volume = Volume::filled(depth, size, size, 0u8);
    volume.set(at, value);
    volume
}

/// Axis-aligned cube of `value` spanning `lo..hi` on every axis, `background` elsewhere.
pub fn bright_cube(
    depth: usize,
    size: usize,
    lo: usize,
    hi: usize,
    background: u8,
    value: u8,
) -> Volume<u8> {
    assert!(lo < hi && hi <= size && hi <= depth, "cube outside volume");
    let mut volume = Volume::filled(depth, size, size, background);
    for slice in lo..hi {
        for row in lo..hi {
            for col in lo..hi {
                volume.set(VoxelCoordinate::new(slice, row, col), value);
            }
        }
    }
    volume
}
