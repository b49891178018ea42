//! Edge tracking by hysteresis in 3D.
//!
//! Strong voxels seed a breadth-first growth over their 26-connected
//! neighbourhood; every candidate reached becomes strong. Growth is confined
//! to interior slices but uses the full row/column extent. Afterwards every
//! interior voxel that is not strong is cleared to background.
//!
//! The set of promoted voxels is the reachability closure of the strong
//! seeds, so the result does not depend on scan or queue order.
use super::label::EdgeLabel;
use crate::volume::{Volume, VoxelCoordinate};
use std::collections::VecDeque;

const STRONG: u8 = EdgeLabel::Strong.as_u8();
const CANDIDATE: u8 = EdgeLabel::Candidate.as_u8();
const BACKGROUND: u8 = EdgeLabel::Background.as_u8();

/// Promote connected candidates and clear the rest, in place.
pub fn track_edges(volume: &mut Volume<u8>) {
    let interior = volume.interior_slices();
    let (_, h, w) = volume.dims();
    let mut queue = VecDeque::new();

    for slice in interior.clone() {
        for row in 0..h {
            for col in 0..w {
                let seed = VoxelCoordinate::new(slice, row, col);
                if volume.get(seed) == STRONG {
                    grow_region(volume, seed, &mut queue);
                }
            }
        }
    }

    for slice in interior {
        for px in volume.slice_mut(slice).data.iter_mut() {
            if *px != STRONG {
                *px = BACKGROUND;
            }
        }
    }
}

/// Breadth-first growth from one strong seed. Only the candidate → strong
/// transition enqueues, so no voxel is visited twice.
fn grow_region(
    volume: &mut Volume<u8>,
    seed: VoxelCoordinate,
    queue: &mut VecDeque<VoxelCoordinate>,
) {
    let interior = volume.interior_slices();
    let (_, h, w) = volume.dims();
    queue.clear();
    queue.push_back(seed);

    while let Some(at) = queue.pop_front() {
        for ds in -1isize..=1 {
            for dr in -1isize..=1 {
                for dc in -1isize..=1 {
                    if ds == 0 && dr == 0 && dc == 0 {
                        continue;
                    }
                    let (s, r, c) = (
                        at.slice as isize + ds,
                        at.row as isize + dr,
                        at.col as isize + dc,
                    );
                    if s < interior.start as isize
                        || s >= interior.end as isize
                        || r < 0
                        || c < 0
                        || r >= h as isize
                        || c >= w as isize
                    {
                        continue;
                    }
                    let next = VoxelCoordinate::new(s as usize, r as usize, c as usize);
                    if volume.get(next) == CANDIDATE {
                        volume.set(next, STRONG);
                        queue.push_back(next);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(slice: usize, row: usize, col: usize) -> VoxelCoordinate {
        VoxelCoordinate::new(slice, row, col)
    }

    #[test]
    fn candidates_connected_across_slices_are_promoted() {
        let mut volume = Volume::filled(5, 4, 4, BACKGROUND);
        volume.set(at(1, 0, 0), STRONG);
        // diagonal chain through slices 2 and 3
        volume.set(at(2, 1, 1), CANDIDATE);
        volume.set(at(3, 2, 2), CANDIDATE);
        // isolated candidate
        volume.set(at(3, 0, 3), CANDIDATE);
        track_edges(&mut volume);
        assert_eq!(volume.get(at(2, 1, 1)), STRONG);
        assert_eq!(volume.get(at(3, 2, 2)), STRONG);
        assert_eq!(volume.get(at(3, 0, 3)), BACKGROUND);
        assert_eq!(volume.count(|v| v == CANDIDATE), 0);
        assert_eq!(volume.count(|v| v == STRONG), 3);
    }

    #[test]
    fn growth_does_not_enter_boundary_slices() {
        let mut volume = Volume::filled(3, 3, 3, BACKGROUND);
        volume.set(at(1, 1, 1), STRONG);
        volume.set(at(0, 1, 1), CANDIDATE);
        volume.set(at(2, 1, 2), CANDIDATE);
        volume.set(at(1, 2, 2), CANDIDATE);
        track_edges(&mut volume);
        assert_eq!(volume.get(at(0, 1, 1)), CANDIDATE);
        assert_eq!(volume.get(at(2, 1, 2)), CANDIDATE);
        assert_eq!(volume.get(at(1, 2, 2)), STRONG);
    }

    #[test]
    fn candidates_without_strong_seed_are_dropped() {
        let mut volume = Volume::filled(3, 3, 3, CANDIDATE);
        track_edges(&mut volume);
        assert!(volume.slice(1).data.iter().all(|&v| v == BACKGROUND));
        assert!(volume.slice(0).data.iter().all(|&v| v == CANDIDATE));
    }

    #[test]
    fn strong_seed_floods_its_component() {
        let mut volume = Volume::filled(4, 5, 5, CANDIDATE);
        // wall of background splits slice interior at col 2
        for s in 1..3 {
            for r in 0..5 {
                volume.set(at(s, r, 2), BACKGROUND);
            }
        }
        volume.set(at(2, 4, 0), STRONG);
        track_edges(&mut volume);
        for s in 1..3 {
            for r in 0..5 {
                assert_eq!(volume.get(at(s, r, 0)), STRONG);
                assert_eq!(volume.get(at(s, r, 1)), STRONG);
                assert_eq!(volume.get(at(s, r, 3)), BACKGROUND);
                assert_eq!(volume.get(at(s, r, 4)), BACKGROUND);
            }
        }
    }

    #[test]
    fn finalized_volume_is_a_fixed_point() {
        let mut volume = Volume::filled(3, 3, 3, BACKGROUND);
        volume.set(at(1, 0, 0), STRONG);
        volume.set(at(1, 2, 1), STRONG);
        let before = volume.clone();
        track_edges(&mut volume);
        assert_eq!(volume, before);
    }
}
