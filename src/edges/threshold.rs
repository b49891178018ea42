//! Double thresholding of suppressed magnitudes.
//!
//! `value > high` is strong, `value < low` is background, anything else is a
//! candidate. `low > high` is accepted: the candidate band is then empty and
//! values in `[high+1, low-1]` become strong.
use super::label::EdgeLabel;
use crate::image::ImageViewMut;
use crate::volume::Volume;
use log::debug;

#[inline]
pub fn classify(value: u8, low: i32, high: i32) -> EdgeLabel {
    let value = i32::from(value);
    if value > high {
        EdgeLabel::Strong
    } else if value < low {
        EdgeLabel::Background
    } else {
        EdgeLabel::Candidate
    }
}

/// Relabel every voxel of every interior slice in place.
pub fn double_threshold(volume: &mut Volume<u8>, low: i32, high: i32) {
    if low > high {
        debug!("double_threshold low={} > high={}, candidate band is empty", low, high);
    }
    for index in volume.interior_slices() {
        let slice = volume.slice_mut(index);
        for y in 0..slice.h {
            for px in slice.row_mut(y) {
                *px = classify(*px, low, high).as_u8();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::VoxelCoordinate;

    #[test]
    fn comparisons_are_strict_on_both_ends() {
        assert_eq!(classify(151, 50, 150), EdgeLabel::Strong);
        assert_eq!(classify(150, 50, 150), EdgeLabel::Candidate);
        assert_eq!(classify(50, 50, 150), EdgeLabel::Candidate);
        assert_eq!(classify(49, 50, 150), EdgeLabel::Background);
    }

    #[test]
    fn inverted_thresholds_do_not_panic() {
        // low=100 > high=50
        assert_eq!(classify(75, 100, 50), EdgeLabel::Strong);
        assert_eq!(classify(50, 100, 50), EdgeLabel::Background);
        assert_eq!(classify(51, 100, 50), EdgeLabel::Strong);
        assert_eq!(classify(200, 100, 50), EdgeLabel::Strong);
        assert_eq!(classify(10, 100, 50), EdgeLabel::Background);

        let mut volume = Volume::filled(3, 2, 2, 75u8);
        double_threshold(&mut volume, 100, 50);
        assert!(volume.slice(1).data.iter().all(|&v| v == 255));
        assert_eq!(volume.count(|v| v == 127), 0);
    }

    #[test]
    fn boundary_slices_are_untouched() {
        let mut volume = Volume::filled(4, 3, 3, 90u8);
        volume.set(VoxelCoordinate::new(2, 0, 0), 10);
        volume.set(VoxelCoordinate::new(2, 2, 2), 250);
        double_threshold(&mut volume, 50, 150);
        assert!(volume.slice(0).data.iter().all(|&v| v == 90));
        assert!(volume.slice(3).data.iter().all(|&v| v == 90));
        assert_eq!(volume.get(VoxelCoordinate::new(1, 1, 1)), 127);
        assert_eq!(volume.get(VoxelCoordinate::new(2, 0, 0)), 0);
        assert_eq!(volume.get(VoxelCoordinate::new(2, 2, 2)), 255);
    }

    #[test]
    fn raising_high_never_adds_strong_voxels() {
        let mut base = Volume::filled(3, 4, 4, 0u8);
        for (i, v) in base.slice_mut(1).data.iter_mut().enumerate() {
            *v = (i * 17) as u8;
        }
        let mut previous = usize::MAX;
        for high in [0, 60, 120, 180, 240, 255] {
            let mut volume = base.clone();
            double_threshold(&mut volume, 30, high);
            let strong = volume.count(|v| v == 255);
            assert!(strong <= previous, "high={high} strong={strong}");
            previous = strong;
        }
    }
}
