//! Synthetic neighbour slices extrapolated along the stack.
//!
//! For slice `i` and coefficient `c`:
//!
//! ```text
//! prev      = s[i] - c  * (s[i] - s[i-1])
//! prev_prev = s[i] - 2c * (s[i] - s[i-1])
//! next      = s[i] + c  * (s[i+1] - s[i])
//! next_next = s[i] + 2c * (s[i+1] - s[i])
//! ```
//!
//! The first slice has no predecessor and the last no successor; the slice
//! itself stands in for the missing side. Results are rounded half to even
//! and saturate at the `i32` range, which large coefficients can leave.
use crate::image::Slice;
use crate::volume::Volume;

/// The four extrapolated slices around one slice of the stack.
#[derive(Clone, Debug)]
pub struct NeighborSlices {
    pub prev_prev: Slice<i32>,
    pub prev: Slice<i32>,
    pub next: Slice<i32>,
    pub next_next: Slice<i32>,
}

pub fn extrapolate_neighbors(volume: &Volume<i32>, index: usize, coef: f64) -> NeighborSlices {
    let this = volume.slice(index);
    let (prev, prev_prev) = match index.checked_sub(1) {
        Some(before) => {
            let lower = volume.slice(before);
            (toward(this, lower, coef), toward(this, lower, 2.0 * coef))
        }
        None => (this.clone(), this.clone()),
    };
    let (next, next_next) = if index + 1 < volume.depth() {
        let upper = volume.slice(index + 1);
        (toward(this, upper, coef), toward(this, upper, 2.0 * coef))
    } else {
        (this.clone(), this.clone())
    };
    NeighborSlices {
        prev_prev,
        prev,
        next,
        next_next,
    }
}

/// `current - weight * (current - neighbor)`, rounded per pixel and
/// saturated to `i32`.
fn toward(current: &Slice<i32>, neighbor: &Slice<i32>, weight: f64) -> Slice<i32> {
    let data = current
        .data
        .iter()
        .zip(neighbor.data.iter())
        .map(|(&c, &n)| {
            let c = f64::from(c);
            (c - weight * (c - f64::from(n)))
                .round_ties_even()
                .clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
        })
        .collect();
    Slice {
        w: current.w,
        h: current.h,
        stride: current.w,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(values: &[i32]) -> Volume<i32> {
        Volume::from_slices(values.iter().map(|&v| Slice::filled(2, 2, v)).collect())
            .expect("uniform stack")
    }

    #[test]
    fn unit_coefficient_reaches_the_real_neighbours() {
        let volume = stack(&[10, 20, 60]);
        let n = extrapolate_neighbors(&volume, 1, 1.0);
        assert_eq!(n.prev.data, vec![10; 4]);
        assert_eq!(n.prev_prev.data, vec![0; 4]);
        assert_eq!(n.next.data, vec![60; 4]);
        assert_eq!(n.next_next.data, vec![100; 4]);
    }

    #[test]
    fn fractional_coefficient_rounds() {
        let volume = stack(&[10, 20, 60]);
        let n = extrapolate_neighbors(&volume, 1, 0.25);
        assert_eq!(n.prev.data[0], 18); // 20 - 2.5
        assert_eq!(n.prev_prev.data[0], 15);
        assert_eq!(n.next.data[0], 30);
        assert_eq!(n.next_next.data[0], 40);
    }

    #[test]
    fn half_way_values_round_to_even() {
        let volume = stack(&[17, 16, 19]);
        let n = extrapolate_neighbors(&volume, 1, 0.5);
        assert_eq!(n.prev.data[0], 16); // 16.5
        assert_eq!(n.next.data[0], 18); // 17.5
    }

    #[test]
    fn large_coefficient_saturates_instead_of_wrapping() {
        let valley = extrapolate_neighbors(&stack(&[65535, 0, 65535]), 1, 1e6);
        assert_eq!(valley.prev.data[0], i32::MAX);
        assert_eq!(valley.next_next.data[0], i32::MAX);
        let peak = extrapolate_neighbors(&stack(&[0, 65535, 0]), 1, 1e6);
        assert_eq!(peak.prev.data[0], i32::MIN);
    }

    #[test]
    fn zero_coefficient_is_the_slice_itself() {
        let volume = stack(&[0, 100, 255]);
        let n = extrapolate_neighbors(&volume, 1, 0.0);
        assert_eq!(n.prev.data, vec![100; 4]);
        assert_eq!(n.next_next.data, vec![100; 4]);
    }

    #[test]
    fn tiny_coefficient_keeps_the_slice() {
        let volume = stack(&[0, 100, 255]);
        let n = extrapolate_neighbors(&volume, 1, 1e-5);
        for s in [&n.prev_prev, &n.prev, &n.next, &n.next_next] {
            assert_eq!(s.data, vec![100; 4]);
        }
    }

    #[test]
    fn boundary_slices_reuse_themselves() {
        let volume = stack(&[5, 50, 500]);
        let first = extrapolate_neighbors(&volume, 0, 1.0);
        assert_eq!(first.prev.data, vec![5; 4]);
        assert_eq!(first.prev_prev.data, vec![5; 4]);
        assert_eq!(first.next.data, vec![50; 4]);
        let last = extrapolate_neighbors(&volume, 2, 1.0);
        assert_eq!(last.next.data, vec![500; 4]);
        assert_eq!(last.next_next.data, vec![500; 4]);
        assert_eq!(last.prev.data, vec![50; 4]);
    }
}
