//! Discretised 3D gradient direction.
//!
//! A gradient is mapped to the neighbour offset `(dx, dy, dz) ∈ {-1,0,1}³`
//! (excluding the origin) with the largest absolute cosine similarity. Ties
//! resolve to the first candidate in ascending `(dx, dy, dz)` order, so
//! `(g, g, g)` yields `(-1, -1, -1)`.
use nalgebra::Vector3;
use serde::Serialize;

/// One of the 26 neighbour offsets; `dx` runs along columns, `dy` along rows
/// and `dz` along the slice stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct DirectionVector {
    pub dx: i8,
    pub dy: i8,
    pub dz: i8,
}

impl DirectionVector {
    /// Candidates in enumeration order: `dx` outermost, `dz` innermost.
    pub const ALL: [DirectionVector; 26] = enumerate_directions();

    pub const fn new(dx: i8, dy: i8, dz: i8) -> Self {
        Self { dx, dy, dz }
    }

    pub fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(f64::from(self.dx), f64::from(self.dy), f64::from(self.dz))
    }
}

const fn enumerate_directions() -> [DirectionVector; 26] {
    let mut out = [DirectionVector::new(0, 0, 0); 26];
    let mut n = 0;
    let mut dx = -1i8;
    while dx <= 1 {
        let mut dy = -1i8;
        while dy <= 1 {
            let mut dz = -1i8;
            while dz <= 1 {
                if !(dx == 0 && dy == 0 && dz == 0) {
                    out[n] = DirectionVector::new(dx, dy, dz);
                    n += 1;
                }
                dz += 1;
            }
            dy += 1;
        }
        dx += 1;
    }
    out
}

/// Nearest neighbour direction for `(Gx, Gy, Gz)`; `None` for a zero gradient.
pub fn quantize_direction(gradient: &Vector3<f64>) -> Option<DirectionVector> {
    let g_norm = gradient.norm();
    if g_norm == 0.0 {
        return None;
    }
    let mut best = None;
    let mut best_cos = 0.0f64;
    for candidate in DirectionVector::ALL {
        let d = candidate.as_vector();
        let cos = (d.dot(gradient) / (d.norm() * g_norm)).abs();
        if cos > best_cos {
            best_cos = cos;
            best = Some(candidate);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumeration_is_ascending_without_origin() {
        let all = DirectionVector::ALL;
        assert_eq!(all[0], DirectionVector::new(-1, -1, -1));
        assert_eq!(all[1], DirectionVector::new(-1, -1, 0));
        assert_eq!(all[12], DirectionVector::new(0, 0, -1));
        assert_eq!(all[13], DirectionVector::new(0, 0, 1));
        assert_eq!(all[25], DirectionVector::new(1, 1, 1));
        assert!(all.iter().all(|d| (d.dx, d.dy, d.dz) != (0, 0, 0)));
    }

    #[test]
    fn equal_components_resolve_to_first_diagonal() {
        let d = quantize_direction(&Vector3::new(7.0, 7.0, 7.0));
        assert_eq!(d, Some(DirectionVector::new(-1, -1, -1)));
        let d = quantize_direction(&Vector3::new(-3.0, -3.0, -3.0));
        assert_eq!(d, Some(DirectionVector::new(-1, -1, -1)));
    }

    #[test]
    fn axis_gradients_pick_the_negative_axis_first() {
        assert_eq!(
            quantize_direction(&Vector3::new(10.0, 0.0, 0.0)),
            Some(DirectionVector::new(-1, 0, 0))
        );
        assert_eq!(
            quantize_direction(&Vector3::new(0.0, -4.0, 0.0)),
            Some(DirectionVector::new(0, -1, 0))
        );
        assert_eq!(
            quantize_direction(&Vector3::new(0.0, 0.0, 2.0)),
            Some(DirectionVector::new(0, 0, -1))
        );
    }

    #[test]
    fn off_axis_gradient_uses_cosine_similarity() {
        // 10° from +x in the xy-plane is closer to the axis than to the diagonal
        let g = Vector3::new(10f64.to_radians().cos(), 10f64.to_radians().sin(), 0.0);
        assert_eq!(quantize_direction(&g), Some(DirectionVector::new(-1, 0, 0)));
        let g = Vector3::new(1.0, 0.9, 0.0);
        assert_eq!(quantize_direction(&g), Some(DirectionVector::new(-1, -1, 0)));
    }

    #[test]
    fn zero_gradient_has_no_direction() {
        assert_eq!(quantize_direction(&Vector3::zeros()), None);
    }
}
