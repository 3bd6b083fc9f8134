use crate::error::{GunError, Result};

/// Axis-aligned box used as the lab volume the gun must stay inside.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub lower_left: [f64; 3],
    pub upper_right: [f64; 3],
    pub center: [f64; 3],
    pub width: [f64; 3],
}

impl BoundingBox {
    pub fn new(lower_left: [f64; 3], upper_right: [f64; 3]) -> Self {
        let center = [
            0.5 * (lower_left[0] + upper_right[0]),
            0.5 * (lower_left[1] + upper_right[1]),
            0.5 * (lower_left[2] + upper_right[2]),
        ];
        let width = [
            upper_right[0] - lower_left[0],
            upper_right[1] - lower_left[1],
            upper_right[2] - lower_left[2],
        ];
        BoundingBox {
            lower_left,
            upper_right,
            center,
            width,
        }
    }

    /// Box centred on the origin spanning `[-h, h]` on each axis.
    ///
    /// Half-extents must be finite and non-negative.
    pub fn symmetric(half_extents: [f64; 3]) -> Result<Self> {
        if half_extents.iter().any(|h| !h.is_finite() || *h < 0.0) {
            return Err(GunError::InvalidLab { half_extents });
        }
        let lower_left = [-half_extents[0], -half_extents[1], -half_extents[2]];
        Ok(Self::new(lower_left, half_extents))
    }

    pub fn half_extents(&self) -> [f64; 3] {
        [
            0.5 * self.width[0],
            0.5 * self.width[1],
            0.5 * self.width[2],
        ]
    }

    /// True when every component lies within the box, faces included.
    pub fn contains(&self, point: [f64; 3]) -> bool {
        (0..3).all(|i| point[i] >= self.lower_left[i] && point[i] <= self.upper_right[i])
    }
}
