use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box of the skeleton domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Lower corner, one value per dimension
    pub min: Vec<f64>,
    /// Upper corner, one value per dimension
    pub max: Vec<f64>,
}

impl BoundingBox {
    /// Create a bounding box from its two corners
    pub fn new(min: Vec<f64>, max: Vec<f64>) -> Self {
        Self { min, max }
    }

    /// Number of dimensions
    pub fn ndims(&self) -> usize {
        self.min.len()
    }

    /// Edge lengths (`max - min`) per dimension
    pub fn extent(&self) -> Vec<f64> {
        self.min.iter().zip(&self.max).map(|(lo, hi)| hi - lo).collect()
    }

    /// Whether `point` lies inside the box, boundaries included.
    ///
    /// Corners are narrowed to `f32` so that a sample written at a corner
    /// value compares equal to it.
    pub fn contains(&self, point: &[f32]) -> bool {
        point.len() == self.ndims()
            && point
                .iter()
                .zip(self.min.iter().zip(&self.max))
                .all(|(&p, (&lo, &hi))| ((lo as f32)..=(hi as f32)).contains(&p))
    }

    /// Parse a `[v0,v1,...]` corner token
    pub(crate) fn parse_corner(token: &str) -> Option<Vec<f64>> {
        let inner = token.trim().strip_prefix('[')?.strip_suffix(']')?;
        inner
            .split(',')
            .map(|v| v.trim().parse::<f64>().ok())
            .collect()
    }
}
