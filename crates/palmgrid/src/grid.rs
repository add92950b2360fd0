//! Row-major scalar grids, the basic per-frame sample container.

use serde::{Deserialize, Serialize};

/// Errors from grid construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Backing buffer length does not match `width * height`.
    LengthMismatch { expected: usize, got: usize },
    /// Two grids that must share dimensions do not.
    DimensionMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::LengthMismatch { expected, got } => {
                write!(f, "grid buffer length {got}, expected {expected}")
            }
            GridError::DimensionMismatch { expected, got } => write!(
                f,
                "grid dimensions {}x{}, expected {}x{}",
                got.0, got.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for GridError {}

/// A width×height grid of `f32` samples, row-major.
///
/// Used for distance maps, return-strength maps, foreground maps and the
/// motion heat map. Immutable once captured into a frame; scratch copies are
/// made where a stage needs to write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarGrid {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl ScalarGrid {
    /// All-zero grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Result<Self, GridError> {
        if data.len() != width * height {
            return Err(GridError::LengthMismatch {
                expected: width * height,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        self.data[y * self.width + x] = v;
    }

    pub fn fill(&mut self, v: f32) {
        self.data.fill(v);
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Sum of all samples.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Checks that `other` has the same dimensions.
    pub fn check_same_dims(&self, other: &ScalarGrid) -> Result<(), GridError> {
        if self.dimensions() != other.dimensions() {
            return Err(GridError::DimensionMismatch {
                expected: self.dimensions(),
                got: other.dimensions(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        let mut g = ScalarGrid::new(4, 3);
        g.set(3, 2, 7.5);
        assert_eq!(g.at(3, 2), 7.5);
        assert_eq!(g.at(0, 0), 0.0);
        assert_eq!(g.sum(), 7.5);
    }

    #[test]
    fn test_from_vec_length_check() {
        assert!(ScalarGrid::from_vec(2, 2, vec![0.0; 4]).is_ok());
        let err = ScalarGrid::from_vec(2, 2, vec![0.0; 5]).unwrap_err();
        assert_eq!(
            err,
            GridError::LengthMismatch {
                expected: 4,
                got: 5
            }
        );
    }
}
