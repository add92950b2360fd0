//! Principal axis of a boundary vertex cloud via 2-D PCA.

use nalgebra::{Matrix2, SymmetricEigen};

use super::polygon::Polygon;

/// Mean point plus eigenpairs of the vertex covariance, major axis first.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PrincipalAxes {
    pub mean: [f64; 2],
    /// Unit eigenvectors, `[major, minor]`.
    pub axes: [[f64; 2]; 2],
    /// Eigenvalues matching `axes`, decreasing.
    pub eigenvalues: [f64; 2],
}

/// PCA over the polygon vertices. `None` for fewer than two vertices.
pub fn principal_axes(polygon: &Polygon) -> Option<PrincipalAxes> {
    let n = polygon.len();
    if n < 2 {
        return None;
    }
    let inv_n = 1.0 / n as f64;
    let mut mean = [0.0f64; 2];
    for p in polygon.points() {
        mean[0] += p[0];
        mean[1] += p[1];
    }
    mean[0] *= inv_n;
    mean[1] *= inv_n;

    let mut cxx = 0.0;
    let mut cxy = 0.0;
    let mut cyy = 0.0;
    for p in polygon.points() {
        let dx = p[0] - mean[0];
        let dy = p[1] - mean[1];
        cxx += dx * dx;
        cxy += dx * dy;
        cyy += dy * dy;
    }
    cxx *= inv_n;
    cxy *= inv_n;
    cyy *= inv_n;

    let eig = SymmetricEigen::new(Matrix2::new(cxx, cxy, cxy, cyy));
    let (major, minor) = if eig.eigenvalues[0] >= eig.eigenvalues[1] {
        (0, 1)
    } else {
        (1, 0)
    };
    let col = |i: usize| {
        let v = eig.eigenvectors.column(i);
        [v[0], v[1]]
    };
    Some(PrincipalAxes {
        mean,
        axes: [col(major), col(minor)],
        eigenvalues: [eig.eigenvalues[major], eig.eigenvalues[minor]],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_elongated_cloud_major_axis() {
        // Points spread along x with slight y jitter.
        let pts: Vec<[f64; 2]> = (0..40)
            .map(|i| [i as f64, if i % 2 == 0 { 0.5 } else { -0.5 }])
            .collect();
        let axes = principal_axes(&Polygon::new(pts)).unwrap();
        assert_relative_eq!(axes.mean[0], 19.5, epsilon = 1e-9);
        assert!(axes.eigenvalues[0] > axes.eigenvalues[1]);
        assert!(
            axes.axes[0][0].abs() > 0.99,
            "major axis should be near-horizontal, got {:?}",
            axes.axes[0]
        );
        assert!(axes.axes[1][1].abs() > 0.99);
        // Unit length.
        let n0 = (axes.axes[0][0].powi(2) + axes.axes[0][1].powi(2)).sqrt();
        assert_relative_eq!(n0, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_cloud() {
        assert!(principal_axes(&Polygon::new(vec![])).is_none());
        assert!(principal_axes(&Polygon::new(vec![[1.0, 1.0]])).is_none());
    }
}
