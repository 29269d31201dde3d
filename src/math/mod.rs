//! Mathematical utilities for FEA calculations

pub mod iterative;

use nalgebra::{DMatrix, DVector, Matrix2, Matrix6, SMatrix};

use crate::error::{TrussError, TrussResult};

pub type Mat = DMatrix<f64>;
pub type Vector = DVector<f64>;
pub type Mat2 = Matrix2<f64>;
pub type Mat6 = Matrix6<f64>;

/// 2x6 transformation from global end translations to local axial DOFs
pub type Mat2x6 = SMatrix<f64, 2, 6>;

/// Elements shorter than this are treated as having coincident nodes
pub const MIN_LENGTH: f64 = 1e-10;

/// Length and direction cosines of the axis from `i_node` to `j_node`
///
/// # Errors
/// `InvalidGeometry` if the two points coincide.
pub fn direction_cosines(i_node: &[f64; 3], j_node: &[f64; 3]) -> TrussResult<(f64, [f64; 3])> {
    let dx = j_node[0] - i_node[0];
    let dy = j_node[1] - i_node[1];
    let dz = j_node[2] - i_node[2];

    let length = (dx * dx + dy * dy + dz * dz).sqrt();

    if !(length >= MIN_LENGTH) {
        return Err(TrussError::InvalidGeometry(format!(
            "element has zero or near-zero length: {:e}",
            length
        )));
    }

    Ok((length, [dx / length, dy / length, dz / length]))
}

/// Transformation matrix for a two-node axial element
///
/// ```text
/// T = [l  m  n  0  0  0]
///     [0  0  0  l  m  n]
/// ```
pub fn bar_transformation_matrix(cosines: &[f64; 3]) -> Mat2x6 {
    let [l, m, n] = *cosines;
    let mut t = Mat2x6::zeros();
    t[(0, 0)] = l;
    t[(0, 1)] = m;
    t[(0, 2)] = n;
    t[(1, 3)] = l;
    t[(1, 4)] = m;
    t[(1, 5)] = n;
    t
}

/// Local axial stiffness `EA/L * [[1, -1], [-1, 1]]`
pub fn bar_local_stiffness(e: f64, a: f64, length: f64) -> Mat2 {
    let k = a * e / length;
    Mat2::new(k, -k, -k, k)
}

/// Global-axis stiffness of a bar between two points: `T^T * k_local * T`
///
/// Rows and columns are ordered (x1, y1, z1, x2, y2, z2).
pub fn bar_global_stiffness(
    e: f64,
    a: f64,
    i_node: &[f64; 3],
    j_node: &[f64; 3],
) -> TrussResult<Mat6> {
    let (length, cosines) = direction_cosines(i_node, j_node)?;
    let k_local = bar_local_stiffness(e, a, length);
    let t = bar_transformation_matrix(&cosines);
    Ok(t.transpose() * k_local * t)
}

/// Largest absolute difference between `m` and its transpose
pub fn asymmetry(m: &Mat) -> f64 {
    let mut worst = 0.0_f64;
    for i in 0..m.nrows() {
        for j in (i + 1)..m.ncols() {
            worst = worst.max((m[(i, j)] - m[(j, i)]).abs());
        }
    }
    worst
}
