//! Fixed 3×3 color matrices.
//!
//! Matrices are glam `DMat3` values built from row-major literals with
//! [`from_rows`], so the constants below read the same way they are printed
//! in colorimetry references. glam stores columns; `DMat3 * DVec3` is the
//! usual matrix-vector product.

use glam::{DMat3, DVec3};

/// Builds a `DMat3` from rows.
pub const fn from_rows(rows: [[f64; 3]; 3]) -> DMat3 {
    DMat3::from_cols(
        DVec3::new(rows[0][0], rows[1][0], rows[2][0]),
        DVec3::new(rows[0][1], rows[1][1], rows[2][1]),
        DVec3::new(rows[0][2], rows[1][2], rows[2][2]),
    )
}

/// Returns the rows of `m`.
pub fn to_rows(m: &DMat3) -> [[f64; 3]; 3] {
    m.transpose().to_cols_array_2d()
}

/// Linear sRGB (D65) to XYZ with white Y = 1.
pub const SRGB_TO_XYZ: DMat3 = from_rows([
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
]);

/// XYZ with white Y = 1 to linear sRGB (D65).
pub const XYZ_TO_SRGB: DMat3 = from_rows([
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
]);

/// XYZ to Bradford cone-response (LMS) space.
pub const BRADFORD: DMat3 = from_rows([
    [0.8951, 0.2664, -0.1614],
    [-0.7502, 1.7135, 0.0367],
    [0.0389, -0.0685, 1.0296],
]);

/// Bradford LMS back to XYZ.
pub const BRADFORD_INV: DMat3 = from_rows([
    [0.9869929, -0.1470543, 0.1599627],
    [0.4323053, 0.5183603, 0.0492912],
    [-0.0085287, 0.0400428, 0.9684867],
]);

/// Inverts `m`, or `None` when it is singular or non-finite.
pub fn checked_inverse(m: &DMat3) -> Option<DMat3> {
    let det = m.determinant();
    if !det.is_finite() || det.abs() < 1e-12 {
        return None;
    }
    Some(m.inverse())
}

/// Rank-one matrix `col * rowᵀ`: maps `v` to `col * dot(row, v)`.
///
/// Narrow-band light sources are modelled this way: every surface reflects
/// the same spectral line, so only its brightness varies.
pub fn outer(col: [f64; 3], row: [f64; 3]) -> DMat3 {
    from_rows([
        [col[0] * row[0], col[0] * row[1], col[0] * row[2]],
        [col[1] * row[0], col[1] * row[1], col[1] * row[2]],
        [col[2] * row[0], col[2] * row[1], col[2] * row[2]],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_identity(m: DMat3, tol: f64) {
        let rows = to_rows(&m);
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (v - expected).abs() < tol,
                    "entry ({i}, {j}) = {v}, expected {expected}"
                );
            }
        }
    }

    #[test]
    fn from_rows_is_row_major() {
        let m = from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let v = m * DVec3::new(1.0, 0.0, 0.0);
        assert_eq!(v, DVec3::new(1.0, 4.0, 7.0));
        assert_eq!(to_rows(&m)[1], [4.0, 5.0, 6.0]);
    }

    #[test]
    fn srgb_matrices_are_inverses() {
        assert_identity(SRGB_TO_XYZ * XYZ_TO_SRGB, 1e-6);
    }

    #[test]
    fn bradford_matrices_are_inverses() {
        assert_identity(BRADFORD * BRADFORD_INV, 1e-6);
    }

    #[test]
    fn checked_inverse_matches_published_inverse() {
        let inv = checked_inverse(&BRADFORD).unwrap();
        let published = to_rows(&BRADFORD_INV);
        for (row, expected) in to_rows(&inv).iter().zip(published.iter()) {
            for (a, b) in row.iter().zip(expected.iter()) {
                assert!((a - b).abs() < 1e-6, "{a} vs {b}");
            }
        }
    }

    #[test]
    fn checked_inverse_rejects_singular() {
        let singular = outer([1.0, 2.0, 3.0], [0.5, 0.5, 0.5]);
        assert!(checked_inverse(&singular).is_none());
    }

    #[test]
    fn outer_scales_column_by_dot_product() {
        let m = outer([1.0, 0.5, 0.0], [2.0, 0.0, 1.0]);
        let v = m * DVec3::new(1.0, 9.0, 3.0);
        assert_eq!(v, DVec3::new(5.0, 2.5, 0.0));
    }
}
