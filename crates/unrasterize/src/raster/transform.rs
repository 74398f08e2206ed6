//! Affine pixel-to-geographic transform.
//!
//! Follows the GDAL convention: for pixel column `col` and row `row`,
//! `x = c + a * col + b * row` and `y = f + d * col + e * row`. Point coordinates are
//! reported at pixel centers.
use glam::{DAffine2, DVec2};

/// Affine mapping from `(row, col)` pixel indices to geographic `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoTransform {
    affine: DAffine2,
}

impl GeoTransform {
    /// Create a transform from coefficients in affine order `(a, b, c, d, e, f)`.
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self {
            affine: DAffine2::from_cols(DVec2::new(a, d), DVec2::new(b, e), DVec2::new(c, f)),
        }
    }

    /// Create a transform from a GDAL geotransform array
    /// `[origin_x, pixel_width, row_rotation, origin_y, col_rotation, pixel_height]`.
    pub fn from_gdal(gt: [f64; 6]) -> Self {
        Self::new(gt[1], gt[2], gt[0], gt[4], gt[5], gt[3])
    }

    /// North-up transform with square pixels of `pixel_size` and top-left corner `origin`.
    pub fn north_up(origin: DVec2, pixel_size: f64) -> Self {
        Self::new(pixel_size, 0.0, origin.x, 0.0, -pixel_size, origin.y)
    }

    /// Transform mapping pixel corners to their own `(col, row)` indices.
    pub fn identity() -> Self {
        Self {
            affine: DAffine2::IDENTITY,
        }
    }

    pub fn as_affine(&self) -> DAffine2 {
        self.affine
    }

    /// Coefficients in GDAL order.
    pub fn to_gdal(&self) -> [f64; 6] {
        let x = self.affine.matrix2.x_axis;
        let y = self.affine.matrix2.y_axis;
        let t = self.affine.translation;
        [t.x, x.x, y.x, t.y, x.y, y.y]
    }

    /// Geographic coordinate of the center of pixel `(row, col)`.
    #[inline]
    pub fn xy(&self, row: usize, col: usize) -> DVec2 {
        self.affine
            .transform_point2(DVec2::new(col as f64 + 0.5, row as f64 + 0.5))
    }

    /// Geographic coordinate of the upper-left corner of pixel `(row, col)`.
    #[inline]
    pub fn corner(&self, row: usize, col: usize) -> DVec2 {
        self.affine
            .transform_point2(DVec2::new(col as f64, row as f64))
    }

    /// Transform for a sub-window whose pixel `(0, 0)` is this transform's
    /// pixel `(row_off, col_off)`.
    pub fn translated(&self, row_off: usize, col_off: usize) -> Self {
        let mut affine = self.affine;
        affine.translation = self.corner(row_off, col_off);
        Self { affine }
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<DAffine2> for GeoTransform {
    fn from(affine: DAffine2) -> Self {
        Self { affine }
    }
}
