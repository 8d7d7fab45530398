use super::error::DemError;
use super::geometry::PlateGeometry;

/// A crop window in raster coordinates, `(x, y)` being the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Fits the rectangle inside the plate, preserving size where possible.
    ///
    /// Per axis: a size larger than the plate is shrunk to the full extent
    /// with the origin reset to 0; otherwise an overflowing window is slid
    /// back so it ends at the plate edge. An origin beyond the plate is not
    /// corrected at all and is reported as an error instead (see DESIGN.md
    /// on this asymmetry).
    pub fn clamped(mut self, geometry: &PlateGeometry) -> Result<Rect, DemError> {
        if self.x > geometry.cols || self.y > geometry.rows {
            return Err(DemError::OriginOutOfBounds {
                x: self.x,
                y: self.y,
            });
        }

        if self.width > geometry.cols {
            self.width = geometry.cols;
            self.x = 0;
        } else if self.x + self.width > geometry.cols {
            self.x = geometry.cols - self.width;
        }

        if self.height > geometry.rows {
            self.height = geometry.rows;
            self.y = 0;
        } else if self.y + self.height > geometry.rows {
            self.y = geometry.rows - self.height;
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn plate(cols: u32, rows: u32) -> PlateGeometry {
        PlateGeometry {
            rows,
            cols,
            origin_lon: 0.0,
            origin_lat: 0.0,
            cell_width: 1.0,
            cell_height: 1.0,
        }
    }

    #[rstest]
    // fully inside: untouched
    #[case(Rect::new(2, 3, 4, 5), Rect::new(2, 3, 4, 5))]
    // wider than the plate: full width, origin reset
    #[case(Rect::new(5, 0, 100, 4), Rect::new(0, 0, 10, 4))]
    // taller than the plate: full height, origin reset
    #[case(Rect::new(0, 5, 4, 100), Rect::new(0, 0, 4, 20))]
    // overflows right edge: slid left, size kept
    #[case(Rect::new(8, 0, 4, 4), Rect::new(6, 0, 4, 4))]
    // overflows bottom edge: slid up, size kept
    #[case(Rect::new(0, 18, 4, 4), Rect::new(0, 16, 4, 4))]
    // axes clamp independently
    #[case(Rect::new(9, 19, 3, 3), Rect::new(7, 17, 3, 3))]
    #[case(Rect::new(2, 2, 100, 100), Rect::new(0, 0, 10, 20))]
    fn clamp_policy(#[case] input: Rect, #[case] expected: Rect) {
        let geo = plate(10, 20);
        assert_eq!(input.clamped(&geo).unwrap(), expected);
    }

    #[rstest]
    #[case(Rect::new(11, 0, 2, 2))]
    #[case(Rect::new(0, 21, 2, 2))]
    fn origin_outside_plate_is_an_error(#[case] input: Rect) {
        let geo = plate(10, 20);
        assert!(matches!(
            input.clamped(&geo),
            Err(DemError::OriginOutOfBounds { .. })
        ));
    }

    #[test]
    fn clamped_rect_always_fits() {
        let geo = plate(10, 20);
        for x in 0..=10 {
            for w in 1..=10u32 {
                let rect = Rect::new(x, 0, w, 1).clamped(&geo).unwrap();
                assert_eq!(rect.width, w.min(10));
                assert!(rect.x + rect.width <= 10);
            }
        }
    }
}
