use super::error::DemError;

pub const BYTES_PER_SAMPLE: u64 = 2;

/// Geometry descriptor of one DEM plate, bound from its `.HDR` file.
///
/// Origin is the upper-left corner of the raster. Longitude grows with the
/// column index; latitude shrinks as the row index grows.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateGeometry {
    pub rows: u32,
    pub cols: u32,
    pub origin_lon: f64,
    pub origin_lat: f64,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl PlateGeometry {
    /// Angular width of the plate in degrees of longitude.
    pub fn width_degrees(&self) -> f64 {
        self.cell_width * self.cols as f64
    }

    /// Angular height of the plate in degrees of latitude.
    pub fn height_degrees(&self) -> f64 {
        self.cell_height * self.rows as f64
    }

    fn contains(&self, lat: f64, lon: f64) -> bool {
        lon >= self.origin_lon
            && lon <= self.origin_lon + self.width_degrees()
            && lat <= self.origin_lat
            && lat >= self.origin_lat - self.height_degrees()
    }

    /// Maps geographic coordinates to the (column, row) of the covering cell.
    pub fn to_column_row(&self, lat: f64, lon: f64) -> Result<(u32, u32), DemError> {
        if !self.contains(lat, lon) {
            return Err(DemError::OutOfBounds { lat, lon });
        }

        let x_offset = (lon - self.origin_lon) / self.width_degrees();
        let y_offset = (self.origin_lat - lat) / self.height_degrees();

        let col = (x_offset * self.cols as f64) as u32;
        let row = (y_offset * self.rows as f64) as u32;

        Ok((col, row))
    }

    /// Byte offset of the covering sample within the `.DEM` file.
    pub fn byte_offset(&self, lat: f64, lon: f64) -> Result<u64, DemError> {
        let (col, row) = self.to_column_row(lat, lon)?;
        Ok((col as u64 + row as u64 * self.cols as u64) * BYTES_PER_SAMPLE)
    }

    /// Reconstructs the lat/lon of a cell's upper-left corner.
    pub fn to_lat_lon(&self, col: u32, row: u32) -> (f64, f64) {
        let lat = self.origin_lat - row as f64 * self.cell_height;
        let lon = self.origin_lon + col as f64 * self.cell_width;
        (lat, lon)
    }
}
