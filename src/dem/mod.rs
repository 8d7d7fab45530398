mod crop;
mod error;
mod geometry;
mod header;
mod rect;

use std::{
    fs::File,
    io::{BufReader, Read},
    path::PathBuf,
};

pub use crop::{crop, ElevationGrid, NO_DATA};
pub use error::DemError;
pub use geometry::PlateGeometry;
pub use header::{HeaderRecord, PlateHeader, RecordValue};
pub use rect::Rect;

/// One DEM plate: a `.HDR`/`.DEM` file pair sharing a base name.
#[derive(Debug, Clone)]
pub struct Plate {
    directory: PathBuf,
    name: String,
}

impl Plate {
    pub fn new(directory: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Plate {
            directory: directory.into(),
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header_path(&self) -> PathBuf {
        self.directory.join(format!("{}.HDR", self.name))
    }

    pub fn raster_path(&self) -> PathBuf {
        self.directory.join(format!("{}.DEM", self.name))
    }

    /// Reads and parses the plate's header file.
    pub fn load_header(&self) -> Result<PlateHeader, DemError> {
        let path = self.header_path();
        let file = File::open(&path).map_err(|source| DemError::FileNotFound {
            path: path.clone(),
            source,
        })?;

        let mut buf = BufReader::new(file);
        let mut s = String::new();
        buf.read_to_string(&mut s)?;

        Ok(PlateHeader::parse(&s))
    }

    pub fn load_geometry(&self) -> Result<PlateGeometry, DemError> {
        self.load_header()?.geometry()
    }

    /// Extracts `rect` (clamped to the plate) from the raster file.
    pub fn crop(&self, geometry: &PlateGeometry, rect: Rect) -> Result<ElevationGrid, DemError> {
        let rect = rect.clamped(geometry)?;
        crop::crop(&self.raster_path(), geometry, &rect)
    }

    /// Extracts a `width` x `height` window centered on `(lat, lon)`.
    ///
    /// The center cell is shifted to the window's top-left corner by half
    /// the extent (integer truncation, saturating at the plate edge), then
    /// the window is clamped and cropped.
    pub fn crop_centered(
        &self,
        geometry: &PlateGeometry,
        lat: f64,
        lon: f64,
        width: u32,
        height: u32,
    ) -> Result<ElevationGrid, DemError> {
        let (col, row) = geometry.to_column_row(lat, lon)?;
        let rect = Rect::new(
            col.saturating_sub(width / 2),
            row.saturating_sub(height / 2),
            width,
            height,
        );
        self.crop(geometry, rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::test_helper::with_plate_fixture;

    #[test]
    fn loads_geometry_from_header() {
        with_plate_fixture(|plate| {
            let geo = plate.load_geometry().unwrap();
            assert_eq!(geo.rows, 4);
            assert_eq!(geo.cols, 4);
            assert_eq!(geo.origin_lon, -10.0);
            assert_eq!(geo.origin_lat, 10.0);
        });
    }

    #[test]
    fn missing_header_is_reported() {
        with_plate_fixture(|plate| {
            let ghost = Plate::new(plate.header_path().parent().unwrap(), "GHOST");
            assert!(matches!(
                ghost.load_geometry(),
                Err(DemError::FileNotFound { .. })
            ));
        });
    }

    #[test]
    fn crop_centered_recenters_and_clamps() {
        with_plate_fixture(|plate| {
            let geo = plate.load_geometry().unwrap();

            // lat 7, lon -7 maps to cell (3, 3); half-extent shift -> rect at (2, 2)
            let grid = plate.crop_centered(&geo, 7.0, -7.0, 2, 2).unwrap();
            assert_eq!(grid.width(), 2);
            assert_eq!(grid.height(), 2);
            assert_eq!(grid.data(), &[110, 120, 150, 160]);
        });
    }

    #[test]
    fn crop_centered_near_edge_saturates() {
        with_plate_fixture(|plate| {
            let geo = plate.load_geometry().unwrap();

            // top-left corner: half-extent shift saturates at 0
            let grid = plate.crop_centered(&geo, 10.0, -10.0, 2, 2).unwrap();
            assert_eq!(grid.data(), &[10, 20, 50, 60]);
        });
    }

    #[test]
    fn crop_centered_outside_footprint_is_rejected() {
        with_plate_fixture(|plate| {
            let geo = plate.load_geometry().unwrap();
            assert!(matches!(
                plate.crop_centered(&geo, 11.0, -10.0, 2, 2),
                Err(DemError::OutOfBounds { .. })
            ));
        });
    }
}
