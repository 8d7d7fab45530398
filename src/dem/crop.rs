use byteorder::{BigEndian, ReadBytesExt};
use std::{
    fs::File,
    io::{BufReader, Seek, SeekFrom},
    path::Path,
};

use super::error::DemError;
use super::geometry::{PlateGeometry, BYTES_PER_SAMPLE};
use super::rect::Rect;

/// Reserved sample value marking a cell with no valid elevation.
pub const NO_DATA: i16 = -9999;

/// A rectangular window of elevation samples, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElevationGrid {
    width: u32,
    height: u32,
    data: Vec<i16>,
}

impl ElevationGrid {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample at `(col, row)` of the window.
    pub fn sample(&self, col: u32, row: u32) -> i16 {
        self.data[(row * self.width + col) as usize]
    }

    pub fn is_no_data(&self, col: u32, row: u32) -> bool {
        self.sample(col, row) == NO_DATA
    }

    pub fn data(&self) -> &[i16] {
        &self.data
    }

    #[cfg(test)]
    pub fn from_samples(width: u32, height: u32, data: Vec<i16>) -> Self {
        assert_eq!(data.len(), (width * height) as usize);
        ElevationGrid { width, height, data }
    }
}

/// Extracts `rect` from the raster at `path`, converting samples from the
/// file's big-endian encoding to host order.
///
/// Rows of the window are non-contiguous in the file whenever
/// `rect.width < geometry.cols`, so each row is seeked and read separately.
/// `rect` is expected to be clamped already; a zero-sized rect yields an
/// empty grid.
pub fn crop(path: &Path, geometry: &PlateGeometry, rect: &Rect) -> Result<ElevationGrid, DemError> {
    if rect.is_empty() {
        return Ok(ElevationGrid {
            width: rect.width,
            height: rect.height,
            data: Vec::new(),
        });
    }

    let file = File::open(path).map_err(|source| DemError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    let mut data = vec![0i16; (rect.width * rect.height) as usize];
    let row_stride = geometry.cols as u64 * BYTES_PER_SAMPLE;
    let start = rect.x as u64 * BYTES_PER_SAMPLE + rect.y as u64 * row_stride;

    for row in 0..rect.height {
        reader.seek(SeekFrom::Start(start + row as u64 * row_stride))?;

        let offset = (row * rect.width) as usize;
        let out = &mut data[offset..offset + rect.width as usize];
        reader.read_i16_into::<BigEndian>(out)?;
    }

    Ok(ElevationGrid {
        width: rect.width,
        height: rect.height,
        data,
    })
}
