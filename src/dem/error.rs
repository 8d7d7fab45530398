use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum DemError {
    #[error("Could not open {}", .path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while reading plate data")]
    Io(#[from] std::io::Error),

    #[error("Header ended after {got} records, expected at least {expected}")]
    HeaderTooShort { got: usize, expected: usize },

    #[error("Header record #{index} ({key}) is not numeric")]
    BadRecord { index: usize, key: String },

    #[error("Header describes an empty or degenerate plate: {0}")]
    InvalidGeometry(String),

    #[error("Lat/lon ({lat}, {lon}) exceeds plate boundary")]
    OutOfBounds { lat: f64, lon: f64 },

    #[error("Crop origin ({x}, {y}) lies outside plate data")]
    OriginOutOfBounds { x: u32, y: u32 },
}
