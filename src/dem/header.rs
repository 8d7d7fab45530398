use nom::{
    bytes::complete::take_till1,
    character::complete::{multispace0, space1},
    combinator::map,
    sequence::{preceded, separated_pair},
    IResult,
};

use super::error::DemError;
use super::geometry::PlateGeometry;

// Record indices the six geometry fields are bound to. The .HDR convention
// accompanying .DEM plates is positional: keys are echoed but never matched.
const ROWS_RECORD: usize = 2;
const COLS_RECORD: usize = 3;
const ORIGIN_LON_RECORD: usize = 10;
const ORIGIN_LAT_RECORD: usize = 11;
const CELL_WIDTH_RECORD: usize = 12;
const CELL_HEIGHT_RECORD: usize = 13;
const MIN_RECORDS: usize = 14;

#[derive(Debug, PartialEq)]
pub enum RecordValue {
    Number(f64),
    Label(String),
}

impl RecordValue {
    fn classify(token: &str) -> Self {
        match token.parse::<f64>() {
            Ok(v) => RecordValue::Number(v),
            Err(_) => RecordValue::Label(token.to_string()),
        }
    }
}

/// One `KEY value` pair from a plate header.
#[derive(Debug, PartialEq)]
pub struct HeaderRecord {
    pub key: String,
    pub value: RecordValue,
}

/// The full record list of a `.HDR` file.
///
/// Parsing never fails: reading stops at end of input or at the first chunk
/// that is not a `KEY value` pair, mirroring how the format is consumed in
/// the wild. Validation happens in [`PlateHeader::geometry`].
#[derive(Debug)]
pub struct PlateHeader {
    records: Vec<HeaderRecord>,
}

fn token(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c.is_whitespace())(input)
}

fn record(input: &str) -> IResult<&str, HeaderRecord> {
    map(
        preceded(multispace0, separated_pair(token, space1, token)),
        |(key, value)| HeaderRecord {
            key: key.to_string(),
            value: RecordValue::classify(value),
        },
    )(input)
}

impl PlateHeader {
    pub fn parse(input: &str) -> Self {
        let mut records = Vec::new();
        let mut rest = input;

        while let Ok((remaining, rec)) = record(rest) {
            rest = remaining;
            records.push(rec);
        }

        PlateHeader { records }
    }

    pub fn records(&self) -> &[HeaderRecord] {
        &self.records
    }

    fn numeric_at(&self, index: usize) -> Result<f64, DemError> {
        let rec = &self.records[index];
        match rec.value {
            RecordValue::Number(v) => Ok(v),
            RecordValue::Label(_) => Err(DemError::BadRecord {
                index,
                key: rec.key.clone(),
            }),
        }
    }

    /// Binds the positional records to a geometry descriptor.
    pub fn geometry(&self) -> Result<PlateGeometry, DemError> {
        if self.records.len() < MIN_RECORDS {
            return Err(DemError::HeaderTooShort {
                got: self.records.len(),
                expected: MIN_RECORDS,
            });
        }

        let rows = self.numeric_at(ROWS_RECORD)? as u32;
        let cols = self.numeric_at(COLS_RECORD)? as u32;
        let origin_lon = self.numeric_at(ORIGIN_LON_RECORD)?;
        let origin_lat = self.numeric_at(ORIGIN_LAT_RECORD)?;
        let cell_width = self.numeric_at(CELL_WIDTH_RECORD)?;
        let cell_height = self.numeric_at(CELL_HEIGHT_RECORD)?;

        if rows == 0 || cols == 0 {
            return Err(DemError::InvalidGeometry(format!(
                "{} rows x {} columns",
                rows, cols
            )));
        }

        if cell_width <= 0.0 || cell_height <= 0.0 {
            return Err(DemError::InvalidGeometry(format!(
                "cell size {} x {}",
                cell_width, cell_height
            )));
        }

        Ok(PlateGeometry {
            rows,
            cols,
            origin_lon,
            origin_lat,
            cell_width,
            cell_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dem::error::DemError;

    const GTOPO30_HEADER: &str = "BYTEORDER M\n\
        LAYOUT BIL\n\
        NROWS 6000\n\
        NCOLS 4800\n\
        NBANDS 1\n\
        NBITS 16\n\
        BANDROWBYTES 9600\n\
        TOTALROWBYTES 9600\n\
        BANDGAPBYTES 0\n\
        NODATA -9999\n\
        ULXMAP -99.99583333333334\n\
        ULYMAP 89.99583333333334\n\
        XDIM 0.00833333333333\n\
        YDIM 0.00833333333333\n";

    #[test]
    fn parses_gtopo30_style_header() {
        let header = PlateHeader::parse(GTOPO30_HEADER);
        assert_eq!(header.records().len(), 14);

        let geo = header.geometry().unwrap();
        assert_eq!(geo.rows, 6000);
        assert_eq!(geo.cols, 4800);
        assert!((geo.origin_lon - -99.99583333333334).abs() < 1e-12);
        assert!((geo.origin_lat - 89.99583333333334).abs() < 1e-12);
        assert!((geo.cell_width - 0.00833333333333).abs() < 1e-12);
        assert!((geo.cell_height - 0.00833333333333).abs() < 1e-12);
    }

    #[test]
    fn labels_are_kept_but_not_bound() {
        let header = PlateHeader::parse(GTOPO30_HEADER);
        assert_eq!(header.records()[0].key, "BYTEORDER");
        assert_eq!(
            header.records()[0].value,
            RecordValue::Label("M".to_string())
        );
        assert_eq!(header.records()[2].value, RecordValue::Number(6000.0));
    }

    #[test]
    fn stops_at_first_non_pair() {
        let header = PlateHeader::parse("NROWS 10\nDANGLING\n");
        assert_eq!(header.records().len(), 1);
    }

    #[test]
    fn short_header_is_an_error() {
        let header = PlateHeader::parse("NROWS 10\nNCOLS 10\n");
        match header.geometry() {
            Err(DemError::HeaderTooShort { got: 2, expected: 14 }) => {}
            other => panic!("expected HeaderTooShort, got {:?}", other),
        }
    }

    #[test]
    fn label_at_bound_position_is_an_error() {
        let bad = GTOPO30_HEADER.replace("NROWS 6000", "NROWS six-thousand");
        let header = PlateHeader::parse(&bad);
        match header.geometry() {
            Err(DemError::BadRecord { index: 2, ref key }) if key == "NROWS" => {}
            other => panic!("expected BadRecord, got {:?}", other),
        }
    }

    #[test]
    fn zero_sized_plate_is_an_error() {
        let bad = GTOPO30_HEADER.replace("NROWS 6000", "NROWS 0");
        let header = PlateHeader::parse(&bad);
        assert!(matches!(
            header.geometry(),
            Err(DemError::InvalidGeometry(_))
        ));
    }
}
