use anyhow::bail;
use clap::{arg, App};
use std::path::Path;

use crate::commands::Command;
use crate::dem::{Plate, RecordValue};

pub struct Info {}

impl Command for Info {
    fn name(&self) -> &'static str {
        "info"
    }

    fn register(&self) -> App<'static> {
        App::new(self.name())
            .about("Print the header records and geometry of a plate.")
            .arg(arg!(-i --input <INPUT_DIR> "Path to the directory holding the plate files"))
            .arg(arg!(-n --name <PLATE> "Base name of the .HDR/.DEM pair"))
    }

    fn run(&self, args: &clap::ArgMatches) -> anyhow::Result<()> {
        let input = Path::new(args.value_of("input").unwrap());
        if !input.is_dir() {
            bail!("Input path is not a directory");
        }

        let plate = Plate::new(input, args.value_of("name").unwrap());
        println!("▶️  Loading {} ({})", plate.name(), input.display());

        let header = plate.load_header()?;
        for record in header.records() {
            match &record.value {
                RecordValue::Number(v) => println!("    {}: {}", record.key, v),
                RecordValue::Label(s) => println!("    {}: {}", record.key, s),
            }
        }

        let geo = header.geometry()?;
        println!(
            "✔️  {} rows x {} cols, origin ({}, {}), cell {} x {} degrees",
            geo.rows, geo.cols, geo.origin_lon, geo.origin_lat, geo.cell_width, geo.cell_height
        );

        Ok(())
    }
}
