mod info;
mod mesh;
mod pointcloud;
mod strip;

pub use info::Info;
pub use mesh::Mesh;
pub use pointcloud::PointCloud;
pub use strip::Strip;

use anyhow::bail;
use clap::{arg, App};
use std::path::{Path, PathBuf};

use crate::dem::Plate;

pub trait Command {
    fn name(&self) -> &'static str;
    fn register(&self) -> App<'static>;
    fn run(&self, args: &clap::ArgMatches) -> anyhow::Result<()>;
}

/// Arguments shared by the three extraction commands.
pub(crate) struct WindowArgs {
    pub plate: Plate,
    pub lat: f64,
    pub lon: f64,
    pub width: u32,
    pub height: u32,
    pub output: PathBuf,
}

pub(crate) fn window_app(name: &'static str, about: &'static str) -> App<'static> {
    App::new(name)
        .about(about)
        .arg(arg!(-i --input <INPUT_DIR> "Path to the directory holding the plate files"))
        .arg(arg!(-n --name <PLATE> "Base name of the .HDR/.DEM pair"))
        .arg(arg!(--lat <LAT> "Latitude of the window center in degrees"))
        .arg(arg!(--lon <LON> "Longitude of the window center in degrees"))
        .arg(arg!(-W --width <CELLS> "Window width in cells"))
        .arg(arg!(-H --height <CELLS> "Window height in cells"))
        .arg(arg!(-o --output <OUTPUT_FILE> "Path of the PLY file to write"))
}

pub(crate) fn window_args(args: &clap::ArgMatches) -> anyhow::Result<WindowArgs> {
    let input = Path::new(args.value_of("input").unwrap());
    if !input.is_dir() {
        bail!("Input path is not a directory");
    }

    Ok(WindowArgs {
        plate: Plate::new(input, args.value_of("name").unwrap()),
        lat: args.value_of("lat").unwrap().parse()?,
        lon: args.value_of("lon").unwrap().parse()?,
        width: args.value_of("width").unwrap().parse()?,
        height: args.value_of("height").unwrap().parse()?,
        output: Path::new(args.value_of("output").unwrap()).to_path_buf(),
    })
}
