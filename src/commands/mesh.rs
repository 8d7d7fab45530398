use clap::App;
use std::time::Instant;

use crate::commands::{window_app, window_args, Command};
use crate::render;

pub struct Mesh {}

impl Command for Mesh {
    fn name(&self) -> &'static str {
        "mesh"
    }

    fn register(&self) -> App<'static> {
        window_app(
            self.name(),
            "Extract an elevation window as an indexed triangle mesh.",
        )
    }

    fn run(&self, args: &clap::ArgMatches) -> anyhow::Result<()> {
        let start = Instant::now();
        let w = window_args(args)?;

        println!("▶️  Loading plate {}", w.plate.name());
        let mesh = render::mesh_around(&w.plate, w.lat, w.lon, w.width, w.height)?;
        println!(
            "✔️  Built mesh with {} vertices and {} triangles",
            mesh.points.len(),
            mesh.indices.len() / 3
        );

        render::write_mesh(&w.output, &mesh)?;
        println!(
            "✔️  Wrote {} in {}ms",
            w.output.display(),
            start.elapsed().as_millis()
        );

        Ok(())
    }
}
