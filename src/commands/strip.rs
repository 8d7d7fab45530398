use clap::App;
use std::time::Instant;

use crate::commands::{window_app, window_args, Command};
use crate::render;

pub struct Strip {}

impl Command for Strip {
    fn name(&self) -> &'static str {
        "strip"
    }

    fn register(&self) -> App<'static> {
        window_app(
            self.name(),
            "Extract an elevation window as a boustrophedon triangle strip (best effort).",
        )
    }

    fn run(&self, args: &clap::ArgMatches) -> anyhow::Result<()> {
        let start = Instant::now();
        let w = window_args(args)?;

        println!("▶️  Loading plate {}", w.plate.name());
        let strip = render::strip_around(&w.plate, w.lat, w.lon, w.width, w.height)?;
        println!("✔️  Built strip with {} vertices", strip.points.len());

        // strip order is preserved in the vertex sequence; consumers draw it
        // as GL_TRIANGLE_STRIP
        render::write_points(&w.output, &strip.points, &strip.colors)?;
        println!(
            "✔️  Wrote {} in {}ms",
            w.output.display(),
            start.elapsed().as_millis()
        );

        Ok(())
    }
}
