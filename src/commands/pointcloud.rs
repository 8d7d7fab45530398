use clap::App;
use std::time::Instant;

use crate::commands::{window_app, window_args, Command};
use crate::render;

pub struct PointCloud {}

impl Command for PointCloud {
    fn name(&self) -> &'static str {
        "pointcloud"
    }

    fn register(&self) -> App<'static> {
        window_app(
            self.name(),
            "Extract an elevation window as a colored point cloud.",
        )
    }

    fn run(&self, args: &clap::ArgMatches) -> anyhow::Result<()> {
        let start = Instant::now();
        let w = window_args(args)?;

        println!("▶️  Loading plate {}", w.plate.name());
        let cloud = render::point_cloud_around(&w.plate, w.lat, w.lon, w.width, w.height)?;
        println!("✔️  Built point cloud with {} vertices", cloud.points.len());

        render::write_points(&w.output, &cloud.points, &cloud.colors)?;
        println!(
            "✔️  Wrote {} in {}ms",
            w.output.display(),
            start.elapsed().as_millis()
        );

        Ok(())
    }
}
