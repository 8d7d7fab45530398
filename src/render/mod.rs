mod ply;

pub use ply::{write_mesh, write_points};

use crate::dem::{DemError, ElevationGrid, Plate, NO_DATA};

/// Elevation-to-color ramp: a snow band fading to white above `snow_start`
/// and a low-terrain band fading to orange below `low_start`. The two
/// output modes historically ship with different thresholds, so both live
/// here as distinct presets.
#[derive(Debug, Clone, Copy)]
pub struct ColorRamp {
    pub snow_start: f32,
    pub snow_band: f32,
    pub low_start: f32,
}

pub const POINT_CLOUD_RAMP: ColorRamp = ColorRamp {
    snow_start: 1200.0,
    snow_band: 500.0,
    low_start: 500.0,
};

pub const MESH_RAMP: ColorRamp = ColorRamp {
    snow_start: 900.0,
    snow_band: 300.0,
    low_start: 200.0,
};

pub const NO_DATA_COLOR: [f32; 3] = [0.0, 0.0, 1.0];
const BASE_COLOR: [f32; 3] = [0.35, 0.42, 0.28];
const SNOW_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
const LOW_COLOR: [f32; 3] = [1.0, 0.55, 0.1];

fn lerp(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

impl ColorRamp {
    pub fn color(&self, sample: i16) -> [f32; 3] {
        if sample == NO_DATA {
            return NO_DATA_COLOR;
        }

        let elevation = sample as f32;
        if elevation > self.snow_start {
            let t = (elevation - self.snow_start) / self.snow_band;
            if t >= 1.0 {
                SNOW_COLOR
            } else {
                lerp(BASE_COLOR, SNOW_COLOR, t)
            }
        } else if elevation < self.low_start {
            let t = (self.low_start - elevation) / self.low_start;
            if t >= 1.0 {
                LOW_COLOR
            } else {
                lerp(BASE_COLOR, LOW_COLOR, t)
            }
        } else {
            BASE_COLOR
        }
    }
}

/// One vertex per grid cell plus a parallel color sequence.
#[derive(Debug, Default, Clone)]
pub struct PointCloud {
    pub points: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
}

/// Point cloud plus an indexed triangulation of the grid.
#[derive(Debug, Default, Clone)]
pub struct TriangleMesh {
    pub points: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

/// Boustrophedon strip with duplicated seam vertices. Best-effort output:
/// downstream renderers that want shading should pair it with
/// [`vertex_normals`].
#[derive(Debug, Default, Clone)]
pub struct TriangleStrip {
    pub points: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
}

fn z_value(sample: i16) -> f32 {
    if sample == NO_DATA {
        0.0
    } else {
        sample as f32
    }
}

fn vertex(grid: &ElevationGrid, col: u32, row: u32) -> [f32; 3] {
    [
        col as f32 - grid.width() as f32 / 2.0,
        row as f32 - grid.height() as f32 / 2.0,
        z_value(grid.sample(col, row)),
    ]
}

/// Emits one vertex and one color per cell, row-major, centered on the
/// window's midpoint.
pub fn point_cloud(grid: &ElevationGrid, ramp: &ColorRamp) -> PointCloud {
    let cells = (grid.width() * grid.height()) as usize;
    let mut points = Vec::with_capacity(cells);
    let mut colors = Vec::with_capacity(cells);

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            points.push(vertex(grid, col, row));
            colors.push(ramp.color(grid.sample(col, row)));
        }
    }

    PointCloud { points, colors }
}

/// Point cloud plus two triangles per interior 2x2 block. Winding is fixed:
/// `(r,c)-(r+1,c)-(r,c+1)` then `(r+1,c)-(r+1,c+1)-(r,c+1)`.
pub fn triangle_mesh(grid: &ElevationGrid, ramp: &ColorRamp) -> TriangleMesh {
    let PointCloud { points, colors } = point_cloud(grid, ramp);
    let (width, height) = (grid.width(), grid.height());

    let mut indices = Vec::new();
    if width > 0 && height > 0 {
        indices.reserve(((width - 1) * (height - 1) * 6) as usize);
        for row in 0..height - 1 {
            for col in 0..width - 1 {
                let here = row * width + col;
                let below = (row + 1) * width + col;

                indices.push(here);
                indices.push(below);
                indices.push(here + 1);

                indices.push(below);
                indices.push(below + 1);
                indices.push(here + 1);
            }
        }
    }

    TriangleMesh {
        points,
        colors,
        indices,
    }
}

/// Walks row pairs in alternating column order, two vertices per column,
/// splicing pairs together with duplicated (degenerate) vertices so the
/// whole window renders as one strip.
pub fn triangle_strip(grid: &ElevationGrid, ramp: &ColorRamp) -> TriangleStrip {
    let (width, height) = (grid.width(), grid.height());
    if width == 0 || height < 2 {
        return TriangleStrip::default();
    }

    let mut points = Vec::new();
    let mut colors = Vec::new();

    for row in 0..height - 1 {
        let columns: Vec<u32> = if row % 2 == 0 {
            (0..width).collect()
        } else {
            (0..width).rev().collect()
        };

        if row > 0 {
            // seam: repeat the previous vertex and the next lead vertex
            let last_point = *points.last().unwrap();
            let last_color = *colors.last().unwrap();
            points.push(last_point);
            colors.push(last_color);

            points.push(vertex(grid, columns[0], row));
            colors.push(ramp.color(grid.sample(columns[0], row)));
        }

        for &col in &columns {
            points.push(vertex(grid, col, row));
            colors.push(ramp.color(grid.sample(col, row)));

            points.push(vertex(grid, col, row + 1));
            colors.push(ramp.color(grid.sample(col, row + 1)));
        }
    }

    TriangleStrip { points, colors }
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    [v[0] / len, v[1] / len, v[2] / len]
}

/// Per-cell surface normals from central differences (one-sided at edges),
/// in the same row-major order as the point cloud. No-data cells use the
/// same zero elevation the builders emit.
pub fn vertex_normals(grid: &ElevationGrid) -> Vec<[f32; 3]> {
    let (width, height) = (grid.width(), grid.height());
    let z = |col: u32, row: u32| z_value(grid.sample(col, row));

    let mut normals = Vec::with_capacity((width * height) as usize);
    for row in 0..height {
        for col in 0..width {
            let left = col.saturating_sub(1);
            let right = (col + 1).min(width.saturating_sub(1));
            let up = row.saturating_sub(1);
            let down = (row + 1).min(height.saturating_sub(1));

            let dzdx = (z(right, row) - z(left, row)) / (right - left).max(1) as f32;
            let dzdy = (z(col, down) - z(col, up)) / (down - up).max(1) as f32;

            normals.push(normalize([-dzdx, -dzdy, 1.0]));
        }
    }
    normals
}

/// Loads the plate, centers a window on `(lat, lon)` and builds a point
/// cloud with the point-cloud ramp. Zero extents are a no-op.
pub fn point_cloud_around(
    plate: &Plate,
    lat: f64,
    lon: f64,
    width: u32,
    height: u32,
) -> Result<PointCloud, DemError> {
    if width == 0 || height == 0 {
        return Ok(PointCloud::default());
    }
    let geometry = plate.load_geometry()?;
    let grid = plate.crop_centered(&geometry, lat, lon, width, height)?;
    Ok(point_cloud(&grid, &POINT_CLOUD_RAMP))
}

/// Same pipeline as [`point_cloud_around`], producing an indexed mesh with
/// the mesh ramp.
pub fn mesh_around(
    plate: &Plate,
    lat: f64,
    lon: f64,
    width: u32,
    height: u32,
) -> Result<TriangleMesh, DemError> {
    if width == 0 || height == 0 {
        return Ok(TriangleMesh::default());
    }
    let geometry = plate.load_geometry()?;
    let grid = plate.crop_centered(&geometry, lat, lon, width, height)?;
    Ok(triangle_mesh(&grid, &MESH_RAMP))
}

/// Same pipeline, producing the boustrophedon strip with the mesh ramp.
pub fn strip_around(
    plate: &Plate,
    lat: f64,
    lon: f64,
    width: u32,
    height: u32,
) -> Result<TriangleStrip, DemError> {
    if width == 0 || height == 0 {
        return Ok(TriangleStrip::default());
    }
    let geometry = plate.load_geometry()?;
    let grid = plate.crop_centered(&geometry, lat, lon, width, height)?;
    Ok(triangle_strip(&grid, &MESH_RAMP))
}
