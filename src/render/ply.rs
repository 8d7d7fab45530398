use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::TriangleMesh;

fn channel(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

fn write_vertex_block<W: Write>(
    out: &mut W,
    points: &[[f32; 3]],
    colors: &[[f32; 3]],
) -> std::io::Result<()> {
    for (point, color) in points.iter().zip(colors) {
        writeln!(
            out,
            "{} {} {} {} {} {}",
            point[0],
            point[1],
            point[2],
            channel(color[0]),
            channel(color[1]),
            channel(color[2]),
        )?;
    }
    Ok(())
}

fn write_header<W: Write>(out: &mut W, vertices: usize, faces: Option<usize>) -> std::io::Result<()> {
    writeln!(out, "ply")?;
    writeln!(out, "format ascii 1.0")?;
    writeln!(out, "element vertex {}", vertices)?;
    writeln!(out, "property float x")?;
    writeln!(out, "property float y")?;
    writeln!(out, "property float z")?;
    writeln!(out, "property uchar red")?;
    writeln!(out, "property uchar green")?;
    writeln!(out, "property uchar blue")?;
    if let Some(faces) = faces {
        writeln!(out, "element face {}", faces)?;
        writeln!(out, "property list uchar uint vertex_indices")?;
    }
    writeln!(out, "end_header")
}

/// Writes vertices and colors as an ASCII PLY point cloud.
pub fn write_points(
    path: &Path,
    points: &[[f32; 3]],
    colors: &[[f32; 3]],
) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    write_header(&mut out, points.len(), None)?;
    write_vertex_block(&mut out, points, colors)?;
    out.flush()
}

/// Writes an indexed mesh as an ASCII PLY with one face record per triangle.
pub fn write_mesh(path: &Path, mesh: &TriangleMesh) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    write_header(&mut out, mesh.points.len(), Some(mesh.indices.len() / 3))?;
    write_vertex_block(&mut out, &mesh.points, &mesh.colors)?;

    for tri in mesh.indices.chunks(3) {
        writeln!(out, "3 {} {} {}", tri[0], tri[1], tri[2])?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dem::ElevationGrid;
    use crate::render::{triangle_mesh, MESH_RAMP};
    use crate::test::test_helper::with_fixture_dir;

    #[test]
    fn mesh_ply_counts_match_the_geometry() {
        with_fixture_dir(|dir| {
            let grid = ElevationGrid::from_samples(2, 2, vec![100, 200, 300, 400]);
            let mesh = triangle_mesh(&grid, &MESH_RAMP);

            let path = dir.join("mesh.ply");
            write_mesh(&path, &mesh).unwrap();

            let text = std::fs::read_to_string(&path).unwrap();
            assert!(text.starts_with("ply\nformat ascii 1.0\n"));
            assert!(text.contains("element vertex 4"));
            assert!(text.contains("element face 2"));
            assert!(text.ends_with("3 0 2 1\n3 2 3 1\n"));
        });
    }

    #[test]
    fn colors_are_scaled_to_bytes() {
        with_fixture_dir(|dir| {
            let path = dir.join("points.ply");
            write_points(&path, &[[0.0, 0.0, 0.0]], &[[0.0, 0.0, 1.0]]).unwrap();

            let text = std::fs::read_to_string(&path).unwrap();
            assert!(text.ends_with("0 0 0 0 0 255\n"));
        });
    }
}
