//! Wavefront OBJ format support.
//!
//! Only `v` and `f` records are read; texture coordinates, normals, groups
//! and materials are skipped. Face entries may use the `v`, `v/vt`, `v//vn`
//! or `v/vt/vn` forms and negative (relative) indices.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use nalgebra::Point3;

use super::write_file;
use crate::error::{MeshError, Result};
use crate::mesh::{build_from_polygons, QuadMesh};

/// Load a quad mesh from an OBJ file.
///
/// # Example
///
/// ```no_run
/// use quadsub::io::obj;
///
/// let mesh = obj::load("cage.obj").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<QuadMesh> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let load_error = |line: usize, message: String| MeshError::LoadError {
        path: path.to_path_buf(),
        message: format!("line {}: {}", line, message),
    };

    let mut vertices: Vec<Point3<f64>> = Vec::new();
    let mut polygons: Vec<Vec<usize>> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = line_no + 1;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("v") => {
                let coords: Vec<f64> = tokens
                    .take(3)
                    .map(|t| t.parse::<f64>())
                    .collect::<std::result::Result<_, _>>()
                    .map_err(|e| load_error(line_no, format!("bad vertex coordinate: {}", e)))?;
                if coords.len() != 3 {
                    return Err(load_error(line_no, "vertex needs three coordinates".to_string()));
                }
                vertices.push(Point3::new(coords[0], coords[1], coords[2]));
            }
            Some("f") => {
                let polygon = tokens
                    .map(|t| resolve_index(t, vertices.len()))
                    .collect::<Option<Vec<usize>>>()
                    .ok_or_else(|| load_error(line_no, format!("bad face record '{}'", line.trim())))?;
                polygons.push(polygon);
            }
            _ => {}
        }
    }

    if polygons.is_empty() {
        return Err(MeshError::LoadError {
            path: path.to_path_buf(),
            message: "OBJ file contains no faces".to_string(),
        });
    }

    build_from_polygons(vertices, &polygons)
}

/// Resolve a face entry such as `7`, `7/2/7` or `-1` to a 0-based index.
fn resolve_index(token: &str, num_vertices: usize) -> Option<usize> {
    let raw: i64 = token.split('/').next()?.parse().ok()?;
    if raw > 0 {
        Some(raw as usize - 1)
    } else if raw < 0 {
        num_vertices.checked_sub(raw.unsigned_abs() as usize)
    } else {
        None
    }
}

/// Save a quad mesh to an OBJ file.
///
/// # Example
///
/// ```no_run
/// use quadsub::io::obj;
/// use quadsub::mesh::QuadMesh;
///
/// obj::save(&QuadMesh::cube(1.0), "cube.obj").unwrap();
/// ```
pub fn save<P: AsRef<Path>>(mesh: &QuadMesh, path: P) -> Result<()> {
    write_file(path.as_ref(), |writer| {
        writeln!(writer, "# Generated by quadsub")?;
        writeln!(
            writer,
            "# {} vertices, {} faces",
            mesh.num_vertices(),
            mesh.num_faces()
        )?;

        for v in &mesh.vertices {
            writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
        }

        for f in &mesh.faces {
            writeln!(writer, "f {} {} {} {}", f[0] + 1, f[1] + 1, f[2] + 1, f[3] + 1)?;
        }

        Ok(())
    })
}
