//! PLY (Stanford polygon) format support.
//!
//! This module provides loading and saving of quad meshes in the PLY format,
//! also known as the Polygon File Format or Stanford Triangle Format.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use nalgebra::Point3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use super::write_file;
use crate::error::{MeshError, Result};
use crate::mesh::{build_from_polygons, QuadMesh};

/// Load a quad mesh from a PLY file.
///
/// # Example
///
/// ```no_run
/// use quadsub::io::ply;
///
/// let mesh = ply::load("cage.ply").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<QuadMesh> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let load_error = |message: &str| MeshError::LoadError {
        path: path.to_path_buf(),
        message: message.to_string(),
    };

    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(&mut reader)
        .map_err(|e| load_error(&e.to_string()))?;

    let vertex_element = ply
        .payload
        .get("vertex")
        .ok_or_else(|| load_error("PLY file has no vertex element"))?;

    let mut vertices: Vec<Point3<f64>> = Vec::with_capacity(vertex_element.len());
    for vertex in vertex_element {
        let coord = |name: &str| {
            get_float_property(vertex, name)
                .ok_or_else(|| load_error(&format!("vertex missing {} coordinate", name)))
        };
        vertices.push(Point3::new(coord("x")?, coord("y")?, coord("z")?));
    }

    let face_element = ply
        .payload
        .get("face")
        .ok_or_else(|| load_error("PLY file has no face element"))?;

    let polygons = face_element
        .iter()
        .map(|face| {
            get_list_property(face, "vertex_indices")
                .or_else(|| get_list_property(face, "vertex_index"))
                .ok_or_else(|| load_error("face missing vertex_indices property"))
        })
        .collect::<Result<Vec<Vec<usize>>>>()?;

    if polygons.is_empty() {
        return Err(load_error("PLY file contains no faces"));
    }

    build_from_polygons(vertices, &polygons)
}

fn get_float_property(element: &DefaultElement, name: &str) -> Option<f64> {
    match element.get(name)? {
        Property::Float(v) => Some(*v as f64),
        Property::Double(v) => Some(*v),
        Property::Int(v) => Some(*v as f64),
        Property::UInt(v) => Some(*v as f64),
        Property::Short(v) => Some(*v as f64),
        Property::UShort(v) => Some(*v as f64),
        Property::Char(v) => Some(*v as f64),
        Property::UChar(v) => Some(*v as f64),
        _ => None,
    }
}

fn get_list_property(element: &DefaultElement, name: &str) -> Option<Vec<usize>> {
    match element.get(name)? {
        Property::ListInt(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUInt(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListShort(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUShort(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListChar(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUChar(v) => Some(v.iter().map(|&x| x as usize).collect()),
        _ => None,
    }
}

/// Save a quad mesh to a PLY file (ASCII format, double precision).
///
/// # Example
///
/// ```no_run
/// use quadsub::io::ply;
/// use quadsub::mesh::QuadMesh;
///
/// ply::save(&QuadMesh::cube(1.0), "cube.ply").unwrap();
/// ```
pub fn save<P: AsRef<Path>>(mesh: &QuadMesh, path: P) -> Result<()> {
    write_file(path.as_ref(), |writer| {
        writeln!(writer, "ply")?;
        writeln!(writer, "format ascii 1.0")?;
        writeln!(writer, "comment Generated by quadsub")?;
        writeln!(writer, "element vertex {}", mesh.num_vertices())?;
        writeln!(writer, "property double x")?;
        writeln!(writer, "property double y")?;
        writeln!(writer, "property double z")?;
        writeln!(writer, "element face {}", mesh.num_faces())?;
        writeln!(writer, "property list uchar int vertex_indices")?;
        writeln!(writer, "end_header")?;

        for v in &mesh.vertices {
            writeln!(writer, "{} {} {}", v.x, v.y, v.z)?;
        }

        for f in &mesh.faces {
            writeln!(writer, "4 {} {} {} {}", f[0], f[1], f[2], f[3])?;
        }

        Ok(())
    })
}
