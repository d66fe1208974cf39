//! OBJ model reading through `tobj`; only vertex positions and faces are kept.

use std::io::BufReader;
use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{MinimalError, MinimalResult};
use crate::geometry::triangle::Triangle;
use crate::geometry::vec3::Vec3;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Parse OBJ text into triangles, one per face (polygons are fan-triangulated).
///
/// Face indices may be 1-based or relative (negative); `v/vt/vn` forms use the vertex
/// index. Materials, texture coordinates, normals and groups are ignored.
pub fn parse_obj(src: &str) -> MinimalResult<Vec<Triangle>> {
    let mut reader = BufReader::new(src.as_bytes());
    let (models, _materials) = tobj::load_obj_buf(&mut reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })
    .map_err(|e| MinimalError::validation(format!("obj: {e}")))?;
    triangles(&models)
}

/// Read and parse an OBJ file.
pub fn load_obj(path: impl AsRef<Path>) -> MinimalResult<Vec<Triangle>> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(path, &load_options())
        .with_context(|| format!("read obj '{}'", path.display()))?;
    triangles(&models)
}

fn triangles(models: &[tobj::Model]) -> MinimalResult<Vec<Triangle>> {
    let mut tris = Vec::new();
    for model in models {
        let mesh = &model.mesh;
        let vertex = |i: u32| -> MinimalResult<Vec3> {
            let at = i as usize * 3;
            match mesh.positions.get(at..at + 3) {
                Some(&[x, y, z]) => Ok(Vec3::new(f64::from(x), f64::from(y), f64::from(z))),
                _ => Err(MinimalError::validation(format!(
                    "obj model '{}': vertex index {} out of range ({} vertices)",
                    model.name,
                    i + 1,
                    mesh.positions.len() / 3
                ))),
            }
        };
        for face in mesh.indices.chunks_exact(3) {
            tris.push(Triangle([vertex(face[0])?, vertex(face[1])?, vertex(face[2])?]));
        }
    }
    Ok(tris)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/obj.rs"]
mod tests;
