// src/import/obj.rs

use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::TerrainError;
use crate::terrain::{Mesh, Vec3};

/// Loads a polygon-file (OBJ-style) mesh from disk. Any malformed line
/// fails the whole load; no partial mesh escapes.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, TerrainError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| TerrainError::Import {
        reason: format!("{}: {}", path.display(), e),
    })?;
    parse_obj(BufReader::new(file)).map_err(|e| match e {
        TerrainError::Import { reason } => TerrainError::Import {
            reason: format!("{}: {}", path.display(), reason),
        },
        other => other,
    })
}

/// Parses OBJ-style mesh data: `v x y z`, `vn x y z`, `vt u v [w]` and
/// `f a[/b[/c]] ...` with 1-based indices. Faces of more than three
/// vertices are fan-triangulated from the first face vertex. Missing UV and
/// normal channels are filled with `(0, 0)` / `(0, 1, 0)` sized to the
/// vertex count. Unrecognized directives (`o`, `g`, `s`, `mtllib`, …) are
/// ignored.
pub fn parse_obj<R: BufRead>(reader: R) -> Result<Mesh, TerrainError> {
    let mut vertices: Vec<Vec3> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut uvs: Vec<[f32; 2]> = Vec::new();
    // face vertex indices (0-based) plus the source line for error reporting
    let mut faces: Vec<(usize, Vec<usize>)> = Vec::new();

    for (line_idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| malformed(line_idx, e))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let Some(keyword) = fields.next() else {
            continue;
        };
        match keyword {
            "v" => {
                let [x, y, z] = parse_floats(&mut fields, line_idx, "vertex")?;
                vertices.push(Vec3::new(x, y, z));
            }
            "vn" => {
                let [x, y, z] = parse_floats(&mut fields, line_idx, "normal")?;
                normals.push(Vec3::new(x, y, z));
            }
            "vt" => {
                // vt is (u, v, [w]); the optional w is ignored
                let [u, v] = parse_floats(&mut fields, line_idx, "texture coordinate")?;
                uvs.push([u, v]);
            }
            "f" => {
                let mut face = Vec::new();
                for group in fields {
                    let index_text = group.split('/').next().unwrap_or_default();
                    let index: usize = index_text
                        .parse()
                        .map_err(|_| malformed(line_idx, format!("bad face index `{group}`")))?;
                    if index == 0 {
                        return Err(malformed(line_idx, "face indices are 1-based"));
                    }
                    face.push(index - 1);
                }
                if face.len() < 3 {
                    return Err(malformed(
                        line_idx,
                        format!("face has {} vertices, need at least 3", face.len()),
                    ));
                }
                faces.push((line_idx, face));
            }
            _ => {}
        }
    }

    let mut triangles = Vec::new();
    for (line_idx, face) in &faces {
        for &index in face {
            if index >= vertices.len() {
                return Err(malformed(
                    *line_idx,
                    format!(
                        "face references vertex {} of {}",
                        index + 1,
                        vertices.len()
                    ),
                ));
            }
        }
        // fan triangulation from the first face vertex
        for i in 1..face.len() - 1 {
            triangles.push([face[0] as u32, face[i] as u32, face[i + 1] as u32]);
        }
    }

    if uvs.is_empty() {
        uvs = vec![[0.0, 0.0]; vertices.len()];
    }
    if normals.is_empty() {
        normals = vec![Vec3::new(0.0, 1.0, 0.0); vertices.len()];
    }

    debug!(
        "parsed mesh: {} vertices, {} faces, {} triangles",
        vertices.len(),
        faces.len(),
        triangles.len()
    );
    Ok(Mesh {
        vertices,
        triangles,
        normals,
        uvs,
    })
}

fn malformed(line_idx: usize, what: impl Display) -> TerrainError {
    TerrainError::Import {
        reason: format!("line {}: {}", line_idx + 1, what),
    }
}

fn parse_floats<'a, const N: usize>(
    fields: &mut impl Iterator<Item = &'a str>,
    line_idx: usize,
    what: &str,
) -> Result<[f32; N], TerrainError> {
    let mut out = [0.0; N];
    for slot in &mut out {
        *slot = fields
            .next()
            .ok_or_else(|| malformed(line_idx, format!("truncated {what}")))?
            .parse()
            .map_err(|_| malformed(line_idx, format!("non-numeric {what}")))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_triangles_and_fans_quads() {
        let source = "\
# a unit quad and a triangle
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 0.0 1.0
v 0.0 0.0 1.0
v 0.5 1.0 0.5
f 1 2 3 4
f 1 2 5
";
        let mesh = parse_obj(source.as_bytes()).unwrap();
        assert_eq!(mesh.vertices.len(), 5);
        // quad fans into two triangles from its first vertex
        assert_eq!(
            mesh.triangles,
            vec![[0, 1, 2], [0, 2, 3], [0, 1, 4]]
        );
    }

    #[test]
    fn fills_missing_channels_with_defaults() {
        let source = "v 0 0 0\nv 1 0 0\nv 0 0 1\nf 1 2 3\n";
        let mesh = parse_obj(source.as_bytes()).unwrap();
        assert_eq!(mesh.uvs, vec![[0.0, 0.0]; 3]);
        assert_eq!(mesh.normals, vec![Vec3::new(0.0, 1.0, 0.0); 3]);
    }

    #[test]
    fn parses_slash_forms_and_keeps_channels() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0.25 0.75
vn 0 0 1
f 1/1/1 2/1/1 3//1
";
        let mesh = parse_obj(source.as_bytes()).unwrap();
        assert_eq!(mesh.triangles, vec![[0, 1, 2]]);
        assert_relative_eq!(mesh.uvs[0][0], 0.25);
        assert_relative_eq!(mesh.uvs[0][1], 0.75);
        assert_eq!(mesh.normals, vec![Vec3::new(0.0, 0.0, 1.0)]);
    }

    #[test]
    fn ignores_comments_and_unknown_directives() {
        let source = "\
# exported from somewhere
o prop
g group1
s off
mtllib props.mtl
v 0 0 0
v 1 0 0
v 0 0 1
f 1 2 3
";
        let mesh = parse_obj(source.as_bytes()).unwrap();
        assert_eq!(mesh.triangles.len(), 1);
    }

    #[test]
    fn rejects_non_numeric_vertex() {
        let err = parse_obj("v 1.0 abc 2.0\n".as_bytes()).unwrap_err();
        let TerrainError::Import { reason } = err else {
            panic!("expected an import failure");
        };
        assert!(reason.contains("line 1"), "reason was: {reason}");
    }

    #[test]
    fn rejects_truncated_vertex() {
        assert!(parse_obj("v 1.0 2.0\n".as_bytes()).is_err());
    }

    #[test]
    fn rejects_out_of_range_face_index() {
        let source = "v 0 0 0\nv 1 0 0\nv 0 0 1\nf 1 2 9\n";
        let err = parse_obj(source.as_bytes()).unwrap_err();
        let TerrainError::Import { reason } = err else {
            panic!("expected an import failure");
        };
        assert!(reason.contains("vertex 9"), "reason was: {reason}");
    }

    #[test]
    fn rejects_degenerate_face() {
        assert!(parse_obj("v 0 0 0\nv 1 0 0\nf 1 2\n".as_bytes()).is_err());
    }

    #[test]
    fn rejects_zero_face_index() {
        assert!(parse_obj("v 0 0 0\nv 1 0 0\nv 0 0 1\nf 0 1 2\n".as_bytes()).is_err());
    }

    #[test]
    fn missing_file_reports_import_failure() {
        assert!(matches!(
            load_obj("/nonexistent/prop.obj"),
            Err(TerrainError::Import { .. })
        ));
    }
}
