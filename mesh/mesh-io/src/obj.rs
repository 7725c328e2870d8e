//! Wavefront OBJ support.
//!
//! Only geometry is read: `v` records (2 or 3 components, a third component
//! must be zero) and `f` records. Polygonal faces are fan-triangulated.
//! Texture/normal references (`f 1/2/3 ...`) are accepted and ignored.
//! Vertices are written with `z = 0` so the files open in any 3-D viewer.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use mesh_types::{PlanarMesh, Point2};

use crate::error::{IoError, IoResult, check_planar};

/// Load a planar mesh from an OBJ file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - A record cannot be parsed
/// - A face references a vertex that does not exist
/// - A vertex has a nonzero z coordinate
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_obj;
///
/// let mesh = load_obj("domain.obj").unwrap();
/// println!("{} vertices, {} faces", mesh.vertices.len(), mesh.faces.len());
/// ```
pub fn load_obj<P: AsRef<Path>>(path: P) -> IoResult<PlanarMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IoError::from_open(e, path))?;
    read_obj(BufReader::new(file))
}

/// Parse OBJ records from any buffered reader.
pub(crate) fn read_obj<R: BufRead>(reader: R) -> IoResult<PlanarMesh> {
    let mut mesh = PlanarMesh::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let coords = tokens
                    .map(str::parse::<f64>)
                    .collect::<Result<Vec<_>, _>>()?;
                let (x, y, z) = match coords.as_slice() {
                    [x, y] => (*x, *y, 0.0),
                    // A fourth component is the optional homogeneous weight.
                    [x, y, z] | [x, y, z, _] => (*x, *y, *z),
                    _ => {
                        return Err(IoError::invalid_content(format!(
                            "line {}: vertex needs 2 or 3 coordinates",
                            line_no + 1
                        )));
                    }
                };
                check_planar(mesh.vertices.len(), z)?;
                mesh.vertices.push(Point2::new(x, y));
            }
            Some("f") => {
                let indices = tokens
                    .map(|token| resolve_index(token, mesh.vertices.len()))
                    .collect::<IoResult<Vec<u32>>>()?;
                if indices.len() < 3 {
                    return Err(IoError::invalid_content(format!(
                        "line {}: face needs at least 3 vertices",
                        line_no + 1
                    )));
                }
                for i in 1..indices.len() - 1 {
                    mesh.faces.push([indices[0], indices[i], indices[i + 1]]);
                }
            }
            _ => {}
        }
    }

    Ok(mesh)
}

/// Resolve one face token (`7`, `7/1`, `7//3`, `-1`) to a zero-based index.
fn resolve_index(token: &str, vertex_count: usize) -> IoResult<u32> {
    let head = token.split('/').next().unwrap_or(token);
    let raw: i64 = head.parse()?;

    #[allow(clippy::cast_possible_wrap)]
    let count = vertex_count as i64;
    let zero_based = if raw > 0 { raw - 1 } else { count + raw };

    if raw == 0 || zero_based < 0 || zero_based >= count {
        return Err(IoError::invalid_content(format!(
            "face index {raw} out of range ({vertex_count} vertices)"
        )));
    }

    u32::try_from(zero_based)
        .map_err(|_| IoError::invalid_content(format!("face index {raw} exceeds u32")))
}

/// Save a planar mesh as OBJ.
///
/// Coordinates are written with full round-trip precision.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_obj<P: AsRef<Path>>(mesh: &PlanarMesh, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(obj_string(mesh).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Render a mesh as OBJ text.
pub(crate) fn obj_string(mesh: &PlanarMesh) -> String {
    let mut out = String::with_capacity(32 * (mesh.vertices.len() + mesh.faces.len()));
    out.push_str("# planar mesh\n");
    for v in &mesh.vertices {
        let _ = writeln!(out, "v {} {} 0", v.x, v.y);
    }
    for &[a, b, c] in &mesh.faces {
        let _ = writeln!(out, "f {} {} {}", a + 1, b + 1, c + 1);
    }
    out
}
