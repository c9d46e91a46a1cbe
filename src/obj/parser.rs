//! Line-oriented OBJ geometry parser (component D, OBJ half): turns a
//! `.obj` file's directives into an [`ObjIr`]. See `spec.md` §4.4.

use std::path::PathBuf;

use crate::error::Error;
use crate::io::TextSource;
use crate::scene::FaceMode;

use super::ir::{Face, FaceVertex, ObjIr, Object, ObjMesh};
use super::mtl;

/// Parses an entire `.obj` file (plus any `mtllib` sidecars it names,
/// resolved relative to `base_dir`) into an [`ObjIr`].
pub fn parse(mut source: TextSource, base_dir: &std::path::Path) -> Result<ObjIr, Error> {
    let mut ir = ObjIr::default();
    let mut mtllib_paths: Vec<PathBuf> = Vec::new();
    let mut pending_material: Option<String> = None;

    ir.objects.push(Object::default());

    while let Some(line) = source.next_line() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (directive, rest) = split_directive(line);
        match directive {
            "v" => parse_position(rest, &mut ir)?,
            "vt" => parse_tex_coord(rest, &mut ir)?,
            "vn" => parse_normal(rest, &mut ir)?,
            "f" => parse_face(rest, &mut ir, FaceMode::NONE)?,
            "p" => parse_face(rest, &mut ir, FaceMode::POINT)?,
            "l" => parse_face(rest, &mut ir, FaceMode::LINE)?,
            "o" => start_object(rest, &mut ir),
            "g" => start_group(rest, &mut ir, &mut pending_material),
            "usemtl" => bind_material(rest, &mut ir, &mut pending_material),
            "mtllib" => {
                for name in rest.split_whitespace() {
                    mtllib_paths.push(base_dir.join(name));
                }
            }
            _ => {
                // Unrecognized directives (`s`, `vp`, ...) are silently ignored,
                // matching common Wavefront tooling's forward-compat behaviour.
            }
        }
    }

    for path in mtllib_paths {
        let materials = mtl::parse_file(&path, base_dir)?;
        ir.materials.extend(materials);
    }

    Ok(ir)
}

fn split_directive(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim_start()),
        None => (line, ""),
    }
}

fn parse_floats<const N: usize>(rest: &str) -> Result<[f32; N], Error> {
    let mut out = [0.0f32; N];
    let mut count = 0;
    for (i, token) in rest.split_whitespace().enumerate() {
        if i >= N {
            break;
        }
        out[i] = token.parse().map_err(|_| Error::MalformedFace {
            reason: format!("expected a float, found `{token}`"),
        })?;
        count = i + 1;
    }
    if count < N {
        return Err(Error::MalformedFace {
            reason: format!("expected {N} numbers, found {count}"),
        });
    }
    Ok(out)
}

fn parse_position(rest: &str, ir: &mut ObjIr) -> Result<(), Error> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.len() >= 6 {
        let xyz: [f32; 3] = parse_floats(rest)?;
        let rgb: [f32; 3] = parse_floats(&tokens[3..].join(" "))?;
        ir.positions.push(xyz);
        ir.position_is_2d.push(false);
        ir.colours.push(Some([rgb[0], rgb[1], rgb[2], 1.0]));
    } else if tokens.len() >= 3 {
        let xyz: [f32; 3] = parse_floats(rest)?;
        ir.positions.push(xyz);
        ir.position_is_2d.push(false);
        ir.colours.push(None);
    } else if tokens.len() == 2 {
        let xy: [f32; 2] = parse_floats(rest)?;
        ir.positions.push([xy[0], xy[1], 0.0]);
        ir.position_is_2d.push(true);
        ir.colours.push(None);
    } else {
        return Err(Error::MalformedFace {
            reason: "`v` needs at least 2 components".to_string(),
        });
    }
    Ok(())
}

fn parse_tex_coord(rest: &str, ir: &mut ObjIr) -> Result<(), Error> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(Error::MalformedFace {
            reason: "`vt` needs at least 1 component".to_string(),
        });
    }
    let u: f32 = tokens[0].parse().map_err(|_| Error::MalformedFace {
        reason: format!("expected a float, found `{}`", tokens[0]),
    })?;
    let v: f32 = if tokens.len() > 1 {
        tokens[1].parse().map_err(|_| Error::MalformedFace {
            reason: format!("expected a float, found `{}`", tokens[1]),
        })?
    } else {
        0.0
    };
    ir.tex_coords.push([u, v]);
    Ok(())
}

fn parse_normal(rest: &str, ir: &mut ObjIr) -> Result<(), Error> {
    ir.normals.push(parse_floats(rest)?);
    Ok(())
}

fn current_object(ir: &mut ObjIr) -> &mut Object {
    ir.objects.last_mut().expect("an Object is always pushed up front")
}

fn current_mesh<'a>(ir: &'a mut ObjIr) -> &'a mut ObjMesh {
    let object = ir.objects.last_mut().expect("an Object is always pushed up front");
    if object.meshes.is_empty() {
        object.meshes.push(ObjMesh::default());
    }
    object.meshes.last_mut().unwrap()
}

fn start_object(rest: &str, ir: &mut ObjIr) {
    let name = (!rest.is_empty()).then(|| rest.to_string());
    // "if current object's mesh has no faces, reuse instead" (spec.md §4.4).
    let reuse = ir
        .objects
        .last()
        .map(|object| object.meshes.iter().all(ObjMesh::is_empty))
        .unwrap_or(false);
    if reuse {
        current_object(ir).name = name;
    } else {
        ir.objects.push(Object { name, meshes: Vec::new() });
    }
}

fn start_group(rest: &str, ir: &mut ObjIr, pending_material: &mut Option<String>) {
    let name = (!rest.is_empty()).then(|| rest.to_string());
    let object = current_object(ir);
    let reuse = object.meshes.last().map(ObjMesh::is_empty).unwrap_or(false);
    if reuse {
        let mesh = object.meshes.last_mut().unwrap();
        mesh.name = name;
    } else {
        object.meshes.push(ObjMesh {
            name,
            faces: Vec::new(),
            material: pending_material.clone(),
        });
    }
}

fn bind_material(rest: &str, ir: &mut ObjIr, pending_material: &mut Option<String>) {
    let name = rest.trim().to_string();
    *pending_material = Some(name.clone());
    let mesh = current_mesh(ir);
    if mesh.material.is_none() && mesh.is_empty() {
        mesh.material = Some(name);
    }
}

/// Resolves a 1-based (or negative, relative-to-end) OBJ index against a
/// pool of `len` entries already appended.
fn resolve_index(raw: i64, len: usize) -> Option<usize> {
    if raw > 0 {
        let index = raw as usize - 1;
        (index < len).then_some(index)
    } else if raw < 0 {
        let offset = (-raw) as usize;
        (offset <= len).then(|| len - offset)
    } else {
        None
    }
}

fn parse_face_vertex(token: &str, ir: &ObjIr) -> Result<FaceVertex, Error> {
    let mut parts = token.split('/');
    let position_raw: i64 = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::MalformedFace {
            reason: format!("empty vertex reference in `{token}`"),
        })?
        .parse()
        .map_err(|_| Error::MalformedFace {
            reason: format!("expected an integer vertex index, found `{token}`"),
        })?;
    let position = resolve_index(position_raw, ir.positions.len()).ok_or_else(|| Error::MalformedFace {
        reason: format!("vertex index {position_raw} out of range"),
    })?;

    let tex_coord = match parts.next() {
        Some(tc) if !tc.is_empty() => {
            let raw: i64 = tc.parse().map_err(|_| Error::MalformedFace {
                reason: format!("expected an integer tex-coord index, found `{tc}`"),
            })?;
            if ir.tex_coords.is_empty() {
                return Err(Error::MalformedFace {
                    reason: "face references a tex-coord but no `vt` lines were parsed".to_string(),
                });
            }
            Some(resolve_index(raw, ir.tex_coords.len()).ok_or_else(|| Error::MalformedFace {
                reason: format!("tex-coord index {raw} out of range"),
            })?)
        }
        _ => None,
    };

    let normal = match parts.next() {
        Some(n) if !n.is_empty() => {
            let raw: i64 = n.parse().map_err(|_| Error::MalformedFace {
                reason: format!("expected an integer normal index, found `{n}`"),
            })?;
            if ir.normals.is_empty() {
                return Err(Error::MalformedFace {
                    reason: "face references a normal but no `vn` lines were parsed".to_string(),
                });
            }
            Some(resolve_index(raw, ir.normals.len()).ok_or_else(|| Error::MalformedFace {
                reason: format!("normal index {raw} out of range"),
            })?)
        }
        _ => None,
    };

    Ok(FaceVertex { position, tex_coord, normal })
}

fn mode_for(vertex_count: usize, hint: FaceMode) -> FaceMode {
    if hint != FaceMode::NONE {
        return hint;
    }
    match vertex_count {
        1 => FaceMode::POINT,
        2 => FaceMode::LINE,
        3 => FaceMode::TRIANGLE,
        4 => FaceMode::QUAD,
        _ => FaceMode::TRIANGLE,
    }
}

fn parse_face(rest: &str, ir: &mut ObjIr, hint: FaceMode) -> Result<(), Error> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(Error::MalformedFace {
            reason: "face statement has no vertices".to_string(),
        });
    }

    let vertices: Vec<FaceVertex> = tokens.iter().map(|token| parse_face_vertex(token, ir)).collect::<Result<_, _>>()?;

    // The canonical data model tops out at Quad; wider polygons are
    // fan-triangulated here rather than carried through as an n-gon.
    if vertices.len() > 4 && hint == FaceMode::NONE {
        for i in 1..vertices.len() - 1 {
            let face = Face {
                vertices: vec![vertices[0], vertices[i], vertices[i + 1]],
                mode: FaceMode::TRIANGLE,
            };
            current_mesh(ir).faces.push(face);
        }
        return Ok(());
    }

    let mode = mode_for(vertices.len(), hint);
    current_mesh(ir).faces.push(Face { vertices, mode });
    Ok(())
}
