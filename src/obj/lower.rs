//! Lowers an [`ObjIr`] into the canonical [`Scene`] (component H, OBJ
//! half). See `spec.md` §4.8's OBJ → canonical mapping.

use glam::Mat4;

use crate::error::Error;
use crate::image::{ClampMode, Image};
use crate::material::{Material, ScalarKey, TextureKey};
use crate::scene::{Dimension, FaceMode, Mesh, Model, Node, Scene, NO_MATERIAL};

use super::ir::{Face, ObjIr, ObjMaterial, Object};

/// Lowers `ir` into a canonical [`Scene`]. A well-formed empty OBJ file
/// (no `v`/`f` statements at all) lowers to an empty scene with zero
/// models, per spec.md §8's boundary behaviour.
pub fn lower(ir: &ObjIr) -> Result<Scene, Error> {
    let mut materials = Vec::with_capacity(ir.materials.len());
    let mut material_indices = std::collections::HashMap::new();
    // Deterministic order: materials are emitted in a fixed sort so repeat
    // imports of the same file always produce the same material pool order.
    let mut names: Vec<&String> = ir.materials.keys().collect();
    names.sort();
    for name in names {
        material_indices.insert(name.clone(), materials.len());
        materials.push(lower_material(&ir.materials[name])?);
    }

    let mut models = Vec::new();
    for object in &ir.objects {
        if object.meshes.iter().all(|m| m.faces.is_empty()) {
            continue;
        }
        models.push(lower_object(object, ir, &material_indices));
    }

    let root_nodes = if models.is_empty() {
        Vec::new()
    } else {
        (0..models.len())
            .map(|index| Node {
                name: None,
                local_transform: Mat4::IDENTITY,
                model_index: Some(index),
                children: Vec::new(),
            })
            .collect()
    };

    Ok(Scene { models, materials, root_nodes })
}

fn lower_object(object: &Object, ir: &ObjIr, material_indices: &std::collections::HashMap<String, usize>) -> Model {
    let meshes = object
        .meshes
        .iter()
        .filter(|mesh| !mesh.faces.is_empty())
        .map(|mesh| lower_mesh(mesh, ir, material_indices))
        .collect();
    Model {
        name: object.name.clone(),
        meshes,
    }
}

fn lower_mesh(mesh: &super::ir::ObjMesh, ir: &ObjIr, material_indices: &std::collections::HashMap<String, usize>) -> Mesh {
    let mut out = Mesh::empty();
    out.material_index = mesh
        .material
        .as_ref()
        .and_then(|name| material_indices.get(name))
        .copied()
        .unwrap_or(NO_MATERIAL);

    let has_tex_coords = mesh.faces.iter().any(|f| f.vertices.iter().any(|v| v.tex_coord.is_some()));
    let has_normals = mesh.faces.iter().any(|f| f.vertices.iter().any(|v| v.normal.is_some()));
    let has_colours = mesh.faces.iter().any(|f| f.vertices.iter().any(|v| ir.colours[v.position].is_some()));
    let any_2d = mesh.faces.iter().any(|f| f.vertices.iter().any(|v| ir.position_is_2d[v.position]));

    if has_tex_coords {
        out.tex_coords[0] = Some(Vec::new());
    }
    if has_normals {
        out.normals = Some(Vec::new());
    }
    if has_colours {
        out.colours = Some(Vec::new());
    }

    let mut face_mode = FaceMode::NONE;
    for face in &mesh.faces {
        append_face(&mut out, face, ir);
        face_mode = face_mode.union(face.mode);
    }
    out.face_mode = face_mode;
    out.dimension = if face_mode == FaceMode::POINT {
        Dimension::D1
    } else if any_2d {
        Dimension::D2
    } else {
        Dimension::D3
    };

    out
}

fn append_face(mesh: &mut Mesh, face: &Face, ir: &ObjIr) {
    for vertex in &face.vertices {
        let index = mesh.positions.len() as u32;
        mesh.positions.push(ir.positions[vertex.position]);
        if let Some(colours) = &mut mesh.colours {
            colours.push(ir.colours[vertex.position].unwrap_or([1.0, 1.0, 1.0, 1.0]));
        }
        if let Some(normals) = &mut mesh.normals {
            normals.push(vertex.normal.map(|i| ir.normals[i]).unwrap_or([0.0, 0.0, 0.0]));
        }
        if let Some(tex_coords) = &mut mesh.tex_coords[0] {
            tex_coords.push(vertex.tex_coord.map(|i| ir.tex_coords[i]).unwrap_or([0.0, 0.0]));
        }
        mesh.indices.push(index);
    }
}

fn clamp_mode(clamp: bool) -> ClampMode {
    if clamp {
        ClampMode::ClampToEdge
    } else {
        ClampMode::Repeat
    }
}

fn lower_material(material: &ObjMaterial) -> Result<Material, Error> {
    let mut out = Material::new();
    out.name = Some(material.name.clone());

    if let Some([r, g, b]) = material.diffuse {
        out.set_vec4(ScalarKey::AlbedoColour, [r, g, b, 1.0]);
    }
    if let Some([r, g, b]) = material.ambient {
        out.set_vec4(ScalarKey::AmbientColour, [r, g, b, 1.0]);
    }
    if let Some([r, g, b]) = material.specular {
        out.set_vec4(ScalarKey::SpecularColour, [r, g, b, 1.0]);
    }
    if let Some([r, g, b]) = material.emissive {
        out.set_vec4(ScalarKey::EmissiveColour, [r, g, b, 1.0]);
    }
    if let Some(ns) = material.shininess {
        out.set_float(ScalarKey::SpecularStrength, ns);
    }
    if let Some(opacity) = material.opacity {
        out.set_float(ScalarKey::Transparency, 1.0 - opacity);
    }
    if let Some(ior) = material.ior {
        out.set_float(ScalarKey::Ior, ior);
    }
    if let Some(roughness) = material.roughness {
        out.set_float(ScalarKey::Roughness, roughness);
    }
    if let Some(metallic) = material.metallic {
        out.set_float(ScalarKey::Metallic, metallic);
    }
    if let Some(clearcoat_roughness) = material.clearcoat_roughness {
        out.set_float(ScalarKey::ClearcoatRoughness, clearcoat_roughness);
    }
    if let Some(clearcoat) = material.clearcoat_thickness {
        out.set_float(ScalarKey::Clearcoat, clearcoat);
    }
    if let Some(anisotropy) = material.anisotropy {
        out.set_float(ScalarKey::Anisotropy, anisotropy);
    }
    if let Some(rotation) = material.anisotropy_rotation {
        out.set_float(ScalarKey::AnisotropyRotation, rotation);
    }

    for (slot, texture) in &material.textures {
        let image = Image::pending_path(texture.path.clone()).with_settings(clamp_mode(texture.clamp), texture.orientation);
        out.set_texture(*slot, image);
        if *slot == TextureKey::Diffuse {
            // `Kd`'s map_Kd is the de-facto albedo slot most renderers read.
            let image = Image::pending_path(texture.path.clone()).with_settings(clamp_mode(texture.clamp), texture.orientation);
            out.set_texture(TextureKey::Albedo, image);
        }
    }

    Ok(out)
}
