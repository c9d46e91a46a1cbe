//! Lowers a parsed and buffer-resolved glTF [`Root`] into the canonical
//! [`Scene`] (component H, glTF half). See `spec.md` §4.8 for the mapping
//! this mirrors.

use std::path::Path;

use glam::{Mat4, Quat, Vec3};
use ocasi_json::buffer::View;
use ocasi_json::material::Material as JsonMaterial;
use ocasi_json::mesh::{Mesh as JsonMesh, Mode, Semantic};
use ocasi_json::scene::Node as JsonNode;
use ocasi_json::texture::{Texture as JsonTexture, WrappingMode};
use ocasi_json::validation::Checked;
use ocasi_json::{Index, Root};

use crate::error::Error;
use crate::gltf::accessor::{read_floats, read_indices};
use crate::gltf::buffers::resolve_uri;
use crate::image::{ClampMode, Image};
use crate::material::{Material, ScalarKey, TextureKey};
use crate::scene::{Dimension, FaceMode, Mesh, Model, Node, Scene, NO_MATERIAL};

/// Lowers `root` (with its buffers already resolved) into a canonical
/// [`Scene`]. `base_dir` resolves external image URIs.
pub fn lower(root: &Root, buffers: &[Vec<u8>], base_dir: &Path) -> Result<Scene, Error> {
    let materials = root.materials.iter().map(|m| lower_material(m, root, buffers, base_dir)).collect::<Result<Vec<_>, _>>()?;
    let models = root
        .meshes
        .iter()
        .map(|mesh| lower_model(mesh, root, buffers))
        .collect::<Result<Vec<_>, _>>()?;

    let root_nodes = lower_node_forest(root)?;

    Ok(Scene { models, materials, root_nodes })
}

fn read_buffer_view(root: &Root, buffers: &[Vec<u8>], view_index: Index<View>) -> Result<Vec<u8>, Error> {
    let view = root.get(&view_index).ok_or_else(|| Error::BoundsViolation {
        location: format!("bufferView {}", view_index.value()),
    })?;
    let buffer = buffers.get(view.buffer.value()).ok_or_else(|| Error::BoundsViolation {
        location: format!("buffer {}", view.buffer.value()),
    })?;
    let start = view.byte_offset.map(|o| o.value()).unwrap_or(0);
    let end = start + view.byte_length.value();
    buffer.get(start..end).map(<[u8]>::to_vec).ok_or_else(|| Error::BoundsViolation {
        location: format!("bufferView {} image data", view_index.value()),
    })
}

fn clamp_mode_of(wrap: Checked<WrappingMode>) -> ClampMode {
    match wrap {
        Checked::Valid(WrappingMode::ClampToEdge) => ClampMode::ClampToEdge,
        Checked::Valid(WrappingMode::MirroredRepeat) => ClampMode::MirroredRepeat,
        Checked::Valid(WrappingMode::Repeat) | Checked::Invalid => ClampMode::Repeat,
    }
}

/// Builds a still-pending [`Image`] handle for `image_index`, applying the
/// sampler's `wrapS` mode. Decoding stays deferred to the handle's own
/// `load()`: a `uri`-backed image becomes `pending_path`/`pending_memory`
/// without ever touching the `image` crate here, and a `bufferView`-backed
/// (embedded) image is handed its still-encoded bytes the same way.
fn lower_texture(root: &Root, buffers: &[Vec<u8>], base_dir: &Path, texture_index: Index<JsonTexture>) -> Result<Image, Error> {
    let texture = root.get(&texture_index).ok_or_else(|| Error::BoundsViolation {
        location: format!("texture {}", texture_index.value()),
    })?;
    let source_index = texture.primary_source();
    let source = root.get(&source_index).ok_or_else(|| Error::BoundsViolation {
        location: format!("image {}", source_index.value()),
    })?;

    let image = if let Some(uri) = &source.uri {
        if uri.starts_with("data:") {
            Image::pending_memory(resolve_uri(uri, base_dir)?)
        } else {
            Image::pending_path(base_dir.join(uri))
        }
    } else if let Some(view_index) = source.buffer_view {
        Image::pending_memory(read_buffer_view(root, buffers, view_index)?)
    } else {
        return Err(Error::MissingField {
            object: format!("images[{}]", source_index.value()),
            field: "uri or bufferView".to_string(),
        });
    };

    let clamp = match texture.sampler {
        Some(sampler_index) => {
            let sampler = root.get(&sampler_index).ok_or_else(|| Error::BoundsViolation {
                location: format!("sampler {}", sampler_index.value()),
            })?;
            clamp_mode_of(sampler.wrap_s)
        }
        None => ClampMode::Repeat,
    };

    Ok(image.with_settings(clamp, Default::default()))
}

fn lower_material(material: &JsonMaterial, root: &Root, buffers: &[Vec<u8>], base_dir: &Path) -> Result<Material, Error> {
    let mut out = Material::new();
    out.name = material.name.clone();

    let pbr = &material.pbr_metallic_roughness;
    out.set_vec4(ScalarKey::AlbedoColour, pbr.base_color_factor.0);
    out.set_float(ScalarKey::Roughness, pbr.roughness_factor.0);
    out.set_float(ScalarKey::Metallic, pbr.metallic_factor.0);
    let emissive = material.emissive_factor.0;
    out.set_vec4(ScalarKey::EmissiveColour, [emissive[0], emissive[1], emissive[2], 1.0]);
    out.set_float(ScalarKey::Transparency, 1.0 - pbr.base_color_factor.0[3]);
    out.set_bool(ScalarKey::UseCombinedMetallicRoughnessTexture, pbr.metallic_roughness_texture.is_some());

    if let Some(info) = &pbr.base_color_texture {
        out.set_texture(TextureKey::Albedo, lower_texture(root, buffers, base_dir, info.index)?);
    }
    if let Some(info) = &pbr.metallic_roughness_texture {
        out.set_texture(TextureKey::CombinedMetallicRoughness, lower_texture(root, buffers, base_dir, info.index)?);
    }
    if let Some(normal) = &material.normal_texture {
        out.set_texture(TextureKey::Normal, lower_texture(root, buffers, base_dir, normal.index)?);
    }
    if let Some(occlusion) = &material.occlusion_texture {
        out.set_texture(TextureKey::Occlusion, lower_texture(root, buffers, base_dir, occlusion.index)?);
    }
    if let Some(info) = &material.emissive_texture {
        out.set_texture(TextureKey::Emissive, lower_texture(root, buffers, base_dir, info.index)?);
    }

    if let Some(extensions) = &material.extensions {
        lower_material_extensions(&mut out, extensions, root, buffers, base_dir)?;
    }

    Ok(out)
}

/// Maps the Khronos material extension blocks onto the canonical
/// [`Material`]'s scalar keys and texture slots. Each block is itself
/// optional and independently feature-gated, mirroring how
/// `ocasi-json`'s `extensions::material::Material` declares them.
fn lower_material_extensions(
    out: &mut Material,
    extensions: &ocasi_json::extensions::material::Material,
    root: &Root,
    buffers: &[Vec<u8>],
    base_dir: &Path,
) -> Result<(), Error> {
    #[cfg(feature = "KHR_materials_ior")]
    if let Some(ior) = &extensions.ior {
        out.set_float(ScalarKey::Ior, ior.ior);
    }

    #[cfg(feature = "KHR_materials_emissive_strength")]
    if let Some(emissive_strength) = &extensions.emissive_strength {
        out.set_float(ScalarKey::EmissiveStrength, emissive_strength.emissive_strength);
    }

    #[cfg(feature = "KHR_materials_specular")]
    if let Some(specular) = &extensions.specular {
        out.set_float(ScalarKey::SpecularStrength, specular.specular_factor);
        if let Some(info) = &specular.specular_texture {
            out.set_texture(TextureKey::Specular, lower_texture(root, buffers, base_dir, info.index)?);
        }
    }

    #[cfg(feature = "KHR_materials_clearcoat")]
    if let Some(clearcoat) = &extensions.clearcoat {
        out.set_float(ScalarKey::Clearcoat, clearcoat.clearcoat_factor);
        out.set_float(ScalarKey::ClearcoatRoughness, clearcoat.clearcoat_roughness_factor);
        if let Some(info) = &clearcoat.clearcoat_texture {
            out.set_texture(TextureKey::Clearcoat, lower_texture(root, buffers, base_dir, info.index)?);
        }
        if let Some(info) = &clearcoat.clearcoat_roughness_texture {
            out.set_texture(TextureKey::ClearcoatRoughness, lower_texture(root, buffers, base_dir, info.index)?);
        }
        if let Some(info) = &clearcoat.clearcoat_normal_texture {
            out.set_texture(TextureKey::ClearcoatNormal, lower_texture(root, buffers, base_dir, info.index)?);
        }
    }

    #[cfg(feature = "KHR_materials_sheen")]
    if let Some(sheen) = &extensions.sheen {
        if let Some(info) = &sheen.sheen_color_texture {
            out.set_texture(TextureKey::Sheen, lower_texture(root, buffers, base_dir, info.index)?);
        }
    }

    #[cfg(feature = "KHR_materials_transmission")]
    if let Some(transmission) = &extensions.transmission {
        out.set_float(ScalarKey::Transparency, 1.0 - transmission.transmission_factor);
        if let Some(info) = &transmission.transmission_texture {
            out.set_texture(TextureKey::Transmission, lower_texture(root, buffers, base_dir, info.index)?);
        }
    }

    #[cfg(feature = "KHR_materials_volume")]
    if let Some(volume) = &extensions.volume {
        if let Some(info) = &volume.thickness_texture {
            out.set_texture(TextureKey::VolumeThickness, lower_texture(root, buffers, base_dir, info.index)?);
        }
    }

    #[cfg(feature = "KHR_materials_iridescence")]
    if let Some(iridescence) = &extensions.iridescence {
        if let Some(info) = &iridescence.iridescence_texture {
            out.set_texture(TextureKey::Iridescence, lower_texture(root, buffers, base_dir, info.index)?);
        }
        if let Some(info) = &iridescence.iridescence_thickness_texture {
            out.set_texture(TextureKey::IridescenceThickness, lower_texture(root, buffers, base_dir, info.index)?);
        }
    }

    #[cfg(feature = "KHR_materials_anisotropy")]
    if let Some(anisotropy) = &extensions.anisotropy {
        out.set_float(ScalarKey::Anisotropy, anisotropy.anisotropy_strength);
        out.set_float(ScalarKey::AnisotropyRotation, anisotropy.anisotropy_rotation);
        out.set_bool(ScalarKey::UseCombinedAnisotropyAnisotropyRotationTexture, anisotropy.anisotropy_texture.is_some());
        if let Some(info) = &anisotropy.anisotropy_texture {
            out.set_texture(TextureKey::CombinedAnisotropyRotation, lower_texture(root, buffers, base_dir, info.index)?);
        }
    }

    #[cfg(feature = "KHR_materials_pbrSpecularGlossiness")]
    if let Some(specular_glossiness) = &extensions.pbr_specular_glossiness {
        out.set_vec4(ScalarKey::AlbedoColour, specular_glossiness.diffuse_factor);
        out.set_vec4(ScalarKey::SpecularColour, [
            specular_glossiness.specular_factor[0],
            specular_glossiness.specular_factor[1],
            specular_glossiness.specular_factor[2],
            1.0,
        ]);
        out.set_float(ScalarKey::Roughness, 1.0 - specular_glossiness.glossiness_factor);
        if let Some(info) = &specular_glossiness.diffuse_texture {
            out.set_texture(TextureKey::Diffuse, lower_texture(root, buffers, base_dir, info.index)?);
        }
        if let Some(info) = &specular_glossiness.specular_glossiness_texture {
            out.set_texture(TextureKey::Specular, lower_texture(root, buffers, base_dir, info.index)?);
        }
    }

    Ok(())
}

fn face_mode_of(mode: Checked<Mode>) -> FaceMode {
    match mode {
        Checked::Valid(Mode::Points) => FaceMode::POINT,
        Checked::Valid(Mode::Lines) | Checked::Valid(Mode::LineLoop) | Checked::Valid(Mode::LineStrip) => FaceMode::LINE,
        Checked::Valid(Mode::Triangles) | Checked::Valid(Mode::TriangleStrip) | Checked::Valid(Mode::TriangleFan) => FaceMode::TRIANGLE,
        Checked::Invalid => FaceMode::TRIANGLE,
    }
}

/// Expands strip/fan/loop index runs to the flat per-primitive list this
/// topology implies, so the canonical `face_mode` never needs to track
/// which GL winding produced it. Point/triangle-list/line-list already are
/// flat and pass through unchanged.
fn expand_topology(mode: Checked<Mode>, indices: Vec<u32>) -> Vec<u32> {
    match mode {
        Checked::Valid(Mode::LineLoop) => {
            if indices.len() < 2 {
                return indices;
            }
            let mut out = Vec::with_capacity(indices.len() * 2);
            for window in indices.windows(2) {
                out.push(window[0]);
                out.push(window[1]);
            }
            out.push(*indices.last().unwrap());
            out.push(indices[0]);
            out
        }
        Checked::Valid(Mode::LineStrip) => {
            if indices.len() < 2 {
                return indices;
            }
            indices.windows(2).flat_map(|w| [w[0], w[1]]).collect()
        }
        Checked::Valid(Mode::TriangleStrip) => {
            if indices.len() < 3 {
                return indices;
            }
            let mut out = Vec::with_capacity((indices.len() - 2) * 3);
            for i in 0..indices.len() - 2 {
                if i % 2 == 0 {
                    out.extend([indices[i], indices[i + 1], indices[i + 2]]);
                } else {
                    out.extend([indices[i + 1], indices[i], indices[i + 2]]);
                }
            }
            out
        }
        Checked::Valid(Mode::TriangleFan) => {
            if indices.len() < 3 {
                return indices;
            }
            let mut out = Vec::with_capacity((indices.len() - 2) * 3);
            for i in 1..indices.len() - 1 {
                out.extend([indices[0], indices[i], indices[i + 1]]);
            }
            out
        }
        _ => indices,
    }
}

fn attribute_accessor<'a>(primitive: &'a ocasi_json::mesh::Primitive, semantic: Semantic) -> Option<&'a Index<ocasi_json::Accessor>> {
    primitive.attributes.iter().find_map(|(key, value)| match key {
        Checked::Valid(found) if *found == semantic => Some(value),
        _ => None,
    })
}

fn lower_model(mesh: &JsonMesh, root: &Root, buffers: &[Vec<u8>]) -> Result<Model, Error> {
    let meshes = mesh.primitives.iter().map(|primitive| lower_primitive(primitive, root, buffers)).collect::<Result<Vec<_>, _>>()?;
    Ok(Model {
        name: mesh_name(mesh),
        meshes,
    })
}

#[cfg(feature = "names")]
fn mesh_name(mesh: &JsonMesh) -> Option<String> {
    mesh.name.clone()
}

#[cfg(not(feature = "names"))]
fn mesh_name(_mesh: &JsonMesh) -> Option<String> {
    None
}

fn as_vec2(flat: Vec<f32>) -> Vec<[f32; 2]> {
    flat.chunks_exact(2).map(|c| [c[0], c[1]]).collect()
}

fn as_vec3(flat: Vec<f32>) -> Vec<[f32; 3]> {
    flat.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect()
}

fn as_vec4(flat: Vec<f32>) -> Vec<[f32; 4]> {
    flat.chunks_exact(4).map(|c| [c[0], c[1], c[2], c[3]]).collect()
}

fn lower_primitive(primitive: &ocasi_json::mesh::Primitive, root: &Root, buffers: &[Vec<u8>]) -> Result<Mesh, Error> {
    let mut mesh = Mesh::empty();
    mesh.dimension = Dimension::D3;
    mesh.face_mode = face_mode_of(primitive.mode);
    mesh.material_index = primitive.material.map(|m| m.value()).unwrap_or(NO_MATERIAL);

    if let Some(accessor) = attribute_accessor(primitive, Semantic::Positions) {
        mesh.positions = as_vec3(read_floats(root, buffers, *accessor)?);
    }
    if let Some(accessor) = attribute_accessor(primitive, Semantic::Normals) {
        mesh.normals = Some(as_vec3(read_floats(root, buffers, *accessor)?));
    }
    if let Some(accessor) = attribute_accessor(primitive, Semantic::Tangents) {
        mesh.tangents = Some(as_vec4(read_floats(root, buffers, *accessor)?));
    }
    if let Some(accessor) = attribute_accessor(primitive, Semantic::Colors(0)) {
        mesh.colours = Some(as_vec4(read_floats(root, buffers, *accessor)?));
    }
    for set in 0..5u32 {
        if let Some(accessor) = attribute_accessor(primitive, Semantic::TexCoords(set)) {
            mesh.tex_coords[set as usize] = Some(as_vec2(read_floats(root, buffers, *accessor)?));
        }
    }

    let raw_indices = match primitive.indices {
        Some(accessor) => read_indices(root, buffers, accessor)?,
        None => (0..mesh.positions.len() as u32).collect(),
    };
    mesh.indices = expand_topology(primitive.mode, raw_indices);

    Ok(mesh)
}

fn node_local_transform(node: &JsonNode) -> Mat4 {
    if let Some(matrix) = node.matrix {
        return Mat4::from_cols_array(&matrix);
    }
    let translation = node.translation.map(Vec3::from_array).unwrap_or(Vec3::ZERO);
    let rotation = node.rotation.map(|q| Quat::from_xyzw(q.0[0], q.0[1], q.0[2], q.0[3])).unwrap_or(Quat::IDENTITY);
    let scale = node.scale.map(Vec3::from_array).unwrap_or(Vec3::ONE);
    Mat4::from_scale_rotation_translation(scale, rotation, translation)
}

fn lower_node(node: &JsonNode, root: &Root) -> Result<Node, Error> {
    let children = match &node.children {
        Some(children) => children
            .iter()
            .map(|child_index| {
                let child = root.get(child_index).ok_or_else(|| Error::BoundsViolation {
                    location: format!("node {}", child_index.value()),
                })?;
                lower_node(child, root)
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(Node {
        name: node_name(node),
        local_transform: node_local_transform(node),
        model_index: node.mesh.map(|m| m.value()),
        children,
    })
}

#[cfg(feature = "names")]
fn node_name(node: &JsonNode) -> Option<String> {
    node.name.clone()
}

#[cfg(not(feature = "names"))]
fn node_name(_node: &JsonNode) -> Option<String> {
    None
}

/// Resolves the root node set: `root.scene`'s node list if present,
/// otherwise the first entry in `root.scenes`, otherwise every node that
/// is not referenced as somebody else's child (a defensive fallback for
/// documents with no scene at all).
fn lower_node_forest(root: &Root) -> Result<Vec<Node>, Error> {
    let scene = root.scene.and_then(|index| root.get(&index)).or_else(|| root.scenes.first());

    let roots: Vec<&JsonNode> = match scene {
        Some(scene) => scene
            .nodes
            .iter()
            .map(|index| {
                root.get(index).ok_or_else(|| Error::BoundsViolation {
                    location: format!("node {}", index.value()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => {
            let mut is_child = vec![false; root.nodes.len()];
            for node in &root.nodes {
                if let Some(children) = &node.children {
                    for child in children {
                        if let Some(slot) = is_child.get_mut(child.value()) {
                            *slot = true;
                        }
                    }
                }
            }
            root.nodes.iter().enumerate().filter(|(i, _)| !is_child[*i]).map(|(_, node)| node).collect()
        }
    };

    roots.into_iter().map(|node| lower_node(node, root)).collect()
}
