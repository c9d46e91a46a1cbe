//! The OBJ/MTL intermediate representation (part of the OBJ half of
//! component D): global vertex pools plus a tree of objects/groups/faces,
//! kept around only long enough for [`crate::obj::lower`] to consume it.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::image::Orientation;
use crate::scene::FaceMode;

/// One corner of a face: 1-based source indices already normalized to
/// 0-based, each resolved against the matching global pool.
#[derive(Clone, Copy, Debug, Default)]
pub struct FaceVertex {
    pub position: usize,
    pub tex_coord: Option<usize>,
    pub normal: Option<usize>,
}

/// A single `f`/`p`/`l` statement. `mode` is derived from `vertices.len()`
/// at parse time (1 = Point, 2 = Line, 3 = Triangle, 4 = Quad); anything
/// wider is fan-triangulated into multiple 3-vertex `Face`s as it's parsed,
/// since the canonical data model has no n-gon face mode beyond Quad.
#[derive(Clone, Debug)]
pub struct Face {
    pub vertices: Vec<FaceVertex>,
    pub mode: FaceMode,
}

/// One `g`-delimited group within an [`Object`], corresponding to one
/// canonical `Mesh` once lowered (OBJ's `usemtl` binds at most one
/// material per mesh, so there is never more than one canonical mesh per
/// `ObjMesh`).
#[derive(Clone, Debug, Default)]
pub struct ObjMesh {
    pub name: Option<String>,
    pub faces: Vec<Face>,
    pub material: Option<String>,
}

impl ObjMesh {
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// One `o`-delimited object, corresponding to one canonical `Model`.
#[derive(Clone, Debug, Default)]
pub struct Object {
    pub name: Option<String>,
    pub meshes: Vec<ObjMesh>,
}

/// A still-encoded texture directive from an MTL `map_*`/`norm`/`bump`
/// line: the resolved sidecar path plus whatever inline options preceded
/// it (`-clamp`, `-bm`, `-type`).
#[derive(Clone, Debug)]
pub struct ObjTextureRef {
    pub path: PathBuf,
    pub clamp: bool,
    pub bump_multiplier: Option<f32>,
    pub orientation: Orientation,
}

/// One `newmtl` block: every directive OCASI recognizes, still in MTL's
/// own vocabulary (`Kd`, `Ns`, `Pr`, ...) rather than the canonical
/// [`crate::material::ScalarKey`] space. [`crate::obj::lower`] applies the
/// §4.8 key mapping when building the canonical `Material`.
#[derive(Clone, Debug, Default)]
pub struct ObjMaterial {
    pub name: String,
    pub ambient: Option<[f32; 3]>,
    pub diffuse: Option<[f32; 3]>,
    pub specular: Option<[f32; 3]>,
    pub emissive: Option<[f32; 3]>,
    pub shininess: Option<f32>,
    pub opacity: Option<f32>,
    pub ior: Option<f32>,
    pub illum: Option<u32>,
    pub roughness: Option<f32>,
    pub metallic: Option<f32>,
    pub sheen: Option<f32>,
    pub clearcoat_thickness: Option<f32>,
    pub clearcoat_roughness: Option<f32>,
    pub anisotropy: Option<f32>,
    pub anisotropy_rotation: Option<f32>,
    pub textures: HashMap<crate::material::TextureKey, ObjTextureRef>,
}

/// Everything the OBJ/MTL parser produced from one `.obj` file and its
/// `mtllib` sidecars. Lives only for the duration of one import call.
#[derive(Clone, Debug, Default)]
pub struct ObjIr {
    pub positions: Vec<[f32; 3]>,
    /// Parallel to `positions`: `true` for a `v x y` (2-component) line.
    pub position_is_2d: Vec<bool>,
    /// Parallel to `positions`: `Some` when the `v` line carried a
    /// trailing `r g b` vertex colour.
    pub colours: Vec<Option<[f32; 4]>>,
    pub tex_coords: Vec<[f32; 2]>,
    pub normals: Vec<[f32; 3]>,
    pub objects: Vec<Object>,
    pub materials: HashMap<String, ObjMaterial>,
}
