//! The canonical, format-agnostic scene graph every importer lowers into.
//!
//! Whatever the source file looked like, a successful import always ends
//! up as one [`Scene`]: a flat pool of [`Model`]s (each made of one or
//! more [`Mesh`]es), a flat pool of [`Material`]s, and a tree of [`Node`]s
//! that places model instances in space.

use glam::Mat4;

use crate::material::Material;

/// Sentinel used in [`Mesh::material_index`] when a mesh has no material
/// assigned (an OBJ face group with no preceding `usemtl`, for instance).
pub const NO_MATERIAL: usize = usize::MAX;

/// What kind of primitive a mesh's index buffer is organized into.
///
/// OBJ allows a single object to mix point, line and polygon statements;
/// when more than one shows up in the same mesh the bits are OR'd
/// together, so callers must check with [`FaceMode::contains`] rather
/// than equality.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub struct FaceMode(u8);

impl FaceMode {
    pub const NONE: FaceMode = FaceMode(0);
    pub const POINT: FaceMode = FaceMode(1 << 0);
    pub const LINE: FaceMode = FaceMode(1 << 1);
    pub const TRIANGLE: FaceMode = FaceMode(1 << 2);
    pub const QUAD: FaceMode = FaceMode(1 << 3);

    /// Combines two face modes, e.g. a mesh with both triangles and quads
    /// before triangulation runs.
    pub fn union(self, other: FaceMode) -> FaceMode {
        FaceMode(self.0 | other.0)
    }

    /// Whether `self` includes every bit set in `other`.
    pub fn contains(self, other: FaceMode) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether more than one primitive kind is present.
    pub fn is_mixed(self) -> bool {
        self.0.count_ones() > 1
    }
}

impl std::ops::BitOr for FaceMode {
    type Output = FaceMode;
    fn bitor(self, rhs: FaceMode) -> FaceMode {
        self.union(rhs)
    }
}

/// The dimensionality of a mesh's vertex positions, as implied by the
/// source format and its topology.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dimension {
    /// A point cloud or curve control-point set with no connectivity.
    D1,
    /// A 2D shape, e.g. a glTF `LINE_STRIP` used for UI overlays.
    D2,
    /// An ordinary 3D surface mesh. The overwhelming common case.
    D3,
}

/// One drawable surface: a flat vertex-attribute layout plus an index
/// buffer and a reference to the material it's drawn with.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// Per-vertex positions. Always present and always the same length as
    /// every other populated attribute array.
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex RGBA vertex colours, if the source provided any.
    pub colours: Option<Vec<[f32; 4]>>,
    /// Per-vertex normals, if the source provided any (otherwise
    /// `GenerateNormals` may fill this in during post-processing).
    pub normals: Option<Vec<[f32; 3]>>,
    /// Per-vertex tangents (xyz + handedness in `w`), if available.
    pub tangents: Option<Vec<[f32; 4]>>,
    /// Up to 5 sets of per-vertex texture coordinates, indexed by set
    /// number. Unused sets are `None`.
    pub tex_coords: [Option<Vec<[f32; 2]>>; 5],
    /// Flat index buffer. Its interpretation depends on `face_mode`: 1
    /// index per vertex for points, 2 per segment for lines, 3 per
    /// triangle, or 4 per quad (pre-triangulation).
    pub indices: Vec<u32>,
    /// Index into the owning [`Scene`]'s `materials`, or [`NO_MATERIAL`].
    pub material_index: usize,
    /// What kind of primitive `indices` is grouped into.
    pub face_mode: FaceMode,
    /// The dimensionality implied by the source topology.
    pub dimension: Dimension,
}

impl Mesh {
    /// An empty mesh with no material and 3D triangle topology, ready to
    /// be filled in by a parser.
    pub fn empty() -> Self {
        Mesh {
            positions: Vec::new(),
            colours: None,
            normals: None,
            tangents: None,
            tex_coords: Default::default(),
            indices: Vec::new(),
            material_index: NO_MATERIAL,
            face_mode: FaceMode::NONE,
            dimension: Dimension::D3,
        }
    }

    /// Number of vertices, derived from `positions`.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::D3
    }
}

/// A named group of meshes, corresponding to an OBJ `o`/`g` group or a
/// glTF `mesh` object.
#[derive(Clone, Debug, Default)]
pub struct Model {
    /// The model's name, if the source provided one.
    pub name: Option<String>,
    /// The meshes that make up this model.
    pub meshes: Vec<Mesh>,
}

/// A single entry in the node tree: a local transform, an optional mesh
/// instance, and owned children.
///
/// Children are owned directly by their parent rather than through
/// shared-pointer cycles; a node that needs to walk upward does so via
/// the index supplied by whoever is traversing the tree, not a pointer
/// stored on itself. This keeps the tree a strict DAG with no reference
/// cycles to break on drop.
#[derive(Clone, Debug)]
pub struct Node {
    /// The node's name, if the source provided one.
    pub name: Option<String>,
    /// This node's transform relative to its parent.
    pub local_transform: Mat4,
    /// Index into the owning [`Scene`]'s `models`, if this node
    /// instantiates one.
    pub model_index: Option<usize>,
    /// Child nodes, owned directly.
    pub children: Vec<Node>,
}

impl Node {
    /// A childless, mesh-less node at the identity transform.
    pub fn empty() -> Self {
        Node {
            name: None,
            local_transform: Mat4::IDENTITY,
            model_index: None,
            children: Vec::new(),
        }
    }

    /// Depth-first visits `self` and every descendant, passing each node
    /// to `visitor` along with its accumulated world transform.
    pub fn walk(&self, parent_world: Mat4, visitor: &mut impl FnMut(&Node, Mat4)) {
        let world = parent_world * self.local_transform;
        visitor(self, world);
        for child in &self.children {
            child.walk(world, visitor);
        }
    }

    /// Same as [`Node::walk`] but allows mutation of each visited node.
    pub fn walk_mut(&mut self, visitor: &mut impl FnMut(&mut Node)) {
        visitor(self);
        for child in &mut self.children {
            child.walk_mut(visitor);
        }
    }
}

/// The result of a successful import: every model, material and node
/// produced while lowering the source file's intermediate representation.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Flat pool of models referenced by node `model_index`es.
    pub models: Vec<Model>,
    /// Flat pool of materials referenced by mesh `material_index`es.
    pub materials: Vec<Material>,
    /// The forest of root nodes. OBJ files always produce exactly one;
    /// glTF files may declare several root-level nodes in a scene.
    pub root_nodes: Vec<Node>,
}

impl Scene {
    /// An empty scene, as a starting point for a parser to fill in.
    pub fn empty() -> Self {
        Scene {
            models: Vec::new(),
            materials: Vec::new(),
            root_nodes: Vec::new(),
        }
    }

    /// Depth-first visits every node in every root, passing each one its
    /// accumulated world transform.
    pub fn walk(&self, mut visitor: impl FnMut(&Node, Mat4)) {
        for root in &self.root_nodes {
            root.walk(Mat4::IDENTITY, &mut visitor);
        }
    }

    /// Same as [`Scene::walk`] but mutable.
    pub fn walk_mut(&mut self, mut visitor: impl FnMut(&mut Node)) {
        for root in &mut self.root_nodes {
            root.walk_mut(&mut visitor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_mode_union_and_contains() {
        let mixed = FaceMode::TRIANGLE.union(FaceMode::QUAD);
        assert!(mixed.is_mixed());
        assert!(mixed.contains(FaceMode::TRIANGLE));
        assert!(mixed.contains(FaceMode::QUAD));
        assert!(!mixed.contains(FaceMode::LINE));
    }

    #[test]
    fn walk_accumulates_world_transform() {
        let mut root = Node::empty();
        root.local_transform = Mat4::from_translation(glam::Vec3::new(1.0, 0.0, 0.0));
        let mut child = Node::empty();
        child.local_transform = Mat4::from_translation(glam::Vec3::new(0.0, 2.0, 0.0));
        root.children.push(child);

        let mut seen = Vec::new();
        root.walk(Mat4::IDENTITY, &mut |node, world| {
            seen.push((node.children.len(), world.w_axis));
        });

        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].1, glam::Vec4::new(1.0, 2.0, 0.0, 1.0));
    }
}
