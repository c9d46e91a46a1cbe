//! The post-processor pipeline (component I): an ordered, conditional
//! sequence of passes over an already-lowered [`Scene`]. See `spec.md`
//! §4.9.

mod collapse_child_nodes;
mod convert_to_right_handed;
mod generate_normals;
mod generate_texture_coordinates;
mod triangulate;

use crate::scene::Scene;

/// Which source format produced a `Scene`, since `ConvertToRightHanded`'s
/// applicability depends on the importer's reported handedness (spec.md
/// §4.9: glTF is left-handed and needs conversion, OBJ is already
/// right-handed and is a no-op).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SourceHandedness {
    /// glTF: `+X` right, `+Y` up, `+Z` toward the viewer is *not* how the
    /// format stores geometry on disk relative to this crate's target
    /// convention, so `ConvertToRightHanded` applies.
    LeftHanded,
    /// OBJ: already right-handed: `ConvertToRightHanded` is a no-op.
    RightHanded,
}

/// A bit-mask over the post-process steps a caller may request, OR'ed
/// with the process-wide global mask set via
/// [`crate::set_global_post_processor_options`]. Mirrors spec.md §6's
/// `options` bit-mask exactly.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub struct PostProcessSteps(u32);

impl PostProcessSteps {
    pub const NONE: PostProcessSteps = PostProcessSteps(0);
    pub const TRIANGULATE: PostProcessSteps = PostProcessSteps(1 << 0);
    pub const GENERATE_NORMALS: PostProcessSteps = PostProcessSteps(1 << 1);
    pub const GENERATE_TEXTURE_COORDINATES: PostProcessSteps = PostProcessSteps(1 << 2);
    pub const COLLAPSE_CHILD_NODES: PostProcessSteps = PostProcessSteps(1 << 3);
    pub const CONVERT_TO_RIGHT_HANDED: PostProcessSteps = PostProcessSteps(1 << 4);

    /// OR's two masks together, the same combination rule
    /// `set_global_post_processor_options` applies to every import.
    pub fn union(self, other: PostProcessSteps) -> PostProcessSteps {
        PostProcessSteps(self.0 | other.0)
    }

    /// Whether every bit set in `other` is also set in `self`.
    pub fn contains(self, other: PostProcessSteps) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for PostProcessSteps {
    type Output = PostProcessSteps;
    fn bitor(self, rhs: PostProcessSteps) -> PostProcessSteps {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for PostProcessSteps {
    fn bitor_assign(&mut self, rhs: PostProcessSteps) {
        *self = self.union(rhs);
    }
}

/// Runs every registered pass, in the fixed order spec.md §4.9 declares,
/// skipping any whose bit isn't set in `steps` or whose `needs_processing`
/// check declines the scene.
pub fn run(scene: &mut Scene, steps: PostProcessSteps, handedness: SourceHandedness) {
    if steps.contains(PostProcessSteps::CONVERT_TO_RIGHT_HANDED) && convert_to_right_handed::needs_processing(handedness) {
        convert_to_right_handed::execute(scene);
    }
    if steps.contains(PostProcessSteps::TRIANGULATE) && triangulate::needs_processing(scene) {
        triangulate::execute(scene);
    }
    if steps.contains(PostProcessSteps::GENERATE_NORMALS) && generate_normals::needs_processing(scene) {
        generate_normals::execute(scene);
    }
    if steps.contains(PostProcessSteps::COLLAPSE_CHILD_NODES) && collapse_child_nodes::needs_processing(scene) {
        collapse_child_nodes::execute(scene);
    }
    if steps.contains(PostProcessSteps::GENERATE_TEXTURE_COORDINATES) && generate_texture_coordinates::needs_processing(scene) {
        generate_texture_coordinates::execute(scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_and_contains_match_scene_face_mode_semantics() {
        let combo = PostProcessSteps::TRIANGULATE.union(PostProcessSteps::GENERATE_NORMALS);
        assert!(combo.contains(PostProcessSteps::TRIANGULATE));
        assert!(combo.contains(PostProcessSteps::GENERATE_NORMALS));
        assert!(!combo.contains(PostProcessSteps::CONVERT_TO_RIGHT_HANDED));
    }
}
