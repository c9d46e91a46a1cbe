//! `ConvertToRightHanded`: flips a left-handed source (glTF) scene into
//! OCASI's right-handed target convention. A no-op for sources that are
//! already right-handed (OBJ). See `spec.md` §4.9 and §9's open-question
//! resolution (recorded in `DESIGN.md`): this crate keys the check on the
//! importer's reported handedness rather than the original's copy-pasted
//! `GetProcessType`/always-true `NeedsProcessing`.

use crate::scene::{FaceMode, Mesh, Node, Scene};

use super::SourceHandedness;

pub fn needs_processing(handedness: SourceHandedness) -> bool {
    handedness == SourceHandedness::LeftHanded
}

pub fn execute(scene: &mut Scene) {
    for model in &mut scene.models {
        for mesh in &mut model.meshes {
            convert_mesh(mesh);
        }
    }
    for root in &mut scene.root_nodes {
        convert_node(root);
    }
}

fn convert_mesh(mesh: &mut Mesh) {
    for position in &mut mesh.positions {
        position[2] = -position[2];
    }
    if let Some(normals) = &mut mesh.normals {
        for normal in normals {
            normal[2] = -normal[2];
        }
    }
    if let Some(tangents) = &mut mesh.tangents {
        for tangent in tangents {
            tangent[2] = -tangent[2];
        }
    }

    let stride = match mesh.face_mode {
        FaceMode::TRIANGLE => Some(3),
        FaceMode::QUAD => Some(4),
        FaceMode::LINE | FaceMode::POINT | FaceMode::NONE => None,
        mixed => {
            log::warn!("ConvertToRightHanded: skipping winding flip for a mesh with mixed face mode {mixed:?}");
            None
        }
    };
    if let Some(stride) = stride {
        for chunk in mesh.indices.chunks_exact_mut(stride) {
            chunk.reverse();
        }
    }
}

/// Negates the rotation/scale block's third row and column (the (2,2)
/// entry is hit by both and so keeps its original sign) and separately
/// negates the translation's z component.
fn convert_transform(transform: &mut glam::Mat4) {
    transform.x_axis.z = -transform.x_axis.z;
    transform.y_axis.z = -transform.y_axis.z;
    transform.z_axis.x = -transform.z_axis.x;
    transform.z_axis.y = -transform.z_axis.y;
    transform.w_axis.z = -transform.w_axis.z;
}

fn convert_node(node: &mut Node) {
    convert_transform(&mut node.local_transform);
    for child in &mut node.children {
        convert_node(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Dimension, Model};
    use glam::Mat4;

    fn triangle_mesh() -> Mesh {
        let mut mesh = Mesh::empty();
        mesh.positions = vec![[0.0, 0.0, 1.0], [1.0, 0.0, 2.0], [0.0, 1.0, 3.0]];
        mesh.indices = vec![0, 1, 2];
        mesh.face_mode = FaceMode::TRIANGLE;
        mesh.dimension = Dimension::D3;
        mesh
    }

    #[test]
    fn negates_z_and_swaps_winding() {
        let mut mesh = triangle_mesh();
        convert_mesh(&mut mesh);
        assert_eq!(mesh.positions, vec![[0.0, 0.0, -1.0], [1.0, 0.0, -2.0], [0.0, 1.0, -3.0]]);
        assert_eq!(mesh.indices, vec![2, 1, 0]);
    }

    #[test]
    fn is_an_involution_on_vertices_and_winding() {
        let mut mesh = triangle_mesh();
        let original = mesh.clone();
        convert_mesh(&mut mesh);
        convert_mesh(&mut mesh);
        assert_eq!(mesh.positions, original.positions);
        assert_eq!(mesh.indices, original.indices);
    }

    #[test]
    fn diagonal_entry_keeps_its_sign() {
        let mut transform = Mat4::from_cols_array(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0]);
        let original_diag = transform.z_axis.z;
        convert_transform(&mut transform);
        assert_eq!(transform.z_axis.z, original_diag);
    }

    #[test]
    fn skips_model_with_no_faces() {
        let mut scene = Scene::empty();
        scene.models.push(Model::default());
        execute(&mut scene);
        assert!(scene.models[0].meshes.is_empty());
    }
}
