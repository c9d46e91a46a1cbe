//! `Triangulate`: fan-triangulates `Quad` meshes. See `spec.md` §4.9.
//! spec.md documents fan-triangulation explicitly, so this implements it
//! even though the original's equivalent pass was a stub (see `DESIGN.md`).

use crate::scene::{FaceMode, Mesh, Scene};

pub fn needs_processing(scene: &Scene) -> bool {
    scene.models.iter().any(|model| model.meshes.iter().any(|mesh| mesh.face_mode.contains(FaceMode::QUAD)))
}

pub fn execute(scene: &mut Scene) {
    for model in &mut scene.models {
        for mesh in &mut model.meshes {
            triangulate_mesh(mesh);
        }
    }
}

fn triangulate_mesh(mesh: &mut Mesh) {
    if !mesh.face_mode.contains(FaceMode::QUAD) {
        return;
    }
    if mesh.face_mode.is_mixed() {
        log::warn!("Triangulate: skipping a mesh with mixed face mode {:?}", mesh.face_mode);
        return;
    }

    let mut triangles = Vec::with_capacity(mesh.indices.len() / 4 * 6);
    for quad in mesh.indices.chunks_exact(4) {
        let [a, b, c, d] = [quad[0], quad[1], quad[2], quad[3]];
        triangles.extend_from_slice(&[a, b, c, a, c, d]);
    }
    mesh.indices = triangles;
    mesh.face_mode = FaceMode::TRIANGLE;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Dimension, Model};

    fn quad_mesh() -> Mesh {
        let mut mesh = Mesh::empty();
        mesh.positions = vec![[0.0, 0.0, 0.0]; 4];
        mesh.indices = vec![0, 1, 2, 3];
        mesh.face_mode = FaceMode::QUAD;
        mesh.dimension = Dimension::D3;
        mesh
    }

    #[test]
    fn fans_a_quad_into_two_triangles() {
        let mut mesh = quad_mesh();
        triangulate_mesh(&mut mesh);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.face_mode, FaceMode::TRIANGLE);
    }

    #[test]
    fn no_mesh_contains_quad_after_running() {
        let mut scene = Scene::empty();
        let mut model = Model::default();
        model.meshes.push(quad_mesh());
        scene.models.push(model);
        execute(&mut scene);
        assert!(!needs_processing(&scene));
    }

    #[test]
    fn running_twice_is_idempotent() {
        let mut scene = Scene::empty();
        let mut model = Model::default();
        model.meshes.push(quad_mesh());
        scene.models.push(model);
        execute(&mut scene);
        let after_first = scene.clone();
        execute(&mut scene);
        assert_eq!(scene.models[0].meshes[0].indices, after_first.models[0].meshes[0].indices);
    }

    #[test]
    fn triangle_only_mesh_is_left_alone() {
        let mut mesh = Mesh::empty();
        mesh.face_mode = FaceMode::TRIANGLE;
        mesh.indices = vec![0, 1, 2];
        triangulate_mesh(&mut mesh);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }
}
