//! `GenerateNormals`: fills in per-vertex normals for triangle/quad meshes
//! that don't already have them, by accumulating per-face geometric
//! normals at each referenced vertex and averaging. See `spec.md` §4.9.

use glam::Vec3;

use crate::scene::{FaceMode, Mesh, Scene};

pub fn needs_processing(scene: &Scene) -> bool {
    scene.models.iter().any(|model| model.meshes.iter().any(mesh_needs_normals))
}

fn mesh_needs_normals(mesh: &Mesh) -> bool {
    mesh.normals.is_none() && (mesh.face_mode.contains(FaceMode::TRIANGLE) || mesh.face_mode.contains(FaceMode::QUAD))
}

pub fn execute(scene: &mut Scene) {
    for model in &mut scene.models {
        for mesh in &mut model.meshes {
            if mesh_needs_normals(mesh) {
                generate(mesh);
            } else if mesh.normals.is_none() {
                log::info!("GenerateNormals: skipping point/line mesh with no normals");
            }
        }
    }
}

fn face_triangles(mesh: &Mesh) -> Option<Vec<[u32; 3]>> {
    match mesh.face_mode {
        FaceMode::TRIANGLE => Some(mesh.indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect()),
        FaceMode::QUAD => Some(
            mesh.indices
                .chunks_exact(4)
                .flat_map(|c| [[c[0], c[1], c[2]], [c[0], c[2], c[3]]])
                .collect(),
        ),
        mixed if mixed.is_mixed() => {
            log::warn!("GenerateNormals: skipping a mesh with mixed face mode {mixed:?}");
            None
        }
        _ => None,
    }
}

fn generate(mesh: &mut Mesh) {
    let Some(triangles) = face_triangles(mesh) else {
        return;
    };

    let mut sums = vec![Vec3::ZERO; mesh.positions.len()];
    let mut counts = vec![0u32; mesh.positions.len()];

    for [a, b, c] in &triangles {
        let (a, b, c) = (*a as usize, *b as usize, *c as usize);
        let (va, vb, vc) = (Vec3::from(mesh.positions[a]), Vec3::from(mesh.positions[b]), Vec3::from(mesh.positions[c]));
        let normal = (vb - va).cross(vc - va).normalize_or_zero();
        for index in [a, b, c] {
            sums[index] += normal;
            counts[index] += 1;
        }
    }

    let normals = sums
        .iter()
        .zip(&counts)
        .map(|(sum, count)| {
            if *count == 0 {
                [0.0, 0.0, 1.0]
            } else {
                (*sum / *count as f32).normalize_or_zero().to_array()
            }
        })
        .collect();
    mesh.normals = Some(normals);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Dimension, Model};

    fn triangle_mesh() -> Mesh {
        let mut mesh = Mesh::empty();
        mesh.positions = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        mesh.indices = vec![0, 1, 2];
        mesh.face_mode = FaceMode::TRIANGLE;
        mesh.dimension = Dimension::D3;
        mesh
    }

    #[test]
    fn generates_unit_normals_facing_positive_z() {
        let mut mesh = triangle_mesh();
        generate(&mut mesh);
        let normals = mesh.normals.unwrap();
        assert_eq!(normals.len(), 3);
        for normal in normals {
            let length = Vec3::from(normal).length();
            assert!((length - 1.0).abs() < 1e-5);
            assert!((normal[2] - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn is_a_no_op_when_normals_already_present() {
        let mut mesh = triangle_mesh();
        mesh.normals = Some(vec![[0.0, 0.0, 1.0]; 3]);
        assert!(!mesh_needs_normals(&mesh));
    }

    #[test]
    fn point_mesh_is_skipped_without_error() {
        let mut mesh = Mesh::empty();
        mesh.face_mode = FaceMode::POINT;
        mesh.positions = vec![[0.0, 0.0, 0.0]];
        assert!(!mesh_needs_normals(&mesh));
    }

    #[test]
    fn needs_processing_detects_scene_missing_normals() {
        let mut scene = Scene::empty();
        let mut model = Model::default();
        model.meshes.push(triangle_mesh());
        scene.models.push(model);
        assert!(needs_processing(&scene));
        execute(&mut scene);
        assert!(!needs_processing(&scene));
    }
}
