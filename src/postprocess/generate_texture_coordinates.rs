//! `GenerateTextureCoordinates`: fills in a first UV set for meshes that
//! have none.
//!
//! spec.md names this pass but doesn't detail its projection. This
//! crate's chosen behaviour (recorded in `DESIGN.md`): a planar
//! projection onto whichever of the mesh's three bounding-box faces is
//! widest, i.e. the two axes with the largest extent become `u`/`v`,
//! each normalized against the bounding box to `[0, 1]`. Degenerate
//! (zero-extent) meshes map every vertex to `(0, 0)`.

use crate::scene::{Dimension, Mesh, Scene};

pub fn needs_processing(scene: &Scene) -> bool {
    scene.models.iter().any(|model| model.meshes.iter().any(mesh_needs_coords))
}

fn mesh_needs_coords(mesh: &Mesh) -> bool {
    mesh.tex_coords[0].is_none() && !mesh.positions.is_empty() && mesh.dimension != Dimension::D1
}

pub fn execute(scene: &mut Scene) {
    for model in &mut scene.models {
        for mesh in &mut model.meshes {
            if mesh_needs_coords(mesh) {
                generate(mesh);
            }
        }
    }
}

fn bounds(positions: &[[f32; 3]]) -> ([f32; 3], [f32; 3]) {
    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];
    for position in positions {
        for axis in 0..3 {
            min[axis] = min[axis].min(position[axis]);
            max[axis] = max[axis].max(position[axis]);
        }
    }
    (min, max)
}

/// Returns the indices of the two axes with the largest bounding-box
/// extent, i.e. the axis to drop is the one with the smallest.
fn projection_axes(extent: [f32; 3]) -> (usize, usize) {
    let drop = (0..3).min_by(|&a, &b| extent[a].partial_cmp(&extent[b]).unwrap()).unwrap();
    match drop {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

fn normalize(value: f32, min: f32, extent: f32) -> f32 {
    if extent <= f32::EPSILON {
        0.0
    } else {
        (value - min) / extent
    }
}

fn generate(mesh: &mut Mesh) {
    let (min, max) = bounds(&mesh.positions);
    let extent = [max[0] - min[0], max[1] - min[1], max[2] - min[2]];
    let (u_axis, v_axis) = projection_axes(extent);

    let coords = mesh
        .positions
        .iter()
        .map(|position| {
            [
                normalize(position[u_axis], min[u_axis], extent[u_axis]),
                normalize(position[v_axis], min[v_axis], extent[v_axis]),
            ]
        })
        .collect();
    mesh.tex_coords[0] = Some(coords);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{FaceMode, Model};

    fn flat_quad_mesh() -> Mesh {
        let mut mesh = Mesh::empty();
        mesh.positions = vec![[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 4.0, 0.0], [0.0, 4.0, 0.0]];
        mesh.indices = vec![0, 1, 2, 3];
        mesh.face_mode = FaceMode::QUAD;
        mesh.dimension = Dimension::D3;
        mesh
    }

    #[test]
    fn projects_onto_the_widest_plane_and_normalizes_to_unit_range() {
        let mut mesh = flat_quad_mesh();
        generate(&mut mesh);
        let coords = mesh.tex_coords[0].as_ref().unwrap();
        assert_eq!(coords[0], [0.0, 0.0]);
        assert_eq!(coords[2], [1.0, 1.0]);
    }

    #[test]
    fn is_a_no_op_once_coordinates_exist() {
        let mut mesh = flat_quad_mesh();
        mesh.tex_coords[0] = Some(vec![[0.0, 0.0]; 4]);
        assert!(!mesh_needs_coords(&mesh));
    }

    #[test]
    fn degenerate_single_point_maps_to_origin() {
        let mut mesh = Mesh::empty();
        mesh.positions = vec![[1.0, 1.0, 1.0]];
        mesh.face_mode = FaceMode::POINT;
        mesh.dimension = Dimension::D3;
        generate(&mut mesh);
        assert_eq!(mesh.tex_coords[0].as_ref().unwrap()[0], [0.0, 0.0]);
    }

    #[test]
    fn point_cloud_dimension_is_skipped() {
        let mut mesh = Mesh::empty();
        mesh.positions = vec![[0.0, 0.0, 0.0]];
        mesh.dimension = Dimension::D1;
        assert!(!mesh_needs_coords(&mesh));
    }

    #[test]
    fn needs_processing_detects_scene_missing_coordinates() {
        let mut scene = Scene::empty();
        let mut model = Model::default();
        model.meshes.push(flat_quad_mesh());
        scene.models.push(model);
        assert!(needs_processing(&scene));
        execute(&mut scene);
        assert!(!needs_processing(&scene));
    }
}
