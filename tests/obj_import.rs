use approx::assert_relative_eq;
use ocasi::{Dimension, Error, FaceMode, MaterialValue, PostProcessSteps, ScalarKey, TextureKey};

#[test]
fn minimal_triangle_imports_with_no_options() {
    let scene = ocasi::load_3d_file("tests/fixtures/triangle.obj").unwrap();

    assert_eq!(scene.models.len(), 1);
    let mesh = &scene.models[0].meshes[0];
    assert_eq!(mesh.positions, vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    assert_eq!(mesh.indices, vec![0, 1, 2]);
    assert_eq!(mesh.face_mode, FaceMode::TRIANGLE);
    assert_eq!(mesh.dimension, Dimension::D3);
    assert!(mesh.normals.is_none());
}

#[test]
fn generate_normals_option_fills_in_a_unit_up_normal() {
    let scene = ocasi::load_3d_file_with_options("tests/fixtures/triangle.obj", PostProcessSteps::GENERATE_NORMALS).unwrap();

    let mesh = &scene.models[0].meshes[0];
    let normals = mesh.normals.as_ref().unwrap();
    for normal in normals {
        assert_relative_eq!(normal[0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(normal[1], 0.0, epsilon = 1e-6);
        assert_relative_eq!(normal[2], 1.0, epsilon = 1e-6);
    }
}

#[test]
fn an_obj_with_no_geometry_lowers_to_an_empty_scene() {
    let scene = ocasi::load_3d_file("tests/fixtures/empty.obj").unwrap();
    assert!(scene.models.is_empty());
    assert!(scene.root_nodes.is_empty());
}

#[test]
fn a_face_referencing_an_empty_tex_coord_pool_is_malformed() {
    let result = ocasi::load_3d_file("tests/fixtures/malformed_face.obj");
    assert!(matches!(result, Err(Error::MalformedFace { .. })));
}

#[test]
fn mtllib_material_carries_diffuse_colour_and_an_unloaded_albedo_texture() {
    let scene = ocasi::load_3d_file("tests/fixtures/textured.obj").unwrap();

    assert_eq!(scene.materials.len(), 1);
    let material = &scene.materials[0];
    assert_eq!(material.name.as_deref(), Some("red"));
    assert_eq!(material.get(ScalarKey::AlbedoColour), MaterialValue::Vec4([1.0, 0.0, 0.0, 1.0]));

    let texture = material.texture(TextureKey::Albedo).expect("map_Kd should populate the albedo slot");
    assert!(!texture.is_loaded());
    let path = texture.path().expect("an OBJ-sourced texture is path-backed");
    assert_eq!(path.file_name().unwrap(), "brick.png");
    assert_eq!(path.parent().unwrap(), std::path::Path::new("tests/fixtures"));
}
