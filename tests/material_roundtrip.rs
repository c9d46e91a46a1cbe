use ocasi::{Material, MaterialValue, ScalarKey};

#[test]
fn values_set_through_the_public_api_read_back_bit_equal_across_every_shape() {
    let mut material = Material::new();
    material.set_vec4(ScalarKey::AlbedoColour, [0.2, 0.4, 0.6, 1.0]);
    material.set_float(ScalarKey::Metallic, 0.125);
    material.set_bool(ScalarKey::UseCombinedMetallicRoughnessTexture, true);

    assert_eq!(material.get(ScalarKey::AlbedoColour), MaterialValue::Vec4([0.2, 0.4, 0.6, 1.0]));
    assert_eq!(material.get_float(ScalarKey::Metallic), Some(0.125));
    assert_eq!(material.get_bool(ScalarKey::UseCombinedMetallicRoughnessTexture), Some(true));

    // Keys left untouched still fall back to their documented defaults.
    assert_eq!(material.get_float(ScalarKey::Roughness), Some(0.4));
}
