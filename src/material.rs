//! The material value store.
//!
//! The original design packs every recognized key into one byte buffer
//! keyed by a compile-time prefix-sum offset and reads it back with an
//! unchecked `memcpy`-style cast. That trades safety for a few bytes of
//! padding and isn't something Rust needs to imitate: an enum-keyed
//! [`MaterialValue`] union gives the same fixed, closed key-space with a
//! `get`/`set` pair that can't hand back the wrong type.

use std::collections::HashMap;

use crate::image::Image;

/// A scalar or vector value recognized by a [`Material`].
///
/// Every [`ScalarKey`] has exactly one matching variant; `set` and `get`
/// both go through this type so a caller can never read a `vec4` key back
/// as an `f32` or vice versa.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaterialValue {
    Vec4([f32; 4]),
    Float(f32),
    Bool(bool),
}

impl MaterialValue {
    fn as_vec4(self) -> Option<[f32; 4]> {
        match self {
            MaterialValue::Vec4(v) => Some(v),
            _ => None,
        }
    }

    fn as_float(self) -> Option<f32> {
        match self {
            MaterialValue::Float(v) => Some(v),
            _ => None,
        }
    }

    fn as_bool(self) -> Option<bool> {
        match self {
            MaterialValue::Bool(v) => Some(v),
            _ => None,
        }
    }
}

macro_rules! scalar_keys {
    ($(($variant:ident, $shape:ident)),+ $(,)?) => {
        /// The closed set of scalar/vector keys a [`Material`] recognizes.
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
        pub enum ScalarKey {
            $($variant),+
        }

        impl ScalarKey {
            /// The value shape this key is declared to hold, so callers can
            /// validate before calling `set`.
            pub fn shape(self) -> ValueShape {
                match self {
                    $(ScalarKey::$variant => ValueShape::$shape),+
                }
            }
        }
    };
}

/// The value shape a [`ScalarKey`] is declared to hold.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueShape {
    Vec4,
    Float,
    Bool,
}

scalar_keys! {
    (AlbedoColour, Vec4),
    (AmbientColour, Vec4),
    (SpecularColour, Vec4),
    (EmissiveColour, Vec4),
    (Roughness, Float),
    (Metallic, Float),
    (Anisotropy, Float),
    (AnisotropyRotation, Float),
    (Clearcoat, Float),
    (ClearcoatRoughness, Float),
    (SpecularStrength, Float),
    (EmissiveStrength, Float),
    (Transparency, Float),
    (Ior, Float),
    (UseCombinedMetallicRoughnessTexture, Bool),
    (UseCombinedAnisotropyAnisotropyRotationTexture, Bool),
}

/// The closed set of texture slots a [`Material`] recognizes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TextureKey {
    Albedo,
    Diffuse,
    Specular,
    Emissive,
    Metallic,
    Roughness,
    CombinedMetallicRoughness,
    Normal,
    Occlusion,
    Sheen,
    Clearcoat,
    ClearcoatRoughness,
    ClearcoatNormal,
    Transmission,
    VolumeThickness,
    Anisotropy,
    CombinedAnisotropyRotation,
    Iridescence,
    IridescenceThickness,
    Bump,
    Shininess,
    Transparency,
    Ambient,
    ReflectionTop,
    ReflectionBottom,
    ReflectionFront,
    ReflectionBack,
    ReflectionLeft,
    ReflectionRight,
    ReflectionSphere,
}

/// Error returned when a caller asks for a key's value as the wrong shape.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("key {key:?} holds a {actual:?} value, not the requested shape")]
pub struct WrongShape {
    pub key: ScalarKey,
    pub actual: ValueShape,
}

/// A material's scalar/vector values plus its texture slots.
///
/// Unset keys fall back to the defaults spelled out below rather than
/// `Option`, so every recognized key always has *some* value — matching
/// the dense fixed-layout buffer this replaces, just with a type tag
/// instead of raw bytes.
#[derive(Debug, Default)]
pub struct Material {
    /// The material's name, if the source provided one.
    pub name: Option<String>,
    values: HashMap<ScalarKey, MaterialValue>,
    textures: HashMap<TextureKey, Image>,
}

impl Material {
    /// A material with every key at its documented default: colours white,
    /// roughness 0.4, every other scalar 0, booleans false, no textures.
    pub fn new() -> Self {
        Material {
            name: None,
            values: HashMap::new(),
            textures: HashMap::new(),
        }
    }

    fn default_for(key: ScalarKey) -> MaterialValue {
        match key {
            ScalarKey::AlbedoColour
            | ScalarKey::AmbientColour
            | ScalarKey::SpecularColour
            | ScalarKey::EmissiveColour => MaterialValue::Vec4([1.0, 1.0, 1.0, 1.0]),
            ScalarKey::Roughness => MaterialValue::Float(0.4),
            ScalarKey::UseCombinedMetallicRoughnessTexture
            | ScalarKey::UseCombinedAnisotropyAnisotropyRotationTexture => MaterialValue::Bool(false),
            _ => MaterialValue::Float(0.0),
        }
    }

    /// Stores `value` under `key`. Panics in debug builds if `value`'s
    /// shape doesn't match `key.shape()` — a mismatch here is a bug in the
    /// caller, not a malformed input file.
    pub fn set(&mut self, key: ScalarKey, value: MaterialValue) {
        debug_assert_eq!(
            std::mem::discriminant(&value),
            std::mem::discriminant(&Self::default_for(key)),
            "value shape does not match {key:?}'s declared shape",
        );
        self.values.insert(key, value);
    }

    /// Convenience: stores an `f32` under a `Float`-shaped key.
    pub fn set_float(&mut self, key: ScalarKey, value: f32) {
        self.set(key, MaterialValue::Float(value));
    }

    /// Convenience: stores a `[f32; 4]` under a `Vec4`-shaped key.
    pub fn set_vec4(&mut self, key: ScalarKey, value: [f32; 4]) {
        self.set(key, MaterialValue::Vec4(value));
    }

    /// Convenience: stores a `bool` under a `Bool`-shaped key.
    pub fn set_bool(&mut self, key: ScalarKey, value: bool) {
        self.set(key, MaterialValue::Bool(value));
    }

    /// Returns the raw tagged value for `key`, falling back to its default.
    pub fn get(&self, key: ScalarKey) -> MaterialValue {
        self.values.get(&key).copied().unwrap_or_else(|| Self::default_for(key))
    }

    /// Returns `key`'s value as an `f32`, or `None` if `key` is not a
    /// `Float`-shaped key.
    pub fn get_float(&self, key: ScalarKey) -> Option<f32> {
        self.get(key).as_float()
    }

    /// Returns `key`'s value as a `[f32; 4]`, or `None` if `key` is not a
    /// `Vec4`-shaped key.
    pub fn get_vec4(&self, key: ScalarKey) -> Option<[f32; 4]> {
        self.get(key).as_vec4()
    }

    /// Returns `key`'s value as a `bool`, or `None` if `key` is not a
    /// `Bool`-shaped key.
    pub fn get_bool(&self, key: ScalarKey) -> Option<bool> {
        self.get(key).as_bool()
    }

    /// Binds `image` to `slot`, replacing anything already there.
    pub fn set_texture(&mut self, slot: TextureKey, image: Image) {
        self.textures.insert(slot, image);
    }

    /// The image bound to `slot`, if any.
    pub fn texture(&self, slot: TextureKey) -> Option<&Image> {
        self.textures.get(&slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let material = Material::new();
        assert_eq!(material.get_vec4(ScalarKey::AlbedoColour), Some([1.0, 1.0, 1.0, 1.0]));
        assert_eq!(material.get_float(ScalarKey::Roughness), Some(0.4));
        assert_eq!(material.get_float(ScalarKey::Metallic), Some(0.0));
        assert_eq!(material.get_bool(ScalarKey::UseCombinedMetallicRoughnessTexture), Some(false));
    }

    #[test]
    fn set_then_get_round_trips_bit_equal() {
        let mut material = Material::new();
        material.set_float(ScalarKey::Roughness, 0.75);
        assert_eq!(material.get_float(ScalarKey::Roughness), Some(0.75));
    }

    #[test]
    fn wrong_shape_accessor_returns_none() {
        let material = Material::new();
        assert_eq!(material.get_float(ScalarKey::AlbedoColour), None);
        assert_eq!(material.get_vec4(ScalarKey::Roughness), None);
    }

    #[test]
    fn texture_slots_start_empty() {
        let material = Material::new();
        assert!(material.texture(TextureKey::Albedo).is_none());
    }
}
