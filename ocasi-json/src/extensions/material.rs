use crate::validation::Validate;
use ocasi_derive::Validate;
use serde_derive::{Deserialize, Serialize};

#[cfg(any(
    feature = "KHR_materials_pbrSpecularGlossiness",
    feature = "KHR_materials_specular",
    feature = "KHR_materials_clearcoat",
    feature = "KHR_materials_sheen",
    feature = "KHR_materials_transmission",
    feature = "KHR_materials_volume",
    feature = "KHR_materials_iridescence",
    feature = "KHR_materials_anisotropy",
))]
use crate::texture;

/// Extension specific data for `Material`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
pub struct Material {
    /// `KHR_materials_pbrSpecularGlossiness` block.
    #[cfg(feature = "KHR_materials_pbrSpecularGlossiness")]
    #[serde(
        default,
        rename = "KHR_materials_pbrSpecularGlossiness",
        skip_serializing_if = "Option::is_none"
    )]
    pub pbr_specular_glossiness: Option<PbrSpecularGlossiness>,

    /// `KHR_materials_specular` block.
    #[cfg(feature = "KHR_materials_specular")]
    #[serde(
        default,
        rename = "KHR_materials_specular",
        skip_serializing_if = "Option::is_none"
    )]
    pub specular: Option<Specular>,

    /// `KHR_materials_clearcoat` block.
    #[cfg(feature = "KHR_materials_clearcoat")]
    #[serde(
        default,
        rename = "KHR_materials_clearcoat",
        skip_serializing_if = "Option::is_none"
    )]
    pub clearcoat: Option<Clearcoat>,

    /// `KHR_materials_sheen` block.
    #[cfg(feature = "KHR_materials_sheen")]
    #[serde(
        default,
        rename = "KHR_materials_sheen",
        skip_serializing_if = "Option::is_none"
    )]
    pub sheen: Option<Sheen>,

    /// `KHR_materials_transmission` block.
    #[cfg(feature = "KHR_materials_transmission")]
    #[serde(
        default,
        rename = "KHR_materials_transmission",
        skip_serializing_if = "Option::is_none"
    )]
    pub transmission: Option<Transmission>,

    /// `KHR_materials_volume` block.
    #[cfg(feature = "KHR_materials_volume")]
    #[serde(
        default,
        rename = "KHR_materials_volume",
        skip_serializing_if = "Option::is_none"
    )]
    pub volume: Option<Volume>,

    /// `KHR_materials_ior` block.
    #[cfg(feature = "KHR_materials_ior")]
    #[serde(
        default,
        rename = "KHR_materials_ior",
        skip_serializing_if = "Option::is_none"
    )]
    pub ior: Option<Ior>,

    /// `KHR_materials_emissive_strength` block.
    #[cfg(feature = "KHR_materials_emissive_strength")]
    #[serde(
        default,
        rename = "KHR_materials_emissive_strength",
        skip_serializing_if = "Option::is_none"
    )]
    pub emissive_strength: Option<EmissiveStrength>,

    /// `KHR_materials_iridescence` block.
    #[cfg(feature = "KHR_materials_iridescence")]
    #[serde(
        default,
        rename = "KHR_materials_iridescence",
        skip_serializing_if = "Option::is_none"
    )]
    pub iridescence: Option<Iridescence>,

    /// `KHR_materials_anisotropy` block.
    #[cfg(feature = "KHR_materials_anisotropy")]
    #[serde(
        default,
        rename = "KHR_materials_anisotropy",
        skip_serializing_if = "Option::is_none"
    )]
    pub anisotropy: Option<Anisotropy>,
}

/// A set of parameter values that are used to define the metallic-roughness
/// material model from Physically-Based Rendering (PBR) methodology.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct PbrMetallicRoughness {}

/// Defines the normal texture of a material.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct NormalTexture {}

/// Defines the occlusion texture of a material.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct OcclusionTexture {}

fn one() -> f32 {
    1.0
}

fn zero() -> f32 {
    0.0
}

/// `KHR_materials_pbrSpecularGlossiness`: an alternative, legacy PBR workflow
/// to `pbrMetallicRoughness` expressed as diffuse color plus specular
/// color/glossiness.
#[cfg(feature = "KHR_materials_pbrSpecularGlossiness")]
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct PbrSpecularGlossiness {
    /// The reflected diffuse factor of the material.
    #[serde(rename = "diffuseFactor")]
    pub diffuse_factor: [f32; 4],

    /// The diffuse texture.
    #[serde(rename = "diffuseTexture", skip_serializing_if = "Option::is_none")]
    pub diffuse_texture: Option<texture::Info>,

    /// The specular RGB color of the material.
    #[serde(rename = "specularFactor")]
    pub specular_factor: [f32; 3],

    /// The glossiness or smoothness of the material.
    #[serde(rename = "glossinessFactor")]
    pub glossiness_factor: f32,

    /// The specular-glossiness texture (specular RGB, glossiness A).
    #[serde(
        rename = "specularGlossinessTexture",
        skip_serializing_if = "Option::is_none"
    )]
    pub specular_glossiness_texture: Option<texture::Info>,
}

#[cfg(feature = "KHR_materials_pbrSpecularGlossiness")]
impl Default for PbrSpecularGlossiness {
    fn default() -> Self {
        Self {
            diffuse_factor: [1.0, 1.0, 1.0, 1.0],
            diffuse_texture: None,
            specular_factor: [1.0, 1.0, 1.0],
            glossiness_factor: 1.0,
            specular_glossiness_texture: None,
        }
    }
}

/// `KHR_materials_specular`: parameterizes the strength of the specular
/// reflection in the dielectric BRDF.
#[cfg(feature = "KHR_materials_specular")]
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct Specular {
    /// The strength of the specular reflection.
    #[serde(rename = "specularFactor", default = "one")]
    pub specular_factor: f32,

    /// A texture that defines the strength of the specular reflection,
    /// stored in the alpha channel.
    #[serde(rename = "specularTexture", skip_serializing_if = "Option::is_none")]
    pub specular_texture: Option<texture::Info>,

    /// The F0 color of the specular reflection.
    #[serde(rename = "specularColorFactor")]
    pub specular_color_factor: [f32; 3],

    /// A texture that defines the F0 color of the specular reflection,
    /// stored in the RGB channels.
    #[serde(
        rename = "specularColorTexture",
        skip_serializing_if = "Option::is_none"
    )]
    pub specular_color_texture: Option<texture::Info>,
}

#[cfg(feature = "KHR_materials_specular")]
impl Default for Specular {
    fn default() -> Self {
        Self {
            specular_factor: 1.0,
            specular_texture: None,
            specular_color_factor: [1.0, 1.0, 1.0],
            specular_color_texture: None,
        }
    }
}

/// `KHR_materials_clearcoat`: a secondary, fixed-IOR coat layer over the
/// base material.
#[cfg(feature = "KHR_materials_clearcoat")]
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct Clearcoat {
    /// The clearcoat layer intensity.
    #[serde(rename = "clearcoatFactor")]
    pub clearcoat_factor: f32,

    /// The clearcoat layer intensity texture, sampled from the R channel.
    #[serde(
        rename = "clearcoatTexture",
        skip_serializing_if = "Option::is_none"
    )]
    pub clearcoat_texture: Option<texture::Info>,

    /// The clearcoat layer roughness.
    #[serde(rename = "clearcoatRoughnessFactor")]
    pub clearcoat_roughness_factor: f32,

    /// The clearcoat layer roughness texture, sampled from the G channel.
    #[serde(
        rename = "clearcoatRoughnessTexture",
        skip_serializing_if = "Option::is_none"
    )]
    pub clearcoat_roughness_texture: Option<texture::Info>,

    /// A tangent space normal map for the clearcoat layer.
    #[serde(
        rename = "clearcoatNormalTexture",
        skip_serializing_if = "Option::is_none"
    )]
    pub clearcoat_normal_texture: Option<texture::Info>,
}

/// `KHR_materials_sheen`: a sheen layer used to simulate cloth/velvet-like
/// microfacet scattering near grazing angles.
#[cfg(feature = "KHR_materials_sheen")]
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct Sheen {
    /// The sheen color in linear space.
    #[serde(rename = "sheenColorFactor")]
    pub sheen_color_factor: [f32; 3],

    /// The sheen color (RGB) texture.
    #[serde(
        rename = "sheenColorTexture",
        skip_serializing_if = "Option::is_none"
    )]
    pub sheen_color_texture: Option<texture::Info>,

    /// The sheen roughness.
    #[serde(rename = "sheenRoughnessFactor", default = "zero")]
    pub sheen_roughness_factor: f32,

    /// The sheen roughness (alpha channel) texture.
    #[serde(
        rename = "sheenRoughnessTexture",
        skip_serializing_if = "Option::is_none"
    )]
    pub sheen_roughness_texture: Option<texture::Info>,
}

#[cfg(feature = "KHR_materials_sheen")]
impl Default for Sheen {
    fn default() -> Self {
        Self {
            sheen_color_factor: [0.0, 0.0, 0.0],
            sheen_color_texture: None,
            sheen_roughness_factor: 0.0,
            sheen_roughness_texture: None,
        }
    }
}

/// `KHR_materials_transmission`: specifies how much light is transmitted
/// through the surface (glass, thin plastic).
#[cfg(feature = "KHR_materials_transmission")]
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct Transmission {
    /// The base percentage of light transmitted through the surface.
    #[serde(rename = "transmissionFactor")]
    pub transmission_factor: f32,

    /// A texture that defines the transmission percentage, sampled from the
    /// R channel.
    #[serde(
        rename = "transmissionTexture",
        skip_serializing_if = "Option::is_none"
    )]
    pub transmission_texture: Option<texture::Info>,
}

/// `KHR_materials_volume`: turns the surface into a boundary for an
/// (optionally absorbing/scattering) volume.
#[cfg(feature = "KHR_materials_volume")]
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct Volume {
    /// The thickness of the volume beneath the surface.
    #[serde(rename = "thicknessFactor", default = "zero")]
    pub thickness_factor: f32,

    /// A texture that defines the thickness, sampled from the G channel.
    #[serde(
        rename = "thicknessTexture",
        skip_serializing_if = "Option::is_none"
    )]
    pub thickness_texture: Option<texture::Info>,

    /// Density of the medium, as the average distance light travels before
    /// interacting with a particle, in the scene's units.
    #[serde(rename = "attenuationDistance", default = "infinity")]
    pub attenuation_distance: f32,

    /// The color that white light turns into due to absorption.
    #[serde(rename = "attenuationColor")]
    pub attenuation_color: [f32; 3],
}

#[cfg(feature = "KHR_materials_volume")]
fn infinity() -> f32 {
    f32::INFINITY
}

#[cfg(feature = "KHR_materials_volume")]
impl Default for Volume {
    fn default() -> Self {
        Self {
            thickness_factor: 0.0,
            thickness_texture: None,
            attenuation_distance: f32::INFINITY,
            attenuation_color: [1.0, 1.0, 1.0],
        }
    }
}

/// `KHR_materials_ior`: overrides the default index of refraction (1.5) of
/// the dielectric BRDF.
#[cfg(feature = "KHR_materials_ior")]
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct Ior {
    /// The index of refraction.
    #[serde(rename = "ior", default = "default_ior")]
    pub ior: f32,
}

#[cfg(feature = "KHR_materials_ior")]
fn default_ior() -> f32 {
    1.5
}

#[cfg(feature = "KHR_materials_ior")]
impl Default for Ior {
    fn default() -> Self {
        Self {
            ior: default_ior(),
        }
    }
}

/// `KHR_materials_emissive_strength`: allows emissive factors to exceed 1.0.
#[cfg(feature = "KHR_materials_emissive_strength")]
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct EmissiveStrength {
    /// Multiplier applied to `emissiveFactor`.
    #[serde(rename = "emissiveStrength", default = "one")]
    pub emissive_strength: f32,
}

#[cfg(feature = "KHR_materials_emissive_strength")]
impl Default for EmissiveStrength {
    fn default() -> Self {
        Self {
            emissive_strength: 1.0,
        }
    }
}

/// `KHR_materials_iridescence`: a thin-film iridescence effect.
#[cfg(feature = "KHR_materials_iridescence")]
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct Iridescence {
    /// The iridescence intensity factor.
    #[serde(rename = "iridescenceFactor", default = "zero")]
    pub iridescence_factor: f32,

    /// The iridescence intensity texture, sampled from the R channel.
    #[serde(
        rename = "iridescenceTexture",
        skip_serializing_if = "Option::is_none"
    )]
    pub iridescence_texture: Option<texture::Info>,

    /// The index of refraction of the dielectric thin-film layer.
    #[serde(rename = "iridescenceIor", default = "default_iridescence_ior")]
    pub iridescence_ior: f32,

    /// The minimum thickness of the thin-film layer, in nanometers.
    #[serde(
        rename = "iridescenceThicknessMinimum",
        default = "default_thickness_min"
    )]
    pub iridescence_thickness_minimum: f32,

    /// The maximum thickness of the thin-film layer, in nanometers.
    #[serde(
        rename = "iridescenceThicknessMaximum",
        default = "default_thickness_max"
    )]
    pub iridescence_thickness_maximum: f32,

    /// A texture that defines the thickness of the thin-film layer, sampled
    /// from the G channel, remapped between minimum and maximum thickness.
    #[serde(
        rename = "iridescenceThicknessTexture",
        skip_serializing_if = "Option::is_none"
    )]
    pub iridescence_thickness_texture: Option<texture::Info>,
}

#[cfg(feature = "KHR_materials_iridescence")]
fn default_iridescence_ior() -> f32 {
    1.3
}

#[cfg(feature = "KHR_materials_iridescence")]
fn default_thickness_min() -> f32 {
    100.0
}

#[cfg(feature = "KHR_materials_iridescence")]
fn default_thickness_max() -> f32 {
    400.0
}

#[cfg(feature = "KHR_materials_iridescence")]
impl Default for Iridescence {
    fn default() -> Self {
        Self {
            iridescence_factor: 0.0,
            iridescence_texture: None,
            iridescence_ior: default_iridescence_ior(),
            iridescence_thickness_minimum: default_thickness_min(),
            iridescence_thickness_maximum: default_thickness_max(),
            iridescence_thickness_texture: None,
        }
    }
}

/// `KHR_materials_anisotropy`: an anisotropic BRDF extension (the source
/// material used `aniso`/`anisor` MTL directives for the same concept).
#[cfg(feature = "KHR_materials_anisotropy")]
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct Anisotropy {
    /// The anisotropy strength.
    #[serde(rename = "anisotropyStrength", default = "zero")]
    pub anisotropy_strength: f32,

    /// The rotation of the anisotropy in tangent, bitangent space, in
    /// radians counter-clockwise from the tangent.
    #[serde(rename = "anisotropyRotation", default = "zero")]
    pub anisotropy_rotation: f32,

    /// A texture encoding strength (R/G as a direction vector) and rotation
    /// (B channel) of the anisotropy.
    #[serde(
        rename = "anisotropyTexture",
        skip_serializing_if = "Option::is_none"
    )]
    pub anisotropy_texture: Option<texture::Info>,
}

#[cfg(feature = "KHR_materials_anisotropy")]
impl Default for Anisotropy {
    fn default() -> Self {
        Self {
            anisotropy_strength: 0.0,
            anisotropy_rotation: 0.0,
            anisotropy_texture: None,
        }
    }
}
