/// Contains `Accessor` and other related data structures.
pub mod accessor;

/// Contains `Asset` metadata.
pub mod asset;

/// Contains `Buffer`, `View`, and other related data structures.
pub mod buffer;

/// Contains `Image` and other related data structures.
pub mod image;

/// Contains `Material` and other related data structures.
pub mod material;

/// Contains `Mesh` and other related data structures.
pub mod mesh;

/// Contains `Root`.
pub mod root;

/// Contains `Scene`, `Node`, and other related data structures.
pub mod scene;

/// Contains `Texture`, `Sampler`, and other related data structures.
pub mod texture;

pub use self::root::Root;

/// Names of the Khronos glTF 2.0 material extensions enabled by the user.
pub const ENABLED_EXTENSIONS: &[&str] = &[
    #[cfg(feature = "KHR_materials_pbrSpecularGlossiness")]
    "KHR_materials_pbrSpecularGlossiness",
    #[cfg(feature = "KHR_materials_specular")]
    "KHR_materials_specular",
    #[cfg(feature = "KHR_materials_clearcoat")]
    "KHR_materials_clearcoat",
    #[cfg(feature = "KHR_materials_sheen")]
    "KHR_materials_sheen",
    #[cfg(feature = "KHR_materials_transmission")]
    "KHR_materials_transmission",
    #[cfg(feature = "KHR_materials_volume")]
    "KHR_materials_volume",
    #[cfg(feature = "KHR_materials_ior")]
    "KHR_materials_ior",
    #[cfg(feature = "KHR_materials_emissive_strength")]
    "KHR_materials_emissive_strength",
    #[cfg(feature = "KHR_materials_iridescence")]
    "KHR_materials_iridescence",
    #[cfg(feature = "KHR_materials_anisotropy")]
    "KHR_materials_anisotropy",
];

/// Names of the Khronos material extensions this library understands well
/// enough to lower correctly. `Root::validate_required_extensions` fails the
/// import with `UnsupportedExtension` for any `extensionsRequired` entry
/// outside this set. Kept identical to `ENABLED_EXTENSIONS` so a feature
/// that is compiled out can never be claimed as supported.
pub const SUPPORTED_EXTENSIONS: &[&str] = ENABLED_EXTENSIONS;
