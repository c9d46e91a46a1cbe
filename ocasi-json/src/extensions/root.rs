use ocasi_derive::Validate;
use serde_derive::{Deserialize, Serialize};

/// Extension specific data for `Root`.
///
/// The Khronos material extensions listed in `extensions::SUPPORTED_EXTENSIONS`
/// hang off `extensions::material::Material` per-material, not here; `Root`'s
/// own extension object is reserved for asset-wide extensions, of which none
/// are currently recognized by this crate.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
pub struct Root {}
