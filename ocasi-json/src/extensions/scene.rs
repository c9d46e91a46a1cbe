
// Copyright 2017 The gltf Library Developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use ocasi_derive::Validate;
use serde_derive::{Deserialize, Serialize};

/// Extension specific data for `Node`. No glTF 2.0 node extension is
/// recognized by this crate; present for structural symmetry with the other
/// `extensions::*` modules.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
pub struct Node {}

/// Extension specific data for `Scene`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
pub struct Scene {}
