//! # Material Type Module
//!
//! This module defines the material classes a block can belong to. The material
//! decides which surface batch a block's faces are written to and which palette
//! entry shades that batch.

use std::fmt;

use num_derive::FromPrimitive;

use super::MaterialTypeSize;

/// Enumerates the material classes of a block.
///
/// The numeric values are part of the data model: blocks store the material as a
/// raw `MaterialTypeSize`, and population draws material indices directly.
/// Index 0 (`UNKNOWN`) is reserved and never assigned by generation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive)]
pub enum MaterialType {
    /// Fallback bucket for unrecognized material values.
    UNKNOWN = 0,

    /// Plain opaque material.
    GENERIC = 1,

    /// See-through material. Glass blocks are solid but never opaque.
    GLASS = 2,

    /// Opaque metallic material.
    METAL = 3,
}

impl MaterialType {
    /// Number of material classes, including the reserved `UNKNOWN`.
    pub const COUNT: usize = 4;

    /// Order in which batches are appended to a chunk mesh.
    ///
    /// `GLASS` is the only translucent class and must be drawn last so the
    /// renderer can blend it over everything else.
    pub const BATCH_ORDER: [MaterialType; Self::COUNT] = [
        MaterialType::GENERIC,
        MaterialType::METAL,
        MaterialType::UNKNOWN,
        MaterialType::GLASS,
    ];

    /// Converts a raw stored value to a `MaterialType`.
    ///
    /// # Returns
    /// `None` if the value does not name a known material.
    pub fn from_int(raw: MaterialTypeSize) -> Option<Self> {
        num_traits::FromPrimitive::from_u8(raw)
    }

    /// Returns every material class in enum order.
    pub fn all() -> [MaterialType; Self::COUNT] {
        [
            MaterialType::UNKNOWN,
            MaterialType::GENERIC,
            MaterialType::GLASS,
            MaterialType::METAL,
        ]
    }

    /// Human readable name, used to label surface batches.
    pub fn name(self) -> &'static str {
        match self {
            MaterialType::UNKNOWN => "Unknown",
            MaterialType::GENERIC => "Generic",
            MaterialType::GLASS => "Glass",
            MaterialType::METAL => "Metal",
        }
    }

    /// Whether faces behind a block of this material can be seen through it.
    pub fn is_translucent(self) -> bool {
        self == MaterialType::GLASS
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
