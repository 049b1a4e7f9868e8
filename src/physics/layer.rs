//! Collision layers and layer masks

use serde::{Deserialize, Serialize};

/// Set of up to 32 collision layers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    /// Layer new colliders land on unless told otherwise
    pub const DEFAULT: LayerMask = LayerMask(1);

    /// Mask containing only `layer` (0..32)
    pub const fn layer(layer: u8) -> Self {
        LayerMask(1u32 << (layer & 31))
    }

    pub const fn union(self, other: LayerMask) -> Self {
        LayerMask(self.0 | other.0)
    }

    /// True if the masks share any layer
    pub const fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: LayerMask) -> LayerMask {
        self.union(rhs)
    }
}
