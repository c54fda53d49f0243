use num_traits::{One, PrimInt};
use serde::{Deserialize, Serialize};

/// Storage used for collision layer masks.
///
/// 32 bits matches Rapier's `Group` width so a [`LayerMask`] maps 1:1 onto collider
/// collision-group memberships.
pub type LayerBits = u32;

/// Trait implemented by flag enums whose discriminant is a bit index.
pub trait FlagBitmask {
    type Storage: PrimInt;

    fn bit_index(&self) -> u8;

    fn mask(&self) -> Self::Storage {
        // NOTE: `bit_index()` must be < number of bits in `Storage`.
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// A plain bitmask container over any primitive integer.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitmaskFlags<T: PrimInt> {
    pub bits: T,
}

impl<T: PrimInt> BitmaskFlags<T> {
    pub fn new(bits: T) -> Self {
        Self { bits }
    }

    pub fn all() -> Self {
        Self { bits: !T::zero() }
    }

    pub fn add<U: FlagBitmask<Storage = T>>(&mut self, tag: U) {
        self.bits = self.bits | tag.mask();
    }

    pub fn remove<U: FlagBitmask<Storage = T>>(&mut self, tag: U) {
        self.bits = self.bits & !tag.mask();
    }

    pub fn has<U: FlagBitmask<Storage = T>>(&self, tag: U) -> bool {
        (self.bits & tag.mask()) != T::zero()
    }

    /// Do the two masks share at least one bit?
    pub fn intersects(&self, other: T) -> bool {
        (self.bits & other) != T::zero()
    }
}

/// Declare a bitmask-backed enum and implement `FlagBitmask` for it.
#[macro_export]
macro_rules! define_bitmask_flags {
    ($name:ident, $storage:ty, { $($variant:ident),* $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[repr(u8)]
        pub enum $name {
            $($variant),*
        }

        impl $crate::layers::FlagBitmask for $name {
            type Storage = $storage;

            fn bit_index(&self) -> u8 {
                *self as u8
            }
        }
    };
}

define_bitmask_flags!(CollisionLayer, LayerBits, {
    Default,
    Player,
    Camera,
    Portal,
    Environment,
});

/// Set of layers a scene query may hit.
///
/// Queries test a collider's layer bits against this mask; a collider is a candidate if it
/// belongs to at least one accepted layer.
pub type LayerMask = BitmaskFlags<LayerBits>;

impl LayerMask {
    /// Accept every layer except `excluded` (the usual "ignore myself" mask).
    pub fn all_except(excluded: CollisionLayer) -> Self {
        let mut mask = Self::all();
        mask.remove(excluded);
        mask
    }

    /// Layer bits of a single layer, for tagging colliders.
    pub fn only(layer: CollisionLayer) -> Self {
        let mut mask = Self::default();
        mask.add(layer);
        mask
    }

    /// Does this mask accept an object whose memberships are `layer_bits`?
    #[inline]
    pub fn accepts(&self, layer_bits: LayerBits) -> bool {
        self.intersects(layer_bits)
    }
}
