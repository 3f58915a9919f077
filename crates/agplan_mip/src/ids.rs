//! Variable and constraint handles.
//!
//! Both are declaration-order slots in a [`MipModel`](crate::MipModel); a
//! handle from one model means nothing in another.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }

            /// Returns the index as a `usize`, for slice access.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Opaque, copyable ID for a model variable.
    VarId
);

define_id!(
    /// Opaque, copyable ID for a model constraint.
    ConstraintId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_declaration_slots() {
        let ids: Vec<VarId> = (0..3).map(VarId::from_raw).collect();
        assert_eq!(ids[2].index(), 2);
        assert!(ids[0] < ids[1]);
        assert_eq!(ConstraintId::from_raw(19).to_string(), "19");
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&VarId::from_raw(55)).unwrap();
        assert_eq!(json, "55");
        let back: VarId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_raw(), 55);
    }
}
