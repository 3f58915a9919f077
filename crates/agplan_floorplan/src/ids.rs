//! Partition handles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Arena slot of a partition in a [`PartitionSet`](crate::PartitionSet).
///
/// Handles are handed out in creation order and stay valid for one build
/// invocation; they are never persisted, names are.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct PartitionId(u32);

impl PartitionId {
    pub(crate) fn for_slot(slot: usize) -> Self {
        Self(slot as u32)
    }

    /// Returns the arena slot.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PartitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_order_is_sort_order() {
        assert!(PartitionId::for_slot(1) < PartitionId::for_slot(2));
        assert_eq!(PartitionId::for_slot(9).index(), 9);
        assert_eq!(PartitionId::for_slot(3).to_string(), "p3");
    }
}
