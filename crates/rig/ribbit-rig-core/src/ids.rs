//! Identifiers for skeleton entities.

use serde::{Deserialize, Serialize};

/// Dense index of a joint inside its [`Skeleton`](crate::skeleton::Skeleton).
/// Also the joint's slot in the bone matrix buffer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JointId(pub u32);

impl JointId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Monotonic allocator for JointId.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_joint: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_joint(&mut self) -> JointId {
        let id = JointId(self.next_joint);
        self.next_joint = self.next_joint.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_joint(), JointId(0));
        assert_eq!(alloc.alloc_joint(), JointId(1));
        assert_eq!(alloc.alloc_joint(), JointId(2));
    }
}
