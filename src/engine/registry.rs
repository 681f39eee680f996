//! Bookkeeping that ties render meshes to the physics bodies driving them.

use crate::scene::MeshKey;
use rapier3d::prelude::RigidBodyHandle;

/// Non-owning link between a mesh in the [`Scene`](crate::scene::Scene) and a body in the
/// [`PhysicsManager`](crate::physics::PhysicsManager). Both halves are generational
/// handles, so a stale pair simply fails to resolve instead of aliasing new objects.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BodyPair {
    pub mesh: MeshKey,
    pub body: RigidBodyHandle,
}

impl BodyPair {
    pub const fn new(mesh: MeshKey, body: RigidBodyHandle) -> Self {
        BodyPair { mesh, body }
    }
}

/// Every pair whose body moves. Filled while bodies are created, emptied in one go
/// when the tower is torn down. Iteration follows insertion order.
#[derive(Debug, Default)]
pub struct DynamicBodyRegistry {
    pairs: Vec<BodyPair>,
}

impl DynamicBodyRegistry {
    pub fn push(&mut self, pair: BodyPair) {
        self.pairs.push(pair);
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &BodyPair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn contains_body(&self, body: RigidBodyHandle) -> bool {
        self.pairs.iter().any(|pair| pair.body == body)
    }

    /// Removes every pair, oldest first.
    pub fn drain(&mut self) -> std::vec::Drain<'_, BodyPair> {
        self.pairs.drain(..)
    }
}

impl<'a> IntoIterator for &'a DynamicBodyRegistry {
    type Item = &'a BodyPair;
    type IntoIter = std::slice::Iter<'a, BodyPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn pairs(count: u32) -> Vec<BodyPair> {
        let mut keys = SlotMap::<MeshKey, ()>::with_key();
        (0..count)
            .map(|i| BodyPair::new(keys.insert(()), RigidBodyHandle::from_raw_parts(i, 0)))
            .collect()
    }

    #[test]
    fn keeps_insertion_order() {
        let mut registry = DynamicBodyRegistry::default();
        let pairs = pairs(4);
        for pair in &pairs {
            registry.push(*pair);
        }

        let stored: Vec<BodyPair> = registry.iter().copied().collect();
        assert_eq!(stored, pairs);
        assert!(registry.contains_body(pairs[2].body));
    }

    #[test]
    fn drain_empties_the_registry() {
        let mut registry = DynamicBodyRegistry::default();
        for pair in pairs(3) {
            registry.push(pair);
        }

        assert_eq!(registry.drain().count(), 3);
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}
