//! Append-only storage for descriptor nodes.

use std::fmt;

use super::Descriptor;
use crate::error::{RefdocError, Result};

/// Unique identifier for a descriptor in the arena.
/// Uses u32 for compact storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DescriptorId(u32);

impl DescriptorId {
    /// Create a new DescriptorId from an index
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Get the index into the arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DescriptorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arena storage for all descriptors of one documentation run.
///
/// Nodes are published once and never change afterwards. A slot can be
/// reserved before its node exists so that nodes built later can refer back
/// to it (a generic method parameter pointing at its declaring method); until
/// [`DescriptorArena::fill`] publishes it, the slot reads as absent.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DescriptorArena {
    slots: Vec<Option<Descriptor>>,
}

impl DescriptorArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots, reserved ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Look up a published descriptor.
    pub fn get(&self, id: DescriptorId) -> Option<&Descriptor> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Look up a published descriptor or fail with `UnknownDescriptor`.
    pub fn require(&self, id: DescriptorId) -> Result<&Descriptor> {
        self.get(id).ok_or(RefdocError::UnknownDescriptor(id))
    }

    pub fn contains(&self, id: DescriptorId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate over published descriptors in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (DescriptorId, &Descriptor)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|d| (DescriptorId::new(i), d)))
    }

    /// Add a descriptor, checking that everything it refers to already has a slot.
    pub fn alloc(&mut self, descriptor: Descriptor) -> Result<DescriptorId> {
        self.check_references(&descriptor)?;
        let id = DescriptorId::new(self.slots.len());
        self.slots.push(Some(descriptor));
        Ok(id)
    }

    /// Reserve a slot to be published later with [`DescriptorArena::fill`].
    pub fn reserve(&mut self) -> DescriptorId {
        let id = DescriptorId::new(self.slots.len());
        self.slots.push(None);
        id
    }

    /// Publish a descriptor into a reserved slot.
    pub fn fill(&mut self, id: DescriptorId, descriptor: Descriptor) -> Result<()> {
        self.check_references(&descriptor)?;
        match self.slots.get_mut(id.index()) {
            Some(slot @ None) => {
                *slot = Some(descriptor);
                Ok(())
            }
            Some(Some(_)) => Err(RefdocError::invalid_descriptor(format!(
                "slot {id} is already published"
            ))),
            None => Err(RefdocError::UnknownDescriptor(id)),
        }
    }

    /// Drop every slot at or after `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.slots.truncate(len);
    }

    fn check_references(&self, descriptor: &Descriptor) -> Result<()> {
        if let Descriptor::Array(array) = descriptor {
            if array.rank == 0 {
                return Err(RefdocError::invalid_descriptor("array rank must be at least 1"));
            }
        }
        match descriptor
            .references()
            .into_iter()
            .find(|r| r.index() >= self.slots.len())
        {
            Some(dangling) => Err(RefdocError::UnknownDescriptor(dangling)),
            None => Ok(()),
        }
    }
}

impl std::ops::Index<DescriptorId> for DescriptorArena {
    type Output = Descriptor;

    /// Panics on an unknown or unpublished id; use [`DescriptorArena::get`]
    /// when the id comes from outside the arena.
    fn index(&self, id: DescriptorId) -> &Descriptor {
        match self.get(id) {
            Some(descriptor) => descriptor,
            None => panic!("descriptor {id} is not published"),
        }
    }
}
