//! Per-node behavior extensions
//!
//! The set of extension kinds is closed: [`Addition`] is a tagged variant
//! and [`AdditionKind`] its discriminant, so lookups are checked at compile
//! time rather than through runtime type identity. A node holds at most
//! one addition per kind.

use thiserror::Error;

use crate::physics::PhysicalBody;

/// Discriminant of an [`Addition`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdditionKind {
    /// Swept-AABB collision movement
    PhysicalBody,
}

/// A behavior extension attached to a scene node
#[derive(Debug, Clone)]
pub enum Addition {
    /// Swept-AABB collision movement
    PhysicalBody(PhysicalBody),
}

impl Addition {
    /// This addition's kind
    pub fn kind(&self) -> AdditionKind {
        match self {
            Self::PhysicalBody(_) => AdditionKind::PhysicalBody,
        }
    }
}

/// Looked up an addition the node does not carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("node has no {kind:?} addition")]
pub struct MissingAdditionError {
    /// The kind that was requested
    pub kind: AdditionKind,
}

/// A node's additions, at most one per kind
#[derive(Debug, Clone, Default)]
pub struct AdditionSet {
    additions: Vec<Addition>,
}

impl AdditionSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an addition; a no-op when one of the same kind is already
    /// present
    pub fn add(&mut self, addition: Addition) {
        if self.contains(addition.kind()) {
            log::warn!("ignoring duplicate {:?} addition", addition.kind());
            return;
        }
        self.additions.push(addition);
    }

    /// Whether an addition of this kind is attached
    pub fn contains(&self, kind: AdditionKind) -> bool {
        self.additions.iter().any(|addition| addition.kind() == kind)
    }

    /// The addition of this kind
    pub fn get(&self, kind: AdditionKind) -> Result<&Addition, MissingAdditionError> {
        self.additions
            .iter()
            .find(|addition| addition.kind() == kind)
            .ok_or(MissingAdditionError { kind })
    }

    /// Mutable access to the addition of this kind
    pub fn get_mut(&mut self, kind: AdditionKind) -> Result<&mut Addition, MissingAdditionError> {
        self.additions
            .iter_mut()
            .find(|addition| addition.kind() == kind)
            .ok_or(MissingAdditionError { kind })
    }

    /// The physical body, if one is attached
    pub fn physical_body(&self) -> Result<&PhysicalBody, MissingAdditionError> {
        match self.get(AdditionKind::PhysicalBody)? {
            Addition::PhysicalBody(body) => Ok(body),
        }
    }

    /// Mutable access to the physical body, if one is attached
    pub fn physical_body_mut(&mut self) -> Result<&mut PhysicalBody, MissingAdditionError> {
        match self.get_mut(AdditionKind::PhysicalBody)? {
            Addition::PhysicalBody(body) => Ok(body),
        }
    }

    /// Detach the addition of this kind, if present
    pub fn remove(&mut self, kind: AdditionKind) {
        self.additions.retain(|addition| addition.kind() != kind);
    }

    /// Iterate the attached additions
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Addition> {
        self.additions.iter_mut()
    }
}
