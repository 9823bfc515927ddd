//! Error types for the Ward field-control framework.
//!
//! Organized by the moment the violation is detected: declaration time
//! ([`DeclarationError`]), field access time ([`AccessError`]) and
//! construction time ([`InstantiationError`]). None of them is recovered
//! internally; each operation fails before any state is mutated.

use std::error::Error;
use std::fmt;

use crate::id::ClassId;

/// Where the earlier declaration of a colliding field name came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldOrigin {
    /// Declared in the same declaration set (either group, or repeated in a
    /// flat set).
    Declared,
    /// Inherited from an extensible parent class.
    Inherited,
}

impl fmt::Display for FieldOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declared => write!(f, "declared"),
            Self::Inherited => write!(f, "inherited"),
        }
    }
}

/// Errors raised while normalizing a declaration set.
///
/// Fatal to class construction: nothing is allocated when one is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclarationError {
    /// A field name appears twice across the public and private groups,
    /// within a flat set, or collides with an inherited name.
    DuplicateField {
        /// The repeated name.
        name: String,
        /// Where the first declaration came from.
        origin: FieldOrigin,
    },
    /// A field was declared with an empty name.
    EmptyFieldName,
}

impl fmt::Display for DeclarationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateField { name, origin } => {
                write!(f, "the field '{name}' cannot be redeclared ({origin} earlier)")
            }
            Self::EmptyFieldName => write!(f, "field names must not be empty"),
        }
    }
}

impl Error for DeclarationError {}

/// Errors raised by field reads and writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessError {
    /// Write to a final field that already holds a value.
    FinalReassignment {
        /// The final field.
        name: String,
    },
    /// The name is not reachable from this surface: either it was never
    /// declared, or it is private and the surface is external.
    UnknownField {
        /// The requested name.
        name: String,
    },
    /// Type-level access to a field with per-instance storage.
    NotShared {
        /// The instance field.
        name: String,
    },
    /// An internal handle was requested for an instance whose class does
    /// not descend from the class that owns the access capability.
    ForeignInstance {
        /// Base class owning the access capability.
        access: ClassId,
        /// Concrete class of the offered instance.
        instance: ClassId,
    },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FinalReassignment { name } => {
                write!(f, "the final field '{name}' cannot be reassigned")
            }
            Self::UnknownField { name } => write!(f, "no accessible field named '{name}'"),
            Self::NotShared { name } => {
                write!(f, "the field '{name}' has instance storage and needs an instance")
            }
            Self::ForeignInstance { access, instance } => write!(
                f,
                "instance of class {instance} does not descend from class {access}"
            ),
        }
    }
}

impl Error for AccessError {}

/// Errors raised when constructing an instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InstantiationError {
    /// The abstract base produced by a build was instantiated directly.
    AbstractInstantiation {
        /// Identity of the abstract base.
        class: ClassId,
        /// Its diagnostic name.
        name: String,
    },
}

impl fmt::Display for InstantiationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AbstractInstantiation { class, name } => {
                write!(f, "can't instantiate abstract class '{name}' ({class})")
            }
        }
    }
}

impl Error for InstantiationError {}
