//! Ward: field visibility, shared storage and finality control for dynamic
//! object models.
//!
//! This is the facade crate that re-exports the public API of the Ward
//! sub-crates. Adding `ward` as a single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use ward::prelude::*;
//!
//! let registry = Registry::new();
//!
//! // A base class with a public name, a private shared counter and a
//! // final id that may be written exactly once.
//! let shape = registry.build(
//!     Declarations::grouped()
//!         .public("name", "shape")
//!         .public_with("id", FieldOptions::new(Value::Null).final_())
//!         .private_with("created", FieldOptions::new(0).shared()),
//!     ClassOptions::named("Shape"),
//! )?;
//! assert!(shape.base().instantiate().is_err());
//!
//! let square = shape.make_extensible(shape.base().subclass("Square"));
//! let mut sq = square.instantiate()?;
//! sq.set("id", 1)?;
//! assert!(sq.set("id", 2).is_err());
//! assert!(sq.get("created").is_err());
//!
//! // Code holding the access capability sees private fields too.
//! let mut this = shape.access().handle(&mut sq)?;
//! this.set("created", 1)?;
//!
//! // A subclass inherits every field, and the shared counter's storage.
//! let cube = registry.build(
//!     Declarations::flat().field("depth", 3),
//!     ClassOptions::named("Cube").extends(&square),
//! )?;
//! let mut c = cube.base().subclass("Cube").instantiate()?;
//! assert_eq!(c.external_fields(), vec!["name", "id", "depth"]);
//! assert_eq!(cube.access().handle(&mut c)?.get("created")?, Value::Int(1));
//! # Ok::<(), ward::Error>(())
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ward-core` | Values, field attributes, declarations, normalizer, errors |
//! | [`store`] | `ward-store` | Shared table, layouts, classes, instances, access, registry |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use std::error::Error as StdError;
use std::fmt;

/// Core types: values, field attributes, declarations and the normalizer
/// (`ward-core`).
pub use ward_core as types;

/// Storage, accessor surfaces and the inheritance registry (`ward-store`).
pub use ward_store as store;

pub use ward_core::{AccessError, DeclarationError, InstantiationError};

/// Any error raised by Ward.
///
/// Each variant wraps the error of one phase; [`source`](StdError::source)
/// returns the wrapped error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Declaration-time failure.
    Declaration(DeclarationError),
    /// Field read or write failure.
    Access(AccessError),
    /// Construction-time failure.
    Instantiation(InstantiationError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declaration(e) => write!(f, "declaration error: {e}"),
            Self::Access(e) => write!(f, "access error: {e}"),
            Self::Instantiation(e) => write!(f, "instantiation error: {e}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Declaration(e) => Some(e),
            Self::Access(e) => Some(e),
            Self::Instantiation(e) => Some(e),
        }
    }
}

impl From<DeclarationError> for Error {
    fn from(e: DeclarationError) -> Self {
        Self::Declaration(e)
    }
}

impl From<AccessError> for Error {
    fn from(e: AccessError) -> Self {
        Self::Access(e)
    }
}

impl From<InstantiationError> for Error {
    fn from(e: InstantiationError) -> Self {
        Self::Instantiation(e)
    }
}

/// Common imports for typical Ward usage.
///
/// ```rust
/// use ward::prelude::*;
/// ```
pub mod prelude {
    // Declarations and values
    pub use ward_core::{
        Declarations, FieldOptions, FieldSpec, Mutability, StorageClass, Value, Visibility,
    };

    // Errors
    pub use crate::Error;
    pub use ward_core::{AccessError, DeclarationError, InstantiationError};

    // Classes, instances and surfaces
    pub use ward_store::{
        Access, Blueprint, ClassOptions, ClassType, Instance, Internal, Object, Registry, View,
    };
}
