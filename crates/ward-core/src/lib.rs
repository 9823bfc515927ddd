//! Core types for the Ward field-control framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! value model, field attributes, declaration syntax, and the declaration
//! normalizer that turns any accepted declaration shape into a canonical
//! [`DeclarationSet`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod declare;
pub mod error;
pub mod field;
pub mod id;
pub mod normalize;
pub mod value;

pub use declare::{Declarations, FieldDecl, FieldOptions, FlatDeclarations, GroupedDeclarations};
pub use error::{AccessError, DeclarationError, FieldOrigin, InstantiationError};
pub use field::{FieldSpec, FieldState, Mutability, StorageClass, Visibility};
pub use id::{ClassId, Lineage, SharedSlot};
pub use normalize::{normalize, DeclarationSet};
pub use value::Value;
