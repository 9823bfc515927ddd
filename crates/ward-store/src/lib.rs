//! Field storage and accessor surfaces for Ward.
//!
//! Turns a canonical [`DeclarationSet`](ward_core::DeclarationSet) into live,
//! enforceable storage:
//!
//! ```text
//! Registry::build(declarations, options)
//! ├── lookup parent ExtendTemplate (if options.extends is registered)
//! ├── normalize(declarations, inherited)      ward-core
//! ├── ClassShape
//! │   ├── shared slots allocated in the chain's SharedTable (Arc, Mutex)
//! │   └── FieldLayout (name → Instance{index} | Shared{slot})
//! └── Blueprint
//!     ├── Access     → Internal / View handles (every field)
//!     ├── ClassType  (abstract base) → subclass() → instantiate() → Instance
//!     └── make_extensible(class) → Registry entry for a later child
//! ```
//!
//! # Surfaces
//!
//! - **Internal:** [`Access::handle`] and [`Access::view`] reach every field
//!   of the build, public and private, instance and shared.
//! - **External:** [`Instance::get`]/[`Instance::set`] (and the [`Object`]
//!   trait) reach public fields; [`ClassType::get`]/[`ClassType::set`] reach
//!   public shared fields without an instance.
//!
//! Finality is enforced identically on every surface.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod access;
pub mod class;
pub mod config;
pub mod instance;
pub mod layout;
pub mod registry;
pub mod shared;
pub mod surface;

pub use access::{Access, Internal, View};
pub use class::{ClassShape, ClassType};
pub use config::ClassOptions;
pub use instance::Instance;
pub use layout::{FieldEntry, FieldLayout, FieldLocation};
pub use registry::{Blueprint, ExtendTemplate, Registry};
pub use shared::{SharedTable, SharedTableRef};
pub use surface::Object;
