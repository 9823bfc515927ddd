//! Test utilities for Ward development.
//!
//! Declaration fixtures covering every attribute combination in both
//! accepted syntaxes. See [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    all_combinations, all_names, combo_name, public_names, Combo, DeclShape, COMBOS,
    SHORTHAND_FIELDS,
};
