//! Benchmark profiles for the Ward field-control framework.
//!
//! - [`wide_declarations`]: `n` fields cycling through every attribute
//!   combination.
//! - [`chain`]: an inheritance chain of `depth` builds, each adding
//!   `fields_per_level` fields.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use ward_core::{Declarations, FieldOptions, FlatDeclarations};
use ward_store::{Blueprint, ClassOptions, ClassType, Registry};

/// Declare `n` fields named `f{i}{suffix}`, cycling through public/private,
/// instance/shared and mutable/final. Final fields start unset.
pub fn wide_declarations(n: usize, suffix: &str) -> Declarations {
    (0..n)
        .fold(FlatDeclarations::default(), |decls, i| {
            let mut opts = if i % 8 < 4 {
                FieldOptions::new(i as i64).public()
            } else {
                FieldOptions::new(i as i64).private()
            };
            if i % 4 >= 2 {
                opts = opts.shared();
            }
            if i % 2 == 1 {
                opts = opts.final_();
                opts.value = ward_core::Value::Null;
            }
            decls.field_with(format!("f{i}{suffix}"), opts)
        })
        .into()
}

/// Build an inheritance chain `depth` levels deep and return the last
/// build together with a concrete class over it.
///
/// # Panics
///
/// If `depth` is zero.
pub fn chain(registry: &Registry, depth: usize, fields_per_level: usize) -> (Blueprint, ClassType) {
    assert!(depth > 0, "chain depth must be positive");
    let mut parent: Option<ClassType> = None;
    let mut last = None;
    for level in 0..depth {
        let mut options = ClassOptions::named(format!("Level{level}"));
        if let Some(p) = &parent {
            options = options.extends(p);
        }
        let bp = registry
            .build(wide_declarations(fields_per_level, &format!("_{level}")), options)
            .expect("generated names are unique");
        let class = bp.make_extensible(bp.base().subclass(format!("Level{level}Impl")));
        parent = Some(class.clone());
        last = Some((bp, class));
    }
    last.expect("depth > 0")
}
