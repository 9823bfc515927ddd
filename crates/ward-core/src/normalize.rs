//! The declaration normalizer and the canonical [`DeclarationSet`].
//!
//! [`normalize`] is the only place declaration syntax is interpreted. It
//! flattens grouped input, fills in attribute defaults, and merges the
//! result with an inherited set, rejecting every name collision before
//! anything is allocated.

use indexmap::IndexMap;

use crate::declare::{Declarations, FieldDecl};
use crate::error::{DeclarationError, FieldOrigin};
use crate::field::{FieldSpec, Visibility};
use crate::id::SharedSlot;

/// Canonical mapping from field name to [`FieldSpec`].
///
/// Iteration follows declaration order: inherited fields first, in the
/// parent's order, then the fields declared by the class itself. The set
/// doubles as the class's extend template, so a subclass receives the full
/// accumulated set of every ancestor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeclarationSet {
    fields: IndexMap<String, FieldSpec>,
}

impl DeclarationSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// Whether a field with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the set has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over field specs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.values()
    }

    /// Iterate over field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Give every shared field that has no slot yet a slot from `allocate`.
    ///
    /// Inherited shared fields already carry their parent's slot and are left
    /// alone. Returns the number of slots allocated.
    pub fn assign_slots(&mut self, mut allocate: impl FnMut(&FieldSpec) -> SharedSlot) -> usize {
        let mut allocated = 0;
        for spec in self.fields.values_mut() {
            if spec.is_shared() && spec.shared_slot.is_none() {
                spec.shared_slot = Some(allocate(spec));
                allocated += 1;
            }
        }
        allocated
    }

    /// Insert a spec, failing if the name is taken.
    fn insert(&mut self, spec: FieldSpec, origin: FieldOrigin) -> Result<(), DeclarationError> {
        if spec.name.is_empty() {
            return Err(DeclarationError::EmptyFieldName);
        }
        if self.fields.contains_key(&spec.name) {
            return Err(DeclarationError::DuplicateField {
                name: spec.name,
                origin,
            });
        }
        self.fields.insert(spec.name.clone(), spec);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a DeclarationSet {
    type Item = &'a FieldSpec;
    type IntoIter = indexmap::map::Values<'a, String, FieldSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.values()
    }
}

/// Normalize `declarations` and merge them with an `inherited` set.
///
/// Grouped input is flattened public group first, then private group, with
/// visibility taken from the group. Unspecified attributes default to
/// public, instance and mutable. New fields never carry a shared slot;
/// inherited fields keep theirs along with every other attribute.
///
/// # Errors
///
/// - [`DeclarationError::EmptyFieldName`] for an empty name.
/// - [`DeclarationError::DuplicateField`] for a name repeated within the
///   declarations, colliding with an inherited name, or repeated inside the
///   inherited set itself.
pub fn normalize(
    declarations: Declarations,
    inherited: Option<&DeclarationSet>,
) -> Result<DeclarationSet, DeclarationError> {
    let own = flatten(declarations)?;

    let mut merged = DeclarationSet::new();
    if let Some(inherited) = inherited {
        for spec in inherited {
            merged.insert(spec.clone(), FieldOrigin::Inherited)?;
        }
    }
    for spec in own.fields.into_values() {
        merged.insert(spec, FieldOrigin::Inherited)?;
    }
    Ok(merged)
}

/// Collapse either declaration shape into canonical specs, rejecting repeats.
fn flatten(declarations: Declarations) -> Result<DeclarationSet, DeclarationError> {
    let mut set = DeclarationSet::new();
    let entries: Vec<(String, FieldDecl, Option<Visibility>)> = match declarations {
        Declarations::Flat(flat) => flat
            .entries
            .into_iter()
            .map(|(name, decl)| (name, decl, None))
            .collect(),
        Declarations::Grouped(grouped) => grouped
            .public
            .into_iter()
            .map(|(name, decl)| (name, decl, Some(Visibility::Public)))
            .chain(
                grouped
                    .private
                    .into_iter()
                    .map(|(name, decl)| (name, decl, Some(Visibility::Private))),
            )
            .collect(),
    };
    for (name, decl, group) in entries {
        set.insert(decl.into_spec(name, group), FieldOrigin::Declared)?;
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declare::FieldOptions;
    use crate::field::{Mutability, StorageClass};
    use crate::value::Value;
    use proptest::prelude::*;

    fn parent() -> DeclarationSet {
        let mut set = normalize(
            Declarations::flat()
                .field("a", 1)
                .field_with("b", FieldOptions::new(2).private().shared())
                .into(),
            None,
        )
        .unwrap();
        set.assign_slots(|_| SharedSlot(0));
        set
    }

    #[test]
    fn flat_defaults_fill_in() {
        let set = normalize(Declarations::flat().field("x", "v").into(), None).unwrap();
        let x = set.get("x").unwrap();
        assert_eq!(x.visibility, Visibility::Public);
        assert_eq!(x.storage_class, StorageClass::Instance);
        assert_eq!(x.mutability, Mutability::Mutable);
        assert_eq!(x.initial_value, Value::from("v"));
    }

    #[test]
    fn flat_repeat_is_rejected() {
        let err = normalize(Declarations::flat().field("x", 1).field("x", 2).into(), None)
            .unwrap_err();
        assert_eq!(
            err,
            DeclarationError::DuplicateField {
                name: "x".into(),
                origin: FieldOrigin::Declared,
            }
        );
    }

    #[test]
    fn public_private_collision_is_rejected() {
        let decls = Declarations::grouped().public("x", 1).private("x", 2);
        let err = normalize(decls.into(), None).unwrap_err();
        assert!(matches!(err, DeclarationError::DuplicateField { ref name, .. } if name == "x"));
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = normalize(Declarations::flat().field("", 1).into(), None).unwrap_err();
        assert_eq!(err, DeclarationError::EmptyFieldName);
    }

    #[test]
    fn grouped_takes_group_visibility() {
        let decls = Declarations::grouped()
            .public("p", 1)
            .private_with("q", FieldOptions::new(2).public().final_());
        let set = normalize(decls.into(), None).unwrap();
        assert!(set.get("p").unwrap().is_public());
        let q = set.get("q").unwrap();
        assert!(!q.is_public());
        assert!(q.is_final());
    }

    #[test]
    fn inherited_fields_come_first_and_keep_slots() {
        let set = normalize(Declarations::flat().field("c", 3).into(), Some(&parent())).unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        let b = set.get("b").unwrap();
        assert_eq!(b.shared_slot, Some(SharedSlot(0)));
        assert!(!b.is_public());
    }

    #[test]
    fn collision_with_inherited_is_rejected() {
        let err = normalize(Declarations::grouped().private("a", 0).into(), Some(&parent()))
            .unwrap_err();
        assert_eq!(
            err,
            DeclarationError::DuplicateField {
                name: "a".into(),
                origin: FieldOrigin::Inherited,
            }
        );
    }

    #[test]
    fn assign_slots_skips_inherited() {
        let mut set = normalize(
            Declarations::flat()
                .field_with("d", FieldOptions::new(0).shared())
                .into(),
            Some(&parent()),
        )
        .unwrap();
        let mut next = 5;
        let allocated = set.assign_slots(|_| {
            next += 1;
            SharedSlot(next)
        });
        assert_eq!(allocated, 1);
        assert_eq!(set.get("b").unwrap().shared_slot, Some(SharedSlot(0)));
        assert_eq!(set.get("d").unwrap().shared_slot, Some(SharedSlot(6)));
    }

    proptest! {
        #[test]
        fn grouped_and_flat_agree(
            names in prop::collection::hash_set("[a-z]{1,6}", 1..12),
            flags in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 12),
        ) {
            let mut flat = Declarations::flat();
            let mut grouped = Declarations::grouped();
            for (i, name) in names.iter().enumerate() {
                let (public, shared, fin) = flags[i];
                let mut opts = FieldOptions::new(i as i64);
                if shared {
                    opts = opts.shared();
                }
                if fin {
                    opts = opts.final_();
                }
                if public {
                    flat = flat.field_with(name.clone(), opts.clone().public());
                    grouped = grouped.public_with(name.clone(), opts);
                } else {
                    flat = flat.field_with(name.clone(), opts.clone().private());
                    grouped = grouped.private_with(name.clone(), opts);
                }
            }
            let from_flat = normalize(flat.into(), None).unwrap();
            let from_grouped = normalize(grouped.into(), None).unwrap();
            prop_assert_eq!(from_flat.len(), names.len());
            for spec in &from_flat {
                prop_assert_eq!(Some(spec), from_grouped.get(&spec.name));
            }
        }

        #[test]
        fn any_repeated_name_is_rejected(
            names in prop::collection::vec("[a-c]{1,2}", 2..10),
        ) {
            let mut flat = Declarations::flat();
            for name in &names {
                flat = flat.field(name.clone(), 0);
            }
            let unique: std::collections::HashSet<_> = names.iter().collect();
            let result = normalize(flat.into(), None);
            if unique.len() == names.len() {
                prop_assert!(result.is_ok());
            } else {
                let is_duplicate = matches!(result, Err(DeclarationError::DuplicateField { .. }));
                prop_assert!(is_duplicate);
            }
        }
    }
}
