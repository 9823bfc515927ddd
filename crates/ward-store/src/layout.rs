//! Name → storage location mapping built once per class.
//!
//! A [`FieldLayout`] is derived from a slot-assigned [`DeclarationSet`].
//! Instance fields are numbered in declaration order counting only
//! instance fields. Inherited fields precede a class's own fields, so an
//! inherited instance field has the same index in parent and child
//! storage, and a parent's accessors work on child instances unchanged.

use indexmap::IndexMap;
use ward_core::{DeclarationSet, FieldSpec, FieldState, Mutability, SharedSlot, Visibility};

/// Where a field's value lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldLocation {
    /// Index into the instance's own storage.
    Instance {
        /// Position in [`FieldLayout::instance_template`].
        index: usize,
    },
    /// Slot in the chain's shared table.
    Shared {
        /// The slot.
        slot: SharedSlot,
    },
}

/// Everything an accessor needs to resolve one field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldEntry {
    /// Storage location.
    pub location: FieldLocation,
    /// Whether the external surface may reach it.
    pub visibility: Visibility,
    /// Finality.
    pub mutability: Mutability,
}

impl FieldEntry {
    /// Returns `true` for public fields.
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// The shared slot, if the field has shared storage.
    pub fn shared_slot(&self) -> Option<SharedSlot> {
        match self.location {
            FieldLocation::Shared { slot } => Some(slot),
            FieldLocation::Instance { .. } => None,
        }
    }
}

/// Resolved storage layout of one class.
#[derive(Clone, Debug, Default)]
pub struct FieldLayout {
    entries: IndexMap<String, FieldEntry>,
    template: Vec<FieldState>,
}

impl FieldLayout {
    /// Build the layout for `set`.
    ///
    /// Every shared field must already carry a slot (see
    /// [`DeclarationSet::assign_slots`]); a shared field without one is
    /// treated as slot-less and skipped, which `ClassShape` construction
    /// never produces.
    pub fn build(set: &DeclarationSet) -> Self {
        let mut entries = IndexMap::with_capacity(set.len());
        let mut template = Vec::new();
        for spec in set {
            let Some(location) = Self::locate(spec, &mut template) else {
                continue;
            };
            entries.insert(
                spec.name.clone(),
                FieldEntry {
                    location,
                    visibility: spec.visibility,
                    mutability: spec.mutability,
                },
            );
        }
        Self { entries, template }
    }

    fn locate(spec: &FieldSpec, template: &mut Vec<FieldState>) -> Option<FieldLocation> {
        if spec.is_shared() {
            return spec.shared_slot.map(|slot| FieldLocation::Shared { slot });
        }
        template.push(spec.initial_state());
        Some(FieldLocation::Instance {
            index: template.len() - 1,
        })
    }

    /// Look up a field regardless of visibility.
    pub fn entry(&self, name: &str) -> Option<&FieldEntry> {
        self.entries.get(name)
    }

    /// Look up a field only if it is public.
    pub fn public_entry(&self, name: &str) -> Option<&FieldEntry> {
        self.entries.get(name).filter(|e| e.is_public())
    }

    /// Fresh per-instance storage: one state per instance field, seeded
    /// from its declared default.
    pub fn instance_template(&self) -> &[FieldState] {
        &self.template
    }

    /// Every field name in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Public field names in declaration order.
    pub fn public_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, e)| e.is_public())
            .map(|(name, _)| name.as_str())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the layout has no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_core::{normalize, Declarations, FieldOptions, Value};

    fn layout() -> FieldLayout {
        let mut set = normalize(
            Declarations::flat()
                .field("a", 1)
                .field_with("s", FieldOptions::new(2).shared())
                .field_with("b", FieldOptions::new(Value::Null).private().final_())
                .into(),
            None,
        )
        .unwrap();
        set.assign_slots(|_| SharedSlot(9));
        FieldLayout::build(&set)
    }

    #[test]
    fn instance_indices_skip_shared_fields() {
        let layout = layout();
        assert_eq!(
            layout.entry("a").unwrap().location,
            FieldLocation::Instance { index: 0 }
        );
        assert_eq!(
            layout.entry("s").unwrap().location,
            FieldLocation::Shared { slot: SharedSlot(9) }
        );
        assert_eq!(
            layout.entry("b").unwrap().location,
            FieldLocation::Instance { index: 1 }
        );
    }

    #[test]
    fn template_seeds_null_as_unset() {
        let layout = layout();
        assert_eq!(
            layout.instance_template(),
            &[FieldState::Set(Value::Int(1)), FieldState::Unset]
        );
    }

    #[test]
    fn private_fields_hidden_from_public_lookup() {
        let layout = layout();
        assert!(layout.entry("b").is_some());
        assert!(layout.public_entry("b").is_none());
        assert_eq!(layout.public_names().collect::<Vec<_>>(), vec!["a", "s"]);
        assert_eq!(layout.len(), 3);
    }
}
