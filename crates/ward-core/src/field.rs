//! Field attributes, the canonical [`FieldSpec`], and per-field [`FieldState`].

use crate::id::SharedSlot;
use crate::value::Value;

/// Who may see a field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Reachable through the external surface and the internal handle.
    #[default]
    Public,
    /// Reachable only through the internal handle.
    Private,
}

/// Where a field's value lives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StorageClass {
    /// One copy per instance.
    #[default]
    Instance,
    /// One copy per inheritance chain, shared by every instance of every
    /// class in the chain.
    Shared,
}

/// Whether a field accepts writes after it holds a value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mutability {
    /// Accepts any number of writes.
    #[default]
    Mutable,
    /// Accepts a write only while [`FieldState::Unset`].
    Final,
}

/// One canonical field declaration.
///
/// Produced by the normalizer; every accepted declaration syntax collapses
/// into this record before anything else looks at it.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    /// Field name, unique across the whole inheritance chain.
    pub name: String,
    /// Default value seeded into storage at allocation.
    pub initial_value: Value,
    /// External visibility.
    pub visibility: Visibility,
    /// Per-instance or chain-shared storage.
    pub storage_class: StorageClass,
    /// Finality.
    pub mutability: Mutability,
    /// Slot in the chain's shared table. `None` for instance fields and for
    /// shared fields that have not been allocated yet.
    pub shared_slot: Option<SharedSlot>,
}

impl FieldSpec {
    /// A public, instance, mutable field with the given default.
    pub fn new(name: impl Into<String>, initial_value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            initial_value: initial_value.into(),
            visibility: Visibility::default(),
            storage_class: StorageClass::default(),
            mutability: Mutability::default(),
            shared_slot: None,
        }
    }

    /// Returns `true` if the field is [`Visibility::Public`].
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Returns `true` if the field is [`StorageClass::Shared`].
    pub fn is_shared(&self) -> bool {
        self.storage_class == StorageClass::Shared
    }

    /// Returns `true` if the field is [`Mutability::Final`].
    pub fn is_final(&self) -> bool {
        self.mutability == Mutability::Final
    }

    /// The storage state this field starts in.
    pub fn initial_state(&self) -> FieldState {
        FieldState::from_initial(self.initial_value.clone())
    }
}

/// Whether a stored field has been written.
///
/// The tag is what finality checks against, so a field explicitly set to
/// [`Value::Null`] is distinguishable from one that was never written.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FieldState {
    /// Never written and declared without a value.
    #[default]
    Unset,
    /// Holds a value.
    Set(Value),
}

impl FieldState {
    /// Seed state from a declared default: `Null` seeds `Unset`.
    pub fn from_initial(value: Value) -> Self {
        if value.is_null() {
            Self::Unset
        } else {
            Self::Set(value)
        }
    }

    /// Returns `true` once the field holds a value.
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    /// The current value; `Unset` reads as [`Value::Null`].
    pub fn value(&self) -> &Value {
        const NULL: &Value = &Value::Null;
        match self {
            Self::Unset => NULL,
            Self::Set(v) => v,
        }
    }

    /// Whether a write is permitted under the given mutability.
    pub fn accepts_write(&self, mutability: Mutability) -> bool {
        mutability == Mutability::Mutable || !self.is_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_public_instance_mutable() {
        let spec = FieldSpec::new("x", 1);
        assert!(spec.is_public());
        assert!(!spec.is_shared());
        assert!(!spec.is_final());
        assert_eq!(spec.shared_slot, None);
    }

    #[test]
    fn null_initial_value_seeds_unset() {
        assert_eq!(FieldState::from_initial(Value::Null), FieldState::Unset);
        assert_eq!(
            FieldState::from_initial(Value::Int(0)),
            FieldState::Set(Value::Int(0))
        );
    }

    #[test]
    fn unset_reads_as_null() {
        assert_eq!(FieldState::Unset.value(), &Value::Null);
    }

    #[test]
    fn final_accepts_only_first_write() {
        assert!(FieldState::Unset.accepts_write(Mutability::Final));
        assert!(!FieldState::Set(Value::Null).accepts_write(Mutability::Final));
        assert!(FieldState::Set(Value::Int(1)).accepts_write(Mutability::Mutable));
    }
}
