//! Live objects and the per-instance external surface.

use std::sync::Arc;

use ward_core::{AccessError, FieldState, Value};

use crate::class::{ClassShape, ClassType};
use crate::layout::{FieldEntry, FieldLocation};

/// An object of a concrete class.
///
/// Owns its instance storage: one [`FieldState`] per instance field,
/// copied fresh from the class template at construction. Shared fields
/// are never copied here; they resolve to the chain's shared table.
///
/// [`get`](Self::get) and [`set`](Self::set) form the external surface and
/// reach public fields only. Private fields need an internal handle from
/// the class's [`Access`](crate::Access).
#[derive(Debug)]
pub struct Instance {
    class: ClassType,
    storage: Vec<FieldState>,
}

impl Instance {
    pub(crate) fn new(class: ClassType) -> Self {
        let storage = class.shape().layout().instance_template().to_vec();
        Self { class, storage }
    }

    /// The concrete class this instance was built from.
    pub fn class(&self) -> &ClassType {
        &self.class
    }

    /// Read a public field.
    ///
    /// # Errors
    ///
    /// [`AccessError::UnknownField`] for absent or private names.
    pub fn get(&self, name: &str) -> Result<Value, AccessError> {
        let shape = self.class.shape();
        let entry = public_entry(shape, name)?;
        self.read(shape, name, entry)
    }

    /// Write a public field.
    ///
    /// # Errors
    ///
    /// [`AccessError::UnknownField`] for absent or private names,
    /// [`AccessError::FinalReassignment`] for a final field that already
    /// holds a value.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), AccessError> {
        let shape = Arc::clone(self.class.shape());
        let entry = *public_entry(&shape, name)?;
        self.write(&shape, name, &entry, value.into())
    }

    /// Public field names in declaration order.
    pub fn external_fields(&self) -> Vec<&str> {
        self.class.shape().layout().public_names().collect()
    }

    /// Read the field described by `entry`, resolving shared slots in
    /// `shape`'s table.
    pub(crate) fn read(
        &self,
        shape: &ClassShape,
        name: &str,
        entry: &FieldEntry,
    ) -> Result<Value, AccessError> {
        match entry.location {
            FieldLocation::Shared { slot } => Ok(shape.shared().get(slot)),
            FieldLocation::Instance { index } => self
                .storage
                .get(index)
                .map(|state| state.value().clone())
                .ok_or_else(|| unknown(name)),
        }
    }

    /// Write the field described by `entry`, enforcing finality.
    pub(crate) fn write(
        &mut self,
        shape: &ClassShape,
        name: &str,
        entry: &FieldEntry,
        value: Value,
    ) -> Result<(), AccessError> {
        match entry.location {
            FieldLocation::Shared { slot } => {
                shape.shared().set(slot, name, entry.mutability, value)
            }
            FieldLocation::Instance { index } => {
                let state = self.storage.get_mut(index).ok_or_else(|| unknown(name))?;
                if !state.accepts_write(entry.mutability) {
                    return Err(AccessError::FinalReassignment {
                        name: name.to_string(),
                    });
                }
                *state = FieldState::Set(value);
                Ok(())
            }
        }
    }
}

fn public_entry<'a>(shape: &'a ClassShape, name: &str) -> Result<&'a FieldEntry, AccessError> {
    shape.layout().public_entry(name).ok_or_else(|| unknown(name))
}

pub(crate) fn unknown(name: &str) -> AccessError {
    AccessError::UnknownField {
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::ClassOptions;
    use ward_core::{Declarations, FieldOptions};

    fn class() -> ClassType {
        Registry::new()
            .build(
                Declarations::grouped()
                    .public("name", "anon")
                    .public_with("id", FieldOptions::new(Value::Null).final_())
                    .public_with("count", FieldOptions::new(0).shared())
                    .private("hidden", 1),
                ClassOptions::new(),
            )
            .unwrap()
            .base()
            .subclass("Thing")
    }

    #[test]
    fn external_surface_hides_private_fields() {
        let obj = class().instantiate().unwrap();
        assert_eq!(obj.external_fields(), vec!["name", "id", "count"]);
        assert_eq!(obj.get("hidden"), Err(unknown("hidden")));
        assert_eq!(obj.get("missing"), Err(unknown("missing")));
    }

    #[test]
    fn instance_fields_are_isolated() {
        let class = class();
        let mut a = class.instantiate().unwrap();
        let b = class.instantiate().unwrap();
        a.set("name", "a").unwrap();
        assert_eq!(a.get("name"), Ok(Value::from("a")));
        assert_eq!(b.get("name"), Ok(Value::from("anon")));
    }

    #[test]
    fn shared_fields_are_visible_across_instances() {
        let class = class();
        let mut a = class.instantiate().unwrap();
        let b = class.instantiate().unwrap();
        a.set("count", 3).unwrap();
        assert_eq!(b.get("count"), Ok(Value::Int(3)));
        assert_eq!(class.get("count"), Ok(Value::Int(3)));
    }

    #[test]
    fn null_final_accepts_exactly_one_write() {
        let mut obj = class().instantiate().unwrap();
        assert_eq!(obj.get("id"), Ok(Value::Null));
        obj.set("id", 42).unwrap();
        assert_eq!(
            obj.set("id", 43),
            Err(AccessError::FinalReassignment { name: "id".into() })
        );
        assert_eq!(obj.get("id"), Ok(Value::Int(42)));
    }
}
