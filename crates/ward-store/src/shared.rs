//! Chain-wide storage for shared ("static") fields.
//!
//! One [`SharedTable`] exists per inheritance chain. The first class of a
//! chain creates it; every subclass built against an extensible ancestor
//! reuses the ancestor's table through an `Arc`, so an inherited shared
//! field resolves to the same slot in parent and child alike.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ward_core::{AccessError, FieldState, Mutability, SharedSlot, Value};

/// Shared handle to a chain's table.
pub type SharedTableRef = Arc<SharedTable>;

/// Slot-indexed storage for shared fields.
///
/// Guarded by a single table-wide mutex. Every read and every
/// check-then-write happens under one lock acquisition, so a final field
/// can never be written twice by racing instances. Slots are appended and
/// never removed.
#[derive(Debug, Default)]
pub struct SharedTable {
    slots: Mutex<Vec<FieldState>>,
}

impl SharedTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty table behind an `Arc`, ready to be shared down a chain.
    pub fn shared() -> SharedTableRef {
        Arc::new(Self::new())
    }

    // A poisoned lock still holds consistent data: every mutation below is
    // a single assignment.
    fn lock(&self) -> MutexGuard<'_, Vec<FieldState>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a slot seeded with `initial` and return its index.
    pub fn allocate(&self, initial: FieldState) -> SharedSlot {
        let mut slots = self.lock();
        let slot = SharedSlot(slots.len() as u32);
        slots.push(initial);
        slot
    }

    /// Number of allocated slots.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no slot has been allocated.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Current state of a slot. `None` if the slot was never allocated.
    pub fn state(&self, slot: SharedSlot) -> Option<FieldState> {
        self.lock().get(slot.0 as usize).cloned()
    }

    /// Current value of a slot; unset and unallocated slots read as `Null`.
    pub fn get(&self, slot: SharedSlot) -> Value {
        self.lock()
            .get(slot.0 as usize)
            .map(|state| state.value().clone())
            .unwrap_or_default()
    }

    /// Write `value` into a slot, enforcing `mutability`.
    ///
    /// `name` only labels the error.
    ///
    /// # Errors
    ///
    /// [`AccessError::FinalReassignment`] if the field is final and the slot
    /// already holds a value. The slot is left untouched.
    pub fn set(
        &self,
        slot: SharedSlot,
        name: &str,
        mutability: Mutability,
        value: Value,
    ) -> Result<(), AccessError> {
        let mut slots = self.lock();
        let index = slot.0 as usize;
        if index >= slots.len() {
            slots.resize(index + 1, FieldState::Unset);
        }
        let state = &mut slots[index];
        if !state.accepts_write(mutability) {
            return Err(AccessError::FinalReassignment {
                name: name.to_string(),
            });
        }
        *state = FieldState::Set(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_allocated_in_order() {
        let table = SharedTable::new();
        assert!(table.is_empty());
        assert_eq!(table.allocate(FieldState::Unset), SharedSlot(0));
        assert_eq!(table.allocate(FieldState::Set(Value::Int(4))), SharedSlot(1));
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(SharedSlot(1)), Value::Int(4));
        assert_eq!(table.get(SharedSlot(0)), Value::Null);
    }

    #[test]
    fn mutable_slot_takes_every_write() {
        let table = SharedTable::new();
        let slot = table.allocate(FieldState::Set(Value::Int(0)));
        for i in 1..5 {
            table.set(slot, "n", Mutability::Mutable, Value::Int(i)).unwrap();
        }
        assert_eq!(table.get(slot), Value::Int(4));
    }

    #[test]
    fn final_slot_rejects_second_write() {
        let table = SharedTable::new();
        let slot = table.allocate(FieldState::Unset);
        table.set(slot, "k", Mutability::Final, Value::Null).unwrap();
        assert_eq!(table.state(slot), Some(FieldState::Set(Value::Null)));
        let err = table
            .set(slot, "k", Mutability::Final, Value::Int(1))
            .unwrap_err();
        assert_eq!(err, AccessError::FinalReassignment { name: "k".into() });
        assert_eq!(table.get(slot), Value::Null);
    }

    #[test]
    fn racing_final_writers_admit_exactly_one() {
        let table = SharedTable::shared();
        let slot = table.allocate(FieldState::Unset);
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let table = Arc::clone(&table);
                std::thread::spawn(move || {
                    table
                        .set(slot, "once", Mutability::Final, Value::Int(i))
                        .is_ok()
                })
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(winners, 1);
    }
}
