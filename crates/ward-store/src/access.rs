//! The internal handle: full-visibility field access for a class's own code.
//!
//! An [`Access`] is the capability returned by a build. Whoever holds it can
//! turn an instance into an [`Internal`] handle that reaches every field the
//! build declared or inherited, public and private alike. Code outside the
//! class definition never receives the `Access` and so only sees the
//! external surface on [`Instance`] and [`ClassType`](crate::ClassType).

use std::fmt;
use std::sync::Arc;

use ward_core::{AccessError, ClassId, Value};

use crate::class::ClassShape;
use crate::instance::{unknown, Instance};
use crate::layout::FieldEntry;

/// Capability to open internal handles on instances of one build and of
/// every build that extends it.
#[derive(Clone)]
pub struct Access {
    shape: Arc<ClassShape>,
}

impl Access {
    pub(crate) fn new(shape: Arc<ClassShape>) -> Self {
        Self { shape }
    }

    /// Identity of the abstract base this capability belongs to.
    pub fn class_id(&self) -> ClassId {
        self.shape.base()
    }

    /// All field names in scope, in declaration order.
    pub fn fields(&self) -> Vec<&str> {
        self.shape.layout().names().collect()
    }

    fn check(&self, instance: &Instance) -> Result<(), AccessError> {
        if instance.class().shape().descends_from(self.shape.base()) {
            Ok(())
        } else {
            Err(AccessError::ForeignInstance {
                access: self.shape.base(),
                instance: instance.class().id(),
            })
        }
    }

    fn entry(&self, name: &str) -> Result<&FieldEntry, AccessError> {
        self.shape.layout().entry(name).ok_or_else(|| unknown(name))
    }

    /// Open a read-write internal handle on `instance`.
    ///
    /// # Errors
    ///
    /// [`AccessError::ForeignInstance`] unless the instance's class was
    /// built by this build or by one extending it.
    pub fn handle<'a>(&'a self, instance: &'a mut Instance) -> Result<Internal<'a>, AccessError> {
        self.check(instance)?;
        Ok(Internal {
            access: self,
            instance,
        })
    }

    /// Open a read-only internal handle on `instance`.
    ///
    /// # Errors
    ///
    /// As [`handle`](Self::handle).
    pub fn view<'a>(&'a self, instance: &'a Instance) -> Result<View<'a>, AccessError> {
        self.check(instance)?;
        Ok(View {
            access: self,
            instance,
        })
    }

    /// Read a shared field, public or private, without an instance.
    ///
    /// # Errors
    ///
    /// [`AccessError::UnknownField`] for names outside the build,
    /// [`AccessError::NotShared`] for instance fields.
    pub fn get_shared(&self, name: &str) -> Result<Value, AccessError> {
        let entry = self.entry(name)?;
        let slot = entry.shared_slot().ok_or_else(|| AccessError::NotShared {
            name: name.to_string(),
        })?;
        Ok(self.shape.shared().get(slot))
    }

    /// Write a shared field, public or private, without an instance.
    ///
    /// # Errors
    ///
    /// As [`get_shared`](Self::get_shared), plus
    /// [`AccessError::FinalReassignment`].
    pub fn set_shared(&self, name: &str, value: impl Into<Value>) -> Result<(), AccessError> {
        let entry = self.entry(name)?;
        let slot = entry.shared_slot().ok_or_else(|| AccessError::NotShared {
            name: name.to_string(),
        })?;
        self.shape
            .shared()
            .set(slot, name, entry.mutability, value.into())
    }
}

impl fmt::Debug for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Access")
            .field("class", &self.shape.base())
            .field("fields", &self.shape.layout().len())
            .finish()
    }
}

/// Read-write internal handle bound to one instance.
pub struct Internal<'a> {
    access: &'a Access,
    instance: &'a mut Instance,
}

impl Internal<'_> {
    /// Read any field in scope.
    ///
    /// # Errors
    ///
    /// [`AccessError::UnknownField`] for names outside the build.
    pub fn get(&self, name: &str) -> Result<Value, AccessError> {
        let entry = self.access.entry(name)?;
        self.instance.read(&self.access.shape, name, entry)
    }

    /// Write any field in scope.
    ///
    /// # Errors
    ///
    /// [`AccessError::UnknownField`] for names outside the build,
    /// [`AccessError::FinalReassignment`] for a final field that already
    /// holds a value.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), AccessError> {
        let entry = *self.access.entry(name)?;
        self.instance
            .write(&self.access.shape, name, &entry, value.into())
    }

    /// All field names in scope, in declaration order.
    pub fn fields(&self) -> Vec<&str> {
        self.access.fields()
    }

    /// The underlying instance.
    pub fn instance(&self) -> &Instance {
        self.instance
    }
}

/// Read-only internal handle bound to one instance.
#[derive(Debug)]
pub struct View<'a> {
    access: &'a Access,
    instance: &'a Instance,
}

impl View<'_> {
    /// Read any field in scope.
    ///
    /// # Errors
    ///
    /// [`AccessError::UnknownField`] for names outside the build.
    pub fn get(&self, name: &str) -> Result<Value, AccessError> {
        let entry = self.access.entry(name)?;
        self.instance.read(&self.access.shape, name, entry)
    }

    /// All field names in scope, in declaration order.
    pub fn fields(&self) -> Vec<&str> {
        self.access.fields()
    }
}
