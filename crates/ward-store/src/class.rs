//! Class identities, the per-build [`ClassShape`], and the type-level
//! external surface.
//!
//! A build produces one shape and one abstract [`ClassType`] over it.
//! Concrete classes are derived with [`ClassType::subclass`]; every class
//! derived from the same build shares the shape, and with it the layout and
//! the chain's shared table.

use std::fmt;
use std::sync::{Arc, Weak};

use tracing::trace;
use ward_core::{
    AccessError, ClassId, DeclarationSet, InstantiationError, Lineage, Mutability, SharedSlot,
    Value,
};

use crate::instance::Instance;
use crate::layout::FieldLayout;
use crate::shared::SharedTableRef;

/// Resolved field shape of one build.
///
/// Immutable once constructed: accessors, instances and the registry all
/// hold it behind an `Arc`.
#[derive(Debug)]
pub struct ClassShape {
    base: ClassId,
    declarations: Arc<DeclarationSet>,
    layout: FieldLayout,
    shared: SharedTableRef,
    lineage: Lineage,
}

impl ClassShape {
    /// Allocate shared slots for `declarations` in `shared` and resolve the
    /// layout.
    ///
    /// `base` is the identity of the abstract base that owns this shape;
    /// `ancestors` is the lineage inherited from an extensible parent, empty
    /// for the first class of a chain.
    pub(crate) fn new(
        base: ClassId,
        mut declarations: DeclarationSet,
        shared: SharedTableRef,
        ancestors: Lineage,
    ) -> Self {
        let allocated = declarations.assign_slots(|spec| shared.allocate(spec.initial_state()));
        trace!(%base, allocated, "allocated shared slots");
        let layout = FieldLayout::build(&declarations);
        let mut lineage = Lineage::with_capacity(ancestors.len() + 1);
        lineage.push(base);
        lineage.extend(ancestors);
        Self {
            base,
            declarations: Arc::new(declarations),
            layout,
            shared,
            lineage,
        }
    }

    /// Identity of the abstract base built over this shape.
    pub fn base(&self) -> ClassId {
        self.base
    }

    /// The canonical declaration set, with shared slots assigned.
    pub fn declarations(&self) -> &Arc<DeclarationSet> {
        &self.declarations
    }

    /// The resolved layout.
    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    /// The chain's shared table.
    pub fn shared(&self) -> &SharedTableRef {
        &self.shared
    }

    /// Abstract base identities this shape descends from, nearest (its own
    /// base) first.
    pub fn lineage(&self) -> &Lineage {
        &self.lineage
    }

    /// Whether the build identified by `base` is this shape or an ancestor.
    pub fn descends_from(&self, base: ClassId) -> bool {
        self.lineage.contains(&base)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ClassKind {
    Abstract,
    Concrete,
}

pub(crate) struct ClassInner {
    id: ClassId,
    name: String,
    kind: ClassKind,
    shape: Arc<ClassShape>,
}

/// A class: an identity over a build's shape.
///
/// Cheap to clone; clones share identity. Public shared fields are
/// reachable on the type itself through [`get`](Self::get) and
/// [`set`](Self::set), without an instance.
#[derive(Clone)]
pub struct ClassType {
    inner: Arc<ClassInner>,
}

impl ClassType {
    pub(crate) fn new_abstract(name: String, shape: Arc<ClassShape>) -> Self {
        Self {
            inner: Arc::new(ClassInner {
                id: shape.base(),
                name,
                kind: ClassKind::Abstract,
                shape,
            }),
        }
    }

    pub(crate) fn downgrade(&self) -> Weak<ClassInner> {
        Arc::downgrade(&self.inner)
    }

    pub(crate) fn upgrade(weak: &Weak<ClassInner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    /// Derive a concrete, instantiable class with its own identity.
    pub fn subclass(&self, name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ClassInner {
                id: ClassId::next(),
                name: name.into(),
                kind: ClassKind::Concrete,
                shape: Arc::clone(&self.inner.shape),
            }),
        }
    }

    /// Unique identity of this class.
    pub fn id(&self) -> ClassId {
        self.inner.id
    }

    /// Diagnostic name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Whether this is the abstract base of a build.
    pub fn is_abstract(&self) -> bool {
        self.inner.kind == ClassKind::Abstract
    }

    /// The shape shared by every class of this build.
    pub fn shape(&self) -> &Arc<ClassShape> {
        &self.inner.shape
    }

    /// The canonical declaration set.
    pub fn declarations(&self) -> &DeclarationSet {
        self.inner.shape.declarations()
    }

    /// All field names, public and private, in declaration order.
    pub fn fields(&self) -> Vec<&str> {
        self.inner.shape.layout().names().collect()
    }

    /// Public field names in declaration order.
    pub fn public_fields(&self) -> Vec<&str> {
        self.inner.shape.layout().public_names().collect()
    }

    /// Construct an instance with storage seeded from the declared defaults.
    ///
    /// # Errors
    ///
    /// [`InstantiationError::AbstractInstantiation`] on the abstract base.
    pub fn instantiate(&self) -> Result<Instance, InstantiationError> {
        if self.is_abstract() {
            return Err(InstantiationError::AbstractInstantiation {
                class: self.id(),
                name: self.name().to_string(),
            });
        }
        trace!(class = %self.id(), name = self.name(), "instantiate");
        Ok(Instance::new(self.clone()))
    }

    fn public_shared(&self, name: &str) -> Result<(SharedSlot, Mutability), AccessError> {
        let entry = self
            .inner
            .shape
            .layout()
            .public_entry(name)
            .ok_or_else(|| AccessError::UnknownField {
                name: name.to_string(),
            })?;
        let slot = entry.shared_slot().ok_or_else(|| AccessError::NotShared {
            name: name.to_string(),
        })?;
        Ok((slot, entry.mutability))
    }

    /// Read a public shared field without an instance.
    ///
    /// # Errors
    ///
    /// [`AccessError::UnknownField`] for absent or private names,
    /// [`AccessError::NotShared`] for public instance fields.
    pub fn get(&self, name: &str) -> Result<Value, AccessError> {
        let (slot, _) = self.public_shared(name)?;
        Ok(self.inner.shape.shared().get(slot))
    }

    /// Write a public shared field without an instance.
    ///
    /// # Errors
    ///
    /// As [`get`](Self::get), plus [`AccessError::FinalReassignment`].
    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<(), AccessError> {
        let (slot, mutability) = self.public_shared(name)?;
        self.inner
            .shape
            .shared()
            .set(slot, name, mutability, value.into())
    }
}

impl PartialEq for ClassType {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for ClassType {}

impl fmt::Debug for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassType")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("kind", &self.inner.kind)
            .field("base", &self.inner.shape.base())
            .finish()
    }
}
