//! The inheritance chain registry and the build entry point.
//!
//! Making a class extensible is an explicit step the owner of the class
//! performs once its fields are final: [`Registry::register_extensible`]
//! (or [`Blueprint::make_extensible`]) records the class's canonical
//! declaration set under the class's own identity. A later build that
//! names the class in [`ClassOptions::extends`] merges with that set. If
//! the class never opted in, the child silently starts a fresh chain.
//!
//! Entries hold the class weakly. Once every handle to a registered class
//! is dropped its entry stops resolving and is pruned on the next
//! registration.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::debug;
use ward_core::{normalize, ClassId, DeclarationError, DeclarationSet, Declarations, Lineage};

use crate::access::Access;
use crate::class::{ClassInner, ClassShape, ClassType};
use crate::config::ClassOptions;
use crate::shared::{SharedTable, SharedTableRef};

/// What a subclass inherits from an extensible parent.
///
/// Carries field shape and the chain's shared table handle, never
/// per-instance values.
#[derive(Clone, Debug)]
pub struct ExtendTemplate {
    /// The parent's accumulated declaration set, shared slots assigned.
    pub declarations: Arc<DeclarationSet>,
    /// The chain's shared table.
    pub shared: SharedTableRef,
    /// The parent's lineage, nearest first.
    pub lineage: Lineage,
}

impl ExtendTemplate {
    fn of(shape: &ClassShape) -> Self {
        Self {
            declarations: Arc::clone(shape.declarations()),
            shared: Arc::clone(shape.shared()),
            lineage: shape.lineage().clone(),
        }
    }
}

/// Registry of extensible classes.
///
/// Cheap to clone; clones share entries. There is no process-wide
/// instance: builds that should be able to extend each other use the same
/// registry value.
#[derive(Clone, Default)]
pub struct Registry {
    entries: Arc<Mutex<HashMap<ClassId, Weak<ClassInner>>>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ClassId, Weak<ClassInner>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish `class`'s field shape for subclassing and return it unchanged.
    pub fn register_extensible(&self, class: ClassType) -> ClassType {
        let mut entries = self.lock();
        entries.retain(|_, weak| weak.strong_count() > 0);
        entries.insert(class.id(), class.downgrade());
        debug!(
            class = %class.id(),
            name = class.name(),
            fields = class.declarations().len(),
            "registered extensible class"
        );
        class
    }

    /// The extend template of a registered, still-live class.
    pub fn lookup(&self, class: ClassId) -> Option<ExtendTemplate> {
        let entries = self.lock();
        let weak = entries.get(&class)?;
        let class = ClassType::upgrade(weak)?;
        Some(ExtendTemplate::of(class.shape()))
    }

    /// Whether `class` is registered and still live.
    pub fn is_extensible(&self, class: ClassId) -> bool {
        self.lock()
            .get(&class)
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    /// Number of live registered classes.
    pub fn len(&self) -> usize {
        self.lock()
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Whether no live class is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Normalize `declarations`, merge them with the parent named in
    /// `options`, allocate shared storage and build both surfaces.
    ///
    /// # Errors
    ///
    /// Any [`DeclarationError`] from normalization. Nothing is allocated
    /// on failure.
    pub fn build(
        &self,
        declarations: impl Into<Declarations>,
        options: ClassOptions,
    ) -> Result<Blueprint, DeclarationError> {
        let parent = options.extends.as_ref().and_then(|parent| {
            let template = self.lookup(parent.id());
            if template.is_none() {
                debug!(
                    parent = %parent.id(),
                    name = parent.name(),
                    "parent not registered as extensible, starting a fresh chain"
                );
            }
            template
        });

        let set = normalize(
            declarations.into(),
            parent.as_ref().map(|t| t.declarations.as_ref()),
        )?;

        let (shared, ancestors) = match parent {
            Some(template) => (template.shared, template.lineage),
            None => (SharedTable::shared(), Lineage::new()),
        };
        let base = ClassId::next();
        let shape = Arc::new(ClassShape::new(base, set, shared, ancestors));
        let name = options.name.unwrap_or_else(|| format!("Base#{base}"));
        debug!(
            class = %base,
            name = %name,
            fields = shape.layout().len(),
            instance_fields = shape.layout().instance_template().len(),
            depth = shape.lineage().len(),
            "built class"
        );

        Ok(Blueprint {
            access: Access::new(Arc::clone(&shape)),
            base: ClassType::new_abstract(name, shape),
            registry: self.clone(),
        })
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("extensible", &self.len())
            .finish()
    }
}

/// Result of a build: the internal access capability, the abstract base,
/// and the hook to publish a concrete class for extension.
#[derive(Debug)]
pub struct Blueprint {
    access: Access,
    base: ClassType,
    registry: Registry,
}

impl Blueprint {
    /// Internal handle factory. Keep it private to the class's own code.
    pub fn access(&self) -> &Access {
        &self.access
    }

    /// The abstract base; derive concrete classes with
    /// [`ClassType::subclass`].
    pub fn base(&self) -> &ClassType {
        &self.base
    }

    /// Register `class` as extensible in the registry this blueprint was
    /// built from, returning it unchanged.
    pub fn make_extensible(&self, class: ClassType) -> ClassType {
        self.registry.register_extensible(class)
    }

    /// Split into the access capability and the abstract base.
    pub fn into_parts(self) -> (Access, ClassType) {
        (self.access, self.base)
    }
}
