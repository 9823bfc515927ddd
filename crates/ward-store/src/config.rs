//! Build options.

use crate::class::ClassType;

/// Options for [`Registry::build`](crate::Registry::build).
///
/// ```
/// use ward_store::{ClassOptions, Registry};
/// use ward_core::Declarations;
///
/// let registry = Registry::new();
/// let parent = registry
///     .build(Declarations::flat().field("a", 1), ClassOptions::named("Parent"))
///     .unwrap();
/// let concrete = parent.make_extensible(parent.base().subclass("Concrete"));
///
/// let child = registry
///     .build(
///         Declarations::flat().field("b", 2),
///         ClassOptions::named("Child").extends(&concrete),
///     )
///     .unwrap();
/// assert_eq!(child.base().fields(), vec!["a", "b"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ClassOptions {
    /// Parent class to inherit fields from. Only takes effect if the
    /// parent was registered with `make_extensible`.
    pub extends: Option<ClassType>,
    /// Diagnostic name of the abstract base. Default: `"Base#<id>"`.
    pub name: Option<String>,
}

impl ClassOptions {
    /// No parent, default name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with a diagnostic name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new().name(name)
    }

    /// Set the diagnostic name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Inherit from `parent`.
    pub fn extends(mut self, parent: &ClassType) -> Self {
        self.extends = Some(parent.clone());
        self
    }
}
