//! The [`Object`] trait: the external surface for user-defined types.
//!
//! A user type embeds an [`Instance`] and implements [`Object`] to expose
//! its public fields. The type's own methods reach private fields through
//! the build's [`Access`](crate::Access), which stays private to the module
//! that defines the type.
//!
//! ```
//! use std::sync::LazyLock;
//! use ward_core::{AccessError, Declarations, FieldOptions, Value};
//! use ward_store::{Access, ClassOptions, ClassType, Instance, Object, Registry};
//!
//! static COUNTER: LazyLock<(Access, ClassType)> = LazyLock::new(|| {
//!     let bp = Registry::new()
//!         .build(
//!             Declarations::grouped()
//!                 .public("label", "counter")
//!                 .private("hits", 0),
//!             ClassOptions::named("Counter"),
//!         )
//!         .expect("valid declarations");
//!     let class = bp.base().subclass("Counter");
//!     (bp.access().clone(), class)
//! });
//!
//! struct Counter(Instance);
//!
//! impl Counter {
//!     fn new() -> Self {
//!         Counter(COUNTER.1.instantiate().expect("concrete class"))
//!     }
//!
//!     fn hit(&mut self) -> Result<i64, AccessError> {
//!         let mut this = COUNTER.0.handle(&mut self.0)?;
//!         let hits = this.get("hits")?.as_int().unwrap_or(0) + 1;
//!         this.set("hits", hits)?;
//!         Ok(hits)
//!     }
//! }
//!
//! impl Object for Counter {
//!     fn instance(&self) -> &Instance {
//!         &self.0
//!     }
//!     fn instance_mut(&mut self) -> &mut Instance {
//!         &mut self.0
//!     }
//! }
//!
//! let mut c = Counter::new();
//! assert_eq!(c.hit(), Ok(1));
//! assert_eq!(c.get("label"), Ok(Value::from("counter")));
//! assert!(c.get("hits").is_err());
//! ```

use ward_core::{AccessError, Value};

use crate::class::ClassType;
use crate::instance::Instance;

/// A user type backed by an [`Instance`].
///
/// The provided methods forward to the instance's external surface, so
/// visibility and finality behave exactly as on [`Instance`].
pub trait Object {
    /// The embedded instance.
    fn instance(&self) -> &Instance;

    /// The embedded instance, mutably.
    fn instance_mut(&mut self) -> &mut Instance;

    /// The concrete class.
    fn class(&self) -> &ClassType {
        self.instance().class()
    }

    /// Read a public field.
    fn get(&self, name: &str) -> Result<Value, AccessError> {
        self.instance().get(name)
    }

    /// Write a public field.
    fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), AccessError>
    where
        Self: Sized,
    {
        self.instance_mut().set(name, value)
    }

    /// Public field names in declaration order.
    fn external_fields(&self) -> Vec<&str> {
        self.instance().external_fields()
    }
}

impl Object for Instance {
    fn instance(&self) -> &Instance {
        self
    }

    fn instance_mut(&mut self) -> &mut Instance {
        self
    }
}
