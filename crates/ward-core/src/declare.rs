//! Declaration syntax accepted by the normalizer.
//!
//! Two shapes are accepted and both collapse into [`FieldSpec`] records:
//!
//! - **Flat** ([`FlatDeclarations`]): an ordered list of `name → FieldDecl`,
//!   where each entry is a bare default value or a [`FieldOptions`] record
//!   that may carry its own visibility.
//! - **Grouped** ([`GroupedDeclarations`]): a `public` list and a `private`
//!   list. The group decides visibility, overriding any visibility carried
//!   by an options record.
//!
//! ```
//! use ward_core::{Declarations, FieldOptions};
//!
//! let flat = Declarations::flat()
//!     .field("label", "origin")
//!     .field_with("count", FieldOptions::new(0).private().shared());
//!
//! let grouped = Declarations::grouped()
//!     .public("label", "origin")
//!     .private_with("count", FieldOptions::new(0).shared());
//! # let _ = (flat, grouped);
//! ```

use crate::field::{FieldSpec, Mutability, StorageClass, Visibility};
use crate::value::Value;

/// Options record for a single field.
///
/// Unspecified attributes fall back to the defaults (public, instance,
/// mutable) during normalization.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldOptions {
    /// The field's default value.
    pub value: Value,
    /// Explicit visibility, if any.
    pub visibility: Option<Visibility>,
    /// Explicit storage class, if any.
    pub storage_class: Option<StorageClass>,
    /// Explicit mutability, if any.
    pub mutability: Option<Mutability>,
}

impl FieldOptions {
    /// Options with the given default value and no explicit attributes.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Mark the field public.
    pub fn public(mut self) -> Self {
        self.visibility = Some(Visibility::Public);
        self
    }

    /// Mark the field private.
    pub fn private(mut self) -> Self {
        self.visibility = Some(Visibility::Private);
        self
    }

    /// Give the field chain-shared storage.
    pub fn shared(mut self) -> Self {
        self.storage_class = Some(StorageClass::Shared);
        self
    }

    /// Give the field per-instance storage.
    pub fn instance(mut self) -> Self {
        self.storage_class = Some(StorageClass::Instance);
        self
    }

    /// Mark the field final.
    pub fn final_(mut self) -> Self {
        self.mutability = Some(Mutability::Final);
        self
    }

    /// Mark the field mutable.
    pub fn mutable(mut self) -> Self {
        self.mutability = Some(Mutability::Mutable);
        self
    }
}

/// One declared field, in either shorthand or options form.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldDecl {
    /// A bare default value; every attribute takes its default.
    Shorthand(Value),
    /// A full options record.
    Options(FieldOptions),
}

impl FieldDecl {
    /// Resolve into a canonical spec.
    ///
    /// `group` is the visibility implied by a grouped declaration; when
    /// present it wins over the options record.
    pub fn into_spec(self, name: String, group: Option<Visibility>) -> FieldSpec {
        let options = match self {
            Self::Shorthand(value) => FieldOptions::new(value),
            Self::Options(options) => options,
        };
        FieldSpec {
            name,
            initial_value: options.value,
            visibility: group.or(options.visibility).unwrap_or_default(),
            storage_class: options.storage_class.unwrap_or_default(),
            mutability: options.mutability.unwrap_or_default(),
            shared_slot: None,
        }
    }
}

impl From<FieldOptions> for FieldDecl {
    fn from(options: FieldOptions) -> Self {
        Self::Options(options)
    }
}

/// Flat declaration shape: `name → value | options`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlatDeclarations {
    /// Entries in declaration order. Repeated names are kept so the
    /// normalizer can reject them.
    pub entries: Vec<(String, FieldDecl)>,
}

impl FlatDeclarations {
    /// Add a shorthand field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries
            .push((name.into(), FieldDecl::Shorthand(value.into())));
        self
    }

    /// Add a field with an options record.
    pub fn field_with(mut self, name: impl Into<String>, options: FieldOptions) -> Self {
        self.entries.push((name.into(), FieldDecl::Options(options)));
        self
    }
}

/// Grouped declaration shape: visibility comes from the group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupedDeclarations {
    /// The `public` group, in declaration order.
    pub public: Vec<(String, FieldDecl)>,
    /// The `private` group, in declaration order.
    pub private: Vec<(String, FieldDecl)>,
}

impl GroupedDeclarations {
    /// Add a shorthand public field.
    pub fn public(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.public
            .push((name.into(), FieldDecl::Shorthand(value.into())));
        self
    }

    /// Add a public field with an options record.
    pub fn public_with(mut self, name: impl Into<String>, options: FieldOptions) -> Self {
        self.public.push((name.into(), FieldDecl::Options(options)));
        self
    }

    /// Add a shorthand private field.
    pub fn private(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.private
            .push((name.into(), FieldDecl::Shorthand(value.into())));
        self
    }

    /// Add a private field with an options record.
    pub fn private_with(mut self, name: impl Into<String>, options: FieldOptions) -> Self {
        self.private.push((name.into(), FieldDecl::Options(options)));
        self
    }
}

/// Any accepted declaration shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Declarations {
    /// See [`FlatDeclarations`].
    Flat(FlatDeclarations),
    /// See [`GroupedDeclarations`].
    Grouped(GroupedDeclarations),
}

impl Declarations {
    /// Start an empty flat declaration set.
    pub fn flat() -> FlatDeclarations {
        FlatDeclarations::default()
    }

    /// Start an empty grouped declaration set.
    pub fn grouped() -> GroupedDeclarations {
        GroupedDeclarations::default()
    }

    /// Number of declared entries, counting repeats.
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(flat) => flat.entries.len(),
            Self::Grouped(grouped) => grouped.public.len() + grouped.private.len(),
        }
    }

    /// Whether no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Declarations {
    fn default() -> Self {
        Self::Flat(FlatDeclarations::default())
    }
}

impl From<FlatDeclarations> for Declarations {
    fn from(flat: FlatDeclarations) -> Self {
        Self::Flat(flat)
    }
}

impl From<GroupedDeclarations> for Declarations {
    fn from(grouped: GroupedDeclarations) -> Self {
        Self::Grouped(grouped)
    }
}
