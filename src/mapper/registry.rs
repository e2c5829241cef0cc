//! Statically declared setter registries.
//!
//! Each payload type lists the fields a data table may set, the type each
//! one accepts and the function that stores it. Lookup is a plain map
//! access, so a column with no entry is simply skipped.

use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;

use crate::coercion::{FieldType, FieldValue};

/// Why a converted value could not be stored.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApplyError {
    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        expected: FieldType,
        actual: FieldType,
    },

    #[error("rejected by setter: {0}")]
    Rejected(String),
}

/// Rust types a setter may accept, with the coercion rule that feeds them.
pub trait FromFieldValue: Sized {
    const FIELD_TYPE: FieldType;

    fn from_field_value(value: FieldValue) -> Result<Self, ApplyError>;
}

macro_rules! impl_from_field_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromFieldValue for $ty {
                const FIELD_TYPE: FieldType = FieldType::$variant;

                fn from_field_value(value: FieldValue) -> Result<Self, ApplyError> {
                    match value {
                        FieldValue::$variant(v) => Ok(v),
                        other => Err(ApplyError::TypeMismatch {
                            expected: FieldType::$variant,
                            actual: other.field_type(),
                        }),
                    }
                }
            }
        )*
    };
}

impl_from_field_value! {
    String => Text,
    i32 => Int,
    i64 => Long,
    f64 => Double,
    f32 => Float,
    i16 => Short,
    i8 => Byte,
    bool => Bool,
    Decimal => Decimal,
}

type ApplyFn<T> = Box<dyn Fn(&mut T, FieldValue) -> Result<(), ApplyError> + Send + Sync>;

/// One settable field of a payload type.
pub struct Capability<T> {
    name: &'static str,
    field_type: FieldType,
    nullable: bool,
    apply: ApplyFn<T>,
}

impl<T> Capability<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Whether the field can be left unset when its cell is blank.
    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn apply(&self, target: &mut T, value: FieldValue) -> Result<(), ApplyError> {
        (self.apply)(target, value)
    }
}

impl<T> fmt::Debug for Capability<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("nullable", &self.nullable)
            .finish_non_exhaustive()
    }
}

/// Setter table for one payload type.
pub struct FieldRegistry<T> {
    type_name: &'static str,
    capabilities: HashMap<&'static str, Capability<T>>,
}

impl<T: 'static> FieldRegistry<T> {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            capabilities: HashMap::new(),
        }
    }

    /// Optional field; a blank cell leaves it untouched.
    pub fn field<V>(self, name: &'static str, setter: fn(&mut T, V)) -> Self
    where
        V: FromFieldValue + 'static,
    {
        self.typed(name, V::FIELD_TYPE, true, setter)
    }

    /// Field that cannot represent absence; a blank cell is reported as skipped.
    pub fn required<V>(self, name: &'static str, setter: fn(&mut T, V)) -> Self
    where
        V: FromFieldValue + 'static,
    {
        self.typed(name, V::FIELD_TYPE, false, setter)
    }

    /// Field of a type without a coercion rule; the setter receives the raw text.
    pub fn other(
        self,
        name: &'static str,
        type_name: &'static str,
        setter: fn(&mut T, String),
    ) -> Self {
        self.typed(name, FieldType::Other(type_name), true, setter)
    }

    /// Optional field whose setter may refuse the value.
    pub fn validated<V>(
        self,
        name: &'static str,
        setter: fn(&mut T, V) -> Result<(), ApplyError>,
    ) -> Self
    where
        V: FromFieldValue + 'static,
    {
        self.insert(Capability {
            name,
            field_type: V::FIELD_TYPE,
            nullable: true,
            apply: Box::new(move |target: &mut T, value: FieldValue| {
                setter(target, V::from_field_value(value)?)
            }),
        })
    }

    fn typed<V>(
        self,
        name: &'static str,
        field_type: FieldType,
        nullable: bool,
        setter: fn(&mut T, V),
    ) -> Self
    where
        V: FromFieldValue + 'static,
    {
        self.insert(Capability {
            name,
            field_type,
            nullable,
            apply: Box::new(move |target: &mut T, value: FieldValue| {
                setter(target, V::from_field_value(value)?);
                Ok(())
            }),
        })
    }

    fn insert(mut self, capability: Capability<T>) -> Self {
        self.capabilities.insert(capability.name, capability);
        self
    }
}

impl<T> FieldRegistry<T> {
    /// Payload type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, name: &str) -> Option<&Capability<T>> {
        self.capabilities.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.capabilities.contains_key(name)
    }

    /// Registered field names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.capabilities.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}

impl<T> fmt::Debug for FieldRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("type_name", &self.type_name)
            .field("fields", &self.names())
            .finish()
    }
}

/// A payload type that data tables can populate by field name.
///
/// Implementations usually keep the registry in a `LazyLock` static.
pub trait Settable: Sized + 'static {
    fn registry() -> &'static FieldRegistry<Self>;
}
