//! Registry of the element types of TAO shared arrays.
//!
//! The registry is an ordered table built once per run. The position of an
//! entry (starting at 1) is its identifier everywhere in the generated
//! bindings, so the order of [`TypeRegistry::tao`] must never change.

use std::os::raw::{c_double, c_float};

use tracing::debug;

use crate::builder::bindings::probe::{probe_scalar, Scalar};
use crate::core::abi::{AbiError, MeasuredRepresentation, NumberClass};
use crate::core::native::ElementType;

/// One native primitive type a shared array can be made of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeTypeEntry {
    /// Symbolic name (`INT8`, `FLOAT`, ...)
    pub name: &'static str,
    /// Numeric class and size measured on this platform
    pub repr: MeasuredRepresentation,
    /// Julia type the entry maps to
    pub alias: &'static str,
    /// Value of the corresponding `tao_eltype` constant
    pub code: i64,
    /// Human readable description
    pub description: &'static str,
}

impl NativeTypeEntry {
    pub fn class(&self) -> NumberClass {
        self.repr.class()
    }

    pub fn size(&self) -> usize {
        self.repr.size()
    }
}

/// Ordered, immutable catalog of element types.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    entries: Vec<NativeTypeEntry>,
}

impl TypeRegistry {
    /// Build the registry of the element types TAO distinguishes.
    pub fn tao() -> Result<Self, AbiError> {
        let entries = vec![
            entry::<i8>("INT8", "Int8", ElementType::Int8, "Signed 8-bit integer")?,
            entry::<u8>("UINT8", "UInt8", ElementType::UInt8, "Unsigned 8-bit integer")?,
            entry::<i16>("INT16", "Int16", ElementType::Int16, "Signed 16-bit integer")?,
            entry::<u16>("UINT16", "UInt16", ElementType::UInt16, "Unsigned 16-bit integer")?,
            entry::<i32>("INT32", "Int32", ElementType::Int32, "Signed 32-bit integer")?,
            entry::<u32>("UINT32", "UInt32", ElementType::UInt32, "Unsigned 32-bit integer")?,
            entry::<i64>("INT64", "Int64", ElementType::Int64, "Signed 64-bit integer")?,
            entry::<u64>("UINT64", "UInt64", ElementType::UInt64, "Unsigned 64-bit integer")?,
            entry::<c_float>(
                "FLOAT",
                "Cfloat",
                ElementType::Float,
                "Single precision floating-point",
            )?,
            entry::<c_double>(
                "DOUBLE",
                "Cdouble",
                ElementType::Double,
                "Double precision floating-point",
            )?,
        ];
        debug!(count = entries.len(), "built element type registry");
        Ok(TypeRegistry { entries })
    }

    /// Build a registry from explicit entries.
    pub fn from_entries(entries: Vec<NativeTypeEntry>) -> Self {
        TypeRegistry { entries }
    }

    /// Entry with the given 1-based identifier.
    pub fn get(&self, id: usize) -> Option<&NativeTypeEntry> {
        id.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Entry whose native element type code is `code`.
    pub fn by_code(&self, code: i64) -> Option<&NativeTypeEntry> {
        self.entries.iter().find(|e| e.code == code)
    }

    /// Entries paired with their identifiers, in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &NativeTypeEntry)> {
        self.entries.iter().enumerate().map(|(i, e)| (i + 1, e))
    }

    pub fn entries(&self) -> &[NativeTypeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn entry<T: Scalar>(
    name: &'static str,
    alias: &'static str,
    eltype: ElementType,
    description: &'static str,
) -> Result<NativeTypeEntry, AbiError> {
    Ok(NativeTypeEntry {
        name,
        repr: probe_scalar::<T>()?,
        alias,
        code: eltype.code(),
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order() {
        let registry = TypeRegistry::tao().unwrap();
        let names: Vec<_> = registry.entries().iter().map(|e| e.name).collect();
        assert_eq!(
            names,
            [
                "INT8", "UINT8", "INT16", "UINT16", "INT32", "UINT32", "INT64", "UINT64",
                "FLOAT", "DOUBLE"
            ]
        );
    }

    #[test]
    fn test_identifier_matches_code() {
        let registry = TypeRegistry::tao().unwrap();
        for (id, entry) in registry.iter() {
            assert_eq!(entry.code, id as i64);
            assert_eq!(registry.by_code(entry.code), Some(entry));
        }
    }

    #[test]
    fn test_get_out_of_range() {
        let registry = TypeRegistry::tao().unwrap();
        assert!(registry.get(0).is_none());
        assert_eq!(registry.get(1).map(|e| e.name), Some("INT8"));
        assert_eq!(registry.get(10).map(|e| e.name), Some("DOUBLE"));
        assert!(registry.get(11).is_none());
    }

    #[test]
    fn test_measured_classes() {
        let registry = TypeRegistry::tao().unwrap();
        let int8 = registry.get(1).unwrap();
        assert_eq!(int8.class(), NumberClass::Signed);
        assert_eq!(int8.size(), 1);

        let uint64 = registry.get(8).unwrap();
        assert_eq!(uint64.class(), NumberClass::Unsigned);
        assert_eq!(uint64.size(), 8);

        let double = registry.get(10).unwrap();
        assert_eq!(double.class(), NumberClass::Float);
        assert_eq!(double.size(), std::mem::size_of::<c_double>());
    }
}
