//! Mapping of measured representations to Julia type names.
//!
//! Resolution only looks at the byte size and numeric class of a
//! representation. Native type names are never consulted: `long` is 4 bytes
//! on some platforms and 8 on others, and only its width matters here.

use crate::builder::bindings::probe::Platform;
use crate::core::abi::{AbiError, MeasuredRepresentation, NumberClass};

/// How a resolved alias should be spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AliasStyle {
    /// Prefer Julia's C-compatible names (`Cint`, `Clong`, ...)
    NativeCall,
    /// Always use an explicit width (`Int32`, `UInt64`, ...)
    #[default]
    FixedWidth,
}

/// One C-compatible Julia type, with the width the platform gives it.
#[derive(Debug, Clone, Copy)]
struct NativeCallName {
    size: usize,
    signed: &'static str,
    unsigned: &'static str,
}

/// Resolves representations against the C widths of a platform.
#[derive(Debug, Clone)]
pub struct AliasResolver {
    integers: [NativeCallName; 4],
    floats: [NativeCallName; 2],
}

impl AliasResolver {
    /// Create a resolver for a measured platform.
    pub fn new(platform: &Platform) -> Self {
        // Ties are broken by this order.
        let integers = [
            NativeCallName {
                size: platform.c_int.size(),
                signed: "Cint",
                unsigned: "Cuint",
            },
            NativeCallName {
                size: platform.c_long.size(),
                signed: "Clong",
                unsigned: "Culong",
            },
            NativeCallName {
                size: platform.c_short.size(),
                signed: "Cshort",
                unsigned: "Cushort",
            },
            NativeCallName {
                size: platform.c_char.size(),
                signed: "Cchar",
                unsigned: "Cuchar",
            },
        ];
        let floats = [
            NativeCallName {
                size: platform.c_float.size(),
                signed: "Cfloat",
                unsigned: "Cfloat",
            },
            NativeCallName {
                size: platform.c_double.size(),
                signed: "Cdouble",
                unsigned: "Cdouble",
            },
        ];
        AliasResolver { integers, floats }
    }

    /// Julia type with the same size and class as `repr`.
    pub fn resolve(
        &self,
        repr: &MeasuredRepresentation,
        style: AliasStyle,
    ) -> Result<String, AbiError> {
        if style == AliasStyle::NativeCall {
            if let Some(name) = self.native_call(repr) {
                return Ok(name.to_string());
            }
        }
        fixed_width(repr)
    }

    fn native_call(&self, repr: &MeasuredRepresentation) -> Option<&'static str> {
        let candidates: &[NativeCallName] = match repr.class() {
            NumberClass::Float => &self.floats,
            _ => &self.integers,
        };
        candidates
            .iter()
            .find(|c| c.size == repr.size())
            .map(|c| if repr.is_signed() { c.signed } else { c.unsigned })
    }
}

/// Explicit-width Julia type derived from size and class alone.
pub fn fixed_width(repr: &MeasuredRepresentation) -> Result<String, AbiError> {
    let bits = repr.bits();
    let name = match (repr.class(), repr.size()) {
        (NumberClass::Float, 2 | 4 | 8) => format!("Float{}", bits),
        (NumberClass::Signed, 1 | 2 | 4 | 8 | 16) => format!("Int{}", bits),
        (NumberClass::Unsigned, 1 | 2 | 4 | 8 | 16) => format!("UInt{}", bits),
        (class, size) => return Err(AbiError::UnrepresentableWidth { size, class }),
    };
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::abi::StructLayout;
    use crate::core::registry::TypeRegistry;

    fn repr(size: usize, class: NumberClass) -> MeasuredRepresentation {
        MeasuredRepresentation::new(size, class).unwrap()
    }

    /// An ILP32 platform: `int` and `long` are both 4 bytes.
    fn ilp32() -> Platform {
        let int = repr(4, NumberClass::Signed);
        Platform {
            c_char: repr(1, NumberClass::Signed),
            c_short: repr(2, NumberClass::Signed),
            c_int: int,
            c_long: int,
            c_float: repr(4, NumberClass::Float),
            c_double: repr(8, NumberClass::Float),
            status: int,
            object_type: repr(4, NumberClass::Unsigned),
            eltype: repr(4, NumberClass::Unsigned),
            camera_state: repr(4, NumberClass::Unsigned),
            c_enum: int,
            shmid: int,
            timespec: StructLayout {
                name: "timespec",
                size: 8,
                fields: Vec::new(),
            },
        }
    }

    #[test]
    fn test_fixed_width_names() {
        assert_eq!(fixed_width(&repr(4, NumberClass::Signed)).unwrap(), "Int32");
        assert_eq!(fixed_width(&repr(8, NumberClass::Unsigned)).unwrap(), "UInt64");
        assert_eq!(fixed_width(&repr(1, NumberClass::Unsigned)).unwrap(), "UInt8");
        assert_eq!(fixed_width(&repr(8, NumberClass::Float)).unwrap(), "Float64");
    }

    #[test]
    fn test_native_call_prefers_int_on_ties() {
        let resolver = AliasResolver::new(&ilp32());
        let four = repr(4, NumberClass::Signed);
        assert_eq!(resolver.resolve(&four, AliasStyle::NativeCall).unwrap(), "Cint");
        let four = repr(4, NumberClass::Unsigned);
        assert_eq!(resolver.resolve(&four, AliasStyle::NativeCall).unwrap(), "Cuint");
    }

    #[test]
    fn test_native_call_by_size() {
        let resolver = AliasResolver::new(&ilp32());
        let two = repr(2, NumberClass::Unsigned);
        assert_eq!(resolver.resolve(&two, AliasStyle::NativeCall).unwrap(), "Cushort");
        let one = repr(1, NumberClass::Signed);
        assert_eq!(resolver.resolve(&one, AliasStyle::NativeCall).unwrap(), "Cchar");
        let double = repr(8, NumberClass::Float);
        assert_eq!(resolver.resolve(&double, AliasStyle::NativeCall).unwrap(), "Cdouble");
    }

    #[test]
    fn test_native_call_falls_back_to_fixed_width() {
        // No C integer type is 8 bytes wide on ILP32.
        let resolver = AliasResolver::new(&ilp32());
        let eight = repr(8, NumberClass::Signed);
        assert_eq!(resolver.resolve(&eight, AliasStyle::NativeCall).unwrap(), "Int64");
    }

    #[test]
    fn test_fixed_width_style_ignores_c_names() {
        let resolver = AliasResolver::new(&ilp32());
        let four = repr(4, NumberClass::Signed);
        assert_eq!(resolver.resolve(&four, AliasStyle::FixedWidth).unwrap(), "Int32");
    }

    #[test]
    fn test_host_long_resolution() {
        let platform = Platform::probe().unwrap();
        let resolver = AliasResolver::new(&platform);
        let expected = if platform.c_long.size() == platform.c_int.size() {
            "Cint"
        } else {
            "Clong"
        };
        assert_eq!(
            resolver.resolve(&platform.c_long, AliasStyle::NativeCall).unwrap(),
            expected
        );
    }

    #[test]
    fn test_registry_aliases_agree_with_measurements() {
        let platform = Platform::probe().unwrap();
        let resolver = AliasResolver::new(&platform);
        let registry = TypeRegistry::tao().unwrap();
        for entry in registry.entries() {
            let style = if entry.class() == NumberClass::Float {
                AliasStyle::NativeCall
            } else {
                AliasStyle::FixedWidth
            };
            assert_eq!(
                resolver.resolve(&entry.repr, style).unwrap(),
                entry.alias,
                "alias of {}",
                entry.name
            );
        }
    }
}
