//! Measured ABI representations.
//!
//! Every native type, struct field or enumeration that crosses the boundary
//! is reduced to a byte size and a numeric class. These are always measured
//! on the build platform and never taken from a declared width.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// Numeric class of a native scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberClass {
    /// Two's complement signed integer
    Signed,
    /// Unsigned integer
    Unsigned,
    /// IEEE floating-point
    Float,
}

impl NumberClass {
    /// Integer class for the given signedness.
    pub fn integer(signed: bool) -> Self {
        if signed {
            NumberClass::Signed
        } else {
            NumberClass::Unsigned
        }
    }

    pub fn is_integer(&self) -> bool {
        !matches!(self, NumberClass::Float)
    }
}

impl fmt::Display for NumberClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberClass::Signed => write!(f, "signed"),
            NumberClass::Unsigned => write!(f, "unsigned"),
            NumberClass::Float => write!(f, "float"),
        }
    }
}

/// Integer widths (in bytes) the consumer language has built-in types for.
pub const INTEGER_WIDTHS: [usize; 5] = [1, 2, 4, 8, 16];

/// Floating-point widths (in bytes) the consumer language has built-in types for.
pub const FLOAT_WIDTHS: [usize; 3] = [2, 4, 8];

/// Size and numeric class of a native scalar as measured on this platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeasuredRepresentation {
    size: usize,
    class: NumberClass,
}

impl MeasuredRepresentation {
    /// Create a representation, rejecting widths with no built-in counterpart.
    pub fn new(size: usize, class: NumberClass) -> Result<Self, AbiError> {
        let known = match class {
            NumberClass::Float => FLOAT_WIDTHS.contains(&size),
            _ => INTEGER_WIDTHS.contains(&size),
        };
        if !known {
            return Err(AbiError::UnrepresentableWidth { size, class });
        }
        Ok(MeasuredRepresentation { size, class })
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Size in bits.
    pub fn bits(&self) -> usize {
        8 * self.size
    }

    pub fn class(&self) -> NumberClass {
        self.class
    }

    pub fn is_signed(&self) -> bool {
        matches!(self.class, NumberClass::Signed)
    }
}

impl fmt::Display for MeasuredRepresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-bit", self.class, self.bits())
    }
}

/// Byte offset and representation of one member of a native structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRepresentation {
    /// Name of the owning structure
    pub owner: &'static str,
    /// Name of the field
    pub field: &'static str,
    /// Displacement from the start of the structure
    pub offset: usize,
    /// Measured representation of the field
    pub repr: MeasuredRepresentation,
}

/// Measured layout of a native structure, limited to the fields we bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructLayout {
    pub name: &'static str,
    pub size: usize,
    pub fields: Vec<FieldRepresentation>,
}

impl StructLayout {
    /// Look up a measured field by name.
    pub fn field(&self, name: &str) -> Option<&FieldRepresentation> {
        self.fields.iter().find(|f| f.field == name)
    }
}

/// A violated platform assumption.
///
/// These are never recovered from: the generated bindings would be wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum AbiError {
    #[error("no built-in {class} type is {size} byte(s) wide")]
    #[diagnostic(
        code(taodeps::abi::unrepresentable_width),
        help("the target platform uses a native width the bindings cannot express")
    )]
    UnrepresentableWidth { size: usize, class: NumberClass },

    #[error("assertion `{expr}` failed in {function} ({file}:{line})")]
    #[diagnostic(
        code(taodeps::abi::assertion),
        help("the native library was built with a layout the bindings do not support")
    )]
    Assertion {
        expr: &'static str,
        function: &'static str,
        file: &'static str,
        line: u32,
    },
}

impl AbiError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            AbiError::UnrepresentableWidth { size, class } => {
                Diagnostic::error(format!("unrepresentable {} width of {} byte(s)", class, size))
                    .with_context(format!(
                        "known {} widths: {:?}",
                        class,
                        match class {
                            NumberClass::Float => &FLOAT_WIDTHS[..],
                            _ => &INTEGER_WIDTHS[..],
                        }
                    ))
                    .with_suggestion("Generate the bindings on a platform with standard C type widths")
            }
            AbiError::Assertion {
                expr,
                function,
                file,
                line,
            } => Diagnostic::error(format!("assertion `{}` failed in {}", expr, function))
                .with_location(format!("{}:{}", file, line))
                .with_context("no bindings were written")
                .with_suggestion("Check that the TAO library matches the installed headers"),
        }
    }
}
