//! Pre-flight checks of the platform assumptions the bindings rely on.

use tracing::debug;

use crate::builder::bindings::probe::Platform;
use crate::core::abi::AbiError;

/// Return an [`AbiError::Assertion`] from the enclosing function when the
/// condition does not hold.
macro_rules! abi_assert {
    ($cond:expr) => {
        if !$cond {
            fn here() {}
            let path = std::any::type_name_of_val(&here);
            let path = path.strip_suffix("::here").unwrap_or(path);
            let function = path.rsplit("::").next().unwrap_or(path);
            let err = AbiError::Assertion {
                expr: stringify!($cond),
                function,
                file: file!(),
                line: line!(),
            };
            debug!("{}", err);
            return Err(err);
        }
    };
}

/// Check that the TAO enumerations are exactly as wide as a C `int`.
///
/// The generated bindings pass these enumerations as `int`, so any other
/// width would silently corrupt every value crossing the boundary.
pub fn validate_platform(platform: &Platform) -> Result<(), AbiError> {
    abi_assert!(platform.c_int.size() == platform.status.size());
    abi_assert!(platform.c_int.size() == platform.object_type.size());
    abi_assert!(platform.c_int.size() == platform.eltype.size());
    abi_assert!(platform.c_int.size() == platform.camera_state.size());
    debug!(width = platform.c_int.size(), "enumeration widths match int");
    Ok(())
}
