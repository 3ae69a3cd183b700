//! Runtime measurement of native representations.
//!
//! Nothing here trusts a declared width. Scalars are classified by setting
//! all their bits and looking at what the resulting value compares as,
//! enumerations by reading back the bytes the compiler stored for their
//! members, and struct fields by address arithmetic on an uninitialised
//! instance of the owning structure.

use std::mem::size_of;
use std::os::raw::{c_char, c_double, c_float, c_int, c_long, c_short};

use tracing::debug;

use crate::core::abi::{
    AbiError, FieldRepresentation, MeasuredRepresentation, NumberClass, StructLayout,
};
use crate::core::native::{CameraState, ElementType, ObjectType, ShmId, Status, TimeSpec};

/// A native scalar whose representation can be probed.
pub trait Scalar: Copy + PartialOrd + Default {
    /// The value with every bit of its representation set.
    fn all_bits_set() -> Self;
}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl Scalar for $t {
                fn all_bits_set() -> Self {
                    <$t>::from_ne_bytes([0xff; size_of::<$t>()])
                }
            }
        )*
    };
}

impl_scalar!(i8, u8, i16, u16, i32, u32, i64, u64, i128, u128, isize, usize, f32, f64);

/// Measure the size and numeric class of `T`.
///
/// With all bits set, a floating-point value is a NaN (it does not equal
/// itself) and a signed integer compares below zero.
pub fn probe_scalar<T: Scalar>() -> Result<MeasuredRepresentation, AbiError> {
    let zero = T::default();
    let ones = T::all_bits_set();
    #[allow(clippy::eq_op)]
    let class = if ones != ones {
        NumberClass::Float
    } else {
        NumberClass::integer(ones < zero)
    };
    MeasuredRepresentation::new(size_of::<T>(), class)
}

/// Marker for fieldless `#[repr(C)]` enumerations.
///
/// # Safety
///
/// Implementors must be fieldless `#[repr(C)]` enums so that every byte of a
/// value is initialised and holds the member's discriminant.
pub unsafe trait CEnum: Copy {}

unsafe impl CEnum for Status {}
unsafe impl CEnum for ObjectType {}
unsafe impl CEnum for ElementType {}
unsafe impl CEnum for CameraState {}

/// Throwaway enumeration with a negative member.
///
/// The representation the compiler picks for it is the one Julia has to use
/// for a generic C enumeration.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignProbe {
    Negative = -1,
    Zero = 0,
    One = 1,
}

impl SignProbe {
    pub const ALL: [SignProbe; 3] = [SignProbe::Negative, SignProbe::Zero, SignProbe::One];
}

unsafe impl CEnum for SignProbe {}

/// Measure the representation of an enumeration from some of its members.
///
/// The enumeration is signed if any member reads back as negative when its
/// stored bytes are reinterpreted as a signed integer of the same width.
pub fn probe_enum<E: CEnum>(members: &[E]) -> Result<MeasuredRepresentation, AbiError> {
    let size = size_of::<E>();
    let mut signed = false;
    for member in members {
        let reading = stored_reading(member).ok_or(AbiError::UnrepresentableWidth {
            size,
            class: NumberClass::Signed,
        })?;
        signed |= reading < 0;
    }
    MeasuredRepresentation::new(size, NumberClass::integer(signed))
}

/// Stored bytes of an enum member read as a signed integer.
fn stored_reading<E: CEnum>(member: &E) -> Option<i128> {
    // SAFETY: `CEnum` implementors are fieldless `#[repr(C)]` enums, so all
    // `size_of::<E>()` bytes behind the reference are initialised.
    let bytes =
        unsafe { std::slice::from_raw_parts((member as *const E).cast::<u8>(), size_of::<E>()) };
    let reading = match bytes.len() {
        1 => i8::from_ne_bytes(bytes.try_into().ok()?) as i128,
        2 => i16::from_ne_bytes(bytes.try_into().ok()?) as i128,
        4 => i32::from_ne_bytes(bytes.try_into().ok()?) as i128,
        8 => i64::from_ne_bytes(bytes.try_into().ok()?) as i128,
        16 => i128::from_ne_bytes(bytes.try_into().ok()?),
        _ => return None,
    };
    Some(reading)
}

/// Measure a field from the address of an owner instance and of the field.
///
/// Use [`probe_field!`](crate::probe_field) rather than calling this directly.
pub fn measure_field<S, F: Scalar>(
    owner: &'static str,
    field: &'static str,
    base: *const S,
    member: *const F,
) -> Result<FieldRepresentation, AbiError> {
    let offset = member as usize - base as usize;
    let repr = probe_scalar::<F>()?;
    debug!(owner, field, offset, %repr, "measured field");
    Ok(FieldRepresentation {
        owner,
        field,
        offset,
        repr,
    })
}

/// Measure the offset and representation of a field of a structure.
///
/// ```ignore
/// let nsec = probe_field!(libc::timespec, "timespec", tv_nsec)?;
/// ```
#[macro_export]
macro_rules! probe_field {
    ($owner:ty, $name:literal, $field:ident) => {{
        let base = ::std::mem::MaybeUninit::<$owner>::uninit();
        let base_ptr = base.as_ptr();
        // SAFETY: only the address of the field is computed, the
        // uninitialised value is never read.
        let member = unsafe { ::std::ptr::addr_of!((*base_ptr).$field) };
        $crate::builder::bindings::probe::measure_field($name, stringify!($field), base_ptr, member)
    }};
}

/// Everything measured about the build platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub c_char: MeasuredRepresentation,
    pub c_short: MeasuredRepresentation,
    pub c_int: MeasuredRepresentation,
    pub c_long: MeasuredRepresentation,
    pub c_float: MeasuredRepresentation,
    pub c_double: MeasuredRepresentation,
    /// `tao_status`
    pub status: MeasuredRepresentation,
    /// `tao_object_type`
    pub object_type: MeasuredRepresentation,
    /// `tao_eltype`
    pub eltype: MeasuredRepresentation,
    /// `tao_camera_state`
    pub camera_state: MeasuredRepresentation,
    /// A C enumeration with a negative member
    pub c_enum: MeasuredRepresentation,
    /// `tao_shmid`
    pub shmid: MeasuredRepresentation,
    /// `struct timespec`
    pub timespec: StructLayout,
}

impl Platform {
    /// Measure the platform this program was compiled for.
    pub fn probe() -> Result<Self, AbiError> {
        let platform = Platform {
            c_char: probe_scalar::<c_char>()?,
            c_short: probe_scalar::<c_short>()?,
            c_int: probe_scalar::<c_int>()?,
            c_long: probe_scalar::<c_long>()?,
            c_float: probe_scalar::<c_float>()?,
            c_double: probe_scalar::<c_double>()?,
            status: probe_enum(&Status::ALL)?,
            object_type: probe_enum(&ObjectType::ALL)?,
            eltype: probe_enum(&[ElementType::Int8, ElementType::Double])?,
            camera_state: probe_enum(&CameraState::ALL)?,
            c_enum: probe_enum(&SignProbe::ALL)?,
            shmid: probe_scalar::<ShmId>()?,
            timespec: probe_timespec()?,
        };
        debug!(
            int = %platform.c_int,
            long = %platform.c_long,
            status = %platform.status,
            c_enum = %platform.c_enum,
            "probed platform"
        );
        Ok(platform)
    }
}

fn probe_timespec() -> Result<StructLayout, AbiError> {
    Ok(StructLayout {
        name: "timespec",
        size: size_of::<TimeSpec>(),
        fields: vec![
            crate::probe_field!(TimeSpec, "timespec", tv_sec)?,
            crate::probe_field!(TimeSpec, "timespec", tv_nsec)?,
        ],
    })
}

/// Field offset computed from a zeroed instance, for cross-checking.
#[cfg(test)]
fn zeroed_offset_of_nsec() -> usize {
    let base = std::mem::MaybeUninit::<TimeSpec>::zeroed();
    let base_ptr = base.as_ptr();
    // SAFETY: address computation only.
    let member = unsafe { std::ptr::addr_of!((*base_ptr).tv_nsec) };
    member as usize - base_ptr as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_integers() {
        let int = probe_scalar::<i32>().unwrap();
        assert_eq!(int.size(), 4);
        assert_eq!(int.class(), NumberClass::Signed);

        let uint = probe_scalar::<u16>().unwrap();
        assert_eq!(uint.size(), 2);
        assert_eq!(uint.class(), NumberClass::Unsigned);
    }

    #[test]
    fn test_probe_floats() {
        assert_eq!(probe_scalar::<f32>().unwrap().class(), NumberClass::Float);
        assert_eq!(probe_scalar::<f64>().unwrap().size(), 8);
    }

    #[test]
    fn test_probe_c_types_match_declared() {
        let platform = Platform::probe().unwrap();
        assert_eq!(platform.c_int.size(), size_of::<c_int>());
        assert_eq!(platform.c_long.size(), size_of::<c_long>());
        assert!(platform.c_int.is_signed());
        assert!(platform.c_short.is_signed());
        assert_eq!(platform.c_char.is_signed(), c_char::MIN != 0);
    }

    #[test]
    fn test_enum_with_negative_member_is_signed() {
        let first = probe_enum(&SignProbe::ALL).unwrap();
        assert!(first.is_signed());
        for _ in 0..8 {
            assert_eq!(probe_enum(&SignProbe::ALL).unwrap(), first);
        }
        assert!(probe_enum(&Status::ALL).unwrap().is_signed());
    }

    #[test]
    fn test_enum_without_negative_member_is_unsigned() {
        let repr = probe_enum(&CameraState::ALL).unwrap();
        assert!(!repr.is_signed());
        assert_eq!(repr.size(), size_of::<CameraState>());
    }

    #[test]
    fn test_field_offsets_match_offset_of() {
        let sec = crate::probe_field!(TimeSpec, "timespec", tv_sec).unwrap();
        let nsec = crate::probe_field!(TimeSpec, "timespec", tv_nsec).unwrap();
        assert_eq!(sec.offset, std::mem::offset_of!(TimeSpec, tv_sec));
        assert_eq!(nsec.offset, std::mem::offset_of!(TimeSpec, tv_nsec));
        assert_eq!(nsec.offset, zeroed_offset_of_nsec());
        assert_eq!(nsec.field, "tv_nsec");
        assert_eq!(nsec.owner, "timespec");
    }

    #[test]
    fn test_field_representation() {
        let platform = Platform::probe().unwrap();
        let sec = platform.timespec.field("tv_sec").unwrap();
        assert_eq!(sec.repr.size(), size_of::<libc::time_t>());
        assert!(sec.repr.is_signed());
        let nsec = platform.timespec.field("tv_nsec").unwrap();
        assert_eq!(nsec.repr, platform.c_long);
        assert_eq!(platform.timespec.size, size_of::<TimeSpec>());
    }
}
