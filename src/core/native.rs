//! Compiled-in definitions of the TAO C library.
//!
//! These mirror `tao.h` and `tao-cameras.h` the way a `-sys` crate does: the
//! enumerations are `#[repr(C)]` so that their size is the one the C compiler
//! picks for the same declaration on this target.

use std::os::raw::c_int;

/// Result of a TAO operation (`tao_status`).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Error = -1,
    Ok = 0,
    Timeout = 1,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Error, Status::Ok, Status::Timeout];

    /// Name of the constant in the generated bindings.
    pub fn name(&self) -> &'static str {
        match self {
            Status::Error => "ERROR",
            Status::Ok => "OK",
            Status::Timeout => "TIMEOUT",
        }
    }
}

/// Signature stored in the 24 most significant bits of a shared object type.
pub const SHARED_MAGIC: u32 = 0x310e_fc00;

/// Shared object type accepted when any type will do.
pub const SHARED_ANY: u32 = 0xffff_ffff;

/// Type of a TAO shared object (`tao_object_type`).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    SharedObject = 0x310e_fc00,
    SharedArray = 0x310e_fc01,
    SharedCamera = 0x310e_fc02,
    RemoteMirror = 0x310e_fc03,
    SharedMirrorData = 0x310e_fc04,
}

impl ObjectType {
    pub const ALL: [ObjectType; 5] = [
        ObjectType::SharedObject,
        ObjectType::SharedArray,
        ObjectType::SharedCamera,
        ObjectType::RemoteMirror,
        ObjectType::SharedMirrorData,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ObjectType::SharedObject => "SHARED_OBJECT",
            ObjectType::SharedArray => "SHARED_ARRAY",
            ObjectType::SharedCamera => "SHARED_CAMERA",
            ObjectType::RemoteMirror => "REMOTE_MIRROR",
            ObjectType::SharedMirrorData => "SHARED_MIRROR_DATA",
        }
    }

    /// Bit pattern of the tag.
    pub fn bits(self) -> u32 {
        self as u32
    }

    pub fn doc(&self) -> &'static str {
        match self {
            ObjectType::SharedObject => "is the type of a basic TAO shared object.",
            ObjectType::SharedArray => "is the type of a TAO shared multi-dimensional array.",
            ObjectType::SharedCamera => "is the type of a TAO shared camera data.",
            ObjectType::RemoteMirror => "is the type of a TAO remote deformable mirror.",
            ObjectType::SharedMirrorData => "is the type of a TAO shared deformable mirror data.",
        }
    }
}

/// Element type of a shared array (`tao_eltype`).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Int8 = 1,
    UInt8 = 2,
    Int16 = 3,
    UInt16 = 4,
    Int32 = 5,
    UInt32 = 6,
    Int64 = 7,
    UInt64 = 8,
    Float = 9,
    Double = 10,
}

impl ElementType {
    pub fn code(self) -> i64 {
        self as i64
    }
}

/// Lifecycle state of a camera (`tao_camera_state`).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraState {
    Initializing = 0,
    Sleeping = 1,
    Starting = 2,
    Acquiring = 3,
    Stopping = 4,
    Aborting = 5,
    Finished = 6,
}

impl CameraState {
    pub const ALL: [CameraState; 7] = [
        CameraState::Initializing,
        CameraState::Sleeping,
        CameraState::Starting,
        CameraState::Acquiring,
        CameraState::Stopping,
        CameraState::Aborting,
        CameraState::Finished,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CameraState::Initializing => "CAMERA_STATE_INITIALIZING",
            CameraState::Sleeping => "CAMERA_STATE_SLEEPING",
            CameraState::Starting => "CAMERA_STATE_STARTING",
            CameraState::Acquiring => "CAMERA_STATE_ACQUIRING",
            CameraState::Stopping => "CAMERA_STATE_STOPPING",
            CameraState::Aborting => "CAMERA_STATE_ABORTING",
            CameraState::Finished => "CAMERA_STATE_FINISHED",
        }
    }
}

/// Shared memory identifier (`tao_shmid`).
pub type ShmId = c_int;

/// Invalid shared memory identifier.
pub const BAD_SHMID: ShmId = -1;

/// Number of bytes (including the final null) for the name of the owner.
pub const SHARED_OWNER_SIZE: i64 = 64;

/// Maximum number of dimensions of TAO arrays.
pub const MAX_NDIMS: i64 = 5;

/// Time specification structure whose layout the bindings expose.
pub type TimeSpec = libc::timespec;

/// Value of a symbolic constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstValue {
    /// Decimal integer
    Int(i64),
    /// Bit pattern, rendered in hexadecimal
    Bits(u64),
    /// String literal
    Str(&'static str),
}

/// A named constant copied verbatim from the native library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolicConstant {
    pub name: &'static str,
    pub value: ConstValue,
    pub doc: &'static str,
}

impl SymbolicConstant {
    pub const fn new(name: &'static str, value: ConstValue, doc: &'static str) -> Self {
        SymbolicConstant { name, value, doc }
    }
}

/// Signature and object-type tags, in the order they are published.
pub fn object_type_tags() -> Vec<SymbolicConstant> {
    let mut tags = vec![SymbolicConstant::new(
        "SHARED_MAGIC",
        ConstValue::Bits(SHARED_MAGIC as u64),
        "specifies a, hopefully unique, signature stored in\n\
         the 24 most significant bits of the TAO shared object type.",
    )];
    tags.extend(
        ObjectType::ALL
            .iter()
            .map(|t| SymbolicConstant::new(t.name(), ConstValue::Bits(t.bits() as u64), t.doc())),
    );
    tags.push(SymbolicConstant::new(
        "SHARED_ANY",
        ConstValue::Bits(SHARED_ANY as u64),
        "is the shared object type to use when any type is\nacceptable.",
    ));
    tags
}

/// Capacity limits of shared objects.
pub fn capacity_limits() -> Vec<SymbolicConstant> {
    vec![
        SymbolicConstant::new(
            "SHARED_OWNER_SIZE",
            ConstValue::Int(SHARED_OWNER_SIZE),
            "is the the number of bytes (including the final\nnull) for the name of the owner.",
        ),
        SymbolicConstant::new(
            "MAX_NDIMS",
            ConstValue::Int(MAX_NDIMS),
            "is the maximum number of dimensions of TAO arrays.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_tags_carry_magic() {
        for tag in ObjectType::ALL {
            assert_eq!(tag.bits() & 0xffff_ff00, SHARED_MAGIC);
        }
        assert_eq!(ObjectType::SharedObject.bits(), SHARED_MAGIC);
    }

    #[test]
    fn test_object_type_tags_order() {
        let names: Vec<_> = object_type_tags().iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            [
                "SHARED_MAGIC",
                "SHARED_OBJECT",
                "SHARED_ARRAY",
                "SHARED_CAMERA",
                "REMOTE_MIRROR",
                "SHARED_MIRROR_DATA",
                "SHARED_ANY"
            ]
        );
    }

    #[test]
    fn test_status_values() {
        let values: Vec<_> = Status::ALL.iter().map(|s| *s as i32).collect();
        assert_eq!(values, [-1, 0, 1]);
    }
}
