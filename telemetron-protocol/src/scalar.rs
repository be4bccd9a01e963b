//! Scalar type tags and tagged values
//!
//! Every value crossing the wire is one of a closed set of scalar types.
//! The tag fixes the serialized width; the wire bytes are the platform's
//! native in-memory representation, copied verbatim.

/// Wire type of a registered field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScalarType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    F32,
    F64,
}

impl ScalarType {
    /// Serialized width in bytes
    pub const fn width(self) -> usize {
        match self {
            ScalarType::U8 | ScalarType::I8 => 1,
            ScalarType::U16 | ScalarType::I16 => 2,
            ScalarType::U32 | ScalarType::I32 | ScalarType::F32 => 4,
            ScalarType::F64 => 8,
        }
    }
}

/// A scalar value tagged with its wire type
///
/// The registry owns one of these per field and hands out index handles
/// instead of raw storage addresses.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScalarValue {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    F32(f32),
    F64(f64),
}

impl ScalarValue {
    /// Wire type tag of this value
    pub const fn ty(self) -> ScalarType {
        match self {
            ScalarValue::U8(_) => ScalarType::U8,
            ScalarValue::I8(_) => ScalarType::I8,
            ScalarValue::U16(_) => ScalarType::U16,
            ScalarValue::I16(_) => ScalarType::I16,
            ScalarValue::U32(_) => ScalarType::U32,
            ScalarValue::I32(_) => ScalarType::I32,
            ScalarValue::F32(_) => ScalarType::F32,
            ScalarValue::F64(_) => ScalarType::F64,
        }
    }

    /// Serialized width in bytes
    pub const fn width(self) -> usize {
        self.ty().width()
    }

    /// Copy the native-byte-order representation into `out`
    ///
    /// `out` must be exactly `self.width()` bytes.
    pub fn write_to(self, out: &mut [u8]) {
        match self {
            ScalarValue::U8(v) => out.copy_from_slice(&v.to_ne_bytes()),
            ScalarValue::I8(v) => out.copy_from_slice(&v.to_ne_bytes()),
            ScalarValue::U16(v) => out.copy_from_slice(&v.to_ne_bytes()),
            ScalarValue::I16(v) => out.copy_from_slice(&v.to_ne_bytes()),
            ScalarValue::U32(v) => out.copy_from_slice(&v.to_ne_bytes()),
            ScalarValue::I32(v) => out.copy_from_slice(&v.to_ne_bytes()),
            ScalarValue::F32(v) => out.copy_from_slice(&v.to_ne_bytes()),
            ScalarValue::F64(v) => out.copy_from_slice(&v.to_ne_bytes()),
        }
    }

    /// Read a value of type `ty` from its native-byte-order representation
    ///
    /// `bytes` must be exactly `ty.width()` bytes.
    pub fn read_from(ty: ScalarType, bytes: &[u8]) -> Self {
        match ty {
            ScalarType::U8 => ScalarValue::U8(u8::from_ne_bytes(array(bytes))),
            ScalarType::I8 => ScalarValue::I8(i8::from_ne_bytes(array(bytes))),
            ScalarType::U16 => ScalarValue::U16(u16::from_ne_bytes(array(bytes))),
            ScalarType::I16 => ScalarValue::I16(i16::from_ne_bytes(array(bytes))),
            ScalarType::U32 => ScalarValue::U32(u32::from_ne_bytes(array(bytes))),
            ScalarType::I32 => ScalarValue::I32(i32::from_ne_bytes(array(bytes))),
            ScalarType::F32 => ScalarValue::F32(f32::from_ne_bytes(array(bytes))),
            ScalarType::F64 => ScalarValue::F64(f64::from_ne_bytes(array(bytes))),
        }
    }
}

/// Copy a slice into a fixed array (panics if `bytes` is shorter than N)
fn array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[..N]);
    out
}
