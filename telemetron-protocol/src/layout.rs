//! Field registration and frame layout
//!
//! One registry per direction. A registry is an ordered list of field
//! descriptors; byte offsets and the frame size are re-derived from
//! scratch on every append, so the layout is always a pure function of
//! registration order. Fields cannot be removed individually — only a
//! full clear is supported.

use heapless::Vec;

use crate::frame::FrameError;
use crate::scalar::ScalarValue;

/// Maximum number of fields per direction
pub const MAX_FIELDS: usize = 32;

/// Maximum frame size in bytes, header and terminator included
pub const MAX_FRAME_SIZE: usize = 255;

/// Frame size of an empty registry (header + terminator only)
pub const EMPTY_FRAME_SIZE: usize = 2;

/// Handle to a registered field
///
/// Returned by registration and used for all later value access.
/// Handles are invalidated when the owning registry is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldIndex(pub(crate) usize);

/// One scalar slot within a frame
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldDescriptor {
    name: &'static str,
    value: ScalarValue,
    offset: usize,
}

impl FieldDescriptor {
    /// Diagnostic label (no wire effect)
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current value of the slot
    pub fn value(&self) -> ScalarValue {
        self.value
    }

    /// Byte offset within the frame buffer
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Serialized width in bytes
    pub fn width(&self) -> usize {
        self.value.width()
    }
}

/// Ordered field set for one direction
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    fields: Vec<FieldDescriptor, MAX_FIELDS>,
    frame_size: usize,
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldRegistry {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self {
            fields: Vec::new(),
            frame_size: EMPTY_FRAME_SIZE,
        }
    }

    /// Append a field, fixing its place in the wire layout
    ///
    /// The initial value's tag is the field's wire type for the lifetime
    /// of the registration. Fails without modifying the registry when the
    /// field count or the frame size limit would be exceeded.
    pub fn add(&mut self, value: ScalarValue, name: &'static str) -> Result<FieldIndex, FrameError> {
        if self.fields.is_full() {
            return Err(FrameError::CapacityExceeded);
        }
        if self.frame_size + value.width() > MAX_FRAME_SIZE {
            return Err(FrameError::FrameTooLarge);
        }

        // Capacity checked above
        let _ = self.fields.push(FieldDescriptor {
            name,
            value,
            offset: 0,
        });
        self.relayout();

        Ok(FieldIndex(self.fields.len() - 1))
    }

    /// Remove all fields and reset the frame size
    pub fn clear(&mut self) {
        self.fields.clear();
        self.frame_size = EMPTY_FRAME_SIZE;
    }

    /// Re-derive every offset and the frame size from registration order
    ///
    /// Full recomputation rather than an incremental patch, so a single
    /// pass always yields a consistent layout.
    fn relayout(&mut self) {
        let mut offset = 1; // offset 0 is the header byte
        for field in self.fields.iter_mut() {
            field.offset = offset;
            offset += field.value.width();
        }
        self.frame_size = offset + 1; // terminator byte
    }

    /// Total frame size in bytes for this direction
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Number of registered fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no fields are registered
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Registered fields in wire order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Current value of a field
    ///
    /// Panics when the handle is stale (registry cleared since it was
    /// issued).
    pub fn value(&self, index: FieldIndex) -> ScalarValue {
        self.fields[index.0].value
    }

    /// Update a field's value
    ///
    /// The tag must match the registered wire type. Panics when the
    /// handle is stale.
    pub fn set_value(&mut self, index: FieldIndex, value: ScalarValue) -> Result<(), FrameError> {
        let field = &mut self.fields[index.0];
        if field.value.ty() != value.ty() {
            return Err(FrameError::TypeMismatch);
        }
        field.value = value;
        Ok(())
    }

    /// Serialize every field into `buf` at its assigned offset
    pub(crate) fn write_values(&self, buf: &mut [u8]) {
        for field in self.fields.iter() {
            field
                .value
                .write_to(&mut buf[field.offset..field.offset + field.width()]);
        }
    }

    /// Deserialize every field from `buf` at its assigned offset
    pub(crate) fn read_values(&mut self, buf: &[u8]) {
        for field in self.fields.iter_mut() {
            let ty = field.value.ty();
            field.value = ScalarValue::read_from(ty, &buf[field.offset..field.offset + ty.width()]);
        }
    }
}
