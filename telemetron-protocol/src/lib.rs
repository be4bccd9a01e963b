//! Telemetron serial telemetry framing
//!
//! This crate defines the UART link format between a Telemetron board and
//! its host: a fixed-layout binary frame per direction, carrying an ordered
//! set of scalar signals. The caller registers the signal set once at setup
//! time; the byte layout of each direction is derived entirely from
//! registration order.
//!
//! # Frame format
//!
//! Both directions use the same layout:
//! ```text
//! ┌────────┬──────────────────────────────┬────────────┐
//! │ HEADER │ FIELDS                       │ TERMINATOR │
//! │ 1B     │ native-order scalars, packed │ 1B         │
//! └────────┴──────────────────────────────┴────────────┘
//! ```
//!
//! Fields are packed back to back in registration order with no padding.
//! Each scalar is copied in the producing platform's native byte order —
//! sender and receiver must agree on endianness. This is a documented
//! compatibility precondition, not something the codec normalizes.
//!
//! The terminator is written on transmit but not checked on parse: frames
//! are received at a fixed length, so the header alone anchors framing.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod layout;
pub mod link;
pub mod scalar;

pub use frame::{FrameError, SerialFrame};
pub use layout::{FieldIndex, FieldRegistry, MAX_FIELDS, MAX_FRAME_SIZE};
pub use link::FrameLink;
pub use scalar::{ScalarType, ScalarValue};
