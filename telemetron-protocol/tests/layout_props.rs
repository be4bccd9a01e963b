//! Property tests for frame layout and codec round-trips
//!
//! Exercises arbitrary registration sequences against the layout rules:
//! offsets are prefix sums of widths, frames round-trip bit-for-bit, and
//! a cleared registry reproduces its layout exactly.

use proptest::prelude::*;

use telemetron_protocol::{
    FieldIndex, FieldRegistry, FrameError, ScalarValue, SerialFrame, MAX_FIELDS, MAX_FRAME_SIZE,
};

fn scalar_value() -> impl Strategy<Value = ScalarValue> {
    prop_oneof![
        any::<u8>().prop_map(ScalarValue::U8),
        any::<i8>().prop_map(ScalarValue::I8),
        any::<u16>().prop_map(ScalarValue::U16),
        any::<i16>().prop_map(ScalarValue::I16),
        any::<u32>().prop_map(ScalarValue::U32),
        any::<i32>().prop_map(ScalarValue::I32),
        any::<f32>().prop_map(ScalarValue::F32),
        any::<f64>().prop_map(ScalarValue::F64),
    ]
}

/// Bitwise equality; NaN payloads must survive the wire unchanged
fn same_bits(a: ScalarValue, b: ScalarValue) -> bool {
    match (a, b) {
        (ScalarValue::F32(x), ScalarValue::F32(y)) => x.to_bits() == y.to_bits(),
        (ScalarValue::F64(x), ScalarValue::F64(y)) => x.to_bits() == y.to_bits(),
        _ => a == b,
    }
}

proptest! {
    #[test]
    fn offsets_are_prefix_sums(values in prop::collection::vec(scalar_value(), 0..MAX_FIELDS)) {
        let mut reg = FieldRegistry::new();
        let mut expected_offset = 1usize;
        let mut total_width = 0usize;

        for v in &values {
            if total_width + v.width() + 2 > MAX_FRAME_SIZE {
                prop_assert_eq!(reg.add(*v, "field"), Err(FrameError::FrameTooLarge));
                continue;
            }
            let idx = reg.add(*v, "field").unwrap();
            let field = &reg.fields()[reg.len() - 1];
            prop_assert_eq!(field.offset(), expected_offset);
            prop_assert!(same_bits(reg.value(idx), *v));
            expected_offset += v.width();
            total_width += v.width();
        }

        prop_assert_eq!(reg.frame_size(), 2 + total_width);
    }

    #[test]
    fn frames_roundtrip_bit_for_bit(
        header in any::<u8>(),
        terminator in any::<u8>(),
        values in prop::collection::vec(scalar_value(), 1..16),
    ) {
        let mut frame = SerialFrame::new(header, terminator);
        let mut handles: Vec<FieldIndex> = Vec::new();

        for v in &values {
            frame.add_tx_field(*v, "sig").unwrap();
            // Receive side mirrors the layout but starts from the same tag
            handles.push(frame.add_rx_field(*v, "sig").unwrap());
        }

        frame.build_tx_frame();
        let wire = frame.tx_bytes().to_vec();
        prop_assert_eq!(wire[0], header);
        prop_assert_eq!(wire[wire.len() - 1], terminator);

        frame.rx_bytes_mut().copy_from_slice(&wire);
        prop_assert_eq!(frame.parse_rx_frame(), Ok(()));

        for (idx, v) in handles.iter().zip(&values) {
            prop_assert!(same_bits(frame.rx_value(*idx), *v));
        }
    }

    #[test]
    fn wrong_header_never_touches_fields(
        header in any::<u8>(),
        bad in any::<u8>(),
        values in prop::collection::vec(scalar_value(), 1..16),
        noise in prop::collection::vec(any::<u8>(), MAX_FRAME_SIZE),
    ) {
        prop_assume!(header != bad);

        let mut frame = SerialFrame::new(header, b'N');
        let handles: Vec<FieldIndex> = values
            .iter()
            .map(|v| frame.add_rx_field(*v, "sig").unwrap())
            .collect();

        let n = frame.rx_fields().frame_size();
        frame.rx_bytes_mut().copy_from_slice(&noise[..n]);
        frame.rx_bytes_mut()[0] = bad;

        prop_assert_eq!(frame.parse_rx_frame(), Err(FrameError::HeaderMismatch));
        prop_assert_eq!(frame.header_mismatches(), 1);
        for (idx, v) in handles.iter().zip(&values) {
            prop_assert!(same_bits(frame.rx_value(*idx), *v));
        }
    }

    #[test]
    fn clear_and_reregister_reproduces_layout(
        values in prop::collection::vec(scalar_value(), 1..16),
    ) {
        let mut reg = FieldRegistry::new();
        for v in &values {
            reg.add(*v, "sig").unwrap();
        }
        let before: Vec<(usize, usize)> =
            reg.fields().iter().map(|f| (f.offset(), f.width())).collect();
        let size_before = reg.frame_size();

        reg.clear();
        prop_assert_eq!(reg.frame_size(), 2);
        prop_assert!(reg.is_empty());

        for v in &values {
            reg.add(*v, "sig").unwrap();
        }
        let after: Vec<(usize, usize)> =
            reg.fields().iter().map(|f| (f.offset(), f.width())).collect();

        prop_assert_eq!(before, after);
        prop_assert_eq!(size_before, reg.frame_size());
    }
}
