use crate::engine::chunk::ChunkLayout;
use crate::engine::chunk::builder::push_string_slot;
use crate::engine::core::vector::VarLenReader;
use crate::engine::errors::DecodeError;

fn encode(values: &[&[u8]], layout: ChunkLayout) -> (Vec<u8>, Vec<u8>) {
    let mut slots = Vec::new();
    let mut heap = Vec::new();
    for v in values {
        push_string_slot(&mut slots, &mut heap, v, layout);
    }
    (slots, heap)
}

#[test]
fn lengths_around_the_inline_threshold() {
    let layout = ChunkLayout::default();
    let eleven: &[u8] = b"abcdefghijk";
    let twelve: &[u8] = b"abcdefghijkl";
    let thirteen: &[u8] = b"abcdefghijklm";
    let (slots, heap) = encode(&[eleven, twelve, thirteen], layout);

    // only the thirteen-byte value spills
    assert_eq!(heap, thirteen);

    let reader = VarLenReader::new(&slots, &heap, layout);
    assert_eq!(reader.read_bytes(0).expect("11"), eleven);
    assert_eq!(reader.read_bytes(1).expect("12"), twelve);
    assert_eq!(reader.read_bytes(2).expect("13"), thirteen);
}

#[test]
fn hand_built_heap_slot_uses_its_offset() {
    let layout = ChunkLayout::default();
    let mut slot = Vec::new();
    slot.extend_from_slice(&14u32.to_le_bytes());
    slot.extend_from_slice(b"zzzz");
    slot.extend_from_slice(&3u64.to_le_bytes());
    let heap = b"---zzzzzzzzzzzzzz---".to_vec();

    let reader = VarLenReader::new(&slot, &heap, layout);
    assert_eq!(reader.read_bytes(0).expect("heap string"), b"zzzzzzzzzzzzzz");
}

#[test]
fn empty_string_and_embedded_zero_bytes() {
    let layout = ChunkLayout::default();
    let with_zeros: &[u8] = &[b'a', 0, b'b', 0];
    let long_with_zeros: &[u8] = &[0u8; 40];
    let empty: &[u8] = b"";
    let (slots, heap) = encode(&[empty, with_zeros, long_with_zeros], layout);

    let reader = VarLenReader::new(&slots, &heap, layout);
    assert_eq!(reader.read_string(0).expect("empty"), "");
    assert_eq!(reader.read_blob(1).expect("zeros"), with_zeros);
    assert_eq!(reader.read_blob(2).expect("long zeros").len(), 40);
}

#[test]
fn custom_threshold_moves_the_spill_point() {
    let layout = ChunkLayout::new(20).expect("layout");
    let value: &[u8] = b"eighteen-bytes-str";
    let (slots, heap) = encode(&[value], layout);

    assert!(heap.is_empty());
    assert_eq!(slots.len(), 24);
    let reader = VarLenReader::new(&slots, &heap, layout);
    assert_eq!(reader.read_string(0).expect("inline"), "eighteen-bytes-str");
}

#[test]
fn invalid_utf8_strict_and_lossy() {
    let layout = ChunkLayout::default();
    let bad: &[u8] = &[b'o', b'k', 0xff];
    let (slots, heap) = encode(&[bad], layout);
    let reader = VarLenReader::new(&slots, &heap, layout);

    match reader.read_string(0) {
        Err(DecodeError::InvalidUtf8 { row, .. }) => assert_eq!(row, 0),
        other => panic!("expected InvalidUtf8, got {other:?}"),
    }
    assert_eq!(reader.read_string_lossy(0).expect("lossy"), "ok\u{fffd}");
}

#[test]
fn heap_reference_past_the_end_is_rejected() {
    let layout = ChunkLayout::default();
    let mut slot = Vec::new();
    slot.extend_from_slice(&30u32.to_le_bytes());
    slot.extend_from_slice(b"abcd");
    slot.extend_from_slice(&0u64.to_le_bytes());
    let heap = vec![b'x'; 10];

    let reader = VarLenReader::new(&slot, &heap, layout);
    assert!(matches!(
        reader.read_bytes(0),
        Err(DecodeError::ContractViolation(_))
    ));
    assert!(matches!(
        reader.read_bytes(1),
        Err(DecodeError::ContractViolation(_))
    ));
}

#[test]
fn huge_row_index_is_rejected_without_overflow() {
    let layout = ChunkLayout::default();
    let (slots, heap) = encode(&[b"a".as_slice()], layout);
    let reader = VarLenReader::new(&slots, &heap, layout);
    assert!(matches!(
        reader.read_bytes(usize::MAX),
        Err(DecodeError::ContractViolation(_))
    ));
    assert!(matches!(
        reader.read_bytes(usize::MAX / layout.string_slot_width()),
        Err(DecodeError::ContractViolation(_))
    ));
}
