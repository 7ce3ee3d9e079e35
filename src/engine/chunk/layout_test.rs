use crate::engine::chunk::ChunkLayout;
use crate::engine::errors::DecodeError;
use crate::shared::config::model::DecoderConfig;

#[test]
fn default_layout_uses_sixteen_byte_slots() {
    let layout = ChunkLayout::default();
    assert_eq!(layout.inline_threshold(), 12);
    assert_eq!(layout.string_slot_width(), 16);
}

#[test]
fn wider_threshold_widens_slots() {
    let layout = ChunkLayout::new(20).expect("layout");
    assert_eq!(layout.string_slot_width(), 24);
}

#[test]
fn threshold_below_minimum_is_rejected() {
    let err = ChunkLayout::new(8).unwrap_err();
    assert!(matches!(err, DecodeError::ContractViolation(_)));
}

#[test]
fn layout_from_config() {
    let cfg = DecoderConfig {
        inline_threshold: 16,
        strict_utf8: true,
    };
    assert_eq!(ChunkLayout::from_config(&cfg).expect("layout").inline_threshold(), 16);
}

#[test]
fn deserialized_layout_is_validated() {
    let layout: ChunkLayout =
        serde_json::from_str(r#"{"inline_threshold":20}"#).expect("valid layout");
    assert_eq!(layout.string_slot_width(), 24);

    let err = serde_json::from_str::<ChunkLayout>(r#"{"inline_threshold":4}"#).unwrap_err();
    assert!(err.to_string().contains("inline threshold 4"));
}

#[test]
fn serialized_layout_reads_back() {
    let layout = ChunkLayout::new(16).expect("layout");
    let text = serde_json::to_string(&layout).expect("json");
    assert_eq!(text, r#"{"inline_threshold":16}"#);
}
