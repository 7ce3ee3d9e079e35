use crate::engine::errors::DecodeError;

#[test]
fn messages_name_the_category() {
    let e = DecodeError::ContractViolation("row 9 out of bounds".into());
    assert_eq!(e.to_string(), "Contract violation: row 9 out of bounds");
    let e = DecodeError::UnsupportedType("BIT".into());
    assert_eq!(e.to_string(), "Unsupported type: BIT");
}

#[test]
fn utf8_error_keeps_row_and_source() {
    let source = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
    let e = DecodeError::InvalidUtf8 { row: 4, source };
    assert!(e.to_string().starts_with("Invalid UTF-8 in VARCHAR row 4"));
    assert!(std::error::Error::source(&e).is_some());
    e.log_error();
}
