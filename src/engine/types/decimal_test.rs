use crate::engine::types::decimal::Decimal;

#[test]
fn formats_exactly_at_scale() {
    assert_eq!(Decimal::new(123456, 4).to_string(), "12.3456");
    assert_eq!(Decimal::new(-123456, 4).to_string(), "-12.3456");
    assert_eq!(Decimal::new(5, 3).to_string(), "0.005");
    assert_eq!(Decimal::new(-5, 3).to_string(), "-0.005");
    assert_eq!(Decimal::new(42, 0).to_string(), "42");
    assert_eq!(Decimal::new(0, 2).to_string(), "0.00");
}

#[test]
fn keeps_precision_beyond_f64() {
    // 38 significant digits; an f64 round trip would mangle the tail
    let raw: i128 = 12345678901234567890123456789012345678;
    let d = Decimal::new(raw, 10);
    assert_eq!(d.to_string(), "1234567890123456789012345678.9012345678");
    assert_eq!(d.value(), raw);
}

#[test]
fn handles_extreme_values() {
    let d = Decimal::new(i128::MIN, 38);
    assert!(d.to_string().starts_with("-1.70141183460469231731687303715884105728"));
    let d = Decimal::new(i128::MAX, 0);
    assert_eq!(d.to_string(), i128::MAX.to_string());
}

#[test]
fn lossy_float_conversion() {
    let d = Decimal::new(12345, 2);
    assert!((d.to_f64() - 123.45).abs() < 1e-9);
}

#[test]
fn scale_beyond_u128_digits_is_all_fraction() {
    let d = Decimal::new(5, 39);
    assert_eq!(d.to_string(), format!("0.{}5", "0".repeat(38)));

    let d = Decimal::new(-12, 255);
    let text = d.to_string();
    assert!(text.starts_with("-0.000"));
    assert!(text.ends_with("12"));
    assert_eq!(text.len(), "-0.".len() + 255);
}
