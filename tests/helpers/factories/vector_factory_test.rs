use crate::engine::types::LogicalType;
use crate::test_helpers::factory::Factory;

#[test]
fn test_vector_factory() {
    let vector = Factory::vector(LogicalType::Integer)
        .with_i32s(&[7, 8, 9])
        .with_nulls(3, &[1])
        .create();

    assert_eq!(vector.data().len(), 12);
    let words = vector.validity().expect("bitmap");
    assert_eq!(words.len(), 1);
    assert_eq!(words[0] & 0b111, 0b101);
}
