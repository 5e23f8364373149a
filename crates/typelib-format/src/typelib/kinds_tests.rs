use super::kinds::{BlobType, TypeTag};

#[test]
fn blob_type_from_u16() {
    assert_eq!(BlobType::from_u16(0), Some(BlobType::Invalid));
    assert_eq!(BlobType::from_u16(1), Some(BlobType::Function));
    assert_eq!(BlobType::from_u16(5), Some(BlobType::Enum));
    assert_eq!(BlobType::from_u16(6), Some(BlobType::Flags));
    assert_eq!(BlobType::from_u16(10), Some(BlobType::ErrorDomain));
    assert_eq!(BlobType::from_u16(11), Some(BlobType::Union));
    assert_eq!(BlobType::from_u16(12), None);
}

#[test]
fn type_tag_from_u8() {
    for v in 0..=25u8 {
        let tag = TypeTag::from_u8(v).unwrap();
        assert_eq!(tag as u8, v);
    }
    assert_eq!(TypeTag::from_u8(26), None);
    assert_eq!(TypeTag::from_u8(255), None);
}

#[test]
fn tag_classes() {
    assert!(TypeTag::Void.is_basic());
    assert!(TypeTag::Filename.is_basic());
    assert!(!TypeTag::Interface.is_basic());
    assert!(!TypeTag::Interface.is_complex());
    assert!(TypeTag::Array.is_complex());
    assert!(TypeTag::SList.is_complex());
    assert!(TypeTag::Error.is_complex());
    assert!(!TypeTag::Utf8.is_complex());
}

#[test]
fn value_sizes() {
    assert_eq!(TypeTag::Boolean.value_size(), Some(4));
    assert_eq!(TypeTag::Int8.value_size(), Some(1));
    assert_eq!(TypeTag::Uint16.value_size(), Some(2));
    assert_eq!(TypeTag::Uint.value_size(), Some(4));
    assert_eq!(TypeTag::Size.value_size(), Some(8));
    assert_eq!(TypeTag::Double.value_size(), Some(8));
    assert_eq!(TypeTag::Utf8.value_size(), None);
    assert_eq!(TypeTag::Hash.value_size(), None);
}
