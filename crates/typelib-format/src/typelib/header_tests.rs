use super::constants::{HEADER_SIZE, MAGIC};
use super::header::{BLOB_SIZES, Header};

#[test]
fn default_header_is_valid() {
    let h = Header::default();

    assert!(h.validate_magic());
    assert!(h.validate_version());
    assert_eq!(h.blob_size_mismatch(), None);
}

#[test]
fn field_positions() {
    let h = Header {
        n_entries: 0x0102,
        n_local_entries: 0x0001,
        directory: 96,
        size: 0x1000,
        namespace: 0xAB,
        shared_library: 0xCD,
        ..Default::default()
    };

    let bytes = h.to_bytes();
    assert_eq!(bytes.len(), HEADER_SIZE);
    assert_eq!(&bytes[0..16], &MAGIC);
    assert_eq!(bytes[16], 1);
    assert_eq!(bytes[17], 0);
    assert_eq!(&bytes[20..22], &[0x02, 0x01]);
    assert_eq!(&bytes[22..24], &[0x01, 0x00]);
    assert_eq!(&bytes[24..28], &[96, 0, 0, 0]);
    assert_eq!(&bytes[28..32], &[0x00, 0x10, 0, 0]);
    assert_eq!(bytes[32], 0xAB);
    assert_eq!(bytes[36], 0xCD);
    // entry row size first, error_type row size last
    assert_eq!(&bytes[40..42], &[12, 0]);
    assert_eq!(&bytes[80..82], &[8, 0]);
    assert!(bytes[82..].iter().all(|&b| b == 0));

    assert_eq!(Header::from_bytes(&bytes), h);
}

#[test]
fn blob_size_table() {
    assert_eq!(
        BLOB_SIZES,
        [12, 8, 20, 12, 12, 16, 16, 16, 16, 16, 12, 24, 16, 20, 20, 36, 36, 32, 16, 8, 8]
    );
}

#[test]
fn detects_foreign_header() {
    let mut h = Header::default();
    h.magic[0] = b'X';
    h.major_version = 2;
    h.blob_sizes[4] = 16;

    assert!(!h.validate_magic());
    assert!(!h.validate_version());
    assert_eq!(h.blob_size_mismatch(), Some((4, 16)));
}

#[test]
fn newer_minor_is_accepted() {
    let h = Header {
        minor_version: 7,
        ..Default::default()
    };

    assert!(h.validate_version());
}
