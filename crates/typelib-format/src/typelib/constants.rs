//! Typelib format constants.

/// Magic bytes identifying a typelib.
pub const MAGIC: [u8; 16] = *b"GOBJ\nMETADATA\r\n\x1a";

/// Format major version. Loaders reject any other major version.
pub const MAJOR_VERSION: u8 = 1;

/// Format minor version. Minor bumps only append fields.
pub const MINOR_VERSION: u8 = 0;

/// Header size in bytes.
pub const HEADER_SIZE: usize = 96;

/// Every blob starts on this boundary.
pub const BLOB_ALIGN: usize = 4;

/// Number of blob size fields recorded in the header.
pub const BLOB_SIZE_COUNT: usize = 21;

/// Round up to the next multiple of [`BLOB_ALIGN`].
#[inline]
pub fn align_blob(value: usize) -> usize {
    value.div_ceil(BLOB_ALIGN) * BLOB_ALIGN
}
