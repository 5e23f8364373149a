//! Loaded typelib with lazy, bounds-checked views.
//!
//! [`Typelib`] validates the header once on load. Strings, directory
//! entries and blobs are decoded on demand.

use std::io;
use std::ops::Deref;
use std::path::Path;

use super::blobs::{
    ArgBlob, Blob, ConstantBlob, EnumBlob, FieldBlob, FunctionBlob, InterfaceBlob, ObjectBlob,
    PropertyBlob, SignalBlob, SignatureBlob, StructBlob, UnionBlob, VFuncBlob, ValueBlob,
};
use super::constants::{HEADER_SIZE, MAJOR_VERSION, align_blob};
use super::directory::{DirEntry, DirRef};
use super::header::{BLOB_SIZE_NAMES, BLOB_SIZES, Header};
use super::read_u16_le;

/// Storage for typelib bytes.
#[derive(Debug)]
pub struct ByteStorage(Vec<u8>);

impl Deref for ByteStorage {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ByteStorage {
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self(bytes))
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

/// Typelib load or access error.
#[derive(Debug, thiserror::Error)]
pub enum TypelibError {
    #[error("file too small: {0} bytes (minimum {HEADER_SIZE})")]
    FileTooSmall(usize),
    #[error("invalid magic")]
    InvalidMagic,
    #[error("unsupported version: {major}.{minor} (expected {MAJOR_VERSION}.x)")]
    UnsupportedVersion { major: u8, minor: u8 },
    #[error("size mismatch: header says {header} bytes, got {actual}")]
    SizeMismatch { header: u32, actual: usize },
    #[error("{kind} row size mismatch: expected {expected}, found {found}")]
    BlobSizeMismatch {
        kind: &'static str,
        expected: u16,
        found: u16,
    },
    #[error("directory of {entries} entries at {offset:#x} exceeds file")]
    DirectoryOutOfBounds { offset: u32, entries: u16 },
    #[error("{local} local entries but only {total} entries")]
    LocalCountOverflow { local: u16, total: u16 },
    #[error("read of {len} bytes at {offset:#x} is out of bounds")]
    OutOfBounds { offset: u32, len: usize },
    #[error("invalid string at {0:#x}")]
    InvalidString(u32),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// A loaded typelib.
#[derive(Debug)]
pub struct Typelib {
    storage: ByteStorage,
    header: Header,
}

impl Typelib {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, TypelibError> {
        Self::from_storage(ByteStorage::from_vec(bytes))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TypelibError> {
        Self::from_storage(ByteStorage::from_file(path)?)
    }

    fn from_storage(storage: ByteStorage) -> Result<Self, TypelibError> {
        if storage.len() < HEADER_SIZE {
            return Err(TypelibError::FileTooSmall(storage.len()));
        }

        let header = Header::from_bytes(&storage[..HEADER_SIZE]);

        if !header.validate_magic() {
            return Err(TypelibError::InvalidMagic);
        }
        if !header.validate_version() {
            return Err(TypelibError::UnsupportedVersion {
                major: header.major_version,
                minor: header.minor_version,
            });
        }
        if header.size as usize != storage.len() {
            return Err(TypelibError::SizeMismatch {
                header: header.size,
                actual: storage.len(),
            });
        }
        if let Some((i, found)) = header.blob_size_mismatch() {
            return Err(TypelibError::BlobSizeMismatch {
                kind: BLOB_SIZE_NAMES[i],
                expected: BLOB_SIZES[i],
                found,
            });
        }
        if header.n_local_entries > header.n_entries {
            return Err(TypelibError::LocalCountOverflow {
                local: header.n_local_entries,
                total: header.n_entries,
            });
        }
        let dir_end = header.directory as usize + header.n_entries as usize * DirEntry::SIZE;
        if (header.directory as usize) < HEADER_SIZE || dir_end > storage.len() {
            return Err(TypelibError::DirectoryOutOfBounds {
                offset: header.directory,
                entries: header.n_entries,
            });
        }

        Ok(Self { storage, header })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn bytes(&self) -> &[u8] {
        &self.storage
    }

    pub fn namespace(&self) -> Result<&str, TypelibError> {
        self.string(self.header.namespace)
    }

    pub fn shared_library(&self) -> Result<Option<&str>, TypelibError> {
        self.optional_string(self.header.shared_library)
    }

    /// NUL-terminated string at an absolute offset.
    pub fn string(&self, offset: u32) -> Result<&str, TypelibError> {
        let start = offset as usize;
        if offset == 0 || start >= self.storage.len() {
            return Err(TypelibError::InvalidString(offset));
        }
        let tail = &self.storage[start..];
        let len = tail
            .iter()
            .position(|&b| b == 0)
            .ok_or(TypelibError::InvalidString(offset))?;
        std::str::from_utf8(&tail[..len]).map_err(|_| TypelibError::InvalidString(offset))
    }

    /// Like [`string`](Self::string), with offset 0 meaning "absent".
    pub fn optional_string(&self, offset: u32) -> Result<Option<&str>, TypelibError> {
        if offset == 0 {
            return Ok(None);
        }
        self.string(offset).map(Some)
    }

    // ------------------------------------------------------------------------
    // Directory
    // ------------------------------------------------------------------------

    pub fn entry_count(&self) -> usize {
        self.header.n_entries as usize
    }

    pub fn local_entry_count(&self) -> usize {
        self.header.n_local_entries as usize
    }

    pub fn entry(&self, r: DirRef) -> Option<DirEntry> {
        let index = r.index()?;
        if index >= self.entry_count() {
            return None;
        }
        let at = self.header.directory as usize + index * DirEntry::SIZE;
        Some(DirEntry::from_bytes(&self.storage[at..]))
    }

    pub fn entries(&self) -> impl Iterator<Item = (DirRef, DirEntry)> + '_ {
        (0..self.entry_count()).filter_map(|i| {
            let r = DirRef::from_index(i)?;
            Some((r, self.entry(r)?))
        })
    }

    /// Local entry with the given name.
    pub fn find_local(&self, name: &str) -> Option<(DirRef, DirEntry)> {
        self.entries()
            .take(self.local_entry_count())
            .find(|(_, e)| self.string(e.name).is_ok_and(|n| n == name))
    }

    /// Display name of an entry: bare for local entries, `Namespace.Symbol`
    /// for external ones.
    pub fn entry_name(&self, r: DirRef) -> Result<String, TypelibError> {
        let entry = self.entry(r).ok_or(TypelibError::OutOfBounds {
            offset: u32::from(r.raw()),
            len: DirEntry::SIZE,
        })?;
        let name = self.string(entry.name)?;
        if entry.local {
            return Ok(name.to_string());
        }
        Ok(format!("{}.{}", self.string(entry.offset)?, name))
    }

    // ------------------------------------------------------------------------
    // Blobs
    // ------------------------------------------------------------------------

    pub fn blob<B: Blob>(&self, offset: u32) -> Result<B, TypelibError> {
        let bytes = self.slice(offset, B::SIZE)?;
        Ok(B::from_bytes(bytes))
    }

    /// `count` consecutive rows starting at `offset`.
    pub fn rows<B: Blob>(&self, offset: u32, count: u16) -> Result<Vec<B>, TypelibError> {
        let len = B::SIZE * count as usize;
        let bytes = self.slice(offset, len)?;
        Ok(bytes.chunks_exact(B::SIZE).map(B::from_bytes).collect())
    }

    /// `count` u16 directory refs starting at `offset`.
    pub fn dir_refs(&self, offset: u32, count: u16) -> Result<Vec<DirRef>, TypelibError> {
        let bytes = self.slice(offset, count as usize * 2)?;
        Ok((0..count as usize)
            .map(|i| DirRef::from_raw(read_u16_le(bytes, i * 2)))
            .collect())
    }

    /// Raw value bytes of a constant.
    pub fn constant_value(&self, constant: &ConstantBlob) -> Result<&[u8], TypelibError> {
        if constant.size == 0 {
            return Ok(&[]);
        }
        self.slice(constant.offset, constant.size as usize)
    }

    pub fn signature(&self, offset: u32) -> Result<SignatureView, TypelibError> {
        let mut cur = self.cursor::<SignatureBlob>(offset)?;
        let blob = cur.head;
        Ok(SignatureView {
            args: cur.take(blob.n_arguments)?,
            blob,
        })
    }

    pub fn enum_view(&self, offset: u32) -> Result<EnumView, TypelibError> {
        let mut cur = self.cursor::<EnumBlob>(offset)?;
        let blob = cur.head;
        Ok(EnumView {
            values: cur.take(blob.n_values)?,
            blob,
        })
    }

    pub fn struct_view(&self, offset: u32) -> Result<StructView, TypelibError> {
        let mut cur = self.cursor::<StructBlob>(offset)?;
        let blob = cur.head;
        Ok(StructView {
            fields: cur.take(blob.n_fields)?,
            methods: cur.take(blob.n_methods)?,
            blob,
        })
    }

    pub fn union_view(&self, offset: u32) -> Result<UnionView, TypelibError> {
        let mut cur = self.cursor::<UnionBlob>(offset)?;
        let blob = cur.head;
        Ok(UnionView {
            fields: cur.take(blob.n_fields)?,
            functions: cur.take(blob.n_functions)?,
            discriminators: cur.take(blob.n_discriminators)?,
            blob,
        })
    }

    pub fn object_view(&self, offset: u32) -> Result<ObjectView, TypelibError> {
        let mut cur = self.cursor::<ObjectBlob>(offset)?;
        let blob = cur.head;
        Ok(ObjectView {
            interfaces: cur.take_refs(blob.n_interfaces)?,
            fields: cur.take(blob.n_fields)?,
            properties: cur.take(blob.n_properties)?,
            methods: cur.take(blob.n_methods)?,
            signals: cur.take(blob.n_signals)?,
            vfuncs: cur.take(blob.n_vfuncs)?,
            constants: cur.take(blob.n_constants)?,
            blob,
        })
    }

    pub fn interface_view(&self, offset: u32) -> Result<InterfaceView, TypelibError> {
        let mut cur = self.cursor::<InterfaceBlob>(offset)?;
        let blob = cur.head;
        Ok(InterfaceView {
            prerequisites: cur.take_refs(blob.n_prerequisites)?,
            properties: cur.take(blob.n_properties)?,
            methods: cur.take(blob.n_methods)?,
            signals: cur.take(blob.n_signals)?,
            vfuncs: cur.take(blob.n_vfuncs)?,
            constants: cur.take(blob.n_constants)?,
            blob,
        })
    }

    fn cursor<B: Blob>(&self, offset: u32) -> Result<RowCursor<'_, B>, TypelibError> {
        Ok(RowCursor {
            lib: self,
            head: self.blob(offset)?,
            at: offset as usize + B::SIZE,
        })
    }

    fn slice(&self, offset: u32, len: usize) -> Result<&[u8], TypelibError> {
        let start = offset as usize;
        if offset == 0 || start + len > self.storage.len() {
            return Err(TypelibError::OutOfBounds { offset, len });
        }
        Ok(&self.storage[start..start + len])
    }
}

/// Walks the trailing arrays of a row.
struct RowCursor<'t, H> {
    lib: &'t Typelib,
    head: H,
    at: usize,
}

impl<H> RowCursor<'_, H> {
    fn take<B: Blob>(&mut self, count: u16) -> Result<Vec<B>, TypelibError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let rows = self.lib.rows(self.offset(), count)?;
        self.at += B::SIZE * count as usize;
        Ok(rows)
    }

    /// Directory refs, padded to the blob alignment afterwards.
    fn take_refs(&mut self, count: u16) -> Result<Vec<DirRef>, TypelibError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let refs = self.lib.dir_refs(self.offset(), count)?;
        self.at = align_blob(self.at + count as usize * 2);
        Ok(refs)
    }

    fn offset(&self) -> u32 {
        u32::try_from(self.at).unwrap_or(u32::MAX)
    }
}

#[derive(Clone, Debug)]
pub struct SignatureView {
    pub blob: SignatureBlob,
    pub args: Vec<ArgBlob>,
}

#[derive(Clone, Debug)]
pub struct EnumView {
    pub blob: EnumBlob,
    pub values: Vec<ValueBlob>,
}

#[derive(Clone, Debug)]
pub struct StructView {
    pub blob: StructBlob,
    pub fields: Vec<FieldBlob>,
    pub methods: Vec<FunctionBlob>,
}

#[derive(Clone, Debug)]
pub struct UnionView {
    pub blob: UnionBlob,
    pub fields: Vec<FieldBlob>,
    pub functions: Vec<FunctionBlob>,
    pub discriminators: Vec<ConstantBlob>,
}

#[derive(Clone, Debug)]
pub struct ObjectView {
    pub blob: ObjectBlob,
    pub interfaces: Vec<DirRef>,
    pub fields: Vec<FieldBlob>,
    pub properties: Vec<PropertyBlob>,
    pub methods: Vec<FunctionBlob>,
    pub signals: Vec<SignalBlob>,
    pub vfuncs: Vec<VFuncBlob>,
    pub constants: Vec<ConstantBlob>,
}

#[derive(Clone, Debug)]
pub struct InterfaceView {
    pub blob: InterfaceBlob,
    pub prerequisites: Vec<DirRef>,
    pub properties: Vec<PropertyBlob>,
    pub methods: Vec<FunctionBlob>,
    pub signals: Vec<SignalBlob>,
    pub vfuncs: Vec<VFuncBlob>,
    pub constants: Vec<ConstantBlob>,
}
