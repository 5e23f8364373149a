use typelib_format::{TypeRef, TypeTag};

use super::directory::SymbolDirectory;
use super::section::{Reloc, Section, Target};
use super::string_pool::StringPool;

#[test]
fn begin_entry_aligns_to_four() {
    let mut pool = StringPool::new();
    let mut dir = SymbolDirectory::new("Demo", &mut pool);
    let mut section = Section::new();
    section.u8(7);

    let id = dir.allocate_id();
    let start = section.begin_entry(id);

    assert_eq!(start, 4);
    assert_eq!(section.start_of(id), Some(4));
    assert_eq!(section.entry_count(), 1);
}

#[test]
fn references_are_zero_placeholders() {
    let mut pool = StringPool::new();
    let mut dir = SymbolDirectory::new("Demo", &mut pool);
    let target = dir.allocate_id();
    let mut section = Section::new();

    section.u16(1);
    section.u16(2);
    section.str_ref(Some(5));
    section.str_ref(None);
    section.entry_ref(target);

    let (bytes, relocs, _) = section.into_parts();
    assert_eq!(bytes, [1, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(
        relocs,
        [
            Reloc {
                at: 4,
                target: Target::Str(5),
            },
            Reloc {
                at: 12,
                target: Target::Entry(target),
            },
        ]
    );
}

#[test]
fn complex_type_ref_relocates_offset_field() {
    let mut pool = StringPool::new();
    let mut dir = SymbolDirectory::new("Demo", &mut pool);
    let target = dir.allocate_id();
    let mut section = Section::new();
    section.u32(0);

    section.type_ref(TypeRef::simple(TypeTag::List, true), Some(target));
    section.type_ref(TypeRef::simple(TypeTag::Int32, false), None);

    assert_eq!(section.len(), 20);
    assert_eq!(
        section.relocs(),
        [Reloc {
            at: 8,
            target: Target::Entry(target),
        }]
    );
}

#[test]
#[should_panic(expected = "written twice")]
fn second_body_for_one_id_panics() {
    let mut pool = StringPool::new();
    let mut dir = SymbolDirectory::new("Demo", &mut pool);
    let id = dir.allocate_id();
    let mut section = Section::new();

    section.begin_entry(id);
    section.begin_entry(id);
}
