use super::string_pool::StringPool;

#[test]
fn intern_twice_returns_same_offset() {
    let mut pool = StringPool::new();

    let a = pool.intern("hello");
    let b = pool.intern("hello");

    assert_eq!(a, b);
    assert_eq!(pool.len(), 1);
    assert_eq!(pool.byte_len(), 6);
}

#[test]
fn distinct_strings_get_distinct_offsets() {
    let mut pool = StringPool::new();

    let a = pool.intern("hello");
    let b = pool.intern("world");
    let c = pool.intern("hell");

    assert_eq!(a, 0);
    assert_eq!(b, 6);
    assert_eq!(c, 12);
    assert_eq!(pool.as_bytes(), b"hello\0world\0hell\0");
}

#[test]
fn empty_string_is_a_single_nul() {
    let mut pool = StringPool::new();

    pool.intern("x");
    let empty = pool.intern("");

    assert_eq!(empty, 2);
    assert_eq!(pool.as_bytes(), b"x\0\0");
    assert_eq!(pool.get(""), Some(2));
}

#[test]
fn get_does_not_intern() {
    let mut pool = StringPool::new();
    pool.intern("a");

    assert_eq!(pool.get("b"), None);
    assert_eq!(pool.len(), 1);
    assert!(pool.validate().is_ok());
}

#[test]
fn intern_opt() {
    let mut pool = StringPool::new();

    assert_eq!(pool.intern_opt(None), None);
    assert_eq!(pool.intern_opt(Some("a")), Some(0));
    assert!(!pool.is_empty());
}
