use typelib_core::{Constant, Signature, Type, TypeKind};

use super::deferred::{DeferredQueues, PushCounts};
use super::directory::SymbolDirectory;
use super::string_pool::StringPool;

#[test]
fn queues_are_fifo() {
    let mut pool = StringPool::new();
    let mut dir = SymbolDirectory::new("Demo", &mut pool);
    let int = Type::new(TypeKind::Int32);
    let text = Type::new(TypeKind::Utf8);
    let (a, b) = (dir.allocate_id(), dir.allocate_id());

    let mut queues = DeferredQueues::new();
    queues.push_type(&int, a);
    queues.push_type(&text, b);

    assert_eq!(queues.pop_type(), Some((&int, a)));
    assert_eq!(queues.pop_type(), Some((&text, b)));
    assert_eq!(queues.pop_type(), None);
}

#[test]
fn empty_only_when_every_queue_is() {
    let mut pool = StringPool::new();
    let mut dir = SymbolDirectory::new("Demo", &mut pool);
    let signature = Signature::default();
    let constant = Constant {
        name: "MAX".to_string(),
        deprecated: false,
        ty: Type::new(TypeKind::Int32),
        value: "10".to_string(),
    };

    let mut queues = DeferredQueues::new();
    assert!(queues.is_empty());

    queues.push_signature(&signature, dir.allocate_id());
    queues.push_constant(&constant, dir.allocate_id());
    assert!(!queues.is_empty());
    assert_eq!(queues.pending(), 2);

    queues.pop_signature();
    assert!(!queues.is_empty());

    queues.pop_constant();
    assert!(queues.is_empty());
}

#[test]
fn push_counts_survive_pops() {
    let mut pool = StringPool::new();
    let mut dir = SymbolDirectory::new("Demo", &mut pool);
    let signature = Signature::default();

    let mut queues = DeferredQueues::new();
    queues.push_signature(&signature, dir.allocate_id());
    queues.push_signature(&signature, dir.allocate_id());
    while queues.pop_signature().is_some() {}

    assert_eq!(
        queues.pushed(),
        PushCounts {
            types: 0,
            signatures: 2,
            constants: 0,
        }
    );
}
