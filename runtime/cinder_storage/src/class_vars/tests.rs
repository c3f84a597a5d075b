use super::*;
use crate::hierarchy::ModuleGraph;
use cinder_ir::SharedInterner;
use pretty_assertions::assert_eq;

struct Fixture {
    graph: ModuleGraph,
    a: ModuleId,
    b: ModuleId,
    c: ModuleId,
    v: Name,
}

/// `B < A`, and `C` unrelated to either.
fn fixture() -> Fixture {
    let interner = SharedInterner::default();
    let mut graph = ModuleGraph::new();
    let a = graph.define_class(interner.intern("A"), None);
    let b = graph.define_class(interner.intern("B"), Some(a));
    let c = graph.define_class(interner.intern("C"), None);
    Fixture {
        graph,
        a,
        b,
        c,
        v: interner.intern("@@v"),
    }
}

#[test]
fn test_unused_name() {
    let f = fixture();
    let table = ClassVariableTable::new();

    assert_eq!(table.resolve(&f.graph, f.a, f.v), ClassVarLookup::Unused);
    assert_eq!(table.get(&f.graph, f.a, f.v), None);
}

#[test]
fn test_subclass_reads_superclass_entry() {
    let f = fixture();
    let mut table = ClassVariableTable::new();
    table.set(&f.graph, f.a, f.v, Value::int(1));

    assert_eq!(
        table.resolve(&f.graph, f.b, f.v),
        ClassVarLookup::Visible {
            owner: f.a,
            value: Value::int(1)
        }
    );
}

#[test]
fn test_subclass_write_updates_shared_slot() {
    let f = fixture();
    let mut table = ClassVariableTable::new();
    table.set(&f.graph, f.a, f.v, Value::int(1));
    table.set(&f.graph, f.b, f.v, Value::int(2));

    // Only one entry, owned by A, observed from both classes.
    assert_eq!(table.get(&f.graph, f.a, f.v), Some(Value::int(2)));
    assert_eq!(
        table.resolve(&f.graph, f.b, f.v),
        ClassVarLookup::Visible {
            owner: f.a,
            value: Value::int(2)
        }
    );
}

#[test]
fn test_superclass_write_purges_subclass_shadow() {
    let f = fixture();
    let mut table = ClassVariableTable::new();
    table.set(&f.graph, f.b, f.v, Value::int(1));

    // A cannot see B's entry, so this is a new write that drops it.
    assert_eq!(table.resolve(&f.graph, f.a, f.v), ClassVarLookup::NotVisible);
    table.set(&f.graph, f.a, f.v, Value::int(2));

    assert_eq!(
        table.resolve(&f.graph, f.b, f.v),
        ClassVarLookup::Visible {
            owner: f.a,
            value: Value::int(2)
        }
    );
    assert_eq!(table.remove(f.b, f.v), None);
}

#[test]
fn test_disjoint_hierarchies_are_isolated() {
    let f = fixture();
    let mut table = ClassVariableTable::new();
    table.set(&f.graph, f.b, f.v, Value::int(1));
    table.set(&f.graph, f.a, f.v, Value::int(2));
    table.set(&f.graph, f.c, f.v, Value::int(9));

    assert_eq!(table.get(&f.graph, f.b, f.v), Some(Value::int(2)));
    assert_eq!(table.get(&f.graph, f.c, f.v), Some(Value::int(9)));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_unrelated_write_keeps_other_hierarchy() {
    let f = fixture();
    let mut table = ClassVariableTable::new();
    table.set(&f.graph, f.c, f.v, Value::int(9));

    assert_eq!(table.resolve(&f.graph, f.a, f.v), ClassVarLookup::NotVisible);
    table.set(&f.graph, f.a, f.v, Value::int(1));

    assert_eq!(table.get(&f.graph, f.c, f.v), Some(Value::int(9)));
    assert_eq!(table.get(&f.graph, f.a, f.v), Some(Value::int(1)));
}

#[test]
fn test_most_specific_entry_wins_through_module() {
    let interner = SharedInterner::default();
    let mut graph = ModuleGraph::new();
    let base = graph.define_class(interner.intern("Base"), None);
    let mixin = graph.define_module(interner.intern("Mixin"));
    let derived = graph.define_class(interner.intern("Derived"), Some(base));
    let v = interner.intern("@@v");
    let mut table = ClassVariableTable::new();

    table.set(&graph, base, v, Value::int(1));
    table.set(&graph, mixin, v, Value::int(2));
    assert!(graph.include(derived, mixin));

    // Derived sees both; the mixin sits closer in its chain.
    assert_eq!(
        table.resolve(&graph, derived, v),
        ClassVarLookup::Visible {
            owner: mixin,
            value: Value::int(2)
        }
    );
    table.set(&graph, derived, v, Value::int(3));
    assert_eq!(table.get(&graph, mixin, v), Some(Value::int(3)));
    assert_eq!(table.get(&graph, base, v), Some(Value::int(1)));
}

#[test]
fn test_remove_own_entry() {
    let f = fixture();
    let mut table = ClassVariableTable::new();
    table.set(&f.graph, f.a, f.v, Value::int(1));

    assert_eq!(table.remove(f.b, f.v), None);
    assert_eq!(table.remove(f.a, f.v), Some(Value::int(1)));
    assert_eq!(table.resolve(&f.graph, f.b, f.v), ClassVarLookup::Unused);
    assert!(table.is_empty());
}

#[test]
fn test_remove_keeps_ancestor_visible() {
    let f = fixture();
    let mut table = ClassVariableTable::new();
    table.set(&f.graph, f.c, f.v, Value::int(5));
    table.set(&f.graph, f.a, f.v, Value::int(1));

    assert_eq!(table.remove(f.c, f.v), Some(Value::int(5)));
    assert!(table.is_defined(&f.graph, f.b, f.v));
    assert!(!table.is_defined(&f.graph, f.c, f.v));
}

#[test]
fn test_visible_names() {
    let interner = SharedInterner::default();
    let mut graph = ModuleGraph::new();
    let a = graph.define_class(interner.intern("A"), None);
    let b = graph.define_class(interner.intern("B"), Some(a));
    let c = graph.define_class(interner.intern("C"), None);
    let count = interner.intern("@@count");
    let limit = interner.intern("@@limit");
    let other = interner.intern("@@other");
    let mut table = ClassVariableTable::new();

    table.set(&graph, a, limit, Value::int(10));
    table.set(&graph, b, count, Value::int(0));
    table.set(&graph, c, other, Value::Nil);

    assert_eq!(table.visible_names(&graph, b), vec![count, limit]);
    assert_eq!(table.visible_names(&graph, a), vec![limit]);
    assert_eq!(table.visible_names(&graph, c), vec![other]);
}
