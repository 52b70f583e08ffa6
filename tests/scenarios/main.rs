//! End-to-end scenarios: a manager wired to the in-memory layer and
//! selection tracker, exercised through add/rename/reorder/remove and
//! the persistence boundary.

use geomark::{
    restore, save, DefaultFactory, MemoryLayer, MemoryStore, Position, SelectionState, Symbol,
    SymbolId, SymbolManager, SymbolParams,
};

fn manager() -> SymbolManager<MemoryLayer, SelectionState> {
    SymbolManager::new(MemoryLayer::new(), SelectionState::new())
}

fn add(manager: &mut SymbolManager<MemoryLayer, SelectionState>, name: &str) -> SymbolId {
    let symbol = Symbol::new(Position::new(48.2, 16.4), SymbolParams::new(name, "unit.png"));
    let id = symbol.id;
    manager.add_symbol(symbol);
    id
}

/// Layer contents and collection contents stay a bijection across an
/// arbitrary interleaving of adds, removes, and reorders.
#[test]
fn add_remove_reorder_keeps_layer_bijective() {
    let mut manager = manager();
    let a = add(&mut manager, "Recon");
    let b = add(&mut manager, "Recon");
    let c = add(&mut manager, "Supply");

    manager.reorder_symbol(2, 0);
    manager.remove_symbol(b);
    let d = add(&mut manager, "Recon");

    let in_collection: Vec<SymbolId> = manager.symbols().map(|s| s.id).collect();
    let in_layer: Vec<SymbolId> = manager.layer().items().iter().map(|r| r.symbol).collect();
    assert_eq!(in_collection.len(), 3);
    assert_eq!(in_layer.len(), 3);
    for id in [a, c, d] {
        assert!(in_collection.contains(&id));
        assert!(in_layer.contains(&id));
    }
}

#[test]
fn duplicate_names_get_suffix_sequence() {
    let mut manager = manager();
    add(&mut manager, "Recon");
    add(&mut manager, "Recon");
    add(&mut manager, "Recon");

    let names: Vec<&str> = manager.symbols().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Recon", "Recon (2)", "Recon (3)"]);
}

#[test]
fn reorder_changes_no_names_and_no_layer_items() {
    let mut manager = manager();
    add(&mut manager, "Recon");
    add(&mut manager, "Supply");
    let names_before: Vec<String> = manager.symbols().map(|s| s.name.clone()).collect();
    let layer_before: Vec<_> = manager.layer().items().to_vec();

    assert!(manager.reorder_symbol(0, 1));

    let mut names_after: Vec<String> = manager.symbols().map(|s| s.name.clone()).collect();
    names_after.reverse();
    assert_eq!(names_after, names_before);
    assert_eq!(manager.layer().items(), layer_before.as_slice());
}

#[test]
fn removing_selected_symbol_clears_selection() {
    let mut manager = manager();
    let id = add(&mut manager, "Recon");
    manager.selection_mut().select(id);

    manager.remove_symbol(id);
    assert!(!manager.selection().is_selected(id));

    // Removing again stays a no-op.
    manager.remove_symbol(id);
    assert_eq!(manager.symbol_count(), 0);
}

#[test]
fn save_then_restore_reproduces_marker_set() {
    let mut original = manager();
    add(&mut original, "Recon");
    add(&mut original, "Recon");
    let mut invalid = Symbol::new(
        Position::new(48.2, 16.4),
        SymbolParams::new("Ghost", "unit.png"),
    );
    invalid.invalid = true;
    original.add_symbol(invalid);

    let mut store = MemoryStore::new();
    save(&original, &mut store).unwrap();

    let mut restored = manager();
    restore(&mut restored, &DefaultFactory, &store);

    let mut names: Vec<String> = restored.symbols().map(|s| s.name.clone()).collect();
    names.sort();
    assert_eq!(names, ["Recon", "Recon (2)"]);
    assert!(restored.symbols().all(|s| !s.invalid));
    assert_eq!(restored.layer().len(), 2);

    for symbol in restored.symbols() {
        let twin = original.find_symbol(symbol.id).unwrap();
        assert_eq!(symbol.name, twin.name);
        assert_eq!(symbol.source, twin.source);
        assert_eq!(symbol.position.latitude, twin.position.latitude);
        assert_eq!(symbol.position.longitude, twin.position.longitude);
        assert_eq!(symbol.is_movable, twin.is_movable);
    }
}

#[test]
fn restore_from_corrupt_store_leaves_collection_untouched() {
    use geomark::{KeyValueStore, SYMBOL_SLOT_KEY};

    let mut store = MemoryStore::new();
    store
        .set(SYMBOL_SLOT_KEY, "\u{1}garbage".to_string())
        .unwrap();

    let mut manager = manager();
    restore(&mut manager, &DefaultFactory, &store);
    assert_eq!(manager.symbol_count(), 0);
    assert!(manager.layer().is_empty());
}

#[test]
fn clear_tears_down_everything() {
    let mut manager = manager();
    let a = add(&mut manager, "Recon");
    let b = add(&mut manager, "Supply");
    manager.selection_mut().select(a);

    manager.clear();
    assert_eq!(manager.symbol_count(), 0);
    assert!(manager.layer().is_empty());
    assert!(!manager.selection().is_selected(a));
    assert!(manager.find_symbol(b).is_none());
}
