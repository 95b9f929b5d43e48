use std::collections::HashSet;

use serde_json::{json, Value};

use form_continuity::tree::element_model::{parents_path, to_value};
use form_continuity::{Form, IdGenerator, RequestState, STASH_KEY};

use crate::common::fixtures::{cipher, collect_ids, sample_definition};

mod common;

fn build_sample(seed: u64) -> Form {
    Form::with_ids(
        &sample_definition(),
        &RequestState::first_render(),
        &cipher(),
        IdGenerator::seeded(seed),
    )
    .unwrap()
}

// =========================================================================
// Id assignment
// =========================================================================

#[test]
fn build_assigns_unique_ids_to_every_node() {
    let form = build_sample(1);
    let emitted = to_value(&form.root);

    let mut ids = Vec::new();
    collect_ids(&emitted, &mut ids);

    assert_eq!(ids.len(), 5, "root, name, address, street, city");
    let distinct: HashSet<_> = ids.iter().collect();
    assert_eq!(distinct.len(), ids.len(), "No two nodes share an id");
}

#[test]
fn echoed_ids_are_reused() {
    let definition = json!({
        "name": { "#id": "h-name", "#type": "textfield" }
    });
    let form = Form::with_ids(
        &definition,
        &RequestState::first_render(),
        &cipher(),
        IdGenerator::seeded(1),
    )
    .unwrap();

    let element = form.find("h-name").expect("echoed id resolves");
    assert_eq!(element.borrow().id, "h-name", "Client-echoed id is kept");
    assert!(form.registry.is_registered("h-name"), "Registered under echoed id");
}

#[test]
#[should_panic(expected = "id collision")]
fn duplicate_id_in_one_tree_is_fatal() {
    let definition = json!({
        "a": { "#id": "dup", "#type": "textfield" },
        "b": { "#id": "dup", "#type": "textfield" }
    });
    let _ = Form::with_ids(
        &definition,
        &RequestState::first_render(),
        &cipher(),
        IdGenerator::seeded(1),
    );
}

// =========================================================================
// Lookup and paths
// =========================================================================

#[test]
fn find_locates_nested_nodes() {
    let form = build_sample(1);
    let street = {
        let root = form.root.borrow();
        let address = root.child("address").unwrap();
        let street = address.borrow().child("street").unwrap();
        street
    };
    let street_id = street.borrow().id.clone();

    let found = form.find(&street_id).expect("nested node found from root");
    assert_eq!(found.borrow().id, street_id);
    assert!(form.find("no-such-id").is_none(), "Unknown id yields none");
}

#[test]
fn parents_path_walks_local_keys_from_root() {
    let form = build_sample(1);
    let root = form.root.borrow();
    let address = root.child("address").unwrap();
    let street = address.borrow().child("street").unwrap();

    assert_eq!(parents_path(&street), vec!["address", "street"]);
    assert_eq!(parents_path(&address), vec!["address"]);
    assert!(parents_path(&form.root).is_empty(), "Root key is not part of any path");
}

// =========================================================================
// Removal (orphaning)
// =========================================================================

#[test]
fn removed_node_is_orphaned_but_original_survives() {
    let definition = json!({
        "name": { "#id": "h-name", "#type": "textfield", "#title": "Name" }
    });
    let mut form = Form::with_ids(
        &definition,
        &RequestState::first_render(),
        &cipher(),
        IdGenerator::seeded(1),
    )
    .unwrap();

    let removed = form.remove("h-name").expect("known id removes");
    assert_eq!(removed.borrow().id, "h-name");
    assert!(removed.borrow().parent().is_none(), "Parent link severed");

    assert!(form.find("h-name").is_none(), "Gone from traversal");
    assert!(form.registry.get("h-name").is_none(), "Gone from live registry");
    assert!(
        form.registry.get_original("h-name").is_some(),
        "Original snapshot survives removal"
    );

    let revived = form
        .duplicate_original("h-name")
        .expect("duplication-from-original works after removal");
    assert_ne!(revived.borrow().id, "h-name", "Clone gets a fresh id");

    assert!(form.remove("h-name").is_none(), "Second removal is a miss");
}

// =========================================================================
// Duplication
// =========================================================================

#[test]
fn duplicate_clones_mutated_state_and_duplicate_original_restores_pristine() {
    let definition = json!({
        "name": { "#id": "h-name", "#type": "textfield", "#title": "Name" }
    });
    let mut form = Form::with_ids(
        &definition,
        &RequestState::first_render(),
        &cipher(),
        IdGenerator::seeded(1),
    )
    .unwrap();

    let live = form.find("h-name").unwrap();
    live.borrow_mut().set_property("#title", json!("Changed"));

    let mutated = form.duplicate("h-name").expect("live clone");
    assert_eq!(
        mutated.borrow().get_property("#title"),
        Some(&json!("Changed")),
        "duplicate carries the mutated state"
    );

    let pristine = form.duplicate_original("h-name").expect("original clone");
    assert_eq!(
        pristine.borrow().get_property("#title"),
        Some(&json!("Name")),
        "duplicate_original discards mutations applied since first build"
    );

    let mutated_id = mutated.borrow().id.clone();
    let pristine_id = pristine.borrow().id.clone();
    assert_ne!(mutated_id, "h-name", "Clone id differs from source");
    assert_ne!(pristine_id, "h-name", "Clone id differs from source");
    assert_ne!(mutated_id, pristine_id, "Clones are independent entities");

    assert!(form.registry.get(&mutated_id).is_some(), "Clone is registered");
    assert!(form.registry.get(&pristine_id).is_some(), "Clone is registered");
    assert!(form.duplicate("unknown").is_none(), "Unknown id yields none");
}

#[test]
fn duplicated_subtree_gets_fresh_ids_throughout() {
    let mut form = build_sample(1);
    let address_id = form.root.borrow().child("address").unwrap().borrow().id.clone();

    let clone = form.duplicate(&address_id).unwrap();
    let mut original_ids = Vec::new();
    collect_ids(&to_value(&form.root), &mut original_ids);
    let mut clone_ids = Vec::new();
    collect_ids(&to_value(&clone), &mut clone_ids);

    assert_eq!(clone_ids.len(), 3, "address, street, city");
    for id in &clone_ids {
        assert!(
            !original_ids.contains(id),
            "Clone id {} must not alias the source subtree",
            id
        );
    }
}

// =========================================================================
// Emit / rebuild round trip
// =========================================================================

#[test]
fn emitted_output_rebuilds_isomorphically_with_ids_preserved() {
    let mut form = build_sample(1);
    let request = RequestState::first_render();
    let hooks = form_continuity::AlterHooks::new();
    let mut out = form.render(&request, &hooks, &cipher());

    if let Value::Object(map) = &mut out {
        map.remove(STASH_KEY);
    }

    let rebuilt = Form::with_ids(
        &out,
        &RequestState::first_render(),
        &cipher(),
        IdGenerator::seeded(2),
    )
    .unwrap();

    assert_eq!(
        to_value(&rebuilt.root),
        out,
        "Rebuild of emitted output is isomorphic, ids reused"
    );
}
