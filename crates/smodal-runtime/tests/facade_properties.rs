use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use serde_json::json;
use smodal_runtime::{HideOptions, MergeOptions, ModalContext, ModalError, ModalSet, ModalStore, Modals};

const KEYS: [&str; 3] = ["modal1", "modal2", "modal3"];

fn demo_store() -> ModalStore {
    ModalStore::from_set(&ModalSet::new(KEYS).unwrap())
}

#[derive(Debug, Clone)]
enum Op {
    Show(&'static str, u8, bool),
    Hide(&'static str, bool),
    Toggle(&'static str, u8, bool),
    Update(&'static str, u8, bool),
}

fn op() -> impl Strategy<Value = Op> {
    let key = || prop::sample::select(KEYS.to_vec());
    prop_oneof![
        (key(), any::<u8>(), any::<bool>()).prop_map(|(k, n, m)| Op::Show(k, n, m)),
        (key(), any::<bool>()).prop_map(|(k, p)| Op::Hide(k, p)),
        (key(), any::<u8>(), any::<bool>()).prop_map(|(k, n, m)| Op::Toggle(k, n, m)),
        (key(), any::<u8>(), any::<bool>()).prop_map(|(k, n, m)| Op::Update(k, n, m)),
    ]
}

fn apply(modals: &Modals, op: &Op) -> Result<(), ModalError> {
    let merge = |m: bool| MergeOptions { merge_data: m };
    match *op {
        Op::Show(k, n, m) => modals.show_modal(k, &json!({ "n": n }), merge(m)),
        Op::Hide(k, p) => modals.hide_modal(k, HideOptions { persist_data: p }),
        Op::Toggle(k, n, m) => modals.toggle_modal(k, &json!({ "t": n }), merge(m)),
        Op::Update(k, n, m) => modals.update_modal_data(k, &json!({ "u": n }), merge(m)),
    }
}

fn target(op: &Op) -> &'static str {
    match *op {
        Op::Show(k, ..) | Op::Hide(k, ..) | Op::Toggle(k, ..) | Op::Update(k, ..) => k,
    }
}

proptest! {
    #[test]
    fn facade_isolates_other_modals(history in prop::collection::vec(op(), 0..10), last in op()) {
        let store = demo_store();
        let modals = store.modals();
        for op in &history {
            apply(&modals, op).unwrap();
        }
        let before = store.snapshot();
        apply(&modals, &last).unwrap();
        let after = store.snapshot();
        for key in KEYS.iter().filter(|k| **k != target(&last)) {
            prop_assert_eq!(after.get(key).unwrap(), before.get(key).unwrap());
        }
    }

    #[test]
    fn every_commit_is_observed_in_order(history in prop::collection::vec(op(), 1..10)) {
        let store = demo_store();
        let modals = store.modals();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let _sub = store.subscribe(move |state| s.borrow_mut().push(state.clone()));

        for op in &history {
            apply(&modals, op).unwrap();
        }
        let seen = seen.borrow();
        prop_assert_eq!(seen.len() as u64, store.version());
        if let Some(last) = seen.last() {
            prop_assert_eq!(last, &store.snapshot());
        }
    }
}

#[test]
fn hide_then_query_scenarios() {
    let store = demo_store();
    let modals = store.modals();

    modals.show_modal("modal1", &json!({"x": 1}), MergeOptions::default()).unwrap();
    modals.hide_modal("modal1", HideOptions::default()).unwrap();
    assert_eq!(modals.get_modal_data("modal1").unwrap(), None);

    modals.show_modal("modal1", &json!({"x": 1}), MergeOptions::default()).unwrap();
    modals.hide_modal("modal1", HideOptions::persist()).unwrap();
    assert_eq!(modals.get_modal_data("modal1").unwrap(), Some(json!({"x": 1})));
    assert!(!modals.is_modal_open("modal1").unwrap());
}

#[test]
fn toggle_round_trips_visibility_only() {
    let store = demo_store();
    let modals = store.modals();
    modals.show_modal("modal2", &json!({"a": 1}), MergeOptions::default()).unwrap();

    modals.toggle_modal("modal2", &(), MergeOptions::default()).unwrap();
    modals.toggle_modal("modal2", &json!({"b": 2}), MergeOptions::merge()).unwrap();

    assert!(modals.is_modal_open("modal2").unwrap());
    // The close in between dropped {"a": 1}, so nothing was left to merge into.
    assert_eq!(modals.get_modal_data("modal2").unwrap(), Some(json!({"b": 2})));
}

#[test]
fn facade_from_context_follows_store_lifetime() {
    let ctx = ModalContext::new();
    let modals = {
        let _provider = ctx.provide(demo_store());
        let modals = ctx.use_modal().unwrap();
        modals.show_modal("modal3", &json!({"info": "i"}), MergeOptions::default()).unwrap();
        assert!(modals.is_modal_open("modal3").unwrap());
        modals
    };
    assert_eq!(modals.is_modal_open("modal3"), Err(ModalError::NotInitialized));
    assert_eq!(ctx.use_modal().unwrap_err(), ModalError::NotInitialized);
}

#[test]
fn initial_state_must_cover_the_set() {
    let set = ModalSet::new(KEYS).unwrap();
    let err = ModalStore::from_entries(&set, [("modal1", Default::default())]).unwrap_err();
    assert_eq!(err, ModalError::MissingModal("modal2".into()));
}
