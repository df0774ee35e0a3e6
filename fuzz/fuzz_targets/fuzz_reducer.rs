#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde_json::{Value, json};
use smodal_core::{HideOptions, MergeOptions, ModalAction, ModalError, ModalSet, ModalState, reduce};

const KEYS: [&str; 4] = ["a", "b", "c", "missing"];

#[derive(Debug, Arbitrary)]
enum Data {
    None,
    Int(i32),
    Text(String),
    Object(Vec<(u8, i32)>),
}

impl Data {
    fn into_value(self) -> Option<Value> {
        match self {
            Data::None => None,
            Data::Int(n) => Some(json!(n)),
            Data::Text(s) => Some(json!(s)),
            Data::Object(fields) => Some(Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (format!("f{}", k % 8), json!(v)))
                    .collect(),
            )),
        }
    }
}

#[derive(Debug, Arbitrary)]
enum Op {
    Show { key: u8, data: Data, merge: bool },
    Hide { key: u8, persist: bool },
    Toggle { key: u8, data: Data, merge: bool },
    Update { key: u8, data: Data, merge: bool },
}

impl Op {
    fn into_action(self) -> ModalAction {
        let key = |k: u8| KEYS[usize::from(k) % KEYS.len()];
        match self {
            Op::Show { key: k, data, merge } => {
                ModalAction::show(key(k), data.into_value(), MergeOptions { merge_data: merge })
            }
            Op::Hide { key: k, persist } => {
                ModalAction::hide(key(k), HideOptions { persist_data: persist })
            }
            Op::Toggle { key: k, data, merge } => {
                ModalAction::toggle(key(k), data.into_value(), MergeOptions { merge_data: merge })
            }
            Op::Update { key: k, data, merge } => ModalAction::update_data(
                key(k),
                data.into_value().unwrap_or(Value::Null),
                MergeOptions { merge_data: merge },
            ),
        }
    }
}

fuzz_target!(|ops: Vec<Op>| {
    let Ok(set) = ModalSet::new(["a", "b", "c"]) else {
        return;
    };
    let mut state = ModalState::closed(&set);
    for op in ops {
        let action = op.into_action();
        let target = action.modal().clone();
        match reduce(&state, action) {
            Ok(next) => {
                assert_eq!(next.modal_set(), set);
                for key in set.iter().filter(|k| **k != target) {
                    assert_eq!(next.get(key.as_str()), state.get(key.as_str()));
                }
                state = next;
            }
            Err(err) => assert_eq!(err, ModalError::UnknownModal("missing".into())),
        }
    }
});
