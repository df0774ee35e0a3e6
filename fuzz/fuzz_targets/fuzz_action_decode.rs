#![no_main]

use libfuzzer_sys::fuzz_target;
use smodal_core::ModalAction;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(action) = ModalAction::from_json(text) {
        // Anything accepted must encode and decode back to itself.
        let encoded = action.to_json();
        assert_eq!(ModalAction::from_json(&encoded).ok(), Some(action));
    }
});
