use std::collections::HashMap;

use log::debug;

use crate::StatePayload;

/// Remembers the last published payload per device to avoid republishing
/// unchanged state.
#[derive(Default)]
pub struct Storage {
    state: HashMap<String, StatePayload>,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_state(&mut self, state: &StatePayload) -> bool {
        if self.state.get(&state.device_id) != Some(state) {
            debug!("state changed: {:?}", state);

            self.state.insert(state.device_id.clone(), state.clone());
            true
        } else {
            false
        }
    }
}
