use super::{DataStore, Slot};
use crate::error::{AdinsightError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory slots for testing.
///
/// Uses `RefCell` for interior mutability so the `DataStore` methods can take `&self`.
#[derive(Default)]
pub struct MemStore {
    slots: RefCell<HashMap<Slot, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    pub fn raw(&self, slot: Slot) -> Option<String> {
        self.slots.borrow().get(&slot).cloned()
    }
}

impl DataStore for MemStore {
    fn load_slot(&self, slot: Slot) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(&slot).cloned())
    }

    fn save_slot(&self, slot: Slot, content: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(AdinsightError::Store("Simulated write error".to_string()));
        }
        self.slots.borrow_mut().insert(slot, content.to_string());
        Ok(())
    }
}
