//! In-memory self-port state.

use parking_lot::Mutex;

use crate::ports::SelfPortState;

/// Self-port state that lives as long as the value itself.
///
/// Suitable for tests and for hosts that never restart in-process.
#[derive(Debug, Default)]
pub struct MemoryPortState {
    value: Mutex<Option<String>>,
}

impl MemoryPortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a raw stored value, as if left by a previous run.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(value.into())),
        }
    }
}

impl SelfPortState for MemoryPortState {
    fn load(&self) -> Option<String> {
        self.value.lock().clone()
    }

    fn store(&self, port: u16) {
        *self.value.lock() = Some(port.to_string());
    }

    fn clear(&self) {
        *self.value.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_load_clear() {
        let state = MemoryPortState::new();
        assert_eq!(state.load(), None);

        state.store(5001);
        assert_eq!(state.load().as_deref(), Some("5001"));

        state.clear();
        assert_eq!(state.load(), None);
    }
}
