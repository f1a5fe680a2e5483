//! Input query capability consumed by behaviors
//!
//! The engine never captures input itself; the driver hands it something that
//! can answer "is this key down right now".

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Space,
    /// Restart the current level
    Restart,
}

pub trait InputQuery {
    fn is_key_pressed(&self, key: Key) -> bool;
}

impl<F> InputQuery for F
where
    F: Fn(Key) -> bool,
{
    fn is_key_pressed(&self, key: Key) -> bool {
        self(key)
    }
}

/// Set of currently held keys, fed by the platform layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySet {
    held: HashSet<Key>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            held: iter.into_iter().collect(),
        }
    }
}

impl InputQuery for KeySet {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

/// Nothing pressed
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputQuery for NoInput {
    fn is_key_pressed(&self, _key: Key) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_set_press_release() {
        let mut keys = KeySet::new();
        keys.press(Key::Left);
        keys.press(Key::Space);
        assert!(keys.is_key_pressed(Key::Left));
        assert!(!keys.is_key_pressed(Key::Right));
        keys.release(Key::Left);
        assert!(!keys.is_key_pressed(Key::Left));
        assert!(keys.is_key_pressed(Key::Space));
    }

    #[test]
    fn test_closure_input() {
        let only_right = |k: Key| k == Key::Right;
        assert!(only_right.is_key_pressed(Key::Right));
        assert!(!only_right.is_key_pressed(Key::Space));
    }
}
