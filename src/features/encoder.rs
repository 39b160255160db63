//! Stable categorical encoding: a code is assigned the first time a value is
//! seen and never reassigned, so codes stay consistent across appended
//! batches for the encoder's lifetime.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct CategoryEncoder {
    codes: HashMap<String, u32>,
}

impl CategoryEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Code for `value`, assigning the next free code on first sight.
    pub fn code(&mut self, value: &str) -> u32 {
        if let Some(&c) = self.codes.get(value) {
            return c;
        }
        let next = self.codes.len() as u32;
        self.codes.insert(value.to_string(), next);
        next
    }

    /// Number of distinct values seen so far.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sight_order() {
        let mut e = CategoryEncoder::new();
        assert_eq!(e.code("login"), 0);
        assert_eq!(e.code("delete"), 1);
        assert_eq!(e.code("login"), 0);
        assert_eq!(e.len(), 2);
    }

    #[test]
    fn codes_stable_across_batches() {
        let mut e = CategoryEncoder::new();
        for v in ["login", "view", "delete"] {
            e.code(v);
        }
        // A later batch in a different order must not shift existing codes.
        assert_eq!(e.code("delete"), 2);
        assert_eq!(e.code("edit"), 3);
        assert_eq!(e.code("login"), 0);
    }
}
