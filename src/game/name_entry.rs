//! Name buffer filled in while a qualifying score waits to be saved

use heapless::String;

use crate::config::{DEFAULT_NAME, MAX_NAME_LEN};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameBuffer {
    text: String<MAX_NAME_LEN>,
}

impl NameBuffer {
    pub const fn new() -> Self {
        Self { text: String::new() }
    }

    /// Append a printable ASCII byte. Returns the character when it was
    /// stored; control bytes and anything past the last slot are dropped.
    pub fn push(&mut self, byte: u8) -> Option<char> {
        if !(0x20..=0x7E).contains(&byte) {
            return None;
        }
        let c = byte as char;
        self.text.push(c).ok().map(|_| c)
    }

    pub fn pop(&mut self) -> bool {
        self.text.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Replace the contents with `name`, truncated to fit.
    pub fn set(&mut self, name: &str) {
        self.clear();
        for byte in name.bytes() {
            if self.push(byte).is_none() && self.is_full() {
                break;
            }
        }
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.text.len() >= MAX_NAME_LEN
    }

    /// The name to store: the buffer, or the placeholder when nothing was typed.
    pub fn committed(&self) -> &str {
        if self.text.trim().is_empty() {
            DEFAULT_NAME
        } else {
            self.text.as_str()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_up_to_capacity() {
        let mut name = NameBuffer::new();
        for byte in b"ABCDEFGHIJKLMN" {
            name.push(*byte);
        }
        assert_eq!(name.as_str(), "ABCDEFGHIJKL");
        assert_eq!(name.push(b'Z'), None);
    }

    #[test]
    fn control_bytes_are_rejected() {
        let mut name = NameBuffer::new();
        assert_eq!(name.push(0x07), None);
        assert_eq!(name.push(0x7F), None);
        assert_eq!(name.push(b'~'), Some('~'));
        assert_eq!(name.push(b' '), Some(' '));
        assert_eq!(name.len(), 2);
    }

    #[test]
    fn empty_commits_placeholder() {
        let mut name = NameBuffer::new();
        assert_eq!(name.committed(), "PLAYER");
        name.push(b' ');
        assert_eq!(name.committed(), "PLAYER");
        name.pop();
        name.push(b'Q');
        assert_eq!(name.committed(), "Q");
    }

    #[test]
    fn set_skips_unprintable_and_truncates() {
        let mut name = NameBuffer::new();
        name.set("AL\tICE-THE-GREAT");
        assert_eq!(name.as_str(), "ALICE-THE-GR");
    }
}
