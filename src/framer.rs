const INITIATORS: [u8; 2] = [b'[', b'{'];
const TERMINATORS: [u8; 2] = [b']', b'}'];

/// Splits a byte stream into top-level JSON values by bracket nesting.
///
/// Bracket bytes are counted literally, including inside string literals; the
/// server never puts brackets in its string values.
#[derive(Debug, Default)]
pub struct JsonFramer {
    depth: i64,
    buffer: Vec<u8>,
}

impl JsonFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one byte. Returns the raw bytes of a complete value once the
    /// nesting depth returns to zero, resetting the framer for the next value.
    pub fn push(&mut self, byte: u8) -> Option<Vec<u8>> {
        if INITIATORS.contains(&byte) {
            self.depth += 1;
        } else if TERMINATORS.contains(&byte) {
            self.depth -= 1;
        }

        if self.depth > 0 || !self.buffer.is_empty() {
            self.buffer.push(byte);
        }

        if self.depth == 0 && !self.buffer.is_empty() {
            return Some(std::mem::take(&mut self.buffer));
        }
        None
    }

    /// True once the first opening bracket of a value has been seen.
    pub fn in_progress(&self) -> bool {
        !self.buffer.is_empty()
    }
}
