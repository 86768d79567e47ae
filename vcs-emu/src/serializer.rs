//! Typed byte-stream writer/reader for save states.
//!
//! Every value is written in a fixed, self-describing encoding:
//! - bool: one byte (0 or 1)
//! - int: 32-bit little-endian two's complement
//! - string: int length prefix followed by UTF-8 bytes
//! - byte frame: int length prefix followed by the raw bytes
//!
//! Readers return `Result` for every accessor; a truncated or malformed
//! stream surfaces as a [`StateError`] and never panics.

use thiserror::Error;

/// Errors produced while writing or (far more often) reading machine state.
#[derive(Debug, Error)]
pub enum StateError {
    /// The stream ended before the requested value.
    #[error("state stream truncated at offset {offset} (needed {needed} more bytes)")]
    Truncated { offset: usize, needed: usize },

    /// A name tag did not match the component reading the stream.
    #[error("state tag mismatch: expected {expected:?}, found {found:?}")]
    TagMismatch {
        expected: &'static str,
        found: String,
    },

    /// The state was saved for a different ROM image.
    #[error("state was saved for a different ROM (hash {found:?})")]
    RomMismatch { found: String },

    /// The state was written by an incompatible format version.
    #[error("unsupported state version {found} (expected {expected})")]
    VersionMismatch { expected: i32, found: i32 },

    /// The stream describes a different device set than is attached.
    #[error("state device count mismatch: expected {expected}, found {found}")]
    DeviceCountMismatch { expected: i32, found: i32 },

    /// A length prefix was negative or a string was not valid UTF-8.
    #[error("malformed state field: {0}")]
    Malformed(&'static str),
}

/// Byte-stream writer for machine state.
///
/// Writing is infallible; the blob is handed back with [`Serializer::into_bytes`].
#[derive(Default)]
pub struct Serializer {
    data: Vec<u8>,
}

impl Serializer {
    /// Creates an empty serializer.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Writes a bool as a single byte.
    pub fn put_bool(&mut self, value: bool) {
        self.data.push(value as u8);
    }

    /// Writes a signed 32-bit integer, little-endian.
    pub fn put_int(&mut self, value: i32) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a length-prefixed UTF-8 string.
    pub fn put_string(&mut self, value: &str) {
        self.put_int(value.len() as i32);
        self.data.extend_from_slice(value.as_bytes());
    }

    /// Writes a length-prefixed byte frame.
    pub fn put_bytes(&mut self, value: &[u8]) {
        self.put_int(value.len() as i32);
        self.data.extend_from_slice(value);
    }

    /// The serialized bytes so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the serializer, returning the blob.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Byte-stream reader over a saved state blob.
pub struct Deserializer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Deserializer<'a> {
    /// Creates a reader over the given blob.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current read offset, for diagnostics.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8], StateError> {
        if self.data.len() - self.pos < count {
            return Err(StateError::Truncated {
                offset: self.pos,
                needed: count - (self.data.len() - self.pos),
            });
        }
        let slice = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    /// Reads a bool.
    pub fn get_bool(&mut self) -> Result<bool, StateError> {
        let byte = self.take(1)?;
        Ok(byte[0] != 0)
    }

    /// Reads a signed 32-bit integer, little-endian.
    pub fn get_int(&mut self) -> Result<i32, StateError> {
        let bytes = self.take(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads a length-prefixed UTF-8 string.
    pub fn get_string(&mut self) -> Result<String, StateError> {
        let len = self.get_int()?;
        if len < 0 {
            return Err(StateError::Malformed("negative string length"));
        }
        let bytes = self.take(len as usize)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| StateError::Malformed("string is not valid UTF-8"))
    }

    /// Reads a length-prefixed byte frame.
    pub fn get_bytes(&mut self) -> Result<Vec<u8>, StateError> {
        let len = self.get_int()?;
        if len < 0 {
            return Err(StateError::Malformed("negative frame length"));
        }
        Ok(self.take(len as usize)?.to_vec())
    }

    /// Reads a name tag and checks it against the expected component name.
    pub fn expect_tag(&mut self, expected: &'static str) -> Result<(), StateError> {
        let found = self.get_string()?;
        if found != expected {
            return Err(StateError::TagMismatch { expected, found });
        }
        Ok(())
    }
}
