/// Errors returned while decoding or encoding a reparse data buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReparseError {
    /// The reparse tag is not a mount point, symlink or LX symlink.
    #[error("unsupported reparse point {0:x}")]
    UnsupportedTag(u32),
    /// The buffer ends before a fixed-size header does.
    #[error("reparse buffer too short: expected at least {expected} bytes, got {actual}")]
    BufferTooShort {
        /// Bytes required by the header.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },
    /// The LX symlink data has no room for its version field.
    #[error("LX symlink buffer too short: {0} bytes")]
    LxBufferTooShort(usize),
    /// A name's declared offset and length reach past the end of the buffer.
    #[error("reparse name at offset {offset} with length {length} exceeds {available} bytes of data")]
    NameOutOfBounds {
        /// Offset of the name within the reparse data.
        offset: usize,
        /// Declared length of the name in bytes.
        length: usize,
        /// Bytes of reparse data available.
        available: usize,
    },
    /// A value was described as both a mount point and an LX symlink.
    #[error("a reparse point cannot be both a mount point and an LX symlink")]
    ConflictingFlags,
    /// The encoded reparse data would not fit in a reparse buffer.
    #[error("`target` is too long: {length} bytes of reparse data, at most {max} allowed")]
    TargetTooLong {
        /// Bytes of reparse data the value needs.
        length: usize,
        /// Bytes of reparse data a buffer can hold.
        max: usize,
    },
}

impl ReparseError {
    /// Returns `true` when the buffer is well formed but carries a tag this crate does not handle.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, ReparseError::UnsupportedTag(_))
    }
}

/// Result type used throughout the crate.
pub type Result<T, E = ReparseError> = std::result::Result<T, E>;
