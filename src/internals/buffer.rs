use super::c::REPARSE_DATA_BUFFER_HEADER_SIZE;

/// A zeroed reparse data buffer that fields are written into by byte offset.
///
/// `put_data_*` offsets are relative to the reparse data, which starts right
/// after `Reserved`.
pub struct ReparseBuffer {
    bytes: Vec<u8>,
}

impl ReparseBuffer {
    /// Allocates the 8-byte header plus `data_len` bytes of reparse data.
    pub fn new(tag: u32, data_len: u16) -> Self {
        let total = usize::from(REPARSE_DATA_BUFFER_HEADER_SIZE) + usize::from(data_len);
        let mut buf = ReparseBuffer { bytes: vec![0; total] };
        buf.put_u32(super::c::REPARSE_TAG_OFFSET, tag);
        buf.put_u16(super::c::REPARSE_DATA_LENGTH_OFFSET, data_len);
        // `Reserved` stays zero.
        buf
    }

    pub fn put_data_u16(&mut self, at: usize, value: u16) {
        self.put_u16(Self::data_offset(at), value);
    }

    pub fn put_data_u32(&mut self, at: usize, value: u32) {
        self.put_u32(Self::data_offset(at), value);
    }

    pub fn put_data_bytes(&mut self, at: usize, bytes: &[u8]) {
        let at = Self::data_offset(at);
        self.bytes[at..at + bytes.len()].copy_from_slice(bytes);
    }

    /// Writes UTF-16 units little-endian and returns the bytes written.
    pub fn put_data_wide(&mut self, at: usize, wide: &[u16]) -> usize {
        let start = Self::data_offset(at);
        for (i, unit) in wide.iter().enumerate() {
            let pos = start + i * 2;
            self.bytes[pos..pos + 2].copy_from_slice(&unit.to_le_bytes());
        }
        wide.len() * 2
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    fn put_u16(&mut self, at: usize, value: u16) {
        self.bytes[at..at + 2].copy_from_slice(&value.to_le_bytes());
    }

    fn put_u32(&mut self, at: usize, value: u32) {
        self.bytes[at..at + 4].copy_from_slice(&value.to_le_bytes());
    }

    fn data_offset(at: usize) -> usize {
        usize::from(REPARSE_DATA_BUFFER_HEADER_SIZE) + at
    }
}
