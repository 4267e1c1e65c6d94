/// Encodes `s` as UTF-16 with a trailing `UNICODE_NULL`.
///
/// Reparse names are counted strings, but the filesystem still expects the
/// terminator to be physically present.
pub fn encode_utf16_nul(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Decodes little-endian UTF-16 bytes, replacing unpaired surrogates.
/// A trailing odd byte is ignored.
pub fn decode_utf16_le(bytes: &[u8]) -> String {
    let wide: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();
    String::from_utf16_lossy(&wide)
}
