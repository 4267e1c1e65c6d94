mod utf16;

pub use self::utf16::{decode_utf16_le, encode_utf16_nul};

use crate::error::{ReparseError, Result};

/// Tells NTFS to treat the rest of the path as a non-interpreted NT path.
const NON_INTERPRETED_PATH_PREFIX: &str = r"\??\";
/// Win32 long path prefix, the Win32 spelling of `\??\`.
const LONG_PATH_PREFIX: &str = r"\\?\";
const UNC_PREFIX: &str = r"\\";
const NT_UNC_PREFIX: &str = r"\??\UNC\";

pub fn read_u16_le(buf: &[u8], at: usize) -> Result<u16> {
    let bytes = field(buf, at, 2)?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

pub fn read_u32_le(buf: &[u8], at: usize) -> Result<u32> {
    let bytes = field(buf, at, 4)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn field(buf: &[u8], at: usize, len: usize) -> Result<&[u8]> {
    buf.get(at..at + len).ok_or(ReparseError::BufferTooShort {
        expected: at + len,
        actual: buf.len(),
    })
}

/// Slices a counted name out of the reparse data.
pub fn name_slice(data: &[u8], offset: usize, length: usize) -> Result<&[u8]> {
    offset
        .checked_add(length)
        .and_then(|end| data.get(offset..end))
        .ok_or(ReparseError::NameOutOfBounds {
            offset,
            length,
            available: data.len(),
        })
}

/// Rewrites a Win32 path into the NT namespace form the filesystem resolves.
///
/// Returns the NT path and whether the path is relative. Relative paths are
/// stored as-is.
pub fn nt_path(target: &str) -> (String, bool) {
    if let Some(rest) = target.strip_prefix(LONG_PATH_PREFIX) {
        (format!("{}{}", NON_INTERPRETED_PATH_PREFIX, rest), false)
    } else if let Some(rest) = target.strip_prefix(UNC_PREFIX) {
        (format!("{}{}", NT_UNC_PREFIX, rest), false)
    } else if has_drive_letter(target) {
        (format!("{}{}", NON_INTERPRETED_PATH_PREFIX, target), false)
    } else {
        (target.to_owned(), true)
    }
}

// In case of "C:" or "c:\foo\bar"
fn has_drive_letter(path: &str) -> bool {
    match path.as_bytes() {
        [drive, b':', ..] => drive.is_ascii_alphabetic(),
        _ => false,
    }
}
