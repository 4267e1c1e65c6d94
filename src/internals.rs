mod buffer;
mod c;
mod helpers;

pub use self::c::{
    IO_REPARSE_TAG_LX_SYMLINK, IO_REPARSE_TAG_MOUNT_POINT, IO_REPARSE_TAG_SYMLINK, LX_SYMLINK_VERSION,
    MAXIMUM_REPARSE_DATA_BUFFER_SIZE, SYMLINK_FLAG_RELATIVE,
};
pub use self::helpers::nt_path;

use self::buffer::ReparseBuffer;
use self::c::{
    LX_SYMLINK_REPARSE_BUFFER_HEADER_SIZE, MOUNT_POINT_REPARSE_BUFFER_HEADER_SIZE, PRINT_NAME_LENGTH_OFFSET,
    PRINT_NAME_OFFSET_OFFSET, REPARSE_DATA_BUFFER_HEADER_SIZE, REPARSE_DATA_LENGTH_OFFSET, REPARSE_TAG_OFFSET,
    SUBSTITUTE_NAME_LENGTH_OFFSET, SUBSTITUTE_NAME_OFFSET_OFFSET, SYMLINK_FLAGS_OFFSET,
    SYMLINK_REPARSE_BUFFER_HEADER_SIZE, WCHAR_SIZE,
};
use self::helpers::{decode_utf16_le, encode_utf16_nul, name_slice, read_u16_le, read_u32_le};
use crate::error::{ReparseError, Result};
use crate::{ReparseKind, ReparsePoint};

/// Bytes of reparse data a single buffer can carry after its 8-byte header.
const MAX_REPARSE_DATA_LENGTH: usize =
    MAXIMUM_REPARSE_DATA_BUFFER_SIZE as usize - REPARSE_DATA_BUFFER_HEADER_SIZE as usize;

pub fn decode(buf: &[u8]) -> Result<ReparsePoint> {
    let tag = read_u32_le(buf, REPARSE_TAG_OFFSET)?;
    let kind = ReparseKind::from_tag(tag).ok_or_else(|| unsupported(tag))?;
    let declared = read_u16_le(buf, REPARSE_DATA_LENGTH_OFFSET)?;
    // `ReparseDataLength` is informational only; the names are located by their own offsets.
    tracing::trace!(tag, declared, len = buf.len(), "decoding reparse point");
    let header_size = usize::from(REPARSE_DATA_BUFFER_HEADER_SIZE);
    let data = buf.get(header_size..).ok_or(ReparseError::BufferTooShort {
        expected: header_size,
        actual: buf.len(),
    })?;
    decode_kind(kind, data)
}

pub fn decode_data(tag: u32, data: &[u8]) -> Result<ReparsePoint> {
    let kind = ReparseKind::from_tag(tag).ok_or_else(|| unsupported(tag))?;
    decode_kind(kind, data)
}

fn unsupported(tag: u32) -> ReparseError {
    tracing::debug!(tag, "unsupported reparse tag");
    ReparseError::UnsupportedTag(tag)
}

fn decode_kind(kind: ReparseKind, data: &[u8]) -> Result<ReparsePoint> {
    let decoded = match kind {
        ReparseKind::MountPoint | ReparseKind::Symlink => decode_name_data(kind, data),
        ReparseKind::LxSymlink => decode_lx_data(data),
    };
    if let Err(ref err) = decoded {
        tracing::debug!(?kind, error = %err, "malformed reparse data");
    }
    decoded
}

// The name read is the one described by the second offset/length pair, the
// display form written next to the NT form. It spells the path the way the
// caller handed it to `encode`.
fn decode_name_data(kind: ReparseKind, data: &[u8]) -> Result<ReparsePoint> {
    let header_size = if kind == ReparseKind::Symlink {
        let flags = read_u32_le(data, SYMLINK_FLAGS_OFFSET)?;
        tracing::trace!(flags, "symlink flags");
        SYMLINK_REPARSE_BUFFER_HEADER_SIZE
    } else {
        MOUNT_POINT_REPARSE_BUFFER_HEADER_SIZE
    };
    let offset = usize::from(header_size) + usize::from(read_u16_le(data, PRINT_NAME_OFFSET_OFFSET)?);
    let length = usize::from(read_u16_le(data, PRINT_NAME_LENGTH_OFFSET)?);
    let name = name_slice(data, offset, length)?;
    Ok(ReparsePoint {
        target: decode_utf16_le(name),
        kind,
    })
}

fn decode_lx_data(data: &[u8]) -> Result<ReparsePoint> {
    // The version is not checked: later versions keep the same layout.
    let target = data
        .get(usize::from(LX_SYMLINK_REPARSE_BUFFER_HEADER_SIZE)..)
        .ok_or(ReparseError::LxBufferTooShort(data.len()))?;
    // Stop at the first NUL; trailing padding is not part of the target.
    let end = target.iter().position(|&b| b == 0).unwrap_or(target.len());
    Ok(ReparsePoint {
        target: String::from_utf8_lossy(&target[..end]).into_owned(),
        kind: ReparseKind::LxSymlink,
    })
}

pub fn encode(point: &ReparsePoint) -> Result<Vec<u8>> {
    let buf = match point.kind {
        ReparseKind::LxSymlink => encode_lx(&point.target)?,
        ReparseKind::MountPoint | ReparseKind::Symlink => encode_name_data(point.kind, &point.target)?,
    };
    tracing::trace!(kind = ?point.kind, len = buf.len(), "encoded reparse point");
    Ok(buf)
}

fn encode_lx(target: &str) -> Result<Vec<u8>> {
    let header_size = usize::from(LX_SYMLINK_REPARSE_BUFFER_HEADER_SIZE);
    let data_len = checked_data_len(header_size + target.len())?;
    let mut buf = ReparseBuffer::new(IO_REPARSE_TAG_LX_SYMLINK, data_len);
    buf.put_data_u32(0, LX_SYMLINK_VERSION);
    // No terminator and no padding.
    buf.put_data_bytes(header_size, target.as_bytes());
    Ok(buf.into_vec())
}

fn encode_name_data(kind: ReparseKind, target: &str) -> Result<Vec<u8>> {
    let (nt_target, relative) = nt_path(target);

    // The names must be NUL-terminated even though they are counted strings.
    let print_wide = encode_utf16_nul(target);
    let subst_wide = encode_utf16_nul(&nt_target);
    let subst_size = subst_wide.len() * usize::from(WCHAR_SIZE);
    let print_size = print_wide.len() * usize::from(WCHAR_SIZE);

    let (tag, header_size) = match kind {
        ReparseKind::MountPoint => (IO_REPARSE_TAG_MOUNT_POINT, MOUNT_POINT_REPARSE_BUFFER_HEADER_SIZE),
        _ => (IO_REPARSE_TAG_SYMLINK, SYMLINK_REPARSE_BUFFER_HEADER_SIZE),
    };
    let header_size = usize::from(header_size);
    let data_len = checked_data_len(header_size + subst_size + print_size)?;
    // Every name size below is smaller than `data_len`, so the casts cannot truncate.
    let unicode_null_size = usize::from(WCHAR_SIZE);

    let mut buf = ReparseBuffer::new(tag, data_len);
    // The substitute name comes first, right after the header.
    buf.put_data_u16(SUBSTITUTE_NAME_OFFSET_OFFSET, 0);
    buf.put_data_u16(SUBSTITUTE_NAME_LENGTH_OFFSET, (subst_size - unicode_null_size) as u16);
    buf.put_data_u16(PRINT_NAME_OFFSET_OFFSET, subst_size as u16);
    buf.put_data_u16(PRINT_NAME_LENGTH_OFFSET, (print_size - unicode_null_size) as u16);
    if kind == ReparseKind::Symlink {
        let flags = if relative { SYMLINK_FLAG_RELATIVE } else { 0 };
        buf.put_data_u32(SYMLINK_FLAGS_OFFSET, flags);
    }
    let written = buf.put_data_wide(header_size, &subst_wide);
    buf.put_data_wide(header_size + written, &print_wide);
    Ok(buf.into_vec())
}

fn checked_data_len(length: usize) -> Result<u16> {
    if length > MAX_REPARSE_DATA_LENGTH {
        tracing::debug!(length, max = MAX_REPARSE_DATA_LENGTH, "reparse data too long");
        return Err(ReparseError::TargetTooLong {
            length,
            max: MAX_REPARSE_DATA_LENGTH,
        });
    }
    Ok(length as u16)
}
