//! Library for encoding and decoding NTFS reparse point buffers.
//!
//! A reparse point is the piece of filesystem metadata behind symbolic links and
//! junctions (mount points). The filesystem driver stores it as a
//! `REPARSE_DATA_BUFFER`: a 32-bit tag, a 16-bit data length, a reserved word and
//! a payload whose layout depends on the tag. This crate understands three tags:
//!
//! * `IO_REPARSE_TAG_MOUNT_POINT`, the junction created by `mklink /J`,
//! * `IO_REPARSE_TAG_SYMLINK`, the native symlink created by `mklink`,
//! * `IO_REPARSE_TAG_LX_SYMLINK`, the symlink created by WSL or MSYS2, which stores
//!   a UTF-8 POSIX path instead of a pair of UTF-16 names.
//!
//! Reading the buffer from a file (`FSCTL_GET_REPARSE_POINT`) or writing it back
//! (`FSCTL_SET_REPARSE_POINT`) is left to the caller. The codec itself is plain
//! byte shuffling and builds on every platform.
//!
//! # Example
//!
//! ```rust
//! use reparse::ReparsePoint;
//!
//! fn main() -> reparse::Result<()> {
//!     let link = ReparsePoint::symlink(r"C:\Windows\System32");
//!     let buf = link.encode()?;
//!     assert_eq!(reparse::decode(&buf)?, link);
//!     Ok(())
//! }
//! ```
#![deny(rust_2018_idioms)]

mod error;
mod internals;

pub use crate::error::{ReparseError, Result};
pub use crate::internals::{
    IO_REPARSE_TAG_LX_SYMLINK, IO_REPARSE_TAG_MOUNT_POINT, IO_REPARSE_TAG_SYMLINK, LX_SYMLINK_VERSION,
    MAXIMUM_REPARSE_DATA_BUFFER_SIZE, SYMLINK_FLAG_RELATIVE,
};

/// The kind of link a reparse point describes. Each kind has its own tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReparseKind {
    /// A junction, tagged `IO_REPARSE_TAG_MOUNT_POINT`.
    MountPoint,
    /// A native symbolic link, tagged `IO_REPARSE_TAG_SYMLINK`.
    Symlink,
    /// A WSL/MSYS2 native symlink, tagged `IO_REPARSE_TAG_LX_SYMLINK`.
    LxSymlink,
}

impl ReparseKind {
    /// Maps a reparse tag to the kind it stores, or `None` for tags this crate does not handle.
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            IO_REPARSE_TAG_MOUNT_POINT => Some(ReparseKind::MountPoint),
            IO_REPARSE_TAG_SYMLINK => Some(ReparseKind::Symlink),
            IO_REPARSE_TAG_LX_SYMLINK => Some(ReparseKind::LxSymlink),
            _ => None,
        }
    }

    /// The reparse tag this kind is encoded with.
    pub fn tag(self) -> u32 {
        match self {
            ReparseKind::MountPoint => IO_REPARSE_TAG_MOUNT_POINT,
            ReparseKind::Symlink => IO_REPARSE_TAG_SYMLINK,
            ReparseKind::LxSymlink => IO_REPARSE_TAG_LX_SYMLINK,
        }
    }
}

/// A decoded symlink, mount point or LX symlink.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReparsePoint {
    /// Path the link points to.
    ///
    /// For mount points and symlinks this is a Win32 path: absolute (`C:\foo`),
    /// UNC (`\\server\share`), long (`\\?\C:\foo`) or relative. For LX symlinks
    /// it is whatever the Linux side stored, usually a POSIX path.
    pub target: String,
    /// What kind of reparse point this is.
    pub kind: ReparseKind,
}

impl ReparsePoint {
    pub fn new(target: impl Into<String>, kind: ReparseKind) -> Self {
        ReparsePoint {
            target: target.into(),
            kind,
        }
    }

    pub fn mount_point(target: impl Into<String>) -> Self {
        Self::new(target, ReparseKind::MountPoint)
    }

    pub fn symlink(target: impl Into<String>) -> Self {
        Self::new(target, ReparseKind::Symlink)
    }

    pub fn lx_symlink(target: impl Into<String>) -> Self {
        Self::new(target, ReparseKind::LxSymlink)
    }

    /// Builds a reparse point from the flag pair used by Win32 tooling.
    ///
    /// LX symlinks have no mount point form, so setting both flags is rejected
    /// with [`ReparseError::ConflictingFlags`].
    pub fn from_flags(target: impl Into<String>, is_mount_point: bool, is_lx_symlink: bool) -> Result<Self> {
        let kind = match (is_mount_point, is_lx_symlink) {
            (true, true) => return Err(ReparseError::ConflictingFlags),
            (true, false) => ReparseKind::MountPoint,
            (false, true) => ReparseKind::LxSymlink,
            (false, false) => ReparseKind::Symlink,
        };
        Ok(Self::new(target, kind))
    }

    pub fn is_mount_point(&self) -> bool {
        self.kind == ReparseKind::MountPoint
    }

    pub fn is_lx_symlink(&self) -> bool {
        self.kind == ReparseKind::LxSymlink
    }

    /// The reparse tag this point is encoded with.
    pub fn tag(&self) -> u32 {
        self.kind.tag()
    }

    /// Encodes this reparse point. See [`encode`].
    pub fn encode(&self) -> Result<Vec<u8>> {
        encode(self)
    }
}

/// Decodes a `REPARSE_DATA_BUFFER` holding a mount point, symlink or LX symlink.
///
/// Buffers with any other tag fail with [`ReparseError::UnsupportedTag`] carrying
/// the tag, so callers can tell "not a link" apart from a malformed buffer.
///
/// For mount points and symlinks the target is the print name, the path as it
/// was given when the link was created, not the `\??\` NT form.
///
/// # Example
///
/// ```rust
/// use reparse::{ReparseError, ReparsePoint};
///
/// let buf = ReparsePoint::lx_symlink("/usr/bin/bash").encode().unwrap();
/// let point = reparse::decode(&buf).unwrap();
/// assert!(point.is_lx_symlink());
/// assert_eq!(point.target, "/usr/bin/bash");
///
/// // IO_REPARSE_TAG_DEDUP
/// let dedup = [0x13, 0x00, 0x00, 0x80, 0, 0, 0, 0];
/// assert_eq!(reparse::decode(&dedup), Err(ReparseError::UnsupportedTag(0x8000_0013)));
/// ```
pub fn decode(buf: &[u8]) -> Result<ReparsePoint> {
    crate::internals::decode(buf)
}

/// Decodes reparse data whose 8-byte header was already split off.
///
/// `data` starts right after the `Reserved` field of the `REPARSE_DATA_BUFFER`.
pub fn decode_data(tag: u32, data: &[u8]) -> Result<ReparsePoint> {
    crate::internals::decode_data(tag, data)
}

/// Encodes a reparse point into a `REPARSE_DATA_BUFFER` ready for `FSCTL_SET_REPARSE_POINT`.
///
/// Mount points and symlinks store the target twice: rewritten into the NT
/// namespace (`C:\foo` becomes `\??\C:\foo`, `\\server\share` becomes
/// `\??\UNC\server\share`) as the substitute name, and unchanged as the print
/// name. Relative symlinks keep their path and set [`SYMLINK_FLAG_RELATIVE`].
///
/// Fails only when the target does not fit in [`MAXIMUM_REPARSE_DATA_BUFFER_SIZE`].
pub fn encode(point: &ReparsePoint) -> Result<Vec<u8>> {
    crate::internals::encode(point)
}

/// Like [`encode`], but passes an absent reparse point through as an absent buffer.
pub fn encode_reparse_point(point: Option<&ReparsePoint>) -> Result<Option<Vec<u8>>> {
    point.map(encode).transpose()
}

/// Rewrites a Win32 path into the NT namespace form stored as a substitute name.
///
/// Returns the rewritten path and whether it is relative.
///
/// # Example
///
/// ```rust
/// assert_eq!(reparse::nt_target(r"\\server\share"), (r"\??\UNC\server\share".to_owned(), false));
/// assert_eq!(reparse::nt_target(r"..\lib"), (r"..\lib".to_owned(), true));
/// ```
pub fn nt_target(target: &str) -> (String, bool) {
    crate::internals::nt_path(target)
}

#[cfg(test)]
mod tests;
