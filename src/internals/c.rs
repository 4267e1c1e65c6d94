//! Wire constants of the reparse data buffer.
//!
//! The filesystem hands out and accepts the buffer as raw little-endian
//! bytes, so fields are addressed by byte offset rather than through a
//! `#[repr(C)]` overlay.

/// Reparse tag of a mount point (junction).
pub const IO_REPARSE_TAG_MOUNT_POINT: u32 = 0xA000_0003;
/// Reparse tag of a native NTFS symbolic link.
pub const IO_REPARSE_TAG_SYMLINK: u32 = 0xA000_000C;
/// Reparse tag of a symlink created by the Linux subsystem (WSL, MSYS2).
pub const IO_REPARSE_TAG_LX_SYMLINK: u32 = 0xA000_001D;

/// Largest buffer the filesystem accepts for a single reparse point.
pub const MAXIMUM_REPARSE_DATA_BUFFER_SIZE: u32 = 16 * 1024;

/// Reparse Data Buffer header size: `ReparseTag`, `ReparseDataLength`, `Reserved`.
pub const REPARSE_DATA_BUFFER_HEADER_SIZE: u16 = 8;
/// MountPointReparseBuffer header size: four 16-bit name offsets and lengths.
pub const MOUNT_POINT_REPARSE_BUFFER_HEADER_SIZE: u16 = 8;
/// SymbolicLinkReparseBuffer header size: the mount point header plus `Flags`.
pub const SYMLINK_REPARSE_BUFFER_HEADER_SIZE: u16 = MOUNT_POINT_REPARSE_BUFFER_HEADER_SIZE + 4;
/// LX symlink header size: the 32-bit format version.
pub const LX_SYMLINK_REPARSE_BUFFER_HEADER_SIZE: u16 = 4;

/// Version written into new LX symlinks.
pub const LX_SYMLINK_VERSION: u32 = 2;

/// `Flags` bit marking a symlink whose substitute name is relative.
pub const SYMLINK_FLAG_RELATIVE: u32 = 0x0000_0001;

// Byte offsets into the buffer that starts at `ReparseTag`.
pub const REPARSE_TAG_OFFSET: usize = 0;
pub const REPARSE_DATA_LENGTH_OFFSET: usize = 4;
pub const RESERVED_OFFSET: usize = 6;

// Byte offsets into the data that follows `Reserved`.
pub const SUBSTITUTE_NAME_OFFSET_OFFSET: usize = 0;
pub const SUBSTITUTE_NAME_LENGTH_OFFSET: usize = 2;
pub const PRINT_NAME_OFFSET_OFFSET: usize = 4;
pub const PRINT_NAME_LENGTH_OFFSET: usize = 6;
pub const SYMLINK_FLAGS_OFFSET: usize = 8;

/// Size of one UTF-16 code unit.
pub const WCHAR_SIZE: u16 = std::mem::size_of::<u16>() as _;

// Keep the hand-written values honest against the Windows SDK.
#[cfg(windows)]
#[allow(clippy::no_effect)]
const _: () = {
    use windows_sys::Win32::Storage::FileSystem as fs;
    use windows_sys::Win32::System::SystemServices as ss;

    [(); 1][!(ss::IO_REPARSE_TAG_MOUNT_POINT == IO_REPARSE_TAG_MOUNT_POINT) as usize];
    [(); 1][!(ss::IO_REPARSE_TAG_SYMLINK == IO_REPARSE_TAG_SYMLINK) as usize];
    [(); 1][!(ss::IO_REPARSE_TAG_LX_SYMLINK == IO_REPARSE_TAG_LX_SYMLINK) as usize];
    [(); 1][!(fs::MAXIMUM_REPARSE_DATA_BUFFER_SIZE == MAXIMUM_REPARSE_DATA_BUFFER_SIZE) as usize];
};

#[allow(clippy::no_effect)]
const _: () = {
    [(); 1][!(PRINT_NAME_LENGTH_OFFSET + 2 == MOUNT_POINT_REPARSE_BUFFER_HEADER_SIZE as usize) as usize];
    [(); 1][!(SYMLINK_FLAGS_OFFSET + 4 == SYMLINK_REPARSE_BUFFER_HEADER_SIZE as usize) as usize];
    [(); 1][!(RESERVED_OFFSET + 2 == REPARSE_DATA_BUFFER_HEADER_SIZE as usize) as usize];
};
