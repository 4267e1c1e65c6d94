use crate::{ReparseError, ReparseKind, ReparsePoint};

const LX_ABSOLUTE_PATH: &str = "/usr/bin/bash";
const LX_RELATIVE_PATH: &str = "../bin/sh";
const LX_SPECIAL_CHARS_PATH: &str = "/path/with spaces/and-special!@#$%/файл.txt";
const WINDOWS_PATH: &str = r"C:\Windows\System32";

fn round_trip(point: &ReparsePoint) -> ReparsePoint {
    let buf = point.encode().unwrap();
    super::decode(&buf).unwrap()
}

fn u16_at(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

fn u32_at(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

fn wide(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

#[test]
fn symlink_round_trip() {
    for target in [WINDOWS_PATH, r"\\server\share\dir", r"\\?\C:\very\long", r"..\sibling", "file.txt", "", "d:"] {
        let point = ReparsePoint::symlink(target);
        assert_eq!(round_trip(&point), point, "target {:?}", target);
    }
}

#[test]
fn mount_point_round_trip() {
    for target in [WINDOWS_PATH, r"\\server\share", r"\\?\Volume{0b1c2d3e}\", r"relative\dir"] {
        let point = ReparsePoint::mount_point(target);
        let decoded = round_trip(&point);
        assert_eq!(decoded, point, "target {:?}", target);
        assert!(decoded.is_mount_point());
        assert!(!decoded.is_lx_symlink());
    }
}

#[test]
fn lx_symlink_round_trip() {
    for target in [LX_ABSOLUTE_PATH, LX_RELATIVE_PATH, "", LX_SPECIAL_CHARS_PATH] {
        let point = ReparsePoint::lx_symlink(target);
        let decoded = round_trip(&point);
        assert_eq!(decoded.target, target);
        assert!(decoded.is_lx_symlink());
        assert!(!decoded.is_mount_point());
    }
}

#[test]
fn windows_symlink_is_not_lx() {
    let point = ReparsePoint::from_flags(WINDOWS_PATH, false, false).unwrap();
    let decoded = round_trip(&point);
    assert_eq!(decoded.target, WINDOWS_PATH);
    assert!(!decoded.is_lx_symlink());
    assert!(!decoded.is_mount_point());
}

#[test]
fn tags_are_exclusive() {
    for kind in [ReparseKind::MountPoint, ReparseKind::Symlink, ReparseKind::LxSymlink] {
        let buf = ReparsePoint::new("target", kind).encode().unwrap();
        assert_eq!(u32_at(&buf, 0), kind.tag());
        assert_eq!(ReparseKind::from_tag(kind.tag()), Some(kind));
        assert_eq!(super::decode(&buf).unwrap().kind, kind);
    }
}

#[test]
fn from_flags() {
    assert_eq!(
        ReparsePoint::from_flags("x", true, false).unwrap().kind,
        ReparseKind::MountPoint
    );
    assert_eq!(
        ReparsePoint::from_flags("x", false, true).unwrap().kind,
        ReparseKind::LxSymlink
    );
    assert_eq!(
        ReparsePoint::from_flags("x", true, true),
        Err(ReparseError::ConflictingFlags)
    );
}

#[test]
fn encode_absent_point() {
    assert_eq!(super::encode_reparse_point(None), Ok(None));
    let point = ReparsePoint::lx_symlink(LX_ABSOLUTE_PATH);
    assert_eq!(
        super::encode_reparse_point(Some(&point)).unwrap(),
        Some(point.encode().unwrap())
    );
}

#[test]
fn mount_point_layout() {
    let buf = ReparsePoint::mount_point(r"C:\a").encode().unwrap();
    // 8-byte header, 8-byte name header, "\??\C:\a\0" and "C:\a\0"
    assert_eq!(buf.len(), 8 + 8 + 18 + 10);
    assert_eq!(u32_at(&buf, 0), crate::IO_REPARSE_TAG_MOUNT_POINT);
    assert_eq!(u16_at(&buf, 4), 36);
    assert_eq!(u16_at(&buf, 6), 0);
    assert_eq!(u16_at(&buf, 8), 0);
    assert_eq!(u16_at(&buf, 10), 16);
    assert_eq!(u16_at(&buf, 12), 18);
    assert_eq!(u16_at(&buf, 14), 8);
    assert_eq!(&buf[16..32], &wide(r"\??\C:\a")[..]);
    assert_eq!(&buf[32..34], &[0, 0]);
    assert_eq!(&buf[34..42], &wide(r"C:\a")[..]);
    assert_eq!(&buf[42..], &[0, 0]);
}

#[test]
fn symlink_layout() {
    let buf = ReparsePoint::symlink(r"\\srv\s").encode().unwrap();
    let subst = wide(r"\??\UNC\srv\s");
    let print = wide(r"\\srv\s");
    assert_eq!(u32_at(&buf, 0), crate::IO_REPARSE_TAG_SYMLINK);
    assert_eq!(usize::from(u16_at(&buf, 4)), 12 + subst.len() + 2 + print.len() + 2);
    assert_eq!(usize::from(u16_at(&buf, 10)), subst.len());
    assert_eq!(usize::from(u16_at(&buf, 12)), subst.len() + 2);
    assert_eq!(usize::from(u16_at(&buf, 14)), print.len());
    // absolute
    assert_eq!(u32_at(&buf, 16), 0);
    assert_eq!(&buf[20..20 + subst.len()], &subst[..]);
    assert_eq!(buf.len(), 8 + usize::from(u16_at(&buf, 4)));
}

#[test]
fn relative_symlink_sets_flag() {
    let buf = ReparsePoint::symlink(r"..\x").encode().unwrap();
    assert_eq!(u16_at(&buf, 4), 32);
    assert_eq!(u32_at(&buf, 16), crate::SYMLINK_FLAG_RELATIVE);
    // The substitute name is stored verbatim.
    assert_eq!(&buf[20..28], &wide(r"..\x")[..]);
    assert_eq!(&buf[30..38], &wide(r"..\x")[..]);
}

#[test]
fn lx_symlink_layout() {
    let buf = ReparsePoint::lx_symlink(LX_ABSOLUTE_PATH).encode().unwrap();
    assert_eq!(buf.len(), 8 + 4 + LX_ABSOLUTE_PATH.len());
    assert_eq!(u32_at(&buf, 0), crate::IO_REPARSE_TAG_LX_SYMLINK);
    assert_eq!(usize::from(u16_at(&buf, 4)), 4 + LX_ABSOLUTE_PATH.len());
    assert_eq!(u16_at(&buf, 6), 0);
    assert_eq!(u32_at(&buf, 8), crate::LX_SYMLINK_VERSION);
    assert_eq!(&buf[12..], LX_ABSOLUTE_PATH.as_bytes());
}

#[test]
fn decode_reads_print_name() {
    // A junction whose substitute and print names disagree.
    let subst = wide(r"\??\D:\real");
    let print = wide(r"D:\shown");
    let mut data = Vec::new();
    data.extend_from_slice(&0u16.to_le_bytes());
    data.extend_from_slice(&(subst.len() as u16).to_le_bytes());
    data.extend_from_slice(&(subst.len() as u16 + 2).to_le_bytes());
    data.extend_from_slice(&(print.len() as u16).to_le_bytes());
    data.extend_from_slice(&subst);
    data.extend_from_slice(&[0, 0]);
    data.extend_from_slice(&print);
    data.extend_from_slice(&[0, 0]);

    let point = super::decode_data(crate::IO_REPARSE_TAG_MOUNT_POINT, &data).unwrap();
    assert_eq!(point, ReparsePoint::mount_point(r"D:\shown"));
}

#[test]
fn decode_ignores_declared_length() {
    let mut buf = ReparsePoint::symlink(WINDOWS_PATH).encode().unwrap();
    buf[4..6].copy_from_slice(&0xFFFFu16.to_le_bytes());
    assert_eq!(super::decode(&buf).unwrap().target, WINDOWS_PATH);
}

#[test]
fn decode_lx_stops_at_nul() {
    let mut buf = vec![0x1D, 0x00, 0x00, 0xA0, 10, 0, 0, 0];
    // Any version is accepted.
    buf.extend_from_slice(&3u32.to_le_bytes());
    buf.extend_from_slice(b"abc\0\0\0");
    assert_eq!(super::decode(&buf).unwrap(), ReparsePoint::lx_symlink("abc"));
}

#[test]
fn decode_lx_too_short() {
    let buf = [0x1D, 0x00, 0x00, 0xA0, 3, 0, 0, 0, 2, 0, 0];
    assert_eq!(super::decode(&buf), Err(ReparseError::LxBufferTooShort(3)));
    assert_eq!(
        super::decode_data(crate::IO_REPARSE_TAG_LX_SYMLINK, &[]),
        Err(ReparseError::LxBufferTooShort(0))
    );
}

#[test]
fn decode_unsupported_tag() {
    // IO_REPARSE_TAG_APPEXECLINK
    let buf = [0x1B, 0x00, 0x00, 0x80, 0, 0, 0, 0, 1, 2, 3, 4];
    let err = super::decode(&buf).unwrap_err();
    assert_eq!(err, ReparseError::UnsupportedTag(0x8000_001B));
    assert!(err.is_unsupported());
    assert_eq!(err.to_string(), "unsupported reparse point 8000001b");

    match super::decode_data(0xA000_0007, &[]) {
        Err(ReparseError::UnsupportedTag(0xA000_0007)) => {}
        other => panic!("expected unsupported tag, got {:?}", other),
    }
}

#[test]
fn decode_truncated_header() {
    assert_eq!(
        super::decode(&[0x03, 0x00]),
        Err(ReparseError::BufferTooShort { expected: 4, actual: 2 })
    );
    assert_eq!(
        super::decode(&[0x03, 0x00, 0x00, 0xA0, 0, 0]),
        Err(ReparseError::BufferTooShort { expected: 8, actual: 6 })
    );
    // Symlink data without room for `Flags`.
    let err = super::decode_data(crate::IO_REPARSE_TAG_SYMLINK, &[0; 8]).unwrap_err();
    assert_eq!(err, ReparseError::BufferTooShort { expected: 12, actual: 8 });
    assert!(!err.is_unsupported());
}

#[test]
fn decode_name_out_of_bounds() {
    let data = [0, 0, 0, 0, 0, 0, 100, 0];
    assert_eq!(
        super::decode_data(crate::IO_REPARSE_TAG_MOUNT_POINT, &data),
        Err(ReparseError::NameOutOfBounds {
            offset: 8,
            length: 100,
            available: 8
        })
    );

    let mut buf = ReparsePoint::symlink(WINDOWS_PATH).encode().unwrap();
    buf.truncate(buf.len() - 4);
    match super::decode(&buf) {
        Err(ReparseError::NameOutOfBounds { .. }) => {}
        other => panic!("expected out of bounds name, got {:?}", other),
    }
}

#[test]
fn encode_too_long() {
    let max = crate::MAXIMUM_REPARSE_DATA_BUFFER_SIZE as usize - 8;

    let fits = ReparsePoint::lx_symlink("a".repeat(max - 4));
    assert_eq!(fits.encode().unwrap().len(), crate::MAXIMUM_REPARSE_DATA_BUFFER_SIZE as usize);

    let too_long = ReparsePoint::lx_symlink("a".repeat(max - 3));
    assert_eq!(too_long.encode(), Err(ReparseError::TargetTooLong { length: max + 1, max }));

    match ReparsePoint::symlink(format!(r"C:\{}", "a".repeat(5000))).encode() {
        Err(ReparseError::TargetTooLong { .. }) => {}
        other => panic!("expected too long, got {:?}", other),
    }
}
