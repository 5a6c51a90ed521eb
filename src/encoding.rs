//! The encoding variant enumeration and its lookup keys.
//!
//! An [`Encoding`] names one concrete codec configuration: the base format
//! plus the full set of behavioural switches (CESU surrogate pairs, the
//! Java NUL, UCS-2/UCS-4 range limits, strictness, coalescing and
//! endianness).  The handler operations dispatch on it by matching; the
//! variants carry no data.

use crate::Unicode;

/// The abstract encoding families, as a byte order mark can identify them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    /// UTF-8 in any variant.
    Utf8,
    /// Little-endian UTF-16.
    Utf16Le,
    /// Big-endian UTF-16.
    Utf16Be,
    /// Little-endian UTF-32.
    Utf32Le,
    /// Big-endian UTF-32.
    Utf32Be,
    /// Non-UTF or unidentified.
    Other,
}

/// Lookup keys for the non-UTF and non-strict encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OtherEncoding {
    /// Java style modified UTF-8.
    JUtf8,
    /// ISO-8859-1, 8-bit direct bytes.
    Iso8859_1,
    /// Strict 7-bit ASCII.
    Ascii,
    /// Windows code page 1252.
    Cp1252,
}

/// Every encoding variant the crate can handle.
///
/// The suffixes follow the usual conventions: `Ns` is the non-skipping
/// variant (one byte per decode failure, no coalescing), `St` the strict
/// variant (irregular forms fail and failures consume one byte), `J` the
/// Java style modified UTF-8, `Cesu` the surrogate-pair compatibility
/// scheme, and `Le`/`Be` the endianness of multi-byte code-units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// UTF-8, permissive and coalescing.
    Utf8,
    /// UTF-8, non-skipping.
    Utf8Ns,
    /// UTF-8, strict.
    Utf8St,
    /// Java style UTF-8, permissive and coalescing.
    JUtf8,
    /// Java style UTF-8, non-skipping.
    JUtf8Ns,
    /// Java style UTF-8, strict.
    JUtf8St,
    /// CESU-8, permissive and coalescing.
    Cesu8,
    /// CESU-8, non-skipping.
    Cesu8Ns,
    /// CESU-8, strict.
    Cesu8St,
    /// Java style CESU-8, permissive and coalescing.
    JCesu8,
    /// Java style CESU-8, non-skipping.
    JCesu8Ns,
    /// Java style CESU-8, strict.
    JCesu8St,
    /// UTF-16, little endian.
    Utf16Le,
    /// UTF-16, big endian.
    Utf16Be,
    /// UCS-2, little endian.
    Ucs2Le,
    /// UCS-2, big endian.
    Ucs2Be,
    /// UTF-32, little endian.
    Utf32Le,
    /// UTF-32, big endian.
    Utf32Be,
    /// UCS-4, little endian.
    Ucs4Le,
    /// UCS-4, big endian.
    Ucs4Be,
    /// CESU UTF-32, little endian.
    Cesu32Le,
    /// CESU UTF-32, big endian.
    Cesu32Be,
    /// CESU UCS-4, little endian.
    Cesu4Le,
    /// CESU UCS-4, big endian.
    Cesu4Be,
    /// ISO-8859-1 bytes, coalescing.
    Byte,
    /// ISO-8859-1 bytes, non-skipping.
    ByteNs,
    /// 7-bit ASCII, coalescing.
    Ascii,
    /// 7-bit ASCII, non-skipping.
    AsciiNs,
    /// Windows code page 1252, permissive and coalescing.
    Cp1252,
    /// Windows code page 1252, non-skipping.
    Cp1252Ns,
    /// Windows code page 1252, strict.
    Cp1252St,
}

impl Encoding {
    /// The family this variant belongs to.
    pub const fn family(self) -> Family {
        match self {
            Encoding::Utf8
            | Encoding::Utf8Ns
            | Encoding::Utf8St
            | Encoding::JUtf8
            | Encoding::JUtf8Ns
            | Encoding::JUtf8St
            | Encoding::Cesu8
            | Encoding::Cesu8Ns
            | Encoding::Cesu8St
            | Encoding::JCesu8
            | Encoding::JCesu8Ns
            | Encoding::JCesu8St => Family::Utf8,
            Encoding::Utf16Le | Encoding::Ucs2Le => Family::Utf16Le,
            Encoding::Utf16Be | Encoding::Ucs2Be => Family::Utf16Be,
            Encoding::Utf32Le | Encoding::Ucs4Le | Encoding::Cesu32Le | Encoding::Cesu4Le => {
                Family::Utf32Le
            }
            Encoding::Utf32Be | Encoding::Ucs4Be | Encoding::Cesu32Be | Encoding::Cesu4Be => {
                Family::Utf32Be
            }
            Encoding::Byte
            | Encoding::ByteNs
            | Encoding::Ascii
            | Encoding::AsciiNs
            | Encoding::Cp1252
            | Encoding::Cp1252Ns
            | Encoding::Cp1252St => Family::Other,
        }
    }

    /// The code-unit size in bytes: 1, 2 or 4.
    pub const fn unit_size(self) -> usize {
        match self.family() {
            Family::Utf16Le | Family::Utf16Be => 2,
            Family::Utf32Le | Family::Utf32Be => 4,
            _ => 1,
        }
    }

    /// The default variant for a family: the strict UTF-8 decoders for
    /// UTF-8, the plain codec for the unit formats, and the Java style
    /// strict UTF-8 for anything unidentified.
    pub const fn from_family(family: Family) -> Encoding {
        match family {
            Family::Utf8 => Encoding::Utf8St,
            Family::Utf16Le => Encoding::Utf16Le,
            Family::Utf16Be => Encoding::Utf16Be,
            Family::Utf32Le => Encoding::Utf32Le,
            Family::Utf32Be => Encoding::Utf32Be,
            Family::Other => Encoding::JUtf8St,
        }
    }

    /// The default variant for the non-UTF lookup keys.
    pub const fn from_other(other: OtherEncoding) -> Encoding {
        match other {
            OtherEncoding::JUtf8 => Encoding::JUtf8St,
            OtherEncoding::Iso8859_1 => Encoding::ByteNs,
            OtherEncoding::Ascii => Encoding::AsciiNs,
            OtherEncoding::Cp1252 => Encoding::Cp1252St,
        }
    }

    /// CESU surrogate pairs enabled.
    pub(crate) const fn cesu(self) -> bool {
        matches!(
            self,
            Encoding::Cesu8
                | Encoding::Cesu8Ns
                | Encoding::Cesu8St
                | Encoding::JCesu8
                | Encoding::JCesu8Ns
                | Encoding::JCesu8St
                | Encoding::Cesu32Le
                | Encoding::Cesu32Be
                | Encoding::Cesu4Le
                | Encoding::Cesu4Be
        )
    }

    /// Java style modified NUL enabled.
    pub(crate) const fn java(self) -> bool {
        matches!(
            self,
            Encoding::JUtf8
                | Encoding::JUtf8Ns
                | Encoding::JUtf8St
                | Encoding::JCesu8
                | Encoding::JCesu8Ns
                | Encoding::JCesu8St
        )
    }

    /// Strict decoding: irregular forms fail and failures take one byte.
    pub(crate) const fn strict(self) -> bool {
        matches!(
            self,
            Encoding::Utf8St
                | Encoding::JUtf8St
                | Encoding::Cesu8St
                | Encoding::JCesu8St
                | Encoding::Cp1252St
        )
    }

    /// Coalescing of adjacent invalid bytes into one code-point.
    pub(crate) const fn coalesce(self) -> bool {
        matches!(
            self,
            Encoding::Utf8
                | Encoding::JUtf8
                | Encoding::Cesu8
                | Encoding::JCesu8
                | Encoding::Byte
                | Encoding::Ascii
                | Encoding::Cp1252
        )
    }

    /// Scalar range restricted to the basic multilingual plane.
    pub(crate) const fn ucs2(self) -> bool {
        matches!(self, Encoding::Ucs2Le | Encoding::Ucs2Be)
    }

    /// Scalar range extended to the full 31 bits.
    pub(crate) const fn ucs4(self) -> bool {
        matches!(
            self,
            Encoding::Ucs4Le | Encoding::Ucs4Be | Encoding::Cesu4Le | Encoding::Cesu4Be
        )
    }

    /// Byte decoding limited to 7 bits.
    pub(crate) const fn ascii(self) -> bool {
        matches!(self, Encoding::Ascii | Encoding::AsciiNs)
    }

    /// Returns the encoded length of `unicode` in this variant, or 0 when
    /// the value is not encodable.
    pub fn len(self, unicode: Unicode) -> usize {
        match self.family() {
            Family::Utf8 => crate::len_utf8(unicode, self.cesu(), self.java()),
            Family::Utf16Le | Family::Utf16Be => crate::len_utf16(unicode, self.ucs2()),
            Family::Utf32Le | Family::Utf32Be => {
                crate::len_utf32(unicode, self.cesu(), self.ucs4())
            }
            Family::Other => match self {
                Encoding::Cp1252 | Encoding::Cp1252Ns => {
                    crate::len_cp1252(unicode, crate::Cp1252Strictness::WindowsCompatible)
                }
                Encoding::Cp1252St => {
                    crate::len_cp1252(unicode, crate::Cp1252Strictness::StrictUndefined)
                }
                _ => crate::len_byte(unicode, self.ascii()),
            },
        }
    }

    /// The byte order mark length for this variant: 0 for CP1252, which has
    /// no mark.
    pub const fn len_bom(self) -> usize {
        match self {
            Encoding::Cp1252 | Encoding::Cp1252Ns | Encoding::Cp1252St => 0,
            _ => match self.family() {
                Family::Utf16Le | Family::Utf16Be => 2,
                Family::Utf32Le | Family::Utf32Be => 4,
                _ => 3,
            },
        }
    }

    /// The NUL code-point length for this variant: one code-unit.
    pub const fn len_null(self) -> usize {
        self.unit_size()
    }
}

/// Identifies an encoding family from the start of a buffer.
///
/// A byte order mark decides directly; without one, two leading code-units
/// whose scalar values fall in the ASCII range `0x01..=0x7F` give the unit
/// size and endianness away.  Returns the family and the byte order mark
/// length (0, 2, 3 or 4).
pub fn identify(buffer: &[u8]) -> (Family, usize) {
    if buffer.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return (Family::Utf8, 3);
    }
    if buffer.starts_with(&[0xFF, 0xFE, 0x00, 0x00]) {
        return (Family::Utf32Le, 4);
    }
    if buffer.starts_with(&[0x00, 0x00, 0xFE, 0xFF]) {
        return (Family::Utf32Be, 4);
    }
    if buffer.starts_with(&[0xFF, 0xFE]) {
        return (Family::Utf16Le, 2);
    }
    if buffer.starts_with(&[0xFE, 0xFF]) {
        return (Family::Utf16Be, 2);
    }
    let ascii = |byte: u8| (0x01..=0x7F).contains(&byte);
    if buffer.len() >= 8 {
        if ascii(buffer[0]) && buffer[1..4] == [0, 0, 0] && ascii(buffer[4]) && buffer[5..8] == [0, 0, 0]
        {
            return (Family::Utf32Le, 0);
        }
        if buffer[0..3] == [0, 0, 0] && ascii(buffer[3]) && buffer[4..7] == [0, 0, 0] && ascii(buffer[7])
        {
            return (Family::Utf32Be, 0);
        }
    }
    if buffer.len() >= 4 {
        if ascii(buffer[0]) && buffer[1] == 0 && ascii(buffer[2]) && buffer[3] == 0 {
            return (Family::Utf16Le, 0);
        }
        if buffer[0] == 0 && ascii(buffer[1]) && buffer[2] == 0 && ascii(buffer[3]) {
            return (Family::Utf16Be, 0);
        }
    }
    if buffer.len() >= 2 && ascii(buffer[0]) && ascii(buffer[1]) {
        return (Family::Utf8, 0);
    }
    (Family::Other, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_sizes() {
        assert_eq!(Encoding::Utf8.unit_size(), 1);
        assert_eq!(Encoding::JCesu8St.unit_size(), 1);
        assert_eq!(Encoding::Utf16Be.unit_size(), 2);
        assert_eq!(Encoding::Ucs2Le.unit_size(), 2);
        assert_eq!(Encoding::Cesu4Be.unit_size(), 4);
        assert_eq!(Encoding::Cp1252.unit_size(), 1);
    }

    #[test]
    fn test_family_defaults() {
        assert_eq!(Encoding::from_family(Family::Utf8), Encoding::Utf8St);
        assert_eq!(Encoding::from_family(Family::Utf16Be), Encoding::Utf16Be);
        assert_eq!(Encoding::from_family(Family::Other), Encoding::JUtf8St);
        assert_eq!(
            Encoding::from_other(OtherEncoding::Iso8859_1),
            Encoding::ByteNs
        );
        assert_eq!(Encoding::from_other(OtherEncoding::Cp1252), Encoding::Cp1252St);
    }

    #[test]
    fn test_switches() {
        assert!(Encoding::JCesu8St.cesu());
        assert!(Encoding::JCesu8St.java());
        assert!(Encoding::JCesu8St.strict());
        assert!(!Encoding::JCesu8St.coalesce());

        assert!(Encoding::Utf8.coalesce());
        assert!(!Encoding::Utf8.strict());
        assert!(!Encoding::Utf8Ns.coalesce());

        assert!(Encoding::Cesu4Le.cesu());
        assert!(Encoding::Cesu4Le.ucs4());
        assert!(!Encoding::Cesu32Le.ucs4());
        assert!(Encoding::Ucs2Be.ucs2());
        assert!(Encoding::AsciiNs.ascii());
        assert!(!Encoding::ByteNs.ascii());
    }

    #[test]
    fn test_len_dispatch() {
        assert_eq!(Encoding::Utf8.len(0x1F600), 4);
        assert_eq!(Encoding::Cesu8.len(0x1F600), 6);
        assert_eq!(Encoding::JUtf8.len(0), 2);
        assert_eq!(Encoding::Utf16Le.len(0x1F600), 4);
        assert_eq!(Encoding::Ucs2Le.len(0x1F600), 0);
        assert_eq!(Encoding::Cesu32Be.len(0x1F600), 8);
        assert_eq!(Encoding::Byte.len(0xE9), 1);
        assert_eq!(Encoding::Ascii.len(0xE9), 0);
        assert_eq!(Encoding::Cp1252.len(0x20AC), 1);
        assert_eq!(Encoding::Cp1252.len(0x81), 1);
        assert_eq!(Encoding::Cp1252St.len(0x81), 0);
    }

    #[test]
    fn test_bom_and_null_lengths() {
        assert_eq!(Encoding::Utf8.len_bom(), 3);
        assert_eq!(Encoding::Byte.len_bom(), 3);
        assert_eq!(Encoding::Utf16Le.len_bom(), 2);
        assert_eq!(Encoding::Ucs4Be.len_bom(), 4);
        assert_eq!(Encoding::Cp1252St.len_bom(), 0);

        assert_eq!(Encoding::JUtf8.len_null(), 1);
        assert_eq!(Encoding::Ucs2Be.len_null(), 2);
        assert_eq!(Encoding::Cesu32Le.len_null(), 4);
    }

    #[test]
    fn test_identify_boms() {
        assert_eq!(identify(&[0xEF, 0xBB, 0xBF, b'a']), (Family::Utf8, 3));
        assert_eq!(identify(&[0xFF, 0xFE, b'a', 0x00]), (Family::Utf16Le, 2));
        assert_eq!(identify(&[0xFE, 0xFF, 0x00, b'a']), (Family::Utf16Be, 2));
        assert_eq!(
            identify(&[0xFF, 0xFE, 0x00, 0x00, b'a', 0, 0, 0]),
            (Family::Utf32Le, 4)
        );
        assert_eq!(
            identify(&[0x00, 0x00, 0xFE, 0xFF, 0, 0, 0, b'a']),
            (Family::Utf32Be, 4)
        );
    }

    #[test]
    fn test_identify_heuristics() {
        assert_eq!(identify(b"hello"), (Family::Utf8, 0));
        assert_eq!(identify(b"a\x00b\x00"), (Family::Utf16Le, 0));
        assert_eq!(identify(b"\x00a\x00b"), (Family::Utf16Be, 0));
        assert_eq!(
            identify(b"a\x00\x00\x00b\x00\x00\x00"),
            (Family::Utf32Le, 0)
        );
        assert_eq!(
            identify(b"\x00\x00\x00a\x00\x00\x00b"),
            (Family::Utf32Be, 0)
        );
        assert_eq!(identify(&[0x90, 0x91]), (Family::Other, 0));
        assert_eq!(identify(b""), (Family::Other, 0));
    }
}
