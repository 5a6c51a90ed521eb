//! The diagnostic bitset returned by every codec operation.
//!
//! A single 32-bit word carries errors, warnings and, in the lowest bits, the
//! relative index of the byte that broke a multi-byte sequence.  Diagnostics
//! from sub-operations compose with bitwise OR.

use bitflags::bitflags;

use crate::Encoding;

bitflags! {
    /// Errors and warnings raised by encoding and decoding code-points.
    ///
    /// The top half of the word holds error bits, which always come with
    /// [`Diagnostics::FAILED`], and warning bits, which never block output.
    /// Bits 0 to 2 embed the relative offset of the offending byte within a
    /// failed multi-byte sequence (see [`Diagnostics::byte_index`]); bit 3 is
    /// reserved.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Diagnostics: u32 {
        /// The operation failed (one or more error bits are set).
        const FAILED            = 1 << 31;
        /// The cursor has no buffer.
        const INVALID_BUFFER    = 1 << 30;
        /// The cursor offset is greater than the buffer length.
        const INVALID_OFFSET    = 1 << 29;
        /// The cursor offset is not aligned to the code-unit size.
        const MISALIGNED_OFFSET = 1 << 28;
        /// The buffer length is not aligned to the code-unit size.
        const MISALIGNED_LENGTH = 1 << 27;
        /// The write would overflow the buffer.
        const WRITE_OVERFLOW    = 1 << 26;
        /// The read would overrun the buffer (the scalar is the lead byte).
        const READ_TRUNCATED    = 1 << 25;
        /// Warning: the read is at the end of the buffer (the scalar is 0).
        const READ_EXHAUSTED    = 1 << 24;
        /// The code-point is not encodable in the requested encoding.
        const NOT_ENCODABLE     = 1 << 23;
        /// The bytes are not decodable in the requested encoding.
        const NOT_DECODABLE     = 1 << 22;
        /// Warning: the code-point is in the invalid range above `0x7FFF_FFFF`.
        const INVALID_POINT     = 1 << 21;
        /// Warning: the code-point is in the extended UCS-4 range
        /// (`U+110000..=U+7FFFFFFF`).
        const EXTENDED_UCS4     = 1 << 20;
        /// Warning: the code-point is in the supplementary planes
        /// (`U+10000..=U+10FFFF`).
        const SUPPLEMENTARY     = 1 << 19;
        /// Warning: the code-point is a non-character.
        const NON_CHARACTER     = 1 << 18;
        /// Warning: a high surrogate whose trailing pair was cut short.
        const TRUNCATED_PAIR    = 1 << 17;
        /// Warning: the code-point travelled as a surrogate pair.
        const SURROGATE_PAIR    = 1 << 16;
        /// Warning: an unpaired high surrogate (`U+D800..=U+DBFF`).
        const HIGH_SURROGATE    = 1 << 15;
        /// Warning: an unpaired low surrogate (`U+DC00..=U+DFFF`).
        const LOW_SURROGATE     = 1 << 14;
        /// Warning: the code-point is NUL, the conventional string delimiter.
        const DELIMIT_STRING    = 1 << 13;
        /// Warning: the form decodes but is not compliant with the encoding
        /// standard.
        const IRREGULAR_FORM    = 1 << 12;
        /// The requested UTF-8 encoding length is outside 1 to 6.
        const BAD_SIZE_UTF8     = 1 << 11;
        /// Warning: the two-byte modified encoding of NUL.
        const MODIFIED_UTF8     = 1 << 10;
        /// Warning: the UTF-8 form is overlong.
        const OVERLONG_UTF8     = 1 << 9;
        /// Warning: a 5 or 6 byte extended UTF-8 form.
        const EXTENDED_UTF8     = 1 << 8;
        /// The code-point cannot be transformed to or from the encoding.
        const UNTRANSFORMABLE   = 1 << 7;
        /// The code-point needs more bits than the encoding provides.
        const NOT_ENOUGH_BITS   = 1 << 6;
        /// A byte the encoding specification never allows.
        const DISALLOWED_BYTE   = 1 << 5;
        /// A byte that is legal but appeared in an unexpected position.
        const UNEXPECTED_BYTE   = 1 << 4;
        /// Reserved.
        const RESERVED_BIT_3    = 1 << 3;
        /// Byte index storage.
        const RESERVED_BIT_2    = 1 << 2;
        /// Byte index storage.
        const RESERVED_BIT_1    = 1 << 1;
        /// Byte index storage.
        const RESERVED_BIT_0    = 1 << 0;
    }
}

impl Diagnostics {
    /// Every error bit, [`Diagnostics::FAILED`] included.
    pub const ERRORS: Self = Self::from_bits_retain(
        Self::FAILED.bits()
            | Self::INVALID_BUFFER.bits()
            | Self::INVALID_OFFSET.bits()
            | Self::MISALIGNED_OFFSET.bits()
            | Self::MISALIGNED_LENGTH.bits()
            | Self::WRITE_OVERFLOW.bits()
            | Self::READ_TRUNCATED.bits()
            | Self::NOT_ENCODABLE.bits()
            | Self::NOT_DECODABLE.bits()
            | Self::BAD_SIZE_UTF8.bits()
            | Self::UNTRANSFORMABLE.bits()
            | Self::NOT_ENOUGH_BITS.bits()
            | Self::DISALLOWED_BYTE.bits()
            | Self::UNEXPECTED_BYTE.bits(),
    );

    /// Every warning bit.
    pub const WARNINGS: Self = Self::from_bits_retain(
        Self::READ_EXHAUSTED.bits()
            | Self::INVALID_POINT.bits()
            | Self::EXTENDED_UCS4.bits()
            | Self::SUPPLEMENTARY.bits()
            | Self::NON_CHARACTER.bits()
            | Self::TRUNCATED_PAIR.bits()
            | Self::SURROGATE_PAIR.bits()
            | Self::HIGH_SURROGATE.bits()
            | Self::LOW_SURROGATE.bits()
            | Self::DELIMIT_STRING.bits()
            | Self::IRREGULAR_FORM.bits()
            | Self::MODIFIED_UTF8.bits()
            | Self::OVERLONG_UTF8.bits()
            | Self::EXTENDED_UTF8.bits(),
    );

    /// The structural buffer error bits.
    pub const BUFFER_ERRORS: Self = Self::from_bits_retain(
        Self::INVALID_BUFFER.bits()
            | Self::INVALID_OFFSET.bits()
            | Self::MISALIGNED_OFFSET.bits()
            | Self::MISALIGNED_LENGTH.bits(),
    );

    const RESERVED: u32 = Self::RESERVED_BIT_3.bits()
        | Self::RESERVED_BIT_2.bits()
        | Self::RESERVED_BIT_1.bits()
        | Self::RESERVED_BIT_0.bits();

    const BYTE_INDEX: u32 =
        Self::RESERVED_BIT_2.bits() | Self::RESERVED_BIT_1.bits() | Self::RESERVED_BIT_0.bits();

    const USE_REPLACEMENT: u32 =
        Self::NOT_DECODABLE.bits() | Self::NON_CHARACTER.bits() | Self::IRREGULAR_FORM.bits();

    /// Warnings a plain decoded scalar may carry and still count as a rune.
    const RUNE_ALLOWED: u32 = Self::SUPPLEMENTARY.bits()
        | Self::NON_CHARACTER.bits()
        | Self::SURROGATE_PAIR.bits()
        | Self::IRREGULAR_FORM.bits()
        | Self::MODIFIED_UTF8.bits()
        | Self::OVERLONG_UTF8.bits()
        | Self::EXTENDED_UTF8.bits();

    /// Warnings a strictly decoded UTF-16 scalar may carry.
    const UTF16_RUNE_ALLOWED: u32 =
        Self::SUPPLEMENTARY.bits() | Self::NON_CHARACTER.bits() | Self::SURROGATE_PAIR.bits();

    /// Warnings a strictly decoded UTF-8 or UTF-32 scalar may carry.
    const NON_UTF16_RUNE_ALLOWED: u32 = Self::SUPPLEMENTARY.bits() | Self::NON_CHARACTER.bits();

    /// Returns `true` if the operation failed.
    #[inline]
    pub const fn failed(self) -> bool {
        self.contains(Self::FAILED)
    }

    /// Returns `true` if any error bit is set.
    #[inline]
    pub const fn error(self) -> bool {
        self.intersects(Self::ERRORS)
    }

    /// Returns `true` if no error bit is set.  Warnings are permitted.
    #[inline]
    pub const fn no_error(self) -> bool {
        !self.error()
    }

    /// Returns `true` if any structural buffer error bit is set.
    #[inline]
    pub const fn buffer_error(self) -> bool {
        self.intersects(Self::BUFFER_ERRORS)
    }

    /// Returns `true` if any error or warning bit is set.
    ///
    /// The reserved byte-index bits do not count.
    #[inline]
    pub const fn any(self) -> bool {
        (self.bits() & !Self::RESERVED) != 0
    }

    /// Returns `true` if no error or warning bit is set.
    #[inline]
    pub const fn none(self) -> bool {
        !self.any()
    }

    /// Filters the bitset down to its error bits.
    #[inline]
    pub const fn errors_only(self) -> Self {
        self.intersection(Self::ERRORS)
    }

    /// Filters the bitset down to its warning bits.
    #[inline]
    pub const fn warnings_only(self) -> Self {
        self.intersection(Self::WARNINGS)
    }

    /// Filters the bitset down to its buffer error bits.
    #[inline]
    pub const fn buffer_errors_only(self) -> Self {
        self.intersection(Self::BUFFER_ERRORS)
    }

    /// Returns `true` if the caller should substitute `U+FFFD` for the
    /// decoded value.
    #[inline]
    pub const fn use_replacement_character(self) -> bool {
        (self.bits() & Self::USE_REPLACEMENT) != 0
    }

    /// Returns `true` if the decode produced a usable scalar value, strict or
    /// not.
    #[inline]
    pub const fn is_rune_value(self) -> bool {
        (self.bits() & !Self::RUNE_ALLOWED) == 0
    }

    /// Returns `true` if the decode produced a scalar that is strictly valid
    /// for the given encoding.
    ///
    /// Only the strict and non-skipping UTF-8 variants, the plain UTF-16
    /// variants and the plain UTF-32 variants have a notion of strict
    /// validity; every other encoding reports `false`.  UTF-16 additionally
    /// tolerates the surrogate pair warning, since pairs are how the format
    /// carries supplementary code-points.
    pub const fn is_strict_rune(self, encoding: Encoding) -> bool {
        match encoding {
            Encoding::Utf8Ns | Encoding::Utf8St | Encoding::Utf32Le | Encoding::Utf32Be => {
                (self.bits() & !Self::NON_UTF16_RUNE_ALLOWED) == 0
            }
            Encoding::Utf16Le | Encoding::Utf16Be => {
                (self.bits() & !Self::UTF16_RUNE_ALLOWED) == 0
            }
            _ => false,
        }
    }

    /// Returns the relative offset (0 to 7) of the byte that broke a
    /// multi-byte sequence.
    #[inline]
    pub const fn byte_index(self) -> u32 {
        self.bits() & Self::BYTE_INDEX
    }

    /// Stores the relative offset of the offending byte in the low bits.
    #[inline]
    pub fn set_byte_index(&mut self, index: u32) {
        *self = Self::from_bits_retain((self.bits() & !Self::BYTE_INDEX) | (index & Self::BYTE_INDEX));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_clean() {
        let status = Diagnostics::empty();
        assert!(!status.any());
        assert!(status.none());
        assert!(!status.failed());
        assert!(status.no_error());
    }

    #[test]
    fn test_error_composition() {
        let status = Diagnostics::FAILED | Diagnostics::INVALID_BUFFER;
        assert!(status.failed());
        assert!(status.error());
        assert!(status.buffer_error());
        assert!(status.contains(Diagnostics::INVALID_BUFFER));
    }

    #[test]
    fn test_errors_and_warnings_partition() {
        let status = Diagnostics::FAILED
            | Diagnostics::INVALID_BUFFER
            | Diagnostics::READ_EXHAUSTED
            | Diagnostics::INVALID_POINT;

        let errors = status.errors_only();
        assert!(errors.contains(Diagnostics::FAILED));
        assert!(errors.contains(Diagnostics::INVALID_BUFFER));
        assert!(!errors.intersects(Diagnostics::READ_EXHAUSTED | Diagnostics::INVALID_POINT));

        let warnings = status.warnings_only();
        assert!(warnings.contains(Diagnostics::READ_EXHAUSTED));
        assert!(warnings.contains(Diagnostics::INVALID_POINT));
        assert!(!warnings.intersects(Diagnostics::FAILED | Diagnostics::INVALID_BUFFER));
    }

    #[test]
    fn test_masks_cover_every_bit() {
        let all = Diagnostics::ERRORS.bits()
            | Diagnostics::WARNINGS.bits()
            | Diagnostics::RESERVED;
        assert_eq!(all, u32::MAX);
        assert_eq!(
            Diagnostics::ERRORS.bits() & Diagnostics::WARNINGS.bits(),
            0
        );
    }

    #[test]
    fn test_buffer_error_classification() {
        let status = Diagnostics::INVALID_OFFSET | Diagnostics::MISALIGNED_LENGTH;
        assert!(status.buffer_error());
        assert_eq!(status.buffer_errors_only(), status);
        assert!(!Diagnostics::FAILED.buffer_error());
    }

    #[test]
    fn test_byte_index_round_trip() {
        let mut status = Diagnostics::NOT_DECODABLE;
        status.set_byte_index(5);
        assert_eq!(status.byte_index(), 5);
        assert!(status.contains(Diagnostics::NOT_DECODABLE));
        status.set_byte_index(0);
        assert_eq!(status.byte_index(), 0);
    }

    #[test]
    fn test_byte_index_does_not_count_as_set() {
        let mut status = Diagnostics::empty();
        status.set_byte_index(7);
        assert!(status.none());
        assert!(status.no_error());
    }

    #[test]
    fn test_use_replacement_character() {
        assert!(Diagnostics::NOT_DECODABLE.use_replacement_character());
        assert!(Diagnostics::NON_CHARACTER.use_replacement_character());
        assert!(Diagnostics::IRREGULAR_FORM.use_replacement_character());
        assert!(!Diagnostics::SUPPLEMENTARY.use_replacement_character());
    }

    #[test]
    fn test_strict_rune_by_encoding() {
        let pair = Diagnostics::SUPPLEMENTARY | Diagnostics::SURROGATE_PAIR;
        assert!(pair.is_strict_rune(Encoding::Utf16Le));
        assert!(!pair.is_strict_rune(Encoding::Utf32Le));
        assert!(Diagnostics::SUPPLEMENTARY.is_strict_rune(Encoding::Utf8St));
        assert!(!Diagnostics::SUPPLEMENTARY.is_strict_rune(Encoding::Cesu8));
        assert!(!Diagnostics::IRREGULAR_FORM.is_strict_rune(Encoding::Utf8Ns));
    }

    #[test]
    fn test_rune_value_allows_form_warnings() {
        let status = Diagnostics::OVERLONG_UTF8 | Diagnostics::IRREGULAR_FORM;
        assert!(status.is_rune_value());
        assert!(!(status | Diagnostics::READ_EXHAUSTED).is_rune_value());
    }
}
