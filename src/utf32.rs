//! The UTF-32, UCS-4 and CESU-32 codec.
//!
//! The 32-bit code-unit is read directly in the selected endianness, so the
//! decoder mostly classifies.  `ucs4` widens the standard range to the full
//! 31 bits; `cesu` enables eight byte surrogate pair forms mirroring the
//! UTF-16 compatibility scheme.

use byteorder::ByteOrder;

use crate::classify::{is_high_surrogate, is_low_surrogate, is_surrogate};
use crate::{Cursor, Decoded, Diagnostics, Encoded, Unicode};

/// Returns the encoded length of `unicode` in UTF-32, or 0 when the value is
/// out of range.
pub const fn len_utf32(unicode: Unicode, cesu: bool, ucs4: bool) -> usize {
    let limit = if ucs4 { 0x7FFF_FFFF } else { 0x0010_FFFF };
    if unicode < 0 || unicode > limit {
        0
    } else if cesu && unicode >= 0x0001_0000 && unicode <= 0x0010_FFFF {
        8
    } else {
        4
    }
}

/// Decodes one UTF-32 code-point at the cursor position.
pub fn decode_utf32<E: ByteOrder, B: AsRef<[u8]>>(
    text: &Cursor<B>,
    cesu: bool,
    ucs4: bool,
) -> Decoded {
    let mut status = text.check_aligned(3);
    let mut unicode = 0;
    let mut bytes = 0;
    if status.no_error() {
        let tail = text.tail();
        if tail.len() < 4 {
            status |= if tail.is_empty() {
                Diagnostics::READ_EXHAUSTED
            } else {
                Diagnostics::FAILED | Diagnostics::READ_TRUNCATED
            };
        } else {
            unicode = E::read_u32(tail) as Unicode;
            bytes = 4;
            if unicode <= 0 {
                status |= if unicode != 0 {
                    Diagnostics::INVALID_POINT | Diagnostics::IRREGULAR_FORM
                } else {
                    Diagnostics::DELIMIT_STRING
                };
            } else if unicode >= 0xD800 {
                if unicode > 0x0010_FFFF {
                    status |= if ucs4 {
                        Diagnostics::EXTENDED_UCS4
                    } else {
                        Diagnostics::EXTENDED_UCS4 | Diagnostics::IRREGULAR_FORM
                    };
                } else if unicode >= 0xFDD0 {
                    if unicode <= 0xFDEF || (unicode & 0xFFFE) == 0xFFFE {
                        status |= Diagnostics::NON_CHARACTER;
                    }
                    if unicode > 0xFFFF {
                        status |= Diagnostics::SUPPLEMENTARY;
                    }
                } else if is_surrogate(unicode) {
                    status |= Diagnostics::IRREGULAR_FORM;
                    if unicode & 0x0400 != 0 {
                        status |= Diagnostics::LOW_SURROGATE;
                    } else {
                        status |= Diagnostics::HIGH_SURROGATE;
                        if cesu {
                            if tail.len() < 8 {
                                status |= Diagnostics::TRUNCATED_PAIR;
                            } else {
                                let low = E::read_u32(&tail[4..]) as Unicode;
                                if is_low_surrogate(low) {
                                    unicode =
                                        ((unicode & 0x3FF) << 10) + (low & 0x3FF) + 0x1_0000;
                                    bytes = 8;
                                    status.toggle(
                                        Diagnostics::SURROGATE_PAIR
                                            | Diagnostics::SUPPLEMENTARY
                                            | Diagnostics::HIGH_SURROGATE
                                            | Diagnostics::IRREGULAR_FORM,
                                    );
                                    if (unicode & 0xFFFE) == 0xFFFE {
                                        status |= Diagnostics::NON_CHARACTER;
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
    Decoded {
        unicode,
        bytes,
        status,
    }
}

/// Encodes one UTF-32 code-point at the cursor position.
///
/// The encoder is permissive: out of range and surrogate values are written
/// with warnings, so round-tripping arbitrary 32-bit units loses nothing.
pub fn encode_utf32<E: ByteOrder, B: AsRef<[u8]> + AsMut<[u8]>>(
    text: &mut Cursor<B>,
    unicode: Unicode,
    cesu: bool,
    ucs4: bool,
) -> Encoded {
    let mut status = text.check_aligned(3);
    if unicode <= 0 {
        status |= if unicode != 0 {
            Diagnostics::INVALID_POINT
        } else {
            Diagnostics::DELIMIT_STRING
        };
    } else if unicode >= 0xD800 {
        if unicode > 0x0010_FFFF {
            status |= if ucs4 {
                Diagnostics::EXTENDED_UCS4
            } else {
                Diagnostics::EXTENDED_UCS4 | Diagnostics::IRREGULAR_FORM
            };
        } else if unicode >= 0xFDD0 {
            if unicode <= 0xFDEF || (unicode & 0xFFFE) == 0xFFFE {
                status |= Diagnostics::NON_CHARACTER;
            }
            if unicode > 0xFFFF {
                status |= if cesu {
                    Diagnostics::SUPPLEMENTARY | Diagnostics::SURROGATE_PAIR
                } else {
                    Diagnostics::SUPPLEMENTARY
                };
            }
        } else if is_surrogate(unicode) {
            status |= Diagnostics::IRREGULAR_FORM
                | if unicode & 0x0400 != 0 {
                    Diagnostics::LOW_SURROGATE
                } else {
                    Diagnostics::HIGH_SURROGATE
                };
        }
    }
    let mut bytes = 0;
    if status.no_error() {
        let tail = text.tail_mut();
        if status.contains(Diagnostics::SURROGATE_PAIR) {
            if tail.len() < 8 {
                status |= Diagnostics::FAILED | Diagnostics::WRITE_OVERFLOW;
            } else {
                let offset = (unicode - 0x1_0000) as u32;
                E::write_u32(tail, 0xD800 + (offset >> 10));
                E::write_u32(&mut tail[4..], 0xDC00 + (offset & 0x3FF));
                bytes = 8;
            }
        } else if tail.len() < 4 {
            status |= Diagnostics::FAILED | Diagnostics::WRITE_OVERFLOW;
        } else {
            E::write_u32(tail, unicode as u32);
            bytes = 4;
        }
    }
    Encoded { bytes, status }
}

/// Advances the cursor by up to `count` UTF-32 code-points, returning how
/// many it moved over.  With `cesu`, adjacent high and low surrogate units
/// pair into one code-point.
pub fn step_utf32<E: ByteOrder, B: AsRef<[u8]>>(
    text: &mut Cursor<B>,
    count: usize,
    cesu: bool,
) -> usize {
    let mut points = 0;
    if count == 0 || !text.check_aligned(3).no_error() {
        return points;
    }
    let length = text.len();
    let mut limit = length - text.offset;
    if cesu {
        let Some(buffer) = text.buffer() else {
            return points;
        };
        let mut index = text.offset;
        while points < count && limit >= 4 {
            points += 1;
            let unicode = E::read_u32(&buffer[index..]) as Unicode;
            limit -= 4;
            index += 4;
            if is_high_surrogate(unicode) && limit >= 4 {
                // A trailing low surrogate completes the same code-point.
                let low = E::read_u32(&buffer[index..]) as Unicode;
                if is_low_surrogate(low) {
                    limit -= 4;
                    index += 4;
                }
            }
        }
    } else {
        points = (limit / 4).min(count);
        limit -= points * 4;
    }
    text.offset = length - limit;
    points
}

/// Moves the cursor back by up to `count` UTF-32 code-points, returning how
/// many it moved over.
pub fn back_utf32<E: ByteOrder, B: AsRef<[u8]>>(
    text: &mut Cursor<B>,
    count: usize,
    cesu: bool,
) -> usize {
    let mut points = 0;
    if count == 0 || !text.check_aligned(3).no_error() {
        return points;
    }
    let mut limit = text.offset;
    if cesu {
        let Some(buffer) = text.buffer() else {
            return points;
        };
        while points < count && limit >= 4 {
            points += 1;
            limit -= 4;
            let unicode = E::read_u32(&buffer[limit..]) as Unicode;
            if is_low_surrogate(unicode) && limit >= 4 {
                // A leading high surrogate belongs to the same code-point.
                let high = E::read_u32(&buffer[limit - 4..]) as Unicode;
                if is_high_surrogate(high) {
                    limit -= 4;
                }
            }
        }
    } else {
        points = (limit / 4).min(count);
        limit -= points * 4;
    }
    text.offset = limit;
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{BigEndian, LittleEndian};

    #[test]
    fn test_len_utf32() {
        assert_eq!(len_utf32(0x41, false, false), 4);
        assert_eq!(len_utf32(0x10FFFF, false, false), 4);
        assert_eq!(len_utf32(0x110000, false, false), 0);
        assert_eq!(len_utf32(0x110000, false, true), 4);
        assert_eq!(len_utf32(0x7FFFFFFF, false, true), 4);
        assert_eq!(len_utf32(0x10000, true, false), 8);
        assert_eq!(len_utf32(0xFFFF, true, false), 4);
        assert_eq!(len_utf32(-1, false, true), 0);
    }

    #[test]
    fn test_round_trip_both_endians() {
        let mut text = Cursor::new([0u8; 4]);
        let out = encode_utf32::<LittleEndian, _>(&mut text, 0x1F600, false, false);
        assert!(out.status.no_error());
        assert_eq!(out.bytes, 4);
        assert_eq!(text.buffer().unwrap(), &[0x00, 0xF6, 0x01, 0x00]);

        text.offset = 0;
        let back = decode_utf32::<LittleEndian, _>(&text, false, false);
        assert_eq!(back.unicode, 0x1F600);
        assert!(back.status.contains(Diagnostics::SUPPLEMENTARY));
        assert!(back.status.no_error());

        let mut text = Cursor::new([0u8; 4]);
        let out = encode_utf32::<BigEndian, _>(&mut text, 0x1F600, false, false);
        assert_eq!(out.bytes, 4);
        assert_eq!(text.buffer().unwrap(), &[0x00, 0x01, 0xF6, 0x00]);
    }

    #[test]
    fn test_extended_range() {
        let mut text = Cursor::new([0u8; 4]);
        let out = encode_utf32::<LittleEndian, _>(&mut text, 0x7FFF_FFFF, false, true);
        assert!(out.status.no_error());
        assert!(out.status.contains(Diagnostics::EXTENDED_UCS4));
        assert!(!out.status.contains(Diagnostics::IRREGULAR_FORM));

        text.offset = 0;
        let back = decode_utf32::<LittleEndian, _>(&text, false, true);
        assert_eq!(back.unicode, 0x7FFF_FFFF);
        assert!(!back.status.contains(Diagnostics::IRREGULAR_FORM));

        // Without the UCS-4 switch the same unit is irregular.
        let back = decode_utf32::<LittleEndian, _>(&text, false, false);
        assert!(back
            .status
            .contains(Diagnostics::EXTENDED_UCS4 | Diagnostics::IRREGULAR_FORM));
    }

    #[test]
    fn test_negative_unit_is_invalid_point() {
        let mut buffer = [0u8; 4];
        LittleEndian::write_u32(&mut buffer, 0x8000_0000);
        let text = Cursor::new(&buffer[..]);
        let out = decode_utf32::<LittleEndian, _>(&text, false, true);
        assert!(out
            .status
            .contains(Diagnostics::INVALID_POINT | Diagnostics::IRREGULAR_FORM));
        assert!(out.status.no_error());
        assert_eq!(out.bytes, 4);
    }

    #[test]
    fn test_cesu_pair_round_trip() {
        let mut text = Cursor::new([0u8; 8]);
        let out = encode_utf32::<LittleEndian, _>(&mut text, 0x10000, true, false);
        assert!(out.status.no_error());
        assert_eq!(out.bytes, 8);
        assert!(out
            .status
            .contains(Diagnostics::SUPPLEMENTARY | Diagnostics::SURROGATE_PAIR));
        assert_eq!(
            text.buffer().unwrap(),
            &[0x00, 0xD8, 0x00, 0x00, 0x00, 0xDC, 0x00, 0x00]
        );

        text.offset = 0;
        let back = decode_utf32::<LittleEndian, _>(&text, true, false);
        assert_eq!(back.unicode, 0x10000);
        assert_eq!(back.bytes, 8);
        assert!(back.status.no_error());
    }

    #[test]
    fn test_cesu_truncated_pair() {
        let mut buffer = [0u8; 4];
        LittleEndian::write_u32(&mut buffer, 0xD800);
        let text = Cursor::new(&buffer[..]);
        let out = decode_utf32::<LittleEndian, _>(&text, true, false);
        assert_eq!(out.unicode, 0xD800);
        assert_eq!(out.bytes, 4);
        assert!(out
            .status
            .contains(Diagnostics::HIGH_SURROGATE | Diagnostics::TRUNCATED_PAIR));
    }

    #[test]
    fn test_misalignment() {
        let text = Cursor::at(&[0u8; 8][..], 2);
        let out = decode_utf32::<LittleEndian, _>(&text, false, false);
        assert!(out.status.contains(Diagnostics::MISALIGNED_OFFSET));

        let text = Cursor::new(&[0u8; 6][..]);
        let out = decode_utf32::<LittleEndian, _>(&text, false, false);
        assert!(out.status.contains(Diagnostics::MISALIGNED_LENGTH));
    }

    #[test]
    fn test_step_cesu_pairs() {
        let mut buffer = [0u8; 12];
        LittleEndian::write_u32(&mut buffer, 0x41);
        LittleEndian::write_u32(&mut buffer[4..], 0xD800);
        LittleEndian::write_u32(&mut buffer[8..], 0xDC00);

        let mut text = Cursor::new(&buffer[..]);
        assert_eq!(step_utf32::<LittleEndian, _>(&mut text, 10, true), 2);
        assert_eq!(text.offset, 12);

        let mut text = Cursor::new(&buffer[..]);
        assert_eq!(step_utf32::<LittleEndian, _>(&mut text, 10, false), 3);

        let mut text = Cursor::at(&buffer[..], 12);
        assert_eq!(back_utf32::<LittleEndian, _>(&mut text, 10, true), 2);
        assert_eq!(text.offset, 0);
    }
}
