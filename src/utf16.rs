//! The UTF-16 and UCS-2 codec.
//!
//! Code-units are read and written through the [`byteorder::ByteOrder`]
//! trait, so every function takes the endianness as a type parameter.  The
//! `ucs2` switch restricts the scalar range to the basic multilingual plane
//! and disables surrogate pairing.

use byteorder::ByteOrder;

use crate::classify::{is_high_surrogate, is_low_surrogate, is_surrogate};
use crate::{Cursor, Decoded, Diagnostics, Encoded, Unicode};

/// Returns the encoded length of `unicode` in UTF-16, or 0 when the value is
/// not encodable.  Surrogate values still measure 2 bytes; they encode as
/// irregular single units.
pub const fn len_utf16(unicode: Unicode, ucs2: bool) -> usize {
    if unicode < 0 || unicode > 0x0010_FFFF {
        0
    } else if unicode <= 0xFFFF {
        2
    } else if ucs2 {
        0
    } else {
        4
    }
}

/// Decodes one UTF-16 code-point at the cursor position.
///
/// A high surrogate unit is joined with a following low surrogate unit into
/// one supplementary scalar unless `ucs2` is set; a lone surrogate comes
/// back as-is with its irregularity flagged.
pub fn decode_utf16<E: ByteOrder, B: AsRef<[u8]>>(text: &Cursor<B>, ucs2: bool) -> Decoded {
    let mut status = text.check_aligned(1);
    let mut unicode = 0;
    let mut bytes = 0;
    if status.no_error() {
        let tail = text.tail();
        if tail.len() < 2 {
            status |= if tail.is_empty() {
                Diagnostics::READ_EXHAUSTED
            } else {
                Diagnostics::FAILED | Diagnostics::READ_TRUNCATED
            };
        } else {
            unicode = E::read_u16(tail) as Unicode;
            bytes = 2;
            if unicode >= 0xD800 {
                if unicode >= 0xFDD0 {
                    if unicode <= 0xFDEF || (unicode & 0xFFFE) == 0xFFFE {
                        status |= Diagnostics::NON_CHARACTER;
                    }
                } else if is_surrogate(unicode) {
                    status |= Diagnostics::IRREGULAR_FORM;
                    if unicode & 0x0400 != 0 {
                        status |= Diagnostics::LOW_SURROGATE;
                    } else {
                        status |= Diagnostics::HIGH_SURROGATE;
                        if !ucs2 {
                            if tail.len() < 4 {
                                status |= Diagnostics::TRUNCATED_PAIR;
                            } else {
                                let low = E::read_u16(&tail[2..]) as Unicode;
                                if is_low_surrogate(low) {
                                    unicode =
                                        ((unicode & 0x3FF) << 10) + (low & 0x3FF) + 0x1_0000;
                                    bytes = 4;
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
            } else if unicode == 0 {
                status |= Diagnostics::DELIMIT_STRING;
            }
        }
    }
    Decoded {
        unicode,
        bytes,
        status,
    }
}

/// Encodes one UTF-16 code-point at the cursor position.
///
/// Supplementary code-points become surrogate pairs, or fail with
/// [`Diagnostics::NOT_ENOUGH_BITS`] under `ucs2`.  Lone surrogate values
/// encode as single irregular units.
pub fn encode_utf16<E: ByteOrder, B: AsRef<[u8]> + AsMut<[u8]>>(
    text: &mut Cursor<B>,
    unicode: Unicode,
    ucs2: bool,
) -> Encoded {
    let mut status = text.check_aligned(1);
    if unicode <= 0 {
        status |= if unicode != 0 {
            Diagnostics::FAILED
                | Diagnostics::NOT_ENCODABLE
                | Diagnostics::INVALID_POINT
                | Diagnostics::NOT_ENOUGH_BITS
        } else {
            Diagnostics::DELIMIT_STRING
        };
    } else if unicode >= 0xD800 {
        if unicode > 0x0010_FFFF {
            status |= Diagnostics::FAILED | Diagnostics::EXTENDED_UCS4 | Diagnostics::NOT_ENOUGH_BITS;
        } else if unicode >= 0xFDD0 {
            if unicode <= 0xFDEF || (unicode & 0xFFFE) == 0xFFFE {
                status |= Diagnostics::NON_CHARACTER;
            }
            if unicode > 0xFFFF {
                status |= if ucs2 {
                    Diagnostics::FAILED | Diagnostics::SUPPLEMENTARY | Diagnostics::NOT_ENOUGH_BITS
                } else {
                    Diagnostics::SUPPLEMENTARY | Diagnostics::SURROGATE_PAIR
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
            if tail.len() < 4 {
                status |= Diagnostics::FAILED | Diagnostics::WRITE_OVERFLOW;
            } else {
                let offset = (unicode - 0x1_0000) as u32;
                E::write_u16(tail, 0xD800 + (offset >> 10) as u16);
                E::write_u16(&mut tail[2..], 0xDC00 + (offset & 0x3FF) as u16);
                bytes = 4;
            }
        } else if tail.len() < 2 {
            status |= Diagnostics::FAILED | Diagnostics::WRITE_OVERFLOW;
        } else {
            E::write_u16(tail, unicode as u16);
            bytes = 2;
        }
    }
    Encoded { bytes, status }
}

/// Advances the cursor by up to `count` UTF-16 code-points, returning how
/// many it moved over.  Adjacent high and low surrogate units pair into one
/// code-point unless `ucs2` is set.
pub fn step_utf16<E: ByteOrder, B: AsRef<[u8]>>(
    text: &mut Cursor<B>,
    count: usize,
    ucs2: bool,
) -> usize {
    let mut points = 0;
    if count == 0 || !text.check_aligned(1).no_error() {
        return points;
    }
    let length = text.len();
    let mut limit = length - text.offset;
    if ucs2 {
        points = (limit / 2).min(count);
        limit -= points * 2;
    } else {
        let Some(buffer) = text.buffer() else {
            return points;
        };
        let mut index = text.offset;
        while points < count && limit >= 2 {
            points += 1;
            let unicode = E::read_u16(&buffer[index..]) as Unicode;
            limit -= 2;
            index += 2;
            if is_high_surrogate(unicode) && limit >= 2 {
                // A trailing low surrogate completes the same code-point.
                let low = E::read_u16(&buffer[index..]) as Unicode;
                if is_low_surrogate(low) {
                    limit -= 2;
                    index += 2;
                }
            }
        }
    }
    text.offset = length - limit;
    points
}

/// Moves the cursor back by up to `count` UTF-16 code-points, returning how
/// many it moved over.
pub fn back_utf16<E: ByteOrder, B: AsRef<[u8]>>(
    text: &mut Cursor<B>,
    count: usize,
    ucs2: bool,
) -> usize {
    let mut points = 0;
    if count == 0 || !text.check_aligned(1).no_error() {
        return points;
    }
    let mut limit = text.offset;
    if ucs2 {
        points = (limit / 2).min(count);
        limit -= points * 2;
    } else {
        let Some(buffer) = text.buffer() else {
            return points;
        };
        while points < count && limit >= 2 {
            points += 1;
            limit -= 2;
            let unicode = E::read_u16(&buffer[limit..]) as Unicode;
            if is_low_surrogate(unicode) && limit >= 2 {
                // A leading high surrogate belongs to the same code-point.
                let high = E::read_u16(&buffer[limit - 2..]) as Unicode;
                if is_high_surrogate(high) {
                    limit -= 2;
                }
            }
        }
    }
    text.offset = limit;
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{BigEndian, LittleEndian};

    #[test]
    fn test_len_utf16() {
        assert_eq!(len_utf16(0x41, false), 2);
        assert_eq!(len_utf16(0xFFFF, false), 2);
        assert_eq!(len_utf16(0xD800, false), 2);
        assert_eq!(len_utf16(0x10000, false), 4);
        assert_eq!(len_utf16(0x10000, true), 0);
        assert_eq!(len_utf16(0x110000, false), 0);
        assert_eq!(len_utf16(-1, false), 0);
    }

    #[test]
    fn test_surrogate_pair_little_endian() {
        let mut text = Cursor::new([0u8; 4]);
        let out = encode_utf16::<LittleEndian, _>(&mut text, 0x10000, false);
        assert!(out.status.no_error());
        assert_eq!(out.bytes, 4);
        assert!(out
            .status
            .contains(Diagnostics::SUPPLEMENTARY | Diagnostics::SURROGATE_PAIR));
        assert_eq!(text.buffer().unwrap(), &[0x00, 0xD8, 0x00, 0xDC]);

        text.offset = 0;
        let back = decode_utf16::<LittleEndian, _>(&text, false);
        assert_eq!(back.unicode, 0x10000);
        assert_eq!(back.bytes, 4);
        assert!(back.status.no_error());
        assert!(!back.status.contains(Diagnostics::IRREGULAR_FORM));
    }

    #[test]
    fn test_big_endian_unit_order() {
        let mut text = Cursor::new([0u8; 4]);
        let out = encode_utf16::<BigEndian, _>(&mut text, 0x20AC, false);
        assert_eq!(out.bytes, 2);
        assert_eq!(&text.buffer().unwrap()[..2], &[0x20, 0xAC]);
    }

    #[test]
    fn test_misalignment_is_structural() {
        let text = Cursor::at(&[0u8; 4][..], 1);
        let out = decode_utf16::<LittleEndian, _>(&text, false);
        assert!(out.status.contains(Diagnostics::MISALIGNED_OFFSET));
        assert_eq!(out.bytes, 0);

        let text = Cursor::new(&[0u8; 3][..]);
        let out = decode_utf16::<LittleEndian, _>(&text, false);
        assert!(out.status.contains(Diagnostics::MISALIGNED_LENGTH));
    }

    #[test]
    fn test_lone_surrogates() {
        let mut text = Cursor::new([0u8; 2]);
        let out = encode_utf16::<LittleEndian, _>(&mut text, 0xDC00, false);
        assert!(out.status.no_error());
        assert_eq!(out.bytes, 2);
        assert!(out
            .status
            .contains(Diagnostics::LOW_SURROGATE | Diagnostics::IRREGULAR_FORM));

        text.offset = 0;
        let back = decode_utf16::<LittleEndian, _>(&text, false);
        assert_eq!(back.unicode, 0xDC00);
        assert!(back
            .status
            .contains(Diagnostics::LOW_SURROGATE | Diagnostics::IRREGULAR_FORM));
    }

    #[test]
    fn test_unpaired_high_surrogate() {
        // High surrogate followed by a normal unit stays a lone unit.
        let mut buffer = [0u8; 4];
        LittleEndian::write_u16(&mut buffer, 0xD800);
        LittleEndian::write_u16(&mut buffer[2..], 0x41);
        let text = Cursor::new(&buffer[..]);
        let out = decode_utf16::<LittleEndian, _>(&text, false);
        assert_eq!(out.unicode, 0xD800);
        assert_eq!(out.bytes, 2);
        assert!(out
            .status
            .contains(Diagnostics::HIGH_SURROGATE | Diagnostics::IRREGULAR_FORM));
        assert!(!out.status.contains(Diagnostics::TRUNCATED_PAIR));
    }

    #[test]
    fn test_truncated_pair_at_end() {
        let mut buffer = [0u8; 2];
        LittleEndian::write_u16(&mut buffer, 0xD800);
        let text = Cursor::new(&buffer[..]);
        let out = decode_utf16::<LittleEndian, _>(&text, false);
        assert_eq!(out.bytes, 2);
        assert!(out
            .status
            .contains(Diagnostics::HIGH_SURROGATE | Diagnostics::TRUNCATED_PAIR));
    }

    #[test]
    fn test_ucs2_restriction() {
        let mut text = Cursor::new([0u8; 4]);
        let out = encode_utf16::<LittleEndian, _>(&mut text, 0x10000, true);
        assert!(out.status.failed());
        assert!(out
            .status
            .contains(Diagnostics::SUPPLEMENTARY | Diagnostics::NOT_ENOUGH_BITS));
        assert_eq!(out.bytes, 0);

        // A UCS-2 decode never pairs surrogates.
        let mut buffer = [0u8; 4];
        LittleEndian::write_u16(&mut buffer, 0xD800);
        LittleEndian::write_u16(&mut buffer[2..], 0xDC00);
        let text = Cursor::new(&buffer[..]);
        let out = decode_utf16::<LittleEndian, _>(&text, true);
        assert_eq!(out.unicode, 0xD800);
        assert_eq!(out.bytes, 2);
    }

    #[test]
    fn test_non_character_units() {
        let mut buffer = [0u8; 2];
        LittleEndian::write_u16(&mut buffer, 0xFFFE);
        let text = Cursor::new(&buffer[..]);
        let out = decode_utf16::<LittleEndian, _>(&text, false);
        assert!(out.status.contains(Diagnostics::NON_CHARACTER));
        assert!(out.status.no_error());
    }

    #[test]
    fn test_step_pairs_surrogates() {
        // "a" + U+10000 + "b" in UTF-16LE.
        let mut buffer = [0u8; 8];
        LittleEndian::write_u16(&mut buffer, 0x61);
        LittleEndian::write_u16(&mut buffer[2..], 0xD800);
        LittleEndian::write_u16(&mut buffer[4..], 0xDC00);
        LittleEndian::write_u16(&mut buffer[6..], 0x62);

        let mut text = Cursor::new(&buffer[..]);
        let points = step_utf16::<LittleEndian, _>(&mut text, 10, false);
        assert_eq!(points, 3);
        assert_eq!(text.offset, 8);

        let mut text = Cursor::new(&buffer[..]);
        let points = step_utf16::<LittleEndian, _>(&mut text, 2, false);
        assert_eq!(points, 2);
        assert_eq!(text.offset, 6);

        // UCS-2 counts plain units.
        let mut text = Cursor::new(&buffer[..]);
        let points = step_utf16::<LittleEndian, _>(&mut text, 10, true);
        assert_eq!(points, 4);
    }

    #[test]
    fn test_back_pairs_surrogates() {
        let mut buffer = [0u8; 8];
        LittleEndian::write_u16(&mut buffer, 0x61);
        LittleEndian::write_u16(&mut buffer[2..], 0xD800);
        LittleEndian::write_u16(&mut buffer[4..], 0xDC00);
        LittleEndian::write_u16(&mut buffer[6..], 0x62);

        let mut text = Cursor::at(&buffer[..], 8);
        let points = back_utf16::<LittleEndian, _>(&mut text, 10, false);
        assert_eq!(points, 3);
        assert_eq!(text.offset, 0);
    }
}
